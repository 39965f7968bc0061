//! Tree presence differ: name-only file-set comparison per subdirectory.
//!
//! Compares corresponding subdirectories of the donor and port trees by
//! relative path string equality. File content is never read here.

use std::collections::BTreeSet;
use std::path::Path;

use serde::Serialize;

use crate::scan::walk_all_sorted;

/// File-set comparison result for one declared subdirectory.
#[derive(Debug, Clone, Serialize)]
pub struct TreePresence {
    pub subdir: String,
    pub donor_file_count: usize,
    pub port_file_count: usize,
    pub shared_count: usize,
    pub missing_count: usize,
    pub extra_count: usize,
    pub shared_files: Vec<String>,
    pub missing_files: Vec<String>,
    pub extra_files: Vec<String>,
}

/// Compare `subdir` under both roots. A subdirectory absent on either side
/// contributes an empty file set rather than an error.
pub fn collect_tree_presence(donor_root: &Path, port_root: &Path, subdir: &str) -> TreePresence {
    let donor_files = relative_files(&donor_root.join(subdir));
    let port_files = relative_files(&port_root.join(subdir));

    let shared_files: Vec<String> = donor_files.intersection(&port_files).cloned().collect();
    let missing_files: Vec<String> = donor_files.difference(&port_files).cloned().collect();
    let extra_files: Vec<String> = port_files.difference(&donor_files).cloned().collect();

    TreePresence {
        subdir: subdir.to_string(),
        donor_file_count: donor_files.len(),
        port_file_count: port_files.len(),
        shared_count: shared_files.len(),
        missing_count: missing_files.len(),
        extra_count: extra_files.len(),
        shared_files,
        missing_files,
        extra_files,
    }
}

fn relative_files(base: &Path) -> BTreeSet<String> {
    walk_all_sorted(base)
        .into_iter()
        .filter_map(|p| {
            p.strip_prefix(base).ok().map(|rel| {
                rel.components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/")
            })
        })
        .collect()
}
