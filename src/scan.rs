//! Deterministic filesystem traversal and tolerant text reading.
//!
//! Every scanner in this crate lists files in sorted order so downstream
//! output never depends on directory iteration order, and reads source text
//! lossily so decoding anomalies degrade a single file instead of aborting a
//! whole scan.

use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

/// List every regular file under `root` with the given extension, sorted by
/// path. An absent root yields an empty list.
pub fn walk_sorted(root: &Path, extension: &str) -> Vec<PathBuf> {
    walk(root, Some(extension))
}

/// List every regular file under `root`, sorted by path. An absent root
/// yields an empty list.
pub fn walk_all_sorted(root: &Path) -> Vec<PathBuf> {
    walk(root, None)
}

fn walk(root: &Path, extension: Option<&str>) -> Vec<PathBuf> {
    if !root.is_dir() {
        return Vec::new();
    }
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(e) => {
                warn!("skipping unreadable entry under {}: {}", root.display(), e);
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter(|e| match extension {
            Some(ext) => e.path().extension().and_then(|x| x.to_str()) == Some(ext),
            None => true,
        })
        .map(|e| e.into_path())
        .collect()
}

/// Read a file as UTF-8 with lossy replacement of invalid sequences.
///
/// An unreadable file is logged and treated as empty; a scan never aborts on
/// a single bad file.
pub fn read_text_lossy(path: &Path) -> String {
    match std::fs::read(path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            warn!("could not read {}: {}", path.display(), e);
            String::new()
        }
    }
}
