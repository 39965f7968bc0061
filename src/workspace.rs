//! Workspace discovery and the fixed layout both source trees are expected
//! to follow.
//!
//! The donor tree (`sm64coopdx/`) and the port tree (`sm64wiiu/`) sit side by
//! side under a common workspace root. All layout knowledge lives here as
//! named constants so the scanners stay layout-agnostic.

use std::path::{Path, PathBuf};

use crate::{ParityError, Result};

/// Directory name of the donor tree under the workspace root.
pub const DONOR_DIR: &str = "sm64coopdx";

/// Directory name of the port tree under the workspace root.
pub const PORT_DIR: &str = "sm64wiiu";

/// Subtree holding the scripting-runtime integration sources in each tree.
pub const LUA_SUBTREE: &str = "src/pc/lua";

/// Header declaring the two hook enumerations, relative to a tree root.
pub const HOOKS_HEADER: &str = "src/pc/lua/smlua_hooks.h";

/// Subtree holding a tree's built-in Lua mods.
pub const MODS_SUBTREE: &str = "mods";

/// Subdirectories compared file-by-file for tree presence.
pub const PRESENCE_SUBDIRS: [&str; 4] = [
    "src/pc/lua",
    "src/pc/mods",
    "src/pc/djui",
    "src/pc/network",
];

/// Subdirectories scanned for hook dispatch callsites.
pub const CALLSITE_ROOTS: [&str; 3] = ["src/game", "src/engine", "src/audio"];

/// A validated workspace root containing both trees.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Walk upward from `start` until a directory containing both
    /// [`DONOR_DIR`] and [`PORT_DIR`] is found.
    ///
    /// # Errors
    ///
    /// Returns [`ParityError::WorkspaceNotFound`] when no ancestor of
    /// `start` (including `start` itself) contains both trees.
    pub fn discover(start: &Path) -> Result<Self> {
        for candidate in start.ancestors() {
            if candidate.join(DONOR_DIR).is_dir() && candidate.join(PORT_DIR).is_dir() {
                return Ok(Self {
                    root: candidate.to_path_buf(),
                });
            }
        }
        Err(ParityError::WorkspaceNotFound {
            start: start.display().to_string(),
        })
    }

    /// Use `root` directly as the workspace root, validating that both
    /// expected trees exist under it.
    pub fn at(root: PathBuf) -> Result<Self> {
        for dir in [DONOR_DIR, PORT_DIR] {
            let tree = root.join(dir);
            if !tree.is_dir() {
                return Err(ParityError::MissingDirectory {
                    path: tree.display().to_string(),
                });
            }
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn donor_root(&self) -> PathBuf {
        self.root.join(DONOR_DIR)
    }

    pub fn port_root(&self) -> PathBuf {
        self.root.join(PORT_DIR)
    }

    /// Render `path` relative to the workspace root with forward slashes.
    ///
    /// Paths outside the workspace pass through unchanged; report provenance
    /// should stay readable even for unexpected inputs.
    pub fn relativize(&self, path: &Path) -> String {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        rel.components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn seeded_workspace() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(DONOR_DIR)).unwrap();
        fs::create_dir_all(dir.path().join(PORT_DIR)).unwrap();
        dir
    }

    #[test]
    fn discover_finds_root_from_nested_start() {
        let dir = seeded_workspace();
        let nested = dir.path().join(PORT_DIR).join("tools/parity");
        fs::create_dir_all(&nested).unwrap();

        let ws = Workspace::discover(&nested).unwrap();
        assert_eq!(ws.root(), dir.path());
    }

    #[test]
    fn discover_fails_without_both_trees() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(DONOR_DIR)).unwrap();

        let err = Workspace::discover(dir.path()).unwrap_err();
        assert!(matches!(err, ParityError::WorkspaceNotFound { .. }));
    }

    #[test]
    fn at_rejects_missing_port_tree() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(DONOR_DIR)).unwrap();

        let err = Workspace::at(dir.path().to_path_buf()).unwrap_err();
        assert!(matches!(err, ParityError::MissingDirectory { .. }));
    }

    #[test]
    fn relativize_strips_root_and_uses_forward_slashes() {
        let dir = seeded_workspace();
        let ws = Workspace::at(dir.path().to_path_buf()).unwrap();

        let inside = dir.path().join(DONOR_DIR).join("src/pc/lua/smlua.c");
        assert_eq!(ws.relativize(&inside), "sm64coopdx/src/pc/lua/smlua.c");
    }
}
