//! Pipeline orchestration: run every scanner once and assemble the payload.
//!
//! Each stage returns its results explicitly; nothing is accumulated in
//! shared state. Scanners read the filesystem exactly once per run, so the
//! payload is deterministic given the current tree contents.

use std::path::Path;

use tracing::info;

use crate::aggregate::{build_payload, ParityInputs, ParityPayload};
use crate::harvest::collect_registered_symbols;
use crate::hooks::{collect_hook_callsites, collect_hook_enums};
use crate::tree_diff::collect_tree_presence;
use crate::usage::{collect_hook_usage, collect_symbol_usage, UsageMap};
use crate::workspace::{
    Workspace, DONOR_DIR, HOOKS_HEADER, LUA_SUBTREE, MODS_SUBTREE, PORT_DIR, PRESENCE_SUBDIRS,
};
use crate::Result;

/// Run all scanners over the workspace and aggregate the parity payload.
pub fn collect_payload(workspace: &Workspace) -> Result<ParityPayload> {
    let donor_root = workspace.donor_root();
    let port_root = workspace.port_root();

    let mut donor_symbols = collect_registered_symbols(&donor_root.join(LUA_SUBTREE));
    let mut port_symbols = collect_registered_symbols(&port_root.join(LUA_SUBTREE));
    info!(
        "harvested {} donor / {} port symbols",
        donor_symbols.symbols.len(),
        port_symbols.symbols.len()
    );
    relativize_providers(workspace, &mut donor_symbols.providers);
    relativize_providers(workspace, &mut port_symbols.providers);

    let donor_hooks = collect_hook_enums(&donor_root.join(HOOKS_HEADER));
    let port_hooks = collect_hook_enums(&port_root.join(HOOKS_HEADER));

    let mods_root = port_root.join(MODS_SUBTREE);
    let mut builtin_symbol_usage = collect_symbol_usage(&mods_root, &donor_symbols.symbols);
    let mut builtin_hook_usage = collect_hook_usage(&mods_root);
    relativize_usage(workspace, &mut builtin_symbol_usage);
    relativize_usage(workspace, &mut builtin_hook_usage);

    let tree_parity = PRESENCE_SUBDIRS
        .iter()
        .map(|subdir| collect_tree_presence(&donor_root, &port_root, subdir))
        .collect();

    let donor_callsites = collect_hook_callsites(&donor_root);
    let port_callsites = collect_hook_callsites(&port_root);

    Ok(build_payload(ParityInputs {
        donor_root: DONOR_DIR.to_string(),
        port_root: PORT_DIR.to_string(),
        donor_symbols,
        port_symbols,
        donor_hooks,
        port_hooks,
        donor_callsites,
        port_callsites,
        builtin_symbol_usage,
        builtin_hook_usage,
        tree_parity,
    }))
}

fn relativize_providers(
    workspace: &Workspace,
    providers: &mut std::collections::BTreeMap<String, Vec<String>>,
) {
    for files in providers.values_mut() {
        for file in files.iter_mut() {
            *file = workspace.relativize(Path::new(file.as_str()));
        }
        files.sort();
        files.dedup();
    }
}

fn relativize_usage(workspace: &Workspace, usage: &mut UsageMap) {
    for refs in usage.values_mut() {
        for r in refs.iter_mut() {
            r.path = workspace.relativize(Path::new(r.path.as_str()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn provider_and_usage_paths_are_workspace_relative() {
        let dir = TempDir::new().unwrap();
        let donor = dir.path().join(DONOR_DIR);
        let port = dir.path().join(PORT_DIR);
        write(
            &donor,
            "src/pc/lua/smlua_functions.c",
            "smlua_bind_function(L, \"warp_to_level\", f);\n",
        );
        fs::create_dir_all(&port).unwrap();
        write(&port, "mods/warp.lua", "warp_to_level(1)\n");

        let workspace = Workspace::at(dir.path().to_path_buf()).unwrap();
        let payload = collect_payload(&workspace).unwrap();

        assert_eq!(
            payload.symbol_parity.donor_providers["warp_to_level"],
            vec!["sm64coopdx/src/pc/lua/smlua_functions.c"]
        );
        let refs = &payload.symbol_parity.missing_used_by_builtins["warp_to_level"];
        assert_eq!(refs[0].path, "sm64wiiu/mods/warp.lua");
        assert_eq!(refs[0].line, 1);
    }
}
