//! Mod usage scanner: who in the port's built-in mods touches which names.
//!
//! Two passes share one walk-and-strip core: the symbol pass records
//! call-shaped identifiers that appear in a watch set, the hook pass records
//! every bare hook-shaped token. Lua comments are stripped first, block
//! comments by substitution that preserves the newline count so recorded
//! line numbers stay exact, then per-line trailing comments. The stripping is
//! heuristic text substitution, not a lexer; a comment marker inside a string
//! literal can leak a false match either way, and that risk is accepted.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::patterns::{
    RE_CALL_IDENT, RE_HOOK_TOKEN, RE_LUA_BLOCK_COMMENT, RE_LUA_LINE_COMMENT,
};
use crate::scan::{read_text_lossy, walk_sorted};

/// One usage of a watched name: file plus 1-based line. Provenance only,
/// never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageRef {
    pub path: String,
    pub line: usize,
}

/// Name -> usage references, in sorted-file then line order.
pub type UsageMap = BTreeMap<String, Vec<UsageRef>>;

/// Replace Lua block comments with an equal number of newlines.
///
/// Keeping the newline count intact means every line after a multi-line
/// block comment still reports its true 1-based position.
pub fn strip_block_comments(text: &str) -> String {
    RE_LUA_BLOCK_COMMENT
        .replace_all(text, |caps: &regex::Captures<'_>| {
            "\n".repeat(caps[0].matches('\n').count())
        })
        .into_owned()
}

/// Record every call-shaped occurrence of a watched symbol under `mods_root`.
pub fn collect_symbol_usage(mods_root: &Path, watch: &BTreeSet<String>) -> UsageMap {
    scan_lua_tree(mods_root, |line, usage_at| {
        for cap in RE_CALL_IDENT.captures_iter(line) {
            let name = &cap[1];
            if watch.contains(name) {
                usage_at(name);
            }
        }
    })
}

/// Record every bare hook-shaped token under `mods_root`. The watch set here
/// is the universe of hook-shaped strings; filtering against a particular
/// enum happens at aggregation time.
pub fn collect_hook_usage(mods_root: &Path) -> UsageMap {
    scan_lua_tree(mods_root, |line, usage_at| {
        for cap in RE_HOOK_TOKEN.captures_iter(line) {
            usage_at(&cap[1]);
        }
    })
}

fn scan_lua_tree<F>(mods_root: &Path, mut match_line: F) -> UsageMap
where
    F: FnMut(&str, &mut dyn FnMut(&str)),
{
    let mut usage: UsageMap = BTreeMap::new();

    for path in walk_sorted(mods_root, "lua") {
        let text = strip_block_comments(&read_text_lossy(&path));
        let file = path.display().to_string();
        let before = usage.values().map(Vec::len).sum::<usize>();

        for (idx, raw_line) in text.lines().enumerate() {
            let line = RE_LUA_LINE_COMMENT.replace(raw_line, "");
            let line_no = idx + 1;
            match_line(&line, &mut |name: &str| {
                usage.entry(name.to_string()).or_default().push(UsageRef {
                    path: file.clone(),
                    line: line_no,
                });
            });
        }

        let added = usage.values().map(Vec::len).sum::<usize>() - before;
        debug!("{}: {} usages", path.display(), added);
    }

    usage
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn watch(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn write(dir: &TempDir, rel: &str, content: &str) {
        let path = dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn call_shaped_usage_is_recorded_with_exact_line() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "m.lua",
            "local a = 1\nlocal s = get_mario_state(0)\nignored()\n",
        );

        let usage = collect_symbol_usage(dir.path(), &watch(&["get_mario_state"]));
        assert_eq!(
            usage["get_mario_state"],
            vec![UsageRef {
                path: dir.path().join("m.lua").display().to_string(),
                line: 2,
            }]
        );
        assert!(!usage.contains_key("ignored"));
    }

    #[test]
    fn line_numbers_survive_multiline_block_comments() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "m.lua",
            "--[[ header\nspanning\nthree lines ]]\nwarp_to_level(1)\n",
        );

        let usage = collect_symbol_usage(dir.path(), &watch(&["warp_to_level"]));
        assert_eq!(usage["warp_to_level"][0].line, 4);
    }

    #[test]
    fn commented_out_usage_is_not_recorded() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "m.lua",
            concat!(
                "-- warp_to_level(1)\n",
                "--[[ warp_to_level(2) ]]\n",
                "real() -- warp_to_level(3)\n",
            ),
        );

        let usage = collect_symbol_usage(dir.path(), &watch(&["warp_to_level"]));
        assert!(usage.is_empty());
    }

    #[test]
    fn bare_usage_without_call_paren_is_not_a_symbol_usage() {
        let dir = TempDir::new().unwrap();
        write(&dir, "m.lua", "local f = warp_to_level\n");

        let usage = collect_symbol_usage(dir.path(), &watch(&["warp_to_level"]));
        assert!(usage.is_empty());
    }

    #[test]
    fn hook_usage_records_bare_tokens() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "hooks.lua",
            "hook_event(HOOK_UPDATE, update)\nlocal t = { HOOK_ON_WARP }\n",
        );

        let usage = collect_hook_usage(dir.path());
        assert_eq!(usage["HOOK_UPDATE"][0].line, 1);
        assert_eq!(usage["HOOK_ON_WARP"][0].line, 2);
    }

    #[test]
    fn files_are_visited_in_sorted_order() {
        let dir = TempDir::new().unwrap();
        write(&dir, "b.lua", "spin()\n");
        write(&dir, "a.lua", "spin()\n");

        let usage = collect_symbol_usage(dir.path(), &watch(&["spin"]));
        let paths: Vec<_> = usage["spin"].iter().map(|r| r.path.clone()).collect();
        assert!(paths[0].ends_with("a.lua"));
        assert!(paths[1].ends_with("b.lua"));
    }
}
