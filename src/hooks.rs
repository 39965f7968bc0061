//! Hook surface extraction: enum members and dispatch callsites.
//!
//! Two unrelated-but-adjacent extractors. The enum extractor reads one
//! designated header and pulls the ordered member lists of the two hook
//! enumerations. The callsite counter walks the gameplay source roots and
//! counts dispatch-helper tokens by naming convention; it has no notion of
//! call semantics, so a token inside a comment or string literal is counted
//! like any other. That limitation is part of the report contract.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use crate::patterns::{
    is_sentinel_enumerator, RE_ACTION_HOOK_BLOCK, RE_ACTION_HOOK_MEMBER, RE_EVENT_HOOK_BLOCK,
    RE_EVENT_HOOK_MEMBER, RE_HOOK_CALLSITE,
};
use crate::scan::{read_text_lossy, walk_sorted};
use crate::workspace::CALLSITE_ROOTS;

/// Ordered member lists of the two hook enumerations, sentinels excluded.
#[derive(Debug, Default, Clone)]
pub struct HookEnums {
    pub event_hooks: Vec<String>,
    pub action_hooks: Vec<String>,
}

/// Extract both hook enumerations from `header`.
///
/// A missing header or an unlocatable enum block degrades to an empty list;
/// comparing against an empty side is a reportable total mismatch, not a
/// pipeline failure.
pub fn collect_hook_enums(header: &Path) -> HookEnums {
    let text = read_text_lossy(header);

    let event_hooks = enum_members(&text, &RE_EVENT_HOOK_BLOCK, &RE_EVENT_HOOK_MEMBER);
    let action_hooks = enum_members(&text, &RE_ACTION_HOOK_BLOCK, &RE_ACTION_HOOK_MEMBER);
    debug!(
        "{}: {} event hooks, {} action hooks",
        header.display(),
        event_hooks.len(),
        action_hooks.len()
    );

    HookEnums {
        event_hooks,
        action_hooks,
    }
}

fn enum_members(text: &str, block: &regex::Regex, member: &regex::Regex) -> Vec<String> {
    let Some(cap) = block.captures(text) else {
        return Vec::new();
    };
    member
        .captures_iter(&cap[1])
        .map(|m| m[1].to_string())
        .filter(|name| !is_sentinel_enumerator(name))
        .collect()
}

/// Per-token dispatch callsite counts across the gameplay source roots.
#[derive(Debug, Default, Clone)]
pub struct CallsiteSummary {
    pub total: usize,
    /// Token -> occurrence count, deterministically ordered.
    pub counts: BTreeMap<String, usize>,
}

impl CallsiteSummary {
    /// Sorted unique helper tokens.
    pub fn unique(&self) -> Vec<String> {
        self.counts.keys().cloned().collect()
    }
}

/// Count dispatch-helper tokens in every `*.c` file under the fixed callsite
/// roots of `project_root`. Absent roots are skipped.
pub fn collect_hook_callsites(project_root: &Path) -> CallsiteSummary {
    let mut summary = CallsiteSummary::default();

    for subdir in CALLSITE_ROOTS {
        for path in walk_sorted(&project_root.join(subdir), "c") {
            let text = read_text_lossy(&path);
            for cap in RE_HOOK_CALLSITE.captures_iter(&text) {
                *summary.counts.entry(cap[1].to_string()).or_insert(0) += 1;
                summary.total += 1;
            }
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const HEADER: &str = r#"
enum LuaHookedEventType {
    HOOK_UPDATE,
    HOOK_MARIO_UPDATE,
    HOOK_ON_WARP,
    HOOK_MAX,
};

enum LuaActionHookType {
    ACTION_HOOK_EVERY_FRAME,
    ACTION_HOOK_MAX,
};
"#;

    #[test]
    fn extracts_members_and_excludes_sentinels() {
        let dir = TempDir::new().unwrap();
        let header = dir.path().join("smlua_hooks.h");
        fs::write(&header, HEADER).unwrap();

        let enums = collect_hook_enums(&header);
        assert_eq!(
            enums.event_hooks,
            vec!["HOOK_UPDATE", "HOOK_MARIO_UPDATE", "HOOK_ON_WARP"]
        );
        assert_eq!(enums.action_hooks, vec!["ACTION_HOOK_EVERY_FRAME"]);
    }

    #[test]
    fn missing_header_degrades_to_empty_lists() {
        let dir = TempDir::new().unwrap();
        let enums = collect_hook_enums(&dir.path().join("absent.h"));
        assert!(enums.event_hooks.is_empty());
        assert!(enums.action_hooks.is_empty());
    }

    #[test]
    fn header_without_action_enum_yields_one_empty_list() {
        let dir = TempDir::new().unwrap();
        let header = dir.path().join("smlua_hooks.h");
        fs::write(&header, "enum LuaHookedEventType {\n    HOOK_UPDATE,\n};\n").unwrap();

        let enums = collect_hook_enums(&header);
        assert_eq!(enums.event_hooks, vec!["HOOK_UPDATE"]);
        assert!(enums.action_hooks.is_empty());
    }

    #[test]
    fn callsites_counted_across_fixed_roots_only() {
        let dir = TempDir::new().unwrap();
        for (rel, content) in [
            ("src/game/mario.c", "smlua_call_event_hooks(HOOK_UPDATE);\nsmlua_call_event_hooks(HOOK_ON_WARP);\n"),
            ("src/engine/surface.c", "smlua_call_action_hook(m);\n"),
            // Outside the fixed roots: ignored.
            ("src/pc/lua/smlua.c", "smlua_call_event_hooks(HOOK_UPDATE);\n"),
        ] {
            let path = dir.path().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }

        let summary = collect_hook_callsites(dir.path());
        assert_eq!(summary.total, 3);
        assert_eq!(summary.counts["smlua_call_event_hooks"], 2);
        assert_eq!(summary.counts["smlua_call_action_hook"], 1);
        assert_eq!(
            summary.unique(),
            vec!["smlua_call_action_hook", "smlua_call_event_hooks"]
        );
    }

    #[test]
    fn callsite_in_comment_still_counts() {
        // Accepted scanning noise: the counter does not understand comments.
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("src/audio/seq.c");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "// smlua_call_event_hooks(HOOK_UPDATE);\n").unwrap();

        let summary = collect_hook_callsites(dir.path());
        assert_eq!(summary.total, 1);
    }
}
