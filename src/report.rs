//! Report emitters: one JSON document and two Markdown documents.
//!
//! All three renderers are pure projections of the payload; they never
//! mutate it and produce byte-identical output for identical payloads.
//! Emission renders everything before writing anything, then lands each file
//! through a temp sibling plus atomic rename, so a failure can never leave
//! the three outputs in a mixed old/new state.

use std::fmt::Write as _;
use std::io;
use std::path::{Path, PathBuf};

use crate::aggregate::ParityPayload;
use crate::queue::QueueRow;
use crate::{ParityError, Result};

/// Structured document mirroring the payload verbatim.
pub const MATRIX_JSON: &str = "phase0_matrix.json";
/// Prose parity summary.
pub const MATRIX_MD: &str = "phase0_matrix.md";
/// Prose prioritized backlog.
pub const QUEUE_MD: &str = "phase1_port_queue.md";

/// Render the payload as pretty-printed JSON with a trailing newline.
pub fn render_json(payload: &ParityPayload) -> Result<String> {
    let body = serde_json::to_string_pretty(payload).map_err(|e| ParityError::Serialize {
        message: e.to_string(),
    })?;
    Ok(format!("{}\n", body))
}

fn preview<'a>(items: &'a [String], limit: usize) -> (Vec<&'a String>, usize) {
    let shown: Vec<&String> = items.iter().take(limit).collect();
    (shown, items.len().saturating_sub(limit))
}

fn code_list(items: &[&String]) -> String {
    items
        .iter()
        .map(|s| format!("`{}`", s))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render the parity summary document.
pub fn render_matrix_markdown(payload: &ParityPayload) -> String {
    let sp = &payload.symbol_parity;
    let hp = &payload.hook_parity;
    let cp = &payload.callsite_parity;
    let mut out = String::new();

    let _ = writeln!(out, "# Phase 0 Parity Matrix");
    let _ = writeln!(out);
    let _ = writeln!(out, "- Donor root: `{}`", payload.donor_root);
    let _ = writeln!(out, "- Port root: `{}`", payload.port_root);
    let _ = writeln!(out);

    let _ = writeln!(out, "## Script Symbol Parity");
    let _ = writeln!(out);
    let _ = writeln!(out, "- Donor registered globals: **{}**", sp.donor_count);
    let _ = writeln!(out, "- Port registered globals: **{}**", sp.port_count);
    let _ = writeln!(out, "- Shared globals: **{}**", sp.shared_count);
    let _ = writeln!(out, "- Missing on port: **{}**", sp.missing_count);
    let _ = writeln!(out, "- Port-only globals: **{}**", sp.port_only_count);
    let _ = writeln!(out);

    let _ = writeln!(out, "### Missing Globals Used By Current Built-In Mods");
    let _ = writeln!(out);
    if sp.missing_used_by_builtins.is_empty() {
        let _ = writeln!(out, "- None");
    } else {
        for (symbol, refs) in &sp.missing_used_by_builtins {
            let shown = refs
                .iter()
                .take(3)
                .map(|r| format!("`{}:{}`", r.path, r.line))
                .collect::<Vec<_>>()
                .join(", ");
            let suffix = if refs.len() > 3 {
                format!(" (+{} more)", refs.len() - 3)
            } else {
                String::new()
            };
            let _ = writeln!(out, "- `{}`: {}{}", symbol, shown, suffix);
        }
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "## Hook Surface Parity");
    let _ = writeln!(out);
    let _ = writeln!(out, "- Event hook count (donor): **{}**", hp.donor_hook_count);
    let _ = writeln!(out, "- Event hook count (port): **{}**", hp.port_hook_count);
    let _ = writeln!(out, "- Shared event hooks: **{}**", hp.shared_hook_count);
    let _ = writeln!(out, "- Missing event hooks on port: **{}**", hp.missing_hook_count);
    let _ = writeln!(out, "- Action hook count (donor): **{}**", hp.donor_action_hook_count);
    let _ = writeln!(out, "- Action hook count (port): **{}**", hp.port_action_hook_count);
    let _ = writeln!(out, "- Missing action hooks on port: **{}**", hp.missing_action_hook_count);
    let _ = writeln!(out);

    let _ = writeln!(out, "### Hook Dispatch Callsite Coverage");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "- Donor total hook callsites (`src/game`, `src/engine`, `src/audio`): **{}**",
        cp.donor_total_callsites
    );
    let _ = writeln!(
        out,
        "- Port total hook callsites (`src/game`, `src/engine`, `src/audio`): **{}**",
        cp.port_total_callsites
    );
    let _ = writeln!(out, "- Unique hook call helpers in donor: **{}**", cp.donor_unique_count);
    let _ = writeln!(out, "- Unique hook call helpers in port: **{}**", cp.port_unique_count);
    if !cp.missing_helpers.is_empty() {
        let (shown, _) = preview(&cp.missing_helpers, 12);
        let _ = writeln!(
            out,
            "- Missing unique hook helper calls on port (preview): {}",
            code_list(&shown)
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "## Module Tree Parity");
    let _ = writeln!(out);
    for entry in &payload.tree_parity {
        let _ = writeln!(
            out,
            "- `{}`: donor {}, port {}, shared {}, missing {}",
            entry.subdir,
            entry.donor_file_count,
            entry.port_file_count,
            entry.shared_count,
            entry.missing_count
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "## High-Level Phase 1 Queue");
    let _ = writeln!(out);
    for row in payload.phase1_queue.iter().take(20) {
        let builtins = if row.builtins_referencing_symbols.is_empty() {
            String::new()
        } else {
            let (shown, _) = preview(&row.builtins_referencing_symbols, 5);
            format!(
                " (built-ins use: {})",
                shown
                    .iter()
                    .map(|s| s.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        };
        let _ = writeln!(
            out,
            "- {} `{}`: {} missing symbols{}",
            row.priority.as_str(),
            row.donor_file,
            row.missing_symbol_count,
            builtins
        );
    }

    out
}

/// Render the prioritized backlog document, one subsection per queue row.
pub fn render_queue_markdown(rows: &[QueueRow]) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# Phase 1 Port Queue");
    let _ = writeln!(out);
    let _ = writeln!(out, "Prioritization:");
    let _ = writeln!(
        out,
        "- `P0`: donor symbols missing on the port and referenced by current built-in mods"
    );
    let _ = writeln!(out, "- `P1`: donor symbols missing on the port (general parity)");
    let _ = writeln!(
        out,
        "- `P2`: lower immediate impact (typically network/DJUI heavy paths)"
    );
    let _ = writeln!(out);

    for row in rows {
        let _ = writeln!(out, "## {} - `{}`", row.priority.as_str(), row.donor_file);
        let _ = writeln!(out);
        let _ = writeln!(out, "- Missing symbols: {}", row.missing_symbol_count);
        if row.builtins_referencing_symbols.is_empty() {
            let _ = writeln!(out, "- Referenced by built-in mods: none");
        } else {
            let refs: Vec<&String> = row.builtins_referencing_symbols.iter().collect();
            let _ = writeln!(out, "- Referenced by built-in mods: {}", code_list(&refs));
        }
        let (shown, rest) = preview(&row.missing_symbols, 25);
        let _ = writeln!(out, "- Symbol preview: {}", code_list(&shown));
        if rest > 0 {
            let _ = writeln!(out, "- ... plus {} more", rest);
        }
        let _ = writeln!(out);
    }

    out
}

/// Cross-platform atomic replacement; Windows needs the explicit delete.
fn atomic_rename(src: &Path, dst: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        if dst.exists() {
            std::fs::remove_file(dst)?;
        }
    }
    std::fs::rename(src, dst)
}

/// Render and write all three reports under `out_dir`, creating it if absent.
///
/// Everything is rendered before the first write, and each file is staged to
/// a `.tmp` sibling then renamed into place.
pub fn write_reports(payload: &ParityPayload, out_dir: &Path) -> Result<Vec<PathBuf>> {
    let json = render_json(payload)?;
    let matrix_md = render_matrix_markdown(payload);
    let queue_md = render_queue_markdown(&payload.phase1_queue);

    std::fs::create_dir_all(out_dir)?;

    let mut written = Vec::new();
    for (name, content) in [
        (MATRIX_JSON, json),
        (MATRIX_MD, matrix_md),
        (QUEUE_MD, queue_md),
    ] {
        let path = out_dir.join(name);
        let tmp = out_dir.join(format!("{}.tmp", name));
        std::fs::write(&tmp, content)?;
        atomic_rename(&tmp, &path)?;
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{build_payload, ParityInputs};
    use crate::harvest::SymbolHarvest;
    use crate::queue::Priority;
    use tempfile::TempDir;

    fn sample_payload() -> ParityPayload {
        build_payload(ParityInputs {
            donor_root: "sm64coopdx".into(),
            port_root: "sm64wiiu".into(),
            donor_symbols: SymbolHarvest {
                symbols: ["foo", "bar"].iter().map(|s| s.to_string()).collect(),
                providers: [("foo".to_string(), vec!["x.c".to_string()])]
                    .into_iter()
                    .collect(),
            },
            port_symbols: SymbolHarvest {
                symbols: ["bar"].iter().map(|s| s.to_string()).collect(),
                providers: Default::default(),
            },
            ..Default::default()
        })
    }

    #[test]
    fn json_round_trips_counts() {
        let json = render_json(&sample_payload()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["symbol_parity"]["missing_count"], 1);
        assert_eq!(value["symbol_parity"]["missing_symbols"][0], "foo");
        assert!(json.ends_with('\n'));
    }

    #[test]
    fn rendering_is_byte_reproducible() {
        let payload = sample_payload();
        assert_eq!(render_json(&payload).unwrap(), render_json(&payload).unwrap());
        assert_eq!(
            render_matrix_markdown(&payload),
            render_matrix_markdown(&payload)
        );
        assert_eq!(
            render_queue_markdown(&payload.phase1_queue),
            render_queue_markdown(&payload.phase1_queue)
        );
    }

    #[test]
    fn matrix_markdown_mentions_counts_and_queue() {
        let md = render_matrix_markdown(&sample_payload());
        assert!(md.contains("# Phase 0 Parity Matrix"));
        assert!(md.contains("- Missing on port: **1**"));
        assert!(md.contains("- P1 `x.c`: 1 missing symbols"));
    }

    #[test]
    fn queue_markdown_previews_and_truncates() {
        let symbols: Vec<String> = (0..30).map(|i| format!("sym_{:02}", i)).collect();
        let rows = vec![QueueRow {
            priority: Priority::P1,
            donor_file: "big.c".into(),
            missing_symbol_count: symbols.len(),
            missing_symbols: symbols,
            builtins_referencing_symbols: Vec::new(),
        }];

        let md = render_queue_markdown(&rows);
        assert!(md.contains("## P1 - `big.c`"));
        assert!(md.contains("`sym_24`"));
        assert!(!md.contains("`sym_25`"));
        assert!(md.contains("- ... plus 5 more"));
    }

    #[test]
    fn write_reports_creates_all_three_files() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("parity");

        let written = write_reports(&sample_payload(), &out).unwrap();
        assert_eq!(written.len(), 3);
        for path in &written {
            assert!(path.exists(), "missing {}", path.display());
        }
        assert!(!out.join(format!("{}.tmp", MATRIX_JSON)).exists());
    }
}
