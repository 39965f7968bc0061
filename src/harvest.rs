//! Symbol harvester: registered script-callable globals per tree.
//!
//! Scans the scripting-integration C sources for the three registration
//! idioms in [`crate::patterns`] and records, per symbol, every file that
//! registers it. The C text is scanned raw, without comment stripping;
//! a registration inside a comment is a known false-positive class the
//! pattern table accepts. Overlapping registrations of one name across files
//! all survive as providers so ambiguous registration shows up in the report
//! instead of being hidden.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use tracing::debug;

use crate::patterns::{RE_BIND_FUNCTION, RE_PUSH_THEN_SET_GLOBAL, RE_SET_GLOBAL_FUNCTION};
use crate::scan::{read_text_lossy, walk_sorted};

/// The harvested symbol set plus per-symbol provider attribution.
#[derive(Debug, Default, Clone)]
pub struct SymbolHarvest {
    /// Every registered global name found in the tree.
    pub symbols: BTreeSet<String>,
    /// Symbol -> declaring files, deduplicated and sorted.
    pub providers: BTreeMap<String, Vec<String>>,
}

/// Harvest registered globals from every `*.c` file under `lua_root`.
///
/// An absent root yields an empty harvest; parity against an empty side is a
/// meaningful report, not a failure.
pub fn collect_registered_symbols(lua_root: &Path) -> SymbolHarvest {
    let mut symbols = BTreeSet::new();
    let mut providers: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for path in walk_sorted(lua_root, "c") {
        let text = read_text_lossy(&path);
        let provider = path.display().to_string();
        let mut found = 0usize;

        for re in [
            &*RE_SET_GLOBAL_FUNCTION,
            &*RE_BIND_FUNCTION,
            &*RE_PUSH_THEN_SET_GLOBAL,
        ] {
            for cap in re.captures_iter(&text) {
                let name = cap[1].to_string();
                providers
                    .entry(name.clone())
                    .or_default()
                    .insert(provider.clone());
                symbols.insert(name);
                found += 1;
            }
        }
        debug!("harvested {} registrations from {}", found, path.display());
    }

    SymbolHarvest {
        symbols,
        providers: providers
            .into_iter()
            .map(|(name, files)| (name, files.into_iter().collect()))
            .collect(),
    }
}
