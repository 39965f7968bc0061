//! Phase 1 queue builder: missing symbols grouped into a prioritized backlog.
//!
//! Every missing symbol is attributed to each donor file that provides it, so
//! one symbol can appear in several buckets; a symbol with no known provider
//! lands in the `<unknown>` bucket instead of being dropped. Rows are totally
//! ordered so the backlog is reproducible across runs.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::usage::UsageMap;

/// Bucket key for missing symbols without a known donor provider.
pub const UNKNOWN_PROVIDER: &str = "<unknown>";

/// Queue priority tiers, totally ordered P0 < P1 < P2 < P3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Priority {
    P0,
    P1,
    P2,
    P3,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::P0 => "P0",
            Self::P1 => "P1",
            Self::P2 => "P2",
            Self::P3 => "P3",
        }
    }
}

/// One backlog row: a donor file and the missing symbols attributed to it.
#[derive(Debug, Clone, Serialize)]
pub struct QueueRow {
    pub priority: Priority,
    pub donor_file: String,
    pub missing_symbol_count: usize,
    pub missing_symbols: Vec<String>,
    pub builtins_referencing_symbols: Vec<String>,
}

/// Build the prioritized backlog from the missing-symbol set.
///
/// Priority per bucket: P0 when any symbol in the bucket is referenced by the
/// port's built-in mods (latent breakage), else P2 when the provider path
/// carries a networking or UI subsystem marker, else P1. P0 wins over P2.
/// Rows sort by (priority, missing count descending, donor file).
pub fn build_phase1_queue(
    missing_symbols: &BTreeSet<String>,
    donor_providers: &BTreeMap<String, Vec<String>>,
    builtin_usage: &UsageMap,
) -> Vec<QueueRow> {
    let mut buckets: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for symbol in missing_symbols {
        match donor_providers.get(symbol) {
            Some(providers) if !providers.is_empty() => {
                for provider in providers {
                    buckets.entry(provider.clone()).or_default().insert(symbol.clone());
                }
            }
            _ => {
                buckets
                    .entry(UNKNOWN_PROVIDER.to_string())
                    .or_default()
                    .insert(symbol.clone());
            }
        }
    }

    let mut rows: Vec<QueueRow> = buckets
        .into_iter()
        .map(|(donor_file, symbols)| {
            let used: Vec<String> = symbols
                .iter()
                .filter(|s| builtin_usage.contains_key(*s))
                .cloned()
                .collect();
            let priority = if !used.is_empty() {
                Priority::P0
            } else if donor_file.contains("network") || donor_file.contains("djui") {
                Priority::P2
            } else {
                Priority::P1
            };
            let missing_symbols: Vec<String> = symbols.into_iter().collect();
            QueueRow {
                priority,
                missing_symbol_count: missing_symbols.len(),
                donor_file,
                missing_symbols,
                builtins_referencing_symbols: used,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then(b.missing_symbol_count.cmp(&a.missing_symbol_count))
            .then(a.donor_file.cmp(&b.donor_file))
    });
    rows
}
