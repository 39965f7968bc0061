//! Parity aggregator: merges every harvested input into the single payload.
//!
//! Pure set algebra over already-collected data. Per namespace (symbols,
//! event hooks, action hooks, callsite helpers): shared = donor ∩ port,
//! missing = donor − port, extra = port − donor. The payload is the one
//! aggregate root the reports project from; it is never mutated after
//! construction, and every collection in it is sorted before it lands here.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::harvest::SymbolHarvest;
use crate::hooks::{CallsiteSummary, HookEnums};
use crate::queue::{build_phase1_queue, QueueRow};
use crate::tree_diff::TreePresence;
use crate::usage::UsageMap;

/// Everything the aggregator consumes, collected by the pipeline.
#[derive(Debug, Default)]
pub struct ParityInputs {
    pub donor_root: String,
    pub port_root: String,
    pub donor_symbols: SymbolHarvest,
    pub port_symbols: SymbolHarvest,
    pub donor_hooks: HookEnums,
    pub port_hooks: HookEnums,
    pub donor_callsites: CallsiteSummary,
    pub port_callsites: CallsiteSummary,
    /// Built-in mod usage of donor symbols (call-shaped).
    pub builtin_symbol_usage: UsageMap,
    /// Built-in mod usage of hook-shaped tokens.
    pub builtin_hook_usage: UsageMap,
    pub tree_parity: Vec<TreePresence>,
}

#[derive(Debug, Serialize)]
pub struct SymbolParity {
    pub donor_count: usize,
    pub port_count: usize,
    pub shared_count: usize,
    pub missing_count: usize,
    pub port_only_count: usize,
    pub missing_symbols: Vec<String>,
    pub port_only_symbols: Vec<String>,
    /// Missing symbols that built-in mods already call: latent breakage.
    pub missing_used_by_builtins: UsageMap,
    pub donor_providers: std::collections::BTreeMap<String, Vec<String>>,
    pub port_providers: std::collections::BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct HookParity {
    pub donor_hook_count: usize,
    pub port_hook_count: usize,
    pub shared_hook_count: usize,
    pub missing_hook_count: usize,
    pub port_only_hook_count: usize,
    pub missing_hooks: Vec<String>,
    pub port_only_hooks: Vec<String>,
    pub donor_action_hook_count: usize,
    pub port_action_hook_count: usize,
    pub shared_action_hook_count: usize,
    pub missing_action_hook_count: usize,
    pub missing_action_hooks: Vec<String>,
    pub port_only_action_hooks: Vec<String>,
    /// Hook tokens used by built-in mods but absent from the port enum.
    pub missing_hook_usage_in_builtins: UsageMap,
}

#[derive(Debug, Serialize)]
pub struct CallsiteParity {
    pub donor_total_callsites: usize,
    pub port_total_callsites: usize,
    pub donor_unique_count: usize,
    pub port_unique_count: usize,
    pub missing_helpers: Vec<String>,
    pub port_only_helpers: Vec<String>,
    pub donor_counts: std::collections::BTreeMap<String, usize>,
    pub port_counts: std::collections::BTreeMap<String, usize>,
}

/// The aggregate root. Reports are pure projections of this value.
#[derive(Debug, Serialize)]
pub struct ParityPayload {
    pub donor_root: String,
    pub port_root: String,
    pub symbol_parity: SymbolParity,
    pub hook_parity: HookParity,
    pub callsite_parity: CallsiteParity,
    pub tree_parity: Vec<TreePresence>,
    pub phase1_queue: Vec<QueueRow>,
}

struct SetDiff {
    shared: Vec<String>,
    missing: Vec<String>,
    extra: Vec<String>,
}

fn diff(donor: &BTreeSet<String>, port: &BTreeSet<String>) -> SetDiff {
    SetDiff {
        shared: donor.intersection(port).cloned().collect(),
        missing: donor.difference(port).cloned().collect(),
        extra: port.difference(donor).cloned().collect(),
    }
}

/// Combine all harvested inputs into the parity payload.
pub fn build_payload(inputs: ParityInputs) -> ParityPayload {
    let symbols = diff(&inputs.donor_symbols.symbols, &inputs.port_symbols.symbols);
    let missing_set: BTreeSet<String> = symbols.missing.iter().cloned().collect();

    let missing_used_by_builtins: UsageMap = inputs
        .builtin_symbol_usage
        .iter()
        .filter(|(name, _)| missing_set.contains(*name))
        .map(|(name, refs)| (name.clone(), refs.clone()))
        .collect();

    let donor_hook_set: BTreeSet<String> = inputs.donor_hooks.event_hooks.iter().cloned().collect();
    let port_hook_set: BTreeSet<String> = inputs.port_hooks.event_hooks.iter().cloned().collect();
    let hooks = diff(&donor_hook_set, &port_hook_set);

    let donor_action_set: BTreeSet<String> =
        inputs.donor_hooks.action_hooks.iter().cloned().collect();
    let port_action_set: BTreeSet<String> =
        inputs.port_hooks.action_hooks.iter().cloned().collect();
    let action_hooks = diff(&donor_action_set, &port_action_set);

    let missing_hook_usage_in_builtins: UsageMap = inputs
        .builtin_hook_usage
        .iter()
        .filter(|(token, _)| !port_hook_set.contains(*token))
        .map(|(token, refs)| (token.clone(), refs.clone()))
        .collect();

    let donor_helper_set: BTreeSet<String> =
        inputs.donor_callsites.counts.keys().cloned().collect();
    let port_helper_set: BTreeSet<String> = inputs.port_callsites.counts.keys().cloned().collect();
    let helpers = diff(&donor_helper_set, &port_helper_set);

    let phase1_queue = build_phase1_queue(
        &missing_set,
        &inputs.donor_symbols.providers,
        &inputs.builtin_symbol_usage,
    );

    ParityPayload {
        donor_root: inputs.donor_root,
        port_root: inputs.port_root,
        symbol_parity: SymbolParity {
            donor_count: inputs.donor_symbols.symbols.len(),
            port_count: inputs.port_symbols.symbols.len(),
            shared_count: symbols.shared.len(),
            missing_count: symbols.missing.len(),
            port_only_count: symbols.extra.len(),
            missing_symbols: symbols.missing,
            port_only_symbols: symbols.extra,
            missing_used_by_builtins,
            donor_providers: inputs.donor_symbols.providers,
            port_providers: inputs.port_symbols.providers,
        },
        hook_parity: HookParity {
            donor_hook_count: donor_hook_set.len(),
            port_hook_count: port_hook_set.len(),
            shared_hook_count: hooks.shared.len(),
            missing_hook_count: hooks.missing.len(),
            port_only_hook_count: hooks.extra.len(),
            missing_hooks: hooks.missing,
            port_only_hooks: hooks.extra,
            donor_action_hook_count: donor_action_set.len(),
            port_action_hook_count: port_action_set.len(),
            shared_action_hook_count: action_hooks.shared.len(),
            missing_action_hook_count: action_hooks.missing.len(),
            missing_action_hooks: action_hooks.missing,
            port_only_action_hooks: action_hooks.extra,
            missing_hook_usage_in_builtins,
        },
        callsite_parity: CallsiteParity {
            donor_total_callsites: inputs.donor_callsites.total,
            port_total_callsites: inputs.port_callsites.total,
            donor_unique_count: donor_helper_set.len(),
            port_unique_count: port_helper_set.len(),
            missing_helpers: helpers.missing,
            port_only_helpers: helpers.extra,
            donor_counts: inputs.donor_callsites.counts,
            port_counts: inputs.port_callsites.counts,
        },
        tree_parity: inputs.tree_parity,
        phase1_queue,
    }
}
