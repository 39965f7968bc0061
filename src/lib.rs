//! parity-matrix: donor/port parity measurement for a moddable engine port.
//!
//! This library scans two parallel source trees — a feature-complete donor
//! (`sm64coopdx`) and a constrained-platform port (`sm64wiiu`) — and measures
//! the parity of their script-facing surface: registered script-callable
//! globals, hook enumerations, and hook dispatch callsites. The port's
//! built-in Lua mods are scanned for usages of names the port does not yet
//! provide, which drives a prioritized Phase 1 backlog.
//!
//! Extraction is pattern-based lexical scanning (see [`patterns`]), not real
//! parsing; the accepted false-positive/false-negative envelope is documented
//! on each scanner. Every collection is deduplicated and sorted before it
//! reaches a report, so two runs over unchanged trees produce byte-identical
//! output.
//!
//! # Example
//!
//! ```ignore
//! use parity_matrix::{pipeline, report, Workspace};
//!
//! let workspace = Workspace::discover(&std::env::current_dir()?)?;
//! let payload = pipeline::collect_payload(&workspace)?;
//! let written = report::write_reports(&payload, &workspace.port_root().join("parity"))?;
//! ```

pub mod aggregate;
pub mod cli;
pub mod error;
pub mod harvest;
pub mod hooks;
pub mod patterns;
pub mod pipeline;
pub mod queue;
pub mod report;
pub mod scan;
pub mod tree_diff;
pub mod usage;
pub mod workspace;

// Re-export commonly used types
pub use aggregate::{build_payload, ParityInputs, ParityPayload};
pub use cli::Cli;
pub use error::{ParityError, Result};
pub use harvest::{collect_registered_symbols, SymbolHarvest};
pub use hooks::{collect_hook_callsites, collect_hook_enums, CallsiteSummary, HookEnums};
pub use queue::{build_phase1_queue, Priority, QueueRow};
pub use tree_diff::{collect_tree_presence, TreePresence};
pub use usage::{collect_hook_usage, collect_symbol_usage, UsageMap, UsageRef};
pub use workspace::Workspace;
