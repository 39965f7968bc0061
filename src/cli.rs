//! CLI argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

/// Donor/port parity matrix and port-queue generator
#[derive(Parser, Debug)]
#[command(name = "parity-matrix")]
#[command(about = "Generate parity reports between the donor and port source trees")]
#[command(version)]
pub struct Cli {
    /// Workspace root containing sm64coopdx/ and sm64wiiu/ (auto-discovered
    /// by walking upward from the current directory when omitted)
    #[arg(long, value_name = "DIR")]
    pub workspace_root: Option<PathBuf>,

    /// Output directory for generated parity artifacts
    /// (default: <port>/parity, created if absent)
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Show progress output on stderr
    #[arg(short, long)]
    pub verbose: bool,
}
