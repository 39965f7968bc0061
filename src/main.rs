//! parity-matrix CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use parity_matrix::{pipeline, report, Cli, Workspace};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn run() -> parity_matrix::Result<String> {
    let cli = Cli::parse();

    let workspace = match cli.workspace_root {
        Some(root) => Workspace::at(root)?,
        None => Workspace::discover(&std::env::current_dir()?)?,
    };

    if cli.verbose {
        eprintln!("Workspace root: {}", workspace.root().display());
        eprintln!("Donor root: {}", workspace.donor_root().display());
        eprintln!("Port root: {}", workspace.port_root().display());
    }

    let out_dir = cli
        .out_dir
        .unwrap_or_else(|| workspace.port_root().join("parity"));

    let payload = pipeline::collect_payload(&workspace)?;

    if cli.verbose {
        eprintln!(
            "Symbols: {} donor, {} port, {} missing",
            payload.symbol_parity.donor_count,
            payload.symbol_parity.port_count,
            payload.symbol_parity.missing_count
        );
    }

    let written = report::write_reports(&payload, &out_dir)?;

    let mut output = String::new();
    for path in written {
        output.push_str(&format!("Wrote: {}\n", path.display()));
    }
    Ok(output)
}
