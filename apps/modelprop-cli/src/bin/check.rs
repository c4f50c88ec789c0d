use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use modelprop_core::check::{check_taxonomies, load_listing};

/// Tests a modelprop json file: checks that the taxonomies listed in the
/// meta section are exactly the ones used in the data list.
#[derive(Parser, Debug)]
#[command(name = "modelprop-check", version, long_about = None)]
struct Cli {
    /// The json file to test.
    jsonfile: PathBuf,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let listing = load_listing(&cli.jsonfile).with_context(|| format!("cannot check {}", cli.jsonfile.display()))?;
    let report = check_taxonomies(&listing);
    print!("{report}");
    Ok(if report.is_ok() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
