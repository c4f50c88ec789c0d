use std::env;
use std::ffi::OsString;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use modelprop_core::config::Config;
use modelprop_core::query::{parse_taxonomy_selection, run};
use modelprop_core::types::QueryRequest;

/// Query a fragility/vulnerability model from the schema catalog
#[derive(Parser, Debug)]
#[command(name = "modelprop", version, long_about = None)]
struct Cli {
    /// Exposure/vulnerability schema
    schema: String,
    /// Type of exposed assets
    assetcategory: String,
    /// Damage or loss computation
    losscategory: String,
    /// Selected taxonomies as a JSON list, e.g. '["MUR-H1", "CR-PC"]'
    #[arg(short = 't', long, allow_hyphen_values = true)]
    taxonomies: Option<String>,
    /// Directory holding `schemas/` and `output/` (overrides the configured root)
    #[arg(long)]
    root: Option<String>,
}

/// Accept the single-dash `-taxonomies` spelling of older scripts.
fn normalize_args<I: IntoIterator<Item = OsString>>(args: I) -> Vec<OsString> {
    args.into_iter()
        .map(|arg| match arg.to_str() {
            Some(s) if s == "-taxonomies" || s.starts_with("-taxonomies=") => OsString::from(format!("-{s}")),
            _ => arg,
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse_from(normalize_args(env::args_os()));
    let config = Config::load().context("Error loading config")?;
    let mut settings = config.settings().context("Error reading settings")?;
    if let Some(root) = cli.root {
        settings = settings.with_root(root);
    }

    let request = QueryRequest {
        schema: cli.schema,
        asset_category: cli.assetcategory,
        loss_category: cli.losscategory,
        taxonomies: cli.taxonomies.as_deref().and_then(parse_taxonomy_selection),
    };
    let outcome = run(&settings, &request).with_context(|| format!("query on schema {} failed", request.schema))?;
    tracing::info!(
        output = %outcome.output_path.display(),
        taxonomies = outcome.taxonomies,
        rows = outcome.rows,
        "query complete"
    );
    Ok(())
}
