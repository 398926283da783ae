//! Sprig - resolve repository addresses into fetchable descriptors.
//!
//! Usage:
//!   sprig hadley/dplyr@*release
//!   sprig jimhester/covr#47 jeroenooms/curl@v0.9.3 --format json

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sprig_core::prelude::*;

#[derive(Parser)]
#[command(name = "sprig")]
#[command(about = "Resolve repository addresses into fetchable descriptors", long_about = None)]
struct Cli {
    /// Repo specs to resolve, e.g. user/repo@ref, user/repo#123, user/repo@*release
    #[arg(required = true)]
    specs: Vec<String>,

    /// Fallback username for specs that embed none (deprecated; embed it in the spec)
    #[arg(long)]
    username: Option<String>,

    /// Fallback reference (branch, tag, or commit) for specs without a suffix
    #[arg(long = "ref")]
    reference: Option<String>,

    /// Fallback subdirectory for specs without one
    #[arg(long)]
    subdir: Option<String>,

    /// Repository API host
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    /// API token (falls back to $GITHUB_PAT, then $GITHUB_TOKEN)
    #[arg(long)]
    token: Option<String>,

    /// Known commit SHA to record in descriptor metadata
    #[arg(long)]
    sha: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "table")]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable lines
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sprig=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let defaults = ResolveDefaults {
        username: cli.username,
        reference: cli.reference,
        subdir: cli.subdir,
        host: Some(cli.host.clone()),
        auth_token: cli.token.or_else(auth_token_from_env),
        sha: cli.sha,
    };

    let query = GitHubApi::new(cli.host, defaults.auth_token.clone())?;
    let results = resolve_specs(&cli.specs, &defaults, &query).await;

    let failed = match cli.format {
        OutputFormat::Table => print_table(&cli.specs, &results),
        OutputFormat::Json => print_json(&cli.specs, &results)?,
    };

    if failed {
        std::process::exit(1);
    }
    Ok(())
}

/// Returns true if any spec failed to resolve.
fn print_table(specs: &[String], results: &[Result<ResolvedDescriptor, Error>]) -> bool {
    let mut failed = false;
    for (spec, result) in specs.iter().zip(results) {
        match result.as_ref().map(|d| d.download_url()) {
            Ok(Ok(url)) => println!("{spec} -> {url}"),
            Ok(Err(err)) => {
                failed = true;
                eprintln!("{spec}: {err}");
            }
            Err(err) => {
                failed = true;
                eprintln!("{spec}: {err}");
            }
        }
    }
    failed
}

/// Returns true if any spec failed to resolve.
fn print_json(specs: &[String], results: &[Result<ResolvedDescriptor, Error>]) -> Result<bool> {
    let mut failed = false;
    let mut entries = Vec::with_capacity(specs.len());

    for (spec, result) in specs.iter().zip(results) {
        match result {
            Ok(descriptor) => entries.push(serde_json::json!({
                "spec": spec,
                "descriptor": descriptor,
                "download_url": descriptor.download_url().ok().map(|url| url.to_string()),
                "metadata": descriptor.metadata(),
            })),
            Err(err) => {
                failed = true;
                entries.push(serde_json::json!({
                    "spec": spec,
                    "error": err.to_string(),
                }));
            }
        }
    }

    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(failed)
}

fn auth_token_from_env() -> Option<String> {
    std::env::var("GITHUB_PAT")
        .or_else(|_| std::env::var("GITHUB_TOKEN"))
        .ok()
}
