//! Keel CLI
//!
//! Applies the routing overlay to a base profile document and writes the
//! generated profile.
//!
//! Usage:
//!   keel [--input base.yaml] [--output profile.yaml] [--json]

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use keel_profile::ProfileDocument;

/// Keel profile generator
#[derive(Parser, Debug)]
#[command(name = "keel")]
#[command(
    author,
    version,
    about = "Overlay the routing setup onto a Clash-family base profile"
)]
struct Args {
    /// Base profile document (YAML or JSON). Starts from an empty profile
    /// when omitted.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Where to write the generated profile. Stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit JSON instead of YAML.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so the generated profile can go to stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut profile = match &args.input {
        Some(path) => ProfileDocument::from_file(path)
            .with_context(|| format!("loading base profile {}", path.display()))?,
        None => ProfileDocument::new(),
    };

    profile.apply_overlay();

    let rendered = if args.json {
        profile.to_json()?
    } else {
        profile.to_yaml()?
    };

    match &args.output {
        Some(path) => std::fs::write(path, &rendered)
            .with_context(|| format!("writing profile to {}", path.display()))?,
        None => std::io::stdout().write_all(rendered.as_bytes())?,
    }

    Ok(())
}
