use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use tracing::info;

use wiki_facts::config::Settings;
use wiki_facts::{db, generate_facts, report};

#[derive(Parser)]
#[command(
    name = "wiki-facts",
    version,
    about = "Generate a JSON list of facts from a Wikipedia links snapshot"
)]
struct Cli {
    /// SQLite snapshot with pages, links and redirects tables
    snapshot: PathBuf,
    /// Where to write the facts JSON
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.kind() == ErrorKind::MissingRequiredArgument => {
            // Not enough arguments: show usage and leave without output.
            e.print()?;
            return Ok(());
        }
        Err(e) => e.exit(),
    };

    let settings = Settings::load().context("Failed to load settings")?;
    info!(settings = ?settings, "Starting fact generation");

    let t0 = Instant::now();
    let conn = db::connect(&cli.snapshot)
        .with_context(|| format!("Cannot use snapshot {:?}", cli.snapshot))?;
    println!("Snapshot: {:?}", cli.snapshot);

    let facts = generate_facts(&conn, settings.show_progress)?;

    report::write_facts(&cli.output, &facts, settings.indent)?;
    println!(
        "Wrote {} facts to {:?} in {:.1}s",
        facts.len(),
        cli.output,
        t0.elapsed().as_secs_f64()
    );
    Ok(())
}
