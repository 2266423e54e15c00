//! Turns a page/link/redirect snapshot into a list of human-readable facts.
//!
//! Two phases:
//!   1. every registered query runs once and is normalized,
//!   2. the page total is derived, then every fact template is rendered.

pub mod config;
pub mod db;
pub mod error;
pub mod facts;
pub mod normalize;
pub mod queries;
pub mod report;
pub mod stats;

use std::time::Instant;

use rusqlite::Connection;
use tracing::info;

pub use error::{FactsError, Result};
pub use queries::Stat;

/// Runs the full pipeline against an open snapshot.
pub fn generate_facts(conn: &Connection, show_progress: bool) -> Result<Vec<String>> {
    let t0 = Instant::now();
    let results = normalize::run_all(conn, &Stat::ALL, show_progress)?;
    info!(
        queries = results.len(),
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "queries done"
    );

    let totals = stats::PageTotals::from_results(&results)?;
    let facts = facts::assemble(&results, totals)?;
    info!(facts = facts.len(), pages = totals.pages(), "facts assembled");
    Ok(facts)
}
