//! Runs the registry once and reshapes raw rows into typed results.
//!
//! Collapse rules, applied in order:
//! 1. text columns get `_` turned into spaces and backslashes dropped,
//! 2. a one-column row becomes its bare value,
//! 3. a one-row result becomes that bare row.

use std::collections::BTreeMap;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use rusqlite::types::ValueRef;
use rusqlite::Connection;
use tracing::debug;

use crate::error::{FactsError, Result};
use crate::queries::{Shape, Stat};

#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Int(i64),
    Real(f64),
    Text(String),
}

impl Scalar {
    fn from_sql(value: ValueRef<'_>) -> Scalar {
        match value {
            ValueRef::Null => Scalar::Null,
            ValueRef::Integer(i) => Scalar::Int(i),
            ValueRef::Real(f) => Scalar::Real(f),
            ValueRef::Text(t) | ValueRef::Blob(t) => {
                Scalar::Text(clean_title(&String::from_utf8_lossy(t)))
            }
        }
    }

    /// Counts are never negative; NULL (e.g. `SUM` over no rows) reads as zero.
    pub fn as_count(&self) -> Option<u64> {
        match self {
            Scalar::Null => Some(0),
            Scalar::Int(i) => u64::try_from(*i).ok(),
            Scalar::Real(f) if *f >= 0.0 && f.fract() == 0.0 => Some(*f as u64),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s),
            _ => None,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Scalar::Null => "null",
            Scalar::Int(_) => "integer",
            Scalar::Real(_) => "real",
            Scalar::Text(_) => "text",
        }
    }
}

/// Output of one registered query after collapsing.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    /// One row of one column.
    Scalar(Scalar),
    /// One row of several columns.
    Tuple(Vec<Scalar>),
    /// Zero or several rows of one column.
    List(Vec<Scalar>),
    /// Several rows of several columns.
    Rows(Vec<Vec<Scalar>>),
}

impl Normalized {
    fn describe(&self) -> String {
        match self {
            Normalized::Scalar(s) => format!("a {} scalar", s.kind()),
            Normalized::Tuple(t) => format!("a {}-column row", t.len()),
            Normalized::List(l) => format!("a list of {}", l.len()),
            Normalized::Rows(r) => format!("{} rows", r.len()),
        }
    }
}

/// Replaces the title space placeholder and strips escape backslashes.
/// Idempotent.
pub fn clean_title(raw: &str) -> String {
    raw.chars()
        .filter(|&c| c != '\\')
        .map(|c| if c == '_' { ' ' } else { c })
        .collect()
}

/// Applies the collapse rules to rows that have already been cleaned.
pub fn normalize_rows(rows: Vec<Vec<Scalar>>) -> Normalized {
    let single_column = rows.iter().all(|r| r.len() == 1);
    if rows.len() == 1 {
        let mut row = rows.into_iter().next().unwrap_or_default();
        return if row.len() == 1 {
            Normalized::Scalar(row.remove(0))
        } else {
            Normalized::Tuple(row)
        };
    }
    if single_column {
        Normalized::List(rows.into_iter().flatten().collect())
    } else {
        Normalized::Rows(rows)
    }
}

fn run_query(conn: &Connection, stat: Stat) -> rusqlite::Result<Vec<Vec<Scalar>>> {
    let mut stmt = conn.prepare(stat.sql())?;
    let width = stmt.column_count();
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        let mut cols = Vec::with_capacity(width);
        for i in 0..width {
            cols.push(Scalar::from_sql(row.get_ref(i)?));
        }
        out.push(cols);
    }
    Ok(out)
}

/// Normalized results keyed by statistic, with typed accessors for the
/// shapes the templates consume.
#[derive(Debug, Default, Clone)]
pub struct Results {
    values: BTreeMap<Stat, Normalized>,
}

impl Results {
    pub fn insert(&mut self, stat: Stat, value: Normalized) {
        self.values.insert(stat, value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Looks up `stat`, refusing to read it through an accessor meant for a
    /// different shape.
    fn require(&self, stat: Stat, shape: Shape) -> Result<&Normalized> {
        if stat.shape() != shape {
            return Err(FactsError::UnexpectedShape {
                stat,
                expected: shape_name(stat.shape()),
                found: format!("a request for {}", shape_name(shape)),
            });
        }
        self.values.get(&stat).ok_or(FactsError::UnexpectedShape {
            stat,
            expected: shape_name(shape),
            found: "nothing".into(),
        })
    }

    pub fn count(&self, stat: Stat) -> Result<u64> {
        let value = self.require(stat, Shape::Count)?;
        let count = match value {
            Normalized::Scalar(s) => s.as_count(),
            _ => None,
        };
        count.ok_or_else(|| shape_error(stat, "a count", value))
    }

    /// A single title; `None` when the query matched no rows.
    pub fn text(&self, stat: Stat) -> Result<Option<String>> {
        match self.require(stat, Shape::Title)? {
            Normalized::Scalar(Scalar::Text(s)) => Ok(Some(s.clone())),
            Normalized::List(l) if l.is_empty() => Ok(None),
            other => Err(shape_error(stat, "a title", other)),
        }
    }

    /// A list of titles. A single match has been collapsed to a scalar and is
    /// expanded back into a one-element list here.
    pub fn texts(&self, stat: Stat) -> Result<Vec<String>> {
        let value = self.require(stat, Shape::Titles)?;
        let items: Vec<&Scalar> = match value {
            Normalized::Scalar(s) => vec![s],
            Normalized::List(l) => l.iter().collect(),
            other => return Err(shape_error(stat, "a list of titles", other)),
        };
        items
            .into_iter()
            .map(|s| s.as_text().map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| shape_error(stat, "a list of titles", value))
    }

    /// `(title, count)` pairs in rank order.
    pub fn ranked(&self, stat: Stat) -> Result<Vec<(String, u64)>> {
        let value = self.require(stat, Shape::Ranked)?;
        let rows: Vec<&[Scalar]> = match value {
            Normalized::Tuple(t) => vec![t.as_slice()],
            Normalized::Rows(r) => r.iter().map(Vec::as_slice).collect(),
            Normalized::List(l) if l.is_empty() => Vec::new(),
            other => return Err(shape_error(stat, "(title, count) rows", other)),
        };
        rows.into_iter()
            .map(|row| match row {
                [title, count] => Some((title.as_text()?.to_string(), count.as_count()?)),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| shape_error(stat, "(title, count) rows", value))
    }
}

fn shape_name(shape: Shape) -> &'static str {
    match shape {
        Shape::Count => "a count",
        Shape::Title => "a title",
        Shape::Titles => "a list of titles",
        Shape::Ranked => "(title, count) rows",
    }
}

/// Checks raw rows against the layout the registry declares for `stat`
/// before they are collapsed.
pub fn check_shape(stat: Stat, rows: &[Vec<Scalar>]) -> Result<()> {
    let shape = stat.shape();
    let width = if shape == Shape::Ranked { 2 } else { 1 };
    let fits = rows.iter().all(|r| r.len() == width)
        && match shape {
            Shape::Count => rows.len() == 1,
            Shape::Title => rows.len() <= 1,
            Shape::Titles | Shape::Ranked => true,
        };
    if fits {
        return Ok(());
    }
    Err(FactsError::UnexpectedShape {
        stat,
        expected: shape_name(shape),
        found: format!(
            "{} rows of {} columns",
            rows.len(),
            rows.first().map(Vec::len).unwrap_or(0)
        ),
    })
}

fn shape_error(stat: Stat, expected: &'static str, found: &Normalized) -> FactsError {
    FactsError::UnexpectedShape {
        stat,
        expected,
        found: found.describe(),
    }
}

/// Executes each registered query exactly once, in registry order.
pub fn run_all(conn: &Connection, stats: &[Stat], show_progress: bool) -> Result<Results> {
    let pb = if show_progress {
        ProgressBar::new(stats.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }

    let mut results = Results::default();
    for &stat in stats {
        pb.set_message(stat.name());
        let t0 = Instant::now();
        let rows = run_query(conn, stat).map_err(|source| FactsError::Query { stat, source })?;
        debug!(
            stat = stat.name(),
            rows = rows.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "query finished"
        );
        check_shape(stat, &rows)?;
        results.insert(stat, normalize_rows(rows));
        pb.inc(1);
    }
    pb.finish_and_clear();
    Ok(results)
}
