use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::queries::Stat;

pub type Result<T> = std::result::Result<T, FactsError>;

/// Everything that can abort a fact generation run.
#[derive(Debug, Error)]
pub enum FactsError {
    #[error("snapshot {0:?} does not exist")]
    MissingSnapshot(PathBuf),
    #[error("failed to open snapshot {path:?}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    #[error("query '{stat}' failed")]
    Query {
        stat: Stat,
        #[source]
        source: rusqlite::Error,
    },
    #[error("query '{stat}' returned {found}, expected {expected}")]
    UnexpectedShape {
        stat: Stat,
        expected: &'static str,
        found: String,
    },
    #[error("snapshot has no non-redirect pages; percentages are undefined")]
    EmptySnapshot,
    #[error("failed to write report to {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Config(#[from] config::ConfigError),
}
