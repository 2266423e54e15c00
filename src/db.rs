use std::path::Path;

use rusqlite::{Connection, OpenFlags};

use crate::error::{FactsError, Result};

/// Opens a snapshot for the lifetime of the run. The file must already exist;
/// this never creates a database.
pub fn connect(path: &Path) -> Result<Connection> {
    if !path.is_file() {
        return Err(FactsError::MissingSnapshot(path.to_path_buf()));
    }
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|source| FactsError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    // Opening is lazy; touch the schema so a non-SQLite file fails here.
    conn.query_row("SELECT COUNT(*) FROM sqlite_master", [], |r| r.get::<_, i64>(0))
        .map_err(|source| FactsError::Open {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(conn)
}
