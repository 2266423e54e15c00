use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::{FactsError, Result};

/// Renders `facts` as a pretty-printed JSON array of strings. Non-ASCII text
/// is kept as-is.
pub fn render_facts(facts: &[String], indent: usize) -> Result<Vec<u8>> {
    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    facts.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Writes the rendered report to `path`, replacing any existing file. The
/// file is only opened once the JSON is fully rendered.
pub fn write_facts(path: &Path, facts: &[String], indent: usize) -> Result<()> {
    let body = render_facts(facts, indent)?;
    let write_err = |source| FactsError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::create(path).map_err(write_err)?;
    file.write_all(&body).map_err(write_err)?;
    file.flush().map_err(write_err)?;
    Ok(())
}
