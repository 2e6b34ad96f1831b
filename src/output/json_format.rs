//! JSON export: an array of `{ "ip", "port", "service", "banner" }`.

use crate::aggregator::ResultSet;
use crate::error::ExportResult;
use std::io::{Read, Write};

/// Write results as a pretty-printed JSON array.
pub fn write_json<W: Write>(results: &ResultSet, writer: W) -> ExportResult<()> {
    serde_json::to_writer_pretty(writer, results)?;
    Ok(())
}

/// Read a previously exported JSON array back into a result set.
pub fn read_json<R: Read>(reader: R) -> ExportResult<ResultSet> {
    Ok(serde_json::from_reader(reader)?)
}
