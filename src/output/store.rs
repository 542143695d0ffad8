//! Append-only JSON persistence of lookups.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::geo::GeoRecord;

/// Destination for saved lookups.
pub trait RecordStore {
    /// Persists one record and returns where it went.
    fn save(&mut self, record: &GeoRecord) -> Result<PathBuf>;
}

/// Appends each record to a file as a pretty-printed JSON object followed by
/// a newline. Earlier entries are never rewritten.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Serializes a record with four-space indentation.
pub fn to_pretty_json(record: &GeoRecord) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    record
        .serialize(&mut serializer)
        .context("Failed to serialize geolocation record")?;
    buf.push(b'\n');
    Ok(buf)
}

impl RecordStore for JsonFileStore {
    fn save(&mut self, record: &GeoRecord) -> Result<PathBuf> {
        let bytes = to_pretty_json(record)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        file.write_all(&bytes)
            .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        log::info!("Appended record for {} to {}", record.ip(), self.path.display());
        Ok(self.path.clone())
    }
}
