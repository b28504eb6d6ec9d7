//! Persisting crawl results.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::domain::TimetableRow;

/// Errors from writing results.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// Failed to create the output directory or write the file
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize the rows
    #[error("failed to serialize rows: {0}")]
    Json(#[from] serde_json::Error),
}

/// Destination for the rows of a finished crawl.
pub trait RowSink {
    /// Write `rows` under `name` and return where they ended up.
    fn write(&self, rows: &[TimetableRow], name: &str) -> Result<PathBuf, SinkError>;
}

/// Writes rows as a pretty-printed JSON array into a directory.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    dir: PathBuf,
}

impl JsonFileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl RowSink for JsonFileSink {
    /// Creates the directory if needed. Non-ASCII text is written as-is.
    fn write(&self, rows: &[TimetableRow], name: &str) -> Result<PathBuf, SinkError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| SinkError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let mut json = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut json, PrettyFormatter::with_indent(b"    "));
        rows.serialize(&mut serializer)?;

        let path = self.dir.join(name);
        std::fs::write(&path, json).map_err(|source| SinkError::Io {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }
}

/// File name for a crawl finished at `now`.
pub fn timestamped_name(now: NaiveDateTime) -> String {
    format!("timetable_{}.json", now.format("%Y%m%d_%H%M%S"))
}
