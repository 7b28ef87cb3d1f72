//! Append-only JSONL task log.
//!
//! One [`LogRecord`] per line. Records are serialized in full before the
//! file is touched and written with a single `write_all`, so a reader never
//! sees a partial record.

use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::compose::LogRecord;
use crate::config::EngineConfig;
use crate::error::Result;

/// Default log file name inside the data directory.
pub const LOG_FILE_NAME: &str = "log.jsonl";

/// Handle to the task log file.
#[derive(Debug, Clone)]
pub struct TaskLog {
    path: PathBuf,
}

impl TaskLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The log configured in `config`, or `<data_dir>/log.jsonl`.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be prepared.
    pub fn for_config(config: &EngineConfig) -> Result<Self> {
        match &config.log_file {
            Some(path) => Ok(Self::new(path)),
            None => Ok(Self::new(super::data_dir()?.join(LOG_FILE_NAME))),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record.
    ///
    /// # Errors
    /// Returns an error if the record cannot be serialized or the file
    /// cannot be written.
    pub fn append(&self, record: &LogRecord) -> Result<()> {
        let mut line = record.to_json_line()?;
        line.push('\n');

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        tracing::debug!("appended task record to {}", self.path.display());
        Ok(())
    }

    /// Read every record back, oldest first.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or a line is not a record.
    pub fn read_all(&self) -> Result<Vec<LogRecord>> {
        let file = match std::fs::File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            records.push(serde_json::from_str(&line)?);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::Mode;
    use crate::engine::evaluate;
    use crate::rating::parse_ratings;
    use chrono::Utc;
    use tempfile::TempDir;

    fn record(raw: &str) -> LogRecord {
        let cfg = EngineConfig::default();
        let ratings = parse_ratings("2,2,2,1,1,1,1,1,2,1,2").unwrap();
        evaluate(raw, &ratings, &cfg)
            .unwrap()
            .log_record(Utc::now(), Mode::Inline, Some("test"))
    }

    #[test]
    fn append_writes_one_line_per_record() {
        let dir = TempDir::new().unwrap();
        let log = TaskLog::new(dir.path().join("nested").join("log.jsonl"));

        log.append(&record("{p0:30} first")).unwrap();
        log.append(&record("second")).unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(content.lines().count(), 2);
        for line in content.lines() {
            let json: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(json.get("output").is_some());
        }
    }

    #[test]
    fn read_all_returns_records_in_order() {
        let dir = TempDir::new().unwrap();
        let log = TaskLog::new(dir.path().join("log.jsonl"));
        let first = record("{p0:30} first");
        let second = record("second");
        log.append(&first).unwrap();
        log.append(&second).unwrap();

        let records = log.read_all().unwrap();
        assert_eq!(records, vec![first, second]);
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let log = TaskLog::new(dir.path().join("absent.jsonl"));
        assert!(log.read_all().unwrap().is_empty());
    }

    #[test]
    fn configured_path_is_used() {
        let mut cfg = EngineConfig::default();
        cfg.log_file = Some(PathBuf::from("/tmp/custom-tasks.jsonl"));
        let log = TaskLog::for_config(&cfg).unwrap();
        assert_eq!(log.path(), Path::new("/tmp/custom-tasks.jsonl"));
    }
}
