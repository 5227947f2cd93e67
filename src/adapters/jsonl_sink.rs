//! JSON Lines round sink.
//!
//! Writes one JSON object per completed round, flushing after each line so
//! an interrupted session still leaves every finished round on disk.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use crate::{Error, Result, ports::RoundSink, round::RoundRecord};

/// JSONL-backed round sink
pub struct JsonlRoundSink {
    writer: BufWriter<File>,
}

impl JsonlRoundSink {
    /// Create (or truncate) the file at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create round log {path:?}"),
            source,
        })?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /// Read every record back from a JSONL file.
    pub fn read_all<P: AsRef<Path>>(path: P) -> Result<Vec<RoundRecord>> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| Error::Io {
            operation: format!("read round log {path:?}"),
            source,
        })?;
        contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(Error::from))
            .collect()
    }
}

impl RoundSink for JsonlRoundSink {
    fn persist_round(&mut self, record: &RoundRecord) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        writeln!(&mut self.writer)?;
        self.writer.flush()?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
