//! CSV round sink.
//!
//! Flattens each completed round into one row, for spreadsheet-style
//! analysis of a session.

use std::{fs::File, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    concept::format_sequence,
    curriculum::Phase,
    ports::RoundSink,
    round::{PathLabel, RoundRecord},
};

/// One CSV row per round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRow {
    pub session: String,
    pub round_index: usize,
    pub phase: Phase,
    pub concept_level: usize,
    pub strategy_level: usize,
    pub start: i32,
    pub path_a: String,
    pub path_a_end: i32,
    pub path_b: String,
    pub path_b_end: i32,
    pub target_path: String,
    pub target: i32,
    pub final_score: Option<i32>,
    pub is_correct: Option<bool>,
    pub start_time: String,
    pub end_time: String,
}

impl From<&RoundRecord> for RoundRow {
    fn from(record: &RoundRecord) -> Self {
        let config = &record.config;
        Self {
            session: record.session.clone().unwrap_or_default(),
            round_index: record.round_index,
            phase: record.phase,
            concept_level: config.concept_level,
            strategy_level: config.strategy_level,
            start: config.start,
            path_a: format_sequence(&config.path_a.sequence),
            path_a_end: config.path_a.end,
            path_b: format_sequence(&config.path_b.sequence),
            path_b_end: config.path_b.end,
            target_path: config.target_path.key().to_string(),
            target: config.target,
            final_score: config.final_score,
            is_correct: config.is_correct,
            start_time: config
                .start_time
                .map(|t| t.to_rfc3339())
                .unwrap_or_default(),
            end_time: config.end_time.map(|t| t.to_rfc3339()).unwrap_or_default(),
        }
    }
}

impl RoundRow {
    /// Which path the participant ended on, inferred from the final score
    pub fn chosen_path(&self) -> Option<PathLabel> {
        match self.final_score? {
            score if score == self.path_a_end => Some(PathLabel::A),
            score if score == self.path_b_end => Some(PathLabel::B),
            _ => None,
        }
    }
}

/// CSV-backed round sink
pub struct CsvRoundSink {
    writer: csv::Writer<File>,
}

impl CsvRoundSink {
    /// Create (or truncate) the file at `path`. The header row is written
    /// with the first record.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create round table {path:?}"),
            source,
        })?;
        Ok(Self {
            writer: csv::Writer::from_writer(file),
        })
    }

    /// Read every row back from a CSV file.
    pub fn read_all<P: AsRef<Path>>(path: P) -> Result<Vec<RoundRow>> {
        let mut reader = csv::Reader::from_path(path)?;
        reader
            .deserialize()
            .map(|row| row.map_err(Error::from))
            .collect()
    }
}

impl RoundSink for CsvRoundSink {
    fn persist_round(&mut self, record: &RoundRecord) -> Result<()> {
        self.writer.serialize(RoundRow::from(record))?;
        self.writer.flush()?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
