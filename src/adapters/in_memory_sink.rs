//! In-memory round sink for testing.
//!
//! This adapter provides a pure in-memory implementation of RoundSink,
//! enabling fast tests without any file system I/O.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::{Result, ports::RoundSink, round::RoundRecord};

/// In-memory sink for testing.
///
/// Stores records in a shared vector. All clones share the same storage, so
/// a test can hand one clone to a session and inspect another.
///
/// # Examples
///
/// ```
/// use pathtask::adapters::InMemoryRoundSink;
///
/// let sink = InMemoryRoundSink::new();
/// let observer = sink.clone();
/// assert_eq!(observer.count(), 0);
/// ```
#[derive(Clone, Default)]
pub struct InMemoryRoundSink {
    records: Arc<Mutex<Vec<RoundRecord>>>,
    flushes: Arc<Mutex<usize>>,
}

impl InMemoryRoundSink {
    /// Create a new empty in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records persisted so far.
    pub fn count(&self) -> usize {
        self.lock_records().len()
    }

    /// Copy of every record, in persistence order.
    pub fn records(&self) -> Vec<RoundRecord> {
        self.lock_records().clone()
    }

    /// Number of times the sink was flushed.
    pub fn flush_count(&self) -> usize {
        *self.flushes.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Clear all stored records.
    pub fn clear(&self) {
        self.lock_records().clear();
    }

    fn lock_records(&self) -> MutexGuard<'_, Vec<RoundRecord>> {
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl RoundSink for InMemoryRoundSink {
    fn persist_round(&mut self, record: &RoundRecord) -> Result<()> {
        self.lock_records().push(record.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        *self.flushes.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        Ok(())
    }
}
