//! Sink combinators: sharing one sink across sessions and fanning out.

use std::sync::{Arc, Mutex};

use crate::{Result, ports::RoundSink, round::RoundRecord};

/// Thread-safe handle that lets many sessions write to one sink.
///
/// Each session takes its own boxed sink; cloning a `SharedSink` gives
/// every session a handle to the same underlying writer.
#[derive(Clone)]
pub struct SharedSink {
    inner: Arc<Mutex<Box<dyn RoundSink>>>,
}

impl SharedSink {
    pub fn new(sink: Box<dyn RoundSink>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(sink)),
        }
    }
}

impl RoundSink for SharedSink {
    fn persist_round(&mut self, record: &RoundRecord) -> Result<()> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .persist_round(record)
    }

    fn flush(&mut self) -> Result<()> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).flush()
    }
}

/// Forwards every record to each wrapped sink in order.
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Box<dyn RoundSink>>,
}

impl FanoutSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sink(mut self, sink: Box<dyn RoundSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl RoundSink for FanoutSink {
    fn persist_round(&mut self, record: &RoundRecord) -> Result<()> {
        for sink in &mut self.sinks {
            sink.persist_round(record)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        for sink in &mut self.sinks {
            sink.flush()?;
        }
        Ok(())
    }
}
