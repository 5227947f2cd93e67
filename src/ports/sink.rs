//! Round sink port - where completed rounds are persisted.

use crate::{Result, round::RoundRecord};

/// Receives each completed round exactly once.
///
/// This trait abstracts the transport to wherever experiment data lives
/// (a file, a hosting platform, memory for tests) without coupling the
/// session to a format.
///
/// # Examples
///
/// ```no_run
/// use pathtask::ports::RoundSink;
/// use pathtask::round::RoundRecord;
///
/// struct CountingSink(usize);
///
/// impl RoundSink for CountingSink {
///     fn persist_round(&mut self, _record: &RoundRecord) -> pathtask::Result<()> {
///         self.0 += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait RoundSink: Send {
    /// Persist a resolved round.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying transport fails.
    fn persist_round(&mut self, record: &RoundRecord) -> Result<()>;

    /// Flush buffered records. Called when the curriculum completes.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Sink that discards every record
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl RoundSink for NullSink {
    fn persist_round(&mut self, _record: &RoundRecord) -> Result<()> {
        Ok(())
    }
}
