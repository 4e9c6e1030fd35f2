use crate::error::BoxError;
use crate::level::SinkMethod;

/// Destination for finished log lines.
///
/// Implementations receive one complete line per call (JSON event or the
/// development-mode text line) together with the [`SinkMethod`] chosen by
/// the level routing table. Writes happen synchronously on the logging
/// thread, so implementations that are shared between threads must
/// serialize their output to keep lines in call order.
pub trait LogSink: Send + Sync {
    /// Write a single line.
    ///
    /// **Parameters**
    /// - `method`: channel selected for the event's level.
    /// - `line`: text without a trailing newline.
    ///
    /// **Returns**
    /// - `Ok(())` if the line was accepted.
    /// - `Err(..)` if the backend failed. The logger reports the failure
    ///   on stderr and carries on; the caller of the log method never
    ///   sees it.
    fn write(&self, method: SinkMethod, line: &str) -> Result<(), BoxError>;

    /// Flush any buffered lines.
    ///
    /// Default implementation is a no-op.
    fn flush(&self) -> Result<(), BoxError> {
        Ok(())
    }
}
