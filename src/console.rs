use crate::error::BoxError;
use crate::level::SinkMethod;
use crate::sink::LogSink;
use std::io::{self, Write};
use std::sync::Mutex;

/// Sink writing to the process console.
///
/// `Warn` and `Error` lines go to stderr, everything else to stdout. A
/// single lock covers both streams so lines appear in call order even
/// when threads share the sink.
#[derive(Default)]
pub struct ConsoleSink {
    lock: Mutex<()>,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LogSink for ConsoleSink {
    fn write(&self, method: SinkMethod, line: &str) -> Result<(), BoxError> {
        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        match method {
            SinkMethod::Warn | SinkMethod::Error => writeln!(io::stderr().lock(), "{line}")?,
            SinkMethod::Log | SinkMethod::Info | SinkMethod::Debug => writeln!(io::stdout().lock(), "{line}")?,
        }
        Ok(())
    }

    fn flush(&self) -> Result<(), BoxError> {
        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        io::stdout().flush()?;
        io::stderr().flush()?;
        Ok(())
    }
}
