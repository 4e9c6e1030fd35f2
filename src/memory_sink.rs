use crate::error::BoxError;
use crate::level::SinkMethod;
use crate::sink::LogSink;
use serde_json::Value;
use std::sync::Mutex;

/// A sink that keeps every line in memory, in write order.
///
/// Useful for tests and for measuring the overhead of the pipeline
/// itself without any console I/O.
#[derive(Default)]
pub struct MemorySink {
    lines: Mutex<Vec<(SinkMethod, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything written so far.
    pub fn lines(&self) -> Vec<(SinkMethod, String)> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().map(|l| l.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Written lines that parse as JSON objects, in order.
    pub fn events(&self) -> Vec<Value> {
        self.lines()
            .into_iter()
            .filter_map(|(_, line)| serde_json::from_str::<Value>(&line).ok())
            .filter(Value::is_object)
            .collect()
    }

    pub fn clear(&self) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.clear();
        }
    }
}

impl LogSink for MemorySink {
    fn write(&self, method: SinkMethod, line: &str) -> Result<(), BoxError> {
        self.lines
            .lock()
            .map_err(|_| "memory sink lock poisoned")?
            .push((method, line.to_string()));
        Ok(())
    }
}
