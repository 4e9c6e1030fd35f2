use crate::args::Arg;
use crate::level::Level;
use crate::pipeline::Pipeline;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Named logger with an immutable context (MDC) merged into every event.
///
/// Cloning is cheap; clones share the same context.
#[derive(Clone)]
pub struct Logger {
    name: Arc<str>,
    context: Arc<Map<String, Value>>,
    pipeline: Arc<Pipeline>,
}

impl Logger {
    pub fn new(name: impl Into<String>, context: Map<String, Value>, pipeline: Arc<Pipeline>) -> Self {
        Self {
            name: Arc::from(name.into()),
            context: Arc::new(context),
            pipeline,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn context(&self) -> &Map<String, Value> {
        &self.context
    }

    /// Derive a logger with the same name whose context is this logger's
    /// context extended (and overridden) by `fields`. `self` is left as is,
    /// and the derived logger is not registered anywhere.
    pub fn update(&self, fields: Map<String, Value>) -> Logger {
        let mut context = Map::clone(&self.context);
        for (key, value) in fields {
            context.insert(key, value);
        }
        Logger {
            name: Arc::clone(&self.name),
            context: Arc::new(context),
            pipeline: Arc::clone(&self.pipeline),
        }
    }

    /// Log at an explicit level.
    pub fn at(&self, level: Level, args: Vec<Arg>) {
        self.pipeline.emit(level, &self.name, &self.context, args);
    }

    /// Generic entry point; logs at `info`.
    pub fn log(&self, args: Vec<Arg>) {
        self.at(Level::Info, args);
    }

    pub fn info(&self, args: Vec<Arg>) {
        self.at(Level::Info, args);
    }

    pub fn debug(&self, args: Vec<Arg>) {
        self.at(Level::Debug, args);
    }

    pub fn warn(&self, args: Vec<Arg>) {
        self.at(Level::Warn, args);
    }

    pub fn error(&self, args: Vec<Arg>) {
        self.at(Level::Error, args);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_sink::MemorySink;
    use serde_json::json;

    fn ctx(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn test_update_does_not_touch_original() {
        let sink = Arc::new(MemorySink::new());
        let pipeline = Arc::new(Pipeline::new(sink));
        let base = Logger::new("api", ctx(json!({"service": "x", "zone": "a"})), pipeline);
        let child = base.update(ctx(json!({"zone": "b", "request_id": "r1"})));

        assert_eq!(Value::Object(base.context().clone()), json!({"service": "x", "zone": "a"}));
        assert_eq!(
            Value::Object(child.context().clone()),
            json!({"service": "x", "zone": "b", "request_id": "r1"})
        );
        assert_eq!(child.name(), "api");
    }

    #[test]
    fn test_level_methods() {
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::new("l", Map::new(), Arc::new(Pipeline::new(sink.clone())));
        logger.log(vec!["a".into()]);
        logger.info(vec!["b".into()]);
        logger.debug(vec!["c".into()]);
        logger.warn(vec!["d".into()]);
        logger.error(vec!["e".into()]);

        let levels: Vec<_> = sink.events().iter().map(|e| e["level"].clone()).collect();
        assert_eq!(levels, [json!("info"), json!("info"), json!("debug"), json!("warn"), json!("error")]);
    }
}
