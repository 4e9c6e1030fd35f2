use crate::args::{normalize, Arg, Normalized};
use crate::config::{self, ConfigHandle};
use crate::console::ConsoleSink;
use crate::env::{process_switches, Switches};
use crate::level::{Level, LevelRoutes, SinkMethod};
use crate::record::{assemble, iso_timestamp, EventParts, LogEvent};
use crate::sink::LogSink;
use crate::tag::{Classify, ValueClassifier};
use chrono::Utc;
use serde_json::{Map, Value};
use std::sync::{Arc, LazyLock};

/// Everything a log call needs besides the logger's own name and
/// context: config, output switches, level routing, classifier and sink.
///
/// A call runs normalization, assembly and the sink write to completion
/// on the calling thread.
pub struct Pipeline {
    config: ConfigHandle,
    switches: Switches,
    routes: LevelRoutes,
    classifier: Arc<dyn Classify>,
    sink: Arc<dyn LogSink>,
}

impl Pipeline {
    /// Pipeline with its own default config, production switches and the
    /// default routing table.
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self {
            config: ConfigHandle::default(),
            switches: Switches::production(),
            routes: LevelRoutes::default(),
            classifier: Arc::new(ValueClassifier),
            sink,
        }
    }

    pub fn with_config(mut self, config: ConfigHandle) -> Self {
        self.config = config;
        self
    }

    pub fn with_switches(mut self, switches: Switches) -> Self {
        self.switches = switches;
        self
    }

    pub fn with_routes(mut self, routes: LevelRoutes) -> Self {
        self.routes = routes;
        self
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn Classify>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn config(&self) -> &ConfigHandle {
        &self.config
    }

    pub fn switches(&self) -> Switches {
        self.switches
    }

    /// Run one log call.
    ///
    /// Returns `None` without touching the arguments when logging is
    /// switched off.
    pub fn emit(&self, level: Level, name: &str, context: &Map<String, Value>, args: Vec<Arg>) -> Option<LogEvent> {
        if self.switches.no_logging {
            return None;
        }
        self.dispatch(level, name, context, normalize(args))
    }

    /// Assemble and write an already normalized call.
    pub(crate) fn dispatch(
        &self,
        level: Level,
        name: &str,
        context: &Map<String, Value>,
        normalized: Normalized,
    ) -> Option<LogEvent> {
        if self.switches.no_logging {
            return None;
        }

        let config = self.config.load();
        let message = normalized.message();
        let now = Utc::now();
        let event = assemble(
            EventParts {
                level,
                name,
                context,
                message: &message,
                fields: &normalized.fields,
                now,
            },
            &config,
            self.classifier.as_ref(),
        );

        let method = self.routes.method_for(level);
        if self.switches.development {
            let line = format!("{} -- {} ({}):  {}", iso_timestamp(now), level, name, message);
            self.write(SinkMethod::Log, &line);
            if self.switches.debug {
                self.write(method, &event.to_json_line());
            }
        } else {
            self.write(method, &event.to_json_line());
        }

        Some(event)
    }

    pub fn flush(&self) {
        if let Err(e) = self.sink.flush() {
            eprintln!("error flushing log sink: {}", e);
        }
    }

    fn write(&self, method: SinkMethod, line: &str) {
        if let Err(e) = self.sink.write(method, line) {
            eprintln!("error writing log line: {}", e);
        }
    }
}

static GLOBAL: LazyLock<Arc<Pipeline>> = LazyLock::new(|| {
    Arc::new(
        Pipeline::new(Arc::new(ConsoleSink::new()))
            .with_config(config::global().clone())
            .with_switches(process_switches()),
    )
});

/// Process-wide pipeline: console output, the global config and the
/// switches read from the environment.
pub fn global() -> Arc<Pipeline> {
    Arc::clone(&GLOBAL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_sink::MemorySink;
    use serde_json::json;

    fn pipeline(switches: Switches) -> (Arc<MemorySink>, Pipeline) {
        let sink = Arc::new(MemorySink::new());
        let pipeline = Pipeline::new(sink.clone()).with_switches(switches);
        (sink, pipeline)
    }

    #[test]
    fn test_routes_by_level() {
        let (sink, pipeline) = pipeline(Switches::production());
        let ctx = Map::new();
        pipeline.emit(Level::Info, "a", &ctx, vec!["i".into()]);
        pipeline.emit(Level::Warn, "a", &ctx, vec!["w".into()]);
        pipeline.emit(Level::Error, "a", &ctx, vec!["e".into()]);
        pipeline.emit(Level::Debug, "a", &ctx, vec!["d".into()]);

        let methods: Vec<_> = sink.lines().into_iter().map(|(m, _)| m).collect();
        assert_eq!(methods, [SinkMethod::Log, SinkMethod::Warn, SinkMethod::Error, SinkMethod::Log]);
    }

    #[test]
    fn test_development_writes_text_line_only() {
        let (sink, pipeline) = pipeline(Switches {
            development: true,
            ..Switches::default()
        });
        pipeline.emit(Level::Warn, "svc", &Map::new(), vec!["hello".into(), 5.into()]);

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].0, SinkMethod::Log);
        assert!(lines[0].1.ends_with(" -- warn (svc):  hello 5"), "{}", lines[0].1);
    }

    #[test]
    fn test_development_debug_adds_json() {
        let (sink, pipeline) = pipeline(Switches {
            development: true,
            debug: true,
            ..Switches::default()
        });
        pipeline.emit(Level::Error, "svc", &Map::new(), vec!["boom".into()]);

        let lines = sink.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].0, SinkMethod::Error);
        assert_eq!(sink.events()[0]["message"], json!("boom"));
    }

    #[test]
    fn test_disabled_pipeline_returns_none() {
        let (sink, pipeline) = pipeline(Switches {
            no_logging: true,
            ..Switches::default()
        });
        assert!(pipeline.emit(Level::Error, "svc", &Map::new(), vec!["x".into()]).is_none());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_config_change_applies_to_next_call() {
        let (sink, pipeline) = pipeline(Switches::production());
        let ctx = Map::new();
        pipeline.emit(Level::Info, "a", &ctx, vec![json!({"n": 1}).into()]);
        pipeline.config().update(|c| {
            c.typecast = false;
            c.timestamp = None;
        });
        pipeline.emit(Level::Info, "a", &ctx, vec![json!({"n": 1}).into()]);

        let events = sink.events();
        assert_eq!(events[0]["n__number"], json!(1));
        assert!(events[0].get("@timestamp").is_some());
        assert_eq!(events[1]["n"], json!(1));
        assert!(events[1].get("@timestamp").is_none());
    }
}
