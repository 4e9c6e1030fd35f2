use crate::args::{ErrorArg, Normalized};
use crate::level::Level;
use crate::pipeline::Pipeline;
use serde_json::{Map, Number, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

/// `tracing_subscriber` layer that turns `tracing` events into typed JSON
/// events.
///
/// The event target becomes `logger_name`, the `message` field becomes
/// the message and every other field becomes a structured field, so
/// `info!(user_id = 42, "login")` yields `user_id__number: 42`. Events go
/// through the given [`Pipeline`], so suppression, routing and config
/// apply exactly as for [`Logger`](crate::logger::Logger) calls.
pub struct TypecastLayer {
    pipeline: Arc<Pipeline>,
    context: Map<String, Value>,
    max_level: tracing::Level,
    /// Total events seen by the layer (before filtering by level).
    pub total_events: Arc<AtomicU64>,
    /// Events written to the pipeline.
    pub emitted_events: Arc<AtomicU64>,
}

impl TypecastLayer {
    /// Layer forwarding every level.
    pub fn new(pipeline: Arc<Pipeline>) -> Self {
        Self {
            pipeline,
            context: Map::new(),
            max_level: tracing::Level::TRACE,
            total_events: Arc::new(AtomicU64::new(0)),
            emitted_events: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Only forward events at `level` or more severe.
    pub fn with_max_level(mut self, level: tracing::Level) -> Self {
        self.max_level = level;
        self
    }

    /// Context merged into every forwarded event.
    pub fn with_context(mut self, context: Map<String, Value>) -> Self {
        self.context = context;
        self
    }
}

impl<S> Layer<S> for TypecastLayer
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        self.total_events.fetch_add(1, Ordering::Relaxed);
        let meta = event.metadata();
        if *meta.level() > self.max_level || self.pipeline.switches().no_logging {
            return;
        }

        let mut fields = Map::new();
        let mut message: Option<String> = None;

        let mut visitor = FieldVisitor {
            fields: &mut fields,
            message: &mut message,
        };
        event.record(&mut visitor);

        let normalized = Normalized {
            parts: message.into_iter().collect(),
            fields,
        };
        let emitted = self
            .pipeline
            .dispatch(Level::from(meta.level()), meta.target(), &self.context, normalized);
        if emitted.is_some() {
            self.emitted_events.fetch_add(1, Ordering::Relaxed);
        }
    }
}

pub struct FieldVisitor<'a> {
    pub fields: &'a mut Map<String, Value>,
    pub message: &'a mut Option<String>,
}

impl<'a> Visit for FieldVisitor<'a> {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            *self.message = Some(value.to_string());
        } else {
            self.fields.insert(field.name().to_string(), Value::String(value.to_string()));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields.insert(field.name().to_string(), Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields.insert(field.name().to_string(), Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        let value = Number::from_f64(value).map(Value::Number).unwrap_or(Value::Null);
        self.fields.insert(field.name().to_string(), value);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields.insert(field.name().to_string(), Value::from(value));
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        let record = ErrorArg::from_error(value).to_record();
        self.fields.insert(field.name().to_string(), record);
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            *self.message = Some(format!("{:?}", value));
        } else {
            self.fields.insert(field.name().to_string(), Value::String(format!("{:?}", value)));
        }
    }
}
