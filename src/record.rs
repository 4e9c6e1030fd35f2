use crate::config::Config;
use crate::level::Level;
use crate::tag::Classify;
use crate::typecast::fold_fields;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// One log event: reserved keys plus type-suffixed fields, in insertion
/// order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LogEvent {
    fields: Map<String, Value>,
}

impl LogEvent {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn message(&self) -> Option<&str> {
        self.get("message").and_then(Value::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.fields
    }

    /// Single-line JSON text of the event.
    pub fn to_json_line(&self) -> String {
        Value::Object(self.fields.clone()).to_string()
    }
}

/// Inputs of [`assemble`] besides config and classifier.
#[derive(Debug, Clone, Copy)]
pub struct EventParts<'a> {
    pub level: Level,
    pub name: &'a str,
    pub context: &'a Map<String, Value>,
    pub message: &'a str,
    pub fields: &'a Map<String, Value>,
    pub now: DateTime<Utc>,
}

/// Build the event for one log call.
///
/// Key order: context fields, `message`, `logger_name`, `level`, the
/// timestamp key (when enabled), then the call's structured fields. Context
/// and structured fields are both typecast; the reserved keys never are.
/// With typecasting off, fields are merged raw and may overwrite them.
pub fn assemble(parts: EventParts<'_>, config: &Config, classifier: &dyn Classify) -> LogEvent {
    let mut event = fold_fields(Map::new(), parts.context, config, classifier);

    event.insert("message".into(), Value::String(parts.message.to_string()));
    event.insert("logger_name".into(), Value::String(parts.name.to_string()));
    event.insert("level".into(), Value::String(parts.level.as_str().to_string()));

    if let Some(key) = &config.timestamp {
        event.insert(key.clone(), Value::String(iso_timestamp(parts.now)));
    }

    // Fields are cast on their own and then merged, so a field named like
    // a reserved key cannot remove it.
    for (key, value) in fold_fields(Map::new(), parts.fields, config, classifier) {
        event.insert(key, value);
    }

    LogEvent { fields: event }
}

/// `YYYY-MM-DDTHH:MM:SS.mmmZ`.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::ValueClassifier;
    use chrono::TimeZone;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 5).unwrap()
    }

    #[test]
    fn test_key_order_and_suffixes() {
        let context = map(json!({"service": "billing"}));
        let fields = map(json!({"count": 3, "ratio": 0.5}));
        let event = assemble(
            EventParts {
                level: Level::Warn,
                name: "payments",
                context: &context,
                message: "slow charge",
                fields: &fields,
                now: fixed_now(),
            },
            &Config::default(),
            &ValueClassifier,
        );

        let keys: Vec<_> = event.keys().collect();
        assert_eq!(
            keys,
            ["service__string", "message", "logger_name", "level", "@timestamp", "count__number", "ratio__float"]
        );
        assert_eq!(event.message(), Some("slow charge"));
        assert_eq!(event.get("level"), Some(&json!("warn")));
        assert_eq!(event.get("@timestamp"), Some(&json!("2024-03-01T12:30:05.000Z")));
    }

    #[test]
    fn test_timestamp_disabled_and_renamed() {
        let empty = Map::new();
        let parts = EventParts {
            level: Level::Info,
            name: "n",
            context: &empty,
            message: "",
            fields: &empty,
            now: fixed_now(),
        };

        let event = assemble(parts, &Config::default().without_timestamp(), &ValueClassifier);
        assert_eq!(event.keys().collect::<Vec<_>>(), ["message", "logger_name", "level"]);

        let event = assemble(parts, &Config::default().with_timestamp_key("ts"), &ValueClassifier);
        assert!(event.get("ts").is_some());
        assert!(event.get("@timestamp").is_none());
    }

    #[test]
    fn test_fields_never_clobber_reserved_keys() {
        let empty = Map::new();
        let fields = map(json!({"message": "spoof", "level": 9}));
        let event = assemble(
            EventParts {
                level: Level::Info,
                name: "n",
                context: &empty,
                message: "real",
                fields: &fields,
                now: fixed_now(),
            },
            &Config::default(),
            &ValueClassifier,
        );
        assert_eq!(event.message(), Some("real"));
        assert_eq!(event.get("message__string"), Some(&json!("spoof")));
        assert_eq!(event.get("level__number"), Some(&json!(9)));
    }

    #[test]
    fn test_json_line() {
        let empty = Map::new();
        let event = assemble(
            EventParts {
                level: Level::Debug,
                name: "n",
                context: &empty,
                message: "m",
                fields: &empty,
                now: fixed_now(),
            },
            &Config::default().without_timestamp(),
            &ValueClassifier,
        );
        assert_eq!(event.to_json_line(), r#"{"message":"m","logger_name":"n","level":"debug"}"#);
        assert_eq!(serde_json::to_string(&event).unwrap(), event.to_json_line());
    }
}
