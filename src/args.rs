//! Log call arguments and their split into message text and fields.

use crate::tag::{classify, TypeTag};
use serde_json::{json, Map, Number, Value};
use std::error::Error;

/// Error value passed to a log call.
///
/// It is captured structurally into the `error` field and never raised.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorArg {
    pub name: String,
    pub message: String,
    pub stack: String,
    pub status: Option<Value>,
    pub metadata: Option<Value>,
}

impl ErrorArg {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        let name = name.into();
        let message = message.into();
        let stack = format!("{name}: {message}");
        Self {
            name,
            message,
            stack,
            status: None,
            metadata: None,
        }
    }

    /// Capture an error and its `source()` chain.
    pub fn from_error<E: Error + ?Sized>(err: &E) -> Self {
        let mut arg = Self::new(short_type_name::<E>(), err.to_string());
        let mut source = err.source();
        while let Some(cause) = source {
            arg.stack.push_str("\n    caused by: ");
            arg.stack.push_str(&cause.to_string());
            source = cause.source();
        }
        arg
    }

    /// Override the captured name, for trait objects whose concrete type
    /// is not known statically.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        let old_head = self.full_message();
        self.name = name;
        if let Some(rest) = self.stack.strip_prefix(&old_head) {
            self.stack = format!("{}{}", self.full_message(), rest);
        }
        self
    }

    pub fn with_status(mut self, status: impl Into<Value>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_metadata(mut self, metadata: impl Into<Value>) -> Self {
        self.metadata = Some(metadata.into());
        self
    }

    pub fn full_message(&self) -> String {
        format!("{}: {}", self.name, self.message)
    }

    pub(crate) fn to_record(&self) -> Value {
        let mut record = Map::new();
        record.insert("message".into(), json!(self.message));
        record.insert("stack".into(), json!(self.stack));
        record.insert("full_message".into(), json!(self.full_message()));
        if let Some(status) = self.status.as_ref().filter(|v| is_truthy(v)) {
            record.insert("status".into(), status.clone());
        }
        if let Some(metadata) = self.metadata.as_ref().filter(|v| is_truthy(v)) {
            record.insert("metadata".into(), metadata.clone());
        }
        Value::Object(record)
    }
}

/// Last path segment of `E`'s type name, without generic arguments or
/// trait-object bounds: `dyn core::error::Error + Send + Sync` → `Error`.
fn short_type_name<E: ?Sized>() -> String {
    let full = std::any::type_name::<E>();
    let base = full.strip_prefix("dyn ").unwrap_or(full);
    let base = base.split('<').next().unwrap_or(base);
    let base = base.split(" + ").next().unwrap_or(base);
    base.rsplit("::").next().unwrap_or(base).to_string()
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// One argument of a log call.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Value(Value),
    Error(ErrorArg),
}

impl Arg {
    pub fn error<E: Error + ?Sized>(err: &E) -> Self {
        Arg::Error(ErrorArg::from_error(err))
    }

    /// Type of the argument; `None` for `null`. Drives [`normalize`].
    pub fn tag(&self) -> Option<TypeTag> {
        match self {
            Arg::Error(_) => Some(TypeTag::Error),
            Arg::Value(value) => classify(value),
        }
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        Arg::Value(value)
    }
}

impl From<Map<String, Value>> for Arg {
    fn from(map: Map<String, Value>) -> Self {
        Arg::Value(Value::Object(map))
    }
}

impl From<ErrorArg> for Arg {
    fn from(err: ErrorArg) -> Self {
        Arg::Error(err)
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Value(Value::String(s.to_string()))
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Value(Value::String(s))
    }
}

impl From<&String> for Arg {
    fn from(s: &String) -> Self {
        Arg::Value(Value::String(s.clone()))
    }
}

/// Non-finite floats have no JSON form; they become their message text
/// (`NaN`, `Infinity`, `-Infinity`).
impl From<f64> for Arg {
    fn from(f: f64) -> Self {
        match Number::from_f64(f) {
            Some(n) => Arg::Value(Value::Number(n)),
            None if f.is_nan() => Arg::from("NaN"),
            None if f > 0.0 => Arg::from("Infinity"),
            None => Arg::from("-Infinity"),
        }
    }
}

impl From<f32> for Arg {
    fn from(f: f32) -> Self {
        Arg::from(f as f64)
    }
}

macro_rules! arg_from_json {
    ($($t:ty),*) => {
        $(impl From<$t> for Arg {
            fn from(v: $t) -> Self {
                Arg::Value(Value::from(v))
            }
        })*
    };
}

arg_from_json!(bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Message text and structured fields extracted from a call's arguments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    pub parts: Vec<String>,
    pub fields: Map<String, Value>,
}

impl Normalized {
    pub fn message(&self) -> String {
        self.parts.join(" ")
    }
}

/// Split call arguments into message parts and structured fields.
///
/// Only the last argument, and only when it is a JSON object, is merged
/// into the fields. Objects in any other position are serialized into the
/// message. A trailing `null` contributes nothing. Error arguments add a
/// `(Error: ..)` part and replace the `error` field.
pub fn normalize(args: Vec<Arg>) -> Normalized {
    let mut out = Normalized::default();
    let last = args.len().saturating_sub(1);

    for (i, arg) in args.into_iter().enumerate() {
        let is_last = i == last;
        match (arg.tag(), arg) {
            (_, Arg::Error(err)) => {
                out.parts.push(format!("(Error: {})", err.message));
                out.fields.insert("error".to_string(), err.to_record());
            }
            (None, Arg::Value(_)) if is_last => {}
            (Some(TypeTag::Object), Arg::Value(Value::Object(map))) if is_last => {
                for (key, value) in map {
                    out.fields.insert(key, value);
                }
            }
            (Some(TypeTag::Object), Arg::Value(value)) => out.parts.push(value.to_string()),
            (_, Arg::Value(value)) => out.parts.push(to_display(&value)),
        }
    }

    out
}

/// Render a value the way it reads inside a message: strings unquoted,
/// integral numbers without a fraction, arrays as comma-joined items.
pub fn to_display(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => display_number(n),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => to_display(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn display_number(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f == 0.0 => "0".to_string(),
        // `Display` for f64 prints the shortest round-trip digits, zero padded.
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => f.to_string(),
        _ => n.to_string(),
    }
}
