use serde_json::Value;
use std::fmt;

/// Runtime type of a field value, rendered as the `__<tag>` key suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    String,
    Number,
    Float,
    Boolean,
    Array,
    Object,
    Error,
}

impl TypeTag {
    pub const ALL: [TypeTag; 7] = [
        TypeTag::String,
        TypeTag::Number,
        TypeTag::Float,
        TypeTag::Boolean,
        TypeTag::Array,
        TypeTag::Object,
        TypeTag::Error,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TypeTag::String => "string",
            TypeTag::Number => "number",
            TypeTag::Float => "float",
            TypeTag::Boolean => "boolean",
            TypeTag::Array => "array",
            TypeTag::Object => "object",
            TypeTag::Error => "error",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decides the [`TypeTag`] of a field value.
///
/// `None` means the value is absent and its field must be dropped from
/// the event instead of being decorated. The pipeline holds the
/// classifier as a trait object so it can be swapped (for example to
/// count classification work in tests).
pub trait Classify: Send + Sync {
    fn classify(&self, value: &Value) -> Option<TypeTag>;
}

/// Default classifier over JSON values.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueClassifier;

impl Classify for ValueClassifier {
    fn classify(&self, value: &Value) -> Option<TypeTag> {
        classify(value)
    }
}

/// Classify a JSON value.
///
/// Numbers are `float` only when they hold a finite, non-integral value;
/// `2.0` is a `number` just like `2`.
pub fn classify(value: &Value) -> Option<TypeTag> {
    match value {
        Value::Null => None,
        Value::Bool(_) => Some(TypeTag::Boolean),
        Value::String(_) => Some(TypeTag::String),
        Value::Array(_) => Some(TypeTag::Array),
        Value::Object(_) => Some(TypeTag::Object),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.is_finite() && f.fract() != 0.0 => Some(TypeTag::Float),
            _ => Some(TypeTag::Number),
        },
    }
}
