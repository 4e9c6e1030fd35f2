//! Recursive key rewriting of structured fields.

use crate::config::{self, Config};
use crate::error::TypecastError;
use crate::key::decorate;
use crate::tag::{classify, Classify, TypeTag, ValueClassifier};
use serde_json::{Map, Value};

/// Fold `fields` into `target`, suffixing every key with its value's type.
///
/// Uses the process-wide config and the default classifier. Fails when
/// typecasting is enabled and `fields` is not a JSON object.
pub fn typecast(target: Map<String, Value>, fields: &Value) -> Result<Map<String, Value>, TypecastError> {
    typecast_with(target, fields, &config::current(), &ValueClassifier)
}

/// Same as [`typecast`] with explicit config and classifier.
///
/// With `config.typecast` off this is a shallow merge; non-object `fields`
/// then contribute nothing.
pub fn typecast_with(
    target: Map<String, Value>,
    fields: &Value,
    config: &Config,
    classifier: &dyn Classify,
) -> Result<Map<String, Value>, TypecastError> {
    match fields {
        Value::Object(fields) => Ok(fold_fields(target, fields, config, classifier)),
        other if config.typecast => Err(TypecastError::InvalidFields {
            found: json_kind(other),
        }),
        _ => Ok(target),
    }
}

/// Infallible form used by the event assembler, whose fields are always
/// a map.
pub(crate) fn fold_fields(
    target: Map<String, Value>,
    fields: &Map<String, Value>,
    config: &Config,
    classifier: &dyn Classify,
) -> Map<String, Value> {
    let mut target = target;

    if !config.typecast {
        for (key, value) in fields {
            target.insert(key.clone(), value.clone());
        }
        return target;
    }

    for (key, value) in fields {
        let decorated = classifier.classify(value).map(|tag| {
            let value = match (tag, value) {
                (TypeTag::Object, Value::Object(inner)) => {
                    Value::Object(fold_fields(Map::new(), inner, config, classifier))
                }
                _ => value.clone(),
            };
            (decorate(key, tag), value)
        });

        // The undecorated key goes away even when it is re-added unchanged.
        target.shift_remove(key);
        if let Some((key, value)) = decorated {
            target.insert(key, value);
        }
    }

    target
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        other => classify(other).map(TypeTag::as_str).unwrap_or("null"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    fn cast(target: Value, fields: Value) -> Value {
        let out = typecast_with(object(target), &fields, &Config::default(), &ValueClassifier).unwrap();
        Value::Object(out)
    }

    #[test]
    fn test_scalars_and_absent() {
        let out = cast(json!({}), json!({"a": 1.5, "b": 2, "c": null, "d": [1, 2]}));
        assert_eq!(out, json!({"a__float": 1.5, "b__number": 2, "d__array": [1, 2]}));
    }

    #[test]
    fn test_nested_objects_are_rebuilt() {
        let out = cast(
            json!({}),
            json!({"user": {"id": 7, "name": "ann", "tags": ["x"], "geo": {"lat": 1.25, "gone": null}}}),
        );
        assert_eq!(
            out,
            json!({"user__object": {
                "id__number": 7,
                "name__string": "ann",
                "tags__array": ["x"],
                "geo__object": {"lat__float": 1.25}
            }})
        );
    }

    #[test]
    fn test_arrays_are_not_recursed() {
        let out = cast(json!({}), json!({"list": [{"a": 1}, null]}));
        assert_eq!(out, json!({"list__array": [{"a": 1}, null]}));
    }

    #[test]
    fn test_reshape_in_place_keeps_other_keys_first() {
        let out = cast(json!({"keep": 1, "n": 3, "gone": "x"}), json!({"n": 3, "gone": null, "s": "v"}));
        let keys: Vec<_> = out.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["keep", "n__number", "s__string"]);
    }

    #[test]
    fn test_already_suffixed_key_moves_to_end() {
        let out = cast(json!({"a__number": 1, "b": true}), json!({"a__number": 1}));
        let keys: Vec<_> = out.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["b", "a__number"]);
    }

    #[test]
    fn test_existing_decorated_key_is_overwritten_in_place() {
        let out = cast(json!({"n__number": 0, "b": 1}), json!({"n": 5}));
        let keys: Vec<_> = out.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["n__number", "b"]);
        assert_eq!(out["n__number"], json!(5));
    }

    #[test]
    fn test_rejects_non_object_fields() {
        let err = typecast_with(Map::new(), &json!([1]), &Config::default(), &ValueClassifier).unwrap_err();
        assert_eq!(err, TypecastError::InvalidFields { found: "array" });
        assert_eq!(err.to_string(), "fields argument should be an object, found array");

        let err = typecast_with(Map::new(), &Value::Null, &Config::default(), &ValueClassifier).unwrap_err();
        assert_eq!(err, TypecastError::InvalidFields { found: "null" });
    }

    #[test]
    fn test_disabled_is_shallow_merge() {
        let cfg = Config::default().with_typecast(false);
        let out = typecast_with(object(json!({"x": 1})), &json!({"y": null, "z": {"a": 1}}), &cfg, &ValueClassifier)
            .unwrap();
        assert_eq!(Value::Object(out), json!({"x": 1, "y": null, "z": {"a": 1}}));

        let out = typecast_with(Map::new(), &json!("nope"), &cfg, &ValueClassifier).unwrap();
        assert!(out.is_empty());
    }
}
