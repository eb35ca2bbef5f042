use serde_json::{Map, Value};

/// Flattens a nested JSON object into a single-level map with dotted keys.
///
/// Only plain objects are descended into; arrays and scalars are treated as
/// leaf values ("safe" mode), so `{"a": {"b": 1}, "c": [2]}` becomes
/// `{"a.b": 1, "c": [2]}`.
pub fn flatten(value: &Value) -> Map<String, Value> {
    let mut flat = Map::new();
    match value {
        Value::Object(object) => {
            for (key, entry) in object {
                flatten_into(&mut flat, key, entry);
            }
        }
        _ => {
            log::debug!("Not an object, nothing to flatten: {}", value);
        }
    }
    flat
}

fn flatten_into(flat: &mut Map<String, Value>, prefix: &str, value: &Value) {
    match value {
        Value::Object(object) if !object.is_empty() => {
            for (key, entry) in object {
                flatten_into(flat, &format!("{}.{}", prefix, key), entry);
            }
        }
        _ => {
            flat.insert(prefix.to_string(), value.clone());
        }
    }
}

/// Expands dotted keys back into nested objects.
///
/// The inverse of [`flatten`]: `{"a.b": 1}` becomes `{"a": {"b": 1}}`.
/// Array values are carried over verbatim, never interpreted as containers.
/// When a scalar sits where a nested object is needed, the nested object
/// wins (last write at the deeper path).
pub fn unflatten(flat: &Map<String, Value>) -> Value {
    let mut root = Map::new();
    for (dotted, value) in flat {
        let mut node = &mut root;
        let mut segments = dotted.split('.').peekable();
        while let Some(segment) = segments.next() {
            if segments.peek().is_none() {
                node.insert(segment.to_string(), value.clone());
                break;
            }

            if !node.get(segment).map(Value::is_object).unwrap_or(false) {
                node.insert(segment.to_string(), Value::Object(Map::new()));
            }
            node = node
                .get_mut(segment)
                .and_then(Value::as_object_mut)
                .unwrap_or_else(|| unreachable!("segment was just inserted"));
        }
    }
    Value::Object(root)
}
