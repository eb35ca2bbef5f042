use serde_json::Value;

/*
 * When merging two configuration documents, arrays of non key-value pairs
 * are combined as a set union (incoming elements first). This is the case,
 * for example, for lists of author strings or file paths to include/ignore.
 * Key-value pair groups, on the other hand, are merged into one, regardless
 * of whether they sit in an array or not.
 */

fn is_array_of_non_objects(value: &Value) -> bool {
    match value {
        Value::Array(items) => !items.iter().any(Value::is_object),
        _ => false,
    }
}

/// Deep-merges `incoming` onto `existing` and returns the combined document.
///
/// Rules, in order:
/// - two arrays without object elements: set union, `incoming` elements
///   first, remaining `existing` elements appended, duplicates removed;
/// - two objects: recursive key-by-key merge;
/// - two arrays containing objects: element-wise merge by index, the longer
///   tail carried over;
/// - anything else: `incoming` wins, except that a `null` incoming value
///   never clobbers existing content.
///
/// The merge is a total structural transform; it never fails.
pub fn merge_documents(existing: Value, incoming: Value) -> Value {
    match (existing, incoming) {
        (existing, Value::Null) => existing,
        (existing, incoming)
            if is_array_of_non_objects(&existing) && is_array_of_non_objects(&incoming) =>
        {
            let mut union = Vec::new();
            let existing_items = match existing {
                Value::Array(items) => items,
                _ => unreachable!(),
            };
            let incoming_items = match incoming {
                Value::Array(items) => items,
                _ => unreachable!(),
            };
            for item in incoming_items.into_iter().chain(existing_items) {
                if !union.contains(&item) {
                    union.push(item);
                }
            }
            Value::Array(union)
        }
        (Value::Object(mut existing), Value::Object(incoming)) => {
            for (key, incoming_entry) in incoming {
                let merged = match existing.remove(&key) {
                    Some(existing_entry) => merge_documents(existing_entry, incoming_entry),
                    None => incoming_entry,
                };
                existing.insert(key, merged);
            }
            Value::Object(existing)
        }
        (Value::Array(existing), Value::Array(incoming)) => {
            let mut existing = existing.into_iter();
            let mut merged: Vec<Value> = Vec::new();
            for incoming_entry in incoming {
                merged.push(match existing.next() {
                    Some(existing_entry) => merge_documents(existing_entry, incoming_entry),
                    None => incoming_entry,
                });
            }
            merged.extend(existing);
            Value::Array(merged)
        }
        (_, incoming) => incoming,
    }
}
