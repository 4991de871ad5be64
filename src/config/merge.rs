//! Deep merge of configuration tiers.
//!
//! Objects merge key by key with the higher tier winning; arrays and
//! scalars are replaced whole.

use serde_json::Value;

/// Deep merge two JSON values, with `overlay` taking precedence over `base`.
///
/// A null overlay means "not specified" and keeps the base value.
///
/// ```
/// use serde_json::json;
/// use trick_sync::config::deep_merge;
///
/// let base = json!({ "trello": { "timeout_secs": 60, "json_dir": "JSON" } });
/// let overlay = json!({ "trello": { "timeout_secs": 5 } });
/// let merged = deep_merge(base, overlay);
/// assert_eq!(merged, json!({ "trello": { "timeout_secs": 5, "json_dir": "JSON" } }));
/// ```
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged_value = match base_map.remove(&key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => overlay_value,
                };
                base_map.insert(key, merged_value);
            }
            Value::Object(base_map)
        }
        (base, Value::Null) => base,
        (_, overlay) => overlay,
    }
}

/// Fold `deep_merge` over tiers, later tiers winning.
pub fn deep_merge_all(values: impl IntoIterator<Item = Value>) -> Value {
    values.into_iter().fold(Value::Null, deep_merge)
}
