//! Case-insensitive JSON decoding helpers.
//!
//! The API (and the language model behind the recipe endpoint) does not
//! commit to a property-name casing, so every DTO is decoded from a value
//! whose object keys were folded to ASCII lower case first. Structs that
//! decode this way name their multi-word fields with lower-case renames,
//! e.g. `#[serde(rename(deserialize = "preptime"))]`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Lower-cases every object key, recursively. Key order is preserved; when two
/// keys fold to the same name the later one wins.
pub fn fold_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key.to_ascii_lowercase(), fold_keys(value)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(fold_keys).collect()),
        other => other,
    }
}

pub fn from_value_ci<T: DeserializeOwned>(value: Value) -> Result<T, serde_json::Error> {
    serde_json::from_value(fold_keys(value))
}

pub fn from_str_ci<T: DeserializeOwned>(text: &str) -> Result<T, serde_json::Error> {
    from_value_ci(serde_json::from_str(text)?)
}

/// Looks up `key` in `map` ignoring ASCII case. First match in document order.
pub fn get_ci<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(key))
        .map(|(_, value)| value)
}

pub fn has_any_key_ci(map: &Map<String, Value>, keys: &[&str]) -> bool {
    keys.iter().any(|key| get_ci(map, key).is_some())
}

// Treats an explicit `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
