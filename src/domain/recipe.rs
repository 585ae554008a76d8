use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

use crate::domain::json::{from_str_ci, from_value_ci, null_as_default};

// A generated recipe. Built fresh per generation call, never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ingredients: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub instructions: Vec<String>,
    #[serde(
        rename(serialize = "prepTime", deserialize = "preptime"),
        default,
        deserialize_with = "null_as_default"
    )]
    pub prep_time: String,
    #[serde(
        rename(serialize = "cookTime", deserialize = "cooktime"),
        default,
        deserialize_with = "null_as_default"
    )]
    pub cook_time: String,
    #[serde(
        rename(serialize = "totalTime", deserialize = "totaltime"),
        default,
        deserialize_with = "null_as_default"
    )]
    pub total_time: String,
    // Models emit either `"4"` or `4` here.
    #[serde(default, deserialize_with = "servings_as_string")]
    pub servings: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub difficulty: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

impl Recipe {
    /// Decodes a recipe object, matching property names case-insensitively.
    pub fn from_json(value: Value) -> Result<Self, serde_json::Error> {
        from_value_ci(value)
    }

    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        from_str_ci(text)
    }
}

fn servings_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number_to_string(&number)),
        other => Err(D::Error::custom(format!(
            "servings must be a string or a number, got {other}"
        ))),
    }
}

// Integers stay exact; everything else uses the shortest round-trip float
// form, which never depends on locale.
fn number_to_string(number: &Number) -> String {
    if let Some(value) = number.as_i64() {
        value.to_string()
    } else if let Some(value) = number.as_u64() {
        value.to_string()
    } else if let Some(value) = number.as_f64() {
        value.to_string()
    } else {
        number.to_string()
    }
}
