//! Recovers a [`Recipe`] from whatever the recipe endpoint returned.
//!
//! The endpoint fronts a language model whose output shape is not fixed, so
//! the body is matched against known shapes in priority order, from the most
//! structured to the least:
//!
//! 1. the recipe object itself;
//! 2. `{ "reply": "<recipe json, maybe fenced>" }`;
//! 3. any wrapper whose first object-valued property looks like a recipe;
//! 4. a chat-completion payload, `choices[0].message.content`.
//!
//! A shape that matches but fails to decode in cases 2 and 4 stops the search.
//! Only a body matching no shape at all falls through to
//! [`NormalizeError::NoRecipeInResponse`].

use serde_json::{Map, Value};

use crate::domain::json::{get_ci, has_any_key_ci};
use crate::domain::{NormalizeError, Recipe};

const DIRECT_RECIPE_KEYS: [&str; 3] = ["name", "ingredients", "instructions"];
const NESTED_RECIPE_KEYS: [&str; 2] = ["name", "ingredients"];
const FENCE: &str = "```";

// Outcome of one extraction attempt.
enum Attempt {
    Found(Recipe),
    Failed(NormalizeError),
    NotApplicable,
}

type Extractor = fn(&Map<String, Value>) -> Attempt;

const EXTRACTORS: [(&str, Extractor); 4] = [
    ("direct", direct_object),
    ("reply", reply_envelope),
    ("nested", nested_envelope),
    ("choices", chat_completion),
];

/// `Ok(None)` for a blank body: nothing was generated, which is not an error.
pub fn normalize(body: &str) -> Result<Option<Recipe>, NormalizeError> {
    if body.trim().is_empty() {
        return Ok(None);
    }

    let root: Value = serde_json::from_str(body).map_err(NormalizeError::MalformedResponse)?;
    let Value::Object(root) = root else {
        return Err(NormalizeError::UnsupportedResponseShape);
    };

    for (shape, extract) in EXTRACTORS {
        match extract(&root) {
            Attempt::Found(recipe) => {
                tracing::debug!(shape, "recipe extracted.");
                return Ok(Some(recipe));
            }
            Attempt::Failed(err) => {
                tracing::warn!(shape, error = %err, "recipe shape matched but failed to decode.");
                return Err(err);
            }
            Attempt::NotApplicable => {}
        }
    }

    Err(NormalizeError::NoRecipeInResponse)
}

/// Strips a surrounding Markdown code fence (with optional language tag).
/// Text without a leading fence is returned trimmed.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    if !trimmed.starts_with(FENCE) {
        return trimmed;
    }

    // Drop the opening fence line, tag included.
    let mut inner = match trimmed.find('\n') {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    };
    if let Some(stripped) = inner.strip_suffix(FENCE) {
        inner = stripped;
    }
    inner.trim()
}

fn direct_object(root: &Map<String, Value>) -> Attempt {
    if !has_any_key_ci(root, &DIRECT_RECIPE_KEYS) {
        return Attempt::NotApplicable;
    }
    decode_object(root)
}

fn reply_envelope(root: &Map<String, Value>) -> Attempt {
    let Some(Value::String(reply)) = get_ci(root, "reply") else {
        return Attempt::NotApplicable;
    };
    match Recipe::from_json_str(strip_code_fence(reply)) {
        Ok(recipe) => Attempt::Found(recipe),
        Err(err) => Attempt::Failed(NormalizeError::MalformedAiReply(err)),
    }
}

fn nested_envelope(root: &Map<String, Value>) -> Attempt {
    root.values()
        .find_map(|value| match value {
            Value::Object(candidate) if has_any_key_ci(candidate, &NESTED_RECIPE_KEYS) => {
                Some(candidate)
            }
            _ => None,
        })
        .map_or(Attempt::NotApplicable, decode_object)
}

fn chat_completion(root: &Map<String, Value>) -> Attempt {
    let content = get_ci(root, "choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .and_then(Value::as_object)
        .and_then(|choice| get_ci(choice, "message"))
        .and_then(Value::as_object)
        .and_then(|message| get_ci(message, "content"))
        .and_then(Value::as_str);

    let Some(content) = content else {
        return Attempt::NotApplicable;
    };
    match Recipe::from_json_str(strip_code_fence(content)) {
        Ok(recipe) => Attempt::Found(recipe),
        Err(err) => Attempt::Failed(NormalizeError::MalformedAiChoiceContent(err)),
    }
}

fn decode_object(object: &Map<String, Value>) -> Attempt {
    match Recipe::from_json(Value::Object(object.clone())) {
        Ok(recipe) => Attempt::Found(recipe),
        Err(err) => Attempt::Failed(NormalizeError::MalformedResponse(err)),
    }
}
