// Domain-level errors shared by the use cases and their adapters.

/// Local key-value persistence failure. Callers treat these as best effort and
/// fall back to safe defaults; only `WheelConfigurationStore::save` surfaces one.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage contents could not be encoded or decoded: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failure talking to the remote API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (connect, DNS, TLS, timeout...).
    #[error("transport error: {0}")]
    Transport(String),

    /// The API answered with a non-success status.
    #[error("API returned {status} {reason}: {body}")]
    Upstream {
        status: u16,
        reason: String,
        // `message` field of a JSON error body, when there is one.
        message: Option<String>,
        // Raw body kept for diagnostics.
        body: String,
    },

    /// A success response whose body did not match the expected shape.
    #[error("response decode error: {0}")]
    Decode(String),
}

/// Why a recipe could not be recovered from a success response.
///
/// Each shape failure is its own variant so callers can tell "the server sent
/// garbage" apart from "the server sent a shape we do not recognise".
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("API response was not valid JSON: {0}")]
    MalformedResponse(#[source] serde_json::Error),

    #[error("AI reply was not valid recipe JSON: {0}")]
    MalformedAiReply(#[source] serde_json::Error),

    #[error("AI 'choices' content was not valid recipe JSON: {0}")]
    MalformedAiChoiceContent(#[source] serde_json::Error),

    #[error("API returned JSON but did not contain a recipe or 'reply' field")]
    NoRecipeInResponse,

    #[error("API response JSON is not an object")]
    UnsupportedResponseShape,
}

/// Errors raised by recipe generation.
#[derive(Debug, thiserror::Error)]
pub enum RecipeError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}
