use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::json::null_as_default;

// The serialization within this layer is a dependency leak, but its a pragmatic approach
// Payload sent to the validation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateCodeRequest {
    // Trimmed, upper-cased code as typed by the user.
    pub code: String,
    // Identifier of this device, see DeviceIdentity.
    pub device_id: String,
}

// Validation endpoint reply after wire decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidateCodeReply {
    pub is_valid: bool,
    pub message: Option<String>,
    pub expires_at: Option<DateTime<FixedOffset>>,
    pub remaining_uses: i32,
    pub token: Option<String>,
}

// Result of a single code validation attempt. Never persisted as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    pub message: String,
    pub expires_at: Option<DateTime<FixedOffset>>,
    pub remaining_uses: i32,
    pub token: Option<String>,
}

impl ValidationOutcome {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: message.into(),
            expires_at: None,
            remaining_uses: 0,
            token: None,
        }
    }
}

// One entry of the admin code range listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodePair {
    pub date: NaiveDate,
    pub code: String,
}

// A single wheel segment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WheelItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub color: String,
}

impl WheelItem {
    pub fn new(text: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: color.into(),
        }
    }
}

// Segments shown on the wheel. Written camelCase, read case-insensitively
// (keys are folded to lower case before decoding).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WheelConfiguration {
    #[serde(
        rename(serialize = "wheelName", deserialize = "wheelname"),
        default,
        deserialize_with = "null_as_default"
    )]
    pub wheel_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<WheelItem>,
}
