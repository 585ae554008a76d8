// Wire DTOs for the recipe-wheel API. Responses are decoded after folding keys
// to lower case, hence the lower-case renames.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::json::null_as_default;
use crate::domain::{CodePair, ValidateCodeReply};

// Response payload from the validation endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ValidateCodeResponse {
    #[serde(rename = "isvalid", default, deserialize_with = "null_as_default")]
    pub is_valid: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(rename = "expiresat", default)]
    pub expires_at: Option<String>,
    #[serde(rename = "remaininguses", default, deserialize_with = "null_as_default")]
    pub remaining_uses: i32,
    #[serde(default)]
    pub token: Option<String>,
}

impl From<ValidateCodeResponse> for ValidateCodeReply {
    fn from(dto: ValidateCodeResponse) -> Self {
        Self {
            is_valid: dto.is_valid,
            message: dto.message,
            expires_at: dto.expires_at.as_deref().and_then(parse_server_timestamp),
            remaining_uses: dto.remaining_uses,
            token: dto.token,
        }
    }
}

// Request payload for recipe generation.
#[derive(Debug, Serialize)]
pub struct RecipeRequest<'a> {
    pub name: &'a str,
}

// Response payload for today's code.
#[derive(Debug, Deserialize)]
pub struct TodayCodeResponse {
    #[serde(default)]
    pub code: Option<String>,
}

// Request payload for generating a range of codes.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCodesRequest {
    pub start_date: String,
    pub days: u32,
}

impl GenerateCodesRequest {
    pub fn new(start_date: NaiveDate, days: u32) -> Self {
        Self {
            start_date: start_date.format("%Y-%m-%dT00:00:00").to_string(),
            days,
        }
    }
}

// One element of the generate-codes response.
#[derive(Debug, Deserialize)]
pub struct CodePairResponse {
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
}

impl CodePairResponse {
    pub fn into_pair(self) -> Option<CodePair> {
        Some(CodePair {
            date: parse_server_date(&self.date)?,
            code: self.code,
        })
    }
}

// Error envelope returned with non-success statuses.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
}

// Accepts RFC 3339 and offset-less ISO-8601 timestamps; the latter are taken as UTC.
pub fn parse_server_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp);
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc().fixed_offset())
}

pub fn parse_server_date(raw: &str) -> Option<NaiveDate> {
    parse_server_timestamp(raw)
        .map(|stamp| stamp.date_naive())
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
}
