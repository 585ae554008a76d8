use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate};

use crate::domain::entities::{CodePair, ValidateCodeReply, ValidateCodeRequest};
use crate::domain::errors::{ApiError, StorageError};

// Port for the local persistent key-value store (device id, access record,
// session token, wheel configuration). Absence of a key is not an error.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

#[async_trait]
impl<T> KeyValueStore for Arc<T>
where
    T: KeyValueStore + ?Sized,
{
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key).await
    }
}

// Port for retrieving the current local wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

// Port for the daily-code endpoints.
#[async_trait]
pub trait CodeApi: Send + Sync {
    async fn validate_code(&self, req: ValidateCodeRequest)
    -> Result<ValidateCodeReply, ApiError>;

    async fn todays_code(&self) -> Result<String, ApiError>;

    async fn generate_codes(
        &self,
        start_date: NaiveDate,
        days: u32,
    ) -> Result<Vec<CodePair>, ApiError>;
}

// Port for the recipe generation endpoint. Returns the raw success body; shape
// detection belongs to the normalizer.
#[async_trait]
pub trait RecipeApi: Send + Sync {
    async fn request_recipe(&self, name: &str) -> Result<String, ApiError>;
}

// Port for the wheel configuration file shipped alongside the API.
#[async_trait]
pub trait BundledConfigSource: Send + Sync {
    async fn fetch_bundled_config(&self) -> Result<String, ApiError>;
}
