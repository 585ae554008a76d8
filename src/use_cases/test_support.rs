use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate, TimeDelta, TimeZone};

use crate::domain::{
    ApiError, BundledConfigSource, Clock, CodeApi, CodePair, KeyValueStore, RecipeApi,
    StorageError, ValidateCodeReply, ValidateCodeRequest,
};

// Builds a local time at the given UTC offset (hours) for deterministic tests.
pub(crate) fn local_time(
    offset_hours: i32,
    (year, month, day): (i32, u32, u32),
    (hour, minute, second): (u32, u32, u32),
) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(offset_hours * 3600)
        .expect("valid offset")
        .with_ymd_and_hms(year, month, day, hour, minute, second)
        .single()
        .expect("unambiguous local time")
}

// Shared, adjustable time source so tests can simulate elapsed time.
#[derive(Clone)]
pub(crate) struct FixedClock {
    now: Arc<Mutex<DateTime<FixedOffset>>>,
}

impl FixedClock {
    pub(crate) fn at(now: DateTime<FixedOffset>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub(crate) fn set(&self, now: DateTime<FixedOffset>) {
        *self.now.lock().expect("clock mutex poisoned") = now;
    }

    pub(crate) fn advance(&self, delta: TimeDelta) {
        let mut guard = self.now.lock().expect("clock mutex poisoned");
        *guard += delta;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        *self.now.lock().expect("clock mutex poisoned")
    }
}

#[derive(Clone, Copy, Default)]
pub(crate) struct FailureFlags {
    pub get: bool,
    pub set: bool,
    pub remove: bool,
}

#[derive(Clone)]
pub(crate) struct RecordingStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
    failures: FailureFlags,
}

impl RecordingStore {
    pub(crate) fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            failures: FailureFlags::default(),
        }
    }

    pub(crate) fn with_failures(mut self, failures: FailureFlags) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) fn failing() -> Self {
        Self::new().with_failures(FailureFlags {
            get: true,
            set: true,
            remove: true,
        })
    }

    pub(crate) fn insert_test_entry(&self, key: &str, value: impl Into<String>) {
        let mut guard = self.entries.lock().expect("entries mutex poisoned");
        guard.insert(key.to_string(), value.into());
    }

    pub(crate) fn get_test_entry(&self, key: &str) -> Option<String> {
        let guard = self.entries.lock().expect("entries mutex poisoned");
        guard.get(key).cloned()
    }
}

#[async_trait]
impl KeyValueStore for RecordingStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.failures.get {
            return Err(StorageError::Unavailable("get failed".to_string()));
        }

        let guard = self.entries.lock().expect("entries mutex poisoned");
        Ok(guard.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.failures.set {
            return Err(StorageError::Unavailable("set failed".to_string()));
        }

        let mut guard = self.entries.lock().expect("entries mutex poisoned");
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        if self.failures.remove {
            return Err(StorageError::Unavailable("remove failed".to_string()));
        }

        let mut guard = self.entries.lock().expect("entries mutex poisoned");
        guard.remove(key);
        Ok(())
    }
}

// Scripted stand-in for the remote API. Replies are consumed in order; every
// request is recorded so tests can assert on what would have hit the wire.
#[derive(Clone, Default)]
pub(crate) struct FakeApi {
    validate_replies: Arc<Mutex<VecDeque<Result<ValidateCodeReply, ApiError>>>>,
    recipe_replies: Arc<Mutex<VecDeque<Result<String, ApiError>>>>,
    bundled_replies: Arc<Mutex<VecDeque<Result<String, ApiError>>>>,
    todays_code: Arc<Mutex<Option<String>>>,
    code_pairs: Arc<Mutex<Option<Vec<CodePair>>>>,
    pub validate_requests: Arc<Mutex<Vec<ValidateCodeRequest>>>,
    pub recipe_requests: Arc<Mutex<Vec<String>>>,
    pub generate_requests: Arc<Mutex<Vec<(NaiveDate, u32)>>>,
}

impl FakeApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_validate_reply(&self, reply: Result<ValidateCodeReply, ApiError>) {
        self.validate_replies
            .lock()
            .expect("replies mutex poisoned")
            .push_back(reply);
    }

    pub(crate) fn push_recipe_reply(&self, reply: Result<String, ApiError>) {
        self.recipe_replies
            .lock()
            .expect("replies mutex poisoned")
            .push_back(reply);
    }

    pub(crate) fn push_bundled_reply(&self, reply: Result<String, ApiError>) {
        self.bundled_replies
            .lock()
            .expect("replies mutex poisoned")
            .push_back(reply);
    }

    pub(crate) fn set_todays_code(&self, code: impl Into<String>) {
        *self.todays_code.lock().expect("code mutex poisoned") = Some(code.into());
    }

    pub(crate) fn set_code_pairs(&self, pairs: Vec<CodePair>) {
        *self.code_pairs.lock().expect("pairs mutex poisoned") = Some(pairs);
    }

    pub(crate) fn validate_request_count(&self) -> usize {
        self.validate_requests
            .lock()
            .expect("requests mutex poisoned")
            .len()
    }

    pub(crate) fn recipe_request_count(&self) -> usize {
        self.recipe_requests
            .lock()
            .expect("requests mutex poisoned")
            .len()
    }
}

fn unscripted() -> ApiError {
    ApiError::Transport("no scripted reply".to_string())
}

#[async_trait]
impl CodeApi for FakeApi {
    async fn validate_code(
        &self,
        req: ValidateCodeRequest,
    ) -> Result<ValidateCodeReply, ApiError> {
        self.validate_requests
            .lock()
            .expect("requests mutex poisoned")
            .push(req);
        self.validate_replies
            .lock()
            .expect("replies mutex poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(unscripted()))
    }

    async fn todays_code(&self) -> Result<String, ApiError> {
        self.todays_code
            .lock()
            .expect("code mutex poisoned")
            .clone()
            .ok_or_else(unscripted)
    }

    async fn generate_codes(
        &self,
        start_date: NaiveDate,
        days: u32,
    ) -> Result<Vec<CodePair>, ApiError> {
        self.generate_requests
            .lock()
            .expect("requests mutex poisoned")
            .push((start_date, days));
        self.code_pairs
            .lock()
            .expect("pairs mutex poisoned")
            .clone()
            .ok_or_else(unscripted)
    }
}

#[async_trait]
impl RecipeApi for FakeApi {
    async fn request_recipe(&self, name: &str) -> Result<String, ApiError> {
        self.recipe_requests
            .lock()
            .expect("requests mutex poisoned")
            .push(name.to_string());
        self.recipe_replies
            .lock()
            .expect("replies mutex poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(unscripted()))
    }
}

#[async_trait]
impl BundledConfigSource for FakeApi {
    async fn fetch_bundled_config(&self) -> Result<String, ApiError> {
        self.bundled_replies
            .lock()
            .expect("replies mutex poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(unscripted()))
    }
}
