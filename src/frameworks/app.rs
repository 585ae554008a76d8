use crate::domain::{Credentials, KeyValueStore};
use crate::frameworks::config::Settings;
use crate::interface_adapters::clients::ApiClient;
use crate::interface_adapters::clock::SystemClock;
use crate::interface_adapters::storage::FileKeyValueStore;
use crate::use_cases::{
    AccessLedger, AdminCodesUseCase, DeviceIdentity, GenerateRecipeUseCase, RestoreSessionUseCase,
    SignOutUseCase, ValidateCodeUseCase, WheelConfigurationStore,
};
use anyhow::Context;
use std::sync::Arc;

pub type SharedStore = Arc<dyn KeyValueStore>;

pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // Logs go to stderr; stdout carries command output.
    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

// Wired application: one shared store, one API client and one credentials slot
// handed to every use case.
pub struct App {
    pub api: ApiClient,
    pub store: SharedStore,
    pub clock: SystemClock,
    pub credentials: Credentials,
    pub wheel: WheelConfigurationStore<ApiClient, SharedStore>,
}

impl App {
    /// Builds the app from settings, using the file-backed store.
    pub async fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let base_url = settings.api_base_url()?;
        let storage_path = settings.storage_path()?;
        tracing::debug!(%base_url, storage = %storage_path.display(), "app configured.");

        let credentials = Credentials::new();
        let api = ApiClient::new(base_url, credentials.clone(), settings.request_timeout())
            .context("failed to build HTTP client")?;
        let store: SharedStore = Arc::new(FileKeyValueStore::new(storage_path));

        Ok(Self::new(api, store).await)
    }

    /// Wires the app and restores any stored session token, so no request can
    /// leave before the bearer credential is in place.
    pub async fn new(api: ApiClient, store: SharedStore) -> Self {
        let credentials = api.credentials().clone();
        RestoreSessionUseCase {
            store: store.clone(),
            credentials: credentials.clone(),
        }
        .execute()
        .await;

        Self {
            wheel: WheelConfigurationStore::new(api.clone(), store.clone()),
            api,
            store,
            clock: SystemClock,
            credentials,
        }
    }

    pub fn validate_code(&self) -> ValidateCodeUseCase<ApiClient, SystemClock, SharedStore> {
        ValidateCodeUseCase::new(
            self.api.clone(),
            self.clock,
            self.store.clone(),
            self.credentials.clone(),
        )
    }

    pub fn access_ledger(&self) -> AccessLedger<SystemClock, SharedStore> {
        AccessLedger {
            clock: self.clock,
            store: self.store.clone(),
        }
    }

    pub fn device_identity(&self) -> DeviceIdentity<SharedStore> {
        DeviceIdentity {
            store: self.store.clone(),
        }
    }

    pub fn sign_out(&self) -> SignOutUseCase<SystemClock, SharedStore> {
        SignOutUseCase {
            ledger: self.access_ledger(),
            store: self.store.clone(),
            credentials: self.credentials.clone(),
        }
    }

    pub fn recipes(&self) -> GenerateRecipeUseCase<ApiClient> {
        GenerateRecipeUseCase {
            api: self.api.clone(),
        }
    }

    pub fn admin_codes(&self) -> AdminCodesUseCase<ApiClient> {
        AdminCodesUseCase {
            api: self.api.clone(),
        }
    }
}
