use tokio::sync::Mutex;

use crate::domain::json::from_str_ci;
use crate::domain::{
    BundledConfigSource, KeyValueStore, StorageError, WheelConfiguration, WheelItem,
};
use crate::use_cases::WHEEL_CONFIG_KEY;

// Wheel segments: local copy first, then the bundled file, then built-in
// defaults. The first successful load is memoized until invalidated.
pub struct WheelConfigurationStore<B, S> {
    bundled: B,
    store: S,
    current: Mutex<Option<WheelConfiguration>>,
}

impl<B, S> WheelConfigurationStore<B, S>
where
    B: BundledConfigSource,
    S: KeyValueStore,
{
    pub fn new(bundled: B, store: S) -> Self {
        Self {
            bundled,
            store,
            current: Mutex::new(None),
        }
    }

    pub async fn load(&self) -> WheelConfiguration {
        let mut current = self.current.lock().await;
        if let Some(config) = current.as_ref() {
            return config.clone();
        }

        let config = match self.load_local().await {
            Some(config) => config,
            None => self.load_bundled().await,
        };
        *current = Some(config.clone());
        config
    }

    /// Replaces the cached configuration and persists it locally.
    pub async fn save(&self, config: WheelConfiguration) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(&config)?;
        *self.current.lock().await = Some(config);
        self.store.set(WHEEL_CONFIG_KEY, &json).await
    }

    pub async fn invalidate_cache(&self) {
        *self.current.lock().await = None;
    }

    /// Drops the local copy so the next load falls back to the bundled file.
    pub async fn reset(&self) -> Result<(), StorageError> {
        self.invalidate_cache().await;
        self.store.remove(WHEEL_CONFIG_KEY).await
    }

    async fn load_local(&self) -> Option<WheelConfiguration> {
        let raw = match self.store.get(WHEEL_CONFIG_KEY).await {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return None,
            Err(err) => {
                tracing::warn!(error = %err, "failed to read local wheel configuration.");
                return None;
            }
        };

        match from_str_ci::<WheelConfiguration>(&raw) {
            Ok(config) if !config.items.is_empty() => Some(config),
            Ok(_) => None,
            Err(err) => {
                tracing::warn!(error = %err, "ignoring unreadable local wheel configuration.");
                None
            }
        }
    }

    async fn load_bundled(&self) -> WheelConfiguration {
        let raw = match self.bundled.fetch_bundled_config().await {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "bundled wheel configuration unavailable, using defaults."
                );
                return default_configuration();
            }
        };

        from_str_ci(&raw).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "bundled wheel configuration is invalid, using defaults.");
            default_configuration()
        })
    }
}

pub fn default_configuration() -> WheelConfiguration {
    let items = [
        ("Pizza Margherita", "#ff6b6b"),
        ("Chicken Curry", "#4ecdc4"),
        ("Beef Tacos", "#45b7d1"),
        ("Pasta Carbonara", "#96ceb4"),
        ("Salmon Teriyaki", "#feca57"),
        ("Vegetable Stir Fry", "#ff9ff3"),
        ("Greek Salad", "#54a0ff"),
        ("Chocolate Cake", "#5f27cd"),
    ];

    WheelConfiguration {
        wheel_name: "Recipe Wheel".to_string(),
        items: items
            .into_iter()
            .map(|(text, color)| WheelItem::new(text, color))
            .collect(),
    }
}
