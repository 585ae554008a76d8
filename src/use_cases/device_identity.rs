use uuid::Uuid;

use crate::domain::{KeyValueStore, StorageError};
use crate::use_cases::DEVICE_ID_KEY;

// Lazily created, persisted device identifier used to scope daily-code usage.
#[derive(Clone)]
pub struct DeviceIdentity<S> {
    pub store: S,
}

impl<S> DeviceIdentity<S>
where
    S: KeyValueStore,
{
    /// Returns the persisted device id, creating it on first use.
    ///
    /// When storage is unavailable a fresh, unpersisted id is returned instead,
    /// so repeated calls may then disagree with each other.
    pub async fn get_device_id(&self) -> String {
        match self.load_or_create().await {
            Ok(device_id) => device_id,
            Err(err) => {
                tracing::warn!(error = %err, "device id storage unavailable, using ephemeral id.");
                Uuid::new_v4().to_string()
            }
        }
    }

    async fn load_or_create(&self) -> Result<String, StorageError> {
        if let Some(existing) = self
            .store
            .get(DEVICE_ID_KEY)
            .await?
            .filter(|value| !value.is_empty())
        {
            return Ok(existing);
        }

        let device_id = Uuid::new_v4().to_string();
        self.store.set(DEVICE_ID_KEY, &device_id).await?;
        tracing::debug!("created new device id.");
        Ok(device_id)
    }
}
