use crate::domain::{Clock, Credentials, KeyValueStore};
use crate::use_cases::{API_TOKEN_KEY, AccessLedger};

// Restores a previously issued session token into the shared credentials.
// Must run before any user-triggered request is issued.
pub struct RestoreSessionUseCase<S> {
    pub store: S,
    pub credentials: Credentials,
}

impl<S> RestoreSessionUseCase<S>
where
    S: KeyValueStore,
{
    /// Returns whether a token was restored. Read failures leave the session
    /// anonymous.
    pub async fn execute(&self) -> bool {
        match self.store.get(API_TOKEN_KEY).await {
            Ok(Some(token)) if !token.is_empty() => {
                self.credentials.set_bearer(token);
                tracing::debug!("restored session token.");
                true
            }
            Ok(_) => false,
            Err(err) => {
                tracing::debug!(
                    error = %err,
                    "could not read session token, continuing anonymously."
                );
                false
            }
        }
    }
}

// Drops the session token and the local access record.
pub struct SignOutUseCase<C, S> {
    pub ledger: AccessLedger<C, S>,
    pub store: S,
    pub credentials: Credentials,
}

impl<C, S> SignOutUseCase<C, S>
where
    C: Clock,
    S: KeyValueStore,
{
    pub async fn execute(&self) {
        self.credentials.clear();
        if let Err(err) = self.store.remove(API_TOKEN_KEY).await {
            tracing::warn!(error = %err, "failed to remove session token.");
        }
        self.ledger.clear().await;
        tracing::info!("signed out.");
    }
}
