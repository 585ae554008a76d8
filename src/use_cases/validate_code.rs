use crate::domain::{
    ApiError, Clock, CodeApi, Credentials, KeyValueStore, ValidateCodeReply,
    ValidateCodeRequest, ValidationOutcome,
};
use crate::use_cases::{API_TOKEN_KEY, AccessLedger, DeviceIdentity};

const BLANK_CODE_MESSAGE: &str = "Please enter a code.";
const INVALID_CODE_MESSAGE: &str = "Invalid code.";
const ACCESS_GRANTED_MESSAGE: &str = "Access granted!";

// Daily-code validation use case with injected dependencies.
//
// Never fails: every problem becomes a rejected `ValidationOutcome`, and local
// state is only touched once the server has accepted the code.
pub struct ValidateCodeUseCase<A, C, S> {
    pub api: A,
    pub device: DeviceIdentity<S>,
    pub ledger: AccessLedger<C, S>,
    pub store: S,
    pub credentials: Credentials,
}

impl<A, C, S> ValidateCodeUseCase<A, C, S>
where
    A: CodeApi,
    C: Clock + Clone,
    S: KeyValueStore + Clone,
{
    pub fn new(api: A, clock: C, store: S, credentials: Credentials) -> Self {
        Self {
            api,
            device: DeviceIdentity {
                store: store.clone(),
            },
            ledger: AccessLedger {
                clock,
                store: store.clone(),
            },
            store,
            credentials,
        }
    }

    #[tracing::instrument(name = "validate_code", skip_all)]
    pub async fn execute(&self, input: &str) -> ValidationOutcome {
        let code = input.trim();
        if code.is_empty() {
            return ValidationOutcome::rejected(BLANK_CODE_MESSAGE);
        }

        let request = ValidateCodeRequest {
            code: code.to_uppercase(),
            device_id: self.device.get_device_id().await,
        };

        match self.api.validate_code(request).await {
            Ok(reply) if reply.is_valid => self.accept(reply).await,
            Ok(reply) => {
                tracing::info!("code rejected by server.");
                ValidationOutcome::rejected(
                    reply
                        .message
                        .unwrap_or_else(|| INVALID_CODE_MESSAGE.to_string()),
                )
            }
            Err(ApiError::Upstream {
                status, message, ..
            }) => {
                tracing::warn!(status, "validation endpoint returned an error status.");
                ValidationOutcome::rejected(
                    message.unwrap_or_else(|| INVALID_CODE_MESSAGE.to_string()),
                )
            }
            Err(err) => {
                tracing::error!(error = %err, "code validation failed.");
                ValidationOutcome::rejected(format!("Validation failed: {err}"))
            }
        }
    }

    async fn accept(&self, reply: ValidateCodeReply) -> ValidationOutcome {
        let token = reply.token.filter(|token| !token.is_empty());

        if let Some(token) = &token {
            if let Err(err) = self.store.set(API_TOKEN_KEY, token).await {
                tracing::warn!(error = %err, "failed to persist session token.");
            }
            self.credentials.set_bearer(token.clone());
        }

        self.ledger.record_access_now().await;
        tracing::info!(remaining_uses = reply.remaining_uses, "code accepted.");

        ValidationOutcome {
            is_valid: true,
            message: reply
                .message
                .unwrap_or_else(|| ACCESS_GRANTED_MESSAGE.to_string()),
            expires_at: reply.expires_at,
            remaining_uses: reply.remaining_uses,
            token,
        }
    }
}
