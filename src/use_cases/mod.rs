// Use cases layer: access gate, recipe generation and wheel workflows.

pub mod access_ledger;
pub mod admin_codes;
pub mod device_identity;
pub mod generate_recipe;
pub mod recipe_normalizer;
pub mod session;
pub mod spin;
pub mod validate_code;
pub mod wheel_config;

#[cfg(test)]
pub(crate) mod test_support;

pub use access_ledger::AccessLedger;
pub use admin_codes::AdminCodesUseCase;
pub use device_identity::DeviceIdentity;
pub use generate_recipe::GenerateRecipeUseCase;
pub use session::{RestoreSessionUseCase, SignOutUseCase};
pub use validate_code::ValidateCodeUseCase;
pub use wheel_config::WheelConfigurationStore;

// Local storage keys.
pub const DEVICE_ID_KEY: &str = "deviceId";
pub const LAST_ACCESS_KEY: &str = "lastCodeAccess";
pub const API_TOKEN_KEY: &str = "apiToken";
pub const WHEEL_CONFIG_KEY: &str = "wheelConfiguration";
