mod credentials;
mod entities;
mod errors;
pub mod json;
mod ports;
mod recipe;

// Re-export the domain boundary types and ports.
pub use credentials::Credentials;
pub use entities::{
    CodePair, ValidateCodeReply, ValidateCodeRequest, ValidationOutcome, WheelConfiguration,
    WheelItem,
};
pub use errors::{ApiError, NormalizeError, RecipeError, StorageError};
pub use ports::{BundledConfigSource, Clock, CodeApi, KeyValueStore, RecipeApi};
pub use recipe::Recipe;
