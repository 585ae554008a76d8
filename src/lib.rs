pub mod domain;
pub mod frameworks;
pub mod interface_adapters;
pub mod use_cases;

pub use frameworks::app::{App, SharedStore, init_tracing};
pub use frameworks::cli::{Cli, run};
