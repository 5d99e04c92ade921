#[allow(clippy::module_inception)]
pub mod error;
pub mod config;
pub mod executor;
pub mod validation;

pub use config::ConfigError;
pub use error::{CliError, PipelineError};
pub use executor::ChainError;
pub use validation::{ValidationError, ValidationReport};
