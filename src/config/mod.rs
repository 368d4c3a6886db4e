mod error;
mod run_config;

pub use error::ConfigError;
pub use run_config::RunConfig;
