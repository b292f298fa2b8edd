pub mod app_config;
pub mod config;
pub mod filters;
pub mod hospital;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use filters::{SearchFilters, CATEGORIES, DEFAULT_LOCATION, DEFAULT_QUERY};
pub use hospital::{Coordinates, Hospital, ServiceChecklist, TrustTier};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
