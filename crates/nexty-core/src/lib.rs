pub mod app_config;
pub mod card;
pub mod config;
pub mod gallery;
pub mod pagination;
pub mod products;
pub mod query;

pub use app_config::{AppConfig, Environment};
pub use card::{format_price, ProductCard, STAR_COUNT};
pub use config::{load_app_config, load_app_config_from_env};
pub use gallery::GalleryState;
pub use pagination::{PaginationControls, PAGE_SIZE};
pub use products::{Product, Review};
pub use query::ListingQuery;

use thiserror::Error;

/// Errors that can occur when loading application configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
