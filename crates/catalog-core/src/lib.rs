pub mod app_config;
pub mod catalog;
pub mod combinations;
pub mod config;
pub mod form;
pub mod options;
pub mod payload;
pub mod sync;
pub mod variants;

pub use app_config::{AppConfig, Environment};
pub use catalog::{load_catalog, Attribute, AttributeCatalog};
pub use combinations::{combination_count, generate_combinations, Combination};
pub use config::{load_app_config, load_app_config_from_env};
pub use form::{FormError, ProductForm, ProductStatus, ProductType};
pub use options::{derive_active_attributes, options_from_variants, OptionSelection};
pub use payload::{FormField, FormValue, SubmitMode};
pub use sync::{SyncOutcome, VariantListener, VariantSync};
pub use variants::{merge_variants, ImageRef, Variant, VariantDetails, VariantKey};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read attributes file {path}: {source}")]
    CatalogFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse attributes file: {0}")]
    CatalogFileParse(#[from] serde_yaml::Error),

    #[error("catalog validation failed: {0}")]
    Validation(String),
}
