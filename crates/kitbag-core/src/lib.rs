pub mod app_config;
pub mod config;
pub mod products;
pub mod rules;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use products::{
    AggregateProduct, Badge, Catalog, CatalogEntry, CatalogVariant, Category, CategoryIndexEntry,
    VariantRecord,
};
pub use rules::{load_rules, CatalogRules, SizeRank, SizeSynonym, TitleKeywords, TypeCategory};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read rules file {path}: {source}")]
    RulesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rules file: {0}")]
    RulesFileParse(#[from] serde_yaml::Error),

    #[error("rules validation failed: {0}")]
    Validation(String),
}
