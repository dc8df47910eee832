//! Top-level error type.

use parlance_config::ConfigError;
use parlance_i18n::I18nError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    I18n(#[from] I18nError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The catalog falls back to a different locale than the resolver
    #[error("Default locale mismatch: resolver uses {resolver}, catalog uses {catalog}")]
    DefaultLocaleMismatch { resolver: String, catalog: String },
}

pub type Result<T> = std::result::Result<T, Error>;
