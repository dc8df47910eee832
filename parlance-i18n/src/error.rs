//! Error types for i18n operations

use thiserror::Error;

/// Errors raised while building catalogs or rendering messages.
///
/// Resolving a locale never fails: an unsupported preference simply
/// falls through to the default.
#[derive(Debug, Error)]
pub enum I18nError {
    /// Not a well-formed language tag
    #[error("Invalid locale: {0}")]
    InvalidLocale(String),

    /// No template for the key in the requested locale or the default locale
    #[error("Missing translation: {key} for locale {locale}")]
    MissingTranslation { key: String, locale: String },

    /// A template placeholder had no value
    #[error("Missing argument `{name}` for message {key}")]
    MissingArgument { key: String, name: String },

    /// A value cannot be formatted by its placeholder
    #[error("Argument `{name}` for message {key} must be {expected}")]
    InvalidArgument {
        key: String,
        name: String,
        expected: &'static str,
    },

    /// Template syntax error, reported when the catalog is built
    #[error("Invalid template {template:?}: {reason}")]
    InvalidTemplate { template: String, reason: String },

    /// Catalog file has an unexpected shape
    #[error("Invalid catalog: {0}")]
    CatalogFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}
