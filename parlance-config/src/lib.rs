// Configuration for Parlance locale negotiation and catalogs

pub mod env;
pub mod error;
pub mod loader;
pub mod validation;

pub use env::EnvLoader;
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};
pub use validation::{ConfigValidator, Validate};

pub use parlance_i18n::MissingTranslationPolicy;

use parlance_log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Locale and catalog settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Locale used when no client preference matches
    pub default_locale: String,
    /// Locales the application can serve, in priority order
    pub supported_locales: Vec<String>,
    /// Directories holding `<locale>.json` catalogs
    pub translation_directories: Vec<PathBuf>,
    /// `"error"` or `"echo_key"`
    pub missing_translation: MissingTranslationPolicy,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_locale: "en".to_string(),
            supported_locales: vec!["en".to_string()],
            translation_directories: vec![PathBuf::from("./translations")],
            missing_translation: MissingTranslationPolicy::Error,
        }
    }
}

impl I18nConfig {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Defaults, then `.env`, then `PARLANCE_*` variables.
    pub fn from_env() -> Result<Self> {
        ConfigBuilder::new().dotenv(None)?.env()?.build()
    }
}

impl Validate for I18nConfig {
    fn validate(&self) -> Result<()> {
        ConfigValidator::is_tag(&self.default_locale, "default_locale")?;
        ConfigValidator::non_empty_list(&self.supported_locales, "supported_locales")?;
        for tag in &self.supported_locales {
            ConfigValidator::is_tag(tag, "supported_locales")?;
        }
        ConfigValidator::unique_tags(&self.supported_locales, "supported_locales")?;
        ConfigValidator::non_empty_list(&self.translation_directories, "translation_directories")?;
        Ok(())
    }
}

/// Layers configuration sources. Later sources override earlier ones key by key.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    values: Map<String, Value>,
    env_loader: EnvLoader,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            values: Map::new(),
            env_loader: EnvLoader::default(),
        }
    }

    /// Use a different environment variable prefix (default `PARLANCE`).
    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_loader = EnvLoader::new(prefix);
        self
    }

    /// Merge a TOML or JSON file, chosen by extension.
    pub fn file(mut self, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let loaded = ConfigLoader::auto(path)?.load_file(path)?;
        info!(target: "parlance::config", "Loaded configuration file {}", path.display());
        self.values.extend(loaded);
        Ok(self)
    }

    /// Merge an in-memory document.
    pub fn source(mut self, content: &str, format: FileFormat) -> Result<Self> {
        self.values.extend(ConfigLoader::new(format).parse(content)?);
        Ok(self)
    }

    /// Load a `.env` file into the process environment. Without a path a
    /// missing `.env` is ignored.
    pub fn dotenv(self, path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                dotenvy::from_path(path).map_err(|e| ConfigError::LoadError(e.to_string()))?;
            }
            None => {
                if dotenvy::dotenv().is_err() {
                    debug!(target: "parlance::config", "No .env file found");
                }
            }
        }
        Ok(self)
    }

    /// Merge prefixed variables from the process environment.
    pub fn env(self) -> Result<Self> {
        let loaded = self.env_loader.load()?;
        Ok(self.merge_env(loaded))
    }

    /// Merge prefixed variables from an explicit list.
    pub fn vars<I, K, V>(self, vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        let loaded = self.env_loader.load_from(vars)?;
        Ok(self.merge_env(loaded))
    }

    fn merge_env(mut self, loaded: HashMap<String, String>) -> Self {
        if !loaded.is_empty() {
            debug!(
                target: "parlance::config",
                "{} variable(s) from {}_*",
                loaded.len(),
                self.env_loader.prefix()
            );
        }
        for (key, raw) in loaded {
            let value = env::env_value(&key, &raw);
            self.values.insert(key, value);
        }
        self
    }

    /// Set one key directly.
    pub fn set(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    /// Deserialize over the defaults and validate.
    pub fn build(self) -> Result<I18nConfig> {
        let mut merged = match serde_json::to_value(I18nConfig::default()) {
            Ok(Value::Object(map)) => map,
            Ok(_) | Err(_) => {
                return Err(ConfigError::ParseError(
                    "default configuration is not a table".to_string(),
                ));
            }
        };
        merged.extend(self.values);

        let config: I18nConfig = serde_json::from_value(Value::Object(merged))
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;

        debug!(
            target: "parlance::config",
            "Configured locales {:?} (default {})",
            config.supported_locales,
            config.default_locale
        );
        Ok(config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = ConfigBuilder::new().build().unwrap();
        assert_eq!(config, I18nConfig::default());
        assert_eq!(config.default_locale, "en");
        assert_eq!(config.missing_translation, MissingTranslationPolicy::Error);
    }

    #[test]
    fn test_env_overrides_file() {
        let config = ConfigBuilder::new()
            .source(
                r#"
                default_locale = "en"
                supported_locales = ["en", "fr"]
                missing_translation = "echo_key"
                "#,
                FileFormat::Toml,
            )
            .unwrap()
            .vars(vars(&[
                ("PARLANCE_DEFAULT_LOCALE", "fr"),
                ("PARLANCE_TRANSLATION_DIRECTORIES", "a, b"),
                ("PARLANCE_LOG_LEVEL", "debug"),
            ]))
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(config.default_locale, "fr");
        assert_eq!(config.supported_locales, vec!["en", "fr"]);
        assert_eq!(
            config.translation_directories,
            vec![PathBuf::from("a"), PathBuf::from("b")]
        );
        assert_eq!(config.missing_translation, MissingTranslationPolicy::EchoKey);
    }

    #[test]
    fn test_file_source() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"i18n": {{"supported_locales": ["en", "fr"], "default_locale": "en"}}}}"#
        )
        .unwrap();

        let config = ConfigBuilder::new().file(file.path()).unwrap().build().unwrap();
        assert_eq!(config.supported_locales, vec!["en", "fr"]);
    }

    #[test]
    fn test_validation_failures() {
        let err = ConfigBuilder::new()
            .set("supported_locales", Vec::<String>::new())
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));

        let err = ConfigBuilder::new()
            .set("supported_locales", vec!["en", "EN"])
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));

        let err = ConfigBuilder::new().set("default_locale", "").build().unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_unknown_policy_is_parse_error() {
        let err = ConfigBuilder::new()
            .set("missing_translation", "shout")
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_custom_prefix() {
        let config = ConfigBuilder::new()
            .env_prefix("MYAPP")
            .vars(vars(&[
                ("MYAPP_SUPPORTED_LOCALES", "en,de"),
                ("PARLANCE_SUPPORTED_LOCALES", "fr"),
            ]))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(config.supported_locales, vec!["en", "de"]);
    }
}
