// Environment variable loading

use crate::{ConfigError, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::env;
use std::ffi::OsString;

/// Keys whose values are comma-separated lists.
const LIST_KEYS: &[&str] = &["supported_locales", "translation_directories"];

/// Reads `PREFIX_*` variables into lowercase config keys.
///
/// `PARLANCE_DEFAULT_LOCALE=fr` becomes `default_locale = "fr"`. Variables
/// outside the prefix are never inspected, so an unrelated variable that
/// is not valid UTF-8 is harmless.
#[derive(Debug, Clone)]
pub struct EnvLoader {
    prefix: String,
}

impl EnvLoader {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Collect matching variables from the process environment.
    pub fn load(&self) -> Result<HashMap<String, String>> {
        self.load_from(env::vars_os())
    }

    /// Collect matching variables from an explicit list.
    ///
    /// A matching variable whose value is not valid UTF-8 is a
    /// [`ConfigError::LoadError`].
    pub fn load_from<I, K, V>(&self, vars: I) -> Result<HashMap<String, String>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        let mut loaded = HashMap::new();
        for (key, value) in vars {
            let key: OsString = key.into();
            let Some(name) = key
                .to_str()
                .and_then(|k| k.strip_prefix(self.prefix.as_str()))
                .and_then(|k| k.strip_prefix('_'))
            else {
                continue;
            };

            let value: OsString = value.into();
            let value = value.into_string().map_err(|_| {
                ConfigError::LoadError(format!(
                    "Environment variable {}_{} is not valid UTF-8",
                    self.prefix, name
                ))
            })?;
            loaded.insert(name.to_lowercase(), value);
        }
        Ok(loaded)
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new("PARLANCE")
    }
}

/// Convert a raw variable into the JSON shape the config expects.
pub(crate) fn env_value(key: &str, raw: &str) -> Value {
    if LIST_KEYS.contains(&key) {
        Value::Array(
            raw.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(|item| Value::String(item.to_string()))
                .collect(),
        )
    } else {
        Value::String(raw.trim().to_string())
    }
}
