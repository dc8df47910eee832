// Configuration validation

use crate::{ConfigError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Reusable field checks.
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn not_empty(value: &str, field: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "{} cannot be empty",
                field
            )));
        }
        Ok(())
    }

    pub fn non_empty_list<T>(values: &[T], field: &str) -> Result<()> {
        if values.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "{} must list at least one entry",
                field
            )));
        }
        Ok(())
    }

    /// Locale-ish tags: ASCII letters, digits, `-` and `_` only.
    pub fn is_tag(value: &str, field: &str) -> Result<()> {
        Self::not_empty(value, field)?;
        if !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ConfigError::ValidationError(format!(
                "{} has invalid locale tag {:?}",
                field, value
            )));
        }
        Ok(())
    }

    /// Tags must be unique once case and separators are normalized.
    pub fn unique_tags(values: &[String], field: &str) -> Result<()> {
        let mut seen: Vec<String> = Vec::with_capacity(values.len());
        for value in values {
            let normalized = value.to_ascii_lowercase().replace('_', "-");
            if seen.contains(&normalized) {
                return Err(ConfigError::ValidationError(format!(
                    "{} lists {:?} more than once",
                    field, value
                )));
            }
            seen.push(normalized);
        }
        Ok(())
    }
}
