//! Plural Form Selection
//!
//! Messages carry two forms, singular and plural, and the form is picked
//! with the rule `count == 1`. Languages with more plural categories are
//! not modelled.

use crate::{I18nError, Result};
use std::fmt;

/// The two plural forms a message can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralForm {
    /// Exactly one item
    Singular,
    /// Zero, many, or negative counts
    Plural,
}

impl PluralForm {
    /// Select the form for a count.
    ///
    /// ```
    /// use parlance_i18n::PluralForm;
    ///
    /// assert_eq!(PluralForm::for_count(1), PluralForm::Singular);
    /// assert_eq!(PluralForm::for_count(0), PluralForm::Plural);
    /// assert_eq!(PluralForm::for_count(7), PluralForm::Plural);
    /// ```
    pub fn for_count(count: i64) -> Self {
        if count == 1 {
            PluralForm::Singular
        } else {
            PluralForm::Plural
        }
    }

    /// Parse a catalog form name. Accepts the CLDR names `one`/`other`
    /// as well as `singular`/`plural`.
    pub fn parse(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "one" | "singular" => Ok(PluralForm::Singular),
            "other" | "plural" => Ok(PluralForm::Plural),
            _ => Err(I18nError::CatalogFormat(format!(
                "unknown plural form `{}`",
                name
            ))),
        }
    }

    /// The CLDR category name used in catalog files.
    pub fn as_str(&self) -> &'static str {
        match self {
            PluralForm::Singular => "one",
            PluralForm::Plural => "other",
        }
    }
}

impl fmt::Display for PluralForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shorthand for [`PluralForm::for_count`].
pub fn plural_form(count: i64) -> PluralForm {
    PluralForm::for_count(count)
}
