//! Locale Codes
//!
//! Normalized language tags and the closed set of locales an application
//! serves.

use crate::{I18nError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A normalized language tag: language, optional script, optional region.
///
/// Parsing accepts `-` or `_` separators and any letter case, so
/// `"pt_br"`, `"PT-BR"` and `"pt-BR"` are the same locale. Variant and
/// extension subtags are accepted but not kept.
///
/// # Examples
///
/// ```
/// use parlance_i18n::Locale;
///
/// let fr_ca: Locale = "fr_ca".parse().unwrap();
/// assert_eq!(fr_ca.tag(), "fr-CA");
/// assert_eq!(fr_ca.language(), "fr");
/// assert!("f".parse::<Locale>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale {
    language: String,
    script: Option<String>,
    region: Option<String>,
}

impl Locale {
    /// Parse a tag such as `"en"`, `"fr-CA"` or `"zh-Hant-TW"`.
    pub fn parse(tag: &str) -> Result<Self> {
        let invalid = || I18nError::InvalidLocale(tag.to_string());

        let mut subtags = tag.trim().split(['-', '_']);
        let language = subtags.next().ok_or_else(invalid)?;
        if !(2..=3).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(invalid());
        }

        let mut script = None;
        let mut region = None;
        let mut past_region = false;

        for subtag in subtags {
            if subtag.is_empty()
                || subtag.len() > 8
                || !subtag.chars().all(|c| c.is_ascii_alphanumeric())
            {
                return Err(invalid());
            }
            if past_region {
                continue;
            }

            let alphabetic = subtag.chars().all(|c| c.is_ascii_alphabetic());
            if script.is_none() && region.is_none() && subtag.len() == 4 && alphabetic {
                script = Some(title_case(subtag));
            } else if region.is_none() && subtag.len() == 2 && alphabetic {
                region = Some(subtag.to_ascii_uppercase());
                past_region = true;
            } else if region.is_none()
                && subtag.len() == 3
                && subtag.chars().all(|c| c.is_ascii_digit())
            {
                region = Some(subtag.to_string());
                past_region = true;
            } else {
                // variants and extensions end the part we keep
                past_region = true;
            }
        }

        Ok(Self {
            language: language.to_ascii_lowercase(),
            script,
            region,
        })
    }

    /// A locale with just a primary language.
    pub fn language_only(language: &str) -> Result<Self> {
        let locale = Self::parse(language)?;
        if locale.script.is_some() || locale.region.is_some() {
            return Err(I18nError::InvalidLocale(language.to_string()));
        }
        Ok(locale)
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn script(&self) -> Option<&str> {
        self.script.as_deref()
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Canonical tag, e.g. `"zh-Hant-TW"`.
    pub fn tag(&self) -> String {
        let mut tag = self.language.clone();
        for part in [&self.script, &self.region].into_iter().flatten() {
            tag.push('-');
            tag.push_str(part);
        }
        tag
    }

    /// Progressively shorter tags, most specific first.
    ///
    /// `zh-Hant-TW` yields `zh-Hant-TW`, `zh-Hant`, `zh`.
    pub fn fallback_chain(&self) -> Vec<Locale> {
        let mut chain = vec![self.clone()];
        if self.region.is_some() {
            chain.push(Locale {
                language: self.language.clone(),
                script: self.script.clone(),
                region: None,
            });
        }
        if self.script.is_some() {
            chain.push(self.primary());
        }
        chain
    }

    /// The bare primary-language locale (`fr-CA` -> `fr`).
    pub fn primary(&self) -> Locale {
        Locale {
            language: self.language.clone(),
            script: None,
            region: None,
        }
    }

    pub fn is_primary(&self) -> bool {
        self.script.is_none() && self.region.is_none()
    }
}

fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for (i, c) in s.chars().enumerate() {
        if i == 0 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c.to_ascii_lowercase());
        }
    }
    out
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag())
    }
}

impl FromStr for Locale {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self> {
        Locale::parse(s)
    }
}

impl TryFrom<String> for Locale {
    type Error = I18nError;

    fn try_from(s: String) -> Result<Self> {
        Locale::parse(&s)
    }
}

impl TryFrom<&str> for Locale {
    type Error = I18nError;

    fn try_from(s: &str) -> Result<Self> {
        Locale::parse(s)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.tag()
    }
}

/// The ordered set of locales an application can serve.
///
/// Order is significant: it breaks ties when several supported locales
/// share a language, and a wildcard preference picks the first entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupportedLocales {
    locales: Vec<Locale>,
}

impl SupportedLocales {
    /// Build from locales, dropping later duplicates.
    pub fn new(locales: impl IntoIterator<Item = Locale>) -> Self {
        let mut unique: Vec<Locale> = Vec::new();
        for locale in locales {
            if !unique.contains(&locale) {
                unique.push(locale);
            }
        }
        Self { locales: unique }
    }

    /// Parse tags; any malformed tag is an error.
    pub fn parse<I, S>(tags: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let locales = tags
            .into_iter()
            .map(|tag| Locale::parse(tag.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(locales))
    }

    pub fn contains(&self, locale: &Locale) -> bool {
        self.locales.contains(locale)
    }

    pub fn first(&self) -> Option<&Locale> {
        self.locales.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Locale> {
        self.locales.iter()
    }

    pub fn len(&self) -> usize {
        self.locales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }
}

impl<'a> IntoIterator for &'a SupportedLocales {
    type Item = &'a Locale;
    type IntoIter = std::slice::Iter<'a, Locale>;

    fn into_iter(self) -> Self::IntoIter {
        self.locales.iter()
    }
}

impl FromIterator<Locale> for SupportedLocales {
    fn from_iter<I: IntoIterator<Item = Locale>>(iter: I) -> Self {
        Self::new(iter)
    }
}
