//! Locale Resolution
//!
//! Picks the locale to serve from a client's preferences. The result is
//! always one of the supported locales or the default.

use crate::{LanguageRange, Locale, PreferenceList, SupportedLocales};

/// Choose the best supported locale for `preferences`, or `default`.
///
/// Preferences are tried in priority order. For each one:
///
/// 1. an exact match (`fr-CA` = `fr-CA`);
/// 2. a shorter form of the preferred tag (`fr-CA` finds `fr`,
///    `zh-Hant-TW` finds `zh-Hant`, then `zh`);
/// 3. the first supported locale with the same language (`fr-CA` finds
///    `fr-FR`, `fr` finds `fr-FR`);
/// 4. `*` takes the first supported locale.
///
/// Malformed tags match nothing.
///
/// # Example
///
/// ```
/// use parlance_i18n::{Locale, PreferenceList, SupportedLocales, resolve};
///
/// let supported = SupportedLocales::parse(["en", "fr"]).unwrap();
/// let default = Locale::parse("en").unwrap();
///
/// let prefs = PreferenceList::parse_header("fr-CA,fr;q=0.9,en;q=0.8");
/// assert_eq!(resolve(&prefs, &supported, &default).tag(), "fr");
///
/// let prefs = PreferenceList::parse_header("de,ja;q=0.5");
/// assert_eq!(resolve(&prefs, &supported, &default).tag(), "en");
/// ```
pub fn resolve(
    preferences: &PreferenceList,
    supported: &SupportedLocales,
    default: &Locale,
) -> Locale {
    preferences
        .iter()
        .find_map(|preference| match &preference.range {
            LanguageRange::Any => supported.first(),
            LanguageRange::Tag(tag) => match_tag(tag, supported),
        })
        .unwrap_or(default)
        .clone()
}

/// Parse an `Accept-Language` header value and [`resolve`] it.
pub fn resolve_accept_language(
    header: &str,
    supported: &SupportedLocales,
    default: &Locale,
) -> Locale {
    resolve(&PreferenceList::parse_header(header), supported, default)
}

fn match_tag<'a>(tag: &str, supported: &'a SupportedLocales) -> Option<&'a Locale> {
    let requested = Locale::parse(tag).ok()?;

    requested
        .fallback_chain()
        .iter()
        .find_map(|candidate| supported.iter().find(|s| *s == candidate))
        .or_else(|| {
            supported
                .iter()
                .find(|s| s.language() == requested.language())
        })
}

/// The supported set and default bundled together.
#[derive(Debug, Clone)]
pub struct LocaleResolver {
    supported: SupportedLocales,
    default: Locale,
}

impl LocaleResolver {
    pub fn new(supported: SupportedLocales, default: Locale) -> Self {
        Self { supported, default }
    }

    pub fn supported(&self) -> &SupportedLocales {
        &self.supported
    }

    pub fn default_locale(&self) -> &Locale {
        &self.default
    }

    pub fn resolve(&self, preferences: &PreferenceList) -> Locale {
        resolve(preferences, &self.supported, &self.default)
    }

    /// Resolve straight from an `Accept-Language` header. A missing header
    /// yields the default.
    pub fn resolve_header(&self, header: Option<&str>) -> Locale {
        match header {
            Some(header) => resolve_accept_language(header, &self.supported, &self.default),
            None => self.default.clone(),
        }
    }
}
