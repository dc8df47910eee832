//! Client Language Preferences
//!
//! A weighted wish list of language ranges, usually parsed from an
//! `Accept-Language` header.

use std::fmt;
use std::str::FromStr;

/// One requested language range.
///
/// Tags are kept as the client sent them; a malformed tag never fails
/// here and simply matches nothing during resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageRange {
    /// `*`: any language
    Any,
    /// A language tag, unvalidated
    Tag(String),
}

impl LanguageRange {
    fn new(raw: &str) -> Self {
        match raw.trim() {
            "*" => LanguageRange::Any,
            tag => LanguageRange::Tag(tag.to_string()),
        }
    }
}

impl fmt::Display for LanguageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageRange::Any => f.write_str("*"),
            LanguageRange::Tag(tag) => f.write_str(tag),
        }
    }
}

/// A language range with its weight in `(0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Preference {
    pub range: LanguageRange,
    pub weight: f32,
}

/// Language preferences in descending priority.
///
/// Entries are ordered by weight, highest first; equal weights keep the
/// order they were given in. Entries weighted `0` ("not acceptable") or
/// outside `[0, 1]` are dropped.
///
/// # Example
///
/// ```
/// use parlance_i18n::PreferenceList;
///
/// let prefs = PreferenceList::parse_header("fr;q=0.8, en-US, de;q=0.8, *;q=0.1");
/// let order: Vec<String> = prefs.iter().map(|p| p.range.to_string()).collect();
/// assert_eq!(order, ["en-US", "fr", "de", "*"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreferenceList {
    entries: Vec<Preference>,
}

impl PreferenceList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(tag, weight)` pairs in client order.
    pub fn from_weighted<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f32)>,
        S: AsRef<str>,
    {
        let entries = pairs
            .into_iter()
            .filter(|(_, weight)| acceptable(*weight))
            .map(|(tag, weight)| Preference {
                range: LanguageRange::new(tag.as_ref()),
                weight,
            })
            .collect();
        Self::sorted(entries)
    }

    /// Build from tags that all carry full weight, in priority order.
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_weighted(tags.into_iter().map(|tag| (tag, 1.0)))
    }

    /// Parse an `Accept-Language` header value.
    ///
    /// Items are `range[;q=weight]`. A missing `q` means `1`. An item whose
    /// `q` is not a plain decimal in `[0, 1]` is dropped, as are empty
    /// items. Parameters other than `q` are ignored.
    pub fn parse_header(header: &str) -> Self {
        let entries = header
            .split(',')
            .filter_map(|item| {
                let mut parts = item.split(';');
                let range = parts.next()?.trim();
                if range.is_empty() {
                    return None;
                }

                let mut weight = 1.0;
                for param in parts {
                    let Some((name, value)) = param.split_once('=') else {
                        continue;
                    };
                    if name.trim().eq_ignore_ascii_case("q") {
                        weight = parse_qvalue(value.trim())?;
                    }
                }

                acceptable(weight).then(|| Preference {
                    range: LanguageRange::new(range),
                    weight,
                })
            })
            .collect();
        Self::sorted(entries)
    }

    fn sorted(mut entries: Vec<Preference>) -> Self {
        // stable: equal weights keep client order
        entries.sort_by(|a, b| b.weight.total_cmp(&a.weight));
        Self { entries }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Preference> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn acceptable(weight: f32) -> bool {
    weight > 0.0 && weight <= 1.0
}

fn parse_qvalue(value: &str) -> Option<f32> {
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    let weight: f32 = value.parse().ok()?;
    (0.0..=1.0).contains(&weight).then_some(weight)
}

impl FromStr for PreferenceList {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse_header(s))
    }
}

impl<'a> IntoIterator for &'a PreferenceList {
    type Item = &'a Preference;
    type IntoIter = std::slice::Iter<'a, Preference>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranges(prefs: &PreferenceList) -> Vec<String> {
        prefs.iter().map(|p| p.range.to_string()).collect()
    }

    #[test]
    fn test_parse_header_orders_by_weight() {
        let prefs = PreferenceList::parse_header("en-US,en;q=0.9,fr;q=0.8");
        assert_eq!(ranges(&prefs), ["en-US", "en", "fr"]);
        assert_eq!(prefs.iter().next().map(|p| p.weight), Some(1.0));
    }

    #[test]
    fn test_ties_keep_client_order() {
        let prefs = PreferenceList::parse_header("de;q=0.5, fr, es;q=0.5, it");
        assert_eq!(ranges(&prefs), ["fr", "it", "de", "es"]);
    }

    #[test]
    fn test_wildcard_is_kept() {
        let prefs = PreferenceList::parse_header("fr-FR,*;q=0.1");
        assert_eq!(prefs.len(), 2);
        assert_eq!(prefs.iter().nth(1).map(|p| &p.range), Some(&LanguageRange::Any));
    }

    #[test]
    fn test_malformed_items_are_dropped() {
        let prefs = PreferenceList::parse_header(" , fr;q=abc, de;q=1.5, es;q=-1, it;q=inf, ja;q=0.3");
        assert_eq!(ranges(&prefs), ["ja"]);
    }

    #[test]
    fn test_zero_weight_means_not_acceptable() {
        let prefs = PreferenceList::parse_header("en;q=0, fr;q=0.000");
        assert!(prefs.is_empty());
    }

    #[test]
    fn test_malformed_tags_survive_parsing() {
        let prefs = PreferenceList::parse_header("not a tag, fr");
        assert_eq!(ranges(&prefs), ["not a tag", "fr"]);
    }

    #[test]
    fn test_other_parameters_ignored() {
        let prefs = PreferenceList::parse_header("fr;level=1;Q=0.4, en;foo");
        assert_eq!(ranges(&prefs), ["en", "fr"]);
        assert_eq!(prefs.iter().nth(1).map(|p| p.weight), Some(0.4));
    }

    #[test]
    fn test_from_weighted() {
        let prefs = PreferenceList::from_weighted([("fr", 0.2), ("en", 0.9), ("de", 0.0), ("es", f32::NAN)]);
        assert_eq!(ranges(&prefs), ["en", "fr"]);

        let prefs = PreferenceList::from_tags(["de", "fr"]);
        assert_eq!(ranges(&prefs), ["de", "fr"]);
    }

    #[test]
    fn test_empty_header() {
        assert!(PreferenceList::parse_header("").is_empty());
        assert!("".parse::<PreferenceList>().unwrap().is_empty());
    }
}
