//! Message Catalog
//!
//! An immutable `(locale, key) -> message` table, built once at startup.

use crate::{I18nError, Locale, PluralForm, Result, Template};
use parlance_log::{debug, info};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A catalog entry: one template, or a singular/plural pair.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Single(Template),
    Plural { singular: Template, plural: Template },
}

impl Message {
    /// The template for a plural form. A single template serves every form.
    pub fn template(&self, form: PluralForm) -> &Template {
        match (self, form) {
            (Message::Single(template), _) => template,
            (Message::Plural { singular, .. }, PluralForm::Singular) => singular,
            (Message::Plural { plural, .. }, PluralForm::Plural) => plural,
        }
    }

    pub fn is_plural(&self) -> bool {
        matches!(self, Message::Plural { .. })
    }
}

type Bundle = HashMap<String, Message>;

/// Translations for every supported locale.
///
/// Lookups try the requested locale, then its shorter tags (`fr-CA`, then
/// `fr`), then the catalog's default locale.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    default_locale: Locale,
    bundles: HashMap<Locale, Bundle>,
}

impl MessageCatalog {
    pub fn builder(default_locale: Locale) -> CatalogBuilder {
        CatalogBuilder::new(default_locale)
    }

    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    /// Find the message for `key`, applying the fallback chain.
    pub fn lookup(&self, locale: &Locale, key: &str) -> Option<&Message> {
        locale
            .fallback_chain()
            .iter()
            .chain(std::iter::once(&self.default_locale))
            .find_map(|candidate| self.get(candidate, key))
    }

    /// Exact lookup, without fallback.
    pub fn get(&self, locale: &Locale, key: &str) -> Option<&Message> {
        self.bundles.get(locale)?.get(key)
    }

    pub fn contains(&self, locale: &Locale, key: &str) -> bool {
        self.get(locale, key).is_some()
    }

    /// Locales that have at least one message, sorted by tag.
    pub fn locales(&self) -> Vec<&Locale> {
        let mut locales: Vec<&Locale> = self.bundles.keys().collect();
        locales.sort();
        locales
    }

    /// Keys defined for a locale, sorted.
    pub fn keys(&self, locale: &Locale) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .bundles
            .get(locale)
            .map(|bundle| bundle.keys().map(String::as_str).collect())
            .unwrap_or_default();
        keys.sort_unstable();
        keys
    }

    /// Total number of messages across locales.
    pub fn len(&self) -> usize {
        self.bundles.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Collects messages and produces an immutable [`MessageCatalog`].
///
/// Adding a key twice for a locale replaces the earlier message.
#[derive(Debug, Clone)]
pub struct CatalogBuilder {
    default_locale: Locale,
    bundles: HashMap<Locale, Bundle>,
}

impl CatalogBuilder {
    pub fn new(default_locale: Locale) -> Self {
        Self {
            default_locale,
            bundles: HashMap::new(),
        }
    }

    /// Add a single-form message.
    pub fn insert(&mut self, locale: &Locale, key: impl Into<String>, template: &str) -> Result<&mut Self> {
        let message = Message::Single(Template::parse(template)?);
        self.put(locale, key.into(), message);
        Ok(self)
    }

    /// Add a singular/plural message pair.
    pub fn insert_plural(
        &mut self,
        locale: &Locale,
        key: impl Into<String>,
        singular: &str,
        plural: &str,
    ) -> Result<&mut Self> {
        let message = Message::Plural {
            singular: Template::parse(singular)?,
            plural: Template::parse(plural)?,
        };
        self.put(locale, key.into(), message);
        Ok(self)
    }

    fn put(&mut self, locale: &Locale, key: String, message: Message) {
        self.bundles
            .entry(locale.clone())
            .or_default()
            .insert(key, message);
    }

    /// Add every message from a JSON document for one locale.
    ///
    /// Strings are single messages. An object whose keys are all plural
    /// form names (`one`/`other`, or `singular`/`plural`) is a plural
    /// message and needs both forms. Any other object is a namespace whose
    /// keys are joined with `.`:
    ///
    /// ```json
    /// { "welcome": "Welcome!",
    ///   "items": { "one": "%(num)d item", "other": "%(num)d items" },
    ///   "menu": { "home": "Home" } }
    /// ```
    ///
    /// defines `welcome`, `items` and `menu.home`. Returns the number of
    /// messages added.
    ///
    /// The form names are reserved inside namespaces: an object that has
    /// any of `one`, `other`, `singular` or `plural` among its keys is read
    /// as a plural message, so `{"ordinal": {"one": "first", "two":
    /// "second"}}` is a [`I18nError::CatalogFormat`] error. Nest such keys
    /// one level deeper or rename them.
    pub fn extend_json(&mut self, locale: &Locale, json: &str) -> Result<usize> {
        let document: Value = serde_json::from_str(json)?;
        let Value::Object(root) = document else {
            return Err(I18nError::CatalogFormat(format!(
                "catalog for {} must be a JSON object",
                locale
            )));
        };

        let mut messages = Vec::new();
        collect_messages(None, root, &mut messages)?;

        let added = messages.len();
        for (key, message) in messages {
            self.put(locale, key, message);
        }
        Ok(added)
    }

    /// Load `<locale>.json` files from a directory, in file name order.
    ///
    /// The file stem must be a valid locale tag. Other files are ignored.
    pub fn load_dir(&mut self, dir: impl AsRef<Path>) -> Result<usize> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(I18nError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("translation directory not found: {}", dir.display()),
            )));
        }

        let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<_>>()?;
        paths.retain(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"));
        paths.sort();

        let mut total = 0;
        for path in paths {
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| I18nError::CatalogFormat(format!("bad file name: {}", path.display())))?;
            let locale = Locale::parse(stem)?;
            let content = fs::read_to_string(&path)?;
            let added = self.extend_json(&locale, &content)?;
            debug!(target: "parlance::catalog", "{}: {} messages for {}", path.display(), added, locale);
            total += added;
        }

        info!(target: "parlance::catalog", "Loaded {} messages from {}", total, dir.display());
        Ok(total)
    }

    pub fn build(self) -> MessageCatalog {
        MessageCatalog {
            default_locale: self.default_locale,
            bundles: self.bundles,
        }
    }
}

fn collect_messages(
    prefix: Option<&str>,
    object: Map<String, Value>,
    out: &mut Vec<(String, Message)>,
) -> Result<()> {
    for (name, value) in object {
        let key = match prefix {
            Some(prefix) => format!("{}.{}", prefix, name),
            None => name,
        };

        match value {
            Value::String(template) => out.push((key, Message::Single(Template::parse(&template)?))),
            Value::Object(inner) => {
                let form_keys = inner.keys().filter(|k| PluralForm::parse(k).is_ok()).count();
                if form_keys == 0 {
                    collect_messages(Some(&key), inner, out)?;
                } else if form_keys == inner.len() {
                    out.push((key.clone(), plural_message(&key, inner)?));
                } else {
                    return Err(I18nError::CatalogFormat(format!(
                        "`{}` mixes plural forms with other keys",
                        key
                    )));
                }
            }
            other => {
                return Err(I18nError::CatalogFormat(format!(
                    "`{}` must be a string or an object, found {}",
                    key, other
                )));
            }
        }
    }
    Ok(())
}

fn plural_message(key: &str, forms: Map<String, Value>) -> Result<Message> {
    let mut singular = None;
    let mut plural = None;

    for (name, value) in forms {
        let Value::String(template) = value else {
            return Err(I18nError::CatalogFormat(format!(
                "plural form `{}.{}` must be a string",
                key, name
            )));
        };
        let template = Template::parse(&template)?;
        match PluralForm::parse(&name)? {
            PluralForm::Singular => singular = Some(template),
            PluralForm::Plural => plural = Some(template),
        }
    }

    match (singular, plural) {
        (Some(singular), Some(plural)) => Ok(Message::Plural { singular, plural }),
        _ => Err(I18nError::CatalogFormat(format!(
            "`{}` needs both `one` and `other` forms",
            key
        ))),
    }
}
