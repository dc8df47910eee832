//! Message Rendering
//!
//! Turns a `(locale, key, args)` request into a string using a
//! [`MessageCatalog`]. Rendering is pure: no I/O, no logging, no shared
//! mutable state.

use crate::{Args, I18nError, Locale, MessageCatalog, PluralForm, Result, Template};
use serde::{Deserialize, Serialize};

/// What to do when neither the requested locale nor the default locale
/// has a message for a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingTranslationPolicy {
    /// Return [`I18nError::MissingTranslation`]
    #[default]
    Error,
    /// Render the key itself as the template, the way gettext returns an
    /// untranslated msgid. Placeholders in the key still need arguments.
    EchoKey,
}

/// Renders catalog messages.
///
/// # Example
///
/// ```
/// use parlance_i18n::{Args, Locale, MessageCatalog, MessageRenderer};
///
/// let en = Locale::parse("en").unwrap();
/// let mut builder = MessageCatalog::builder(en.clone());
/// builder
///     .insert_plural(&en, "items", "You have %(num)d item.", "You have %(num)d items.")
///     .unwrap();
/// let catalog = builder.build();
///
/// let renderer = MessageRenderer::new(&catalog);
/// assert_eq!(renderer.render_plural(&en, "items", 1, &Args::new()).unwrap(), "You have 1 item.");
/// assert_eq!(renderer.render_plural(&en, "items", 5, &Args::new()).unwrap(), "You have 5 items.");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MessageRenderer<'a> {
    catalog: &'a MessageCatalog,
    policy: MissingTranslationPolicy,
}

impl<'a> MessageRenderer<'a> {
    pub fn new(catalog: &'a MessageCatalog) -> Self {
        Self {
            catalog,
            policy: MissingTranslationPolicy::Error,
        }
    }

    pub fn with_policy(mut self, policy: MissingTranslationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> MissingTranslationPolicy {
        self.policy
    }

    /// Render a message. A plural message renders its singular form.
    pub fn render(&self, locale: &Locale, key: &str, args: &Args) -> Result<String> {
        self.render_form(locale, key, PluralForm::Singular, args)
    }

    /// Render the form of a message selected by `count`.
    ///
    /// `count` and `num` are bound to `count` unless `args` already
    /// provides them.
    pub fn render_plural(&self, locale: &Locale, key: &str, count: i64, args: &Args) -> Result<String> {
        let mut args = args.clone();
        args.insert_default("count", count);
        args.insert_default("num", count);

        self.render_form(locale, key, PluralForm::for_count(count), &args)
    }

    fn render_form(&self, locale: &Locale, key: &str, form: PluralForm, args: &Args) -> Result<String> {
        match self.catalog.lookup(locale, key) {
            Some(message) => message.template(form).render(key, args),
            None => match self.policy {
                MissingTranslationPolicy::Error => Err(I18nError::MissingTranslation {
                    key: key.to_string(),
                    locale: locale.tag(),
                }),
                MissingTranslationPolicy::EchoKey => match Template::parse(key) {
                    Ok(template) => template.render(key, args),
                    Err(_) => Ok(key.to_string()),
                },
            },
        }
    }
}

/// Render `key` for `locale` with the default (error) policy.
pub fn render(catalog: &MessageCatalog, locale: &Locale, key: &str, args: &Args) -> Result<String> {
    MessageRenderer::new(catalog).render(locale, key, args)
}

/// Render the plural-aware form of `key` with the default (error) policy.
pub fn render_plural(
    catalog: &MessageCatalog,
    locale: &Locale,
    key: &str,
    count: i64,
    args: &Args,
) -> Result<String> {
    MessageRenderer::new(catalog).render_plural(locale, key, count, args)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locale(tag: &str) -> Locale {
        Locale::parse(tag).unwrap()
    }

    fn catalog() -> MessageCatalog {
        let en = locale("en");
        let fr = locale("fr");
        let mut builder = MessageCatalog::builder(en.clone());
        builder
            .insert(&en, "welcome", "Welcome to our application!")
            .unwrap()
            .insert(&en, "greeting", "Hello, {name}!")
            .unwrap()
            .insert(&fr, "greeting", "Bonjour, {name} !")
            .unwrap()
            .insert_plural(&en, "items", "You have %(num)d item.", "You have %(num)d items.")
            .unwrap()
            .insert_plural(&fr, "items", "Vous avez %(num)d article.", "Vous avez %(num)d articles.")
            .unwrap()
            .insert_plural(&en, "unread", "{name}, one new message", "{name}, {count} new messages")
            .unwrap();
        builder.build()
    }

    #[test]
    fn test_render_simple() {
        let catalog = catalog();
        assert_eq!(
            render(&catalog, &locale("en"), "welcome", &Args::new()).unwrap(),
            "Welcome to our application!"
        );
    }

    #[test]
    fn test_render_with_args() {
        let catalog = catalog();
        let args = Args::new().with("name", "Alice");
        assert_eq!(render(&catalog, &locale("fr"), "greeting", &args).unwrap(), "Bonjour, Alice !");
        assert_eq!(render(&catalog, &locale("en"), "greeting", &args).unwrap(), "Hello, Alice!");
    }

    #[test]
    fn test_render_falls_back_to_default_locale() {
        let catalog = catalog();
        assert_eq!(
            render(&catalog, &locale("fr-CA"), "welcome", &Args::new()).unwrap(),
            "Welcome to our application!"
        );
    }

    #[test]
    fn test_render_plural_forms() {
        let catalog = catalog();
        let en = locale("en");
        let none = Args::new();
        assert_eq!(render_plural(&catalog, &en, "items", 1, &none).unwrap(), "You have 1 item.");
        assert_eq!(render_plural(&catalog, &en, "items", 5, &none).unwrap(), "You have 5 items.");
        assert_eq!(render_plural(&catalog, &en, "items", 0, &none).unwrap(), "You have 0 items.");
        assert_eq!(
            render_plural(&catalog, &locale("fr"), "items", 2, &none).unwrap(),
            "Vous avez 2 articles."
        );
    }

    #[test]
    fn test_render_plural_merges_count() {
        let catalog = catalog();
        let args = Args::new().with("name", "Bob");
        assert_eq!(
            render_plural(&catalog, &locale("en"), "unread", 3, &args).unwrap(),
            "Bob, 3 new messages"
        );
        assert_eq!(
            render_plural(&catalog, &locale("en"), "unread", 1, &args).unwrap(),
            "Bob, one new message"
        );
    }

    #[test]
    fn test_caller_num_wins() {
        let catalog = catalog();
        let args = Args::new().with("num", 42);
        assert_eq!(
            render_plural(&catalog, &locale("en"), "items", 1, &args).unwrap(),
            "You have 42 item."
        );
    }

    #[test]
    fn test_render_uses_singular_of_plural_message() {
        let catalog = catalog();
        let args = Args::new().with("num", 1);
        assert_eq!(render(&catalog, &locale("en"), "items", &args).unwrap(), "You have 1 item.");
    }

    #[test]
    fn test_missing_translation() {
        let catalog = catalog();
        let err = render(&catalog, &locale("fr"), "nope", &Args::new()).unwrap_err();
        match err {
            I18nError::MissingTranslation { key, locale } => {
                assert_eq!(key, "nope");
                assert_eq!(locale, "fr");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(matches!(
            render_plural(&catalog, &locale("en"), "nope", 2, &Args::new()),
            Err(I18nError::MissingTranslation { .. })
        ));
    }

    #[test]
    fn test_missing_argument_is_always_reported() {
        let catalog = catalog();
        for policy in [MissingTranslationPolicy::Error, MissingTranslationPolicy::EchoKey] {
            let renderer = MessageRenderer::new(&catalog).with_policy(policy);
            assert!(matches!(
                renderer.render(&locale("en"), "greeting", &Args::new()),
                Err(I18nError::MissingArgument { .. })
            ));
        }
    }

    #[test]
    fn test_echo_key_policy() {
        let catalog = catalog();
        let renderer = MessageRenderer::new(&catalog).with_policy(MissingTranslationPolicy::EchoKey);
        let fr = locale("fr");

        assert_eq!(renderer.render(&fr, "Hello, World!", &Args::new()).unwrap(), "Hello, World!");
        assert_eq!(
            renderer.render_plural(&fr, "%(num)d apples", 3, &Args::new()).unwrap(),
            "3 apples"
        );
        // unparsable keys are echoed verbatim
        assert_eq!(renderer.render(&fr, "50% {off", &Args::new()).unwrap(), "50% {off");
        assert!(matches!(
            renderer.render(&fr, "Hi {name}", &Args::new()),
            Err(I18nError::MissingArgument { .. })
        ));
    }
}
