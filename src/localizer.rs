//! Startup wiring: configuration in, per-request translators out.

use crate::{Error, Result};
use parlance_config::I18nConfig;
use parlance_i18n::{
    Args, Locale, LocaleResolver, MessageCatalog, MessageRenderer, MissingTranslationPolicy,
    PreferenceList, SupportedLocales,
};
use parlance_log::{info, warn};
use std::sync::Arc;

/// Application-wide localization state.
///
/// Holds the supported locales, the default locale and a shared,
/// read-only catalog. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct Localizer {
    resolver: LocaleResolver,
    catalog: Arc<MessageCatalog>,
    policy: MissingTranslationPolicy,
}

impl Localizer {
    /// The catalog must fall back to the same default locale the resolver
    /// returns, otherwise [`Error::DefaultLocaleMismatch`].
    pub fn new(
        resolver: LocaleResolver,
        catalog: impl Into<Arc<MessageCatalog>>,
        policy: MissingTranslationPolicy,
    ) -> Result<Self> {
        let catalog = catalog.into();
        if catalog.default_locale() != resolver.default_locale() {
            return Err(Error::DefaultLocaleMismatch {
                resolver: resolver.default_locale().tag(),
                catalog: catalog.default_locale().tag(),
            });
        }

        Ok(Self {
            resolver,
            catalog,
            policy,
        })
    }

    /// Parse the configured locales and load every translation directory.
    ///
    /// Later directories override earlier ones key by key.
    pub fn from_config(config: &I18nConfig) -> Result<Self> {
        let default = Locale::parse(&config.default_locale)?;
        let supported = SupportedLocales::parse(&config.supported_locales)?;

        let mut builder = MessageCatalog::builder(default.clone());
        for dir in &config.translation_directories {
            builder.load_dir(dir)?;
        }
        let catalog = builder.build();

        for locale in supported.iter().chain(std::iter::once(&default)) {
            if catalog.keys(locale).is_empty() {
                warn!(target: "parlance::localizer", "No translations loaded for {}", locale);
            }
        }
        info!(
            target: "parlance::localizer",
            "Serving {} locale(s), default {}, {} messages",
            supported.len(),
            default,
            catalog.len()
        );

        Self::new(
            LocaleResolver::new(supported, default),
            catalog,
            config.missing_translation,
        )
    }

    /// Configuration from `.env` and `PARLANCE_*` variables.
    pub fn from_env() -> Result<Self> {
        let config = I18nConfig::from_env()?;
        Self::from_config(&config)
    }

    pub fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }

    pub fn resolver(&self) -> &LocaleResolver {
        &self.resolver
    }

    pub fn policy(&self) -> MissingTranslationPolicy {
        self.policy
    }

    /// A translator for a request carrying this `Accept-Language` value.
    pub fn for_request(&self, accept_language: Option<&str>) -> Translator<'_> {
        self.translator(self.resolver.resolve_header(accept_language))
    }

    /// A translator for already-parsed preferences.
    pub fn for_preferences(&self, preferences: &PreferenceList) -> Translator<'_> {
        self.translator(self.resolver.resolve(preferences))
    }

    fn translator(&self, locale: Locale) -> Translator<'_> {
        Translator {
            locale,
            renderer: MessageRenderer::new(&self.catalog).with_policy(self.policy),
        }
    }
}

/// Renders messages in one resolved locale.
#[derive(Debug, Clone)]
pub struct Translator<'a> {
    locale: Locale,
    renderer: MessageRenderer<'a>,
}

impl Translator<'_> {
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn t(&self, key: &str) -> parlance_i18n::Result<String> {
        self.renderer.render(&self.locale, key, &Args::new())
    }

    pub fn t_args(&self, key: &str, args: &Args) -> parlance_i18n::Result<String> {
        self.renderer.render(&self.locale, key, args)
    }

    pub fn tn(&self, key: &str, count: i64) -> parlance_i18n::Result<String> {
        self.renderer.render_plural(&self.locale, key, count, &Args::new())
    }

    pub fn tn_args(&self, key: &str, count: i64, args: &Args) -> parlance_i18n::Result<String> {
        self.renderer.render_plural(&self.locale, key, count, args)
    }
}
