// Parlance - request locale negotiation and message rendering
//
// Picks a locale for each request from its Accept-Language header and
// renders translated, pluralized messages from an immutable catalog.

mod error;
mod localizer;

pub use error::{Error, Result};
pub use localizer::{Localizer, Translator};

pub use parlance_i18n::*;

pub use parlance_config as config;
pub use parlance_log as log;

// Prelude for common imports
pub mod prelude {
    pub use crate::config::I18nConfig;
    pub use crate::{
        Args, Error, I18nError, Locale, LocaleResolver, Localizer, MessageCatalog,
        MessageRenderer, MissingTranslationPolicy, PreferenceList, SupportedLocales, Translator,
        render, render_plural, resolve,
    };
}
