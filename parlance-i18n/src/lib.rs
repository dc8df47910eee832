//! Locale Negotiation and Message Rendering for Parlance
//!
//! - **Locale resolution**: pick a supported locale from `Accept-Language`
//!   preferences, falling back to a default
//! - **Catalogs**: immutable `(locale, key)` message tables, loaded from
//!   JSON files or built in code
//! - **Rendering**: named placeholder substitution and singular/plural
//!   selection
//!
//! # Quick Start
//!
//! ```rust
//! use parlance_i18n::{Args, Locale, LocaleResolver, MessageCatalog, MessageRenderer, SupportedLocales};
//!
//! let en = Locale::parse("en")?;
//! let fr = Locale::parse("fr")?;
//!
//! let mut builder = MessageCatalog::builder(en.clone());
//! builder.insert(&en, "hello", "Hello, World!")?;
//! builder.insert(&fr, "hello", "Bonjour le monde !")?;
//! let catalog = builder.build();
//!
//! let resolver = LocaleResolver::new(SupportedLocales::parse(["en", "fr"])?, en);
//! let locale = resolver.resolve_header(Some("fr-CA,fr;q=0.9,en;q=0.5"));
//!
//! let text = MessageRenderer::new(&catalog).render(&locale, "hello", &Args::new())?;
//! assert_eq!(text, "Bonjour le monde !");
//! # Ok::<(), parlance_i18n::I18nError>(())
//! ```

mod args;
mod catalog;
mod error;
mod locale;
mod plural;
mod preference;
mod renderer;
mod resolver;
mod template;

pub use args::{Args, Value};
pub use catalog::{CatalogBuilder, Message, MessageCatalog};
pub use error::I18nError;
pub use locale::{Locale, SupportedLocales};
pub use plural::{PluralForm, plural_form};
pub use preference::{LanguageRange, Preference, PreferenceList};
pub use renderer::{MessageRenderer, MissingTranslationPolicy, render, render_plural};
pub use resolver::{LocaleResolver, resolve, resolve_accept_language};
pub use template::Template;

/// Result type for i18n operations
pub type Result<T> = std::result::Result<T, I18nError>;

pub mod prelude {
    pub use crate::{
        Args, I18nError, Locale, LocaleResolver, MessageCatalog, MessageRenderer,
        MissingTranslationPolicy, PreferenceList, Result, SupportedLocales, render,
        render_plural, resolve,
    };
}
