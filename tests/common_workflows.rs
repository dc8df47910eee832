//! Integration tests for common Parlance workflows.
//!
//! These mirror how a web application uses the crate: configure locales,
//! load translation files, then resolve and render per request.

use parlance::config::{ConfigBuilder, FileFormat, I18nConfig, MissingTranslationPolicy};
use parlance::prelude::*;
use std::fs;
use std::path::Path;

fn write_catalogs(dir: &Path) {
    fs::write(
        dir.join("en.json"),
        r#"{
            "Hello, World!": "Hello, World!",
            "welcome": "Welcome to our application!",
            "items": { "one": "You have %(num)d item.", "other": "You have %(num)d items." }
        }"#,
    )
    .unwrap();
    fs::write(
        dir.join("fr.json"),
        r#"{
            "Hello, World!": "Bonjour le monde !",
            "items": { "one": "Vous avez %(num)d article.", "other": "Vous avez %(num)d articles." }
        }"#,
    )
    .unwrap();
}

fn config_for(dir: &Path, mode: MissingTranslationPolicy) -> I18nConfig {
    I18nConfig {
        default_locale: "en".to_string(),
        supported_locales: vec!["en".to_string(), "fr".to_string()],
        translation_directories: vec![dir.to_path_buf()],
        missing_translation: mode,
    }
}

// =============================================================================
// Request Flow
// =============================================================================

#[test]
fn test_hello_world_per_accept_language() {
    let dir = tempfile::tempdir().unwrap();
    write_catalogs(dir.path());
    let localizer = Localizer::from_config(&config_for(dir.path(), MissingTranslationPolicy::Error)).unwrap();

    let cases = [
        (Some("fr-CH, fr;q=0.9, en;q=0.8"), "Bonjour le monde !"),
        (Some("en-US,en;q=0.5"), "Hello, World!"),
        (Some("de-DE"), "Hello, World!"),
        (Some(""), "Hello, World!"),
        (None, "Hello, World!"),
    ];

    for (header, expected) in cases {
        let translator = localizer.for_request(header);
        assert_eq!(translator.t("Hello, World!").unwrap(), expected, "header {header:?}");
    }
}

#[test]
fn test_pluralized_message_per_locale() {
    let dir = tempfile::tempdir().unwrap();
    write_catalogs(dir.path());
    let localizer = Localizer::from_config(&config_for(dir.path(), MissingTranslationPolicy::Error)).unwrap();

    let en = localizer.for_request(Some("en"));
    assert_eq!(en.tn("items", 1).unwrap(), "You have 1 item.");
    assert_eq!(en.tn("items", 5).unwrap(), "You have 5 items.");
    assert_eq!(en.tn("items", 0).unwrap(), "You have 0 items.");

    let fr = localizer.for_request(Some("fr"));
    assert_eq!(fr.tn("items", 1).unwrap(), "Vous avez 1 article.");
    assert_eq!(fr.tn("items", 3).unwrap(), "Vous avez 3 articles.");
}

#[test]
fn test_untranslated_key_falls_back_to_default_locale() {
    let dir = tempfile::tempdir().unwrap();
    write_catalogs(dir.path());
    let localizer = Localizer::from_config(&config_for(dir.path(), MissingTranslationPolicy::Error)).unwrap();

    let fr = localizer.for_request(Some("fr"));
    assert_eq!(fr.t("welcome").unwrap(), "Welcome to our application!");
}

#[test]
fn test_missing_translation_policies() {
    let dir = tempfile::tempdir().unwrap();
    write_catalogs(dir.path());

    let strict = Localizer::from_config(&config_for(dir.path(), MissingTranslationPolicy::Error)).unwrap();
    assert!(matches!(
        strict.for_request(Some("fr")).t("Goodbye!"),
        Err(I18nError::MissingTranslation { .. })
    ));

    let lenient = Localizer::from_config(&config_for(dir.path(), MissingTranslationPolicy::EchoKey)).unwrap();
    assert_eq!(lenient.for_request(Some("fr")).t("Goodbye!").unwrap(), "Goodbye!");
}

#[test]
fn test_later_directories_override_earlier() {
    let base = tempfile::tempdir().unwrap();
    let overrides = tempfile::tempdir().unwrap();
    write_catalogs(base.path());
    fs::write(overrides.path().join("fr.json"), r#"{"Hello, World!": "Salut tout le monde !"}"#).unwrap();

    let mut config = config_for(base.path(), MissingTranslationPolicy::Error);
    config.translation_directories.push(overrides.path().to_path_buf());
    let localizer = Localizer::from_config(&config).unwrap();

    let fr = localizer.for_request(Some("fr"));
    assert_eq!(fr.t("Hello, World!").unwrap(), "Salut tout le monde !");
    assert_eq!(fr.tn("items", 2).unwrap(), "Vous avez 2 articles.");
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_localizer_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    write_catalogs(dir.path());

    let toml = format!(
        r#"
        [i18n]
        default_locale = "en"
        supported_locales = ["en", "fr"]
        translation_directories = [{:?}]
        missing_translation = "echo_key"
        "#,
        dir.path().display().to_string()
    );
    let config = ConfigBuilder::new().source(&toml, FileFormat::Toml).unwrap().build().unwrap();
    let localizer = Localizer::from_config(&config).unwrap();

    assert_eq!(localizer.policy(), MissingTranslationPolicy::EchoKey);
    assert_eq!(localizer.resolver().supported().len(), 2);
    assert_eq!(localizer.for_request(Some("fr")).t("Hello, World!").unwrap(), "Bonjour le monde !");
}

#[test]
fn test_bad_configuration_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    write_catalogs(dir.path());

    let mut config = config_for(dir.path(), MissingTranslationPolicy::Error);
    config.default_locale = "e".to_string();
    assert!(matches!(Localizer::from_config(&config), Err(Error::I18n(I18nError::InvalidLocale(_)))));

    let config = config_for(&dir.path().join("missing"), MissingTranslationPolicy::Error);
    assert!(matches!(Localizer::from_config(&config), Err(Error::I18n(I18nError::Io(_)))));

    let err = ConfigBuilder::new()
        .set("supported_locales", Vec::<String>::new())
        .build()
        .map_err(Error::from)
        .unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

// =============================================================================
// Concurrency
// =============================================================================

#[test]
fn test_localizer_shared_across_threads() {
    let dir = tempfile::tempdir().unwrap();
    write_catalogs(dir.path());
    let localizer = Localizer::from_config(&config_for(dir.path(), MissingTranslationPolicy::Error)).unwrap();

    std::thread::scope(|scope| {
        for (header, expected) in [("fr", "Bonjour le monde !"), ("en", "Hello, World!")] {
            let localizer = localizer.clone();
            scope.spawn(move || {
                for _ in 0..100 {
                    assert_eq!(localizer.for_request(Some(header)).t("Hello, World!").unwrap(), expected);
                }
            });
        }
    });
}
