//! Locale and theme catalogs compiled from `locales/*.toml` and `themes/*.toml`.

use std::collections::BTreeMap;

use dialog_host::{MessageBundle, MessageResolver, ThemeClassMap};
use serde::Deserialize;
use thiserror::Error;

include!(concat!(env!("OUT_DIR"), "/catalog_generated.rs"));

/// Locale used when negotiation finds no better match.
pub const FALLBACK_LOCALE: &str = "en";
/// Theme used when the host selects none.
pub const DEFAULT_THEME_NAME: &str = "default";

#[derive(Debug, Error)]
/// Catalog load and lookup failures.
pub enum CatalogError {
    /// Catalog JSON did not decode.
    #[error("catalog decode failed: {0}")]
    Decode(#[from] serde_json::Error),
    /// The catalog lacks the fallback locale.
    #[error("locale catalog lacks fallback locale `{FALLBACK_LOCALE}`")]
    MissingFallbackLocale,
    /// No theme with this name exists.
    #[error("unknown theme `{0}`")]
    UnknownTheme(String),
}

#[derive(Debug, Deserialize)]
struct LocaleEntry {
    locale: String,
    bundles: BTreeMap<String, MessageBundle>,
}

#[derive(Debug, Deserialize)]
struct ThemeEntry {
    name: String,
    classes: ThemeClassMap,
}

fn normalize_locale(tag: &str) -> String {
    tag.trim().replace('_', "-").to_ascii_lowercase()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Message bundles per locale.
pub struct LocaleCatalog {
    locales: BTreeMap<String, BTreeMap<String, MessageBundle>>,
}

impl LocaleCatalog {
    /// Decodes a catalog from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Decode`] for malformed JSON and
    /// [`CatalogError::MissingFallbackLocale`] when [`FALLBACK_LOCALE`] is absent.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let entries: Vec<LocaleEntry> = serde_json::from_str(raw)?;
        let locales: BTreeMap<_, _> = entries
            .into_iter()
            .map(|entry| (normalize_locale(&entry.locale), entry.bundles))
            .collect();
        if !locales.contains_key(FALLBACK_LOCALE) {
            return Err(CatalogError::MissingFallbackLocale);
        }
        Ok(Self { locales })
    }

    /// Decodes the catalog embedded at build time.
    ///
    /// # Errors
    ///
    /// See [`LocaleCatalog::from_json`].
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(LOCALE_CATALOG_JSON)
    }

    /// Known locale tags, lowercase.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }

    /// Picks the best known locale for `requested`: exact tag, then primary language subtag,
    /// then [`FALLBACK_LOCALE`].
    pub fn negotiate(&self, requested: &str) -> &str {
        let requested = normalize_locale(requested);
        let primary = requested.split('-').next().unwrap_or_default();
        let negotiated = [requested.as_str(), primary]
            .into_iter()
            .find_map(|candidate| {
                self.locales
                    .get_key_value(candidate)
                    .map(|(key, _)| key.as_str())
            })
            .unwrap_or(FALLBACK_LOCALE);
        negotiated
    }

    /// Builds a resolver for `requested`, filling gaps from the fallback locale.
    pub fn resolver(&self, requested: &str) -> CatalogMessageResolver {
        let locale = self.negotiate(requested).to_string();
        CatalogMessageResolver {
            bundles: self.locales.get(&locale).cloned().unwrap_or_default(),
            fallback: self
                .locales
                .get(FALLBACK_LOCALE)
                .cloned()
                .unwrap_or_default(),
            locale,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// [`MessageResolver`] over one negotiated locale of a [`LocaleCatalog`].
pub struct CatalogMessageResolver {
    locale: String,
    bundles: BTreeMap<String, MessageBundle>,
    fallback: BTreeMap<String, MessageBundle>,
}

impl CatalogMessageResolver {
    /// Negotiated locale tag.
    pub fn locale(&self) -> &str {
        &self.locale
    }
}

impl MessageResolver for CatalogMessageResolver {
    fn bundle(&self, bundle_id: &str) -> MessageBundle {
        let fallback = self.fallback.get(bundle_id).cloned().unwrap_or_default();
        match self.bundles.get(bundle_id) {
            Some(bundle) => bundle.clone().with_fallback(&fallback),
            None => fallback,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Named theme class tables.
pub struct ThemeCatalog {
    themes: BTreeMap<String, ThemeClassMap>,
}

impl ThemeCatalog {
    /// Decodes a catalog from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Decode`] for malformed JSON.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let entries: Vec<ThemeEntry> = serde_json::from_str(raw)?;
        Ok(Self {
            themes: entries
                .into_iter()
                .map(|entry| (entry.name, entry.classes))
                .collect(),
        })
    }

    /// Decodes the catalog embedded at build time.
    ///
    /// # Errors
    ///
    /// See [`ThemeCatalog::from_json`].
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(THEME_CATALOG_JSON)
    }

    /// Known theme names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }

    /// Returns the theme called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownTheme`] when no such theme exists.
    pub fn theme(&self, name: &str) -> Result<&ThemeClassMap, CatalogError> {
        self.themes
            .get(name)
            .ok_or_else(|| CatalogError::UnknownTheme(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use dialog_host::{ThemeResolver, CLOSE_MESSAGE_KEY, COMMON_BUNDLE_ID};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn builtin_locales_negotiate_by_tag_then_language() {
        let catalog = LocaleCatalog::builtin().expect("builtin locales");

        assert_eq!(catalog.negotiate("fr"), "fr");
        assert_eq!(catalog.negotiate("pt-BR"), "pt");
        assert_eq!(catalog.negotiate("de_AT"), "de");
        assert_eq!(catalog.negotiate("sv-SE"), FALLBACK_LOCALE);
        assert!(catalog.locales().any(|locale| locale == "ja"));
    }

    #[test]
    fn resolver_returns_localized_close_phrase() {
        let catalog = LocaleCatalog::builtin().expect("builtin locales");

        let french = catalog.resolver("fr-CA");
        assert_eq!(french.locale(), "fr");
        assert_eq!(
            french.bundle(COMMON_BUNDLE_ID).get(CLOSE_MESSAGE_KEY),
            Some("fermer")
        );
        assert_eq!(
            catalog
                .resolver("en-US")
                .bundle(COMMON_BUNDLE_ID)
                .get(CLOSE_MESSAGE_KEY),
            Some("close")
        );
        assert!(french.bundle("unknown").is_empty());
    }

    #[test]
    fn missing_messages_fall_back_to_english() {
        let catalog = LocaleCatalog::from_json(
            r#"[
                {"locale": "en", "bundles": {"common": {"close": "close", "open": "open"}}},
                {"locale": "nl", "bundles": {"common": {"close": "sluiten"}}}
            ]"#,
        )
        .expect("catalog");

        let bundle = catalog.resolver("nl").bundle(COMMON_BUNDLE_ID);
        assert_eq!(bundle.get("close"), Some("sluiten"));
        assert_eq!(bundle.get("open"), Some("open"));
    }

    #[test]
    fn catalogs_without_fallback_or_with_bad_json_are_rejected() {
        assert!(matches!(
            LocaleCatalog::from_json(r#"[{"locale": "de", "bundles": {}}]"#),
            Err(CatalogError::MissingFallbackLocale)
        ));
        assert!(matches!(
            LocaleCatalog::from_json("{"),
            Err(CatalogError::Decode(_))
        ));
    }

    #[test]
    fn builtin_themes_resolve_semantic_classes() {
        let catalog = ThemeCatalog::builtin().expect("builtin themes");

        let theme = catalog.theme(DEFAULT_THEME_NAME).expect("default theme");
        assert_eq!(theme.class("main").as_deref(), Some("dialog-main"));
        assert!(catalog.theme("dark").is_ok());
        assert!(matches!(
            catalog.theme("neon"),
            Err(CatalogError::UnknownTheme(name)) if name == "neon"
        ));
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["dark", "default"]);
    }
}
