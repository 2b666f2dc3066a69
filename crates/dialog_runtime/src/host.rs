//! Host service assembly for browser-mounted dialogs.
//!
//! Wires the browser focus and key adapters together with the compiled locale and theme
//! catalogs. Catalog failures degrade to inert resolvers instead of failing the mount.

use std::rc::Rc;

use dialog_host::{
    DialogHostServices, MessageResolver, NoopMessageResolver, NoopThemeResolver, ThemeResolver,
};
use dialog_host_web::{browser_locale, build_host_services, DEFAULT_LOCALE};
use leptos::logging;

use crate::catalog::{LocaleCatalog, ThemeCatalog, DEFAULT_THEME_NAME};

/// Browser services using the browser's preferred locale and the default theme.
pub fn default_host_services() -> DialogHostServices {
    let locale = browser_locale().unwrap_or_else(|| DEFAULT_LOCALE.to_string());
    host_services_for(&locale, DEFAULT_THEME_NAME)
}

/// Browser services for an explicit locale tag and theme name.
pub fn host_services_for(locale: &str, theme_name: &str) -> DialogHostServices {
    build_host_services(message_resolver(locale), theme_resolver(theme_name))
}

/// Message resolver negotiated from the built-in locale catalog.
pub fn message_resolver(locale: &str) -> Rc<dyn MessageResolver> {
    match LocaleCatalog::builtin() {
        Ok(catalog) => Rc::new(catalog.resolver(locale)),
        Err(err) => {
            logging::warn!("dialog locale catalog load failed: {err}");
            Rc::new(NoopMessageResolver)
        }
    }
}

/// Theme resolver for a built-in theme; unknown names fall back to the default theme.
pub fn theme_resolver(theme_name: &str) -> Rc<dyn ThemeResolver> {
    let catalog = match ThemeCatalog::builtin() {
        Ok(catalog) => catalog,
        Err(err) => {
            logging::warn!("dialog theme catalog load failed: {err}");
            return Rc::new(NoopThemeResolver);
        }
    };
    let theme = catalog.theme(theme_name).or_else(|err| {
        logging::warn!("{err}; using `{DEFAULT_THEME_NAME}`");
        catalog.theme(DEFAULT_THEME_NAME)
    });
    match theme {
        Ok(theme) => Rc::new(theme.clone()),
        Err(err) => {
            logging::warn!("dialog theme resolution failed: {err}");
            Rc::new(NoopThemeResolver)
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use dialog_host::{CLOSE_MESSAGE_KEY, COMMON_BUNDLE_ID};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn explicit_locale_and_theme_flow_into_services() {
        let services = host_services_for("es-MX", "dark");

        assert_eq!(
            services
                .messages
                .bundle(COMMON_BUNDLE_ID)
                .get(CLOSE_MESSAGE_KEY)
                .map(str::to_string),
            Some("cerrar".to_string())
        );
        assert!(services.theme.class("main").is_some());
    }

    #[test]
    fn unknown_theme_uses_default_theme() {
        let resolver = theme_resolver("neon");

        assert_eq!(resolver.class("main").as_deref(), Some("dialog-main"));
    }

    #[test]
    fn native_default_services_use_english() {
        let services = default_host_services();

        assert_eq!(
            services
                .messages
                .bundle(COMMON_BUNDLE_ID)
                .get_or(CLOSE_MESSAGE_KEY, "")
                .to_string(),
            "close"
        );
    }
}
