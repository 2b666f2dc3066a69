//! Active-locale detection.

/// Locale used when the environment reports none.
pub const DEFAULT_LOCALE: &str = "en";

/// Returns the browser's preferred language tag (for example `pt-BR`).
pub fn browser_locale() -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|window| window.navigator().language())
            .filter(|language| !language.trim().is_empty())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}
