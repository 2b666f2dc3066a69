//! Browser (`wasm32`) implementations of [`dialog_host`] collaborator contracts.
//!
//! Focus control works on element ids and defers focus moves to the next task so the element
//! rendered in the current pass exists. Key-up subscriptions attach removable `Closure`s to the
//! `document` or `window`. Non-wasm targets compile to inert fallbacks.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Adapter factories for runtime wiring.
pub mod adapters;
pub mod focus;
pub mod keys;
pub mod locale;

pub use adapters::{build_host_services, focus_service, key_listener_registry};
pub use focus::WebFocusService;
pub use keys::WebKeyListenerRegistry;
pub use locale::{browser_locale, DEFAULT_LOCALE};
