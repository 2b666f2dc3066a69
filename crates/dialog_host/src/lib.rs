//! Typed collaborator contracts consumed by the dialog runtime.
//!
//! This crate is the API-first boundary between the dialog state machine and its environment. It
//! exposes focus introspection/control, global key-up subscription, localization bundle lookup,
//! and theme class resolution as object-safe traits, together with no-op and in-memory adapters.
//! Concrete browser adapters live in `dialog_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod focus;
pub mod host;
pub mod i18n;
pub mod keys;
pub mod theme;

pub use focus::{FocusService, FocusSnapshot, MemoryFocusService, NoopFocusService};
pub use host::DialogHostServices;
pub use i18n::{
    MessageBundle, MessageResolver, NoopMessageResolver, StaticMessageResolver, CLOSE_MESSAGE_KEY,
    COMMON_BUNDLE_ID,
};
pub use keys::{
    KeyDisposition, KeyListenerHandle, KeyListenerRegistry, KeyUpEvent, KeyUpHandler,
    ListenerScope, MemoryKeyListenerRegistry, NoopKeyListenerRegistry, ESCAPE_KEY_CODE,
};
pub use theme::{NoopThemeResolver, ThemeClassMap, ThemeResolver};
