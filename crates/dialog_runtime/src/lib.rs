//! Dialog runtime: lifecycle reducer, focus trap, view rendering, and the Leptos component.
//!
//! The reducer ([`reduce_dialog`]) is pure and owns every transition. [`DialogInstance`] executes
//! its effects against injected [`dialog_host::DialogHostServices`], and [`Dialog`] wires the
//! instance into a Leptos tree.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod catalog;
pub mod components;
pub mod element;
pub mod host;
pub mod instance;
pub mod model;
pub mod reducer;
pub mod view;

pub use catalog::{
    CatalogError, CatalogMessageResolver, LocaleCatalog, ThemeCatalog, DEFAULT_THEME_NAME,
    FALLBACK_LOCALE,
};
pub use components::Dialog;
pub use element::{
    apply_attribute, apply_property, bind_event, ElementError, ElementManifest, DIALOG_ELEMENT,
};
pub use host::{default_host_services, host_services_for};
pub use instance::DialogInstance;
pub use model::*;
pub use reducer::{reduce_dialog, DialogAction, DialogEffect};
pub use view::{
    render_dialog, DialogRenderInput, ElementTag, LayoutChild, ViewChild, ViewNode,
    EXIT_ANIMATION_ATTRIBUTE,
};
