//! Custom-element manifest and the embedding adapter that maps attributes, properties, and
//! events onto [`DialogProps`].

use std::collections::BTreeMap;

use dialog_host::ThemeClassMap;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::model::{DialogCallback, DialogProps};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Declarative registration surface for embedding the dialog as a custom element.
pub struct ElementManifest {
    /// Custom element tag name.
    pub tag_name: &'static str,
    /// Properties set through object values.
    pub properties: &'static [&'static str],
    /// Attributes set through strings.
    pub attributes: &'static [&'static str],
    /// Event callbacks the element emits.
    pub events: &'static [&'static str],
}

/// Registration surface of the dialog element.
pub const DIALOG_ELEMENT: ElementManifest = ElementManifest {
    tag_name: "dialog-widget",
    properties: &[
        "theme",
        "aria",
        "extraClasses",
        "closeable",
        "modal",
        "open",
        "underlay",
        "classes",
    ],
    attributes: &["title", "role", "exitAnimation", "enterAnimation", "closeText"],
    events: &["onOpen", "onRequestClose"],
};

#[derive(Debug, Error)]
/// Embedding errors for names or values outside the manifest.
pub enum ElementError {
    /// The attribute is not part of [`DIALOG_ELEMENT`].
    #[error("unknown dialog attribute `{0}`")]
    UnknownAttribute(String),
    /// The property is not part of [`DIALOG_ELEMENT`].
    #[error("unknown dialog property `{0}`")]
    UnknownProperty(String),
    /// The event is not part of [`DIALOG_ELEMENT`].
    #[error("unknown dialog event `{0}`")]
    UnknownEvent(String),
    /// The role is neither `dialog` nor `alertdialog`.
    #[error("invalid dialog role `{0}`")]
    InvalidRole(String),
    /// A property value did not match the property's type.
    #[error("invalid value for dialog property `{name}`: {source}")]
    InvalidValue {
        /// Property name.
        name: String,
        /// Underlying decode failure.
        #[source]
        source: serde_json::Error,
    },
}

fn manifest_name(names: &'static [&'static str], name: &str) -> Option<&'static str> {
    names
        .iter()
        .copied()
        .find(|candidate| candidate.eq_ignore_ascii_case(name))
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Applies a string attribute. Names match case-insensitively since HTML lowercases them.
///
/// # Errors
///
/// Returns [`ElementError::UnknownAttribute`] for names outside the manifest and
/// [`ElementError::InvalidRole`] for unsupported roles.
pub fn apply_attribute(
    props: &mut DialogProps,
    name: &str,
    value: &str,
) -> Result<(), ElementError> {
    let name = manifest_name(DIALOG_ELEMENT.attributes, name)
        .ok_or_else(|| ElementError::UnknownAttribute(name.to_string()))?;
    match name {
        "title" => props.title = value.to_string(),
        "role" => props.role = value.parse()?,
        "exitAnimation" => props.exit_animation = non_empty(value),
        "enterAnimation" => props.enter_animation = non_empty(value),
        "closeText" => props.close_text = Some(value.to_string()),
        _ => return Err(ElementError::UnknownAttribute(name.to_string())),
    }
    Ok(())
}

fn decode<T: DeserializeOwned>(name: &str, value: Value) -> Result<T, ElementError> {
    serde_json::from_value(value).map_err(|source| ElementError::InvalidValue {
        name: name.to_string(),
        source,
    })
}

/// Applies an object-valued property.
///
/// `null` resets optional and map-valued properties to their defaults.
///
/// # Errors
///
/// Returns [`ElementError::UnknownProperty`] for names outside the manifest and
/// [`ElementError::InvalidValue`] when the value does not decode.
pub fn apply_property(
    props: &mut DialogProps,
    name: &str,
    value: Value,
) -> Result<(), ElementError> {
    let name = manifest_name(DIALOG_ELEMENT.properties, name)
        .ok_or_else(|| ElementError::UnknownProperty(name.to_string()))?;
    match name {
        "theme" => props.theme = decode::<Option<ThemeClassMap>>(name, value)?,
        "aria" => {
            props.aria =
                decode::<Option<BTreeMap<String, String>>>(name, value)?.unwrap_or_default()
        }
        "extraClasses" => {
            props.extra_classes =
                decode::<Option<BTreeMap<String, String>>>(name, value)?.unwrap_or_default()
        }
        "classes" => {
            props.classes = decode::<Option<BTreeMap<String, BTreeMap<String, Vec<String>>>>>(
                name, value,
            )?
            .unwrap_or_default()
        }
        "closeable" => props.closeable = decode::<Option<bool>>(name, value)?.unwrap_or(true),
        "modal" => props.modal = decode::<Option<bool>>(name, value)?.unwrap_or(false),
        "open" => props.open = decode::<Option<bool>>(name, value)?.unwrap_or(false),
        "underlay" => props.underlay = decode::<Option<bool>>(name, value)?.unwrap_or(false),
        _ => return Err(ElementError::UnknownProperty(name.to_string())),
    }
    Ok(())
}

/// Binds an event callback; `None` unbinds it.
///
/// # Errors
///
/// Returns [`ElementError::UnknownEvent`] for names outside the manifest.
pub fn bind_event(
    props: &mut DialogProps,
    name: &str,
    callback: Option<DialogCallback>,
) -> Result<(), ElementError> {
    match manifest_name(DIALOG_ELEMENT.events, name) {
        Some("onOpen") => props.on_open = callback,
        Some("onRequestClose") => props.on_request_close = callback,
        _ => return Err(ElementError::UnknownEvent(name.to_string())),
    }
    Ok(())
}
