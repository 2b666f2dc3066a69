//! Dialog properties, per-instance identifiers, and focus-trap state.

use std::{
    collections::BTreeMap,
    fmt,
    rc::Rc,
    str::FromStr,
    sync::atomic::{AtomicU64, Ordering},
};

use dialog_host::ThemeClassMap;
use serde::{Deserialize, Serialize};

use crate::element::ElementError;

static NEXT_DIALOG_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Accessibility role carried by the main region.
pub enum DialogRole {
    /// Standard dialog.
    #[default]
    Dialog,
    /// Dialog conveying an urgent message that needs a response.
    AlertDialog,
}

impl DialogRole {
    /// Returns the ARIA role token.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dialog => "dialog",
            Self::AlertDialog => "alertdialog",
        }
    }
}

impl FromStr for DialogRole {
    type Err = ElementError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "dialog" => Ok(Self::Dialog),
            "alertdialog" => Ok(Self::AlertDialog),
            other => Err(ElementError::InvalidRole(other.to_string())),
        }
    }
}

#[derive(Clone)]
/// Caller-supplied notification callback taking no arguments.
pub struct DialogCallback(Rc<dyn Fn()>);

impl DialogCallback {
    /// Wraps a callback.
    pub fn new(callback: impl Fn() + 'static) -> Self {
        Self(Rc::new(callback))
    }

    /// Invokes the callback.
    pub fn call(&self) {
        (self.0)();
    }
}

impl fmt::Debug for DialogCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DialogCallback")
    }
}

impl PartialEq for DialogCallback {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Full public property contract of one dialog.
///
/// The host owns every field. The dialog never flips `open` itself; it asks for a close through
/// `on_request_close` and waits for the host to render again.
pub struct DialogProps {
    /// Whether the dialog is shown.
    pub open: bool,
    /// Whether focus is trapped and outside clicks are ignored.
    pub modal: bool,
    /// Whether close requests are honoured and the close control is rendered.
    pub closeable: bool,
    /// Whether the underlay is visibly styled.
    pub underlay: bool,
    /// Title text.
    pub title: String,
    /// Close control text; defaults to the localized "close" phrase followed by the title.
    pub close_text: Option<String>,
    /// Main-region role.
    pub role: DialogRole,
    /// Enter animation class; defaults to the theme's `enter` class.
    pub enter_animation: Option<String>,
    /// Exit animation class; defaults to the theme's `exit` class.
    pub exit_animation: Option<String>,
    /// ARIA attributes forwarded to the main region (`describedby` or `aria-describedby`).
    pub aria: BTreeMap<String, String>,
    /// Per-instance theme replacing the host theme.
    pub theme: Option<ThemeClassMap>,
    /// Extra classes appended per semantic class key.
    pub extra_classes: BTreeMap<String, String>,
    /// Class overrides for nested widgets, keyed by widget then semantic class.
    pub classes: BTreeMap<String, BTreeMap<String, Vec<String>>>,
    /// Invoked once per open transition.
    pub on_open: Option<DialogCallback>,
    /// Invoked when the dialog asks the host to close it.
    pub on_request_close: Option<DialogCallback>,
}

impl Default for DialogProps {
    fn default() -> Self {
        Self {
            open: false,
            modal: false,
            closeable: true,
            underlay: false,
            title: String::new(),
            close_text: None,
            role: DialogRole::Dialog,
            enter_animation: None,
            exit_animation: None,
            aria: BTreeMap::new(),
            theme: None,
            extra_classes: BTreeMap::new(),
            classes: BTreeMap::new(),
            on_open: None,
            on_request_close: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Process-unique DOM ids allocated once per dialog instance.
pub struct DialogIds {
    title_id: String,
    main_id: String,
}

impl DialogIds {
    /// Allocates the next id pair.
    pub fn allocate() -> Self {
        let serial = NEXT_DIALOG_ID.fetch_add(1, Ordering::Relaxed);
        Self {
            title_id: format!("dialog-title-{serial}"),
            main_id: format!("dialog-main-{serial}"),
        }
    }

    /// Id of the element holding the title text.
    pub fn title_id(&self) -> &str {
        &self.title_id
    }

    /// Id of the main region; also the region key passed to the focus service.
    pub fn main_id(&self) -> &str {
        &self.main_id
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Focus progress within one open session.
pub enum FocusPhase {
    /// Focus has not been observed inside the main region since opening.
    #[default]
    NotYetFocused,
    /// Focus was inside the main region on the last check.
    Focused,
    /// Focus was inside at least once, then left.
    LostFocus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Focus-trap state for one open session.
pub struct FocusTrap {
    /// Current focus phase.
    pub phase: FocusPhase,
    /// Whether focus still has to be forced onto the main region.
    pub pending_focus_call: bool,
}

impl FocusTrap {
    /// State at the open-transition edge: nothing acquired yet, focus owed.
    pub const fn opened() -> Self {
        Self {
            phase: FocusPhase::NotYetFocused,
            pending_focus_call: true,
        }
    }

    /// Whether focus has been inside the main region at least once since opening.
    pub fn initial_focus_acquired(&self) -> bool {
        self.phase != FocusPhase::NotYetFocused
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Mutable per-instance state touched only by [`crate::reduce_dialog`].
pub struct DialogState {
    /// `open` as observed on the previous render pass; `None` before the first pass.
    pub was_open_previous: Option<bool>,
    /// Focus-trap flags for the current open session.
    pub focus_trap: FocusTrap,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn allocated_ids_are_unique_and_paired() {
        let first = DialogIds::allocate();
        let second = DialogIds::allocate();

        assert_ne!(first, second);
        assert!(first.title_id().starts_with("dialog-title-"));
        assert_eq!(
            first.title_id().trim_start_matches("dialog-title-"),
            first.main_id().trim_start_matches("dialog-main-")
        );
    }

    #[test]
    fn role_parses_only_known_tokens() {
        assert_eq!("alertdialog".parse::<DialogRole>().ok(), Some(DialogRole::AlertDialog));
        assert_eq!(" dialog ".parse::<DialogRole>().ok(), Some(DialogRole::Dialog));
        assert!(matches!(
            "tooltip".parse::<DialogRole>(),
            Err(ElementError::InvalidRole(role)) if role == "tooltip"
        ));
    }

    #[test]
    fn props_default_to_closeable_closed_dialog() {
        let props = DialogProps::default();
        assert!(props.closeable);
        assert!(!props.open);
        assert!(!props.modal);
        assert_eq!(props.role.as_str(), "dialog");
    }
}
