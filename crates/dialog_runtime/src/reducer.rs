//! Open/close lifecycle and focus-trap transitions for one dialog instance.

use dialog_host::{FocusSnapshot, KeyUpEvent};

use crate::model::{DialogProps, DialogState, FocusPhase, FocusTrap};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Inputs accepted by [`reduce_dialog`].
pub enum DialogAction {
    /// One render evaluation. `focus` is the main region's focus state, queried only while open.
    RenderPass {
        /// Focus snapshot of the main region, `None` while closed.
        focus: Option<FocusSnapshot>,
    },
    /// The close control was activated.
    CloseButtonActivated,
    /// The underlay was clicked.
    UnderlayClicked,
    /// A document key-up event arrived.
    KeyUp(KeyUpEvent),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_dialog`], executed in order.
pub enum DialogEffect {
    /// Invoke the caller's `on_open` callback.
    NotifyOpen,
    /// Register the document key-up listener.
    SubscribeKeys,
    /// Remove the document key-up listener.
    UnsubscribeKeys,
    /// Invoke the caller's `on_request_close` callback.
    RequestClose,
    /// Move focus onto the main region.
    FocusMainRegion,
}

/// Applies a [`DialogAction`] to the instance state and collects resulting side effects.
///
/// The open-transition check always runs before the focus check of the same pass. Close requests
/// are dropped while `closeable` is false.
pub fn reduce_dialog(
    state: &mut DialogState,
    props: &DialogProps,
    action: DialogAction,
) -> Vec<DialogEffect> {
    let mut effects = Vec::new();
    match action {
        DialogAction::RenderPass { focus } => {
            let was_open = state.was_open_previous.unwrap_or(false);
            if props.open && !was_open {
                state.focus_trap = FocusTrap::opened();
                effects.push(DialogEffect::NotifyOpen);
                effects.push(DialogEffect::SubscribeKeys);
            } else if !props.open && was_open {
                effects.push(DialogEffect::UnsubscribeKeys);
            }
            state.was_open_previous = Some(props.open);

            if props.open {
                if let Some(focus) = focus {
                    check_focus(&mut state.focus_trap, props, focus, &mut effects);
                }
            }
        }
        DialogAction::CloseButtonActivated => request_close(props, &mut effects),
        DialogAction::UnderlayClicked => {
            if !props.modal {
                request_close(props, &mut effects);
            }
        }
        DialogAction::KeyUp(event) => {
            if props.open && event.is_escape() {
                request_close(props, &mut effects);
            }
        }
    }
    effects
}

fn check_focus(
    trap: &mut FocusTrap,
    props: &DialogProps,
    focus: FocusSnapshot,
    effects: &mut Vec<DialogEffect>,
) {
    if focus.contains_focus {
        trap.pending_focus_call = false;
        trap.phase = FocusPhase::Focused;
    } else if trap.initial_focus_acquired() {
        // Only focus acquired since opening can be lost.
        trap.phase = FocusPhase::LostFocus;
        if props.modal {
            trap.pending_focus_call = true;
        } else {
            request_close(props, effects);
        }
    }

    if trap.pending_focus_call {
        effects.push(DialogEffect::FocusMainRegion);
    }
}

fn request_close(props: &DialogProps, effects: &mut Vec<DialogEffect>) {
    if props.closeable {
        effects.push(DialogEffect::RequestClose);
    }
}
