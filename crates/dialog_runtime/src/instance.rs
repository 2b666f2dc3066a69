//! Effect executor binding one dialog's reducer state to its host services.

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use dialog_host::{
    DialogHostServices, KeyDisposition, KeyListenerHandle, KeyUpEvent, ListenerScope,
    ThemeResolver, COMMON_BUNDLE_ID,
};
use leptos::logging;

use crate::{
    model::{DialogIds, DialogProps, DialogState},
    reducer::{reduce_dialog, DialogAction, DialogEffect},
    view::{render_dialog, DialogRenderInput, ViewNode},
};

struct InstanceCore {
    ids: DialogIds,
    state: DialogState,
    props: DialogProps,
    key_listener: Option<KeyListenerHandle>,
}

#[derive(Clone)]
/// One mounted dialog: ids, reducer state, latest properties, and the live key-up subscription.
///
/// Render passes and events funnel through [`DialogInstance::render`] and
/// [`DialogInstance::dispatch`]. Caller callbacks run after internal state is released, so a
/// callback may re-render the same instance synchronously.
pub struct DialogInstance {
    core: Rc<RefCell<InstanceCore>>,
    host: DialogHostServices,
}

impl DialogInstance {
    /// Creates an instance with freshly allocated ids.
    pub fn new(host: DialogHostServices) -> Self {
        Self {
            core: Rc::new(RefCell::new(InstanceCore {
                ids: DialogIds::allocate(),
                state: DialogState::default(),
                props: DialogProps::default(),
                key_listener: None,
            })),
            host,
        }
    }

    /// Instance ids.
    pub fn ids(&self) -> DialogIds {
        self.core.borrow().ids.clone()
    }

    /// Current reducer state.
    pub fn state(&self) -> DialogState {
        self.core.borrow().state
    }

    /// Whether a key-up subscription is currently held.
    pub fn is_listening(&self) -> bool {
        self.core.borrow().key_listener.is_some()
    }

    /// Runs one render pass for `props` and returns the resulting view tree.
    pub fn render(&self, props: DialogProps) -> ViewNode {
        let (view, effects) = {
            let mut core = self.core.borrow_mut();
            let focus = props
                .open
                .then(|| self.host.focus.snapshot(core.ids.main_id()));
            core.props = props;
            let InstanceCore {
                ids, state, props, ..
            } = &mut *core;
            let effects = reduce_dialog(state, props, DialogAction::RenderPass { focus });

            let messages = self.host.messages.bundle(COMMON_BUNDLE_ID);
            let theme: &dyn ThemeResolver = match &props.theme {
                Some(theme) => theme,
                None => self.host.theme.as_ref(),
            };
            let view = render_dialog(&DialogRenderInput {
                props,
                ids,
                theme,
                messages: &messages,
            });
            (view, effects)
        };
        self.run_effects(effects);
        view
    }

    /// Applies an event action against the latest rendered properties.
    pub fn dispatch(&self, action: DialogAction) {
        let effects = {
            let mut core = self.core.borrow_mut();
            let InstanceCore { state, props, .. } = &mut *core;
            reduce_dialog(state, props, action)
        };
        self.run_effects(effects);
    }

    /// Drops the key-up subscription. Called when the dialog unmounts.
    pub fn release(&self) {
        let listener = self.core.borrow_mut().key_listener.take();
        if let Some(listener) = listener {
            listener.remove();
        }
    }

    fn run_effects(&self, effects: Vec<DialogEffect>) {
        for effect in effects {
            match effect {
                DialogEffect::NotifyOpen => {
                    let callback = self.core.borrow().props.on_open.clone();
                    if let Some(callback) = callback {
                        callback.call();
                    }
                }
                DialogEffect::SubscribeKeys => self.subscribe_keys(),
                DialogEffect::UnsubscribeKeys => self.release(),
                DialogEffect::RequestClose => {
                    let callback = self.core.borrow().props.on_request_close.clone();
                    if let Some(callback) = callback {
                        callback.call();
                    }
                }
                DialogEffect::FocusMainRegion => {
                    let main_id = self.core.borrow().ids.main_id().to_string();
                    self.host.focus.focus(&main_id);
                }
            }
        }
    }

    fn subscribe_keys(&self) {
        self.release();
        let core: Weak<RefCell<InstanceCore>> = Rc::downgrade(&self.core);
        let host = self.host.clone();
        let handler = Rc::new(move |event: &KeyUpEvent| {
            let Some(core) = core.upgrade() else {
                return KeyDisposition::Propagate;
            };
            let instance = DialogInstance { core, host: host.clone() };
            instance.dispatch(DialogAction::KeyUp(event.clone()));
            if event.is_escape() {
                KeyDisposition::Stop
            } else {
                KeyDisposition::Propagate
            }
        });
        match self.host.keys.subscribe(ListenerScope::Document, handler) {
            Ok(handle) => self.core.borrow_mut().key_listener = Some(handle),
            Err(err) => logging::warn!("dialog key-up subscription failed: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use dialog_host::{MemoryFocusService, MemoryKeyListenerRegistry};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::DialogCallback;

    #[test]
    fn callback_can_rerender_same_instance() {
        let focus = MemoryFocusService::default();
        let keys = MemoryKeyListenerRegistry::default();
        let instance = DialogInstance::new(DialogHostServices::memory(focus, keys.clone()));
        let rerendered = Rc::new(Cell::new(false));

        let on_request_close = {
            let instance = instance.clone();
            let rerendered = rerendered.clone();
            DialogCallback::new(move || {
                instance.render(DialogProps::default());
                rerendered.set(true);
            })
        };
        instance.render(DialogProps {
            open: true,
            on_request_close: Some(on_request_close),
            ..DialogProps::default()
        });

        let disposition = keys.emit(ListenerScope::Document, &KeyUpEvent::escape());

        assert_eq!(disposition, KeyDisposition::Stop);
        assert!(rerendered.get());
        assert!(!instance.is_listening());
        assert_eq!(keys.listener_count(ListenerScope::Document), 0);
    }
}
