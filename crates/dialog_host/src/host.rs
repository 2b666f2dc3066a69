//! Injected collaborator bundle for dialog instances.

use std::rc::Rc;

use crate::{
    FocusService, KeyListenerRegistry, MemoryFocusService, MemoryKeyListenerRegistry,
    MessageResolver, NoopFocusService, NoopKeyListenerRegistry, NoopMessageResolver,
    NoopThemeResolver, ThemeResolver,
};

/// Runtime-selected collaborator bundle injected into each dialog instance.
///
/// Environment-specific adapter selection happens before this bundle reaches `dialog_runtime`, so
/// the state machine stays independent of browser APIs.
#[derive(Clone)]
pub struct DialogHostServices {
    /// Focus introspection/control service.
    pub focus: Rc<dyn FocusService>,
    /// Global key-up subscription service.
    pub keys: Rc<dyn KeyListenerRegistry>,
    /// Localization bundle lookup for the active locale.
    pub messages: Rc<dyn MessageResolver>,
    /// Theme class resolution used when an instance carries no theme override.
    pub theme: Rc<dyn ThemeResolver>,
}

impl DialogHostServices {
    /// Bundle of inert adapters.
    pub fn noop() -> Self {
        Self {
            focus: Rc::new(NoopFocusService),
            keys: Rc::new(NoopKeyListenerRegistry),
            messages: Rc::new(NoopMessageResolver),
            theme: Rc::new(NoopThemeResolver),
        }
    }

    /// Bundle over the given in-memory focus and key adapters.
    pub fn memory(focus: MemoryFocusService, keys: MemoryKeyListenerRegistry) -> Self {
        Self {
            focus: Rc::new(focus),
            keys: Rc::new(keys),
            messages: Rc::new(NoopMessageResolver),
            theme: Rc::new(NoopThemeResolver),
        }
    }

    /// Replaces the message resolver.
    pub fn with_messages(mut self, messages: Rc<dyn MessageResolver>) -> Self {
        self.messages = messages;
        self
    }

    /// Replaces the theme resolver.
    pub fn with_theme(mut self, theme: Rc<dyn ThemeResolver>) -> Self {
        self.theme = theme;
        self
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{FocusSnapshot, KeyDisposition, KeyUpEvent, ListenerScope, ThemeClassMap};

    #[test]
    fn noop_bundle_is_inert() {
        let services = DialogHostServices::noop();

        services.focus.focus("dialog-main-1");
        assert_eq!(services.focus.snapshot("dialog-main-1"), FocusSnapshot::outside());
        let handle = services
            .keys
            .subscribe(ListenerScope::Document, Rc::new(|_: &KeyUpEvent| KeyDisposition::Stop))
            .expect("subscribe");
        handle.remove();
        assert!(services.messages.bundle("common").is_empty());
        assert_eq!(services.theme.class("main"), None);
    }

    #[test]
    fn builders_replace_single_services() {
        let focus = MemoryFocusService::default();
        let keys = MemoryKeyListenerRegistry::default();
        let services = DialogHostServices::memory(focus.clone(), keys)
            .with_theme(Rc::new(ThemeClassMap::from_pairs([("main", "host-main")])));

        services.focus.focus("dialog-main-2");
        assert_eq!(focus.focused_region().as_deref(), Some("dialog-main-2"));
        assert_eq!(services.theme.class("main").as_deref(), Some("host-main"));
    }
}
