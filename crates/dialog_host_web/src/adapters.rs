use std::rc::Rc;

use dialog_host::{DialogHostServices, MessageResolver, ThemeResolver};

use crate::{WebFocusService, WebKeyListenerRegistry};

/// Returns the browser focus adapter.
pub fn focus_service() -> WebFocusService {
    WebFocusService
}

/// Returns the browser key-up listener adapter.
pub fn key_listener_registry() -> WebKeyListenerRegistry {
    WebKeyListenerRegistry
}

/// Assembles the browser collaborator bundle around the given message and theme resolvers.
pub fn build_host_services(
    messages: Rc<dyn MessageResolver>,
    theme: Rc<dyn ThemeResolver>,
) -> DialogHostServices {
    DialogHostServices {
        focus: Rc::new(focus_service()),
        keys: Rc::new(key_listener_registry()),
        messages,
        theme,
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use dialog_host::{
        FocusService, FocusSnapshot, KeyDisposition, ListenerScope, NoopMessageResolver,
        NoopThemeResolver,
    };
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn native_fallbacks_are_inert() {
        let services =
            build_host_services(Rc::new(NoopMessageResolver), Rc::new(NoopThemeResolver));

        assert_eq!(services.focus.snapshot("dialog-main-1"), FocusSnapshot::outside());
        services.focus.focus("dialog-main-1");
        let handle = services
            .keys
            .subscribe(ListenerScope::Document, Rc::new(|_| KeyDisposition::Stop))
            .expect("subscribe");
        handle.remove();
        assert_eq!(crate::browser_locale(), None);
    }
}
