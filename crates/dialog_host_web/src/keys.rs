//! Global key-up listener adapter over DOM event targets.

use dialog_host::{KeyListenerHandle, KeyListenerRegistry, KeyUpHandler, ListenerScope};
#[cfg(target_arch = "wasm32")]
use dialog_host::{KeyDisposition, KeyUpEvent};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

#[derive(Debug, Clone, Copy, Default)]
/// Browser key listener registry attaching `keyup` listeners to `document` or `window`.
pub struct WebKeyListenerRegistry;

#[cfg(target_arch = "wasm32")]
fn event_target(scope: ListenerScope) -> Result<web_sys::EventTarget, String> {
    let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
    match scope {
        ListenerScope::Window => Ok(window.into()),
        ListenerScope::Document => window
            .document()
            .map(Into::into)
            .ok_or_else(|| "document unavailable".to_string()),
    }
}

impl KeyListenerRegistry for WebKeyListenerRegistry {
    fn subscribe(
        &self,
        scope: ListenerScope,
        handler: KeyUpHandler,
    ) -> Result<KeyListenerHandle, String> {
        #[cfg(target_arch = "wasm32")]
        {
            let target = event_target(scope)?;
            let on_keyup = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::wrap(Box::new(
                move |ev: web_sys::KeyboardEvent| {
                    let event = KeyUpEvent::new(ev.key(), ev.key_code());
                    if handler(&event) == KeyDisposition::Stop {
                        ev.stop_propagation();
                    }
                },
            ));
            target
                .add_event_listener_with_callback("keyup", on_keyup.as_ref().unchecked_ref())
                .map_err(|err| format!("failed to attach keyup listener: {err:?}"))?;

            Ok(KeyListenerHandle::new(move || {
                let _ = target.remove_event_listener_with_callback(
                    "keyup",
                    on_keyup.as_ref().unchecked_ref(),
                );
                drop(on_keyup);
            }))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (scope, handler);
            Ok(KeyListenerHandle::detached())
        }
    }
}
