//! Global key-event subscription contracts.

use std::{
    cell::RefCell,
    fmt,
    rc::{Rc, Weak},
};

/// Legacy `keyCode` value reported for the Escape key.
pub const ESCAPE_KEY_CODE: u32 = 27;

/// Key-up payload delivered to subscribed handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyUpEvent {
    /// DOM `key` name (for example `"Escape"`).
    pub key: String,
    /// Legacy numeric key code.
    pub key_code: u32,
}

impl KeyUpEvent {
    /// Builds a key-up event from a key name and code.
    pub fn new(key: impl Into<String>, key_code: u32) -> Self {
        Self {
            key: key.into(),
            key_code,
        }
    }

    /// Builds an Escape key-up event.
    pub fn escape() -> Self {
        Self::new("Escape", ESCAPE_KEY_CODE)
    }

    /// Returns whether this event reports the Escape key.
    pub fn is_escape(&self) -> bool {
        self.key_code == ESCAPE_KEY_CODE || self.key == "Escape"
    }
}

/// Event target a global listener is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerScope {
    /// The active `document`.
    Document,
    /// The browser `window`.
    Window,
}

/// What a handler asks the host to do with the event after handling it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    /// Let the event continue to other listeners.
    Propagate,
    /// Stop propagation to ancestor handlers.
    Stop,
}

/// Shared key-up handler registered with a [`KeyListenerRegistry`].
pub type KeyUpHandler = Rc<dyn Fn(&KeyUpEvent) -> KeyDisposition>;

/// Removable registration returned by [`KeyListenerRegistry::subscribe`].
///
/// Dropping the handle removes the listener.
pub struct KeyListenerHandle {
    remove: Option<Box<dyn FnOnce()>>,
}

impl KeyListenerHandle {
    /// Wraps a removal callback.
    pub fn new(remove: impl FnOnce() + 'static) -> Self {
        Self {
            remove: Some(Box::new(remove)),
        }
    }

    /// Handle that owns no registration.
    pub fn detached() -> Self {
        Self { remove: None }
    }

    /// Removes the listener now.
    pub fn remove(mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }
}

impl Drop for KeyListenerHandle {
    fn drop(&mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }
}

impl fmt::Debug for KeyListenerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyListenerHandle")
            .field("attached", &self.remove.is_some())
            .finish()
    }
}

/// Host service for scoped global key-up listeners.
pub trait KeyListenerRegistry {
    /// Registers `handler` for key-up events on `scope` until the returned handle is removed.
    fn subscribe(
        &self,
        scope: ListenerScope,
        handler: KeyUpHandler,
    ) -> Result<KeyListenerHandle, String>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op key listener registry for unsupported targets.
pub struct NoopKeyListenerRegistry;

impl KeyListenerRegistry for NoopKeyListenerRegistry {
    fn subscribe(
        &self,
        _scope: ListenerScope,
        _handler: KeyUpHandler,
    ) -> Result<KeyListenerHandle, String> {
        Ok(KeyListenerHandle::detached())
    }
}

#[derive(Default)]
struct MemoryListeners {
    next_id: u64,
    listeners: Vec<(u64, ListenerScope, KeyUpHandler)>,
}

#[derive(Clone, Default)]
/// In-memory key listener registry with manual event emission.
pub struct MemoryKeyListenerRegistry {
    inner: Rc<RefCell<MemoryListeners>>,
}

impl MemoryKeyListenerRegistry {
    /// Returns the number of live listeners on `scope`.
    pub fn listener_count(&self, scope: ListenerScope) -> usize {
        self.inner
            .borrow()
            .listeners
            .iter()
            .filter(|(_, listener_scope, _)| *listener_scope == scope)
            .count()
    }

    /// Delivers `event` to every listener on `scope`.
    ///
    /// Returns [`KeyDisposition::Stop`] when any handler stopped propagation.
    pub fn emit(&self, scope: ListenerScope, event: &KeyUpEvent) -> KeyDisposition {
        let handlers: Vec<KeyUpHandler> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .filter(|(_, listener_scope, _)| *listener_scope == scope)
            .map(|(_, _, handler)| handler.clone())
            .collect();

        let mut disposition = KeyDisposition::Propagate;
        for handler in handlers {
            if handler(event) == KeyDisposition::Stop {
                disposition = KeyDisposition::Stop;
            }
        }
        disposition
    }
}

impl fmt::Debug for MemoryKeyListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryKeyListenerRegistry")
            .field("listeners", &self.inner.borrow().listeners.len())
            .finish()
    }
}

impl KeyListenerRegistry for MemoryKeyListenerRegistry {
    fn subscribe(
        &self,
        scope: ListenerScope,
        handler: KeyUpHandler,
    ) -> Result<KeyListenerHandle, String> {
        let id = {
            let mut inner = self.inner.borrow_mut();
            inner.next_id += 1;
            let id = inner.next_id;
            inner.listeners.push((id, scope, handler));
            id
        };

        let weak: Weak<RefCell<MemoryListeners>> = Rc::downgrade(&self.inner);
        Ok(KeyListenerHandle::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner
                    .borrow_mut()
                    .listeners
                    .retain(|(listener_id, _, _)| *listener_id != id);
            }
        }))
    }
}
