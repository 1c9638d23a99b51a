//! Scoped key listeners.
//!
//! A screen subscribes a mapping from key events to its own actions and keeps
//! the returned [`Subscription`] for as long as it is shown. Dropping the
//! subscription unregisters the listener, so a torn-down screen never sees
//! another key.

use std::sync::{Arc, Weak};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use parking_lot::Mutex;

use crate::carousel::CarouselAction;

type Listener<A> = Box<dyn Fn(&KeyEvent) -> Option<A> + Send + Sync>;

struct Registry<A> {
    next_id: u64,
    listeners: Vec<(u64, Listener<A>)>,
}

/// Registry of key listeners producing actions of type `A`.
pub struct KeyListeners<A> {
    inner: Arc<Mutex<Registry<A>>>,
}

impl<A> KeyListeners<A> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Registry {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Register `listener` until the returned guard is dropped.
    #[must_use = "the listener is removed as soon as the subscription is dropped"]
    pub fn subscribe<F>(&self, listener: F) -> Subscription<A>
    where
        F: Fn(&KeyEvent) -> Option<A> + Send + Sync + 'static,
    {
        let mut registry = self.inner.lock();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, Box::new(listener)));

        Subscription {
            id,
            registry: Arc::downgrade(&self.inner),
        }
    }

    /// Offer a key to every listener, in subscription order.
    pub fn dispatch(&self, key: &KeyEvent) -> Vec<A> {
        self.inner
            .lock()
            .listeners
            .iter()
            .filter_map(|(_, listener)| listener(key))
            .collect()
    }

    /// Number of live listeners.
    pub fn len(&self) -> usize {
        self.inner.lock().listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<A> Default for KeyListeners<A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps a listener registered while alive.
pub struct Subscription<A> {
    id: u64,
    registry: Weak<Mutex<Registry<A>>>,
}

impl<A> Drop for Subscription<A> {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.lock().listeners.retain(|(id, _)| *id != self.id);
        }
    }
}

impl<A> std::fmt::Debug for Subscription<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

/// Carousel key bindings: arrows, `h`/`l`, Home/End.
pub fn carousel_keys(key: &KeyEvent) -> Option<CarouselAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }

    match key.code {
        KeyCode::Right | KeyCode::Char('l') => Some(CarouselAction::Next),
        KeyCode::Left | KeyCode::Char('h') => Some(CarouselAction::Previous),
        KeyCode::Home => Some(CarouselAction::First),
        KeyCode::End => Some(CarouselAction::Last),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_dropping_subscription_unregisters() {
        let listeners = KeyListeners::new();
        let sub = listeners.subscribe(carousel_keys);
        assert_eq!(listeners.len(), 1);
        assert_eq!(
            listeners.dispatch(&key(KeyCode::Right)),
            vec![CarouselAction::Next]
        );

        drop(sub);
        assert!(listeners.is_empty());
        assert!(listeners.dispatch(&key(KeyCode::Right)).is_empty());
    }

    #[test]
    fn test_only_own_listener_removed() {
        let listeners = KeyListeners::new();
        let first = listeners.subscribe(|_| Some(1));
        let _second = listeners.subscribe(|_| Some(2));

        assert_eq!(listeners.dispatch(&key(KeyCode::Enter)), vec![1, 2]);
        drop(first);
        assert_eq!(listeners.dispatch(&key(KeyCode::Enter)), vec![2]);
    }

    #[test]
    fn test_subscription_outliving_registry() {
        let listeners = KeyListeners::new();
        let sub = listeners.subscribe(|_| Some(()));
        drop(listeners);
        drop(sub);
    }

    #[test]
    fn test_carousel_bindings() {
        assert_eq!(carousel_keys(&key(KeyCode::Left)), Some(CarouselAction::Previous));
        assert_eq!(carousel_keys(&key(KeyCode::Char('h'))), Some(CarouselAction::Previous));
        assert_eq!(carousel_keys(&key(KeyCode::Char('l'))), Some(CarouselAction::Next));
        assert_eq!(carousel_keys(&key(KeyCode::Home)), Some(CarouselAction::First));
        assert_eq!(carousel_keys(&key(KeyCode::End)), Some(CarouselAction::Last));
        assert_eq!(carousel_keys(&key(KeyCode::Char('q'))), None);
        assert_eq!(
            carousel_keys(&KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL)),
            None
        );
    }
}
