use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::types::KeyPressed;

/// Handle returned by [`KeyPressedSignal::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Rc<dyn Fn(&KeyPressed)>;

/// Multi-slot, single-threaded `KeyPressed` event.
///
/// Handlers run synchronously in subscription order. Subscribing or unsubscribing from inside a
/// handler is allowed and takes effect from the next emission.
#[derive(Default)]
pub struct KeyPressedSignal {
    next_id: Cell<u64>,
    handlers: RefCell<Vec<(SubscriptionId, Handler)>>,
}

impl KeyPressedSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, handler: impl Fn(&KeyPressed) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.handlers.borrow_mut().push((id, Rc::new(handler)));
        id
    }

    /// Returns `false` if the subscription was already removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|(sub, _)| *sub != id);
        handlers.len() != before
    }

    /// Deliver `event` to every subscriber; returns how many were called.
    pub fn emit(&self, event: &KeyPressed) -> usize {
        let snapshot: Vec<Handler> = self
            .handlers
            .borrow()
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();

        for handler in &snapshot {
            handler(event);
        }
        snapshot.len()
    }

    pub fn len(&self) -> usize {
        self.handlers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.handlers.borrow_mut().clear();
    }
}

impl fmt::Debug for KeyPressedSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPressedSignal")
            .field("subscribers", &self.len())
            .finish()
    }
}
