//! Pointer input subscription capability.
//!
//! Behaviors never attach listeners to view elements themselves. They
//! register handler closures through [`PointerInput::subscribe`] and drop
//! them again with [`PointerInput::unsubscribe`]. [`PointerHub`] is the
//! in-process implementation: the host feeds it events with
//! [`PointerHub::dispatch`].

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::trace;
use rustc_hash::FxHashMap;

use crate::components::element::ElementId;
use crate::events::pointer::PointerEvent;

/// Handle returned by [`PointerInput::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Handler invoked for every pointer event delivered to its element.
pub type PointerHandler = Box<dyn FnMut(&PointerEvent)>;

/// Subscribe/unsubscribe capability of the input collaborator.
pub trait PointerInput {
    fn subscribe(&self, element: ElementId, handler: PointerHandler) -> SubscriptionId;
    fn unsubscribe(&self, id: SubscriptionId);
}

/// Shared input handle given to behaviors.
pub type SharedInput = Rc<dyn PointerInput>;

type SharedHandler = Rc<RefCell<PointerHandler>>;

struct Subscription {
    id: SubscriptionId,
    handler: SharedHandler,
}

/// Routes pointer events to the handlers subscribed on each element.
#[derive(Default)]
pub struct PointerHub {
    handlers: RefCell<FxHashMap<ElementId, Vec<Subscription>>>,
    next_id: Cell<u64>,
}

impl PointerHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` to every handler subscribed on `element`, in
    /// subscription order. Returns the number of handlers invoked.
    pub fn dispatch(&self, element: ElementId, event: &PointerEvent) -> usize {
        let snapshot: Vec<SharedHandler> = match self.handlers.borrow().get(&element) {
            Some(subs) => subs.iter().map(|s| Rc::clone(&s.handler)).collect(),
            None => return 0,
        };
        let mut invoked = 0;
        for handler in snapshot {
            if let Ok(mut handler) = handler.try_borrow_mut() {
                (&mut *handler)(event);
                invoked += 1;
            }
        }
        invoked
    }

    /// Number of live subscriptions on `element`.
    pub fn subscriber_count(&self, element: ElementId) -> usize {
        self.handlers
            .borrow()
            .get(&element)
            .map(|subs| subs.len())
            .unwrap_or(0)
    }

    /// Number of live subscriptions across all elements.
    pub fn total_subscribers(&self) -> usize {
        self.handlers.borrow().values().map(|subs| subs.len()).sum()
    }
}

impl PointerInput for PointerHub {
    fn subscribe(&self, element: ElementId, handler: PointerHandler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.handlers
            .borrow_mut()
            .entry(element)
            .or_default()
            .push(Subscription {
                id,
                handler: Rc::new(RefCell::new(handler)),
            });
        trace!("pointer subscription {:?} on {}", id, element);
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        let mut handlers = self.handlers.borrow_mut();
        for subs in handlers.values_mut() {
            subs.retain(|s| s.id != id);
        }
        handlers.retain(|_, subs| !subs.is_empty());
    }
}
