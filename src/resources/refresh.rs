//! Display-refresh signal consumed by the frame scheduler.
//!
//! A [`RefreshSignal`] hands out a [`FrameToken`] for "call me on the next
//! frame" and can cancel a pending request. Delivery happens outside the
//! trait: the host calls
//! [`FrameScheduler::on_refresh`](super::framescheduler::FrameScheduler::on_refresh)
//! with the token when the frame arrives.
//!
//! [`ManualRefresh`] is the in-process implementation used by the headless
//! host and by tests.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use super::framescheduler::FrameScheduler;

/// Identifier of one pending refresh request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameToken(pub u64);

impl fmt::Display for FrameToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame-{}", self.0)
    }
}

/// "Next frame" request/cancel contract of the display.
pub trait RefreshSignal {
    /// Ask for the next refresh and return its token.
    fn request(&self) -> FrameToken;
    /// Cancel a pending request. Unknown tokens are ignored.
    fn cancel(&self, token: FrameToken);
}

#[derive(Default)]
struct RefreshState {
    next_token: Cell<u64>,
    pending: Cell<Option<FrameToken>>,
    clock_ms: Cell<f64>,
}

/// Refresh signal fired explicitly by the host loop.
///
/// Holds at most one pending request. Clones share the same state, so one
/// clone can be handed to the scheduler while the host keeps another to fire.
#[derive(Clone, Default)]
pub struct ManualRefresh {
    state: Rc<RefreshState>,
}

impl ManualRefresh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token waiting to be delivered, if any.
    pub fn pending(&self) -> Option<FrameToken> {
        self.state.pending.get()
    }

    /// Current value of the internal clock advanced by [`step`](Self::step).
    pub fn clock_ms(&self) -> f64 {
        self.state.clock_ms.get()
    }

    /// Deliver the pending request, if any, at `timestamp_ms`.
    ///
    /// Returns `true` if the scheduler served a frame.
    pub fn fire(&self, scheduler: &FrameScheduler, timestamp_ms: f64) -> bool {
        match self.state.pending.take() {
            Some(token) => scheduler.on_refresh(token, timestamp_ms),
            None => false,
        }
    }

    /// Advance the internal clock by `dt_ms` and fire.
    pub fn step(&self, scheduler: &FrameScheduler, dt_ms: f64) -> bool {
        let now = self.state.clock_ms.get() + dt_ms.max(0.0);
        self.state.clock_ms.set(now);
        self.fire(scheduler, now)
    }
}

impl RefreshSignal for ManualRefresh {
    fn request(&self) -> FrameToken {
        let id = self.state.next_token.get() + 1;
        self.state.next_token.set(id);
        let token = FrameToken(id);
        self.state.pending.set(Some(token));
        token
    }

    fn cancel(&self, token: FrameToken) {
        if self.state.pending.get() == Some(token) {
            self.state.pending.set(None);
        }
    }
}
