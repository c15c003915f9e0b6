//! Per-frame callback registry driven by a display refresh signal.
//!
//! The scheduler keeps an ordered list of callbacks and invokes every one of
//! them once per served refresh, in registration order. After each batch it
//! re-arms itself through its [`RefreshSignal`], giving one batch per refresh
//! with no overlap.
//!
//! # Snapshot semantics
//!
//! A batch runs over a snapshot of the registry taken when the refresh
//! arrives:
//! - a callback removed during a batch (by itself or an earlier callback)
//!   still runs in that batch, and never again afterwards;
//! - a callback added during a batch first runs on the next refresh.
//!
//! # Example
//!
//! ```ignore
//! let refresh = ManualRefresh::new();
//! let scheduler = FrameScheduler::new(Rc::new(refresh.clone()));
//! let id = scheduler.add(|ctx| log::trace!("frame {}", ctx.frame));
//! scheduler.start();
//! refresh.step(&scheduler, 16.0);
//! scheduler.remove(&id);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, trace, warn};

use super::refresh::{FrameToken, RefreshSignal};

/// Process-wide source of generated callback identifiers. Never reset.
static NEXT_CALLBACK_ID: AtomicU64 = AtomicU64::new(0);

/// Identifier of a registered frame callback.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallbackId(String);

impl CallbackId {
    pub fn new(id: impl Into<String>) -> Self {
        CallbackId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn generate() -> Self {
        CallbackId(NEXT_CALLBACK_ID.fetch_add(1, Ordering::Relaxed).to_string())
    }
}

impl From<&str> for CallbackId {
    fn from(id: &str) -> Self {
        CallbackId(id.to_string())
    }
}

impl From<String> for CallbackId {
    fn from(id: String) -> Self {
        CallbackId(id)
    }
}

impl fmt::Display for CallbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-invocation handle given to every callback.
#[derive(Clone, Debug)]
pub struct FrameContext {
    /// Identifier the receiving callback is registered under.
    pub callback_id: CallbackId,
    /// Refresh request being served.
    pub token: FrameToken,
    /// Refresh timestamp in milliseconds, as reported by the host.
    pub timestamp_ms: f64,
    /// Seconds since the previous served refresh (0 on the first one).
    pub delta: f32,
    /// Number of refreshes served so far, this one included.
    pub frame: u64,
}

type SharedCallback = Rc<RefCell<dyn FnMut(&FrameContext)>>;

struct Entry {
    id: CallbackId,
    callback: SharedCallback,
}

struct SchedulerInner {
    refresh: Rc<dyn RefreshSignal>,
    entries: Vec<Entry>,
    running: bool,
    pending: Option<FrameToken>,
    last_timestamp_ms: Option<f64>,
    frame_count: u64,
}

/// Shared handle to a frame scheduler.
///
/// Cloning the handle does not clone the registry. The scheduler is
/// single-threaded (`!Send`); mutation happens from the thread that drives
/// the refresh signal.
#[derive(Clone)]
pub struct FrameScheduler {
    inner: Rc<RefCell<SchedulerInner>>,
}

/// Non-owning handle, for callbacks that need to reach their own scheduler.
#[derive(Clone)]
pub struct WeakFrameScheduler {
    inner: Weak<RefCell<SchedulerInner>>,
}

impl WeakFrameScheduler {
    pub fn upgrade(&self) -> Option<FrameScheduler> {
        self.inner.upgrade().map(|inner| FrameScheduler { inner })
    }
}

impl FrameScheduler {
    /// Create a stopped scheduler around `refresh`.
    pub fn new(refresh: Rc<dyn RefreshSignal>) -> Self {
        FrameScheduler {
            inner: Rc::new(RefCell::new(SchedulerInner {
                refresh,
                entries: Vec::new(),
                running: false,
                pending: None,
                last_timestamp_ms: None,
                frame_count: 0,
            })),
        }
    }

    pub fn downgrade(&self) -> WeakFrameScheduler {
        WeakFrameScheduler {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Begin the refresh loop. No-op if already running.
    pub fn start(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.running {
            trace!("frame scheduler already running");
            return;
        }
        inner.running = true;
        let token = inner.refresh.request();
        inner.pending = Some(token);
        debug!("frame scheduler started, awaiting {}", token);
    }

    /// Cancel the pending refresh. No-op if stopped.
    pub fn stop(&self) {
        let mut inner = self.inner.borrow_mut();
        if !inner.running {
            return;
        }
        inner.running = false;
        inner.last_timestamp_ms = None;
        if let Some(token) = inner.pending.take() {
            inner.refresh.cancel(token);
        }
        debug!("frame scheduler stopped");
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().running
    }

    /// Register `callback` under a freshly generated identifier.
    pub fn add<F>(&self, callback: F) -> CallbackId
    where
        F: FnMut(&FrameContext) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let mut id = CallbackId::generate();
        while inner.entries.iter().any(|e| e.id == id) {
            id = CallbackId::generate();
        }
        inner.entries.push(Entry {
            id: id.clone(),
            callback: Rc::new(RefCell::new(callback)),
        });
        trace!("frame callback {} registered", id);
        id
    }

    /// Register `callback` under a caller-chosen identifier.
    ///
    /// An already registered identifier has its callback replaced in place,
    /// keeping its position in the invocation order.
    pub fn add_with_id<F>(&self, id: impl Into<CallbackId>, callback: F) -> CallbackId
    where
        F: FnMut(&FrameContext) + 'static,
    {
        let id = id.into();
        let callback: SharedCallback = Rc::new(RefCell::new(callback));
        let mut inner = self.inner.borrow_mut();
        if let Some(entry) = inner.entries.iter_mut().find(|e| e.id == id) {
            warn!("frame callback {} already registered, replacing it", id);
            entry.callback = callback;
        } else {
            inner.entries.push(Entry {
                id: id.clone(),
                callback,
            });
            trace!("frame callback {} registered", id);
        }
        id
    }

    /// Remove every callback registered under `id`. No-op if absent.
    pub fn remove(&self, id: &CallbackId) {
        let mut inner = self.inner.borrow_mut();
        let before = inner.entries.len();
        inner.entries.retain(|e| &e.id != id);
        if inner.entries.len() != before {
            trace!("frame callback {} removed", id);
        }
    }

    pub fn contains(&self, id: &CallbackId) -> bool {
        self.inner.borrow().entries.iter().any(|e| &e.id == id)
    }

    /// Number of registered callbacks.
    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().entries.is_empty()
    }

    /// Number of refreshes served since creation.
    pub fn frame_count(&self) -> u64 {
        self.inner.borrow().frame_count
    }

    /// Serve the refresh identified by `token`.
    ///
    /// Ignored while stopped or when `token` is not the pending request.
    /// Returns `true` if a batch ran.
    pub fn on_refresh(&self, token: FrameToken, timestamp_ms: f64) -> bool {
        let (batch, delta, frame) = {
            let mut inner = self.inner.borrow_mut();
            if !inner.running || inner.pending != Some(token) {
                trace!("ignoring stale refresh {}", token);
                return false;
            }
            inner.pending = None;
            let delta = inner
                .last_timestamp_ms
                .map(|last| ((timestamp_ms - last) / 1000.0).max(0.0) as f32)
                .unwrap_or(0.0);
            inner.last_timestamp_ms = Some(timestamp_ms);
            inner.frame_count += 1;
            let batch: Vec<(CallbackId, SharedCallback)> = inner
                .entries
                .iter()
                .map(|e| (e.id.clone(), Rc::clone(&e.callback)))
                .collect();
            (batch, delta, inner.frame_count)
        };

        for (callback_id, callback) in batch {
            let ctx = FrameContext {
                callback_id,
                token,
                timestamp_ms,
                delta,
                frame,
            };
            match callback.try_borrow_mut() {
                Ok(mut invoke) => (&mut *invoke)(&ctx),
                Err(_) => warn!(
                    "frame callback {} is already running, skipping re-entrant call",
                    ctx.callback_id
                ),
            }
        }

        let mut inner = self.inner.borrow_mut();
        if inner.running && inner.pending.is_none() {
            let next = inner.refresh.request();
            inner.pending = Some(next);
        }
        true
    }
}

impl fmt::Debug for FrameScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("FrameScheduler")
            .field("callbacks", &inner.entries.len())
            .field("running", &inner.running)
            .field("pending", &inner.pending)
            .field("frame_count", &inner.frame_count)
            .finish()
    }
}
