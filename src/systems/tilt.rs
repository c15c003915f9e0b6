//! Pointer tilt behavior.
//!
//! [`attach_tilt`] wires a [`TiltState`] to three collaborators:
//! - pointer input on the trigger element sets the targets,
//! - a frame callback eases the state every refresh,
//! - the visual sink receives `--rotX`, `--rotY`, `--bgPosX`, `--bgPosY` on
//!   every target element.
//!
//! The returned [`TiltHandle`] undoes both registrations on
//! [`TiltHandle::detach`].

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use smallvec::{SmallVec, smallvec};

use crate::components::element::ElementId;
use crate::components::tilt::{TiltOptions, TiltState};
use crate::events::pointer::{PointerEvent, PointerKind};
use crate::resources::framescheduler::{CallbackId, FrameScheduler};
use crate::resources::pointerinput::{SharedInput, SubscriptionId};
use crate::resources::visualsink::{SharedSink, VisualSink};

/// Live tilt attachment.
pub struct TiltHandle {
    scheduler: FrameScheduler,
    input: SharedInput,
    subscription: SubscriptionId,
    callback_id: CallbackId,
    trigger: ElementId,
    state: Rc<RefCell<TiltState>>,
}

impl TiltHandle {
    /// Snapshot of the current tilt state.
    pub fn state(&self) -> TiltState {
        *self.state.borrow()
    }

    /// Scheduler callback driving this tilt.
    pub fn callback_id(&self) -> &CallbackId {
        &self.callback_id
    }

    pub fn trigger(&self) -> ElementId {
        self.trigger
    }

    /// Stop listening to the trigger and unregister the frame callback.
    pub fn detach(self) {
        self.input.unsubscribe(self.subscription);
        self.scheduler.remove(&self.callback_id);
        debug!("tilt on {} detached", self.trigger);
    }
}

/// Route one pointer event into the tilt state.
fn handle_pointer(state: &mut TiltState, event: &PointerEvent) {
    match event.kind {
        PointerKind::Move => state.point_at(event.position, event.size),
        PointerKind::Leave => state.release(),
        PointerKind::Down | PointerKind::Up | PointerKind::Enter => {}
    }
}

/// Write the state's four properties to every target.
fn publish(sink: &dyn VisualSink, targets: &[ElementId], state: &TiltState) {
    let props = state.properties();
    for &target in targets {
        for (name, value) in &props {
            sink.set_property(target, name, value);
        }
    }
}

/// Attach the tilt effect to `node`.
///
/// Pointer events are read from `options.trigger` (default `node`) and the
/// eased values are published to `options.targets` (default `[node]`).
pub fn attach_tilt(
    scheduler: &FrameScheduler,
    input: &SharedInput,
    sink: &SharedSink,
    node: ElementId,
    options: TiltOptions,
) -> TiltHandle {
    let trigger = options.trigger.unwrap_or(node);
    let targets: SmallVec<[ElementId; 2]> = options.targets.unwrap_or_else(|| smallvec![node]);
    if targets.is_empty() {
        debug!("tilt on {} has no targets, nothing will be published", node);
    }

    let state = Rc::new(RefCell::new(TiltState::new(options.settings)));

    let handler_state = Rc::clone(&state);
    let subscription = input.subscribe(
        trigger,
        Box::new(move |event| handle_pointer(&mut handler_state.borrow_mut(), event)),
    );

    let tick_state = Rc::clone(&state);
    let tick_sink = Rc::clone(sink);
    let callback_id = scheduler.add(move |_ctx| {
        let mut state = tick_state.borrow_mut();
        state.step();
        publish(&*tick_sink, &targets, &state);
    });

    debug!(
        "tilt attached to {} (trigger {}, callback {})",
        node, trigger, callback_id
    );

    TiltHandle {
        scheduler: scheduler.clone(),
        input: Rc::clone(input),
        subscription,
        callback_id,
        trigger,
        state,
    }
}
