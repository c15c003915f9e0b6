//! Host systems driving the gallery scene.
//!
//! Run chained, once per host frame:
//! 1. [`scripted_pointer_system`] – synthesize pointer input for this frame
//! 2. [`update_pointer_messages`] – advance the message queue
//! 3. [`dispatch_pointer_system`] – route messages to the ring or the hub
//! 4. [`refresh_system`] – fire the refresh signal (runs frame callbacks),
//!    then enable ring hover once the intro has finished
//! 5. [`report_system`] – log the published values once per second

use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::vector2::Vector2;
use crate::events::pointer::{PointerEvent, PointerKind, PointerMessage};
use crate::game::{GalleryScene, RING, WINDOW, ring_item_element, slide_element};
use crate::resources::galleryconfig::GalleryConfig;
use crate::resources::worldtime::WorldTime;

/// Length of one scripted interaction cycle, in seconds.
pub const SCRIPT_PERIOD: f32 = 4.0;
const HOVER_END: f32 = 2.0;
const DRAG_START: f32 = 2.2;
const DRAG_END: f32 = 3.6;
const ITEM_HOVER_START: f32 = 3.7;
const ITEM_HOVER_END: f32 = 3.9;
/// Horizontal drag speed, pixels per second (leftwards).
const DRAG_SPEED: f32 = 200.0;

/// Pointer input for the frame ending at `elapsed`.
///
/// Each cycle hovers across one slide (tilt), leaves it, drags the ring
/// leftwards across the window, then briefly enters one ring item. Slides and
/// items are visited in turn.
pub fn scripted_events(
    elapsed: f32,
    delta: f32,
    view: Vector2,
    slide_count: usize,
) -> Vec<PointerMessage> {
    let mut out = Vec::new();
    let t = elapsed % SCRIPT_PERIOD;
    let prev = t - delta;
    let cycle = (elapsed / SCRIPT_PERIOD) as usize;

    if slide_count > 0 {
        let slide = slide_element(cycle % slide_count);
        if t < HOVER_END {
            let progress = t / HOVER_END;
            let position = Vector2::new(progress * view.x, (0.25 + progress * 0.5) * view.y);
            out.push(PointerMessage {
                target: slide,
                event: PointerEvent::moved(position, view),
            });
        } else if prev < HOVER_END {
            out.push(PointerMessage {
                target: slide,
                event: PointerEvent::leave(),
            });
        }
    }

    let start_x = view.x * 0.5;
    if prev < DRAG_START && t >= DRAG_START {
        out.push(PointerMessage {
            target: WINDOW,
            event: PointerEvent::down(Vector2::new(start_x, view.y * 0.5)),
        });
    } else if t > DRAG_START && t < DRAG_END {
        let x = start_x - (t - DRAG_START) * DRAG_SPEED;
        out.push(PointerMessage {
            target: WINDOW,
            event: PointerEvent::new(PointerKind::Move, Vector2::new(x, view.y * 0.5), view),
        });
    } else if prev < DRAG_END && t >= DRAG_END {
        out.push(PointerMessage {
            target: WINDOW,
            event: PointerEvent::up(),
        });
    }

    if slide_count > 0 {
        let item = ring_item_element(cycle % slide_count);
        if prev < ITEM_HOVER_START && t >= ITEM_HOVER_START {
            out.push(PointerMessage {
                target: item,
                event: PointerEvent::enter(),
            });
        } else if prev < ITEM_HOVER_END && t >= ITEM_HOVER_END {
            out.push(PointerMessage {
                target: item,
                event: PointerEvent::leave(),
            });
        }
    }
    out
}

/// Write this frame's scripted pointer messages.
pub fn scripted_pointer_system(
    time: Res<WorldTime>,
    config: Res<GalleryConfig>,
    scene: NonSend<GalleryScene>,
    mut writer: MessageWriter<PointerMessage>,
) {
    let (w, h) = config.view_size();
    let view = Vector2::new(w as f32, h as f32);
    writer.write_batch(scripted_events(time.elapsed, time.delta, view, scene.slides.len()));
}

/// Advance the pointer message queue so this frame's writes are readable.
pub fn update_pointer_messages(mut msgs: ResMut<Messages<PointerMessage>>) {
    msgs.update();
}

/// Deliver pointer messages: window-level ones drive the ring drag, ring
/// items drive hover, the rest go to the element subscribers.
pub fn dispatch_pointer_system(
    mut reader: MessageReader<PointerMessage>,
    mut scene: NonSendMut<GalleryScene>,
) {
    for msg in reader.read() {
        if msg.target == WINDOW {
            scene.ring.handle_pointer(&msg.event);
        } else if !scene.ring.handle_item_pointer(msg.target, &msg.event) {
            let handled = scene.hub.dispatch(msg.target, &msg.event);
            if handled == 0 {
                debug!("pointer {:?} on {} had no subscriber", msg.event.kind, msg.target);
            }
        }
    }
}

/// Fire the pending refresh at the current host time.
pub fn refresh_system(time: Res<WorldTime>, mut scene: NonSendMut<GalleryScene>) {
    scene.refresh.fire(&scene.scheduler, time.elapsed_ms());
    if !scene.ring.hover_enabled() && !scene.intro_running() {
        scene.ring.enable_hover();
    }
}

/// Log a summary of the published values once per simulated second.
pub fn report_system(
    time: Res<WorldTime>,
    config: Res<GalleryConfig>,
    scene: NonSend<GalleryScene>,
) {
    if time.frame_count % config.target_fps.max(1) as u64 != 0 {
        return;
    }
    let slide = slide_element(0);
    info!(
        "t={:.1}s ring={} item0 bg={} slide0 rotX={} rotY={} intro={}",
        time.elapsed,
        scene.sink.get(RING, "--rotationY").unwrap_or_default(),
        scene
            .sink
            .get(ring_item_element(0), "background-position")
            .unwrap_or_default(),
        scene.sink.get(slide, "--rotX").unwrap_or_default(),
        scene.sink.get(slide, "--rotY").unwrap_or_default(),
        if scene.intro_running() { "running" } else { "done" }
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Vector2 = Vector2 { x: 800.0, y: 600.0 };

    fn kinds(events: &[PointerMessage]) -> Vec<PointerKind> {
        events.iter().map(|m| m.event.kind).collect()
    }

    #[test]
    fn test_hover_phase_moves_over_slide() {
        let events = scripted_events(1.0, 0.1, VIEW, 3);
        assert_eq!(kinds(&events), vec![PointerKind::Move]);
        assert_eq!(events[0].target, slide_element(0));
        assert_eq!(events[0].event.position.x, 400.0);
    }

    #[test]
    fn test_leave_fires_once_at_hover_end() {
        let events = scripted_events(2.05, 0.1, VIEW, 3);
        assert_eq!(kinds(&events), vec![PointerKind::Leave]);
        let events = scripted_events(2.15, 0.1, VIEW, 3);
        assert!(events.is_empty());
    }

    #[test]
    fn test_drag_goes_down_move_up_on_window() {
        let down = scripted_events(2.25, 0.1, VIEW, 3);
        assert_eq!(kinds(&down), vec![PointerKind::Down]);
        assert_eq!(down[0].target, WINDOW);
        let mid = scripted_events(3.0, 0.1, VIEW, 3);
        assert_eq!(kinds(&mid), vec![PointerKind::Move]);
        assert!(mid[0].event.position.x < 400.0);
        let up = scripted_events(3.65, 0.1, VIEW, 3);
        assert_eq!(kinds(&up), vec![PointerKind::Up]);
    }

    #[test]
    fn test_item_hover_enters_then_leaves() {
        let enter = scripted_events(3.75, 0.1, VIEW, 3);
        assert_eq!(kinds(&enter), vec![PointerKind::Enter]);
        assert_eq!(enter[0].target, ring_item_element(0));
        assert!(scripted_events(3.85, 0.1, VIEW, 3).is_empty());
        let leave = scripted_events(SCRIPT_PERIOD + 3.95, 0.1, VIEW, 3);
        assert_eq!(kinds(&leave), vec![PointerKind::Leave]);
        assert_eq!(leave[0].target, ring_item_element(1));
    }

    #[test]
    fn test_cycles_visit_next_slide() {
        let events = scripted_events(SCRIPT_PERIOD + 0.5, 0.1, VIEW, 3);
        assert_eq!(events[0].target, slide_element(1));
    }

    #[test]
    fn test_no_slides_only_drags() {
        assert!(scripted_events(1.0, 0.1, VIEW, 0).is_empty());
    }
}
