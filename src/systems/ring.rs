//! Drag-rotation ring behavior.
//!
//! Items sit on a ring, `spacing` degrees apart. Dragging horizontally turns
//! the ring: each pixel of pointer travel is one degree, subtracted from the
//! ring angle. Every item's background is scrolled so that its image appears
//! to stay fixed in space while the ring turns:
//!
//! ```text
//! bg_x = offset - wrap(0, 360, angle - 180 - i * spacing) / 360 * 100
//! ```
//!
//! Once hover is enabled (after the entrance intro), entering an item dims
//! every other item to half opacity; leaving it restores them all.
//!
//! Published properties:
//! - ring: `--rotationY` (degrees, unwrapped), `cursor` (`grab`/`grabbing`)
//! - items: `--rotateY` (fixed placement), `background-position`, `opacity`

use std::rc::Rc;

use log::{debug, trace};

use crate::components::element::ElementId;
use crate::components::ring::{RingSettings, RingState};
use crate::events::pointer::{PointerEvent, PointerKind};
use crate::resources::visualsink::SharedSink;
use crate::systems::tween::{round_half_up, wrap};

/// Angle between the ring's rotation origin and the item facing the viewer.
pub const FACING_ANGLE: f64 = 180.0;
/// Opacity of the items not under the pointer while one is hovered.
pub const DIMMED_OPACITY: f32 = 0.5;

/// Horizontal background offset, in percent, of item `index`.
///
/// The angle is reduced in `f64` before narrowing, so a ring dragged far
/// from its start keeps sub-degree precision.
pub fn background_offset_x(angle: f64, index: usize, spacing: f32, offset: f32) -> f32 {
    let reduced = (angle - FACING_ANGLE - index as f64 * spacing as f64) % 360.0;
    let local = wrap(0.0, 360.0, reduced as f32);
    offset - local / 360.0 * 100.0
}

/// Live ring attachment returned by [`attach_ring`].
pub struct RingHandle {
    sink: SharedSink,
    ring: ElementId,
    items: Vec<ElementId>,
    spacing: Option<f32>,
    settings: RingSettings,
    state: RingState,
    hover_enabled: bool,
    hovered: Option<usize>,
}

impl RingHandle {
    pub fn state(&self) -> RingState {
        self.state
    }

    pub fn items(&self) -> &[ElementId] {
        &self.items
    }

    /// Degrees between neighbouring items, `None` for an empty ring.
    pub fn spacing(&self) -> Option<f32> {
        self.spacing
    }

    /// Item currently under the pointer, if hover is enabled.
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn hover_enabled(&self) -> bool {
        self.hover_enabled
    }

    /// Start reacting to item enter/leave. Until then both are ignored.
    pub fn enable_hover(&mut self) {
        if !self.hover_enabled {
            self.hover_enabled = true;
            debug!("ring {} hover enabled", self.ring);
        }
    }

    /// Index of `element` among the ring items.
    pub fn item_index(&self, element: ElementId) -> Option<usize> {
        self.items.iter().position(|&item| item == element)
    }

    /// Pointer entered item `index`: it stays opaque, the others dim.
    pub fn on_item_enter(&mut self, index: usize) {
        if !self.hover_enabled || index >= self.items.len() {
            return;
        }
        self.hovered = Some(index);
        for (i, &item) in self.items.iter().enumerate() {
            let opacity = if i == index { 1.0 } else { DIMMED_OPACITY };
            self.sink
                .set_property(item, "opacity", &format!("{:.3}", opacity));
        }
    }

    /// Pointer left the hovered item: every item returns to full opacity.
    pub fn on_item_leave(&mut self) {
        if !self.hover_enabled {
            return;
        }
        self.hovered = None;
        for &item in &self.items {
            self.sink.set_property(item, "opacity", &format!("{:.3}", 1.0));
        }
    }

    /// Map a pointer event on one of the ring items onto hover.
    /// Returns `false` if `element` is not a ring item.
    pub fn handle_item_pointer(&mut self, element: ElementId, event: &PointerEvent) -> bool {
        let Some(index) = self.item_index(element) else {
            return false;
        };
        match event.kind {
            PointerKind::Enter => self.on_item_enter(index),
            PointerKind::Leave => self.on_item_leave(),
            PointerKind::Down | PointerKind::Move | PointerKind::Up => {}
        }
        true
    }

    /// Current background x offset of item `index`, if it exists.
    pub fn item_background_x(&self, index: usize) -> Option<f32> {
        let spacing = self.spacing?;
        if index >= self.items.len() {
            return None;
        }
        Some(background_offset_x(
            self.state.current_angle,
            index,
            spacing,
            self.settings.offset,
        ))
    }

    /// Begin a drag gesture at pointer x `x`.
    pub fn on_drag_start(&mut self, x: f32) {
        self.state.last_pointer_x = round_half_up(x);
        self.state.dragging = true;
        self.sink.set_property(self.ring, "cursor", "grabbing");
        trace!("ring {} drag start at {}", self.ring, self.state.last_pointer_x);
    }

    /// Follow the pointer to `x`. Ignored unless a drag is in progress.
    pub fn on_drag_move(&mut self, x: f32) {
        if !self.state.dragging {
            return;
        }
        let x = round_half_up(x);
        let delta = x - self.state.last_pointer_x;
        self.state.current_angle -= (delta % 360.0) as f64;
        self.state.last_pointer_x = x;
        self.publish_rotation();
        self.publish_backgrounds();
    }

    /// End the drag gesture. The angle is kept for the next one.
    pub fn on_drag_end(&mut self) {
        if !self.state.dragging {
            return;
        }
        self.state.dragging = false;
        self.sink.set_property(self.ring, "cursor", "grab");
        trace!(
            "ring {} drag end at {:.2} deg",
            self.ring, self.state.current_angle
        );
    }

    /// Map a window-level pointer event onto the drag operations.
    pub fn handle_pointer(&mut self, event: &PointerEvent) {
        match event.kind {
            PointerKind::Down => self.on_drag_start(event.position.x),
            PointerKind::Move => self.on_drag_move(event.position.x),
            PointerKind::Up => self.on_drag_end(),
            PointerKind::Enter | PointerKind::Leave => {}
        }
    }

    fn publish_rotation(&self) {
        self.sink.set_property(
            self.ring,
            "--rotationY",
            &format!("{:.2}deg", self.state.current_angle),
        );
    }

    fn publish_backgrounds(&self) {
        for index in 0..self.items.len() {
            if let Some(bg_x) = self.item_background_x(index) {
                self.sink.set_property(
                    self.items[index],
                    "background-position",
                    &format!("{:.2}% {:.2}%", bg_x, self.settings.background_y),
                );
            }
        }
    }

    fn publish_placement(&self) {
        let Some(spacing) = self.spacing else {
            return;
        };
        for (index, &item) in self.items.iter().enumerate() {
            let rotate = -(index as f32) * spacing;
            self.sink
                .set_property(item, "--rotateY", &format!("{:.2}deg", rotate));
        }
    }
}

/// Attach drag rotation to `ring` and its `items`.
///
/// Publishes the initial placement, rotation, cursor and backgrounds
/// immediately. An empty `items` slice still tracks the angle but publishes
/// nothing per item.
pub fn attach_ring(
    sink: &SharedSink,
    ring: ElementId,
    items: &[ElementId],
    settings: RingSettings,
) -> RingHandle {
    let spacing = settings.spacing_for(items.len());
    let handle = RingHandle {
        sink: Rc::clone(sink),
        ring,
        items: items.to_vec(),
        spacing,
        settings,
        state: RingState::new(settings.initial_angle as f64),
        hover_enabled: false,
        hovered: None,
    };
    handle.sink.set_property(ring, "cursor", "grab");
    handle.publish_rotation();
    handle.publish_placement();
    handle.publish_backgrounds();
    debug!(
        "ring {} attached with {} items, spacing {:?}, offset {}",
        ring,
        items.len(),
        spacing,
        settings.offset
    );
    handle
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::vector2::Vector2;
    use crate::resources::visualsink::RecordingSink;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn angle_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON as f64
    }

    fn items(n: u32) -> Vec<ElementId> {
        (0..n).map(|i| ElementId(100 + i)).collect()
    }

    fn ring_at(angle: f32, n: u32) -> (RingHandle, Rc<RecordingSink>) {
        let recorder = Rc::new(RecordingSink::new());
        let sink: SharedSink = recorder.clone();
        let handle = attach_ring(
            &sink,
            ElementId(1),
            &items(n),
            RingSettings::default().with_initial_angle(angle),
        );
        (handle, recorder)
    }

    #[test]
    fn test_background_offset_formula() {
        // item 0 at angle 0: wrap(-180) = 180 -> 50 - 50
        assert!(approx_eq(background_offset_x(0.0, 0, 36.0, 50.0), 0.0));
        // facing item sits at the offset itself
        assert!(approx_eq(background_offset_x(180.0, 0, 36.0, 50.0), 50.0));
        assert!(approx_eq(background_offset_x(180.0, 0, 36.0, 88.0), 88.0));
        // item 1: wrap(-36) = 324 -> 50 - 90
        assert!(approx_eq(background_offset_x(180.0, 1, 36.0, 50.0), -40.0));
    }

    #[test]
    fn test_drag_of_36_pixels_moves_background_ten_percent() {
        let (mut ring, _) = ring_at(0.0, 10);
        let before = ring.item_background_x(0).unwrap();
        ring.on_drag_start(0.0);
        ring.on_drag_move(36.0);
        assert!(angle_eq(ring.state().current_angle, -36.0));
        let after = ring.item_background_x(0).unwrap();
        assert!(approx_eq((after - before).abs(), 10.0));
    }

    #[test]
    fn test_angle_accumulates_without_wrapping() {
        let (mut ring, _) = ring_at(0.0, 10);
        ring.on_drag_start(0.0);
        for step in 1..=10 {
            ring.on_drag_move(step as f32 * 100.0);
        }
        assert!(angle_eq(ring.state().current_angle, -1000.0));
        let bg = ring.item_background_x(3).unwrap();
        assert!(bg <= 50.0 && bg > -50.0);
    }

    #[test]
    fn test_large_single_delta_is_reduced_mod_360() {
        let (mut ring, _) = ring_at(0.0, 10);
        ring.on_drag_start(0.0);
        ring.on_drag_move(400.0);
        assert!(angle_eq(ring.state().current_angle, -40.0));
        ring.on_drag_move(-400.0);
        // delta -800 -> -80
        assert!(angle_eq(ring.state().current_angle, 40.0));
    }

    #[test]
    fn test_move_without_drag_is_ignored() {
        let (mut ring, _) = ring_at(180.0, 10);
        ring.on_drag_move(50.0);
        assert!(angle_eq(ring.state().current_angle, 180.0));
        ring.on_drag_start(0.0);
        ring.on_drag_end();
        ring.on_drag_move(50.0);
        assert!(angle_eq(ring.state().current_angle, 180.0));
    }

    #[test]
    fn test_pointer_coordinates_are_rounded() {
        let (mut ring, _) = ring_at(0.0, 10);
        ring.on_drag_start(10.4);
        assert_eq!(ring.state().last_pointer_x, 10.0);
        ring.on_drag_move(12.5);
        assert_eq!(ring.state().last_pointer_x, 13.0);
        assert!(angle_eq(ring.state().current_angle, -3.0));
    }

    #[test]
    fn test_attach_publishes_placement_and_backgrounds() {
        let (_ring, recorder) = ring_at(180.0, 10);
        assert_eq!(
            recorder.get(ElementId(101), "--rotateY").as_deref(),
            Some("-36.00deg")
        );
        assert_eq!(
            recorder.get(ElementId(100), "background-position").as_deref(),
            Some("50.00% 50.00%")
        );
        assert_eq!(recorder.get(ElementId(1), "cursor").as_deref(), Some("grab"));
        assert_eq!(
            recorder.get(ElementId(1), "--rotationY").as_deref(),
            Some("180.00deg")
        );
    }

    #[test]
    fn test_cursor_follows_gesture() {
        let (mut ring, recorder) = ring_at(180.0, 10);
        ring.on_drag_start(5.0);
        assert_eq!(
            recorder.get(ElementId(1), "cursor").as_deref(),
            Some("grabbing")
        );
        ring.on_drag_end();
        assert_eq!(recorder.get(ElementId(1), "cursor").as_deref(), Some("grab"));
    }

    #[test]
    fn test_handle_pointer_maps_touch_and_mouse() {
        use crate::events::pointer::PointerDevice;
        let (mut ring, _) = ring_at(0.0, 4);
        ring.handle_pointer(&PointerEvent::down(Vector2::new(100.0, 0.0)).with_device(PointerDevice::Touch));
        ring.handle_pointer(&PointerEvent::moved(Vector2::new(90.0, 0.0), Vector2::ZERO));
        ring.handle_pointer(&PointerEvent::up());
        assert!(angle_eq(ring.state().current_angle, 10.0));
        assert!(!ring.state().dragging);
    }

    #[test]
    fn test_empty_ring_publishes_nothing_per_item() {
        let recorder = Rc::new(RecordingSink::new());
        let sink: SharedSink = recorder.clone();
        let mut ring = attach_ring(&sink, ElementId(1), &[], RingSettings::default());
        ring.on_drag_start(0.0);
        ring.on_drag_move(20.0);
        assert_eq!(ring.spacing(), None);
        assert_eq!(ring.item_background_x(0), None);
        assert!(angle_eq(ring.state().current_angle, 160.0));
        // only the ring element itself was written to
        assert!(recorder.has_element(ElementId(1)));
        assert!(!recorder.has_element(ElementId(100)));
    }

    #[test]
    fn test_offset_is_configurable() {
        let recorder = Rc::new(RecordingSink::new());
        let sink: SharedSink = recorder.clone();
        let ring = attach_ring(
            &sink,
            ElementId(1),
            &items(10),
            RingSettings::default().with_offset(88.0),
        );
        assert!(approx_eq(ring.item_background_x(0).unwrap(), 88.0));
    }

    #[test]
    fn test_far_dragged_ring_keeps_unit_steps() {
        let (mut ring, _) = ring_at(20_000_000.0, 10);
        ring.on_drag_start(0.0);
        ring.on_drag_move(1.0);
        assert_eq!(ring.state().current_angle, 19_999_999.0);
        ring.on_drag_move(2.0);
        assert_eq!(ring.state().current_angle, 19_999_998.0);
        // 19_999_998 - 180 = 55_555 turns + 18 deg -> 50 - 5
        assert!(approx_eq(ring.item_background_x(0).unwrap(), 45.0));
    }

    #[test]
    fn test_hover_dims_other_items() {
        let (mut ring, recorder) = ring_at(180.0, 4);
        ring.enable_hover();
        ring.on_item_enter(2);
        assert_eq!(ring.hovered(), Some(2));
        assert_eq!(recorder.get(ElementId(102), "opacity").as_deref(), Some("1.000"));
        for i in [0, 1, 3] {
            assert_eq!(
                recorder.get(ElementId(100 + i), "opacity").as_deref(),
                Some("0.500")
            );
        }

        ring.on_item_leave();
        assert_eq!(ring.hovered(), None);
        for i in 0..4 {
            assert_eq!(
                recorder.get(ElementId(100 + i), "opacity").as_deref(),
                Some("1.000")
            );
        }
    }

    #[test]
    fn test_hover_is_ignored_until_enabled() {
        let (mut ring, recorder) = ring_at(180.0, 4);
        ring.on_item_enter(2);
        ring.on_item_leave();
        assert_eq!(ring.hovered(), None);
        assert_eq!(recorder.get(ElementId(100), "opacity"), None);
        assert_eq!(recorder.get(ElementId(102), "opacity"), None);
    }

    #[test]
    fn test_hover_out_of_range_is_ignored() {
        let (mut ring, recorder) = ring_at(180.0, 4);
        ring.enable_hover();
        ring.on_item_enter(4);
        assert_eq!(ring.hovered(), None);
        assert_eq!(recorder.get(ElementId(100), "opacity"), None);
    }

    #[test]
    fn test_item_pointer_routes_enter_and_leave() {
        let (mut ring, recorder) = ring_at(180.0, 3);
        ring.enable_hover();
        assert!(ring.handle_item_pointer(ElementId(101), &PointerEvent::enter()));
        assert_eq!(recorder.get(ElementId(100), "opacity").as_deref(), Some("0.500"));
        assert!(ring.handle_item_pointer(ElementId(101), &PointerEvent::leave()));
        assert_eq!(recorder.get(ElementId(100), "opacity").as_deref(), Some("1.000"));
        assert!(!ring.handle_item_pointer(ElementId(7), &PointerEvent::enter()));
    }
}
