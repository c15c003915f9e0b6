//! Pointer input events.
//!
//! Mouse and touch input is reduced to a [`PointerEvent`]: what happened
//! ([`PointerKind`]), where (relative to the element the handler is bound
//! to, or to the window for window-level drags), and how big that reference
//! element is. [`PointerMessage`] carries an event addressed to an element
//! through the ECS message queue of the headless host.

use bevy_ecs::message::Message;

use crate::components::element::ElementId;
use crate::components::vector2::Vector2;

/// Phase of a pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// Button pressed or touch started.
    Down,
    /// Pointer moved.
    Move,
    /// Button released or touch ended.
    Up,
    /// Pointer entered the element.
    Enter,
    /// Pointer left the element.
    Leave,
}

/// Device that produced the event. Touch events use the first touch point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerDevice {
    #[default]
    Mouse,
    Touch,
}

/// A single pointer sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub device: PointerDevice,
    /// Position relative to the reference element.
    pub position: Vector2,
    /// Width and height of the reference element.
    pub size: Vector2,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, position: Vector2, size: Vector2) -> Self {
        PointerEvent {
            kind,
            device: PointerDevice::Mouse,
            position,
            size,
        }
    }

    pub fn moved(position: Vector2, size: Vector2) -> Self {
        Self::new(PointerKind::Move, position, size)
    }

    pub fn enter() -> Self {
        Self::new(PointerKind::Enter, Vector2::ZERO, Vector2::ZERO)
    }

    pub fn leave() -> Self {
        Self::new(PointerKind::Leave, Vector2::ZERO, Vector2::ZERO)
    }

    pub fn down(position: Vector2) -> Self {
        Self::new(PointerKind::Down, position, Vector2::ZERO)
    }

    pub fn up() -> Self {
        Self::new(PointerKind::Up, Vector2::ZERO, Vector2::ZERO)
    }

    pub fn with_device(mut self, device: PointerDevice) -> Self {
        self.device = device;
        self
    }
}

/// Pointer event addressed to an element, queued for the next frame.
#[derive(Message, Debug, Clone, Copy)]
pub struct PointerMessage {
    pub target: ElementId,
    pub event: PointerEvent,
}
