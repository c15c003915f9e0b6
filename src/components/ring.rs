//! Drag-rotation ring state.
//!
//! The ring angle accumulates without bound across drags. It is only wrapped
//! when a per-item background offset is computed, see
//! [`background_offset_x`](crate::systems::ring::background_offset_x).

/// Background-position centering constant used by the full-ring gallery.
pub const DEFAULT_RING_OFFSET: f32 = 50.0;
/// Starting rotation of the ring, facing item 0 toward the viewer.
pub const DEFAULT_INITIAL_ANGLE: f32 = 180.0;
/// Vertical background position of every item, in percent.
pub const DEFAULT_BACKGROUND_Y: f32 = 50.0;

/// Tunables of a ring instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingSettings {
    /// Horizontal centering constant of the background offset, in percent.
    pub offset: f32,
    /// Degrees between neighbouring items. `None` spreads items evenly.
    pub item_spacing: Option<f32>,
    pub initial_angle: f32,
    pub background_y: f32,
}

impl Default for RingSettings {
    fn default() -> Self {
        RingSettings {
            offset: DEFAULT_RING_OFFSET,
            item_spacing: None,
            initial_angle: DEFAULT_INITIAL_ANGLE,
            background_y: DEFAULT_BACKGROUND_Y,
        }
    }
}

impl RingSettings {
    pub fn with_offset(mut self, offset: f32) -> Self {
        self.offset = offset;
        self
    }
    pub fn with_item_spacing(mut self, spacing: f32) -> Self {
        self.item_spacing = Some(spacing);
        self
    }
    pub fn with_initial_angle(mut self, angle: f32) -> Self {
        self.initial_angle = angle;
        self
    }

    /// Spacing in degrees for a ring of `count` items.
    ///
    /// Non-positive or non-finite configured spacings fall back to an even
    /// spread. Returns `None` for an empty ring.
    pub fn spacing_for(&self, count: usize) -> Option<f32> {
        if count == 0 {
            return None;
        }
        match self.item_spacing {
            Some(s) if s.is_finite() && s > 0.0 => Some(s),
            _ => Some(360.0 / count as f32),
        }
    }
}

/// Rotation state shared by a ring's drag handlers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingState {
    /// Cumulative ring rotation in degrees. Never wrapped.
    pub current_angle: f64,
    /// Rounded pointer x of the last drag sample.
    pub last_pointer_x: f32,
    /// Whether a drag gesture is in progress.
    pub dragging: bool,
}

impl RingState {
    pub fn new(initial_angle: f64) -> Self {
        RingState {
            current_angle: initial_angle,
            last_pointer_x: 0.0,
            dragging: false,
        }
    }
}
