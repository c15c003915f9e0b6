//! Pointer tilt state.
//!
//! A [`TiltState`] eases a rotation vector and a background-offset vector
//! toward targets set by pointer input. It is advanced once per frame by the
//! tick callback that [`attach_tilt`](crate::systems::tilt::attach_tilt)
//! registers on the frame scheduler.

use std::f32::consts::PI;

use smallvec::SmallVec;

use super::element::ElementId;
use super::vector2::Vector2;

/// Horizontal sensitivity divisor.
pub const DEFAULT_SENSITIVITY_X: f32 = PI * 3.0;
/// Vertical sensitivity divisor.
pub const DEFAULT_SENSITIVITY_Y: f32 = PI * 4.0;
/// Fraction of the rotation applied, mirrored, to the background offset.
pub const DEFAULT_PARALLAX: f32 = 0.3;
/// Smoothing factor while the pointer hovers the trigger.
pub const DEFAULT_ACTIVE_SMOOTHING: f32 = 0.1;
/// Smoothing factor while returning to rest.
pub const DEFAULT_IDLE_SMOOTHING: f32 = 0.06;

/// Tunables of the tilt effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TiltSettings {
    pub sensitivity_x: f32,
    pub sensitivity_y: f32,
    pub parallax: f32,
    pub active_smoothing: f32,
    pub idle_smoothing: f32,
}

impl Default for TiltSettings {
    fn default() -> Self {
        TiltSettings {
            sensitivity_x: DEFAULT_SENSITIVITY_X,
            sensitivity_y: DEFAULT_SENSITIVITY_Y,
            parallax: DEFAULT_PARALLAX,
            active_smoothing: DEFAULT_ACTIVE_SMOOTHING,
            idle_smoothing: DEFAULT_IDLE_SMOOTHING,
        }
    }
}

/// Keep a smoothing factor strictly inside (0, 1).
pub fn clamp_smoothing(factor: f32) -> f32 {
    if factor.is_nan() {
        return DEFAULT_IDLE_SMOOTHING;
    }
    factor.clamp(f32::EPSILON, 1.0 - f32::EPSILON)
}

/// Which pointer elements drive the effect and which elements receive it.
#[derive(Clone, Debug, Default)]
pub struct TiltOptions {
    /// Element whose pointer events drive the tilt. Defaults to the node.
    pub trigger: Option<ElementId>,
    /// Elements receiving the published values. Defaults to `[node]`.
    /// An explicit empty set publishes nothing.
    pub targets: Option<SmallVec<[ElementId; 2]>>,
    pub settings: TiltSettings,
}

impl TiltOptions {
    pub fn with_trigger(mut self, trigger: ElementId) -> Self {
        self.trigger = Some(trigger);
        self
    }
    pub fn with_targets(mut self, targets: impl IntoIterator<Item = ElementId>) -> Self {
        self.targets = Some(targets.into_iter().collect());
        self
    }
    pub fn with_settings(mut self, settings: TiltSettings) -> Self {
        self.settings = settings;
        self
    }
}

/// Per-attachment tilt state.
#[derive(Clone, Copy, Debug)]
pub struct TiltState {
    /// Eased rotation in degrees (x drives `--rotY`, y drives `--rotX`).
    pub current: Vector2,
    /// Eased background offset in percent.
    pub current_bg: Vector2,
    pub target: Vector2,
    pub target_bg: Vector2,
    /// Smoothing factor in effect, switched between idle and active.
    pub smoothing: f32,
    pub settings: TiltSettings,
}

impl TiltState {
    pub fn new(settings: TiltSettings) -> Self {
        TiltState {
            current: Vector2::ZERO,
            current_bg: Vector2::ZERO,
            target: Vector2::ZERO,
            target_bg: Vector2::ZERO,
            smoothing: clamp_smoothing(settings.idle_smoothing),
            settings,
        }
    }

    /// Aim at the pointer `offset` inside an element of the given `size`.
    pub fn point_at(&mut self, offset: Vector2, size: Vector2) {
        self.smoothing = clamp_smoothing(self.settings.active_smoothing);

        let ox = (offset.x - size.x * 0.5) / self.settings.sensitivity_x;
        let oy = -(offset.y - size.y * 0.5) / self.settings.sensitivity_y;

        self.target.set(ox, oy);
        self.target_bg
            .set(-ox * self.settings.parallax, oy * self.settings.parallax);
    }

    /// Pointer left the trigger: head back to rest, slowly.
    pub fn release(&mut self) {
        self.smoothing = clamp_smoothing(self.settings.idle_smoothing);
        self.target = Vector2::ZERO;
        self.target_bg = Vector2::ZERO;
    }

    /// Advance one frame of exponential smoothing.
    pub fn step(&mut self) {
        self.current.lerp(self.target, self.smoothing);
        self.current_bg.lerp(self.target_bg, self.smoothing);
    }

    /// The four published values as `(name, value)` pairs.
    pub fn properties(&self) -> [(&'static str, String); 4] {
        [
            ("--rotX", format!("{:.2}deg", self.current.y)),
            ("--rotY", format!("{:.2}deg", self.current.x)),
            ("--bgPosX", format!("{:.2}%", self.current_bg.x)),
            ("--bgPosY", format!("{:.2}%", self.current_bg.y)),
        ]
    }
}
