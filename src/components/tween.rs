//! Easing curves and the ring intro animation settings.
//!
//! - [`Easing`] – curve applied to a normalized progress value
//! - [`IntroSettings`] – staggered rise-and-fade of ring items
//!
//! See [`crate::systems::tween`] for the math and [`crate::systems::intro`]
//! for the scheduler-driven intro.

/// Easing functions for smooth interpolation.
///
/// These functions transform a linear `t` value (0.0 to 1.0) to create
/// different acceleration/deceleration curves.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Easing {
    /// Constant speed (no easing).
    Linear,
    /// Starts slow, accelerates (quadratic).
    QuadIn,
    /// Starts fast, decelerates (quadratic).
    QuadOut,
    /// Slow start and end (quadratic).
    QuadInOut,
    /// Starts slow, accelerates (cubic).
    CubicIn,
    /// Starts fast, decelerates (cubic).
    CubicOut,
    /// Slow start and end (cubic).
    CubicInOut,
    /// Very fast start, long settle (exponential).
    ExpoOut,
}

impl Easing {
    /// Parse a curve name as written in the config file.
    pub fn from_name(name: &str) -> Option<Easing> {
        match name.trim().to_ascii_lowercase().as_str() {
            "linear" => Some(Easing::Linear),
            "quadin" | "quad_in" => Some(Easing::QuadIn),
            "quadout" | "quad_out" => Some(Easing::QuadOut),
            "quadinout" | "quad_in_out" => Some(Easing::QuadInOut),
            "cubicin" | "cubic_in" => Some(Easing::CubicIn),
            "cubicout" | "cubic_out" => Some(Easing::CubicOut),
            "cubicinout" | "cubic_in_out" => Some(Easing::CubicInOut),
            "expo" | "expoout" | "expo_out" => Some(Easing::ExpoOut),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::QuadIn => "quad_in",
            Easing::QuadOut => "quad_out",
            Easing::QuadInOut => "quad_in_out",
            Easing::CubicIn => "cubic_in",
            Easing::CubicOut => "cubic_out",
            Easing::CubicInOut => "cubic_in_out",
            Easing::ExpoOut => "expo_out",
        }
    }
}

/// Staggered entrance of ring items: each item rises from `rise` pixels
/// below its resting place and fades in.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntroSettings {
    /// Duration of a single item's animation, in seconds.
    pub duration: f32,
    /// Delay between consecutive items, in seconds.
    pub stagger: f32,
    /// Starting vertical displacement, in pixels.
    pub rise: f32,
    pub easing: Easing,
}

impl Default for IntroSettings {
    fn default() -> Self {
        IntroSettings {
            duration: 1.5,
            stagger: 0.1,
            rise: 200.0,
            easing: Easing::ExpoOut,
        }
    }
}

impl IntroSettings {
    /// Seconds until the last of `count` items has settled.
    pub fn total_duration(&self, count: usize) -> f32 {
        let delays = count.saturating_sub(1) as f32 * self.stagger.max(0.0);
        delays + self.duration.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_names_round_trip() {
        let all = [
            Easing::Linear,
            Easing::QuadIn,
            Easing::QuadOut,
            Easing::QuadInOut,
            Easing::CubicIn,
            Easing::CubicOut,
            Easing::CubicInOut,
            Easing::ExpoOut,
        ];
        for easing in all {
            assert_eq!(Easing::from_name(easing.name()), Some(easing));
        }
    }

    #[test]
    fn test_easing_accepts_short_expo_name() {
        assert_eq!(Easing::from_name(" Expo "), Some(Easing::ExpoOut));
        assert_eq!(Easing::from_name("bounce"), None);
    }

    #[test]
    fn test_total_duration_adds_stagger() {
        let settings = IntroSettings::default();
        assert!((settings.total_duration(10) - 2.4).abs() < 1e-5);
        assert!((settings.total_duration(1) - 1.5).abs() < 1e-5);
        assert!((settings.total_duration(0) - 1.5).abs() < 1e-5);
    }
}
