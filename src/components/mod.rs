//! Plain data types of the animation core.
//!
//! Submodules overview:
//! - [`element`] – opaque handle of a view element
//! - [`ring`] – ring settings and drag rotation state
//! - [`tilt`] – tilt settings, attachment options and smoothing state
//! - [`tween`] – easing curves and intro animation settings
//! - [`vector2`] – 2D vector with in-place interpolation

pub mod element;
pub mod ring;
pub mod tilt;
pub mod tween;
pub mod vector2;
