//! Behaviors and host systems.
//!
//! Submodules overview
//! - [`imageloader`] – concurrent image URL loading with fallback
//! - [`intro`] – staggered entrance of ring items
//! - [`ring`] – drag rotation of the ring and per-item backgrounds
//! - [`scene`] – scripted input, dispatch, refresh and reporting for the host
//! - [`tilt`] – pointer tilt with exponential smoothing
//! - [`time`] – advance the host clock
//! - [`tween`] – interpolation, wrap and easing math

pub mod imageloader;
pub mod intro;
pub mod ring;
pub mod scene;
pub mod tilt;
pub mod time;
pub mod tween;
