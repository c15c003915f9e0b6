//! Carousel engine library.
//!
//! Animation core of image carousels: a per-frame callback scheduler, a
//! pointer tilt behavior and a drag-rotated 3D ring, talking to the view
//! layer only through narrow collaborator traits. Also exposes the headless
//! `bevy_ecs` host used by the binary and the integration tests.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
