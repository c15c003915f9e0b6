//! Input events.
//!
//! Submodules:
//! - [`pointer`] – mouse/touch samples and the host's pointer message
pub mod pointer;
