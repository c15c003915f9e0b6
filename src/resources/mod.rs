//! Collaborators and long-lived state.
//!
//! Overview
//! - `captions` – random breed/quote captions for slides
//! - `framescheduler` – per-frame callback registry
//! - `galleryconfig` – INI-backed tunables of every behavior
//! - `imagesource` – image URL producers and fetch errors
//! - `pointerinput` – pointer subscription capability and the in-process hub
//! - `refresh` – display refresh signal and its manually fired implementation
//! - `visualsink` – visual property sink and the recording implementation
//! - `worldtime` – simulated clock of the headless host
pub mod captions;
pub mod framescheduler;
pub mod galleryconfig;
pub mod imagesource;
pub mod pointerinput;
pub mod refresh;
pub mod visualsink;
pub mod worldtime;
