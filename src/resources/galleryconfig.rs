//! Gallery configuration resource.
//!
//! Tunables of the tilt, ring and intro behaviors plus host settings, loaded
//! from an INI file. Missing keys keep their defaults.
//!
//! # Configuration File Format
//!
//! ```ini
//! [tilt]
//! sensitivity_x = 9.424778
//! sensitivity_y = 12.566371
//! parallax = 0.3
//! active_smoothing = 0.1
//! idle_smoothing = 0.06
//!
//! [ring]
//! offset = 50
//! item_spacing = 36
//! initial_angle = 180
//!
//! [intro]
//! duration = 1.5
//! stagger = 0.1
//! rise = 200
//! easing = expo_out
//!
//! [gallery]
//! images = 10
//! target_fps = 60
//! width = 1280
//! height = 720
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

use crate::components::ring::RingSettings;
use crate::components::tilt::TiltSettings;
use crate::components::tween::{Easing, IntroSettings};

const DEFAULT_IMAGE_COUNT: u32 = 10;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_VIEW_WIDTH: u32 = 1280;
const DEFAULT_VIEW_HEIGHT: u32 = 720;
const DEFAULT_CONFIG_PATH: &str = "./gallery.ini";

/// Gallery configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct GalleryConfig {
    pub tilt: TiltSettings,
    pub ring: RingSettings,
    pub intro: IntroSettings,
    /// Number of ring items / slides.
    pub image_count: u32,
    /// Refresh rate simulated by the headless host.
    pub target_fps: u32,
    /// Size of the simulated view in pixels.
    pub view_width: u32,
    pub view_height: u32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Accept a smoothing factor only if it lies strictly inside (0, 1).
fn valid_smoothing(key: &str, value: f32) -> Option<f32> {
    if value > 0.0 && value < 1.0 {
        Some(value)
    } else {
        warn!(
            "Ignoring tilt.{} = {}: smoothing must be between 0 and 1 exclusive",
            key, value
        );
        None
    }
}

impl GalleryConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self {
            tilt: TiltSettings::default(),
            ring: RingSettings::default(),
            intro: IntroSettings::default(),
            image_count: DEFAULT_IMAGE_COUNT,
            target_fps: DEFAULT_TARGET_FPS,
            view_width: DEFAULT_VIEW_WIDTH,
            view_height: DEFAULT_VIEW_HEIGHT,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a configuration bound to a custom file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing or malformed values retain their current values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // parsed as f32 directly so saved values load back bit-exact;
        // nan and inf are rejected
        let float = |section: &str, key: &str| {
            let value = config
                .get(section, key)
                .and_then(|v| v.trim().parse::<f32>().ok())?;
            if value.is_finite() {
                Some(value)
            } else {
                warn!("Ignoring {}.{} = {}: not a finite number", section, key, value);
                None
            }
        };

        // [tilt] section
        if let Some(v) = float("tilt", "sensitivity_x").filter(|v| *v != 0.0) {
            self.tilt.sensitivity_x = v;
        }
        if let Some(v) = float("tilt", "sensitivity_y").filter(|v| *v != 0.0) {
            self.tilt.sensitivity_y = v;
        }
        if let Some(v) = float("tilt", "parallax") {
            self.tilt.parallax = v;
        }
        if let Some(v) = float("tilt", "active_smoothing").and_then(|v| valid_smoothing("active_smoothing", v)) {
            self.tilt.active_smoothing = v;
        }
        if let Some(v) = float("tilt", "idle_smoothing").and_then(|v| valid_smoothing("idle_smoothing", v)) {
            self.tilt.idle_smoothing = v;
        }

        // [ring] section
        if let Some(v) = float("ring", "offset") {
            self.ring.offset = v;
        }
        if let Some(v) = float("ring", "item_spacing") {
            self.ring.item_spacing = Some(v);
        }
        if let Some(v) = float("ring", "initial_angle") {
            self.ring.initial_angle = v;
        }
        if let Some(v) = float("ring", "background_y") {
            self.ring.background_y = v;
        }

        // [intro] section
        if let Some(v) = float("intro", "duration") {
            self.intro.duration = v;
        }
        if let Some(v) = float("intro", "stagger") {
            self.intro.stagger = v;
        }
        if let Some(v) = float("intro", "rise") {
            self.intro.rise = v;
        }
        if let Some(name) = config.get("intro", "easing") {
            match Easing::from_name(&name) {
                Some(easing) => self.intro.easing = easing,
                None => warn!("Unknown intro easing {:?}, keeping {}", name, self.intro.easing.name()),
            }
        }

        // [gallery] section
        if let Some(n) = config.getuint("gallery", "images").ok().flatten() {
            self.image_count = n as u32;
        }
        if let Some(fps) = config.getuint("gallery", "target_fps").ok().flatten() {
            self.target_fps = (fps as u32).max(1);
        }
        if let Some(w) = config.getuint("gallery", "width").ok().flatten() {
            self.view_width = w as u32;
        }
        if let Some(h) = config.getuint("gallery", "height").ok().flatten() {
            self.view_height = h as u32;
        }

        info!(
            "Loaded config: {} images, ring offset={}, smoothing={}/{}, fps={}",
            self.image_count,
            self.ring.offset,
            self.tilt.active_smoothing,
            self.tilt.idle_smoothing,
            self.target_fps
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [tilt] section
        config.set("tilt", "sensitivity_x", Some(self.tilt.sensitivity_x.to_string()));
        config.set("tilt", "sensitivity_y", Some(self.tilt.sensitivity_y.to_string()));
        config.set("tilt", "parallax", Some(self.tilt.parallax.to_string()));
        config.set("tilt", "active_smoothing", Some(self.tilt.active_smoothing.to_string()));
        config.set("tilt", "idle_smoothing", Some(self.tilt.idle_smoothing.to_string()));

        // [ring] section
        config.set("ring", "offset", Some(self.ring.offset.to_string()));
        if let Some(spacing) = self.ring.item_spacing {
            config.set("ring", "item_spacing", Some(spacing.to_string()));
        }
        config.set("ring", "initial_angle", Some(self.ring.initial_angle.to_string()));
        config.set("ring", "background_y", Some(self.ring.background_y.to_string()));

        // [intro] section
        config.set("intro", "duration", Some(self.intro.duration.to_string()));
        config.set("intro", "stagger", Some(self.intro.stagger.to_string()));
        config.set("intro", "rise", Some(self.intro.rise.to_string()));
        config.set("intro", "easing", Some(self.intro.easing.name().to_string()));

        // [gallery] section
        config.set("gallery", "images", Some(self.image_count.to_string()));
        config.set("gallery", "target_fps", Some(self.target_fps.to_string()));
        config.set("gallery", "width", Some(self.view_width.to_string()));
        config.set("gallery", "height", Some(self.view_height.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    pub fn tilt_settings(&self) -> TiltSettings {
        self.tilt
    }

    pub fn ring_settings(&self) -> RingSettings {
        self.ring
    }

    pub fn intro_settings(&self) -> IntroSettings {
        self.intro
    }

    /// Simulated view size.
    pub fn view_size(&self) -> (u32, u32) {
        (self.view_width, self.view_height)
    }
}
