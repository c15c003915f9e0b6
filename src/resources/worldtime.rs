//! Simulated clock of the headless host.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    /// Seconds since the host started.
    pub elapsed: f32,
    /// Seconds covered by the current frame.
    pub delta: f32,
    pub time_scale: f32,
    /// Frames advanced so far.
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    /// Elapsed time in milliseconds, as handed to the refresh signal.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed as f64 * 1000.0
    }
}
