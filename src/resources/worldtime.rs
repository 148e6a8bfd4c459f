use bevy_ecs::prelude::Resource;

/// Host clock. `delta` is the last frame's scaled duration in seconds.
#[derive(Resource, Debug, Clone, Copy)]
pub struct WorldTime {
    pub elapsed: f32,
    pub delta: f32,
    pub time_scale: f32,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }

    /// Last frame's scaled duration in milliseconds, rounded to the
    /// microsecond.
    pub fn delta_ms(&self) -> f64 {
        (f64::from(self.delta) * 1_000_000.0).round() / 1000.0
    }
}
