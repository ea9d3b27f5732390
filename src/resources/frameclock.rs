//! Fixed-rate tick counter.
//!
//! One tick is one presented frame. Nothing in the simulation reads wall
//! clock time: animation timing is counted in ticks, and the tick rate is
//! whatever the display's vertical sync (or raylib's frame limiter) gives.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug)]
pub struct FrameClock {
    /// Ticks completed since startup.
    pub ticks: u64,
    /// Nominal ticks per second.
    pub rate: u32,
}

impl Default for FrameClock {
    fn default() -> Self {
        FrameClock { ticks: 0, rate: 50 }
    }
}

impl FrameClock {
    pub fn with_rate(rate: u32) -> Self {
        Self {
            rate: rate.max(1),
            ..Self::default()
        }
    }

    /// Nominal seconds elapsed.
    pub fn seconds(&self) -> f64 {
        self.ticks as f64 / self.rate as f64
    }
}
