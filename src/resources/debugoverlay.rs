//! Debug overlay state and text.
//!
//! While a [`DebugOverlay`] resource exists the presenter prints the lines
//! built here on top of the scaled screen. F11 inserts or removes it through
//! [`crate::events::toggledebug::ToggleDebugOverlay`].

use bevy_ecs::prelude::Resource;

use crate::components::animation::Animation;
use crate::components::mapposition::MapPosition;
use crate::resources::frameclock::FrameClock;

#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct DebugOverlay {
    /// Tick on which the overlay was switched on.
    pub since: u64,
}

impl DebugOverlay {
    pub fn enabled_at(clock: &FrameClock) -> Self {
        Self { since: clock.ticks }
    }

    /// Ticks the overlay has been visible.
    pub fn shown_for(&self, clock: &FrameClock) -> u64 {
        clock.ticks.saturating_sub(self.since)
    }

    /// Top line: measured fps, tick count and nominal elapsed time.
    pub fn header(&self, fps: u32, clock: &FrameClock) -> String {
        format!(
            "DEBUG (F11) | FPS {}/{} | tick {} ({:.1}s) | shown {}",
            fps,
            clock.rate,
            clock.ticks,
            clock.seconds(),
            self.shown_for(clock)
        )
    }

    /// Playback state of one entity.
    pub fn entity_line(anim: &Animation, position: &MapPosition) -> String {
        format!(
            "{} frame {} timer {} at ({}, {})",
            anim.current, anim.frame_index, anim.frame_timer, position.x, position.y
        )
    }
}
