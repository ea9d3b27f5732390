//! Tick counter update.
//!
//! Bumps the shared [`FrameClock`](crate::resources::frameclock::FrameClock)
//! once per presented frame.
use bevy_ecs::prelude::*;

use crate::resources::frameclock::FrameClock;

/// Count one more tick on the `FrameClock` resource.
pub fn update_frame_clock(world: &mut World) {
    let mut clock = world.resource_mut::<FrameClock>();
    clock.ticks += 1;
}
