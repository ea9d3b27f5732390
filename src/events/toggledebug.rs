//! F11 debug overlay toggle.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;

use crate::resources::debugoverlay::DebugOverlay;
use crate::resources::frameclock::FrameClock;

#[derive(Event, Debug, Clone, Copy)]
pub struct ToggleDebugOverlay;

/// Insert a [`DebugOverlay`] stamped with the current tick, or remove the
/// one that is showing.
pub fn toggle_debug_overlay(
    _trigger: On<ToggleDebugOverlay>,
    mut commands: Commands,
    overlay: Option<Res<DebugOverlay>>,
    clock: Res<FrameClock>,
) {
    match overlay {
        Some(overlay) => {
            commands.remove_resource::<DebugOverlay>();
            info!(
                "Debug overlay hidden at tick {} after {} ticks",
                clock.ticks,
                overlay.shown_for(&clock)
            );
        }
        None => {
            commands.insert_resource(DebugOverlay::enabled_at(&clock));
            info!("Debug overlay shown at tick {}", clock.ticks);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_at(ticks: u64) -> World {
        let mut world = World::new();
        world.insert_resource(FrameClock {
            ticks,
            ..FrameClock::default()
        });
        world.add_observer(toggle_debug_overlay);
        world.flush();
        world
    }

    #[test]
    fn toggle_stamps_current_tick() {
        let mut world = world_at(42);
        world.trigger(ToggleDebugOverlay);
        world.flush();
        assert_eq!(
            world.get_resource::<DebugOverlay>(),
            Some(&DebugOverlay { since: 42 })
        );
    }

    #[test]
    fn second_toggle_hides() {
        let mut world = world_at(0);
        world.trigger(ToggleDebugOverlay);
        world.flush();
        world.resource_mut::<FrameClock>().ticks = 10;
        world.trigger(ToggleDebugOverlay);
        world.flush();
        assert!(!world.contains_resource::<DebugOverlay>());

        world.trigger(ToggleDebugOverlay);
        world.flush();
        assert_eq!(world.resource::<DebugOverlay>().since, 10);
    }
}
