//! Input systems.
//!
//! - [`update_input_state`] scans the Raylib keyboard once per tick and
//!   writes the levels into [`crate::resources::input::InputState`].
//! - Pressing the debug key triggers
//!   [`ToggleDebugOverlay`](crate::events::toggledebug::ToggleDebugOverlay).
use bevy_ecs::prelude::*;

use crate::events::toggledebug::ToggleDebugOverlay;
use crate::resources::input::{CpcKey, InputState};

/// Poll Raylib for keyboard input and update the `InputState` resource.
pub fn update_input_state(
    mut input: ResMut<InputState>,
    rl: NonSend<raylib::RaylibHandle>,
    mut commands: Commands,
) {
    for key in CpcKey::ALL {
        let down = rl.is_key_down(input.key(key).key_binding);
        input.set_down(key, down);
    }

    let debug_down = rl.is_key_down(input.mode_debug.key_binding);
    input.mode_debug.update(debug_down);
    if input.mode_debug.just_pressed {
        commands.trigger(ToggleDebugOverlay);
    }
}
