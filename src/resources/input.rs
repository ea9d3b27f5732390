//! Per-tick keyboard snapshot.
//!
//! Holds the state of the CPC keys the game reads, each bound to a host
//! keyboard key. [`crate::systems::input::update_input_state`] refreshes it
//! once per tick; everything downstream only ever sees this snapshot, never
//! the live keyboard.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

/// CPC keys the game reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CpcKey {
    Space,
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    Key1,
    Key2,
}

impl CpcKey {
    pub const ALL: [CpcKey; 7] = [
        CpcKey::Space,
        CpcKey::CursorUp,
        CpcKey::CursorDown,
        CpcKey::CursorLeft,
        CpcKey::CursorRight,
        CpcKey::Key1,
        CpcKey::Key2,
    ];
}

#[derive(Debug, Clone, Copy)]
/// Boolean key state with an associated keyboard binding.
pub struct BoolState {
    /// Whether the key is down this tick.
    pub active: bool,
    /// Whether the key went down this tick.
    pub just_pressed: bool,
    /// Whether the key went up this tick.
    pub just_released: bool,

    /// Host key standing in for the CPC key.
    pub key_binding: KeyboardKey,
}

impl BoolState {
    fn bound(key_binding: KeyboardKey) -> Self {
        Self {
            key_binding,
            ..Self::default()
        }
    }

    /// Record this tick's level, deriving the edge flags from the last one.
    pub fn update(&mut self, down: bool) {
        self.just_pressed = down && !self.active;
        self.just_released = !down && self.active;
        self.active = down;
    }
}

impl Default for BoolState {
    fn default() -> Self {
        Self {
            active: false,
            just_pressed: false,
            just_released: false,
            key_binding: KeyboardKey::KEY_NULL,
        }
    }
}

/// Keyboard state for the current tick.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub space: BoolState,
    pub cursor_up: BoolState,
    pub cursor_down: BoolState,
    pub cursor_left: BoolState,
    pub cursor_right: BoolState,
    pub key_1: BoolState,
    pub key_2: BoolState,
    /// Host-only key toggling the debug overlay.
    pub mode_debug: BoolState,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            space: BoolState::bound(KeyboardKey::KEY_SPACE),
            cursor_up: BoolState::bound(KeyboardKey::KEY_UP),
            cursor_down: BoolState::bound(KeyboardKey::KEY_DOWN),
            cursor_left: BoolState::bound(KeyboardKey::KEY_LEFT),
            cursor_right: BoolState::bound(KeyboardKey::KEY_RIGHT),
            key_1: BoolState::bound(KeyboardKey::KEY_ONE),
            key_2: BoolState::bound(KeyboardKey::KEY_TWO),
            mode_debug: BoolState::bound(KeyboardKey::KEY_F11),
        }
    }
}

impl InputState {
    pub fn key(&self, key: CpcKey) -> &BoolState {
        match key {
            CpcKey::Space => &self.space,
            CpcKey::CursorUp => &self.cursor_up,
            CpcKey::CursorDown => &self.cursor_down,
            CpcKey::CursorLeft => &self.cursor_left,
            CpcKey::CursorRight => &self.cursor_right,
            CpcKey::Key1 => &self.key_1,
            CpcKey::Key2 => &self.key_2,
        }
    }

    pub fn key_mut(&mut self, key: CpcKey) -> &mut BoolState {
        match key {
            CpcKey::Space => &mut self.space,
            CpcKey::CursorUp => &mut self.cursor_up,
            CpcKey::CursorDown => &mut self.cursor_down,
            CpcKey::CursorLeft => &mut self.cursor_left,
            CpcKey::CursorRight => &mut self.cursor_right,
            CpcKey::Key1 => &mut self.key_1,
            CpcKey::Key2 => &mut self.key_2,
        }
    }

    /// Is `key` down in this snapshot?
    pub fn is_down(&self, key: CpcKey) -> bool {
        self.key(key).active
    }

    /// Set the level of `key`, as a keyboard scan would.
    pub fn set_down(&mut self, key: CpcKey, down: bool) {
        self.key_mut(key).update(down);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolstate_default() {
        let bs = BoolState::default();
        assert!(!bs.active);
        assert!(!bs.just_pressed);
        assert!(!bs.just_released);
        assert_eq!(bs.key_binding, KeyboardKey::KEY_NULL);
    }

    #[test]
    fn test_inputstate_default_all_up() {
        let input = InputState::default();
        for key in CpcKey::ALL {
            assert!(!input.is_down(key));
        }
        assert!(!input.mode_debug.active);
    }

    #[test]
    fn test_inputstate_default_key_bindings() {
        let input = InputState::default();
        assert_eq!(input.space.key_binding, KeyboardKey::KEY_SPACE);
        assert_eq!(input.cursor_up.key_binding, KeyboardKey::KEY_UP);
        assert_eq!(input.cursor_down.key_binding, KeyboardKey::KEY_DOWN);
        assert_eq!(input.cursor_left.key_binding, KeyboardKey::KEY_LEFT);
        assert_eq!(input.cursor_right.key_binding, KeyboardKey::KEY_RIGHT);
        assert_eq!(input.key_1.key_binding, KeyboardKey::KEY_ONE);
        assert_eq!(input.key_2.key_binding, KeyboardKey::KEY_TWO);
        assert_eq!(input.mode_debug.key_binding, KeyboardKey::KEY_F11);
    }

    #[test]
    fn test_edges_follow_levels() {
        let mut input = InputState::default();
        input.set_down(CpcKey::Space, true);
        assert!(input.space.active && input.space.just_pressed);

        input.set_down(CpcKey::Space, true);
        assert!(input.space.active && !input.space.just_pressed);

        input.set_down(CpcKey::Space, false);
        assert!(!input.space.active && input.space.just_released);

        input.set_down(CpcKey::Space, false);
        assert!(!input.space.just_released);
    }
}
