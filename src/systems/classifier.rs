//! Keyboard snapshot to animation request.
//!
//! [`REQUEST_TABLE`] is checked top to bottom and the first key that is down
//! decides the request, so any combination of keys resolves to exactly one
//! outcome. With none of the listed keys down there is no request and the
//! current animation carries on.
use bevy_ecs::prelude::*;

use crate::components::animation::{AnimationId, AnimationRequest};
use crate::components::inputcontrolled::InputControlled;
use crate::resources::input::{CpcKey, InputState};

/// Key to request mapping, highest priority first.
pub const REQUEST_TABLE: [(CpcKey, AnimationId); 7] = [
    (CpcKey::Space, AnimationId::Hit),
    (CpcKey::CursorUp, AnimationId::Kick),
    (CpcKey::CursorDown, AnimationId::Fist),
    (CpcKey::CursorRight, AnimationId::WalkRight),
    (CpcKey::CursorLeft, AnimationId::WalkLeft),
    (CpcKey::Key1, AnimationId::Dead),
    (CpcKey::Key2, AnimationId::Win),
];

/// First entry of [`REQUEST_TABLE`] whose key is down.
pub fn classify(input: &InputState) -> Option<AnimationId> {
    REQUEST_TABLE
        .iter()
        .find(|(key, _)| input.is_down(*key))
        .map(|&(_, id)| id)
}

/// Write this tick's request into every input-controlled entity.
pub fn classify_input(
    input: Res<InputState>,
    mut query: Query<&mut AnimationRequest, With<InputControlled>>,
) {
    let request = classify(&input);
    for mut pending in query.iter_mut() {
        pending.0 = request;
    }
}
