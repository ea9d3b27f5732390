//! Animation playback state and the per-tick animation request.
//!
//! An entity is in exactly one [`AnimationId`] at a time. The
//! [`Animation`] component stores which one, plus how far playback has
//! progressed. The [`AnimationRequest`] component carries the request produced
//! by the input classifier for the current tick; the state machine consumes it
//! in the same tick.
//!
//! # Related
//!
//! - [`crate::systems::animation`] – request arbitration and frame advance
//! - [`crate::systems::classifier`] – keyboard snapshot to request mapping
//! - [`crate::resources::animationstore::AnimationStore`] – frame sequences
use std::fmt;

use bevy_ecs::prelude::Component;
use serde::Deserialize;

/// The closed set of postures an entity can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationId {
    Stop,
    Hit,
    Kick,
    Fist,
    WalkLeft,
    WalkRight,
    Dead,
    Win,
}

impl AnimationId {
    /// Every variant, in declaration order.
    pub const ALL: [AnimationId; 8] = [
        AnimationId::Stop,
        AnimationId::Hit,
        AnimationId::Kick,
        AnimationId::Fist,
        AnimationId::WalkLeft,
        AnimationId::WalkRight,
        AnimationId::Dead,
        AnimationId::Win,
    ];

    /// Name used in asset files and logs.
    pub fn name(self) -> &'static str {
        match self {
            AnimationId::Stop => "stop",
            AnimationId::Hit => "hit",
            AnimationId::Kick => "kick",
            AnimationId::Fist => "fist",
            AnimationId::WalkLeft => "walk_left",
            AnimationId::WalkRight => "walk_right",
            AnimationId::Dead => "dead",
            AnimationId::Win => "win",
        }
    }
}

impl fmt::Display for AnimationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Playback state of the entity's single active animation.
///
/// `frame_index` always addresses a frame of `current`'s sequence; the
/// systems in [`crate::systems::animation`] are the only writers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Component)]
pub struct Animation {
    pub current: AnimationId,
    pub frame_index: usize,
    /// Ticks already spent on the current frame.
    pub frame_timer: u16,
}

impl Animation {
    pub fn new(current: AnimationId) -> Self {
        Self {
            current,
            frame_index: 0,
            frame_timer: 0,
        }
    }

    /// Enter `id` from its first frame.
    pub(crate) fn restart(&mut self, id: AnimationId) {
        self.current = id;
        self.frame_index = 0;
        self.frame_timer = 0;
    }
}

impl Default for Animation {
    fn default() -> Self {
        Self::new(AnimationId::Stop)
    }
}

/// Request for the current tick. `None` means "no request".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Component)]
pub struct AnimationRequest(pub Option<AnimationId>);

impl AnimationRequest {
    /// Consume the request, leaving "no request" behind.
    pub fn take(&mut self) -> Option<AnimationId> {
        self.0.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_names_match_display_names() {
        for id in AnimationId::ALL {
            let json = format!("\"{id}\"");
            assert_eq!(serde_json::from_str::<AnimationId>(&json).unwrap(), id);
        }
        assert!(serde_json::from_str::<AnimationId>("\"jump\"").is_err());
        assert!(serde_json::from_str::<AnimationId>("\"WalkLeft\"").is_err());
    }

    #[test]
    fn new_animation_starts_at_first_frame() {
        let anim = Animation::default();
        assert_eq!(anim.current, AnimationId::Stop);
        assert_eq!(anim.frame_index, 0);
        assert_eq!(anim.frame_timer, 0);
    }

    #[test]
    fn request_take_clears() {
        let mut req = AnimationRequest(Some(AnimationId::Kick));
        assert_eq!(req.take(), Some(AnimationId::Kick));
        assert_eq!(req.take(), None);
    }
}
