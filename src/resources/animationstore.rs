//! Animation definitions for every [`AnimationId`].
//!
//! The store is built once at startup and validated as a whole: every
//! variant must have a non-empty frame sequence, every frame must be shown
//! for at least one tick, and (when checked against a [`SpriteStore`]) every
//! frame must name an existing sprite. Once built, looking up a definition
//! cannot fail, so the per-tick systems have no error path.

use std::fmt;
use std::path::PathBuf;

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use smallvec::SmallVec;

use crate::components::animation::AnimationId;
use crate::resources::spritestore::SpriteStore;

/// A defect in the animation or sprite data. Always fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnimationConfigError {
    Io { path: PathBuf, message: String },
    Parse(String),
    MissingAnimation(AnimationId),
    EmptyAnimation(AnimationId),
    ZeroHold { animation: AnimationId, frame: usize },
    UnknownSprite { animation: AnimationId, frame: usize, sprite: String },
    BadSprite { sprite: String, reason: String },
}

impl fmt::Display for AnimationConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, message } => write!(f, "cannot read {}: {message}", path.display()),
            Self::Parse(message) => write!(f, "invalid asset file: {message}"),
            Self::MissingAnimation(id) => write!(f, "no animation defined for '{id}'"),
            Self::EmptyAnimation(id) => write!(f, "animation '{id}' has no frames"),
            Self::ZeroHold { animation, frame } => {
                write!(f, "animation '{animation}' frame {frame}: hold must be at least 1")
            }
            Self::UnknownSprite {
                animation,
                frame,
                sprite,
            } => write!(
                f,
                "animation '{animation}' frame {frame}: unknown sprite '{sprite}'"
            ),
            Self::BadSprite { sprite, reason } => write!(f, "sprite '{sprite}': {reason}"),
        }
    }
}

impl std::error::Error for AnimationConfigError {}

/// One step of an animation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameDescriptor {
    /// Key into the [`SpriteStore`].
    pub sprite: String,
    /// Ticks the frame stays on screen.
    pub hold: u16,
    /// Movement applied when the frame is entered (bytes, lines).
    pub dx: i32,
    pub dy: i32,
}

impl FrameDescriptor {
    pub fn new(sprite: impl Into<String>) -> Self {
        Self {
            sprite: sprite.into(),
            hold: 1,
            dx: 0,
            dy: 0,
        }
    }

    pub fn with_hold(mut self, hold: u16) -> Self {
        self.hold = hold;
        self
    }

    pub fn with_motion(mut self, dx: i32, dy: i32) -> Self {
        self.dx = dx;
        self.dy = dy;
        self
    }
}

/// What happens after the last frame.
///
/// Asset files spell it `"loop"`, `"hold"` or `{ "then": "<animation>" }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Playback {
    /// Start over from frame 0.
    Loop,
    /// One-shot: switch to the given animation.
    Then(AnimationId),
    /// One-shot with no successor: stay on the last frame.
    Hold,
}

/// Frame sequence and playback mode for one animation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationDef {
    pub frames: SmallVec<[FrameDescriptor; 4]>,
    pub playback: Playback,
}

impl AnimationDef {
    pub fn new(frames: impl IntoIterator<Item = FrameDescriptor>, playback: Playback) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            playback,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Frame `index`, clamped to the last one.
    pub fn frame(&self, index: usize) -> &FrameDescriptor {
        &self.frames[index.min(self.frames.len() - 1)]
    }
}

#[cfg(test)]
impl AnimationDef {
    pub(crate) fn looping(frames: impl IntoIterator<Item = FrameDescriptor>) -> Self {
        Self::new(frames, Playback::Loop)
    }

    pub(crate) fn then(
        frames: impl IntoIterator<Item = FrameDescriptor>,
        next: AnimationId,
    ) -> Self {
        Self::new(frames, Playback::Then(next))
    }

    pub(crate) fn hold(frames: impl IntoIterator<Item = FrameDescriptor>) -> Self {
        Self::new(frames, Playback::Hold)
    }
}

/// Validated definitions for the whole [`AnimationId`] set.
#[derive(Resource, Debug, Clone)]
pub struct AnimationStore {
    defs: Vec<AnimationDef>,
}

impl AnimationStore {
    /// Validate `defs` and build the store.
    ///
    /// Fails if any variant is missing, has no frames, or has a frame with a
    /// zero hold.
    pub fn new(
        mut defs: FxHashMap<AnimationId, AnimationDef>,
    ) -> Result<Self, AnimationConfigError> {
        let mut ordered = Vec::with_capacity(AnimationId::ALL.len());
        for id in AnimationId::ALL {
            let def = defs
                .remove(&id)
                .ok_or(AnimationConfigError::MissingAnimation(id))?;
            if def.frames.is_empty() {
                return Err(AnimationConfigError::EmptyAnimation(id));
            }
            if let Some(frame) = def.frames.iter().position(|f| f.hold == 0) {
                return Err(AnimationConfigError::ZeroHold {
                    animation: id,
                    frame,
                });
            }
            ordered.push(def);
        }
        Ok(Self { defs: ordered })
    }

    /// Check that every frame refers to a sprite in `sprites`.
    pub fn check_sprites(&self, sprites: &SpriteStore) -> Result<(), AnimationConfigError> {
        for (id, def) in self.iter() {
            for (frame, descriptor) in def.frames.iter().enumerate() {
                if !sprites.contains(&descriptor.sprite) {
                    return Err(AnimationConfigError::UnknownSprite {
                        animation: id,
                        frame,
                        sprite: descriptor.sprite.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn get(&self, id: AnimationId) -> &AnimationDef {
        &self.defs[id as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (AnimationId, &AnimationDef)> {
        AnimationId::ALL.into_iter().zip(self.defs.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::spritestore::SpriteFrame;

    fn frames(n: usize) -> Vec<FrameDescriptor> {
        (0..n).map(|i| FrameDescriptor::new(format!("f{i}"))).collect()
    }

    fn full_set() -> FxHashMap<AnimationId, AnimationDef> {
        AnimationId::ALL
            .into_iter()
            .map(|id| (id, AnimationDef::looping(frames(2))))
            .collect()
    }

    #[test]
    fn complete_set_is_accepted() {
        let store = AnimationStore::new(full_set()).unwrap();
        for id in AnimationId::ALL {
            assert_eq!(store.get(id).frame_count(), 2);
        }
        assert_eq!(store.iter().count(), 8);
    }

    #[test]
    fn missing_variant_is_rejected() {
        let mut defs = full_set();
        defs.remove(&AnimationId::Win);
        assert_eq!(
            AnimationStore::new(defs).unwrap_err(),
            AnimationConfigError::MissingAnimation(AnimationId::Win)
        );
    }

    #[test]
    fn empty_frames_are_rejected() {
        let mut defs = full_set();
        defs.insert(AnimationId::Kick, AnimationDef::looping(Vec::new()));
        assert_eq!(
            AnimationStore::new(defs).unwrap_err(),
            AnimationConfigError::EmptyAnimation(AnimationId::Kick)
        );
    }

    #[test]
    fn zero_hold_is_rejected() {
        let mut defs = full_set();
        defs.insert(
            AnimationId::Fist,
            AnimationDef::then(
                [FrameDescriptor::new("a"), FrameDescriptor::new("b").with_hold(0)],
                AnimationId::Stop,
            ),
        );
        assert_eq!(
            AnimationStore::new(defs).unwrap_err(),
            AnimationConfigError::ZeroHold {
                animation: AnimationId::Fist,
                frame: 1
            }
        );
    }

    #[test]
    fn sprite_references_are_checked() {
        let store = AnimationStore::new(full_set()).unwrap();
        let mut sprites = SpriteStore::new();
        let pixel = SpriteFrame::from_pen_rows("f0", &["00"]).unwrap();
        sprites.insert("f0", pixel.clone());
        let err = store.check_sprites(&sprites).unwrap_err();
        assert!(matches!(
            err,
            AnimationConfigError::UnknownSprite { ref sprite, .. } if sprite == "f1"
        ));

        sprites.insert("f1", pixel);
        assert!(store.check_sprites(&sprites).is_ok());
    }

    #[test]
    fn frame_lookup_clamps() {
        let def = AnimationDef::hold(frames(3));
        assert_eq!(def.frame(7).sprite, "f2");
    }

    #[test]
    fn playback_reads_asset_spelling() {
        let modes: Vec<Playback> =
            serde_json::from_str(r#"["loop", "hold", { "then": "walk_left" }]"#).unwrap();
        assert_eq!(
            modes,
            vec![
                Playback::Loop,
                Playback::Hold,
                Playback::Then(AnimationId::WalkLeft)
            ]
        );
        assert!(serde_json::from_str::<Playback>(r#""bounce""#).is_err());
    }

    #[test]
    fn errors_render_readable_messages() {
        let err = AnimationConfigError::ZeroHold {
            animation: AnimationId::WalkLeft,
            frame: 2,
        };
        assert_eq!(
            err.to_string(),
            "animation 'walk_left' frame 2: hold must be at least 1"
        );
    }
}
