//! JSON asset file holding Persea's sprites and animations.
//!
//! ```json
//! {
//!   "sprites": {
//!     "stop_0": { "rows": ["00000000", "00111100"] }
//!   },
//!   "animations": {
//!     "stop": { "playback": "loop", "frames": [ { "sprite": "stop_0" } ] },
//!     "hit":  { "playback": { "then": "stop" },
//!               "frames": [ { "sprite": "hit_0", "hold": 4 } ] },
//!     "dead": { "playback": "hold", "frames": [ ... ] }
//!   }
//! }
//! ```
//!
//! A frame's `hold` defaults to 1 tick and `dx`/`dy` to 0. The copy shipped
//! in `assets/persea.json` is compiled in as [`BUILTIN_ASSETS`].

use std::path::Path;

use log::info;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::components::animation::AnimationId;
use crate::resources::animationstore::{
    AnimationConfigError, AnimationDef, AnimationStore, FrameDescriptor, Playback,
};
use crate::resources::spritestore::{SpriteFrame, SpriteStore};

/// The asset file bundled with the binary.
pub const BUILTIN_ASSETS: &str = include_str!("../../assets/persea.json");

/// Animations are keyed by [`AnimationId`], so an unknown name is a parse
/// error.
#[derive(Deserialize, Debug, Clone)]
pub struct AssetFile {
    pub sprites: FxHashMap<String, SpriteData>,
    pub animations: FxHashMap<AnimationId, AnimationData>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SpriteData {
    pub rows: Vec<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AnimationData {
    pub playback: Playback,
    pub frames: Vec<FrameData>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct FrameData {
    pub sprite: String,
    #[serde(default = "default_hold")]
    pub hold: u16,
    #[serde(default)]
    pub dx: i32,
    #[serde(default)]
    pub dy: i32,
}

fn default_hold() -> u16 {
    1
}

impl AssetFile {
    pub fn from_json(text: &str) -> Result<Self, AnimationConfigError> {
        serde_json::from_str(text).map_err(|e| AnimationConfigError::Parse(e.to_string()))
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, AnimationConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| AnimationConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_json(&text)
    }

    /// Convert and validate into the two runtime stores.
    pub fn into_stores(self) -> Result<(SpriteStore, AnimationStore), AnimationConfigError> {
        let mut sprites = SpriteStore::new();
        for (key, data) in &self.sprites {
            sprites.insert(key.clone(), SpriteFrame::from_pen_rows(key, &data.rows)?);
        }

        let mut defs = FxHashMap::default();
        for (id, data) in self.animations {
            let frames = data.frames.into_iter().map(|f| {
                FrameDescriptor::new(f.sprite)
                    .with_hold(f.hold)
                    .with_motion(f.dx, f.dy)
            });
            defs.insert(id, AnimationDef::new(frames, data.playback));
        }

        let animations = AnimationStore::new(defs)?;
        animations.check_sprites(&sprites)?;
        Ok((sprites, animations))
    }
}

/// Load the stores from `path`, or from the built-in file when `None`.
pub fn load_assets(
    path: Option<&Path>,
) -> Result<(SpriteStore, AnimationStore), AnimationConfigError> {
    let file = match path {
        Some(path) => {
            info!("Loading assets from {}", path.display());
            AssetFile::load_from_file(path)?
        }
        None => {
            info!("Loading built-in assets");
            AssetFile::from_json(BUILTIN_ASSETS)?
        }
    };
    file.into_stores()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "sprites": { "a": { "rows": ["0000", "1111"] } },
        "animations": {
            "stop":       { "playback": "loop", "frames": [ { "sprite": "a" } ] },
            "hit":        { "playback": { "then": "stop" },
                            "frames": [ { "sprite": "a", "hold": 3 } ] },
            "kick":       { "playback": { "then": "stop" }, "frames": [ { "sprite": "a" } ] },
            "fist":       { "playback": { "then": "stop" }, "frames": [ { "sprite": "a" } ] },
            "walk_left":  { "playback": "loop", "frames": [ { "sprite": "a", "dx": -1 } ] },
            "walk_right": { "playback": "loop", "frames": [ { "sprite": "a", "dx": 1 } ] },
            "dead":       { "playback": "hold", "frames": [ { "sprite": "a" } ] },
            "win":        { "playback": "hold", "frames": [ { "sprite": "a" } ] }
        }
    }"#;

    #[test]
    fn minimal_file_loads() {
        let (sprites, animations) = AssetFile::from_json(MINIMAL).unwrap().into_stores().unwrap();
        assert!(sprites.contains("a"));
        let hit = animations.get(AnimationId::Hit);
        assert_eq!(hit.playback, Playback::Then(AnimationId::Stop));
        assert_eq!(hit.frames[0].hold, 3);
        assert_eq!(animations.get(AnimationId::WalkLeft).frames[0].dx, -1);
        assert_eq!(animations.get(AnimationId::Dead).playback, Playback::Hold);
        assert_eq!(animations.get(AnimationId::Stop).frames[0].hold, 1);
    }

    fn parse_error(text: &str) -> String {
        match AssetFile::from_json(text).unwrap_err() {
            AnimationConfigError::Parse(message) => message,
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_successor_is_rejected() {
        let text = MINIMAL.replacen(r#"{ "then": "stop" }"#, r#"{ "then": "jump" }"#, 1);
        assert!(parse_error(&text).contains("jump"));
    }

    #[test]
    fn unknown_playback_is_rejected() {
        let text = MINIMAL.replacen(r#""playback": "hold""#, r#""playback": "bounce""#, 1);
        assert!(parse_error(&text).contains("bounce"));
    }

    #[test]
    fn unknown_animation_name_is_rejected() {
        let text = MINIMAL.replacen(r#""win":"#, r#""jump":"#, 1);
        assert!(parse_error(&text).contains("jump"));
    }

    #[test]
    fn missing_sprite_is_rejected() {
        let mut file = AssetFile::from_json(MINIMAL).unwrap();
        file.animations.get_mut(&AnimationId::Win).unwrap().frames[0].sprite = "b".into();
        let err = file.into_stores().unwrap_err();
        assert!(matches!(
            err,
            AnimationConfigError::UnknownSprite {
                animation: AnimationId::Win,
                ..
            }
        ));
    }

    #[test]
    fn missing_animation_is_rejected() {
        let mut file = AssetFile::from_json(MINIMAL).unwrap();
        file.animations.remove(&AnimationId::Kick);
        let err = file.into_stores().unwrap_err();
        assert_eq!(err, AnimationConfigError::MissingAnimation(AnimationId::Kick));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            AssetFile::from_json("{ not json").unwrap_err(),
            AnimationConfigError::Parse(_)
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = AssetFile::load_from_file("does/not/exist.json").unwrap_err();
        assert!(matches!(err, AnimationConfigError::Io { .. }));
    }

    #[test]
    fn builtin_assets_are_valid() {
        let (sprites, animations) = load_assets(None).unwrap();
        assert!(sprites.contains("stop_0"));
        assert_eq!(animations.get(AnimationId::WalkRight).playback, Playback::Loop);
    }
}
