//! Sprite pixel data keyed by name.
//!
//! Sprites are kept already packed into mode 0 bytes so blitting is a plain
//! byte copy. They are authored as rows of hex pen digits (one digit per
//! pixel) and converted with [`SpriteFrame::from_pen_rows`].

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;

use crate::resources::animationstore::AnimationConfigError;
use crate::resources::framebuffer::pack_mode0;

/// One frame of pixel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteFrame {
    /// Width in bytes (two pixels each).
    pub width: usize,
    /// Height in lines.
    pub height: usize,
    /// `width * height` mode 0 bytes, row by row.
    pub data: Vec<u8>,
}

impl SpriteFrame {
    /// Build a sprite from rows of hex pen digits such as `"00F1"`.
    ///
    /// Every row must have the same, even number of pixels.
    pub fn from_pen_rows<S: AsRef<str>>(
        key: &str,
        rows: &[S],
    ) -> Result<Self, AnimationConfigError> {
        let bad = |reason: String| AnimationConfigError::BadSprite {
            sprite: key.to_string(),
            reason,
        };

        let Some(first) = rows.first() else {
            return Err(bad("no rows".into()));
        };
        let pixels = first.as_ref().chars().count();
        if pixels == 0 {
            return Err(bad("empty rows".into()));
        }
        if pixels % 2 != 0 {
            return Err(bad(format!("row width {pixels} is odd")));
        }

        let width = pixels / 2;
        let mut data = Vec::with_capacity(width * rows.len());
        for (line, row) in rows.iter().enumerate() {
            let pens = row
                .as_ref()
                .chars()
                .map(|c| {
                    c.to_digit(16)
                        .map(|d| d as u8)
                        .ok_or_else(|| bad(format!("row {line}: '{c}' is not a pen digit")))
                })
                .collect::<Result<Vec<u8>, _>>()?;
            if pens.len() != pixels {
                return Err(bad(format!(
                    "row {line} has {} pixels, expected {pixels}",
                    pens.len()
                )));
            }
            data.extend(pens.chunks_exact(2).map(|pair| pack_mode0(pair[0], pair[1])));
        }

        Ok(Self {
            width,
            height: rows.len(),
            data,
        })
    }

    /// `(width, height)` as signed screen units.
    pub fn size(&self) -> (i32, i32) {
        (self.width as i32, self.height as i32)
    }
}

/// All sprites loaded for the scene.
#[derive(Resource, Debug, Clone, Default)]
pub struct SpriteStore {
    pub sprites: FxHashMap<String, SpriteFrame>,
}

impl SpriteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, sprite: SpriteFrame) {
        self.sprites.insert(key.into(), sprite);
    }

    pub fn get(&self, key: &str) -> Option<&SpriteFrame> {
        self.sprites.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.sprites.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::framebuffer::unpack_mode0;

    #[test]
    fn rows_are_packed_two_pixels_per_byte() {
        let sprite = SpriteFrame::from_pen_rows("s", &["01F3", "0000"]).unwrap();
        assert_eq!(sprite.width, 2);
        assert_eq!(sprite.height, 2);
        assert_eq!(unpack_mode0(sprite.data[0]), (0, 1));
        assert_eq!(unpack_mode0(sprite.data[1]), (15, 3));
        assert_eq!(sprite.data[2], 0);
    }

    #[test]
    fn rejects_malformed_rows() {
        let empty: [&str; 0] = [];
        assert!(SpriteFrame::from_pen_rows("s", &empty).is_err());
        assert!(SpriteFrame::from_pen_rows("s", &["012"]).is_err());
        assert!(SpriteFrame::from_pen_rows("s", &["0123", "01"]).is_err());
        let err = SpriteFrame::from_pen_rows("s", &["01G3"]).unwrap_err();
        assert!(matches!(
            err,
            AnimationConfigError::BadSprite { ref sprite, .. } if sprite == "s"
        ));
    }

    #[test]
    fn store_lookup() {
        let mut store = SpriteStore::new();
        store.insert("a", SpriteFrame::from_pen_rows("a", &["00"]).unwrap());
        assert!(store.contains("a"));
        assert!(store.get("b").is_none());
        assert_eq!(store.sprites.len(), 1);
    }
}
