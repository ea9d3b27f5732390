//! Emulated mode 0 screen memory.
//!
//! The CPC in mode 0 shows 160x200 pixels with 16 pens. Each byte of video
//! memory holds two horizontally adjacent pixels, with the pen bits of both
//! interleaved:
//!
//! ```text
//! bit   7   6   5   4   3   2   1   0
//!      L0  R0  L2  R2  L1  R1  L3  R3
//! ```
//!
//! The buffer here is stored linearly (80 bytes per line) rather than with
//! the hardware's 2 KiB line interleave, since nothing reads it back through
//! CPC addresses. A second copy holds the backdrop so that moving sprites can
//! be erased by restoring what was underneath.

use bevy_ecs::prelude::Resource;

use crate::components::drawnregion::DrawnRegion;
use crate::resources::spritestore::SpriteFrame;

/// Screen width in bytes (two mode 0 pixels per byte).
pub const SCREEN_WIDTH_BYTES: i32 = 80;
/// Screen height in scan lines.
pub const SCREEN_HEIGHT: i32 = 200;
/// Screen width in mode 0 pixels.
pub const SCREEN_WIDTH_PIXELS: i32 = SCREEN_WIDTH_BYTES * 2;

const BUFFER_LEN: usize = (SCREEN_WIDTH_BYTES * SCREEN_HEIGHT) as usize;

/// Pack two pens (0..=15) into one mode 0 byte.
pub fn pack_mode0(left: u8, right: u8) -> u8 {
    let l = left & 0x0F;
    let r = right & 0x0F;
    ((l & 0x01) << 7)
        | ((l & 0x02) << 2)
        | ((l & 0x04) << 3)
        | ((l & 0x08) >> 2)
        | ((r & 0x01) << 6)
        | ((r & 0x02) << 1)
        | ((r & 0x04) << 2)
        | ((r & 0x08) >> 3)
}

/// Split a mode 0 byte into its (left, right) pens.
pub fn unpack_mode0(byte: u8) -> (u8, u8) {
    let left = ((byte >> 7) & 0x01)
        | ((byte >> 2) & 0x02)
        | ((byte >> 3) & 0x04)
        | ((byte << 2) & 0x08);
    let right = ((byte >> 6) & 0x01)
        | ((byte >> 1) & 0x02)
        | ((byte >> 2) & 0x04)
        | ((byte << 3) & 0x08);
    (left, right)
}

/// Visible screen plus saved backdrop.
#[derive(Resource, Clone)]
pub struct FrameBuffer {
    pixels: Vec<u8>,
    background: Vec<u8>,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    /// A screen cleared to pen 0.
    pub fn new() -> Self {
        Self {
            pixels: vec![0; BUFFER_LEN],
            background: vec![0; BUFFER_LEN],
        }
    }

    fn offset(x: i32, y: i32) -> usize {
        (y * SCREEN_WIDTH_BYTES + x) as usize
    }

    /// Intersect a rectangle with the screen.
    fn clip(x: i32, y: i32, width: i32, height: i32) -> Option<DrawnRegion> {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = x.saturating_add(width).min(SCREEN_WIDTH_BYTES);
        let y1 = y.saturating_add(height).min(SCREEN_HEIGHT);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some(DrawnRegion {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        })
    }

    /// Fill a rectangle of the visible screen with one byte value.
    pub fn draw_solid_box(&mut self, x: i32, y: i32, width: i32, height: i32, byte: u8) {
        let Some(region) = Self::clip(x, y, width, height) else {
            return;
        };
        for line in region.y..region.y + region.height {
            let start = Self::offset(region.x, line);
            self.pixels[start..start + region.width as usize].fill(byte);
        }
    }

    /// Save the current visible screen as the backdrop.
    pub fn commit_background(&mut self) {
        self.background.copy_from_slice(&self.pixels);
    }

    /// Copy a sprite to `(x, y)`, overwriting whatever is there.
    ///
    /// Parts falling outside the screen are clipped. Returns the area that
    /// was actually written, or an empty region if nothing was.
    pub fn blit(&mut self, sprite: &SpriteFrame, x: i32, y: i32) -> DrawnRegion {
        let Some(region) = Self::clip(x, y, sprite.width as i32, sprite.height as i32) else {
            return DrawnRegion::default();
        };
        let src_x = (region.x - x) as usize;
        let src_y = (region.y - y) as usize;
        let run = region.width as usize;
        for row in 0..region.height as usize {
            let src = (src_y + row) * sprite.width + src_x;
            let dst = Self::offset(region.x, region.y + row as i32);
            self.pixels[dst..dst + run].copy_from_slice(&sprite.data[src..src + run]);
        }
        region
    }

    /// Put the backdrop back over `region`.
    pub fn restore(&mut self, region: DrawnRegion) {
        if region.is_empty() {
            return;
        }
        let Some(region) = Self::clip(region.x, region.y, region.width, region.height) else {
            return;
        };
        for line in region.y..region.y + region.height {
            let start = Self::offset(region.x, line);
            let end = start + region.width as usize;
            self.pixels[start..end].copy_from_slice(&self.background[start..end]);
        }
    }

    /// Pen of mode 0 pixel `(px, y)`.
    #[cfg(test)]
    pub(crate) fn pen_at(&self, px: i32, y: i32) -> u8 {
        let (left, right) = unpack_mode0(self.line(y)[(px / 2) as usize]);
        if px % 2 == 0 { left } else { right }
    }

    /// One scan line of raw bytes.
    pub fn line(&self, y: i32) -> &[u8] {
        let start = Self::offset(0, y);
        &self.pixels[start..start + SCREEN_WIDTH_BYTES as usize]
    }
}
