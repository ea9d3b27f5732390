//! Record of the screen area covered by an entity's last blit.
//!
//! Blits overwrite the frame buffer unconditionally, so the renderer restores
//! the backdrop under this region before drawing the next frame.

use bevy_ecs::prelude::Component;

/// Rectangle in mode 0 bytes (x, width) and lines (y, height).
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawnRegion {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl DrawnRegion {
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}
