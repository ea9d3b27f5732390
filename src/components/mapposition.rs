use bevy_ecs::prelude::Component;

/// Screen position of an entity's top-left corner.
///
/// `x` is measured in mode 0 bytes (two pixels each), `y` in scan lines,
/// matching how the CPC addresses video memory.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MapPosition {
    pub x: i32,
    pub y: i32,
}

impl MapPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move by `(dx, dy)`, keeping a `width`x`height` box inside
    /// `screen_width`x`screen_height`.
    pub fn translate_clamped(
        &mut self,
        dx: i32,
        dy: i32,
        (width, height): (i32, i32),
        (screen_width, screen_height): (i32, i32),
    ) {
        let max_x = (screen_width - width).max(0);
        let max_y = (screen_height - height).max(0);
        self.x = self.x.saturating_add(dx).clamp(0, max_x);
        self.y = self.y.saturating_add(dy).clamp(0, max_y);
    }
}
