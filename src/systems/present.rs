//! Frame buffer to host window.
//!
//! [`present_frame`] opens a Raylib drawing scope, paints the mode 0 screen
//! as runs of same-pen pixels scaled to the window, optionally draws the
//! debug overlay, and closes the scope. Closing the scope swaps buffers,
//! which waits for vertical sync when it is enabled, so the tick that
//! follows starts on a fresh frame.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::components::animation::Animation;
use crate::components::inputcontrolled::Persea;
use crate::components::mapposition::MapPosition;
use crate::resources::debugoverlay::DebugOverlay;
use crate::resources::frameclock::FrameClock;
use crate::resources::framebuffer::{FrameBuffer, SCREEN_HEIGHT, unpack_mode0};
use crate::resources::gameconfig::GameConfig;
use crate::resources::palette::Palette;

/// A horizontal run of pixels sharing one pen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PenRun {
    /// First mode 0 pixel of the run.
    pub start: i32,
    pub len: i32,
    pub pen: u8,
}

/// Split one scan line of mode 0 bytes into same-pen runs.
pub fn pen_runs(line: &[u8]) -> Vec<PenRun> {
    let mut runs: Vec<PenRun> = Vec::new();
    let pixels = line.iter().flat_map(|&byte| {
        let (left, right) = unpack_mode0(byte);
        [left, right]
    });
    for (px, pen) in pixels.enumerate() {
        match runs.last_mut() {
            Some(run) if run.pen == pen => run.len += 1,
            _ => runs.push(PenRun {
                start: px as i32,
                len: 1,
                pen,
            }),
        }
    }
    runs
}

fn pen_colour(palette: &Palette, pen: u8) -> Color {
    let [r, g, b] = palette.rgb(pen);
    Color::new(r, g, b, 255)
}

/// Draw the frame buffer and end the frame.
#[allow(clippy::too_many_arguments)]
pub fn present_frame(
    mut rl: NonSendMut<RaylibHandle>,
    thread: NonSend<RaylibThread>,
    framebuffer: Res<FrameBuffer>,
    palette: Res<Palette>,
    config: Res<GameConfig>,
    clock: Res<FrameClock>,
    overlay: Option<Res<DebugOverlay>>,
    persea: Query<(&Animation, &MapPosition), With<Persea>>,
) {
    let scale = config.scale as i32;
    // Mode 0 pixels are twice as wide as they are tall.
    let (pixel_w, pixel_h) = (2 * scale, scale);

    let mut d = rl.begin_drawing(&thread);
    d.clear_background(Color::BLACK);

    for y in 0..SCREEN_HEIGHT {
        for run in pen_runs(framebuffer.line(y)) {
            d.draw_rectangle(
                run.start * pixel_w,
                y * pixel_h,
                run.len * pixel_w,
                pixel_h,
                pen_colour(&palette, run.pen),
            );
        }
    }

    if let Some(overlay) = overlay {
        let fps = d.get_fps();
        d.draw_text(&overlay.header(fps, &clock), 10, 10, 10, Color::WHITE);
        for (row, (anim, position)) in persea.iter().enumerate() {
            let text = DebugOverlay::entity_line(anim, position);
            d.draw_text(&text, 10, 30 + 20 * row as i32, 10, Color::WHITE);
        }
    }
    // Dropping `d` ends the drawing scope.
}
