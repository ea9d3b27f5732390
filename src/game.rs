//! Scene setup and the per-tick schedule.
//!
//! [`initialize_cpc`] paints the static backdrop, [`build_world`] assembles
//! every resource and observer, [`spawn_persea`] adds the character, and
//! [`tick_schedule`] holds the simulation systems in their fixed order. The
//! binary wraps that schedule with keyboard scanning in front and
//! presentation behind.
use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use log::{info, warn};

use crate::components::animation::{Animation, AnimationRequest};
use crate::components::drawnregion::DrawnRegion;
use crate::components::inputcontrolled::{InputControlled, Persea};
use crate::components::mapposition::MapPosition;
use crate::events::animation::log_animation_change;
use crate::events::toggledebug::toggle_debug_overlay;
use crate::resources::animationstore::AnimationStore;
use crate::resources::frameclock::FrameClock;
use crate::resources::framebuffer::{FrameBuffer, SCREEN_HEIGHT, SCREEN_WIDTH_BYTES};
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::spritestore::SpriteStore;
use crate::systems::animation::{animation, apply_animation_requests};
use crate::systems::classifier::classify_input;
use crate::systems::render::render_entities;

/// Sky band, pens 3/3.
pub const SKY_BYTE: u8 = 0xCC;
pub const SKY_LINES: i32 = 60;
/// Floor strip, pens 15/15.
pub const FLOOR_BYTE: u8 = 0xFF;
pub const FLOOR_TOP: i32 = 96;
pub const FLOOR_LINES: i32 = 8;
/// Everything under the floor, pens 3/3.
pub const UNDERFLOOR_BYTE: u8 = 0xCC;

/// Paint the backdrop and save it for erasing.
pub fn initialize_cpc(framebuffer: &mut FrameBuffer) {
    framebuffer.draw_solid_box(0, 0, SCREEN_WIDTH_BYTES, SKY_LINES, SKY_BYTE);
    framebuffer.draw_solid_box(0, FLOOR_TOP, SCREEN_WIDTH_BYTES, FLOOR_LINES, FLOOR_BYTE);
    let underfloor = FLOOR_TOP + FLOOR_LINES;
    framebuffer.draw_solid_box(
        0,
        underfloor,
        SCREEN_WIDTH_BYTES,
        SCREEN_HEIGHT - underfloor,
        UNDERFLOOR_BYTE,
    );
    framebuffer.commit_background();
}

/// Spawn the keyboard-driven character standing still.
///
/// The configured position is clamped so the first frame fits on screen.
pub fn spawn_persea(world: &mut World, config: &GameConfig) -> Entity {
    let anim = Animation::default();
    let size = {
        let animations = world.resource::<AnimationStore>();
        let sprites = world.resource::<SpriteStore>();
        let frame = animations.get(anim.current).frame(anim.frame_index);
        sprites
            .get(&frame.sprite)
            .map(|s| s.size())
            .unwrap_or((0, 0))
    };
    let mut position = MapPosition::new(config.entity_x, config.entity_y);
    position.translate_clamped(0, 0, size, (SCREEN_WIDTH_BYTES, SCREEN_HEIGHT));
    if position != MapPosition::new(config.entity_x, config.entity_y) {
        warn!(
            "Persea start ({}, {}) is off screen; moved to ({}, {})",
            config.entity_x, config.entity_y, position.x, position.y
        );
    }

    let entity = world
        .spawn((
            Persea,
            InputControlled,
            anim,
            AnimationRequest::default(),
            position,
            DrawnRegion::default(),
        ))
        .id();
    info!("Persea spawned at ({}, {})", position.x, position.y);
    entity
}

/// Build a world with every resource and observer the tick needs.
///
/// Persea is not spawned; call [`spawn_persea`].
pub fn build_world(config: GameConfig, sprites: SpriteStore, animations: AnimationStore) -> World {
    let mut framebuffer = FrameBuffer::new();
    initialize_cpc(&mut framebuffer);

    let mut world = World::new();
    world.insert_resource(framebuffer);
    world.insert_resource(config.palette.clone());
    world.insert_resource(FrameClock::with_rate(config.target_fps));
    world.insert_resource(InputState::default());
    world.insert_resource(sprites);
    world.insert_resource(animations);
    world.insert_resource(config);

    world.spawn(Observer::new(log_animation_change));
    world.spawn(Observer::new(toggle_debug_overlay));
    // Observers must exist before any system triggers.
    world.flush();

    world
}

/// Simulation systems for one tick: request, arbitrate, advance, draw.
pub fn tick_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            classify_input,
            apply_animation_requests,
            animation,
            render_entities,
        )
            .chain(),
    );
    schedule
}
