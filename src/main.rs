//! Persea main entry point.
//!
//! An Amstrad CPC style character animation demo written in Rust using:
//! - **raylib** for the window and keyboard
//! - **bevy_ecs** for entity-component-system architecture
//!
//! A keyboard-driven character walks, hits, kicks, punches, dies, and wins
//! on a mode 0 screen emulated in software and scaled up to the window.
//!
//! # Controls
//!
//! | Key        | Animation  |
//! |------------|------------|
//! | Space      | hit        |
//! | Up         | kick       |
//! | Down       | fist       |
//! | Right      | walk right |
//! | Left       | walk left  |
//! | 1          | dead       |
//! | 2          | win        |
//! | F11        | debug overlay |
//!
//! When several keys are held, the one highest in the table wins.
//!
//! # Main Loop
//!
//! 1. Load `config.ini` and the sprite/animation assets
//! 2. Open the window, build the ECS world, spawn Persea
//! 3. Every tick: scan the keyboard, classify it into a request, arbitrate
//!    the request, advance the animation, blit, then present and wait for
//!    vertical sync
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --config config.ini
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use clap::Parser;
use log::{error, info, warn};

use persea::game;
use persea::resources::assetfile::load_assets;
use persea::resources::frameclock::FrameClock;
use persea::resources::gameconfig::GameConfig;
use persea::systems::classifier::classify_input;
use persea::systems::input::update_input_state;
use persea::systems::present::present_frame;
use persea::systems::render::render_entities;
use persea::systems::time::update_frame_clock;

/// Persea, a CPC character animation controller
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Configuration file (INI).
    #[arg(long, value_name = "PATH", default_value = "config.ini")]
    config: PathBuf,

    /// Asset file (JSON) overriding the configured or built-in one.
    #[arg(long, value_name = "PATH")]
    assets: Option<PathBuf>,

    /// Validate the asset file and exit without opening a window.
    #[arg(long)]
    check_assets: bool,

    /// Write the effective settings back to the config file and exit.
    #[arg(long)]
    write_config: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }
    if cli.assets.is_some() {
        config.assets_path = cli.assets;
    }

    if cli.write_config {
        if let Err(e) = config.save_to_file() {
            error!("{}", e);
            std::process::exit(1);
        }
        return;
    }

    let (sprites, animations) = match load_assets(config.assets_path.as_deref()) {
        Ok(stores) => stores,
        Err(e) => {
            error!("Invalid assets: {}", e);
            std::process::exit(1);
        }
    };
    info!(
        "Loaded {} sprites and {} animations",
        sprites.sprites.len(),
        animations.iter().count()
    );

    // Early-exit: validation only (no window needed)
    if cli.check_assets {
        info!("Assets OK");
        return;
    }

    // --------------- Raylib window ---------------
    let (width, height) = config.window_size();
    let mut builder = raylib::init();
    builder.size(width as i32, height as i32).title("Persea");
    if config.vsync {
        builder.vsync();
    }
    let (mut rl, thread) = builder.build();
    rl.set_target_fps(config.target_fps);
    // Disable ESC to exit
    rl.set_exit_key(None);

    // --------------- ECS world + resources ---------------
    let persea_config = config.clone();
    let mut world = game::build_world(config, sprites, animations);
    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);
    game::spawn_persea(&mut world, &persea_config);

    let mut update = game::tick_schedule();
    update.add_systems(update_input_state.before(classify_input));
    update.add_systems(present_frame.after(render_entities));

    // --------------- Main loop ---------------
    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
    {
        update.run(&mut world);
        update_frame_clock(&mut world);
        world.clear_trackers();
    }
    info!("Bye after {} ticks", world.resource::<FrameClock>().ticks);
}
