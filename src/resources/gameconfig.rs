//! Game configuration resource.
//!
//! Settings loaded from an INI file. Every value has a default, so a missing
//! file or key is never fatal.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! scale = 3
//! target_fps = 50
//! vsync = true
//!
//! [video]
//! palette = 14,0,15,11,2,6,26,13,3,9,18,24,12,4,22,21
//!
//! [assets]
//! path = assets/persea.json
//!
//! [entity]
//! x = 37
//! y = 72
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::fmt::Display;
use std::ops::RangeInclusive;
use std::path::PathBuf;

use crate::resources::framebuffer::{SCREEN_HEIGHT, SCREEN_WIDTH_BYTES, SCREEN_WIDTH_PIXELS};
use crate::resources::palette::{PERSEA_PALETTE, Palette};

/// Default safe values for startup
const DEFAULT_SCALE: u32 = 3;
const DEFAULT_TARGET_FPS: u32 = 50;
const DEFAULT_VSYNC: bool = true;
const DEFAULT_ENTITY_X: i32 = 37;
const DEFAULT_ENTITY_Y: i32 = 72;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";
/// Largest accepted window scale (2880x1800 at 9).
const MAX_SCALE: u32 = 9;
const MAX_TARGET_FPS: u32 = 1000;

/// Game configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Window pixels per CPC scan line; a mode 0 pixel is twice as wide.
    pub scale: u32,
    /// Tick rate: 50 for PAL, 60 for NTSC machines.
    pub target_fps: u32,
    /// Wait for the monitor's vertical sync when presenting.
    pub vsync: bool,
    /// Mode 0 palette.
    pub palette: Palette,
    /// Asset file overriding the built-in one.
    pub assets_path: Option<PathBuf>,
    /// Persea's starting position (bytes, lines).
    pub entity_x: i32,
    pub entity_y: i32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            target_fps: DEFAULT_TARGET_FPS,
            vsync: DEFAULT_VSYNC,
            palette: Palette::from_firmware(&PERSEA_PALETTE).unwrap_or_default(),
            assets_path: None,
            entity_x: DEFAULT_ENTITY_X,
            entity_y: DEFAULT_ENTITY_Y,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values. Malformed or
    /// out-of-range values are reported and the current value kept.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [window] section
        if let Some(scale) = self.read_int("window", "scale", &config, 1..=MAX_SCALE) {
            self.scale = scale;
        }
        if let Some(fps) = self.read_int("window", "target_fps", &config, 1..=MAX_TARGET_FPS) {
            self.target_fps = fps;
        }
        if let Some(vsync) = config.getbool("window", "vsync").ok().flatten() {
            self.vsync = vsync;
        }

        // [video] section
        if let Some(list) = config.get("video", "palette") {
            match Palette::parse(&list) {
                Ok(palette) => self.palette = palette,
                Err(e) => warn!("Ignoring palette from {:?}: {}", self.config_path, e),
            }
        }

        // [assets] section
        if let Some(path) = config.get("assets", "path") {
            self.assets_path = Some(PathBuf::from(path));
        }

        // [entity] section
        if let Some(x) = self.read_int("entity", "x", &config, 0..=SCREEN_WIDTH_BYTES - 1) {
            self.entity_x = x;
        }
        if let Some(y) = self.read_int("entity", "y", &config, 0..=SCREEN_HEIGHT - 1) {
            self.entity_y = y;
        }

        info!(
            "Loaded config: scale={}, fps={}, vsync={}, entity at ({}, {}), assets={:?}",
            self.scale, self.target_fps, self.vsync, self.entity_x, self.entity_y, self.assets_path
        );

        Ok(())
    }

    /// Read an integer key that must fall in `range`.
    ///
    /// Anything unparsable or out of range is reported and `None` returned,
    /// so the caller keeps its current value.
    fn read_int<T>(
        &self,
        section: &str,
        key: &str,
        config: &Ini,
        range: RangeInclusive<T>,
    ) -> Option<T>
    where
        T: TryFrom<i64> + PartialOrd + Display,
    {
        let raw = match config.getint(section, key) {
            Ok(value) => value?,
            Err(e) => {
                warn!("Ignoring [{}] {} in {:?}: {}", section, key, self.config_path, e);
                return None;
            }
        };
        match T::try_from(raw) {
            Ok(value) if range.contains(&value) => Some(value),
            _ => {
                warn!(
                    "Ignoring [{}] {} = {} in {:?}: expected {}..={}",
                    section,
                    key,
                    raw,
                    self.config_path,
                    range.start(),
                    range.end()
                );
                None
            }
        }
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("window", "scale", Some(self.scale.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));
        config.set("window", "vsync", Some(self.vsync.to_string()));

        config.set("video", "palette", Some(self.palette.to_list()));

        if let Some(path) = &self.assets_path {
            config.set("assets", "path", Some(path.display().to_string()));
        }

        config.set("entity", "x", Some(self.entity_x.to_string()));
        config.set("entity", "y", Some(self.entity_y.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Window size in host pixels for the 160x200 mode 0 screen.
    pub fn window_size(&self) -> (u32, u32) {
        (
            (SCREEN_WIDTH_PIXELS as u32 * 2).saturating_mul(self.scale),
            (SCREEN_HEIGHT as u32).saturating_mul(self.scale),
        )
    }
}
