//! ECS resources made available to systems.
//!
//! Overview
//! - `animationstore` – validated frame sequences for every animation
//! - `assetfile` – JSON asset format and loading into the stores
//! - `debugoverlay` – debug overlay state and its text lines
//! - `frameclock` – tick counter driven by the presentation loop
//! - `framebuffer` – emulated mode 0 screen memory and blit primitives
//! - `gameconfig` – INI-backed settings
//! - `input` – per-tick keyboard snapshot of the keys the game reads
//! - `palette` – pen to firmware colour assignment
//! - `spritestore` – mode 0 pixel data keyed by name
pub mod animationstore;
pub mod assetfile;
pub mod debugoverlay;
pub mod frameclock;
pub mod framebuffer;
pub mod gameconfig;
pub mod input;
pub mod palette;
pub mod spritestore;
