//! Game systems.
//!
//! This module groups the ECS systems run once per tick, in this order.
//!
//! Submodules overview
//! - [`input`] – scan the keyboard into [`crate::resources::input::InputState`]
//! - [`classifier`] – turn the key snapshot into an animation request
//! - [`animation`] – arbitrate requests and advance playback
//! - [`render`] – erase and blit sprites into the frame buffer
//! - [`present`] – draw the frame buffer on the window and wait for vsync
//! - [`time`] – count ticks

pub mod animation;
pub mod classifier;
pub mod input;
pub mod present;
pub mod render;
pub mod time;
