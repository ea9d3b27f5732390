//! Persea library.
//!
//! Exposes the ECS components, resources, systems, and events driving the
//! Persea character, for the binary and for integration tests.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
