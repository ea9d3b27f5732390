//! Markers for the keyboard-driven character.
//!
//! - [`InputControlled`] – the entity receives the classifier's request each tick
//! - [`Persea`] – tags the single on-screen character spawned at startup

use bevy_ecs::prelude::Component;

/// The entity's [`AnimationRequest`](crate::components::animation::AnimationRequest)
/// is fed from the keyboard classifier.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct InputControlled;

/// Tag for the Persea character.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Persea;
