//! Animation transition event.
//!
//! [`AnimationChangedEvent`] is triggered whenever an entity's current
//! animation changes, either because a request pre-empted it or because a
//! one-shot animation completed and handed over to its successor.
//!
//! ```ignore
//! world.add_observer(log_animation_change);
//! ```

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::animation::AnimationId;

/// Why an animation changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionCause {
    /// A request for a different animation arrived.
    Request,
    /// A one-shot animation played its last frame.
    Completed,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationChangedEvent {
    pub entity: Entity,
    pub from: AnimationId,
    pub to: AnimationId,
    pub cause: TransitionCause,
}

/// Observer that logs every transition at debug level.
pub fn log_animation_change(trigger: On<AnimationChangedEvent>) {
    let event = trigger.event();
    debug!(
        "{:?}: {} -> {} ({:?})",
        event.entity, event.from, event.to, event.cause
    );
}
