//! Animation systems.
//!
//! - [`apply_animation_requests`] arbitrates the tick's request against the
//!   current animation (see [`apply_request`]).
//! - [`animation`] advances playback by exactly one tick (see [`advance`]),
//!   hands one-shot animations over to their successor, and applies the
//!   movement of each newly entered frame.
//!
//! # Animation Flow
//!
//! 1. [`crate::systems::classifier::classify_input`] fills [`AnimationRequest`]
//! 2. `apply_animation_requests` consumes it, pre-empting whatever is playing
//! 3. `animation` steps the frame counter using [`AnimationStore`] data
//! 4. [`crate::systems::render::render_entities`] draws the updated frame
//!
//! Transitions trigger [`AnimationChangedEvent`].

use bevy_ecs::prelude::*;

use crate::components::animation::{Animation, AnimationId, AnimationRequest};
use crate::components::mapposition::MapPosition;
use crate::events::animation::{AnimationChangedEvent, TransitionCause};
use crate::resources::animationstore::{AnimationDef, AnimationStore, Playback};
use crate::resources::framebuffer::{SCREEN_HEIGHT, SCREEN_WIDTH_BYTES};
use crate::resources::spritestore::SpriteStore;

/// A change of current animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: AnimationId,
    pub to: AnimationId,
}

/// Outcome of one [`advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The frame timer ran but the frame is still showing.
    Held,
    /// Moved to the next frame of the same animation.
    Stepped,
    /// A one-shot animation reached its end and switched to its successor.
    Completed(Transition),
    /// A no-successor one-shot entered its last frame.
    Finished,
    /// A no-successor one-shot is resting on its last frame.
    Resting,
}

impl Advance {
    /// Whether a new frame was entered.
    pub fn entered_frame(self) -> bool {
        matches!(
            self,
            Advance::Stepped | Advance::Completed(_) | Advance::Finished
        )
    }
}

/// Arbitrate a request against the current animation.
///
/// A request for a different animation always wins, even over a one-shot
/// that has not finished; playback restarts at frame 0. A request for the
/// animation already playing, or no request at all, leaves playback alone.
pub fn apply_request(anim: &mut Animation, request: Option<AnimationId>) -> Option<Transition> {
    let to = request?;
    if to == anim.current {
        return None;
    }
    let from = anim.current;
    anim.restart(to);
    Some(Transition { from, to })
}

/// Advance playback by one tick.
///
/// `def` must be the definition of `anim.current`.
pub fn advance(anim: &mut Animation, def: &AnimationDef) -> Advance {
    let count = def.frame_count();
    debug_assert!(anim.frame_index < count, "frame index out of range");

    let last = anim.frame_index + 1 >= count;
    if last && def.playback == Playback::Hold {
        return Advance::Resting;
    }

    anim.frame_timer += 1;
    if anim.frame_timer < def.frame(anim.frame_index).hold {
        return Advance::Held;
    }
    anim.frame_timer = 0;

    match def.playback {
        Playback::Loop => {
            anim.frame_index = (anim.frame_index + 1) % count;
            Advance::Stepped
        }
        Playback::Then(next) if last => {
            let from = anim.current;
            anim.restart(next);
            Advance::Completed(Transition { from, to: next })
        }
        Playback::Then(_) => {
            anim.frame_index += 1;
            Advance::Stepped
        }
        Playback::Hold => {
            anim.frame_index += 1;
            if anim.frame_index + 1 == count {
                Advance::Finished
            } else {
                Advance::Stepped
            }
        }
    }
}

/// Apply each entity's pending request and clear it.
pub fn apply_animation_requests(
    mut query: Query<(Entity, &mut Animation, &mut AnimationRequest)>,
    mut commands: Commands,
) {
    for (entity, mut anim, mut request) in query.iter_mut() {
        if let Some(Transition { from, to }) = apply_request(&mut anim, request.take()) {
            commands.trigger(AnimationChangedEvent {
                entity,
                from,
                to,
                cause: TransitionCause::Request,
            });
        }
    }
}

/// Advance every animation one tick and move entities whose new frame
/// carries motion.
///
/// Movement is clamped so the frame's sprite stays on screen.
pub fn animation(
    mut query: Query<(Entity, &mut Animation, Option<&mut MapPosition>)>,
    animation_store: Res<AnimationStore>,
    sprites: Res<SpriteStore>,
    mut commands: Commands,
) {
    for (entity, mut anim, maybe_position) in query.iter_mut() {
        let def = animation_store.get(anim.current);
        let outcome = advance(&mut anim, def);

        if let Advance::Completed(Transition { from, to }) = outcome {
            commands.trigger(AnimationChangedEvent {
                entity,
                from,
                to,
                cause: TransitionCause::Completed,
            });
        }

        if !outcome.entered_frame() {
            continue;
        }
        let Some(mut position) = maybe_position else {
            continue;
        };
        let frame = animation_store.get(anim.current).frame(anim.frame_index);
        if frame.dx == 0 && frame.dy == 0 {
            continue;
        }
        let size = sprites
            .get(&frame.sprite)
            .map(|s| s.size())
            .unwrap_or((0, 0));
        position.translate_clamped(
            frame.dx,
            frame.dy,
            size,
            (SCREEN_WIDTH_BYTES, SCREEN_HEIGHT),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::animationstore::FrameDescriptor;

    fn frames(n: usize) -> Vec<FrameDescriptor> {
        (0..n).map(|i| FrameDescriptor::new(format!("f{i}"))).collect()
    }

    fn at(current: AnimationId, frame_index: usize) -> Animation {
        Animation {
            current,
            frame_index,
            frame_timer: 0,
        }
    }

    // --- apply_request ---

    #[test]
    fn no_request_changes_nothing() {
        let mut anim = at(AnimationId::Hit, 2);
        anim.frame_timer = 1;
        assert_eq!(apply_request(&mut anim, None), None);
        assert_eq!(anim, Animation { frame_timer: 1, ..at(AnimationId::Hit, 2) });
    }

    #[test]
    fn same_request_keeps_progress() {
        for id in AnimationId::ALL {
            let mut anim = at(id, 3);
            anim.frame_timer = 2;
            assert_eq!(apply_request(&mut anim, Some(id)), None);
            assert_eq!(anim.frame_index, 3);
            assert_eq!(anim.frame_timer, 2);
        }
    }

    #[test]
    fn different_request_preempts_and_resets() {
        for from in AnimationId::ALL {
            for to in AnimationId::ALL.into_iter().filter(|&to| to != from) {
                let mut anim = at(from, 2);
                anim.frame_timer = 5;
                assert_eq!(
                    apply_request(&mut anim, Some(to)),
                    Some(Transition { from, to })
                );
                assert_eq!(anim, at(to, 0));
            }
        }
    }

    #[test]
    fn request_interrupts_unfinished_one_shot() {
        let def = AnimationDef::then(frames(3), AnimationId::Stop);
        let mut anim = at(AnimationId::Kick, 0);
        advance(&mut anim, &def);
        assert_eq!(anim.frame_index, 1);

        apply_request(&mut anim, Some(AnimationId::WalkLeft));
        assert_eq!(anim, at(AnimationId::WalkLeft, 0));
    }

    // --- advance ---

    #[test]
    fn looping_wraps_around() {
        let def = AnimationDef::looping(frames(4));
        let mut anim = at(AnimationId::WalkLeft, 0);
        let indices: Vec<usize> = (0..6)
            .map(|_| {
                advance(&mut anim, &def);
                anim.frame_index
            })
            .collect();
        assert_eq!(indices, vec![1, 2, 3, 0, 1, 2]);
    }

    #[test]
    fn looping_never_changes_animation() {
        let def = AnimationDef::looping(frames(4));
        let mut anim = at(AnimationId::WalkLeft, 0);
        for _ in 0..4000 {
            assert_eq!(advance(&mut anim, &def), Advance::Stepped);
            assert!(anim.frame_index < 4);
        }
        assert_eq!(anim.current, AnimationId::WalkLeft);
        assert_eq!(anim.frame_index, 0);
    }

    #[test]
    fn one_shot_completes_into_successor() {
        let def = AnimationDef::then(frames(3), AnimationId::Stop);
        let mut anim = at(AnimationId::Hit, 0);
        assert_eq!(advance(&mut anim, &def), Advance::Stepped);
        assert_eq!(advance(&mut anim, &def), Advance::Stepped);
        assert_eq!(anim, at(AnimationId::Hit, 2));
        assert_eq!(
            advance(&mut anim, &def),
            Advance::Completed(Transition {
                from: AnimationId::Hit,
                to: AnimationId::Stop
            })
        );
        assert_eq!(anim, at(AnimationId::Stop, 0));
    }

    #[test]
    fn single_frame_one_shot_completes_on_first_tick() {
        let def = AnimationDef::then(frames(1), AnimationId::Stop);
        let mut anim = at(AnimationId::Fist, 0);
        assert!(matches!(advance(&mut anim, &def), Advance::Completed(_)));
        assert_eq!(anim, at(AnimationId::Stop, 0));
    }

    #[test]
    fn hold_playback_rests_on_last_frame() {
        let def = AnimationDef::hold(frames(3));
        let mut anim = at(AnimationId::Dead, 0);
        assert_eq!(advance(&mut anim, &def), Advance::Stepped);
        assert_eq!(advance(&mut anim, &def), Advance::Finished);
        for _ in 0..10 {
            assert_eq!(advance(&mut anim, &def), Advance::Resting);
        }
        assert_eq!(anim, at(AnimationId::Dead, 2));
    }

    #[test]
    fn frame_hold_delays_step() {
        let def = AnimationDef::looping([
            FrameDescriptor::new("a").with_hold(3),
            FrameDescriptor::new("b"),
        ]);
        let mut anim = at(AnimationId::Stop, 0);
        assert_eq!(advance(&mut anim, &def), Advance::Held);
        assert_eq!(anim.frame_timer, 1);
        assert_eq!(advance(&mut anim, &def), Advance::Held);
        assert_eq!(advance(&mut anim, &def), Advance::Stepped);
        assert_eq!((anim.frame_index, anim.frame_timer), (1, 0));
        assert_eq!(advance(&mut anim, &def), Advance::Stepped);
        assert_eq!(anim.frame_index, 0);
    }

    #[test]
    fn every_advance_changes_state() {
        let defs = [
            AnimationDef::looping(frames(4)),
            AnimationDef::then(frames(3), AnimationId::Stop),
            AnimationDef::looping([
                FrameDescriptor::new("a").with_hold(2),
                FrameDescriptor::new("b"),
            ]),
        ];
        for def in &defs {
            let mut anim = at(AnimationId::Kick, 0);
            for _ in 0..20 {
                if anim.current != AnimationId::Kick {
                    break;
                }
                let before = anim;
                advance(&mut anim, def);
                assert_ne!(before, anim);
            }
        }
    }

    #[test]
    fn frame_index_stays_in_range() {
        let def = AnimationDef::then(
            [
                FrameDescriptor::new("a").with_hold(2),
                FrameDescriptor::new("b"),
                FrameDescriptor::new("c").with_hold(3),
            ],
            AnimationId::Hit,
        );
        let mut anim = at(AnimationId::Hit, 0);
        for _ in 0..100 {
            advance(&mut anim, &def);
            assert!(anim.frame_index < def.frame_count());
        }
    }
}
