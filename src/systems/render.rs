//! Software blitter.
//!
//! [`render_entities`] draws every animated entity into the
//! [`FrameBuffer`] the way the CPC firmware would: first each entity's
//! previous blit is covered with the saved backdrop, then the sprite of the
//! current frame is copied in at the entity's position. Presenting the
//! buffer on the host window is [`crate::systems::present`]'s job.
use bevy_ecs::prelude::*;
use log::warn;

use crate::components::animation::Animation;
use crate::components::drawnregion::DrawnRegion;
use crate::components::mapposition::MapPosition;
use crate::resources::animationstore::AnimationStore;
use crate::resources::framebuffer::FrameBuffer;
use crate::resources::spritestore::SpriteStore;

/// Erase last tick's sprites and blit this tick's.
pub fn render_entities(
    mut framebuffer: ResMut<FrameBuffer>,
    animations: Res<AnimationStore>,
    sprites: Res<SpriteStore>,
    mut query: Query<(&Animation, &MapPosition, &mut DrawnRegion)>,
) {
    // Erase everything before drawing anything, so overlapping entities
    // don't wipe each other.
    for (_, _, region) in query.iter() {
        framebuffer.restore(*region);
    }

    for (anim, position, mut region) in query.iter_mut() {
        let frame = animations.get(anim.current).frame(anim.frame_index);
        match sprites.get(&frame.sprite) {
            Some(sprite) => {
                *region = framebuffer.blit(sprite, position.x, position.y);
            }
            None => {
                warn!(
                    "Sprite '{}' for {} frame {} not found",
                    frame.sprite, anim.current, anim.frame_index
                );
                *region = DrawnRegion::default();
            }
        }
    }
}
