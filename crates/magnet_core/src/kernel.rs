//! # Update Kernel
//!
//! The per-item state transition run once per slot per frame. It reads only
//! its own record plus the shared frame parameters and writes only its own
//! record, which is what lets [`ParallelDriver`](crate::ParallelDriver) run
//! it over disjoint indices with no locking.
//!
//! ```text
//! inactive ──────────────────────────────► park off-screen
//! active   ─► animate ─► pulling? ─ yes ─► advance pull ─► t >= 1 ? deactivate : lerp
//!                                  └ no ─► within radius ? start pull : stay
//!          ─► rebuild render pose
//! ```

use crate::ecs::{sprite_rect, AnimationState, ItemRecord, Transform};
use crate::math::{Vec3, Vec4};

/// Values shared by every kernel invocation in one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameParams {
    /// Chase target world position.
    pub target: Vec3,
    /// Seconds since the previous frame.
    pub delta_time: f32,
    /// Seconds from capture to despawn.
    pub pull_duration: f32,
    /// Target half-extent plus item half-extent.
    pub collision_radius: f32,
    /// Park position for inactive slots.
    pub hidden_position: Vec3,
}

/// Advances one item by one frame.
///
/// Pure: the result depends only on the arguments.
#[inline]
#[must_use]
pub fn update_item(mut record: ItemRecord, frame: &FrameParams) -> ItemRecord {
    if !record.active {
        record.transform = Transform::hidden(frame.hidden_position);
        return record;
    }

    advance_animation(
        &mut record.animation,
        &mut record.sprite_rect,
        frame.delta_time,
    );

    if record.pulling {
        record.pull_elapsed += frame.delta_time;
        let t = record.pull_elapsed / frame.pull_duration;
        if t >= 1.0 {
            record.position = frame.target;
            record.active = false;
        } else {
            record.position = record.start_position.lerp(frame.target, t);
        }
    } else if frame.target.distance(record.position) < frame.collision_radius {
        // Captured: movement starts next frame
        record.start_position = record.position;
        record.pulling = true;
        record.pull_elapsed = 0.0;
    }

    record.transform = if record.active {
        Transform::new(
            record.position,
            record.transform.rotation,
            record.transform.scale,
        )
    } else {
        Transform::hidden(frame.hidden_position)
    };
    record
}

/// Accumulates frame time and steps the atlas frame on each threshold crossing.
///
/// The reset is subtractive so variable frame rates do not drift. A single
/// step longer than a whole frame wraps the remainder instead of queueing
/// extra frames.
#[inline]
pub fn advance_animation(animation: &mut AnimationState, rect: &mut Vec4, delta_time: f32) {
    animation.animation_elapsed += delta_time;
    if animation.animation_elapsed < animation.frame_duration {
        return;
    }

    animation.current_frame = (animation.current_frame + 1) % animation.total_frames.max(1);
    *rect = sprite_rect(
        animation.atlas(),
        animation.color_index,
        animation.current_frame,
    );

    animation.animation_elapsed -= animation.frame_duration;
    if animation.animation_elapsed >= animation.frame_duration {
        animation.animation_elapsed =
            animation.animation_elapsed.rem_euclid(animation.frame_duration);
    }
}
