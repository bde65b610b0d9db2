//! Movement domain: pure per-tick logic, no system params.
//!
//! Everything the simulate tick computes lives here so it can be unit tested
//! without spinning up an app; the systems only wire queries and messages.

use bevy::prelude::*;

use super::buffer::{BufferedAction, InputBuffer};
use super::components::{Facing, KinematicState, WallContact};
use crate::tuning::MovementTuning;

/// Intent magnitudes below this count as "no input" for rate selection.
const INPUT_EPSILON: f32 = 0.01;

/// Velocity magnitude below which a turn-around does not apply; a character
/// essentially at rest is accelerating, not turning.
const TURN_VELOCITY_THRESHOLD: f32 = 0.1;

/// Linear step from `current` toward `target` that never overshoots.
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + max_delta.copysign(target - current)
    }
}

/// One horizontal-velocity step: rate selection (build-up, coast-to-stop,
/// snap-turn) followed by a non-overshooting move toward the target speed.
pub fn horizontal_step(
    velocity_x: f32,
    intent_x: f32,
    airborne: bool,
    dt: f32,
    tuning: &MovementTuning,
) -> f32 {
    let target = intent_x * tuning.max_speed;

    let mut rate = if intent_x.abs() < INPUT_EPSILON {
        tuning.deceleration
    } else if intent_x * velocity_x < 0.0 && velocity_x.abs() > TURN_VELOCITY_THRESHOLD {
        tuning.deceleration * tuning.turn_around_multiplier
    } else {
        tuning.acceleration
    };

    if airborne {
        rate *= tuning.air_control_multiplier;
    }

    move_towards(velocity_x, target, rate * dt)
}

/// Asymmetric gravity scale: falling is heavier than rising.
pub fn gravity_scale_for(velocity_y: f32, tuning: &MovementTuning) -> f32 {
    if velocity_y < 0.0 {
        tuning.fall_gravity_multiplier * tuning.gravity_scale
    } else {
        tuning.gravity_scale
    }
}

/// Compute a unit dash direction from the stick, falling back to the facing
/// axis, with the vertical component clamped to `dash_max_angle`.
///
/// When the clamp fires, x is recomputed as `sqrt(1 - y^2)` so the result
/// stays unit length; its sign comes from the stick's x, or from facing when
/// the stick has no horizontal component.
pub fn dash_direction(intent: Vec2, facing: Facing, tuning: &MovementTuning) -> Vec2 {
    let mut direction = if intent.length() > tuning.dash_input_threshold {
        intent.normalize()
    } else {
        Vec2::new(facing.sign(), 0.0)
    };

    if direction.y.abs() > tuning.dash_max_angle {
        let clamped_y = tuning.dash_max_angle.copysign(direction.y);
        let x_sign = if intent.x.abs() > INPUT_EPSILON {
            intent.x.signum()
        } else {
            facing.sign()
        };
        direction = Vec2::new(x_sign * (1.0 - clamped_y * clamped_y).sqrt(), clamped_y);
    }

    direction
}

/// Wall-jump launch velocity: away from the wall, up at the configured angle,
/// scaled to the configured force.
pub fn wall_jump_velocity(wall: WallContact, tuning: &MovementTuning) -> Vec2 {
    let away_x = match wall {
        WallContact::Left => 1.0,
        WallContact::Right => -1.0,
        WallContact::None => 0.0,
    };
    Vec2::new(away_x, tuning.wall_jump_angle).normalize_or_zero() * tuning.wall_jump_force
}

/// How a buffered jump press resolved this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpOutcome {
    None,
    GroundJump,
    WallJump,
    /// Wall jump attempted without enough stamina: the press is spent but
    /// state and velocity hold.
    WallJumpRejected,
}

/// Resolve a buffered jump press into exactly one of ground jump, wall-jump
/// attempt, or nothing.
///
/// A ground jump sets the vertical velocity absolutely. A wall-jump attempt
/// consumes the press whether or not the stamina covers it, so a held button
/// cannot retry on a later tick; on success the launch vector replaces the
/// velocity and the input freeze starts.
pub fn resolve_jump(
    state: &mut KinematicState,
    buffer: &mut InputBuffer,
    velocity: &mut Vec2,
    tuning: &MovementTuning,
) -> JumpOutcome {
    if !buffer.is_buffered(BufferedAction::Jump) {
        return JumpOutcome::None;
    }

    if state.can_jump(tuning.coyote_time) {
        buffer.consume(BufferedAction::Jump);

        // Absolute, not additive.
        velocity.y = tuning.jump_force;
        state.is_jumping = true;
        state.jump_hold_time = 0.0;
        state.has_jumped_since_grounded = true;
        return JumpOutcome::GroundJump;
    }

    if state.wall_sliding {
        buffer.consume(BufferedAction::Jump);

        if state.try_spend_stamina(tuning.wall_jump_cost) {
            *velocity = wall_jump_velocity(state.touching_wall, tuning);
            state.wall_jump_freeze = tuning.wall_jump_freeze_time;
            return JumpOutcome::WallJump;
        }
        return JumpOutcome::WallJumpRejected;
    }

    JumpOutcome::None
}

/// One tick of variable-height bookkeeping for an active jump rise.
///
/// An early release scales the rise down by `jump_cut_multiplier` exactly
/// once and clears the jumping flag; the return value is the hold duration
/// when the cut fires. A rise that ends on its own just clears the flag.
pub fn jump_cut_step(
    state: &mut KinematicState,
    velocity_y: &mut f32,
    jump_held: bool,
    dt: f32,
    tuning: &MovementTuning,
) -> Option<f32> {
    if !state.is_jumping {
        return None;
    }

    state.jump_hold_time += dt;

    if *velocity_y <= 0.0 {
        // Rise ended on its own; nothing left to cut.
        state.is_jumping = false;
        return None;
    }

    if jump_held {
        return None;
    }

    *velocity_y *= tuning.jump_cut_multiplier;
    state.is_jumping = false;
    Some(state.jump_hold_time)
}
