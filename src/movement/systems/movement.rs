//! Movement domain: the simulate-tick velocity update.
//!
//! Systems here run chained in `FixedUpdate`, after the probes, in the
//! strict order dash -> horizontal -> jump -> gravity -> slide clamp. Dash
//! fully overrides the later stages for its duration.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::movement::events::{DashStartedEvent, JumpKind, JumpReleasedEvent, JumpStartedEvent};
use crate::movement::kinematics::{
    JumpOutcome, dash_direction, gravity_scale_for, horizontal_step, jump_cut_step, resolve_jump,
};
use crate::movement::{BufferedAction, InputBuffer, KinematicState, Player};
use crate::tuning::MovementTuning;

/// Dash state machine. The buffered press is consumed only at entry; a press
/// during cooldown stays buffered and fires the moment the guard opens.
pub(crate) fn update_dash(
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    mut buffer: ResMut<InputBuffer>,
    mut dash_events: MessageWriter<DashStartedEvent>,
    mut query: Query<(Entity, &mut KinematicState, &mut LinearVelocity), With<Player>>,
) {
    let dt = time.delta_secs();

    for (entity, mut state, mut velocity) in &mut query {
        if state.dash_cooldown > 0.0 {
            state.dash_cooldown = (state.dash_cooldown - dt).max(0.0);
        }

        if buffer.is_buffered(BufferedAction::Dash) && state.can_dash(tuning.air_dash_allowed) {
            buffer.consume(BufferedAction::Dash);

            // Cooldown runs from entry, independent of dash duration.
            state.dash_cooldown = tuning.dash_cooldown;
            state.dash_elapsed = 0.0;
            state.is_dashing = true;
            state.dash_direction = dash_direction(buffer.intent(), state.facing, &tuning);

            dash_events.write(DashStartedEvent {
                entity,
                direction: state.dash_direction,
            });
            debug!("Dash started: direction={:?}", state.dash_direction);
        }

        if state.is_dashing {
            velocity.0 = state.dash_direction * tuning.dash_speed;
            state.dash_elapsed += dt;

            if state.dash_elapsed >= tuning.dash_duration {
                state.is_dashing = false;
                velocity.0 *= tuning.post_dash_damping;
            }
        }
    }
}

/// Horizontal velocity update. Skipped entirely while dashing or during the
/// post-wall-jump freeze so those impulses are not eroded.
pub(crate) fn apply_horizontal(
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    buffer: Res<InputBuffer>,
    mut query: Query<(&mut KinematicState, &mut LinearVelocity), With<Player>>,
) {
    let dt = time.delta_secs();

    for (mut state, mut velocity) in &mut query {
        // The freeze timer decrements every tick, whatever else is happening.
        if state.wall_jump_freeze > 0.0 {
            state.wall_jump_freeze = (state.wall_jump_freeze - dt).max(0.0);
            continue;
        }
        if state.is_dashing {
            continue;
        }

        velocity.x = horizontal_step(
            velocity.x,
            buffer.intent().x,
            !state.grounded,
            dt,
            &tuning,
        );
    }
}

/// Jump launch, wall-jump hand-off, and the variable-height cut.
///
/// A buffered press resolves to exactly one of ground jump or wall jump; the
/// buffer is consumed either way, so an insufficient-stamina wall jump is a
/// silent no-op that cannot re-fire on a later tick.
pub(crate) fn apply_jump(
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    mut buffer: ResMut<InputBuffer>,
    mut jump_events: MessageWriter<JumpStartedEvent>,
    mut release_events: MessageWriter<JumpReleasedEvent>,
    mut query: Query<(Entity, &mut KinematicState, &mut LinearVelocity), With<Player>>,
) {
    let dt = time.delta_secs();

    for (entity, mut state, mut velocity) in &mut query {
        if state.is_dashing {
            continue;
        }

        match resolve_jump(&mut state, &mut buffer, &mut velocity.0, &tuning) {
            JumpOutcome::GroundJump => {
                jump_events.write(JumpStartedEvent {
                    entity,
                    kind: JumpKind::Ground,
                });
                debug!(
                    "Ground jump: grounded={}, time_since_grounded={}",
                    state.grounded, state.time_since_grounded
                );
            }
            JumpOutcome::WallJump => {
                jump_events.write(JumpStartedEvent {
                    entity,
                    kind: JumpKind::Wall,
                });
                debug!(
                    "Wall jump: wall={:?}, stamina now {}",
                    state.touching_wall, state.stamina
                );
            }
            JumpOutcome::WallJumpRejected => {
                debug!(
                    "Wall jump rejected: stamina {} < cost {}",
                    state.stamina, tuning.wall_jump_cost
                );
            }
            JumpOutcome::None => {}
        }

        // Variable jump height: an early release scales the rise down once.
        let jump_held = buffer.is_held(BufferedAction::Jump);
        if let Some(hold_duration) = jump_cut_step(&mut state, &mut velocity.y, jump_held, dt, &tuning)
        {
            release_events.write(JumpReleasedEvent {
                entity,
                hold_duration,
            });
        }
    }
}

/// Constant downward acceleration with an asymmetric scale: falling is
/// heavier than rising. Suspended while dashing.
pub(crate) fn apply_gravity(
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    mut query: Query<(&KinematicState, &mut LinearVelocity), With<Player>>,
) {
    let dt = time.delta_secs();

    for (state, mut velocity) in &mut query {
        if state.is_dashing {
            continue;
        }

        velocity.y -= tuning.gravity * gravity_scale_for(velocity.y, &tuning) * dt;
    }
}

/// Wall-slide fall cap. Runs after gravity so the clamp holds within the
/// tick; it slows the fall, never accelerates it.
pub(crate) fn apply_wall_slide(
    tuning: Res<MovementTuning>,
    mut query: Query<(&KinematicState, &mut LinearVelocity), With<Player>>,
) {
    for (state, mut velocity) in &mut query {
        if state.is_dashing {
            continue;
        }
        if state.wall_sliding && velocity.y < 0.0 {
            velocity.y = velocity.y.max(-tuning.wall_slide_speed);
        }
    }
}

pub(crate) fn update_facing(
    buffer: Res<InputBuffer>,
    mut query: Query<&mut KinematicState, With<Player>>,
) {
    for mut state in &mut query {
        // Facing is pinned during dash and the wall-jump freeze.
        if state.is_dashing || state.wall_jump_freeze > 0.0 {
            continue;
        }

        let x = buffer.intent().x;
        if x > 0.0 {
            state.facing = crate::movement::Facing::Right;
        } else if x < 0.0 {
            state.facing = crate::movement::Facing::Left;
        }
    }
}
