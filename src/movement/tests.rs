//! Movement domain: unit tests for buffering, kinematic math, and mechanic
//! state predicates.

use bevy::prelude::*;

use super::buffer::{InputBuffer, rescale_deadzone};
use super::components::{Facing, KinematicState, WallContact};
use super::kinematics::{
    JumpOutcome, dash_direction, gravity_scale_for, horizontal_step, jump_cut_step, move_towards,
    resolve_jump, wall_jump_velocity,
};
use super::BufferedAction;
use crate::tuning::MovementTuning;

const EPSILON: f32 = 1e-5;

fn tuning() -> MovementTuning {
    MovementTuning::default()
}

// -----------------------------------------------------------------------------
// Input buffer tests
// -----------------------------------------------------------------------------

#[test]
fn test_press_opens_buffer_window() {
    let mut buffer = InputBuffer::default();
    assert!(!buffer.is_buffered(BufferedAction::Jump));

    buffer.on_press(BufferedAction::Jump, 0.1);
    assert!(buffer.is_buffered(BufferedAction::Jump));
    assert!(buffer.is_held(BufferedAction::Jump));
}

#[test]
fn test_buffer_window_expires() {
    let mut buffer = InputBuffer::default();
    buffer.on_press(BufferedAction::Jump, 0.1);

    buffer.sample_tick(Vec2::ZERO, 0.2, 0.05);
    assert!(buffer.is_buffered(BufferedAction::Jump));

    buffer.sample_tick(Vec2::ZERO, 0.2, 0.06);
    assert!(!buffer.is_buffered(BufferedAction::Jump));
}

#[test]
fn test_held_flag_outlives_buffer() {
    let mut buffer = InputBuffer::default();
    buffer.on_press(BufferedAction::Jump, 0.1);
    buffer.sample_tick(Vec2::ZERO, 0.2, 0.5);

    assert!(!buffer.is_buffered(BufferedAction::Jump));
    assert!(buffer.is_held(BufferedAction::Jump));

    buffer.on_release(BufferedAction::Jump);
    assert!(!buffer.is_held(BufferedAction::Jump));
}

#[test]
fn test_release_does_not_close_window() {
    let mut buffer = InputBuffer::default();
    buffer.on_press(BufferedAction::Jump, 0.1);
    buffer.on_release(BufferedAction::Jump);

    // A tap still registers within the window.
    assert!(buffer.is_buffered(BufferedAction::Jump));
}

#[test]
fn test_consume_is_idempotent() {
    let mut buffer = InputBuffer::default();
    buffer.on_press(BufferedAction::Jump, 0.1);

    buffer.consume(BufferedAction::Jump);
    assert!(!buffer.is_buffered(BufferedAction::Jump));

    buffer.consume(BufferedAction::Jump);
    assert!(!buffer.is_buffered(BufferedAction::Jump));
    // Held state is untouched by consumption.
    assert!(buffer.is_held(BufferedAction::Jump));
}

#[test]
fn test_repress_resets_window_instead_of_accumulating() {
    let mut buffer = InputBuffer::default();
    buffer.on_press(BufferedAction::Dash, 0.1);
    buffer.sample_tick(Vec2::ZERO, 0.2, 0.08);

    buffer.on_press(BufferedAction::Dash, 0.1);
    // 0.1 remaining, not 0.12: the window resets rather than stacks.
    buffer.sample_tick(Vec2::ZERO, 0.2, 0.09);
    assert!(buffer.is_buffered(BufferedAction::Dash));
    buffer.sample_tick(Vec2::ZERO, 0.2, 0.02);
    assert!(!buffer.is_buffered(BufferedAction::Dash));
}

#[test]
fn test_actions_buffer_independently() {
    let mut buffer = InputBuffer::default();
    buffer.on_press(BufferedAction::Jump, 0.1);

    assert!(buffer.is_buffered(BufferedAction::Jump));
    assert!(!buffer.is_buffered(BufferedAction::Dash));

    buffer.consume(BufferedAction::Jump);
    buffer.on_press(BufferedAction::Dash, 0.1);
    assert!(buffer.is_buffered(BufferedAction::Dash));
    assert!(!buffer.is_buffered(BufferedAction::Jump));
}

// -----------------------------------------------------------------------------
// Deadzone rescale tests
// -----------------------------------------------------------------------------

#[test]
fn test_deadzone_zeroes_small_inputs() {
    assert_eq!(rescale_deadzone(Vec2::new(0.1, 0.05), 0.2), Vec2::ZERO);
    assert_eq!(rescale_deadzone(Vec2::ZERO, 0.2), Vec2::ZERO);
    assert_eq!(rescale_deadzone(Vec2::ZERO, 0.0), Vec2::ZERO);
}

#[test]
fn test_deadzone_rescales_magnitude_and_keeps_direction() {
    let out = rescale_deadzone(Vec2::new(0.6, 0.0), 0.2);
    // (0.6 - 0.2) / (1 - 0.2) = 0.5
    assert!((out.x - 0.5).abs() < EPSILON);
    assert_eq!(out.y, 0.0);

    let diagonal = rescale_deadzone(Vec2::new(0.5, 0.5), 0.2);
    assert!((diagonal.x - diagonal.y).abs() < EPSILON);
}

#[test]
fn test_deadzone_clamps_full_deflection_to_unit() {
    let out = rescale_deadzone(Vec2::new(1.0, 1.0), 0.2);
    assert!(out.length() <= 1.0 + EPSILON);
}

// -----------------------------------------------------------------------------
// Horizontal movement tests
// -----------------------------------------------------------------------------

#[test]
fn test_move_towards_never_overshoots() {
    assert_eq!(move_towards(0.0, 10.0, 3.0), 3.0);
    assert_eq!(move_towards(9.0, 10.0, 3.0), 10.0);
    assert_eq!(move_towards(10.0, 10.0, 3.0), 10.0);
    assert_eq!(move_towards(0.0, -10.0, 3.0), -3.0);
}

#[test]
fn test_first_tick_acceleration_scenario() {
    // max_speed=8, acceleration=60, full input from rest, dt=0.02
    // => velocity.x = min(8, 60 * 0.02) = 1.2
    let t = MovementTuning {
        max_speed: 8.0,
        acceleration: 60.0,
        ..Default::default()
    };
    let vx = horizontal_step(0.0, 1.0, false, 0.02, &t);
    assert!((vx - 1.2).abs() < EPSILON);
}

#[test]
fn test_speed_converges_to_and_never_exceeds_max() {
    let t = MovementTuning {
        max_speed: 8.0,
        acceleration: 60.0,
        ..Default::default()
    };
    let mut vx = 0.0;
    for _ in 0..200 {
        vx = horizontal_step(vx, 1.0, false, 0.02, &t);
        assert!(vx.abs() <= t.max_speed + EPSILON);
    }
    assert!((vx - t.max_speed).abs() < EPSILON);
}

#[test]
fn test_no_input_selects_deceleration() {
    let t = MovementTuning {
        max_speed: 100.0,
        acceleration: 1000.0,
        deceleration: 50.0,
        ..Default::default()
    };
    // Coasting: one tick removes exactly deceleration * dt.
    let vx = horizontal_step(100.0, 0.0, false, 0.1, &t);
    assert!((vx - 95.0).abs() < EPSILON);
}

#[test]
fn test_opposing_input_selects_turnaround_rate() {
    let t = MovementTuning {
        max_speed: 100.0,
        acceleration: 10.0,
        deceleration: 50.0,
        turn_around_multiplier: 2.0,
        ..Default::default()
    };
    // Moving right, pushing left: rate = 50 * 2 = 100 per second.
    let vx = horizontal_step(100.0, -1.0, false, 0.1, &t);
    assert!((vx - 90.0).abs() < EPSILON);
}

#[test]
fn test_air_control_scales_rate() {
    let t = MovementTuning {
        max_speed: 100.0,
        acceleration: 60.0,
        air_control_multiplier: 0.5,
        ..Default::default()
    };
    let grounded = horizontal_step(0.0, 1.0, false, 0.1, &t);
    let airborne = horizontal_step(0.0, 1.0, true, 0.1, &t);
    assert!((grounded - 6.0).abs() < EPSILON);
    assert!((airborne - 3.0).abs() < EPSILON);
}

#[test]
fn test_accelerating_from_rest_is_not_a_turnaround() {
    let t = MovementTuning {
        max_speed: 100.0,
        acceleration: 60.0,
        deceleration: 10.0,
        turn_around_multiplier: 5.0,
        ..Default::default()
    };
    // vx == 0 must pick plain acceleration whichever way the stick points.
    let right = horizontal_step(0.0, 1.0, false, 0.1, &t);
    let left = horizontal_step(0.0, -1.0, false, 0.1, &t);
    assert!((right - 6.0).abs() < EPSILON);
    assert!((left + 6.0).abs() < EPSILON);
}

// -----------------------------------------------------------------------------
// Coyote window / jump predicate tests
// -----------------------------------------------------------------------------

#[test]
fn test_can_jump_while_grounded() {
    let mut state = KinematicState::new(100.0);
    state.grounded = true;
    assert!(state.can_jump(0.12));
}

#[test]
fn test_can_jump_within_coyote_window() {
    // Ungrounded for 0.05s with a 0.12s window: jump still legal.
    let mut state = KinematicState::new(100.0);
    state.grounded = false;
    state.time_since_grounded = 0.05;
    assert!(state.can_jump(0.12));
}

#[test]
fn test_cannot_jump_beyond_coyote_window() {
    let mut state = KinematicState::new(100.0);
    state.grounded = false;
    state.time_since_grounded = 0.2;
    assert!(!state.can_jump(0.12));
}

#[test]
fn test_jump_lock_blocks_air_jump_chains() {
    let mut state = KinematicState::new(100.0);
    state.grounded = false;
    state.time_since_grounded = 0.05;
    state.has_jumped_since_grounded = true;
    // Inside the coyote window but already jumped: locked out.
    assert!(!state.can_jump(0.12));

    state.on_landed(100.0);
    state.grounded = true;
    assert!(state.can_jump(0.12));
}

#[test]
fn test_airborne_press_beyond_coyote_yields_no_jump() {
    // The press stays buffered, the predicate stays false: zero jumps.
    let mut buffer = InputBuffer::default();
    buffer.on_press(BufferedAction::Jump, 0.1);

    let mut state = KinematicState::new(100.0);
    state.grounded = false;
    state.time_since_grounded = 0.5;
    state.has_jumped_since_grounded = true;

    assert!(buffer.is_buffered(BufferedAction::Jump));
    assert!(!state.can_jump(0.12));
}

#[test]
fn test_no_free_jump_before_first_landing() {
    // A freshly spawned airborne character has never been grounded; the
    // coyote window only opens after a real landing.
    let state = KinematicState::new(100.0);
    assert!(!state.can_jump(0.12));

    let mut state = KinematicState::new(100.0);
    state.grounded = true;
    state.time_since_grounded = 0.0;
    assert!(state.can_jump(0.12));
}

#[test]
fn test_landing_clears_jump_state_and_refills_stamina() {
    let mut state = KinematicState::new(100.0);
    state.has_jumped_since_grounded = true;
    state.is_jumping = true;
    state.jump_hold_time = 0.3;
    state.stamina = 12.0;

    state.on_landed(100.0);

    assert!(!state.has_jumped_since_grounded);
    assert!(!state.is_jumping);
    assert_eq!(state.jump_hold_time, 0.0);
    assert_eq!(state.stamina, 100.0);
}

// -----------------------------------------------------------------------------
// Jump resolution tests
// -----------------------------------------------------------------------------

#[test]
fn test_ground_jump_sets_absolute_velocity_and_consumes_buffer() {
    let t = tuning();
    let mut state = KinematicState::new(t.max_stamina);
    state.grounded = true;
    state.time_since_grounded = 0.0;

    let mut buffer = InputBuffer::default();
    buffer.on_press(BufferedAction::Jump, 0.1);

    // Falling slightly when the press lands: the jump force replaces, never
    // adds to, the vertical velocity.
    let mut velocity = Vec2::new(40.0, -15.0);
    let outcome = resolve_jump(&mut state, &mut buffer, &mut velocity, &t);

    assert_eq!(outcome, JumpOutcome::GroundJump);
    assert_eq!(velocity.y, t.jump_force);
    assert_eq!(velocity.x, 40.0);
    assert!(state.is_jumping);
    assert!(state.has_jumped_since_grounded);
    assert!(!buffer.is_buffered(BufferedAction::Jump));
}

#[test]
fn test_consumed_press_cannot_fire_a_second_action() {
    let t = tuning();
    let mut state = KinematicState::new(t.max_stamina);
    state.grounded = true;
    state.time_since_grounded = 0.0;

    let mut buffer = InputBuffer::default();
    buffer.on_press(BufferedAction::Jump, 0.1);

    let mut velocity = Vec2::ZERO;
    assert_eq!(
        resolve_jump(&mut state, &mut buffer, &mut velocity, &t),
        JumpOutcome::GroundJump
    );

    // Same press, next tick: nothing left to resolve.
    assert_eq!(
        resolve_jump(&mut state, &mut buffer, &mut velocity, &t),
        JumpOutcome::None
    );
}

#[test]
fn test_wall_jump_launches_away_and_starts_freeze() {
    let t = tuning();
    let mut state = KinematicState::new(t.max_stamina);
    state.grounded = false;
    state.time_since_grounded = 1.0;
    state.has_jumped_since_grounded = true;
    state.touching_wall = WallContact::Left;
    state.wall_sliding = true;

    let mut buffer = InputBuffer::default();
    buffer.on_press(BufferedAction::Jump, 0.1);

    let mut velocity = Vec2::new(0.0, -80.0);
    let outcome = resolve_jump(&mut state, &mut buffer, &mut velocity, &t);

    assert_eq!(outcome, JumpOutcome::WallJump);
    assert!(velocity.x > 0.0 && velocity.y > 0.0);
    assert_eq!(state.stamina, t.max_stamina - t.wall_jump_cost);
    assert_eq!(state.wall_jump_freeze, t.wall_jump_freeze_time);
    assert!(!buffer.is_buffered(BufferedAction::Jump));
}

#[test]
fn test_failed_wall_jump_still_consumes_buffer() {
    // stamina=10 against cost=30: silent no-op, but the press is spent so a
    // held button cannot retry on a later tick.
    let t = MovementTuning {
        wall_jump_cost: 30.0,
        ..Default::default()
    };
    let mut state = KinematicState::new(t.max_stamina);
    state.grounded = false;
    state.time_since_grounded = 1.0;
    state.has_jumped_since_grounded = true;
    state.touching_wall = WallContact::Right;
    state.wall_sliding = true;
    state.stamina = 10.0;

    let mut buffer = InputBuffer::default();
    buffer.on_press(BufferedAction::Jump, 0.1);

    let mut velocity = Vec2::new(0.0, -60.0);
    let outcome = resolve_jump(&mut state, &mut buffer, &mut velocity, &t);

    assert_eq!(outcome, JumpOutcome::WallJumpRejected);
    assert_eq!(velocity, Vec2::new(0.0, -60.0));
    assert_eq!(state.stamina, 10.0);
    assert_eq!(state.wall_jump_freeze, 0.0);
    assert!(!buffer.is_buffered(BufferedAction::Jump));

    // And the same press cannot re-attempt next tick.
    assert_eq!(
        resolve_jump(&mut state, &mut buffer, &mut velocity, &t),
        JumpOutcome::None
    );
}

#[test]
fn test_airborne_press_away_from_walls_stays_buffered() {
    // Neither jump is legal: the window is left intact for a late landing.
    let t = tuning();
    let mut state = KinematicState::new(t.max_stamina);
    state.grounded = false;
    state.time_since_grounded = 1.0;
    state.has_jumped_since_grounded = true;

    let mut buffer = InputBuffer::default();
    buffer.on_press(BufferedAction::Jump, 0.1);

    let mut velocity = Vec2::ZERO;
    assert_eq!(
        resolve_jump(&mut state, &mut buffer, &mut velocity, &t),
        JumpOutcome::None
    );
    assert!(buffer.is_buffered(BufferedAction::Jump));
}

// -----------------------------------------------------------------------------
// Jump cut tests
// -----------------------------------------------------------------------------

#[test]
fn test_jump_cut_applies_exactly_once() {
    let t = MovementTuning {
        jump_cut_multiplier: 0.5,
        ..Default::default()
    };
    let mut state = KinematicState::new(t.max_stamina);
    state.is_jumping = true;

    let mut vy = 400.0;
    let hold = jump_cut_step(&mut state, &mut vy, false, 0.02, &t);

    assert!(hold.is_some());
    assert_eq!(vy, 200.0);
    assert!(!state.is_jumping);

    // Subsequent ticks with the button still up must not cut again.
    assert_eq!(jump_cut_step(&mut state, &mut vy, false, 0.02, &t), None);
    assert_eq!(vy, 200.0);
}

#[test]
fn test_jump_cut_waits_while_button_held() {
    let t = tuning();
    let mut state = KinematicState::new(t.max_stamina);
    state.is_jumping = true;

    let mut vy = 400.0;
    assert_eq!(jump_cut_step(&mut state, &mut vy, true, 0.02, &t), None);
    assert_eq!(vy, 400.0);
    assert!(state.is_jumping);
}

#[test]
fn test_jump_cut_reports_hold_duration() {
    let t = tuning();
    let mut state = KinematicState::new(t.max_stamina);
    state.is_jumping = true;

    let mut vy = 400.0;
    for _ in 0..5 {
        assert_eq!(jump_cut_step(&mut state, &mut vy, true, 0.02, &t), None);
    }
    let hold = jump_cut_step(&mut state, &mut vy, false, 0.02, &t);
    // Five held ticks plus the release tick.
    assert!((hold.unwrap() - 0.12).abs() < EPSILON);
}

#[test]
fn test_rise_ending_naturally_clears_flag_without_cut() {
    let t = tuning();
    let mut state = KinematicState::new(t.max_stamina);
    state.is_jumping = true;

    // Past the apex: already falling when the button releases.
    let mut vy = -10.0;
    assert_eq!(jump_cut_step(&mut state, &mut vy, false, 0.02, &t), None);
    assert_eq!(vy, -10.0);
    assert!(!state.is_jumping);
}

// -----------------------------------------------------------------------------
// Gravity scaling tests
// -----------------------------------------------------------------------------

#[test]
fn test_gravity_scale_is_asymmetric() {
    let t = MovementTuning {
        gravity_scale: 1.0,
        fall_gravity_multiplier: 1.6,
        ..Default::default()
    };
    assert_eq!(gravity_scale_for(100.0, &t), 1.0);
    assert_eq!(gravity_scale_for(0.0, &t), 1.0);
    assert!((gravity_scale_for(-100.0, &t) - 1.6).abs() < EPSILON);
}

// -----------------------------------------------------------------------------
// Dash direction tests
// -----------------------------------------------------------------------------

#[test]
fn test_dash_direction_follows_stick() {
    let t = tuning();
    let dir = dash_direction(Vec2::new(1.0, 0.0), Facing::Left, &t);
    assert!((dir - Vec2::X).length() < EPSILON);
}

#[test]
fn test_dash_direction_falls_back_to_facing() {
    let t = tuning();
    let dir = dash_direction(Vec2::ZERO, Facing::Left, &t);
    assert!((dir - Vec2::NEG_X).length() < EPSILON);
}

#[test]
fn test_dash_direction_is_always_unit_length() {
    let t = tuning();
    for intent in [
        Vec2::ZERO,
        Vec2::new(1.0, 1.0),
        Vec2::new(0.0, -1.0),
        Vec2::new(-0.4, 0.9),
        Vec2::new(0.7, 0.1),
    ] {
        let dir = dash_direction(intent, Facing::Right, &t);
        assert!(
            (dir.length() - 1.0).abs() < EPSILON,
            "non-unit direction {:?} for intent {:?}",
            dir,
            intent
        );
    }
}

#[test]
fn test_dash_angle_clamp_uses_facing_for_x_sign() {
    // Straight-up stick with max_angle 0.8: y clamps to exactly 0.8 and
    // x = sqrt(1 - 0.64) with sign taken from last facing.
    let t = MovementTuning {
        dash_max_angle: 0.8,
        ..Default::default()
    };
    let expected_x = (1.0f32 - 0.64).sqrt();

    let dir = dash_direction(Vec2::new(0.0, 1.0), Facing::Left, &t);
    assert!((dir.y - 0.8).abs() < EPSILON);
    assert!((dir.x + expected_x).abs() < EPSILON);

    let dir = dash_direction(Vec2::new(0.0, 1.0), Facing::Right, &t);
    assert!((dir.x - expected_x).abs() < EPSILON);
}

#[test]
fn test_dash_angle_clamp_uses_stick_for_x_sign_when_present() {
    let t = MovementTuning {
        dash_max_angle: 0.5,
        ..Default::default()
    };
    let dir = dash_direction(Vec2::new(-0.2, 0.98).normalize(), Facing::Right, &t);
    assert!((dir.y - 0.5).abs() < EPSILON);
    assert!(dir.x < 0.0, "x sign should follow the stick, got {:?}", dir);
    assert!((dir.length() - 1.0).abs() < EPSILON);
}

#[test]
fn test_downward_dash_clamps_to_negative_max_angle() {
    let t = MovementTuning {
        dash_max_angle: 0.8,
        ..Default::default()
    };
    let dir = dash_direction(Vec2::new(0.0, -1.0), Facing::Right, &t);
    assert!((dir.y + 0.8).abs() < EPSILON);
    assert!(dir.x > 0.0);
}

#[test]
fn test_dash_entry_guard() {
    let mut state = KinematicState::new(100.0);
    state.grounded = true;
    assert!(state.can_dash(false));

    state.dash_cooldown = 0.2;
    assert!(!state.can_dash(false));

    state.dash_cooldown = 0.0;
    state.is_dashing = true;
    assert!(!state.can_dash(false));

    state.is_dashing = false;
    state.grounded = false;
    assert!(!state.can_dash(false));
    assert!(state.can_dash(true));
}

#[test]
fn test_post_dash_damping_is_deterministic() {
    let t = tuning();
    let pre_completion = (Vec2::X * t.dash_speed).length();
    let post = pre_completion * t.post_dash_damping;
    assert!((post - t.dash_speed * t.post_dash_damping).abs() < EPSILON);
}

// -----------------------------------------------------------------------------
// Wall interaction tests
// -----------------------------------------------------------------------------

#[test]
fn test_wall_jump_velocity_points_away_from_wall() {
    let t = tuning();
    let from_left = wall_jump_velocity(WallContact::Left, &t);
    let from_right = wall_jump_velocity(WallContact::Right, &t);

    assert!(from_left.x > 0.0 && from_left.y > 0.0);
    assert!(from_right.x < 0.0 && from_right.y > 0.0);
    assert!((from_left.length() - t.wall_jump_force).abs() < 1e-2);
    assert!((from_right.length() - t.wall_jump_force).abs() < 1e-2);
}

#[test]
fn test_insufficient_stamina_rejects_wall_jump() {
    // stamina=10 against cost=30: no state change.
    let mut state = KinematicState::new(100.0);
    state.stamina = 10.0;

    assert!(!state.try_spend_stamina(30.0));
    assert_eq!(state.stamina, 10.0);
}

#[test]
fn test_wall_jump_spends_stamina() {
    let mut state = KinematicState::new(100.0);
    assert!(state.try_spend_stamina(25.0));
    assert_eq!(state.stamina, 75.0);
}

#[test]
fn test_stamina_regen_clamps_at_max() {
    let mut state = KinematicState::new(100.0);
    state.stamina = 95.0;

    state.regen_stamina(20.0, 100.0, 0.1);
    assert_eq!(state.stamina, 97.0);

    for _ in 0..100 {
        state.regen_stamina(20.0, 100.0, 0.1);
        assert!(state.stamina <= 100.0);
        assert!(state.stamina >= 0.0);
    }
    assert_eq!(state.stamina, 100.0);
}
