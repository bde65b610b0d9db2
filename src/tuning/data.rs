//! Tuning domain: the immutable movement parameter set.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Every tunable the simulator reads. Loaded once from RON at startup,
/// validated, and never mutated afterwards.
#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MovementTuning {
    // Horizontal movement
    pub max_speed: f32,
    pub acceleration: f32,
    pub deceleration: f32,
    pub turn_around_multiplier: f32,
    pub air_control_multiplier: f32,

    // Jump & gravity
    pub jump_force: f32,
    pub jump_cut_multiplier: f32,
    pub coyote_time: f32,
    pub gravity: f32,
    pub gravity_scale: f32,
    pub fall_gravity_multiplier: f32,

    // Input
    pub input_deadzone: f32,
    pub input_buffer_time: f32,

    // Probes
    pub ground_probe_distance: f32,
    pub wall_probe_distance: f32,

    // Dash
    pub dash_speed: f32,
    pub dash_duration: f32,
    pub dash_cooldown: f32,
    pub post_dash_damping: f32,
    pub air_dash_allowed: bool,
    /// Maximum |y| component of the dash direction (unit-vector space).
    pub dash_max_angle: f32,
    /// Minimum stick magnitude before the dash follows the stick instead of facing.
    pub dash_input_threshold: f32,

    // Wall interaction
    pub wall_slide_speed: f32,
    pub wall_jump_force: f32,
    /// Vertical component fed into the wall-jump direction before normalization.
    pub wall_jump_angle: f32,
    pub wall_jump_freeze_time: f32,
    pub max_stamina: f32,
    pub wall_jump_cost: f32,
    pub stamina_regen_rate: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            max_speed: 320.0,
            acceleration: 3000.0,
            deceleration: 2600.0,
            turn_around_multiplier: 1.6,
            air_control_multiplier: 0.65,

            jump_force: 680.0,
            jump_cut_multiplier: 0.5,
            coyote_time: 0.12,
            gravity: 1800.0,
            gravity_scale: 1.0,
            fall_gravity_multiplier: 1.6,

            input_deadzone: 0.2,
            input_buffer_time: 0.1,

            ground_probe_distance: 4.0,
            wall_probe_distance: 4.0,

            dash_speed: 900.0,
            dash_duration: 0.16,
            dash_cooldown: 0.35,
            post_dash_damping: 0.4,
            air_dash_allowed: false,
            dash_max_angle: 0.8,
            dash_input_threshold: 0.3,

            wall_slide_speed: 100.0,
            wall_jump_force: 720.0,
            wall_jump_angle: 1.5,
            wall_jump_freeze_time: 0.15,
            max_stamina: 100.0,
            wall_jump_cost: 25.0,
            stamina_regen_rate: 20.0,
        }
    }
}
