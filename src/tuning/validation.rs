//! Validation for tuning values: out-of-domain fields are clamped, never
//! allowed to reach the tick loop.

use super::data::MovementTuning;

/// A single clamped field with the value it arrived with and the value it kept.
#[derive(Debug, Clone, PartialEq)]
pub struct TuningViolation {
    pub field: &'static str,
    pub given: f32,
    pub clamped_to: f32,
}

impl std::fmt::Display for TuningViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "tuning field '{}' out of range: {} clamped to {}",
            self.field, self.given, self.clamped_to
        )
    }
}

/// Helper macro for clamping a field into its valid domain
macro_rules! clamp_field {
    ($errors:expr, $tuning:expr, $field:ident, $min:expr, $max:expr) => {
        if !($tuning.$field >= $min && $tuning.$field <= $max) {
            let clamped = $tuning.$field.clamp($min, $max);
            $errors.push(TuningViolation {
                field: stringify!($field),
                given: $tuning.$field,
                clamped_to: clamped,
            });
            $tuning.$field = clamped;
        }
    };
}

/// Clamp every field into its valid domain.
/// Returns the list of violations, empty if everything was in range.
pub fn validate_tuning(tuning: &mut MovementTuning) -> Vec<TuningViolation> {
    let mut errors = Vec::new();

    clamp_field!(errors, tuning, max_speed, 0.0, f32::INFINITY);
    clamp_field!(errors, tuning, acceleration, 0.0, f32::INFINITY);
    clamp_field!(errors, tuning, deceleration, 0.0, f32::INFINITY);
    clamp_field!(errors, tuning, turn_around_multiplier, 0.0, f32::INFINITY);
    clamp_field!(errors, tuning, air_control_multiplier, 0.0, f32::INFINITY);

    clamp_field!(errors, tuning, jump_force, 0.0, f32::INFINITY);
    clamp_field!(errors, tuning, jump_cut_multiplier, 0.0, 1.0);
    clamp_field!(errors, tuning, coyote_time, 0.0, f32::INFINITY);
    clamp_field!(errors, tuning, gravity, 0.0, f32::INFINITY);
    clamp_field!(errors, tuning, gravity_scale, 0.0, f32::INFINITY);
    clamp_field!(errors, tuning, fall_gravity_multiplier, 0.0, f32::INFINITY);

    // A deadzone of 1.0 would swallow the whole stick range.
    clamp_field!(errors, tuning, input_deadzone, 0.0, 0.95);
    clamp_field!(errors, tuning, input_buffer_time, 0.0, f32::INFINITY);

    clamp_field!(errors, tuning, ground_probe_distance, 0.0, f32::INFINITY);
    clamp_field!(errors, tuning, wall_probe_distance, 0.0, f32::INFINITY);

    clamp_field!(errors, tuning, dash_speed, 0.0, f32::INFINITY);
    clamp_field!(errors, tuning, dash_duration, 0.0, f32::INFINITY);
    clamp_field!(errors, tuning, dash_cooldown, 0.0, f32::INFINITY);
    clamp_field!(errors, tuning, post_dash_damping, 0.0, 1.0);
    clamp_field!(errors, tuning, dash_max_angle, 0.0, 1.0);
    clamp_field!(errors, tuning, dash_input_threshold, 0.0, 1.0);

    clamp_field!(errors, tuning, wall_slide_speed, 0.0, f32::INFINITY);
    clamp_field!(errors, tuning, wall_jump_force, 0.0, f32::INFINITY);
    clamp_field!(errors, tuning, wall_jump_angle, 0.0, f32::INFINITY);
    clamp_field!(errors, tuning, wall_jump_freeze_time, 0.0, f32::INFINITY);
    clamp_field!(errors, tuning, max_stamina, 0.0, f32::INFINITY);
    clamp_field!(errors, tuning, wall_jump_cost, 0.0, f32::INFINITY);
    clamp_field!(errors, tuning, stamina_regen_rate, 0.0, f32::INFINITY);

    // NaN slips through range comparisons above only when both bounds are
    // infinite; reset any remaining non-finite field to its default.
    let defaults = MovementTuning::default();
    macro_rules! reset_non_finite {
        ($field:ident) => {
            if !tuning.$field.is_finite() {
                errors.push(TuningViolation {
                    field: stringify!($field),
                    given: tuning.$field,
                    clamped_to: defaults.$field,
                });
                tuning.$field = defaults.$field;
            }
        };
    }
    reset_non_finite!(max_speed);
    reset_non_finite!(acceleration);
    reset_non_finite!(deceleration);
    reset_non_finite!(jump_force);
    reset_non_finite!(gravity);
    reset_non_finite!(dash_speed);
    reset_non_finite!(wall_jump_force);
    reset_non_finite!(max_stamina);

    errors
}
