//! Tuning domain: load-time-immutable movement parameters.

mod data;
mod loader;
mod validation;

pub use data::MovementTuning;
pub use loader::{TuningLoadError, load_tuning, parse_tuning};
pub use validation::{TuningViolation, validate_tuning};

use bevy::prelude::*;
use std::path::Path;

/// Default location of the tuning file, relative to the working directory.
const TUNING_PATH: &str = "assets/data/movement.ron";

pub struct TuningPlugin;

impl Plugin for TuningPlugin {
    fn build(&self, app: &mut App) {
        let mut tuning = match load_tuning(Path::new(TUNING_PATH)) {
            Ok(tuning) => tuning,
            Err(e) => {
                warn!("{}; falling back to default movement tuning", e);
                MovementTuning::default()
            }
        };

        for violation in validate_tuning(&mut tuning) {
            warn!("{}", violation);
        }

        info!(
            "Movement tuning loaded: max_speed={}, jump_force={}, dash_speed={}",
            tuning.max_speed, tuning.jump_force, tuning.dash_speed
        );

        app.insert_resource(tuning);
    }
}
