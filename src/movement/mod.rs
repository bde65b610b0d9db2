//! Movement domain: fixed-tick kinematic character simulation.
//!
//! Two cooperative rates: input is sampled every `Update` frame (sense tick)
//! into the [`InputBuffer`]; all physics and state-machine work happens in
//! `FixedUpdate` (simulate tick) as one strictly ordered chain:
//! wall probe -> ground probe -> dash -> horizontal -> jump -> gravity ->
//! slide clamp. Nothing outside this module writes `LinearVelocity` or
//! [`KinematicState`].

mod buffer;
mod components;
pub mod events;
mod kinematics;
mod systems;
#[cfg(test)]
mod tests;

pub use buffer::{BufferedAction, InputBuffer};
pub use components::{Facing, GameLayer, Ground, KinematicState, Player, Wall, WallContact};
pub use events::{DashStartedEvent, JumpKind, JumpReleasedEvent, JumpStartedEvent, LandedEvent};

use bevy::prelude::*;

use crate::movement::systems::{
    apply_gravity, apply_horizontal, apply_jump, apply_wall_slide, detect_ground, detect_walls,
    sample_input, update_dash, update_facing,
};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputBuffer>()
            .add_message::<JumpStartedEvent>()
            .add_message::<JumpReleasedEvent>()
            .add_message::<DashStartedEvent>()
            .add_message::<LandedEvent>()
            .add_systems(Update, sample_input)
            .add_systems(PostStartup, check_simulation_wiring)
            .add_systems(
                FixedUpdate,
                (
                    detect_walls,
                    detect_ground,
                    update_dash,
                    apply_horizontal,
                    apply_jump,
                    apply_gravity,
                    apply_wall_slide,
                    update_facing,
                )
                    .chain(),
            );
    }
}

/// One-shot startup diagnostic: if a collaborator is missing the simulate
/// tick degrades to a no-op (empty queries), but say so once instead of
/// failing silently.
fn check_simulation_wiring(
    players: Query<(), With<Player>>,
    ground: Query<(), With<Ground>>,
    walls: Query<(), With<Wall>>,
) {
    if players.is_empty() {
        warn!("No player with kinematic state found; the simulate tick will do nothing");
    }
    if ground.is_empty() {
        warn!("No ground colliders found; the character will never register as grounded");
    }
    if walls.is_empty() {
        warn!("No wall colliders found; wall slide and wall jump are unreachable");
    }
}
