//! Movement domain: system modules for the sense and simulate ticks.

pub(crate) mod collisions;
pub(crate) mod input;
pub(crate) mod movement;

pub(crate) use collisions::{detect_ground, detect_walls};
pub(crate) use input::sample_input;
pub(crate) use movement::{
    apply_gravity, apply_horizontal, apply_jump, apply_wall_slide, update_dash, update_facing,
};
