//! Movement domain: sense-tick input sampling.
//!
//! Runs at render cadence. Press/release edges feed the buffer windows; the
//! simulate tick only ever sees the buffered view.

use bevy::prelude::*;

use crate::movement::{BufferedAction, InputBuffer};
use crate::tuning::MovementTuning;

pub(crate) fn sample_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    mut buffer: ResMut<InputBuffer>,
) {
    // Horizontal axis
    let mut x = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        x += 1.0;
    }

    // Vertical axis (for dash direction)
    let mut y = 0.0;
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        y += 1.0;
    }

    if keyboard.just_pressed(KeyCode::Space) || keyboard.just_pressed(KeyCode::KeyK) {
        buffer.on_press(BufferedAction::Jump, tuning.input_buffer_time);
    }
    if keyboard.just_released(KeyCode::Space) || keyboard.just_released(KeyCode::KeyK) {
        buffer.on_release(BufferedAction::Jump);
    }

    if keyboard.just_pressed(KeyCode::ShiftLeft) || keyboard.just_pressed(KeyCode::KeyJ) {
        buffer.on_press(BufferedAction::Dash, tuning.input_buffer_time);
    }
    if keyboard.just_released(KeyCode::ShiftLeft) || keyboard.just_released(KeyCode::KeyJ) {
        buffer.on_release(BufferedAction::Dash);
    }

    buffer.sample_tick(Vec2::new(x, y), tuning.input_deadzone, time.delta_secs());
}
