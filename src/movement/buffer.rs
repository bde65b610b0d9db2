//! Movement domain: buffered input sampling.
//!
//! The buffer retains short press windows so an action pressed slightly
//! before it becomes legal (jump just before landing, dash just before
//! cooldown expiry) still registers. One press yields at most one consumable
//! window; consuming is the hand-off that stops a single press from firing
//! two actions.

use bevy::prelude::*;

/// Actions that get a retention window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferedAction {
    Jump,
    Dash,
}

/// Press state for one buffered action. `held` tracks the raw button and may
/// outlive the buffer window.
#[derive(Debug, Default, Clone)]
pub struct ButtonBuffer {
    held: bool,
    buffer_timer: f32,
}

impl ButtonBuffer {
    fn press(&mut self, window: f32) {
        self.held = true;
        // A new press mid-window resets the timer, never accumulates.
        self.buffer_timer = window;
    }

    fn release(&mut self) {
        self.held = false;
    }

    fn tick(&mut self, dt: f32) {
        if self.buffer_timer > 0.0 {
            self.buffer_timer = (self.buffer_timer - dt).max(0.0);
        }
    }

    fn is_buffered(&self) -> bool {
        self.buffer_timer > 0.0
    }

    fn consume(&mut self) {
        self.buffer_timer = 0.0;
    }
}

/// Sampled input state shared with the simulate tick: the deadzone-rescaled
/// move intent plus one [`ButtonBuffer`] per buffered action.
#[derive(Resource, Debug, Default)]
pub struct InputBuffer {
    intent: Vec2,
    jump: ButtonBuffer,
    dash: ButtonBuffer,
}

impl InputBuffer {
    /// Deadzone-rescaled move intent, each component in [-1, 1].
    pub fn intent(&self) -> Vec2 {
        self.intent
    }

    /// Update the move intent and decrement every buffer window.
    /// Called once per sense tick with the frame's `dt`.
    pub fn sample_tick(&mut self, raw_axis: Vec2, deadzone: f32, dt: f32) {
        self.intent = rescale_deadzone(raw_axis, deadzone);
        self.jump.tick(dt);
        self.dash.tick(dt);
    }

    pub fn on_press(&mut self, action: BufferedAction, window: f32) {
        self.buffer_mut(action).press(window);
    }

    pub fn on_release(&mut self, action: BufferedAction) {
        self.buffer_mut(action).release();
    }

    pub fn is_buffered(&self, action: BufferedAction) -> bool {
        self.buffer(action).is_buffered()
    }

    pub fn is_held(&self, action: BufferedAction) -> bool {
        self.buffer(action).held
    }

    /// Zero the buffer window. Idempotent; leaves `held` untouched.
    pub fn consume(&mut self, action: BufferedAction) {
        self.buffer_mut(action).consume();
    }

    fn buffer(&self, action: BufferedAction) -> &ButtonBuffer {
        match action {
            BufferedAction::Jump => &self.jump,
            BufferedAction::Dash => &self.dash,
        }
    }

    fn buffer_mut(&mut self, action: BufferedAction) -> &mut ButtonBuffer {
        match action {
            BufferedAction::Jump => &mut self.jump,
            BufferedAction::Dash => &mut self.dash,
        }
    }
}

/// Deadzone rescale: magnitudes below the deadzone read as zero, the rest of
/// the range is stretched back to [0, 1] with direction preserved.
pub fn rescale_deadzone(raw: Vec2, deadzone: f32) -> Vec2 {
    let magnitude = raw.length();
    // `<=` also catches a zero vector with a zero deadzone.
    if magnitude <= deadzone {
        return Vec2::ZERO;
    }
    let rescaled = ((magnitude - deadzone) / (1.0 - deadzone)).clamp(0.0, 1.0);
    raw / magnitude * rescaled
}
