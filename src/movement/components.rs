//! Movement domain: components and physics layers for locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms)
    Ground,
    /// Wall surfaces
    Wall,
    /// Player character
    Player,
}

#[derive(Component, Debug)]
pub struct Player;

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for wall colliders
#[derive(Component, Debug)]
pub struct Wall;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WallContact {
    #[default]
    None,
    Left,
    Right,
}

/// Published per-character mechanic state. Owned exclusively by the simulate
/// tick; everything outside the movement systems reads it, never writes it.
#[derive(Component, Debug, Clone)]
pub struct KinematicState {
    // Ground
    pub grounded: bool,
    /// Seconds since the last grounded tick; 0 while grounded. Feeds the
    /// coyote window.
    pub time_since_grounded: f32,
    pub has_jumped_since_grounded: bool,

    // Jump rise
    pub is_jumping: bool,
    pub jump_hold_time: f32,

    // Wall
    pub touching_wall: WallContact,
    pub wall_sliding: bool,
    pub stamina: f32,
    /// While positive, horizontal input is ignored so a wall jump cannot be
    /// steered straight back into the wall.
    pub wall_jump_freeze: f32,

    // Dash
    pub is_dashing: bool,
    pub dash_elapsed: f32,
    pub dash_cooldown: f32,
    pub dash_direction: Vec2,

    pub facing: Facing,
}

impl KinematicState {
    pub fn new(max_stamina: f32) -> Self {
        Self {
            grounded: false,
            // Spawn counts as long-airborne: the coyote window must not open
            // until the character has actually stood on something.
            time_since_grounded: f32::INFINITY,
            has_jumped_since_grounded: false,
            is_jumping: false,
            jump_hold_time: 0.0,
            touching_wall: WallContact::None,
            wall_sliding: false,
            stamina: max_stamina,
            wall_jump_freeze: 0.0,
            is_dashing: false,
            dash_elapsed: 0.0,
            dash_cooldown: 0.0,
            dash_direction: Vec2::X,
            facing: Facing::default(),
        }
    }

    /// Ground-jump predicate: not already jumped since the last landing, and
    /// either grounded or still inside the coyote window.
    pub fn can_jump(&self, coyote_time: f32) -> bool {
        !self.has_jumped_since_grounded
            && (self.grounded || self.time_since_grounded <= coyote_time)
    }

    /// Landing bookkeeping for the airborne -> grounded transition: the jump
    /// lock and any jump-rise state clear, stamina refills.
    pub fn on_landed(&mut self, max_stamina: f32) {
        self.has_jumped_since_grounded = false;
        self.is_jumping = false;
        self.jump_hold_time = 0.0;
        self.stamina = max_stamina;
    }

    /// Linear stamina regeneration while airborne, clamped at max.
    pub fn regen_stamina(&mut self, rate: f32, max_stamina: f32, dt: f32) {
        self.stamina = (self.stamina + rate * dt).min(max_stamina);
    }

    /// Spend stamina if the balance covers the cost. Insufficient balance is
    /// a no-op and returns false.
    pub fn try_spend_stamina(&mut self, cost: f32) -> bool {
        if self.stamina < cost {
            return false;
        }
        self.stamina -= cost;
        true
    }

    /// Dash entry guard: off cooldown, not mid-dash, and either grounded or
    /// air dashing is allowed.
    pub fn can_dash(&self, air_dash_allowed: bool) -> bool {
        self.dash_cooldown <= 0.0 && !self.is_dashing && (self.grounded || air_dash_allowed)
    }
}
