//! Movement domain: notifications published by the simulate tick.
//!
//! Consumed by animation mapping, VFX, and audio; the simulator never reads
//! them back.

use bevy::ecs::message::Message;
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    Ground,
    Wall,
}

/// Event fired the tick a jump launches (ground, coyote, or wall).
#[derive(Debug)]
pub struct JumpStartedEvent {
    pub entity: Entity,
    pub kind: JumpKind,
}

impl Message for JumpStartedEvent {}

/// Event fired when an early release cuts the jump rise short.
#[derive(Debug)]
pub struct JumpReleasedEvent {
    pub entity: Entity,
    /// Seconds the button was held from launch to release.
    pub hold_duration: f32,
}

impl Message for JumpReleasedEvent {}

/// Event fired the tick a dash begins.
#[derive(Debug)]
pub struct DashStartedEvent {
    pub entity: Entity,
    pub direction: Vec2,
}

impl Message for DashStartedEvent {}

/// Event fired on the airborne -> grounded transition.
#[derive(Debug)]
pub struct LandedEvent {
    pub entity: Entity,
}

impl Message for LandedEvent {}
