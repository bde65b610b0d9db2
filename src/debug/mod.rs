//! Debug overlay for movement iteration (dev-tools feature).
//!
//! Stands in for the downstream consumers of published state: it only reads
//! `KinematicState`, `LinearVelocity`, and the movement messages.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::movement::{
    DashStartedEvent, JumpKind, JumpReleasedEvent, JumpStartedEvent, KinematicState, LandedEvent,
    Player,
};

/// Resource tracking debug overlay state
#[derive(Resource, Debug, Default)]
pub struct DebugState {
    /// Whether the kinematic state overlay is visible
    pub show_info: bool,
}

/// Marker for the overlay text node
#[derive(Component, Debug)]
pub struct DebugInfoOverlay;

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_systems(Update, (toggle_overlay, log_movement_events))
            .add_systems(
                Update,
                update_overlay.run_if(|state: Res<DebugState>| state.show_info),
            );
    }
}

/// Toggle the overlay with F3
fn toggle_overlay(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
    existing: Query<Entity, With<DebugInfoOverlay>>,
) {
    if !keyboard.just_pressed(KeyCode::F3) {
        return;
    }

    debug_state.show_info = !debug_state.show_info;

    if debug_state.show_info {
        commands.spawn((
            DebugInfoOverlay,
            Text::new(""),
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(8.0),
                left: Val::Px(8.0),
                ..default()
            },
        ));
    } else {
        for entity in &existing {
            commands.entity(entity).despawn();
        }
    }
}

fn update_overlay(
    player: Query<(&KinematicState, &LinearVelocity), With<Player>>,
    mut overlay: Query<&mut Text, With<DebugInfoOverlay>>,
) {
    let Ok((state, velocity)) = player.single() else {
        return;
    };

    for mut text in &mut overlay {
        **text = format!(
            "vel=({:.1}, {:.1})\ngrounded={} sliding={} dashing={}\nwall={:?} facing={:?}\nstamina={:.0} coyote={:.3}",
            velocity.x,
            velocity.y,
            state.grounded,
            state.wall_sliding,
            state.is_dashing,
            state.touching_wall,
            state.facing,
            state.stamina,
            state.time_since_grounded,
        );
    }
}

fn log_movement_events(
    mut jumps: MessageReader<JumpStartedEvent>,
    mut releases: MessageReader<JumpReleasedEvent>,
    mut dashes: MessageReader<DashStartedEvent>,
    mut landings: MessageReader<LandedEvent>,
) {
    for event in jumps.read() {
        match event.kind {
            JumpKind::Ground => debug!("jump started ({:?})", event.entity),
            JumpKind::Wall => debug!("wall jump started ({:?})", event.entity),
        }
    }
    for event in releases.read() {
        debug!("jump released after {:.3}s", event.hold_duration);
    }
    for event in dashes.read() {
        debug!("dash started toward {:?}", event.direction);
    }
    for event in landings.read() {
        debug!("landed ({:?})", event.entity);
    }
}
