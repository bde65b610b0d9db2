//! Arena domain: spawns the controlled character and a test room with
//! ground and wall surfaces for the probes to hit.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{GameLayer, Ground, KinematicState, Player, Wall};
use crate::tuning::MovementTuning;

const PLAYER_SIZE: Vec2 = Vec2::new(24.0, 48.0);

pub struct ArenaPlugin;

impl Plugin for ArenaPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_player, spawn_room));
    }
}

fn spawn_player(mut commands: Commands, tuning: Res<MovementTuning>) {
    commands.spawn((
        Player,
        KinematicState::new(tuning.max_stamina),
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(PLAYER_SIZE),
            ..default()
        },
        Transform::from_xyz(0.0, 100.0, 0.0),
        (
            RigidBody::Dynamic,
            Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            // Gravity is applied by the simulate tick, not the physics engine.
            GravityScale(0.0),
            Friction::new(0.0),
            CollisionLayers::new(GameLayer::Player, [GameLayer::Ground, GameLayer::Wall]),
        ),
    ));
}

fn spawn_room(mut commands: Commands) {
    // Floor
    spawn_surface(
        &mut commands,
        Vec2::new(0.0, -200.0),
        Vec2::new(1200.0, 40.0),
        SurfaceKind::Ground,
    );
    // Raised platform
    spawn_surface(
        &mut commands,
        Vec2::new(280.0, -60.0),
        Vec2::new(240.0, 24.0),
        SurfaceKind::Ground,
    );
    // Side walls
    spawn_surface(
        &mut commands,
        Vec2::new(-580.0, 100.0),
        Vec2::new(40.0, 640.0),
        SurfaceKind::Wall,
    );
    spawn_surface(
        &mut commands,
        Vec2::new(580.0, 100.0),
        Vec2::new(40.0, 640.0),
        SurfaceKind::Wall,
    );
}

enum SurfaceKind {
    Ground,
    Wall,
}

fn spawn_surface(commands: &mut Commands, position: Vec2, size: Vec2, kind: SurfaceKind) {
    let (color, layer) = match kind {
        SurfaceKind::Ground => (Color::srgb(0.3, 0.35, 0.3), GameLayer::Ground),
        SurfaceKind::Wall => (Color::srgb(0.35, 0.3, 0.3), GameLayer::Wall),
    };

    let mut entity = commands.spawn((
        Sprite {
            color,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_xyz(position.x, position.y, 0.0),
        RigidBody::Static,
        Collider::rectangle(size.x, size.y),
        CollisionLayers::new(layer, [GameLayer::Player]),
    ));

    match kind {
        SurfaceKind::Ground => entity.insert(Ground),
        SurfaceKind::Wall => entity.insert(Wall),
    };
}
