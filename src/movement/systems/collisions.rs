//! Movement domain: ground and wall probes.
//!
//! Wall detection runs before ground detection each simulate tick; the wall
//! state decides whether a fall counts as wall-sliding.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::movement::events::LandedEvent;
use crate::movement::{GameLayer, KinematicState, Player, WallContact};
use crate::tuning::MovementTuning;

/// Lateral probes at collider-derived distance set the touching-wall
/// direction, and the wall-slide predicate is latched for the rest of the
/// tick: touching a wall, airborne, and already falling.
pub(crate) fn detect_walls(
    spatial_query: SpatialQuery,
    tuning: Res<MovementTuning>,
    mut query: Query<(&Transform, &Collider, &LinearVelocity, &mut KinematicState), With<Player>>,
) {
    let wall_filter = SpatialQueryFilter::from_mask(GameLayer::Wall);

    for (transform, collider, velocity, mut state) in &mut query {
        let player_half_width = match collider.shape_scaled().as_cuboid() {
            Some(c) => c.half_extents.x,
            None => 12.0,
        };

        let origin = transform.translation.truncate();
        let reach = player_half_width + tuning.wall_probe_distance;

        let left_hit = spatial_query.cast_ray(origin, Dir2::NEG_X, reach, true, &wall_filter);
        let right_hit = spatial_query.cast_ray(origin, Dir2::X, reach, true, &wall_filter);

        state.touching_wall = match (left_hit.is_some(), right_hit.is_some()) {
            (true, false) => WallContact::Left,
            (false, true) => WallContact::Right,
            _ => WallContact::None,
        };

        // Never enters the sliding state while rising.
        state.wall_sliding =
            state.touching_wall != WallContact::None && !state.grounded && velocity.y < 0.0;
    }
}

/// Downward probe from the collider's bottom edge; maintains the coyote
/// bookkeeping, landing transition, and airborne stamina regeneration.
pub(crate) fn detect_ground(
    spatial_query: SpatialQuery,
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    mut landed_events: MessageWriter<LandedEvent>,
    mut query: Query<(Entity, &Transform, &Collider, &mut KinematicState), With<Player>>,
) {
    let dt = time.delta_secs();
    let ground_filter = SpatialQueryFilter::from_mask(GameLayer::Ground);

    for (entity, transform, collider, mut state) in &mut query {
        let was_grounded = state.grounded;

        let player_half_height = match collider.shape_scaled().as_cuboid() {
            Some(c) => c.half_extents.y,
            None => 24.0,
        };

        let ray_origin = transform.translation.truncate() - Vec2::new(0.0, player_half_height);
        let hit = spatial_query.cast_ray(
            ray_origin,
            Dir2::NEG_Y,
            tuning.ground_probe_distance,
            true,
            &ground_filter,
        );

        state.grounded = hit.is_some();

        if state.grounded {
            state.time_since_grounded = 0.0;
            if !was_grounded {
                state.on_landed(tuning.max_stamina);
                landed_events.write(LandedEvent { entity });
                debug!("Landed: stamina refilled to {}", state.stamina);
            }
        } else {
            state.time_since_grounded += dt;
            state.regen_stamina(tuning.stamina_regen_rate, tuning.max_stamina, dt);
        }
    }
}
