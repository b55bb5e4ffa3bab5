//! Ground probe: a single downward ray from the middle of the feet collider.

use avian3d::prelude::{ColliderAabb, LayerMask, SpatialQuery, SpatialQueryFilter};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::health::Health;
use crate::entities::Character;

pub const GROUND_CLEARANCE: f32 = 0.05;

#[derive(Component, Reflect, Clone, Copy, Debug, PartialEq)]
pub struct GroundProbeConfig {
    /// Extra ray length below the collider's bottom.
    pub clearance: f32,
    /// Only colliders on these layers count as ground.
    pub layers: LayerMask,
}

impl Default for GroundProbeConfig {
    fn default() -> Self {
        Self {
            clearance: GROUND_CLEARANCE,
            layers: LayerMask::ALL,
        }
    }
}

/// Dedicated collider used for ground detection instead of the body's own.
#[derive(Component, Reflect, Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeetCollider(pub Entity);

/// Latest probe reading. Written by [`update_ground_probe`], read by the jump
/// state machine.
#[derive(Component, Reflect, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct GroundContact {
    pub grounded: bool,
}

/// World-space centre and half height of a collider's bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColliderEnvelope {
    pub center: Vec3,
    pub half_height: f32,
}

impl From<&ColliderAabb> for ColliderEnvelope {
    fn from(aabb: &ColliderAabb) -> Self {
        Self {
            center: (aabb.min + aabb.max) * 0.5,
            half_height: (aabb.max.y - aabb.min.y) * 0.5,
        }
    }
}

pub trait GroundRaycast {
    /// Distance to the first hit on `mask`, ignoring `excluded` entities.
    fn raycast(
        &self,
        origin: Vec3,
        direction: Dir3,
        max_distance: f32,
        mask: LayerMask,
        excluded: &[Entity],
    ) -> Option<f32>;
}

impl GroundRaycast for SpatialQuery<'_, '_> {
    fn raycast(
        &self,
        origin: Vec3,
        direction: Dir3,
        max_distance: f32,
        mask: LayerMask,
        excluded: &[Entity],
    ) -> Option<f32> {
        let filter =
            SpatialQueryFilter::from_mask(mask).with_excluded_entities(excluded.iter().copied());

        self.cast_ray(origin, direction, max_distance, true, &filter)
            .map(|hit| hit.distance)
    }
}

pub fn probe_distance(envelope: &ColliderEnvelope, config: &GroundProbeConfig) -> f32 {
    envelope.half_height + config.clearance
}

/// True when something on the configured layers lies within reach below the envelope.
pub fn probe_ground(
    envelope: &ColliderEnvelope,
    config: &GroundProbeConfig,
    caster: &impl GroundRaycast,
    excluded: &[Entity],
) -> bool {
    let max_distance = probe_distance(envelope, config);

    caster
        .raycast(
            envelope.center,
            Dir3::NEG_Y,
            max_distance,
            config.layers,
            excluded,
        )
        .is_some_and(|distance| distance <= max_distance)
}

/// System: probe the ground under every living character.
pub fn update_ground_probe(
    spatial_query: SpatialQuery,
    bounds: Query<&ColliderAabb>,
    mut query: Query<
        (
            Entity,
            &GroundProbeConfig,
            &Health,
            Option<&FeetCollider>,
            &mut GroundContact,
        ),
        With<Character>,
    >,
) {
    for (entity, config, health, feet, mut contact) in query.iter_mut() {
        if health.is_dead {
            continue;
        }

        // Feet collider when configured and present, the body's own otherwise.
        let aabb = feet
            .and_then(|feet| bounds.get(feet.0).ok())
            .or_else(|| bounds.get(entity).ok());

        let Some(aabb) = aabb else {
            debug!("Character {:?} has no collider bounds to probe from", entity);
            contact.grounded = false;
            continue;
        };

        let excluded: Vec<Entity> = std::iter::once(entity)
            .chain(feet.map(|feet| feet.0))
            .collect();

        contact.grounded = probe_ground(
            &ColliderEnvelope::from(aabb),
            config,
            &spatial_query,
            &excluded,
        );
    }
}
