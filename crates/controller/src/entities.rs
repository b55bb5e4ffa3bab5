use avian3d::prelude::{
    AngularDamping, Collider, Friction, LinearDamping, LinearVelocity, LockedAxes, Mass,
    Restitution, RigidBody, Rotation,
};
use bevy::prelude::{Bundle, Component, Reflect};
use serde::{Deserialize, Serialize};

use crate::components::health::Health;
use crate::components::radio::AntennaControl;
use crate::ground::{GroundContact, GroundProbeConfig};
use crate::inputs::mapping::InputMapper;
use crate::jump::{JumpConfig, JumpState};
use crate::locomotion::{LocomotionAnimation, LocomotionConfig};

pub const CHARACTER_CAPSULE_RADIUS: f32 = 0.4;
pub const CHARACTER_CAPSULE_HEIGHT: f32 = 1.0;

/// Marks the player-controlled character root.
#[derive(Component, Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Reflect)]
pub struct Character;

/// Skinned renderer that disappears while its character is dead.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Reflect)]
pub struct SkinnedVisual;

/// Controller state and tuning for one character.
#[derive(Bundle, Default)]
pub struct CharacterBundle {
    pub character: Character,
    pub health: Health,
    pub input: InputMapper,
    pub locomotion: LocomotionConfig,
    pub animation: LocomotionAnimation,
    pub ground_probe: GroundProbeConfig,
    pub ground_contact: GroundContact,
    pub jump_config: JumpConfig,
    pub jump_state: JumpState,
    pub antenna: AntennaControl,
    pub velocity: LinearVelocity,
    pub rotation: Rotation,
}

impl CharacterBundle {
    pub fn with_max_health(mut self, max_health: f32) -> Self {
        self.health = Health::new(max_health);
        self
    }

    pub fn with_antenna(mut self, antenna: AntennaControl) -> Self {
        self.antenna = antenna;
        self
    }
}

#[derive(Bundle)]
pub struct CharacterPhysicsBundle {
    pub rigid_body: RigidBody,
    pub collider: Collider,
    pub mass: Mass,
    pub restitution: Restitution,
    pub friction: Friction,
    pub linear_damping: LinearDamping,
    pub angular_damping: AngularDamping,
    pub locked_axes: LockedAxes,
}

impl Default for CharacterPhysicsBundle {
    fn default() -> Self {
        Self {
            rigid_body: RigidBody::Dynamic,
            collider: Collider::capsule(CHARACTER_CAPSULE_RADIUS, CHARACTER_CAPSULE_HEIGHT),
            mass: Mass(1.0),
            restitution: Restitution::ZERO,
            friction: Friction::new(0.5),
            linear_damping: LinearDamping(1.0),
            angular_damping: AngularDamping(8.0),
            // Turning is driven by the controller, never by contacts.
            locked_axes: LockedAxes::ROTATION_LOCKED,
        }
    }
}
