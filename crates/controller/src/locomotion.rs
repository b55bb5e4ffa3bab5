//! Movement force and bounded turning from the mapped move/look inputs.

use avian3d::prelude::{LinearVelocity, Mass, Rotation};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::health::Health;
use crate::entities::Character;
use crate::inputs::mapping::InputMapper;

pub const MOVE_SPEED: f32 = 10.0;
pub const FACING_DEADZONE: f32 = 0.1;

// ============================================================================
// COMPONENTS
// ============================================================================

#[derive(Component, Reflect, Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct LocomotionConfig {
    /// Force scale applied to the move input.
    pub move_speed: f32,
    /// Maximum turn rate in degrees per second.
    pub turn_speed: f32,
    /// Minimum stick magnitude before look/move picks a facing.
    pub facing_deadzone: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            move_speed: MOVE_SPEED,
            turn_speed: MOVE_SPEED,
            facing_deadzone: FACING_DEADZONE,
        }
    }
}

/// Values handed to the animation graph each tick.
#[derive(Component, Reflect, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct LocomotionAnimation {
    pub run_blend: f32,
    pub speed_multiplier: f32,
}

// ============================================================================
// PURE FUNCTIONS
// ============================================================================

/// Horizontal force for this tick; the body integrates it.
pub fn movement_force(movement: Vec2, dt: f32, move_speed: f32) -> Vec3 {
    Vec3::new(movement.x, 0.0, movement.y) * dt * move_speed
}

/// Direction the character should face, or `None` to keep the current facing.
/// Look wins over move; look's vertical axis is flipped into forward.
pub fn goal_heading(look: Vec2, movement: Vec2, deadzone: f32) -> Option<Vec3> {
    if look.length() > deadzone {
        Some(Vec3::new(look.x, 0.0, -look.y))
    } else if movement.length() > deadzone {
        Some(Vec3::new(movement.x, 0.0, movement.y))
    } else {
        None
    }
}

/// Rotation whose forward (-Z) points along `heading` on the horizontal plane.
pub fn heading_rotation(heading: Vec3) -> Quat {
    Quat::from_rotation_y(f32::atan2(-heading.x, -heading.z))
}

/// Turn from `current` towards `goal` by at most `max_degrees`, never past it.
pub fn rotate_towards(current: Quat, goal: Quat, max_degrees: f32) -> Quat {
    let angle = current.angle_between(goal);
    let max_step = max_degrees.max(0.0).to_radians();

    if angle <= max_step || angle <= f32::EPSILON {
        goal
    } else {
        current.slerp(goal, max_step / angle)
    }
}

// ============================================================================
// SYSTEMS
// ============================================================================

/// System: push and turn every living character that has input this tick.
pub fn apply_locomotion(
    time: Res<Time>,
    mut query: Query<
        (
            &InputMapper,
            &LocomotionConfig,
            &Health,
            &mut LinearVelocity,
            &mut Rotation,
            Option<&Mass>,
            Option<&mut LocomotionAnimation>,
        ),
        With<Character>,
    >,
) {
    let dt = time.delta_secs();

    for (mapper, config, health, mut velocity, mut rotation, mass, animation) in query.iter_mut()
    {
        if health.is_dead {
            continue;
        }
        let Some(input) = mapper.snapshot else {
            continue;
        };

        let inverse_mass = mass.map_or(1.0, |mass| {
            if mass.0 > 0.0 { 1.0 / mass.0 } else { 1.0 }
        });
        velocity.0 += movement_force(input.movement, dt, config.move_speed) * inverse_mass;

        if let Some(heading) = goal_heading(input.look, input.movement, config.facing_deadzone) {
            rotation.0 = rotate_towards(
                rotation.0,
                heading_rotation(heading),
                dt * config.turn_speed,
            );
        }

        if let Some(mut animation) = animation {
            let magnitude = input.movement.length();
            animation.run_blend = magnitude;
            animation.speed_multiplier = magnitude;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn force_is_horizontal_and_scaled_by_tick() {
        let force = movement_force(Vec2::new(1.0, -0.5), 0.1, 10.0);
        assert_eq!(force, Vec3::new(1.0, 0.0, -0.5));
    }

    #[test]
    fn look_takes_priority_over_move() {
        let heading = goal_heading(Vec2::new(0.0, 1.0), Vec2::new(1.0, 0.0), FACING_DEADZONE);
        assert_eq!(heading, Some(Vec3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn move_used_when_look_in_deadzone() {
        let heading = goal_heading(Vec2::new(0.05, 0.0), Vec2::new(1.0, 0.0), FACING_DEADZONE);
        assert_eq!(heading, Some(Vec3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn no_goal_when_both_idle() {
        assert_eq!(goal_heading(Vec2::ZERO, Vec2::new(0.0, 0.1), FACING_DEADZONE), None);
    }

    #[test]
    fn heading_rotation_faces_heading() {
        let rotation = heading_rotation(Vec3::X);
        let forward = rotation * Vec3::NEG_Z;
        assert!((forward - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn turn_is_bounded_per_tick() {
        let goal = heading_rotation(Vec3::X);
        let turned = rotate_towards(Quat::IDENTITY, goal, 1.0);

        let step = Quat::IDENTITY.angle_between(turned).to_degrees();
        assert!((step - 1.0).abs() < 1e-3, "step was {step}");
        assert!(turned.angle_between(goal) < FRAC_PI_2);
    }

    #[test]
    fn turn_never_overshoots() {
        let goal = Quat::from_rotation_y(0.5_f32.to_radians());
        let turned = rotate_towards(Quat::IDENTITY, goal, 10.0);
        assert!(turned.angle_between(goal) < 1e-4);
    }
}
