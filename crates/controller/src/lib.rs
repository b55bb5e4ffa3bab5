pub mod components;
pub mod effects;
pub mod entities;
pub mod ground;
pub mod health;
pub mod inputs;
pub mod jump;
pub mod locomotion;
pub mod radio;

#[cfg(test)]
mod tests;

use avian3d::prelude::PhysicsPlugins;
use bevy::prelude::{App, IntoScheduleConfigs, Plugin, SystemSet, Update};

use crate::effects::tick_effects;
use crate::ground::update_ground_probe;
use crate::health::HealthPlugin;
use crate::inputs::CharacterInputPlugin;
use crate::jump::update_jump;
use crate::locomotion::apply_locomotion;
use crate::radio::RadioPlugin;

/// Per-tick order of the character controller.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterSet {
    /// Device polling into snapshots, radio hand-offs, effect timers.
    Input,
    /// Locomotion and the held radio.
    Act,
    Ground,
    Jump,
    /// Health messages, then the death check.
    Lifecycle,
}

pub struct ControllerPlugin {
    /// Poll keyboards and gamepads through leafwing. Off when something else
    /// writes the `ActionState<InputChannel>` (tests, replays).
    pub read_devices: bool,
    /// Add avian's physics plugins and the raycast ground probe. Off when
    /// `GroundContact` is driven by hand.
    pub physics: bool,
}

impl Default for ControllerPlugin {
    fn default() -> Self {
        Self {
            read_devices: true,
            physics: true,
        }
    }
}

impl ControllerPlugin {
    /// Controller logic only: no device polling and no physics world.
    pub fn logic_only() -> Self {
        Self {
            read_devices: false,
            physics: false,
        }
    }
}

impl Plugin for ControllerPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                CharacterSet::Input,
                CharacterSet::Act,
                CharacterSet::Ground,
                CharacterSet::Jump,
                CharacterSet::Lifecycle,
            )
                .chain(),
        );

        if self.read_devices {
            app.add_plugins(CharacterInputPlugin);
        } else {
            app.add_systems(
                Update,
                inputs::mapping::map_character_input.in_set(CharacterSet::Input),
            );
        }

        if self.physics {
            app.add_plugins(PhysicsPlugins::default());
            app.add_systems(Update, update_ground_probe.in_set(CharacterSet::Ground));
        }

        app.add_plugins((HealthPlugin, RadioPlugin));
        app.add_systems(
            Update,
            (
                tick_effects.in_set(CharacterSet::Input),
                apply_locomotion.in_set(CharacterSet::Act),
                update_jump.in_set(CharacterSet::Jump),
            ),
        );
    }
}
