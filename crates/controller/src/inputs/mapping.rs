use bevy::prelude::{Component, Query, Reflect, Vec2, With};
use leafwing_input_manager::prelude::ActionState;
use serde::{Deserialize, Serialize};

use crate::components::health::Health;
use crate::entities::Character;
use crate::inputs::binding::SemanticInput;
use crate::inputs::channel::{DeviceCategory, InputChannel, InputDevice};

/// A device the controller can poll.
pub trait InputSource {
    fn device_category(&self) -> DeviceCategory;
    fn read_axis(&self, channel: InputChannel) -> f32;
}

/// The character's declared device paired with its leafwing action state.
pub struct BoundInput<'a> {
    pub device: &'a InputDevice,
    pub actions: &'a ActionState<InputChannel>,
}

impl InputSource for BoundInput<'_> {
    fn device_category(&self) -> DeviceCategory {
        self.device.category
    }

    fn read_axis(&self, channel: InputChannel) -> f32 {
        if channel.is_axis() {
            self.actions.value(&channel)
        } else {
            self.actions.button_value(&channel)
        }
    }
}

/// Mapped inputs for a single tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Reflect, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub movement: Vec2,
    pub look: Vec2,
    pub jump: f32,
    pub toggle_accessory: f32,
    pub accessory_extend: f32,
    pub accessory_retract: f32,
}

/// Per-character mapping state: the latest snapshot plus the toggle values
/// used for rising-edge detection. `last_toggle` is the most recent value
/// actually read from a device; unbound ticks leave it untouched.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Reflect, Serialize, Deserialize)]
pub struct InputMapper {
    pub snapshot: Option<InputSnapshot>,
    pub previous_toggle: f32,
    pub last_toggle: f32,
}

impl InputMapper {
    /// Reads the source through the binding table of its device category.
    /// Returns `None` (and clears the snapshot) when no source is bound.
    pub fn map<S: InputSource>(&mut self, source: Option<&S>) -> Option<InputSnapshot> {
        self.previous_toggle = self.last_toggle;

        let Some(source) = source else {
            self.snapshot = None;
            return None;
        };

        let profile = source.device_category().profile();
        let read = |input: SemanticInput| source.read_axis(profile.bindings.channel(input));

        let snapshot = InputSnapshot {
            movement: Vec2::new(read(SemanticInput::MoveX), read(SemanticInput::MoveY))
                * profile.move_multiplier,
            look: Vec2::new(read(SemanticInput::LookX), read(SemanticInput::LookY))
                * profile.look_multiplier,
            jump: read(SemanticInput::Jump),
            toggle_accessory: read(SemanticInput::ToggleAccessory),
            accessory_extend: read(SemanticInput::AccessoryExtend),
            accessory_retract: read(SemanticInput::AccessoryRetract),
        };

        self.last_toggle = snapshot.toggle_accessory;
        self.snapshot = Some(snapshot);
        self.snapshot
    }

    /// True on the tick the toggle channel goes from zero to positive.
    /// Never true on a tick without input.
    pub fn toggle_pressed(&self) -> bool {
        self.snapshot.is_some() && self.last_toggle > 0.0 && self.previous_toggle == 0.0
    }
}

/// System: refresh every living character's input snapshot.
pub fn map_character_input(
    mut query: Query<
        (
            &mut InputMapper,
            &Health,
            Option<&InputDevice>,
            Option<&ActionState<InputChannel>>,
        ),
        With<Character>,
    >,
) {
    for (mut mapper, health, device, actions) in query.iter_mut() {
        if health.is_dead {
            continue;
        }

        let bound = match (device, actions) {
            (Some(device), Some(actions)) if !actions.disabled() => {
                Some(BoundInput { device, actions })
            }
            _ => None,
        };

        mapper.map(bound.as_ref());
    }
}
