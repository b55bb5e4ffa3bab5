use bevy::prelude::Vec2;

use crate::inputs::channel::{DeviceCategory, InputChannel};

/// Named inputs the controller consumes, independent of the device.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum SemanticInput {
    MoveX,
    MoveY,
    LookX,
    LookY,
    Jump,
    ToggleAccessory,
    AccessoryExtend,
    AccessoryRetract,
}

impl SemanticInput {
    pub const ALL: [SemanticInput; 8] = [
        SemanticInput::MoveX,
        SemanticInput::MoveY,
        SemanticInput::LookX,
        SemanticInput::LookY,
        SemanticInput::Jump,
        SemanticInput::ToggleAccessory,
        SemanticInput::AccessoryExtend,
        SemanticInput::AccessoryRetract,
    ];
}

/// Semantic input -> device channel, indexed by `SemanticInput as usize`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeviceBindingTable([InputChannel; SemanticInput::ALL.len()]);

impl DeviceBindingTable {
    pub const fn channel(&self, input: SemanticInput) -> InputChannel {
        self.0[input as usize]
    }
}

/// Everything that differs between device families: where each semantic
/// input lives and the polarity of the move and look axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeviceProfile {
    pub bindings: DeviceBindingTable,
    pub move_multiplier: Vec2,
    pub look_multiplier: Vec2,
}

// Keyboards report the vertical look axis inverted.
const KEYBOARD_PROFILE: DeviceProfile = DeviceProfile {
    bindings: DeviceBindingTable([
        InputChannel::Axis1X,
        InputChannel::Axis1Y,
        InputChannel::Axis2X,
        InputChannel::Axis2Y,
        InputChannel::Action1,
        InputChannel::Action4,
        InputChannel::Action2,
        InputChannel::Action3,
    ]),
    move_multiplier: Vec2::new(1.0, 1.0),
    look_multiplier: Vec2::new(1.0, -1.0),
};

// Gamepads report the vertical move axis inverted; the antenna rides the triggers.
const GAMEPAD_PROFILE: DeviceProfile = DeviceProfile {
    bindings: DeviceBindingTable([
        InputChannel::Axis1X,
        InputChannel::Axis1Y,
        InputChannel::Axis2X,
        InputChannel::Axis2Y,
        InputChannel::Action1,
        InputChannel::Action4,
        InputChannel::AxisAlt2,
        InputChannel::AxisAlt1,
    ]),
    move_multiplier: Vec2::new(1.0, -1.0),
    look_multiplier: Vec2::new(1.0, 1.0),
};

impl DeviceCategory {
    pub const fn profile(self) -> &'static DeviceProfile {
        match self {
            DeviceCategory::Keyboard => &KEYBOARD_PROFILE,
            DeviceCategory::Gamepad => &GAMEPAD_PROFILE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_semantic_input_has_a_binding_per_device() {
        for category in [DeviceCategory::Keyboard, DeviceCategory::Gamepad] {
            let table = category.profile().bindings;
            for input in SemanticInput::ALL {
                // Indexing must not panic for any semantic input.
                let _ = table.channel(input);
            }
        }
    }

    #[test]
    fn antenna_channels_differ_between_devices() {
        let keyboard = DeviceCategory::Keyboard.profile().bindings;
        let gamepad = DeviceCategory::Gamepad.profile().bindings;

        assert_eq!(keyboard.channel(SemanticInput::AccessoryExtend), InputChannel::Action2);
        assert_eq!(keyboard.channel(SemanticInput::AccessoryRetract), InputChannel::Action3);
        assert_eq!(gamepad.channel(SemanticInput::AccessoryExtend), InputChannel::AxisAlt2);
        assert_eq!(gamepad.channel(SemanticInput::AccessoryRetract), InputChannel::AxisAlt1);
    }

    #[test]
    fn axis_polarity_is_per_device() {
        assert_eq!(DeviceCategory::Keyboard.profile().look_multiplier, Vec2::new(1.0, -1.0));
        assert_eq!(DeviceCategory::Gamepad.profile().move_multiplier, Vec2::new(1.0, -1.0));
    }
}
