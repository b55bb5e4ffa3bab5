use bevy::prelude::{Component, GamepadButton, KeyCode, Reflect};
use leafwing_input_manager::Actionlike;
use leafwing_input_manager::prelude::{
    GamepadControlAxis, InputMap, VirtualAxis, WithAxisProcessingPipelineExt,
};
use serde::{Deserialize, Serialize};

/// Abstract device channels. Physical keys, sticks and triggers are bound to
/// these by [`device_input_map`]; the controller only ever reads channels.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, Debug, Reflect, Serialize, Deserialize, Actionlike,
)]
pub enum InputChannel {
    #[actionlike(Axis)]
    Axis1X,
    #[actionlike(Axis)]
    Axis1Y,
    #[actionlike(Axis)]
    Axis2X,
    #[actionlike(Axis)]
    Axis2Y,
    #[actionlike(Button)]
    Action1,
    #[actionlike(Button)]
    Action2,
    #[actionlike(Button)]
    Action3,
    #[actionlike(Button)]
    Action4,
    /// Analog button, the left trigger on gamepads.
    #[actionlike(Button)]
    AxisAlt1,
    /// Analog button, the right trigger on gamepads.
    #[actionlike(Button)]
    AxisAlt2,
}

impl InputChannel {
    pub fn is_axis(self) -> bool {
        matches!(
            self,
            InputChannel::Axis1X | InputChannel::Axis1Y | InputChannel::Axis2X | InputChannel::Axis2Y
        )
    }
}

/// Family of the physical device driving a character.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Reflect, Serialize, Deserialize,
)]
pub enum DeviceCategory {
    #[default]
    Keyboard,
    Gamepad,
}

/// The device a character listens to. Its absence means no input is bound.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Reflect, Serialize, Deserialize)]
pub struct InputDevice {
    pub category: DeviceCategory,
}

impl InputDevice {
    pub fn new(category: DeviceCategory) -> Self {
        Self { category }
    }
}

/// Physical bindings for each device family.
///
/// Channels carry each family's raw polarity: keyboard look-Y reads +1 for
/// ArrowDown and gamepad move-Y reads +1 for stick down. The device profile
/// multipliers flip those back, so "up" is +1 in every snapshot.
pub fn device_input_map(category: DeviceCategory) -> InputMap<InputChannel> {
    match category {
        DeviceCategory::Keyboard => InputMap::<InputChannel>::default()
            .with_axis(InputChannel::Axis1X, VirtualAxis::ad())
            .with_axis(InputChannel::Axis1Y, VirtualAxis::ws())
            .with_axis(
                InputChannel::Axis2X,
                VirtualAxis::new(KeyCode::ArrowLeft, KeyCode::ArrowRight),
            )
            .with_axis(
                InputChannel::Axis2Y,
                VirtualAxis::new(KeyCode::ArrowUp, KeyCode::ArrowDown),
            )
            .with(InputChannel::Action1, KeyCode::Space)
            .with(InputChannel::Action2, KeyCode::KeyQ)
            .with(InputChannel::Action3, KeyCode::KeyE)
            .with(InputChannel::Action4, KeyCode::AltLeft),
        DeviceCategory::Gamepad => InputMap::<InputChannel>::default()
            .with_axis(InputChannel::Axis1X, GamepadControlAxis::LEFT_X)
            .with_axis(InputChannel::Axis1Y, GamepadControlAxis::LEFT_Y.inverted())
            .with_axis(InputChannel::Axis2X, GamepadControlAxis::RIGHT_X)
            .with_axis(InputChannel::Axis2Y, GamepadControlAxis::RIGHT_Y)
            .with(InputChannel::Action1, GamepadButton::South)
            .with(InputChannel::Action4, GamepadButton::North)
            .with(InputChannel::AxisAlt1, GamepadButton::LeftTrigger2)
            .with(InputChannel::AxisAlt2, GamepadButton::RightTrigger2),
    }
}
