//! Canned input for headless runs: walk in a circle, hop every couple of
//! seconds and switch the radio on once.

use bevy::prelude::*;
use controller::CharacterSet;
use controller::entities::Character;
use controller::inputs::channel::InputChannel;
use controller::inputs::mapping::map_character_input;
use leafwing_input_manager::prelude::ActionState;

pub const HOP_INTERVAL: f32 = 2.0;
pub const HOP_HOLD: f32 = 0.1;
pub const RADIO_SWITCH_AT: f32 = 3.0;

pub struct ScriptedInputPlugin;

impl Plugin for ScriptedInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            drive_scripted_input
                .in_set(CharacterSet::Input)
                .before(map_character_input),
        );
    }
}

/// Channel values the script wants at time `t`.
pub fn scripted_channels(t: f32) -> (Vec2, bool, bool) {
    let movement = Vec2::new((t * 0.5).cos(), (t * 0.5).sin());
    let hop = t > 0.5 && t % HOP_INTERVAL < HOP_HOLD;
    let toggle = (RADIO_SWITCH_AT..RADIO_SWITCH_AT + HOP_HOLD).contains(&t);
    (movement, hop, toggle)
}

fn drive_scripted_input(
    time: Res<Time>,
    mut query: Query<&mut ActionState<InputChannel>, With<Character>>,
) {
    let (movement, hop, toggle) = scripted_channels(time.elapsed_secs());

    for mut actions in query.iter_mut() {
        actions.set_value(&InputChannel::Axis1X, movement.x);
        actions.set_value(&InputChannel::Axis1Y, movement.y);
        set_button(&mut actions, InputChannel::Action1, hop);
        set_button(&mut actions, InputChannel::Action4, toggle);
    }
}

fn set_button(actions: &mut ActionState<InputChannel>, channel: InputChannel, pressed: bool) {
    if pressed {
        actions.press(&channel);
    } else {
        actions.release(&channel);
    }
}
