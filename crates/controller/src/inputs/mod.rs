use bevy::prelude::{App, IntoScheduleConfigs, Plugin, Update};
use leafwing_input_manager::plugin::InputManagerPlugin;

use crate::CharacterSet;
use crate::inputs::channel::InputChannel;
use crate::inputs::mapping::map_character_input;

pub mod binding;
pub mod channel;
pub mod mapping;

pub struct CharacterInputPlugin;

impl Plugin for CharacterInputPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<InputManagerPlugin<InputChannel>>() {
            app.add_plugins(InputManagerPlugin::<InputChannel>::default());
        }

        app.add_systems(Update, map_character_input.in_set(CharacterSet::Input));
    }
}
