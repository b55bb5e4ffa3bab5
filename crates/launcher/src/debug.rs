use bevy::prelude::*;
use controller::components::health::{HealthDelta, ResetHealth};
use controller::components::radio::{HeldRadio, Radio};
use controller::entities::Character;
use controller::health::apply_health_delta;
use controller::radio::{DropRadio, GrabRadio};

pub const DEBUG_DAMAGE: f32 = 25.0;

/// H hurts, J heals, R resets health, G grabs or drops the radio.
pub struct DebugKeysPlugin;

impl Plugin for DebugKeysPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (debug_health_keys, debug_radio_key));
    }
}

fn debug_health_keys(
    keys: Res<ButtonInput<KeyCode>>,
    characters: Query<Entity, With<Character>>,
    mut deltas: MessageWriter<HealthDelta>,
    mut resets: MessageWriter<ResetHealth>,
) {
    for character in characters.iter() {
        if keys.just_pressed(KeyCode::KeyH) {
            apply_health_delta(&mut deltas, character, -DEBUG_DAMAGE);
        }
        if keys.just_pressed(KeyCode::KeyJ) {
            apply_health_delta(&mut deltas, character, DEBUG_DAMAGE);
        }
        if keys.just_pressed(KeyCode::KeyR) {
            info!("Debug reset of {:?}", character);
            resets.write(ResetHealth { target: character });
        }
    }
}

fn debug_radio_key(
    keys: Res<ButtonInput<KeyCode>>,
    characters: Query<(Entity, Option<&HeldRadio>), With<Character>>,
    radios: Query<Entity, With<Radio>>,
    mut grabs: MessageWriter<GrabRadio>,
    mut drops: MessageWriter<DropRadio>,
) {
    if !keys.just_pressed(KeyCode::KeyG) {
        return;
    }

    for (character, held) in characters.iter() {
        if held.is_some() {
            drops.write(DropRadio { holder: character });
        } else if let Some(radio) = radios.iter().next() {
            grabs.write(GrabRadio {
                holder: character,
                radio,
            });
        }
    }
}
