use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// A one-shot effect instance (particles plus sound) owned by a character.
/// Playback itself happens elsewhere; this tracks whether it is running.
#[derive(Component, Reflect, Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[reflect(Component)]
pub struct EffectPlayer {
    pub duration: f32,
    pub remaining: f32,
    pub times_played: u32,
}

impl EffectPlayer {
    pub fn new(duration: f32) -> Self {
        Self {
            duration: duration.max(0.0),
            remaining: 0.0,
            times_played: 0,
        }
    }

    pub fn play(&mut self) {
        self.remaining = self.duration;
        self.times_played += 1;
    }

    pub fn is_playing(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn tick(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }
}

/// Effect entities bound to one character.
#[derive(Component, Reflect, Clone, Copy, Debug, Default, PartialEq)]
pub struct CharacterEffects {
    pub jump: Option<Entity>,
    pub damaged: Option<Entity>,
}

pub fn tick_effects(time: Res<Time>, mut players: Query<&mut EffectPlayer>) {
    let dt = time.delta_secs();
    for mut player in players.iter_mut() {
        if player.is_playing() {
            player.tick(dt);
        }
    }
}
