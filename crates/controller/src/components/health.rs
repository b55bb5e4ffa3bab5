use bevy::prelude::{Component, Entity, Message, Reflect};
use serde::{Deserialize, Serialize};

pub const MAX_HEALTH: f32 = 250.0;

/// Health and death flag of a character. Mutated only through the methods
/// here and the lifecycle systems in [`crate::health`].
#[derive(Component, Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Reflect)]
pub struct Health {
    pub current: f32,
    pub max: f32,
    pub is_dead: bool,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(MAX_HEALTH)
    }
}

/// Result of [`Health::apply_delta`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HealthChange {
    pub previous: f32,
    pub current: f32,
    /// A non-lethal hit: the damage reaction should play.
    pub damaged: bool,
}

impl Health {
    pub fn new(max_health: f32) -> Self {
        let max = max_health.max(0.0);
        Self {
            current: max,
            max,
            is_dead: false,
        }
    }

    pub fn percentage(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            (self.current / self.max).clamp(0.0, 1.0)
        }
    }

    /// Add `amount` (negative for damage) and clamp into [0, max].
    /// The death flag is not touched; the lifecycle check sets it.
    pub fn apply_delta(&mut self, amount: f32) -> HealthChange {
        let previous = self.current;
        if !amount.is_nan() {
            self.current = (self.current + amount).clamp(0.0, self.max);
        }

        HealthChange {
            previous,
            current: self.current,
            damaged: self.current < previous && self.current > 0.0,
        }
    }

    pub fn set_max(&mut self, max_health: f32) {
        self.max = max_health.max(0.0);
        self.current = self.current.clamp(0.0, self.max);
    }

    pub fn reset(&mut self) {
        self.current = self.max;
        self.is_dead = false;
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }
}

/// Add `amount` to `target`'s health (negative for damage).
#[derive(Message, Clone, Debug, Serialize, Deserialize)]
pub struct HealthDelta {
    pub target: Entity,
    pub amount: f32,
}

#[derive(Message, Clone, Debug, Serialize, Deserialize)]
pub struct ResetHealth {
    pub target: Entity,
}

#[derive(Message, Clone, Debug, Serialize, Deserialize)]
pub struct SetMaxHealth {
    pub target: Entity,
    pub max: f32,
}

#[derive(Message, Clone, Debug, Serialize, Deserialize)]
pub struct CharacterDied {
    pub entity: Entity,
}

#[derive(Message, Clone, Debug, Serialize, Deserialize)]
pub struct CharacterRevived {
    pub entity: Entity,
}
