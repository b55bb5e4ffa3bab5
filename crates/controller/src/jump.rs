//! Debounced jump state machine driven by the ground probe.

use avian3d::prelude::LinearVelocity;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::health::Health;
use crate::effects::{CharacterEffects, EffectPlayer};
use crate::entities::Character;
use crate::ground::GroundContact;
use crate::inputs::mapping::InputMapper;

pub const JUMP_FORCE: f32 = 7.0;
pub const JUMP_LOCK_SECONDS: f32 = 1.0;

#[derive(Component, Reflect, Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct JumpConfig {
    /// Velocity added along `direction` when a jump fires.
    pub force: f32,
    pub direction: Vec3,
    /// Minimum time between two jumps. The lock also waits for the input to be released.
    pub lock_duration: f32,
}

impl Default for JumpConfig {
    fn default() -> Self {
        Self {
            force: JUMP_FORCE,
            direction: Vec3::Y,
            lock_duration: JUMP_LOCK_SECONDS,
        }
    }
}

#[derive(Reflect, Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub enum JumpPhase {
    Grounded,
    Airborne,
    /// A jump fired at `triggered_at`; the probe is ignored until the lock clears.
    Locked { triggered_at: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JumpOutcome {
    Idle,
    Jumped,
}

#[derive(Component, Reflect, Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct JumpState {
    pub phase: JumpPhase,
    /// Clock time of the most recent jump. Outlives the lock.
    pub last_jump: Option<f32>,
}

impl Default for JumpState {
    fn default() -> Self {
        Self {
            phase: JumpPhase::Grounded,
            last_jump: None,
        }
    }
}

impl JumpState {
    pub fn is_grounded(&self) -> bool {
        self.phase == JumpPhase::Grounded
    }

    pub fn is_locked(&self) -> bool {
        matches!(self.phase, JumpPhase::Locked { .. })
    }

    pub fn last_jump_time(&self) -> Option<f32> {
        self.last_jump
    }

    /// Advance one tick. `now` is the monotonic clock in seconds.
    pub fn step(
        &mut self,
        now: f32,
        mut jump_input: f32,
        probe_grounded: bool,
        config: &JumpConfig,
    ) -> JumpOutcome {
        if let JumpPhase::Locked { triggered_at } = self.phase {
            if now - triggered_at > config.lock_duration && jump_input == 0.0 {
                // Still airborne from the jump until the refresh below says otherwise.
                self.phase = JumpPhase::Airborne;
            } else {
                return JumpOutcome::Idle;
            }
        }

        // Landing edge: a jump value read on the landing tick is stale.
        if probe_grounded && !self.is_grounded() {
            jump_input = 0.0;
        }

        self.phase = if probe_grounded {
            JumpPhase::Grounded
        } else {
            JumpPhase::Airborne
        };

        if jump_input > 0.0 && self.is_grounded() {
            self.phase = JumpPhase::Locked { triggered_at: now };
            self.last_jump = Some(now);
            return JumpOutcome::Jumped;
        }

        JumpOutcome::Idle
    }
}

pub fn jump_impulse(config: &JumpConfig) -> Vec3 {
    config.direction * config.force
}

/// System: run the jump state machine for every living character.
pub fn update_jump(
    time: Res<Time>,
    mut query: Query<
        (
            Entity,
            &InputMapper,
            &GroundContact,
            &JumpConfig,
            &Health,
            &mut JumpState,
            &mut LinearVelocity,
            Option<&CharacterEffects>,
        ),
        With<Character>,
    >,
    mut effects: Query<&mut EffectPlayer>,
) {
    let now = time.elapsed_secs();

    for (entity, mapper, contact, config, health, mut state, mut velocity, character_effects) in
        query.iter_mut()
    {
        if health.is_dead {
            continue;
        }

        let jump_input = mapper.snapshot.map_or(0.0, |snapshot| snapshot.jump);

        if state.step(now, jump_input, contact.grounded, config) == JumpOutcome::Jumped {
            velocity.0 += jump_impulse(config);
            debug!("Character {:?} jumped at {:.2}s", entity, now);

            if let Some(jump_effect) = character_effects.and_then(|effects| effects.jump)
                && let Ok(mut player) = effects.get_mut(jump_effect)
            {
                player.play();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_grounded() {
        assert_eq!(JumpState::default().phase, JumpPhase::Grounded);
    }

    #[test]
    fn jump_locks_until_time_and_release() {
        let config = JumpConfig::default();
        let mut state = JumpState::default();

        assert_eq!(state.step(0.0, 1.0, true, &config), JumpOutcome::Jumped);
        assert!(state.is_locked());

        // Held input and a grounded probe mid-lock change nothing.
        assert_eq!(state.step(0.5, 1.0, true, &config), JumpOutcome::Idle);
        assert!(state.is_locked());

        // Past the lock but still held: stays locked.
        assert_eq!(state.step(1.05, 1.0, true, &config), JumpOutcome::Idle);
        assert!(state.is_locked());

        // Released after the lock: clears and refreshes from the probe.
        assert_eq!(state.step(1.1, 0.0, true, &config), JumpOutcome::Idle);
        assert!(!state.is_locked());
    }

    #[test]
    fn last_jump_time_outlives_the_lock() {
        let config = JumpConfig::default();
        let mut state = JumpState::default();
        assert_eq!(state.last_jump_time(), None);

        state.step(0.25, 1.0, true, &config);
        state.step(1.5, 0.0, false, &config);
        assert!(!state.is_locked());
        assert_eq!(state.last_jump_time(), Some(0.25));

        state.step(1.6, 0.0, true, &config);
        state.step(1.7, 1.0, true, &config);
        assert_eq!(state.last_jump_time(), Some(1.7));
    }

    #[test]
    fn airborne_character_cannot_jump() {
        let config = JumpConfig::default();
        let mut state = JumpState::default();

        assert_eq!(state.step(0.0, 1.0, false, &config), JumpOutcome::Idle);
        assert_eq!(state.phase, JumpPhase::Airborne);
    }

    #[test]
    fn landing_tick_suppresses_stale_jump() {
        let config = JumpConfig::default();
        let mut state = JumpState {
            phase: JumpPhase::Airborne,
            ..default()
        };

        assert_eq!(state.step(3.0, 1.0, true, &config), JumpOutcome::Idle);
        assert!(state.is_grounded());

        // Next tick on the ground the input counts again.
        assert_eq!(state.step(3.1, 1.0, true, &config), JumpOutcome::Jumped);
    }

    #[test]
    fn lock_release_on_ground_does_not_rejump_same_tick() {
        let config = JumpConfig::default();
        let mut state = JumpState::default();
        state.step(0.0, 1.0, true, &config);

        // Lock clears only with zero input, so the refresh tick cannot jump.
        assert_eq!(state.step(2.0, 0.0, true, &config), JumpOutcome::Idle);
        assert_eq!(state.step(2.1, 1.0, true, &config), JumpOutcome::Jumped);
    }

    #[test]
    fn impulse_follows_configured_direction() {
        let config = JumpConfig {
            force: 4.0,
            direction: Vec3::new(0.0, 1.0, 1.0).normalize(),
            ..default()
        };
        let impulse = jump_impulse(&config);
        assert!((impulse.length() - 4.0).abs() < 1e-5);
        assert!(impulse.z > 0.0);
    }
}
