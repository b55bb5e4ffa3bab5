use bevy::prelude::*;

use crate::CharacterSet;
use crate::components::health::{
    CharacterDied, CharacterRevived, Health, HealthDelta, ResetHealth, SetMaxHealth,
};
use crate::effects::{CharacterEffects, EffectPlayer};
use crate::entities::{Character, SkinnedVisual};

pub struct HealthPlugin;

impl Plugin for HealthPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<HealthDelta>()
            .add_message::<ResetHealth>()
            .add_message::<SetMaxHealth>()
            .add_message::<CharacterDied>()
            .add_message::<CharacterRevived>()
            .add_systems(
                Update,
                (process_health_messages, check_death)
                    .chain()
                    .in_set(CharacterSet::Lifecycle),
            );
    }
}

/// Flip the death flag and its visuals. Dead characters hide every
/// `SkinnedVisual` below them; colliders stay enabled so the body is still
/// in the world (a held radio keeps beaconing from it).
pub fn set_dead(
    entity: Entity,
    health: &mut Health,
    dead: bool,
    children: &Query<&Children>,
    visuals: &mut Query<&mut Visibility, With<SkinnedVisual>>,
) {
    health.is_dead = dead;

    let visibility = if dead {
        Visibility::Hidden
    } else {
        Visibility::Inherited
    };

    for descendant in std::iter::once(entity).chain(children.iter_descendants(entity)) {
        if let Ok(mut visual) = visuals.get_mut(descendant) {
            *visual = visibility;
        }
    }
}

/// Play the damage reaction unless it is still running from a previous hit.
pub fn play_damage_reaction(effects: Option<&CharacterEffects>, players: &mut Query<&mut EffectPlayer>) {
    let Some(damaged) = effects.and_then(|effects| effects.damaged) else {
        return;
    };
    if let Ok(mut player) = players.get_mut(damaged)
        && !player.is_playing()
    {
        player.play();
    }
}

fn process_health_messages(
    mut max_messages: MessageReader<SetMaxHealth>,
    mut delta_messages: MessageReader<HealthDelta>,
    mut reset_messages: MessageReader<ResetHealth>,
    mut health_query: Query<(&mut Health, Option<&CharacterEffects>), With<Character>>,
    mut players: Query<&mut EffectPlayer>,
    children: Query<&Children>,
    mut visuals: Query<&mut Visibility, With<SkinnedVisual>>,
    mut revived: MessageWriter<CharacterRevived>,
) {
    for message in max_messages.read() {
        if let Ok((mut health, _)) = health_query.get_mut(message.target) {
            health.set_max(message.max);
        }
    }

    for message in delta_messages.read() {
        let Ok((mut health, effects)) = health_query.get_mut(message.target) else {
            debug!("Health delta for {:?} ignored, not a character", message.target);
            continue;
        };

        let change = health.apply_delta(message.amount);
        if change.previous != change.current {
            info!(
                "Character {:?} health {:.1} -> {:.1} / {:.1}",
                message.target, change.previous, change.current, health.max
            );
        }

        if change.damaged {
            play_damage_reaction(effects, &mut players);
        }
    }

    for message in reset_messages.read() {
        let Ok((mut health, _)) = health_query.get_mut(message.target) else {
            continue;
        };

        let was_dead = health.is_dead;
        health.reset();
        set_dead(message.target, &mut health, false, &children, &mut visuals);

        if was_dead {
            info!("Character {:?} revived", message.target);
            revived.write(CharacterRevived {
                entity: message.target,
            });
        }
    }
}

/// Runs last in the tick: a character whose health ran out dies.
pub fn check_death(
    mut query: Query<(Entity, &mut Health), With<Character>>,
    children: Query<&Children>,
    mut visuals: Query<&mut Visibility, With<SkinnedVisual>>,
    mut died: MessageWriter<CharacterDied>,
) {
    for (entity, mut health) in query.iter_mut() {
        if health.is_dead || !health.is_depleted() {
            continue;
        }

        set_dead(entity, &mut health, true, &children, &mut visuals);
        info!("Character {:?} died", entity);
        died.write(CharacterDied { entity });
    }
}

/// Queue a health change for `target`.
pub fn apply_health_delta(writer: &mut MessageWriter<HealthDelta>, target: Entity, amount: f32) {
    writer.write(HealthDelta { target, amount });
}
