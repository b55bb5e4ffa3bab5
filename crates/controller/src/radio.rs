use avian3d::prelude::{AngularVelocity, LinearVelocity, Position, Rotation};
use bevy::prelude::*;

use crate::CharacterSet;
use crate::components::health::Health;
use crate::components::radio::{AntennaControl, HeldRadio, Radio, RadioAnchor};
use crate::entities::Character;
use crate::inputs::mapping::InputMapper;

pub struct RadioPlugin;

impl Plugin for RadioPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<GrabRadio>()
            .add_message::<DropRadio>()
            .add_systems(Update, handle_radio_handoff.in_set(CharacterSet::Input))
            .add_systems(
                Update,
                (sync_held_radio_pose, update_radio_antenna, radio_distress_beacon)
                    .chain()
                    .in_set(CharacterSet::Act),
            );
    }
}

/// Pickup system's request to put `radio` in `holder`'s hands.
#[derive(Message, Clone, Debug)]
pub struct GrabRadio {
    pub holder: Entity,
    pub radio: Entity,
}

#[derive(Message, Clone, Debug)]
pub struct DropRadio {
    pub holder: Entity,
}

fn handle_radio_handoff(
    mut commands: Commands,
    mut grabs: MessageReader<GrabRadio>,
    mut drops: MessageReader<DropRadio>,
    characters: Query<(), With<Character>>,
    radios: Query<(), With<Radio>>,
) {
    for drop in drops.read() {
        if characters.contains(drop.holder) {
            commands.entity(drop.holder).remove::<HeldRadio>();
            info!("Character {:?} dropped its radio", drop.holder);
        }
    }

    for grab in grabs.read() {
        if !characters.contains(grab.holder) || !radios.contains(grab.radio) {
            debug!("Ignoring radio grab {:?} -> {:?}", grab.radio, grab.holder);
            continue;
        }
        commands.entity(grab.holder).insert(HeldRadio(grab.radio));
        info!("Character {:?} picked up radio {:?}", grab.holder, grab.radio);
    }
}

/// Pin each held radio to its holder's anchor and cancel any physics drift.
pub fn sync_held_radio_pose(
    holders: Query<(&HeldRadio, &RadioAnchor, &Health), With<Character>>,
    anchors: Query<&GlobalTransform>,
    mut radios: Query<
        (
            &mut Transform,
            Option<&mut Position>,
            Option<&mut Rotation>,
            Option<&mut LinearVelocity>,
            Option<&mut AngularVelocity>,
        ),
        (With<Radio>, Without<Character>),
    >,
) {
    for (held, anchor, health) in holders.iter() {
        if health.is_dead {
            continue;
        }
        let Ok(anchor_transform) = anchors.get(anchor.0) else {
            continue;
        };
        let Ok((mut transform, position, body_rotation, linear, angular)) = radios.get_mut(held.0)
        else {
            continue;
        };

        let (_, rotation, translation) = anchor_transform.to_scale_rotation_translation();
        transform.translation = translation;
        transform.rotation = rotation;

        // Rigid bodies read their pose from the physics components.
        if let Some(mut position) = position {
            position.0 = translation;
        }
        if let Some(mut body_rotation) = body_rotation {
            body_rotation.0 = rotation;
        }

        if let Some(mut linear) = linear {
            linear.0 = Vec3::ZERO;
        }
        if let Some(mut angular) = angular {
            angular.0 = Vec3::ZERO;
        }
    }
}

/// Antenna extension and power toggle from the holder's input.
pub fn update_radio_antenna(
    time: Res<Time>,
    holders: Query<(Entity, &HeldRadio, &InputMapper, &AntennaControl, &Health), With<Character>>,
    mut radios: Query<&mut Radio>,
) {
    let dt = time.delta_secs();

    for (holder, held, mapper, control, health) in holders.iter() {
        if health.is_dead {
            continue;
        }
        let Some(input) = mapper.snapshot else {
            continue;
        };
        let Ok(mut radio) = radios.get_mut(held.0) else {
            continue;
        };

        let length = control.next_length(
            radio.antenna_length,
            input.look,
            input.accessory_extend,
            input.accessory_retract,
            dt,
        );
        radio.set_antenna_length(length);

        if mapper.toggle_pressed() {
            radio.toggle();
            info!(
                "Character {:?} switched radio {}",
                holder,
                if radio.powered { "on" } else { "off" }
            );
        }
    }
}

/// Dead holders keep their radio on at full power.
pub fn radio_distress_beacon(
    holders: Query<(&HeldRadio, &Health), With<Character>>,
    mut radios: Query<&mut Radio>,
) {
    for (held, health) in holders.iter() {
        if !health.is_dead {
            continue;
        }
        if let Ok(mut radio) = radios.get_mut(held.0) {
            radio.distress_beacon();
        }
    }
}
