use avian3d::prelude::{Collider, RigidBody, Sensor};
use bevy::prelude::*;
use controller::components::radio::{AntennaControl, HeldRadio, Radio, RadioAnchor};
use controller::effects::{CharacterEffects, EffectPlayer};
use controller::entities::{
    CHARACTER_CAPSULE_HEIGHT, CHARACTER_CAPSULE_RADIUS, Character, CharacterBundle,
    CharacterPhysicsBundle, SkinnedVisual,
};
use controller::inputs::channel::{InputChannel, InputDevice, device_input_map};
use leafwing_input_manager::prelude::ActionState;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::DemoSettings;

pub const FLOOR_SIZE: f32 = 40.0;
pub const SPAWN_HEIGHT: f32 = 2.0;
const CAMERA_OFFSET: Vec3 = Vec3::new(0.0, 8.0, 12.0);

pub struct DemoScenePlugin;

impl Plugin for DemoScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_floor, spawn_platforms, spawn_character));
        app.add_systems(PostUpdate, follow_character);
    }
}

/// Render assets, present only when a renderer is running.
#[derive(bevy::ecs::system::SystemParam)]
pub struct SceneAssets<'w> {
    meshes: Option<ResMut<'w, Assets<Mesh>>>,
    materials: Option<ResMut<'w, Assets<StandardMaterial>>>,
}

impl SceneAssets<'_> {
    fn rendering(&self) -> bool {
        self.meshes.is_some() && self.materials.is_some()
    }

    fn visual(
        &mut self,
        mesh: impl Into<Mesh>,
        color: Color,
    ) -> Option<(Mesh3d, MeshMaterial3d<StandardMaterial>)> {
        let meshes = self.meshes.as_mut()?;
        let materials = self.materials.as_mut()?;
        Some((
            Mesh3d(meshes.add(mesh)),
            MeshMaterial3d(materials.add(color)),
        ))
    }
}

fn spawn_floor(mut commands: Commands, mut assets: SceneAssets) {
    let mut floor = commands.spawn((
        Name::new("Floor"),
        RigidBody::Static,
        Collider::cuboid(FLOOR_SIZE, 0.2, FLOOR_SIZE),
        Transform::from_xyz(0.0, -0.1, 0.0),
    ));
    if let Some(visual) = assets.visual(
        Cuboid::new(FLOOR_SIZE, 0.2, FLOOR_SIZE),
        Color::srgb(0.3, 0.32, 0.3),
    ) {
        floor.insert(visual);
    }

    if !assets.rendering() {
        return;
    }
    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, 2.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Boxes to jump on, scattered from the configured seed.
fn spawn_platforms(mut commands: Commands, settings: Res<DemoSettings>, mut assets: SceneAssets) {
    let mut rng = StdRng::seed_from_u64(settings.seed);
    let reach = FLOOR_SIZE * 0.4;

    for index in 0..settings.platforms {
        let size = Vec3::new(
            rng.random_range(1.5..4.0),
            rng.random_range(0.3..1.2),
            rng.random_range(1.5..4.0),
        );
        let position = Vec3::new(
            rng.random_range(-reach..reach),
            size.y * 0.5,
            rng.random_range(-reach..reach),
        );

        let mut platform = commands.spawn((
            Name::new(format!("Platform {index}")),
            RigidBody::Static,
            Collider::cuboid(size.x, size.y, size.z),
            Transform::from_translation(position),
        ));
        if let Some(visual) =
            assets.visual(Cuboid::from_size(size), Color::srgb(0.55, 0.5, 0.4))
        {
            platform.insert(visual);
        }
    }
}

fn spawn_character(mut commands: Commands, settings: Res<DemoSettings>, mut assets: SceneAssets) {
    let effects = CharacterEffects {
        jump: Some(commands.spawn((Name::new("JumpEffect"), EffectPlayer::new(0.3))).id()),
        damaged: Some(
            commands
                .spawn((Name::new("DamagedEffect"), EffectPlayer::new(0.5)))
                .id(),
        ),
    };

    let antenna = if settings.rate_antenna {
        AntennaControl::rate()
    } else {
        AntennaControl::Direct
    };

    let character = commands
        .spawn((
            Name::new("Character"),
            CharacterBundle::default()
                .with_max_health(settings.max_health)
                .with_antenna(antenna),
            CharacterPhysicsBundle::default(),
            Transform::from_xyz(0.0, SPAWN_HEIGHT, 0.0),
            Visibility::default(),
            InputDevice::new(settings.device),
            device_input_map(settings.device),
            ActionState::<InputChannel>::default(),
            effects,
        ))
        .id();

    let mut body = commands.spawn((
        Name::new("Body"),
        SkinnedVisual,
        Visibility::Inherited,
        Transform::default(),
        ChildOf(character),
    ));
    if let Some(visual) = assets.visual(
        Capsule3d::new(CHARACTER_CAPSULE_RADIUS, CHARACTER_CAPSULE_HEIGHT),
        Color::srgb(0.8, 0.45, 0.2),
    ) {
        body.insert(visual);
    }

    let anchor = commands
        .spawn((
            Name::new("RadioAnchor"),
            Transform::from_xyz(CHARACTER_CAPSULE_RADIUS + 0.1, 0.2, -0.3),
            Visibility::default(),
            ChildOf(character),
        ))
        .id();

    let mut radio = commands.spawn((
        Name::new("Radio"),
        Radio::default(),
        RigidBody::Dynamic,
        Collider::cuboid(0.12, 0.3, 0.08),
        Sensor,
        Transform::default(),
    ));
    if let Some(visual) =
        assets.visual(Cuboid::new(0.12, 0.3, 0.08), Color::srgb(0.15, 0.15, 0.15))
    {
        radio.insert(visual);
    }
    let radio = radio.id();

    commands
        .entity(character)
        .insert((RadioAnchor(anchor), HeldRadio(radio)));

    if assets.rendering() {
        commands.spawn((
            Name::new("Camera"),
            Camera3d::default(),
            Transform::from_translation(Vec3::new(0.0, SPAWN_HEIGHT, 0.0) + CAMERA_OFFSET)
                .looking_at(Vec3::ZERO, Vec3::Y),
        ));
    }

    info!(
        "Spawned character {:?} ({:?}, {:?} antenna)",
        character, settings.device, antenna
    );
}

fn follow_character(
    characters: Query<&Transform, (With<Character>, Without<Camera3d>)>,
    mut cameras: Query<&mut Transform, With<Camera3d>>,
) {
    let Some(target) = characters.iter().next() else {
        return;
    };
    for mut camera in cameras.iter_mut() {
        *camera = Transform::from_translation(target.translation + CAMERA_OFFSET)
            .looking_at(target.translation, Vec3::Y);
    }
}
