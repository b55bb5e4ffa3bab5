use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy::window::PresentMode;
use bevy_inspector_egui::{bevy_egui::EguiPlugin, quick::WorldInspectorPlugin};
use controller::ControllerPlugin;
use controller::components::health::MAX_HEALTH;
use controller::inputs::channel::DeviceCategory;

pub mod debug;
pub mod native;
pub mod scene;
pub mod script;

pub const FIXED_TIMESTEP_HZ: f64 = 60.0;

/// Knobs shared by the windowed and headless demos.
#[derive(Resource, Clone, Debug)]
pub struct DemoSettings {
    pub device: DeviceCategory,
    /// Drive the antenna with extend/retract inputs instead of the look stick.
    pub rate_antenna: bool,
    /// Seed for the platform layout.
    pub seed: u64,
    pub platforms: usize,
    pub max_health: f32,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            device: DeviceCategory::Keyboard,
            rate_antenna: false,
            seed: 7,
            platforms: 6,
            max_health: MAX_HEALTH,
        }
    }
}

pub fn create_windowed_app(settings: DemoSettings, inspector: bool) -> App {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Radio Operator".to_string(),
            resolution: (1280, 720).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }));
    app.insert_resource(settings);
    app.add_plugins(ControllerPlugin::default());
    app.add_plugins((scene::DemoScenePlugin, debug::DebugKeysPlugin));

    if inspector {
        app.add_plugins((EguiPlugin::default(), WorldInspectorPlugin::default()));
    }

    app
}

/// No window, no renderer, no devices: a scripted character on a fixed clock.
/// `LogPlugin` is left to the caller since a process can only install it once.
pub fn create_headless_app(settings: DemoSettings) -> App {
    let mut app = App::new();

    app.add_plugins(MinimalPlugins);
    app.add_plugins(bevy::transform::TransformPlugin);
    app.add_plugins(bevy::diagnostic::DiagnosticsPlugin);
    app.add_plugins(bevy::asset::AssetPlugin::default());
    app.add_plugins(bevy::scene::ScenePlugin);
    app.add_plugins(bevy::mesh::MeshPlugin);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
        1.0 / FIXED_TIMESTEP_HZ,
    )));

    app.insert_resource(settings);
    app.add_plugins(ControllerPlugin {
        read_devices: false,
        physics: true,
    });
    app.add_plugins((scene::DemoScenePlugin, script::ScriptedInputPlugin));

    app
}
