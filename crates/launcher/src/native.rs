use avian3d::prelude::Position;
use bevy::app::AppExit;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use clap::{Parser, ValueEnum};
use controller::components::health::{Health, MAX_HEALTH};
use controller::components::radio::{HeldRadio, Radio};
use controller::entities::Character;
use controller::ground::GroundContact;
use controller::inputs::channel::DeviceCategory;

use crate::{DemoSettings, FIXED_TIMESTEP_HZ, create_headless_app, create_windowed_app};

#[derive(Parser)]
#[command(name = "radio-operator")]
#[command(version = "0.1")]
#[command(about = "Character controller demo")]
#[command(long_about = "
Character controller demo: walk, jump and work the radio.

EXAMPLES:
    cargo run --bin launcher -- play                              # Keyboard, windowed
    cargo run --bin launcher -- play --device gamepad --inspector # Gamepad with world inspector
    cargo run --bin launcher -- headless --ticks 600 --seed 3     # Scripted run, no window

KEYS (play):
    WASD move, arrows look, Space jump, Left Alt toggles the radio,
    Q/E extend/retract the antenna with --rate-antenna,
    H/J hurt/heal, R reset health, G grab/drop the radio
")]
struct Cli {
    #[arg(value_enum)]
    mode: Mode,

    #[arg(long, value_enum, default_value_t = Device::Keyboard)]
    device: Device,

    #[arg(long, default_value_t = false)]
    #[arg(help = "Extend and retract the antenna with dedicated inputs")]
    rate_antenna: bool,

    #[arg(long, default_value_t = 600)]
    #[arg(help = "Ticks to simulate in headless mode")]
    ticks: u32,

    #[arg(long, default_value_t = 7)]
    #[arg(help = "Seed for the platform layout")]
    seed: u64,

    #[arg(long, default_value_t = MAX_HEALTH)]
    #[arg(help = "Starting and maximum health of the character")]
    max_health: f32,

    #[arg(long, default_value_t = false)]
    #[arg(help = "Show the world inspector (play mode)")]
    inspector: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum Mode {
    Play,
    Headless,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum Device {
    Keyboard,
    Gamepad,
}

impl From<Device> for DeviceCategory {
    fn from(device: Device) -> Self {
        match device {
            Device::Keyboard => DeviceCategory::Keyboard,
            Device::Gamepad => DeviceCategory::Gamepad,
        }
    }
}

pub fn run() -> AppExit {
    let cli = Cli::parse();

    let settings = DemoSettings {
        device: cli.device.into(),
        rate_antenna: cli.rate_antenna,
        seed: cli.seed,
        max_health: cli.max_health,
        ..default()
    };

    match cli.mode {
        Mode::Play => create_windowed_app(settings, cli.inspector).run(),
        Mode::Headless => {
            let mut app = create_headless_app(settings);
            app.add_plugins(LogPlugin::default());
            run_headless(&mut app, cli.ticks);
            AppExit::Success
        }
    }
}

/// Step the app `ticks` times and log where the character ended up.
pub fn run_headless(app: &mut App, ticks: u32) {
    app.finish();
    app.cleanup();

    let report_every = FIXED_TIMESTEP_HZ as u32;
    for tick in 1..=ticks {
        app.update();
        if tick % report_every == 0 {
            log_character(app, tick);
        }
    }
    log_character(app, ticks);
}

fn log_character(app: &mut App, tick: u32) {
    let world = app.world_mut();
    let mut characters = world.query_filtered::<(
        &Position,
        &Health,
        &GroundContact,
        Option<&HeldRadio>,
    ), With<Character>>();
    let mut radios = world.query::<&Radio>();

    for (position, health, contact, held) in characters.iter(world) {
        let radio = held.and_then(|held| radios.get(world, held.0).ok());
        info!(
            "tick {tick}: at {:.2} grounded={} health {:.0}/{:.0} radio {}",
            position.0,
            contact.grounded,
            health.current,
            health.max,
            match radio {
                Some(radio) if radio.powered => format!("on, antenna {:.2}", radio.antenna_length),
                Some(_) => "off".to_string(),
                None => "not held".to_string(),
            }
        );
    }
}
