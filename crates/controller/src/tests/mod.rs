mod jump_tests;

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use leafwing_input_manager::prelude::ActionState;

use crate::ControllerPlugin;
use crate::entities::CharacterBundle;
use crate::ground::GroundContact;
use crate::inputs::channel::{DeviceCategory, InputChannel, InputDevice};

/// Fixed tick used by every app-level test.
pub(crate) const TICK: Duration = Duration::from_millis(100);

/// Headless app running the controller logic at a fixed 100 ms tick.
/// The first `update` only starts the clock, so `elapsed_secs` trails the
/// update count by one tick.
pub(crate) fn controller_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(ControllerPlugin::logic_only());
    app.insert_resource(TimeUpdateStrategy::ManualDuration(TICK));
    app
}

/// Grounded character listening to a device of `category`.
pub(crate) fn spawn_character(app: &mut App, category: DeviceCategory) -> Entity {
    let mut actions = ActionState::<InputChannel>::default();
    actions.enable();

    app.world_mut()
        .spawn((
            CharacterBundle {
                ground_contact: GroundContact { grounded: true },
                ..default()
            },
            InputDevice::new(category),
            actions,
        ))
        .id()
}

pub(crate) fn actions_mut(app: &mut App, entity: Entity) -> Mut<'_, ActionState<InputChannel>> {
    app.world_mut()
        .get_mut::<ActionState<InputChannel>>(entity)
        .unwrap()
}

pub(crate) fn run_ticks(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        app.update();
    }
}
