#[cfg(test)]
mod jump_system_tests {
    use avian3d::prelude::LinearVelocity;
    use bevy::prelude::*;

    use crate::effects::{CharacterEffects, EffectPlayer};
    use crate::ground::GroundContact;
    use crate::inputs::channel::{DeviceCategory, InputChannel};
    use crate::jump::{JUMP_FORCE, JumpState};
    use crate::tests::{actions_mut, controller_app, run_ticks, spawn_character};

    fn vertical_velocity(app: &App, entity: Entity) -> f32 {
        app.world().get::<LinearVelocity>(entity).unwrap().0.y
    }

    fn elapsed(app: &App) -> f32 {
        app.world().resource::<Time>().elapsed_secs()
    }

    #[test]
    fn test_grounded_jump_applies_impulse_once() {
        let mut app = controller_app();
        let character = spawn_character(&mut app, DeviceCategory::Keyboard);

        actions_mut(&mut app, character).press(&InputChannel::Action1);
        app.update();
        assert_eq!(vertical_velocity(&app, character), JUMP_FORCE);
        assert!(app.world().get::<JumpState>(character).unwrap().is_locked());

        // Holding the button through the lock never jumps again.
        run_ticks(&mut app, 5);
        assert_eq!(vertical_velocity(&app, character), JUMP_FORCE);
    }

    #[test]
    fn test_lock_needs_both_timeout_and_release() {
        let mut app = controller_app();
        let character = spawn_character(&mut app, DeviceCategory::Keyboard);

        actions_mut(&mut app, character).press(&InputChannel::Action1);
        app.update();
        actions_mut(&mut app, character).release(&InputChannel::Action1);
        run_ticks(&mut app, 3);

        // Pressed again well inside the lock window.
        actions_mut(&mut app, character).press(&InputChannel::Action1);
        run_ticks(&mut app, 8);
        assert!(elapsed(&app) > 1.0, "Lock duration has passed");
        assert_eq!(
            vertical_velocity(&app, character),
            JUMP_FORCE,
            "A held button keeps the jump locked past the timeout"
        );

        actions_mut(&mut app, character).release(&InputChannel::Action1);
        app.update();
        let state = app.world().get::<JumpState>(character).unwrap();
        assert!(!state.is_locked());
        assert_eq!(state.last_jump_time(), Some(0.0), "First jump stays on record");

        actions_mut(&mut app, character).press(&InputChannel::Action1);
        app.update();
        assert_eq!(vertical_velocity(&app, character), 2.0 * JUMP_FORCE);
    }

    #[test]
    fn test_airborne_character_cannot_jump() {
        let mut app = controller_app();
        let character = spawn_character(&mut app, DeviceCategory::Keyboard);
        app.world_mut()
            .get_mut::<GroundContact>(character)
            .unwrap()
            .grounded = false;

        actions_mut(&mut app, character).press(&InputChannel::Action1);
        run_ticks(&mut app, 3);

        assert_eq!(vertical_velocity(&app, character), 0.0);
        assert!(!app.world().get::<JumpState>(character).unwrap().is_grounded());
    }

    #[test]
    fn test_jump_held_while_landing_is_ignored() {
        let mut app = controller_app();
        let character = spawn_character(&mut app, DeviceCategory::Gamepad);
        app.world_mut()
            .get_mut::<GroundContact>(character)
            .unwrap()
            .grounded = false;

        actions_mut(&mut app, character).press(&InputChannel::Action1);
        app.update();

        app.world_mut()
            .get_mut::<GroundContact>(character)
            .unwrap()
            .grounded = true;
        app.update();
        assert_eq!(
            vertical_velocity(&app, character),
            0.0,
            "The landing tick swallows the jump"
        );

        app.update();
        assert_eq!(vertical_velocity(&app, character), JUMP_FORCE);
    }

    #[test]
    fn test_jump_plays_effect() {
        let mut app = controller_app();
        let character = spawn_character(&mut app, DeviceCategory::Keyboard);
        let effect = app.world_mut().spawn(EffectPlayer::new(0.3)).id();
        app.world_mut().entity_mut(character).insert(CharacterEffects {
            jump: Some(effect),
            damaged: None,
        });

        actions_mut(&mut app, character).press(&InputChannel::Action1);
        app.update();

        let player = app.world().get::<EffectPlayer>(effect).unwrap();
        assert_eq!(player.times_played, 1);
        assert!(player.is_playing());
    }
}
