//! Input mapping.
//!
//! [`update_viewer_input`] reads the keyboard from Raylib each frame and
//! writes movement axes into [`ViewerInput`]. F11 toggles the debug overlay
//! via [`SwitchDebugEvent`].
use bevy_ecs::prelude::*;
use raylib::RaylibHandle;
use raylib::ffi::KeyboardKey;

use crate::events::switchdebug::SwitchDebugEvent;
use crate::resources::input::ViewerInput;

/// Poll Raylib for keyboard input and update the `ViewerInput` resource.
///
/// Takes the handle directly because it is owned by the main loop, not the
/// ECS world.
pub fn update_viewer_input(world: &mut World, rl: &RaylibHandle) {
    let axis = |positive: KeyboardKey, negative: KeyboardKey| -> f32 {
        let mut value = 0.0;
        if rl.is_key_down(positive) {
            value += 1.0;
        }
        if rl.is_key_down(negative) {
            value -= 1.0;
        }
        value
    };

    let input = ViewerInput {
        forward: axis(KeyboardKey::KEY_W, KeyboardKey::KEY_S),
        strafe: axis(KeyboardKey::KEY_D, KeyboardKey::KEY_A),
        turn: axis(KeyboardKey::KEY_LEFT, KeyboardKey::KEY_RIGHT),
        look: axis(KeyboardKey::KEY_UP, KeyboardKey::KEY_DOWN),
        lift: axis(KeyboardKey::KEY_SPACE, KeyboardKey::KEY_LEFT_SHIFT),
    };
    world.insert_resource(input);

    if rl.is_key_pressed(KeyboardKey::KEY_F11) {
        world.trigger(SwitchDebugEvent {});
    }
}
