use std::collections::HashSet;

use winit::keyboard::KeyCode;

use crate::player::Intent;

const FORWARD: &[KeyCode] = &[KeyCode::ArrowUp, KeyCode::KeyW];
const BACKWARD: &[KeyCode] = &[KeyCode::ArrowDown, KeyCode::KeyS];
const LEFT: &[KeyCode] = &[KeyCode::ArrowLeft, KeyCode::KeyA];
const RIGHT: &[KeyCode] = &[KeyCode::ArrowRight, KeyCode::KeyD];

/// Samples held keys into a single intent. Forward beats backward beats left
/// beats right when several are held.
pub fn intent_from_keys(keys_down: &HashSet<KeyCode>) -> Option<Intent> {
    let held = |keys: &[KeyCode]| keys.iter().any(|k| keys_down.contains(k));

    if held(FORWARD) {
        Some(Intent::MoveForward)
    } else if held(BACKWARD) {
        Some(Intent::MoveBackward)
    } else if held(LEFT) {
        Some(Intent::RotateLeft)
    } else if held(RIGHT) {
        Some(Intent::RotateRight)
    } else {
        None
    }
}
