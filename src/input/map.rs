use std::collections::HashMap;

use log::debug;
use winit::keyboard::KeyCode;

use crate::state::SharedTransform;

use super::sources::{Axis, Direction, KeyAction, Rotation};

/// Maps keys to rotations of the shared transform.
#[derive(Clone, Debug)]
pub struct KeyBindings {
    map: HashMap<KeyCode, Rotation>,
    step_degrees: f32,
}

impl KeyBindings {
    pub fn new() -> Self {
        KeyBindings {
            map: HashMap::new(),
            step_degrees: 1.0,
        }
    }

    pub fn bind(mut self, key: KeyCode, rotation: Rotation) -> Self {
        self.map.insert(key, rotation);
        self
    }

    pub fn with_step(mut self, degrees: f32) -> Self {
        self.step_degrees = degrees;
        self
    }

    /// Z and X spin the mesh in the screen plane.
    pub fn in_plane() -> Self {
        KeyBindings::new()
            .bind(KeyCode::KeyZ, Rotation::new(Axis::Z, Direction::Positive))
            .bind(KeyCode::KeyX, Rotation::new(Axis::Z, Direction::Negative))
    }

    pub fn rotation_for(&self, key: KeyCode) -> Option<Rotation> {
        self.map.get(&key).copied()
    }

    /// Applies the rotation bound to `key`, if any. Returns whether the key was bound.
    pub fn apply(&self, key: KeyCode, action: KeyAction, transform: &SharedTransform) -> bool {
        debug!("Key {key:?} ({action:?})");

        let Some(rotation) = self.rotation_for(key) else {
            return false;
        };
        let steps = action.steps();
        if steps > 0 {
            let (z, x, y) = rotation.euler(self.step_degrees * steps as f32);
            transform.rotate(z, x, y);
        }
        true
    }
}

impl Default for KeyBindings {
    /// Arrow keys turn about the x and y axes, Z and X about the z axis.
    fn default() -> Self {
        KeyBindings::in_plane()
            .bind(KeyCode::ArrowLeft, Rotation::new(Axis::Y, Direction::Positive))
            .bind(KeyCode::ArrowRight, Rotation::new(Axis::Y, Direction::Negative))
            .bind(KeyCode::ArrowDown, Rotation::new(Axis::X, Direction::Positive))
            .bind(KeyCode::ArrowUp, Rotation::new(Axis::X, Direction::Negative))
    }
}
