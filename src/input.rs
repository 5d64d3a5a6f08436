//! Keyboard state and the mapping from held keys to movement intents.
//!
//! Input is handled in two steps so neither needs a real device to test:
//! [`map_keys`] turns the held-key set into a list of [`Intent`]s and
//! [`apply_intents`] applies them to the [`SceneState`].

use std::collections::HashSet;

use cgmath::Vector3;
use winit::{
    event::{ElementState, KeyEvent, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use crate::{config::LightCoupling, scene::SceneState};

/// Keys currently held down, fed from window keyboard events.
#[derive(Debug, Default, Clone)]
pub struct KeyboardState {
    held: HashSet<KeyCode>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: KeyCode) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: KeyCode) {
        self.held.remove(&key);
    }

    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }

    /// Update the held set from a winit window event.
    ///
    /// Losing focus releases everything so keys can't get stuck while the
    /// window is in the background.
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => match state {
                ElementState::Pressed => self.press(*code),
                ElementState::Released => self.release(*code),
            },
            WindowEvent::Focused(false) => self.clear(),
            _ => (),
        }
    }
}

/// A unit move along one world axis.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Back,
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub fn unit(self) -> Vector3<f32> {
        match self {
            Direction::Forward => Vector3::new(0.0, 0.0, -1.0),
            Direction::Back => Vector3::new(0.0, 0.0, 1.0),
            Direction::Left => Vector3::new(-1.0, 0.0, 0.0),
            Direction::Right => Vector3::new(1.0, 0.0, 0.0),
            Direction::Up => Vector3::new(0.0, 1.0, 0.0),
            Direction::Down => Vector3::new(0.0, -1.0, 0.0),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Intent {
    Move(Direction),
    Close,
}

// Order matters: intents are applied in this sequence.
const MOVE_BINDINGS: [(KeyCode, Direction); 6] = [
    (KeyCode::KeyW, Direction::Forward),
    (KeyCode::KeyA, Direction::Left),
    (KeyCode::KeyS, Direction::Back),
    (KeyCode::KeyD, Direction::Right),
    (KeyCode::KeyQ, Direction::Up),
    (KeyCode::KeyE, Direction::Down),
];

/// Map the held keys of one frame to intents.
///
/// There is no debouncing: a key that stays down produces its intent on
/// every frame.
pub fn map_keys(keys: &KeyboardState) -> Vec<Intent> {
    let mut intents = Vec::new();
    if keys.is_pressed(KeyCode::Escape) {
        intents.push(Intent::Close);
    }
    intents.extend(
        MOVE_BINDINGS
            .iter()
            .filter(|(key, _)| keys.is_pressed(*key))
            .map(|(_, direction)| Intent::Move(*direction)),
    );
    intents
}

/// Apply a frame's intents to the scene. Each move translates by
/// `direction * step`.
///
/// Returns `true` if one of the intents asked for the window to close.
pub fn apply_intents(
    intents: &[Intent],
    state: &mut SceneState,
    step: f32,
    coupling: LightCoupling,
) -> bool {
    let mut close = false;
    for intent in intents {
        match intent {
            Intent::Move(direction) => state.translate_light(direction.unit() * step, coupling),
            Intent::Close => close = true,
        }
    }
    close
}
