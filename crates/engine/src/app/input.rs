use std::collections::VecDeque;

use winit::event::ElementState;
use winit::keyboard::KeyCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKey {
    Left,
    Right,
    Up,
    Down,
    Fire,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Pressed,
    Released,
}

impl From<ElementState> for KeyState {
    fn from(state: ElementState) -> Self {
        match state {
            ElementState::Pressed => Self::Pressed,
            ElementState::Released => Self::Released,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key { key: GameKey, state: KeyState },
    Quit,
}

pub trait InputSource {
    fn poll_event(&mut self) -> Option<InputEvent>;
}

#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<InputEvent>,
}

impl EventQueue {
    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    pub fn push_key(&mut self, key: GameKey, state: KeyState) {
        self.push(InputEvent::Key { key, state });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl InputSource for EventQueue {
    fn poll_event(&mut self) -> Option<InputEvent> {
        self.events.pop_front()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyBinding {
    Game(GameKey),
    Quit,
}

pub fn binding_for_key_code(code: KeyCode) -> Option<KeyBinding> {
    let key = match code {
        KeyCode::ArrowLeft | KeyCode::KeyA => GameKey::Left,
        KeyCode::ArrowRight | KeyCode::KeyD => GameKey::Right,
        KeyCode::ArrowUp | KeyCode::KeyW => GameKey::Up,
        KeyCode::ArrowDown | KeyCode::KeyS => GameKey::Down,
        KeyCode::Space => GameKey::Fire,
        KeyCode::Escape => return Some(KeyBinding::Quit),
        _ => return None,
    };
    Some(KeyBinding::Game(key))
}

pub fn event_for_key(code: KeyCode, state: ElementState) -> Option<InputEvent> {
    match binding_for_key_code(code)? {
        KeyBinding::Game(key) => Some(InputEvent::Key {
            key,
            state: state.into(),
        }),
        KeyBinding::Quit if state == ElementState::Pressed => Some(InputEvent::Quit),
        KeyBinding::Quit => None,
    }
}
