//! Keyboard input adapter
//!
//! Translates raw key events into paddle intent. Unrecognised keys are
//! ignored.

use serde::{Deserialize, Serialize};

use crate::sim::{Direction, Game};

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    /// Modifier that switches the paddle to its boosted speed
    Boost,
}

impl Key {
    /// Map a legacy DOM `keyCode`
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            37 => Some(Key::Left),
            39 => Some(Key::Right),
            16 => Some(Key::Boost),
            _ => None,
        }
    }

    /// Map a DOM `key`/`code` name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" | "Left" => Some(Key::Left),
            "ArrowRight" | "Right" => Some(Key::Right),
            "Shift" | "ShiftLeft" | "ShiftRight" => Some(Key::Boost),
            _ => None,
        }
    }
}

/// A key going down or up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: Key,
    pub pressed: bool,
}

impl KeyEvent {
    pub fn down(key: Key) -> Self {
        Self { key, pressed: true }
    }

    pub fn up(key: Key) -> Self {
        Self {
            key,
            pressed: false,
        }
    }
}

/// Receiver of paddle intent
pub trait PaddleControl {
    fn on_direction_change(&mut self, direction: Direction, pressed: bool);
    fn on_boost_change(&mut self, active: bool);
}

impl PaddleControl for Game {
    fn on_direction_change(&mut self, direction: Direction, pressed: bool) {
        Game::on_direction_change(self, direction, pressed);
    }

    fn on_boost_change(&mut self, active: bool) {
        Game::on_boost_change(self, active);
    }
}

/// Route a key event to the matching handler
pub fn dispatch<C: PaddleControl + ?Sized>(target: &mut C, event: KeyEvent) {
    match event.key {
        Key::Left => target.on_direction_change(Direction::Left, event.pressed),
        Key::Right => target.on_direction_change(Direction::Right, event.pressed),
        Key::Boost => target.on_boost_change(event.pressed),
    }
}

/// Route a raw key code. Returns false if the code is not bound.
pub fn dispatch_code<C: PaddleControl + ?Sized>(target: &mut C, code: u32, pressed: bool) -> bool {
    match Key::from_code(code) {
        Some(key) => {
            dispatch(target, KeyEvent { key, pressed });
            true
        }
        None => {
            log::trace!("Ignoring key code {}", code);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl PaddleControl for Recorder {
        fn on_direction_change(&mut self, direction: Direction, pressed: bool) {
            self.calls.push(format!("{:?}:{}", direction, pressed));
        }

        fn on_boost_change(&mut self, active: bool) {
            self.calls.push(format!("boost:{}", active));
        }
    }

    #[test]
    fn test_key_codes() {
        assert_eq!(Key::from_code(37), Some(Key::Left));
        assert_eq!(Key::from_code(39), Some(Key::Right));
        assert_eq!(Key::from_code(16), Some(Key::Boost));
        assert_eq!(Key::from_code(32), None);
    }

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_name("ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::from_name("ShiftRight"), Some(Key::Boost));
        assert_eq!(Key::from_name("a"), None);
    }

    #[test]
    fn test_dispatch_routes_events() {
        let mut rec = Recorder::default();
        dispatch(&mut rec, KeyEvent::down(Key::Right));
        dispatch(&mut rec, KeyEvent::down(Key::Boost));
        dispatch(&mut rec, KeyEvent::up(Key::Right));
        assert!(!dispatch_code(&mut rec, 65, true));
        assert!(dispatch_code(&mut rec, 37, true));
        assert_eq!(
            rec.calls,
            vec!["Right:true", "boost:true", "Right:false", "Left:true"]
        );
    }

    #[test]
    fn test_dispatch_sets_paddle_flags() {
        let mut game = Game::new(Settings::default()).unwrap();
        dispatch(&mut game, KeyEvent::down(Key::Left));
        dispatch(&mut game, KeyEvent::down(Key::Boost));
        let paddle = &game.round().paddle;
        assert!(paddle.moving_left);
        assert!(!paddle.moving_right);
        assert!(paddle.boosted);

        dispatch(&mut game, KeyEvent::up(Key::Boost));
        assert!(!game.round().paddle.boosted);
    }
}
