//! Input state management
//!
//! Polls keyboard (macroquad) and gamepad, combining them into the set of
//! actions held this frame.

use macroquad::prelude::*;
use super::gamepad::{button, Gamepad};
use super::{Action, ActionSet};

/// How far the stick must lean on an axis to count as a direction key
const STICK_THRESHOLD: f32 = 0.5;

pub struct InputState {
    gamepad: Gamepad,
}

impl InputState {
    pub fn new() -> Self {
        Self { gamepad: Gamepad::new() }
    }

    /// Call once per frame before reading actions
    pub fn poll(&mut self) {
        self.gamepad.poll();
    }

    /// Everything held right now, keyboard and gamepad combined
    pub fn held(&self) -> ActionSet {
        let mut set: ActionSet = Action::ALL
            .into_iter()
            .filter(|&a| self.keyboard_down(a) || self.gamepad_down(a))
            .collect();
        for action in stick_actions(self.gamepad.left_stick()).iter() {
            set.insert(action);
        }
        set
    }

    fn keyboard_down(&self, action: Action) -> bool {
        match action {
            Action::MoveUp => is_key_down(KeyCode::Up) || is_key_down(KeyCode::W),
            Action::MoveDown => is_key_down(KeyCode::Down) || is_key_down(KeyCode::S),
            Action::MoveLeft => is_key_down(KeyCode::Left) || is_key_down(KeyCode::A),
            Action::MoveRight => is_key_down(KeyCode::Right) || is_key_down(KeyCode::D),
            Action::Attack => is_key_down(KeyCode::Space),
            Action::Magic => is_key_down(KeyCode::LeftControl),
            Action::SwitchWeapon => is_key_down(KeyCode::Q),
            Action::SwitchSpell => is_key_down(KeyCode::E),
        }
    }

    fn gamepad_down(&self, action: Action) -> bool {
        let gp = &self.gamepad;
        match action {
            Action::MoveUp => gp.is_button_down(button::DPAD_UP),
            Action::MoveDown => gp.is_button_down(button::DPAD_DOWN),
            Action::MoveLeft => gp.is_button_down(button::DPAD_LEFT),
            Action::MoveRight => gp.is_button_down(button::DPAD_RIGHT),
            Action::Attack => gp.is_button_down(button::A),
            Action::Magic => gp.is_button_down(button::X),
            Action::SwitchWeapon => gp.is_button_down(button::Y),
            Action::SwitchSpell => gp.is_button_down(button::B),
        }
    }

    pub fn has_gamepad(&self) -> bool {
        self.gamepad.has_gamepad()
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

/// Digitize a stick position into direction actions
pub fn stick_actions(stick: Vec2) -> ActionSet {
    let mut set = ActionSet::empty();
    if stick.y <= -STICK_THRESHOLD {
        set.insert(Action::MoveUp);
    } else if stick.y >= STICK_THRESHOLD {
        set.insert(Action::MoveDown);
    }
    if stick.x <= -STICK_THRESHOLD {
        set.insert(Action::MoveLeft);
    } else if stick.x >= STICK_THRESHOLD {
        set.insert(Action::MoveRight);
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stick_diagonal() {
        let set = stick_actions(Vec2::new(0.7, -0.7));
        assert!(set.contains(Action::MoveRight));
        assert!(set.contains(Action::MoveUp));
        assert!(!set.contains(Action::MoveDown));
    }

    #[test]
    fn test_stick_below_threshold_is_idle() {
        assert!(stick_actions(Vec2::new(0.4, 0.2)).is_empty());
    }
}
