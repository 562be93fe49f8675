//! Game action definitions

/// Everything the player can ask for in one frame
///
/// Keyboard / gamepad:
/// - Arrows or WASD / D-pad or left stick = Move
/// - Space / A = Attack
/// - Left Ctrl / X = Magic
/// - Q / Y = Switch weapon
/// - E / B = Switch spell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,

    Attack,
    Magic,

    SwitchWeapon,
    SwitchSpell,
}

impl Action {
    pub const ALL: [Action; 8] = [
        Action::MoveUp,
        Action::MoveDown,
        Action::MoveLeft,
        Action::MoveRight,
        Action::Attack,
        Action::Magic,
        Action::SwitchWeapon,
        Action::SwitchSpell,
    ];

    fn bit(self) -> u16 {
        1 << self as u16
    }
}

/// Set of actions held during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionSet(u16);

impl ActionSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, action: Action) {
        self.0 |= action.bit();
    }

    pub fn contains(&self, action: Action) -> bool {
        self.0 & action.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Action> + '_ {
        Action::ALL.into_iter().filter(|a| self.contains(*a))
    }
}

impl FromIterator<Action> for ActionSet {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        let mut set = ActionSet::empty();
        for action in iter {
            set.insert(action);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_set_membership() {
        let set: ActionSet = [Action::MoveLeft, Action::Magic, Action::MoveLeft].into_iter().collect();
        assert!(set.contains(Action::MoveLeft));
        assert!(set.contains(Action::Magic));
        assert!(!set.contains(Action::Attack));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Action::MoveLeft, Action::Magic]);
    }

    #[test]
    fn test_empty_set() {
        assert!(ActionSet::empty().is_empty());
        assert_eq!(ActionSet::default(), ActionSet::empty());
        assert!(Action::ALL.iter().all(|a| !ActionSet::empty().contains(*a)));
    }
}
