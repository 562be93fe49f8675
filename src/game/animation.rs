//! Animation state selection
//!
//! An animated entity picks its image sequence from two orthogonal pieces of
//! state: which way it faces and what it is doing. The table is keyed by the
//! `(Facing, ActionState)` pair and is filled completely at load time, so a
//! lookup can never miss.

use std::path::Path;
use crate::asset::{AssetError, Image, ImageBank};

/// Animation frames advanced per game frame (4 game frames per image)
pub const ANIMATION_SPEED: f32 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    pub const ALL: [Facing; 4] = [Facing::Up, Facing::Down, Facing::Left, Facing::Right];

    /// Name used for asset directories and files
    pub fn name(&self) -> &'static str {
        match self {
            Facing::Up => "up",
            Facing::Down => "down",
            Facing::Left => "left",
            Facing::Right => "right",
        }
    }

    pub(crate) fn slot(&self) -> usize {
        *self as usize
    }
}

/// What an animated entity is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionState {
    Moving,
    Idle,
    Attacking,
}

impl ActionState {
    pub const ALL: [ActionState; 3] = [ActionState::Moving, ActionState::Idle, ActionState::Attacking];

    /// Attacking overrides idle, idle overrides moving
    pub fn from_flags(is_attacking: bool, is_still: bool) -> Self {
        if is_attacking {
            ActionState::Attacking
        } else if is_still {
            ActionState::Idle
        } else {
            ActionState::Moving
        }
    }

    /// Suffix appended to the facing name in directional asset layouts
    pub fn suffix(&self) -> &'static str {
        match self {
            ActionState::Moving => "",
            ActionState::Idle => "_idle",
            ActionState::Attacking => "_attack",
        }
    }

    /// Directory name in non-directional layouts (monsters)
    pub fn name(&self) -> &'static str {
        match self {
            ActionState::Moving => "move",
            ActionState::Idle => "idle",
            ActionState::Attacking => "attack",
        }
    }

    fn slot(&self) -> usize {
        *self as usize
    }
}

/// Complete `(Facing, ActionState) -> frames` table
///
/// Every entry is non-empty; constructors reject anything less.
#[derive(Debug, Clone)]
pub struct AnimationSet {
    sequences: [[Vec<Image>; 3]; 4],
}

impl AnimationSet {
    /// Build the table by asking `load` for every key
    pub fn try_from_fn<F>(mut load: F) -> Result<Self, AssetError>
    where
        F: FnMut(Facing, ActionState) -> Result<Vec<Image>, AssetError>,
    {
        let mut sequences: [[Vec<Image>; 3]; 4] = Default::default();
        for facing in Facing::ALL {
            for action in ActionState::ALL {
                let frames = load(facing, action)?;
                if frames.is_empty() {
                    return Err(AssetError::EmptySequence(
                        format!("{}{}", facing.name(), action.suffix()).into(),
                    ));
                }
                sequences[facing.slot()][action.slot()] = frames;
            }
        }
        Ok(Self { sequences })
    }

    /// Directional layout: `<dir>/<facing><suffix>/` for all twelve keys
    /// (`down/`, `down_idle/`, `down_attack/`, ...)
    pub fn load_directional(bank: &mut ImageBank, dir: &Path) -> Result<Self, AssetError> {
        Self::try_from_fn(|facing, action| {
            let sub = format!("{}{}", facing.name(), action.suffix());
            bank.load_image_sequence(&dir.join(sub))
        })
    }

    /// Non-directional layout: `<dir>/{idle,move,attack}/`, shared by every facing
    pub fn load_uniform(bank: &mut ImageBank, dir: &Path) -> Result<Self, AssetError> {
        let mut per_action: [Vec<Image>; 3] = Default::default();
        for action in ActionState::ALL {
            per_action[action.slot()] = bank.load_image_sequence(&dir.join(action.name()))?;
        }
        Self::try_from_fn(|_, action| Ok(per_action[action.slot()].clone()))
    }

    pub fn sequence(&self, facing: Facing, action: ActionState) -> &[Image] {
        &self.sequences[facing.slot()][action.slot()]
    }
}

/// Fractional frame cursor into the current sequence
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Animator {
    frame_index: f32,
}

impl Animator {
    pub fn frame_index(&self) -> f32 {
        self.frame_index
    }

    /// Return the image at the cursor, then step the cursor forward.
    ///
    /// The cursor is wrapped into the sequence first, since the sequence can
    /// get shorter when the action state changes.
    pub fn next_frame(&mut self, frames: &[Image]) -> Image {
        assert!(!frames.is_empty(), "animation sequence is empty");
        let len = frames.len() as f32;
        self.frame_index = self.frame_index.rem_euclid(len);
        let image = frames[(self.frame_index.floor() as usize).min(frames.len() - 1)];
        self.frame_index = (self.frame_index + ANIMATION_SPEED).rem_euclid(len);
        image
    }
}
