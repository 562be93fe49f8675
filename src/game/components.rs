//! Entity variants and their data
//!
//! Every entity in the world is one of a closed set of kinds. Shared data
//! (body, image, group membership) lives in the world's component storages;
//! the kind carries what only that variant needs.

use macroquad::prelude::Vec2;
use super::animation::{Animator, Facing};
use super::combat::CombatState;
use super::entity::Entity;

/// Membership in the level's derived groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Groups {
    /// Drawn by the camera
    pub visible: bool,
    /// Blocks movement
    pub obstacle: bool,
}

impl Groups {
    pub const VISIBLE: Groups = Groups { visible: true, obstacle: false };
    pub const OBSTACLE: Groups = Groups { visible: false, obstacle: true };
    pub const VISIBLE_OBSTACLE: Groups = Groups { visible: true, obstacle: true };
}

/// Movement and animation state shared by players and enemies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub direction: Vec2,
    pub speed: f32,
    pub facing: Facing,
    pub is_still: bool,
    pub is_attacking: bool,
    pub attack_started_at: Option<u64>,
    pub animator: Animator,
}

impl Motion {
    pub fn new(speed: f32) -> Self {
        Self {
            direction: Vec2::ZERO,
            speed,
            facing: Facing::Down,
            is_still: true,
            is_attacking: false,
            attack_started_at: None,
            animator: Animator::default(),
        }
    }
}

/// Monster species, selected by the code in the entities map layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    Bamboo,
    Spirit,
    Raccoon,
    Squid,
}

impl Species {
    pub const ALL: [Species; 4] = [Species::Bamboo, Species::Spirit, Species::Raccoon, Species::Squid];

    pub fn from_code(code: i32) -> Self {
        match code {
            390 => Species::Bamboo,
            391 => Species::Spirit,
            392 => Species::Raccoon,
            _ => Species::Squid,
        }
    }

    /// Directory name under `graphics/monsters/`
    pub fn name(&self) -> &'static str {
        match self {
            Species::Bamboo => "bamboo",
            Species::Spirit => "spirit",
            Species::Raccoon => "raccoon",
            Species::Squid => "squid",
        }
    }

    pub(crate) fn slot(&self) -> usize {
        *self as usize
    }
}

/// Which map layer a tile came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    /// Invisible world edge
    Boundary,
    Grass,
    /// Trees, rocks and other two-tile-tall props
    Object,
}

#[derive(Debug, Clone)]
pub struct PlayerState {
    pub motion: Motion,
    pub combat: CombatState,
    /// Weapon spawned for the current attack frame
    pub weapon: Option<Entity>,
}

#[derive(Debug, Clone)]
pub struct EnemyState {
    pub species: Species,
    pub motion: Motion,
}

#[derive(Debug, Clone, Copy)]
pub struct WeaponState {
    pub owner: Entity,
    pub weapon_index: usize,
    pub facing: Facing,
}

/// The closed set of things that can live in a level
#[derive(Debug, Clone)]
pub enum EntityKind {
    Player(PlayerState),
    Enemy(EnemyState),
    Tile(TileKind),
    Weapon(WeaponState),
}

impl EntityKind {
    pub fn is_weapon(&self) -> bool {
        matches!(self, EntityKind::Weapon(_))
    }
}
