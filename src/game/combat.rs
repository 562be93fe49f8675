//! Player combat state, input intent and cooldown timers
//!
//! All timers are plain millisecond timestamps compared against the frame's
//! `now`; nothing is scheduled. Each timer is re-evaluated every frame whether
//! or not its action fired.

use macroquad::prelude::Vec2;
use crate::input::{Action, ActionSet};
use super::animation::Facing;
use super::components::Motion;
use super::rect::Rect;

/// How long an attack (melee or magic) keeps the entity in its attack state
pub const ATTACK_COOLDOWN: u64 = 400;

/// Minimum time between two weapon (or spell) switches
pub const CHANGE_WEAPON_COOLDOWN: u64 = 150;

/// Mana recovered per frame
pub const MANA_REGEN: f32 = 0.15;

pub struct WeaponData {
    pub name: &'static str,
    pub damage: i32,
}

/// Fixed weapon table; `weapon_index` always points into it
pub const WEAPONS: [WeaponData; 5] = [
    WeaponData { name: "sword", damage: 15 },
    WeaponData { name: "lance", damage: 30 },
    WeaponData { name: "axe", damage: 20 },
    WeaponData { name: "rapier", damage: 8 },
    WeaponData { name: "sai", damage: 10 },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpellEffect {
    Flame,
    Heal,
}

pub struct SpellData {
    pub name: &'static str,
    pub effect: SpellEffect,
    pub strength: f32,
    pub cost: f32,
}

pub const SPELLS: [SpellData; 2] = [
    SpellData { name: "flame", effect: SpellEffect::Flame, strength: 5.0, cost: 20.0 },
    SpellData { name: "heal", effect: SpellEffect::Heal, strength: 20.0, cost: 10.0 },
];

/// A cycling selection over a fixed table, gated by a cooldown
#[derive(Debug, Clone, Copy)]
struct Selector {
    index: usize,
    len: usize,
    ready: bool,
    changed_at: Option<u64>,
}

impl Selector {
    fn new(len: usize) -> Self {
        Self { index: 0, len, ready: true, changed_at: None }
    }

    fn request(&mut self, now: u64) -> bool {
        if !self.ready {
            return false;
        }
        self.index = (self.index + 1) % self.len;
        self.ready = false;
        self.changed_at = Some(now);
        true
    }

    fn cool_down(&mut self, now: u64) {
        if let Some(at) = self.changed_at {
            if now.saturating_sub(at) >= CHANGE_WEAPON_COOLDOWN {
                self.ready = true;
                self.changed_at = None;
            }
        }
    }
}

/// Player stats and equipment
///
/// Fields are private so the clamping invariants hold: health stays in
/// `0..=max_health`, mana in `0..=max_mana`, and both indices stay inside
/// their tables.
#[derive(Debug, Clone)]
pub struct CombatState {
    health: f32,
    max_health: f32,
    mana: f32,
    max_mana: f32,
    experience: u32,
    weapon: Selector,
    spell: Selector,
}

impl CombatState {
    pub fn new(max_health: f32, max_mana: f32) -> Self {
        Self {
            health: max_health,
            max_health,
            mana: max_mana,
            max_mana,
            experience: 0,
            weapon: Selector::new(WEAPONS.len()),
            spell: Selector::new(SPELLS.len()),
        }
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    pub fn mana(&self) -> f32 {
        self.mana
    }

    pub fn max_mana(&self) -> f32 {
        self.max_mana
    }

    pub fn experience(&self) -> u32 {
        self.experience
    }

    pub fn weapon_index(&self) -> usize {
        self.weapon.index
    }

    pub fn can_change_weapon(&self) -> bool {
        self.weapon.ready
    }

    pub fn spell_index(&self) -> usize {
        self.spell.index
    }

    pub fn can_change_spell(&self) -> bool {
        self.spell.ready
    }

    pub fn weapon(&self) -> &'static WeaponData {
        &WEAPONS[self.weapon.index]
    }

    pub fn spell(&self) -> &'static SpellData {
        &SPELLS[self.spell.index]
    }

    /// Advance to the next weapon unless a switch is cooling down
    pub fn request_weapon_switch(&mut self, now: u64) -> bool {
        self.weapon.request(now)
    }

    pub fn request_spell_switch(&mut self, now: u64) -> bool {
        self.spell.request(now)
    }

    /// Re-enable switching once the switch cooldowns have elapsed
    pub fn apply_cooldown(&mut self, now: u64) {
        self.weapon.cool_down(now);
        self.spell.cool_down(now);
    }

    /// Pay for and apply the selected spell. Returns false (and changes
    /// nothing) when mana is short.
    pub fn cast_spell(&mut self) -> bool {
        let spell = self.spell();
        if self.mana < spell.cost {
            return false;
        }
        self.mana -= spell.cost;
        if spell.effect == SpellEffect::Heal {
            self.health = (self.health + spell.strength).min(self.max_health);
        }
        true
    }

    pub fn regen_mana(&mut self) {
        self.mana = (self.mana + MANA_REGEN).min(self.max_mana);
    }

    pub fn gain_experience(&mut self, amount: u32) {
        self.experience = self.experience.saturating_add(amount);
    }

    #[cfg(test)]
    pub(crate) fn set_vitals(&mut self, health: f32, mana: f32) {
        self.health = health.clamp(0.0, self.max_health);
        self.mana = mana.clamp(0.0, self.max_mana);
    }
}

/// What the held inputs ask the player to do this frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerIntent {
    /// Each axis is exactly -1, 0 or +1
    pub direction: Vec2,
    /// New facing, if any direction key is held
    pub facing: Option<Facing>,
    pub attack: bool,
    pub magic: bool,
    pub switch_weapon: bool,
    pub switch_spell: bool,
}

impl PlayerIntent {
    /// Map held actions to an intent. Up beats down and right beats left when
    /// both are held; horizontal keys decide facing over vertical ones.
    pub fn from_actions(actions: &ActionSet) -> Self {
        let mut intent = PlayerIntent::default();

        if actions.contains(Action::MoveUp) {
            intent.direction.y = -1.0;
            intent.facing = Some(Facing::Up);
        } else if actions.contains(Action::MoveDown) {
            intent.direction.y = 1.0;
            intent.facing = Some(Facing::Down);
        }

        if actions.contains(Action::MoveRight) {
            intent.direction.x = 1.0;
            intent.facing = Some(Facing::Right);
        } else if actions.contains(Action::MoveLeft) {
            intent.direction.x = -1.0;
            intent.facing = Some(Facing::Left);
        }

        intent.attack = actions.contains(Action::Attack);
        intent.magic = actions.contains(Action::Magic);
        intent.switch_weapon = actions.contains(Action::SwitchWeapon);
        intent.switch_spell = actions.contains(Action::SwitchSpell);
        intent
    }
}

/// Clear the attack state once it has run its course
pub fn expire_attack(motion: &mut Motion, now: u64) {
    if let Some(started) = motion.attack_started_at {
        if now.saturating_sub(started) >= ATTACK_COOLDOWN {
            motion.is_attacking = false;
            motion.attack_started_at = None;
        }
    }
}

/// Apply this frame's intent to the player's motion and combat state
pub fn apply_intent(motion: &mut Motion, combat: &mut CombatState, intent: &PlayerIntent, now: u64) {
    motion.direction = intent.direction;
    motion.is_still = intent.direction == Vec2::ZERO;
    if let Some(facing) = intent.facing {
        motion.facing = facing;
    }

    if !motion.is_attacking && (intent.attack || intent.magic) {
        motion.is_attacking = true;
        motion.attack_started_at = Some(now);
        if !intent.attack {
            combat.cast_spell();
        }
    }

    if intent.switch_weapon {
        combat.request_weapon_switch(now);
    }
    if intent.switch_spell {
        combat.request_spell_switch(now);
    }
}

/// Where the weapon sprite goes: against the side of the player it faces,
/// nudged so it lines up with the character's hand
pub fn weapon_rect(facing: Facing, player: &Rect, w: f32, h: f32) -> Rect {
    let mut rect = Rect::new(0.0, 0.0, w, h);
    match facing {
        Facing::Right => {
            let anchor = player.mid_right() + Vec2::new(0.0, 16.0);
            rect.set_left(anchor.x);
            rect.set_center(Vec2::new(rect.center_x(), anchor.y));
        }
        Facing::Left => {
            let anchor = player.mid_left() + Vec2::new(0.0, 16.0);
            rect.set_right(anchor.x);
            rect.set_center(Vec2::new(rect.center_x(), anchor.y));
        }
        Facing::Down => {
            let anchor = player.mid_bottom() + Vec2::new(-10.0, 0.0);
            rect.set_top(anchor.y);
            rect.set_center(Vec2::new(anchor.x, rect.center_y()));
        }
        Facing::Up => {
            let anchor = player.mid_top() + Vec2::new(-10.0, 0.0);
            rect.set_bottom(anchor.y);
            rect.set_center(Vec2::new(anchor.x, rect.center_y()));
        }
    }
    rect
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actions(list: &[Action]) -> ActionSet {
        list.iter().copied().collect()
    }

    #[test]
    fn test_weapon_switch_cooldown_gating() {
        let mut combat = CombatState::new(100.0, 60.0);

        combat.apply_cooldown(0);
        assert!(combat.request_weapon_switch(0));
        assert_eq!(combat.weapon_index(), 1);
        assert!(!combat.can_change_weapon());

        combat.apply_cooldown(100);
        assert!(!combat.request_weapon_switch(100));
        assert_eq!(combat.weapon_index(), 1);

        combat.apply_cooldown(151);
        assert!(combat.can_change_weapon());
        assert!(combat.request_weapon_switch(151));
        assert_eq!(combat.weapon_index(), 2);
    }

    #[test]
    fn test_weapon_index_wraps() {
        let mut combat = CombatState::new(100.0, 60.0);
        let mut now = 0;
        for _ in 0..WEAPONS.len() {
            combat.apply_cooldown(now);
            assert!(combat.request_weapon_switch(now));
            now += CHANGE_WEAPON_COOLDOWN;
        }
        assert_eq!(combat.weapon_index(), 0);
    }

    #[test]
    fn test_spell_switch_has_its_own_timer() {
        let mut combat = CombatState::new(100.0, 60.0);
        assert!(combat.request_weapon_switch(0));
        assert!(combat.request_spell_switch(10));
        combat.apply_cooldown(150);
        assert!(combat.can_change_weapon());
        assert!(!combat.can_change_spell());
        combat.apply_cooldown(160);
        assert!(combat.can_change_spell());
        assert_eq!(combat.spell_index(), 1);
    }

    #[test]
    fn test_intent_axes_and_facing() {
        let intent = PlayerIntent::from_actions(&actions(&[Action::MoveUp, Action::MoveLeft]));
        assert_eq!(intent.direction, Vec2::new(-1.0, -1.0));
        assert_eq!(intent.facing, Some(Facing::Left));

        let intent = PlayerIntent::from_actions(&actions(&[Action::MoveUp, Action::MoveDown]));
        assert_eq!(intent.direction, Vec2::new(0.0, -1.0));
        assert_eq!(intent.facing, Some(Facing::Up));

        let intent = PlayerIntent::from_actions(&ActionSet::empty());
        assert_eq!(intent.direction, Vec2::ZERO);
        assert_eq!(intent.facing, None);
    }

    #[test]
    fn test_facing_persists_while_still() {
        let mut motion = Motion::new(0.0);
        let mut combat = CombatState::new(100.0, 60.0);
        let walk_left = PlayerIntent::from_actions(&actions(&[Action::MoveLeft]));
        apply_intent(&mut motion, &mut combat, &walk_left, 0);
        assert!(!motion.is_still);

        apply_intent(&mut motion, &mut combat, &PlayerIntent::default(), 50);
        assert!(motion.is_still);
        assert_eq!(motion.facing, Facing::Left);
    }

    #[test]
    fn test_attack_lasts_for_cooldown() {
        let mut motion = Motion::new(0.0);
        let mut combat = CombatState::new(100.0, 60.0);
        let attack = PlayerIntent::from_actions(&actions(&[Action::Attack]));

        apply_intent(&mut motion, &mut combat, &attack, 1000);
        assert!(motion.is_attacking);

        // Holding attack does not restart the timer
        expire_attack(&mut motion, 1200);
        apply_intent(&mut motion, &mut combat, &attack, 1200);
        assert_eq!(motion.attack_started_at, Some(1000));

        expire_attack(&mut motion, 1399);
        assert!(motion.is_attacking);
        expire_attack(&mut motion, 1400);
        assert!(!motion.is_attacking);
    }

    #[test]
    fn test_magic_spends_mana_and_heal_clamps() {
        let mut motion = Motion::new(0.0);
        let mut combat = CombatState::new(100.0, 60.0);
        combat.request_spell_switch(0); // heal
        combat.set_vitals(95.0, 60.0);

        let magic = PlayerIntent::from_actions(&actions(&[Action::Magic]));
        apply_intent(&mut motion, &mut combat, &magic, 0);
        assert!(motion.is_attacking);
        assert_eq!(combat.health(), 100.0);
        assert_eq!(combat.mana(), 50.0);
    }

    #[test]
    fn test_spell_without_mana_changes_nothing() {
        let mut combat = CombatState::new(100.0, 60.0);
        combat.set_vitals(40.0, 5.0);
        assert!(!combat.cast_spell());
        assert_eq!(combat.mana(), 5.0);
        assert_eq!(combat.health(), 40.0);
    }

    #[test]
    fn test_mana_regen_clamps() {
        let mut combat = CombatState::new(100.0, 60.0);
        combat.regen_mana();
        assert_eq!(combat.mana(), 60.0);
        combat.set_vitals(100.0, 10.0);
        combat.regen_mana();
        assert!((combat.mana() - (10.0 + MANA_REGEN)).abs() < 1e-5);
    }

    #[test]
    fn test_weapon_rect_sits_on_facing_side() {
        let player = Rect::new(100.0, 100.0, 64.0, 64.0);
        let right = weapon_rect(Facing::Right, &player, 40.0, 20.0);
        assert_eq!(right.left(), player.right());
        assert_eq!(right.center_y(), player.center_y() + 16.0);

        let left = weapon_rect(Facing::Left, &player, 40.0, 20.0);
        assert_eq!(left.right(), player.left());

        let down = weapon_rect(Facing::Down, &player, 20.0, 40.0);
        assert_eq!(down.top(), player.bottom());
        assert_eq!(down.center_x(), player.center_x() - 10.0);

        let up = weapon_rect(Facing::Up, &player, 20.0, 40.0);
        assert_eq!(up.bottom(), player.top());
    }
}
