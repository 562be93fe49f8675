//! Level orchestration
//!
//! A `Level` owns the world and everything needed to step it: the obstacle
//! snapshot, the camera, the sprites and the RNG used for tile variants.
//! `run` is one frame: plan the draw, then update every entity in spawn
//! order.

use macroquad::prelude::Vec2;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use crate::asset::GameSprites;
use crate::input::ActionSet;
use crate::world::{LayerDefinition, LayerError, LayerRole, TileGraphic, EMPTY_CELL, PLAYER_MARKER};
use super::animation::{ActionState, Facing};
use super::body::{move_body, ObstacleSet, SpatialBody, PLAYER_HITBOX_INSET, SPEED, TILE_HITBOX_INSET};
use super::camera::{Background, Camera, DrawCall};
use super::combat::{apply_intent, expire_attack, weapon_rect, CombatState, PlayerIntent};
use super::components::{
    EnemyState, EntityKind, Groups, Motion, PlayerState, Species, TileKind, WeaponState,
};
use super::entity::Entity;
use super::rect::Rect;
use super::world::World;

/// Grid pitch of every map layer, in pixels
pub const TILE_SIZE: f32 = 64.0;

pub const PLAYER_MAX_HEALTH: f32 = 100.0;
pub const PLAYER_MAX_MANA: f32 = 60.0;

pub struct Level {
    world: World,
    obstacles: ObstacleSet,
    camera: Camera,
    background: Background,
    sprites: GameSprites,
    player: Option<Entity>,
    spawn: Vec2,
    rng: StdRng,
}

impl Level {
    pub fn new(sprites: GameSprites, camera: Camera, spawn: Vec2, rng_seed: Option<u64>) -> Self {
        let rng = match rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            world: World::new(),
            obstacles: ObstacleSet::default(),
            camera,
            background: Background { image: sprites.ground, top_left: Vec2::ZERO },
            sprites,
            player: None,
            spawn,
            rng,
        }
    }

    /// Place every layer's cells, then the player, then freeze the obstacle
    /// set. Layers are validated up front, so an error leaves the level empty.
    pub fn create_map(&mut self, layers: &[LayerDefinition]) -> Result<(), LayerError> {
        assert!(self.player.is_none(), "create_map called twice");
        for layer in layers {
            layer.validate()?;
        }

        for layer in layers {
            for (row, cells) in layer.layout.iter().enumerate() {
                for (col, &value) in cells.iter().enumerate() {
                    if value == EMPTY_CELL {
                        continue;
                    }
                    let pos = Vec2::new(col as f32 * TILE_SIZE, row as f32 * TILE_SIZE);
                    match &layer.role {
                        LayerRole::Tiles { kind, graphic, groups } => {
                            self.place_tile(*kind, graphic, *groups, value, pos);
                        }
                        LayerRole::Entities if value == PLAYER_MARKER => {}
                        LayerRole::Entities => self.place_enemy(Species::from_code(value), pos),
                    }
                }
            }
        }

        self.place_player();
        self.obstacles = self.world.obstacle_set();
        println!(
            "[level] {} entities, {} obstacles",
            self.world.len(),
            self.obstacles.len()
        );
        Ok(())
    }

    fn place_tile(&mut self, kind: TileKind, graphic: &TileGraphic, groups: Groups, value: i32, pos: Vec2) {
        let image = match graphic {
            TileGraphic::Invisible => None,
            TileGraphic::Random(images) => images.choose(&mut self.rng).copied(),
            // validate() guarantees the index
            TileGraphic::Indexed(images) => Some(images[value as usize]),
        };

        let visual = match image {
            // Tall props stand on their cell and extend one tile upward
            Some(img) if kind == TileKind::Object => {
                Rect::new(pos.x, pos.y - TILE_SIZE, img.width, img.height)
            }
            Some(img) => Rect::new(pos.x, pos.y, img.width, img.height),
            None => Rect::new(pos.x, pos.y, TILE_SIZE, TILE_SIZE),
        };

        self.world.spawn(
            EntityKind::Tile(kind),
            SpatialBody::new(visual, TILE_HITBOX_INSET),
            groups,
            image.map(|img| img.id),
        );
    }

    fn place_enemy(&mut self, species: Species, pos: Vec2) {
        let first = self.sprites.monster(species).sequence(Facing::Down, ActionState::Idle)[0];
        let visual = Rect::from_top_left(pos, first.width, first.height);
        self.world.spawn(
            EntityKind::Enemy(EnemyState { species, motion: Motion::new(SPEED) }),
            SpatialBody::new(visual, PLAYER_HITBOX_INSET),
            Groups::VISIBLE,
            Some(first.id),
        );
    }

    fn place_player(&mut self) {
        let first = self.sprites.player.sequence(Facing::Down, ActionState::Idle)[0];
        let visual = Rect::from_top_left(self.spawn, first.width, first.height);
        let player = self.world.spawn(
            EntityKind::Player(PlayerState {
                motion: Motion::new(SPEED),
                combat: CombatState::new(PLAYER_MAX_HEALTH, PLAYER_MAX_MANA),
                weapon: None,
            }),
            SpatialBody::new(visual, PLAYER_HITBOX_INSET),
            Groups::VISIBLE,
            Some(first.id),
        );
        self.player = Some(player);
    }

    /// Step one frame. Returns the draw list planned before the update, so
    /// what is drawn is the state the previous frame produced.
    pub fn run(&mut self, now: u64, actions: &ActionSet) -> Vec<DrawCall> {
        let calls = match self.player {
            Some(player) => self.camera.plan(&self.world, player, Some(&self.background)),
            None => Vec::new(),
        };

        let intent = PlayerIntent::from_actions(actions);
        // Weapons spawned during this pass are not updated until next frame
        let snapshot: Vec<Entity> = self.world.entities().to_vec();
        for entity in snapshot {
            match self.world.kinds.get(entity) {
                Some(EntityKind::Player(_)) => self.update_player(entity, now, &intent),
                Some(EntityKind::Enemy(_)) => self.update_enemy(entity),
                _ => {}
            }
        }
        calls
    }

    fn update_player(&mut self, entity: Entity, now: u64, intent: &PlayerIntent) {
        let (Some(EntityKind::Player(player)), Some(body)) =
            (self.world.kinds.get_mut(entity), self.world.bodies.get_mut(entity))
        else {
            return;
        };

        expire_attack(&mut player.motion, now);
        player.combat.apply_cooldown(now);
        player.combat.regen_mana();

        apply_intent(&mut player.motion, &mut player.combat, intent, now);

        let motion = &mut player.motion;
        let action = ActionState::from_flags(motion.is_attacking, motion.is_still);
        let image = motion.animator.next_frame(self.sprites.player.sequence(motion.facing, action));
        body.resize_visual(image.width, image.height);

        move_body(body, motion.direction, motion.speed, &self.obstacles);

        let old_weapon = player.weapon.take();
        let attacking = motion.is_attacking.then(|| (motion.facing, player.combat.weapon_index()));
        let visual = *body.visual();

        self.world.images.insert(entity, image.id);
        if let Some(weapon) = old_weapon {
            self.world.despawn(weapon);
        }
        if let Some((facing, weapon_index)) = attacking {
            let weapon = self.spawn_weapon(entity, weapon_index, facing, &visual);
            if let Some(EntityKind::Player(player)) = self.world.kinds.get_mut(entity) {
                player.weapon = Some(weapon);
            }
        }
    }

    fn spawn_weapon(&mut self, owner: Entity, weapon_index: usize, facing: Facing, player: &Rect) -> Entity {
        let image = self.sprites.weapon(weapon_index, facing);
        let rect = weapon_rect(facing, player, image.width, image.height);
        self.world.spawn(
            EntityKind::Weapon(WeaponState { owner, weapon_index, facing }),
            SpatialBody::solid(rect),
            Groups::VISIBLE,
            Some(image.id),
        )
    }

    /// Enemies only animate and hold still
    fn update_enemy(&mut self, entity: Entity) {
        let (Some(EntityKind::Enemy(enemy)), Some(body)) =
            (self.world.kinds.get_mut(entity), self.world.bodies.get_mut(entity))
        else {
            return;
        };

        let motion = &mut enemy.motion;
        let action = ActionState::from_flags(motion.is_attacking, motion.is_still);
        let frames = self.sprites.monster(enemy.species).sequence(motion.facing, action);
        let image = motion.animator.next_frame(frames);
        body.resize_visual(image.width, image.height);
        move_body(body, motion.direction, motion.speed, &self.obstacles);

        self.world.images.insert(entity, image.id);
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player(&self) -> Option<Entity> {
        self.player
    }

    /// None until `create_map` has placed the player
    pub fn player_state(&self) -> Option<&PlayerState> {
        match self.world.kinds.get(self.player?) {
            Some(EntityKind::Player(state)) => Some(state),
            _ => None,
        }
    }

    pub fn player_combat(&self) -> Option<&CombatState> {
        self.player_state().map(|state| &state.combat)
    }

    pub fn sprites(&self) -> &GameSprites {
        &self.sprites
    }
}
