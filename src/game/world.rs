//! Entity arena
//!
//! The `World` owns every entity in a level. Data common to all kinds is
//! stored per component; the kind itself is a tagged variant. The render and
//! collision "groups" are not containers entities join, they are filters over
//! the `groups` component evaluated in insertion order.

use crate::asset::ImageId;
use super::body::{ObstacleSet, SpatialBody};
use super::component::ComponentStorage;
use super::components::{EntityKind, Groups};
use super::entity::{Entity, EntityAllocator};

pub struct World {
    entities: EntityAllocator,

    /// Live entities in the order they were spawned
    order: Vec<Entity>,

    pub bodies: ComponentStorage<SpatialBody>,
    pub kinds: ComponentStorage<EntityKind>,
    pub groups: ComponentStorage<Groups>,

    /// Current image; entities without one (boundary tiles) are never drawn
    pub images: ComponentStorage<ImageId>,
}

impl World {
    pub fn new() -> Self {
        Self {
            entities: EntityAllocator::new(),
            order: Vec::new(),
            bodies: ComponentStorage::new(),
            kinds: ComponentStorage::new(),
            groups: ComponentStorage::new(),
            images: ComponentStorage::new(),
        }
    }

    pub fn spawn(
        &mut self,
        kind: EntityKind,
        body: SpatialBody,
        groups: Groups,
        image: Option<ImageId>,
    ) -> Entity {
        let entity = self.entities.allocate();
        self.kinds.insert(entity, kind);
        self.bodies.insert(entity, body);
        self.groups.insert(entity, groups);
        if let Some(image) = image {
            self.images.insert(entity, image);
        }
        self.order.push(entity);
        entity
    }

    /// Remove an entity and all of its components. Stale handles are ignored.
    pub fn despawn(&mut self, entity: Entity) -> bool {
        if !self.entities.free(entity) {
            return false;
        }
        self.kinds.remove(entity);
        self.bodies.remove(entity);
        self.groups.remove(entity);
        self.images.remove(entity);
        self.order.retain(|&e| e != entity);
        true
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    pub fn len(&self) -> usize {
        self.entities.alive_count() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live entities in spawn order
    pub fn entities(&self) -> &[Entity] {
        &self.order
    }

    /// The visible group, in spawn order
    pub fn visible(&self) -> impl Iterator<Item = Entity> + '_ {
        self.in_group(|g| g.visible)
    }

    /// The obstacle group, in spawn order
    pub fn obstacles(&self) -> impl Iterator<Item = Entity> + '_ {
        self.in_group(|g| g.obstacle)
    }

    fn in_group<F>(&self, filter: F) -> impl Iterator<Item = Entity> + '_
    where
        F: Fn(&Groups) -> bool + 'static,
    {
        self.order
            .iter()
            .copied()
            .filter(move |&e| self.groups.get(e).is_some_and(&filter))
    }

    /// Snapshot of every obstacle hitbox
    pub fn obstacle_set(&self) -> ObstacleSet {
        ObstacleSet::new(
            self.obstacles()
                .filter_map(|e| self.bodies.get(e).map(|b| *b.hitbox()))
                .collect(),
        )
    }

    pub fn count_weapons(&self) -> usize {
        self.order
            .iter()
            .filter(|&&e| self.kinds.get(e).is_some_and(EntityKind::is_weapon))
            .count()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::components::TileKind;
    use crate::game::rect::Rect;

    fn tile_body(x: f32) -> SpatialBody {
        SpatialBody::solid(Rect::new(x, 0.0, 64.0, 64.0))
    }

    #[test]
    fn test_groups_are_filtered_views() {
        let mut world = World::new();
        let boundary = world.spawn(EntityKind::Tile(TileKind::Boundary), tile_body(0.0), Groups::OBSTACLE, None);
        let grass = world.spawn(EntityKind::Tile(TileKind::Grass), tile_body(64.0), Groups::VISIBLE_OBSTACLE, None);
        let deco = world.spawn(EntityKind::Tile(TileKind::Object), tile_body(128.0), Groups::VISIBLE, None);

        assert_eq!(world.visible().collect::<Vec<_>>(), vec![grass, deco]);
        assert_eq!(world.obstacles().collect::<Vec<_>>(), vec![boundary, grass]);
        assert_eq!(world.obstacle_set().len(), 2);
    }

    #[test]
    fn test_despawn_removes_from_every_view() {
        let mut world = World::new();
        let a = world.spawn(EntityKind::Tile(TileKind::Grass), tile_body(0.0), Groups::VISIBLE_OBSTACLE, None);
        let b = world.spawn(EntityKind::Tile(TileKind::Grass), tile_body(64.0), Groups::VISIBLE_OBSTACLE, None);

        assert!(world.despawn(a));
        assert!(!world.despawn(a));
        assert_eq!(world.entities(), &[b]);
        assert_eq!(world.visible().count(), 1);
        assert!(!world.bodies.contains(a));
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn test_respawn_goes_to_back_of_order() {
        let mut world = World::new();
        let a = world.spawn(EntityKind::Tile(TileKind::Grass), tile_body(0.0), Groups::VISIBLE, None);
        let b = world.spawn(EntityKind::Tile(TileKind::Grass), tile_body(64.0), Groups::VISIBLE, None);
        world.despawn(a);
        let c = world.spawn(EntityKind::Tile(TileKind::Grass), tile_body(128.0), Groups::VISIBLE, None);
        assert_eq!(c.index(), a.index());
        assert_eq!(world.entities(), &[b, c]);
        assert!(!world.is_alive(a));
    }
}
