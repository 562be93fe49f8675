//! Sparse per-entity storage
//!
//! One `ComponentStorage<T>` per kind of data, indexed by entity slot. A level
//! holds a few thousand tiles at most, so a plain `Vec<Option<T>>` is plenty.

use super::entity::Entity;

pub struct ComponentStorage<T> {
    data: Vec<Option<T>>,
}

impl<T> ComponentStorage<T> {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Insert or replace the component for `entity`
    pub fn insert(&mut self, entity: Entity, component: T) {
        let idx = entity.index() as usize;
        if idx >= self.data.len() {
            self.data.resize_with(idx + 1, || None);
        }
        self.data[idx] = Some(component);
    }

    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        self.data.get_mut(entity.index() as usize).and_then(Option::take)
    }

    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.data.get(entity.index() as usize).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        self.data.get_mut(entity.index() as usize).and_then(Option::as_mut)
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.get(entity).is_some()
    }

    /// Number of occupied slots
    pub fn count(&self) -> usize {
        self.data.iter().filter(|slot| slot.is_some()).count()
    }
}

impl<T> Default for ComponentStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}
