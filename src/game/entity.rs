//! Generational entity handles
//!
//! An `Entity` is a slot index plus the generation of that slot. Freed slots
//! are recycled (the player's weapon is despawned and respawned every frame of
//! an attack), and the generation bump makes any handle to the old occupant
//! stop resolving.

/// Handle to something living in the level's `World`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entity {
    index: u32,
    generation: u32,
}

impl Entity {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index, used to address component storage
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// Hands out entity slots and tracks which handles are still live
#[derive(Debug, Default)]
pub struct EntityAllocator {
    generations: Vec<u32>,
    /// Recycled slots, reused LIFO
    free_indices: Vec<u32>,
    alive_count: u32,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> Entity {
        self.alive_count += 1;
        match self.free_indices.pop() {
            Some(index) => Entity::new(index, self.generations[index as usize]),
            None => {
                let index = self.generations.len() as u32;
                self.generations.push(0);
                Entity::new(index, 0)
            }
        }
    }

    /// Release a slot. Returns false if the handle was already stale.
    pub fn free(&mut self, entity: Entity) -> bool {
        if !self.is_alive(entity) {
            return false;
        }
        self.generations[entity.index as usize] += 1;
        self.free_indices.push(entity.index);
        self.alive_count -= 1;
        true
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.generations
            .get(entity.index as usize)
            .is_some_and(|&gen| gen == entity.generation)
    }

    pub fn alive_count(&self) -> u32 {
        self.alive_count
    }
}
