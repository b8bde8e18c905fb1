use std::time::Instant;

use super::entity::{Behaviors, Body, Entity, EntityId, EntityIdAllocator};
use super::input::{GameKey, KeyState};
use super::rendering::Presenter;

pub struct Spawner<'a> {
    allocator: &'a mut EntityIdAllocator,
    pending: &'a mut Vec<Entity>,
}

impl Spawner<'_> {
    pub fn spawn(&mut self, body: Body, behaviors: Behaviors) -> EntityId {
        let id = self.allocator.allocate();
        self.pending.push(Entity::new(id, body, behaviors));
        id
    }
}

#[derive(Debug, Default)]
pub struct EntityRegistry {
    allocator: EntityIdAllocator,
    entities: Vec<Entity>,
    pending_spawns: Vec<Entity>,
}

impl EntityRegistry {
    pub fn spawn(&mut self, body: Body, behaviors: Behaviors) -> EntityId {
        self.spawner().spawn(body, behaviors)
    }

    pub fn spawner(&mut self) -> Spawner<'_> {
        Spawner {
            allocator: &mut self.allocator,
            pending: &mut self.pending_spawns,
        }
    }

    pub fn apply_pending(&mut self) {
        self.entities.append(&mut self.pending_spawns);
    }

    pub fn compact_removed(&mut self) -> usize {
        let before = self.entities.len();
        self.entities.retain(|entity| !entity.body.remove);
        before - self.entities.len()
    }

    pub fn dispatch_input(&mut self, state: KeyState, key: GameKey) {
        let mut spawner = Spawner {
            allocator: &mut self.allocator,
            pending: &mut self.pending_spawns,
        };
        for entity in &mut self.entities {
            entity.handle_input(state, key, &mut spawner);
        }
    }

    pub fn advance_dynamics(&mut self) {
        for entity in &mut self.entities {
            entity.handle_dynamics();
        }
    }

    /// Draws back to front by insertion order: the newest entity is drawn
    /// first, so the oldest ends up on top.
    pub fn draw_all<P: Presenter + ?Sized>(&mut self, presenter: &mut P, now: Instant) {
        for entity in self.entities.iter_mut().rev() {
            entity.handle_graphics(presenter, now);
        }
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn pending_count(&self) -> usize {
        self.pending_spawns.len()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    pub fn find_entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.id == id)
    }

    pub fn clear(&mut self) {
        self.entities.clear();
        self.pending_spawns.clear();
    }
}
