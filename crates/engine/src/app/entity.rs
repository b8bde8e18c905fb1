use std::time::Instant;

use serde::Deserialize;

use super::behaviors::{resolve_pair, CollisionKind, Dynamics, Graphics, InputBehavior};
use super::input::{GameKey, KeyState};
use super::registry::Spawner;
use super::rendering::Presenter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u64);

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: Size,
    pub remove: bool,
}

impl Body {
    pub fn new(position: Vec2, velocity: Vec2, size: Size) -> Self {
        Self {
            position,
            velocity,
            size,
            remove: false,
        }
    }
}

#[derive(Debug, Default)]
pub struct Behaviors {
    pub dynamics: Option<Dynamics>,
    pub collision: Option<CollisionKind>,
    pub graphics: Option<Graphics>,
    pub input: Option<InputBehavior>,
}

#[derive(Debug)]
pub struct Entity {
    pub id: EntityId,
    pub body: Body,
    pub dynamics: Option<Dynamics>,
    pub collision: Option<CollisionKind>,
    pub graphics: Option<Graphics>,
    pub input: Option<InputBehavior>,
}

impl Entity {
    pub(crate) fn new(id: EntityId, body: Body, behaviors: Behaviors) -> Self {
        Self {
            id,
            body,
            dynamics: behaviors.dynamics,
            collision: behaviors.collision,
            graphics: behaviors.graphics,
            input: behaviors.input,
        }
    }

    pub fn handle_dynamics(&mut self) {
        if let Some(dynamics) = &self.dynamics {
            dynamics.advance(&mut self.body);
        }
    }

    pub fn handle_input(&mut self, state: KeyState, key: GameKey, spawner: &mut Spawner<'_>) {
        if let Some(input) = &mut self.input {
            input.handle(&mut self.body, state, key, spawner);
        }
    }

    pub fn handle_graphics<P: Presenter + ?Sized>(&mut self, presenter: &mut P, now: Instant) {
        if let Some(graphics) = &mut self.graphics {
            graphics.draw(&self.body, presenter, now);
        }
    }

    pub fn resolve_against(&mut self, other: &mut Entity) {
        if let (Some(own_kind), Some(other_kind)) = (self.collision, other.collision) {
            resolve_pair(&mut self.body, own_kind, &mut other.body, other_kind);
        }
    }
}

#[derive(Debug, Default)]
pub struct EntityIdAllocator {
    next: u64,
}

impl EntityIdAllocator {
    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity_with(body: Body, behaviors: Behaviors) -> Entity {
        Entity::new(EntityId(0), body, behaviors)
    }

    #[test]
    fn allocator_never_reuses_ids() {
        let mut allocator = EntityIdAllocator::default();
        let first = allocator.allocate();
        let second = allocator.allocate();
        let third = allocator.allocate();

        assert_eq!(first.0, 0);
        assert_eq!(second.0, 1);
        assert_eq!(third.0, 2);
    }

    #[test]
    fn empty_slots_leave_the_body_untouched() {
        let body = Body::new(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0), Size::new(5.0, 5.0));
        let mut entity = entity_with(body, Behaviors::default());

        entity.handle_dynamics();

        assert_eq!(entity.body, body);
    }

    #[test]
    fn resolve_against_requires_both_collision_slots() {
        let player_body = Body::new(Vec2::new(100.0, 100.0), Vec2::new(1.0, 0.0), Size::new(50.0, 50.0));
        let tile_body = Body::new(Vec2::new(110.0, 100.0), Vec2::default(), Size::new(20.0, 20.0));
        let mut player = entity_with(
            player_body,
            Behaviors {
                collision: Some(CollisionKind::Player),
                ..Behaviors::default()
            },
        );
        let mut decoration = entity_with(tile_body, Behaviors::default());

        player.resolve_against(&mut decoration);

        assert_eq!(player.body, player_body);
    }
}
