use tracing::debug;

use crate::app::assets::ImageHandle;
use crate::app::input::{GameKey, KeyState};
use crate::app::registry::Spawner;
use crate::app::{Behaviors, Body, Size, Vec2};

use super::dynamics::{Dynamics, WorldBounds};
use super::graphics::Graphics;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    fn from_key(key: GameKey) -> Option<Self> {
        match key {
            GameKey::Left => Some(Self::Left),
            GameKey::Right => Some(Self::Right),
            GameKey::Up => Some(Self::Up),
            GameKey::Down => Some(Self::Down),
            GameKey::Fire => None,
        }
    }

    pub fn unit(self) -> Vec2 {
        match self {
            Self::Left => Vec2::new(-1.0, 0.0),
            Self::Right => Vec2::new(1.0, 0.0),
            Self::Up => Vec2::new(0.0, -1.0),
            Self::Down => Vec2::new(0.0, 1.0),
        }
    }
}

#[derive(Debug)]
pub enum InputBehavior {
    PlayerController(PlayerController),
}

impl InputBehavior {
    pub fn handle(
        &mut self,
        body: &mut Body,
        state: KeyState,
        key: GameKey,
        spawner: &mut Spawner<'_>,
    ) {
        match self {
            Self::PlayerController(controller) => controller.handle(body, state, key, spawner),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProjectileTemplate {
    pub speed: f32,
    pub size: Size,
    pub image: ImageHandle,
    pub bounds: WorldBounds,
}

#[derive(Debug, Clone)]
pub struct PlayerController {
    speed: f32,
    projectile: ProjectileTemplate,
    aim: Direction,
}

impl PlayerController {
    pub fn new(speed: f32, projectile: ProjectileTemplate) -> Self {
        Self {
            speed,
            projectile,
            aim: Direction::Right,
        }
    }

    pub fn aim(&self) -> Direction {
        self.aim
    }

    pub fn handle(
        &mut self,
        body: &mut Body,
        state: KeyState,
        key: GameKey,
        spawner: &mut Spawner<'_>,
    ) {
        match (state, Direction::from_key(key)) {
            (KeyState::Pressed, Some(direction)) => {
                self.aim = direction;
                self.press(body, direction);
            }
            (KeyState::Released, Some(direction)) => self.release(body, direction),
            (KeyState::Pressed, None) => self.fire(body, spawner),
            (KeyState::Released, None) => {}
        }
    }

    fn press(&self, body: &mut Body, direction: Direction) {
        let velocity = &mut body.velocity;
        match direction {
            Direction::Left => velocity.x = -self.speed,
            Direction::Right => velocity.x = self.speed,
            Direction::Up => velocity.y = -self.speed,
            Direction::Down => velocity.y = self.speed,
        }
    }

    // A release only stops motion that still heads the released way, so a
    // newer press of the opposite key survives a stale release.
    fn release(&self, body: &mut Body, direction: Direction) {
        let velocity = &mut body.velocity;
        match direction {
            Direction::Left if velocity.x < 0.0 => velocity.x = 0.0,
            Direction::Right if velocity.x > 0.0 => velocity.x = 0.0,
            Direction::Up if velocity.y < 0.0 => velocity.y = 0.0,
            Direction::Down if velocity.y > 0.0 => velocity.y = 0.0,
            _ => {}
        }
    }

    fn fire(&self, body: &Body, spawner: &mut Spawner<'_>) {
        let unit = self.aim.unit();
        let velocity = Vec2::new(unit.x * self.projectile.speed, unit.y * self.projectile.speed);
        let projectile = Body::new(body.position, velocity, self.projectile.size);
        let id = spawner.spawn(
            projectile,
            Behaviors {
                dynamics: Some(Dynamics::linear_within(self.projectile.bounds)),
                graphics: Some(Graphics::bitmap(self.projectile.image.clone())),
                ..Behaviors::default()
            },
        );
        debug!(
            entity_id = id.0,
            x = body.position.x,
            y = body.position.y,
            aim = ?self.aim,
            "projectile_spawned"
        );
    }
}
