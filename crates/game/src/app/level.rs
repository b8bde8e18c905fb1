use std::time::Instant;

use engine::{
    AnimatedGraphics, Behaviors, Body, CollisionKind, Dynamics, EntityId, EntityRegistry,
    Graphics, ImageLoader, InputBehavior, PlayerController, ProjectileTemplate, ResourceError,
    Scene, Size, Vec2, WorldBounds,
};
use tracing::info;

use super::config::{BulletConfig, GameConfig, PlayerConfig, TilesConfig};

pub(crate) struct LevelScene {
    config: GameConfig,
}

impl LevelScene {
    pub(crate) fn new(config: GameConfig) -> Self {
        Self { config }
    }

    fn world_bounds(&self) -> WorldBounds {
        WorldBounds {
            width: self.config.world.width,
            height: self.config.world.height,
        }
    }
}

impl Scene for LevelScene {
    fn load(
        &mut self,
        registry: &mut EntityRegistry,
        images: &mut dyn ImageLoader,
    ) -> Result<(), ResourceError> {
        let bounds = self.world_bounds();
        let center = Vec2::new(bounds.width / 2.0, bounds.height / 2.0);
        let projectile = projectile_template(&self.config.bullet, bounds, images)?;

        let player = spawn_player(
            registry,
            &self.config.player,
            center,
            projectile,
            images,
            Instant::now(),
        )?;
        let tile_count = spawn_tiles(registry, &self.config.tiles);

        info!(
            player_id = player.0,
            tile_count,
            gravity = ?self.config.player.gravity,
            "level_spawned"
        );
        Ok(())
    }

    fn unload(&mut self, registry: &mut EntityRegistry) {
        registry.clear();
    }
}

pub(crate) fn projectile_template(
    bullet: &BulletConfig,
    bounds: WorldBounds,
    images: &mut dyn ImageLoader,
) -> Result<ProjectileTemplate, ResourceError> {
    Ok(ProjectileTemplate {
        speed: bullet.speed,
        size: bullet.size,
        image: images.load(&bullet.bitmap)?,
        bounds,
    })
}

pub(crate) fn spawn_player(
    registry: &mut EntityRegistry,
    player: &PlayerConfig,
    position: Vec2,
    projectile: ProjectileTemplate,
    images: &mut dyn ImageLoader,
    now: Instant,
) -> Result<EntityId, ResourceError> {
    let dynamics = match player.gravity {
        Some(gravity) => Dynamics::gravitational(gravity),
        None => Dynamics::linear(),
    };
    let graphics = match &player.animation {
        Some(animation) => Graphics::Animated(AnimatedGraphics::load(
            &animation.clips,
            images,
            now,
        )?),
        None => Graphics::bitmap(images.load(&player.bitmap)?),
    };

    Ok(registry.spawn(
        Body::new(position, Vec2::default(), player.size),
        Behaviors {
            dynamics: Some(dynamics),
            collision: Some(CollisionKind::Player),
            graphics: Some(graphics),
            input: Some(InputBehavior::PlayerController(PlayerController::new(
                player.speed,
                projectile,
            ))),
        },
    ))
}

pub(crate) fn spawn_tiles(registry: &mut EntityRegistry, tiles: &TilesConfig) -> usize {
    let side = tiles.tile_size;
    let half = side / 2.0;
    let cells = tiles.cells();
    for cell in &cells {
        let center = Vec2::new(cell.x as f32 * side + half, cell.y as f32 * side + half);
        registry.spawn(
            Body::new(center, Vec2::default(), Size::new(side, side)),
            Behaviors {
                collision: Some(CollisionKind::Tile),
                graphics: Some(Graphics::solid_rect(Size::new(side, side), tiles.color)),
                ..Behaviors::default()
            },
        );
    }
    cells.len()
}
