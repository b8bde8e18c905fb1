use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use engine::{
    load_scene, CollisionKind, DrawCommand, Dynamics, EntityRegistry, EventQueue, FramePacer,
    FrameRecorder, GameKey, GameLoop, Graphics, Image, ImageHandle, ImageLoader, InputEvent,
    KeyState, LoopState, ResourceError, Vec2,
};

use super::config::GameConfig;
use super::level::{spawn_tiles, LevelScene};

#[derive(Default)]
struct StubImages {
    sizes: HashMap<PathBuf, (u32, u32)>,
    requested: Vec<PathBuf>,
}

impl StubImages {
    fn with(mut self, path: &str, width: u32, height: u32) -> Self {
        self.sizes.insert(PathBuf::from(path), (width, height));
        self
    }

    fn classic() -> Self {
        Self::default()
            .with("sprites/shooter.png", 50, 50)
            .with("sprites/walking_1.png", 40, 50)
            .with("sprites/walking_2.png", 42, 50)
            .with("sprites/bullet.png", 10, 6)
    }
}

impl ImageLoader for StubImages {
    fn load(&mut self, path: &Path) -> Result<ImageHandle, ResourceError> {
        self.requested.push(path.to_path_buf());
        match self.sizes.get(path) {
            Some(&(width, height)) => Ok(Arc::new(Image::filled(width, height, [0, 0, 0, 255]))),
            None => Err(ResourceError::Open {
                path: path.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            }),
        }
    }
}

fn linear_config() -> GameConfig {
    let mut config = GameConfig::default();
    config.player.gravity = None;
    config
}

fn loaded_level(config: GameConfig) -> GameLoop {
    let mut registry = EntityRegistry::default();
    let mut scene = LevelScene::new(config);
    load_scene(&mut scene, &mut registry, &mut StubImages::classic()).expect("level loads");
    GameLoop::new(
        registry,
        FramePacer::new(Duration::from_millis(62), Duration::from_millis(250)),
        Duration::from_secs(1),
    )
}

fn tick(game: &mut GameLoop, input: &mut EventQueue, recorder: &mut FrameRecorder) -> LoopState {
    game.tick(input, recorder, Instant::now()).expect("tick")
}

#[test]
fn level_spawns_player_first_then_the_floor_row() {
    let game = loaded_level(GameConfig::default());
    let entities = game.registry().entities();

    assert_eq!(entities.len(), 1 + 43);
    let player = &entities[0];
    assert_eq!(player.body.position, Vec2::new(500.0, 400.0));
    assert_eq!(player.collision, Some(CollisionKind::Player));
    assert!(matches!(player.graphics, Some(Graphics::Animated(_))));
    assert!(matches!(
        player.dynamics,
        Some(Dynamics::Gravitational { .. })
    ));

    let first_tile = &entities[1];
    assert_eq!(first_tile.body.position, Vec2::new(70.0, 710.0));
    assert_eq!(first_tile.collision, Some(CollisionKind::Tile));
    assert!(first_tile.dynamics.is_none());
    assert!(first_tile.input.is_none());
    assert_eq!(entities[43].body.position, Vec2::new(910.0, 710.0));
}

#[test]
fn linear_player_without_animation_uses_its_bitmap() {
    let mut config = linear_config();
    config.player.animation = None;
    let mut images = StubImages::classic();
    let mut registry = EntityRegistry::default();

    load_scene(&mut LevelScene::new(config), &mut registry, &mut images).expect("load");

    let player = &registry.entities()[0];
    assert!(matches!(player.graphics, Some(Graphics::Bitmap(_))));
    assert!(matches!(player.dynamics, Some(Dynamics::Linear { bounds: None })));
    assert_eq!(
        images.requested,
        vec![
            PathBuf::from("sprites/bullet.png"),
            PathBuf::from("sprites/shooter.png"),
        ]
    );
}

#[test]
fn missing_sprite_fails_the_level_load() {
    let mut images = StubImages::default().with("sprites/bullet.png", 1, 1);
    let mut registry = EntityRegistry::default();

    let error = load_scene(
        &mut LevelScene::new(GameConfig::default()),
        &mut registry,
        &mut images,
    )
    .expect_err("walk frames are missing");

    assert!(matches!(error, ResourceError::Open { .. }));
}

#[test]
fn right_press_moves_the_player_by_its_speed() {
    let mut game = loaded_level(linear_config());
    let mut input = EventQueue::default();
    let mut recorder = FrameRecorder::default();
    input.push_key(GameKey::Right, KeyState::Pressed);

    assert_eq!(tick(&mut game, &mut input, &mut recorder), LoopState::Running);

    let player = &game.registry().entities()[0];
    assert_eq!(player.body.velocity.x, 0.5);
    assert_eq!(player.body.position, Vec2::new(500.5, 400.0));
}

#[test]
fn fire_spawns_a_projectile_at_the_pre_tick_position() {
    let mut game = loaded_level(linear_config());
    let mut input = EventQueue::default();
    let mut recorder = FrameRecorder::default();
    input.push_key(GameKey::Right, KeyState::Pressed);
    input.push_key(GameKey::Fire, KeyState::Pressed);

    tick(&mut game, &mut input, &mut recorder);

    let entities = game.registry().entities();
    assert_eq!(entities.len(), 1 + 43 + 1);
    let projectile = entities.last().expect("projectile");
    assert_eq!(projectile.body.position, Vec2::new(500.0, 400.0));
    assert_eq!(projectile.body.velocity, Vec2::new(3.0, 0.0));
    assert!(projectile.collision.is_none());
    assert_eq!(entities[0].body.position.x, 500.5);
}

#[test]
fn projectile_is_drawn_from_the_next_tick_and_pruned_after_leaving() {
    let mut config = linear_config();
    config.world.width = 40.0;
    let mut game = loaded_level(config);
    let mut input = EventQueue::default();
    let mut recorder = FrameRecorder::default();
    input.push_key(GameKey::Fire, KeyState::Pressed);

    tick(&mut game, &mut input, &mut recorder);
    let bullets_drawn = |commands: &[DrawCommand]| {
        commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Image { size: (10, 6), .. }))
            .count()
    };
    assert_eq!(bullets_drawn(&recorder.frames()[0]), 0);
    let spawned = game.registry().entities().last().expect("projectile");
    assert_eq!(spawned.body.position, Vec2::new(20.0, 400.0));

    tick(&mut game, &mut input, &mut recorder);
    assert_eq!(bullets_drawn(&recorder.frames()[1]), 1);

    // the player sits at the world center, x = 20; the projectile moves
    // 3 per tick and first exceeds 40 on its seventh move
    for _ in 0..5 {
        tick(&mut game, &mut input, &mut recorder);
    }
    assert_eq!(game.registry().entity_count(), 1 + 43 + 1);
    tick(&mut game, &mut input, &mut recorder);
    assert_eq!(game.registry().entity_count(), 1 + 43);
}

#[test]
fn gravity_lands_the_player_on_the_floor() {
    let mut game = loaded_level(GameConfig::default());
    let mut input = EventQueue::default();
    let mut recorder = FrameRecorder::default();

    for _ in 0..400 {
        tick(&mut game, &mut input, &mut recorder);
    }

    // floor tiles are centered at y = 710 with half height 10; the player's
    // half height is 25, so it rests at 710 - 35
    let player = &game.registry().entities()[0];
    assert_eq!(player.body.position.y, 675.0);
    assert_eq!(player.body.position.x, 500.0);
}

#[test]
fn escape_quit_stops_the_level_loop() {
    let mut game = loaded_level(GameConfig::default());
    let mut input = EventQueue::default();
    let mut recorder = FrameRecorder::default();
    input.push(InputEvent::Quit);

    assert_eq!(tick(&mut game, &mut input, &mut recorder), LoopState::Stopped);
    assert!(recorder.frames().is_empty());
}

#[test]
fn floor_tiles_are_drawn_as_outlines_of_the_tile_size() {
    let mut registry = EntityRegistry::default();
    let config = GameConfig::default();

    let count = spawn_tiles(&mut registry, &config.tiles);
    registry.apply_pending();
    let mut recorder = FrameRecorder::default();
    registry.draw_all(&mut recorder, Instant::now());

    assert_eq!(count, 43);
    assert_eq!(
        recorder.pending_commands().last(),
        Some(&DrawCommand::Rect {
            center: Vec2::new(70.0, 710.0),
            size: engine::Size::new(20.0, 20.0),
            outline: [0, 0, 0, 255],
        })
    );
}
