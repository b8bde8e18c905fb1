use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use engine::{resolve_app_paths, AppPaths, LoopConfig, Scene, StartupError};
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use super::config::{load_config, resolve_config_path, ConfigError, GameConfig};
use super::level::LevelScene;

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) scene: Box<dyn Scene>,
}

#[derive(Debug, Error)]
pub(crate) enum BootstrapError {
    #[error(transparent)]
    Startup(#[from] StartupError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl BootstrapError {
    pub(crate) fn exit_code(&self) -> u8 {
        2
    }
}

pub(crate) fn build_app() -> Result<AppWiring, BootstrapError> {
    let paths = resolve_app_paths();
    init_tracing(paths.as_ref().ok().map(|paths| paths.log_path.as_path()));
    let paths = paths?;
    info!(
        root = %paths.root.display(),
        assets_dir = %paths.assets_dir.display(),
        log_path = %paths.log_path.display(),
        "startup"
    );

    let config_path = resolve_config_path(&paths.config_path);
    let game_config = load_config(&config_path)?;
    let config = loop_config_for(&game_config, &paths);

    Ok(AppWiring {
        config,
        scene: Box::new(LevelScene::new(game_config)),
    })
}

pub(crate) fn loop_config_for(game: &GameConfig, paths: &AppPaths) -> LoopConfig {
    LoopConfig {
        window_title: game.world.title.clone(),
        window_width: window_extent(game.world.width),
        window_height: window_extent(game.world.height),
        target_fps: game.world.fps,
        asset_root: paths.assets_dir.clone(),
        ..LoopConfig::default()
    }
}

fn window_extent(world_extent: f32) -> u32 {
    world_extent.ceil().max(1.0) as u32
}

fn init_tracing(log_path: Option<&Path>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let console = fmt::layer()
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .with_filter(filter);

    let mut log_open_error = None;
    let error_log = match log_path.map(open_error_log) {
        Some(Ok(file)) => Some(
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(file))
                .with_filter(LevelFilter::ERROR),
        ),
        Some(Err(error)) => {
            log_open_error = Some(error);
            None
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(console)
        .with(error_log)
        .init();

    if let (Some(path), Some(error)) = (log_path, log_open_error) {
        warn!(path = %path.display(), error = %error, "error_log_unavailable");
    }
}

fn open_error_log(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}
