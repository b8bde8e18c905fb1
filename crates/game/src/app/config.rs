use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use engine::{AnimationClipDesc, Rgba, Size};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

pub(crate) const CONFIG_ENV_VAR: &str = "TILEGAME_CONFIG";

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {path} at {location}: {source}")]
    Parse {
        path: PathBuf,
        location: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config value at {field}: {reason}")]
    Invalid { field: String, reason: String },
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub(crate) struct GameConfig {
    pub(crate) world: WorldConfig,
    pub(crate) player: PlayerConfig,
    pub(crate) bullet: BulletConfig,
    pub(crate) tiles: TilesConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub(crate) struct WorldConfig {
    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) fps: f32,
    pub(crate) title: String,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 800.0,
            fps: 16.0,
            title: "Game".to_string(),
        }
    }
}

/// `gravity` and `animation` are optional even when the section is present:
/// leaving them out selects linear motion and a static bitmap.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub(crate) struct PlayerConfig {
    pub(crate) speed: f32,
    #[serde(default)]
    pub(crate) gravity: Option<f32>,
    pub(crate) size: Size,
    pub(crate) bitmap: PathBuf,
    #[serde(default)]
    pub(crate) animation: Option<AnimationConfig>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: 0.5,
            gravity: Some(0.1),
            size: Size::new(50.0, 50.0),
            bitmap: PathBuf::from("sprites/shooter.png"),
            animation: Some(AnimationConfig {
                clips: vec![AnimationClipDesc {
                    name: "walk".to_string(),
                    fps: 3.0,
                    frames: vec![
                        PathBuf::from("sprites/walking_1.png"),
                        PathBuf::from("sprites/walking_2.png"),
                    ],
                }],
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct AnimationConfig {
    pub(crate) clips: Vec<AnimationClipDesc>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub(crate) struct BulletConfig {
    pub(crate) speed: f32,
    pub(crate) size: Size,
    pub(crate) bitmap: PathBuf,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            speed: 3.0,
            size: Size::new(50.0, 50.0),
            bitmap: PathBuf::from("sprites/bullet.png"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct GridCell {
    pub(crate) x: u32,
    pub(crate) y: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub(crate) struct TilesConfig {
    pub(crate) grid_width: u32,
    pub(crate) grid_height: u32,
    pub(crate) tile_size: f32,
    pub(crate) color: Rgba,
    #[serde(default)]
    pub(crate) cells: Option<Vec<GridCell>>,
}

impl Default for TilesConfig {
    fn default() -> Self {
        Self {
            grid_width: 50,
            grid_height: 40,
            tile_size: 20.0,
            color: [0, 0, 0, 255],
            cells: None,
        }
    }
}

impl TilesConfig {
    pub(crate) fn cells(&self) -> Vec<GridCell> {
        match &self.cells {
            Some(cells) => cells.clone(),
            None => floor_row(self.grid_width, self.grid_height),
        }
    }
}

/// Row `grid_height - 5`, from column 3 up to but excluding `grid_width - 4`.
fn floor_row(grid_width: u32, grid_height: u32) -> Vec<GridCell> {
    let Some(y) = grid_height.checked_sub(5) else {
        return Vec::new();
    };
    let end = grid_width.saturating_sub(4);
    (3..end).map(|x| GridCell { x, y }).collect()
}

pub(crate) fn resolve_config_path(default_path: &Path) -> PathBuf {
    env::var_os(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| default_path.to_path_buf())
}

pub(crate) fn load_config(path: &Path) -> Result<GameConfig, ConfigError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            info!(path = %path.display(), "config_defaults_used");
            let config = GameConfig::default();
            validate_config(&config)?;
            return Ok(config);
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let config = parse_config(&raw, path)?;
    validate_config(&config)?;
    info!(path = %path.display(), "config_loaded");
    Ok(config)
}

fn parse_config(raw: &str, path: &Path) -> Result<GameConfig, ConfigError> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    serde_path_to_error::deserialize::<_, GameConfig>(&mut deserializer).map_err(|error| {
        let location = error.path().to_string();
        ConfigError::Parse {
            path: path.to_path_buf(),
            location,
            source: error.into_inner(),
        }
    })
}

fn invalid(field: impl Into<String>, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field: field.into(),
        reason: reason.into(),
    }
}

fn require_positive(field: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("expected a finite value > 0, got {value}")))
    }
}

fn require_non_negative(field: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("expected a finite value >= 0, got {value}")))
    }
}

fn require_size(field: &str, size: Size) -> Result<(), ConfigError> {
    require_non_negative(&format!("{field}.width"), size.width)?;
    require_non_negative(&format!("{field}.height"), size.height)
}

pub(crate) fn validate_config(config: &GameConfig) -> Result<(), ConfigError> {
    require_positive("world.width", config.world.width)?;
    require_positive("world.height", config.world.height)?;
    require_positive("world.fps", config.world.fps)?;

    let player = &config.player;
    require_non_negative("player.speed", player.speed)?;
    if let Some(gravity) = player.gravity {
        if !gravity.is_finite() {
            return Err(invalid("player.gravity", format!("expected a finite value, got {gravity}")));
        }
    }
    require_size("player.size", player.size)?;
    if let Some(animation) = &player.animation {
        if animation.clips.is_empty() {
            return Err(invalid("player.animation.clips", "expected at least one clip"));
        }
        for (index, clip) in animation.clips.iter().enumerate() {
            require_positive(&format!("player.animation.clips[{index}].fps"), clip.fps)?;
            if clip.frames.is_empty() {
                return Err(invalid(
                    format!("player.animation.clips[{index}].frames"),
                    "expected at least one frame",
                ));
            }
        }
    }

    require_non_negative("bullet.speed", config.bullet.speed)?;
    require_size("bullet.size", config.bullet.size)?;

    let tiles = &config.tiles;
    require_positive("tiles.tile_size", tiles.tile_size)?;
    if let Some(cells) = &tiles.cells {
        for (index, cell) in cells.iter().enumerate() {
            if cell.x >= tiles.grid_width || cell.y >= tiles.grid_height {
                return Err(invalid(
                    format!("tiles.cells[{index}]"),
                    format!(
                        "cell ({}, {}) lies outside the {}x{} grid",
                        cell.x, cell.y, tiles.grid_width, tiles.grid_height
                    ),
                ));
            }
        }
    }
    Ok(())
}
