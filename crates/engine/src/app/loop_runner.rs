use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use pixels::Error as PixelsError;
use thiserror::Error;
use tracing::{info, warn};
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::WindowBuilder;

use crate::StartupError;

use super::assets::{FileImageLoader, ResourceError};
use super::game_loop::{FramePacer, GameLoop, LoopState};
use super::input::{event_for_key, EventQueue, InputEvent};
use super::registry::EntityRegistry;
use super::rendering::{PresentError, Renderer};
use super::scene::{load_scene, Scene};

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub target_fps: f32,
    pub max_overshoot_debt: Duration,
    pub metrics_log_interval: Duration,
    pub asset_root: PathBuf,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            window_title: "Game".to_string(),
            window_width: 1000,
            window_height: 800,
            target_fps: 16.0,
            max_overshoot_debt: Duration::from_millis(250),
            metrics_log_interval: Duration::from_secs(1),
            asset_root: PathBuf::from("assets"),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Startup(#[from] StartupError),
    #[error("target frame rate must be finite and positive, got {fps}")]
    InvalidFrameRate { fps: f32 },
    #[error("failed to load scene resources: {0}")]
    Resource(#[from] ResourceError),
    #[error("presentation failed: {0}")]
    Presentation(#[from] PresentError),
    #[error("failed to create event loop: {0}")]
    CreateEventLoop(#[source] EventLoopError),
    #[error("failed to create application window: {0}")]
    CreateWindow(#[source] OsError),
    #[error("failed to initialize renderer: {0}")]
    CreateRenderer(#[source] PixelsError),
    #[error("event loop failed: {0}")]
    EventLoopRun(#[source] EventLoopError),
}

impl AppError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Startup(_) | Self::InvalidFrameRate { .. } => 2,
            Self::Resource(_) => 3,
            Self::Presentation(_) | Self::CreateRenderer(_) => 4,
            Self::CreateEventLoop(_) | Self::CreateWindow(_) | Self::EventLoopRun(_) => 5,
        }
    }
}

pub fn run_app(config: LoopConfig, mut scene: Box<dyn Scene>) -> Result<(), AppError> {
    let target = FramePacer::target_for_fps(config.target_fps).ok_or(
        AppError::InvalidFrameRate {
            fps: config.target_fps,
        },
    )?;
    let max_overshoot_debt = normalize_duration(config.max_overshoot_debt, target);
    let metrics_log_interval =
        normalize_duration(config.metrics_log_interval, Duration::from_secs(1));

    let event_loop = EventLoop::new().map_err(AppError::CreateEventLoop)?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window_title.clone())
            .with_inner_size(LogicalSize::new(
                config.window_width as f64,
                config.window_height as f64,
            ))
            .build(&event_loop)
            .map_err(AppError::CreateWindow)?,
    );
    let mut renderer = Renderer::new(
        Arc::clone(&window),
        config.window_width,
        config.window_height,
    )
    .map_err(AppError::CreateRenderer)?;

    let mut images = FileImageLoader::new(&config.asset_root);
    let mut registry = EntityRegistry::default();
    load_scene(scene.as_mut(), &mut registry, &mut images)?;
    info!(
        asset_root = %images.asset_root().display(),
        entity_count = registry.entity_count(),
        images_loaded = images.cached_count(),
        "scene_loaded"
    );

    info!(
        target_fps = config.target_fps,
        target_tick_ms = target.as_secs_f32() * 1000.0,
        max_overshoot_debt_ms = max_overshoot_debt.as_millis() as u64,
        metrics_log_interval_ms = metrics_log_interval.as_millis() as u64,
        "loop_config"
    );

    let mut game = GameLoop::new(
        registry,
        FramePacer::new(target, max_overshoot_debt),
        metrics_log_interval,
    );
    let mut input = EventQueue::default();
    let mut failure: Option<AppError> = None;

    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop
        .run(|event, window_target| match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => {
                    info!(reason = "window_close", "shutdown_requested");
                    window_target.exit();
                }
                WindowEvent::Resized(size) => {
                    if let Err(error) = renderer.resize(size.width, size.height) {
                        warn!(error = %error, "renderer_resize_failed");
                        failure = Some(error.into());
                        window_target.exit();
                    }
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    let PhysicalKey::Code(code) = event.physical_key else {
                        return;
                    };
                    if let Some(input_event) = event_for_key(code, event.state) {
                        if input_event == InputEvent::Quit {
                            info!(reason = "escape_key", "shutdown_requested");
                        }
                        input.push(input_event);
                    }
                }
                WindowEvent::RedrawRequested => match game.step(&mut input, &mut renderer) {
                    Ok(LoopState::Running) => {}
                    Ok(LoopState::Stopped) => window_target.exit(),
                    Err(error) => {
                        warn!(error = %error, "renderer_draw_failed");
                        failure = Some(error.into());
                        window_target.exit();
                    }
                },
                _ => {}
            },
            Event::AboutToWait => {
                window.request_redraw();
            }
            Event::LoopExiting => {
                scene.unload(game.registry_mut());
                info!(
                    ticks = game.tick_count(),
                    entity_count = game.registry().entity_count(),
                    "shutdown"
                );
            }
            _ => {}
        })
        .map_err(AppError::EventLoopRun)?;

    match failure {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

fn normalize_duration(value: Duration, fallback: Duration) -> Duration {
    if value.is_zero() {
        fallback
    } else {
        value
    }
}
