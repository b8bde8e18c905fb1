mod assets;
mod behaviors;
mod collision_resolver;
mod entity;
mod game_loop;
mod input;
mod loop_runner;
mod metrics;
mod registry;
mod rendering;
mod scene;

pub use assets::{FileImageLoader, Image, ImageHandle, ImageLoader, ResourceError};
pub use behaviors::{
    centered_top_left, resolve_pair, resolve_player_against_tile, AnimatedGraphics, AnimationClip,
    AnimationClipDesc, BitmapGraphics, CollisionKind, Direction, Dynamics, FrameTimeout, Graphics,
    InputBehavior, PlayerController, ProjectileTemplate, RectGraphics, WorldBounds,
};
pub use collision_resolver::{are_colliding, resolve_collisions};
pub use entity::{Behaviors, Body, Entity, EntityId, Size, Vec2};
pub use game_loop::{FramePacer, GameLoop, LoopState};
pub use input::{
    binding_for_key_code, event_for_key, EventQueue, GameKey, InputEvent, InputSource, KeyBinding,
    KeyState,
};
pub use loop_runner::{run_app, AppError, LoopConfig};
pub use metrics::LoopMetricsSnapshot;
pub use registry::{EntityRegistry, Spawner};
pub use rendering::{DrawCommand, FrameRecorder, PresentError, Presenter, Renderer, Rgba, CLEAR_COLOR};
pub use scene::{load_scene, Scene};
