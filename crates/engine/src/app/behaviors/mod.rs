mod collision;
mod controller;
mod dynamics;
mod graphics;

pub use collision::{resolve_pair, resolve_player_against_tile, CollisionKind};
pub use controller::{Direction, InputBehavior, PlayerController, ProjectileTemplate};
pub use dynamics::{Dynamics, WorldBounds};
pub use graphics::{
    centered_top_left, AnimatedGraphics, AnimationClip, AnimationClipDesc, BitmapGraphics,
    FrameTimeout, Graphics, RectGraphics,
};
