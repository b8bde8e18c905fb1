mod raster;
mod recorder;
mod renderer;

use thiserror::Error;

use super::assets::Image;
use super::{Size, Vec2};

pub use recorder::{DrawCommand, FrameRecorder};
pub use renderer::{Renderer, CLEAR_COLOR};

pub type Rgba = [u8; 4];

#[derive(Debug, Error)]
pub enum PresentError {
    #[error("failed to render frame: {0}")]
    Render(#[source] pixels::Error),
    #[error("failed to resize window surface to {width}x{height}: {source}")]
    Resize {
        width: u32,
        height: u32,
        #[source]
        source: pixels::TextureError,
    },
    #[error("presenter backend failed: {0}")]
    Backend(String),
}

pub trait Presenter {
    fn begin_frame(&mut self) -> Result<(), PresentError>;
    fn draw_rect(&mut self, center: Vec2, size: Size, outline: Rgba);
    fn draw_image(&mut self, image: &Image, top_left: (i32, i32));
    fn end_frame(&mut self) -> Result<(), PresentError>;
}
