use std::sync::Arc;

use pixels::{Pixels, SurfaceTexture};
use winit::window::Window;

use crate::app::assets::Image;
use crate::app::{Size, Vec2};

use super::raster::{blit_image, clear, draw_rect_outline};
use super::{PresentError, Presenter, Rgba};

pub const CLEAR_COLOR: Rgba = [255, 255, 255, 255];

/// Window-backed presenter. The frame buffer has the world's dimensions and
/// `pixels` scales it onto the window surface, so world units stay pixels
/// whatever the window size or scale factor.
pub struct Renderer {
    pixels: Pixels<'static>,
    width: u32,
    height: u32,
}

impl Renderer {
    pub fn new(window: Arc<Window>, width: u32, height: u32) -> Result<Self, pixels::Error> {
        let surface_size = window.inner_size();
        let surface = SurfaceTexture::new(surface_size.width, surface_size.height, window);
        let pixels = Pixels::new(width, height, surface)?;
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), PresentError> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels
            .resize_surface(width, height)
            .map_err(|source| PresentError::Resize {
                width,
                height,
                source,
            })
    }
}

impl Presenter for Renderer {
    fn begin_frame(&mut self) -> Result<(), PresentError> {
        clear(self.pixels.frame_mut(), CLEAR_COLOR);
        Ok(())
    }

    fn draw_rect(&mut self, center: Vec2, size: Size, outline: Rgba) {
        let (top_left, bottom_right) = outline_corners(center, size);
        draw_rect_outline(
            self.pixels.frame_mut(),
            self.width,
            self.height,
            top_left,
            bottom_right,
            outline,
        );
    }

    fn draw_image(&mut self, image: &Image, top_left: (i32, i32)) {
        blit_image(
            self.pixels.frame_mut(),
            self.width,
            self.height,
            image,
            top_left,
        );
    }

    fn end_frame(&mut self) -> Result<(), PresentError> {
        self.pixels.render().map_err(PresentError::Render)
    }
}

fn outline_corners(center: Vec2, size: Size) -> ((i32, i32), (i32, i32)) {
    let width = size.width as i32;
    let height = size.height as i32;
    let left = center.x as i32 - width / 2;
    let top = center.y as i32 - height / 2;
    ((left, top), (left + width - 1, top + height - 1))
}
