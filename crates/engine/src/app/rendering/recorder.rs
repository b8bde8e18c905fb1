use crate::app::assets::Image;
use crate::app::{Size, Vec2};

use super::{PresentError, Presenter, Rgba};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        center: Vec2,
        size: Size,
        outline: Rgba,
    },
    Image {
        size: (u32, u32),
        top_left: (i32, i32),
    },
}

#[derive(Debug, Default)]
pub struct FrameRecorder {
    frames: Vec<Vec<DrawCommand>>,
    pending: Vec<DrawCommand>,
    fail_at_frame: Option<usize>,
}

impl FrameRecorder {
    /// Makes `end_frame` fail once `frame_index` frames have been completed.
    pub fn failing_at(frame_index: usize) -> Self {
        Self {
            fail_at_frame: Some(frame_index),
            ..Self::default()
        }
    }

    pub fn frames(&self) -> &[Vec<DrawCommand>] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&[DrawCommand]> {
        self.frames.last().map(Vec::as_slice)
    }

    pub fn pending_commands(&self) -> &[DrawCommand] {
        &self.pending
    }
}

impl Presenter for FrameRecorder {
    fn begin_frame(&mut self) -> Result<(), PresentError> {
        self.pending.clear();
        Ok(())
    }

    fn draw_rect(&mut self, center: Vec2, size: Size, outline: Rgba) {
        self.pending.push(DrawCommand::Rect {
            center,
            size,
            outline,
        });
    }

    fn draw_image(&mut self, image: &Image, top_left: (i32, i32)) {
        self.pending.push(DrawCommand::Image {
            size: (image.width(), image.height()),
            top_left,
        });
    }

    fn end_frame(&mut self) -> Result<(), PresentError> {
        if self.fail_at_frame == Some(self.frames.len()) {
            return Err(PresentError::Backend(format!(
                "recorder configured to fail at frame {}",
                self.frames.len()
            )));
        }
        self.frames.push(std::mem::take(&mut self.pending));
        Ok(())
    }
}
