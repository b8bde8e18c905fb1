use std::path::PathBuf;
use std::time::{Duration, Instant};

use serde::Deserialize;

use crate::app::assets::{Image, ImageHandle, ImageLoader, ResourceError};
use crate::app::rendering::{Presenter, Rgba};
use crate::app::{Body, Size, Vec2};

#[derive(Debug)]
pub enum Graphics {
    SolidRect(RectGraphics),
    Bitmap(BitmapGraphics),
    Animated(AnimatedGraphics),
}

impl Graphics {
    pub fn solid_rect(size: Size, outline: Rgba) -> Self {
        Self::SolidRect(RectGraphics { size, outline })
    }

    pub fn bitmap(image: ImageHandle) -> Self {
        Self::Bitmap(BitmapGraphics { image })
    }

    pub fn draw<P: Presenter + ?Sized>(&mut self, body: &Body, presenter: &mut P, now: Instant) {
        match self {
            Self::SolidRect(rect) => presenter.draw_rect(body.position, rect.size, rect.outline),
            Self::Bitmap(bitmap) => draw_centered(presenter, &bitmap.image, body.position),
            Self::Animated(animation) => {
                animation.advance(now);
                draw_centered(presenter, animation.current_frame(), body.position);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectGraphics {
    pub size: Size,
    pub outline: Rgba,
}

#[derive(Debug, Clone)]
pub struct BitmapGraphics {
    image: ImageHandle,
}

pub fn centered_top_left(center: Vec2, image: &Image) -> (i32, i32) {
    let half_width = (image.width() / 2) as f32;
    let half_height = (image.height() / 2) as f32;
    ((center.x - half_width) as i32, (center.y - half_height) as i32)
}

fn draw_centered<P: Presenter + ?Sized>(presenter: &mut P, image: &Image, center: Vec2) {
    presenter.draw_image(image, centered_top_left(center, image));
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnimationClipDesc {
    pub name: String,
    pub fps: f32,
    pub frames: Vec<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct AnimationClip {
    name: String,
    frames: Vec<ImageHandle>,
    frame_time: Duration,
    current_frame: usize,
}

impl AnimationClip {
    pub fn new(
        name: impl Into<String>,
        fps: f32,
        frames: Vec<ImageHandle>,
    ) -> Result<Self, ResourceError> {
        let name = name.into();
        if !fps.is_finite() || fps <= 0.0 {
            return Err(ResourceError::InvalidClipRate { name, fps });
        }
        let Ok(frame_time) = Duration::try_from_secs_f32(1.0 / fps) else {
            return Err(ResourceError::InvalidClipRate { name, fps });
        };
        if frames.is_empty() {
            return Err(ResourceError::EmptyClip { name });
        }
        Ok(Self {
            name,
            frames,
            frame_time,
            current_frame: 0,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frame_time(&self) -> Duration {
        self.frame_time
    }

    pub fn current_frame_index(&self) -> usize {
        self.current_frame
    }

    fn step(&mut self) {
        self.current_frame = (self.current_frame + 1) % self.frames.len();
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FrameTimeout {
    timeout: Duration,
    start: Instant,
}

impl FrameTimeout {
    pub fn new(timeout: Duration, start: Instant) -> Self {
        Self { timeout, start }
    }

    pub fn is_out(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) > self.timeout
    }

    pub fn reset(&mut self, now: Instant) {
        self.start = now;
    }
}

#[derive(Debug, Clone)]
pub struct AnimatedGraphics {
    clips: Vec<AnimationClip>,
    active: usize,
    timeout: FrameTimeout,
    playing: bool,
}

impl AnimatedGraphics {
    pub fn new(clips: Vec<AnimationClip>, now: Instant) -> Result<Self, ResourceError> {
        let Some(first) = clips.first() else {
            return Err(ResourceError::NoAnimationClips);
        };
        let timeout = FrameTimeout::new(first.frame_time, now);
        Ok(Self {
            clips,
            active: 0,
            timeout,
            playing: true,
        })
    }

    pub fn load(
        descs: &[AnimationClipDesc],
        images: &mut dyn ImageLoader,
        now: Instant,
    ) -> Result<Self, ResourceError> {
        let mut clips = Vec::with_capacity(descs.len());
        for desc in descs {
            let frames = desc
                .frames
                .iter()
                .map(|path| images.load(path))
                .collect::<Result<Vec<_>, _>>()?;
            clips.push(AnimationClip::new(desc.name.clone(), desc.fps, frames)?);
        }
        Self::new(clips, now)
    }

    pub fn set_animation(&mut self, name: &str, now: Instant) -> bool {
        let Some(index) = self.clips.iter().position(|clip| clip.name == name) else {
            return false;
        };
        self.active = index;
        self.timeout = FrameTimeout::new(self.clips[index].frame_time, now);
        true
    }

    pub fn play(&mut self, now: Instant) {
        if !self.playing {
            self.playing = true;
            self.timeout.reset(now);
        }
    }

    pub fn stop(&mut self) {
        self.playing = false;
    }

    pub fn active_clip(&self) -> &AnimationClip {
        &self.clips[self.active]
    }

    pub fn advance(&mut self, now: Instant) {
        if !self.playing || !self.timeout.is_out(now) {
            return;
        }
        self.clips[self.active].step();
        self.timeout.reset(now);
    }

    pub fn current_frame(&self) -> &Image {
        let clip = self.active_clip();
        &clip.frames[clip.current_frame]
    }
}
