use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::ImageReader;
use thiserror::Error;
use tracing::debug;

use super::rendering::Rgba;

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("failed to open image {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("pixel buffer for a {width}x{height} image holds {actual} bytes, expected {expected}")]
    PixelBufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    #[error("animation has no clips")]
    NoAnimationClips,
    #[error("animation clip `{name}` has no frames")]
    EmptyClip { name: String },
    #[error("animation clip `{name}` has invalid frame rate {fps}")]
    InvalidClipRate { name: String, fps: f32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

pub type ImageHandle = Arc<Image>;

impl Image {
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, ResourceError> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(ResourceError::PixelBufferSize {
                width,
                height,
                expected,
                actual: rgba.len(),
            });
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    pub fn filled(width: u32, height: u32, color: Rgba) -> Self {
        let pixel_count = width as usize * height as usize;
        Self {
            width,
            height,
            rgba: color.repeat(pixel_count),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let mut pixel = [0; 4];
        pixel.copy_from_slice(&self.rgba[offset..offset + 4]);
        Some(pixel)
    }
}

pub trait ImageLoader {
    fn load(&mut self, path: &Path) -> Result<ImageHandle, ResourceError>;
}

#[derive(Debug)]
pub struct FileImageLoader {
    asset_root: PathBuf,
    cache: HashMap<PathBuf, ImageHandle>,
}

impl FileImageLoader {
    pub fn new(asset_root: impl Into<PathBuf>) -> Self {
        Self {
            asset_root: asset_root.into(),
            cache: HashMap::new(),
        }
    }

    pub fn asset_root(&self) -> &Path {
        &self.asset_root
    }

    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.asset_root.join(path)
        }
    }
}

impl ImageLoader for FileImageLoader {
    fn load(&mut self, path: &Path) -> Result<ImageHandle, ResourceError> {
        let resolved = self.resolve(path);
        if let Some(handle) = self.cache.get(&resolved) {
            return Ok(Arc::clone(handle));
        }
        let image = decode_rgba(&resolved)?;
        debug!(
            path = %resolved.display(),
            width = image.width,
            height = image.height,
            "image_loaded"
        );
        let handle = Arc::new(image);
        self.cache.insert(resolved, Arc::clone(&handle));
        Ok(handle)
    }
}

fn decode_rgba(path: &Path) -> Result<Image, ResourceError> {
    let reader = ImageReader::open(path).map_err(|source| ResourceError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let decoded = reader.decode().map_err(|source| ResourceError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let rgba = decoded.to_rgba8();
    Ok(Image {
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
    })
}
