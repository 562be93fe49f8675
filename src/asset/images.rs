//! Image loading and the image bank
//!
//! Images are decoded with the `image` crate into RGBA8 and kept in an
//! `ImageBank`. Gameplay code only ever sees `Image` handles (id + size);
//! the renderer uploads pixels to the GPU the first time an id is drawn.
//! That keeps every simulation path testable without a window.

use std::fmt;
use std::path::{Path, PathBuf};

/// File extensions accepted in image directories
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

/// Index into an `ImageBank`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageId(u32);

impl ImageId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Handle to a loaded image, carrying its pixel size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Image {
    pub id: ImageId,
    pub width: f32,
    pub height: f32,
}

/// Decoded RGBA8 pixels
#[derive(Debug, Clone)]
pub struct ImageData {
    pub width: u16,
    pub height: u16,
    pub rgba: Vec<u8>,
}

/// Error type for asset loading. Every variant is fatal at startup.
#[derive(Debug)]
pub enum AssetError {
    /// A required file or directory does not exist
    Missing(PathBuf),
    /// A directory exists but holds no images
    EmptySequence(PathBuf),
    /// File exists but could not be read or decoded
    Decode { path: PathBuf, message: String },
    /// Image larger than a texture can hold
    TooLarge { path: PathBuf, width: u32, height: u32 },
    Io(std::io::Error),
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::Missing(path) => write!(f, "missing asset: {}", path.display()),
            AssetError::EmptySequence(path) => {
                write!(f, "no images in directory: {}", path.display())
            }
            AssetError::Decode { path, message } => {
                write!(f, "failed to decode {}: {}", path.display(), message)
            }
            AssetError::TooLarge { path, width, height } => {
                write!(f, "image too large ({}x{}): {}", width, height, path.display())
            }
            AssetError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for AssetError {}

impl From<std::io::Error> for AssetError {
    fn from(e: std::io::Error) -> Self {
        AssetError::Io(e)
    }
}

/// Owner of all decoded pixel data
#[derive(Debug, Default)]
pub struct ImageBank {
    images: Vec<ImageData>,
}

impl ImageBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register raw RGBA pixels and get a handle back
    pub fn insert(&mut self, width: u16, height: u16, rgba: Vec<u8>) -> Image {
        debug_assert_eq!(rgba.len(), width as usize * height as usize * 4);
        let id = ImageId(self.images.len() as u32);
        self.images.push(ImageData { width, height, rgba });
        Image {
            id,
            width: width as f32,
            height: height as f32,
        }
    }

    /// Register a fully transparent image of the given size
    pub fn insert_blank(&mut self, width: u16, height: u16) -> Image {
        self.insert(width, height, vec![0; width as usize * height as usize * 4])
    }

    pub fn get(&self, id: ImageId) -> Option<&ImageData> {
        self.images.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Decode one image file. A missing file is an error, there is no fallback.
    pub fn load_single_image(&mut self, path: &Path) -> Result<Image, AssetError> {
        if !path.is_file() {
            return Err(AssetError::Missing(path.to_path_buf()));
        }
        let decoded = image::open(path).map_err(|e| AssetError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width > u16::MAX as u32 || height > u16::MAX as u32 {
            return Err(AssetError::TooLarge {
                path: path.to_path_buf(),
                width,
                height,
            });
        }
        Ok(self.insert(width as u16, height as u16, rgba.into_raw()))
    }

    /// Decode every image in a directory, ordered by filename
    pub fn load_image_sequence(&mut self, dir: &Path) -> Result<Vec<Image>, AssetError> {
        if !dir.is_dir() {
            return Err(AssetError::Missing(dir.to_path_buf()));
        }

        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file() && has_image_extension(p))
            .collect();
        paths.sort_by_key(|p| sequence_key(p));

        if paths.is_empty() {
            return Err(AssetError::EmptySequence(dir.to_path_buf()));
        }

        paths.iter().map(|p| self.load_single_image(p)).collect()
    }
}

/// Numbered frames (`2.png`, `10.png`) sort by number, anything else by name
fn sequence_key(path: &Path) -> (u64, PathBuf) {
    let number = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .and_then(|stem| stem.parse::<u64>().ok())
        .unwrap_or(u64::MAX);
    (number, path.to_path_buf())
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}
