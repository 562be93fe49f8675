//! Asset loading
//!
//! Everything under `assets/` is read once at startup:
//!
//! ```text
//! assets/
//! ├── graphics/
//! │   ├── tilemap/ground.png      # Background, drawn under everything
//! │   ├── grass/                  # Variants picked at random per tile
//! │   ├── objects/                # Indexed by the object layer's cell value
//! │   ├── player/<facing>{,_idle,_attack}/
//! │   ├── monsters/<species>/{idle,move,attack}/
//! │   ├── weapons/<name>/{up,down,left,right,full}.png
//! │   └── particles/{flame/fire.png,heal/heal.png}
//! └── map/map_*.csv
//! ```
//!
//! A missing or undecodable file is an `AssetError`, and the game refuses
//! to start.

pub mod images;
pub mod sprites;

pub use images::{AssetError, Image, ImageBank, ImageId};
pub use sprites::{GameSprites, GRAPHICS_DIR};
