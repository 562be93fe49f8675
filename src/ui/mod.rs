//! Heads-up display drawn over the level
//!
//! Immediate mode: nothing is retained between frames except the font.

mod hud;
mod theme;

pub use hud::Hud;
pub use theme::FONT_PATH;
