//! HUD Theme - Shared colors and sizes

use macroquad::prelude::Color;

// =============================================================================
// Base Colors
// =============================================================================

/// Box and bar background (#222222)
pub const BG_COLOR: Color = Color::new(0.133, 0.133, 0.133, 1.0);

/// Box outline (#EEEEEE)
pub const BORDER_COLOR: Color = Color::new(0.933, 0.933, 0.933, 1.0);

/// Outline while a switch is cooling down (gold)
pub const BORDER_HIGHLIGHT_COLOR: Color = Color::new(1.0, 0.843, 0.0, 1.0);

/// Primary text color (#EEEEEE)
pub const TEXT_COLOR: Color = Color::new(0.933, 0.933, 0.933, 1.0);

// =============================================================================
// Stat Bars
// =============================================================================

pub const HEALTH_COLOR: Color = Color::new(1.0, 0.0, 0.0, 1.0);

pub const MANA_COLOR: Color = Color::new(0.0, 0.0, 1.0, 1.0);

// =============================================================================
// Font
// =============================================================================

/// Relative to the graphics directory
pub const FONT_PATH: &str = "font/joystix.ttf";

pub const FONT_SIZE: u16 = 18;
