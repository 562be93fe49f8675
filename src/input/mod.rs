//! Input handling with gamepad support
//!
//! Keyboard through macroquad, gamepads through gilrs on native builds.
//! Gameplay only ever sees an `ActionSet`, so simulation code can be driven
//! without a window.

mod actions;
mod gamepad;
mod state;

pub use actions::*;
pub use state::*;
