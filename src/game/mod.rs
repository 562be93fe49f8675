//! Game Foundation Module
//!
//! A small ECS-inspired core for a top-down tile game:
//! - Entity: Generational index for safe entity references
//! - Component: Plain data stored per entity
//! - World: Container for all entities and their components
//! - Level: Map construction and the per-frame update
//!
//! Simulation code is pure. Time arrives as milliseconds and input as an
//! `ActionSet`; the output is a list of draw calls. Only `renderer` and
//! `runtime` touch macroquad's window state.

pub mod entity;
pub mod component;
pub mod rect;
pub mod body;
pub mod animation;
pub mod combat;
pub mod components;
pub mod world;
pub mod camera;
pub mod level;
pub mod runtime;
pub mod renderer;

// Re-export main types
pub use camera::Camera;
pub use level::Level;
pub use renderer::Renderer;
pub use runtime::{FpsLimit, FrameClock};
