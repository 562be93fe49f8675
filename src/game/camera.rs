//! Player-tracking camera
//!
//! Nothing in the world moves when the camera scrolls. Each frame one offset
//! is computed from the tracked entity and every draw is shifted by it. Draw
//! order is the painter's algorithm on the visual rect's center y, so things
//! lower on screen cover things above them.

use macroquad::prelude::Vec2;
use crate::asset::{Image, ImageId};
use super::entity::Entity;
use super::rect::Rect;
use super::world::World;

/// One image blit in screen space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub image: ImageId,
    pub x: f32,
    pub y: f32,
}

/// Static layer drawn under everything, positioned in world space
#[derive(Debug, Clone, Copy)]
pub struct Background {
    pub image: Image,
    pub top_left: Vec2,
}

#[derive(Debug, Clone, Copy)]
pub struct Camera {
    half_screen: Vec2,
}

impl Camera {
    pub fn new(screen_width: f32, screen_height: f32) -> Self {
        Self {
            half_screen: Vec2::new((screen_width / 2.0).floor(), (screen_height / 2.0).floor()),
        }
    }

    /// Screen-space translation that puts the tracked rect's top-left corner
    /// at the screen center
    pub fn offset(&self, tracked: &Rect) -> Vec2 {
        self.half_screen - tracked.top_left()
    }

    /// Build this frame's draw list. Empty if the tracked entity is gone.
    pub fn plan(&self, world: &World, tracked: Entity, background: Option<&Background>) -> Vec<DrawCall> {
        let Some(body) = world.bodies.get(tracked) else {
            return Vec::new();
        };
        let offset = self.offset(body.visual());

        let mut sprites: Vec<(f32, DrawCall)> = world
            .visible()
            .filter_map(|e| {
                let visual = world.bodies.get(e)?.visual();
                let image = *world.images.get(e)?;
                let pos = visual.top_left() + offset;
                Some((visual.center_y(), DrawCall { image, x: pos.x, y: pos.y }))
            })
            .collect();

        // Stable: entities with equal center y keep spawn order
        sprites.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut calls = Vec::with_capacity(sprites.len() + 1);
        if let Some(bg) = background {
            let pos = bg.top_left + offset;
            calls.push(DrawCall { image: bg.image.id, x: pos.x, y: pos.y });
        }
        calls.extend(sprites.into_iter().map(|(_, call)| call));
        calls
    }
}
