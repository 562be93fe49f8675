//! Draw-call renderer
//!
//! Blits the camera's draw list with macroquad. Decoded images stay in the
//! `ImageBank`; each one is uploaded to a `Texture2D` the first time it is
//! drawn and cached by id after that.

use macroquad::prelude::*;
use crate::asset::{Image, ImageBank, ImageId};
use super::camera::DrawCall;

pub struct Renderer {
    bank: ImageBank,
    /// Indexed by `ImageId`; `None` until first use
    textures: Vec<Option<Texture2D>>,
}

impl Renderer {
    pub fn new(bank: ImageBank) -> Self {
        let textures = vec![None; bank.len()];
        Self { bank, textures }
    }

    fn texture(&mut self, id: ImageId) -> Option<&Texture2D> {
        let slot = self.textures.get_mut(id.index())?;
        if slot.is_none() {
            let data = self.bank.get(id)?;
            let tex = Texture2D::from_rgba8(data.width, data.height, &data.rgba);
            tex.set_filter(FilterMode::Nearest);
            *slot = Some(tex);
        }
        slot.as_ref()
    }

    /// Blit every call in order; later calls cover earlier ones
    pub fn draw(&mut self, calls: &[DrawCall]) {
        for call in calls {
            if let Some(tex) = self.texture(call.image) {
                // Whole pixels keep nearest-filtered sprites crisp while scrolling
                draw_texture(tex, call.x.round(), call.y.round(), WHITE);
            }
        }
    }

    /// Draw an image centered on a screen point (HUD icons)
    pub fn draw_centered(&mut self, image: Image, center: Vec2) {
        if let Some(tex) = self.texture(image.id) {
            let x = (center.x - image.width / 2.0).round();
            let y = (center.y - image.height / 2.0).round();
            draw_texture(tex, x, y, WHITE);
        }
    }
}
