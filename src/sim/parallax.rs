//! Parallax background bands
//!
//! Each band is a row of identical tiles. Tiles scroll left at
//! `band speed × game speed × parallax factor`; a tile that leaves the field
//! is moved to just past the rightmost tile, so the row never shows a gap.

use serde::{Deserialize, Serialize};

use crate::assets::{AssetRegistry, LAYERS};

/// One scrolling band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParallaxLayer {
    /// Index into `assets::LAYERS`
    pub layer: usize,
    /// Left edge of each tile copy
    pub positions: Vec<f32>,
    pub tile_width: f32,
    /// Scroll multiplier (0 = static backdrop)
    pub speed: f32,
    pub y_offset: f32,
}

impl ParallaxLayer {
    /// Tile a band of `tile_width` across the field: enough copies to cover
    /// it plus one spare that is always entering from the right.
    pub fn new(layer: usize, tile_width: f32, field_width: f32, speed: f32, y_offset: f32) -> Self {
        let copies = (field_width / tile_width).ceil() as usize + 1;
        let mut band = Self {
            layer,
            positions: vec![0.0; copies],
            tile_width,
            speed,
            y_offset,
        };
        band.reset();
        band
    }

    /// Scroll by `distance` pixels and recycle tiles that left the field
    pub fn scroll(&mut self, distance: f32) {
        if distance == 0.0 {
            return;
        }
        for x in self.positions.iter_mut() {
            *x -= distance;
        }
        // Shift everything first so a recycled tile abuts this tick's rightmost
        for i in 0..self.positions.len() {
            if self.positions[i] <= -self.tile_width {
                let rightmost = self
                    .positions
                    .iter()
                    .copied()
                    .fold(f32::NEG_INFINITY, f32::max);
                self.positions[i] = rightmost + self.tile_width;
            }
        }
    }

    /// Restore the initial `index × tile_width` layout
    pub fn reset(&mut self) {
        for (i, x) in self.positions.iter_mut().enumerate() {
            *x = i as f32 * self.tile_width;
        }
    }
}

/// All bands, back to front. Bands appear once their image has loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParallaxSet {
    pub layers: Vec<ParallaxLayer>,
}

impl ParallaxSet {
    /// Build bands for newly loaded images. Reads registry flags only.
    pub fn sync(&mut self, assets: &AssetRegistry, field_width: f32) {
        if self.layers.len() == LAYERS.len() {
            return;
        }
        for (index, def) in LAYERS.iter().enumerate() {
            if self.layers.iter().any(|l| l.layer == index) {
                continue;
            }
            if let Some(width) = assets.layer_width(index) {
                let band = ParallaxLayer::new(index, width, field_width, def.speed, def.y_offset);
                // Keep draw order back to front regardless of load order
                let at = self.layers.partition_point(|l| l.layer < index);
                self.layers.insert(at, band);
            }
        }
    }

    pub fn tick(&mut self, game_speed: f32, parallax_factor: f32) {
        for band in &mut self.layers {
            band.scroll(band.speed * game_speed * parallax_factor);
        }
    }

    pub fn reset(&mut self) {
        for band in &mut self.layers {
            band.reset();
        }
    }
}
