//! Asset registry
//!
//! Images load fire-and-forget; each completion records the natural size and
//! the derived draw scale here. The simulation only reads these flags, so a
//! tick is valid for any subset of loaded assets.

use crate::tuning::Tuning;

/// Sprite images with a fixed on-screen height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Runner,
    Brick,
    FlyingEnemy,
}

impl SpriteId {
    pub const ALL: [SpriteId; 3] = [SpriteId::Runner, SpriteId::Brick, SpriteId::FlyingEnemy];

    pub fn src(self) -> &'static str {
        match self {
            SpriteId::Runner => "assets/Sprite-0002.png",
            SpriteId::Brick => "assets/Sprite-0003.png",
            SpriteId::FlyingEnemy => "assets/Sprite-0004.png",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    /// On-screen height the sprite is scaled to
    fn desired_height(self, tuning: &Tuning) -> f32 {
        match self {
            SpriteId::Runner => tuning.runner_sprite_height,
            SpriteId::Brick => tuning.ground_sprite_height,
            SpriteId::FlyingEnemy => tuning.flying_sprite_height,
        }
    }
}

/// A background band, back to front
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerDef {
    pub src: &'static str,
    /// Scroll multiplier (0 = static backdrop)
    pub speed: f32,
    pub y_offset: f32,
}

pub const LAYERS: [LayerDef; 5] = [
    LayerDef {
        src: "assets/Sky.png",
        speed: 0.0,
        y_offset: 0.0,
    },
    LayerDef {
        src: "assets/DownLayer.png",
        speed: 1.0,
        y_offset: 0.0,
    },
    LayerDef {
        src: "assets/MiddleLayer.png",
        speed: 2.0,
        y_offset: 0.0,
    },
    LayerDef {
        src: "assets/Light.png",
        speed: 3.0,
        y_offset: 0.0,
    },
    LayerDef {
        src: "assets/TopLayer.png",
        speed: 4.0,
        y_offset: -2.0,
    },
];

/// Anything the loader can fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKey {
    Sprite(SpriteId),
    /// Index into `LAYERS`
    Layer(usize),
}

impl AssetKey {
    /// Every asset the game asks for at startup
    pub fn all() -> impl Iterator<Item = AssetKey> {
        SpriteId::ALL
            .into_iter()
            .map(AssetKey::Sprite)
            .chain((0..LAYERS.len()).map(AssetKey::Layer))
    }

    pub fn src(self) -> &'static str {
        match self {
            AssetKey::Sprite(id) => id.src(),
            AssetKey::Layer(i) => LAYERS[i].src,
        }
    }
}

/// Load state of one image
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AssetSlot {
    pub loaded: bool,
    pub natural_width: f32,
    pub natural_height: f32,
    /// Natural size × scale = on-screen size
    pub scale: f32,
}

impl AssetSlot {
    /// On-screen size, if loaded
    pub fn scaled_size(&self) -> Option<(f32, f32)> {
        self.loaded
            .then(|| (self.natural_width * self.scale, self.natural_height * self.scale))
    }
}

#[derive(Debug, Clone)]
pub struct AssetRegistry {
    sprites: [AssetSlot; 3],
    layers: [AssetSlot; LAYERS.len()],
    runner_height: f32,
    ground_height: f32,
    flying_height: f32,
    field_height: f32,
}

impl AssetRegistry {
    /// Empty registry; nothing counts as loaded until `mark_loaded`
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            sprites: [AssetSlot::default(); 3],
            layers: [AssetSlot::default(); LAYERS.len()],
            runner_height: SpriteId::Runner.desired_height(tuning),
            ground_height: SpriteId::Brick.desired_height(tuning),
            flying_height: SpriteId::FlyingEnemy.desired_height(tuning),
            field_height: tuning.field_height,
        }
    }

    /// Record a completed load. Zero-sized images stay unloaded so every
    /// consumer keeps using fallback geometry.
    pub fn mark_loaded(&mut self, key: AssetKey, natural_width: f32, natural_height: f32) {
        if !(natural_width > 0.0 && natural_height > 0.0) {
            log::warn!(
                "{} decoded with degenerate size {}x{}, keeping fallback",
                key.src(),
                natural_width,
                natural_height
            );
            return;
        }

        let target_height = match key {
            AssetKey::Sprite(SpriteId::Runner) => self.runner_height,
            AssetKey::Sprite(SpriteId::Brick) => self.ground_height,
            AssetKey::Sprite(SpriteId::FlyingEnemy) => self.flying_height,
            // Bands are stretched to the full field height
            AssetKey::Layer(_) => self.field_height,
        };

        let Some(slot) = self.slot_mut(key) else {
            log::warn!("Unknown asset {:?}", key);
            return;
        };
        *slot = AssetSlot {
            loaded: true,
            natural_width,
            natural_height,
            scale: target_height / natural_height,
        };
        log::info!("Loaded {} ({}x{})", key.src(), natural_width, natural_height);
    }

    fn slot_mut(&mut self, key: AssetKey) -> Option<&mut AssetSlot> {
        match key {
            AssetKey::Sprite(id) => self.sprites.get_mut(id.index()),
            AssetKey::Layer(i) => self.layers.get_mut(i),
        }
    }

    pub fn slot(&self, key: AssetKey) -> AssetSlot {
        let slot = match key {
            AssetKey::Sprite(id) => self.sprites.get(id.index()),
            AssetKey::Layer(i) => self.layers.get(i),
        };
        slot.copied().unwrap_or_default()
    }

    pub fn is_loaded(&self, key: AssetKey) -> bool {
        self.slot(key).loaded
    }

    /// Scaled sprite size, None until loaded
    pub fn sprite_size(&self, id: SpriteId) -> Option<(f32, f32)> {
        self.sprites[id.index()].scaled_size()
    }

    /// Tile width of a background band, None until loaded
    pub fn layer_width(&self, index: usize) -> Option<f32> {
        self.layers
            .get(index)
            .and_then(|slot| slot.scaled_size())
            .map(|(w, _)| w)
    }
}

/// Browser image loading: one `HtmlImageElement` per asset, each `onload`
/// writes its size into the shared registry.
#[cfg(target_arch = "wasm32")]
pub mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlImageElement;

    use super::{AssetKey, AssetRegistry};

    /// Start every load; returns the elements so the renderer can upload
    /// them as textures once their registry slot flips to loaded.
    pub fn spawn_loads(registry: Rc<RefCell<AssetRegistry>>) -> Vec<(AssetKey, HtmlImageElement)> {
        let mut images = Vec::new();
        for key in AssetKey::all() {
            let image = match HtmlImageElement::new() {
                Ok(image) => image,
                Err(e) => {
                    log::warn!("Could not create image for {}: {:?}", key.src(), e);
                    continue;
                }
            };

            {
                let registry = registry.clone();
                let loaded = image.clone();
                let onload = Closure::<dyn FnMut()>::new(move || {
                    registry.borrow_mut().mark_loaded(
                        key,
                        loaded.natural_width() as f32,
                        loaded.natural_height() as f32,
                    );
                });
                image.set_onload(Some(onload.as_ref().unchecked_ref()));
                onload.forget();
            }
            {
                let onerror = Closure::<dyn FnMut()>::new(move || {
                    log::warn!("Failed to load {}, using fallback", key.src());
                });
                image.set_onerror(Some(onerror.as_ref().unchecked_ref()));
                onerror.forget();
            }

            image.set_src(key.src());
            images.push((key, image));
        }
        images
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_unloaded() {
        let reg = AssetRegistry::new(&Tuning::default());
        for key in AssetKey::all() {
            assert!(!reg.is_loaded(key));
        }
        assert_eq!(reg.sprite_size(SpriteId::Brick), None);
        assert_eq!(reg.layer_width(0), None);
    }

    #[test]
    fn test_sprite_scale_from_desired_height() {
        let mut reg = AssetRegistry::new(&Tuning::default());
        // 16x20 brick scaled to 40 high -> 32x40
        reg.mark_loaded(AssetKey::Sprite(SpriteId::Brick), 16.0, 20.0);
        let slot = reg.slot(AssetKey::Sprite(SpriteId::Brick));
        assert!(slot.loaded);
        assert_eq!(slot.scale, 2.0);
        assert_eq!(reg.sprite_size(SpriteId::Brick), Some((32.0, 40.0)));

        reg.mark_loaded(AssetKey::Sprite(SpriteId::FlyingEnemy), 60.0, 60.0);
        assert_eq!(reg.sprite_size(SpriteId::FlyingEnemy), Some((30.0, 30.0)));
    }

    #[test]
    fn test_layer_width_stretches_to_field_height() {
        let mut reg = AssetRegistry::new(&Tuning::default());
        // 320x200 band on a 400-high field -> 640 wide
        reg.mark_loaded(AssetKey::Layer(2), 320.0, 200.0);
        assert_eq!(reg.layer_width(2), Some(640.0));
        assert_eq!(reg.layer_width(1), None);
    }

    #[test]
    fn test_degenerate_image_stays_fallback() {
        let mut reg = AssetRegistry::new(&Tuning::default());
        reg.mark_loaded(AssetKey::Sprite(SpriteId::Runner), 32.0, 0.0);
        assert!(!reg.is_loaded(AssetKey::Sprite(SpriteId::Runner)));
        assert_eq!(reg.sprite_size(SpriteId::Runner), None);
    }

    #[test]
    fn test_unknown_layer_ignored() {
        let mut reg = AssetRegistry::new(&Tuning::default());
        reg.mark_loaded(AssetKey::Layer(99), 10.0, 10.0);
        assert!(!reg.is_loaded(AssetKey::Layer(99)));
    }
}
