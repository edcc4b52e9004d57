//! Frame snapshot handed to a render surface
//!
//! The simulation never reads anything back from the surface.

use glam::Vec2;

use super::vertex::{Color, colors};
use crate::assets::{AssetKey, AssetRegistry, LAYERS, SpriteId};
use crate::sim::{GameState, ObstacleKind, Rect};

/// A rectangle drawn with a sprite if one is available, else a solid colour
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub rect: Rect,
    /// Set once the asset has loaded
    pub sprite: Option<AssetKey>,
    pub fallback: Color,
}

impl Quad {
    fn new(rect: Rect, key: AssetKey, loaded: bool, fallback: Color) -> Self {
        Self {
            rect,
            sprite: loaded.then_some(key),
            fallback,
        }
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub field: Vec2,
    /// Solid fill shown until every background band is in the simulation
    pub backdrop: Option<Color>,
    /// Background tiles, back to front
    pub tiles: Vec<Quad>,
    pub player: Quad,
    pub obstacles: Vec<(ObstacleKind, Quad)>,
    /// Displayed (not tick) scores
    pub score: u64,
    pub high_score: u64,
    pub game_over: bool,
}

impl Frame {
    pub fn capture(state: &GameState, assets: &AssetRegistry) -> Self {
        let field = Vec2::new(state.tuning.field_width, state.tuning.field_height);

        // Bands only materialize on a running tick, so go by what the
        // simulation holds rather than the load flags
        let (backdrop, tiles) = if state.parallax.layers.len() == LAYERS.len() {
            let tiles = state
                .parallax
                .layers
                .iter()
                .flat_map(|band| {
                    band.positions.iter().map(move |&x| Quad {
                        rect: Rect::new(x, band.y_offset, band.tile_width, field.y),
                        sprite: Some(AssetKey::Layer(band.layer)),
                        fallback: colors::SKY,
                    })
                })
                .collect();
            (None, tiles)
        } else {
            (Some(colors::SKY), Vec::new())
        };

        let runner = AssetKey::Sprite(SpriteId::Runner);
        let player = Quad::new(
            state.player.rect(),
            runner,
            assets.is_loaded(runner),
            colors::RUNNER,
        );

        let obstacles = state
            .obstacles
            .iter()
            .map(|o| {
                let key = AssetKey::Sprite(o.kind.sprite());
                let fallback = match o.kind {
                    ObstacleKind::Ground => colors::GROUND_OBSTACLE,
                    ObstacleKind::Flying => colors::FLYING_OBSTACLE,
                };
                (o.kind, Quad::new(o.rect(), key, assets.is_loaded(key), fallback))
            })
            .collect();

        Self {
            field,
            backdrop,
            tiles,
            player,
            obstacles,
            score: state.display_score(),
            high_score: state.display_high_score(),
            game_over: state.is_game_over(),
        }
    }

    /// All quads in paint order: tiles, runner, obstacles
    pub fn quads(&self) -> impl Iterator<Item = &Quad> {
        self.tiles
            .iter()
            .chain(std::iter::once(&self.player))
            .chain(self.obstacles.iter().map(|(_, q)| q))
    }
}

/// Anything that can present a frame (GPU canvas, headless logger, ...)
pub trait RenderSurface {
    fn draw(&mut self, frame: &Frame);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Obstacle, TickInput, tick};
    use crate::tuning::Tuning;

    #[test]
    fn test_fallback_frame() {
        let t = Tuning::default();
        let assets = AssetRegistry::new(&t);
        let mut state = GameState::new(5, t.clone(), 123);
        state
            .obstacles
            .push(Obstacle::spawn(ObstacleKind::Flying, &t, &assets));
        state
            .obstacles
            .push(Obstacle::spawn(ObstacleKind::Ground, &t, &assets));

        let frame = Frame::capture(&state, &assets);
        assert_eq!(frame.backdrop, Some(colors::SKY));
        assert!(frame.tiles.is_empty());
        assert_eq!(frame.player.sprite, None);
        assert_eq!(frame.player.fallback, colors::RUNNER);
        assert_eq!(frame.obstacles[0].1.fallback, colors::FLYING_OBSTACLE);
        assert_eq!(frame.obstacles[1].1.fallback, colors::GROUND_OBSTACLE);
        assert_eq!(frame.high_score, 12);
        assert!(!frame.game_over);
        assert_eq!(frame.quads().count(), 3);
    }

    #[test]
    fn test_loaded_frame() {
        let t = Tuning::default();
        let mut assets = AssetRegistry::new(&t);
        for key in AssetKey::all() {
            assets.mark_loaded(key, 400.0, 200.0);
        }
        let mut state = GameState::new(5, t, 0);
        for _ in 0..25 {
            tick(&mut state, &TickInput::default(), &assets);
        }

        let frame = Frame::capture(&state, &assets);
        assert_eq!(frame.backdrop, None);
        // 800 wide bands need 2 tiles each
        assert_eq!(frame.tiles.len(), LAYERS.len() * 2);
        assert_eq!(frame.tiles[0].sprite, Some(AssetKey::Layer(0)));
        assert_eq!(frame.tiles.last().unwrap().rect.pos.y, -2.0);
        assert_eq!(frame.player.sprite, Some(AssetKey::Sprite(SpriteId::Runner)));
        assert_eq!(frame.score, 2);
    }

    #[test]
    fn test_layers_loading_during_game_over_keep_backdrop() {
        let t = Tuning::default();
        let mut assets = AssetRegistry::new(&t);
        let mut state = GameState::new(5, t, 0);
        tick(&mut state, &TickInput::default(), &assets);
        state.end_run();

        for i in 0..LAYERS.len() {
            assets.mark_loaded(AssetKey::Layer(i), 400.0, 200.0);
        }
        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), &assets);
        }

        let frame = Frame::capture(&state, &assets);
        assert!(frame.game_over);
        assert_eq!(frame.backdrop, Some(colors::SKY));
        assert!(frame.tiles.is_empty());

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &restart, &assets);
        tick(&mut state, &TickInput::default(), &assets);
        let frame = Frame::capture(&state, &assets);
        assert_eq!(frame.backdrop, None);
        assert_eq!(frame.tiles.len(), LAYERS.len() * 2);
    }

    #[test]
    fn test_partial_bands_keep_backdrop() {
        let t = Tuning::default();
        let mut assets = AssetRegistry::new(&t);
        assets.mark_loaded(AssetKey::Layer(0), 400.0, 200.0);
        let mut state = GameState::new(5, t, 0);
        tick(&mut state, &TickInput::default(), &assets);
        assert_eq!(state.parallax.layers.len(), 1);

        let frame = Frame::capture(&state, &assets);
        assert_eq!(frame.backdrop, Some(colors::SKY));
        assert!(frame.tiles.is_empty());
    }
}
