//! Quad batching: frame -> vertices grouped by texture

use std::ops::Range;

use super::frame::{Frame, Quad};
use super::vertex::{Color, Vertex, colors};
use crate::assets::AssetKey;
use crate::sim::Rect;

/// One draw call: a run of vertices sharing a texture (None = solid white)
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub texture: Option<AssetKey>,
    pub vertices: Range<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub vertices: Vec<Vertex>,
    pub batches: Vec<Batch>,
}

impl DrawList {
    fn push(&mut self, rect: &Rect, texture: Option<AssetKey>, color: Color) {
        let start = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&rect_vertices(rect, color));
        let end = self.vertices.len() as u32;

        match self.batches.last_mut() {
            Some(batch) if batch.texture == texture => batch.vertices.end = end,
            _ => self.batches.push(Batch {
                texture,
                vertices: start..end,
            }),
        }
    }
}

/// Two triangles covering `rect`, uv 0..1
pub fn rect_vertices(rect: &Rect, color: Color) -> [Vertex; 6] {
    let (x0, y0) = (rect.pos.x, rect.pos.y);
    let (x1, y1) = (rect.right(), rect.bottom());
    [
        Vertex::new(x0, y0, 0.0, 0.0, color),
        Vertex::new(x0, y1, 0.0, 1.0, color),
        Vertex::new(x1, y0, 1.0, 0.0, color),
        Vertex::new(x1, y0, 1.0, 0.0, color),
        Vertex::new(x0, y1, 0.0, 1.0, color),
        Vertex::new(x1, y1, 1.0, 1.0, color),
    ]
}

/// Build the draw list. Sprites without an uploaded texture fall back to
/// their solid colour.
pub fn build(frame: &Frame, has_texture: impl Fn(AssetKey) -> bool) -> DrawList {
    let mut list = DrawList::default();

    if let Some(color) = frame.backdrop {
        let field = Rect::new(0.0, 0.0, frame.field.x, frame.field.y);
        list.push(&field, None, color);
    }

    for quad in frame.quads() {
        let Quad {
            rect,
            sprite,
            fallback,
        } = quad;
        match sprite {
            Some(key) if has_texture(*key) => list.push(rect, Some(*key), colors::WHITE),
            _ => list.push(rect, None, *fallback),
        }
    }

    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetRegistry, SpriteId};
    use crate::sim::{GameState, Obstacle, ObstacleKind};
    use crate::tuning::Tuning;

    #[test]
    fn test_rect_vertices_cover_corners() {
        let v = rect_vertices(&Rect::new(10.0, 20.0, 30.0, 40.0), colors::RUNNER);
        assert_eq!(v[0].position, [10.0, 20.0]);
        assert_eq!(v[5].position, [40.0, 60.0]);
        assert_eq!(v[5].uv, [1.0, 1.0]);
        assert!(v.iter().all(|vert| vert.color == colors::RUNNER));
    }

    #[test]
    fn test_fallback_frame_is_one_batch() {
        let t = Tuning::default();
        let assets = AssetRegistry::new(&t);
        let mut state = GameState::new(1, t.clone(), 0);
        state
            .obstacles
            .push(Obstacle::spawn(ObstacleKind::Ground, &t, &assets));

        let frame = Frame::capture(&state, &assets);
        let list = build(&frame, |_| true);
        // backdrop + runner + obstacle, all solid
        assert_eq!(list.vertices.len(), 18);
        assert_eq!(
            list.batches,
            vec![Batch {
                texture: None,
                vertices: 0..18
            }]
        );
        assert_eq!(list.vertices[0].color, colors::SKY);
        assert_eq!(list.vertices[12].color, colors::GROUND_OBSTACLE);
    }

    #[test]
    fn test_sprites_split_batches() {
        let t = Tuning::default();
        let mut assets = AssetRegistry::new(&t);
        let runner = AssetKey::Sprite(SpriteId::Runner);
        let brick = AssetKey::Sprite(SpriteId::Brick);
        assets.mark_loaded(runner, 30.0, 60.0);
        assets.mark_loaded(brick, 20.0, 40.0);
        let mut state = GameState::new(1, t.clone(), 0);
        state
            .obstacles
            .push(Obstacle::spawn(ObstacleKind::Ground, &t, &assets));
        state
            .obstacles
            .push(Obstacle::spawn(ObstacleKind::Ground, &t, &assets));

        let frame = Frame::capture(&state, &assets);

        // Brick texture not uploaded yet: bricks draw solid
        let list = build(&frame, |key| key == runner);
        let textures: Vec<_> = list.batches.iter().map(|b| b.texture).collect();
        assert_eq!(textures, vec![None, Some(runner), None]);
        assert_eq!(list.batches[2].vertices, 12..24);

        // Both uploaded: consecutive bricks share one batch
        let list = build(&frame, |_| true);
        let textures: Vec<_> = list.batches.iter().map(|b| b.texture).collect();
        assert_eq!(textures, vec![None, Some(runner), Some(brick)]);
        assert_eq!(list.vertices[12].color, colors::WHITE);
    }
}
