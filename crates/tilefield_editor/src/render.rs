//! Field draw list
//!
//! The session does not paint sprites itself. It produces a list of tile
//! placements that the host renders with whatever sprite backend it has.

use egui::{Pos2, Rect};
use glam::UVec2;
use tilefield_core::{LevelAsset, TileCatalog};
use tracing::debug;

use crate::layout::GridTransform;

/// Visibility of the first 64 layers, bit `i` for layer `i`.
///
/// Layers past the mask are always visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerMask(u64);

impl LayerMask {
    pub const ALL: Self = Self(u64::MAX);

    pub fn is_visible(&self, layer: usize) -> bool {
        layer >= 64 || self.0 & (1 << layer) != 0
    }

    pub fn set_visible(&mut self, layer: usize, visible: bool) {
        if layer >= 64 {
            return;
        }
        if visible {
            self.0 |= 1 << layer;
        } else {
            self.0 &= !(1 << layer);
        }
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// One tile to draw, in window space
#[derive(Debug, Clone, PartialEq)]
pub struct TileDraw<'a> {
    pub layer: usize,
    pub point: UVec2,
    pub rect: Rect,
    pub sprite_ref: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDrawList<'a> {
    /// Field background
    pub background: Rect,
    /// Tiles in paint order, bottom layer first
    pub tiles: Vec<TileDraw<'a>>,
    pub grid_lines: Vec<[Pos2; 2]>,
    /// Non-empty cells whose id has no sprite in the catalog
    pub skipped: usize,
}

impl<'a> FieldDrawList<'a> {
    pub fn build(
        level: &LevelAsset,
        catalog: &'a TileCatalog,
        mask: LayerMask,
        transform: &GridTransform,
        origin: Pos2,
    ) -> Self {
        let field_size = level.field_size();
        let background = Rect::from_min_size(origin, transform.field_extent(field_size));
        let offset = origin.to_vec2();

        let mut tiles = Vec::new();
        let mut skipped = 0;
        for (index, layer) in level.layers().enumerate() {
            if !mask.is_visible(index) {
                continue;
            }
            for (x, y, id) in layer.grid().cells() {
                let sprite_ref = match catalog.get(id) {
                    Some(definition) if !definition.sprite_ref.is_empty() => {
                        definition.sprite_ref.as_str()
                    }
                    _ => {
                        skipped += 1;
                        continue;
                    }
                };
                let point = UVec2::new(x, y);
                tiles.push(TileDraw {
                    layer: index,
                    point,
                    rect: transform.cell_rect(point).translate(offset),
                    sprite_ref,
                });
            }
        }
        if skipped > 0 {
            debug!("Skipped {} cells without a catalog sprite", skipped);
        }

        Self {
            background,
            tiles,
            grid_lines: grid_lines(background, field_size, transform),
            skipped,
        }
    }
}

fn grid_lines(background: Rect, field_size: UVec2, transform: &GridTransform) -> Vec<[Pos2; 2]> {
    let tile = transform.tile_size();
    let mut lines = Vec::with_capacity(field_size.x as usize + field_size.y as usize + 2);
    // Columns step along grid y, rows along grid x.
    for column in 0..=field_size.y {
        let x = background.min.x + column as f32 * tile.y;
        lines.push([Pos2::new(x, background.min.y), Pos2::new(x, background.max.y)]);
    }
    for row in 0..=field_size.x {
        let y = background.min.y + row as f32 * tile.x;
        lines.push([Pos2::new(background.min.x, y), Pos2::new(background.max.x, y)]);
    }
    lines
}

/// Paint a draw list's background and grid lines
pub fn paint_grid(painter: &egui::Painter, list: &FieldDrawList<'_>, stroke: egui::Stroke) {
    painter.rect_filled(list.background, 0.0, painter.ctx().style().visuals.extreme_bg_color);
    for [from, to] in &list.grid_lines {
        painter.line_segment([*from, *to], stroke);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_catalog;
    use egui::Vec2;

    #[test]
    fn test_layer_mask_toggles() {
        let mut mask = LayerMask::default();
        assert!(mask.is_visible(0));
        mask.set_visible(1, false);
        assert!(!mask.is_visible(1));
        assert!(mask.is_visible(2));
        mask.set_visible(1, true);
        assert!(mask.is_visible(1));
        assert!(mask.is_visible(100));
    }

    #[test]
    fn test_draw_list_respects_mask_and_skips_unknown_ids() {
        let catalog = sample_catalog();
        let mut level = LevelAsset::new_level("Draw", UVec2::new(3, 2), 2);
        level.layer_mut(0).unwrap().set(0, 1, 5).unwrap();
        level.layer_mut(0).unwrap().set(2, 0, 99).unwrap();
        level.layer_mut(1).unwrap().set(1, 1, 7).unwrap();

        let transform = GridTransform::new(Vec2::new(32.0, 32.0));
        let origin = Pos2::new(10.0, 20.0);

        let list = FieldDrawList::build(&level, &catalog, LayerMask::ALL, &transform, origin);
        assert_eq!(list.tiles.len(), 2);
        assert_eq!(list.skipped, 1);
        assert_eq!(list.tiles[0].layer, 0);
        assert_eq!(list.tiles[0].sprite_ref, "tiles/grass.png");
        assert_eq!(list.tiles[0].rect.min, Pos2::new(10.0 + 32.0, 20.0));
        assert_eq!(list.tiles[1].layer, 1);
        assert_eq!(list.background.size(), Vec2::new(64.0, 96.0));
        assert_eq!(list.grid_lines.len(), 3 + 4);

        let mut mask = LayerMask::ALL;
        mask.set_visible(1, false);
        let list = FieldDrawList::build(&level, &catalog, mask, &transform, origin);
        assert!(list.tiles.iter().all(|tile| tile.layer == 0));
    }

    #[test]
    fn test_grid_lines_for_largest_field() {
        let level = LevelAsset::new("Large", UVec2::new(4096, 4096));
        let transform = GridTransform::new(Vec2::new(1.0, 1.0));
        let catalog = sample_catalog();
        let list = FieldDrawList::build(
            &level,
            &catalog,
            LayerMask::ALL,
            &transform,
            Pos2::ZERO,
        );
        assert_eq!(list.grid_lines.len(), 2 * 4097);
        assert_eq!(list.background.size(), Vec2::new(4096.0, 4096.0));
    }
}
