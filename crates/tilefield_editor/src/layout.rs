//! Panel layout and the panel-to-grid transform

use egui::{Pos2, Rect, Vec2};
use glam::{IVec2, UVec2};

/// Converts between field-local panel coordinates and grid points.
///
/// The panel's vertical axis maps to the grid's x axis and the horizontal
/// axis to the grid's y axis: `grid.x = floor(local.y / tile.x)` and
/// `grid.y = floor(local.x / tile.y)`. Drawing uses the inverse of the same
/// mapping so that the cell painted at a point is the cell hit there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridTransform {
    tile_size: Vec2,
}

impl GridTransform {
    pub fn new(tile_size: Vec2) -> Self {
        Self { tile_size }
    }

    pub fn tile_size(&self) -> Vec2 {
        self.tile_size
    }

    /// Grid point under a field-local position. Positions outside the field
    /// produce points outside it, including negative ones.
    pub fn panel_to_grid(&self, local: Pos2) -> IVec2 {
        IVec2::new(
            (local.y / self.tile_size.x).floor() as i32,
            (local.x / self.tile_size.y).floor() as i32,
        )
    }

    /// Field-local rectangle covered by a grid cell
    pub fn cell_rect(&self, point: UVec2) -> Rect {
        Rect::from_min_size(
            Pos2::new(
                point.y as f32 * self.tile_size.y,
                point.x as f32 * self.tile_size.x,
            ),
            Vec2::new(self.tile_size.y, self.tile_size.x),
        )
    }

    /// Panel size of a whole field
    pub fn field_extent(&self, field_size: UVec2) -> Vec2 {
        Vec2::new(
            field_size.y as f32 * self.tile_size.y,
            field_size.x as f32 * self.tile_size.x,
        )
    }
}

/// Window regions of the editing session, all in window space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorLayout {
    pub window: Vec2,
    /// Strip across the top with the level name and search field
    pub toolbar: Rect,
    /// Everything below the toolbar
    pub base: Rect,
    /// Left part of the base holding the field
    pub edit: Rect,
    /// The field itself, centered in the edit area
    pub field: Rect,
    /// Right part of the base holding the tool panels
    pub toolset: Rect,
}

impl Default for EditorLayout {
    fn default() -> Self {
        let empty = Rect::from_min_size(Pos2::ZERO, Vec2::ZERO);
        Self {
            window: Vec2::ZERO,
            toolbar: empty,
            base: empty,
            edit: empty,
            field: empty,
            toolset: empty,
        }
    }
}

impl EditorLayout {
    /// Lay out the window. With no field extent the field fills the edit area.
    pub fn compute(
        window: Vec2,
        toolbar_height: f32,
        field_ratio: f32,
        field_extent: Option<Vec2>,
    ) -> Self {
        let window = window.max(Vec2::ZERO);
        let toolbar_height = toolbar_height.clamp(0.0, window.y);

        let toolbar = Rect::from_min_size(Pos2::ZERO, Vec2::new(window.x, toolbar_height));
        let base = Rect::from_min_size(
            Pos2::new(0.0, toolbar_height),
            Vec2::new(window.x, window.y - toolbar_height),
        );

        let edit_width = (window.x * field_ratio.clamp(0.0, 1.0)).round();
        let edit = Rect::from_min_size(base.min, Vec2::new(edit_width, base.height()));
        let toolset = Rect::from_min_max(Pos2::new(edit.max.x, base.min.y), base.max);

        let field = match field_extent {
            Some(extent) => {
                let offset = (edit.size() - extent) / 2.0;
                Rect::from_min_size(edit.min + offset, extent)
            }
            None => edit,
        };

        Self {
            window,
            toolbar,
            base,
            edit,
            field,
            toolset,
        }
    }

    /// Window position relative to the field origin
    pub fn window_to_field(&self, position: Pos2) -> Pos2 {
        (position - self.field.min).to_pos2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_to_grid_swaps_axes() {
        let transform = GridTransform::new(Vec2::new(32.0, 32.0));
        assert_eq!(transform.panel_to_grid(Pos2::new(80.0, 40.0)), IVec2::new(1, 2));
        assert_eq!(transform.panel_to_grid(Pos2::new(0.0, 0.0)), IVec2::ZERO);
        assert_eq!(transform.panel_to_grid(Pos2::new(-1.0, 5.0)), IVec2::new(0, -1));
    }

    #[test]
    fn test_non_square_tiles_hit_what_they_draw() {
        let transform = GridTransform::new(Vec2::new(16.0, 48.0));
        for x in 0..4u32 {
            for y in 0..3u32 {
                let rect = transform.cell_rect(UVec2::new(x, y));
                let hit = transform.panel_to_grid(rect.center());
                assert_eq!(hit, IVec2::new(x as i32, y as i32));
            }
        }
        assert_eq!(
            transform.field_extent(UVec2::new(4, 3)),
            Vec2::new(3.0 * 48.0, 4.0 * 16.0)
        );
    }

    #[test]
    fn test_layout_regions() {
        let layout = EditorLayout::compute(
            Vec2::new(800.0, 620.0),
            20.0,
            0.75,
            Some(Vec2::new(400.0, 300.0)),
        );

        assert_eq!(layout.toolbar, Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 20.0)));
        assert_eq!(layout.base.min, Pos2::new(0.0, 20.0));
        assert_eq!(layout.edit.width(), 600.0);
        assert_eq!(layout.toolset.min, Pos2::new(600.0, 20.0));
        assert_eq!(layout.toolset.width(), 200.0);
        assert_eq!(layout.field.min, Pos2::new(100.0, 170.0));
        assert_eq!(
            layout.window_to_field(Pos2::new(180.0, 210.0)),
            Pos2::new(80.0, 40.0)
        );
    }

    #[test]
    fn test_default_layout_is_identity() {
        let layout = EditorLayout::default();
        assert_eq!(layout.window_to_field(Pos2::new(3.0, 4.0)), Pos2::new(3.0, 4.0));
    }
}
