use glam::IVec2;
use tilefield_core::{TileCatalog, EMPTY_TILE};
use tracing::warn;

use super::{EditTool, RegisteredTool, TilePalette, ToolCapabilities, ToolContext, ToolInit};
use crate::input::PointerEvent;

/// Drag out a rectangle and fill it with the selected tile on release.
///
/// Holding Shift on release erases the rectangle instead.
#[derive(Debug, Clone)]
pub struct RectFillTool {
    palette: TilePalette,
    anchor: Option<IVec2>,
    corner: IVec2,
}

impl RectFillTool {
    pub fn new(catalog: &TileCatalog) -> Self {
        Self {
            palette: TilePalette::new(catalog),
            anchor: None,
            corner: IVec2::ZERO,
        }
    }

    pub fn palette_mut(&mut self) -> &mut TilePalette {
        &mut self.palette
    }

    /// Inclusive corners of the rectangle being dragged, unclamped
    pub fn pending(&self) -> Option<(IVec2, IVec2)> {
        self.anchor
            .map(|anchor| (anchor.min(self.corner), anchor.max(self.corner)))
    }
}

impl EditTool for RectFillTool {
    fn name(&self) -> &str {
        "Rect Fill"
    }

    fn capabilities(&self) -> ToolCapabilities {
        Self::CAPABILITIES
    }

    fn pointer_down(&mut self, point: IVec2, event: &mut PointerEvent, ctx: &mut ToolContext<'_>) {
        if !ctx.level().contains(point) {
            self.anchor = None;
            return;
        }
        self.anchor = Some(point);
        self.corner = point;
        event.use_event();
    }

    fn pointer_drag(&mut self, point: IVec2, event: &mut PointerEvent, _ctx: &mut ToolContext<'_>) {
        if self.anchor.is_some() {
            self.corner = point;
            event.use_event();
        }
    }

    fn pointer_up(&mut self, point: IVec2, event: &mut PointerEvent, ctx: &mut ToolContext<'_>) {
        let Some(anchor) = self.anchor.take() else {
            return;
        };
        self.corner = point;

        let Some(definition) = self.palette.resolve(ctx.catalog()) else {
            return;
        };
        let value = if event.modifiers.shift {
            EMPTY_TILE
        } else {
            definition.id
        };

        let field = ctx.level().field_size().as_ivec2();
        let min = anchor.min(point).max(IVec2::ZERO);
        let max = anchor.max(point).min(field - IVec2::ONE);
        if min.x > max.x || min.y > max.y {
            return;
        }

        let layer = match ctx.level_mut().layer_mut(definition.render_layer) {
            Ok(layer) => layer,
            Err(e) => {
                warn!("Fill target for tile {} is unusable: {}", definition.id, e);
                return;
            }
        };
        for x in min.x..=max.x {
            for y in min.y..=max.y {
                if let Err(e) = layer.set(x.into(), y.into(), value) {
                    warn!("Fill write rejected: {}", e);
                    return;
                }
            }
        }

        ctx.mark_modified();
        event.use_event();
    }

    fn render_panel(&mut self, ui: &mut egui::Ui, catalog: &TileCatalog) {
        if let Some((min, max)) = self.pending() {
            ui.label(format!(
                "Filling ({}, {}) to ({}, {})",
                min.x, min.y, max.x, max.y
            ));
        }
        self.palette.ui(ui, catalog);
    }
}

impl RegisteredTool for RectFillTool {
    const TYPE_PATH: &'static str = "tilefield_editor::tools::RectFillTool";
    const CAPABILITIES: ToolCapabilities = ToolCapabilities::POINTER_DOWN
        .union(ToolCapabilities::POINTER_DRAG)
        .union(ToolCapabilities::POINTER_UP)
        .union(ToolCapabilities::RENDER_PANEL);

    fn create(init: &ToolInit<'_>) -> Self {
        Self::new(init.catalog)
    }
}
