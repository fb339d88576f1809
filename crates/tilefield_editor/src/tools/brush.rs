use glam::IVec2;
use tilefield_core::{TileCatalog, EMPTY_TILE};
use tracing::warn;

use super::{EditTool, RegisteredTool, TilePalette, ToolCapabilities, ToolContext, ToolInit};
use crate::input::PointerEvent;

/// Paints the selected tile into the layer its definition names.
///
/// Holding Shift erases instead. Painting continues while dragging.
#[derive(Debug, Clone)]
pub struct TileBrushTool {
    palette: TilePalette,
}

impl TileBrushTool {
    pub fn new(catalog: &TileCatalog) -> Self {
        Self {
            palette: TilePalette::new(catalog),
        }
    }

    pub fn palette(&self) -> &TilePalette {
        &self.palette
    }

    pub fn palette_mut(&mut self) -> &mut TilePalette {
        &mut self.palette
    }

    fn paint(&mut self, point: IVec2, event: &mut PointerEvent, ctx: &mut ToolContext<'_>) {
        if !ctx.level().contains(point) {
            return;
        }
        let Some(definition) = self.palette.resolve(ctx.catalog()) else {
            return;
        };

        let value = if event.modifiers.shift {
            EMPTY_TILE
        } else {
            definition.id
        };
        let layer_index = definition.render_layer;

        let layer = match ctx.level_mut().layer_mut(layer_index) {
            Ok(layer) => layer,
            Err(e) => {
                warn!("Brush target for tile {} is unusable: {}", definition.id, e);
                return;
            }
        };
        if let Err(e) = layer.set(point.x.into(), point.y.into(), value) {
            warn!("Brush write rejected: {}", e);
            return;
        }

        ctx.mark_modified();
        event.use_event();
    }
}

impl EditTool for TileBrushTool {
    fn name(&self) -> &str {
        "Brush"
    }

    fn capabilities(&self) -> ToolCapabilities {
        Self::CAPABILITIES
    }

    fn pointer_down(&mut self, point: IVec2, event: &mut PointerEvent, ctx: &mut ToolContext<'_>) {
        self.paint(point, event, ctx);
    }

    fn pointer_drag(&mut self, point: IVec2, event: &mut PointerEvent, ctx: &mut ToolContext<'_>) {
        self.paint(point, event, ctx);
    }

    fn render_panel(&mut self, ui: &mut egui::Ui, catalog: &TileCatalog) {
        ui.label("Shift + click to erase");
        self.palette.ui(ui, catalog);
    }
}

impl RegisteredTool for TileBrushTool {
    const TYPE_PATH: &'static str = "tilefield_editor::tools::TileBrushTool";
    const CAPABILITIES: ToolCapabilities = ToolCapabilities::POINTER_DOWN
        .union(ToolCapabilities::POINTER_DRAG)
        .union(ToolCapabilities::RENDER_PANEL);

    fn create(init: &ToolInit<'_>) -> Self {
        Self::new(init.catalog)
    }
}
