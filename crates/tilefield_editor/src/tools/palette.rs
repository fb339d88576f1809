use tilefield_core::{TileCatalog, TileDefinition, TileId};
use tracing::warn;

/// Tile selection shared by the painting tools
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TilePalette {
    selected: Option<TileId>,
}

impl TilePalette {
    /// Select the first catalog tile, if any
    pub fn new(catalog: &TileCatalog) -> Self {
        Self {
            selected: catalog.first().map(|definition| definition.id),
        }
    }

    pub fn selected(&self) -> Option<TileId> {
        self.selected
    }

    pub fn select(&mut self, id: TileId) {
        self.selected = Some(id);
    }

    /// Definition of the selected tile. `None` when nothing is selected or
    /// the selection no longer exists in `catalog`.
    pub fn resolve<'c>(&self, catalog: &'c TileCatalog) -> Option<&'c TileDefinition> {
        let id = self.selected?;
        let definition = catalog.get(id);
        if definition.is_none() {
            warn!("Selected tile {} is not in the catalog", id);
        }
        definition
    }

    /// Draw one selectable entry per catalog tile. Returns true when the
    /// selection changed.
    pub fn ui(&mut self, ui: &mut egui::Ui, catalog: &TileCatalog) -> bool {
        ui.label("Tiles");
        if catalog.is_empty() {
            ui.weak("No tiles defined");
            return false;
        }

        let mut changed = false;
        egui::ScrollArea::vertical()
            .id_salt("tile_palette")
            .show(ui, |ui| {
                for definition in catalog.definitions() {
                    let selected = self.selected == Some(definition.id);
                    if ui.selectable_label(selected, &definition.name).clicked() && !selected {
                        self.selected = Some(definition.id);
                        changed = true;
                    }
                }
            });
        changed
    }
}
