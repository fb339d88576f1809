//! egui panels for the editing session

use egui::{Color32, Sense, Stroke};

use crate::error::EditorError;
use crate::render::paint_grid;
use crate::session::EditorSession;
use crate::storage::LevelStore;

/// Render the toolbar strip: open level name and the jump-to-level search.
///
/// Returns the outcome of a search submitted this frame.
pub fn render_level_toolbar(
    ui: &mut egui::Ui,
    session: &mut EditorSession,
    store: &mut dyn LevelStore,
) -> Option<Result<bool, EditorError>> {
    let mut submitted = false;
    ui.horizontal(|ui| {
        match session.level() {
            Some(level) => {
                let marker = if session.is_dirty() { "*" } else { "" };
                ui.label(format!("Level: {}{}", level.name, marker));
            }
            None => {
                ui.weak("No level open");
            }
        }

        ui.separator();
        ui.label("Jump to");
        let response = ui.add(
            egui::TextEdit::singleline(&mut session.search_text)
                .hint_text("level name")
                .desired_width(160.0),
        );
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            submitted = true;
        }
        if ui.button("Go").clicked() {
            submitted = true;
        }
    });

    if !submitted {
        return None;
    }
    let name = session.search_text.clone();
    Some(session.jump_to_level(&name, store))
}

/// Render the New / Save / Close actions.
///
/// New creates a level named after the search field text. Returns the
/// outcome of an action triggered this frame.
pub fn render_file_actions(
    ui: &mut egui::Ui,
    session: &mut EditorSession,
    store: &mut dyn LevelStore,
) -> Option<Result<(), EditorError>> {
    let editing = session.is_editing();
    let mut outcome = None;
    ui.horizontal(|ui| {
        let can_create = !session.search_text.trim().is_empty();
        if ui.add_enabled(can_create, egui::Button::new("New")).clicked() {
            let name = session.search_text.clone();
            outcome = Some(session.create_level(&name, &mut *store));
        }
        if ui.add_enabled(editing, egui::Button::new("Save")).clicked() {
            outcome = Some(session.save(&mut *store).map_err(EditorError::from));
        }
        if ui.add_enabled(editing, egui::Button::new("Close")).clicked() {
            outcome = Some(session.close(&mut *store).map_err(EditorError::from));
        }
    });
    outcome
}

/// Render the tool selector followed by the active tool's own panel
pub fn render_toolset_panel(ui: &mut egui::Ui, session: &mut EditorSession) {
    ui.heading("Current Tool");

    if let Some(error) = session.toolset_error() {
        ui.colored_label(ui.visuals().error_fg_color, "Toolset unavailable");
        ui.label(error);
        return;
    }
    if session.tools().is_empty() {
        ui.weak("No tools configured");
        return;
    }

    let mut selected = None;
    ui.horizontal_wrapped(|ui| {
        for (index, name) in session.tool_names().enumerate() {
            if ui
                .selectable_label(index == session.active_tool_index(), name)
                .clicked()
            {
                selected = Some(index);
            }
        }
    });
    if let Some(index) = selected {
        session.select_tool(index);
    }

    ui.separator();
    session.render_active_tool_panel(ui);
}

/// Render one visibility checkbox per layer of the open level
pub fn render_layer_toggles(ui: &mut egui::Ui, session: &mut EditorSession) {
    let Some(level) = session.level() else {
        return;
    };
    let names: Vec<String> = level.layers().map(|layer| layer.name.clone()).collect();

    ui.label(format!("Layers: {}", names.len()));
    let mask = session.layer_mask();
    for (index, name) in names.iter().enumerate() {
        let mut visible = mask.is_visible(index);
        if ui.checkbox(&mut visible, name).changed() {
            session.set_layer_visible(index, visible);
        }
    }
}

/// Paint the field background and grid into the session's field rectangle.
///
/// Tile sprites are left to the host, which draws
/// [`EditorSession::field_draw_list`] with its own textures.
pub fn render_field(ui: &mut egui::Ui, session: &EditorSession) -> Option<egui::Response> {
    let list = session.field_draw_list()?;
    let response = ui.allocate_rect(list.background, Sense::click_and_drag());
    let stroke = Stroke::new(1.0, Color32::from_gray(90));
    paint_grid(ui.painter(), &list, stroke);
    Some(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use egui_kittest::kittest::Queryable;
    use egui_kittest::Harness;

    #[test]
    fn toolset_panel_lists_tools_and_selects_on_click() {
        let mut harness = harness_for_toolset_panel(session_with_level(4, 4, 2));
        harness.run();

        assert!(harness.query_by_label("Brush").is_some());
        harness.get_by_label("Rect Fill").click();
        harness.run();

        assert_eq!(harness.state().active_tool_index(), 1);
        assert_eq!(
            harness.state().active_tool().map(|tool| tool.name()),
            Some("Rect Fill")
        );
    }

    #[test]
    fn toolset_panel_shows_active_tool_palette() {
        let mut harness = harness_for_toolset_panel(session_with_level(4, 4, 2));
        harness.run();

        assert!(harness.query_by_label("Grass").is_some());
        assert!(harness.query_by_label("Wall").is_some());
    }

    #[test]
    fn toolset_panel_reports_unresolved_toolset() {
        let settings = crate::settings::EditorSettings {
            toolset: vec![crate::settings::ToolReference::new("game::Missing")],
            ..sample_settings()
        };
        let mut session = EditorSession::new(settings, sample_catalog());
        let err = session
            .load_toolset(&crate::tools::ToolRegistry::with_builtin_tools())
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::ConfigurationError::UnresolvedTool { .. }
        ));

        let mut harness = harness_for_toolset_panel(session);
        harness.run();

        assert!(harness.query_by_label("Toolset unavailable").is_some());
        assert!(harness.query_by_label("Brush").is_none());
    }

    #[test]
    fn layer_toggle_hides_layer() {
        let mut harness = harness_for_layer_toggles(session_with_level(2, 2, 2));
        harness.run();

        harness.get_by_label("Layer 2").click();
        harness.run();

        let mask = harness.state().layer_mask();
        assert!(mask.is_visible(0));
        assert!(!mask.is_visible(1));
    }

    #[test]
    fn level_toolbar_jumps_on_go() {
        let mut store = MemoryStore::default();
        let mut session = session_with_level(2, 2, 1);
        session.create_level("Caves", &mut store).unwrap();
        session.create_level("Peaks", &mut store).unwrap();
        session.search_text = "Caves".to_string();

        let mut outcome = None;
        {
            let mut harness = Harness::new_ui_state(
                |ui, session: &mut EditorSession| {
                    if let Some(result) = render_level_toolbar(ui, session, &mut store) {
                        outcome = Some(result.is_ok_and(|found| found));
                    }
                },
                session,
            );
            harness.run();
            harness.get_by_label("Go").click();
            harness.run();

            assert_eq!(harness.state().level().unwrap().name, "Caves");
        }
        assert_eq!(outcome, Some(true));
    }

    #[test]
    fn file_actions_save_and_close() {
        let mut store = MemoryStore::default();
        let mut session = session_with_level(2, 2, 1);
        session.mark_modified();

        let mut harness = Harness::new_ui_state(
            |ui, session: &mut EditorSession| {
                let _ = render_file_actions(ui, session, &mut store);
            },
            session,
        );
        harness.run();

        harness.get_by_label("Save").click();
        harness.run();
        assert!(!harness.state().is_dirty());
        assert!(harness.state().is_editing());

        harness.get_by_label("Close").click();
        harness.run();
        assert!(!harness.state().is_editing());
    }
}
