//! Audit log page. Entries are read-only.

use agora_business::{AuditLog, StatusEnum, ValidationErrors};
use egui::{Grid, RichText, Ui};
use egui_extras::{Column, TableRow};

use super::{apply_row_action, table_page};
use crate::state::State;
use crate::widgets::table::cells::{
    action_button, draw_cell_bottom_border, render_badge_cell, render_id_cell, render_text_cell,
    render_timestamp_cell, render_weak_cell,
};
use crate::widgets::table::columns;
use crate::widgets::{EditorToolbarState, RowAction, TableRecord};

impl TableRecord for AuditLog {
    const HEADERS: &'static [&'static str] = &[
        "ID", "Actor", "Action", "Target", "IP address", "Outcome", "When", "",
    ];
    const EDITABLE: bool = false;

    fn columns() -> Vec<Column> {
        vec![
            columns::id(),
            Column::exact(110.0),
            Column::exact(160.0),
            columns::text(140.0),
            Column::exact(120.0),
            columns::badge(),
            columns::timestamp(),
            columns::actions(60.0),
        ]
    }

    fn render_row(&self, row: &mut TableRow<'_, '_>, busy: bool) -> Option<RowAction<Self>> {
        let mut action = None;

        row.col(|ui| {
            render_id_cell(ui, self.id);
            draw_cell_bottom_border(ui);
        });
        row.col(|ui| {
            render_text_cell(ui, &self.actor);
            draw_cell_bottom_border(ui);
        });
        row.col(|ui| {
            render_text_cell(ui, self.action.label());
            draw_cell_bottom_border(ui);
        });
        row.col(|ui| {
            render_weak_cell(ui, &self.target);
            draw_cell_bottom_border(ui);
        });
        row.col(|ui| {
            ui.label(RichText::new(&self.ip_address).monospace().small());
            draw_cell_bottom_border(ui);
        });
        row.col(|ui| {
            render_badge_cell(ui, self.outcome.label());
            draw_cell_bottom_border(ui);
        });
        row.col(|ui| {
            render_timestamp_cell(ui, &self.created_at);
            draw_cell_bottom_border(ui);
        });
        row.col(|ui| {
            if action_button(ui, "View", "Show details", busy) {
                action = Some(RowAction::ViewDetails(self.id));
            }
            draw_cell_bottom_border(ui);
        });

        action
    }

    fn detail_form(
        draft: &mut Self,
        _errors: &ValidationErrors,
        _editor: &mut EditorToolbarState,
        ui: &mut Ui,
    ) {
        Grid::new("audit_detail_form")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                let rows = [
                    ("Actor", draft.actor.clone()),
                    ("Action", draft.action.label().to_owned()),
                    ("Target", draft.target.clone()),
                    ("IP address", draft.ip_address.clone()),
                    ("Outcome", draft.outcome.label().to_owned()),
                    (
                        "When",
                        draft.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
                    ),
                ];
                for (label, value) in rows {
                    ui.label(label);
                    ui.label(value);
                    ui.end_row();
                }
            });
    }
}

pub fn audit_logs_page(state: &mut State, ui: &mut Ui) {
    if let Some(action) = table_page::<AuditLog>(state, "Audit log", ui) {
        apply_row_action(&mut state.ctx, action);
    }
}
