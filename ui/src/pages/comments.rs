//! Comments page: status cycling and delete.

use agora_business::{Comment, StatusEnum, ValidationErrors};
use egui::{Grid, TextEdit, Ui};
use egui_extras::{Column, TableRow};

use super::{apply_row_action, enum_combo, table_page};
use crate::state::State;
use crate::widgets::table::cells::{
    action_button, danger_button, draw_cell_bottom_border, render_badge_cell, render_id_cell,
    render_text_cell, render_timestamp_cell, render_weak_cell,
};
use crate::widgets::table::columns;
use crate::widgets::{EditorToolbarState, RowAction, TableRecord, field_errors};

impl TableRecord for Comment {
    const HEADERS: &'static [&'static str] = &[
        "ID", "Author", "Post", "Comment", "Status", "Created", "Actions",
    ];

    fn columns() -> Vec<Column> {
        vec![
            columns::id(),
            Column::exact(110.0),
            columns::text(120.0),
            columns::text(200.0),
            columns::badge(),
            columns::timestamp(),
            columns::actions(170.0),
        ]
    }

    fn render_row(&self, row: &mut TableRow<'_, '_>, busy: bool) -> Option<RowAction<Self>> {
        let mut action = None;

        row.col(|ui| {
            render_id_cell(ui, self.id);
            draw_cell_bottom_border(ui);
        });
        row.col(|ui| {
            render_text_cell(ui, &self.author);
            draw_cell_bottom_border(ui);
        });
        row.col(|ui| {
            render_weak_cell(ui, &self.post_title);
            draw_cell_bottom_border(ui);
        });
        row.col(|ui| {
            render_text_cell(ui, &self.content);
            draw_cell_bottom_border(ui);
        });
        row.col(|ui| {
            render_badge_cell(ui, self.status.label());
            draw_cell_bottom_border(ui);
        });
        row.col(|ui| {
            render_timestamp_cell(ui, &self.created_at);
            draw_cell_bottom_border(ui);
        });
        row.col(|ui| {
            ui.horizontal(|ui| {
                if action_button(ui, "View", "Show details", busy) {
                    action = Some(RowAction::ViewDetails(self.id));
                }
                let hover = format!("Mark as {}", self.status.cycle_next().label());
                if action_button(ui, "Next status", &hover, busy) {
                    action = Some(RowAction::CycleStatus(self.id));
                }
                if danger_button(ui, "Delete", "Delete this comment", busy) {
                    action = Some(RowAction::RequestDelete(self.id));
                }
                if busy {
                    ui.spinner();
                }
            });
            draw_cell_bottom_border(ui);
        });

        action
    }

    fn detail_form(
        draft: &mut Self,
        errors: &ValidationErrors,
        _editor: &mut EditorToolbarState,
        ui: &mut Ui,
    ) {
        Grid::new("comment_detail_form")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label("Author");
                ui.label(&draft.author);
                ui.end_row();

                ui.label("Post");
                ui.label(format!("#{} {}", draft.post_id, draft.post_title));
                ui.end_row();

                ui.label("Status");
                enum_combo(ui, "comment_detail_status", &mut draft.status);
                ui.end_row();
            });

        ui.add_space(8.0);
        ui.label("Comment");
        ui.add(
            TextEdit::multiline(&mut draft.content)
                .desired_rows(5)
                .desired_width(f32::INFINITY),
        );
        field_errors(ui, errors, "content");
    }
}

pub fn comments_page(state: &mut State, ui: &mut Ui) {
    if let Some(action) = table_page::<Comment>(state, "Comments", ui) {
        apply_row_action(&mut state.ctx, action);
    }
}
