//! Posts page: publish/hide, delete, and editing with the formatting toolbar.

use agora_business::entities::POST_CATEGORIES;
use agora_business::{Post, PostStatus, StatusEnum, ValidationErrors};
use egui::{ComboBox, Grid, TextEdit, Ui};
use egui_extras::{Column, TableRow};

use super::{apply_row_action, enum_combo, table_page};
use crate::state::State;
use crate::widgets::table::cells::{
    action_button, danger_button, draw_cell_bottom_border, render_badge_cell, render_count_cell,
    render_id_cell, render_text_cell, render_timestamp_cell, render_weak_cell,
};
use crate::widgets::table::columns;
use crate::widgets::{EditorToolbarState, RowAction, TableRecord, editor_toolbar, field_errors};

impl TableRecord for Post {
    const HEADERS: &'static [&'static str] = &[
        "ID", "Title", "Author", "Category", "Status", "Created", "Comments", "Actions",
    ];

    fn columns() -> Vec<Column> {
        vec![
            columns::id(),
            columns::text(180.0),
            columns::text(100.0),
            Column::exact(110.0),
            columns::badge(),
            columns::timestamp(),
            columns::count(),
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
            render_text_cell(ui, &self.title);
            draw_cell_bottom_border(ui);
        });
        row.col(|ui| {
            render_weak_cell(ui, &self.author);
            draw_cell_bottom_border(ui);
        });
        row.col(|ui| {
            render_text_cell(ui, &self.category);
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
            render_count_cell(ui, self.comment_count);
            draw_cell_bottom_border(ui);
        });
        row.col(|ui| {
            ui.horizontal(|ui| {
                if action_button(ui, "View", "Show details", busy) {
                    action = Some(RowAction::ViewDetails(self.id));
                }
                let next = self.visibility_toggle();
                let (text, hover) = if next == PostStatus::Hidden {
                    ("Hide", "Hide from readers")
                } else {
                    ("Publish", "Make visible to readers")
                };
                if action_button(ui, text, hover, busy) {
                    action = Some(RowAction::SetStatus(self.id, next));
                }
                if danger_button(ui, "Delete", "Delete this post", busy) {
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
        editor: &mut EditorToolbarState,
        ui: &mut Ui,
    ) {
        Grid::new("post_detail_form")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label("Title");
                ui.vertical(|ui| {
                    ui.add(TextEdit::singleline(&mut draft.title).desired_width(300.0));
                    field_errors(ui, errors, "title");
                });
                ui.end_row();

                ui.label("Author");
                ui.label(&draft.author);
                ui.end_row();

                ui.label("Category");
                ComboBox::from_id_salt("post_detail_category")
                    .selected_text(draft.category.as_str())
                    .show_ui(ui, |ui| {
                        for category in POST_CATEGORIES {
                            ui.selectable_value(
                                &mut draft.category,
                                (*category).to_owned(),
                                *category,
                            );
                        }
                    });
                ui.end_row();

                ui.label("Status");
                enum_combo(ui, "post_detail_status", &mut draft.status);
                ui.end_row();
            });

        ui.add_space(8.0);
        ui.label("Content");
        editor_toolbar(editor, ui);
        ui.add(
            TextEdit::multiline(&mut draft.content)
                .desired_rows(8)
                .desired_width(f32::INFINITY),
        );
        field_errors(ui, errors, "content");
    }
}

pub fn posts_page(state: &mut State, ui: &mut Ui) {
    if let Some(action) = table_page::<Post>(state, "Posts", ui) {
        apply_row_action(&mut state.ctx, action);
    }
}
