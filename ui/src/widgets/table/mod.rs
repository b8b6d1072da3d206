//! Generic record table.
//!
//! The rendering is split into smaller, focused components:
//! - `columns`: Column sizes shared by every table
//! - `header`: Table header rendering
//! - `row`: Row actions and the per-record row hook
//! - `cells`: Cell rendering functions for each kind of value

pub mod cells;
pub mod columns;
pub mod header;
pub mod row;

use agora_business::{DataTable, Record};
use egui::Ui;
use egui_extras::TableBuilder;

pub use row::{RowAction, TableRecord};

/// Renders the visible page of `table`. Returns the action picked on a row, if any.
///
/// Nothing is mutated here; the caller applies the returned action.
pub fn data_table<R: TableRecord>(table: &DataTable<R>, ui: &mut Ui) -> Option<RowAction<R>> {
    let mut action = None;
    let visible = table.visible();

    let mut builder = TableBuilder::new(ui)
        .id_salt(R::KIND.path())
        .striped(false)
        .resizable(false)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center));
    for column in R::columns() {
        builder = builder.column(column);
    }

    builder
        .header(columns::HEADER_HEIGHT, |mut header| {
            header::render_table_header(&mut header, R::HEADERS);
        })
        .body(|mut body| {
            for record in visible {
                let busy = table.is_in_flight(record.id());
                body.row(columns::ROW_HEIGHT, |mut row| {
                    if let Some(picked) = record.render_row(&mut row, busy) {
                        action = Some(picked);
                    }
                });
            }
        });

    if visible.is_empty() {
        ui.add_space(8.0);
        ui.vertical_centered(|ui| {
            ui.weak(format!("No {} match the current search.", plural::<R>()));
        });
    }

    action
}

/// Lower-case plural used in empty states, e.g. "users" or "audit log entries".
pub fn plural<R: Record>() -> String {
    match R::KIND {
        agora_business::EntityKind::AuditLog => "audit log entries".to_owned(),
        kind => format!("{}s", kind.label().to_lowercase()),
    }
}
