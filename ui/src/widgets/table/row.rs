//! Row actions and the hook each record type implements to draw its row.

use agora_business::{Record, Role, ValidationErrors};
use egui::Ui;
use egui_extras::{Column, TableRow};

use crate::widgets::EditorToolbarState;

/// What the user asked for on a row. The page decides how to carry it out.
#[derive(Debug, Clone, PartialEq)]
pub enum RowAction<R: Record> {
    ViewDetails(R::Id),
    EditRole(R::Id, Role),
    ToggleBan(R::Id),
    SetStatus(R::Id, R::Status),
    CycleStatus(R::Id),
    RequestDelete(R::Id),
}

impl<R: Record> RowAction<R> {
    pub fn id(&self) -> R::Id {
        match self {
            RowAction::ViewDetails(id)
            | RowAction::EditRole(id, _)
            | RowAction::ToggleBan(id)
            | RowAction::SetStatus(id, _)
            | RowAction::CycleStatus(id)
            | RowAction::RequestDelete(id) => *id,
        }
    }
}

/// A record type that knows how to lay itself out in a table and a detail form.
pub trait TableRecord: Record {
    /// Header labels, one per column.
    const HEADERS: &'static [&'static str];

    /// Read-only records show their detail form disabled and cannot be saved.
    const EDITABLE: bool = true;

    fn columns() -> Vec<Column>;

    /// Renders every cell of the row. `busy` is set while a call on the record is pending.
    fn render_row(&self, row: &mut TableRow<'_, '_>, busy: bool) -> Option<RowAction<Self>>;

    /// Edits `draft` in place, showing `errors` next to their fields.
    ///
    /// `editor` backs the formatting toolbar of rich-text fields.
    fn detail_form(
        draft: &mut Self,
        errors: &ValidationErrors,
        editor: &mut EditorToolbarState,
        ui: &mut Ui,
    );
}
