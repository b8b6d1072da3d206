//! Detail window for the record open in a table's modal.

use agora_business::admin::{close_details, refresh_details, submit_details};
use agora_business::{AdminTableState, ValidationErrors};
use agora_states::StateCtx;
use egui::{Button, Id, RichText, Ui, Window};
use log::debug;

use super::EditorToolbarState;
use super::table::TableRecord;
use crate::utils::colors::COLOR_RED;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Intent {
    Save,
    Revert,
    Refresh,
    Close,
}

/// Shows the open record of the `R` table, if any.
///
/// Edits go to the draft held in [`AdminTableState`]; the table itself only
/// changes once the provider accepted a save.
pub fn detail_modal<R: TableRecord>(
    state_ctx: &mut StateCtx,
    editor: &mut EditorToolbarState,
    ui: &mut Ui,
) {
    let Some(view) = state_ctx
        .state::<AdminTableState<R>>()
        .and_then(|s| s.table.modal().view())
    else {
        return;
    };
    let id = view.id();
    let original = view.original().clone();
    let before = view.draft.clone();
    let errors = view.errors().clone();
    let saving = view.is_saving();

    let mut draft = before.clone();
    let mut open = true;
    let mut intent = None;

    Window::new(format!("{} {}", R::KIND.label(), original.title()))
        .id(Id::new(("detail_modal", R::KIND.path())))
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .default_width(420.0)
        .show(ui.ctx(), |ui| {
            ui.add_enabled_ui(R::EDITABLE && !saving, |ui| {
                R::detail_form(&mut draft, &errors, editor, ui);
            });

            ui.add_space(8.0);
            ui.separator();

            let dirty = draft != original;
            ui.horizontal(|ui| {
                if R::EDITABLE {
                    if ui.add_enabled(dirty && !saving, Button::new("Save")).clicked() {
                        intent = Some(Intent::Save);
                    }
                    if ui.add_enabled(dirty && !saving, Button::new("Revert")).clicked() {
                        intent = Some(Intent::Revert);
                    }
                }
                if ui.add_enabled(!saving, Button::new("Refresh")).clicked() {
                    intent = Some(Intent::Refresh);
                }
                if ui.button("Close").clicked() {
                    intent = Some(Intent::Close);
                }
                if saving {
                    ui.spinner();
                    ui.label("Saving...");
                }
            });
        });

    if !open {
        intent = Some(Intent::Close);
    }

    if draft != before {
        state_ctx.update::<AdminTableState<R>>(|s| {
            if let Some(view) = s.table.modal_mut().view_mut()
                && view.id() == id
            {
                view.draft = draft;
            }
        });
    }

    match intent {
        Some(Intent::Save) => {
            if let Err(err) = submit_details::<R>(state_ctx) {
                debug!("Save of {} {id} not dispatched: {err}", R::KIND);
            }
        }
        Some(Intent::Revert) => {
            state_ctx.update::<AdminTableState<R>>(|s| {
                if let Some(view) = s.table.modal_mut().view_mut() {
                    view.revert();
                }
            });
        }
        Some(Intent::Refresh) => {
            if let Err(err) = refresh_details::<R>(state_ctx) {
                debug!("Refresh of {} {id} not dispatched: {err}", R::KIND);
            }
        }
        Some(Intent::Close) => close_details::<R>(state_ctx),
        None => {}
    }
}

/// Lists the errors reported for `field` below its input.
pub fn field_errors(ui: &mut Ui, errors: &ValidationErrors, field: &str) {
    for message in errors.for_field(field) {
        ui.label(RichText::new(message).small().color(COLOR_RED));
    }
}
