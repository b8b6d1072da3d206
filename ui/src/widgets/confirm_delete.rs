//! Confirmation dialog in front of every delete.

use agora_business::admin::{cancel_delete, confirm_delete};
use agora_business::{AdminTableState, Record};
use agora_states::StateCtx;
use egui::{Id, RichText, Ui, Window};
use log::debug;

use crate::utils::colors::{COLOR_AMBER, COLOR_RED};

/// Shows the pending delete confirmation of the `R` table, if any.
pub fn confirm_delete_dialog<R: Record>(state_ctx: &mut StateCtx, ui: &mut Ui) {
    let Some((id, title)) = state_ctx.state::<AdminTableState<R>>().and_then(|s| {
        let id = s.table.pending_delete()?;
        let record = s.table.get(id)?;
        Some((id, record.title().into_owned()))
    }) else {
        return;
    };

    let mut open = true;
    let mut confirmed = false;
    let mut cancelled = false;

    Window::new(format!("Delete {}", R::KIND.label().to_lowercase()))
        .id(Id::new(("confirm_delete", R::KIND.path())))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ui.ctx(), |ui| {
            ui.colored_label(COLOR_AMBER, "⚠ Warning");
            ui.add_space(4.0);
            ui.label(format!("Are you sure you want to delete {title}?"));
            ui.label("This action cannot be undone.");

            ui.add_space(16.0);

            ui.horizontal(|ui| {
                if ui
                    .button(RichText::new("Delete").color(COLOR_RED))
                    .clicked()
                {
                    confirmed = true;
                }
                if ui.button("Cancel").clicked() {
                    cancelled = true;
                }
            });
        });

    if confirmed {
        if let Err(err) = confirm_delete::<R>(state_ctx) {
            debug!("Delete of {} {id} not dispatched: {err}", R::KIND);
        }
    } else if cancelled || !open {
        cancel_delete::<R>(state_ctx);
    }
}
