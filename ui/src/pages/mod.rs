//! Pages shown in the central panel.
//!
//! - `dashboard`: Totals and moderation queue sizes
//! - `users`, `posts`, `comments`, `audit_logs`: One record table each
//!
//! Every table page follows the same layout (see [`table_page`]) and only
//! differs in how its rows look and which row actions it offers.

mod audit_logs;
mod comments;
mod dashboard;
mod posts;
mod users;

use agora_business::admin::{
    change_status, cycle_status, open_details, refresh_table, request_delete,
};
use agora_business::{AdminTableState, Record, StatusEnum};
use agora_states::StateCtx;
use egui::{Button, ComboBox, Ui};
use log::{debug, warn};

pub use audit_logs::audit_logs_page;
pub use comments::comments_page;
pub use dashboard::dashboard_page;
pub use posts::posts_page;
pub use users::{apply_user_action, users_page};

use crate::state::State;
use crate::utils::colors::COLOR_RED;
use crate::widgets::{self, RowAction, TableRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    #[default]
    Dashboard,
    Users,
    Posts,
    Comments,
    AuditLogs,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Dashboard,
        Page::Users,
        Page::Posts,
        Page::Comments,
        Page::AuditLogs,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Users => "Users",
            Page::Posts => "Posts",
            Page::Comments => "Comments",
            Page::AuditLogs => "Audit logs",
        }
    }
}

/// Heading, filter bar, table, pagination and the dialogs of one entity table.
///
/// Returns the row action picked this frame for the page to apply.
pub fn table_page<R: TableRecord>(
    state: &mut State,
    title: &str,
    ui: &mut Ui,
) -> Option<RowAction<R>> {
    let (loading, error) = state
        .ctx
        .state::<AdminTableState<R>>()
        .map(|s| (s.is_loading(), s.last_error().map(str::to_owned)))
        .unwrap_or_default();

    ui.horizontal(|ui| {
        ui.heading(title);
        if ui.add_enabled(!loading, Button::new("⟳ Refresh")).clicked()
            && let Err(err) = refresh_table::<R>(&mut state.ctx)
        {
            warn!("Refreshing {}s failed: {err}", R::KIND);
        }
        if loading {
            ui.spinner();
            ui.label("Loading...");
        }
    });
    if let Some(error) = error {
        ui.colored_label(COLOR_RED, format!("Error: {error}"));
    }

    widgets::filter_bar::<R>(&mut state.ctx, ui);
    ui.add_space(8.0);

    let action = state
        .ctx
        .state::<AdminTableState<R>>()
        .and_then(|s| widgets::data_table(&s.table, ui));

    ui.add_space(8.0);
    widgets::pagination::<R>(&mut state.ctx, ui);

    widgets::detail_modal::<R>(&mut state.ctx, &mut state.editor, ui);
    widgets::confirm_delete_dialog::<R>(&mut state.ctx, ui);

    action
}

/// Carries out the row actions every record type shares.
///
/// Dispatch failures are already reported as notifications by the actions.
pub fn apply_row_action<R: Record>(ctx: &mut StateCtx, action: RowAction<R>) {
    let id = action.id();
    let result = match action {
        RowAction::ViewDetails(id) => {
            open_details::<R>(ctx, id);
            Ok(())
        }
        RowAction::SetStatus(id, status) => change_status::<R>(ctx, id, status).map(|_| ()),
        RowAction::CycleStatus(id) => cycle_status::<R>(ctx, id).map(|_| ()),
        RowAction::RequestDelete(id) => {
            request_delete::<R>(ctx, id);
            Ok(())
        }
        RowAction::EditRole(..) | RowAction::ToggleBan(_) => {
            debug!("{} rows have no role or ban actions", R::KIND);
            Ok(())
        }
    };
    if let Err(err) = result {
        debug!("Row action on {} {id} failed: {err}", R::KIND);
    }
}

/// Combo box over every value of a labelled enum. Returns `true` when the value changed.
pub fn enum_combo<E: StatusEnum>(
    ui: &mut Ui,
    id_salt: impl std::hash::Hash,
    value: &mut E,
) -> bool {
    let before = *value;
    ComboBox::from_id_salt(id_salt)
        .selected_text(value.label())
        .show_ui(ui, |ui| {
            for option in E::ALL {
                ui.selectable_value(value, *option, option.label());
            }
        });
    *value != before
}
