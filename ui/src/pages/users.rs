//! Users page: role changes, bans and profile edits.

use agora_business::admin::{change_status, save_record};
use agora_business::{AdminTableState, Role, StatusEnum, User, UserStatus, ValidationErrors};
use agora_states::StateCtx;
use egui::{Grid, TextEdit, Ui};
use egui_extras::{Column, TableRow};
use log::debug;

use super::{apply_row_action, enum_combo, table_page};
use crate::state::State;
use crate::widgets::table::cells::{
    action_button, danger_button, draw_cell_bottom_border, render_badge_cell, render_count_cell,
    render_id_cell, render_text_cell, render_timestamp_cell, render_weak_cell,
};
use crate::widgets::table::columns;
use crate::widgets::{EditorToolbarState, RowAction, TableRecord, field_errors};

impl TableRecord for User {
    const HEADERS: &'static [&'static str] = &[
        "ID", "Username", "Email", "Role", "Status", "Joined", "Posts", "Actions",
    ];

    fn columns() -> Vec<Column> {
        vec![
            columns::id(),
            columns::text(120.0),
            columns::text(160.0),
            Column::exact(130.0),
            columns::badge(),
            columns::timestamp(),
            columns::count(),
            columns::actions(120.0),
        ]
    }

    fn render_row(&self, row: &mut TableRow<'_, '_>, busy: bool) -> Option<RowAction<Self>> {
        let mut action = None;

        row.col(|ui| {
            render_id_cell(ui, self.id);
            draw_cell_bottom_border(ui);
        });
        row.col(|ui| {
            render_text_cell(ui, &self.username);
            draw_cell_bottom_border(ui);
        });
        row.col(|ui| {
            render_weak_cell(ui, &self.email);
            draw_cell_bottom_border(ui);
        });
        row.col(|ui| {
            let mut role = self.role;
            ui.add_enabled_ui(!busy, |ui| {
                if enum_combo(ui, ("user_role", self.id), &mut role) {
                    action = Some(RowAction::EditRole(self.id, role));
                }
            });
            draw_cell_bottom_border(ui);
        });
        row.col(|ui| {
            render_badge_cell(ui, self.status.label());
            draw_cell_bottom_border(ui);
        });
        row.col(|ui| {
            render_timestamp_cell(ui, &self.joined_at);
            draw_cell_bottom_border(ui);
        });
        row.col(|ui| {
            render_count_cell(ui, self.post_count);
            draw_cell_bottom_border(ui);
        });
        row.col(|ui| {
            ui.horizontal(|ui| {
                if action_button(ui, "View", "Show details", busy) {
                    action = Some(RowAction::ViewDetails(self.id));
                }
                let toggled = if self.status == UserStatus::Banned {
                    action_button(ui, "Unban", "Restore access", busy)
                } else {
                    danger_button(ui, "Ban", "Block this user", busy)
                };
                if toggled {
                    action = Some(RowAction::ToggleBan(self.id));
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
        Grid::new("user_detail_form")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label("Username");
                ui.vertical(|ui| {
                    ui.add(TextEdit::singleline(&mut draft.username));
                    field_errors(ui, errors, "username");
                });
                ui.end_row();

                ui.label("Email");
                ui.vertical(|ui| {
                    ui.add(TextEdit::singleline(&mut draft.email));
                    field_errors(ui, errors, "email");
                });
                ui.end_row();

                ui.label("Role");
                enum_combo(ui, "user_detail_role", &mut draft.role);
                ui.end_row();

                ui.label("Status");
                enum_combo(ui, "user_detail_status", &mut draft.status);
                ui.end_row();

                ui.label("Joined");
                ui.label(draft.joined_at.format("%Y-%m-%d %H:%M UTC").to_string());
                ui.end_row();

                ui.label("Posts");
                ui.label(draft.post_count.to_string());
                ui.end_row();
            });
    }
}

/// Applies a users-page row action.
pub fn apply_user_action(ctx: &mut StateCtx, action: RowAction<User>) {
    let result = match action {
        RowAction::EditRole(id, role) => edit_role(ctx, id, role),
        RowAction::ToggleBan(id) => {
            let next = ctx
                .state::<AdminTableState<User>>()
                .and_then(|s| s.table.get(id))
                .map(|u| u.status.toggled_ban());
            match next {
                Some(status) => change_status::<User>(ctx, id, status).map(|_| ()),
                None => Ok(()),
            }
        }
        other => {
            apply_row_action(ctx, other);
            Ok(())
        }
    };
    if let Err(err) = result {
        debug!("User action failed: {err}");
    }
}

fn edit_role(ctx: &mut StateCtx, id: u64, role: Role) -> Result<(), agora_states::Error> {
    let Some(mut user) = ctx
        .state::<AdminTableState<User>>()
        .and_then(|s| s.table.get(id))
        .cloned()
    else {
        return Ok(());
    };
    user.role = role;
    save_record::<User>(ctx, user).map(|_| ())
}

pub fn users_page(state: &mut State, ui: &mut Ui) {
    if let Some(action) = table_page::<User>(state, "Users", ui) {
        apply_user_action(&mut state.ctx, action);
    }
}

#[cfg(test)]
mod users_page_test {
    use super::*;
    use agora_business::seed;

    async fn loaded_state() -> State {
        let mut state = State::seeded();
        agora_business::refresh_all(&mut state.ctx).expect("inside a runtime");
        state.ctx.settle().await;
        state
    }

    fn user(state: &State, id: u64) -> User {
        state
            .ctx
            .state::<AdminTableState<User>>()
            .and_then(|s| s.table.get(id))
            .cloned()
            .expect("user loaded")
    }

    #[tokio::test]
    async fn toggling_a_ban_flips_the_status() {
        let mut state = loaded_state().await;
        let active = seed::users()
            .into_iter()
            .find(|u| u.status == UserStatus::Active)
            .expect("an active user");

        apply_user_action(&mut state.ctx, RowAction::ToggleBan(active.id));
        state.ctx.settle().await;
        assert_eq!(user(&state, active.id).status, UserStatus::Banned);

        apply_user_action(&mut state.ctx, RowAction::ToggleBan(active.id));
        state.ctx.settle().await;
        assert_eq!(user(&state, active.id).status, UserStatus::Active);
    }

    #[tokio::test]
    async fn editing_a_role_saves_the_user() {
        let mut state = loaded_state().await;
        let target = seed::users()[2].clone();
        let role = target.role.cycle_next();

        apply_user_action(&mut state.ctx, RowAction::EditRole(target.id, role));
        state.ctx.settle().await;

        let saved = user(&state, target.id);
        assert_eq!(saved.role, role);
        assert_eq!(saved.username, target.username);
    }
}
