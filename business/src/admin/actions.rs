//! Gestures of an admin page, expressed against the [`StateCtx`].
//!
//! Local view transitions go through `ctx.update`; provider IO goes through
//! the commands in [`super::commands`].

use std::sync::Arc;

use agora_states::{Error, StateCtx, TaskId};
use log::{debug, error};

use super::commands::{
    DeleteRecordCommand, RefreshDetailCommand, RefreshTableCommand, SaveRecordCommand,
    SetStatusCommand,
};
use super::{AdminTableState, Notifications, ProviderState, TableActionInput};
use crate::provider::DatasetProvider;
use crate::record::Record;
use crate::table::FilterChoice;

/// Registers the states and commands of one entity table.
pub fn register_table<R: Record>(
    ctx: &mut StateCtx,
    provider: Arc<dyn DatasetProvider<R>>,
    page_size: usize,
) {
    ctx.add_state(AdminTableState::<R>::new(page_size));
    ctx.add_state(ProviderState::new(provider));
    ctx.add_state(TableActionInput::<R>::default());
    ctx.record_command(RefreshTableCommand::<R>::default());
    ctx.record_command(SaveRecordCommand::<R>::default());
    ctx.record_command(DeleteRecordCommand::<R>::default());
    ctx.record_command(SetStatusCommand::<R>::default());
    ctx.record_command(RefreshDetailCommand::<R>::default());
}

fn report(ctx: &mut StateCtx, err: &Error) {
    error!("{err}");
    let message = err.to_string();
    ctx.update::<Notifications>(|n| {
        n.error(message);
    });
}

pub fn refresh_table<R: Record>(ctx: &mut StateCtx) -> Result<TaskId, Error> {
    ctx.update::<AdminTableState<R>>(AdminTableState::start_loading);
    ctx.dispatch::<RefreshTableCommand<R>>().inspect_err(|err| {
        ctx.update::<AdminTableState<R>>(|s| s.fail_loading(err.to_string()));
    })
}

pub fn set_query<R: Record>(ctx: &mut StateCtx, query: &str) {
    ctx.update::<AdminTableState<R>>(|s| s.table.set_query(query));
}

pub fn set_filter<R: Record>(ctx: &mut StateCtx, name: &str, choice: FilterChoice) {
    ctx.update::<AdminTableState<R>>(|s| s.table.set_filter(name, choice));
}

pub fn clear_criteria<R: Record>(ctx: &mut StateCtx) {
    ctx.update::<AdminTableState<R>>(|s| s.table.clear_criteria());
}

pub fn go_to_page<R: Record>(ctx: &mut StateCtx, page: usize) -> bool {
    let mut moved = false;
    ctx.update::<AdminTableState<R>>(|s| moved = s.table.go_to_page(page));
    moved
}

pub fn open_details<R: Record>(ctx: &mut StateCtx, id: R::Id) -> bool {
    let mut opened = false;
    ctx.update::<AdminTableState<R>>(|s| opened = s.table.view(id));
    opened
}

pub fn close_details<R: Record>(ctx: &mut StateCtx) {
    ctx.update::<AdminTableState<R>>(|s| s.table.close_modal());
}

/// Validates the open draft and, when valid, dispatches the save.
///
/// Returns `Ok(None)` when nothing was dispatched: no modal is open or the
/// draft failed local validation (errors are then shown inline).
pub fn submit_details<R: Record>(ctx: &mut StateCtx) -> Result<Option<TaskId>, Error> {
    let mut submitted = None;
    ctx.update::<AdminTableState<R>>(|s| {
        if let Some(Ok(draft)) = s.table.modal_mut().submit() {
            s.table.mark_in_flight(draft.id());
            submitted = Some(draft);
        }
    });
    let Some(draft) = submitted else {
        debug!("{} draft not submitted", R::KIND);
        return Ok(None);
    };

    let id = draft.id();
    ctx.update::<TableActionInput<R>>(|input| input.save = Some(draft));
    dispatch_for::<R, SaveRecordCommand<R>>(ctx, id).map(Some)
}

/// Saves `record` straight from a row, without going through the detail modal.
///
/// A record failing local validation is not sent; a warning is pushed instead.
pub fn save_record<R: Record>(ctx: &mut StateCtx, record: R) -> Result<Option<TaskId>, Error> {
    let id = record.id();
    if let Err(errors) = record.validate() {
        debug!("{} {id} rejected locally: {errors}", R::KIND);
        ctx.update::<Notifications>(|n| {
            n.warning(format!("{} {id} was not saved: {errors}", R::KIND));
        });
        return Ok(None);
    }
    ctx.update::<AdminTableState<R>>(|s| s.table.mark_in_flight(id));
    ctx.update::<TableActionInput<R>>(|input| input.save = Some(record));
    dispatch_for::<R, SaveRecordCommand<R>>(ctx, id).map(Some)
}

pub fn change_status<R: Record>(
    ctx: &mut StateCtx,
    id: R::Id,
    status: R::Status,
) -> Result<TaskId, Error> {
    ctx.update::<AdminTableState<R>>(|s| s.table.mark_in_flight(id));
    ctx.update::<TableActionInput<R>>(|input| input.status = Some((id, status)));
    dispatch_for::<R, SetStatusCommand<R>>(ctx, id)
}

/// Moves `id` to the next status in declaration order.
pub fn cycle_status<R: Record>(ctx: &mut StateCtx, id: R::Id) -> Result<Option<TaskId>, Error> {
    let next = ctx
        .state::<AdminTableState<R>>()
        .and_then(|s| s.table.next_status(id));
    match next {
        Some(status) => change_status::<R>(ctx, id, status).map(Some),
        None => Ok(None),
    }
}

pub fn request_delete<R: Record>(ctx: &mut StateCtx, id: R::Id) -> bool {
    let mut requested = false;
    ctx.update::<AdminTableState<R>>(|s| requested = s.table.request_delete(id));
    requested
}

pub fn cancel_delete<R: Record>(ctx: &mut StateCtx) {
    ctx.update::<AdminTableState<R>>(|s| s.table.cancel_delete());
}

/// Dispatches the delete the user confirmed. Without a pending confirmation nothing happens.
pub fn confirm_delete<R: Record>(ctx: &mut StateCtx) -> Result<Option<TaskId>, Error> {
    let mut confirmed = None;
    ctx.update::<AdminTableState<R>>(|s| {
        confirmed = s
            .table
            .confirm_delete()
            .and_then(|id| s.table.get(id).map(|r| (id, r.version())));
        if let Some((id, _)) = confirmed {
            s.table.mark_in_flight(id);
        }
    });
    let Some((id, version)) = confirmed else {
        return Ok(None);
    };

    ctx.update::<TableActionInput<R>>(|input| input.delete = Some((id, version)));
    let dispatched = dispatch_for::<R, DeleteRecordCommand<R>>(ctx, id);
    // The confirmation is single use.
    ctx.update::<TableActionInput<R>>(|input| input.delete = None);
    dispatched.map(Some)
}

pub fn refresh_details<R: Record>(ctx: &mut StateCtx) -> Result<Option<TaskId>, Error> {
    let Some(id) = ctx
        .state::<AdminTableState<R>>()
        .and_then(|s| s.table.modal().open_id())
    else {
        return Ok(None);
    };
    ctx.update::<AdminTableState<R>>(|s| s.table.mark_in_flight(id));
    ctx.update::<TableActionInput<R>>(|input| input.detail = Some(id));
    dispatch_for::<R, RefreshDetailCommand<R>>(ctx, id).map(Some)
}

fn dispatch_for<R: Record, C: agora_states::Command>(
    ctx: &mut StateCtx,
    id: R::Id,
) -> Result<TaskId, Error> {
    ctx.dispatch::<C>().inspect_err(|err| {
        ctx.update::<AdminTableState<R>>(|s| {
            s.table.clear_in_flight(id);
            s.table.modal_mut().stop_saving(id);
        });
        report(ctx, err);
    })
}
