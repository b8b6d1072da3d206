//! Provider calls run as commands.
//!
//! Every command reads its arguments from [`TableActionInput`] in the snapshot
//! taken at dispatch time and touches [`AdminTableState`] only once the
//! provider call resolved. Failures are handled according to
//! [`ProviderError::recovery`].

use std::marker::PhantomData;

use agora_states::{Command, CommandFuture, CommandSnapshot, Updater};
use log::{debug, error, info, warn};
use tokio_util::sync::CancellationToken;

use super::{AdminTableState, Notifications, ProviderState, TableActionInput};
use crate::config::AdminConfig;
use crate::error::{ProviderError, ProviderResult, Recovery};
use crate::provider::{DatasetProvider, ListRequest};
use crate::record::Record;
use crate::table::Criteria;

const DEFAULT_FETCH_BATCH: usize = 100;

/// Pulls the whole dataset page by page. `Ok(None)` means the run was cancelled.
pub async fn fetch_all<R: Record>(
    provider: &dyn DatasetProvider<R>,
    batch: usize,
    cancel: &CancellationToken,
) -> ProviderResult<Option<Vec<R>>> {
    let mut records = Vec::new();
    let mut page = 1;
    loop {
        let request = ListRequest::new(Criteria::default(), page, batch);
        let listed = tokio::select! {
            _ = cancel.cancelled() => return Ok(None),
            listed = provider.list(&request) => listed?,
        };

        let received = listed.records.len();
        records.extend(listed.records);
        if received == 0 || records.len() >= listed.total_count {
            break;
        }
        page += 1;
    }
    debug!("Fetched {} {} records", records.len(), R::KIND);
    Ok(Some(records))
}

struct Deps<R: Record> {
    provider: ProviderState<R>,
    batch: usize,
}

impl<R: Record> Deps<R> {
    fn from_snapshot(snap: &CommandSnapshot, updater: &Updater) -> Option<Self> {
        let batch = snap
            .state::<AdminConfig>()
            .map(AdminConfig::fetch_batch)
            .unwrap_or(DEFAULT_FETCH_BATCH);
        match snap.cloned::<ProviderState<R>>() {
            Ok(provider) => Some(Self { provider, batch }),
            Err(err) => {
                error!("{} command without provider: {err}", R::KIND);
                updater.update::<AdminTableState<R>>(move |s| s.fail_loading(err.to_string()));
                None
            }
        }
    }

    async fn resync(&self, updater: &Updater, cancel: &CancellationToken) {
        updater.update::<AdminTableState<R>>(AdminTableState::start_loading);
        match fetch_all(self.provider.get(), self.batch, cancel).await {
            Ok(Some(records)) => {
                updater.update::<AdminTableState<R>>(move |s| s.finish_loading(records));
            }
            Ok(None) => debug!("{} resync cancelled", R::KIND),
            Err(err) => {
                let message = err.to_string();
                updater.update::<AdminTableState<R>>({
                    let message = message.clone();
                    move |s| s.fail_loading(message)
                });
                updater.update::<Notifications>(move |n| {
                    n.error(format!("Could not reload {}s: {message}", R::KIND));
                });
            }
        }
    }

    /// Applies the recovery policy for a failed call on `id`.
    async fn recover(
        &self,
        id: R::Id,
        err: ProviderError,
        updater: &Updater,
        cancel: &CancellationToken,
    ) {
        warn!("{} {id}: {err}", R::KIND);
        match err.recovery() {
            Recovery::ShowInline => {
                let errors = err.validation_errors().cloned().unwrap_or_default();
                updater.update::<AdminTableState<R>>(move |s| {
                    s.table.clear_in_flight(id);
                    s.table.modal_mut().show_errors(id, errors);
                });
            }
            Recovery::CloseAndResync => {
                updater.update::<AdminTableState<R>>(move |s| {
                    s.table.clear_in_flight(id);
                    if s.table.modal().holds(id) {
                        s.table.close_modal();
                    }
                });
                let message = format!("{err}. The list was reloaded.");
                updater.update::<Notifications>(move |n| {
                    n.warning(message);
                });
                self.resync(updater, cancel).await;
            }
            Recovery::Notify => {
                updater.update::<AdminTableState<R>>(move |s| {
                    s.table.clear_in_flight(id);
                    s.table.modal_mut().stop_saving(id);
                });
                let message = err.to_string();
                updater.update::<Notifications>(move |n| {
                    n.error(message);
                });
            }
        }
    }
}

fn input<R: Record>(snap: &CommandSnapshot) -> TableActionInput<R> {
    snap.cloned::<TableActionInput<R>>().unwrap_or_default()
}

macro_rules! table_command {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        pub struct $name<R>(PhantomData<fn() -> R>);

        impl<R> Default for $name<R> {
            fn default() -> Self {
                Self(PhantomData)
            }
        }
    };
}

table_command!(
    /// Reloads the full dataset into the table. A new run cancels the previous one.
    RefreshTableCommand
);

impl<R: Record> Command for RefreshTableCommand<R> {
    fn latest_only(&self) -> bool {
        true
    }

    fn run(
        &self,
        snap: CommandSnapshot,
        updater: Updater,
        cancel: CancellationToken,
    ) -> CommandFuture {
        let deps = Deps::<R>::from_snapshot(&snap, &updater);
        Box::pin(async move {
            let Some(deps) = deps else {
                return;
            };
            deps.resync(&updater, &cancel).await;
        })
    }
}

table_command!(
    /// Saves the edited record from the detail modal.
    SaveRecordCommand
);

impl<R: Record> Command for SaveRecordCommand<R> {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: Updater,
        cancel: CancellationToken,
    ) -> CommandFuture {
        let deps = Deps::<R>::from_snapshot(&snap, &updater);
        let record = input::<R>(&snap).save;
        Box::pin(async move {
            let (Some(deps), Some(record)) = (deps, record) else {
                warn!("{} save dispatched without a record", R::KIND);
                return;
            };
            let id = record.id();
            match deps.provider.get().update(record).await {
                Ok(saved) => {
                    info!("{} {id} saved", R::KIND);
                    updater.update::<AdminTableState<R>>(move |s| {
                        s.table.replace(saved);
                    });
                }
                Err(err) => deps.recover(id, err, &updater, &cancel).await,
            }
        })
    }
}

table_command!(
    /// Deletes the record whose deletion was confirmed.
    DeleteRecordCommand
);

impl<R: Record> Command for DeleteRecordCommand<R> {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: Updater,
        cancel: CancellationToken,
    ) -> CommandFuture {
        let deps = Deps::<R>::from_snapshot(&snap, &updater);
        let confirmed = input::<R>(&snap).delete;
        Box::pin(async move {
            let Some(deps) = deps else {
                return;
            };
            let Some((id, version)) = confirmed else {
                warn!("Refusing to delete a {} without confirmation", R::KIND);
                return;
            };
            match deps.provider.get().remove(id, version).await {
                Ok(()) => {
                    updater.update::<AdminTableState<R>>(move |s| {
                        s.table.remove(id);
                    });
                    updater.update::<Notifications>(move |n| {
                        n.info(format!("{} {id} deleted", R::KIND));
                    });
                }
                Err(err) => deps.recover(id, err, &updater, &cancel).await,
            }
        })
    }
}

table_command!(
    /// Moves a record to another status.
    SetStatusCommand
);

impl<R: Record> Command for SetStatusCommand<R> {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: Updater,
        cancel: CancellationToken,
    ) -> CommandFuture {
        let deps = Deps::<R>::from_snapshot(&snap, &updater);
        let change = input::<R>(&snap).status;
        Box::pin(async move {
            let (Some(deps), Some((id, status))) = (deps, change) else {
                warn!("{} status change dispatched without a target", R::KIND);
                return;
            };
            match deps.provider.get().set_status(id, status).await {
                Ok(stored) => {
                    let (status, version) = (stored.status(), stored.version());
                    updater.update::<AdminTableState<R>>(move |s| {
                        s.table.set_status(id, status);
                        s.table.set_version(id, version);
                    });
                }
                Err(err) => deps.recover(id, err, &updater, &cancel).await,
            }
        })
    }
}

table_command!(
    /// Re-reads the record open in the detail modal.
    RefreshDetailCommand
);

impl<R: Record> Command for RefreshDetailCommand<R> {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: Updater,
        cancel: CancellationToken,
    ) -> CommandFuture {
        let deps = Deps::<R>::from_snapshot(&snap, &updater);
        let target = input::<R>(&snap).detail;
        Box::pin(async move {
            let (Some(deps), Some(id)) = (deps, target) else {
                return;
            };
            match deps.provider.get().get_by_id(id).await {
                Ok(fresh) => {
                    updater.update::<AdminTableState<R>>(move |s| {
                        s.table.clear_in_flight(id);
                        s.table.modal_mut().refresh(fresh);
                    });
                }
                Err(err) => deps.recover(id, err, &updater, &cancel).await,
            }
        })
    }
}
