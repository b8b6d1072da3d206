use std::any::{Any, TypeId, type_name};

use flume::Sender;
use log::{debug, warn};
use tokio_util::sync::CancellationToken;

use crate::{State, TaskId};

pub(crate) type Mutation = Box<dyn FnOnce(&mut dyn Any) + Send>;

pub(crate) struct UpdateMessage {
    pub(crate) target: TypeId,
    pub(crate) target_name: &'static str,
    pub(crate) origin: Option<TaskId>,
    pub(crate) mutation: Mutation,
}

/// Sends state changes back to the owning [`StateCtx`](crate::StateCtx).
///
/// Updates are queued and applied on the UI thread by `StateCtx::sync_computes`.
/// An updater bound to a cancelled task silently drops everything it is given.
#[derive(Clone)]
pub struct Updater {
    send: Sender<UpdateMessage>,
    origin: Option<TaskId>,
    cancel: Option<CancellationToken>,
}

impl std::fmt::Debug for Updater {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Updater")
            .field("origin", &self.origin)
            .field(
                "cancelled",
                &self.cancel.as_ref().is_some_and(|c| c.is_cancelled()),
            )
            .finish()
    }
}

impl Updater {
    pub(crate) fn new(send: Sender<UpdateMessage>) -> Self {
        Self {
            send,
            origin: None,
            cancel: None,
        }
    }

    pub(crate) fn for_task(
        send: Sender<UpdateMessage>,
        origin: TaskId,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            send,
            origin: Some(origin),
            cancel: Some(cancel),
        }
    }

    /// Replaces the stored `T` with `value`.
    pub fn set<T: State>(&self, value: T) {
        self.update::<T>(move |current| *current = value);
    }

    /// Mutates the stored `T` in place once the update is applied.
    pub fn update<T: State>(&self, f: impl FnOnce(&mut T) + Send + 'static) {
        if self.cancel.as_ref().is_some_and(|c| c.is_cancelled()) {
            debug!(
                "Dropping update for {} from cancelled task {:?}",
                type_name::<T>(),
                self.origin
            );
            return;
        }

        let mutation: Mutation = Box::new(move |any: &mut dyn Any| {
            if let Some(target) = any.downcast_mut::<T>() {
                f(target);
            }
        });

        let message = UpdateMessage {
            target: TypeId::of::<T>(),
            target_name: type_name::<T>(),
            origin: self.origin,
            mutation,
        };

        if self.send.send(message).is_err() {
            warn!(
                "StateCtx dropped before update for {} was delivered",
                type_name::<T>()
            );
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|c| c.is_cancelled())
    }
}
