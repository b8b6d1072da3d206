use std::any::{Any, TypeId, type_name};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use flume::{Receiver, Sender};
use log::{debug, trace, warn};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::state::{downcast_mut, downcast_ref};
use crate::updater::UpdateMessage;
use crate::{Command, CommandSnapshot, Compute, Dep, Error, State, TaskHandle, TaskId, Updater};

/// Owner of every state, compute and command of the application.
///
/// The UI thread calls [`StateCtx::sync_computes`] once per frame: queued updates
/// from commands are applied, then computes whose dependencies changed are re-run.
pub struct StateCtx {
    states: BTreeMap<TypeId, Box<dyn State>>,
    computes: BTreeMap<TypeId, Box<dyn Compute>>,
    commands: BTreeMap<TypeId, Arc<dyn Command>>,

    send: Sender<UpdateMessage>,
    recv: Receiver<UpdateMessage>,

    // States or computes changed since the last sync.
    dirty: BTreeSet<TypeId>,
    // Computes recorded but never run.
    fresh: BTreeSet<TypeId>,

    tasks: Vec<(TaskHandle, JoinHandle<()>)>,
    latest: BTreeMap<TypeId, TaskHandle>,
    generation: u64,
}

impl Default for StateCtx {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StateCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateCtx")
            .field("states", &self.states.len())
            .field("computes", &self.computes.len())
            .field("commands", &self.commands.len())
            .field("in_flight", &self.tasks.len())
            .finish()
    }
}

impl StateCtx {
    pub fn new() -> Self {
        let (send, recv) = flume::unbounded();
        Self {
            states: BTreeMap::new(),
            computes: BTreeMap::new(),
            commands: BTreeMap::new(),
            send,
            recv,
            dirty: BTreeSet::new(),
            fresh: BTreeSet::new(),
            tasks: Vec::new(),
            latest: BTreeMap::new(),
            generation: 0,
        }
    }

    pub fn add_state<T: State>(&mut self, state: T) {
        let id = TypeId::of::<T>();
        if self.states.insert(id, Box::new(state)).is_some() {
            debug!("Replaced state {}", type_name::<T>());
        }
        self.dirty.insert(id);
    }

    pub fn record_compute<T: Compute>(&mut self, compute: T) {
        let id = TypeId::of::<T>();
        self.computes.insert(id, Box::new(compute));
        self.fresh.insert(id);
    }

    pub fn record_command<T: Command>(&mut self, command: T) {
        self.commands.insert(TypeId::of::<T>(), Arc::new(command));
    }

    pub fn state<T: State>(&self) -> Option<&T> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|boxed| downcast_ref::<T>(boxed.as_ref()))
    }

    /// Mutable access to a state. The state is treated as changed.
    pub fn state_mut<T: State>(&mut self) -> Option<&mut T> {
        let id = TypeId::of::<T>();
        let state = self
            .states
            .get_mut(&id)
            .and_then(|boxed| downcast_mut::<T>(boxed.as_mut()))?;
        self.dirty.insert(id);
        Some(state)
    }

    /// Applies `f` to the registered `T`. Returns `false` when `T` is not registered.
    pub fn update<T: State>(&mut self, f: impl FnOnce(&mut T)) -> bool {
        match self.state_mut::<T>() {
            Some(state) => {
                f(state);
                true
            }
            None => {
                warn!("update::<{}>: state not registered", type_name::<T>());
                false
            }
        }
    }

    /// Latest value of a compute.
    pub fn cached<T: Compute>(&self) -> Option<&T> {
        self.computes.get(&TypeId::of::<T>()).and_then(|boxed| {
            let any: &dyn Any = boxed.as_ref();
            any.downcast_ref::<T>()
        })
    }

    pub fn updater(&self) -> Updater {
        Updater::new(self.send.clone())
    }

    /// Spawns the recorded command `C` on the current tokio runtime.
    pub fn dispatch<C: Command>(&mut self) -> Result<TaskId, Error> {
        let command_id = TypeId::of::<C>();
        let command = self
            .commands
            .get(&command_id)
            .cloned()
            .ok_or_else(Error::command_not_found::<C>)?;
        let runtime =
            tokio::runtime::Handle::try_current().map_err(|_| Error::no_runtime::<C>())?;

        if command.latest_only()
            && let Some(previous) = self.latest.remove(&command_id)
        {
            debug!(
                "Cancelling {} generation {}",
                type_name::<C>(),
                previous.id().generation()
            );
            previous.cancel();
        }

        self.generation += 1;
        let task_id = TaskId::new(command_id, self.generation);
        let cancel = CancellationToken::new();
        let handle = TaskHandle::new(task_id, cancel.clone());

        let snapshot = self.snapshot();
        let updater = Updater::for_task(self.send.clone(), task_id, cancel.clone());
        let future = command.run(snapshot, updater, cancel);

        debug!(
            "Dispatching {} generation {}",
            type_name::<C>(),
            task_id.generation()
        );
        let join = runtime.spawn(future);
        if command.latest_only() {
            self.latest.insert(command_id, handle.clone());
        }
        self.tasks.push((handle, join));

        Ok(task_id)
    }

    fn snapshot(&self) -> CommandSnapshot {
        let mut snapshot = CommandSnapshot::new();
        for (id, state) in &self.states {
            if let Some(cloned) = state.snapshot() {
                snapshot.insert(*id, cloned);
            }
        }
        snapshot
    }

    /// Number of dispatched commands that have not finished yet.
    pub fn in_flight(&self) -> usize {
        self.tasks
            .iter()
            .filter(|(_, join)| !join.is_finished())
            .count()
    }

    pub fn cancel_all(&mut self) {
        for (handle, _) in &self.tasks {
            handle.cancel();
        }
        self.latest.clear();
    }

    /// Applies queued updates, then re-runs computes whose dependencies changed.
    pub fn sync_computes(&mut self) {
        self.tasks.retain(|(_, join)| !join.is_finished());
        self.apply_updates();

        let stale: Vec<TypeId> = self
            .computes
            .iter()
            .filter(|(id, compute)| {
                self.fresh.contains(*id)
                    || compute.deps().iter().any(|d| self.dirty.contains(d))
            })
            .map(|(id, _)| *id)
            .collect();

        if !stale.is_empty() {
            let updater = self.updater();
            for id in &stale {
                if let Some(compute) = self.computes.get(id) {
                    compute.compute(Dep::new(&self.states), updater.clone());
                }
            }
            self.fresh.clear();
            self.apply_updates();
        }

        self.dirty.clear();
    }

    /// Awaits every in-flight command, then syncs. Mostly useful in tests.
    pub async fn settle(&mut self) {
        while !self.tasks.is_empty() {
            let tasks = std::mem::take(&mut self.tasks);
            for (handle, join) in tasks {
                if let Err(err) = join.await {
                    warn!("Task {:?} failed: {err}", handle.id());
                }
            }
        }
        self.sync_computes();
    }

    fn apply_updates(&mut self) {
        let messages: Vec<UpdateMessage> = self.recv.try_iter().collect();
        for message in messages {
            trace!(
                "Applying update for {} from {:?}",
                message.target_name, message.origin
            );

            let target: Option<&mut dyn Any> =
                if let Some(state) = self.states.get_mut(&message.target) {
                    let any: &mut dyn Any = state.as_mut();
                    Some(any)
                } else if let Some(compute) = self.computes.get_mut(&message.target) {
                    let any: &mut dyn Any = compute.as_mut();
                    Some(any)
                } else {
                    None
                };

            match target {
                Some(target) => {
                    (message.mutation)(target);
                    self.dirty.insert(message.target);
                }
                None => warn!(
                    "Dropping update for unregistered {}",
                    message.target_name
                ),
            }
        }
    }
}
