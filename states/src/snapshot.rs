use std::any::{Any, TypeId};
use std::collections::BTreeMap;

use crate::{Error, State};

/// Cloned states captured when a command is dispatched.
///
/// Only states whose [`State::snapshot`] returns `Some` are captured.
#[derive(Default)]
pub struct CommandSnapshot {
    inner: BTreeMap<TypeId, Box<dyn Any + Send>>,
}

impl std::fmt::Debug for CommandSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandSnapshot")
            .field("states", &self.inner.len())
            .finish()
    }
}

impl CommandSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, id: TypeId, value: Box<dyn Any + Send>) {
        self.inner.insert(id, value);
    }

    pub fn state<T: State>(&self) -> Result<&T, Error> {
        self.inner
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<T>())
            .ok_or_else(Error::state_not_found::<T>)
    }

    /// Returns a clone of the captured `T`.
    pub fn cloned<T: State + Clone>(&self) -> Result<T, Error> {
        self.state::<T>().cloned()
    }

    pub fn contains<T: State>(&self) -> bool {
        self.inner.contains_key(&TypeId::of::<T>())
    }
}
