use std::any::TypeId;
use std::collections::BTreeMap;

use crate::state::downcast_ref;
use crate::{Error, State};

/// Read-only view over registered states, handed to computes.
pub struct Dep<'a> {
    states: &'a BTreeMap<TypeId, Box<dyn State>>,
}

impl<'a> Dep<'a> {
    pub(crate) fn new(states: &'a BTreeMap<TypeId, Box<dyn State>>) -> Self {
        Self { states }
    }

    pub fn state<T: State>(&self) -> Result<&'a T, Error> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|boxed| downcast_ref::<T>(boxed.as_ref()))
            .ok_or_else(Error::state_not_found::<T>)
    }
}
