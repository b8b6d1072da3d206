use std::any::TypeId;

use crate::{Dep, State, Updater};

/// A state derived from other states.
///
/// `compute` runs on the UI thread during `StateCtx::sync_computes` whenever one
/// of `deps()` changed, and publishes its new value through the updater.
/// Computes must not perform IO; use a [`Command`](crate::Command) for that.
pub trait Compute: State {
    fn deps(&self) -> Vec<TypeId>;

    fn compute(&self, deps: Dep<'_>, updater: Updater);
}
