use std::any::Any;

/// A value owned by [`StateCtx`](crate::StateCtx).
///
/// States are read by the UI every frame and mutated either directly through
/// `StateCtx::update` or asynchronously by commands through an [`Updater`](crate::Updater).
pub trait State: Any + Send {
    /// Clone of this state handed to commands.
    ///
    /// Returning `None` keeps the state out of [`CommandSnapshot`](crate::CommandSnapshot)s.
    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        None
    }
}

/// Downcasts a stored state to its concrete type.
pub(crate) fn downcast_ref<T: State>(state: &dyn State) -> Option<&T> {
    let any: &dyn Any = state;
    any.downcast_ref::<T>()
}

pub(crate) fn downcast_mut<T: State>(state: &mut dyn State) -> Option<&mut T> {
    let any: &mut dyn Any = state;
    any.downcast_mut::<T>()
}
