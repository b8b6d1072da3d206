//! Identifiers and handles for commands running on the tokio runtime.
//!
//! - `TaskId`: the command's `TypeId` plus a generation counter.
//! - `TaskHandle`: a `TaskId` paired with the `CancellationToken` handed to the command.
//!
//! Cancellation is cooperative: the command observes the token, and any
//! [`Updater`](crate::Updater) bound to a cancelled token stops delivering updates.

use std::any::TypeId;

use tokio_util::sync::CancellationToken;

/// Unique identifier for a dispatched command.
///
/// Generations grow monotonically per [`StateCtx`](crate::StateCtx), so a higher
/// generation always means a more recent dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId {
    type_id: TypeId,
    generation: u64,
}

impl TaskId {
    pub fn new(type_id: TypeId, generation: u64) -> Self {
        Self {
            type_id,
            generation,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Handle to a dispatched command.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    id: TaskId,
    cancel_token: CancellationToken,
}

impl TaskHandle {
    pub fn new(id: TaskId, cancel_token: CancellationToken) -> Self {
        Self { id, cancel_token }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Requests cancellation. The command stops at its next check point.
    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_id_equality_uses_type_and_generation() {
        let type_id = TypeId::of::<String>();

        let id1 = TaskId::new(type_id, 1);
        let id2 = TaskId::new(type_id, 1);
        let id3 = TaskId::new(type_id, 2);
        let id4 = TaskId::new(TypeId::of::<i32>(), 1);

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
        assert_ne!(id1, id4);
        assert_eq!(id3.generation(), 2);
        assert_eq!(id4.type_id(), TypeId::of::<i32>());
    }

    #[test]
    fn cloned_handles_share_the_token() {
        let handle1 = TaskHandle::new(
            TaskId::new(TypeId::of::<String>(), 1),
            CancellationToken::new(),
        );
        let handle2 = handle1.clone();
        let token = handle1.cancellation_token();

        assert!(!handle2.is_cancelled());
        handle1.cancel();

        assert!(handle2.is_cancelled());
        assert!(token.is_cancelled());
    }
}
