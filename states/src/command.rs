use std::any::Any;
use std::future::Future;
use std::pin::Pin;

use tokio_util::sync::CancellationToken;

use crate::{CommandSnapshot, Updater};

pub type CommandFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Manual-only unit of work, usually IO.
///
/// Dispatch with `ctx.dispatch::<C>()`. The command reads its inputs from the
/// snapshot taken at dispatch time and reports back only through the updater.
pub trait Command: Any + Send + Sync {
    /// When `true`, dispatching cancels the previous in-flight run of this command.
    fn latest_only(&self) -> bool {
        false
    }

    fn run(
        &self,
        snap: CommandSnapshot,
        updater: Updater,
        cancel: CancellationToken,
    ) -> CommandFuture;
}
