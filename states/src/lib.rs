//! State runtime shared by the admin console crates.
//!
//! - [`State`]: plain values owned by [`StateCtx`].
//! - [`Compute`]: states derived from other states, refreshed on the UI thread.
//! - [`Command`]: manual-only async work (provider IO) reporting back via [`Updater`].

mod basic_state;
mod command;
mod compute;
mod ctx;
mod dep;
mod error;
mod snapshot;
mod state;
mod task;
mod updater;

pub use basic_state::Time;
pub use command::{Command, CommandFuture};
pub use compute::Compute;
pub use ctx::StateCtx;
pub use dep::Dep;
pub use error::Error;
pub use snapshot::CommandSnapshot;
pub use state::State;
pub use task::{TaskHandle, TaskId};
pub use updater::Updater;
