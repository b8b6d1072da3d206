use std::any::type_name;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("State not found: {name}")]
    StateNotFound { name: &'static str },
    #[error("Command not found: {name}")]
    CommandNotFound { name: &'static str },
    #[error("No tokio runtime to run command {name}")]
    NoRuntime { name: &'static str },
}

impl Error {
    pub fn state_not_found<T: ?Sized>() -> Self {
        Self::StateNotFound {
            name: type_name::<T>(),
        }
    }

    pub fn command_not_found<T: ?Sized>() -> Self {
        Self::CommandNotFound {
            name: type_name::<T>(),
        }
    }

    pub fn no_runtime<T: ?Sized>() -> Self {
        Self::NoRuntime {
            name: type_name::<T>(),
        }
    }
}
