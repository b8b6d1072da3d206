use std::fmt::Display;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::record::EntityKind;

/// A single field constraint violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Field constraint violations of an edited record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn for_field(&self, field: &str) -> impl Iterator<Item = &str> {
        self.errors
            .iter()
            .filter(move |e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// `Ok(())` when nothing was collected.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for error in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
            first = false;
        }
        Ok(())
    }
}

/// Failure reported by a dataset provider.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: String },
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),
    #[error("{kind} {id} was changed by someone else")]
    Conflict { kind: EntityKind, id: String },
    #[error("provider unreachable: {0}")]
    Transport(String),
}

/// How the console reacts to a failed provider call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Keep the detail modal open and show the errors next to the fields.
    ShowInline,
    /// Force-close the detail modal and reload the list from the provider.
    CloseAndResync,
    /// Show a dismissible notification; local state stays as it was.
    Notify,
}

impl ProviderError {
    pub fn not_found(kind: EntityKind, id: impl Display) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn conflict(kind: EntityKind, id: impl Display) -> Self {
        Self::Conflict {
            kind,
            id: id.to_string(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            ProviderError::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    pub fn recovery(&self) -> Recovery {
        match self {
            ProviderError::Validation(_) => Recovery::ShowInline,
            ProviderError::NotFound { .. } | ProviderError::Conflict { .. } => {
                Recovery::CloseAndResync
            }
            ProviderError::Transport(_) => Recovery::Notify,
        }
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovery_follows_error_kind() {
        assert_eq!(
            ProviderError::Validation(ValidationErrors::new()).recovery(),
            Recovery::ShowInline
        );
        assert_eq!(
            ProviderError::not_found(EntityKind::User, 4).recovery(),
            Recovery::CloseAndResync
        );
        assert_eq!(
            ProviderError::conflict(EntityKind::Comment, 9).recovery(),
            Recovery::CloseAndResync
        );
        assert_eq!(
            ProviderError::transport("connection refused").recovery(),
            Recovery::Notify
        );
    }

    #[test]
    fn validation_errors_display_and_lookup() {
        let mut errors = ValidationErrors::new();
        errors.push("username", "must not be empty");
        errors.push("email", "must contain @");

        assert_eq!(
            errors.to_string(),
            "username: must not be empty; email: must contain @"
        );
        assert_eq!(
            errors.for_field("email").collect::<Vec<_>>(),
            vec!["must contain @"]
        );
        assert!(errors.into_result().is_err());
        assert!(ValidationErrors::new().into_result().is_ok());
    }

    #[test]
    fn not_found_message_names_the_entity() {
        let err = ProviderError::not_found(EntityKind::Post, 12);
        assert_eq!(err.to_string(), "Post 12 not found");
    }
}
