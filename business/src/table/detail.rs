//! Detail modal state machine: `Closed | Open(view)`.
//!
//! Only one record is ever open. Opening while open replaces the held record.

use crate::error::ValidationErrors;
use crate::record::Record;

/// The record shown in an open detail modal.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView<R: Record> {
    original: R,
    pub draft: R,
    errors: ValidationErrors,
    saving: bool,
}

impl<R: Record> DetailView<R> {
    fn new(record: R) -> Self {
        Self {
            draft: record.clone(),
            original: record,
            errors: ValidationErrors::new(),
            saving: false,
        }
    }

    pub fn id(&self) -> R::Id {
        self.original.id()
    }

    pub fn original(&self) -> &R {
        &self.original
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn is_dirty(&self) -> bool {
        self.draft != self.original
    }

    /// Throws away unsaved edits.
    pub fn revert(&mut self) {
        self.draft = self.original.clone();
        self.errors = ValidationErrors::new();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailModal<R: Record> {
    Closed,
    Open(DetailView<R>),
}

impl<R: Record> Default for DetailModal<R> {
    fn default() -> Self {
        DetailModal::Closed
    }
}

impl<R: Record> DetailModal<R> {
    pub fn open(&mut self, record: R) {
        *self = DetailModal::Open(DetailView::new(record));
    }

    pub fn close(&mut self) {
        *self = DetailModal::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self, DetailModal::Open(_))
    }

    pub fn view(&self) -> Option<&DetailView<R>> {
        match self {
            DetailModal::Open(view) => Some(view),
            DetailModal::Closed => None,
        }
    }

    pub fn view_mut(&mut self) -> Option<&mut DetailView<R>> {
        match self {
            DetailModal::Open(view) => Some(view),
            DetailModal::Closed => None,
        }
    }

    pub fn open_id(&self) -> Option<R::Id> {
        self.view().map(DetailView::id)
    }

    pub fn holds(&self, id: R::Id) -> bool {
        self.open_id() == Some(id)
    }

    /// Validates the draft. On success the draft is returned for saving and
    /// the modal is marked as saving; on failure the errors stay inline.
    pub fn submit(&mut self) -> Option<Result<R, ValidationErrors>> {
        let view = self.view_mut()?;
        match view.draft.validate() {
            Ok(()) => {
                view.errors = ValidationErrors::new();
                view.saving = true;
                Some(Ok(view.draft.clone()))
            }
            Err(errors) => {
                view.errors = errors.clone();
                view.saving = false;
                Some(Err(errors))
            }
        }
    }

    /// Shows errors reported for the record `id`, if it is still open.
    pub fn show_errors(&mut self, id: R::Id, errors: ValidationErrors) {
        if let Some(view) = self.view_mut()
            && view.id() == id
        {
            view.errors = errors;
            view.saving = false;
        }
    }

    /// Leaves the saving state after a failed call, keeping the draft.
    pub fn stop_saving(&mut self, id: R::Id) {
        if let Some(view) = self.view_mut()
            && view.id() == id
        {
            view.saving = false;
        }
    }

    /// Re-bases the open view on a fresher copy of the same record.
    pub fn refresh(&mut self, record: R) {
        if let Some(view) = self.view_mut()
            && view.id() == record.id()
        {
            let edited = view.is_dirty();
            view.original = record.clone();
            if !edited {
                view.draft = record;
            }
        }
    }
}
