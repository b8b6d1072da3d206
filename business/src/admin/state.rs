use std::any::Any;
use std::fmt;
use std::sync::Arc;

use agora_states::State;

use crate::provider::DatasetProvider;
use crate::record::Record;
use crate::table::DataTable;

/// Everything a page shows for one entity type.
#[derive(Debug, Clone)]
pub struct AdminTableState<R: Record> {
    pub table: DataTable<R>,
    loading: bool,
    loaded: bool,
    last_error: Option<String>,
}

impl<R: Record> AdminTableState<R> {
    pub fn new(page_size: usize) -> Self {
        Self {
            table: DataTable::new(page_size),
            loading: false,
            loaded: false,
            last_error: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// `true` once a listing has succeeded at least once.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn start_loading(&mut self) {
        self.loading = true;
    }

    pub fn finish_loading(&mut self, records: Vec<R>) {
        self.table.load(records);
        self.loading = false;
        self.loaded = true;
        self.last_error = None;
    }

    pub fn fail_loading(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.last_error = Some(message.into());
    }
}

impl<R: Record> State for AdminTableState<R> {}

/// The dataset provider injected for one entity type.
pub struct ProviderState<R: Record> {
    provider: Arc<dyn DatasetProvider<R>>,
}

impl<R: Record> ProviderState<R> {
    pub fn new(provider: Arc<dyn DatasetProvider<R>>) -> Self {
        Self { provider }
    }

    pub fn get(&self) -> &dyn DatasetProvider<R> {
        self.provider.as_ref()
    }
}

impl<R: Record> Clone for ProviderState<R> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
        }
    }
}

impl<R: Record> fmt::Debug for ProviderState<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderState")
            .field("kind", &R::KIND)
            .finish_non_exhaustive()
    }
}

impl<R: Record> State for ProviderState<R> {
    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }
}

/// Arguments of the next table command, written right before dispatch.
#[derive(Debug, Clone)]
pub struct TableActionInput<R: Record> {
    pub save: Option<R>,
    /// Confirmed id and the version the user saw.
    pub delete: Option<(R::Id, u64)>,
    pub status: Option<(R::Id, R::Status)>,
    pub detail: Option<R::Id>,
}

impl<R: Record> Default for TableActionInput<R> {
    fn default() -> Self {
        Self {
            save: None,
            delete: None,
            status: None,
            detail: None,
        }
    }
}

impl<R: Record> State for TableActionInput<R> {
    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }
}
