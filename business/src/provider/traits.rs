use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderResult;
use crate::record::Record;
use crate::table::Criteria;

/// One page of a filtered listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ListRequest {
    pub criteria: Criteria,
    /// 1-based.
    pub page: usize,
    pub page_size: usize,
}

impl ListRequest {
    pub fn new(criteria: Criteria, page: usize, page_size: usize) -> Self {
        Self {
            criteria,
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    /// Offset of the first record of the requested page.
    pub fn offset(&self) -> usize {
        (self.page.max(1) - 1) * self.page_size
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPage<R> {
    pub records: Vec<R>,
    /// Size of the whole filtered set, not of this page.
    pub total_count: usize,
}

/// Source of truth for one entity type.
///
/// Every mutation returns the record as the provider stored it; the console
/// applies that value locally only after the call succeeded. Writes carry the
/// [`Record::version`] they were based on and fail with
/// [`ProviderError::Conflict`](crate::error::ProviderError::Conflict) when the
/// stored copy has moved on.
#[async_trait]
pub trait DatasetProvider<R: Record>: Send + Sync {
    async fn list(&self, request: &ListRequest) -> ProviderResult<ListPage<R>>;

    async fn get_by_id(&self, id: R::Id) -> ProviderResult<R>;

    async fn update(&self, record: R) -> ProviderResult<R>;

    async fn remove(&self, id: R::Id, version: u64) -> ProviderResult<()>;

    async fn set_status(&self, id: R::Id, status: R::Status) -> ProviderResult<R>;
}
