//! In-memory provider serving the seeded placeholder data.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use tokio::sync::Mutex;

use super::{DatasetProvider, ListPage, ListRequest};
use crate::error::{ProviderError, ProviderResult};
use crate::record::Record;

#[derive(Debug)]
pub struct MemoryProvider<R: Record> {
    records: Mutex<Vec<R>>,
    failures: Mutex<VecDeque<ProviderError>>,
    latency: Option<Duration>,
}

impl<R: Record> MemoryProvider<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self {
            records: Mutex::new(records),
            failures: Mutex::new(VecDeque::new()),
            latency: None,
        }
    }

    /// Delays every call, to exercise in-flight states.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// The next call fails with `error` instead of touching the data.
    pub async fn fail_next(&self, error: ProviderError) {
        self.failures.lock().await.push_back(error);
    }

    /// Copy of the stored data, for assertions.
    pub async fn records(&self) -> Vec<R> {
        self.records.lock().await.clone()
    }

    /// Applies a change behind the console's back. Records that changed get a
    /// new version, as if another admin had saved them.
    pub async fn external_edit(&self, f: impl FnOnce(&mut Vec<R>)) {
        let mut records = self.records.lock().await;
        let before = records.clone();
        f(&mut *records);
        for record in records.iter_mut() {
            if let Some(old) = before.iter().find(|r| r.id() == record.id())
                && *old != *record
            {
                record.set_version(old.version() + 1);
            }
        }
    }

    async fn enter(&self) -> ProviderResult<()> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        match self.failures.lock().await.pop_front() {
            Some(error) => {
                debug!("{} provider: injected failure {error}", R::KIND);
                Err(error)
            }
            None => Ok(()),
        }
    }
}

fn check_version<R: Record>(stored: &R, expected: u64) -> ProviderResult<()> {
    if stored.version() == expected {
        return Ok(());
    }
    debug!(
        "{} {} is at version {}, write was based on {expected}",
        R::KIND,
        stored.id(),
        stored.version()
    );
    Err(ProviderError::conflict(R::KIND, stored.id()))
}

#[async_trait]
impl<R: Record> DatasetProvider<R> for MemoryProvider<R> {
    async fn list(&self, request: &ListRequest) -> ProviderResult<ListPage<R>> {
        self.enter().await?;
        let records = self.records.lock().await;
        let filtered = request.criteria.apply(&records);
        let total_count = filtered.len();
        let page = filtered
            .into_iter()
            .skip(request.offset())
            .take(request.page_size)
            .collect();
        Ok(ListPage {
            records: page,
            total_count,
        })
    }

    async fn get_by_id(&self, id: R::Id) -> ProviderResult<R> {
        self.enter().await?;
        self.records
            .lock()
            .await
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or_else(|| ProviderError::not_found(R::KIND, id))
    }

    async fn update(&self, record: R) -> ProviderResult<R> {
        self.enter().await?;
        record.validate().map_err(ProviderError::Validation)?;

        let id = record.id();
        let mut records = self.records.lock().await;
        let slot = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| ProviderError::not_found(R::KIND, id))?;
        check_version(slot, record.version())?;

        let mut stored = record;
        stored.set_version(slot.version() + 1);
        *slot = stored.clone();
        info!("{} {id} updated to version {}", R::KIND, stored.version());
        Ok(stored)
    }

    async fn remove(&self, id: R::Id, version: u64) -> ProviderResult<()> {
        self.enter().await?;
        let mut records = self.records.lock().await;
        let index = records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| ProviderError::not_found(R::KIND, id))?;
        check_version(&records[index], version)?;
        records.remove(index);
        info!("{} {id} deleted", R::KIND);
        Ok(())
    }

    async fn set_status(&self, id: R::Id, status: R::Status) -> ProviderResult<R> {
        self.enter().await?;
        let mut records = self.records.lock().await;
        let record = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| ProviderError::not_found(R::KIND, id))?;
        record.set_status(status);
        record.set_version(record.version() + 1);
        info!("{} {id} status set to {status}", R::KIND);
        Ok(record.clone())
    }
}
