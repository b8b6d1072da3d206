//! Generic admin table controller.
//!
//! Holds the dataset cache, the filtered view derived from it, pagination, the
//! detail modal and the pending delete confirmation. All transitions are
//! synchronous; provider IO happens in commands which call back into
//! [`DataTable::replace`], [`DataTable::remove`] and [`DataTable::set_status`]
//! once a call has resolved.

use std::collections::{BTreeMap, HashSet};

use log::debug;

use super::{Criteria, DetailModal, FilterChoice, Paginator};
use crate::record::{Record, StatusEnum};

#[derive(Debug, Clone)]
pub struct DataTable<R: Record> {
    records: Vec<R>,
    filtered: Vec<R>,
    criteria: Criteria,
    paginator: Paginator,
    modal: DetailModal<R>,
    pending_delete: Option<R::Id>,
    in_flight: HashSet<R::Id>,
}

impl<R: Record> DataTable<R> {
    pub fn new(page_size: usize) -> Self {
        Self {
            records: Vec::new(),
            filtered: Vec::new(),
            criteria: Criteria::default(),
            paginator: Paginator::new(page_size),
            modal: DetailModal::Closed,
            pending_delete: None,
            in_flight: HashSet::new(),
        }
    }

    pub fn with_records(records: Vec<R>, page_size: usize) -> Self {
        let mut table = Self::new(page_size);
        table.load(records);
        table
    }

    /// Replaces the dataset cache (initial load or resync).
    ///
    /// The current criteria are re-applied and pagination goes back to page 1.
    pub fn load(&mut self, records: Vec<R>) {
        self.records = records;
        self.refilter();

        if let Some(id) = self.pending_delete
            && !self.contains(id)
        {
            self.pending_delete = None;
        }
        self.in_flight.retain(|id| self.records.iter().any(|r| r.id() == *id));
    }

    /// Re-derives the filtered view. An open modal whose record left the view
    /// is closed; otherwise it is re-based on the fresh copy.
    fn refilter(&mut self) {
        self.filtered = self.criteria.apply(&self.records);
        self.paginator.reset(self.filtered.len());

        if let Some(id) = self.modal.open_id() {
            match self.filtered.iter().find(|r| r.id() == id) {
                Some(fresh) => self.modal.refresh(fresh.clone()),
                None => self.modal.close(),
            }
        }
        debug!(
            "{} table: {} of {} records match",
            R::KIND,
            self.filtered.len(),
            self.records.len()
        );
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn filtered(&self) -> &[R] {
        &self.filtered
    }

    /// The current page of the filtered view, in filter order.
    pub fn visible(&self) -> &[R] {
        self.paginator.slice(&self.filtered)
    }

    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    pub fn page(&self) -> usize {
        self.paginator.page()
    }

    pub fn total_pages(&self) -> usize {
        self.paginator.total_pages()
    }

    pub fn contains(&self, id: R::Id) -> bool {
        self.records.iter().any(|r| r.id() == id)
    }

    pub fn get(&self, id: R::Id) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    // ---- search / filter ----

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.criteria.query = query.into();
        self.refilter();
    }

    pub fn set_filter(&mut self, name: &str, choice: FilterChoice) {
        self.criteria.filters.set(name, choice);
        self.refilter();
    }

    pub fn clear_criteria(&mut self) {
        self.criteria = Criteria::default();
        self.refilter();
    }

    // ---- pagination ----

    pub fn go_to_page(&mut self, page: usize) -> bool {
        self.paginator.go_to(page)
    }

    pub fn next_page(&mut self) -> bool {
        self.paginator.next()
    }

    pub fn prev_page(&mut self) -> bool {
        self.paginator.prev()
    }

    // ---- detail modal ----

    pub fn modal(&self) -> &DetailModal<R> {
        &self.modal
    }

    pub fn modal_mut(&mut self) -> &mut DetailModal<R> {
        &mut self.modal
    }

    /// Opens the detail modal for `id`. Only members of the filtered view can be opened.
    pub fn view(&mut self, id: R::Id) -> bool {
        match self.filtered.iter().find(|r| r.id() == id) {
            Some(record) => {
                self.modal.open(record.clone());
                true
            }
            None => {
                debug!("{} {id} is not in the filtered view", R::KIND);
                false
            }
        }
    }

    pub fn close_modal(&mut self) {
        self.modal.close();
    }

    // ---- mutations applied after the provider accepted them ----

    /// Replaces the record with the same id in both views, keeping its position.
    /// Closes the modal if it held that record.
    pub fn replace(&mut self, record: R) -> bool {
        let id = record.id();
        let mut found = false;
        for slot in self
            .records
            .iter_mut()
            .chain(self.filtered.iter_mut())
            .filter(|r| r.id() == id)
        {
            *slot = record.clone();
            found = true;
        }
        if self.modal.holds(id) {
            self.modal.close();
        }
        self.in_flight.remove(&id);
        found
    }

    /// Removes the record from both views. Force-closes the modal if it held it.
    pub fn remove(&mut self, id: R::Id) -> Option<R> {
        let index = self.records.iter().position(|r| r.id() == id)?;
        let removed = self.records.remove(index);
        self.filtered.retain(|r| r.id() != id);
        self.paginator.resize(self.filtered.len());

        if self.modal.holds(id) {
            self.modal.close();
        }
        if self.pending_delete == Some(id) {
            self.pending_delete = None;
        }
        self.in_flight.remove(&id);
        Some(removed)
    }

    /// Overwrites only the status field of the record in both views.
    pub fn set_status(&mut self, id: R::Id, status: R::Status) -> bool {
        let found = self.patch(id, |r| r.set_status(status));
        self.in_flight.remove(&id);
        found
    }

    /// Adopts the revision the provider assigned to `id`, so the next write
    /// from this console is not mistaken for a concurrent edit.
    pub fn set_version(&mut self, id: R::Id, version: u64) -> bool {
        self.patch(id, |r| r.set_version(version))
    }

    /// Applies `f` to every copy of `id`: both views and the open modal.
    fn patch(&mut self, id: R::Id, f: impl Fn(&mut R)) -> bool {
        let mut found = false;
        for slot in self
            .records
            .iter_mut()
            .chain(self.filtered.iter_mut())
            .filter(|r| r.id() == id)
        {
            f(slot);
            found = true;
        }
        if let Some(view) = self.modal.view_mut()
            && view.id() == id
        {
            let mut original = view.original().clone();
            f(&mut original);
            f(&mut view.draft);
            self.modal.refresh(original);
        }
        found
    }

    /// The status a "cycle" row action moves `id` to.
    pub fn next_status(&self, id: R::Id) -> Option<R::Status> {
        self.get(id).map(|r| r.status().cycle_next())
    }

    // ---- delete confirmation ----

    pub fn request_delete(&mut self, id: R::Id) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.pending_delete = Some(id);
        true
    }

    pub fn pending_delete(&self) -> Option<R::Id> {
        self.pending_delete
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Consumes the confirmation; the returned id may now be deleted.
    pub fn confirm_delete(&mut self) -> Option<R::Id> {
        self.pending_delete.take()
    }

    // ---- in-flight markers ----

    pub fn mark_in_flight(&mut self, id: R::Id) {
        self.in_flight.insert(id);
    }

    pub fn clear_in_flight(&mut self, id: R::Id) {
        self.in_flight.remove(&id);
    }

    pub fn is_in_flight(&self, id: R::Id) -> bool {
        self.in_flight.contains(&id)
    }

    /// Number of records per status across the full dataset.
    pub fn counts_by_status(&self) -> BTreeMap<&'static str, usize> {
        let mut counts: BTreeMap<&'static str, usize> =
            R::Status::ALL.iter().map(|s| (s.label(), 0)).collect();
        for record in &self.records {
            *counts.entry(record.status().label()).or_default() += 1;
        }
        counts
    }
}
