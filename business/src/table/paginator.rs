//! Fixed-size, 1-based pagination over a filtered result set.

use std::ops::Range;

use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    page: usize,
    total_items: usize,
}

impl Paginator {
    /// A `page_size` of 0 is treated as 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            page: 1,
            total_items: 0,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Current page, 1-based.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// `ceil(total_items / page_size)`, never less than 1.
    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size).max(1)
    }

    /// Points the paginator at a new result set and goes back to page 1.
    pub fn reset(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.page = 1;
    }

    /// Updates the item count while staying on the current page when it still exists.
    pub fn resize(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.page = self.page.min(self.total_pages());
    }

    /// Moves to `page`. Out-of-range pages are rejected and leave the state unchanged.
    pub fn go_to(&mut self, page: usize) -> bool {
        if page < 1 || page > self.total_pages() {
            debug!(
                "Rejected page {page}, valid range is 1..={}",
                self.total_pages()
            );
            return false;
        }
        self.page = page;
        true
    }

    pub fn next(&mut self) -> bool {
        self.go_to(self.page + 1)
    }

    pub fn prev(&mut self) -> bool {
        self.page > 1 && self.go_to(self.page - 1)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Index range of the visible slice: `[(page-1)*size, min(page*size, total))`.
    pub fn range(&self) -> Range<usize> {
        let start = ((self.page - 1) * self.page_size).min(self.total_items);
        let end = (self.page * self.page_size).min(self.total_items);
        start..end
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.range();
        let end = range.end.min(items.len());
        let start = range.start.min(end);
        &items[start..end]
    }
}
