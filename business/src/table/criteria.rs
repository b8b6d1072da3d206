//! Free-text search and categorical filters.

use std::collections::BTreeMap;

use ustr::Ustr;

use crate::record::Record;

/// Selected option of one filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterChoice {
    /// The "all" sentinel: no constraint.
    #[default]
    All,
    Only(Ustr),
}

impl FilterChoice {
    pub fn only(value: &str) -> Self {
        FilterChoice::Only(Ustr::from(value))
    }

    pub fn is_all(&self) -> bool {
        matches!(self, FilterChoice::All)
    }
}

/// Filter name -> selected option. Names absent from the map are at "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    choices: BTreeMap<Ustr, FilterChoice>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, choice: FilterChoice) -> Self {
        self.set(name, choice);
        self
    }

    /// Returns `true` when the selection changed.
    pub fn set(&mut self, name: &str, choice: FilterChoice) -> bool {
        let key = Ustr::from(name);
        let previous = match choice {
            FilterChoice::All => self.choices.remove(&key),
            FilterChoice::Only(_) => self.choices.insert(key, choice),
        };
        previous.unwrap_or_default() != choice
    }

    pub fn get(&self, name: &str) -> FilterChoice {
        self.choices
            .get(&Ustr::from(name))
            .copied()
            .unwrap_or_default()
    }

    /// Filters with a concrete value selected.
    pub fn active(&self) -> impl Iterator<Item = (Ustr, Ustr)> + '_ {
        self.choices.iter().filter_map(|(name, choice)| match choice {
            FilterChoice::Only(value) => Some((*name, *value)),
            FilterChoice::All => None,
        })
    }

    pub fn is_unconstrained(&self) -> bool {
        self.active().next().is_none()
    }

    pub fn clear(&mut self) {
        self.choices.clear();
    }
}

/// Search query plus filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    pub query: String,
    pub filters: FilterSet,
}

impl Criteria {
    pub fn new(query: impl Into<String>, filters: FilterSet) -> Self {
        Self {
            query: query.into(),
            filters,
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        self.query.trim().is_empty() && self.filters.is_unconstrained()
    }

    pub fn matches<R: Record>(&self, record: &R) -> bool {
        let needle = self.query.trim().to_lowercase();
        self.matches_lowered(record, &needle)
    }

    fn matches_lowered<R: Record>(&self, record: &R, needle: &str) -> bool {
        let text_matches = needle.is_empty()
            || record
                .searchable_text()
                .iter()
                .any(|field| field.to_lowercase().contains(needle));

        text_matches
            && self.filters.active().all(|(name, value)| {
                record
                    .filter_value(name.as_str())
                    .is_some_and(|v| v == value.as_str())
            })
    }

    /// Matching records in their original order.
    pub fn apply<R: Record>(&self, records: &[R]) -> Vec<R> {
        let needle = self.query.trim().to_lowercase();
        records
            .iter()
            .filter(|r| self.matches_lowered(*r, &needle))
            .cloned()
            .collect()
    }
}
