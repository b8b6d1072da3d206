//! Entity descriptor shared by every admin table.
//!
//! A [`Record`] tells the generic table controller how to identify a row, which
//! text fields search looks at, which categorical attributes filters compare
//! against, and how an edited row is validated.

use std::borrow::Cow;
use std::fmt::{Debug, Display};
use std::hash::Hash;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ValidationErrors;

/// Entity types managed by the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum EntityKind {
    User,
    Post,
    Comment,
    AuditLog,
}

impl EntityKind {
    /// Path segment used by the HTTP provider.
    pub fn path(&self) -> &'static str {
        match self {
            EntityKind::User => "users",
            EntityKind::Post => "posts",
            EntityKind::Comment => "comments",
            EntityKind::AuditLog => "audit-logs",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::User => "User",
            EntityKind::Post => "Post",
            EntityKind::Comment => "Comment",
            EntityKind::AuditLog => "Audit log",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Closed enumeration of moderation/lifecycle states for one entity type.
///
/// Any value may transition to any other value; there is no sequencing.
pub trait StatusEnum:
    Copy + Eq + Hash + Debug + Display + Send + Sync + Serialize + DeserializeOwned + 'static
{
    const ALL: &'static [Self];

    fn label(&self) -> &'static str;

    /// The next value in declaration order, wrapping around.
    fn cycle_next(&self) -> Self {
        let all = Self::ALL;
        let index = all.iter().position(|s| s == self).unwrap_or(0);
        all[(index + 1) % all.len()]
    }

    fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.label() == label)
    }
}

/// A categorical filter offered by a table's filter bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSpec {
    /// Key passed to [`Record::filter_value`] and sent to the provider.
    pub name: &'static str,
    pub label: &'static str,
    /// Selectable values, excluding the "all" sentinel.
    pub options: &'static [&'static str],
}

pub trait Record:
    Clone + Debug + PartialEq + Send + Sync + Serialize + DeserializeOwned + 'static
{
    type Id: Copy
        + Eq
        + Hash
        + Debug
        + Display
        + Send
        + Sync
        + Serialize
        + DeserializeOwned
        + 'static;
    type Status: StatusEnum;

    const KIND: EntityKind;

    fn id(&self) -> Self::Id;

    fn status(&self) -> Self::Status;

    fn set_status(&mut self, status: Self::Status);

    /// Revision token of the stored copy. Every accepted mutation bumps it; a
    /// write carrying an older token is a concurrent edit.
    fn version(&self) -> u64;

    fn set_version(&mut self, version: u64);

    /// Fields matched by the free-text search.
    fn searchable_text(&self) -> Vec<&str>;

    /// Value of the categorical attribute `name`, if the record has one.
    fn filter_value(&self, name: &str) -> Option<Cow<'_, str>>;

    fn filters() -> &'static [FilterSpec];

    fn validate(&self) -> Result<(), ValidationErrors>;

    /// Short human label used by row headers and notifications.
    fn title(&self) -> Cow<'_, str>;
}
