use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationErrors;
use crate::record::{EntityKind, FilterSpec, Record, StatusEnum};

labelled_enum!(PostStatus {
    Published,
    Draft,
    Hidden,
    FlaggedForReview,
});

pub const POST_CATEGORIES: &[&str] = &[
    "Announcements",
    "General",
    "Help",
    "Showcase",
    "Off-topic",
];

const MAX_TITLE_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub author: String,
    pub category: String,
    pub status: PostStatus,
    pub created_at: DateTime<Utc>,
    pub comment_count: u32,
    pub content: String,
    #[serde(default)]
    pub version: u64,
}

impl Post {
    /// Hide/publish row action target.
    pub fn visibility_toggle(&self) -> PostStatus {
        match self.status {
            PostStatus::Hidden => PostStatus::Published,
            _ => PostStatus::Hidden,
        }
    }
}

const POST_FILTERS: &[FilterSpec] = &[
    FilterSpec {
        name: "status",
        label: "Status",
        options: PostStatus::LABELS,
    },
    FilterSpec {
        name: "category",
        label: "Category",
        options: POST_CATEGORIES,
    },
];

impl Record for Post {
    type Id = u64;
    type Status = PostStatus;

    const KIND: EntityKind = EntityKind::Post;

    fn id(&self) -> u64 {
        self.id
    }

    fn status(&self) -> PostStatus {
        self.status
    }

    fn set_status(&mut self, status: PostStatus) {
        self.status = status;
    }

    fn version(&self) -> u64 {
        self.version
    }

    fn set_version(&mut self, version: u64) {
        self.version = version;
    }

    fn searchable_text(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.author.as_str(),
            self.content.as_str(),
        ]
    }

    fn filter_value(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "status" => Some(Cow::Borrowed(self.status.label())),
            "category" => Some(Cow::Borrowed(&self.category)),
            _ => None,
        }
    }

    fn filters() -> &'static [FilterSpec] {
        POST_FILTERS
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.title.trim().is_empty() {
            errors.push("title", "must not be empty");
        } else if self.title.chars().count() > MAX_TITLE_CHARS {
            errors.push(
                "title",
                format!("must be at most {MAX_TITLE_CHARS} characters"),
            );
        }
        errors.into_result()
    }

    fn title(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.title)
    }
}
