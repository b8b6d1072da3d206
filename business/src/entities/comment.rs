use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationErrors;
use crate::record::{EntityKind, FilterSpec, Record, StatusEnum};

labelled_enum!(CommentStatus {
    Visible,
    Hidden,
    FlaggedForReview,
    Spam,
});

const MAX_CONTENT_CHARS: usize = 5000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub author: String,
    pub post_id: u64,
    pub post_title: String,
    pub content: String,
    pub status: CommentStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub version: u64,
}

const COMMENT_FILTERS: &[FilterSpec] = &[FilterSpec {
    name: "status",
    label: "Status",
    options: CommentStatus::LABELS,
}];

impl Record for Comment {
    type Id = u64;
    type Status = CommentStatus;

    const KIND: EntityKind = EntityKind::Comment;

    fn id(&self) -> u64 {
        self.id
    }

    fn status(&self) -> CommentStatus {
        self.status
    }

    fn set_status(&mut self, status: CommentStatus) {
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
            self.author.as_str(),
            self.content.as_str(),
            self.post_title.as_str(),
        ]
    }

    fn filter_value(&self, name: &str) -> Option<Cow<'_, str>> {
        (name == "status").then(|| Cow::Borrowed(self.status.label()))
    }

    fn filters() -> &'static [FilterSpec] {
        COMMENT_FILTERS
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.content.trim().is_empty() {
            errors.push("content", "must not be empty");
        } else if self.content.chars().count() > MAX_CONTENT_CHARS {
            errors.push(
                "content",
                format!("must be at most {MAX_CONTENT_CHARS} characters"),
            );
        }
        errors.into_result()
    }

    fn title(&self) -> Cow<'_, str> {
        Cow::Owned(format!("#{} on \"{}\"", self.id, self.post_title))
    }
}
