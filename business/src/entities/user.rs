use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationErrors;
use crate::record::{EntityKind, FilterSpec, Record, StatusEnum};

labelled_enum!(Role {
    Admin,
    Moderator,
    Member,
});

labelled_enum!(UserStatus {
    Active,
    Banned,
    Pending,
});

impl UserStatus {
    /// Ban toggles between `Banned` and `Active`; a pending user gets banned.
    pub fn toggled_ban(self) -> Self {
        match self {
            UserStatus::Banned => UserStatus::Active,
            UserStatus::Active | UserStatus::Pending => UserStatus::Banned,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub status: UserStatus,
    pub joined_at: DateTime<Utc>,
    pub post_count: u32,
    #[serde(default)]
    pub version: u64,
}

const USER_FILTERS: &[FilterSpec] = &[
    FilterSpec {
        name: "role",
        label: "Role",
        options: Role::LABELS,
    },
    FilterSpec {
        name: "status",
        label: "Status",
        options: UserStatus::LABELS,
    },
];

impl Record for User {
    type Id = u64;
    type Status = UserStatus;

    const KIND: EntityKind = EntityKind::User;

    fn id(&self) -> u64 {
        self.id
    }

    fn status(&self) -> UserStatus {
        self.status
    }

    fn set_status(&mut self, status: UserStatus) {
        self.status = status;
    }

    fn version(&self) -> u64 {
        self.version
    }

    fn set_version(&mut self, version: u64) {
        self.version = version;
    }

    fn searchable_text(&self) -> Vec<&str> {
        vec![self.username.as_str(), self.email.as_str()]
    }

    fn filter_value(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "role" => Some(Cow::Borrowed(self.role.label())),
            "status" => Some(Cow::Borrowed(self.status.label())),
            _ => None,
        }
    }

    fn filters() -> &'static [FilterSpec] {
        USER_FILTERS
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let length = self.username.chars().count();
        if !(3..=32).contains(&length) {
            errors.push("username", "must be between 3 and 32 characters");
        }
        if !self
            .username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            errors.push(
                "username",
                "may only contain letters, digits and underscores",
            );
        }

        match self.email.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {}
            _ => errors.push("email", "must look like name@domain"),
        }

        errors.into_result()
    }

    fn title(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.username)
    }
}
