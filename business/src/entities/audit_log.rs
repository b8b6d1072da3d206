use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationErrors;
use crate::record::{EntityKind, FilterSpec, Record, StatusEnum};

labelled_enum!(AuditAction {
    Login,
    Logout,
    RoleChange,
    UserBan,
    UserUnban,
    PostStatusChange,
    PostDelete,
    CommentStatusChange,
    CommentDelete,
    SettingsChange,
});

labelled_enum!(AuditOutcome {
    Success,
    Failure,
    Denied,
});

/// Security-relevant event. The console only reads these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLog {
    pub id: u64,
    pub actor: String,
    pub action: AuditAction,
    pub target: String,
    pub ip_address: String,
    pub outcome: AuditOutcome,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub version: u64,
}

const AUDIT_FILTERS: &[FilterSpec] = &[
    FilterSpec {
        name: "action",
        label: "Action",
        options: AuditAction::LABELS,
    },
    FilterSpec {
        name: "outcome",
        label: "Outcome",
        options: AuditOutcome::LABELS,
    },
];

impl Record for AuditLog {
    type Id = u64;
    type Status = AuditOutcome;

    const KIND: EntityKind = EntityKind::AuditLog;

    fn id(&self) -> u64 {
        self.id
    }

    fn status(&self) -> AuditOutcome {
        self.outcome
    }

    fn set_status(&mut self, status: AuditOutcome) {
        self.outcome = status;
    }

    fn version(&self) -> u64 {
        self.version
    }

    fn set_version(&mut self, version: u64) {
        self.version = version;
    }

    fn searchable_text(&self) -> Vec<&str> {
        vec![
            self.actor.as_str(),
            self.target.as_str(),
            self.ip_address.as_str(),
        ]
    }

    fn filter_value(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "action" => Some(Cow::Borrowed(self.action.label())),
            "outcome" => Some(Cow::Borrowed(self.outcome.label())),
            _ => None,
        }
    }

    fn filters() -> &'static [FilterSpec] {
        AUDIT_FILTERS
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.actor.trim().is_empty() {
            errors.push("actor", "must not be empty");
        }
        errors.into_result()
    }

    fn title(&self) -> Cow<'_, str> {
        Cow::Owned(format!("{} by {}", self.action, self.actor))
    }
}
