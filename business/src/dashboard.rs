//! Overview numbers derived from the four admin tables.

use std::any::TypeId;
use std::collections::BTreeMap;

use agora_states::{Compute, Dep, State, Updater};

use crate::admin::AdminTableState;
use crate::entities::{
    AuditLog, AuditOutcome, Comment, CommentStatus, Post, PostStatus, User, UserStatus,
};
use crate::record::{Record, StatusEnum};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub total: usize,
    pub by_status: BTreeMap<&'static str, usize>,
}

impl StatusCounts {
    fn of<R: Record>(deps: &Dep<'_>) -> Self {
        match deps.state::<AdminTableState<R>>() {
            Ok(state) => Self {
                total: state.table.records().len(),
                by_status: state.table.counts_by_status(),
            },
            Err(_) => Self {
                total: 0,
                by_status: R::Status::ALL.iter().map(|s| (s.label(), 0)).collect(),
            },
        }
    }

    pub fn get(&self, status: impl StatusEnum) -> usize {
        self.by_status.get(status.label()).copied().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub users: StatusCounts,
    pub posts: StatusCounts,
    pub comments: StatusCounts,
    pub audit_logs: StatusCounts,
}

impl DashboardStats {
    /// Pending users plus posts and comments flagged for review.
    pub fn awaiting_moderation(&self) -> usize {
        self.users.get(UserStatus::Pending)
            + self.posts.get(PostStatus::FlaggedForReview)
            + self.comments.get(CommentStatus::FlaggedForReview)
    }

    /// Audit events that did not succeed.
    pub fn failed_audit_events(&self) -> usize {
        self.audit_logs.get(AuditOutcome::Failure) + self.audit_logs.get(AuditOutcome::Denied)
    }
}

impl State for DashboardStats {}

impl Compute for DashboardStats {
    fn deps(&self) -> Vec<TypeId> {
        vec![
            TypeId::of::<AdminTableState<User>>(),
            TypeId::of::<AdminTableState<Post>>(),
            TypeId::of::<AdminTableState<Comment>>(),
            TypeId::of::<AdminTableState<AuditLog>>(),
        ]
    }

    fn compute(&self, deps: Dep<'_>, updater: Updater) {
        updater.set(DashboardStats {
            users: StatusCounts::of::<User>(&deps),
            posts: StatusCounts::of::<Post>(&deps),
            comments: StatusCounts::of::<Comment>(&deps),
            audit_logs: StatusCounts::of::<AuditLog>(&deps),
        });
    }
}
