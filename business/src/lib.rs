//! Business layer of the Agora admin console.
//!
//! Records and their descriptors, the generic table controller, dataset
//! providers and the commands that connect them to the state runtime.

pub mod admin;
pub mod config;
pub mod crop;
pub mod dashboard;
pub mod editor;
pub mod entities;
pub mod error;
pub mod http;
pub mod provider;
pub mod record;
pub mod seed;
pub mod table;

#[cfg(test)]
mod test_utils;

pub use admin::{
    AdminTableState, Notice, NoticeLevel, Notifications, Providers, refresh_all, register_admin,
};
pub use config::{AdminConfig, ConfigError};
pub use dashboard::DashboardStats;
pub use entities::{
    AuditAction, AuditLog, AuditOutcome, Comment, CommentStatus, Post, PostStatus, Role, User,
    UserStatus,
};
pub use error::{FieldError, ProviderError, ProviderResult, Recovery, ValidationErrors};
pub use provider::{DatasetProvider, HttpProvider, ListPage, ListRequest, MemoryProvider};
pub use record::{EntityKind, FilterSpec, Record, StatusEnum};
pub use table::{Criteria, DataTable, DetailModal, DetailView, FilterChoice, FilterSet, Paginator};
