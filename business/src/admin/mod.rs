//! Admin console wiring: per-entity table states, provider commands and
//! notifications.

mod actions;
mod commands;
mod notifications;
mod state;

use std::sync::Arc;

use agora_states::StateCtx;
use log::info;

pub use actions::{
    cancel_delete, change_status, clear_criteria, close_details, confirm_delete, cycle_status,
    go_to_page, open_details, refresh_details, refresh_table, register_table, request_delete,
    save_record, set_filter, set_query, submit_details,
};
pub use commands::{
    DeleteRecordCommand, RefreshDetailCommand, RefreshTableCommand, SaveRecordCommand,
    SetStatusCommand, fetch_all,
};
pub use notifications::{Notice, NoticeLevel, Notifications};
pub use state::{AdminTableState, ProviderState, TableActionInput};

use crate::config::AdminConfig;
use crate::dashboard::DashboardStats;
use crate::entities::{AuditLog, Comment, Post, User};
use crate::provider::{DatasetProvider, HttpProvider, MemoryProvider};
use crate::record::Record;
use crate::seed;

/// One provider per entity type.
pub struct Providers {
    pub users: Arc<dyn DatasetProvider<User>>,
    pub posts: Arc<dyn DatasetProvider<Post>>,
    pub comments: Arc<dyn DatasetProvider<Comment>>,
    pub audit_logs: Arc<dyn DatasetProvider<AuditLog>>,
}

impl Providers {
    /// In-memory providers over the seeded placeholder data.
    pub fn seeded() -> Self {
        Self {
            users: Arc::new(MemoryProvider::new(seed::users())),
            posts: Arc::new(MemoryProvider::new(seed::posts())),
            comments: Arc::new(MemoryProvider::new(seed::comments())),
            audit_logs: Arc::new(MemoryProvider::new(seed::audit_logs())),
        }
    }

    pub fn http(base_url: &str) -> Self {
        let client = crate::http::Client::new();
        Self {
            users: Arc::new(HttpProvider::<User>::with_client(base_url, client.clone())),
            posts: Arc::new(HttpProvider::<Post>::with_client(base_url, client.clone())),
            comments: Arc::new(HttpProvider::<Comment>::with_client(base_url, client.clone())),
            audit_logs: Arc::new(HttpProvider::<AuditLog>::with_client(base_url, client)),
        }
    }

    pub fn from_config(config: &AdminConfig) -> Self {
        match config.api_base_url() {
            Some(url) => Self::http(url),
            None => Self::seeded(),
        }
    }
}

/// Registers every state, compute and command of the console.
pub fn register_admin(ctx: &mut StateCtx, config: AdminConfig, providers: Providers) {
    let page_size = |kind| config.page_size(kind);
    register_table(ctx, providers.users, page_size(User::KIND));
    register_table(ctx, providers.posts, page_size(Post::KIND));
    register_table(ctx, providers.comments, page_size(Comment::KIND));
    register_table(ctx, providers.audit_logs, page_size(AuditLog::KIND));

    ctx.add_state(Notifications::default());
    ctx.record_compute(DashboardStats::default());
    ctx.add_state(config);
    info!("Admin console registered");
}

/// Starts loading every table.
pub fn refresh_all(ctx: &mut StateCtx) -> Result<(), agora_states::Error> {
    refresh_table::<User>(ctx)?;
    refresh_table::<Post>(ctx)?;
    refresh_table::<Comment>(ctx)?;
    refresh_table::<AuditLog>(ctx)?;
    Ok(())
}

#[cfg(test)]
mod tests;
