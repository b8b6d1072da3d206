//! Shared setup for command tests.
//!
//! ```ignore
//! let mut t = TestContext::loaded().await;
//! t.comments.fail_next(ProviderError::transport("offline")).await;
//! change_status::<Comment>(&mut t.ctx, 1, CommentStatus::Spam)?;
//! t.ctx.settle().await;
//! ```

#![cfg(test)]

use std::sync::Arc;

use agora_states::StateCtx;

use crate::admin::{AdminTableState, Notifications, Providers, refresh_all, register_admin};
use crate::config::AdminConfig;
use crate::entities::{AuditLog, Comment, Post, User};
use crate::provider::MemoryProvider;
use crate::record::Record;
use crate::seed;

pub struct TestContext {
    pub ctx: StateCtx,
    pub users: Arc<MemoryProvider<User>>,
    pub posts: Arc<MemoryProvider<Post>>,
    pub comments: Arc<MemoryProvider<Comment>>,
    pub audit_logs: Arc<MemoryProvider<AuditLog>>,
}

impl TestContext {
    /// Registered but not loaded.
    pub fn new() -> Self {
        Self::with_config(AdminConfig::default())
    }

    pub fn with_config(config: AdminConfig) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let users = Arc::new(MemoryProvider::new(seed::users()));
        let posts = Arc::new(MemoryProvider::new(seed::posts()));
        let comments = Arc::new(MemoryProvider::new(seed::comments()));
        let audit_logs = Arc::new(MemoryProvider::new(seed::audit_logs()));

        let mut ctx = StateCtx::new();
        register_admin(
            &mut ctx,
            config,
            Providers {
                users: users.clone(),
                posts: posts.clone(),
                comments: comments.clone(),
                audit_logs: audit_logs.clone(),
            },
        );

        Self {
            ctx,
            users,
            posts,
            comments,
            audit_logs,
        }
    }

    /// Registered with every table loaded.
    pub async fn loaded() -> Self {
        let mut t = Self::new();
        refresh_all(&mut t.ctx).expect("dispatch inside a runtime");
        t.ctx.settle().await;
        t
    }

    pub fn table<R: Record>(&self) -> &AdminTableState<R> {
        self.ctx
            .state::<AdminTableState<R>>()
            .expect("table registered")
    }

    pub fn notifications(&self) -> &Notifications {
        self.ctx.state::<Notifications>().expect("notifications registered")
    }
}
