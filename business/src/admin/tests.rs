use std::sync::Arc;
use std::time::Duration;

use agora_states::{Error, StateCtx};

use super::*;
use crate::config::AdminConfig;
use crate::entities::{AuditLog, Comment, CommentStatus, Post, PostStatus, User, UserStatus};
use crate::error::ProviderError;
use crate::seed;
use crate::test_utils::TestContext;

#[tokio::test]
async fn refresh_loads_every_table() {
    let t = TestContext::loaded().await;

    assert_eq!(t.table::<User>().table.records().len(), 25);
    assert_eq!(t.table::<Post>().table.records(), seed::posts().as_slice());
    assert!(t.table::<Comment>().is_loaded());
    assert!(!t.table::<Comment>().is_loading());
    let audit = &t.table::<AuditLog>().table;
    assert_eq!(audit.paginator().page_size(), 20);
    assert_eq!(audit.records(), t.audit_logs.records().await.as_slice());
}

#[tokio::test]
async fn refresh_pulls_every_batch() {
    let config = AdminConfig::from_vars(vec![("AGORA_FETCH_BATCH", "7")]).expect("config");
    let mut t = TestContext::with_config(config);
    refresh_table::<User>(&mut t.ctx).expect("dispatch");
    t.ctx.settle().await;

    assert_eq!(t.table::<User>().table.records(), seed::users().as_slice());
}

#[tokio::test]
async fn status_change_applies_after_the_provider_accepts() {
    let mut t = TestContext::loaded().await;
    let target = seed::comments()
        .into_iter()
        .find(|c| c.status == CommentStatus::Visible)
        .expect("a visible comment");

    change_status::<Comment>(&mut t.ctx, target.id, CommentStatus::Spam).expect("dispatch");
    assert!(t.table::<Comment>().table.is_in_flight(target.id));
    assert_eq!(
        t.table::<Comment>().table.get(target.id).map(|c| c.status),
        Some(CommentStatus::Visible)
    );

    t.ctx.settle().await;

    let table = &t.table::<Comment>().table;
    assert!(!table.is_in_flight(target.id));
    for (before, after) in seed::comments().iter().zip(table.records()) {
        if before.id == target.id {
            assert_eq!(after.status, CommentStatus::Spam);
        } else {
            assert_eq!(before, after);
        }
    }
    let stored = t.comments.records().await;
    assert!(
        stored
            .iter()
            .any(|c| c.id == target.id && c.status == CommentStatus::Spam)
    );
}

#[tokio::test]
async fn transport_failure_leaves_the_table_alone_and_notifies() {
    let mut t = TestContext::loaded().await;
    t.posts
        .fail_next(ProviderError::transport("connection reset"))
        .await;

    change_status::<Post>(&mut t.ctx, 1, PostStatus::Hidden).expect("dispatch");
    t.ctx.settle().await;

    assert_eq!(t.table::<Post>().table.records(), seed::posts().as_slice());
    assert!(!t.table::<Post>().table.is_in_flight(1));
    let notice = t.notifications().latest().expect("a notice");
    assert_eq!(notice.level, NoticeLevel::Error);
    assert!(notice.message.contains("connection reset"));
}

#[tokio::test]
async fn invalid_draft_never_reaches_the_provider() {
    let mut t = TestContext::loaded().await;
    assert!(open_details::<User>(&mut t.ctx, 1));
    t.ctx.update::<AdminTableState<User>>(|s| {
        if let Some(view) = s.table.modal_mut().view_mut() {
            view.draft.username = "x".to_owned();
        }
    });

    let dispatched = submit_details::<User>(&mut t.ctx).expect("no dispatch error");
    assert!(dispatched.is_none());
    assert_eq!(t.ctx.in_flight(), 0);

    let view = t.table::<User>().table.modal().view().expect("still open");
    assert!(view.errors().for_field("username").next().is_some());
    assert_eq!(t.users.records().await, seed::users());
}

#[tokio::test]
async fn saving_replaces_in_place_and_closes_the_modal() {
    let mut t = TestContext::loaded().await;
    let index = 4;
    let id = seed::users()[index].id;
    assert!(open_details::<User>(&mut t.ctx, id));
    t.ctx.update::<AdminTableState<User>>(|s| {
        if let Some(view) = s.table.modal_mut().view_mut() {
            view.draft.email = "changed@agora.dev".to_owned();
        }
    });

    submit_details::<User>(&mut t.ctx)
        .expect("dispatch")
        .expect("valid draft dispatched");
    assert!(
        t.table::<User>()
            .table
            .modal()
            .view()
            .is_some_and(|v| v.is_saving())
    );
    t.ctx.settle().await;

    let table = &t.table::<User>().table;
    assert!(!table.modal().is_open());
    assert_eq!(table.records()[index].email, "changed@agora.dev");
    assert_eq!(table.records().len(), 25);
}

#[tokio::test]
async fn row_save_changes_the_role() {
    let mut t = TestContext::loaded().await;
    let mut user = seed::users()[3].clone();
    user.role = crate::entities::Role::Moderator;

    save_record::<User>(&mut t.ctx, user.clone())
        .expect("dispatch")
        .expect("valid record dispatched");
    assert!(t.table::<User>().table.is_in_flight(user.id));
    t.ctx.settle().await;

    let table = &t.table::<User>().table;
    let saved = table.get(user.id).expect("still listed");
    assert_eq!(saved.role, crate::entities::Role::Moderator);
    assert_eq!(saved.version, user.version + 1);
    assert!(!table.is_in_flight(user.id));
}

#[tokio::test]
async fn stale_draft_is_a_conflict_and_the_newer_copy_wins() {
    let mut t = TestContext::loaded().await;
    assert!(open_details::<User>(&mut t.ctx, 1));
    t.users
        .external_edit(|users| {
            if let Some(user) = users.iter_mut().find(|u| u.id == 1) {
                user.email = "jane.admin@agora.dev".to_owned();
            }
        })
        .await;
    t.ctx.update::<AdminTableState<User>>(|s| {
        if let Some(view) = s.table.modal_mut().view_mut() {
            view.draft.username = "jane_root".to_owned();
        }
    });

    submit_details::<User>(&mut t.ctx).expect("dispatch");
    t.ctx.settle().await;

    let stored = t.users.get_by_id(1).await.expect("still stored");
    assert_eq!(stored.email, "jane.admin@agora.dev");
    assert_eq!(stored.username, "jane_admin");

    let table = &t.table::<User>().table;
    assert!(!table.modal().is_open());
    assert_eq!(table.get(1), Some(&stored));
    let notice = t.notifications().latest().expect("a notice");
    assert_eq!(notice.level, NoticeLevel::Warning);
    assert!(notice.message.ends_with("The list was reloaded."));
}

#[tokio::test]
async fn own_status_change_does_not_make_the_next_save_stale() {
    let mut t = TestContext::loaded().await;
    change_status::<User>(&mut t.ctx, 2, UserStatus::Banned).expect("dispatch");
    t.ctx.settle().await;

    assert!(open_details::<User>(&mut t.ctx, 2));
    t.ctx.update::<AdminTableState<User>>(|s| {
        if let Some(view) = s.table.modal_mut().view_mut() {
            view.draft.email = "marcus@agora.dev".to_owned();
        }
    });
    submit_details::<User>(&mut t.ctx).expect("dispatch");
    t.ctx.settle().await;

    let stored = t.users.get_by_id(2).await.expect("stored");
    assert_eq!(stored.email, "marcus@agora.dev");
    assert_eq!(stored.status, UserStatus::Banned);
    assert_eq!(t.table::<User>().table.get(2), Some(&stored));
}

#[tokio::test]
async fn invalid_row_save_is_not_sent() {
    let mut t = TestContext::loaded().await;
    let mut user = seed::users()[3].clone();
    user.email = "nope".to_owned();

    let dispatched = save_record::<User>(&mut t.ctx, user).expect("no dispatch error");
    assert!(dispatched.is_none());
    assert_eq!(
        t.notifications().latest().map(|n| n.level),
        Some(NoticeLevel::Warning)
    );
    assert_eq!(t.users.records().await, seed::users());
}

#[tokio::test]
async fn provider_validation_errors_show_inline() {
    let mut t = TestContext::loaded().await;
    let mut errors = crate::error::ValidationErrors::new();
    errors.push("title", "already used by another post");
    t.posts.fail_next(ProviderError::Validation(errors)).await;

    assert!(open_details::<Post>(&mut t.ctx, 2));
    submit_details::<Post>(&mut t.ctx).expect("dispatch");
    t.ctx.settle().await;

    let view = t.table::<Post>().table.modal().view().expect("kept open");
    assert!(!view.is_saving());
    assert_eq!(
        view.errors().for_field("title").collect::<Vec<_>>(),
        vec!["already used by another post"]
    );
}

#[tokio::test]
async fn saving_a_vanished_record_closes_and_resyncs() {
    let mut t = TestContext::loaded().await;
    assert!(open_details::<User>(&mut t.ctx, 3));
    t.users.external_edit(|users| users.retain(|u| u.id != 3)).await;

    submit_details::<User>(&mut t.ctx).expect("dispatch");
    t.ctx.settle().await;

    let table = &t.table::<User>().table;
    assert!(!table.modal().is_open());
    assert!(!table.contains(3));
    assert_eq!(table.records().len(), 24);
    assert_eq!(
        t.notifications().latest().map(|n| n.level),
        Some(NoticeLevel::Warning)
    );
}

#[tokio::test]
async fn delete_requires_confirmation() {
    let mut t = TestContext::loaded().await;

    assert_eq!(confirm_delete::<Comment>(&mut t.ctx), Ok(None));
    assert_eq!(t.ctx.in_flight(), 0);

    assert!(open_details::<Comment>(&mut t.ctx, 5));
    assert!(request_delete::<Comment>(&mut t.ctx, 5));
    cancel_delete::<Comment>(&mut t.ctx);
    assert_eq!(confirm_delete::<Comment>(&mut t.ctx), Ok(None));
    assert!(t.table::<Comment>().table.contains(5));

    assert!(request_delete::<Comment>(&mut t.ctx, 5));
    assert!(confirm_delete::<Comment>(&mut t.ctx).expect("dispatch").is_some());
    t.ctx.settle().await;

    let table = &t.table::<Comment>().table;
    assert!(!table.contains(5));
    assert!(!table.modal().is_open());
    assert!(t.comments.records().await.iter().all(|c| c.id != 5));
}

#[tokio::test]
async fn delete_command_without_confirmation_does_nothing() {
    let mut t = TestContext::loaded().await;
    t.ctx.dispatch::<DeleteRecordCommand<User>>().expect("dispatch");
    t.ctx.settle().await;

    assert_eq!(t.users.records().await.len(), 25);
    assert_eq!(t.table::<User>().table.records().len(), 25);
}

#[tokio::test]
async fn conflict_on_delete_resyncs() {
    let mut t = TestContext::loaded().await;
    t.posts
        .external_edit(|posts| {
            if let Some(post) = posts.iter_mut().find(|p| p.id == 7) {
                post.title = "Edited elsewhere".to_owned();
            }
        })
        .await;

    assert!(open_details::<Post>(&mut t.ctx, 7));
    request_delete::<Post>(&mut t.ctx, 7);
    confirm_delete::<Post>(&mut t.ctx).expect("dispatch");
    t.ctx.settle().await;

    let table = &t.table::<Post>().table;
    assert!(!table.modal().is_open());
    assert_eq!(
        table.get(7).map(|p| p.title.as_str()),
        Some("Edited elsewhere")
    );
}

#[tokio::test]
async fn refresh_details_rebases_the_open_record() {
    let mut t = TestContext::loaded().await;
    assert!(open_details::<User>(&mut t.ctx, 2));
    t.users
        .external_edit(|users| {
            if let Some(user) = users.iter_mut().find(|u| u.id == 2) {
                user.status = UserStatus::Banned;
            }
        })
        .await;

    refresh_details::<User>(&mut t.ctx)
        .expect("dispatch")
        .expect("modal open");
    t.ctx.settle().await;

    let view = t.table::<User>().table.modal().view().expect("open");
    assert_eq!(view.original().status, UserStatus::Banned);
    assert_eq!(view.draft.status, UserStatus::Banned);
}

#[tokio::test]
async fn refresh_details_of_a_deleted_record_closes_the_modal() {
    let mut t = TestContext::loaded().await;
    assert!(open_details::<Comment>(&mut t.ctx, 9));
    t.comments
        .external_edit(|comments| comments.retain(|c| c.id != 9))
        .await;

    refresh_details::<Comment>(&mut t.ctx).expect("dispatch");
    t.ctx.settle().await;

    let table = &t.table::<Comment>().table;
    assert!(!table.modal().is_open());
    assert!(!table.contains(9));
}

#[tokio::test]
async fn newer_refresh_replaces_the_older_one() {
    let _ = env_logger::builder().is_test(true).try_init();
    let slow = Arc::new(MemoryProvider::new(seed::users()).with_latency(Duration::from_millis(20)));
    let mut ctx = StateCtx::new();
    register_table::<User>(&mut ctx, slow.clone(), 10);
    ctx.add_state(Notifications::default());

    refresh_table::<User>(&mut ctx).expect("first");
    slow.external_edit(|users| users.truncate(12)).await;
    refresh_table::<User>(&mut ctx).expect("second");
    ctx.settle().await;

    let state = ctx.state::<AdminTableState<User>>().expect("registered");
    assert_eq!(state.table.records().len(), 12);
    assert!(!state.is_loading());
}

#[test]
fn dispatch_outside_a_runtime_is_reported() {
    let mut t = TestContext::new();
    let result = change_status::<Comment>(&mut t.ctx, 1, CommentStatus::Hidden);

    assert!(matches!(result, Err(Error::NoRuntime { .. })));
    assert!(!t.table::<Comment>().table.is_in_flight(1));
    assert_eq!(
        t.notifications().latest().map(|n| n.level),
        Some(NoticeLevel::Error)
    );
}
