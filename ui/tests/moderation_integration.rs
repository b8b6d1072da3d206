//! Comment moderation flows: search, status cycling and deletion.

mod common;

use agora_business::admin::{confirm_delete, set_query};
use agora_business::{AdminTableState, Comment, CommentStatus};
use agora_ui::pages::{Page, apply_row_action};
use agora_ui::widgets::RowAction;
use kittest::Queryable;

use crate::common::TestCtx;

/// The only seeded comment written by `jane_admin`.
const JANE_COMMENT: u64 = 37;

fn comments(ctx: &mut TestCtx<'_>) -> AdminTableState<Comment> {
    ctx.state_mut()
        .ctx
        .state::<AdminTableState<Comment>>()
        .cloned()
        .expect("comments registered")
}

#[tokio::test]
async fn test_search_narrows_comments() {
    let mut ctx = TestCtx::seeded().await;
    ctx.open(Page::Comments);
    assert!(ctx.harness().query_by_label("Page 1 of 4").is_some());

    set_query::<Comment>(&mut ctx.state_mut().ctx, "  JANE ");
    ctx.settle().await;

    let harness = ctx.harness();
    assert!(harness.query_by_label("Showing 1-1 of 1").is_some());
    assert!(harness.query_by_label("Page 1 of 1").is_some());
    assert!(harness.query_by_label("jane_admin").is_some());
}

#[tokio::test]
async fn test_search_without_hits_shows_empty_message() {
    let mut ctx = TestCtx::seeded().await;
    ctx.open(Page::Comments);

    set_query::<Comment>(&mut ctx.state_mut().ctx, "no comment says this");
    ctx.settle().await;

    let harness = ctx.harness();
    assert!(
        harness
            .query_by_label("No comments match the current search.")
            .is_some()
    );
    assert!(harness.query_by_label("No results").is_some());
}

#[tokio::test]
async fn test_cycle_status_moves_to_hidden() {
    let mut ctx = TestCtx::seeded().await;
    ctx.open(Page::Comments);

    apply_row_action::<Comment>(&mut ctx.state_mut().ctx, RowAction::CycleStatus(JANE_COMMENT));
    ctx.settle().await;

    let table = comments(&mut ctx).table;
    let comment = table.get(JANE_COMMENT).expect("still listed");
    assert_eq!(comment.status, CommentStatus::Hidden);
    assert!(!table.is_in_flight(JANE_COMMENT));
}

#[tokio::test]
async fn test_cancel_keeps_the_comment() {
    let mut ctx = TestCtx::seeded().await;
    ctx.open(Page::Comments);

    apply_row_action::<Comment>(&mut ctx.state_mut().ctx, RowAction::RequestDelete(JANE_COMMENT));
    ctx.settle().await;
    assert!(
        ctx.harness()
            .query_by_label("This action cannot be undone.")
            .is_some()
    );

    ctx.harness_mut().get_by_label("Cancel").click();
    ctx.settle().await;

    let table = comments(&mut ctx).table;
    assert_eq!(table.pending_delete(), None);
    assert!(table.contains(JANE_COMMENT));
    assert!(
        ctx.harness()
            .query_by_label("This action cannot be undone.")
            .is_none()
    );
}

#[tokio::test]
async fn test_confirmed_delete_removes_the_comment() {
    let mut ctx = TestCtx::seeded().await;
    ctx.open(Page::Comments);
    let before = comments(&mut ctx).table.records().len();

    apply_row_action::<Comment>(&mut ctx.state_mut().ctx, RowAction::RequestDelete(JANE_COMMENT));
    confirm_delete::<Comment>(&mut ctx.state_mut().ctx).expect("inside a runtime");
    ctx.settle().await;

    let table = comments(&mut ctx).table;
    assert!(!table.contains(JANE_COMMENT));
    assert_eq!(table.records().len(), before - 1);
    assert!(
        ctx.harness()
            .query_by_label("This action cannot be undone.")
            .is_none()
    );
}
