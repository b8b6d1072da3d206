//! Side panel navigation and the notification bar.

mod common;

use agora_business::Notifications;
use agora_ui::pages::Page;
use kittest::Queryable;

use crate::common::TestCtx;

#[tokio::test]
async fn test_app_starts_on_dashboard() {
    let mut ctx = TestCtx::seeded().await;

    assert_eq!(ctx.state_mut().page, Page::Dashboard);
    let harness = ctx.harness();
    assert!(harness.query_by_label("Agora Admin").is_some());
    assert!(harness.query_by_label_contains("Awaiting moderation").is_some());
}

#[tokio::test]
async fn test_side_panel_switches_pages() {
    let mut ctx = TestCtx::seeded().await;
    ctx.open(Page::Users);

    ctx.harness_mut().get_by_label("Comments").click();
    ctx.settle().await;

    assert_eq!(ctx.state_mut().page, Page::Comments);
    assert!(ctx.harness().query_by_label("Page 1 of 4").is_some());
}

#[tokio::test]
async fn test_clear_all_empties_notifications() {
    let mut ctx = TestCtx::seeded().await;
    ctx.state_mut().ctx.update::<Notifications>(|n| {
        n.info("first");
        n.warning("second");
    });
    ctx.settle().await;
    assert!(ctx.harness().query_by_label("second").is_some());

    ctx.harness_mut().get_by_label("Clear all").click();
    ctx.settle().await;

    assert!(ctx.notices().is_empty());
    assert!(ctx.harness().query_by_label("second").is_none());
}
