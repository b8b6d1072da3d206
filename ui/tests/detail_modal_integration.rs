//! Detail modal: inline validation, saving and closing.

mod common;

use agora_business::{AdminTableState, User};
use agora_ui::pages::{Page, apply_user_action};
use agora_ui::widgets::RowAction;
use kittest::Queryable;

use crate::common::TestCtx;

const MARCUS: u64 = 2;

async fn open_marcus() -> TestCtx<'static> {
    let mut ctx = TestCtx::seeded().await;
    ctx.open(Page::Users);
    apply_user_action(&mut ctx.state_mut().ctx, RowAction::ViewDetails(MARCUS));
    ctx.settle().await;
    ctx
}

fn edit_draft(ctx: &mut TestCtx<'_>, edit: impl FnOnce(&mut User)) {
    let view = ctx
        .state_mut()
        .ctx
        .state_mut::<AdminTableState<User>>()
        .and_then(|s| s.table.modal_mut().view_mut())
        .expect("modal is open");
    edit(&mut view.draft);
    ctx.harness_mut().step();
}

fn stored(ctx: &mut TestCtx<'_>) -> AdminTableState<User> {
    ctx.state_mut()
        .ctx
        .state::<AdminTableState<User>>()
        .cloned()
        .expect("users registered")
}

#[tokio::test]
async fn test_invalid_email_shows_inline_error() {
    let mut ctx = open_marcus().await;
    assert!(ctx.harness().query_by_label("Save").is_some());

    edit_draft(&mut ctx, |user| user.email = "no-at-sign".to_owned());
    ctx.harness_mut().get_by_label("Save").click();
    ctx.settle().await;

    assert!(
        ctx.harness()
            .query_by_label("must look like name@domain")
            .is_some()
    );
    let state = stored(&mut ctx);
    assert!(state.table.modal().is_open());
    assert_eq!(
        state.table.get(MARCUS).map(|u| u.email.as_str()),
        Some("mod.marcus@agora.dev")
    );
}

#[tokio::test]
async fn test_valid_save_updates_row_and_closes() {
    let mut ctx = open_marcus().await;

    edit_draft(&mut ctx, |user| user.username = "marcus_mod".to_owned());
    ctx.harness_mut().get_by_label("Save").click();
    ctx.settle().await;

    let state = stored(&mut ctx);
    assert!(!state.table.modal().is_open());
    assert_eq!(
        state.table.get(MARCUS).map(|u| u.username.as_str()),
        Some("marcus_mod")
    );
    assert!(ctx.harness().query_by_label("marcus_mod").is_some());
}

#[tokio::test]
async fn test_revert_restores_the_original() {
    let mut ctx = open_marcus().await;

    edit_draft(&mut ctx, |user| user.username = "x".to_owned());
    ctx.harness_mut().get_by_label("Revert").click();
    ctx.settle().await;

    let state = stored(&mut ctx);
    let view = state.table.modal().view().expect("still open");
    assert!(!view.is_dirty());
    assert_eq!(view.draft.username, "mod_marcus");
}

#[tokio::test]
async fn test_close_button_closes_the_modal() {
    let mut ctx = open_marcus().await;

    ctx.harness_mut().get_by_label("Close").click();
    ctx.settle().await;

    assert!(!stored(&mut ctx).table.modal().is_open());
    assert!(ctx.harness().query_by_label("Save").is_none());
}
