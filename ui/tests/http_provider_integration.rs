//! The console against a mocked admin API.

mod common;

use agora_business::admin::save_record;
use agora_business::{AdminTableState, User, seed};
use agora_ui::pages::Page;
use kittest::Queryable;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::TestCtx;

fn list_body<T: serde::Serialize>(records: &[T]) -> serde_json::Value {
    serde_json::json!({
        "records": records,
        "total_count": records.len(),
    })
}

/// Serves two users and empty posts, comments and audit logs.
async fn setup_server() -> MockServer {
    let mock_server = MockServer::start().await;
    let users: Vec<User> = seed::users().into_iter().take(2).collect();

    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body(&users)))
        .mount(&mock_server)
        .await;
    for collection in ["posts", "comments", "audit-logs"] {
        Mock::given(method("GET"))
            .and(path(format!("/admin/{collection}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(list_body::<User>(&[])))
            .mount(&mock_server)
            .await;
    }
    mock_server
}

fn users(ctx: &mut TestCtx<'_>) -> AdminTableState<User> {
    ctx.state_mut()
        .ctx
        .state::<AdminTableState<User>>()
        .cloned()
        .expect("users registered")
}

#[tokio::test]
async fn test_users_load_from_api() {
    let mut ctx = TestCtx::with_server(setup_server().await).await;
    ctx.open(Page::Users);

    let state = users(&mut ctx);
    assert!(state.is_loaded());
    assert_eq!(state.table.records().len(), 2);

    let harness = ctx.harness();
    assert!(harness.query_by_label("jane_admin").is_some());
    assert!(harness.query_by_label("mod_marcus").is_some());
    assert!(harness.query_by_label("Showing 1-2 of 2").is_some());
}

#[tokio::test]
async fn test_server_error_is_reported() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let mut ctx = TestCtx::with_server(mock_server).await;
    ctx.open(Page::Users);

    assert!(users(&mut ctx).last_error().is_some());
    assert!(
        ctx.notices()
            .iter()
            .any(|m| m.starts_with("Could not reload users"))
    );
}

#[tokio::test]
async fn test_conflict_reloads_the_list() {
    let mock_server = setup_server().await;
    let marcus = seed::users()[1].clone();
    Mock::given(method("PUT"))
        .and(path(format!("/admin/users/{}", marcus.id)))
        .respond_with(ResponseTemplate::new(409))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut ctx = TestCtx::with_server(mock_server).await;
    ctx.open(Page::Users);

    let mut edited = marcus.clone();
    edited.username = "marcus_mod".to_owned();
    save_record(&mut ctx.state_mut().ctx, edited).expect("inside a runtime");
    ctx.settle().await;

    let state = users(&mut ctx);
    assert_eq!(state.table.get(marcus.id), Some(&marcus));
    assert!(!state.table.is_in_flight(marcus.id));
    assert!(
        ctx.notices()
            .iter()
            .any(|m| m.ends_with("The list was reloaded."))
    );
}
