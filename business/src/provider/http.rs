//! REST provider.
//!
//! | call          | request                                           |
//! |---------------|---------------------------------------------------|
//! | `list`        | `GET {base}/admin/{kind}?q=&page=&page_size=&...` |
//! | `get_by_id`   | `GET {base}/admin/{kind}/{id}`                    |
//! | `update`      | `PUT {base}/admin/{kind}/{id}`                    |
//! | `remove`      | `DELETE {base}/admin/{kind}/{id}`                 |
//! | `set_status`  | `PATCH {base}/admin/{kind}/{id}/status`           |
//!
//! `PUT` and `DELETE` send the record version as `If-Match`. A `409` or `412`
//! answer means another admin changed the record first.

use std::marker::PhantomData;

use async_trait::async_trait;
use log::{debug, warn};
use serde::Serialize;

use super::{DatasetProvider, ListPage, ListRequest};
use crate::error::{ProviderError, ProviderResult, ValidationErrors};
use crate::http::{Client, HttpError, Response};
use crate::record::Record;

#[derive(Debug, Clone)]
pub struct HttpProvider<R> {
    base_url: String,
    client: Client,
    _record: PhantomData<fn() -> R>,
}

#[derive(Serialize)]
struct StatusBody<S> {
    status: S,
}

impl<R: Record> HttpProvider<R> {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            client,
            _record: PhantomData,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/admin/{}", self.base_url, R::KIND.path())
    }

    fn record_url(&self, id: R::Id) -> String {
        format!("{}/{id}", self.collection_url())
    }

    fn decode<T: serde::de::DeserializeOwned>(
        &self,
        response: &Response,
        id: Option<String>,
    ) -> ProviderResult<T> {
        self.check(response, id)?;
        response.json().map_err(transport)
    }

    /// Maps non-2xx statuses onto provider errors.
    fn check(&self, response: &Response, id: Option<String>) -> ProviderResult<()> {
        let id = || id.clone().unwrap_or_default();
        match response.status {
            s if (200..300).contains(&s) => Ok(()),
            404 => Err(ProviderError::not_found(R::KIND, id())),
            409 | 412 => Err(ProviderError::conflict(R::KIND, id())),
            422 => {
                let errors = response.json::<ValidationErrors>().unwrap_or_else(|e| {
                    warn!("Unreadable validation body from provider: {e}");
                    ValidationErrors::new()
                });
                Err(ProviderError::Validation(errors))
            }
            status => Err(ProviderError::transport(format!(
                "{} returned HTTP {status}: {}",
                R::KIND,
                response.text()
            ))),
        }
    }
}

/// Entity tag for a record version.
fn if_match(version: u64) -> String {
    format!("\"{version}\"")
}

fn transport(err: HttpError) -> ProviderError {
    ProviderError::transport(err.to_string())
}

#[async_trait]
impl<R: Record> DatasetProvider<R> for HttpProvider<R> {
    async fn list(&self, request: &ListRequest) -> ProviderResult<ListPage<R>> {
        let mut builder = self
            .client
            .get(self.collection_url())
            .query("page", request.page.to_string())
            .query("page_size", request.page_size.to_string());

        let query = request.criteria.query.trim();
        if !query.is_empty() {
            builder = builder.query("q", query);
        }
        for (name, value) in request.criteria.filters.active() {
            builder = builder.query(name.as_str(), value.as_str());
        }

        debug!("Listing {} page {}", R::KIND, request.page);
        let response = builder.send().await.map_err(transport)?;
        self.decode(&response, None)
    }

    async fn get_by_id(&self, id: R::Id) -> ProviderResult<R> {
        let response = self
            .client
            .get(self.record_url(id))
            .send()
            .await
            .map_err(transport)?;
        self.decode(&response, Some(id.to_string()))
    }

    async fn update(&self, record: R) -> ProviderResult<R> {
        let id = record.id();
        let response = self
            .client
            .put(self.record_url(id))
            .header("If-Match", if_match(record.version()))
            .json(&record)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        self.decode(&response, Some(id.to_string()))
    }

    async fn remove(&self, id: R::Id, version: u64) -> ProviderResult<()> {
        let response = self
            .client
            .delete(self.record_url(id))
            .header("If-Match", if_match(version))
            .send()
            .await
            .map_err(transport)?;
        self.check(&response, Some(id.to_string()))
    }

    async fn set_status(&self, id: R::Id, status: R::Status) -> ProviderResult<R> {
        let response = self
            .client
            .patch(format!("{}/status", self.record_url(id)))
            .json(&StatusBody { status })
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        self.decode(&response, Some(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::entities::{Comment, CommentStatus, Post, User};
    use crate::seed;
    use crate::table::{Criteria, FilterChoice, FilterSet};

    #[tokio::test]
    async fn list_sends_criteria_as_query() {
        let server = MockServer::start().await;
        let users = seed::users();
        Mock::given(method("GET"))
            .and(path("/admin/users"))
            .and(query_param("q", "jane"))
            .and(query_param("page", "2"))
            .and(query_param("page_size", "10"))
            .and(query_param("role", "Admin"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "records": vec![users[0].clone()],
                "total_count": 11
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = HttpProvider::<User>::new(server.uri());
        let request = ListRequest::new(
            Criteria::new(
                "  jane ",
                FilterSet::new().with("role", FilterChoice::only("Admin")),
            ),
            2,
            10,
        );
        let page = provider.list(&request).await.expect("list");

        assert_eq!(page.total_count, 11);
        assert_eq!(page.records, vec![users[0].clone()]);
    }

    #[tokio::test]
    async fn set_status_patches_the_status_route() {
        let server = MockServer::start().await;
        let mut comment = seed::comments()[0].clone();
        comment.status = CommentStatus::Spam;
        Mock::given(method("PATCH"))
            .and(path(format!("/admin/comments/{}/status", comment.id)))
            .and(body_json(serde_json::json!({ "status": "Spam" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(&comment))
            .expect(1)
            .mount(&server)
            .await;

        let provider = HttpProvider::<Comment>::new(server.uri());
        let updated = provider
            .set_status(comment.id, CommentStatus::Spam)
            .await
            .expect("set status");
        assert_eq!(updated, comment);
    }

    #[tokio::test]
    async fn status_codes_map_to_error_kinds() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/posts/1"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/admin/posts/2"))
            .respond_with(ResponseTemplate::new(409))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/admin/posts/3"))
            .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
                "errors": [{ "field": "title", "message": "already taken" }]
            })))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/admin/posts/4"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let provider = HttpProvider::<Post>::new(format!("{}/", server.uri()));

        assert_eq!(
            provider.get_by_id(1).await,
            Err(ProviderError::not_found(crate::record::EntityKind::Post, 1))
        );
        assert!(matches!(
            provider.remove(2, 1).await,
            Err(ProviderError::Conflict { .. })
        ));

        let mut post = seed::posts()[0].clone();
        post.id = 3;
        match provider.update(post).await {
            Err(ProviderError::Validation(errors)) => {
                assert_eq!(
                    errors.for_field("title").collect::<Vec<_>>(),
                    vec!["already taken"]
                );
            }
            other => panic!("expected validation error, got {other:?}"),
        }

        assert!(matches!(
            provider.remove(4, 1).await,
            Err(ProviderError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn writes_send_the_version_as_if_match() {
        let server = MockServer::start().await;
        let mut user = seed::users()[1].clone();
        user.username = "marcus_mod".to_string();
        let mut saved = user.clone();
        saved.version = user.version + 1;
        Mock::given(method("PUT"))
            .and(path(format!("/admin/users/{}", user.id)))
            .and(header("if-match", "\"1\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(&saved))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path(format!("/admin/users/{}", user.id)))
            .and(header("if-match", "\"2\""))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let provider = HttpProvider::<User>::new(server.uri());
        assert_eq!(provider.update(user).await, Ok(saved.clone()));
        assert_eq!(provider.remove(saved.id, saved.version).await, Ok(()));
    }

    #[tokio::test]
    async fn failed_precondition_is_a_conflict() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/admin/comments/1"))
            .respond_with(ResponseTemplate::new(412))
            .mount(&server)
            .await;

        let provider = HttpProvider::<Comment>::new(server.uri());
        assert_eq!(
            provider.update(seed::comments()[0].clone()).await,
            Err(ProviderError::conflict(crate::record::EntityKind::Comment, 1))
        );
    }

    #[tokio::test]
    async fn unreachable_server_is_transport() {
        // Reserve a port, then free it so nothing listens there.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .and_then(|listener| listener.local_addr())
            .expect("bind a free port")
            .port();

        let provider = HttpProvider::<User>::new(format!("http://127.0.0.1:{port}"));
        assert!(matches!(
            provider.get_by_id(1).await,
            Err(ProviderError::Transport(_))
        ));
    }
}
