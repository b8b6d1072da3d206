//! Thin HTTP client used by the REST dataset provider.
//!
//! Responses are read fully into a [`Response`] holding only owned data, so the
//! futures returned here are `Send` and can run inside commands.

use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Put,
    Patch,
    Delete,
}

#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    /// Lowercased header names.
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, HttpError> {
        serde_json::from_slice(&self.body).map_err(|e| HttpError::Decode(e.to_string()))
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HttpError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("could not encode request body: {0}")]
    Encode(String),
    #[error("could not decode response body: {0}")]
    Decode(String),
}

pub type HttpResult<T> = Result<T, HttpError>;

#[derive(Debug, Clone)]
pub struct RequestBuilder {
    client: reqwest::Client,
    method: Method,
    url: String,
    query: Vec<(String, String)>,
    headers: HashMap<String, String>,
    body: Option<Vec<u8>>,
}

impl RequestBuilder {
    fn new(client: reqwest::Client, method: Method, url: impl Into<String>) -> Self {
        Self {
            client,
            method,
            url: url.into(),
            query: Vec::new(),
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Appends a query parameter. Values are percent-encoded on send.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    pub fn json<T: serde::Serialize>(mut self, value: &T) -> HttpResult<Self> {
        let bytes = serde_json::to_vec(value).map_err(|e| HttpError::Encode(e.to_string()))?;
        self.body = Some(bytes);
        self.headers
            .insert("content-type".to_owned(), "application/json".to_owned());
        Ok(self)
    }

    pub async fn send(self) -> HttpResult<Response> {
        let mut request = match self.method {
            Method::Get => self.client.get(&self.url),
            Method::Put => self.client.put(&self.url),
            Method::Patch => self.client.patch(&self.url),
            Method::Delete => self.client.delete(&self.url),
        };

        if !self.query.is_empty() {
            request = request.query(&self.query);
        }
        for (name, value) in &self.headers {
            request = request.header(name, value);
        }
        if let Some(body) = self.body {
            request = request.body(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| HttpError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let mut headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                headers.insert(name.as_str().to_lowercase(), v.to_owned());
            }
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| HttpError::Network(e.to_string()))?
            .to_vec();

        Ok(Response {
            status,
            headers,
            body,
        })
    }
}

/// Shares one connection pool across requests.
#[derive(Debug, Clone, Default)]
pub struct Client {
    inner: reqwest::Client,
}

impl Client {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(self.inner.clone(), Method::Get, url)
    }

    pub fn put(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(self.inner.clone(), Method::Put, url)
    }

    pub fn patch(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(self.inner.clone(), Method::Patch, url)
    }

    pub fn delete(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(self.inner.clone(), Method::Delete, url)
    }
}
