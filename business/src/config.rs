use std::any::Any;
use std::env::vars;

use agora_states::State;
use log::info;
use serde::Deserialize;
use thiserror::Error;

use crate::record::EntityKind;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("could not read environment: {0}")]
    Env(String),
    #[error("{name} must be at least 1")]
    ZeroPageSize { name: &'static str },
    #[error("AGORA_API_BASE_URL must start with http:// or https://, got {0}")]
    InvalidBaseUrl(String),
}

/// Console settings read from `AGORA_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminConfig {
    api_base_url: Option<String>,
    users_page_size: usize,
    posts_page_size: usize,
    comments_page_size: usize,
    audit_page_size: usize,
    fetch_batch: usize,
}

// Every field is optional; defaults are applied in `from_raw`.
#[derive(Deserialize)]
struct RawConfig {
    agora_api_base_url: Option<String>,
    agora_users_page_size: Option<usize>,
    agora_posts_page_size: Option<usize>,
    agora_comments_page_size: Option<usize>,
    agora_audit_page_size: Option<usize>,
    agora_fetch_batch: Option<usize>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            api_base_url: None,
            users_page_size: 10,
            posts_page_size: 10,
            comments_page_size: 10,
            audit_page_size: 20,
            fetch_batch: 100,
        }
    }
}

impl AdminConfig {
    pub fn init() -> Result<Self, ConfigError> {
        info!("Loading configuration from environment variables");
        Self::from_vars(vars())
    }

    pub fn from_vars<S: AsRef<str>>(
        vars: impl IntoIterator<Item = (S, S)>,
    ) -> Result<Self, ConfigError> {
        let raw: RawConfig =
            serde_env::from_iter(vars).map_err(|e| ConfigError::Env(e.to_string()))?;
        Self::from_raw(raw)
    }

    /// Config pointing at a REST backend, defaults otherwise.
    pub fn with_api(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: Some(base_url.into()),
            ..Self::default()
        }
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let page_size = |value: Option<usize>, default: usize, name: &'static str| match value {
            Some(0) => Err(ConfigError::ZeroPageSize { name }),
            Some(size) => Ok(size),
            None => Ok(default),
        };

        let api_base_url = match raw.agora_api_base_url {
            Some(url) if url.trim().is_empty() => None,
            Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
                info!("Using REST provider at {url}");
                Some(url)
            }
            Some(url) => return Err(ConfigError::InvalidBaseUrl(url)),
            None => {
                info!("AGORA_API_BASE_URL not set, serving seeded in-memory data");
                None
            }
        };

        Ok(Self {
            api_base_url,
            users_page_size: page_size(
                raw.agora_users_page_size,
                defaults.users_page_size,
                "AGORA_USERS_PAGE_SIZE",
            )?,
            posts_page_size: page_size(
                raw.agora_posts_page_size,
                defaults.posts_page_size,
                "AGORA_POSTS_PAGE_SIZE",
            )?,
            comments_page_size: page_size(
                raw.agora_comments_page_size,
                defaults.comments_page_size,
                "AGORA_COMMENTS_PAGE_SIZE",
            )?,
            audit_page_size: page_size(
                raw.agora_audit_page_size,
                defaults.audit_page_size,
                "AGORA_AUDIT_PAGE_SIZE",
            )?,
            fetch_batch: page_size(
                raw.agora_fetch_batch,
                defaults.fetch_batch,
                "AGORA_FETCH_BATCH",
            )?,
        })
    }

    pub fn api_base_url(&self) -> Option<&str> {
        self.api_base_url.as_deref()
    }

    pub fn page_size(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::User => self.users_page_size,
            EntityKind::Post => self.posts_page_size,
            EntityKind::Comment => self.comments_page_size,
            EntityKind::AuditLog => self.audit_page_size,
        }
    }

    /// Page size used when pulling a whole dataset from the provider.
    pub fn fetch_batch(&self) -> usize {
        self.fetch_batch
    }
}

impl State for AdminConfig {
    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }
}
