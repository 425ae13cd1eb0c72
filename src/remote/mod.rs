use std::env;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::error::AppError;
use crate::models::Member;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("remote transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("remote registry returned HTTP {0}")]
    Http(StatusCode),

    #[error("malformed remote document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("remote registry is not configured")]
    Unconfigured,
}

#[derive(Clone, Debug)]
pub struct RemoteConfig {
    pub base_url: String,
    pub doc_id: String,
    pub api_key: String,
}

impl RemoteConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let base_url = env::var("REGISTRY_BASE_URL")
            .map_err(|_| AppError::Config("REGISTRY_BASE_URL is not set".to_string()))?;
        let doc_id = env::var("REGISTRY_DOC_ID")
            .map_err(|_| AppError::Config("REGISTRY_DOC_ID is not set".to_string()))?;
        let api_key = env::var("REGISTRY_API_KEY")
            .map_err(|_| AppError::Config("REGISTRY_API_KEY is not set".to_string()))?;

        Ok(Self {
            base_url,
            doc_id,
            api_key,
        })
    }
}

/// Whole-document access to the hosted member list. There are no partial
/// updates and no conditional writes; concurrent writers race and the last
/// writer wins.
#[async_trait]
pub trait RemoteRegistry: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Member>, RemoteError>;
    async fn replace_all(&self, members: &[Member]) -> Result<(), RemoteError>;
}

/// Reads wrap the list in a `record` envelope; writes send the bare list.
#[derive(Debug, Deserialize)]
struct DocumentEnvelope {
    record: Vec<Member>,
}

pub struct HttpRemoteRegistry {
    client: Client,
    config: RemoteConfig,
}

impl HttpRemoteRegistry {
    pub fn new(config: RemoteConfig) -> Result<Self, RemoteError> {
        let client = Client::builder().build()?;
        Ok(Self { client, config })
    }

    fn document_url(&self) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.doc_id
        )
    }
}

#[async_trait]
impl RemoteRegistry for HttpRemoteRegistry {
    async fn fetch_all(&self) -> Result<Vec<Member>, RemoteError> {
        let url = format!("{}/latest", self.document_url());

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RemoteError::Http(response.status()));
        }

        let body = response.text().await?;
        let envelope: DocumentEnvelope = serde_json::from_str(&body)?;
        debug!("fetched {} members from remote registry", envelope.record.len());
        Ok(envelope.record)
    }

    async fn replace_all(&self, members: &[Member]) -> Result<(), RemoteError> {
        let response = self
            .client
            .put(self.document_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&members)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            debug!("remote replace rejected: {} {}", status, body);
            return Err(RemoteError::Http(status));
        }

        debug!("replaced remote registry with {} members", members.len());
        Ok(())
    }
}

/// Stands in when no remote registry is configured. Fetches fail so the
/// registry stays on its local snapshot; pushes succeed silently.
pub struct NoopRemoteRegistry;

#[async_trait]
impl RemoteRegistry for NoopRemoteRegistry {
    async fn fetch_all(&self) -> Result<Vec<Member>, RemoteError> {
        Err(RemoteError::Unconfigured)
    }

    async fn replace_all(&self, _members: &[Member]) -> Result<(), RemoteError> {
        Ok(())
    }
}
