//! HTTP Remote
//!
//! JSON REST client for the positions resource.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use async_trait::async_trait;

use super::PositionRemote;
use crate::config::{ConfigError, RemoteConfig};
use crate::domain::{Position, PositionDraft};
use crate::error::{RemoteError, RemoteResult};

/// Characters escaped inside a single path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

pub struct HttpPositionRemote {
    client: Client,
    config: RemoteConfig,
}

impl HttpPositionRemote {
    pub fn new(config: RemoteConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let builder = Client::builder();
        // The fetch backend has no client-wide timeout
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(std::time::Duration::from_millis(config.timeout_ms));
        let client = builder
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    fn collection_url(&self) -> &str {
        self.config.collection_url()
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/{}", self.collection_url(), utf8_percent_encode(id, PATH_SEGMENT))
    }

    /// Map non-2xx answers to `Rejected`, keeping the body for diagnostics
    async fn check_status(response: Response) -> RemoteResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(RemoteError::Rejected {
            status: status.as_u16(),
            body,
        })
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> RemoteResult<T> {
        let response = Self::check_status(response).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait(?Send)]
impl PositionRemote for HttpPositionRemote {
    async fn list(&self) -> RemoteResult<Vec<Position>> {
        let url = self.collection_url();
        log::debug!("[HTTP] GET {}", url);
        let response = self.client.get(url).send().await?;
        Self::read_json(response).await
    }

    async fn get(&self, id: &str) -> RemoteResult<Position> {
        let url = self.item_url(id);
        log::debug!("[HTTP] GET {}", url);
        let response = self.client.get(&url).send().await?;
        Self::read_json(response).await
    }

    async fn create(&self, draft: &PositionDraft) -> RemoteResult<Position> {
        let url = self.collection_url();
        log::debug!("[HTTP] POST {}", url);
        let response = self.client.post(url).json(draft).send().await?;
        Self::read_json(response).await
    }

    async fn update(&self, position: &Position) -> RemoteResult<Position> {
        let url = self.item_url(&position.id);
        log::debug!("[HTTP] PUT {}", url);
        let response = self.client.put(&url).json(position).send().await?;
        Self::read_json(response).await
    }

    async fn delete(&self, id: &str) -> RemoteResult<()> {
        let url = self.item_url(id);
        log::debug!("[HTTP] DELETE {}", url);
        let response = self.client.delete(&url).send().await?;
        // Body (if any) is ignored
        Self::check_status(response).await.map(|_| ())
    }
}
