use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;

use crate::{FailureKind, FetchError, FetchMetadata, FetchOutput, FetchTarget};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// `None` waits as long as the server keeps the connection open.
    pub page_timeout: Option<Duration>,
    pub resource_timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub user_agent: String,
}

impl FetchSettings {
    pub fn timeout_for(&self, target: FetchTarget) -> Option<Duration> {
        match target {
            FetchTarget::Page => self.page_timeout,
            FetchTarget::Resource => self.resource_timeout,
        }
    }
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            page_timeout: None,
            resource_timeout: Some(Duration::from_secs(10)),
            connect_timeout: Some(Duration::from_secs(10)),
            redirect_limit: 10,
            max_bytes: 32 * 1024 * 1024,
            user_agent: concat!("resource-harvester/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Single-attempt HTTP GET. Non-2xx answers are returned as output, not errors.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str, target: FetchTarget) -> Result<FetchOutput, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit))
            .user_agent(settings.user_agent.clone());
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }

    fn too_large(&self, actual: u64) -> FetchError {
        FetchError::new(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual: Some(actual),
            },
            "response too large",
        )
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str, target: FetchTarget) -> Result<FetchOutput, FetchError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;

        let mut request = self.client.get(parsed);
        if let Some(timeout) = self.settings.timeout_for(target) {
            request = request.timeout(timeout);
        }
        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes && status.is_success() {
                return Err(self.too_large(content_len));
            }
        }

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                if status.is_success() {
                    return Err(self.too_large(next_len));
                }
                // Non-2xx bodies are truncated at the cap instead.
                let room = usize::try_from(max_bytes)
                    .unwrap_or(usize::MAX)
                    .saturating_sub(bytes.len());
                bytes.extend_from_slice(&chunk[..room.min(chunk.len())]);
                break;
            }
            bytes.extend_from_slice(&chunk);
        }

        let metadata = FetchMetadata {
            original_url: url.to_string(),
            final_url,
            content_type,
            headers,
            byte_len: bytes.len() as u64,
        };

        Ok(FetchOutput {
            status: status.as_u16(),
            bytes,
            metadata,
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return FetchError::new(FailureKind::RedirectLimitExceeded, err.to_string());
    }
    if err.is_builder() {
        return FetchError::new(FailureKind::InvalidUrl, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
