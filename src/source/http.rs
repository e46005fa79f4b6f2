//! Artifact source backed by the conversion service's HTTP API.

use super::ArtifactSource;
use crate::error::{FetchError, ListingError};
use crate::path::ListedUpload;
use async_trait::async_trait;
use serde::Deserialize;

/// Listing endpoint, relative to the base URL.
const SCAN_ENDPOINT: &str = "api/scan-uploads";

#[derive(Debug, Deserialize)]
struct ScanResponse {
    uploads: Vec<ScanUpload>,
}

#[derive(Debug, Deserialize)]
struct ScanUpload {
    path: String,
    navigation: Vec<String>,
}

/// Lists uploads via `GET {base}/api/scan-uploads` and fetches artifacts via `GET {base}/{location}`.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: &str) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("doctree-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, relative: &str) -> String {
        format!("{}/{}", self.base_url, relative.trim_start_matches('/'))
    }
}

#[async_trait]
impl ArtifactSource for HttpSource {
    async fn list(&self) -> Result<Vec<ListedUpload>, ListingError> {
        let url = self.url(SCAN_ENDPOINT);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ListingError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let scan: ScanResponse =
            serde_json::from_str(&body).map_err(|source| ListingError::Parse {
                origin: url.clone(),
                source,
            })?;

        tracing::debug!("Listed {} uploads from {}", scan.uploads.len(), url);
        Ok(scan
            .uploads
            .into_iter()
            .map(|upload| ListedUpload {
                navigation: upload.navigation,
                location: upload.path,
            })
            .collect())
    }

    async fn fetch(&self, location: &str) -> Result<String, FetchError> {
        let http_error = |source| FetchError::Http {
            location: location.to_string(),
            source,
        };

        let response = self
            .client
            .get(self.url(location))
            .send()
            .await
            .map_err(http_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                location: location.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(http_error)
    }

    fn describe(&self) -> String {
        format!("http {}", self.base_url)
    }
}
