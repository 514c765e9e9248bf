use futures::Stream;
use futures::TryStreamExt;
use reqwest::Client;
use thiserror::Error;
use url::Url;

use super::models::{ApiConfig, StreamRequestBody};
use crate::domain::{DownloadRequest, TransportFailure};

const STREAM_PATH: &str = "api/stream";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Endpoint returned status {0}")]
    Status(u16),

    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, ApiError>;

impl From<ApiError> for TransportFailure {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Status(code) => TransportFailure::Status(code),
            other => TransportFailure::Network(other.to_string()),
        }
    }
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Builds `<base>/api/stream?format=..&quality=..`
    pub fn stream_url(&self, request: &DownloadRequest) -> Result<Url> {
        let base = self.config.base_url.trim_end_matches('/');
        let mut url = Url::parse(&format!("{}/{}", base, STREAM_PATH))?;
        url.query_pairs_mut()
            .append_pair("format", request.format.wire_value())
            .append_pair("quality", &request.quality);
        Ok(url)
    }

    /// Issues the conversion request and returns the body as a byte stream.
    /// Returns (total_size, stream)
    pub async fn open_stream(
        &self,
        request: &DownloadRequest,
    ) -> Result<(Option<u64>, impl Stream<Item = Result<bytes::Bytes>>)> {
        let url = self.stream_url(request)?;
        tracing::debug!(%url, "issuing stream request");

        let response = self
            .client
            .post(url)
            .json(&StreamRequestBody {
                url: request.link.clone(),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        let total_size = response.content_length();
        let stream = response.bytes_stream().map_err(ApiError::RequestError);

        Ok((total_size, stream))
    }
}
