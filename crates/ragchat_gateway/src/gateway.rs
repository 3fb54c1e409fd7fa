use std::time::Duration;

use ragchat_logging::{rag_debug, rag_trace};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::{ChatReply, FailureKind, GatewayError, MessageReply};

#[derive(Debug, Clone)]
pub struct GatewaySettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Covers answer generation on the backend, which can take a while.
    pub request_timeout: Duration,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
        }
    }
}

/// The two operations the controllers consume, plus a liveness probe.
///
/// Every non-2xx status, transport failure and undecodable body comes back as
/// `Err`; callers are not expected to tell them apart.
#[async_trait::async_trait]
pub trait Gateway: Send + Sync {
    async fn submit_question(&self, text: &str) -> Result<ChatReply, GatewayError>;

    async fn submit_indexing_request(&self, url: &str) -> Result<MessageReply, GatewayError>;

    async fn server_status(&self) -> Result<MessageReply, GatewayError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestGateway {
    base_url: Url,
    client: reqwest::Client,
}

impl ReqwestGateway {
    pub fn new(settings: GatewaySettings) -> Result<Self, GatewayError> {
        let base_url = parse_base_url(&settings.base_url)?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| GatewayError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str, query: Option<(&str, &str)>) -> Result<Url, GatewayError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|err| GatewayError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if let Some((key, value)) = query {
            url.query_pairs_mut().append_pair(key, value);
        }
        Ok(url)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, GatewayError> {
        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        rag_trace!("gateway response status={} bytes={}", status, body.len());

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        serde_json::from_slice(&body)
            .map_err(|err| GatewayError::new(FailureKind::Decode, err.to_string()))
    }
}

#[async_trait::async_trait]
impl Gateway for ReqwestGateway {
    async fn submit_question(&self, text: &str) -> Result<ChatReply, GatewayError> {
        let url = self.endpoint("chat", Some(("message", text)))?;
        rag_debug!("POST {}", url.path());
        self.execute(self.client.post(url)).await
    }

    async fn submit_indexing_request(&self, url: &str) -> Result<MessageReply, GatewayError> {
        let endpoint = self.endpoint("indexing", Some(("url", url)))?;
        rag_debug!("POST {}", endpoint.path());
        self.execute(self.client.post(endpoint)).await
    }

    async fn server_status(&self) -> Result<MessageReply, GatewayError> {
        let url = self.endpoint("", None)?;
        self.execute(self.client.get(url)).await
    }
}

/// Parses the configured base and makes sure relative joins keep its path.
fn parse_base_url(raw: &str) -> Result<Url, GatewayError> {
    let mut url = Url::parse(raw.trim())
        .map_err(|err| GatewayError::new(FailureKind::InvalidUrl, err.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(GatewayError::new(
            FailureKind::InvalidUrl,
            format!("{raw} cannot be used as a base url"),
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn status_error(status: StatusCode, body: &[u8]) -> GatewayError {
    let message = serde_json::from_slice::<MessageReply>(body)
        .map(|reply| reply.message)
        .unwrap_or_else(|_| status.to_string());
    GatewayError::new(FailureKind::HttpStatus(status.as_u16()), message)
}

fn map_reqwest_error(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        return GatewayError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return GatewayError::new(FailureKind::Decode, err.to_string());
    }
    GatewayError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::parse_base_url;
    use crate::FailureKind;

    #[test]
    fn base_url_gains_trailing_slash() {
        let url = parse_base_url("https://api.example.com/v1").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/");
        assert_eq!(url.join("chat").unwrap().path(), "/v1/chat");
    }

    #[test]
    fn base_url_must_be_absolute() {
        let err = parse_base_url("localhost").unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);
    }

    #[test]
    fn data_urls_are_rejected_as_base() {
        let err = parse_base_url("data:text/plain,hi").unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);
    }
}
