use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use url::Url;
use wikiloop_logging::{wl_debug, wl_info};

use crate::wire::parse_reply;
use crate::{FailureKind, JourneyError, JourneyRequest, Waypoint};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/api/wikiloop";

const JSON: &str = "application/json";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Journey computation endpoint; receives the POSTed request.
    pub endpoint: String,
    /// `None` waits for the service as long as it takes.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: None,
        }
    }
}

#[async_trait::async_trait]
pub trait JourneyClient: Send + Sync {
    /// Asks the service for a path between the two articles.
    async fn request_journey(
        &self,
        request: &JourneyRequest,
    ) -> Result<Vec<Waypoint>, JourneyError>;

    /// Checks that the service answers at all.
    async fn probe(&self) -> Result<(), JourneyError> {
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ReqwestJourneyClient {
    endpoint: Url,
    client: reqwest::Client,
}

impl ReqwestJourneyClient {
    pub fn new(settings: ClientSettings) -> Result<Self, JourneyError> {
        let endpoint = Url::parse(&settings.endpoint).map_err(|err| {
            JourneyError::new(
                FailureKind::InvalidEndpoint,
                format!("{}: {err}", settings.endpoint),
            )
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(JourneyError::new(
                FailureKind::InvalidEndpoint,
                format!("{}: expected an http or https url", settings.endpoint),
            ));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| JourneyError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl JourneyClient for ReqwestJourneyClient {
    async fn request_journey(
        &self,
        request: &JourneyRequest,
    ) -> Result<Vec<Waypoint>, JourneyError> {
        let body = serde_json::to_vec(request)
            .map_err(|err| JourneyError::new(FailureKind::MalformedBody, err.to_string()))?;

        wl_info!(
            "POST {} start_url={} stop_url={}",
            self.endpoint,
            request.start_url,
            request.stop_url
        );
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, JSON)
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        // The body is interpreted whatever the status: the service reports
        // its own failures as `{"error": ...}` with a 500.
        let status = response.status();
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        wl_debug!("journey response status={} len={}", status, bytes.len());

        parse_reply(&bytes)
    }

    async fn probe(&self) -> Result<(), JourneyError> {
        let root = self
            .endpoint
            .join("/")
            .map_err(|err| JourneyError::new(FailureKind::InvalidEndpoint, err.to_string()))?;
        let response = self
            .client
            .get(root)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(JourneyError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        Ok(())
    }
}

fn map_reqwest_error(err: reqwest::Error) -> JourneyError {
    if err.is_timeout() {
        return JourneyError::new(FailureKind::Timeout, err.to_string());
    }
    JourneyError::new(FailureKind::Network, err.to_string())
}
