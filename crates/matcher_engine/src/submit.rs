use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use std::time::Duration;

use futures_util::StreamExt;
use matcher_logging::{matcher_info, matcher_warn};
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use url::Url;

use crate::response::{interpret, RawResponse};
use crate::{FailureKind, SubmitError, SubmitOutcome, UploadFile};

/// Multipart field carrying the document.
pub const FILE_FIELD: &str = "cvFile";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    /// JSON contract; redirects only matter for non-JSON responses.
    Primary,
    /// Server-rendered contract; any redirect hands the page over.
    Legacy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Joined onto the base URL; an absolute URL replaces it.
    pub path: String,
    pub kind: EndpointKind,
}

impl Endpoint {
    pub fn primary(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EndpointKind::Primary,
        }
    }

    pub fn legacy(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EndpointKind::Legacy,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SubmitSettings {
    pub base_url: Url,
    /// Tried in order; only a transport failure moves on to the next one.
    pub endpoints: Vec<Endpoint>,
    /// Only connection setup is bounded; a slow answer is waited for.
    pub connect_timeout: Duration,
    pub redirect_limit: usize,
    pub max_response_bytes: u64,
}

impl SubmitSettings {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            endpoints: vec![Endpoint::primary("/api/analyze"), Endpoint::legacy("/upload")],
            connect_timeout: Duration::from_secs(10),
            redirect_limit: 5,
            max_response_bytes: 5 * 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self, file: &UploadFile) -> Result<SubmitOutcome, SubmitError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestSubmitter {
    settings: SubmitSettings,
}

impl ReqwestSubmitter {
    pub fn new(settings: SubmitSettings) -> Self {
        Self { settings }
    }

    fn build_client(
        &self,
        redirect_counter: Arc<AtomicUsize>,
    ) -> Result<reqwest::Client, SubmitError> {
        let redirect_limit = self.settings.redirect_limit;
        let policy = reqwest::redirect::Policy::custom(move |attempt| {
            let count = attempt.previous().len();
            redirect_counter.store(count, Ordering::Relaxed);
            if count >= redirect_limit {
                attempt.error("redirect limit exceeded")
            } else {
                attempt.follow()
            }
        });

        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .redirect(policy)
            .build()
            .map_err(|err| SubmitError::new(FailureKind::InvalidRequest, err.to_string()))
    }

    fn build_form(file: &UploadFile) -> Result<Form, SubmitError> {
        let body = reqwest::Body::from(file.content.clone());
        let part = Part::stream_with_length(body, file.content.len() as u64)
            .file_name(file.name.clone())
            .mime_str(&file.media_type)
            .map_err(|err| SubmitError::new(FailureKind::InvalidRequest, err.to_string()))?;
        Ok(Form::new().part(FILE_FIELD, part))
    }

    async fn attempt(
        &self,
        endpoint: &Endpoint,
        file: &UploadFile,
    ) -> Result<SubmitOutcome, SubmitError> {
        let url = self
            .settings
            .base_url
            .join(&endpoint.path)
            .map_err(|err| SubmitError::new(FailureKind::InvalidRequest, err.to_string()))?;
        let redirect_counter = Arc::new(AtomicUsize::new(0));
        let client = self.build_client(redirect_counter.clone())?;

        matcher_info!(
            "POST {} ({:?}) file={} bytes={}",
            url,
            endpoint.kind,
            file.name,
            file.content.len()
        );
        let response = client
            .post(url)
            .multipart(Self::build_form(file)?)
            .send()
            .await
            .map_err(|err| SubmitError::new(FailureKind::Transport, err.to_string()))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());
        let redirected_to = (redirect_counter.load(Ordering::Relaxed) > 0)
            .then(|| response.url().to_string());

        let body = self.read_body(response).await?;
        interpret(
            endpoint.kind,
            RawResponse {
                status,
                content_type,
                redirected_to,
                body,
            },
        )
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, SubmitError> {
        let max_bytes = self.settings.max_response_bytes;
        let too_large =
            || SubmitError::new(FailureKind::TooLarge { max_bytes }, "response too large");

        if response.content_length().is_some_and(|len| len > max_bytes) {
            return Err(too_large());
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk =
                chunk.map_err(|err| SubmitError::new(FailureKind::Network, err.to_string()))?;
            if bytes.len() as u64 + chunk.len() as u64 > max_bytes {
                return Err(too_large());
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl Submitter for ReqwestSubmitter {
    async fn submit(&self, file: &UploadFile) -> Result<SubmitOutcome, SubmitError> {
        let mut last_error = None;
        for endpoint in &self.settings.endpoints {
            match self.attempt(endpoint, file).await {
                Err(err) if err.kind == FailureKind::Transport => {
                    matcher_warn!("{} unreachable, trying next endpoint: {}", endpoint.path, err);
                    last_error = Some(err);
                }
                other => return other,
            }
        }
        Err(last_error
            .unwrap_or_else(|| SubmitError::new(FailureKind::Transport, "no endpoints configured")))
    }
}
