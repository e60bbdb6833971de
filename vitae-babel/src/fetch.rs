//! Resume fetch adapter
//!
//! Retrieves the server-rendered resume HTML for an access token. The remote
//! API answers `GET <base_url>/<token>` with a JSON envelope whose `html`
//! field carries the document; anything else is a [`FetchError`].

use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://resume.io/api/app/resumes";

/// Browser user agent; the API rejects unidentified clients.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid resume URL: {0}")]
    InvalidUrl(String),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("response is not a resume envelope: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("response contains no resume HTML")]
    EmptyContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    html: Option<String>,
}

/// Pull the `html` field out of a response body.
pub fn extract_html(body: &str) -> Result<String, FetchError> {
    let envelope: Envelope = serde_json::from_str(body)?;
    match envelope.html {
        Some(html) if !html.trim().is_empty() => Ok(html),
        _ => Err(FetchError::EmptyContent),
    }
}

/// Build `<base_url>/<token>`. The token must be a single path segment.
pub fn resume_url(base_url: &str, token: &str) -> Result<Url, FetchError> {
    let token = token.trim();
    if token.is_empty() || token.contains(['/', '?', '#']) {
        return Err(FetchError::InvalidUrl(format!(
            "token must be a single non-empty path segment, got {token:?}"
        )));
    }
    let mut url = Url::parse(base_url)
        .map_err(|e| FetchError::InvalidUrl(format!("{base_url}: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| FetchError::InvalidUrl(format!("{base_url} cannot have a path")))?
        .pop_if_empty()
        .push(token);
    Ok(url)
}

/// Blocking client for the resume API.
pub struct ResumeClient {
    client: Client,
    options: FetchOptions,
}

impl ResumeClient {
    pub fn new(options: FetchOptions) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(options.user_agent.as_str())
            .timeout(options.timeout)
            .build()?;
        Ok(Self { client, options })
    }

    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    /// Fetch the resume HTML for `token`.
    pub fn fetch_html(&self, token: &str) -> Result<String, FetchError> {
        let url = resume_url(&self.options.base_url, token)?;
        // The token is a credential; only the base URL is logged.
        log::info!("fetching resume from {}", self.options.base_url);

        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            log::error!("resume request failed with status {status}");
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text()?;
        let html = extract_html(&body)?;
        log::debug!("received {} bytes of resume HTML", html.len());
        Ok(html)
    }
}
