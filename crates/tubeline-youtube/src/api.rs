//! YouTube Data API search client

use std::time::Duration;

use tubeline_core::{HttpError, get_text};

use crate::schema::ResultPage;
use crate::state::VideoDuration;

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Upper bound of `maxResults` accepted by `search.list`
pub const MAX_PAGE_SIZE: u8 = 50;

/// One `search.list` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchRequest<'a> {
    pub query: &'a str,
    pub duration: VideoDuration,
    /// `relevanceLanguage`, e.g. `ru`
    pub language: Option<&'a str>,
    /// 0..=50
    pub page_size: u8,
    pub page_token: Option<&'a str>,
}

impl SearchRequest<'_> {
    /// Query string pairs, without the API key.
    ///
    /// Always video-only with safe search off.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("part", "snippet".to_string()),
            ("type", "video".to_string()),
            ("q", self.query.to_string()),
            ("videoDuration", self.duration.api_name().to_string()),
            ("maxResults", self.page_size.min(MAX_PAGE_SIZE).to_string()),
            ("safeSearch", "none".to_string()),
        ];
        if let Some(lang) = self.language {
            params.push(("relevanceLanguage", lang.to_string()));
        }
        if let Some(token) = self.page_token {
            params.push(("pageToken", token.to_string()));
        }
        params
    }
}

/// Failure of a single search call. The pipeline treats every variant as
/// an empty page.
#[derive(Debug)]
pub enum SearchError {
    /// Request never got a response
    Transport(String),
    /// API answered with a non-2xx status
    Remote { status: u16, message: String },
    /// Response body was not a search list
    Decode(serde_json::Error),
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "transport error: {msg}"),
            Self::Remote { status, message } => write!(f, "API error {status}: {message}"),
            Self::Decode(e) => write!(f, "invalid response: {e}"),
        }
    }
}

impl std::error::Error for SearchError {}

impl From<HttpError> for SearchError {
    fn from(e: HttpError) -> Self {
        match e {
            HttpError::Status { status, body } => Self::Remote {
                status,
                message: api_error_message(&body).unwrap_or_else(|| "no error message".to_string()),
            },
            HttpError::Transport { message } => Self::Transport(message),
        }
    }
}

/// Pull `error.message` (and the first `reason`) out of an API error body
fn api_error_message(body: &str) -> Option<String> {
    let parsed: serde_json::Value = serde_json::from_str(body).ok()?;
    let error = parsed.get("error")?;
    let message = error.get("message")?.as_str()?;
    let reason = error
        .get("errors")
        .and_then(|e| e.get(0))
        .and_then(|e| e.get("reason"))
        .and_then(|r| r.as_str());
    Some(match reason {
        Some(reason) => format!("{message} ({reason})"),
        None => message.to_string(),
    })
}

/// Source of result pages. Implemented by [`YouTubeClient`]; tests swap in
/// canned pages.
pub trait SearchClient {
    fn search(&self, request: &SearchRequest<'_>) -> Result<ResultPage, SearchError>;
}

/// `search.list` over HTTPS with an API key
pub struct YouTubeClient {
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl std::fmt::Debug for YouTubeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YouTubeClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl YouTubeClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        self.base_url = base_url;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn search_url(&self) -> String {
        format!("{}search", self.base_url)
    }
}

impl SearchClient for YouTubeClient {
    fn search(&self, request: &SearchRequest<'_>) -> Result<ResultPage, SearchError> {
        let mut params = request.query_params();
        params.push(("key", self.api_key.clone()));

        log::debug!(
            "search.list q={:?} pageToken={:?}",
            request.query,
            request.page_token
        );
        let body = get_text(&self.search_url(), &params, self.timeout)?;
        serde_json::from_str(&body).map_err(SearchError::Decode)
    }
}
