//! Shared HTTP client and runtime.
//!
//! Uses async reqwest internally but presents a blocking interface: each
//! call parks the calling thread on the shared runtime until the response
//! body is in memory.

use std::sync::LazyLock;
use std::time::Duration;

/// Connect timeout
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Error from an HTTP round trip
#[derive(Debug)]
pub enum HttpError {
    /// Non-2xx response. `body` is kept for callers that parse API errors.
    Status { status: u16, body: String },
    /// No response: connect, DNS, timeout or body read failure
    Transport { message: String },
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Status { status, .. } => write!(f, "HTTP {status}"),
            Self::Transport { message } => write!(f, "HTTP error: {message}"),
        }
    }
}

impl std::error::Error for HttpError {}

impl HttpError {
    /// Strip the URL from a reqwest error so API keys in query strings
    /// never reach the logs.
    pub fn from_reqwest(e: reqwest::Error) -> Self {
        Self::Transport {
            message: e.without_url().to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport { .. } => None,
        }
    }
}

/// Shared async HTTP client with connection pooling.
static SHARED_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .user_agent(concat!("tubeline/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("failed to build HTTP client")
});

/// Get shared HTTP client.
pub fn http_client() -> &'static reqwest::Client {
    &SHARED_CLIENT
}

/// Shared tokio runtime for HTTP operations.
pub static SHARED_RUNTIME: LazyLock<tokio::runtime::Runtime> = LazyLock::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .expect("failed to build tokio runtime")
});

/// Blocking GET with query parameters, returning the body as text.
pub fn get_text(url: &str, query: &[(&str, String)], timeout: Duration) -> Result<String, HttpError> {
    SHARED_RUNTIME.handle().block_on(async {
        let response = http_client()
            .get(url)
            .query(query)
            .timeout(timeout)
            .send()
            .await
            .map_err(HttpError::from_reqwest)?;

        let status = response.status();
        let body = response.text().await.map_err(HttpError::from_reqwest)?;
        if status.is_success() {
            Ok(body)
        } else {
            Err(HttpError::Status {
                status: status.as_u16(),
                body,
            })
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_status() {
        let err = HttpError::Status {
            status: 403,
            body: "{}".to_string(),
        };
        assert_eq!(format!("{err}"), "HTTP 403");
        assert_eq!(err.status(), Some(403));
    }

    #[test]
    fn display_transport() {
        let err = HttpError::Transport {
            message: "connection refused".to_string(),
        };
        assert_eq!(format!("{err}"), "HTTP error: connection refused");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn unreachable_host_is_transport_error() {
        // Port 9 on loopback: nothing listens, connect fails fast.
        let err = get_text("http://127.0.0.1:9/", &[], Duration::from_secs(2)).unwrap_err();
        assert!(matches!(err, HttpError::Transport { .. }));
    }
}
