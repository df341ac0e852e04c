use serde::Deserialize;
use thiserror::Error;

/// Error body returned by the model service on failure
#[derive(Debug, Clone, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Error type shared by every HTTP client
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Non-2xx response. `error` holds the body's `error` field when there is one.
    #[error("HTTP Error ({status}): {}", http_message(.error, .body))]
    Http {
        status: u16,
        error: Option<String>,
        body: String,
    },
    /// Network/request error
    #[error("Request Error: {0}")]
    Request(String),
    /// Deserialization error
    #[error("Deserialization Error: {0}")]
    Deserialization(String),
}

fn http_message<'a>(error: &'a Option<String>, body: &'a str) -> &'a str {
    error.as_deref().unwrap_or(body)
}

impl ApiError {
    /// The service-provided `error` message, if the response carried one
    pub fn service_message(&self) -> Option<&str> {
        match self {
            ApiError::Http { error, .. } => error.as_deref(),
            _ => None,
        }
    }

    /// Build an error from a non-2xx status and its raw body
    pub fn from_status(status: u16, body: &str) -> Self {
        let error = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .filter(|e| !e.trim().is_empty());

        ApiError::Http {
            status,
            error,
            body: body.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Deserialization(format!("Failed to parse response: {}", e))
        } else {
            ApiError::Request(format!("Request failed: {}", e))
        }
    }
}

/// Turn a non-success response into an `ApiError`, consuming the body
pub(crate) async fn handle_error_response(response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();
    let body_text = response.text().await.unwrap_or_default();

    if status >= 500 {
        tracing::warn!("Server error {}: {}", status, body_text);
    }

    ApiError::from_status(status, &body_text)
}
