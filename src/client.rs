use crate::errors::{AppError, LoadError, RefreshError};
use crate::models::Channel;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

const UNKNOWN_ERROR: &str = "Error desconocido";
const REFRESH_FAILED: &str = "Error al actualizar los resúmenes";

/// Thin wrapper over the summaries backend. No timeouts and no retries.
#[derive(Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, AppError> {
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch_summaries(&self) -> Result<Vec<Channel>, LoadError> {
        let url = format!("{}/summaries", self.base_url);
        debug!("GET {url}");
        let channels = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Channel>>()
            .await?;
        Ok(channels)
    }

    pub async fn refresh(&self) -> Result<Vec<Channel>, RefreshError> {
        let url = format!("{}/refresh", self.base_url);
        debug!("POST {url}");
        let response = self.http.post(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.bytes().await {
                Ok(bytes) => bytes.to_vec(),
                Err(err) => {
                    warn!(%status, "failed to read refresh error body: {err}");
                    Vec::new()
                }
            };
            return Err(match rejection_message(&body) {
                Some(message) => RefreshError::Rejected { status, message },
                None => RefreshError::Unreadable { status },
            });
        }

        Ok(response.json::<Vec<Channel>>().await?)
    }
}

/// Builds the user-facing text for a rejected refresh from the response body.
///
/// The body is expected as `{"detail": {"message": ..., "instructions": ...}}`
/// but any JSON value is accepted: without a truthy `detail` the top-level
/// value is read instead. Instructions are appended after a blank line.
/// A literal `null` body has nothing to read at all and yields `None`.
pub fn rejection_message(body: &[u8]) -> Option<String> {
    let Ok(parsed) = serde_json::from_slice::<Value>(body) else {
        return Some(UNKNOWN_ERROR.to_string());
    };
    if parsed.is_null() {
        return None;
    }

    let detail = match parsed.get("detail") {
        Some(detail) if is_truthy(detail) => detail,
        _ => &parsed,
    };

    let mut message = non_empty_str(detail.get("message"))
        .unwrap_or(REFRESH_FAILED)
        .to_string();
    if let Some(instructions) = non_empty_str(detail.get("instructions")) {
        message.push_str("\n\n");
        message.push_str(instructions);
    }
    Some(message)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
}
