//! Planning service HTTP client
//!
//! Wraps the two endpoints of the planning service: `POST /plan_trip` to
//! search for trip options and `POST /choose_trip` to expand one of them.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::data::{SearchCriteria, TripDetails, TripOption};

/// Base URL used when none is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Longest error body quoted back in an error message
const MAX_DETAIL_LEN: usize = 200;

/// Errors that can occur when talking to the planning service
#[derive(Debug, Error)]
pub enum ServiceError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("Service returned {status}: {detail}")]
    Status { status: StatusCode, detail: String },

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Choices are 1-based
    #[error("Trip choice must be 1 or greater")]
    InvalidChoice,
}

/// Body of `POST /choose_trip`
#[derive(Debug, Serialize)]
struct ChoiceRequest {
    choice: u32,
}

/// Error body produced by the service framework
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// Client for the planning service
#[derive(Debug, Clone)]
pub struct PlannerClient {
    client: Client,
    base_url: String,
}

impl Default for PlannerClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl PlannerClient {
    /// Create a new PlannerClient with no request timeout
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a new PlannerClient with a custom HTTP client
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Create a new PlannerClient, optionally bounding every request
    ///
    /// # Arguments
    /// * `base_url` - Service root, e.g. `http://localhost:8000`
    /// * `timeout` - Per-request timeout; `None` waits indefinitely
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ServiceError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, base_url))
    }

    /// Service root this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Search for trips matching the criteria
    ///
    /// # Returns
    /// * `Ok(Vec<TripOption>)` - Options in service order; may be empty
    /// * `Err(ServiceError)` - If the request, status or parsing fails
    pub async fn plan_trip(
        &self,
        criteria: &SearchCriteria,
    ) -> Result<Vec<TripOption>, ServiceError> {
        info!(
            vacation_type = criteria.vacation_type.as_str(),
            start = %criteria.start_date,
            end = %criteria.end_date,
            budget = criteria.budget,
            "searching trips"
        );
        let options: Vec<TripOption> = self.post("plan_trip", criteria).await?;
        info!(count = options.len(), "received trip options");
        Ok(options)
    }

    /// Fetch details for an option of the latest search
    ///
    /// # Arguments
    /// * `choice` - 1-based position of the option in the latest search
    pub async fn choose_trip(&self, choice: u32) -> Result<TripDetails, ServiceError> {
        if choice == 0 {
            return Err(ServiceError::InvalidChoice);
        }
        info!(choice, "choosing trip");
        let details: TripDetails = self.post("choose_trip", &ChoiceRequest { choice }).await?;
        info!(destination = %details.destination, "received trip details");
        Ok(details)
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ServiceError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.client.post(self.endpoint(path)).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ServiceError::Status {
                status,
                detail: error_detail(&text),
            });
        }

        Ok(serde_json::from_str(&text)?)
    }
}

/// Extracts a readable message from an error body
///
/// The service reports errors as `{"detail": ...}`; anything else is quoted
/// verbatim, shortened to a single line.
fn error_detail(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return match parsed.detail {
            serde_json::Value::String(message) => message,
            other => other.to_string(),
        };
    }

    let line = body.lines().next().unwrap_or("").trim();
    if line.is_empty() {
        return "no details".to_string();
    }
    line.chars().take(MAX_DETAIL_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = PlannerClient::new("http://planner.local:8000/");
        assert_eq!(client.base_url(), "http://planner.local:8000");
        assert_eq!(
            client.endpoint("plan_trip"),
            "http://planner.local:8000/plan_trip"
        );
    }

    #[test]
    fn test_default_base_url() {
        let client = PlannerClient::default();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_with_timeout_builds_client() {
        let client =
            PlannerClient::with_timeout("http://localhost:9000", Some(Duration::from_secs(5)))
                .expect("client should build");
        assert_eq!(client.base_url(), "http://localhost:9000");
    }

    #[test]
    fn test_choice_request_body() {
        let json = serde_json::to_string(&ChoiceRequest { choice: 2 }).unwrap();
        assert_eq!(json, r#"{"choice":2}"#);
    }

    #[test]
    fn test_error_detail_from_string_detail() {
        assert_eq!(
            error_detail(r#"{"detail": "Invalid choice"}"#),
            "Invalid choice"
        );
    }

    #[test]
    fn test_error_detail_from_validation_detail() {
        let detail = error_detail(r#"{"detail": [{"loc": ["body", "budget"]}]}"#);
        assert!(detail.contains("budget"));
    }

    #[test]
    fn test_error_detail_from_plain_text() {
        assert_eq!(
            error_detail("Internal Server Error\nstack trace"),
            "Internal Server Error"
        );
        assert_eq!(error_detail(""), "no details");
    }

    #[test]
    fn test_error_detail_is_truncated() {
        let body = "x".repeat(MAX_DETAIL_LEN * 2);
        assert_eq!(error_detail(&body).len(), MAX_DETAIL_LEN);
    }

    #[tokio::test]
    async fn test_choose_trip_rejects_zero() {
        let client = PlannerClient::default();
        let result = client.choose_trip(0).await;
        assert!(matches!(result, Err(ServiceError::InvalidChoice)));
    }
}
