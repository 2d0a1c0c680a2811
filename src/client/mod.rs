//! HTTP boundary - bearer-authenticated JSON GETs against the console backend.
//!
//! Every endpoint answers with the `{ success, data, message? }` envelope.
//! Failures are mapped onto [`Error`]: 404 becomes [`Error::NotFound`], any
//! other non-2xx status or `success: false` becomes [`Error::Api`], and a body
//! of the wrong shape becomes [`Error::InvalidPayload`]. Nothing is retried.

pub mod remote;

use crate::errors::{Error, FALLBACK_MESSAGE, Result};
use chrono::NaiveDate;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

/// Response envelope shared by all backend endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded
    pub success: bool,
    /// Payload, present on success
    pub data: Option<T>,
    /// Human-readable explanation, usually present on failure
    #[serde(default)]
    pub message: Option<String>,
}

/// Only the message of a failure body; everything else is ignored.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Dashboard analytics payload. The backend owns its shape, so the fields are
/// kept as JSON and read through typed accessors.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DashboardAnalytics {
    /// All fields of the payload
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl DashboardAnalytics {
    /// Numeric metric by key, when present and numeric.
    #[must_use]
    pub fn metric(&self, key: &str) -> Option<f64> {
        self.fields.get(key).and_then(Value::as_f64)
    }
}

/// A delivery route plan.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RoutePlan {
    /// Route plan id
    pub id: i64,
    /// Remaining fields of the payload
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Client for the console backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl ApiClient {
    /// Creates a client for `base_url` (e.g., `https://console.example.com`)
    /// authenticating with `token`.
    ///
    /// # Errors
    /// Returns [`Error::Config`] for an empty base URL and [`Error::Http`] when
    /// the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(Error::Config {
                message: "API base URL cannot be empty".to_string(),
            });
        }

        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base_url,
            token: token.into(),
        })
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /api/dashboard/analytics?start_date=..&end_date=..`
    ///
    /// # Errors
    /// Returns [`Error::InvalidValue`] when `start` is after `end`, otherwise
    /// the mapped request errors described at module level.
    pub async fn dashboard_analytics(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<DashboardAnalytics> {
        if start > end {
            return Err(Error::InvalidValue {
                kind: "date range",
                value: format!("{start}..{end}"),
            });
        }

        let query = [
            ("start_date", start.format("%Y-%m-%d").to_string()),
            ("end_date", end.format("%Y-%m-%d").to_string()),
        ];
        self.get("dashboard/analytics", &query, "analytics", &format!("{start}..{end}"))
            .await
    }

    /// `GET /api/route-plans/{id}`
    ///
    /// # Errors
    /// [`Error::NotFound`] for an unknown id, otherwise the mapped request
    /// errors described at module level.
    pub async fn route_plan(&self, id: i64) -> Result<RoutePlan> {
        self.get(&format!("route-plans/{id}"), &[], "route plan", &id.to_string())
            .await
    }

    /// `GET /api/{path}` returning a list of records.
    ///
    /// # Errors
    /// The mapped request errors described at module level.
    pub async fn list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        self.get(path, &[], "collection", path).await
    }

    #[instrument(skip(self, query), fields(base = %self.base_url))]
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        resource: &'static str,
        id: &str,
    ) -> Result<T> {
        let url = format!("{}/api/{}", self.base_url, path.trim_start_matches('/'));
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .query(query)
            .send()
            .await
            .inspect_err(|e| warn!("Request to {} failed: {}", url, e))?;

        let status = response.status();
        let body = response.text().await?;

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::NotFound {
                resource,
                id: id.to_string(),
            });
        }

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .unwrap_or_default()
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| FALLBACK_MESSAGE.to_string());
            warn!("GET {} answered {}: {}", url, status, message);
            return Err(Error::Api {
                status: Some(status.as_u16()),
                message,
            });
        }

        decode_envelope(&body)
    }
}

/// Decodes a 2xx body into its payload.
///
/// The envelope is read before `data` is interpreted, so a failure reply
/// keeps its message even when its `data` does not have the payload's shape.
///
/// # Errors
/// [`Error::Api`] for `success: false`, [`Error::InvalidPayload`] for a body
/// that is not an envelope, lacks `data`, or carries `data` of the wrong shape.
pub fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<T> {
    let envelope: ApiResponse<Value> =
        serde_json::from_str(body).map_err(|e| Error::InvalidPayload {
            message: e.to_string(),
        })?;

    if !envelope.success {
        return Err(Error::Api {
            status: None,
            message: envelope
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| FALLBACK_MESSAGE.to_string()),
        });
    }

    let data = envelope
        .data
        .filter(|d| !d.is_null())
        .ok_or_else(|| Error::InvalidPayload {
            message: "response reported success without data".to_string(),
        })?;

    serde_json::from_value(data).map_err(|e| Error::InvalidPayload {
        message: e.to_string(),
    })
}
