//! Client side of the local summarization service
//!
//! The service accepts `POST {text, language?, length?}` on one endpoint per
//! [`Action`] and answers with `{summary}`, `{keypoints}` or `{bulletPoints}`.
//! Non-2xx answers carry `{error}`.

pub mod fallback;
pub mod http;

pub use fallback::{FallbackProvider, SimulatedResponses, WithFallback};
pub use http::HttpSummarizer;

use crate::error::{HighlightError, Result};
use serde::{Deserialize, Serialize};

/// Longest text, in characters, sent in a single request
pub const MAX_TEXT_LENGTH: usize = 10_000;

/// What to ask the service for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Summarize,
    Keypoints,
    Bullet,
}

impl Action {
    pub fn endpoint(&self) -> &'static str {
        match self {
            Action::Summarize => "/summarize",
            Action::Keypoints => "/keypoints",
            Action::Bullet => "/bullet",
        }
    }

    /// Decode a successful response body into the result shape this action expects
    pub fn decode(&self, body: serde_json::Value) -> Result<ServiceOutcome> {
        let unexpected = |e: serde_json::Error| {
            HighlightError::UnexpectedResponse(format!("{} response: {}", self.endpoint(), e))
        };
        match self {
            Action::Summarize => serde_json::from_value::<SummaryBody>(body)
                .map(|b| ServiceOutcome::Summary(b.summary))
                .map_err(unexpected),
            Action::Keypoints => serde_json::from_value::<KeypointsBody>(body)
                .map(|b| ServiceOutcome::Keypoints(b.keypoints))
                .map_err(unexpected),
            Action::Bullet => serde_json::from_value::<BulletBody>(body)
                .map(|b| ServiceOutcome::BulletPoints(b.bullet_points))
                .map_err(unexpected),
        }
    }
}

/// JSON body of every service request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceRequest {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<String>,
}

impl ServiceRequest {
    /// Build a request, collapsing whitespace and truncating to [`MAX_TEXT_LENGTH`]
    pub fn new(text: &str) -> Self {
        Self {
            text: prepare_text(text),
            language: None,
            length: None,
        }
    }

    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }

    pub fn with_length(mut self, length: Option<String>) -> Self {
        self.length = length;
        self
    }
}

/// Successful result of a service call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ServiceOutcome {
    Summary(String),
    Keypoints(Vec<String>),
    BulletPoints(Vec<String>),
}

impl ServiceOutcome {
    /// Render the outcome as display text
    pub fn to_text(&self) -> String {
        match self {
            ServiceOutcome::Summary(summary) => summary.clone(),
            ServiceOutcome::Keypoints(points) | ServiceOutcome::BulletPoints(points) => points
                .iter()
                .map(|p| format!("• {}", p))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

#[derive(Deserialize)]
struct SummaryBody {
    summary: String,
}

#[derive(Deserialize)]
struct KeypointsBody {
    keypoints: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BulletBody {
    bullet_points: Vec<String>,
}

/// Body of a non-2xx response
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Answer of `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,

    /// Name of the model behind the service, if it reports one
    #[serde(default)]
    pub model: Option<String>,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Anything that can answer summarization requests
pub trait Summarizer: Send + Sync {
    fn request(&self, action: Action, request: &ServiceRequest) -> Result<ServiceOutcome>;

    /// Ask for keypoints and unwrap the expected result shape
    fn keypoints(&self, request: &ServiceRequest) -> Result<Vec<String>> {
        match self.request(Action::Keypoints, request)? {
            ServiceOutcome::Keypoints(keypoints) => Ok(keypoints),
            other => Err(HighlightError::UnexpectedResponse(format!(
                "expected keypoints, got {:?}",
                other
            ))),
        }
    }
}

impl<T: Summarizer + ?Sized> Summarizer for Box<T> {
    fn request(&self, action: Action, request: &ServiceRequest) -> Result<ServiceOutcome> {
        (**self).request(action, request)
    }
}

/// Collapse whitespace runs to single spaces, trim, and cut to [`MAX_TEXT_LENGTH`] characters
pub fn prepare_text(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    match collapsed.char_indices().nth(MAX_TEXT_LENGTH) {
        Some((cut, _)) => collapsed[..cut].to_string(),
        None => collapsed,
    }
}
