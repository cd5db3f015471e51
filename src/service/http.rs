use crate::config::ServiceOptions;
use crate::error::{HighlightError, Result};
use crate::service::{Action, ErrorBody, HealthStatus, ServiceOutcome, ServiceRequest, Summarizer};

/// Normalize a service address by adding a missing scheme and dropping trailing slashes
pub fn normalize_base_url(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');

    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        return trimmed.to_string();
    }

    // Local services rarely terminate TLS
    if trimmed.starts_with("localhost") || trimmed.starts_with("127.0.0.1") || trimmed.starts_with("[::1]") {
        return format!("http://{}", trimmed);
    }

    format!("https://{}", trimmed)
}

/// Blocking HTTP client for the summarization service
pub struct HttpSummarizer {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpSummarizer {
    pub fn new(options: &ServiceOptions) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(options.timeout).build();
        Self {
            agent,
            base_url: normalize_base_url(&options.base_url),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, action: Action) -> String {
        format!("{}{}", self.base_url, action.endpoint())
    }

    /// Ask the service whether it is up and which model it runs
    pub fn health(&self) -> Result<HealthStatus> {
        let url = format!("{}/health", self.base_url);

        match self.agent.get(&url).call() {
            Ok(response) => response
                .into_json()
                .map_err(|e| HighlightError::UnexpectedResponse(format!("invalid JSON from {}: {}", url, e))),
            Err(ureq::Error::Status(status, _)) => Err(HighlightError::ServiceRejected {
                status,
                message: format!("health check answered HTTP {}", status),
            }),
            Err(ureq::Error::Transport(transport)) => {
                Err(HighlightError::ServiceFailed(format!("{}: {}", url, transport)))
            }
        }
    }
}

impl Summarizer for HttpSummarizer {
    fn request(&self, action: Action, request: &ServiceRequest) -> Result<ServiceOutcome> {
        let url = self.url_for(action);
        log::debug!("POST {} ({} characters)", url, request.text.chars().count());

        match self.agent.post(&url).send_json(request) {
            Ok(response) => {
                let body: serde_json::Value = response
                    .into_json()
                    .map_err(|e| HighlightError::UnexpectedResponse(format!("invalid JSON from {}: {}", url, e)))?;
                action.decode(body)
            }
            Err(ureq::Error::Status(status, response)) => {
                let message = response
                    .into_json::<ErrorBody>()
                    .map(|body| body.error)
                    .unwrap_or_else(|_| format!("HTTP {}", status));
                log::warn!("{} rejected request with {}: {}", url, status, message);
                Err(HighlightError::ServiceRejected { status, message })
            }
            Err(ureq::Error::Transport(transport)) => {
                Err(HighlightError::ServiceFailed(format!("{}: {}", url, transport)))
            }
        }
    }
}
