use crate::error::{HighlightError, Result};
use crate::service::{Action, ServiceOutcome, ServiceRequest, Summarizer};

/// Supplies a stand-in answer when the real service call fails
pub trait FallbackProvider: Send + Sync {
    fn fallback(&self, action: Action, request: &ServiceRequest) -> Option<ServiceOutcome>;
}

/// Canned answers built from the leading sentences of the request text
#[derive(Debug, Clone, Copy)]
pub struct SimulatedResponses {
    /// Number of sentences used for keypoints and bullet points
    pub max_points: usize,
}

impl Default for SimulatedResponses {
    fn default() -> Self {
        Self { max_points: 3 }
    }
}

impl SimulatedResponses {
    fn sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.split_inclusive(['.', '!', '?'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .take(self.max_points)
            .collect()
    }
}

impl FallbackProvider for SimulatedResponses {
    fn fallback(&self, action: Action, request: &ServiceRequest) -> Option<ServiceOutcome> {
        let sentences = self.sentences(&request.text);
        if sentences.is_empty() {
            return None;
        }

        let points = || sentences.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Some(match action {
            Action::Summarize => ServiceOutcome::Summary(format!(
                "[Simulated summary of {} characters] {}",
                request.text.chars().count(),
                sentences.join(" ")
            )),
            Action::Keypoints => ServiceOutcome::Keypoints(points()),
            Action::Bullet => ServiceOutcome::BulletPoints(points()),
        })
    }
}

/// A summarizer that answers from a [`FallbackProvider`] when the inner one fails
pub struct WithFallback<S, F> {
    inner: S,
    fallback: F,
}

impl<S, F> WithFallback<S, F> {
    pub fn new(inner: S, fallback: F) -> Self {
        Self { inner, fallback }
    }
}

impl<S: Summarizer, F: FallbackProvider> Summarizer for WithFallback<S, F> {
    fn request(&self, action: Action, request: &ServiceRequest) -> Result<ServiceOutcome> {
        match self.inner.request(action, request) {
            Ok(outcome) => Ok(outcome),
            Err(err @ HighlightError::PreconditionFailed(_)) => Err(err),
            Err(err) => {
                log::warn!("{} failed ({}), using fallback response", action.endpoint(), err);
                self.fallback.fallback(action, request).ok_or(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Unreachable;

    impl Summarizer for Unreachable {
        fn request(&self, action: Action, _request: &ServiceRequest) -> Result<ServiceOutcome> {
            Err(HighlightError::ServiceFailed(format!("{} unreachable", action.endpoint())))
        }
    }

    struct Fixed;

    impl Summarizer for Fixed {
        fn request(&self, _action: Action, _request: &ServiceRequest) -> Result<ServiceOutcome> {
            Ok(ServiceOutcome::Keypoints(vec!["real".to_string()]))
        }
    }

    #[test]
    fn test_simulated_keypoints_use_leading_sentences() {
        let request = ServiceRequest::new("First point. Second point! Third? Fourth.");
        let outcome = SimulatedResponses::default().fallback(Action::Keypoints, &request).unwrap();

        assert_eq!(
            outcome,
            ServiceOutcome::Keypoints(vec![
                "First point.".to_string(),
                "Second point!".to_string(),
                "Third?".to_string(),
            ])
        );
    }

    #[test]
    fn test_simulated_summary() {
        let request = ServiceRequest::new("Only sentence");
        match SimulatedResponses::default().fallback(Action::Summarize, &request).unwrap() {
            ServiceOutcome::Summary(summary) => {
                assert!(summary.starts_with("[Simulated summary of 13 characters]"));
                assert!(summary.ends_with("Only sentence"));
            }
            other => panic!("Expected summary, got {:?}", other),
        }
    }

    #[test]
    fn test_with_fallback_substitutes_on_failure() {
        let summarizer = WithFallback::new(Unreachable, SimulatedResponses::default());
        let keypoints = summarizer.keypoints(&ServiceRequest::new("Alpha. Beta.")).unwrap();
        assert_eq!(keypoints, vec!["Alpha.", "Beta."]);
    }

    #[test]
    fn test_with_fallback_prefers_inner() {
        let summarizer = WithFallback::new(Fixed, SimulatedResponses::default());
        assert_eq!(summarizer.keypoints(&ServiceRequest::new("Alpha.")).unwrap(), vec!["real"]);
    }

    #[test]
    fn test_with_fallback_keeps_error_without_answer() {
        let summarizer = WithFallback::new(Unreachable, SimulatedResponses::default());
        let err = summarizer.request(Action::Bullet, &ServiceRequest::new("   ")).unwrap_err();
        assert!(matches!(err, HighlightError::ServiceFailed(_)));
    }
}
