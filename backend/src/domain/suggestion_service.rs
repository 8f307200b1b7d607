//! Forwards place suggestions to the configured submitter.

use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};

use super::ports::{SuggestionSubmitter, SuggestionSubmitterError};
use super::{Error, PlaceSuggestion};

/// Accepts validated suggestions and hands them to the form service.
#[derive(Clone)]
pub struct SuggestionService {
    submitter: Arc<dyn SuggestionSubmitter>,
}

impl SuggestionService {
    /// Create a service over a submitter.
    pub fn new(submitter: Arc<dyn SuggestionSubmitter>) -> Self {
        Self { submitter }
    }

    /// Forward a suggestion. Failures are never retried.
    pub async fn submit(&self, suggestion: &PlaceSuggestion) -> Result<(), Error> {
        self.submitter
            .submit(suggestion)
            .await
            .map_err(Self::map_submitter_error)?;
        info!(place = suggestion.place_name(), city = suggestion.city(), "suggestion forwarded");
        Ok(())
    }

    fn map_submitter_error(error: SuggestionSubmitterError) -> Error {
        warn!(error = %error, "suggestion submission failed");
        match error {
            SuggestionSubmitterError::Transport { message } => {
                Error::service_unavailable(format!("form service unreachable: {message}"))
            }
            SuggestionSubmitterError::Rejected { status } => {
                Error::service_unavailable("form service rejected the suggestion")
                    .with_details(json!({ "status": status }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockSuggestionSubmitter;
    use rstest::{fixture, rstest};

    #[fixture]
    fn suggestion() -> PlaceSuggestion {
        PlaceSuggestion::new("Kalimera", "Haifa", Some("kalimera.co.il"), "Great pour-over")
            .expect("valid suggestion")
    }

    #[rstest]
    #[tokio::test]
    async fn forwards_to_submitter(suggestion: PlaceSuggestion) {
        let mut submitter = MockSuggestionSubmitter::new();
        submitter
            .expect_submit()
            .withf(|s| s.place_name() == "Kalimera")
            .times(1)
            .returning(|_| Ok(()));
        SuggestionService::new(Arc::new(submitter))
            .submit(&suggestion)
            .await
            .expect("submitted");
    }

    #[rstest]
    #[tokio::test]
    async fn rejection_is_service_unavailable(suggestion: PlaceSuggestion) {
        let mut submitter = MockSuggestionSubmitter::new();
        submitter
            .expect_submit()
            .returning(|_| Err(SuggestionSubmitterError::rejected(422_u16)));
        let err = SuggestionService::new(Arc::new(submitter))
            .submit(&suggestion)
            .await
            .expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
        assert_eq!(err.details(), Some(&json!({ "status": 422 })));
    }
}
