//! Driven port forwarding place suggestions to a hosted form service.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::PlaceSuggestion;

define_port_error! {
    /// Errors surfaced by suggestion submitters.
    pub enum SuggestionSubmitterError {
        /// The form service could not be reached.
        Transport { message: String } => "suggestion transport failed: {message}",
        /// The form service answered with a non-success status.
        Rejected { status: u16 } => "suggestion rejected with status {status}",
    }
}

/// Delivers a validated suggestion to whoever curates the catalogs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SuggestionSubmitter: Send + Sync {
    /// Forward the suggestion.
    async fn submit(&self, suggestion: &PlaceSuggestion) -> Result<(), SuggestionSubmitterError>;
}

/// Submitter that accepts and drops every suggestion.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSuggestionSubmitter;

#[async_trait]
impl SuggestionSubmitter for FixtureSuggestionSubmitter {
    async fn submit(&self, suggestion: &PlaceSuggestion) -> Result<(), SuggestionSubmitterError> {
        tracing::debug!(place = suggestion.place_name(), "fixture submitter dropped suggestion");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_submitter_accepts_suggestions() {
        let suggestion = PlaceSuggestion::new("Kalimera", "Haifa", None, "Great pour-over")
            .expect("valid suggestion");
        FixtureSuggestionSubmitter
            .submit(&suggestion)
            .await
            .expect("fixture accepts");
    }
}
