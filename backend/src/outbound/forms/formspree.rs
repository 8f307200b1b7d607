//! Reqwest-backed suggestion submitter for a Formspree form.
//!
//! The adapter owns transport details only: it posts the suggestion as JSON
//! to `<endpoint>/<form id>` and maps failures onto the port's error type.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::PlaceSuggestion;
use crate::domain::ports::{SuggestionSubmitter, SuggestionSubmitterError};

/// Default Formspree submission endpoint.
pub const DEFAULT_FORM_ENDPOINT: &str = "https://formspree.io/f";
/// Form the guide's suggestions are collected in.
pub const DEFAULT_FORM_ID: &str = "xeoyznby";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors raised while constructing [`FormspreeSubmitter`].
#[derive(Debug, Error)]
pub enum FormspreeSetupError {
    /// Endpoint and form id do not combine into a valid URL.
    #[error("invalid form endpoint '{url}': {source}")]
    InvalidEndpoint {
        /// The rejected URL.
        url: String,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Posts suggestions to a hosted Formspree form.
#[derive(Debug, Clone)]
pub struct FormspreeSubmitter {
    client: Client,
    url: Url,
}

impl FormspreeSubmitter {
    /// Build a submitter for `form_id` under `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`FormspreeSetupError`] when the URL is invalid or the client
    /// cannot be constructed.
    ///
    /// # Examples
    /// ```
    /// use cafe_guide::outbound::forms::FormspreeSubmitter;
    ///
    /// let submitter = FormspreeSubmitter::new("https://formspree.io/f/", "xeoyznby")
    ///     .expect("valid endpoint");
    /// assert_eq!(submitter.url().as_str(), "https://formspree.io/f/xeoyznby");
    /// ```
    pub fn new(endpoint: &str, form_id: &str) -> Result<Self, FormspreeSetupError> {
        let raw = format!("{}/{}", endpoint.trim_end_matches('/'), form_id.trim_matches('/'));
        let url = Url::parse(&raw)
            .map_err(|source| FormspreeSetupError::InvalidEndpoint { url: raw, source })?;
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, url })
    }

    /// Submission URL.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl SuggestionSubmitter for FormspreeSubmitter {
    async fn submit(&self, suggestion: &PlaceSuggestion) -> Result<(), SuggestionSubmitterError> {
        let response = self
            .client
            .post(self.url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(suggestion)
            .send()
            .await
            .map_err(|error| SuggestionSubmitterError::transport(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "form service rejected suggestion");
            return Err(SuggestionSubmitterError::rejected(status.as_u16()));
        }
        info!(place = suggestion.place_name(), "suggestion forwarded");
        Ok(())
    }
}
