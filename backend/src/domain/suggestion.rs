//! Visitor suggestions for places missing from the guide.

use serde::Serialize;
use thiserror::Error;

/// Validation failures for [`PlaceSuggestion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SuggestionValidationError {
    /// A required field is blank.
    #[error("{field} must not be empty")]
    MissingField {
        /// Wire name of the field.
        field: &'static str,
    },
}

/// A validated suggestion, serialised with the hosted form's field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceSuggestion {
    #[serde(rename = "place-name")]
    place_name: String,
    city: String,
    #[serde(rename = "instagram-website", skip_serializing_if = "Option::is_none")]
    instagram_or_website: Option<String>,
    #[serde(rename = "why-add")]
    why_add: String,
}

fn required(value: &str, field: &'static str) -> Result<String, SuggestionValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SuggestionValidationError::MissingField { field });
    }
    Ok(trimmed.to_owned())
}

impl PlaceSuggestion {
    /// Validate a suggestion. Name, city and reason are required.
    ///
    /// # Examples
    /// ```
    /// use cafe_guide::domain::PlaceSuggestion;
    ///
    /// let suggestion = PlaceSuggestion::new(" Kalimera ", "Haifa", Some("@kalimera"), "Great pour-over")
    ///     .expect("valid suggestion");
    /// assert_eq!(suggestion.place_name(), "Kalimera");
    /// assert!(PlaceSuggestion::new("Kalimera", " ", None, "why").is_err());
    /// ```
    pub fn new(
        place_name: &str,
        city: &str,
        instagram_or_website: Option<&str>,
        why_add: &str,
    ) -> Result<Self, SuggestionValidationError> {
        Ok(Self {
            place_name: required(place_name, "placeName")?,
            city: required(city, "city")?,
            instagram_or_website: instagram_or_website
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_owned),
            why_add: required(why_add, "whyAdd")?,
        })
    }

    /// Suggested venue name.
    pub fn place_name(&self) -> &str {
        &self.place_name
    }

    /// City of the venue.
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Instagram handle or website, if given.
    pub fn instagram_or_website(&self) -> Option<&str> {
        self.instagram_or_website.as_deref()
    }

    /// Why the venue belongs in the guide.
    pub fn why_add(&self) -> &str {
        &self.why_add
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("", "Haifa", "why", "placeName")]
    #[case("Kalimera", "", "why", "city")]
    #[case("Kalimera", "Haifa", "  ", "whyAdd")]
    fn required_fields_are_checked(
        #[case] name: &str,
        #[case] city: &str,
        #[case] why: &str,
        #[case] field: &'static str,
    ) {
        assert_eq!(
            PlaceSuggestion::new(name, city, None, why),
            Err(SuggestionValidationError::MissingField { field })
        );
    }

    #[rstest]
    fn serialises_with_form_field_names() {
        let suggestion = PlaceSuggestion::new("Kalimera", "Haifa", Some(" "), "Great pour-over")
            .expect("valid suggestion");
        assert_eq!(
            serde_json::to_value(&suggestion).expect("serialise"),
            json!({
                "place-name": "Kalimera",
                "city": "Haifa",
                "why-add": "Great pour-over",
            })
        );
    }
}
