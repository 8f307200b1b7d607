//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{
    AppMode, BrewMethod, Coordinates, Error, PlaceId, ReviewValidationError,
    SuggestionValidationError,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    InvalidPlaceId,
    InvalidMode,
    InvalidBrewMethod,
    IncompleteLocation,
    InvalidLocation,
    InvalidReview,
    MissingField,
    MalformedBody,
    MalformedQuery,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::InvalidPlaceId => "invalid_place_id",
            Self::InvalidMode => "invalid_mode",
            Self::InvalidBrewMethod => "invalid_brew_method",
            Self::IncompleteLocation => "incomplete_location",
            Self::InvalidLocation => "invalid_location",
            Self::InvalidReview => "invalid_review",
            Self::MissingField => "missing_field",
            Self::MalformedBody => "malformed_body",
            Self::MalformedQuery => "malformed_query",
        }
    }
}

fn field_error(
    message: impl Into<String>,
    field: &str,
    code: ValidationCode,
    value: Option<&str>,
) -> Error {
    let details = match value {
        Some(value) => json!({ "field": field, "value": value, "code": code.as_str() }),
        None => json!({ "field": field, "code": code.as_str() }),
    };
    Error::invalid_request(message).with_details(details)
}

/// A request whose body or query string could not be deserialised at all.
pub(crate) fn malformed_request(message: impl Into<String>, code: ValidationCode) -> Error {
    Error::invalid_request(message).with_details(json!({ "code": code.as_str() }))
}

pub(crate) fn parse_place_id(raw: String) -> Result<PlaceId, Error> {
    PlaceId::new(raw.clone()).map_err(|err| {
        field_error(err.to_string(), "id", ValidationCode::InvalidPlaceId, Some(&raw))
    })
}

pub(crate) fn parse_mode(raw: &str) -> Result<AppMode, Error> {
    raw.parse()
        .map_err(|err: crate::domain::UnknownModeError| {
            field_error(err.to_string(), "mode", ValidationCode::InvalidMode, Some(raw))
        })
}

/// Parse a comma-separated brew list; blank entries are skipped.
pub(crate) fn parse_brew_methods(raw: Option<&str>) -> Result<Vec<BrewMethod>, Error> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };
    let mut methods = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|part| !part.is_empty()) {
        let method = part.parse::<BrewMethod>().map_err(|err| {
            field_error(err.to_string(), "brew", ValidationCode::InvalidBrewMethod, Some(part))
        })?;
        if !methods.contains(&method) {
            methods.push(method);
        }
    }
    Ok(methods)
}

pub(crate) fn parse_location(lat: Option<f64>, lng: Option<f64>) -> Result<Option<Coordinates>, Error> {
    match (lat, lng) {
        (Some(latitude), Some(longitude)) => {
            validate_coordinates(Coordinates::new(latitude, longitude)).map(Some)
        }
        (None, None) => Ok(None),
        _ => Err(field_error(
            "lat and lng must be supplied together",
            "lat",
            ValidationCode::IncompleteLocation,
            None,
        )),
    }
}

/// Reject positions that are not finite WGS84 degrees.
pub(crate) fn validate_coordinates(coordinates: Coordinates) -> Result<Coordinates, Error> {
    let Coordinates {
        latitude,
        longitude,
    } = coordinates;
    let check = |value: f64, limit: f64, field: &str| {
        if value.is_finite() && value.abs() <= limit {
            return Ok(());
        }
        Err(field_error(
            format!("{field} must be a finite number between -{limit} and {limit}"),
            field,
            ValidationCode::InvalidLocation,
            Some(&value.to_string()),
        ))
    };
    check(latitude, 90.0, "lat")?;
    check(longitude, 180.0, "lng")?;
    Ok(coordinates)
}

pub(crate) fn review_error(err: &ReviewValidationError) -> Error {
    field_error(err.to_string(), err.field(), ValidationCode::InvalidReview, None)
}

pub(crate) fn suggestion_error(err: &SuggestionValidationError) -> Error {
    let SuggestionValidationError::MissingField { field } = *err;
    field_error(err.to_string(), field, ValidationCode::MissingField, None)
}
