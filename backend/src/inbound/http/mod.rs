//! HTTP inbound adapter exposing REST endpoints.

pub mod cache_control;
pub mod error;
pub mod favorites;
pub mod geolocation;
pub mod guide;
pub mod health;
pub mod map;
pub mod mode;
pub mod notes;
pub mod places;
pub mod reviews;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
pub mod suggestions;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;
