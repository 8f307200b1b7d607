//! Backend library for the Ca Fe coffee and matcha guide.
//!
//! The crate follows a hexagonal layout: [`domain`] holds the guide's types,
//! services and ports; [`inbound`] exposes them over HTTP; [`outbound`]
//! implements the ports for the bundled catalogs, client storage and the
//! hosted suggestion form.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
