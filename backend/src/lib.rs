//! Course registration records over HTTP.
//!
//! Students, courses and the registrations linking them, served through
//! actix-web with HTTP Basic authentication. The crate follows a
//! ports-and-adapters layout:
//! - [`domain`]: entities, validation, ports and services;
//! - [`inbound`]: the HTTP adapter;
//! - [`outbound`]: memory and PostgreSQL stores plus password hashing.

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
