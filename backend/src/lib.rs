//! MY5 backend library: five favourite slots per user, public profiles and
//! ranking-backed views, behind a hexagonal domain core.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
