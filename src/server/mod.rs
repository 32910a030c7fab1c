//! Server module for building the dashboard HTTP server
//!
//! `ServerBuilder` wires a [`SiteService`](crate::core::service::SiteService)
//! and an auth provider into the site routes, plus unauthenticated health checks.

pub mod builder;
pub mod router;

pub use builder::ServerBuilder;
pub use router::{build_site_routes, health_routes};
