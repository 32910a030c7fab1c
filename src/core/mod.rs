//! Core module: the site record, its validation pipeline and the service trait

pub mod auth;
pub mod error;
pub mod field;
pub mod flag;
pub mod query;
pub mod service;
pub mod site;
pub mod stats;
pub mod validation;

pub use auth::{AuthContext, AuthPolicy, AuthProvider, NoAuthProvider, StaticTokenAuthProvider};
pub use error::{DashboardError, DashboardResult};
pub use field::{FieldKind, FieldValue, SiteField};
pub use query::{SiteOrder, SiteQuery, SortDirection, SortKey};
pub use service::SiteService;
pub use site::{Site, SiteFields, SitePatch};
pub use stats::SiteStats;
pub use validation::{FieldErrors, Operation, validate_batch, validate_create, validate_update};
