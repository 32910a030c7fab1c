//! # sitedesk
//!
//! Admin dashboard API for tracking hosted client websites: which server each
//! site runs on, its hosting tier, DNS/Cloudflare/DMARC status and related
//! operational metadata.
//!
//! ## Features
//!
//! - **Validation pipeline**: every write (API body, spreadsheet row) goes through
//!   one rule table that trims, nulls empties, coerces counts and reports every
//!   field error at once
//! - **Partial updates**: only the fields a client sends are validated and applied
//! - **Spreadsheet import**: legacy export columns mapped onto fields, upserted by url
//! - **Listing**: search, server and premium filters, configurable ordering, stats
//! - **Configuration-Based**: bind address, tokens and import headers from YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sitedesk::prelude::*;
//!
//! let fields = validate_create(&serde_json::json!({
//!     "site": "  Acme  ",
//!     "premium_hosting": "Yes",
//!     "views_90d": "1200",
//! }))?;
//! assert_eq!(fields.site, "Acme");
//!
//! let service = InMemorySiteService::new();
//! let site = service.insert(fields, None).await?;
//! assert!(site.flag(SiteField::PremiumHosting));
//! ```

pub mod config;
pub mod core;
pub mod import;
pub mod server;
pub mod sites;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        auth::{AuthContext, AuthPolicy, AuthProvider, NoAuthProvider, StaticTokenAuthProvider},
        error::{DashboardError, DashboardResult},
        field::{FieldValue, SiteField},
        flag::{format_yes_no, is_on},
        query::{SiteOrder, SiteQuery},
        service::SiteService,
        site::{Site, SiteFields, SitePatch},
        stats::SiteStats,
        validation::{
            BatchOutcome, FieldErrors, Operation, Validated, validate_batch, validate_create,
            validate_update,
        },
    };

    // === Import ===
    pub use crate::import::{ImportMapping, ImportReport, ImportRow, import_rows};

    // === Storage ===
    #[cfg(feature = "in-memory")]
    pub use crate::storage::InMemorySiteService;

    // === Config ===
    pub use crate::config::DashboardConfig;

    // === Server ===
    pub use crate::server::ServerBuilder;
    pub use crate::sites::AppState;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use uuid::Uuid;
}
