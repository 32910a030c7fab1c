//! Summary counts for the dashboard header

use crate::core::field::SiteField;
use crate::core::site::Site;
use indexmap::IndexMap;
use serde::Serialize;

/// Aggregate counts over a set of site records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SiteStats {
    pub total: usize,
    pub premium: usize,
    pub cloudflare: usize,
    pub dmarc: usize,
    /// Records per server name, in first-seen order; unnamed servers are skipped
    pub by_server: IndexMap<String, usize>,
}

impl SiteStats {
    pub fn collect<'a, I>(sites: I) -> Self
    where
        I: IntoIterator<Item = &'a Site>,
    {
        let mut stats = Self::default();

        for site in sites {
            stats.total += 1;
            if site.flag(SiteField::PremiumHosting) {
                stats.premium += 1;
            }
            if site.flag(SiteField::Cloudflare) {
                stats.cloudflare += 1;
            }
            // policy text, not a flag: any value counts
            if site.fields.dmarc_policy.is_some() {
                stats.dmarc += 1;
            }
            if let Some(server) = site.fields.server_name.as_deref() {
                *stats.by_server.entry(server.to_string()).or_insert(0) += 1;
            }
        }

        stats
    }
}
