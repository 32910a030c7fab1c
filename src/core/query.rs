//! Listing parameters: ordering, search and filters

use crate::core::error::RequestError;
use crate::core::field::SiteField;
use crate::core::site::Site;
use serde::Deserialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// What a listing is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Field(SiteField),
    CreatedAt,
    UpdatedAt,
}

/// Ordering of a site listing
///
/// # Format
/// - `field:asc` or `field` (ascending)
/// - `field:desc` (descending)
///
/// `field` is any site field name, `created_at` or `updated_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteOrder {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SiteOrder {
    /// Alphabetical by site name
    fn default() -> Self {
        Self {
            key: SortKey::Field(SiteField::Site),
            direction: SortDirection::Asc,
        }
    }
}

impl SiteOrder {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Compare two records under this ordering
    pub fn compare(&self, a: &Site, b: &Site) -> Ordering {
        let ordering = match self.key {
            SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            SortKey::UpdatedAt => a.updated_at.cmp(&b.updated_at),
            SortKey::Field(SiteField::Views90d) => {
                match (a.fields.views_90d, b.fields.views_90d) {
                    (Some(x), Some(y)) => x.total_cmp(&y),
                    (x, y) => x.is_some().cmp(&y.is_some()),
                }
            }
            SortKey::Field(field) => {
                compare_text(a.fields.text(field), b.fields.text(field))
            }
        };

        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    /// Sort records in place; ties keep their relative order
    pub fn sort(&self, sites: &mut [Site]) {
        sites.sort_by(|a, b| self.compare(a, b));
    }
}

// Case-insensitive first, so "acme" and "Acme" sit together; nulls first.
fn compare_text(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x
            .to_lowercase()
            .cmp(&y.to_lowercase())
            .then_with(|| x.cmp(y)),
        (x, y) => x.is_some().cmp(&y.is_some()),
    }
}

impl FromStr for SiteOrder {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |message: String| RequestError::InvalidQuery {
            param: "sort".to_string(),
            message,
        };

        let (name, direction) = match s.split_once(':') {
            Some((name, "asc")) => (name, SortDirection::Asc),
            Some((name, "desc")) => (name, SortDirection::Desc),
            Some((_, other)) => return Err(invalid(format!("unknown direction '{}'", other))),
            None => (s, SortDirection::Asc),
        };

        let key = match name {
            "created_at" => SortKey::CreatedAt,
            "updated_at" => SortKey::UpdatedAt,
            other => SortKey::Field(
                other
                    .parse::<SiteField>()
                    .map_err(|e| invalid(e.to_string()))?,
            ),
        };

        Ok(Self { key, direction })
    }
}

impl fmt::Display for SiteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.key {
            SortKey::Field(field) => field.as_str(),
            SortKey::CreatedAt => "created_at",
            SortKey::UpdatedAt => "updated_at",
        };
        let direction = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{}:{}", name, direction)
    }
}

/// Query parameters for listing sites
///
/// # Example
/// ```text
/// GET /api/sites?search=acme
/// GET /api/sites?server=Server%202&premium_only=true&sort=views_90d:desc
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SiteQuery {
    /// Case-insensitive substring of the site name or url
    pub search: Option<String>,

    /// Exact server name; `all` disables the filter
    pub server: Option<String>,

    /// Only sites whose premium hosting flag is on
    pub premium_only: bool,

    /// Sort expression, see [`SiteOrder`]
    pub sort: Option<String>,
}

impl SiteQuery {
    /// Parsed ordering, falling back to `default` when none was given
    pub fn order(&self, default: SiteOrder) -> Result<SiteOrder, RequestError> {
        match self.sort.as_deref().map(str::trim) {
            Some(sort) if !sort.is_empty() => sort.parse(),
            _ => Ok(default),
        }
    }

    /// Whether a record passes the search and filters
    pub fn matches(&self, site: &Site) -> bool {
        let matches_search = match self.search.as_deref().map(str::trim) {
            Some(search) if !search.is_empty() => {
                let needle = search.to_lowercase();
                site.fields.site.to_lowercase().contains(&needle)
                    || site
                        .fields
                        .url
                        .as_deref()
                        .is_some_and(|url| url.to_lowercase().contains(&needle))
            }
            _ => true,
        };

        let matches_server = match self.server.as_deref() {
            None | Some("all") | Some("") => true,
            Some(server) => site.fields.server_name.as_deref() == Some(server),
        };

        let matches_premium = !self.premium_only || site.flag(SiteField::PremiumHosting);

        matches_search && matches_server && matches_premium
    }

    /// Keep only matching records, preserving order
    pub fn filter(&self, sites: Vec<Site>) -> Vec<Site> {
        sites.into_iter().filter(|site| self.matches(site)).collect()
    }
}
