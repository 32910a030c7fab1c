//! Site field catalogue and canonical field values

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A canonical scalar held by a site field after normalization
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    #[serde(serialize_with = "serialize_count")]
    Number(f64),
    Null,
}

/// Largest integer an `f64` holds exactly
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Write an integral count as a JSON integer (`1200`, not `1200.0`)
pub(crate) fn serialize_count<S: Serializer>(n: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if n.fract() == 0.0 && n.abs() <= MAX_EXACT_INTEGER {
        serializer.serialize_i64(*n as i64)
    } else {
        serializer.serialize_f64(*n)
    }
}

pub(crate) fn serialize_optional_count<S: Serializer>(
    value: &Option<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(n) => serialize_count(n, serializer),
        None => serializer.serialize_none(),
    }
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as a number if possible
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub(crate) fn from_text(value: Option<String>) -> Self {
        value.map(FieldValue::Text).unwrap_or(FieldValue::Null)
    }

    pub(crate) fn from_number(value: Option<f64>) -> Self {
        value.map(FieldValue::Number).unwrap_or(FieldValue::Null)
    }

    pub(crate) fn into_text(self) -> Option<String> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Number(n) => Some(n.to_string()),
            FieldValue::Null => None,
        }
    }

    pub(crate) fn into_number(self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(n),
            _ => None,
        }
    }
}

impl From<&serde_json::Value> for FieldValue {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => FieldValue::Text(s.clone()),
            serde_json::Value::Number(n) => n
                .as_f64()
                .map(FieldValue::Number)
                .unwrap_or(FieldValue::Null),
            _ => FieldValue::Null,
        }
    }
}

/// How a field is coerced and interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Non-empty trimmed text, must be present on create
    RequiredText,
    /// Trimmed text or null
    Text,
    /// Text interpreted through the truthiness predicate
    Flag,
    /// Best-effort number, null when unparsable
    Count,
}

/// Every business field of a site record
///
/// System-managed fields (`id`, `created_at`, `updated_at`, `created_by`) are
/// not listed here: they never come from user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteField {
    Site,
    Url,
    CheckupDone,
    PremiumHosting,
    SeoMonitoring,
    #[serde(rename = "views_90d")]
    Views90d,
    EndClient,
    ServerName,
    ServerIp,
    Username,
    DbName,
    DbUrl,
    Cloudflare,
    SiteOrigin,
    AnalyticsCode,
    PhpVersion,
    DnsAccess,
    VcWbp,
    EventsCal,
    RevSlider,
    CoverageTest,
    DmarcPolicy,
}

impl SiteField {
    /// All fields, in record order
    pub const ALL: [SiteField; 22] = [
        SiteField::Site,
        SiteField::Url,
        SiteField::CheckupDone,
        SiteField::PremiumHosting,
        SiteField::SeoMonitoring,
        SiteField::Views90d,
        SiteField::EndClient,
        SiteField::ServerName,
        SiteField::ServerIp,
        SiteField::Username,
        SiteField::DbName,
        SiteField::DbUrl,
        SiteField::Cloudflare,
        SiteField::SiteOrigin,
        SiteField::AnalyticsCode,
        SiteField::PhpVersion,
        SiteField::DnsAccess,
        SiteField::VcWbp,
        SiteField::EventsCal,
        SiteField::RevSlider,
        SiteField::CoverageTest,
        SiteField::DmarcPolicy,
    ];

    /// Wire name of the field (JSON key and storage column)
    pub fn as_str(&self) -> &'static str {
        match self {
            SiteField::Site => "site",
            SiteField::Url => "url",
            SiteField::CheckupDone => "checkup_done",
            SiteField::PremiumHosting => "premium_hosting",
            SiteField::SeoMonitoring => "seo_monitoring",
            SiteField::Views90d => "views_90d",
            SiteField::EndClient => "end_client",
            SiteField::ServerName => "server_name",
            SiteField::ServerIp => "server_ip",
            SiteField::Username => "username",
            SiteField::DbName => "db_name",
            SiteField::DbUrl => "db_url",
            SiteField::Cloudflare => "cloudflare",
            SiteField::SiteOrigin => "site_origin",
            SiteField::AnalyticsCode => "analytics_code",
            SiteField::PhpVersion => "php_version",
            SiteField::DnsAccess => "dns_access",
            SiteField::VcWbp => "vc_wbp",
            SiteField::EventsCal => "events_cal",
            SiteField::RevSlider => "rev_slider",
            SiteField::CoverageTest => "coverage_test",
            SiteField::DmarcPolicy => "dmarc_policy",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            SiteField::Site => FieldKind::RequiredText,
            SiteField::CheckupDone
            | SiteField::PremiumHosting
            | SiteField::SeoMonitoring
            | SiteField::Cloudflare
            | SiteField::DnsAccess
            | SiteField::EventsCal => FieldKind::Flag,
            SiteField::Views90d => FieldKind::Count,
            _ => FieldKind::Text,
        }
    }

    /// Column title used by the legacy hosting spreadsheet export
    pub fn legacy_header(&self) -> &'static str {
        match self {
            SiteField::Site => "Site",
            SiteField::Url => "URL",
            SiteField::CheckupDone => "Site Checkup Done?",
            SiteField::PremiumHosting => "Premium Hosting",
            SiteField::SeoMonitoring => "SEO Monitoring",
            SiteField::Views90d => "90 day views",
            SiteField::EndClient => "End Client",
            SiteField::ServerName => "New Server",
            SiteField::ServerIp => "IP Address",
            SiteField::Username => "Username",
            SiteField::DbName => "DB Name",
            SiteField::DbUrl => "DB URL",
            SiteField::Cloudflare => "Cloudflare?",
            SiteField::SiteOrigin => "Site Origin",
            SiteField::AnalyticsCode => "Analytics Team Code",
            SiteField::PhpVersion => "PHP V.",
            SiteField::DnsAccess => "DNS Access?",
            SiteField::VcWbp => "VC/WBP?",
            SiteField::EventsCal => "Events Cal?",
            SiteField::RevSlider => "Rev. Slider?",
            SiteField::CoverageTest => "Coverage Test?",
            SiteField::DmarcPolicy => "DMARC Policy",
        }
    }

    pub fn is_flag(&self) -> bool {
        self.kind() == FieldKind::Flag
    }
}

impl fmt::Display for SiteField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown field name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown site field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for SiteField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SiteField::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_value_text() {
        let value = FieldValue::Text("test".to_string());
        assert_eq!(value.as_text(), Some("test"));
        assert_eq!(value.as_number(), None);
        assert!(!value.is_null());
    }

    #[test]
    fn test_field_value_null() {
        let value = FieldValue::Null;
        assert!(value.is_null());
        assert_eq!(value.as_text(), None);
    }

    #[test]
    fn test_field_value_from_json() {
        assert_eq!(FieldValue::from(&json!("a")), FieldValue::Text("a".into()));
        assert_eq!(FieldValue::from(&json!(12)), FieldValue::Number(12.0));
        assert_eq!(serde_json::to_value(FieldValue::Number(12.0)).unwrap(), json!(12));
        assert_eq!(serde_json::to_value(FieldValue::Number(12.5)).unwrap(), json!(12.5));
        assert_eq!(FieldValue::from(&json!(null)), FieldValue::Null);
        assert_eq!(FieldValue::from(&json!(true)), FieldValue::Null);
    }

    #[test]
    fn test_field_names_roundtrip() {
        for field in SiteField::ALL {
            assert_eq!(field.as_str().parse::<SiteField>(), Ok(field));
        }
    }

    #[test]
    fn test_serde_name_matches_as_str() {
        for field in SiteField::ALL {
            let json = serde_json::to_value(field).expect("serialize should succeed");
            assert_eq!(json, json!(field.as_str()));
        }
    }

    #[test]
    fn test_unknown_field() {
        let err = "id".parse::<SiteField>().unwrap_err();
        assert!(err.to_string().contains("id"));
    }

    #[test]
    fn test_flag_kinds() {
        let flags: Vec<_> = SiteField::ALL.iter().filter(|f| f.is_flag()).collect();
        assert_eq!(flags.len(), 6);
        assert_eq!(SiteField::Site.kind(), FieldKind::RequiredText);
        assert_eq!(SiteField::Views90d.kind(), FieldKind::Count);
        assert_eq!(SiteField::DmarcPolicy.kind(), FieldKind::Text);
    }
}
