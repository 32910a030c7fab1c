//! The site record and its canonical/partial forms

use crate::core::field::{FieldValue, SiteField, serialize_optional_count};
use crate::core::flag;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

/// Canonical business fields of a site
///
/// Produced by create-mode validation: `site` is non-empty, every optional text
/// is either `None` or a non-empty trimmed string, and `views_90d` is either
/// `None` or a finite number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteFields {
    pub site: String,
    pub url: Option<String>,
    pub checkup_done: Option<String>,
    pub premium_hosting: Option<String>,
    pub seo_monitoring: Option<String>,
    #[serde(serialize_with = "serialize_optional_count")]
    pub views_90d: Option<f64>,
    pub end_client: Option<String>,
    pub server_name: Option<String>,
    pub server_ip: Option<String>,
    pub username: Option<String>,
    pub db_name: Option<String>,
    pub db_url: Option<String>,
    pub cloudflare: Option<String>,
    pub site_origin: Option<String>,
    pub analytics_code: Option<String>,
    pub php_version: Option<String>,
    pub dns_access: Option<String>,
    pub vc_wbp: Option<String>,
    pub events_cal: Option<String>,
    pub rev_slider: Option<String>,
    pub coverage_test: Option<String>,
    pub dmarc_policy: Option<String>,
}

impl SiteFields {
    /// A record with only a name, every other field null
    pub fn named(site: impl Into<String>) -> Self {
        Self {
            site: site.into(),
            url: None,
            checkup_done: None,
            premium_hosting: None,
            seo_monitoring: None,
            views_90d: None,
            end_client: None,
            server_name: None,
            server_ip: None,
            username: None,
            db_name: None,
            db_url: None,
            cloudflare: None,
            site_origin: None,
            analytics_code: None,
            php_version: None,
            dns_access: None,
            vc_wbp: None,
            events_cal: None,
            rev_slider: None,
            coverage_test: None,
            dmarc_policy: None,
        }
    }

    fn text_slot(&mut self, field: SiteField) -> Option<&mut Option<String>> {
        Some(match field {
            SiteField::Site | SiteField::Views90d => return None,
            SiteField::Url => &mut self.url,
            SiteField::CheckupDone => &mut self.checkup_done,
            SiteField::PremiumHosting => &mut self.premium_hosting,
            SiteField::SeoMonitoring => &mut self.seo_monitoring,
            SiteField::EndClient => &mut self.end_client,
            SiteField::ServerName => &mut self.server_name,
            SiteField::ServerIp => &mut self.server_ip,
            SiteField::Username => &mut self.username,
            SiteField::DbName => &mut self.db_name,
            SiteField::DbUrl => &mut self.db_url,
            SiteField::Cloudflare => &mut self.cloudflare,
            SiteField::SiteOrigin => &mut self.site_origin,
            SiteField::AnalyticsCode => &mut self.analytics_code,
            SiteField::PhpVersion => &mut self.php_version,
            SiteField::DnsAccess => &mut self.dns_access,
            SiteField::VcWbp => &mut self.vc_wbp,
            SiteField::EventsCal => &mut self.events_cal,
            SiteField::RevSlider => &mut self.rev_slider,
            SiteField::CoverageTest => &mut self.coverage_test,
            SiteField::DmarcPolicy => &mut self.dmarc_policy,
        })
    }

    /// Text of an optional text or flag field
    pub fn text(&self, field: SiteField) -> Option<&str> {
        let value = match field {
            SiteField::Site => return Some(&self.site),
            SiteField::Views90d => return None,
            SiteField::Url => &self.url,
            SiteField::CheckupDone => &self.checkup_done,
            SiteField::PremiumHosting => &self.premium_hosting,
            SiteField::SeoMonitoring => &self.seo_monitoring,
            SiteField::EndClient => &self.end_client,
            SiteField::ServerName => &self.server_name,
            SiteField::ServerIp => &self.server_ip,
            SiteField::Username => &self.username,
            SiteField::DbName => &self.db_name,
            SiteField::DbUrl => &self.db_url,
            SiteField::Cloudflare => &self.cloudflare,
            SiteField::SiteOrigin => &self.site_origin,
            SiteField::AnalyticsCode => &self.analytics_code,
            SiteField::PhpVersion => &self.php_version,
            SiteField::DnsAccess => &self.dns_access,
            SiteField::VcWbp => &self.vc_wbp,
            SiteField::EventsCal => &self.events_cal,
            SiteField::RevSlider => &self.rev_slider,
            SiteField::CoverageTest => &self.coverage_test,
            SiteField::DmarcPolicy => &self.dmarc_policy,
        };
        value.as_deref()
    }

    /// Get the value of a field by name
    pub fn get(&self, field: SiteField) -> FieldValue {
        match field {
            SiteField::Site => FieldValue::Text(self.site.clone()),
            SiteField::Views90d => FieldValue::from_number(self.views_90d),
            other => FieldValue::from_text(self.text(other).map(str::to_string)),
        }
    }

    /// Set a single field from a canonical value
    ///
    /// A null `site` is ignored: the record name can be replaced, never removed.
    pub fn set(&mut self, field: SiteField, value: FieldValue) {
        match field {
            SiteField::Site => {
                if let Some(site) = value.into_text() {
                    self.site = site;
                }
            }
            SiteField::Views90d => self.views_90d = value.into_number(),
            other => {
                if let Some(slot) = self.text_slot(other) {
                    *slot = value.into_text();
                }
            }
        }
    }

    /// Apply a partial update; fields absent from the patch are left untouched
    pub fn apply(&mut self, patch: &SitePatch) {
        for (field, value) in patch.iter() {
            self.set(*field, value.clone());
        }
    }

    /// Every field as a patch, in record order
    pub fn to_patch(&self) -> SitePatch {
        SiteField::ALL
            .iter()
            .map(|field| (*field, self.get(*field)))
            .collect()
    }

    /// Build a complete record from a patch; `None` when the patch has no `site`
    pub fn from_patch(patch: &SitePatch) -> Option<Self> {
        let site = patch.get(SiteField::Site)?.as_text()?.to_string();
        let mut fields = Self::named(site);
        fields.apply(patch);
        Some(fields)
    }

    /// Whether a flag field is on, per the truthiness convention
    pub fn flag(&self, field: SiteField) -> bool {
        field.is_flag() && flag::is_on(self.text(field))
    }
}

/// A subset of site fields, as supplied for an update
///
/// Only fields present in the input are carried; an empty patch is a no-op.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SitePatch(IndexMap<SiteField, FieldValue>);

impl SitePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: SiteField, value: FieldValue) {
        self.0.insert(field, value);
    }

    pub fn get(&self, field: SiteField) -> Option<&FieldValue> {
        self.0.get(&field)
    }

    pub fn contains(&self, field: SiteField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SiteField, &FieldValue)> {
        self.0.iter()
    }

    pub fn fields(&self) -> impl Iterator<Item = SiteField> + '_ {
        self.0.keys().copied()
    }
}

impl FromIterator<(SiteField, FieldValue)> for SitePatch {
    fn from_iter<I: IntoIterator<Item = (SiteField, FieldValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for SitePatch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

/// A persisted site record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    /// Stable identifier, assigned at creation
    pub id: Uuid,

    #[serde(flatten)]
    pub fields: SiteFields,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    /// Identity of the creating user, if one was known
    pub created_by: Option<Uuid>,
}

impl Site {
    /// Create a new record with a fresh id and timestamps
    pub fn new(fields: SiteFields, created_by: Option<Uuid>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            fields,
            created_at: now,
            updated_at: now,
            created_by,
        }
    }

    /// Display name of the site
    pub fn name(&self) -> &str {
        &self.fields.site
    }

    /// Update the modification timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Apply a patch and touch the record; an empty patch changes nothing
    pub fn apply(&mut self, patch: &SitePatch) {
        if patch.is_empty() {
            return;
        }
        self.fields.apply(patch);
        self.touch();
    }

    pub fn flag(&self, field: SiteField) -> bool {
        self.fields.flag(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_named_defaults_to_null() {
        let fields = SiteFields::named("Acme");
        assert_eq!(fields.site, "Acme");
        for field in SiteField::ALL.iter().filter(|f| **f != SiteField::Site) {
            assert!(fields.get(*field).is_null(), "{field} should be null");
        }
    }

    #[test]
    fn test_set_and_get_every_field() {
        let mut fields = SiteFields::named("Acme");
        for field in SiteField::ALL {
            let value = if field == SiteField::Views90d {
                FieldValue::Number(7.0)
            } else {
                FieldValue::Text(format!("v-{}", field))
            };
            fields.set(field, value.clone());
            assert_eq!(fields.get(field), value);
        }
    }

    #[test]
    fn test_null_site_is_ignored() {
        let mut fields = SiteFields::named("Acme");
        fields.set(SiteField::Site, FieldValue::Null);
        assert_eq!(fields.site, "Acme");
    }

    #[test]
    fn test_apply_leaves_absent_fields() {
        let mut fields = SiteFields::named("Acme");
        fields.url = Some("https://acme.test".to_string());

        let mut patch = SitePatch::new();
        patch.insert(SiteField::PremiumHosting, FieldValue::Text("Yes".into()));
        fields.apply(&patch);

        assert_eq!(fields.url.as_deref(), Some("https://acme.test"));
        assert_eq!(fields.premium_hosting.as_deref(), Some("Yes"));
    }

    #[test]
    fn test_to_patch_from_patch_roundtrip() {
        let mut fields = SiteFields::named("Acme");
        fields.views_90d = Some(1200.0);
        fields.cloudflare = Some("1".to_string());

        let patch = fields.to_patch();
        assert_eq!(patch.len(), SiteField::ALL.len());
        assert_eq!(SiteFields::from_patch(&patch), Some(fields));
    }

    #[test]
    fn test_from_patch_requires_site() {
        let mut patch = SitePatch::new();
        patch.insert(SiteField::Url, FieldValue::Null);
        assert!(SiteFields::from_patch(&patch).is_none());
    }

    #[test]
    fn test_flag_accessor() {
        let mut fields = SiteFields::named("Acme");
        fields.cloudflare = Some(" yes ".to_string());
        fields.dns_access = Some("maybe".to_string());
        fields.url = Some("1".to_string());

        assert!(fields.flag(SiteField::Cloudflare));
        assert!(!fields.flag(SiteField::DnsAccess));
        assert!(!fields.flag(SiteField::EventsCal));
        // Not a flag field, whatever its text
        assert!(!fields.flag(SiteField::Url));
    }

    #[test]
    fn test_site_serializes_flat() {
        let site = Site::new(SiteFields::named("Acme"), None);
        let json = serde_json::to_value(&site).expect("serialize should succeed");

        assert_eq!(json["site"], json!("Acme"));
        assert_eq!(json["url"], json!(null));
        assert_eq!(json["views_90d"], json!(null));
        assert_eq!(json["created_by"], json!(null));
        assert!(json["id"].is_string());

        let back: Site = serde_json::from_value(json).expect("deserialize should succeed");
        assert_eq!(back, site);
    }

    #[test]
    fn test_empty_patch_does_not_touch() {
        let mut site = Site::new(SiteFields::named("Acme"), None);
        let before = site.updated_at;
        site.apply(&SitePatch::new());
        assert_eq!(site.updated_at, before);
    }

    #[test]
    fn test_patch_serializes_only_present_fields() {
        let mut patch = SitePatch::new();
        patch.insert(SiteField::PremiumHosting, FieldValue::Text("Yes".into()));
        let json = serde_json::to_value(&patch).expect("serialize should succeed");
        assert_eq!(json, json!({ "premium_hosting": "Yes" }));
    }

    #[test]
    fn test_integral_views_serialize_as_integer() {
        let mut fields = SiteFields::named("Acme");
        fields.views_90d = Some(1200.0);
        let json = serde_json::to_value(&fields).expect("serialize should succeed");
        assert_eq!(json["views_90d"], json!(1200));

        fields.views_90d = Some(12.5);
        let json = serde_json::to_value(&fields).expect("serialize should succeed");
        assert_eq!(json["views_90d"], json!(12.5));

        let back: SiteFields = serde_json::from_value(json).expect("deserialize should succeed");
        assert_eq!(back, fields);
    }
}
