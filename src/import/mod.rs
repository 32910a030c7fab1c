//! Bulk import of rows exported from the hosting spreadsheet
//!
//! Rows arrive keyed by column title, with loosely typed cells (text, numbers,
//! blanks). They are mapped onto site fields,
//! validated as a batch, and upserted by `url`: a row whose url already
//! exists replaces that record's fields, anything else is inserted.

use crate::core::error::ConfigError;
use crate::core::field::SiteField;
use crate::core::service::SiteService;
use crate::core::site::SiteFields;
use crate::core::validation::{RejectedRow, validate_batch};
use anyhow::Result;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

/// One spreadsheet row: column title → raw cell
pub type ImportRow = IndexMap<String, Value>;

/// Column title → site field
#[derive(Debug, Clone, PartialEq)]
pub struct ImportMapping {
    headers: IndexMap<String, SiteField>,
}

impl Default for ImportMapping {
    /// The legacy export's column titles
    fn default() -> Self {
        Self {
            headers: SiteField::ALL
                .iter()
                .map(|field| (field.legacy_header().to_string(), *field))
                .collect(),
        }
    }
}

impl ImportMapping {
    /// Default titles plus configured overrides (title → field name)
    pub fn with_overrides(overrides: &IndexMap<String, String>) -> Result<Self, ConfigError> {
        let mut mapping = Self::default();
        for (header, name) in overrides {
            let field = name.parse::<SiteField>().map_err(|e| ConfigError::InvalidValue {
                field: format!("import.headers.{}", header),
                message: e.to_string(),
            })?;
            mapping.headers.insert(header.clone(), field);
        }
        Ok(mapping)
    }

    pub fn field_for(&self, header: &str) -> Option<SiteField> {
        self.headers.get(header.trim()).copied()
    }

    /// Turn a spreadsheet row into a candidate payload
    ///
    /// Unmapped columns are dropped. Cells are passed on as they are, so the
    /// field rules see numbers as numbers. When two columns map to the same
    /// field, the later non-blank one wins.
    pub fn map_row(&self, row: &ImportRow) -> Value {
        let mut payload = Map::new();
        for (header, cell) in row {
            let Some(field) = self.field_for(header) else {
                continue;
            };
            let key = field.as_str().to_string();
            if is_blank(cell) && payload.contains_key(&key) {
                continue;
            }
            payload.insert(key, cell.clone());
        }
        Value::Object(payload)
    }
}

fn is_blank(cell: &Value) -> bool {
    match cell {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// What an import did
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportReport {
    pub inserted: usize,
    pub updated: usize,
    pub rejected: Vec<RejectedRow>,
}

impl ImportReport {
    pub fn saved(&self) -> usize {
        self.inserted + self.updated
    }
}

/// Validate and upsert spreadsheet rows
pub async fn import_rows<S>(
    service: &S,
    mapping: &ImportMapping,
    rows: &[ImportRow],
    created_by: Option<Uuid>,
) -> Result<ImportReport>
where
    S: SiteService + ?Sized,
{
    let outcome = validate_batch(rows.iter().map(|row| mapping.map_row(row)));
    let mut report = ImportReport::default();

    for rejected in &outcome.rejected {
        tracing::warn!(
            row = rejected.position,
            site = %rejected.label,
            errors = %rejected.errors,
            "Skipped invalid row"
        );
    }
    report.rejected = outcome.rejected;

    for accepted in outcome.accepted {
        if upsert(service, accepted.fields, created_by).await? {
            report.updated += 1;
        } else {
            report.inserted += 1;
        }
    }

    tracing::info!(
        inserted = report.inserted,
        updated = report.updated,
        rejected = report.rejected.len(),
        "Import finished"
    );

    Ok(report)
}

// Returns true when an existing record was replaced. A match that vanishes
// before the update lands is inserted instead.
async fn upsert<S>(service: &S, fields: SiteFields, created_by: Option<Uuid>) -> Result<bool>
where
    S: SiteService + ?Sized,
{
    if let Some(url) = fields.url.as_deref() {
        let existing = service.find_by(SiteField::Url, url).await?;
        if let Some(site) = existing.first() {
            if service.update(&site.id, fields.to_patch()).await?.is_some() {
                return Ok(true);
            }
            tracing::debug!(id = %site.id, url = %url, "Matched site disappeared, inserting");
        }
    }

    service.insert(fields, created_by).await?;
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(cells: &[(&str, Value)]) -> ImportRow {
        cells
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_default_mapping_uses_legacy_headers() {
        let mapping = ImportMapping::default();
        assert_eq!(mapping.field_for("Site"), Some(SiteField::Site));
        assert_eq!(mapping.field_for("90 day views"), Some(SiteField::Views90d));
        assert_eq!(mapping.field_for("New Server"), Some(SiteField::ServerName));
        assert_eq!(mapping.field_for("Notes"), None);
    }

    #[test]
    fn test_overrides_extend_mapping() {
        let overrides = [("Website".to_string(), "url".to_string())]
            .into_iter()
            .collect();
        let mapping = ImportMapping::with_overrides(&overrides).unwrap();
        assert_eq!(mapping.field_for("Website"), Some(SiteField::Url));
        assert_eq!(mapping.field_for("URL"), Some(SiteField::Url));

        let bad = [("Website".to_string(), "homepage".to_string())]
            .into_iter()
            .collect();
        assert!(ImportMapping::with_overrides(&bad).is_err());
    }

    #[test]
    fn test_map_row_drops_unknown_columns() {
        let mapping = ImportMapping::default();
        let payload = mapping.map_row(&row(&[
            ("Site", json!("Acme")),
            ("Notes", json!("ignored")),
            ("90 day views", json!("1200")),
        ]));

        assert_eq!(payload, json!({ "site": "Acme", "views_90d": "1200" }));
    }

    #[test]
    fn test_map_row_keeps_numeric_cells() {
        let mapping = ImportMapping::default();
        let payload = mapping.map_row(&row(&[
            ("Site", json!("Acme")),
            ("90 day views", json!(1200)),
            ("Cloudflare?", json!(1)),
        ]));

        assert_eq!(
            payload,
            json!({ "site": "Acme", "views_90d": 1200, "cloudflare": 1 })
        );
    }

    #[test]
    fn test_map_row_blank_cell_does_not_override() {
        let overrides = [("Website".to_string(), "url".to_string())]
            .into_iter()
            .collect();
        let mapping = ImportMapping::with_overrides(&overrides).unwrap();

        let payload = mapping.map_row(&row(&[
            ("Site", json!("Acme")),
            ("URL", json!("https://acme.test")),
            ("Website", json!("  ")),
        ]));
        assert_eq!(payload["url"], json!("https://acme.test"));

        let payload = mapping.map_row(&row(&[
            ("Site", json!("Acme")),
            ("URL", json!("https://acme.test")),
            ("Website", Value::Null),
        ]));
        assert_eq!(payload["url"], json!("https://acme.test"));
    }
}
