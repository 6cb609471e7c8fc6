//! The artwork record as received from the museum's collection API.
//!
//! Records arrive as JSON with many more fields than the sync workflow
//! needs. Every field here defaults so that partial records still parse;
//! required-field enforcement happens in the statement builder, which is
//! the single place that decides whether a record can be synced at all.
//! Unknown fields are preserved through a flattened map so a record can be
//! round-tripped back to disk without losing institution data.

use serde::{Deserialize, Serialize};

/// One artwork record from the collection database.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtworkRecord {
    /// Institution-internal unique identifier. Absence aborts the sync
    /// for this record before any write.
    #[serde(default)]
    pub accession_number: Option<String>,

    #[serde(default)]
    pub title: String,

    /// Collection page URL for the object.
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub creation_date_earliest: Option<i32>,

    #[serde(default)]
    pub creation_date_latest: Option<i32>,

    /// Ordered list of creators; order is preserved in the author string.
    #[serde(default)]
    pub creators: Vec<Creator>,

    #[serde(default)]
    pub share_license_status: ShareLicense,

    /// Object type from the institution's controlled vocabulary.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    #[serde(default)]
    pub images: Option<ImageSet>,

    #[serde(default)]
    pub external_resources: ExternalResources,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ArtworkRecord {
    /// The print-resolution image URL, when the record carries one.
    pub fn print_image_url(&self) -> Option<&str> {
        self.images.as_ref()?.print.as_ref()?.url.as_deref()
    }
}

/// A single creator entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Creator {
    #[serde(default)]
    pub description: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Share-license status of a record.
///
/// Only the two exact strings `"Copyrighted"` and `"CC0"` drive claim
/// emission; anything else round-trips unmodified through [`Other`].
///
/// [`Other`]: ShareLicense::Other
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ShareLicense {
    Copyrighted,
    Cc0,
    Other(String),
}

impl Default for ShareLicense {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for ShareLicense {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Copyrighted" => Self::Copyrighted,
            "CC0" => Self::Cc0,
            _ => Self::Other(value),
        }
    }
}

impl From<ShareLicense> for String {
    fn from(value: ShareLicense) -> Self {
        match value {
            ShareLicense::Copyrighted => "Copyrighted".to_string(),
            ShareLicense::Cc0 => "CC0".to_string(),
            ShareLicense::Other(s) => s,
        }
    }
}

/// Nested image structure from the collection API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageSet {
    #[serde(default)]
    pub print: Option<ImageFile>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One image entry inside an [`ImageSet`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageFile {
    #[serde(default)]
    pub url: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// External knowledge-base links maintained on a record.
///
/// The batch entry point appends the derived Wikidata URL here after a
/// successful sync.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalResources {
    #[serde(default)]
    pub wikidata: Vec<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_record_deserialize() {
        let json = r#"{
            "accession_number": "1916.1",
            "title": "Relief of a Woman",
            "url": "https://clevelandart.org/art/1916.1",
            "creation_date_earliest": 100,
            "creation_date_latest": 100,
            "creators": [{"description": "Unknown maker", "role": "artist"}],
            "share_license_status": "CC0",
            "type": "Relief",
            "images": {"print": {"url": "https://images.example/1916.1/print.jpg"}},
            "external_resources": {"wikidata": []}
        }"#;

        let record: ArtworkRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.accession_number.as_deref(), Some("1916.1"));
        assert_eq!(record.title, "Relief of a Woman");
        assert_eq!(record.share_license_status, ShareLicense::Cc0);
        assert_eq!(record.kind.as_deref(), Some("Relief"));
        assert_eq!(
            record.print_image_url(),
            Some("https://images.example/1916.1/print.jpg")
        );
        assert_eq!(record.creation_date_earliest, Some(100));
        assert_eq!(record.creators.len(), 1);
    }

    #[test]
    fn test_missing_accession_number_parses() {
        let record: ArtworkRecord = serde_json::from_str(r#"{"title": "Untitled"}"#).unwrap();
        assert!(record.accession_number.is_none());
        assert_eq!(record.title, "Untitled");
    }

    #[test]
    fn test_unknown_license_round_trips() {
        let record: ArtworkRecord =
            serde_json::from_str(r#"{"share_license_status": "Restricted"}"#).unwrap();
        assert_eq!(
            record.share_license_status,
            ShareLicense::Other("Restricted".to_string())
        );

        let out = serde_json::to_value(&record).unwrap();
        assert_eq!(out["share_license_status"], "Restricted");
    }

    #[test]
    fn test_extra_fields_preserved() {
        let json = r#"{
            "accession_number": "1920.5",
            "tombstone": "Vessel, 1200s. Unknown maker.",
            "department": "Medieval Art"
        }"#;

        let record: ArtworkRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.extra["department"], "Medieval Art");

        let out = serde_json::to_value(&record).unwrap();
        assert_eq!(out["tombstone"], "Vessel, 1200s. Unknown maker.");
    }

    #[test]
    fn test_print_image_url_absent() {
        let record = ArtworkRecord::default();
        assert!(record.print_image_url().is_none());

        let record: ArtworkRecord =
            serde_json::from_str(r#"{"images": {"print": {}}}"#).unwrap();
        assert!(record.print_image_url().is_none());
    }
}
