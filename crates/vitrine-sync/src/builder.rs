//! Statement builder.
//!
//! Maps one artwork record into the fixed set of Wikidata statements,
//! plus the English label and description. Building is a pure function of
//! the record and the retrieval date; it performs no I/O and is the only
//! place that decides whether a record is syncable at all (a record
//! without an accession number is refused before any network call).

use chrono::NaiveDate;

use vitrine_core::model::{ArtworkRecord, Claim, ShareLicense, Snak, StatementSet, TimeValue};
use vitrine_core::properties::{
    AUTHOR_NAME_STRING, CC0_LICENSE, COLLECTION, COLLECTION_ITEM, COMMONS_IMAGE_URL,
    COPYRIGHTED, COPYRIGHT_STATUS, DESCRIBED_AT_URL, DETERMINATION_METHOD, FILE_FORMAT,
    INCEPTION, INSTANCE_OF, INSTITUTION, INVENTORY_NUMBER, JPEG, LICENSE, LICENSE_DETERMINATION,
    OPERATOR, PUBLIC_DOMAIN, REFERENCE_URL, RETRIEVED, TITLE, URL,
};
use vitrine_core::vocab::{mapping_for, TypeMapping};
use vitrine_core::Error;

/// Labels and descriptions are capped at this many characters by the
/// knowledge base.
const TERM_LENGTH_LIMIT: usize = 250;

/// Fallback author string when no creator carries a description.
const UNKNOWN_ARTIST: &str = "unknown artist";

/// Everything the reconciler needs for one record, computed up front.
#[derive(Debug, Clone)]
pub struct BuiltArtwork {
    pub accession: String,
    pub label: String,
    pub description: String,
    pub author: String,
    /// Primary statements, submitted with the create call and diffed
    /// during reconciliation.
    pub statements: StatementSet,
    /// The Commons-compatible image claim, always written separately.
    pub commons: Option<Claim>,
    /// Human-readable notes about mappings that were skipped (unknown or
    /// target-less object types). Surfaced in the sync report.
    pub notes: Vec<String>,
}

/// Build the statement set for one artwork record.
///
/// `retrieved` is the build-time date stamped into every reference block.
///
/// # Errors
/// Returns [`Error::MissingField`] when the record has no accession
/// number; no partial output is produced.
pub fn build_statements(record: &ArtworkRecord, retrieved: NaiveDate) -> Result<BuiltArtwork, Error> {
    let accession = record
        .accession_number
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or(Error::MissingField {
            field: "accession_number",
        })?
        .to_string();

    let references = vec![
        Snak::text(REFERENCE_URL, &record.url),
        Snak::time(RETRIEVED, TimeValue::date(retrieved)),
    ];
    let sourced = |mainsnak: Snak| Claim::new(mainsnak).with_references(references.clone());

    let title = flatten_whitespace(&record.title);
    let author = author_string(record);
    let mut notes = Vec::new();
    let mut statements = StatementSet::default();

    statements.push(sourced(Snak::entity(COLLECTION, INSTITUTION)));
    statements.push(
        sourced(Snak::text(INVENTORY_NUMBER, &accession))
            .with_qualifier(Snak::entity(COLLECTION, INSTITUTION)),
    );
    statements.push(sourced(Snak::entity(INSTANCE_OF, COLLECTION_ITEM)));
    statements.push(sourced(Snak::monolingual(TITLE, &title, "en")));
    statements.push(sourced(Snak::text(DESCRIBED_AT_URL, &record.url)));

    // Only an exact creation year is asserted; a range is no date at all.
    if let (Some(earliest), Some(latest)) =
        (record.creation_date_earliest, record.creation_date_latest)
    {
        if earliest == latest {
            statements.push(sourced(Snak::time(INCEPTION, TimeValue::year(earliest))));
        }
    }

    let copyright_target = match record.share_license_status {
        ShareLicense::Copyrighted => Some(COPYRIGHTED),
        ShareLicense::Cc0 => Some(PUBLIC_DOMAIN),
        ShareLicense::Other(_) => None,
    };
    if let Some(target) = copyright_target {
        statements.push(
            sourced(Snak::entity(COPYRIGHT_STATUS, target))
                .with_qualifier(Snak::entity(DETERMINATION_METHOD, LICENSE_DETERMINATION)),
        );
    }

    if let Some(kind) = record.kind.as_deref().filter(|k| !k.is_empty()) {
        match mapping_for(kind) {
            Some(TypeMapping::Instance(target)) => {
                statements.push(sourced(Snak::entity(INSTANCE_OF, target)));
            }
            Some(TypeMapping::Facet { property, target }) => {
                statements.push(sourced(Snak::entity(property, target)));
            }
            Some(TypeMapping::NoTarget) => {
                log::warn!("object type '{kind}' has no Wikidata target ({accession})");
                notes.push(format!(
                    "Object type '{kind}' has no Wikidata target; skipped the object-type claim"
                ));
            }
            None => {
                log::warn!("object type '{kind}' is not in the controlled vocabulary ({accession})");
                notes.push(format!(
                    "Object type '{kind}' is not in the controlled vocabulary; skipped the object-type claim"
                ));
            }
        }
    }

    let commons = commons_claim(record, &title, &author);

    let label = truncate(&title, TERM_LENGTH_LIMIT);
    let kind_lower = record
        .kind
        .as_deref()
        .filter(|k| !k.is_empty())
        .map_or_else(|| "artwork".to_string(), str::to_lowercase);
    let description = truncate(
        &format!("({accession}) {kind_lower} by {author}"),
        TERM_LENGTH_LIMIT,
    );

    Ok(BuiltArtwork {
        accession,
        label,
        description,
        author,
        statements,
        commons,
        notes,
    })
}

/// The Commons-compatible image URL claim, emitted only for CC0 records
/// with a print image. Carries descriptive qualifiers instead of a
/// reference block.
fn commons_claim(record: &ArtworkRecord, title: &str, author: &str) -> Option<Claim> {
    if record.share_license_status != ShareLicense::Cc0 {
        return None;
    }
    let image_url = record.print_image_url()?;

    Some(
        Claim::new(Snak::text(COMMONS_IMAGE_URL, image_url))
            .with_qualifier(Snak::text(AUTHOR_NAME_STRING, author))
            .with_qualifier(Snak::monolingual(TITLE, title, "en"))
            .with_qualifier(Snak::entity(FILE_FORMAT, JPEG))
            .with_qualifier(Snak::entity(LICENSE, CC0_LICENSE))
            .with_qualifier(Snak::entity(OPERATOR, INSTITUTION))
            .with_qualifier(Snak::text(URL, &record.url)),
    )
}

/// Join the non-empty creator descriptions with `"; "`, preserving
/// record order; fall back to the fixed unknown-artist string.
fn author_string(record: &ArtworkRecord) -> String {
    let joined = record
        .creators
        .iter()
        .filter_map(|c| c.description.as_deref())
        .map(flatten_whitespace)
        .filter(|d| !d.is_empty())
        .collect::<Vec<_>>()
        .join("; ");

    if joined.is_empty() {
        UNKNOWN_ARTIST.to_string()
    } else {
        joined
    }
}

/// Trim and collapse embedded newlines to single spaces.
fn flatten_whitespace(text: &str) -> String {
    text.trim().replace(['\n', '\r'], " ")
}

/// Character-safe truncation.
fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        text.chars().take(limit).collect()
    }
}
