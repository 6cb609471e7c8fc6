//! Integration tests for the create-vs-reconcile state machine.
//!
//! These tests drive the full engine through recording doubles at the
//! lookup and edit-client seams, so every branch runs without a network
//! and every write can be counted.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use vitrine_core::model::{
    ArtworkRecord, Claim, ImageFile, ImageSet, NewEntity, Qid, ShareLicense,
};
use vitrine_sync::{
    build_statements, BuiltArtwork, EditClient, Lookup, LookupOutcome, RemoteEntity, SyncConfig,
    SyncEngine, SyncError, SyncResult,
};

// ---------------------------------------------------------------------------
// Test doubles
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct FixedLookup(LookupOutcome);

#[async_trait]
impl Lookup for FixedLookup {
    async fn find_by_accession(&self, _accession: &str) -> SyncResult<LookupOutcome> {
        Ok(self.0.clone())
    }
}

#[derive(Debug)]
struct FailingLookup;

#[async_trait]
impl Lookup for FailingLookup {
    async fn find_by_accession(&self, _accession: &str) -> SyncResult<LookupOutcome> {
        Err(SyncError::LookupParse {
            message: "response was an HTML error page".to_string(),
        })
    }
}

/// Recording [`EditClient`] double. Cloning shares the call log.
#[derive(Debug, Clone, Default)]
struct MockClient {
    calls: Arc<Mutex<Vec<String>>>,
    entity: Option<RemoteEntity>,
    fail_create: bool,
    fail_add_claim: bool,
}

impl MockClient {
    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn write_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| !c.starts_with("fetch"))
            .count()
    }
}

#[async_trait]
impl EditClient for MockClient {
    async fn create_entity(&self, entity: &NewEntity, _summary: &str) -> SyncResult<Qid> {
        self.record(format!("create:{}", entity.label));
        if self.fail_create {
            return Err(SyncError::Api {
                code: "failed-save".to_string(),
                info: "edit conflict".to_string(),
            });
        }
        Ok(Qid::new("Q4115189").unwrap())
    }

    async fn fetch_entity(&self, qid: &Qid) -> SyncResult<RemoteEntity> {
        self.record(format!("fetch:{qid}"));
        self.entity.clone().ok_or_else(|| SyncError::NotFound {
            qid: qid.to_string(),
        })
    }

    async fn set_label(
        &self,
        _qid: &Qid,
        language: &str,
        value: &str,
        _summary: &str,
    ) -> SyncResult<()> {
        self.record(format!("set_label:{language}:{value}"));
        Ok(())
    }

    async fn set_description(
        &self,
        _qid: &Qid,
        language: &str,
        value: &str,
        _summary: &str,
    ) -> SyncResult<()> {
        self.record(format!("set_description:{language}:{value}"));
        Ok(())
    }

    async fn add_claim(&self, _qid: &Qid, claim: &Claim, _summary: &str) -> SyncResult<()> {
        self.record(format!("add_claim:{}", claim.property()));
        if self.fail_add_claim {
            return Err(SyncError::Api {
                code: "modification-failed".to_string(),
                info: "claim rejected".to_string(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn test_config() -> SyncConfig {
    SyncConfig {
        post_create_delay_secs: 0,
        ..SyncConfig::default()
    }
}

fn relief_record() -> ArtworkRecord {
    ArtworkRecord {
        accession_number: Some("1916.1".to_string()),
        title: "Relief of a Woman".to_string(),
        url: "https://clevelandart.org/art/1916.1".to_string(),
        share_license_status: ShareLicense::Cc0,
        kind: Some("Relief".to_string()),
        images: Some(ImageSet {
            print: Some(ImageFile {
                url: Some("https://images.example/1916.1/print.jpg".to_string()),
                ..ImageFile::default()
            }),
            ..ImageSet::default()
        }),
        ..ArtworkRecord::default()
    }
}

fn built_relief() -> BuiltArtwork {
    let retrieved = chrono::Utc::now().date_naive();
    build_statements(&relief_record(), retrieved).unwrap()
}

/// A remote entity that already carries everything the builder emits,
/// in the shape the entity-data endpoint returns.
fn entity_matching(built: &BuiltArtwork, qid: &str) -> RemoteEntity {
    let mut claims = serde_json::Map::new();
    for claim in built.statements.iter() {
        let rendered = claim.to_json();
        match claims
            .entry(claim.property().to_string())
            .or_insert_with(|| Value::Array(Vec::new()))
        {
            Value::Array(items) => items.push(rendered),
            _ => unreachable!(),
        }
    }
    if let Some(commons) = &built.commons {
        claims.insert(
            commons.property().to_string(),
            Value::Array(vec![commons.to_json()]),
        );
    }

    serde_json::from_value(json!({
        "id": qid,
        "labels": {"en": {"language": "en", "value": built.label}},
        "descriptions": {"en": {"language": "en", "value": built.description}},
        "claims": claims,
    }))
    .unwrap()
}

// ---------------------------------------------------------------------------
// Create branch
// ---------------------------------------------------------------------------

#[tokio::test]
async fn no_match_creates_item_and_attaches_commons() {
    let client = MockClient::default();
    let engine = SyncEngine::new(
        FixedLookup(LookupOutcome::NoMatch),
        client.clone(),
        test_config(),
    );

    let report = engine.sync_artwork(&relief_record()).await;

    assert!(report.is_success());
    assert_eq!(report.qid().map(Qid::as_str), Some("Q4115189"));

    let calls = client.calls();
    assert_eq!(calls[0], "create:Relief of a Woman");
    // The Commons claim is the only follow-up write.
    assert_eq!(calls[1], "add_claim:P4765");
    assert_eq!(calls.len(), 2);
}

#[tokio::test]
async fn create_without_image_reports_soft_skip() {
    let mut record = relief_record();
    record.images = None;

    let client = MockClient::default();
    let engine = SyncEngine::new(
        FixedLookup(LookupOutcome::NoMatch),
        client.clone(),
        test_config(),
    );

    let report = engine.sync_artwork(&record).await;

    assert!(report.is_success());
    assert!(report
        .lines()
        .iter()
        .any(|l| l.contains("No Commons-compatible image")));
    assert_eq!(client.write_count(), 1);
}

#[tokio::test]
async fn create_conflict_is_reported_without_retry() {
    let client = MockClient {
        fail_create: true,
        ..MockClient::default()
    };
    let engine = SyncEngine::new(
        FixedLookup(LookupOutcome::NoMatch),
        client.clone(),
        test_config(),
    );

    let report = engine.sync_artwork(&relief_record()).await;

    assert!(!report.is_success());
    assert!(report.qid().is_none());
    assert!(matches!(
        report.error(),
        Some(SyncError::CreateConflict { .. })
    ));
    // One attempt, no retry, no follow-up writes.
    assert_eq!(client.write_count(), 1);
}

#[tokio::test]
async fn commons_attach_failure_after_create_is_soft() {
    let client = MockClient {
        fail_add_claim: true,
        ..MockClient::default()
    };
    let engine = SyncEngine::new(
        FixedLookup(LookupOutcome::NoMatch),
        client.clone(),
        test_config(),
    );

    let report = engine.sync_artwork(&relief_record()).await;

    // The record still counts as synced; the failure is reported.
    assert!(report.is_success());
    assert_eq!(report.qid().map(Qid::as_str), Some("Q4115189"));
    assert!(report
        .lines()
        .iter()
        .any(|l| l.contains("Could not attach Commons claim")));
}

// ---------------------------------------------------------------------------
// Reconcile branch
// ---------------------------------------------------------------------------

#[tokio::test]
async fn reconcile_is_idempotent_against_matching_item() {
    let built = built_relief();
    let client = MockClient {
        entity: Some(entity_matching(&built, "Q123456")),
        ..MockClient::default()
    };
    let engine = SyncEngine::new(
        FixedLookup(LookupOutcome::OneMatch(Qid::new("Q123456").unwrap())),
        client.clone(),
        test_config(),
    );

    let report = engine.sync_artwork(&relief_record()).await;

    assert!(report.is_success());
    assert_eq!(report.qid().map(Qid::as_str), Some("Q123456"));
    // Everything is already in place: one fetch, zero writes.
    assert_eq!(client.write_count(), 0);
}

#[tokio::test]
async fn reconcile_overwrites_stale_label_only() {
    let built = built_relief();
    let mut entity = entity_matching(&built, "Q123456");
    entity.labels.clear();

    let client = MockClient {
        entity: Some(entity),
        ..MockClient::default()
    };
    let engine = SyncEngine::new(
        FixedLookup(LookupOutcome::OneMatch(Qid::new("Q123456").unwrap())),
        client.clone(),
        test_config(),
    );

    let report = engine.sync_artwork(&relief_record()).await;

    assert!(report.is_success());
    assert_eq!(
        client.calls(),
        vec![
            "fetch:Q123456".to_string(),
            "set_label:en:Relief of a Woman".to_string(),
        ]
    );
}

#[tokio::test]
async fn reconcile_overwrites_stale_description() {
    let built = built_relief();
    let mut entity = entity_matching(&built, "Q123456");
    entity.descriptions.clear();

    let client = MockClient {
        entity: Some(entity),
        ..MockClient::default()
    };
    let engine = SyncEngine::new(
        FixedLookup(LookupOutcome::OneMatch(Qid::new("Q123456").unwrap())),
        client.clone(),
        test_config(),
    );

    let report = engine.sync_artwork(&relief_record()).await;

    assert!(report.is_success());
    assert_eq!(
        client.calls()[1],
        "set_description:en:(1916.1) relief by unknown artist"
    );
    assert_eq!(client.write_count(), 1);
}

#[tokio::test]
async fn reconcile_adds_only_missing_claims() {
    let built = built_relief();
    let mut entity = entity_matching(&built, "Q123456");
    // Strip the accession-number claim; everything else stays.
    entity.claims.remove("P217");

    let client = MockClient {
        entity: Some(entity),
        ..MockClient::default()
    };
    let engine = SyncEngine::new(
        FixedLookup(LookupOutcome::OneMatch(Qid::new("Q123456").unwrap())),
        client.clone(),
        test_config(),
    );

    let report = engine.sync_artwork(&relief_record()).await;

    assert!(report.is_success());
    let calls = client.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1], "add_claim:P217");
}

#[tokio::test]
async fn reconcile_skips_commons_when_media_already_present() {
    let built = built_relief();
    let mut entity = entity_matching(&built, "Q123456");
    // Replace the P4765 claim with a P18 one: different property, but
    // the item is already illustrated.
    entity.claims.remove("P4765");
    entity.claims.insert(
        "P18".to_string(),
        vec![json!({
            "mainsnak": {
                "snaktype": "value",
                "property": "P18",
                "datavalue": {"type": "string", "value": "Relief of a woman.jpg"}
            }
        })],
    );

    let client = MockClient {
        entity: Some(entity),
        ..MockClient::default()
    };
    let engine = SyncEngine::new(
        FixedLookup(LookupOutcome::OneMatch(Qid::new("Q123456").unwrap())),
        client.clone(),
        test_config(),
    );

    let report = engine.sync_artwork(&relief_record()).await;

    assert!(report.is_success());
    assert!(report
        .lines()
        .iter()
        .any(|l| l.contains("already represented")));
    assert_eq!(client.write_count(), 0);
}

#[tokio::test]
async fn reconcile_commons_failure_is_soft_and_sync_continues() {
    let built = built_relief();
    let mut entity = entity_matching(&built, "Q123456");
    entity.claims.remove("P4765");
    entity.claims.remove("P217");

    let client = MockClient {
        entity: Some(entity),
        fail_add_claim: true,
        ..MockClient::default()
    };
    let engine = SyncEngine::new(
        FixedLookup(LookupOutcome::OneMatch(Qid::new("Q123456").unwrap())),
        client.clone(),
        test_config(),
    );

    let report = engine.sync_artwork(&relief_record()).await;

    // The Commons failure is soft, but the P217 add failure is fatal:
    // the report carries both outcomes.
    assert!(!report.is_success());
    assert!(report
        .lines()
        .iter()
        .any(|l| l.contains("Could not attach Commons claim")));
    let calls = client.calls();
    assert!(calls.contains(&"add_claim:P4765".to_string()));
    assert!(calls.contains(&"add_claim:P217".to_string()));
}

// ---------------------------------------------------------------------------
// Failure states before any write
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_accession_number_issues_no_calls() {
    let record = ArtworkRecord {
        title: "Untitled".to_string(),
        ..ArtworkRecord::default()
    };

    let client = MockClient::default();
    let engine = SyncEngine::new(
        FixedLookup(LookupOutcome::NoMatch),
        client.clone(),
        test_config(),
    );

    let report = engine.sync_artwork(&record).await;

    assert!(!report.is_success());
    assert!(report.qid().is_none());
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn lookup_parse_failure_aborts_without_writes() {
    let client = MockClient::default();
    let engine = SyncEngine::new(FailingLookup, client.clone(), test_config());

    let report = engine.sync_artwork(&relief_record()).await;

    assert!(!report.is_success());
    assert!(report.qid().is_none());
    assert!(matches!(report.error(), Some(SyncError::LookupParse { .. })));
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn ambiguous_lookup_refuses_the_record() {
    let client = MockClient::default();
    let engine = SyncEngine::new(
        FixedLookup(LookupOutcome::Ambiguous(2)),
        client.clone(),
        test_config(),
    );

    let report = engine.sync_artwork(&relief_record()).await;

    assert!(!report.is_success());
    assert!(matches!(
        report.error(),
        Some(SyncError::AmbiguousMatch { count: 2, .. })
    ));
    assert!(client.calls().is_empty());
}

// ---------------------------------------------------------------------------
// Batch entry point
// ---------------------------------------------------------------------------

#[tokio::test]
async fn batch_sync_appends_item_url_and_preserves_order() {
    let valid = relief_record();
    let invalid = ArtworkRecord {
        title: "No accession".to_string(),
        ..ArtworkRecord::default()
    };

    let client = MockClient::default();
    let engine = SyncEngine::new(
        FixedLookup(LookupOutcome::NoMatch),
        client.clone(),
        test_config(),
    );

    let (records, reports) = engine.batch_sync(vec![valid, invalid]).await;

    assert_eq!(records.len(), 2);
    assert_eq!(reports.len(), 2);

    assert_eq!(
        records[0].external_resources.wikidata,
        vec!["https://www.wikidata.org/wiki/Q4115189".to_string()]
    );
    assert!(reports[0].is_success());

    assert_eq!(records[1].title, "No accession");
    assert!(records[1].external_resources.wikidata.is_empty());
    assert!(!reports[1].is_success());
}

#[tokio::test]
async fn batch_sync_does_not_duplicate_existing_url() {
    let mut record = relief_record();
    record
        .external_resources
        .wikidata
        .push("https://www.wikidata.org/wiki/Q4115189".to_string());

    let client = MockClient::default();
    let engine = SyncEngine::new(
        FixedLookup(LookupOutcome::NoMatch),
        client.clone(),
        test_config(),
    );

    let (records, _) = engine.batch_sync(vec![record]).await;
    assert_eq!(records[0].external_resources.wikidata.len(), 1);
}
