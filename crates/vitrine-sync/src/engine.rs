//! The sync engine: lookup, then create-or-reconcile.
//!
//! Processing is strictly sequential: each record runs to completion
//! before the next begins, and nothing is retried. The engine is generic
//! over the [`Lookup`] and [`EditClient`] seams so the whole state
//! machine is testable without a network.

use chrono::Utc;

use vitrine_core::model::{ArtworkRecord, NewEntity, Qid};
use vitrine_core::properties::{COMMONS_IMAGE_URL, IMAGE, INSTITUTION_NAME};

use crate::builder::{build_statements, BuiltArtwork};
use crate::client::EditClient;
use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::lookup::{Lookup, LookupOutcome};
use crate::report::SyncReport;

/// Base URL for the public item pages recorded on synced records.
const ITEM_PAGE_BASE: &str = "https://www.wikidata.org/wiki";

/// Edit summary for the initial import of a record.
fn import_summary(accession: &str) -> String {
    format!("Importing {INSTITUTION_NAME} collections to Wikidata: accession number {accession}.")
}

/// Edit summary for a synchronization write. `subject` is one of
/// `statement`, `label`, or `description`.
fn sync_summary(subject: &str, accession: &str) -> String {
    format!(
        "Synchronizing Wikidata {subject} with {INSTITUTION_NAME} data: accession number {accession}."
    )
}

/// Orchestrates one record at a time through lookup and reconciliation.
#[derive(Debug)]
pub struct SyncEngine<L, C> {
    lookup: L,
    client: C,
    config: SyncConfig,
}

impl<L: Lookup, C: EditClient> SyncEngine<L, C> {
    pub fn new(lookup: L, client: C, config: SyncConfig) -> Self {
        Self {
            lookup,
            client,
            config,
        }
    }

    /// Synchronize one artwork record.
    ///
    /// Always returns a report; failures are recorded on it rather than
    /// bubbling, so a batch can keep going.
    pub async fn sync_artwork(&self, record: &ArtworkRecord) -> SyncReport {
        let built = match build_statements(record, Utc::now().date_naive()) {
            Ok(built) => built,
            Err(e) => return SyncReport::rejected(e.into()),
        };

        let mut report = SyncReport::new(&built.accession);
        for note in &built.notes {
            report.push(note.clone());
        }

        let outcome = match self.lookup.find_by_accession(&built.accession).await {
            Ok(outcome) => outcome,
            Err(e) => {
                report.fail(e);
                return report;
            }
        };

        match outcome {
            LookupOutcome::NoMatch => self.create_item(&built, &mut report).await,
            LookupOutcome::OneMatch(qid) => self.reconcile_item(&built, qid, &mut report).await,
            LookupOutcome::Ambiguous(count) => {
                report.fail(SyncError::AmbiguousMatch {
                    accession: built.accession.clone(),
                    count,
                });
            }
        }

        report
    }

    /// NO_MATCH branch: create the item, wait out the indexing lag, then
    /// attach the Commons claim as a second write.
    async fn create_item(&self, built: &BuiltArtwork, report: &mut SyncReport) {
        let entity = NewEntity {
            label: built.label.clone(),
            description: built.description.clone(),
            language: self.config.language.clone(),
            claims: built.statements.clone(),
        };

        let qid = match self
            .client
            .create_entity(&entity, &import_summary(&built.accession))
            .await
        {
            Ok(qid) => qid,
            Err(e) => {
                let error = match e {
                    SyncError::Api { code, info } => SyncError::CreateConflict {
                        accession: built.accession.clone(),
                        message: format!("{code}: {info}"),
                    },
                    other => other,
                };
                report.push(format!("Failed to upload: {}", built.accession));
                report.fail(error);
                return;
            }
        };

        log::info!("created {} for {}", qid, built.accession);
        report.set_qid(qid.clone());
        report.push(format!("Uploaded: {} item: {}", built.accession, qid));

        // The second write depends on the create being indexed.
        tokio::time::sleep(self.config.post_create_delay()).await;

        self.attach_commons(&qid, built, report).await;
    }

    /// ONE_MATCH branch: overwrite stale terms, then add every claim
    /// whose signature the item does not already carry.
    async fn reconcile_item(&self, built: &BuiltArtwork, qid: Qid, report: &mut SyncReport) {
        report.set_qid(qid.clone());
        report.push(format!("Syncing: {} item: {}", built.accession, qid));

        let entity = match self.client.fetch_entity(&qid).await {
            Ok(entity) => entity,
            Err(e) => {
                report.fail(e);
                return;
            }
        };

        let language = self.config.language.as_str();

        if entity.label(language) != Some(built.label.as_str()) {
            match self
                .client
                .set_label(
                    &qid,
                    language,
                    &built.label,
                    &sync_summary("label", &built.accession),
                )
                .await
            {
                Ok(()) => report.push(format!("Synchronized label: {}", built.label)),
                Err(e) => {
                    report.fail(e);
                    return;
                }
            }
        }

        if entity.description(language) != Some(built.description.as_str()) {
            match self
                .client
                .set_description(
                    &qid,
                    language,
                    &built.description,
                    &sync_summary("description", &built.accession),
                )
                .await
            {
                Ok(()) => report.push(format!("Synchronized description: {}", built.description)),
                Err(e) => {
                    report.fail(e);
                    return;
                }
            }
        }

        // Commons claim first, under its own presence rule: either media
        // property already on the item counts as covered.
        if built.commons.is_some() {
            if entity.has_property(IMAGE) || entity.has_property(COMMONS_IMAGE_URL) {
                report.push("Commons-compatible image already represented; skipped".to_string());
            } else {
                self.attach_commons(&qid, built, report).await;
            }
        }

        let existing = entity.claim_signatures();
        for claim in &built.statements {
            if existing.contains(&claim.signature()) {
                continue;
            }
            match self
                .client
                .add_claim(&qid, claim, &sync_summary("statement", &built.accession))
                .await
            {
                Ok(()) => {
                    report.push(format!("Synchronized missing '{}' claim", claim.property()));
                }
                Err(e) => {
                    report.fail(e);
                    return;
                }
            }
        }
    }

    /// Attach the Commons claim when there is one. A failure here is
    /// soft: it is reported and logged but never fails the record.
    async fn attach_commons(&self, qid: &Qid, built: &BuiltArtwork, report: &mut SyncReport) {
        let Some(claim) = &built.commons else {
            report.push("No Commons-compatible image to attach (license or image missing)");
            return;
        };

        match self
            .client
            .add_claim(qid, claim, &sync_summary("statement", &built.accession))
            .await
        {
            Ok(()) => report.push("Attached Commons-compatible image claim"),
            Err(e) => {
                log::warn!("commons claim failed for {}: {e}", built.accession);
                report.push(format!("Could not attach Commons claim: {e} (continuing)"));
            }
        }
    }

    /// Batch entry point: process records in order, recording the item
    /// page URL on each successfully synced record.
    ///
    /// Returns the records in their original order alongside the
    /// per-record reports.
    pub async fn batch_sync(
        &self,
        records: Vec<ArtworkRecord>,
    ) -> (Vec<ArtworkRecord>, Vec<SyncReport>) {
        let mut synced = Vec::with_capacity(records.len());
        let mut reports = Vec::with_capacity(records.len());

        for mut record in records {
            let report = self.sync_artwork(&record).await;
            log::info!("{report}");

            if let Some(qid) = report.qid() {
                let url = format!("{ITEM_PAGE_BASE}/{qid}");
                if !record.external_resources.wikidata.contains(&url) {
                    record.external_resources.wikidata.push(url);
                }
            }

            synced.push(record);
            reports.push(report);
        }

        (synced, reports)
    }
}
