//! Write interface to the knowledge base.
//!
//! [`EditClient`] is the seam between the reconciler and the remote API:
//! every write takes a free-text edit summary for the public audit trail.
//! [`ApiClient`] is the production implementation; tests substitute
//! recording doubles.

use std::collections::HashMap;
use std::collections::HashSet;

use async_trait::async_trait;
use serde::Deserialize;

use vitrine_core::model::{Claim, ClaimSignature, NewEntity, Qid};

use crate::error::SyncResult;

pub mod api;

pub use api::ApiClient;

/// A per-language term on a remote entity.
#[derive(Debug, Clone, Deserialize)]
pub struct LanguageValue {
    pub language: String,
    pub value: String,
}

/// A remote item as returned by the entity-data endpoint.
///
/// Claims are kept as raw JSON: the reconciler only ever needs their
/// normalized signatures, and parsing the full wikibase claim grammar
/// buys nothing.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteEntity {
    pub id: String,

    #[serde(default)]
    pub labels: HashMap<String, LanguageValue>,

    #[serde(default)]
    pub descriptions: HashMap<String, LanguageValue>,

    #[serde(default)]
    pub claims: HashMap<String, Vec<serde_json::Value>>,
}

impl RemoteEntity {
    pub fn label(&self, language: &str) -> Option<&str> {
        self.labels.get(language).map(|t| t.value.as_str())
    }

    pub fn description(&self, language: &str) -> Option<&str> {
        self.descriptions.get(language).map(|t| t.value.as_str())
    }

    /// Whether the entity carries any claim for the given property.
    pub fn has_property(&self, property: &str) -> bool {
        self.claims
            .get(property)
            .is_some_and(|claims| !claims.is_empty())
    }

    /// Deduplicated signatures of every current claim. Claims without a
    /// datavalue are skipped; they can never collide with a built claim.
    pub fn claim_signatures(&self) -> HashSet<ClaimSignature> {
        self.claims
            .values()
            .flatten()
            .filter_map(ClaimSignature::of_remote_claim)
            .collect()
    }
}

/// The write operations the reconciler needs, one method per remote
/// edit primitive.
#[async_trait]
pub trait EditClient: Send + Sync {
    /// Create a new item with labels, descriptions, and claims in a
    /// single call. Returns the new item's Qid.
    async fn create_entity(&self, entity: &NewEntity, summary: &str) -> SyncResult<Qid>;

    /// Fetch the current state of an item.
    async fn fetch_entity(&self, qid: &Qid) -> SyncResult<RemoteEntity>;

    /// Overwrite one language's label.
    async fn set_label(
        &self,
        qid: &Qid,
        language: &str,
        value: &str,
        summary: &str,
    ) -> SyncResult<()>;

    /// Overwrite one language's description.
    async fn set_description(
        &self,
        qid: &Qid,
        language: &str,
        value: &str,
        summary: &str,
    ) -> SyncResult<()>;

    /// Attach one claim, with its qualifiers and references, to an
    /// existing item.
    async fn add_claim(&self, qid: &Qid, claim: &Claim, summary: &str) -> SyncResult<()>;
}
