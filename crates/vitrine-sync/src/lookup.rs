//! Accession-number lookup against the SPARQL query service.
//!
//! One read-only query per record: find the item whose accession-number
//! statement, qualified by the institution, matches exactly. The query
//! binds the trailing Qid substring server-side so the response is a
//! plain list of identifiers.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use vitrine_core::model::Qid;
use vitrine_core::properties::{COLLECTION, INSTITUTION, INVENTORY_NUMBER};

use crate::config::SyncConfig;
use crate::error::{SyncError, SyncResult};

/// Result of an accession-number lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// No item carries this accession number; a new item may be created.
    NoMatch,
    /// Exactly one item matched; reconcile against it.
    OneMatch(Qid),
    /// More than one item matched. The invariant that accession numbers
    /// are unique under the institution qualifier is broken remotely;
    /// the caller must refuse the record.
    Ambiguous(usize),
}

/// The read-only lookup contract consumed by the sync engine.
#[async_trait]
pub trait Lookup: Send + Sync {
    async fn find_by_accession(&self, accession: &str) -> SyncResult<LookupOutcome>;
}

// ---------------------------------------------------------------------------
// SPARQL response types (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SparqlResult {
    results: SparqlBindings,
}

#[derive(Debug, Deserialize)]
struct SparqlBindings {
    bindings: Vec<HashMap<String, SparqlValue>>,
}

#[derive(Debug, Deserialize)]
struct SparqlValue {
    value: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// SPARQL-backed [`Lookup`] implementation.
#[derive(Debug, Clone)]
pub struct SparqlLookup {
    http: Client,
    endpoint: String,
}

impl SparqlLookup {
    /// Create a new lookup client from configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: &SyncConfig) -> SyncResult<Self> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.sparql_endpoint.clone(),
        })
    }

    fn accession_query(accession: &str) -> String {
        // String literals in SPARQL: escape backslash and double quote.
        let escaped = accession.replace('\\', "\\\\").replace('"', "\\\"");
        format!(
            r#"SELECT DISTINCT ?Qid WHERE {{
  ?item p:{INVENTORY_NUMBER} ?s .
  ?s ps:{INVENTORY_NUMBER} "{escaped}" .
  ?s pq:{COLLECTION} wd:{INSTITUTION} .
  BIND(SUBSTR(STR(?item), 32) AS ?Qid)
}}"#
        )
    }
}

#[async_trait]
impl Lookup for SparqlLookup {
    async fn find_by_accession(&self, accession: &str) -> SyncResult<LookupOutcome> {
        let query = Self::accession_query(accession);

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("query", query.as_str()), ("format", "json")])
            .send()
            .await?
            .error_for_status()
            .map_err(|e| SyncError::Http {
                operation: "accession lookup",
                message: e.to_string(),
            })?;

        let body = response.text().await?;
        parse_lookup_response(&body)
    }
}

/// Parse a SPARQL JSON response body into a [`LookupOutcome`].
///
/// Any malformed body is a [`SyncError::LookupParse`]: the sync for this
/// record is aborted without a write and without retry.
pub fn parse_lookup_response(body: &str) -> SyncResult<LookupOutcome> {
    let parsed: SparqlResult =
        serde_json::from_str(body).map_err(|e| SyncError::LookupParse {
            message: e.to_string(),
        })?;

    let bindings = parsed.results.bindings;
    match bindings.len() {
        0 => Ok(LookupOutcome::NoMatch),
        1 => {
            let raw = bindings[0]
                .get("Qid")
                .map(|v| v.value.as_str())
                .ok_or_else(|| SyncError::LookupParse {
                    message: "binding is missing the Qid variable".to_string(),
                })?;
            let qid = Qid::new(raw).map_err(|e| SyncError::LookupParse {
                message: e.to_string(),
            })?;
            Ok(LookupOutcome::OneMatch(qid))
        }
        n => Ok(LookupOutcome::Ambiguous(n)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_no_match() {
        let body = r#"{"results": {"bindings": []}}"#;
        assert_eq!(parse_lookup_response(body).unwrap(), LookupOutcome::NoMatch);
    }

    #[test]
    fn test_parse_one_match() {
        let body = r#"{
            "head": {"vars": ["Qid"]},
            "results": {"bindings": [
                {"Qid": {"type": "literal", "value": "Q123456"}}
            ]}
        }"#;
        assert_eq!(
            parse_lookup_response(body).unwrap(),
            LookupOutcome::OneMatch(Qid::new("Q123456").unwrap())
        );
    }

    #[test]
    fn test_parse_multiple_matches() {
        let body = r#"{"results": {"bindings": [
            {"Qid": {"type": "literal", "value": "Q1"}},
            {"Qid": {"type": "literal", "value": "Q2"}},
            {"Qid": {"type": "literal", "value": "Q3"}}
        ]}}"#;
        assert_eq!(
            parse_lookup_response(body).unwrap(),
            LookupOutcome::Ambiguous(3)
        );
    }

    #[test]
    fn test_parse_failure_on_invalid_json() {
        let err = parse_lookup_response("<html>Service Unavailable</html>").unwrap_err();
        assert!(matches!(err, SyncError::LookupParse { .. }));
        assert!(err.aborts_before_write());
    }

    #[test]
    fn test_parse_failure_on_missing_variable() {
        let body = r#"{"results": {"bindings": [{"item": {"value": "Q1"}}]}}"#;
        let err = parse_lookup_response(body).unwrap_err();
        assert!(matches!(err, SyncError::LookupParse { .. }));
    }

    #[test]
    fn test_parse_failure_on_malformed_qid() {
        let body = r#"{"results": {"bindings": [{"Qid": {"value": "entity/Q1"}}]}}"#;
        let err = parse_lookup_response(body).unwrap_err();
        assert!(matches!(err, SyncError::LookupParse { .. }));
    }

    #[test]
    fn test_accession_query_shape() {
        let query = SparqlLookup::accession_query("1916.1");
        assert!(query.contains(r#"ps:P217 "1916.1""#));
        assert!(query.contains("pq:P195 wd:Q657415"));
        assert!(query.contains("BIND(SUBSTR(STR(?item), 32) AS ?Qid)"));
    }

    #[test]
    fn test_accession_query_escapes_quotes() {
        let query = SparqlLookup::accession_query(r#"19"16"#);
        assert!(query.contains(r#"ps:P217 "19\"16""#));
    }
}
