//! Per-record sync report.
//!
//! The return contract for one record's sync: a headline plus an
//! indented line for every action taken or skipped, and the remote item
//! identifier when one was determined.

use std::fmt;

use vitrine_core::model::Qid;

use crate::error::SyncError;

/// The outcome of synchronizing one artwork record.
#[derive(Debug)]
pub struct SyncReport {
    accession: Option<String>,
    qid: Option<Qid>,
    lines: Vec<String>,
    error: Option<SyncError>,
}

impl SyncReport {
    pub fn new(accession: impl Into<String>) -> Self {
        Self {
            accession: Some(accession.into()),
            qid: None,
            lines: Vec::new(),
            error: None,
        }
    }

    /// A report for a record that was refused before it could be
    /// identified (e.g. no accession number).
    pub fn rejected(error: SyncError) -> Self {
        let mut report = Self {
            accession: None,
            qid: None,
            lines: Vec::new(),
            error: None,
        };
        report.fail(error);
        report
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Record a fatal-for-this-record error. The lines accumulated so
    /// far stay in place: they describe the writes already committed.
    pub fn fail(&mut self, error: SyncError) {
        self.lines.push(format!("Failed: {error}"));
        self.error = Some(error);
    }

    pub fn set_qid(&mut self, qid: Qid) {
        self.qid = Some(qid);
    }

    pub fn accession(&self) -> Option<&str> {
        self.accession.as_deref()
    }

    pub fn qid(&self) -> Option<&Qid> {
        self.qid.as_ref()
    }

    pub fn error(&self) -> Option<&SyncError> {
        self.error.as_ref()
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.accession, &self.qid) {
            (Some(accession), Some(qid)) => write!(f, "{accession} -> {qid}")?,
            (Some(accession), None) => write!(f, "{accession} -> (no item)")?,
            (None, _) => write!(f, "(unidentified record)")?,
        }
        for line in &self.lines {
            write!(f, "\n\t{line}")?;
        }
        Ok(())
    }
}
