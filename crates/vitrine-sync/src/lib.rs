//! Wikidata synchronization engine for vitrine.
//!
//! Implements the statement builder, the SPARQL accession lookup, the
//! Action API edit client, and the reconciler that decides between
//! creating a new item and additively synchronizing an existing one.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod builder;
pub mod client;
pub mod config;
pub mod engine;
pub mod error;
pub mod lookup;
pub mod report;

pub use builder::{build_statements, BuiltArtwork};
pub use client::{ApiClient, EditClient, RemoteEntity};
pub use config::SyncConfig;
pub use engine::SyncEngine;
pub use error::{SyncError, SyncResult};
pub use lookup::{Lookup, LookupOutcome, SparqlLookup};
pub use report::SyncReport;
