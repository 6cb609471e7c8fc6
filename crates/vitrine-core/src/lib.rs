//! Core domain model for vitrine.
//!
//! This crate defines the artwork record as received from the museum's
//! collection API, the Wikibase claim/statement types the sync workflow
//! emits, the object-type controlled vocabulary, and the Wikidata
//! property and entity constants shared across the workspace.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod model;
pub mod properties;
pub mod vocab;

pub use error::{Error, Result};
