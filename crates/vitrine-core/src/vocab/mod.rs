//! Controlled vocabularies.

pub mod object_type;

pub use object_type::{mapping_for, TypeMapping};
