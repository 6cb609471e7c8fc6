//! Wikidata property and entity identifiers used by the sync workflow.
//!
//! All identifiers are fixed: the workflow always writes to the same
//! institution item and the same property set, so these are compile-time
//! constants rather than configuration.

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

/// Instance of -- entity reference.
pub const INSTANCE_OF: &str = "P31";

/// Collection -- the holding institution.
pub const COLLECTION: &str = "P195";

/// Inventory (accession) number -- string value, qualified by [`COLLECTION`].
pub const INVENTORY_NUMBER: &str = "P217";

/// Title -- monolingual text.
pub const TITLE: &str = "P1476";

/// Copyright status -- entity reference.
pub const COPYRIGHT_STATUS: &str = "P6216";

/// Determination method -- qualifier on copyright statements.
pub const DETERMINATION_METHOD: &str = "P459";

/// Described at URL -- the collection page for the object.
pub const DESCRIBED_AT_URL: &str = "P973";

/// Reference URL -- reference snak on every primary claim.
pub const REFERENCE_URL: &str = "P854";

/// Retrieved -- reference snak carrying the build-time date.
pub const RETRIEVED: &str = "P813";

/// Copyright license -- qualifier on the Commons image claim.
pub const LICENSE: &str = "P275";

/// Inception -- creation date, year precision.
pub const INCEPTION: &str = "P571";

/// Image -- a file already hosted on Commons.
pub const IMAGE: &str = "P18";

/// Author name string -- qualifier on the Commons image claim.
pub const AUTHOR_NAME_STRING: &str = "P2093";

/// Commons-compatible image available at URL.
pub const COMMONS_IMAGE_URL: &str = "P4765";

/// URL -- qualifier on the Commons image claim.
pub const URL: &str = "P2699";

/// File format -- qualifier on the Commons image claim.
pub const FILE_FORMAT: &str = "P2701";

/// Operator -- qualifier on the Commons image claim.
pub const OPERATOR: &str = "P137";

/// Fabrication method -- facet claim for process-named object types.
pub const FABRICATION_METHOD: &str = "P2079";

/// Made from material -- facet claim for material-named object types.
pub const MATERIAL_USED: &str = "P186";

/// Genre -- facet claim for genre-named object types.
pub const GENRE: &str = "P136";

// ---------------------------------------------------------------------------
// Entity targets
// ---------------------------------------------------------------------------

/// The holding institution's Wikidata item.
pub const INSTITUTION: &str = "Q657415";

/// Human-readable institution name, used in edit summaries.
pub const INSTITUTION_NAME: &str = "Cleveland Museum of Art";

/// Class asserted by the instance-of claim on every artwork item.
pub const COLLECTION_ITEM: &str = "Q18593264";

/// Copyright status target: copyrighted.
pub const COPYRIGHTED: &str = "Q50423863";

/// Copyright status target: public domain.
pub const PUBLIC_DOMAIN: &str = "Q19652";

/// Determination-method target for copyright statements.
pub const LICENSE_DETERMINATION: &str = "Q61848113";

/// JPEG file format.
pub const JPEG: &str = "Q2195";

/// Creative Commons CC0 license item.
pub const CC0_LICENSE: &str = "Q6938433";
