pub mod artwork;
pub mod claim;

pub use artwork::{ArtworkRecord, Creator, ExternalResources, ImageFile, ImageSet, ShareLicense};
pub use claim::{
    Claim, ClaimSignature, NewEntity, Qid, SignatureValue, Snak, SnakValue, StatementSet,
    TimeValue,
};
