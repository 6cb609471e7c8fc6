//! Object-type controlled vocabulary.
//!
//! Maps the museum's fixed object-type strings to Wikidata targets. Most
//! types name a class and map to an instance-of claim. Some name a
//! material, genre, or fabrication process instead; those map to the
//! matching facet property rather than asserting a false instance-of. A
//! few carry no usable target at all.
//!
//! The mapping is closed and exhaustive over the known strings: an
//! unknown type returns `None` and is the caller's job to surface.

use crate::properties::{FABRICATION_METHOD, GENRE, MATERIAL_USED};

/// The Wikidata rendition of one object-type string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeMapping {
    /// Emit an instance-of claim with this target.
    Instance(&'static str),
    /// Emit a facet claim (material, genre, or fabrication method).
    Facet {
        property: &'static str,
        target: &'static str,
    },
    /// A known type with no usable Wikidata target; emit nothing.
    NoTarget,
}

/// Look up the mapping for an institutional object-type string.
///
/// Returns `None` for strings outside the controlled vocabulary.
pub fn mapping_for(kind: &str) -> Option<TypeMapping> {
    use TypeMapping::{Facet, Instance, NoTarget};

    let mapping = match kind {
        "Amulets" => Instance("Q131557"),
        "Apparatus" => Instance("Q39546"),
        "Arms and Armor" => Instance("Q598227"),
        "Basketry" => Instance("Q201097"),
        "Book Binding" => Instance("Q1125338"),
        "Bound Volume" => Instance("Q571"),
        "Calligraphy" => Instance("Q22669850"),
        "Carpet" => Instance("Q163446"),
        "Ceramic" => Instance("Q13464614"),
        "Coins" => Instance("Q41207"),
        "Cosmetic Objects" => Instance("Q223557"),
        "Drawing" => Instance("Q93184"),
        "Embroidery" => Instance("Q18281"),
        "Enamel" => Instance("Q79496108"),
        "Forgery" => Instance("Q29541662"),
        "Funerary Equipment" => Instance("Q79497835"),
        "Furniture and woodwork" => Instance("Q60734095"),
        "Garment" => Instance("Q11460"),
        "Glass" => Instance("Q13180610"),
        "Glyptic" => Facet {
            property: FABRICATION_METHOD,
            target: "Q929254",
        },
        "Illumination" => Instance("Q8362"),
        "Implements" => Instance("Q39546"),
        "Inlays" => Facet {
            property: FABRICATION_METHOD,
            target: "Q1281067",
        },
        "Ivory" => Facet {
            property: MATERIAL_USED,
            target: "Q82001",
        },
        "Jade" => Instance("Q60733799"),
        "Jewelry" => Instance("Q161439"),
        "Knitting" => Instance("Q29048022"),
        "Lace" => Instance("Q231250"),
        "Lacquer" => Instance("Q368972"),
        "Lamp" => Instance("Q368972"),
        "Leather" => Instance("Q79504355"),
        "Linoleum Block" => Instance("Q22060043"),
        "Lithographic Stone" => NoTarget,
        "Manuscript" => Instance("Q87167"),
        "Metalwork" => Instance("Q29382731"),
        "Miniature" => Instance("Q282129"),
        "Miscellaneous" => NoTarget,
        "Mixed Media" => Facet {
            property: GENRE,
            target: "Q1902763",
        },
        "Monotype" => Instance("Q22669635"),
        "Mosaic" => Instance("Q133067"),
        "Musical Instrument" => Instance("Q34379"),
        "Netsuke" => Instance("Q543901"),
        "Painting" => Instance("Q3305213"),
        "Photograph" => Instance("Q125191"),
        "Plaque" => Instance("Q4364339"),
        "Plate" => Instance("Q57216"),
        "Portfolio" => Instance("Q79509036"),
        "Portrait Miniature" => Instance("Q282129"),
        "Print" => Instance("Q11060274"),
        "Relief" => Instance("Q11060274"),
        "Rock crystal" => Facet {
            property: MATERIAL_USED,
            target: "Q2050687",
        },
        "Sampler" => Instance("Q1513987"),
        "Scarabs" => Instance("Q2442735"),
        "Sculpture" => Instance("Q860861"),
        "Seals" => Instance("Q2474386"),
        "Silver" => Facet {
            property: MATERIAL_USED,
            target: "Q1090",
        },
        "Spindle Whorl" => Instance("Q2474386"),
        "Stone" => Facet {
            property: MATERIAL_USED,
            target: "Q22731",
        },
        "Tapestry" => Instance("Q184296"),
        "Textile" => Instance("Q28823"),
        "Time-based Media" => Facet {
            property: GENRE,
            target: "Q57206278",
        },
        "Tool" => Instance("Q39546"),
        "Velvet" => Facet {
            property: MATERIAL_USED,
            target: "Q243519",
        },
        "Vessels" => Instance("Q987767"),
        "Wood" => Facet {
            property: MATERIAL_USED,
            target: "Q287",
        },
        "Woodblock" => Instance("Q28913685"),
        _ => return None,
    };

    Some(mapping)
}
