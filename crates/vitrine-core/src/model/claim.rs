//! Wikibase claim and statement types.
//!
//! The sync workflow builds claims locally and submits them as wikibase
//! JSON through the edit API. Remote claims come back in a slightly
//! different shape (ids, hashes, datatype annotations, and sometimes
//! `numeric-id`-only entity values), so equality between a built claim and
//! a remote one is decided through [`ClaimSignature`], a normalized
//! (property, value) pair that ignores everything else.

use std::collections::HashSet;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{Error, Result};

/// Gregorian calendar model used for every time value we emit.
const GREGORIAN: &str = "http://www.wikidata.org/entity/Q1985727";

/// An opaque Wikidata item identifier (`Q` followed by digits).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Qid(String);

impl Qid {
    /// Validate and wrap an entity id string.
    ///
    /// # Errors
    /// Returns [`Error::InvalidEntityId`] unless the input is `Q` followed
    /// by at least one ASCII digit.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        let mut chars = id.chars();
        let well_formed = chars.next() == Some('Q')
            && id.len() > 1
            && chars.all(|c| c.is_ascii_digit());
        if well_formed {
            Ok(Self(id))
        } else {
            Err(Error::InvalidEntityId(id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Qid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Qid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A point in time in wikibase representation.
///
/// Holds the formatted `+YYYY-MM-DDT00:00:00Z` timestamp plus its
/// precision: 9 for year, 11 for day. No time-of-day component is ever
/// emitted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimeValue {
    pub time: String,
    pub precision: u8,
}

impl TimeValue {
    /// A year-precision value (used for inception dates).
    pub fn year(year: i32) -> Self {
        let sign = if year < 0 { '-' } else { '+' };
        Self {
            time: format!("{sign}{:04}-00-00T00:00:00Z", year.abs()),
            precision: 9,
        }
    }

    /// A day-precision value (used for retrieval dates).
    pub fn date(date: NaiveDate) -> Self {
        Self {
            time: format!(
                "+{:04}-{:02}-{:02}T00:00:00Z",
                date.year(),
                date.month(),
                date.day()
            ),
            precision: 11,
        }
    }
}

/// The value half of a snak.
#[derive(Debug, Clone, PartialEq)]
pub enum SnakValue {
    /// A reference to another Wikidata item.
    Entity(String),
    /// A plain string value.
    Text(String),
    /// Monolingual text with a language code.
    Monolingual { text: String, language: String },
    /// A point in time.
    Time(TimeValue),
}

impl SnakValue {
    fn datavalue(&self) -> Value {
        match self {
            Self::Entity(id) => json!({
                "value": { "entity-type": "item", "id": id },
                "type": "wikibase-entityid"
            }),
            Self::Text(s) => json!({ "value": s, "type": "string" }),
            Self::Monolingual { text, language } => json!({
                "value": { "text": text, "language": language },
                "type": "monolingualtext"
            }),
            Self::Time(t) => json!({
                "value": {
                    "time": t.time,
                    "timezone": 0,
                    "before": 0,
                    "after": 0,
                    "precision": t.precision,
                    "calendarmodel": GREGORIAN
                },
                "type": "time"
            }),
        }
    }

    fn signature(&self) -> SignatureValue {
        match self {
            Self::Entity(id) => SignatureValue::Entity(id.clone()),
            Self::Text(s) => SignatureValue::Text(s.clone()),
            Self::Monolingual { text, language } => SignatureValue::Monolingual {
                text: text.clone(),
                language: language.clone(),
            },
            Self::Time(t) => SignatureValue::Time {
                time: t.time.clone(),
                precision: t.precision,
            },
        }
    }
}

/// A property-value cell: the building block of claims, qualifiers, and
/// references.
#[derive(Debug, Clone, PartialEq)]
pub struct Snak {
    pub property: String,
    pub value: SnakValue,
}

impl Snak {
    pub fn new(property: impl Into<String>, value: SnakValue) -> Self {
        Self {
            property: property.into(),
            value,
        }
    }

    pub fn entity(property: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(property, SnakValue::Entity(target.into()))
    }

    pub fn text(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(property, SnakValue::Text(value.into()))
    }

    pub fn monolingual(
        property: impl Into<String>,
        text: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self::new(
            property,
            SnakValue::Monolingual {
                text: text.into(),
                language: language.into(),
            },
        )
    }

    pub fn time(property: impl Into<String>, value: TimeValue) -> Self {
        Self::new(property, SnakValue::Time(value))
    }

    pub fn to_json(&self) -> Value {
        json!({
            "snaktype": "value",
            "property": self.property,
            "datavalue": self.value.datavalue()
        })
    }
}

/// A full statement: mainsnak plus optional qualifiers and one reference
/// block.
#[derive(Debug, Clone, PartialEq)]
pub struct Claim {
    pub mainsnak: Snak,
    pub qualifiers: Vec<Snak>,
    pub references: Vec<Snak>,
}

impl Claim {
    pub fn new(mainsnak: Snak) -> Self {
        Self {
            mainsnak,
            qualifiers: Vec::new(),
            references: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_qualifier(mut self, qualifier: Snak) -> Self {
        self.qualifiers.push(qualifier);
        self
    }

    /// Attach reference snaks, grouped into a single reference block.
    #[must_use]
    pub fn with_references(mut self, references: Vec<Snak>) -> Self {
        self.references = references;
        self
    }

    pub fn property(&self) -> &str {
        &self.mainsnak.property
    }

    /// The normalized identity of this claim for add-if-missing diffing.
    pub fn signature(&self) -> ClaimSignature {
        ClaimSignature {
            property: self.mainsnak.property.clone(),
            value: self.mainsnak.value.signature(),
        }
    }

    /// Serialize to the wikibase claim JSON accepted by `wbeditentity`.
    pub fn to_json(&self) -> Value {
        let mut claim = json!({
            "mainsnak": self.mainsnak.to_json(),
            "type": "statement",
            "rank": "normal"
        });

        if !self.qualifiers.is_empty() {
            let (grouped, order) = group_snaks(&self.qualifiers);
            claim["qualifiers"] = Value::Object(grouped);
            claim["qualifiers-order"] = json!(order);
        }

        if !self.references.is_empty() {
            let (grouped, order) = group_snaks(&self.references);
            claim["references"] = json!([{ "snaks": Value::Object(grouped), "snaks-order": order }]);
        }

        claim
    }
}

/// Group snaks by property into the wikibase `{property: [snak, ...]}`
/// shape, preserving first-seen property order.
fn group_snaks(snaks: &[Snak]) -> (serde_json::Map<String, Value>, Vec<String>) {
    let mut grouped = serde_json::Map::new();
    let mut order = Vec::new();
    for snak in snaks {
        if !order.contains(&snak.property) {
            order.push(snak.property.clone());
        }
        if let Value::Array(items) = grouped
            .entry(snak.property.clone())
            .or_insert_with(|| Value::Array(Vec::new()))
        {
            items.push(snak.to_json());
        }
    }
    (grouped, order)
}

/// An ordered collection of claims.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatementSet {
    claims: Vec<Claim>,
}

impl StatementSet {
    pub fn push(&mut self, claim: Claim) {
        self.claims.push(claim);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Claim> {
        self.claims.iter()
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Signatures of every claim in the set.
    pub fn signatures(&self) -> HashSet<ClaimSignature> {
        self.claims.iter().map(Claim::signature).collect()
    }

    pub fn to_json(&self) -> Value {
        Value::Array(self.claims.iter().map(Claim::to_json).collect())
    }
}

impl<'a> IntoIterator for &'a StatementSet {
    type Item = &'a Claim;
    type IntoIter = std::slice::Iter<'a, Claim>;

    fn into_iter(self) -> Self::IntoIter {
        self.claims.iter()
    }
}

/// The payload for a create-entity call: English label, description, and
/// the primary statement set.
#[derive(Debug, Clone)]
pub struct NewEntity {
    pub label: String,
    pub description: String,
    pub language: String,
    pub claims: StatementSet,
}

impl NewEntity {
    pub fn to_json(&self) -> Value {
        let mut labels = serde_json::Map::new();
        labels.insert(
            self.language.clone(),
            json!({ "language": self.language, "value": self.label }),
        );

        let mut descriptions = serde_json::Map::new();
        descriptions.insert(
            self.language.clone(),
            json!({ "language": self.language, "value": self.description }),
        );

        json!({
            "labels": labels,
            "descriptions": descriptions,
            "claims": self.claims.to_json()
        })
    }
}

/// The normalized value half of a [`ClaimSignature`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SignatureValue {
    Entity(String),
    Text(String),
    Monolingual { text: String, language: String },
    Time { time: String, precision: u8 },
    /// A datavalue type we never emit ourselves (quantity, coordinate,
    /// Commons media, ...), kept verbatim so distinct remote values do not
    /// collide.
    Other(String),
}

/// A claim's identity for diffing: property plus normalized mainsnak
/// value. Claim ids, hashes, datatype annotations, qualifiers, and
/// references are all ignored, so a freshly built claim compares equal to
/// the remote claim it would duplicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClaimSignature {
    pub property: String,
    pub value: SignatureValue,
}

impl ClaimSignature {
    /// Extract a signature from raw remote claim JSON.
    ///
    /// Returns `None` for claims without a datavalue (`novalue` /
    /// `somevalue` snaks) or with a malformed mainsnak; such claims can
    /// never match a built claim, so skipping them only makes the diff
    /// conservative in the additive direction.
    pub fn of_remote_claim(claim: &Value) -> Option<Self> {
        let mainsnak = claim.get("mainsnak")?;
        let property = mainsnak.get("property")?.as_str()?.to_string();
        let datavalue = mainsnak.get("datavalue")?;
        let kind = datavalue.get("type")?.as_str()?;
        let value = datavalue.get("value")?;

        let normalized = match kind {
            "wikibase-entityid" => {
                // Older dumps carry numeric-id only; newer ones carry both.
                let id = value
                    .get("id")
                    .and_then(Value::as_str)
                    .map(String::from)
                    .or_else(|| {
                        value
                            .get("numeric-id")
                            .and_then(Value::as_u64)
                            .map(|n| format!("Q{n}"))
                    })?;
                SignatureValue::Entity(id)
            }
            "string" => SignatureValue::Text(value.as_str()?.to_string()),
            "monolingualtext" => SignatureValue::Monolingual {
                text: value.get("text")?.as_str()?.to_string(),
                language: value.get("language")?.as_str()?.to_string(),
            },
            "time" => {
                let precision = u8::try_from(value.get("precision")?.as_u64()?).ok()?;
                SignatureValue::Time {
                    time: value.get("time")?.as_str()?.to_string(),
                    precision,
                }
            }
            _ => SignatureValue::Other(value.to_string()),
        };

        Some(Self {
            property,
            value: normalized,
        })
    }
}
