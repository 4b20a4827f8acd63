//! Domain types used by the indexer, the filter engine and the CLI.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::{Error, Result};

/// The content category an indexed record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Cigar,
    Manufacturer,
    Pairing,
}

impl ContentKind {
    pub const ALL: [ContentKind; 3] = [ContentKind::Cigar, ContentKind::Manufacturer, ContentKind::Pairing];

    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Cigar => "cigar",
            ContentKind::Manufacturer => "manufacturer",
            ContentKind::Pairing => "pairing",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == tag)
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cigar from the flavorverse node feed.
///
/// Every field is optional: feeds are hand-maintained and a missing field only
/// shrinks the searchable text of the record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CigarRecord {
    pub name: Option<String>,
    pub wrapper: Option<String>,
    pub flavor: Option<String>,
    pub strength: Option<String>,
    pub origin: Option<String>,
    pub size: Option<String>,
    pub price: Option<f64>,
    pub rating: Option<f64>,
    pub discontinued: Option<bool>,
}

/// Founding year as found in the specs feed: sometimes a number,
/// sometimes free text ("circa 1870").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum YearOrText {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for YearOrText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearOrText::Number(n) => write!(f, "{n}"),
            YearOrText::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ManufacturerRecord {
    pub name: Option<String>,
    pub country: Option<String>,
    pub established: Option<YearOrText>,
    pub specialty: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KeyPairing {
    pub spirit: Option<String>,
}

/// A continuing-education pairing lesson.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PairingLesson {
    pub focus: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub key_pairings: Vec<KeyPairing>,
}

/// One content record of any kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ContentItem {
    Cigar(CigarRecord),
    Manufacturer(ManufacturerRecord),
    Pairing(PairingLesson),
}

impl ContentItem {
    pub fn kind(&self) -> ContentKind {
        match self {
            ContentItem::Cigar(_) => ContentKind::Cigar,
            ContentItem::Manufacturer(_) => ContentKind::Manufacturer,
            ContentItem::Pairing(_) => ContentKind::Pairing,
        }
    }

    /// The non-empty searchable fields of the record, in indexing order.
    pub fn searchable_fields(&self) -> Vec<String> {
        let fields: Vec<Option<String>> = match self {
            ContentItem::Cigar(c) => vec![
                c.name.clone(),
                c.wrapper.clone(),
                c.flavor.clone(),
                c.strength.clone(),
                c.origin.clone(),
                c.size.clone(),
            ],
            ContentItem::Manufacturer(m) => vec![
                m.name.clone(),
                m.country.clone(),
                m.established.as_ref().map(ToString::to_string),
                m.specialty.clone(),
            ],
            ContentItem::Pairing(p) => {
                let mut fields = vec![p.focus.clone(), p.title.clone(), p.description.clone()];
                fields.extend(p.key_pairings.iter().map(|kp| kp.spirit.clone()));
                fields
            }
        };
        fields.into_iter().flatten().filter(|f| !f.is_empty()).collect()
    }

    pub fn as_cigar(&self) -> Option<&CigarRecord> {
        match self {
            ContentItem::Cigar(c) => Some(c),
            _ => None,
        }
    }

    /// Human-readable label: the name, or the title for lessons.
    pub fn label(&self) -> Option<&str> {
        match self {
            ContentItem::Cigar(c) => c.name.as_deref(),
            ContentItem::Manufacturer(m) => m.name.as_deref(),
            ContentItem::Pairing(p) => p.title.as_deref().or(p.focus.as_deref()),
        }
    }
}

/// Everything the indexer consumes, one list per content kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentSources {
    pub cigars: Vec<CigarRecord>,
    pub manufacturers: Vec<ManufacturerRecord>,
    pub pairings: Vec<PairingLesson>,
}

impl ContentSources {
    pub fn len(&self) -> usize {
        self.cigars.len() + self.manufacturers.len() + self.pairings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Inclusive numeric bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Available,
    Discontinued,
    #[default]
    All,
}

pub const DEFAULT_PRICE_RANGE: Bounds = Bounds { min: 0.0, max: 1000.0 };
pub const DEFAULT_RATING_RANGE: Bounds = Bounds { min: 0.0, max: 5.0 };

/// The user-selected result constraints.
///
/// An empty list means "no restriction" for that field. Field names serialize
/// in camelCase, which is also the format persisted under the
/// `filterPreferences` preference key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterState {
    pub wrapper_types: Vec<String>,
    pub strength_levels: Vec<String>,
    pub flavor_tags: Vec<String>,
    pub price_range: Bounds,
    pub ratings: Bounds,
    pub availability: Availability,
    pub origin: Vec<String>,
    pub size: Vec<String>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            wrapper_types: Vec::new(),
            strength_levels: Vec::new(),
            flavor_tags: Vec::new(),
            price_range: DEFAULT_PRICE_RANGE,
            ratings: DEFAULT_RATING_RANGE,
            availability: Availability::All,
            origin: Vec::new(),
            size: Vec::new(),
        }
    }
}

impl FilterState {
    /// Set one filter by name. Accepts both `wrapperTypes` and `wrapper_types`.
    pub fn set(&mut self, name: &str, value: Value) -> Result<()> {
        let update = FilterUpdate::parse(name, value)?;
        self.apply(update);
        Ok(())
    }

    pub fn apply(&mut self, update: FilterUpdate) {
        match update {
            FilterUpdate::WrapperTypes(v) => self.wrapper_types = v,
            FilterUpdate::StrengthLevels(v) => self.strength_levels = v,
            FilterUpdate::FlavorTags(v) => self.flavor_tags = v,
            FilterUpdate::Origin(v) => self.origin = v,
            FilterUpdate::Size(v) => self.size = v,
            FilterUpdate::PriceRange(b) => self.price_range = b,
            FilterUpdate::Ratings(b) => self.ratings = b,
            FilterUpdate::Availability(a) => self.availability = a,
        }
    }

    /// Overlay a (possibly partial) JSON object of filters onto this state.
    ///
    /// Keys that do not name a filter are skipped. A key with an ill-typed
    /// value aborts the merge and leaves the state untouched.
    pub fn merge(&mut self, partial: &Value) -> Result<()> {
        let Value::Object(map) = partial else {
            return Err(Error::InvalidFilterValue {
                name: "filterPreferences".to_string(),
                reason: "expected a JSON object".to_string(),
            });
        };
        let mut next = self.clone();
        for (name, value) in map {
            match FilterUpdate::parse(name, value.clone()) {
                Ok(update) => next.apply(update),
                Err(Error::UnknownFilter(_)) => {
                    tracing::debug!(key = %name, "ignoring unknown filter preference");
                }
                Err(e) => return Err(e),
            }
        }
        *self = next;
        Ok(())
    }
}

/// A single typed filter change.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterUpdate {
    WrapperTypes(Vec<String>),
    StrengthLevels(Vec<String>),
    FlavorTags(Vec<String>),
    Origin(Vec<String>),
    Size(Vec<String>),
    PriceRange(Bounds),
    Ratings(Bounds),
    Availability(Availability),
}

impl FilterUpdate {
    pub const NAMES: [&'static str; 8] = [
        "wrapperTypes",
        "strengthLevels",
        "flavorTags",
        "priceRange",
        "ratings",
        "availability",
        "origin",
        "size",
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FilterUpdate::WrapperTypes(_) => "wrapperTypes",
            FilterUpdate::StrengthLevels(_) => "strengthLevels",
            FilterUpdate::FlavorTags(_) => "flavorTags",
            FilterUpdate::Origin(_) => "origin",
            FilterUpdate::Size(_) => "size",
            FilterUpdate::PriceRange(_) => "priceRange",
            FilterUpdate::Ratings(_) => "ratings",
            FilterUpdate::Availability(_) => "availability",
        }
    }

    pub fn parse(name: &str, value: Value) -> Result<Self> {
        let invalid = |e: serde_json::Error| Error::InvalidFilterValue {
            name: name.to_string(),
            reason: e.to_string(),
        };
        let update = match name {
            "wrapperTypes" | "wrapper_types" => Self::WrapperTypes(serde_json::from_value(value).map_err(invalid)?),
            "strengthLevels" | "strength_levels" => {
                Self::StrengthLevels(serde_json::from_value(value).map_err(invalid)?)
            }
            "flavorTags" | "flavor_tags" => Self::FlavorTags(serde_json::from_value(value).map_err(invalid)?),
            "origin" => Self::Origin(serde_json::from_value(value).map_err(invalid)?),
            "size" => Self::Size(serde_json::from_value(value).map_err(invalid)?),
            "priceRange" | "price_range" => Self::PriceRange(serde_json::from_value(value).map_err(invalid)?),
            "ratings" => Self::Ratings(serde_json::from_value(value).map_err(invalid)?),
            "availability" => Self::Availability(serde_json::from_value(value).map_err(invalid)?),
            other => return Err(Error::UnknownFilter(other.to_string())),
        };
        Ok(update)
    }
}

/// One recorded query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHistoryEntry {
    pub query: String,
    pub result_count: usize,
    /// ISO-8601 UTC, millisecond precision.
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    History,
    Wrapper,
    Flavor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub text: String,
}
