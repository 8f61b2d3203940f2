//! Core types for the chip catalog.
//!
//! Defines the record produced by the CSV parser, the family tag attached
//! to it, the filter applied by the view engine and the status signal
//! reported to the view layer.

use serde::{Deserialize, Serialize};

// ============================================================================
// Chip Records
// ============================================================================

/// Technology family of a chip, taken from the source file it was loaded from.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Ttl,
    Cmos,
}

impl Family {
    pub fn label(&self) -> &'static str {
        match self {
            Family::Ttl => "TTL",
            Family::Cmos => "CMOS",
        }
    }

    /// Lowercase tag used in settings files and filter controls
    pub fn tag(&self) -> &'static str {
        match self {
            Family::Ttl => "ttl",
            Family::Cmos => "cmos",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "ttl" => Some(Family::Ttl),
            "cmos" => Some(Family::Cmos),
            _ => None,
        }
    }

    pub fn all() -> &'static [Family] {
        &[Family::Ttl, Family::Cmos]
    }
}

/// A single logic chip loaded from a catalog source.
///
/// Records are never mutated after the parser builds them; `number` and
/// `function_name` are guaranteed non-empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChipRecord {
    /// Part number, e.g. "7400"
    pub number: String,
    /// Short function summary, e.g. "Quad 2-input NAND"
    pub function_name: String,
    /// Free text, may be empty
    pub description: String,
    /// Whether a connection diagram image exists for this chip
    pub has_connection_diagram: bool,
    /// Whether a function table image exists for this chip
    pub has_function_table: bool,
    /// Datasheet URL, empty when unknown
    pub datasheet_link: String,
    /// Family of the source this record was loaded from
    pub family: Family,
}

impl ChipRecord {
    /// Case-insensitive substring match over number, function and description.
    ///
    /// `folded_term` must already be lowercased; an empty term matches.
    pub fn matches_term(&self, folded_term: &str) -> bool {
        if folded_term.is_empty() {
            return true;
        }
        self.number.to_lowercase().contains(folded_term)
            || self.function_name.to_lowercase().contains(folded_term)
            || self.description.to_lowercase().contains(folded_term)
    }

    pub fn has_datasheet(&self) -> bool {
        !self.datasheet_link.is_empty()
    }
}

// ============================================================================
// View Types
// ============================================================================

/// Family filter selected in the view.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FamilyFilter {
    #[default]
    All,
    Ttl,
    Cmos,
}

impl FamilyFilter {
    pub fn label(&self) -> &'static str {
        match self {
            FamilyFilter::All => "All",
            FamilyFilter::Ttl => "TTL",
            FamilyFilter::Cmos => "CMOS",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "all" => Some(FamilyFilter::All),
            other => Family::from_tag(other).map(FamilyFilter::from),
        }
    }

    /// `All` is the identity filter
    pub fn matches(&self, family: Family) -> bool {
        match self {
            FamilyFilter::All => true,
            FamilyFilter::Ttl => family == Family::Ttl,
            FamilyFilter::Cmos => family == Family::Cmos,
        }
    }

    pub fn all() -> &'static [FamilyFilter] {
        &[FamilyFilter::All, FamilyFilter::Ttl, FamilyFilter::Cmos]
    }
}

impl From<Family> for FamilyFilter {
    fn from(family: Family) -> Self {
        match family {
            Family::Ttl => FamilyFilter::Ttl,
            Family::Cmos => FamilyFilter::Cmos,
        }
    }
}

/// Status banner the view layer should show.
///
/// Exactly one status is active at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    /// No load has been started
    #[default]
    Idle,
    /// Sources are being fetched
    Loading,
    /// Catalog loaded and the current query has results
    Ready,
    /// The load failed; the catalog is empty
    Error,
    /// Catalog loaded but the current query matches nothing
    EmptyResults,
}

impl Status {
    pub fn is_loading(&self) -> bool {
        matches!(self, Status::Loading)
    }

    /// Whether the catalog finished loading successfully
    pub fn is_loaded(&self) -> bool {
        matches!(self, Status::Ready | Status::EmptyResults)
    }
}
