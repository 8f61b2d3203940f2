//! Render-ready data for the card list and the detail view.
//!
//! The view layer turns these into visual elements. Image slots only name
//! the conventional image address; falling back to "not available" when
//! the image fails to load is left to the view.

use crate::constants::{
    CONNECTION_DIAGRAM_SUFFIX, DESCRIPTION_PREVIEW_CHARS, FUNCTION_TABLE_SUFFIX,
    TRUNCATION_MARKER,
};
use crate::types::{ChipRecord, Family};
use serde::Serialize;

/// A chip card in the result list
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChipCard {
    pub number: String,
    pub function_name: String,
    /// Description shortened for the card body
    pub summary: String,
    pub family: Family,
}

impl ChipCard {
    pub fn from_record(record: &ChipRecord) -> Self {
        Self {
            number: record.number.clone(),
            function_name: record.function_name.clone(),
            summary: summarize_description(&record.description, DESCRIPTION_PREVIEW_CHARS),
            family: record.family,
        }
    }
}

/// Where an image can be found, if the catalog says it exists
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ImageSlot {
    Available { address: String },
    NotAvailable,
}

impl ImageSlot {
    pub fn address(&self) -> Option<&str> {
        match self {
            ImageSlot::Available { address } => Some(address),
            ImageSlot::NotAvailable => None,
        }
    }
}

/// Full-record data for the detail view
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChipDetail {
    pub number: String,
    pub function_name: String,
    pub description: String,
    pub family: Family,
    pub connection_diagram: ImageSlot,
    pub function_table: ImageSlot,
    /// `None` hides the datasheet link
    pub datasheet_link: Option<String>,
}

impl ChipDetail {
    pub fn from_record(record: &ChipRecord, image_root: &str) -> Self {
        let slot = |present: bool, suffix: &str| {
            if present {
                ImageSlot::Available {
                    address: image_address(image_root, &record.number, suffix),
                }
            } else {
                ImageSlot::NotAvailable
            }
        };

        Self {
            number: record.number.clone(),
            function_name: record.function_name.clone(),
            description: record.description.clone(),
            family: record.family,
            connection_diagram: slot(record.has_connection_diagram, CONNECTION_DIAGRAM_SUFFIX),
            function_table: slot(record.has_function_table, FUNCTION_TABLE_SUFFIX),
            datasheet_link: record
                .has_datasheet()
                .then(|| record.datasheet_link.clone()),
        }
    }
}

/// Conventional image address: `<root>/<number><suffix>`, number percent-encoded
pub fn image_address(image_root: &str, number: &str, suffix: &str) -> String {
    let root = image_root.trim_end_matches('/');
    let file = format!("{}{}", urlencoding::encode(number), suffix);
    if root.is_empty() {
        file
    } else {
        format!("{}/{}", root, file)
    }
}

/// Shorten a description to `max_chars` characters, appending a marker when cut
pub fn summarize_description(description: &str, max_chars: usize) -> String {
    match description.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{}", &description[..cut], TRUNCATION_MARKER),
        None => description.to_string(),
    }
}
