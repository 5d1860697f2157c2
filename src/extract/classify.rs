//! Section content classification and the ingestion quality gate.
//!
//! Two predicates answer different questions and are deliberately kept
//! apart:
//!
//! - [`is_data_bearing`]: did anyone fill this section in? A table counts, and
//!   so does a narrative that explicitly documents "None Recorded" or
//!   "None Reported" (asked, answered with none).
//! - [`has_recorded_table_data`]: does the section's table hold real rows
//!   rather than a "None Recorded" placeholder?

use super::cell::resolve_cell;
use super::table::body_rows;
use crate::error::{Error, Result};
use crate::model::{ClinicalDocument, Section, SectionIndex};

/// Placeholder marking data that was not recorded.
pub const NONE_RECORDED: &str = "None Recorded";

/// Placeholder marking data the patient reported as none.
pub const NONE_REPORTED: &str = "None Reported";

/// Whether a section holds a table or an explicit absence-of-data marker.
pub fn is_data_bearing(section: Section<'_>) -> bool {
    if section.first_table().is_some() {
        return true;
    }

    section
        .narratives()
        .filter_map(|block| block.text())
        .map(str::trim)
        .any(|text| text == NONE_RECORDED || text == NONE_REPORTED)
}

/// Whether some body cell of the section's first table reads "None Recorded".
pub fn has_none_recorded_cell(section: Section<'_>) -> bool {
    let Some(table) = section.first_table() else {
        return false;
    };

    body_rows(table)
        .into_iter()
        .flat_map(|row| row.find_all("td"))
        .any(|td| resolve_cell(td) == NONE_RECORDED)
}

/// Whether the section's first table has at least one body cell and none of
/// them reads "None Recorded".
pub fn has_recorded_table_data(section: Section<'_>) -> bool {
    let Some(table) = section.first_table() else {
        return false;
    };

    let has_cells = body_rows(table)
        .into_iter()
        .any(|row| row.find("td").is_some());

    has_cells && !has_none_recorded_cell(section)
}

/// Titles of titled sections that are not data-bearing, in document order.
pub fn empty_sections<'a>(index: &SectionIndex<'a>) -> Vec<&'a str> {
    index
        .titled()
        .filter(|(_, section)| !is_data_bearing(*section))
        .map(|(title, _)| title)
        .collect()
}

/// Number of titled sections that are not data-bearing.
pub fn count_empty_sections(document: &ClinicalDocument) -> usize {
    empty_sections(&document.sections()).len()
}

/// Titles of sections with a table that holds recorded data.
pub fn sections_with_data<'a>(index: &SectionIndex<'a>) -> Vec<&'a str> {
    index
        .titled()
        .filter(|(_, section)| has_recorded_table_data(*section))
        .map(|(title, _)| title)
        .collect()
}

/// Reject documents with `threshold` or more empty sections.
pub fn check_population(document: &ClinicalDocument, threshold: usize) -> Result<()> {
    let index = document.sections();
    let empty = empty_sections(&index);
    log::debug!("Sections without data: {:?}", empty);

    if empty.len() >= threshold {
        return Err(Error::InsufficientData {
            empty: empty.len(),
            threshold,
        });
    }
    Ok(())
}
