//! Summarization boundary.
//!
//! The crate never talks to a summarization service itself. Callers pass a
//! [`Summarizer`] that turns a textual digest of table data into a string.

use crate::error::Result;
use crate::extract::{extract_tables, first_table};
use crate::model::{ClinicalDocument, Grid, OrderedMap};
use crate::render::grids_to_text;

/// Sections covered by [`medical_data_report`], in output order.
pub const MEDICAL_SECTIONS: [&str; 4] = ["Notes", "Problems", "Allergies", "Medical History"];

/// Placeholder used when a medical section has no rows.
pub const NO_DATA_MESSAGE: &str = "No data available in this section.";

/// Something that summarizes a digest of clinical table data.
pub trait Summarizer {
    /// Summarize a digest and return plain text.
    fn summarize(&self, digest: &str) -> Result<String>;
}

impl<F> Summarizer for F
where
    F: Fn(&str) -> Result<String>,
{
    fn summarize(&self, digest: &str) -> Result<String> {
        self(digest)
    }
}

/// Textual digest handed to a summarizer.
pub fn digest(grids: &[Grid]) -> String {
    grids_to_text(grids).trim_end().to_string()
}

/// Summaries of the selected sections, keyed by title.
///
/// Every table of every section carrying the title feeds the digest; a title
/// with no matching section is summarized from an empty digest.
pub fn summarize_sections<S: Summarizer + ?Sized>(
    document: &ClinicalDocument,
    titles: &[String],
    summarizer: &S,
) -> Result<OrderedMap<String>> {
    let index = document.sections();
    let mut summaries = OrderedMap::new();

    for title in titles {
        let grids: Vec<Grid> = index
            .find_all(title)
            .into_iter()
            .flat_map(extract_tables)
            .collect();
        log::debug!("Summarizing '{}' from {} tables", title, grids.len());
        summaries.insert(title.clone(), summarizer.summarize(&digest(&grids))?);
    }

    Ok(summaries)
}

/// Summaries of the fixed medical sections.
///
/// Rows of the first table of each matching section are pooled; sections
/// without rows get [`NO_DATA_MESSAGE`] instead of a summarizer call. Keys
/// replace spaces in the title with underscores.
pub fn medical_data_report<S: Summarizer + ?Sized>(
    document: &ClinicalDocument,
    summarizer: &S,
) -> Result<OrderedMap<String>> {
    let index = document.sections();
    let mut report = OrderedMap::new();

    for title in MEDICAL_SECTIONS {
        let mut pooled = Grid::new();
        for grid in index.find_all(title).into_iter().filter_map(first_table) {
            if pooled.headers.is_empty() {
                pooled.headers = grid.headers;
            }
            pooled.rows.extend(grid.rows);
        }

        let summary = if pooled.is_empty() {
            NO_DATA_MESSAGE.to_string()
        } else {
            summarizer.summarize(&digest(std::slice::from_ref(&pooled)))?
        };
        report.insert(title.replace(' ', "_"), summary);
    }

    Ok(report)
}
