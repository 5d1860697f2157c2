//! Projections of extracted tables into output shapes.

use super::options::ExtractOptions;
use super::table::extract_tables;
use crate::model::{Grid, KeyValue, Record, Section};

/// The section's grids, unmodified.
pub fn project_raw(section: Section<'_>) -> Vec<Grid> {
    extract_tables(section)
}

/// Key/value pairs from every table that has both headers.
///
/// Tables missing either header are skipped. A row too short to reach a
/// column contributes an empty string for it. Values are wrapped in a list:
/// one element for the single-value section, otherwise a list repeated per
/// [`ExtractOptions::value_repeat`].
pub fn project_key_value(
    section: Section<'_>,
    key_header: &str,
    value_header: &str,
    options: &ExtractOptions,
) -> Vec<KeyValue> {
    let single = section.title() == Some(options.single_value_section.as_str());
    let mut pairs = Vec::new();

    for grid in extract_tables(section) {
        let (Some(key_index), Some(value_index)) =
            (grid.header_index(key_header), grid.header_index(value_header))
        else {
            log::debug!(
                "Skipping table without '{}'/'{}' headers: {:?}",
                key_header,
                value_header,
                grid.headers
            );
            continue;
        };

        for row in &grid.rows {
            let key = cell_or_empty(row, key_index);
            let value = cell_or_empty(row, value_index);
            let repeat = if single {
                1
            } else {
                options.value_repeat.count()
            };
            pairs.push(KeyValue(key, vec![value; repeat]));
        }
    }

    pairs
}

/// One header-keyed record per body row, across every table.
///
/// Headers and cells are zipped positionally; a short row produces a record
/// with fewer entries and nothing is filled in for the missing headers.
pub fn project_records(section: Section<'_>) -> Vec<Record> {
    extract_tables(section)
        .iter()
        .flat_map(grid_records)
        .collect()
}

/// Records of a single grid.
pub fn grid_records(grid: &Grid) -> Vec<Record> {
    grid.rows
        .iter()
        .map(|row| {
            grid.headers
                .iter()
                .zip(row)
                .map(|(h, v)| (h.clone(), v.clone()))
                .collect()
        })
        .collect()
}

fn cell_or_empty(row: &[String], index: usize) -> String {
    row.get(index).cloned().unwrap_or_default()
}
