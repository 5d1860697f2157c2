//! Human-readable text layout for sections and grids.

use crate::extract::extract_tables;
use crate::model::{Grid, Section};

const COLUMN_SEPARATOR: &str = " | ";

/// Render a section as its title, an underline, then each table.
///
/// ```text
/// Medications
/// -----------
/// Name | Status
/// -------------
/// Aspirin | Active
///
/// ```
pub fn section_to_text(section: Section<'_>) -> String {
    let mut lines = Vec::new();

    if let Some(title) = section.title() {
        lines.push(title.to_string());
        lines.push("-".repeat(title.chars().count()));
    }

    for grid in extract_tables(section) {
        push_grid(&mut lines, &grid);
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Render grids one after another, each followed by a blank line.
pub fn grids_to_text(grids: &[Grid]) -> String {
    let mut lines = Vec::new();
    for grid in grids {
        push_grid(&mut lines, grid);
        lines.push(String::new());
    }
    lines.join("\n")
}

/// Render a single grid: header line, rule, rows.
pub fn grid_to_text(grid: &Grid) -> String {
    let mut lines = Vec::new();
    push_grid(&mut lines, grid);
    lines.join("\n")
}

fn push_grid(lines: &mut Vec<String>, grid: &Grid) {
    let header = grid.headers.join(COLUMN_SEPARATOR);
    let rule = "-".repeat(header.chars().count());
    lines.push(header);
    lines.push(rule);

    for row in &grid.rows {
        lines.push(row.join(COLUMN_SEPARATOR));
    }
}
