//! Table extraction from sections.

use super::cell::resolve_cell;
use crate::model::{Element, Grid, Section};

const HEADER_PATH: [&str; 3] = ["thead", "tr", "th"];
const BODY_ROW_PATH: [&str; 2] = ["tbody", "tr"];

/// Extract every table of a section, in document order.
///
/// A section without tables yields an empty vector.
pub fn extract_tables(section: Section<'_>) -> Vec<Grid> {
    section.tables().map(extract_grid).collect()
}

/// Extract the first table of a section.
pub fn first_table(section: Section<'_>) -> Option<Grid> {
    section.first_table().map(extract_grid)
}

/// Extract one `table` element into a grid.
pub fn extract_grid(table: &Element) -> Grid {
    Grid {
        headers: table
            .find_path(&HEADER_PATH)
            .into_iter()
            .map(resolve_cell)
            .collect(),
        rows: body_rows(table)
            .into_iter()
            .map(|row| row.find_all("td").map(resolve_cell).collect())
            .collect(),
    }
}

/// Every `tbody/tr` row of a table.
pub(crate) fn body_rows(table: &Element) -> Vec<&Element> {
    table.find_path(&BODY_ROW_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn th(text: &str) -> Element {
        Element::new("th").text_node(text)
    }

    fn td(text: &str) -> Element {
        Element::new("td").text_node(text)
    }

    fn table(headers: &[&str], rows: &[&[&str]]) -> Element {
        let mut head_row = Element::new("tr");
        for h in headers {
            head_row = head_row.child_element(th(h));
        }
        let mut body = Element::new("tbody");
        for row in rows {
            let mut tr = Element::new("tr");
            for cell in *row {
                tr = tr.child_element(td(cell));
            }
            body = body.child_element(tr);
        }
        Element::new("table")
            .child_element(Element::new("thead").child_element(head_row))
            .child_element(body)
    }

    fn section(children: Vec<Element>) -> Element {
        let mut text = Element::new("text");
        for child in children {
            text = text.child_element(child);
        }
        Element::new("section")
            .child_element(Element::new("title").text_node("Medications"))
            .child_element(text)
    }

    #[test]
    fn test_extract_single_table() {
        let element = section(vec![table(
            &["Name", "Status"],
            &[&["Aspirin", "Active"], &["Metformin", "Stopped"]],
        )]);
        let grids = extract_tables(Section::new(&element));

        assert_eq!(grids.len(), 1);
        assert_eq!(grids[0].headers, vec!["Name", "Status"]);
        assert_eq!(grids[0].rows[1], vec!["Metformin", "Stopped"]);
    }

    #[test]
    fn test_multiple_tables_in_order() {
        let element = section(vec![
            table(&["A"], &[&["1"]]),
            table(&["B"], &[&["2"], &["3"]]),
        ]);
        let grids = extract_tables(Section::new(&element));

        assert_eq!(grids.len(), 2);
        assert_eq!(grids[0].headers, vec!["A"]);
        assert_eq!(grids[1].row_count(), 2);
        assert_eq!(first_table(Section::new(&element)), Some(grids[0].clone()));
    }

    #[test]
    fn test_section_without_table() {
        let element = section(vec![Element::new("paragraph").text_node("No tables here")]);
        assert!(extract_tables(Section::new(&element)).is_empty());
        assert_eq!(first_table(Section::new(&element)), None);
    }

    #[test]
    fn test_ragged_rows_are_kept() {
        let element = section(vec![table(
            &["Name", "Status", "Date"],
            &[&["Aspirin"], &["A", "B", "C", "D"]],
        )]);
        let grid = &extract_tables(Section::new(&element))[0];
        assert_eq!(grid.rows[0].len(), 1);
        assert_eq!(grid.rows[1].len(), 4);
    }

    #[test]
    fn test_table_without_header() {
        let element = Element::new("table").child_element(
            Element::new("tbody").child_element(Element::new("tr").child_element(td("x"))),
        );
        let grid = extract_grid(&element);
        assert!(grid.headers.is_empty());
        assert_eq!(grid.rows, vec![vec!["x".to_string()]]);
    }
}
