//! Table cell text resolution.

use crate::model::Element;

/// Resolve the display text of a `td`/`th` cell.
///
/// The first rule that yields text wins:
///
/// 1. the text of the first descendant `content` element, if non-empty (trimmed),
/// 2. the cell's own leading text (trimmed),
/// 3. every descendant text node concatenated in document order (trimmed),
/// 4. the empty string.
pub fn resolve_cell(cell: &Element) -> String {
    if let Some(text) = structured_content(cell) {
        return text.to_string();
    }

    if let Some(text) = cell.text().map(str::trim).filter(|t| !t.is_empty()) {
        return text.to_string();
    }

    cell.text_content().trim().to_string()
}

/// Trimmed text of the first `content` descendant. Later ones are not consulted.
fn structured_content(cell: &Element) -> Option<&str> {
    cell.find("content")
        .and_then(Element::text)
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_beats_direct_text() {
        let td = Element::new("td")
            .text_node("display")
            .child_element(Element::new("content").text_node("  coded  "));
        assert_eq!(resolve_cell(&td), "coded");
    }

    #[test]
    fn test_direct_text() {
        let td = Element::new("td").text_node("  Active \n");
        assert_eq!(resolve_cell(&td), "Active");
    }

    #[test]
    fn test_empty_content_falls_through() {
        let td = Element::new("td")
            .text_node("Direct")
            .child_element(Element::new("content").text_node("   "));
        assert_eq!(resolve_cell(&td), "Direct");
    }

    #[test]
    fn test_only_first_content_is_consulted() {
        let td = Element::new("td")
            .text_node("Direct")
            .child_element(Element::new("content").attr("ID", "a"))
            .child_element(Element::new("content").text_node("Second"));
        assert_eq!(resolve_cell(&td), "Direct");
    }

    #[test]
    fn test_descendant_concatenation() {
        let td = Element::new("td")
            .text_node("\n    ")
            .child_element(
                Element::new("linkHtml")
                    .attr("href", "#ref1")
                    .text_node("Lisinopril"),
            )
            .text_node(" 10 mg")
            .child_element(Element::new("br"))
            .text_node("\n");
        assert_eq!(resolve_cell(&td), "Lisinopril 10 mg");
    }

    #[test]
    fn test_nested_content_is_found() {
        let td = Element::new("td").child_element(
            Element::new("paragraph").child_element(Element::new("content").text_node("Deep")),
        );
        assert_eq!(resolve_cell(&td), "Deep");
    }

    #[test]
    fn test_no_text_at_all() {
        let td = Element::new("td").child_element(Element::new("br"));
        assert_eq!(resolve_cell(&td), "");
    }
}
