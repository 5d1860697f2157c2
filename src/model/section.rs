//! Section views and the title index.

use super::{ClinicalDocument, Element};
use crate::error::{Error, Result};

/// A borrowed view of a `section` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section<'a> {
    element: &'a Element,
}

impl<'a> Section<'a> {
    /// Wrap a `section` element.
    pub fn new(element: &'a Element) -> Self {
        Self { element }
    }

    /// The underlying element.
    pub fn element(&self) -> &'a Element {
        self.element
    }

    /// Leading text of the `title` child, untrimmed.
    pub fn title(&self) -> Option<&'a str> {
        self.element.child("title").and_then(Element::text)
    }

    /// Every `table` in the section (nested sections included), in document order.
    pub fn tables(&self) -> impl Iterator<Item = &'a Element> {
        self.element.find_all("table")
    }

    /// First `table` in the section.
    pub fn first_table(&self) -> Option<&'a Element> {
        self.element.find("table")
    }

    /// Every narrative `text` block in the section.
    pub fn narratives(&self) -> impl Iterator<Item = &'a Element> {
        self.element.find_all("text")
    }
}

/// Title lookup over the sections of one document.
///
/// Built on demand from a [`ClinicalDocument`] and borrowing it, so an index
/// never outlives the document it describes.
#[derive(Debug, Clone)]
pub struct SectionIndex<'a> {
    sections: Vec<Section<'a>>,
}

impl<'a> SectionIndex<'a> {
    /// Index every section of a document in document order.
    pub fn new(document: &'a ClinicalDocument) -> Self {
        let sections = document.root().find_all("section").map(Section::new).collect();
        Self { sections }
    }

    /// Every section, titled or not.
    pub fn all(&self) -> &[Section<'a>] {
        &self.sections
    }

    /// Sections that carry a title.
    pub fn titled(&self) -> impl Iterator<Item = (&'a str, Section<'a>)> + '_ {
        self.sections
            .iter()
            .filter_map(|s| s.title().map(|title| (title, *s)))
    }

    /// Titles of every titled section.
    pub fn titles(&self) -> Vec<&'a str> {
        self.titled().map(|(title, _)| title).collect()
    }

    /// First section whose title equals `title` exactly.
    pub fn find(&self, title: &str) -> Result<Section<'a>> {
        self.titled()
            .find(|(t, _)| *t == title)
            .map(|(_, s)| s)
            .ok_or_else(|| Error::SectionNotFound(title.to_string()))
    }

    /// Every section whose title equals `title` exactly, in document order.
    pub fn find_all(&self, title: &str) -> Vec<Section<'a>> {
        self.titled()
            .filter(|(t, _)| *t == title)
            .map(|(_, s)| s)
            .collect()
    }

    /// Number of indexed sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether the document has no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
