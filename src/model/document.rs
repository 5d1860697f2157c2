//! Document-level types.

use super::{Element, SectionIndex};

/// A parsed CCDA document.
///
/// The tree is immutable once built; share it behind an `Arc` when several
/// readers need it (see [`crate::session::DocumentStore`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClinicalDocument {
    root: Element,
}

impl ClinicalDocument {
    /// Wrap a root element.
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    /// The root (`ClinicalDocument`) element.
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Build the section index for this document.
    pub fn sections(&self) -> SectionIndex<'_> {
        SectionIndex::new(self)
    }

    /// Number of `section` elements, nested ones included.
    pub fn section_count(&self) -> usize {
        self.root.find_all("section").count()
    }

    /// Titles of every titled section, in document order.
    pub fn section_titles(&self) -> Vec<String> {
        self.sections()
            .titles()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}
