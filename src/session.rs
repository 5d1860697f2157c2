//! Single-document store.
//!
//! The store holds at most one active document. Replacing it is atomic:
//! readers either see the previous document or the new one, never a mix.

use std::sync::{Arc, PoisonError, RwLock};

use crate::detect::validate_file_name;
use crate::error::{Error, Result};
use crate::extract::{check_population, ExtractOptions};
use crate::model::ClinicalDocument;
use crate::parser::{CcdaParser, ParseOptions};

/// A snapshot of the active document.
///
/// Cloning is cheap; the parsed tree is shared.
#[derive(Debug, Clone)]
pub struct ActiveDocument {
    /// File name given at ingestion
    pub name: String,
    /// Increases by one on every successful ingest
    pub version: u64,
    /// The parsed document
    pub document: Arc<ClinicalDocument>,
}

/// Holder of the current document.
#[derive(Debug, Default)]
pub struct DocumentStore {
    parse_options: ParseOptions,
    extract_options: ExtractOptions,
    active: RwLock<Option<ActiveDocument>>,
}

impl DocumentStore {
    /// Create an empty store with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with custom options.
    pub fn with_options(parse_options: ParseOptions, extract_options: ExtractOptions) -> Self {
        Self {
            parse_options,
            extract_options,
            active: RwLock::new(None),
        }
    }

    /// Extraction options used by the store.
    pub fn extract_options(&self) -> &ExtractOptions {
        &self.extract_options
    }

    /// Parse, validate and activate a document.
    ///
    /// The name must end in `.xml`. The document must parse and pass the
    /// empty-section gate; on any failure the previous document stays active.
    pub fn ingest(&self, name: &str, data: &[u8]) -> Result<ActiveDocument> {
        validate_file_name(name)?;

        let document = CcdaParser::from_bytes_with_options(data, self.parse_options.clone())?
            .parse()?;
        check_population(&document, self.extract_options.empty_section_threshold)?;

        let mut active = self.active.write().unwrap_or_else(PoisonError::into_inner);
        let version = active.as_ref().map_or(1, |current| current.version + 1);
        let snapshot = ActiveDocument {
            name: name.to_string(),
            version,
            document: Arc::new(document),
        };
        *active = Some(snapshot.clone());

        log::info!("Activated '{}' (version {})", name, version);
        Ok(snapshot)
    }

    /// The active document.
    pub fn snapshot(&self) -> Result<ActiveDocument> {
        self.active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(Error::NoActiveDocument)
    }

    /// Whether a document has been ingested.
    pub fn is_loaded(&self) -> bool {
        self.active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Drop the active document.
    pub fn clear(&self) {
        *self.active.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
