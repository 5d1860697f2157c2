//! # unccda
//!
//! Section and table extraction for CCDA clinical documents.
//!
//! This library parses HL7 CCDA XML, indexes its sections by title and turns
//! their narrative tables into grids, records, key/value pairs and patient
//! demographics ready for JSON output.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unccda::{parse_file, render};
//!
//! fn main() -> unccda::Result<()> {
//!     // Parse a CCDA file
//!     let doc = parse_file("record.xml")?;
//!
//!     // Print one section as text
//!     let sections = doc.sections();
//!     let medications = sections.find("Medications")?;
//!     println!("{}", render::section_to_text(medications));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Section index**: exact, case-sensitive title lookup
//! - **Table extraction**: header/row grids with structured-content precedence
//! - **Projections**: records and key/value pairs per section
//! - **Quality gate**: rejects documents with too many empty sections
//! - **Demographics**: name, gender, birth date, identifiers and addresses
//! - **Document store**: one active document, replaced atomically

pub mod detect;
pub mod error;
pub mod extract;
pub mod model;
pub mod parser;
pub mod render;
pub mod report;
pub mod session;
pub mod summarize;

// Re-export commonly used types
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_xml_file_name, XmlFormat};
pub use error::{Error, Result};
pub use extract::{ExtractOptions, ValueRepeat};
pub use model::{
    Address, ClinicalDocument, Element, Grid, KeyValue, OrderedMap, PatientId, PersonalInfo,
    Record, Section, SectionIndex,
};
pub use parser::{CcdaParser, ErrorMode, ParseOptions};
pub use render::JsonFormat;
pub use report::{KeyValueReport, PersonalDetails, RecordReport, SectionRecords, SectionsWithData};
pub use session::{ActiveDocument, DocumentStore};
pub use summarize::Summarizer;

use std::io::Read;
use std::path::Path;

/// Parse a CCDA file and return the document.
///
/// # Example
///
/// ```no_run
/// use unccda::parse_file;
///
/// let doc = parse_file("record.xml").unwrap();
/// println!("Sections: {}", doc.section_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<ClinicalDocument> {
    let parser = CcdaParser::open(path)?;
    parser.parse()
}

/// Parse a CCDA file with custom options.
///
/// # Example
///
/// ```no_run
/// use unccda::{parse_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new().lenient();
/// let doc = parse_file_with_options("record.xml", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ParseOptions,
) -> Result<ClinicalDocument> {
    let parser = CcdaParser::open_with_options(path, options)?;
    parser.parse()
}

/// Parse a CCDA document from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<ClinicalDocument> {
    let parser = CcdaParser::from_bytes(data)?;
    parser.parse()
}

/// Parse a CCDA document from bytes with custom options.
pub fn parse_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<ClinicalDocument> {
    let parser = CcdaParser::from_bytes_with_options(data, options)?;
    parser.parse()
}

/// Parse a CCDA document from a reader.
///
/// # Example
///
/// ```no_run
/// use unccda::parse_reader;
/// use std::fs::File;
///
/// let file = File::open("record.xml").unwrap();
/// let doc = parse_reader(file).unwrap();
/// ```
pub fn parse_reader<R: Read>(reader: R) -> Result<ClinicalDocument> {
    let parser = CcdaParser::from_reader(reader)?;
    parser.parse()
}

/// Parse a CCDA document from a reader with custom options.
pub fn parse_reader_with_options<R: Read>(
    reader: R,
    options: ParseOptions,
) -> Result<ClinicalDocument> {
    let parser = CcdaParser::from_reader_with_options(reader, options)?;
    parser.parse()
}

/// Parse a CCDA file without blocking the async runtime on file I/O.
#[cfg(feature = "async")]
pub async fn parse_file_async<P: AsRef<Path>>(
    path: P,
    options: ParseOptions,
) -> Result<ClinicalDocument> {
    let data = tokio::fs::read(path.as_ref()).await?;
    parse_bytes_with_options(&data, options)
}

/// List the section titles of a CCDA file.
///
/// # Example
///
/// ```no_run
/// use unccda::extract_section_names;
///
/// for title in extract_section_names("record.xml").unwrap() {
///     println!("{}", title);
/// }
/// ```
pub fn extract_section_names<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let doc = parse_file(path)?;
    Ok(doc.section_titles())
}

/// Render one section of a CCDA file as text.
pub fn section_text<P: AsRef<Path>>(path: P, title: &str) -> Result<String> {
    let doc = parse_file(path)?;
    let sections = doc.sections();
    Ok(render::section_to_text(sections.find(title)?))
}

/// Convert every titled section of a CCDA file to JSON records.
///
/// # Example
///
/// ```no_run
/// use unccda::{to_json, JsonFormat};
///
/// let json = to_json("record.xml", JsonFormat::Pretty).unwrap();
/// std::fs::write("record.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_json(&report::record_report(&doc), format)
}

/// Builder for parsing CCDA documents and extracting from them.
///
/// # Example
///
/// ```no_run
/// use unccda::Unccda;
///
/// let json = Unccda::new()
///     .single_values()
///     .checked()
///     .parse("record.xml")?
///     .key_values_json(unccda::JsonFormat::Pretty)?;
/// # Ok::<(), unccda::Error>(())
/// ```
pub struct Unccda {
    parse_options: ParseOptions,
    extract_options: ExtractOptions,
    check_population: bool,
}

impl Unccda {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            extract_options: ExtractOptions::default(),
            check_population: false,
        }
    }

    /// Accept documents outside the CCDA namespaces.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Reject documents that fail the empty-section gate.
    pub fn checked(mut self) -> Self {
        self.check_population = true;
        self
    }

    /// Set the empty-section threshold.
    pub fn with_empty_section_threshold(mut self, threshold: usize) -> Self {
        self.extract_options = self.extract_options.with_empty_section_threshold(threshold);
        self
    }

    /// Set the key/value repeat policy.
    pub fn with_value_repeat(mut self, repeat: ValueRepeat) -> Self {
        self.extract_options = self.extract_options.with_value_repeat(repeat);
        self
    }

    /// Emit single-element value lists everywhere.
    pub fn single_values(mut self) -> Self {
        self.extract_options = self.extract_options.single_values();
        self
    }

    /// Parse a CCDA file and return a result wrapper.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<UnccdaResult> {
        let parser = CcdaParser::open_with_options(path, self.parse_options.clone())?;
        self.finish(parser)
    }

    /// Parse a CCDA document from bytes.
    pub fn parse_bytes(self, data: &[u8]) -> Result<UnccdaResult> {
        let parser = CcdaParser::from_bytes_with_options(data, self.parse_options.clone())?;
        self.finish(parser)
    }

    fn finish(self, parser: CcdaParser) -> Result<UnccdaResult> {
        let document = parser.parse()?;
        if self.check_population {
            extract::check_population(&document, self.extract_options.empty_section_threshold)?;
        }
        Ok(UnccdaResult {
            document,
            extract_options: self.extract_options,
        })
    }
}

impl Default for Unccda {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of parsing a CCDA document.
pub struct UnccdaResult {
    /// The parsed document
    pub document: ClinicalDocument,
    /// Extraction options to use
    extract_options: ExtractOptions,
}

impl UnccdaResult {
    /// Get the document.
    pub fn document(&self) -> &ClinicalDocument {
        &self.document
    }

    /// Section titles in document order.
    pub fn section_titles(&self) -> Vec<String> {
        self.document.section_titles()
    }

    /// Grids of the first section with the title.
    pub fn tables(&self, title: &str) -> Result<Vec<Grid>> {
        let sections = self.document.sections();
        Ok(extract::project_raw(sections.find(title)?))
    }

    /// Records of the first section with the title.
    pub fn records(&self, title: &str) -> Result<Vec<Record>> {
        let sections = self.document.sections();
        Ok(extract::project_records(sections.find(title)?))
    }

    /// Key/value pairs of the first section with the title.
    pub fn key_values(&self, title: &str, key: &str, value: &str) -> Result<Vec<KeyValue>> {
        let sections = self.document.sections();
        Ok(extract::project_key_value(
            sections.find(title)?,
            key,
            value,
            &self.extract_options,
        ))
    }

    /// Titles of sections whose table holds recorded data.
    pub fn sections_with_data(&self) -> SectionsWithData {
        SectionsWithData::from_document(&self.document)
    }

    /// Patient demographics.
    pub fn personal_info(&self) -> Result<PersonalInfo> {
        extract::extract_personal_info(&self.document)
    }

    /// The fixed key/value report.
    pub fn key_value_report(&self) -> KeyValueReport {
        report::key_value_report(&self.document, &self.extract_options)
    }

    /// Records of every titled section.
    pub fn record_report(&self) -> RecordReport {
        report::record_report(&self.document)
    }

    /// The fixed key/value report as JSON.
    pub fn key_values_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.key_value_report(), format)
    }

    /// Records of every titled section as JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.record_report(), format)
    }

    /// One section as text.
    pub fn section_text(&self, title: &str) -> Result<String> {
        let sections = self.document.sections();
        Ok(render::section_to_text(sections.find(title)?))
    }
}
