//! XML format detection and upload validation.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// XML declaration information.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlFormat {
    /// XML version from the declaration (e.g., "1.0"), if declared
    pub version: Option<String>,
    /// Declared encoding (e.g., "UTF-8"), if declared
    pub encoding: Option<String>,
}

impl std::fmt::Display for XmlFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "XML {}", self.version.as_deref().unwrap_or("1.0"))
    }
}

/// UTF-8 byte order mark.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const DECLARATION_START: &str = "<?xml";
/// Bytes read from a file when sniffing the declaration.
const SNIFF_LEN: usize = 256;

/// Check that an uploaded file name claims to be XML.
///
/// Only the extension is inspected; the comparison ignores case.
pub fn validate_file_name(name: &str) -> Result<()> {
    if is_xml_file_name(name) {
        Ok(())
    } else {
        Err(Error::NotXml(name.to_string()))
    }
}

/// Whether a file name ends with `.xml` (any case).
pub fn is_xml_file_name(name: &str) -> bool {
    name.to_lowercase().ends_with(".xml")
}

/// Detect XML format from a file path.
///
/// # Example
/// ```no_run
/// use unccda::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("record.xml").unwrap();
/// println!("{}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<XmlFormat> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file).take(SNIFF_LEN as u64);
    let mut header = Vec::with_capacity(SNIFF_LEN);
    reader.read_to_end(&mut header)?;
    detect_format_from_bytes(&header)
}

/// Detect XML format from the leading bytes of a document.
///
/// The data must start (after an optional BOM and whitespace) with `<`.
/// Declaration attributes are read when present.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<XmlFormat> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    let start = data
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .ok_or_else(|| Error::MalformedDocument("empty document".into()))?;

    let data = &data[start..];
    if data[0] != b'<' {
        return Err(Error::MalformedDocument(
            "document does not start with markup".into(),
        ));
    }

    let head = String::from_utf8_lossy(&data[..data.len().min(SNIFF_LEN)]);
    if !head.starts_with(DECLARATION_START) {
        return Ok(XmlFormat::default());
    }

    let declaration = match head.find("?>") {
        Some(end) => &head[..end],
        None => head.as_ref(),
    };

    Ok(XmlFormat {
        version: declaration_attribute(declaration, "version"),
        encoding: declaration_attribute(declaration, "encoding"),
    })
}

/// Pull a pseudo-attribute value out of an XML declaration.
fn declaration_attribute(declaration: &str, name: &str) -> Option<String> {
    let needle = format!("{}=", name);
    let rest = &declaration[declaration.find(&needle)? + needle.len()..];
    let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let value = &rest[1..];
    value.find(quote).map(|end| value[..end].to_string())
}

/// Check if bytes look like an XML document.
pub fn is_xml_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}
