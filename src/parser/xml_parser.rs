//! CCDA document parser using roxmltree.

use std::io::Read;
use std::path::Path;

use crate::detect::detect_format_from_bytes;
use crate::error::{Error, Result};
use crate::model::{
    Attribute, ClinicalDocument, Element, Node, HL7_NAMESPACE, SDTC_NAMESPACE, XSI_NAMESPACE,
};

use super::options::{ErrorMode, ParseOptions};

/// Prefixes whose bindings are fixed by the CCDA schema.
const FIXED_PREFIXES: [(&str, &str); 2] = [("xsi", XSI_NAMESPACE), ("sdtc", SDTC_NAMESPACE)];

/// CCDA document parser.
///
/// Holds the validated source text; [`CcdaParser::parse`] builds an owned
/// [`ClinicalDocument`] that no longer borrows it.
pub struct CcdaParser {
    text: String,
    options: ParseOptions,
}

impl CcdaParser {
    /// Open a CCDA file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a CCDA file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Loading CCDA document from {}", path.display());
        let data = std::fs::read(path)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Parse a CCDA document from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a CCDA document from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        detect_format_from_bytes(data)?;

        let text = std::str::from_utf8(data)
            .map_err(|e| Error::MalformedDocument(format!("invalid UTF-8: {}", e)))?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        Ok(Self {
            text: text.to_string(),
            options,
        })
    }

    /// Parse a CCDA document from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Parse a CCDA document from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Parse the document and return an owned [`ClinicalDocument`].
    pub fn parse(&self) -> Result<ClinicalDocument> {
        let xml = roxmltree::Document::parse_with_options(&self.text, self.options.to_roxmltree())?;

        if let Err(e) = check_namespaces(&xml) {
            match self.options.error_mode {
                ErrorMode::Strict => return Err(e),
                ErrorMode::Lenient => log::warn!("Accepting document in lenient mode: {}", e),
            }
        }

        let root = convert_element(xml.root_element());
        let document = ClinicalDocument::new(root);
        log::debug!(
            "Parsed CCDA document with {} sections",
            document.section_count()
        );
        Ok(document)
    }
}

/// Verify the root element and the fixed prefix bindings.
fn check_namespaces(xml: &roxmltree::Document) -> Result<()> {
    let root = xml.root_element();
    if root.tag_name().namespace() != Some(HL7_NAMESPACE) {
        return Err(Error::MalformedDocument(format!(
            "unsupported schema: root element <{}> is not in namespace {}",
            root.tag_name().name(),
            HL7_NAMESPACE
        )));
    }

    for node in xml.descendants().filter(|n| n.is_element()) {
        for ns in node.namespaces() {
            let Some(prefix) = ns.name() else { continue };
            if let Some((_, expected)) = FIXED_PREFIXES.iter().find(|(p, _)| *p == prefix) {
                if ns.uri() != *expected {
                    return Err(Error::MalformedDocument(format!(
                        "unsupported schema: prefix '{}' bound to {} instead of {}",
                        prefix,
                        ns.uri(),
                        expected
                    )));
                }
            }
        }
    }

    Ok(())
}

/// Copy a roxmltree element (and its subtree) into the owned model.
fn convert_element(node: roxmltree::Node) -> Element {
    let tag = node.tag_name();
    let mut element = Element::with_namespace(tag.namespace().map(str::to_string), tag.name());

    element.attributes = node
        .attributes()
        .map(|a| Attribute {
            namespace: a.namespace().map(str::to_string),
            name: a.name().to_string(),
            value: a.value().to_string(),
        })
        .collect();

    for child in node.children() {
        if child.is_element() {
            element.push(Node::Element(convert_element(child)));
        } else if child.is_text() {
            if let Some(text) = child.text() {
                element.push(Node::Text(text.to_string()));
            }
        }
    }

    element
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"<?xml version="1.0"?>
<ClinicalDocument xmlns="urn:hl7-org:v3" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:sdtc="urn:hl7-org:sdtc">
  <component><structuredBody><component><section><title>Vitals</title></section></component></structuredBody></component>
</ClinicalDocument>"#;

    #[test]
    fn test_parse_minimal() {
        let doc = CcdaParser::from_bytes(MINIMAL.as_bytes())
            .unwrap()
            .parse()
            .unwrap();
        assert!(doc.root().is("ClinicalDocument"));
        assert_eq!(doc.section_count(), 1);
    }

    #[test]
    fn test_not_well_formed() {
        let parser = CcdaParser::from_bytes(b"<ClinicalDocument xmlns=\"urn:hl7-org:v3\">").unwrap();
        assert!(matches!(parser.parse(), Err(Error::MalformedDocument(_))));
    }

    #[test]
    fn test_wrong_default_namespace() {
        let xml = br#"<ClinicalDocument xmlns="urn:example:other"/>"#;
        let result = CcdaParser::from_bytes(xml).unwrap().parse();
        assert!(matches!(result, Err(Error::MalformedDocument(_))));
    }

    #[test]
    fn test_wrong_sdtc_binding() {
        let xml = br#"<ClinicalDocument xmlns="urn:hl7-org:v3" xmlns:sdtc="urn:example:sdtc"/>"#;
        let result = CcdaParser::from_bytes(xml).unwrap().parse();
        assert!(matches!(result, Err(Error::MalformedDocument(_))));
    }

    #[test]
    fn test_lenient_accepts_foreign_namespace() {
        let xml = br#"<ClinicalDocument xmlns="urn:example:other"/>"#;
        let options = ParseOptions::new().lenient();
        let result = CcdaParser::from_bytes_with_options(xml, options)
            .unwrap()
            .parse();
        assert!(result.is_ok());
    }

    #[test]
    fn test_internal_entity_is_expanded() {
        let xml = MINIMAL.replacen(
            "<ClinicalDocument",
            "<!DOCTYPE ClinicalDocument [<!ENTITY vs \"Vitals\">]>\n<ClinicalDocument",
            1,
        );
        let xml = xml.replace("<title>Vitals</title>", "<title>&vs;</title>");
        let doc = CcdaParser::from_bytes(xml.as_bytes())
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(doc.section_titles(), vec!["Vitals"]);
    }

    #[test]
    fn test_invalid_utf8() {
        let result = CcdaParser::from_bytes(b"<a>\xff\xfe</a>");
        assert!(matches!(result, Err(Error::MalformedDocument(_))));
    }

    #[test]
    fn test_from_reader() {
        let parser = CcdaParser::from_reader(MINIMAL.as_bytes()).unwrap();
        assert!(parser.parse().is_ok());
    }
}
