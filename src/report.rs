//! Aggregate reports over a whole document.
//!
//! Each report reproduces one response shape of the extraction service and
//! serializes directly with [`crate::render::to_json`].

use serde::Serialize;

use crate::error::Result;
use crate::extract::{
    extract_personal_info, project_key_value, project_records, sections_with_data,
    ExtractOptions,
};
use crate::model::{ClinicalDocument, KeyValue, OrderedMap, PersonalInfo, Record};

/// One fixed key/value lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyValueQuery {
    /// Output key
    pub label: &'static str,
    /// Section title
    pub section: &'static str,
    /// Header whose cells become keys
    pub key_header: &'static str,
    /// Header whose cells become values
    pub value_header: &'static str,
}

/// The fixed key/value lookups, in output order.
pub const KEY_VALUE_QUERIES: [KeyValueQuery; 6] = [
    KeyValueQuery {
        label: "Assessment",
        section: "Assessment",
        key_header: "Assessment Date",
        value_header: "Assessment",
    },
    KeyValueQuery {
        label: "Past_Encounters",
        section: "Past Encounters",
        key_header: "Encounter date",
        value_header: "Diagnosis/Indication",
    },
    KeyValueQuery {
        label: "Procedures",
        section: "Procedures",
        key_header: "Date",
        value_header: "Name",
    },
    KeyValueQuery {
        label: "Procedures_(Imaging)",
        section: "Procedures",
        key_header: "Imaging Date",
        value_header: "Name",
    },
    KeyValueQuery {
        label: "Vitals",
        section: "Vitals",
        key_header: "Date Recorded",
        value_header: "Body mass index (BMI)",
    },
    KeyValueQuery {
        label: "Medications",
        section: "Medications",
        key_header: "Name",
        value_header: "Status",
    },
];

/// Titles of sections whose table holds recorded data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SectionsWithData {
    /// Section titles in document order
    pub sections_with_data: Vec<String>,
}

impl SectionsWithData {
    /// Build the listing for a document.
    pub fn from_document(document: &ClinicalDocument) -> Self {
        Self {
            sections_with_data: sections_with_data(&document.sections())
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Wrapper matching the personal details response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonalDetails {
    /// Extracted demographics
    pub personal_details: PersonalInfo,
}

impl PersonalDetails {
    /// Extract the patient demographics of a document.
    pub fn from_document(document: &ClinicalDocument) -> Result<Self> {
        Ok(Self {
            personal_details: extract_personal_info(document)?,
        })
    }
}

/// Key/value pairs for every fixed query, keyed by query label.
pub type KeyValueReport = OrderedMap<Vec<KeyValue>>;

/// Run every [`KEY_VALUE_QUERIES`] lookup over all sections with the query's title.
pub fn key_value_report(document: &ClinicalDocument, options: &ExtractOptions) -> KeyValueReport {
    let index = document.sections();

    KEY_VALUE_QUERIES
        .iter()
        .map(|query| {
            let pairs: Vec<KeyValue> = index
                .find_all(query.section)
                .into_iter()
                .flat_map(|section| {
                    project_key_value(section, query.key_header, query.value_header, options)
                })
                .collect();
            (query.label, pairs)
        })
        .collect()
}

/// Records of one section keyed by its title; empty when the section has no
/// tables.
pub type SectionRecords = OrderedMap<Vec<Record>>;

/// Header-keyed records for every titled section.
pub type RecordReport = OrderedMap<SectionRecords>;

/// Records of every titled section, keyed by title.
///
/// Each title maps to `{title: [records]}`, or to `{}` when no section with
/// that title has a table. Sections sharing a title are merged under one key
/// in document order.
pub fn record_report(document: &ClinicalDocument) -> RecordReport {
    let index = document.sections();
    let mut report = RecordReport::new();

    for title in index.titles() {
        if report.get(title).is_some() {
            continue;
        }
        let sections = index.find_all(title);
        let mut entry = SectionRecords::new();
        if sections.iter().any(|section| section.first_table().is_some()) {
            let records = sections.into_iter().flat_map(project_records).collect();
            entry.insert(title, records);
        }
        report.insert(title, entry);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Element;

    fn table(headers: &[&str], rows: &[&[&str]]) -> Element {
        let mut head = Element::new("tr");
        for h in headers {
            head = head.child_element(Element::new("th").text_node(*h));
        }
        let mut body = Element::new("tbody");
        for row in rows {
            let mut tr = Element::new("tr");
            for cell in *row {
                tr = tr.child_element(Element::new("td").text_node(*cell));
            }
            body = body.child_element(tr);
        }
        Element::new("table")
            .child_element(Element::new("thead").child_element(head))
            .child_element(body)
    }

    fn section(title: &str, tables: Vec<Element>) -> Element {
        let mut section =
            Element::new("section").child_element(Element::new("title").text_node(title));
        for t in tables {
            section = section.child_element(t);
        }
        section
    }

    fn document() -> ClinicalDocument {
        ClinicalDocument::new(
            Element::new("ClinicalDocument")
                .child_element(section(
                    "Procedures",
                    vec![
                        table(&["Date", "Name"], &[&["2020-01-01", "Colonoscopy"]]),
                        table(&["Imaging Date", "Name"], &[&["2021-03-03", "Chest X-ray"]]),
                    ],
                ))
                .child_element(section(
                    "Medications",
                    vec![table(&["Name", "Status"], &[&["Aspirin", "Active"]])],
                ))
                .child_element(section(
                    "Medications",
                    vec![table(&["Name", "Status"], &[&["Ibuprofen", "Stopped"]])],
                ))
                .child_element(section("Notes", vec![])),
        )
    }

    #[test]
    fn test_key_value_report_labels() {
        let report = key_value_report(&document(), &ExtractOptions::new().single_values());
        assert_eq!(
            report.keys().collect::<Vec<_>>(),
            vec![
                "Assessment",
                "Past_Encounters",
                "Procedures",
                "Procedures_(Imaging)",
                "Vitals",
                "Medications"
            ]
        );
        assert!(report.get("Assessment").unwrap().is_empty());
        assert_eq!(report.get("Procedures").unwrap()[0].key(), "2020-01-01");
        assert_eq!(
            report.get("Procedures_(Imaging)").unwrap()[0].values(),
            &["Chest X-ray"]
        );
        assert_eq!(report.get("Medications").unwrap().len(), 2);
    }

    #[test]
    fn test_record_report_merges_duplicate_titles() {
        let report = record_report(&document());
        assert_eq!(
            report.keys().collect::<Vec<_>>(),
            vec!["Procedures", "Medications", "Notes"]
        );
        let medications = report.get("Medications").unwrap();
        assert_eq!(medications.get("Medications").unwrap().len(), 2);
        assert!(report.get("Notes").unwrap().is_empty());
    }

    #[test]
    fn test_record_report_nests_records_under_title() {
        let json = serde_json::to_string(&record_report(&document())).unwrap();
        assert!(json.contains(r#""Notes":{}"#));
        assert!(json.contains(
            r#""Medications":{"Medications":[{"Name":"Aspirin","Status":"Active"},{"Name":"Ibuprofen","Status":"Stopped"}]}"#
        ));
    }

    #[test]
    fn test_sections_with_data() {
        let listing = SectionsWithData::from_document(&document());
        assert_eq!(
            listing.sections_with_data,
            vec!["Procedures", "Medications", "Medications"]
        );
        let json = serde_json::to_string(&listing).unwrap();
        assert!(json.starts_with(r#"{"sections_with_data":"#));
    }
}
