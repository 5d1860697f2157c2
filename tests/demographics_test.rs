//! Integration tests for patient demographics extraction.

mod common;

use common::{patient_role, CcdaBuilder};
use unccda::report::PersonalDetails;
use unccda::{extract::extract_personal_info, parse_bytes, Error};

#[test]
fn test_demographics_from_xml() {
    let doc = parse_bytes(common::sample_document().as_bytes()).unwrap();
    let info = extract_personal_info(&doc).unwrap();

    assert_eq!(info.name, "Jane Doe");
    assert_eq!(info.gender.as_deref(), Some("Female"));
    assert_eq!(info.marital_status.as_deref(), Some("Married"));
    assert_eq!(info.birthdate.as_deref(), Some("19750501"));
    assert_eq!(
        info.birth_date(),
        chrono::NaiveDate::from_ymd_opt(1975, 5, 1)
    );
    assert_eq!(info.patient_id.root.as_deref(), Some("2.16.840.1.113883.19.5"));
    assert_eq!(
        info.postal_address().map(|a| a.postal_code.as_str()),
        Some("62701")
    );
}

#[test]
fn test_personal_details_json_keys() {
    let doc = parse_bytes(common::sample_document().as_bytes()).unwrap();
    let details = PersonalDetails::from_document(&doc).unwrap();
    let value = serde_json::to_value(&details).unwrap();
    let info = &value["personal_details"];

    assert_eq!(info["Name"], "Jane Doe");
    assert_eq!(info["Gender"], "Female");
    assert_eq!(info["Birthdate"], "19750501");
    assert_eq!(info["Marital_Status"], "Married");
    assert_eq!(info["Patient-ID"]["extension"], "998991");
    assert_eq!(info["Contact_Details"]["HP"]["streetAddressLine"], "1 Main St");
    assert_eq!(info["Contact_Details"]["PST"]["postalCode"], "62701");
}

#[test]
fn test_missing_family_name_is_incomplete() {
    let xml = CcdaBuilder::new()
        .with_header(patient_role(None, &[("HP", true)]))
        .build();
    let doc = parse_bytes(xml.as_bytes()).unwrap();

    match extract_personal_info(&doc) {
        Err(Error::DemographicsIncomplete(path)) => assert_eq!(path, "patient/name/family"),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_incomplete_address_block() {
    let xml = CcdaBuilder::new()
        .with_header(patient_role(Some("Doe"), &[("HP", true), ("PST", false)]))
        .build();
    let doc = parse_bytes(xml.as_bytes()).unwrap();

    let err = extract_personal_info(&doc).unwrap_err();
    assert!(matches!(err, Error::DemographicsIncomplete(ref p) if p == "addr[@use='PST']/country"));
    assert!(!err.is_absence());
}

#[test]
fn test_document_without_patient() {
    let xml = CcdaBuilder::new()
        .table_section("Vitals", &["Date Recorded"], &[&["2023-01-01"]])
        .build();
    let doc = parse_bytes(xml.as_bytes()).unwrap();
    assert!(matches!(
        PersonalDetails::from_document(&doc),
        Err(Error::DemographicsIncomplete(ref p)) if p == "patient"
    ));
}
