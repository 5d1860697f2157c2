//! Fixed-path patient demographics extraction.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::model::{
    Address, ClinicalDocument, Element, PatientId, PersonalInfo, HOME_ADDRESS, POSTAL_ADDRESS,
};

/// Address use codes read from the patient role, in output order.
const ADDRESS_USES: [&str; 2] = [HOME_ADDRESS, POSTAL_ADDRESS];

/// Extract patient demographics from the document header.
///
/// Name parts and the coded gender, birth time and marital status elements
/// are required; a missing one fails with [`Error::DemographicsIncomplete`]
/// naming the path. Missing attributes on present elements are reported as
/// absent values.
pub fn extract_personal_info(document: &ClinicalDocument) -> Result<PersonalInfo> {
    let patient = required(document.root().find("patient"), "patient")?;

    let given = required_text(patient.find_first_path(&["name", "given"]), "patient/name/given")?;
    let family = required_text(
        patient.find_first_path(&["name", "family"]),
        "patient/name/family",
    )?;

    let gender = required(
        patient.find("administrativeGenderCode"),
        "patient/administrativeGenderCode",
    )?;
    let birth_time = required(patient.find("birthTime"), "patient/birthTime")?;
    let marital = required(
        patient.find("maritalStatusCode"),
        "patient/maritalStatusCode",
    )?;

    let mut info = PersonalInfo {
        name: format!("{} {}", given, family),
        gender: gender.attribute("displayName").map(str::to_string),
        birthdate: birth_time.attribute("value").map(str::to_string),
        marital_status: marital.attribute("displayName").map(str::to_string),
        patient_id: PatientId::default(),
        contact_details: BTreeMap::new(),
    };

    if let Some(role) = document.root().find("patientRole") {
        if let Some(id) = role.find("id") {
            info.patient_id = PatientId {
                extension: id.attribute("extension").map(str::to_string),
                root: id.attribute("root").map(str::to_string),
            };
        }

        for code in ADDRESS_USES {
            let block = role
                .find_all("addr")
                .find(|addr| addr.attribute("use") == Some(code));
            if let Some(block) = block {
                info.contact_details
                    .insert(code.to_string(), extract_address(block, code)?);
            }
        }
    }

    Ok(info)
}

fn extract_address(addr: &Element, code: &str) -> Result<Address> {
    let field = |name: &str| -> Result<String> {
        let element = addr.child(name).ok_or_else(|| {
            Error::DemographicsIncomplete(format!("addr[@use='{}']/{}", code, name))
        })?;
        Ok(element.text().map(str::trim).unwrap_or_default().to_string())
    };

    Ok(Address {
        street_address_line: field("streetAddressLine")?,
        city: field("city")?,
        state: field("state")?,
        postal_code: field("postalCode")?,
        country: field("country")?,
    })
}

/// Turn a missing node into a named error.
fn required<'a>(node: Option<&'a Element>, path: &str) -> Result<&'a Element> {
    node.ok_or_else(|| Error::DemographicsIncomplete(path.to_string()))
}

/// A present node with non-empty text.
fn required_text<'a>(node: Option<&'a Element>, path: &str) -> Result<&'a str> {
    required(node, path)?
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::DemographicsIncomplete(path.to_string()))
}
