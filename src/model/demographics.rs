//! Patient demographic types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Address use code for the home/primary address.
pub const HOME_ADDRESS: &str = "HP";

/// Address use code for the postal address.
pub const POSTAL_ADDRESS: &str = "PST";

/// Patient details read from the document header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    /// Given name and family name separated by one space
    #[serde(rename = "Name")]
    pub name: String,

    /// Administrative gender display name
    #[serde(rename = "Gender")]
    pub gender: Option<String>,

    /// Raw HL7 birth timestamp
    #[serde(rename = "Birthdate")]
    pub birthdate: Option<String>,

    /// Marital status display name
    #[serde(rename = "Marital_Status")]
    pub marital_status: Option<String>,

    /// Patient identifier
    #[serde(rename = "Patient-ID")]
    pub patient_id: PatientId,

    /// Addresses keyed by use code
    #[serde(rename = "Contact_Details")]
    pub contact_details: BTreeMap<String, Address>,
}

impl PersonalInfo {
    /// Birthdate parsed from the leading `YYYYMMDD` of the HL7 timestamp.
    pub fn birth_date(&self) -> Option<NaiveDate> {
        let raw = self.birthdate.as_deref()?;
        let day = raw.get(..8)?;
        NaiveDate::parse_from_str(day, "%Y%m%d").ok()
    }

    /// Home address, if present.
    pub fn home_address(&self) -> Option<&Address> {
        self.contact_details.get(HOME_ADDRESS)
    }

    /// Postal address, if present.
    pub fn postal_address(&self) -> Option<&Address> {
        self.contact_details.get(POSTAL_ADDRESS)
    }
}

/// Patient identifier attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientId {
    /// Identifier within the assigning authority
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,

    /// Assigning authority OID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
}

impl PatientId {
    /// Whether no identifier attribute was found.
    pub fn is_empty(&self) -> bool {
        self.extension.is_none() && self.root.is_none()
    }
}

/// A postal address block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Street line
    pub street_address_line: String,
    /// City
    pub city: String,
    /// State or province
    pub state: String,
    /// Postal code
    pub postal_code: String,
    /// Country
    pub country: String,
}
