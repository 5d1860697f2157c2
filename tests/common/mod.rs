//! Synthetic CCDA fixtures shared by the integration tests.

#![allow(dead_code)]

/// Builder for small CCDA documents.
pub struct CcdaBuilder {
    header: String,
    sections: Vec<String>,
}

impl CcdaBuilder {
    pub fn new() -> Self {
        Self {
            header: String::new(),
            sections: Vec::new(),
        }
    }

    /// Add a patient role with the standard demographics.
    pub fn with_patient(mut self) -> Self {
        self.header = patient_role(Some("Doe"), &[("HP", true), ("PST", true)]);
        self
    }

    /// Add a patient role built from raw XML.
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Add a section with one table.
    pub fn table_section(self, title: &str, headers: &[&str], rows: &[&[&str]]) -> Self {
        let body = table(headers, rows);
        self.raw_section(title, &format!("<text>{}</text>", body))
    }

    /// Add a section with a narrative only.
    pub fn narrative_section(self, title: &str, narrative: &str) -> Self {
        self.raw_section(title, &format!("<text>{}</text>", narrative))
    }

    /// Add a section with no content beyond its title.
    pub fn empty_section(self, title: &str) -> Self {
        self.raw_section(title, "")
    }

    /// Add a section with arbitrary inner XML after the title.
    pub fn raw_section(mut self, title: &str, inner: &str) -> Self {
        self.sections.push(format!(
            "<component><section><title>{}</title>{}</section></component>",
            title, inner
        ));
        self
    }

    pub fn build(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<ClinicalDocument xmlns="urn:hl7-org:v3" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:sdtc="urn:hl7-org:sdtc">
  <recordTarget>{}</recordTarget>
  <component>
    <structuredBody>
      {}
    </structuredBody>
  </component>
</ClinicalDocument>"#,
            self.header,
            self.sections.join("\n      ")
        )
    }
}

/// An HTML-style narrative table.
pub fn table(headers: &[&str], rows: &[&[&str]]) -> String {
    let head: String = headers.iter().map(|h| format!("<th>{}</th>", h)).collect();
    let body: String = rows
        .iter()
        .map(|row| {
            let cells: String = row.iter().map(|c| format!("<td>{}</td>", c)).collect();
            format!("<tr>{}</tr>", cells)
        })
        .collect();
    format!(
        "<table><thead><tr>{}</tr></thead><tbody>{}</tbody></table>",
        head, body
    )
}

/// A patient role; `family` of `None` drops the family name element.
pub fn patient_role(family: Option<&str>, addresses: &[(&str, bool)]) -> String {
    let family = family
        .map(|f| format!("<family>{}</family>", f))
        .unwrap_or_default();
    let addrs: String = addresses
        .iter()
        .map(|(code, complete)| {
            let country = if *complete {
                "<country>US</country>"
            } else {
                ""
            };
            format!(
                "<addr use=\"{}\"><streetAddressLine>1 Main St</streetAddressLine>\
                 <city>Springfield</city><state>IL</state><postalCode>62701</postalCode>{}</addr>",
                code, country
            )
        })
        .collect();

    format!(
        r#"<patientRole>
      <id extension="998991" root="2.16.840.1.113883.19.5"/>
      {}
      <patient>
        <name><given>Jane</given>{}</name>
        <administrativeGenderCode code="F" displayName="Female"/>
        <birthTime value="19750501"/>
        <maritalStatusCode code="M" displayName="Married"/>
      </patient>
    </patientRole>"#,
        addrs, family
    )
}

/// A well-populated document used across tests.
pub fn sample_document() -> String {
    CcdaBuilder::new()
        .with_patient()
        .table_section(
            "Medications",
            &["Name", "Status", "Start Date"],
            &[&["Aspirin", "Active", "2020-01-01"], &["Metformin", "Stopped", "2019-05-05"]],
        )
        .table_section(
            "Vitals",
            &["Date Recorded", "Body mass index (BMI)"],
            &[&["2023-01-01", "24.1"]],
        )
        .table_section("Allergies", &["Allergen"], &[&["None Recorded"]])
        .narrative_section("Notes", "None Reported")
        .table_section("Problems", &["Problem", "Status"], &[&["Asthma", "Active"]])
        .empty_section("Family History")
        .build()
}
