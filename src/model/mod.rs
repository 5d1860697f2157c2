//! Document model types for CCDA content representation.
//!
//! The parser produces an owned [`Element`] tree wrapped in a
//! [`ClinicalDocument`]; extraction works on borrowed [`Section`] views and
//! produces [`Grid`]s, [`Record`]s, [`KeyValue`]s and [`PersonalInfo`].

mod demographics;
mod document;
mod element;
mod record;
mod section;
mod table;

pub use demographics::{Address, PatientId, PersonalInfo, HOME_ADDRESS, POSTAL_ADDRESS};
pub use document::ClinicalDocument;
pub use element::{
    Attribute, Descendants, Element, Node, HL7_NAMESPACE, SDTC_NAMESPACE, XSI_NAMESPACE,
};
pub use record::{KeyValue, OrderedMap, Record};
pub use section::{Section, SectionIndex};
pub use table::Grid;
