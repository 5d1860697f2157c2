//! CCDA XML parsing module.

mod options;
mod xml_parser;

pub use options::{ErrorMode, ParseOptions};
pub use xml_parser::CcdaParser;
