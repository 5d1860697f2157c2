//! Rendering module for converting extraction outputs to text and JSON.

mod json;
mod text;

pub use json::{to_json, JsonFormat};
pub use text::{grid_to_text, grids_to_text, section_to_text};
