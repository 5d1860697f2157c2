//! Extraction engine: classification, table extraction, projections and
//! demographics.

mod cell;
mod classify;
mod demographics;
mod options;
mod project;
mod table;

pub use cell::resolve_cell;
pub use classify::{
    check_population, count_empty_sections, empty_sections, has_none_recorded_cell,
    has_recorded_table_data, is_data_bearing, sections_with_data, NONE_RECORDED, NONE_REPORTED,
};
pub use demographics::extract_personal_info;
pub use options::{
    ExtractOptions, ValueRepeat, DEFAULT_REPEAT_RANGE, EMPTY_SECTION_THRESHOLD,
    SINGLE_VALUE_SECTION,
};
pub use project::{grid_records, project_key_value, project_raw, project_records};
pub use table::{extract_grid, extract_tables, first_table};
