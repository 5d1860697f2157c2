//! Extraction options and configuration.

use std::ops::RangeInclusive;

use rand::Rng;

/// Empty sections at or above which a document is rejected.
pub const EMPTY_SECTION_THRESHOLD: usize = 10;

/// Section whose key/value lists always hold exactly one value.
pub const SINGLE_VALUE_SECTION: &str = "Medications";

/// Repeat count range used by [`ValueRepeat::default`].
pub const DEFAULT_REPEAT_RANGE: RangeInclusive<usize> = 2..=5;

/// Options for extracting data from a parsed document.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Empty sections at or above which ingestion fails
    pub empty_section_threshold: usize,

    /// How key/value projections size their value lists
    pub value_repeat: ValueRepeat,

    /// Section title exempt from value repetition
    pub single_value_section: String,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the empty-section threshold.
    pub fn with_empty_section_threshold(mut self, threshold: usize) -> Self {
        self.empty_section_threshold = threshold;
        self
    }

    /// Set the value repeat policy.
    pub fn with_value_repeat(mut self, repeat: ValueRepeat) -> Self {
        self.value_repeat = repeat;
        self
    }

    /// Always emit single-element value lists.
    pub fn single_values(mut self) -> Self {
        self.value_repeat = ValueRepeat::Fixed(1);
        self
    }

    /// Set the section exempt from repetition.
    pub fn with_single_value_section(mut self, title: impl Into<String>) -> Self {
        self.single_value_section = title.into();
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            empty_section_threshold: EMPTY_SECTION_THRESHOLD,
            value_repeat: ValueRepeat::default(),
            single_value_section: SINGLE_VALUE_SECTION.to_string(),
        }
    }
}

/// How many times a key/value projection repeats each value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueRepeat {
    /// Pick a count uniformly from the range for every row
    Random(RangeInclusive<usize>),
    /// Always use this count
    Fixed(usize),
}

impl ValueRepeat {
    /// Draw the repeat count for one row.
    pub fn count(&self) -> usize {
        match self {
            ValueRepeat::Fixed(n) => *n,
            ValueRepeat::Random(range) if range.is_empty() => *range.start(),
            ValueRepeat::Random(range) => rand::rng().random_range(range.clone()),
        }
    }

    /// Smallest and largest count this policy can produce.
    pub fn bounds(&self) -> (usize, usize) {
        match self {
            ValueRepeat::Fixed(n) => (*n, *n),
            ValueRepeat::Random(range) if range.is_empty() => (*range.start(), *range.start()),
            ValueRepeat::Random(range) => (*range.start(), *range.end()),
        }
    }
}

impl Default for ValueRepeat {
    fn default() -> Self {
        ValueRepeat::Random(DEFAULT_REPEAT_RANGE)
    }
}
