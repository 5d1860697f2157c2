//! Parsing options and configuration.

/// Options for parsing CCDA documents.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Whether a DOCTYPE declaration is accepted (internal entities only)
    pub allow_dtd: bool,

    /// Maximum number of XML nodes (`u32::MAX` = unlimited)
    pub nodes_limit: u32,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (accept documents outside the CCDA namespaces).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Allow or reject DOCTYPE declarations.
    pub fn with_dtd(mut self, allow: bool) -> Self {
        self.allow_dtd = allow;
        self
    }

    /// Set the node limit.
    pub fn with_nodes_limit(mut self, limit: u32) -> Self {
        self.nodes_limit = limit;
        self
    }

    pub(crate) fn to_roxmltree(&self) -> roxmltree::ParsingOptions {
        roxmltree::ParsingOptions {
            allow_dtd: self.allow_dtd,
            nodes_limit: self.nodes_limit,
            ..roxmltree::ParsingOptions::default()
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            allow_dtd: true,
            nodes_limit: u32::MAX,
        }
    }
}

/// Error handling mode during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Reject documents that do not use the CCDA namespaces
    #[default]
    Strict,
    /// Log namespace problems and continue
    Lenient,
}
