//! Parser configuration.

use serde::{Deserialize, Serialize};

/// Limits and policy flags for a [`crate::Parser`].
///
/// Missing fields take their defaults when deserialized, so a partial
/// options file such as `{"strict_mode": false}` is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Maximum number of sections in a document.
    pub max_sections: usize,
    /// Maximum metadata entries per scope (global, or one section).
    pub max_metadata: usize,
    /// Abort on the first error instead of collecting them.
    pub strict_mode: bool,
    /// Record the parse duration in [`crate::document::Stats`].
    pub measure_time: bool,
    /// Accept unknown tags and paragraphs outside a section.
    pub allow_unknown: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_sections: 100,
            max_metadata: 200,
            strict_mode: true,
            measure_time: false,
            allow_unknown: false,
        }
    }
}

impl ParserOptions {
    pub fn with_max_sections(mut self, max: usize) -> Self {
        self.max_sections = max;
        self
    }

    pub fn with_max_metadata(mut self, max: usize) -> Self {
        self.max_metadata = max;
        self
    }

    /// Enable or disable strict mode.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict_mode = strict;
        self
    }

    pub fn measure_time(mut self, measure: bool) -> Self {
        self.measure_time = measure;
        self
    }

    pub fn allow_unknown(mut self, allow: bool) -> Self {
        self.allow_unknown = allow;
        self
    }
}
