//! Aggregate counts for reporting.

use std::fmt;

use crate::document::Document;

/// Counts derived from a document plus the parse stats stored on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentStats {
    pub has_title: bool,
    pub sections: usize,
    /// Global plus per-section metadata entries.
    pub metadata: usize,
    /// Global plus per-section links.
    pub links: usize,
    pub images: usize,
    pub extensions: usize,
    pub parsed_lines: usize,
    pub total_lines: usize,
    pub error_lines: usize,
    pub parse_time_ms: Option<u64>,
}

impl DocumentStats {
    pub fn from_document(doc: &Document) -> Self {
        let mut stats = Self {
            has_title: doc.title().is_some(),
            sections: doc.sections.len(),
            metadata: doc.metadata.len(),
            links: doc.links.len(),
            images: 0,
            extensions: doc.extensions.len(),
            parsed_lines: doc.stats.parsed_lines,
            total_lines: doc.stats.total_lines,
            error_lines: doc.stats.error_lines,
            parse_time_ms: doc.stats.parse_time_ms,
        };

        for section in &doc.sections {
            stats.metadata += section.metadata.len();
            stats.links += section.links.len();
            stats.images += section.images.len();
        }

        stats
    }
}

impl fmt::Display for DocumentStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Statistics:")?;
        writeln!(f, "  Title: {}", if self.has_title { "✅" } else { "❌" })?;
        writeln!(f, "  Sections: {}", self.sections)?;
        writeln!(f, "  Total Metadata: {}", self.metadata)?;
        writeln!(f, "  Total Links: {}", self.links)?;
        writeln!(f, "  Total Images: {}", self.images)?;
        writeln!(f, "  Extensions: {}", self.extensions)?;
        writeln!(f, "  Parsed Lines: {}/{}", self.parsed_lines, self.total_lines)?;
        writeln!(f, "  Errors: {}", self.error_lines)?;
        write!(f, "  Parse Time: {}ms", self.parse_time_ms.unwrap_or(0))
    }
}

/// Fixed-format statistics report for `doc`.
pub fn statistics(doc: &Document) -> String {
    DocumentStats::from_document(doc).to_string()
}
