//! Error types reported while parsing, validating and rendering.

use std::fmt;

use thiserror::Error;

use crate::tag::Tag;

/// How serious an error is.
///
/// Ordered from least to most severe, so `severity >= Severity::High`
/// selects the non-recoverable errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Minor issues such as unknown tags.
    Low,
    /// Malformed metadata, link or image content.
    Medium,
    /// Syntax, structure and limit errors.
    High,
    /// Reserved; not raised by the parser.
    Critical,
}

impl Severity {
    /// Lowercase name used in reports.
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error kinds for categorizing parse errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Line does not match `TAG:content`.
    Syntax,
    /// Tag prefix outside the vocabulary.
    UnknownTag,
    /// Content placed where the document structure does not allow it.
    Structure,
    /// Malformed `key|value` metadata.
    Metadata,
    /// Malformed `text|url` link.
    Link,
    /// Malformed `description|url` image.
    Image,
    /// Section or metadata cap reached.
    LimitExceeded,
    /// Post-parse structural check failed.
    Validation,
}

/// One reported problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MmlError {
    /// Human-readable error message.
    pub message: String,
    /// 1-based source line, if known.
    pub line: Option<usize>,
    /// 1-based source column, if known.
    pub column: Option<usize>,
    /// What was found at the error location.
    pub found: Option<String>,
    /// What was expected instead.
    pub expected: Option<String>,
    /// How to fix it.
    pub suggestion: Option<String>,
    pub severity: Severity,
    /// Free-text detail such as the offending key and value.
    pub context: Option<String>,
    pub kind: ErrorKind,
}

impl MmlError {
    /// Create a new error with no location or details.
    pub fn new(kind: ErrorKind, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
            column: None,
            found: None,
            expected: None,
            suggestion: None,
            severity,
            context: None,
            kind,
        }
    }

    /// Create an error for a line that is not `TAG:content`.
    pub fn syntax(line: usize, column: usize, found: &str) -> Self {
        Self::new(ErrorKind::Syntax, Severity::High, "syntax error")
            .at(line, column)
            .with_found(found)
            .with_expected("TAG:content")
            .with_suggestion("Use format 'TAG:content' where TAG is a valid MML tag")
    }

    /// Create an error for a prefix outside the vocabulary.
    pub fn unknown_tag(tag: &str, line: usize, suggestion: &str) -> Self {
        Self::new(
            ErrorKind::UnknownTag,
            Severity::Low,
            format!("unknown tag '{}'", tag),
        )
        .at_line(line)
        .with_found(tag)
        .with_expected(format!("valid MML tag ({})", Tag::valid_prefixes()))
        .with_suggestion(suggestion)
    }

    /// Create an error for content that violates document structure.
    pub fn structure(message: &str, suggestion: &str) -> Self {
        Self::new(ErrorKind::Structure, Severity::High, message).with_suggestion(suggestion)
    }

    /// Create an error for malformed metadata.
    pub fn metadata(key: &str, value: &str, reason: &str, suggestion: &str) -> Self {
        Self::new(
            ErrorKind::Metadata,
            Severity::Medium,
            format!("metadata error for key '{}': {}", key, reason),
        )
        .with_context(format!("key='{}', value='{}'", key, value))
        .with_suggestion(suggestion)
    }

    /// Create an error for a malformed link.
    pub fn link(text: &str, url: &str, reason: &str, suggestion: &str) -> Self {
        Self::new(
            ErrorKind::Link,
            Severity::Medium,
            format!("link error: {}", reason),
        )
        .with_context(format!("text='{}', url='{}'", text, url))
        .with_suggestion(suggestion)
    }

    /// Create an error for a malformed image.
    pub fn image(description: &str, url: &str, reason: &str, suggestion: &str) -> Self {
        Self::new(
            ErrorKind::Image,
            Severity::Medium,
            format!("image error: {}", reason),
        )
        .with_context(format!("description='{}', url='{}'", description, url))
        .with_suggestion(suggestion)
    }

    /// Create an error for an exceeded section or metadata cap.
    pub fn limit_exceeded(scope: &str, current: usize, maximum: usize, suggestion: &str) -> Self {
        Self::new(
            ErrorKind::LimitExceeded,
            Severity::High,
            format!(
                "{} limit exceeded: {} used, {} maximum",
                scope, current, maximum
            ),
        )
        .with_suggestion(suggestion)
    }

    /// Set line and column.
    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Set the line only.
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_found(mut self, found: impl Into<String>) -> Self {
        self.found = Some(found.into());
        self
    }

    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Low and medium errors are recoverable; high and critical are not.
    ///
    /// This is a classification only. Strict mode aborts on any error.
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(self.severity, Severity::Low | Severity::Medium)
    }
}

impl fmt::Display for MmlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MML error")?;
        match (self.line, self.column) {
            (Some(line), Some(column)) => write!(f, " at line {}, column {}", line, column)?,
            (Some(line), None) => write!(f, " at line {}", line)?,
            (None, Some(column)) => write!(f, " at column {}", column)?,
            (None, None) => {}
        }
        write!(f, ": {}", self.message)?;

        match (&self.found, &self.expected) {
            (Some(found), Some(expected)) => {
                write!(f, " (found '{}', expected '{}')", found, expected)?
            }
            (Some(found), None) => write!(f, " (found '{}')", found)?,
            (None, Some(expected)) => write!(f, " (expected '{}')", expected)?,
            (None, None) => {}
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, ". {}", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for MmlError {}

/// Ordered collection of errors from one parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorCollection {
    errors: Vec<MmlError>,
}

impl ErrorCollection {
    /// Create an empty error collection.
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Add an error to the collection.
    pub fn push(&mut self, error: MmlError) {
        self.errors.push(error);
    }

    /// Check if no errors were collected.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Check if any errors were collected.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Get the number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterate over the errors in the order they were reported.
    pub fn iter(&self) -> impl Iterator<Item = &MmlError> {
        self.errors.iter()
    }

    /// The first reported error.
    pub fn first(&self) -> Option<&MmlError> {
        self.errors.first()
    }

    /// Check if any critical errors exist.
    pub fn has_critical(&self) -> bool {
        self.errors
            .iter()
            .any(|e| e.severity == Severity::Critical)
    }

    /// Errors at or above `minimum` severity, in report order.
    pub fn filter_by_severity(&self, minimum: Severity) -> Vec<&MmlError> {
        self.errors
            .iter()
            .filter(|e| e.severity >= minimum)
            .collect()
    }

    /// The low and medium severity errors, in report order.
    pub fn recoverable(&self) -> Vec<&MmlError> {
        self.errors.iter().filter(|e| e.is_recoverable()).collect()
    }

    /// Numbered multi-line report with severities and suggestions.
    pub fn report(&self) -> String {
        if self.errors.is_empty() {
            return "No errors".to_string();
        }

        let mut out = format!("{} errors found:\n", self.errors.len());
        for (i, error) in self.errors.iter().enumerate() {
            out.push_str(&format!(
                "{}. {} (severity: {})\n",
                i + 1,
                error,
                error.severity
            ));
            if let Some(suggestion) = &error.suggestion {
                out.push_str(&format!("   Suggestion: {}\n", suggestion));
            }
        }
        out
    }
}

impl fmt::Display for ErrorCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            return f.write_str("no errors");
        }
        write!(f, "{} errors: ", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorCollection {}

impl From<MmlError> for ErrorCollection {
    fn from(error: MmlError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl IntoIterator for ErrorCollection {
    type Item = MmlError;
    type IntoIter = std::vec::IntoIter<MmlError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorCollection {
    type Item = &'a MmlError;
    type IntoIter = std::slice::Iter<'a, MmlError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Structural problem found by [`crate::validate::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("document is empty")]
    EmptyDocument,
    /// `index` is 1-based.
    #[error("section {index} has no title")]
    UntitledSection { index: usize },
}

impl ValidationError {
    /// The same failure expressed as an [`MmlError`] of kind `Validation`.
    pub fn to_mml_error(&self) -> MmlError {
        let suggestion = match self {
            ValidationError::EmptyDocument => "Add a title, a section or global metadata",
            ValidationError::UntitledSection { .. } => "Give every section a non-empty title",
        };
        MmlError::new(ErrorKind::Validation, Severity::Medium, self.to_string())
            .with_suggestion(suggestion)
    }
}

/// Internal fault while producing a structured-data rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
