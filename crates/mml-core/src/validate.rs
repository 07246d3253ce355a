//! Structural checks on a completed document.

use crate::document::Document;
use crate::error::ValidationError;

/// Fail if the document has no title, no sections, no global metadata and
/// no extension payloads, or if any section has an empty title.
pub fn validate(doc: &Document) -> Result<(), ValidationError> {
    if doc.title().is_none()
        && doc.sections.is_empty()
        && doc.metadata.is_empty()
        && doc.extensions.is_empty()
    {
        return Err(ValidationError::EmptyDocument);
    }

    if let Some(index) = doc.sections.iter().position(|s| s.title.is_empty()) {
        return Err(ValidationError::UntitledSection { index: index + 1 });
    }

    Ok(())
}
