//! JSON and YAML renderings.
//!
//! Both serialize every document field in declaration order and skip empty
//! collections, absent options and zero counters. [`from_json`] reads the
//! JSON form back into an equal [`Document`].

use crate::document::Document;
use crate::error::RenderError;

/// Pretty-printed JSON with two-space indentation.
pub fn to_json(doc: &Document) -> Result<String, RenderError> {
    Ok(serde_json::to_string_pretty(doc)?)
}

pub fn to_yaml(doc: &Document) -> Result<String, RenderError> {
    Ok(serde_yaml::to_string(doc)?)
}

/// Rebuild a document from its JSON rendering.
pub fn from_json(json: &str) -> Result<Document, RenderError> {
    Ok(serde_json::from_str(json)?)
}

/// Rebuild a document from its YAML rendering.
pub fn from_yaml(yaml: &str) -> Result<Document, RenderError> {
    Ok(serde_yaml::from_str(yaml)?)
}
