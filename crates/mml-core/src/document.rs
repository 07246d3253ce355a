//! Document model produced by the parser.
//!
//! A [`Document`] owns its sections, links and images. It is built line by
//! line by [`crate::builder::DocumentBuilder`] and is read-only afterwards:
//! the validator, renderers and statistics only borrow it.
//!
//! Metadata maps are `BTreeMap`s so every rendering iterates keys in the
//! same order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::tag::Tag;

/// Title given to the section created for images that appear before any
/// section.
pub const MEDIA_SECTION_TITLE: &str = "Media";

/// A parsed MML document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Metadata declared before any section.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<Section>,
    /// Links declared before any section.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    /// `CFG` and `PKT` payloads, in source order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<Extension>,
    #[serde(skip_serializing_if = "Stats::is_empty")]
    pub stats: Stats,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// The title, treating an empty `T:` line as no title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }

    /// Look up an extension payload by tag and source line.
    pub fn extension(&self, tag: Tag, line: usize) -> Option<&str> {
        self.extensions
            .iter()
            .find(|e| e.tag == tag && e.line == line)
            .map(|e| e.content.as_str())
    }

    /// Check the completed document's structure.
    pub fn validate(&self) -> Result<(), ValidationError> {
        crate::validate::validate(self)
    }

    /// Short count-based description.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        if let Some(title) = self.title() {
            out.push_str(&format!("Title: {}\n", title));
        }
        out.push_str(&format!("Sections: {}\n", self.sections.len()));
        out.push_str(&format!("Metadata: {}\n", self.metadata.len()));
        out.push_str(&format!("Links: {}\n", self.links.len()));
        out
    }
}

/// A titled container opened by an `H:` line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Section {
    pub title: String,
    /// Body text. The last paragraph, code or quote line wins.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<Image>,
}

impl Section {
    /// Create a new section with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub text: String,
    pub url: String,
}

impl Link {
    pub fn new(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Alt text and caption.
    pub description: String,
    pub url: String,
}

impl Image {
    pub fn new(description: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            url: url.into(),
        }
    }
}

/// Payload of a tag with no structural meaning (`CFG`, `PKT`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extension {
    pub tag: Tag,
    /// 1-based source line. Unique per tag.
    pub line: usize,
    pub content: String,
}

/// Line counters and optional timing for one parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    /// Physical lines seen, blank lines included.
    #[serde(skip_serializing_if = "is_zero")]
    pub total_lines: usize,
    /// Lines applied to the document without error.
    #[serde(skip_serializing_if = "is_zero")]
    pub parsed_lines: usize,
    /// Lines that produced an error.
    #[serde(skip_serializing_if = "is_zero")]
    pub error_lines: usize,
    /// Only set when timing was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_time_ms: Option<u64>,
}

impl Stats {
    /// True when every counter is zero and no time was recorded.
    pub fn is_empty(&self) -> bool {
        *self == Stats::default()
    }
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}
