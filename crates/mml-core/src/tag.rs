//! The closed set of MML line tags.
//!
//! Every physical line starts with a short prefix (`T`, `H`, `IMG`, ...)
//! followed by a colon. This module maps between those prefixes and
//! [`Tag`] values. Lookup is total: any prefix outside the vocabulary
//! resolves to [`Tag::Unknown`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic role of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tag {
    /// Document title (`T`).
    #[serde(rename = "T")]
    Title,
    /// Opens a new section (`H`).
    #[serde(rename = "H")]
    Section,
    /// Section body text (`P`).
    #[serde(rename = "P")]
    Paragraph,
    /// `key|value` metadata entry (`M`).
    #[serde(rename = "M")]
    Metadata,
    /// `text|url` hyperlink (`L`).
    #[serde(rename = "L")]
    Link,
    /// `description|url` image reference (`IMG`).
    #[serde(rename = "IMG")]
    Image,
    /// Code block body (`C`).
    #[serde(rename = "C")]
    Code,
    /// Block quotation body (`Q`).
    #[serde(rename = "Q")]
    Quote,
    /// Configuration payload (`CFG`), kept as an extension entry.
    #[serde(rename = "CFG")]
    Config,
    /// Packet payload (`PKT`), kept as an extension entry.
    #[serde(rename = "PKT")]
    Packet,
    /// Any prefix outside the vocabulary.
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl Tag {
    /// Every known tag, in canonical order. `Unknown` is not included.
    pub const KNOWN: [Tag; 10] = [
        Tag::Title,
        Tag::Section,
        Tag::Paragraph,
        Tag::Metadata,
        Tag::Link,
        Tag::Image,
        Tag::Code,
        Tag::Quote,
        Tag::Config,
        Tag::Packet,
    ];

    /// Canonical uppercase prefix for this tag.
    #[inline]
    pub const fn prefix(self) -> &'static str {
        match self {
            Tag::Title => "T",
            Tag::Section => "H",
            Tag::Paragraph => "P",
            Tag::Metadata => "M",
            Tag::Link => "L",
            Tag::Image => "IMG",
            Tag::Code => "C",
            Tag::Quote => "Q",
            Tag::Config => "CFG",
            Tag::Packet => "PKT",
            Tag::Unknown => "UNKNOWN",
        }
    }

    /// Resolve a prefix, ignoring ASCII case.
    ///
    /// ```rust
    /// use mml_core::Tag;
    ///
    /// assert_eq!(Tag::from_prefix("img"), Tag::Image);
    /// assert_eq!(Tag::from_prefix("XYZ"), Tag::Unknown);
    /// ```
    pub fn from_prefix(prefix: &str) -> Tag {
        Tag::KNOWN
            .into_iter()
            .find(|tag| tag.prefix().eq_ignore_ascii_case(prefix))
            .unwrap_or(Tag::Unknown)
    }

    /// Whether this tag is part of the vocabulary.
    #[inline]
    pub const fn is_known(self) -> bool {
        !matches!(self, Tag::Unknown)
    }

    /// Comma-separated list of the valid prefixes, for error messages.
    pub fn valid_prefixes() -> String {
        Tag::KNOWN
            .iter()
            .map(|tag| tag.prefix())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}
