//! MMLC compressed re-encoding.
//!
//! `None` re-emits canonical tag syntax for the title, metadata and each
//! section's title, metadata and content. Links, images and extension
//! payloads are not emitted in either mode.
//!
//! `Basic` replaces tag prefixes with digits (title `1`, section `2`,
//! metadata `3`, paragraph `4`) and applies [`DICTIONARY`] to the title,
//! metadata values, section titles and section content. The substitutions
//! are literal substring replacements applied in dictionary order, so an
//! entry can rewrite the output of an earlier one and words are replaced
//! even inside longer words. The transform is one-way.

use std::fmt;
use std::str::FromStr;

use crate::document::Document;

/// Word replacements applied by [`CompressionLevel::Basic`], in order.
pub const DICTIONARY: &[(&str, &str)] = &[
    ("Rapport", "R"),
    ("Urgent", "U"),
    ("Critique", "C"),
    ("Patient", "P1"),
    ("Victime", "V"),
    ("Secteur", "S"),
    ("Évacuation", "E"),
    ("Médical", "M"),
    ("Stable", "S1"),
    ("Alerte", "A"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
    /// Canonical MML, no substitutions.
    None,
    /// Numeric tags plus dictionary substitution.
    #[default]
    Basic,
}

impl FromStr for CompressionLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(CompressionLevel::None),
            "basic" => Ok(CompressionLevel::Basic),
            other => Err(format!(
                "invalid compression level '{}'. Valid levels: none, basic",
                other
            )),
        }
    }
}

impl fmt::Display for CompressionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CompressionLevel::None => "none",
            CompressionLevel::Basic => "basic",
        })
    }
}

/// Tag prefixes used by one compression level.
struct Prefixes {
    title: &'static str,
    section: &'static str,
    metadata: &'static str,
    paragraph: &'static str,
}

const CANONICAL: Prefixes = Prefixes {
    title: "T",
    section: "H",
    metadata: "M",
    paragraph: "P",
};

const NUMERIC: Prefixes = Prefixes {
    title: "1",
    section: "2",
    metadata: "3",
    paragraph: "4",
};

/// Encode the document at the given level. Output is trimmed.
pub fn compress(doc: &Document, level: CompressionLevel) -> String {
    let prefixes = match level {
        CompressionLevel::None => &CANONICAL,
        CompressionLevel::Basic => &NUMERIC,
    };
    let rewrite: fn(&str) -> String = match level {
        CompressionLevel::None => keep,
        CompressionLevel::Basic => replace_words,
    };

    let mut out = String::new();
    let mut emit = |prefix: &str, body: String| {
        out.push_str(prefix);
        out.push(':');
        out.push_str(&body);
        out.push('\n');
    };

    if let Some(title) = doc.title() {
        emit(prefixes.title, rewrite(title));
    }

    for (key, value) in &doc.metadata {
        emit(prefixes.metadata, format!("{}|{}", key, rewrite(value)));
    }

    for section in &doc.sections {
        emit(prefixes.section, rewrite(&section.title));

        for (key, value) in &section.metadata {
            emit(prefixes.metadata, format!("{}|{}", key, rewrite(value)));
        }

        if let Some(content) = section.content.as_deref().filter(|c| !c.is_empty()) {
            emit(prefixes.paragraph, rewrite(content));
        }
    }

    out.trim().to_string()
}

fn keep(text: &str) -> String {
    text.to_string()
}

/// Apply every [`DICTIONARY`] substitution in order.
pub fn replace_words(text: &str) -> String {
    DICTIONARY
        .iter()
        .fold(text.to_string(), |acc, (word, code)| acc.replace(word, code))
}

/// Percentage size reduction from `original` to `compressed`, in bytes.
/// Returns `None` for empty input.
pub fn ratio(original: &str, compressed: &str) -> Option<f64> {
    if original.is_empty() {
        return None;
    }
    let before = original.len() as f64;
    Some((before - compressed.len() as f64) / before * 100.0)
}
