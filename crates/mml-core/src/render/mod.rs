//! Output renderers.
//!
//! Every renderer is a pure function of a completed [`Document`]; rendering
//! the same document twice yields the same output.

pub mod compress;
pub mod html;
pub mod structured;
pub mod text;

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::document::Document;
use crate::error::RenderError;

pub use compress::{compress, CompressionLevel};
pub use html::{escape_html, to_html};
pub use structured::{from_json, from_yaml, to_json, to_yaml};
pub use text::to_plain_text;

/// Output formats the document can be rendered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Html,
    Json,
    Yaml,
    Text,
    /// Compressed MMLC at [`CompressionLevel::Basic`].
    Mmlc,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 5] = [
        OutputFormat::Html,
        OutputFormat::Json,
        OutputFormat::Yaml,
        OutputFormat::Text,
        OutputFormat::Mmlc,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Text => "text",
            OutputFormat::Mmlc => "mmlc",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputFormat::ALL
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "invalid format '{}'. Valid formats: html, json, yaml, text, mmlc",
                    s
                )
            })
    }
}

/// Render `doc` in the given format. Only the structured formats can fail.
pub fn render(doc: &Document, format: OutputFormat) -> Result<String, RenderError> {
    debug!(%format, sections = doc.sections.len(), "rendering document");
    match format {
        OutputFormat::Html => Ok(to_html(doc)),
        OutputFormat::Json => to_json(doc),
        OutputFormat::Yaml => to_yaml(doc),
        OutputFormat::Text => Ok(to_plain_text(doc)),
        OutputFormat::Mmlc => Ok(compress(doc, CompressionLevel::Basic)),
    }
}
