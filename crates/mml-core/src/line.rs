//! Splits one trimmed line into its tag and content.

use crate::error::MmlError;
use crate::tag::Tag;

/// One line's tag, trimmed content and source line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedLine<'a> {
    pub tag: Tag,
    /// Content after the first colon, trimmed. `key|value` splitting
    /// happens later, in the builder.
    pub content: &'a str,
    /// 1-based line number.
    pub line: usize,
}

/// Parse a non-blank, trimmed line.
///
/// Everything before the first colon is the tag and must be non-empty.
/// Unknown tags are rejected unless `allow_unknown` is set, in which case
/// they come back as [`Tag::Unknown`].
pub fn parse_line(
    text: &str,
    line: usize,
    allow_unknown: bool,
) -> Result<ParsedLine<'_>, MmlError> {
    let (raw_tag, raw_content) = match text.split_once(':') {
        Some((tag, content)) if !tag.is_empty() => (tag, content),
        _ => return Err(MmlError::syntax(line, 1, text)),
    };

    let tag_text = raw_tag.trim();
    let tag = Tag::from_prefix(tag_text);
    if !tag.is_known() && !allow_unknown {
        return Err(MmlError::unknown_tag(
            tag_text,
            line,
            "Use a valid MML tag like T, H, P, M, L, etc.",
        ));
    }

    Ok(ParsedLine {
        tag,
        content: raw_content.trim(),
        line,
    })
}
