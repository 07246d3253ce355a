//! Plain text rendering.

use crate::document::Document;

/// Render the document as underlined plain text.
///
/// Underlines match the heading's length in characters. Links are listed
/// as `• text: url` bullets. Images and metadata are omitted.
pub fn to_plain_text(doc: &Document) -> String {
    let mut out = String::new();

    if let Some(title) = doc.title() {
        push_heading(&mut out, title, '=');
    }

    for section in &doc.sections {
        push_heading(&mut out, &section.title, '-');

        if let Some(content) = section.content.as_deref().filter(|c| !c.is_empty()) {
            out.push_str(content);
            out.push_str("\n\n");
        }

        for link in &section.links {
            out.push_str(&format!("• {}: {}\n", link.text, link.url));
        }
        if !section.links.is_empty() {
            out.push('\n');
        }
    }

    out.trim().to_string()
}

fn push_heading(out: &mut String, heading: &str, underline: char) {
    out.push_str(heading);
    out.push('\n');
    out.extend(std::iter::repeat(underline).take(heading.chars().count()));
    out.push_str("\n\n");
}
