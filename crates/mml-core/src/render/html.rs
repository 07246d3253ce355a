//! HTML rendering.

use std::fmt::Write;

use crate::document::Document;

/// Render a minimal standalone HTML page.
///
/// Global metadata becomes `<meta>` tags in the head. Sections become
/// `<h2>` headings followed by their content paragraph, one paragraph per
/// link and one `<figure>` per image.
///
/// Section metadata and global links are not rendered.
pub fn to_html(doc: &Document) -> String {
    let mut out = String::with_capacity(256);

    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    if let Some(title) = doc.title() {
        let _ = writeln!(out, "<title>{}</title>", escape_html(title));
    }
    for (key, value) in &doc.metadata {
        let _ = writeln!(
            out,
            "<meta name=\"{}\" content=\"{}\">",
            escape_html(key),
            escape_html(value)
        );
    }
    out.push_str("</head>\n<body>\n");
    if let Some(title) = doc.title() {
        let _ = writeln!(out, "<h1>{}</h1>", escape_html(title));
    }

    for section in &doc.sections {
        let _ = writeln!(out, "<h2>{}</h2>", escape_html(&section.title));

        if let Some(content) = section.content.as_deref().filter(|c| !c.is_empty()) {
            let _ = writeln!(out, "<p>{}</p>", escape_html(content));
        }

        for link in &section.links {
            let _ = writeln!(
                out,
                "<p><a href=\"{}\">{}</a></p>",
                escape_html(&link.url),
                escape_html(&link.text)
            );
        }

        for image in &section.images {
            let description = escape_html(&image.description);
            let _ = write!(
                out,
                "<figure>\n<img src=\"{}\" alt=\"{}\">\n<figcaption>{}</figcaption>\n</figure>\n",
                escape_html(&image.url),
                description,
                description
            );
        }
    }

    out.push_str("</body>\n</html>");
    out
}

/// Escape `& < > " '`. `&` is replaced first so the entities introduced for
/// the other characters are not escaped again.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
