//! Folds parsed lines into a [`Document`].
//!
//! The builder tracks the current section as an index into
//! `Document::sections`. Title lines write to the document; every other
//! tag targets the current section when there is one and the document
//! otherwise. A failed line leaves the document exactly as it was before
//! that line.

use tracing::trace;

use crate::document::{Document, Extension, Image, Link, Section, MEDIA_SECTION_TITLE};
use crate::error::MmlError;
use crate::line::ParsedLine;
use crate::options::ParserOptions;
use crate::tag::Tag;

/// Incrementally builds one document.
pub struct DocumentBuilder<'o> {
    options: &'o ParserOptions,
    document: Document,
    /// Index of the section opened by the last `H:` line.
    current: Option<usize>,
}

impl<'o> DocumentBuilder<'o> {
    /// Create a builder for an empty document.
    pub fn new(options: &'o ParserOptions) -> Self {
        Self {
            options,
            document: Document::new(),
            current: None,
        }
    }

    /// The document built so far.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Index of the current section, if one is open.
    pub fn current_section(&self) -> Option<usize> {
        self.current
    }

    /// Apply one line. On success the parsed-line counter is incremented.
    pub fn apply(&mut self, line: &ParsedLine<'_>) -> Result<(), MmlError> {
        trace!(tag = %line.tag, line = line.line, "applying line");

        match line.tag {
            Tag::Title => self.document.title = Some(line.content.to_string()),
            Tag::Section => self.open_section(line.content)?,
            Tag::Paragraph => self.apply_paragraph(line.content)?,
            Tag::Metadata => self.apply_metadata(line.content)?,
            Tag::Link => self.apply_link(line.content)?,
            Tag::Image => self.apply_image(line.content)?,
            Tag::Code => {
                if let Some(section) = self.current_mut() {
                    section.content = Some(format!("```\n{}\n```", line.content));
                }
            }
            Tag::Quote => {
                if let Some(section) = self.current_mut() {
                    section.content = Some(format!("> {}", line.content));
                }
            }
            Tag::Config | Tag::Packet => self.document.extensions.push(Extension {
                tag: line.tag,
                line: line.line,
                content: line.content.to_string(),
            }),
            Tag::Unknown => {
                if !self.options.allow_unknown {
                    return Err(MmlError::unknown_tag(
                        line.tag.prefix(),
                        line.line,
                        "Enable allow_unknown to ignore unknown tags",
                    ));
                }
            }
        }

        self.document.stats.parsed_lines += 1;
        Ok(())
    }

    /// Finish building and hand out the document.
    pub fn finish(self) -> Document {
        self.document
    }

    fn current_mut(&mut self) -> Option<&mut Section> {
        let index = self.current?;
        self.document.sections.get_mut(index)
    }

    fn check_section_limit(&self) -> Result<(), MmlError> {
        let count = self.document.sections.len();
        if count >= self.options.max_sections {
            return Err(MmlError::limit_exceeded(
                "sections",
                count,
                self.options.max_sections,
                "Split document into multiple files or increase section limit",
            ));
        }
        Ok(())
    }

    fn open_section(&mut self, title: &str) -> Result<(), MmlError> {
        self.check_section_limit()?;
        self.document.sections.push(Section::new(title));
        self.current = Some(self.document.sections.len() - 1);
        Ok(())
    }

    fn apply_paragraph(&mut self, content: &str) -> Result<(), MmlError> {
        let allow_unknown = self.options.allow_unknown;
        match self.current_mut() {
            Some(section) => {
                section.content = (!content.is_empty()).then(|| content.to_string());
                Ok(())
            }
            None if allow_unknown => Ok(()),
            None => Err(MmlError::structure(
                "paragraph without section",
                "Add a section (H:) before paragraphs or enable allow_unknown",
            )),
        }
    }

    fn apply_metadata(&mut self, content: &str) -> Result<(), MmlError> {
        let (key, value) = content.split_once('|').ok_or_else(|| {
            MmlError::metadata(content, "", "invalid format", "Use format 'key|value' for metadata")
        })?;
        let key = key.trim();
        let value = value.trim();

        if key.is_empty() {
            return Err(MmlError::metadata(
                key,
                value,
                "empty key",
                "Provide a non-empty key",
            ));
        }

        let max = self.options.max_metadata;
        let current = self.current;
        let (scope, metadata) = match current {
            Some(index) => (
                "section metadata",
                &mut self.document.sections[index].metadata,
            ),
            None => ("global metadata", &mut self.document.metadata),
        };

        if metadata.len() >= max {
            return Err(MmlError::limit_exceeded(
                scope,
                metadata.len(),
                max,
                "Reduce metadata or increase limit",
            ));
        }

        metadata.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn apply_link(&mut self, content: &str) -> Result<(), MmlError> {
        let (text, url) = content.split_once('|').ok_or_else(|| {
            MmlError::link(content, "", "invalid format", "Use format 'text|url' for links")
        })?;
        let (text, url) = (text.trim(), url.trim());

        if text.is_empty() {
            return Err(MmlError::link(text, url, "empty text", "Provide link text"));
        }
        if url.is_empty() {
            return Err(MmlError::link(text, url, "empty URL", "Provide link URL"));
        }

        let link = Link::new(text, url);
        match self.current_mut() {
            Some(section) => section.links.push(link),
            None => self.document.links.push(link),
        }
        Ok(())
    }

    fn apply_image(&mut self, content: &str) -> Result<(), MmlError> {
        let (description, url) = content.split_once('|').ok_or_else(|| {
            MmlError::image(
                content,
                "",
                "invalid format",
                "Use format 'description|url' for images",
            )
        })?;
        let (description, url) = (description.trim(), url.trim());

        if description.is_empty() {
            return Err(MmlError::image(
                description,
                url,
                "empty description",
                "Provide image description",
            ));
        }
        if url.is_empty() {
            return Err(MmlError::image(
                description,
                url,
                "empty URL",
                "Provide image URL",
            ));
        }

        let image = Image::new(description, url);
        if let Some(section) = self.current_mut() {
            section.images.push(image);
            return Ok(());
        }

        // No open section: collect into a trailing "Media" section. It does
        // not become the current section.
        let reuse = self
            .document
            .sections
            .last()
            .is_some_and(|s| s.title == MEDIA_SECTION_TITLE);
        if !reuse {
            self.check_section_limit()?;
            self.document.sections.push(Section::new(MEDIA_SECTION_TITLE));
        }
        if let Some(media) = self.document.sections.last_mut() {
            media.images.push(image);
        }
        Ok(())
    }
}
