//! Line-by-line MML parser.
//!
//! Each non-blank physical line is split by [`parse_line`] and folded into
//! the document by [`DocumentBuilder`]. In strict mode the first error
//! aborts the parse; otherwise errors are collected and parsing continues.

use std::time::Instant;

use tracing::debug;

use crate::builder::DocumentBuilder;
use crate::document::Document;
use crate::error::{ErrorCollection, MmlError};
use crate::lexer::Lexer;
use crate::line::parse_line;
use crate::options::ParserOptions;

/// Result type for parsing that includes recovered errors.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    /// The parsed document, reflecting every line that succeeded.
    pub document: Document,
    /// Errors encountered during parsing.
    pub errors: ErrorCollection,
}

impl ParseResult {
    /// Check if parsing completed without errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Check if any critical errors occurred.
    pub fn has_critical_errors(&self) -> bool {
        self.errors.has_critical()
    }
}

/// MML parser. Configuration is fixed at construction, so one parser can be
/// shared and used for any number of parses.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    options: ParserOptions,
}

impl Parser {
    /// Create a parser with default options (strict).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom options.
    pub fn with_options(options: ParserOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parse the input according to the configured strict mode.
    ///
    /// Strict mode returns `Err` with the single error that stopped the
    /// parse. Non-strict mode always returns a document, alongside any
    /// errors that were recorded.
    pub fn parse(&self, input: &str) -> Result<ParseResult, ErrorCollection> {
        self.parse_internal(input, self.options.strict_mode)
    }

    /// Parse with error recovery, regardless of the strict-mode option.
    pub fn parse_with_recovery(&self, input: &str) -> ParseResult {
        match self.parse_internal(input, false) {
            Ok(result) => result,
            // Only strict parses return early.
            Err(errors) => ParseResult {
                document: Document::new(),
                errors,
            },
        }
    }

    /// Check every non-blank line's `TAG:content` syntax without building a
    /// document.
    pub fn validate_syntax(&self, input: &str) -> Result<(), ErrorCollection> {
        let mut errors = ErrorCollection::new();

        for line in Lexer::new(input) {
            if line.is_blank() {
                continue;
            }
            if let Err(error) = parse_line(line.trimmed(), line.number, self.options.allow_unknown)
            {
                errors.push(error);
                if self.options.strict_mode {
                    break;
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn parse_internal(&self, input: &str, strict: bool) -> Result<ParseResult, ErrorCollection> {
        let start = Instant::now();
        let mut lexer = Lexer::new(input);
        let mut builder = DocumentBuilder::new(&self.options);
        let mut errors = ErrorCollection::new();

        for line in lexer.by_ref() {
            if line.is_blank() {
                continue;
            }

            let applied = parse_line(line.trimmed(), line.number, self.options.allow_unknown)
                .and_then(|parsed| builder.apply(&parsed));

            if let Err(error) = applied {
                let error = stamp_line(error, line.number);
                debug!(line = line.number, %error, "rejected line");
                errors.push(error);
                if strict {
                    return Err(errors);
                }
            }
        }

        let mut document = builder.finish();
        document.stats.total_lines = lexer.lines_seen();
        document.stats.error_lines = errors.len();
        if self.options.measure_time {
            document.stats.parse_time_ms = Some(start.elapsed().as_millis() as u64);
        }

        debug!(
            sections = document.sections.len(),
            parsed = document.stats.parsed_lines,
            total = document.stats.total_lines,
            errors = errors.len(),
            "parse complete"
        );

        Ok(ParseResult { document, errors })
    }
}

fn stamp_line(error: MmlError, line: usize) -> MmlError {
    if error.line.is_some() {
        error
    } else {
        error.at_line(line)
    }
}
