//! # MML Core
//!
//! Parser, validator, statistics and renderers for MML, a minimal
//! line-oriented markup language.
//!
//! Every line is `TAG:content`. Sections (`H:`) collect the paragraphs,
//! metadata, links and images that follow them until the next section.
//!
//! ## Quick Start
//!
//! ```rust
//! use mml_core::{render, Parser, ParserOptions};
//!
//! let input = "T:Hello\nH:Intro\nP:World\nL:Home|http://example.com";
//! let parser = Parser::with_options(ParserOptions::default().strict(false));
//! let result = parser.parse(input).unwrap();
//!
//! assert_eq!(result.document.title.as_deref(), Some("Hello"));
//! let html = render::to_html(&result.document);
//! assert!(html.contains("<h2>Intro</h2>"));
//! ```
//!
//! ## Error Recovery
//!
//! In strict mode (the default) the first bad line aborts the parse. With
//! strict mode off, every bad line is recorded and parsing continues:
//!
//! ```rust
//! use mml_core::Parser;
//!
//! let result = Parser::new().parse_with_recovery("T:Doc\nnot a tag line\nH:Intro");
//!
//! assert_eq!(result.document.sections.len(), 1);
//! assert_eq!(result.errors.len(), 1);
//! ```

pub mod builder;
pub mod document;
pub mod error;
pub mod lexer;
pub mod line;
pub mod options;
pub mod parser;
pub mod render;
pub mod stats;
pub mod tag;
pub mod validate;

pub use document::{Document, Extension, Image, Link, Section, Stats};
pub use error::{ErrorCollection, ErrorKind, MmlError, RenderError, Severity, ValidationError};
pub use options::ParserOptions;
pub use parser::{ParseResult, Parser};
pub use render::{CompressionLevel, OutputFormat};
pub use stats::{statistics, DocumentStats};
pub use tag::Tag;
