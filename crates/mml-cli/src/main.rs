//! MML CLI - Convert, validate, inspect and compress MML documents
//!
//! Usage:
//!   mml [OPTIONS] <COMMAND> [INPUT]
//!
//! Commands:
//!   convert   Render to html, json, yaml, text or mmlc (default html)
//!   validate  Check line syntax and document structure
//!   stats     Show document statistics
//!   compress  Emit the MMLC encoding

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser as ClapParser, Subcommand};
use mml_core::render::{self, compress, CompressionLevel, OutputFormat};
use mml_core::{statistics, Document, ParseResult, Parser, ParserOptions};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, ClapParser)]
#[command(name = "mml", version, about = "MML document converter and validator")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    parse: ParseFlags,

    /// Show detailed output and debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse and render the document
    Convert {
        #[command(flatten)]
        files: IoArgs,
        /// Output format: html, json, yaml, text, mmlc
        #[arg(short, long, default_value_t = OutputFormat::Html)]
        format: OutputFormat,
    },
    /// Check line syntax and document structure
    Validate {
        /// Input file (`-` or absent reads stdin)
        input: Option<PathBuf>,
    },
    /// Show document statistics
    Stats {
        /// Input file (`-` or absent reads stdin)
        input: Option<PathBuf>,
    },
    /// Emit the compressed MMLC encoding
    Compress {
        #[command(flatten)]
        files: IoArgs,
        /// Compression level: none, basic
        #[arg(short, long, default_value_t = CompressionLevel::Basic)]
        level: CompressionLevel,
    },
}

#[derive(Debug, Args)]
struct IoArgs {
    /// Input file (`-` or absent reads stdin)
    input: Option<PathBuf>,
    /// Output file (`-` or absent writes stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct ParseFlags {
    /// JSON file with parser options
    #[arg(long, global = true)]
    options: Option<PathBuf>,
    /// Abort on the first error
    #[arg(long, global = true, conflicts_with = "lenient")]
    strict: bool,
    /// Collect errors and keep parsing (default)
    #[arg(long, global = true)]
    lenient: bool,
    /// Accept unknown tags and paragraphs outside sections
    #[arg(long, global = true)]
    allow_unknown: bool,
    #[arg(long, global = true)]
    max_sections: Option<usize>,
    #[arg(long, global = true)]
    max_metadata: Option<usize>,
    /// Record parse time in the statistics
    #[arg(long, global = true)]
    time: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose, directives.as_deref()))
        .with_writer(io::stderr)
        .init();
}

/// `RUST_LOG` directives win when set and valid; otherwise `warn`, or
/// `debug` with `--verbose`.
fn log_filter(verbose: bool, directives: Option<&str>) -> EnvFilter {
    let fallback = if verbose { "debug" } else { "warn" };
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(fallback))
}

fn run(cli: Cli) -> Result<()> {
    let options = build_options(&cli.parse, cli.verbose)?;
    debug!(?options, "parser options");
    let parser = Parser::with_options(options);

    match cli.command {
        Command::Convert { files, format } => cmd_convert(&parser, &files, format, cli.verbose),
        Command::Validate { input } => cmd_validate(&parser, input.as_deref(), cli.verbose),
        Command::Stats { input } => cmd_stats(&parser, input.as_deref(), cli.verbose),
        Command::Compress { files, level } => cmd_compress(&parser, &files, level, cli.verbose),
    }
}

fn cli_defaults() -> ParserOptions {
    ParserOptions::default().strict(false)
}

/// Fields present in the file replace the CLI defaults; missing fields keep
/// them, so a partial file stays lenient.
fn options_from_json(text: &str) -> Result<ParserOptions> {
    let overrides: serde_json::Map<String, serde_json::Value> = serde_json::from_str(text)?;
    let mut merged = serde_json::to_value(cli_defaults())?;
    if let serde_json::Value::Object(fields) = &mut merged {
        fields.extend(overrides);
    }
    Ok(serde_json::from_value(merged)?)
}

/// Options file first, then flag overrides. The CLI defaults to lenient
/// parsing unless the options file or `--strict` says otherwise.
fn build_options(flags: &ParseFlags, verbose: bool) -> Result<ParserOptions> {
    let mut options = match &flags.options {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read options '{}'", path.display()))?;
            options_from_json(&text)
                .with_context(|| format!("invalid options file '{}'", path.display()))?
        }
        None => cli_defaults(),
    };

    if flags.strict {
        options.strict_mode = true;
    }
    if flags.lenient {
        options.strict_mode = false;
    }
    if flags.allow_unknown {
        options.allow_unknown = true;
    }
    if let Some(max) = flags.max_sections {
        options.max_sections = max;
    }
    if let Some(max) = flags.max_metadata {
        options.max_metadata = max;
    }
    options.measure_time |= flags.time || verbose;

    Ok(options)
}

// =============================================================================
// Input / Output
// =============================================================================

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => fs::read_to_string(p)
            .with_context(|| format!("failed to read '{}'", p.display())),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(p) if p != Path::new("-") => {
            fs::write(p, content).with_context(|| format!("failed to write '{}'", p.display()))
        }
        _ => {
            print!("{}", content);
            Ok(())
        }
    }
}

fn describe_input(input: &str) -> String {
    format!(
        "{} lines, {} characters",
        input.lines().count(),
        input.chars().count()
    )
}

/// Parse, reporting recovered errors as warnings.
fn parse_document(parser: &Parser, input: &str) -> Result<Document> {
    let result = parser
        .parse(input)
        .map_err(|errors| anyhow::anyhow!("parsing failed: {}", errors))?;
    accept(result)
}

/// Critical errors are fatal even when parsing leniently.
fn accept(result: ParseResult) -> Result<Document> {
    if result.has_critical_errors() {
        bail!("parsing failed: {}", result.errors);
    }
    for error in &result.errors {
        eprintln!("warning: {}", error);
    }
    Ok(result.document)
}

/// Structural check, reported in the same form as parse errors.
fn check_structure(doc: &Document) -> Result<()> {
    doc.validate().map_err(|e| anyhow::anyhow!("{}", e.to_mml_error()))
}

// =============================================================================
// Convert Command
// =============================================================================

fn cmd_convert(parser: &Parser, files: &IoArgs, format: OutputFormat, verbose: bool) -> Result<()> {
    let input = read_input(files.input.as_deref())?;
    let doc = parse_document(parser, &input)?;

    let output = render::render(&doc, format)
        .with_context(|| format!("{} conversion failed", format))?;
    write_output(files.output.as_deref(), &output)?;

    if verbose {
        info!(format = %format, "converted {}", describe_input(&input));
        if let Some(path) = &files.output {
            eprintln!("File written: {}", path.display());
        }
    }
    Ok(())
}

// =============================================================================
// Validate Command
// =============================================================================

fn cmd_validate(parser: &Parser, path: Option<&Path>, verbose: bool) -> Result<()> {
    let input = read_input(path)?;

    if let Err(errors) = parser.validate_syntax(&input) {
        if verbose {
            eprint!("{}", errors.report());
        } else {
            eprintln!("Invalid: {} error(s) found", errors.len());
            for error in &errors {
                eprintln!("  - {}", error);
            }
        }
        bail!("{} error(s) found", errors.len());
    }

    let result = parser.parse_with_recovery(&input);
    if !result.is_ok() {
        if verbose {
            eprint!("{}", result.errors.report());
        }
        bail!("{} error(s) found", result.errors.len());
    }
    check_structure(&result.document).context("document validation failed")?;

    if verbose {
        eprintln!("Valid: no errors found");
    } else {
        println!("valid");
    }
    Ok(())
}

// =============================================================================
// Stats Command
// =============================================================================

fn cmd_stats(parser: &Parser, path: Option<&Path>, verbose: bool) -> Result<()> {
    let input = read_input(path)?;
    let doc = parse_document(parser, &input)?;

    println!("{}", statistics(&doc));

    if verbose {
        eprintln!();
        eprintln!("Details:");
        for (i, section) in doc.sections.iter().enumerate() {
            eprintln!(
                "  Section {}: '{}' ({} links, {} images, {} metadata)",
                i + 1,
                section.title,
                section.links.len(),
                section.images.len(),
                section.metadata.len()
            );
            if let Some(content) = section.content.as_deref() {
                eprintln!("    Content: \"{}\"", preview(content, 50));
            }
        }

        if !doc.metadata.is_empty() {
            eprintln!();
            eprintln!("Global metadata:");
            for (key, value) in &doc.metadata {
                eprintln!("  {}: {}", key, value);
            }
        }
    }
    Ok(())
}

fn preview(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let head: String = text.chars().take(max - 3).collect();
    format!("{}...", head)
}

// =============================================================================
// Compress Command
// =============================================================================

fn cmd_compress(
    parser: &Parser,
    files: &IoArgs,
    level: CompressionLevel,
    verbose: bool,
) -> Result<()> {
    let input = read_input(files.input.as_deref())?;
    let doc = parse_document(parser, &input)?;

    let compressed = compress::compress(&doc, level);
    write_output(files.output.as_deref(), &compressed)?;

    if verbose {
        if let Some(reduction) = compress::ratio(&input, &compressed) {
            eprintln!(
                "Compression: {} -> {} bytes ({:.1}% reduction)",
                input.len(),
                compressed.len(),
                reduction
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mml_core::{ErrorKind, MmlError, Severity};
    use tracing::level_filters::LevelFilter;

    #[test]
    fn test_log_filter_defaults() {
        assert_eq!(log_filter(false, None).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(log_filter(true, None).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(log_filter(true, Some("  ")).max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_log_filter_env_overrides_default() {
        let filter = log_filter(false, Some("trace"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));

        let filter = log_filter(true, Some("error"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::ERROR));
    }

    #[test]
    fn test_partial_options_file_stays_lenient() {
        let options = options_from_json(r#"{"max_sections": 5}"#).unwrap();

        assert_eq!(options.max_sections, 5);
        assert!(!options.strict_mode);
        assert_eq!(options.max_metadata, ParserOptions::default().max_metadata);
    }

    #[test]
    fn test_options_file_can_enable_strict() {
        let options = options_from_json(r#"{"strict_mode": true}"#).unwrap();
        assert!(options.strict_mode);
        assert!(options_from_json("[1, 2]").is_err());
    }

    #[test]
    fn test_accept_rejects_critical_errors() {
        let parser = Parser::with_options(cli_defaults());
        let mut result = parser.parse("T:Doc\nXYZ:skip").unwrap();
        assert!(accept(result.clone()).is_ok());

        result
            .errors
            .push(MmlError::new(ErrorKind::Structure, Severity::Critical, "fatal"));
        let error = accept(result).unwrap_err();
        assert!(error.to_string().contains("fatal"));
    }

    #[test]
    fn test_check_structure_reports_validation_error() {
        let error = check_structure(&Document::new()).unwrap_err();
        assert_eq!(
            error.to_string(),
            "MML error: document is empty. Add a title, a section or global metadata"
        );

        let doc = Parser::new().parse("T:Doc").unwrap().document;
        assert!(check_structure(&doc).is_ok());
    }
}
