//! Bitpoetry core library for decoding the Finite Poetry Protocol.
//!
//! This crate implements the decode pipeline used by the CLI: a byte stream
//! of fixed 3-byte records (category, repeat count, dictionary index) is
//! walked once, each record is validated and rendered against the
//! vocabulary table, and the lines are assembled into the output text.
//! Parsing is byte-oriented and side-effect free; all I/O stays with the
//! caller. Wire conventions are captured in `poem::layout` and
//! `poem::reader` so the parser stays minimal and consistent with the
//! protocol documentation.
//!
//! Invariants:
//! - Decoding is deterministic: identical bytes yield identical text.
//! - Output is all-or-nothing; the first bad record aborts the decode.
//! - The vocabulary table is immutable and bounds-checked per category.
//!
//! # Examples
//! ```
//! use bitpoetry_core::{Vocabulary, decode_poem};
//!
//! let text = decode_poem(&[0x01, 0x03, 0x00], &Vocabulary::reference())?;
//! assert_eq!(text, "jump, jump, jump\n");
//! # Ok::<(), bitpoetry_core::PoemError>(())
//! ```

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

mod poem;
mod vocabulary;

pub use poem::error::PoemError;
pub use poem::parser::{DecodedLine, Record};
pub use poem::{decode_poem, decode_poem_lines, decode_record, parse_record};
pub use vocabulary::{Category, Vocabulary};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;
/// Default timestamp used when the clock cannot be formatted.
pub const DEFAULT_GENERATED_AT: &str = "1970-01-01T00:00:00Z";

/// Decode report with the rendered text and per-record details.
///
/// # Examples
/// ```
/// use bitpoetry_core::{Vocabulary, decode_poem_report};
///
/// let report = decode_poem_report("poem.bin", &[0x02, 0x01, 0x01], &Vocabulary::reference())?;
/// assert_eq!(report.report_version, bitpoetry_core::REPORT_VERSION);
/// assert_eq!(report.text, "bear\n");
/// # Ok::<(), bitpoetry_core::PoemError>(())
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Report schema version (not the wire-format version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// RFC3339 timestamp representing the report generation time.
    pub generated_at: String,

    /// Input stream metadata.
    pub input: InputInfo,

    /// Per-record summaries in stream order.
    pub lines: Vec<LineSummary>,
    /// Rendered poem text, one line per record, trailing newline included.
    pub text: String,
}

/// Tool metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Tool name (e.g., "bitpoetry").
    pub name: String,
    /// Tool version (semver).
    pub version: String,
}

/// Input stream metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path or label as provided by the caller.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

/// Per-record summary in a decode report.
///
/// # Examples
/// ```
/// use bitpoetry_core::LineSummary;
///
/// let line = LineSummary {
///     category: "verb".to_string(),
///     count: 3,
///     index: 0,
///     word: "jump".to_string(),
/// };
/// assert_eq!(line.word, "jump");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineSummary {
    /// Category name ("verb", "noun", "adjective").
    pub category: String,
    /// Repeat count from the record (0 renders an empty line).
    pub count: u8,
    /// Dictionary index from the record (0-based).
    pub index: u8,
    /// Selected vocabulary word.
    pub word: String,
}

/// Decode a poem and wrap the result in a versioned report.
///
/// The input path is a label only; no I/O happens here.
pub fn decode_poem_report(
    input_path: &str,
    poem: &[u8],
    vocabulary: &Vocabulary,
) -> Result<Report, PoemError> {
    let lines = decode_poem_lines(poem, vocabulary)?;
    let mut text = String::new();
    let mut summaries = Vec::with_capacity(lines.len());
    for line in &lines {
        text.push_str(&line.text);
        text.push('\n');
        summaries.push(LineSummary {
            category: line.record.category.name().to_string(),
            count: line.record.count,
            index: line.record.index,
            word: line.word.to_string(),
        });
    }

    Ok(Report {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "bitpoetry".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        generated_at: generated_at_now(),
        input: InputInfo {
            path: input_path.to_string(),
            bytes: poem.len() as u64,
        },
        lines: summaries,
        text,
    })
}

fn generated_at_now() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| DEFAULT_GENERATED_AT.to_string())
}
