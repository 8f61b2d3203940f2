//! Chip catalog CSV parsing
//!
//! Parses hand-maintained catalog files into [`ChipRecord`]s. The dialect is
//! comma-delimited with optional double-quote quoting and `""` escapes; the
//! first line is a header and is always ignored.
//!
//! Parsing never fails as a whole. A row that cannot become a record is
//! skipped, logged, and reported in [`ParseReport::skipped`].
//!
//! ## Memory Limits
//!
//! [`parse_source`] refuses sources larger than [`MAX_CSV_SIZE_MB`] or with
//! more than [`MAX_CSV_ROWS`] lines before any row is parsed.

use crate::constants::{
    COL_CONNECTION_DIAGRAM, COL_DATASHEET, COL_DESCRIPTION, COL_FUNCTION, COL_FUNCTION_TABLE,
    COL_NUMBER, EXPECTED_COLUMNS, MAX_CSV_ROWS, MAX_CSV_SIZE_MB, SLOW_QUERY_MS, YES_TOKEN,
};
use crate::data::error::{DataError, DataResult};
use crate::perf::ScopedTimer;
use crate::types::{ChipRecord, Family};
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

const BYTES_PER_MB: usize = 1024 * 1024;

/// Why a row was left out of the result
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// Empty or whitespace-only line
    Blank,
    /// Fewer than [`EXPECTED_COLUMNS`] columns
    TooFewColumns { found: usize },
    /// Chip number column empty after cleaning
    MissingNumber,
    /// Function column empty after cleaning
    MissingFunction,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Blank => write!(f, "blank line"),
            SkipReason::TooFewColumns { found } => {
                write!(f, "expected {} columns, found {}", EXPECTED_COLUMNS, found)
            }
            SkipReason::MissingNumber => write!(f, "missing chip number"),
            SkipReason::MissingFunction => write!(f, "missing function"),
        }
    }
}

/// A row the parser skipped
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    /// 1-based line number within the source (the header is line 1)
    pub line: usize,
    pub reason: SkipReason,
}

/// Accepted records plus the rows that were skipped
#[derive(Clone, Debug, Default)]
pub struct ParseReport {
    pub records: Vec<ChipRecord>,
    pub skipped: Vec<SkippedRow>,
}

impl ParseReport {
    /// Skipped rows excluding blank lines
    pub fn malformed_count(&self) -> usize {
        self.skipped
            .iter()
            .filter(|row| row.reason != SkipReason::Blank)
            .count()
    }
}

/// Parse catalog CSV text, tagging every record with `family`.
///
/// Total: any input yields a (possibly empty) list of records.
pub fn parse_chip_csv(content: &str, family: Family) -> Vec<ChipRecord> {
    parse_chip_csv_report(content, family).records
}

/// Like [`parse_chip_csv`], also returning the skipped rows
pub fn parse_chip_csv_report(content: &str, family: Family) -> ParseReport {
    let _timer = ScopedTimer::new("parse_chip_csv", SLOW_QUERY_MS);
    let mut report = ParseReport::default();

    // Header is line 1 and never parsed
    for (idx, line) in content.lines().enumerate().skip(1) {
        let line_no = idx + 1;
        match parse_row(line, family) {
            Ok(record) => report.records.push(record),
            Err(reason) => {
                if reason == SkipReason::Blank {
                    debug!(line = line_no, family = family.tag(), "Skipping blank CSV line");
                } else {
                    warn!(
                        line = line_no,
                        family = family.tag(),
                        %reason,
                        "Skipping malformed CSV row"
                    );
                }
                report.skipped.push(SkippedRow {
                    line: line_no,
                    reason,
                });
            }
        }
    }

    debug!(
        family = family.tag(),
        records = report.records.len(),
        malformed = report.malformed_count(),
        "Parsed chip CSV"
    );
    report
}

/// Parse a fetched source after checking it against the size limits
pub fn parse_source(content: &str, family: Family) -> DataResult<ParseReport> {
    if content.len() > MAX_CSV_SIZE_MB * BYTES_PER_MB {
        return Err(DataError::TooLarge {
            size_mb: content.len().div_ceil(BYTES_PER_MB) as u64,
            max_mb: MAX_CSV_SIZE_MB,
        });
    }

    // Lines minus the header line
    let rows = content.lines().count().saturating_sub(1);
    if rows > MAX_CSV_ROWS {
        return Err(DataError::TooManyRows {
            rows,
            max_rows: MAX_CSV_ROWS,
        });
    }

    Ok(parse_chip_csv_report(content, family))
}

/// Build a record from one data line
fn parse_row(line: &str, family: Family) -> Result<ChipRecord, SkipReason> {
    if line.trim().is_empty() {
        return Err(SkipReason::Blank);
    }

    let columns = split_csv_line(line);
    if columns.len() < EXPECTED_COLUMNS {
        return Err(SkipReason::TooFewColumns {
            found: columns.len(),
        });
    }

    let column = |idx: usize| columns[idx].trim();

    let number = column(COL_NUMBER);
    if number.is_empty() {
        return Err(SkipReason::MissingNumber);
    }
    let function_name = column(COL_FUNCTION);
    if function_name.is_empty() {
        return Err(SkipReason::MissingFunction);
    }

    Ok(ChipRecord {
        number: number.to_string(),
        function_name: function_name.to_string(),
        description: column(COL_DESCRIPTION).to_string(),
        has_connection_diagram: is_yes(column(COL_CONNECTION_DIAGRAM)),
        has_function_table: is_yes(column(COL_FUNCTION_TABLE)),
        datasheet_link: column(COL_DATASHEET).to_string(),
        family,
    })
}

fn is_yes(token: &str) -> bool {
    token.trim().eq_ignore_ascii_case(YES_TOKEN)
}

/// Scanner state while splitting a line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SplitState {
    /// Start of a field, leading whitespace is dropped
    FieldStart,
    /// Inside an unquoted field
    Unquoted,
    /// Inside a field that opened with a quote
    Quoted,
    /// Saw a quote inside a quoted field: either `""` or the closing quote
    QuotedQuote,
    /// Whitespace after a closing quote, held until we know what follows
    AfterQuote,
    /// A quote appeared mid-field; commas are literal until the next quote
    Embedded,
}

/// Split a CSV line into columns.
///
/// A comma separates columns only outside quotes. Fields wrapped in quotes
/// lose the wrapping quotes and have `""` unescaped to `"`; unquoted fields
/// are trimmed. An unterminated quote runs to the end of the line.
pub fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut state = SplitState::FieldStart;
    let mut quoted = false;
    let mut pending = String::new();

    for c in line.chars() {
        state = match (state, c) {
            (SplitState::FieldStart, ',') => {
                fields.push(std::mem::take(&mut field));
                SplitState::FieldStart
            }
            (SplitState::FieldStart, '"') => {
                quoted = true;
                SplitState::Quoted
            }
            (SplitState::FieldStart, c) if c.is_whitespace() => SplitState::FieldStart,
            (SplitState::FieldStart, c) => {
                field.push(c);
                SplitState::Unquoted
            }

            (SplitState::Unquoted, ',') => {
                fields.push(finish_field(&mut field, quoted));
                quoted = false;
                SplitState::FieldStart
            }
            (SplitState::Unquoted, '"') => {
                field.push('"');
                SplitState::Embedded
            }
            (SplitState::Unquoted, c) => {
                field.push(c);
                SplitState::Unquoted
            }

            (SplitState::Quoted, '"') => SplitState::QuotedQuote,
            (SplitState::Quoted, c) => {
                field.push(c);
                SplitState::Quoted
            }

            (SplitState::QuotedQuote, '"') => {
                field.push('"');
                SplitState::Quoted
            }
            (SplitState::QuotedQuote, ',') => {
                fields.push(finish_field(&mut field, quoted));
                quoted = false;
                SplitState::FieldStart
            }
            (SplitState::QuotedQuote, c) if c.is_whitespace() => {
                pending.push(c);
                SplitState::AfterQuote
            }
            (SplitState::QuotedQuote, c) => {
                field.push(c);
                SplitState::Unquoted
            }

            // Whitespace before the comma is dropped; before stray text it is kept
            (SplitState::AfterQuote, c) if c.is_whitespace() => {
                pending.push(c);
                SplitState::AfterQuote
            }
            (SplitState::AfterQuote, ',') => {
                pending.clear();
                fields.push(finish_field(&mut field, quoted));
                quoted = false;
                SplitState::FieldStart
            }
            (SplitState::AfterQuote, '"') => {
                field.push_str(&pending);
                pending.clear();
                field.push('"');
                SplitState::Embedded
            }
            (SplitState::AfterQuote, c) => {
                field.push_str(&pending);
                pending.clear();
                field.push(c);
                SplitState::Unquoted
            }

            (SplitState::Embedded, '"') => {
                field.push('"');
                SplitState::Unquoted
            }
            (SplitState::Embedded, c) => {
                field.push(c);
                SplitState::Embedded
            }
        };
    }

    fields.push(finish_field(&mut field, quoted));
    fields
}

fn finish_field(field: &mut String, quoted: bool) -> String {
    let value = std::mem::take(field);
    if quoted {
        value
    } else {
        value.trim_end().to_string()
    }
}
