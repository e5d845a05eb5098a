//! Parser for the kstat text layout exported under `/proc/spl/kstat/zfs`.
//!
//! ```text
//! 6 1 0x01 91 4368 5266997922 97951858082072
//! name                            type data
//! hits                            4    8772612
//! misses                          4    604635
//! ```
//!
//! The first two lines are preamble and are always skipped. Every following
//! non-blank line must hold exactly `name type data`. Lines are read as raw
//! bytes; a field that is not valid UTF-8 is a row error, not a read error.

use super::error::{KstatError, KstatResult};
use super::types::{KstatRow, MetricValue, ParseMode, ParseSummary, StatIdentifier};
use std::io::{self, BufRead};
use tracing::{debug, warn};

/// Module line plus column header line
const HEADER_LINES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParserState {
    InHeader,
    InData,
    Done,
}

/// Lazy, single pass iterator over the data rows of a kstat stream.
///
/// Rows come out in file order. After the first error the iterator is
/// exhausted; in tolerant mode row errors are skipped instead and only
/// stream errors end the iteration.
pub struct KstatRows<R> {
    reader: R,
    category: String,
    mode: ParseMode,
    state: ParserState,
    line: Vec<u8>,
    line_number: usize,
    skipped: usize,
}

impl<R: BufRead> KstatRows<R> {
    pub fn new(reader: R, category: &str, mode: ParseMode) -> Self {
        Self {
            reader,
            category: category.to_string(),
            mode,
            state: ParserState::InHeader,
            line: Vec::new(),
            line_number: 0,
            skipped: 0,
        }
    }

    /// Rows dropped so far (tolerant mode only)
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Read the next line into the shared buffer, `false` on end of stream
    fn read_line(&mut self) -> KstatResult<bool> {
        self.line.clear();
        match self.reader.read_until(b'\n', &mut self.line) {
            Ok(0) => Ok(false),
            Ok(_) => {
                self.line_number += 1;
                Ok(true)
            }
            Err(e) => Err(KstatError::stream_error(&self.category, e)),
        }
    }

    fn fail(&mut self, err: KstatError) -> Option<KstatResult<KstatRow>> {
        self.state = ParserState::Done;
        Some(Err(err))
    }
}

impl<R: BufRead> Iterator for KstatRows<R> {
    type Item = KstatResult<KstatRow>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.state {
                ParserState::Done => return None,
                ParserState::InHeader => match self.read_line() {
                    Ok(true) => {
                        if self.line_number == HEADER_LINES {
                            self.state = ParserState::InData;
                        }
                    }
                    Ok(false) => {
                        let source = io::Error::new(
                            io::ErrorKind::UnexpectedEof,
                            format!(
                                "stream ended after {} of {} header lines",
                                self.line_number, HEADER_LINES
                            ),
                        );
                        let err = KstatError::stream_error(&self.category, source);
                        return self.fail(err);
                    }
                    Err(e) => return self.fail(e),
                },
                ParserState::InData => {
                    match self.read_line() {
                        Ok(true) => {}
                        Ok(false) => {
                            self.state = ParserState::Done;
                            return None;
                        }
                        Err(e) => return self.fail(e),
                    }

                    match parse_row(&self.category, &self.line, self.line_number) {
                        Ok(Some(row)) => return Some(Ok(row)),
                        Ok(None) => continue,
                        Err(e) if e.is_row_error() && self.mode == ParseMode::Tolerant => {
                            warn!(category = %self.category, error = %e, "Skipping kstat row");
                            self.skipped += 1;
                        }
                        Err(e) => return self.fail(e),
                    }
                }
            }
        }
    }
}

/// Split one data line into a row; blank lines yield `None`
fn parse_row(category: &str, line: &[u8], line_number: usize) -> KstatResult<Option<KstatRow>> {
    let fields: Vec<&[u8]> = line
        .split(|b| b.is_ascii_whitespace())
        .filter(|field| !field.is_empty())
        .collect();
    if fields.is_empty() {
        return Ok(None);
    }

    let &[name, type_code, value] = fields.as_slice() else {
        return Err(KstatError::malformed_row(
            category,
            line_number,
            fields.len(),
            &String::from_utf8_lossy(line),
        ));
    };

    let name = std::str::from_utf8(name).map_err(|_| {
        KstatError::invalid_name(category, line_number, &String::from_utf8_lossy(line))
    })?;

    let identifier = StatIdentifier::new(category, name);
    let value = decode_value(value).ok_or_else(|| {
        KstatError::value_decode(
            identifier.as_str(),
            line_number,
            &String::from_utf8_lossy(value),
        )
    })?;

    Ok(Some(KstatRow {
        identifier,
        type_code: String::from_utf8_lossy(type_code).into_owned(),
        value,
        line_number,
    }))
}

/// Plain base-10 digits only; `u64::from_str` alone would accept a leading `+`
fn decode_value(field: &[u8]) -> Option<MetricValue> {
    if field.is_empty() || !field.iter().all(u8::is_ascii_digit) {
        return None;
    }
    std::str::from_utf8(field).ok()?.parse::<MetricValue>().ok()
}

/// Kstat text parser with a configurable bad-row policy
#[derive(Debug, Clone, Copy, Default)]
pub struct KstatParser {
    mode: ParseMode,
}

impl KstatParser {
    pub fn new(mode: ParseMode) -> Self {
        Self { mode }
    }

    /// Iterate the rows of `reader` lazily
    pub fn rows<R: BufRead>(&self, reader: R, category: &str) -> KstatRows<R> {
        KstatRows::new(reader, category, self.mode)
    }

    /// Parse `reader` to completion, calling `emit` once per data row in file order.
    ///
    /// The reader is consumed. Pass `&mut reader` to keep ownership of an
    /// open stream and close it yourself.
    pub fn parse<R, F>(&self, reader: R, category: &str, mut emit: F) -> KstatResult<ParseSummary>
    where
        R: BufRead,
        F: FnMut(StatIdentifier, MetricValue),
    {
        let mut rows = self.rows(reader, category);
        let mut emitted = 0;

        for row in rows.by_ref() {
            let row = row?;
            emit(row.identifier, row.value);
            emitted += 1;
        }

        let summary = ParseSummary {
            emitted,
            skipped: rows.skipped(),
        };
        debug!(
            category,
            mode = %self.mode,
            emitted = summary.emitted,
            skipped = summary.skipped,
            "Parsed kstat"
        );
        Ok(summary)
    }
}

/// Parse a kstat stream in strict mode, emitting `(identifier, value)` per row
pub fn parse_procfs_file<R, F>(reader: R, category: &str, emit: F) -> KstatResult<()>
where
    R: BufRead,
    F: FnMut(StatIdentifier, MetricValue),
{
    KstatParser::default().parse(reader, category, emit).map(|_| ())
}
