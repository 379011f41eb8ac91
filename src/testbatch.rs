//! Component G: the test-batch file format used to drive bulk `count`
//! queries from a fixture file.
//!
//! Plain text, three header lines followed by one pattern per line:
//!
//! ```text
//! max_match_count
//! pattern_count
//! pattern_length
//! <pattern 1>
//! <pattern 2>
//! ...
//! ```
//!
//! Every pattern has the same fixed length (`pattern_length` bytes); lines
//! are newline-terminated. `max_match_count` is advisory metadata for the
//! batch's author (e.g. to size a results buffer ahead of time) and is not
//! otherwise interpreted by this module.

use std::io::{BufRead, Write};

use crate::error::Error;

/// A parsed test-batch file: the expected per-pattern match cap and the
/// patterns themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestBatch {
    pub max_match_count: u32,
    pub pattern_length: u32,
    pub patterns: Vec<Vec<u8>>,
}

impl TestBatch {
    /// Build a batch from in-memory patterns, validating that every pattern
    /// has the same length.
    pub fn new(max_match_count: u32, patterns: Vec<Vec<u8>>) -> Result<Self, Error> {
        let pattern_length = patterns.first().map(|p| p.len()).unwrap_or(0) as u32;
        if patterns
            .iter()
            .any(|p| p.len() as u32 != pattern_length)
        {
            return Err(Error::MalformedIndex {
                offset: 0,
                reason: "patterns in a batch must share one fixed length".to_string(),
            });
        }
        Ok(TestBatch {
            max_match_count,
            pattern_length,
            patterns,
        })
    }

    /// Run `count` for every pattern in the batch, in order.
    pub fn run_counts(&self, index: &crate::FMIndex) -> Vec<u32> {
        self.patterns.iter().map(|p| index.count(p)).collect()
    }
}

/// Parse a test-batch file from `reader`.
pub fn read<R: BufRead>(reader: &mut R) -> Result<TestBatch, Error> {
    let mut lines = reader.lines();

    let max_match_count = parse_header_line(&mut lines, "max_match_count")?;
    let pattern_count = parse_header_line(&mut lines, "pattern_count")?;
    let pattern_length = parse_header_line(&mut lines, "pattern_length")?;

    let mut patterns = Vec::new();
    patterns
        .try_reserve_exact(pattern_count as usize)
        .map_err(|_| Error::OutOfMemory)?;

    for idx in 0..pattern_count {
        let line = lines.next().ok_or_else(|| Error::MalformedIndex {
            offset: 0,
            reason: format!("missing pattern line {}", idx),
        })??;
        if line.len() as u32 != pattern_length {
            return Err(Error::MalformedIndex {
                offset: 0,
                reason: format!(
                    "pattern {} has length {}, expected {}",
                    idx,
                    line.len(),
                    pattern_length
                ),
            });
        }
        patterns.push(line.into_bytes());
    }

    Ok(TestBatch {
        max_match_count,
        pattern_length,
        patterns,
    })
}

/// Write a test-batch file to `writer` in the format `read` accepts.
pub fn write(batch: &TestBatch, writer: &mut impl Write) -> Result<(), Error> {
    writeln!(writer, "{}", batch.max_match_count)?;
    writeln!(writer, "{}", batch.patterns.len())?;
    writeln!(writer, "{}", batch.pattern_length)?;
    for pattern in &batch.patterns {
        writer.write_all(pattern)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

fn parse_header_line<R: BufRead>(
    lines: &mut std::io::Lines<&mut R>,
    field: &str,
) -> Result<u32, Error> {
    let line = lines.next().ok_or_else(|| Error::MalformedIndex {
        offset: 0,
        reason: format!("missing {} header line", field),
    })??;
    line.trim().parse::<u32>().map_err(|_| Error::MalformedIndex {
        offset: 0,
        reason: format!("{} header line is not a valid integer: {:?}", field, line),
    })
}
