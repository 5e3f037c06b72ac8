//! Memory trace parsing.
//!
//! This module reads Valgrind-lackey style data traces. It performs:
//! 1. **Record parsing:** `" L 7ff000398,8"` into an operation, address and size.
//! 2. **Filtering:** Instruction fetches (`I`) and blank lines are skipped.
//! 3. **Lowering:** Each record maps onto the read/write operations the cache understands.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::common::data::Operation;
use crate::common::error::TraceError;

/// Data operation recorded in a trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TraceOp {
    /// `L`: a data load.
    Load,
    /// `S`: a data store.
    Store,
    /// `M`: a load followed by a store to the same address.
    Modify,
}

impl TraceOp {
    /// The cache operations this record performs, in order.
    pub const fn operations(self) -> &'static [Operation] {
        match self {
            Self::Load => &[Operation::Read],
            Self::Store => &[Operation::Write],
            Self::Modify => &[Operation::Read, Operation::Write],
        }
    }

    const fn letter(self) -> char {
        match self {
            Self::Load => 'L',
            Self::Store => 'S',
            Self::Modify => 'M',
        }
    }
}

/// One data record of a trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TraceEntry {
    /// Operation kind.
    pub op: TraceOp,
    /// Physical address of the first byte accessed.
    pub addr: u64,
    /// Number of bytes accessed. Recorded for reporting; a record never
    /// spans more than one block.
    pub size: u32,
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:x},{}", self.op.letter(), self.addr, self.size)
    }
}

/// Parses one trace line.
///
/// Returns `Ok(None)` for lines that carry no data access.
///
/// # Errors
///
/// A [`TraceError`] naming `line_no` if the record is malformed.
pub fn parse_line(line_no: usize, text: &str) -> Result<Option<TraceEntry>, TraceError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }

    let (op, rest) = text
        .split_once(char::is_whitespace)
        .ok_or_else(|| TraceError::MalformedEntry {
            line: line_no,
            text: text.to_owned(),
        })?;
    let op = match op {
        "I" => return Ok(None),
        "L" => TraceOp::Load,
        "S" => TraceOp::Store,
        "M" => TraceOp::Modify,
        other => {
            return Err(TraceError::UnknownOperation {
                line: line_no,
                op: other.to_owned(),
            });
        }
    };

    let (addr, size) = rest
        .trim()
        .split_once(',')
        .ok_or_else(|| TraceError::MalformedEntry {
            line: line_no,
            text: text.to_owned(),
        })?;

    let addr = addr.trim();
    let digits = addr
        .strip_prefix("0x")
        .or_else(|| addr.strip_prefix("0X"))
        .unwrap_or(addr);
    let addr = u64::from_str_radix(digits, 16).map_err(|_| TraceError::InvalidAddress {
        line: line_no,
        text: addr.to_owned(),
    })?;

    let size = size.trim();
    let size = size.parse::<u32>().map_err(|_| TraceError::InvalidSize {
        line: line_no,
        text: size.to_owned(),
    })?;

    Ok(Some(TraceEntry { op, addr, size }))
}

/// Parses a whole trace held in memory.
///
/// # Errors
///
/// The first malformed record.
pub fn parse_trace(text: &str) -> Result<Vec<TraceEntry>, TraceError> {
    text.lines()
        .enumerate()
        .filter_map(|(idx, line)| parse_line(idx + 1, line).transpose())
        .collect()
}

/// Reads and parses a trace from any buffered reader.
///
/// # Errors
///
/// An I/O failure or the first malformed record.
pub fn read_trace<R: BufRead>(reader: R) -> Result<Vec<TraceEntry>, TraceError> {
    let mut entries = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        if let Some(entry) = parse_line(idx + 1, &line?)? {
            entries.push(entry);
        }
    }
    Ok(entries)
}

/// Reads and parses a trace file.
///
/// # Errors
///
/// An I/O failure opening or reading `path`, or the first malformed record.
pub fn load_trace(path: impl AsRef<Path>) -> Result<Vec<TraceEntry>, TraceError> {
    let file = File::open(path.as_ref())?;
    let entries = read_trace(BufReader::new(file))?;
    tracing::debug!(
        path = %path.as_ref().display(),
        entries = entries.len(),
        "trace loaded"
    );
    Ok(entries)
}
