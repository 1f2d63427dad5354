//! Address trace parsing.
//!
//! A trace holds one access per line: an operation (`r` or `w`, either case)
//! followed by a hexadecimal address, with or without a `0x` prefix.
//! Blank lines and lines starting with `#` are ignored.
//!
//! ```text
//! r 0x00000000
//! w 0x0000001c
//! # comment
//! r 1f40
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::common::error::TraceError;
use crate::hierarchy::AccessKind;

/// One access from a trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceOp {
    /// Load or store.
    pub kind: AccessKind,
    /// Byte address.
    pub address: u64,
}

/// Parses a single trace line.
///
/// # Arguments
///
/// * `line_no` - 1-based line number, used in error messages.
/// * `line` - Raw line text.
///
/// # Returns
///
/// `Ok(None)` for blank and comment lines.
///
/// # Errors
///
/// [`TraceError::MalformedLine`], [`TraceError::UnknownOperation`] or
/// [`TraceError::InvalidAddress`].
pub fn parse_line(line_no: usize, line: &str) -> Result<Option<TraceOp>, TraceError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut fields = line.split_whitespace();
    let (Some(op), Some(addr), None) = (fields.next(), fields.next(), fields.next()) else {
        return Err(TraceError::MalformedLine { line: line_no });
    };

    let kind = match op {
        "r" | "R" => AccessKind::Read,
        "w" | "W" => AccessKind::Write,
        _ => {
            return Err(TraceError::UnknownOperation {
                line: line_no,
                op: op.to_string(),
            });
        }
    };

    let digits = addr
        .strip_prefix("0x")
        .or_else(|| addr.strip_prefix("0X"))
        .unwrap_or(addr);
    let address = u64::from_str_radix(digits, 16).map_err(|_| TraceError::InvalidAddress {
        line: line_no,
        text: addr.to_string(),
    })?;

    Ok(Some(TraceOp { kind, address }))
}

/// Parses a whole trace.
///
/// # Errors
///
/// The first read or parse error, tagged with its line number.
pub fn parse_trace<R: BufRead>(reader: R) -> Result<Vec<TraceOp>, TraceError> {
    let mut ops = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        if let Some(op) = parse_line(idx + 1, &line?)? {
            ops.push(op);
        }
    }
    Ok(ops)
}

/// Reads and parses a trace file.
///
/// # Errors
///
/// [`TraceError::Io`] if the file cannot be opened, otherwise see [`parse_trace`].
pub fn load_trace<P: AsRef<Path>>(path: P) -> Result<Vec<TraceOp>, TraceError> {
    let file = File::open(path)?;
    parse_trace(BufReader::new(file))
}
