//! Cheap structural check for exposition-format payloads.
//!
//! This is not a parser. Each non-blank, non-comment line must start with a
//! metric identifier character and carry at most one ASCII space, which
//! accepts `name value` and `name{labels} value` while rejecting lines with an
//! explicit timestamp. Label blocks are not looked into, so a label value
//! containing a space is rejected too.

use std::fmt;

/// Scanner buffer size. A line must fit in it together with its newline, so
/// the longest accepted line is one byte shorter.
pub const MAX_LINE_BYTES: usize = 64 * 1024;

/// Why a payload failed the structural check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// First character is not a letter or `_`.
    BadNameStart { line: usize },
    /// More than one space separator on the line.
    TooManyFields { line: usize, spaces: usize },
    /// Line could not be scanned (oversized or not decodable as text).
    Scan { line: usize },
}

impl Violation {
    /// 1-based line number the violation was found on.
    pub fn line(&self) -> usize {
        match *self {
            Violation::BadNameStart { line }
            | Violation::TooManyFields { line, .. }
            | Violation::Scan { line } => line,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Violation::BadNameStart { line } => {
                write!(f, "line {line}: metric name must start with a letter or '_'")
            }
            Violation::TooManyFields { line, spaces } => {
                write!(f, "line {line}: expected at most 2 fields, found {spaces} separators")
            }
            Violation::Scan { line } => write!(f, "line {line}: unreadable line"),
        }
    }
}

/// Returns true iff every sample line passes the structural check.
///
/// An empty payload is valid.
pub fn validate(payload: &[u8]) -> bool {
    check(payload).is_ok()
}

/// Same as [`validate`], reporting the first offending line.
pub fn check(payload: &[u8]) -> Result<(), Violation> {
    for (idx, raw) in lines(payload).enumerate() {
        let line_no = idx + 1;
        if raw.len() >= MAX_LINE_BYTES {
            return Err(Violation::Scan { line: line_no });
        }

        let line = trim_space(raw);
        if line.is_empty() || line[0] == b'#' {
            continue;
        }

        match first_char(line) {
            Some(c) if is_metric_start(c) => {}
            Some(_) => return Err(Violation::BadNameStart { line: line_no }),
            None => return Err(Violation::Scan { line: line_no }),
        }

        let spaces = line.iter().filter(|&&b| b == b' ').count();
        if spaces > 1 {
            return Err(Violation::TooManyFields { line: line_no, spaces });
        }
    }
    Ok(())
}

/// Legal first character of a metric identifier.
fn is_metric_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

/// Newline-separated lines; a trailing newline does not produce an extra line.
fn lines(payload: &[u8]) -> impl Iterator<Item = &[u8]> {
    let body = payload.strip_suffix(b"\n").unwrap_or(payload);
    body.split(|&b| b == b'\n')
}

/// Decode the leading UTF-8 scalar; `None` if the prefix is not valid UTF-8.
fn first_char(line: &[u8]) -> Option<char> {
    let width = match *line.first()? {
        b if b < 0x80 => 1,
        b if b & 0xE0 == 0xC0 => 2,
        b if b & 0xF0 == 0xE0 => 3,
        b if b & 0xF8 == 0xF0 => 4,
        _ => return None,
    };
    std::str::from_utf8(line.get(..width)?).ok()?.chars().next()
}

/// Decode the trailing UTF-8 scalar; `None` if the suffix is not valid UTF-8.
fn last_char(line: &[u8]) -> Option<char> {
    let start = line
        .iter()
        .rev()
        .take(4)
        .position(|&b| b & 0xC0 != 0x80)
        .map(|back| line.len() - 1 - back)?;
    std::str::from_utf8(&line[start..]).ok()?.chars().next()
}

/// Strip leading and trailing Unicode whitespace. Stops at undecodable bytes.
fn trim_space(mut line: &[u8]) -> &[u8] {
    while let Some(c) = first_char(line).filter(|c| c.is_whitespace()) {
        line = &line[c.len_utf8()..];
    }
    while let Some(c) = last_char(line).filter(|c| c.is_whitespace()) {
        line = &line[..line.len() - c.len_utf8()];
    }
    line
}
