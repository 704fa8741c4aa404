//! Line classifier for legacy `.brd` design files.
//!
//! The format has one directive per line. Only two shapes matter:
//!
//! - property lines, `p<digits> : <value>`
//! - control-point lines, `(cp [x, y, t1x, t1y, t2x, t2y] <flags>)`
//!
//! Everything else (block delimiters, comments, unknown records) is
//! classified as [`Line::Other`].

use hull_core::{HullError, Result};

// ---------------------------------------------------------------------------
// Line kinds
// ---------------------------------------------------------------------------

/// A classified, trimmed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    /// `p08 : TestBoard` gives `code = 8`, `value = "TestBoard"`.
    Property { code: u32, value: &'a str },
    /// Text between the first `[` and the following `]`.
    ControlPoint { values: &'a str },
    Other,
}

/// Classify one line. `line_no` is 1-based and only used for errors.
pub fn classify(line_no: usize, raw: &str) -> Result<Line<'_>> {
    let line = raw.trim();
    if line.is_empty() {
        return Ok(Line::Blank);
    }
    if let Some(property) = property(line_no, line) {
        return Ok(property);
    }
    if line.starts_with("(cp") {
        let values = bracketed(line)
            .ok_or_else(|| HullError::parse(line_no, line, "control point without [...] list"))?;
        return Ok(Line::ControlPoint { values });
    }
    Ok(Line::Other)
}

/// `p` followed by digits, optional spaces, `:`, then the value.
///
/// A code too large for `u32` cannot name a known property and is classified
/// as [`Line::Other`].
fn property(line_no: usize, line: &str) -> Option<Line<'_>> {
    let rest = line.strip_prefix('p')?;
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let value = rest[digits..].trim_start().strip_prefix(':')?;
    let Ok(code) = rest[..digits].parse() else {
        tracing::debug!(line = line_no, "skipping property with out-of-range code");
        return Some(Line::Other);
    };
    Some(Line::Property {
        code,
        value: value.trim(),
    })
}

fn bracketed(line: &str) -> Option<&str> {
    let open = line.find('[')?;
    let close = line[open + 1..].find(']')?;
    Some(&line[open + 1..open + 1 + close])
}

// ---------------------------------------------------------------------------
// Numeric lists
// ---------------------------------------------------------------------------

/// Parse a comma-separated list of numbers.
pub fn parse_numbers(line_no: usize, line: &str, values: &str) -> Result<Vec<f64>> {
    values
        .split(',')
        .map(|field| {
            let field = field.trim();
            field.parse::<f64>().map_err(|_| {
                HullError::parse(line_no, line.trim(), format!("malformed number {field:?}"))
            })
        })
        .collect()
}
