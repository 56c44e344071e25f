//! Locale-independent numeric scanners
//!
//! These functions find the longest numeric prefix starting at a byte offset,
//! the way `strtol`/`strtod` do, but report what they consumed instead of
//! relying on `errno`. They never look at separators; that is the cursor's job.

/// Result of scanning an integer prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct IntScan {
    /// Parsed value, saturated far outside any 64-bit range on overflow
    pub value: i128,
    /// Offset one past the last consumed byte
    pub end: usize,
}

/// Result of scanning a floating-point prefix
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct FloatScan {
    pub value: f64,
    pub end: usize,
    /// The literal did not fit: overflowed to infinity or a non-zero mantissa underflowed to zero
    pub range_error: bool,
}

/// Scan an optionally signed integer in `base` starting at `start`
///
/// Returns `None` when no digit could be consumed.
pub(crate) fn scan_integer(bytes: &[u8], start: usize, base: u32) -> Option<IntScan> {
    let mut pos = start;
    let mut negative = false;

    match bytes.get(pos) {
        Some(b'-') => {
            negative = true;
            pos += 1;
        }
        Some(b'+') => pos += 1,
        _ => {}
    }

    // "0x" is only a prefix when a hex digit follows it
    if base == 16
        && bytes.get(pos) == Some(&b'0')
        && matches!(bytes.get(pos + 1), Some(b'x') | Some(b'X'))
        && bytes.get(pos + 2).is_some_and(|b| b.is_ascii_hexdigit())
    {
        pos += 2;
    }

    let digits_start = pos;
    let mut magnitude: u128 = 0;
    while let Some(digit) = bytes.get(pos).and_then(|&b| (b as char).to_digit(base)) {
        magnitude = magnitude
            .saturating_mul(base as u128)
            .saturating_add(digit as u128);
        pos += 1;
    }

    if pos == digits_start {
        return None;
    }

    let magnitude = magnitude.min(i128::MAX as u128) as i128;
    Some(IntScan {
        value: if negative { -magnitude } else { magnitude },
        end: pos,
    })
}

/// Scan a decimal or special (inf/nan) floating-point literal starting at `start`
///
/// Returns `None` when nothing resembling a number is found.
pub(crate) fn scan_float(bytes: &[u8], start: usize) -> Option<FloatScan> {
    let mut pos = start;
    let mut negative = false;

    match bytes.get(pos) {
        Some(b'-') => {
            negative = true;
            pos += 1;
        }
        Some(b'+') => pos += 1,
        _ => {}
    }

    let rest = &bytes[pos..];
    if let Some(len) = match_special(rest, b"infinity").or_else(|| match_special(rest, b"inf")) {
        let value = if negative { f64::NEG_INFINITY } else { f64::INFINITY };
        return Some(FloatScan {
            value,
            end: pos + len,
            range_error: false,
        });
    }

    if let Some(len) = match_special(rest, b"nan") {
        let mut end = pos + len;
        // optional "(n-char-sequence)"
        if bytes.get(end) == Some(&b'(') {
            let mut close = end + 1;
            while bytes
                .get(close)
                .is_some_and(|b| b.is_ascii_alphanumeric() || *b == b'_')
            {
                close += 1;
            }
            if bytes.get(close) == Some(&b')') {
                end = close + 1;
            }
        }
        return Some(FloatScan {
            value: f64::NAN,
            end,
            range_error: false,
        });
    }

    let mut digits = 0usize;
    let mut nonzero_mantissa = false;

    while let Some(b) = bytes.get(pos).filter(|b| b.is_ascii_digit()) {
        nonzero_mantissa |= *b != b'0';
        digits += 1;
        pos += 1;
    }
    if bytes.get(pos) == Some(&b'.') {
        pos += 1;
        while let Some(b) = bytes.get(pos).filter(|b| b.is_ascii_digit()) {
            nonzero_mantissa |= *b != b'0';
            digits += 1;
            pos += 1;
        }
    }
    if digits == 0 {
        return None;
    }

    // An exponent marker is only consumed together with at least one digit
    if matches!(bytes.get(pos), Some(b'e') | Some(b'E')) {
        let mut exp = pos + 1;
        if matches!(bytes.get(exp), Some(b'+') | Some(b'-')) {
            exp += 1;
        }
        if bytes.get(exp).is_some_and(|b| b.is_ascii_digit()) {
            while bytes.get(exp).is_some_and(|b| b.is_ascii_digit()) {
                exp += 1;
            }
            pos = exp;
        }
    }

    // The scanned range is ASCII by construction
    let text = std::str::from_utf8(&bytes[start..pos]).ok()?;
    let value: f64 = text.parse().ok()?;
    let range_error = value.is_infinite() || (value == 0.0 && nonzero_mantissa);

    Some(FloatScan {
        value,
        end: pos,
        range_error,
    })
}

/// Case-insensitive prefix match, returning the matched length
fn match_special(bytes: &[u8], word: &[u8]) -> Option<usize> {
    let candidate = bytes.get(..word.len())?;
    candidate.eq_ignore_ascii_case(word).then_some(word.len())
}
