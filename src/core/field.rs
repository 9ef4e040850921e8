//! Fixed-width field codec
//!
//! Every record is a run of fixed-width ASCII fields. Strings are
//! left-justified and space-padded; integers are zero-padded on the left
//! (sign-aware, so `-200` in a 12-wide field is `-00000000200`).

use crate::core::error::{LedgerError, Result};
use std::fmt::Display;
use std::str::FromStr;

/// Position and width of a field inside a record line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub offset: usize,
    pub width: usize,
}

impl FieldSpec {
    pub const fn new(name: &'static str, offset: usize, width: usize) -> Self {
        FieldSpec {
            name,
            offset,
            width,
        }
    }

    /// Offset one past the last character of this field
    pub const fn end(&self) -> usize {
        self.offset + self.width
    }

    /// Text from this field's offset to the end of the line
    pub fn tail<'a>(&self, line: &'a str) -> Result<&'a str> {
        line.get(self.offset..).ok_or_else(|| LedgerError::MalformedField {
            field: self.name,
            reason: format!(
                "line has {} characters, field starts at {}",
                line.len(),
                self.offset
            ),
        })
    }
}

/// Construction-time width check shared by every record constructor
pub fn check_width(field: &'static str, value: &str, width: usize) -> Result<()> {
    if !value.is_ascii() {
        return Err(LedgerError::MalformedField {
            field,
            reason: format!("'{}' contains non-ASCII characters", value),
        });
    }
    if value.len() > width {
        return Err(LedgerError::FieldTooLong {
            field,
            limit: width,
            actual: value.len(),
        });
    }
    Ok(())
}

/// Left-justify `value` and pad it with spaces to `width`
pub fn encode_fixed_string(field: &'static str, value: &str, width: usize) -> Result<String> {
    let value = value.trim();
    check_width(field, value, width)?;
    Ok(format!("{:<width$}", value, width = width))
}

/// Zero-pad the decimal form of `value` to `width`
pub fn encode_fixed_integer<T: Display>(
    field: &'static str,
    value: T,
    width: usize,
) -> Result<String> {
    let digits = value.to_string();
    if digits.len() > width {
        return Err(LedgerError::FieldTooLong {
            field,
            limit: width,
            actual: digits.len(),
        });
    }
    match digits.strip_prefix('-') {
        Some(magnitude) => Ok(format!("-{:0>pad$}", magnitude, pad = width - 1)),
        None => Ok(format!("{:0>width$}", digits, width = width)),
    }
}

/// Slice exactly `width` characters from the start of `text`
pub fn decode_fixed_string<'a>(
    field: &'static str,
    text: &'a str,
    width: usize,
) -> Result<&'a str> {
    text.get(..width).ok_or_else(|| LedgerError::MalformedField {
        field,
        reason: format!("expected {} characters, found {}", width, text.len()),
    })
}

/// Slice `width` characters from the start of `text` and parse them as an integer
pub fn decode_fixed_integer<T: FromStr>(
    field: &'static str,
    text: &str,
    width: usize,
) -> Result<T> {
    let raw = decode_fixed_string(field, text, width)?;
    let numeric = raw
        .bytes()
        .enumerate()
        .all(|(i, b)| b.is_ascii_digit() || (i == 0 && b == b'-'));
    if raw.is_empty() || !numeric {
        return Err(LedgerError::MalformedField {
            field,
            reason: format!("'{}' is not numeric", raw),
        });
    }
    raw.parse::<T>().map_err(|_| LedgerError::MalformedField {
        field,
        reason: format!("'{}' is out of range", raw),
    })
}
