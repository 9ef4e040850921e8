//! Record framing shared by the header, transaction and footer lines
//!
//! A record is one 120-character ASCII line: a two-character type tag
//! followed by fixed-width fields and space padding.

use crate::core::error::{LedgerError, Result};
use crate::core::field::{self, FieldSpec};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Width of every record line, excluding the line terminator
pub const RECORD_WIDTH: usize = 120;

/// Width of the type tag at the start of every line
pub const TAG_WIDTH: usize = 2;

/// Record type, identified by the tag in columns [0, 2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Header,
    Transaction,
    Footer,
}

impl RecordKind {
    pub const fn tag(self) -> &'static str {
        match self {
            RecordKind::Header => "01",
            RecordKind::Transaction => "02",
            RecordKind::Footer => "03",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "01" => Some(RecordKind::Header),
            "02" => Some(RecordKind::Transaction),
            "03" => Some(RecordKind::Footer),
            _ => None,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::Header => "header",
            RecordKind::Transaction => "transaction",
            RecordKind::Footer => "footer",
        };
        f.write_str(name)
    }
}

/// A fixed-width record that converts to and from its text line
pub trait Record: Sized {
    /// Record type and tag
    const KIND: RecordKind;

    /// Parse one line (without its terminator)
    fn parse(line: &str) -> Result<Self>;

    /// Format as exactly [`RECORD_WIDTH`] characters
    fn format(&self) -> Result<String>;
}

/// A line whose tag and framing have been checked for one record kind
///
/// Field decode failures are reported as `MalformedRecord` for that kind.
pub struct RecordLine<'a> {
    kind: RecordKind,
    line: &'a str,
}

impl<'a> RecordLine<'a> {
    /// Check framing of `line` for `kind`
    ///
    /// `fields_end` is the offset one past the last field. Lines between
    /// `fields_end` and [`RECORD_WIDTH`] characters are accepted, so
    /// unpadded lines still parse.
    pub fn new(kind: RecordKind, line: &'a str, fields_end: usize) -> Result<Self> {
        let malformed = |reason: String| LedgerError::MalformedRecord {
            record: kind,
            reason,
        };

        if !line.is_ascii() {
            return Err(malformed("line contains non-ASCII characters".to_string()));
        }
        if line.len() > RECORD_WIDTH {
            return Err(malformed(format!(
                "line is {} characters, maximum is {}",
                line.len(),
                RECORD_WIDTH
            )));
        }
        if line.len() < fields_end {
            return Err(malformed(format!(
                "line is {} characters, fields end at {}",
                line.len(),
                fields_end
            )));
        }

        let tag = &line[..TAG_WIDTH];
        if tag != kind.tag() {
            let found = match RecordKind::from_tag(tag) {
                Some(other) => format!("{} tag '{}'", other, tag),
                None => format!("unknown tag '{}'", tag),
            };
            return Err(malformed(format!(
                "expected tag '{}', found {}",
                kind.tag(),
                found
            )));
        }

        Ok(RecordLine { kind, line })
    }

    /// Raw text of a string field, untrimmed
    pub fn string(&self, spec: FieldSpec) -> Result<&'a str> {
        spec.tail(self.line)
            .and_then(|tail| field::decode_fixed_string(spec.name, tail, spec.width))
            .map_err(|err| self.fold(err))
    }

    /// Numeric field
    pub fn integer<T: FromStr>(&self, spec: FieldSpec) -> Result<T> {
        spec.tail(self.line)
            .and_then(|tail| field::decode_fixed_integer(spec.name, tail, spec.width))
            .map_err(|err| self.fold(err))
    }

    /// Fold a field or constructor error into a record error for this kind
    pub fn fold(&self, err: LedgerError) -> LedgerError {
        match err {
            LedgerError::MalformedRecord { .. } => err,
            other => LedgerError::MalformedRecord {
                record: self.kind,
                reason: other.to_string(),
            },
        }
    }
}

/// Builds a record line field by field
pub struct RecordBuilder {
    line: String,
}

impl RecordBuilder {
    pub fn new(kind: RecordKind) -> Self {
        let mut line = String::with_capacity(RECORD_WIDTH);
        line.push_str(kind.tag());
        RecordBuilder { line }
    }

    pub fn string(mut self, spec: FieldSpec, value: &str) -> Result<Self> {
        debug_assert_eq!(self.line.len(), spec.offset, "field '{}' out of order", spec.name);
        self.line
            .push_str(&field::encode_fixed_string(spec.name, value, spec.width)?);
        Ok(self)
    }

    pub fn integer<T: fmt::Display>(mut self, spec: FieldSpec, value: T) -> Result<Self> {
        debug_assert_eq!(self.line.len(), spec.offset, "field '{}' out of order", spec.name);
        self.line
            .push_str(&field::encode_fixed_integer(spec.name, value, spec.width)?);
        Ok(self)
    }

    /// Pad with spaces to [`RECORD_WIDTH`]
    pub fn finish(mut self) -> String {
        let width = self.line.len().max(RECORD_WIDTH);
        self.line = format!("{:<width$}", self.line, width = width);
        self.line
    }
}
