//! Input dialect front ends.
//!
//! Two upstream dump formats reduce to the same fact shape. Each module
//! parses one newline-delimited JSON dialect into [`Fact`]s; wire line
//! numbers are 1-based and converted to the 0-based internal model here.

mod spans;
mod symbols;

pub use spans::SpanDialect;
pub use symbols::SymbolDialect;

use crate::correlate::Fact;
use crate::errors::{IndexerError, Result};

/// Which dump format an input file uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Symbol/references records (dialect A).
    Symbols,
    /// Flat span-table records (dialect B).
    Spans,
}

impl Dialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Symbols => "symbols",
            Dialect::Spans => "spans",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Dialect> {
        match s {
            "symbols" => Some(Dialect::Symbols),
            "spans" => Some(Dialect::Spans),
            _ => None,
        }
    }
}

/// Parses one dump file's text into facts. `path` is used for error
/// context only.
pub trait DialectReader {
    /// Short name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Parses the full text of one input file.
    fn parse(&self, path: &str, input: &str) -> Result<Vec<Fact>>;
}

/// Returns the reader for a dialect.
pub fn reader_for(dialect: Dialect) -> Box<dyn DialectReader> {
    match dialect {
        Dialect::Symbols => Box::new(SymbolDialect),
        Dialect::Spans => Box::new(SpanDialect),
    }
}

pub(crate) fn parse_error(message: impl Into<String>, path: &str, line: u32) -> IndexerError {
    IndexerError::Parse {
        message: message.into(),
        path: path.to_string(),
        line: Some(line),
    }
}

/// Converts a 1-based wire line number to the 0-based internal model.
pub(crate) fn to_zero_based(wire_line: u32, path: &str, record_line: u32) -> Result<u32> {
    wire_line
        .checked_sub(1)
        .ok_or_else(|| parse_error("line numbers are 1-based, got 0", path, record_line))
}
