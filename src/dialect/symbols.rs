use serde::Deserialize;
use tracing::trace;

use crate::correlate::Fact;
use crate::errors::Result;
use crate::location::Location;

use super::{parse_error, to_zero_based, DialectReader};

/// Dialect A: a stream of symbol records interleaved with references
/// records. A references record attaches to the most recently seen symbol,
/// so order within the file is significant.
pub struct SymbolDialect;

#[derive(Debug, Deserialize)]
struct SymbolLine {
    #[serde(default)]
    symbol: Option<SymbolRecord>,
    #[serde(default)]
    references: Option<ReferencesRecord>,
}

#[derive(Debug, Deserialize)]
struct SymbolRecord {
    file: String,
    /// Wire form `line:startCol-endCol`, line 1-based, columns 0-based.
    range: String,
    #[serde(default)]
    hover: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReferencesRecord {
    file: String,
    ranges: Vec<String>,
}

impl DialectReader for SymbolDialect {
    fn name(&self) -> &'static str {
        "symbols"
    }

    fn parse(&self, path: &str, input: &str) -> Result<Vec<Fact>> {
        let mut facts = Vec::new();
        let mut current: Option<Location> = None;

        for (idx, raw) in input.lines().enumerate() {
            let line_no = idx as u32 + 1;
            let raw = raw.trim();
            if raw.is_empty() {
                continue;
            }
            let record: SymbolLine = serde_json::from_str(raw)
                .map_err(|e| parse_error(format!("invalid JSON: {}", e), path, line_no))?;

            match (record.symbol, record.references) {
                (Some(symbol), None) => {
                    let range = parse_wire_range(&symbol.range, &symbol.file, path, line_no)?;
                    trace!(key = %range.identity(), "symbol");
                    current = Some(range.clone());
                    facts.push(Fact::definition_site(range, symbol.hover));
                }
                (None, Some(references)) => {
                    let definition = current.clone().ok_or_else(|| {
                        parse_error("references record before any symbol", path, line_no)
                    })?;
                    for wire in &references.ranges {
                        let range = parse_wire_range(wire, &references.file, path, line_no)?;
                        facts.push(Fact::reference(range, definition.clone()));
                    }
                }
                (Some(_), Some(_)) => {
                    return Err(parse_error(
                        "record cannot carry both 'symbol' and 'references'",
                        path,
                        line_no,
                    ))
                }
                (None, None) => {
                    return Err(parse_error(
                        "expected a 'symbol' or 'references' record",
                        path,
                        line_no,
                    ))
                }
            }
        }
        Ok(facts)
    }
}

/// Parses the wire range form `line:startCol-endCol` into a location in
/// `file`.
fn parse_wire_range(wire: &str, file: &str, path: &str, record_line: u32) -> Result<Location> {
    let malformed = || {
        parse_error(
            format!("malformed range '{}': expected 'line:start-end'", wire),
            path,
            record_line,
        )
    };

    let (line_part, cols) = wire.split_once(':').ok_or_else(malformed)?;
    let (start_part, end_part) = cols.split_once('-').ok_or_else(malformed)?;
    let wire_line: u32 = line_part.parse().map_err(|_| malformed())?;
    let start: u32 = start_part.parse().map_err(|_| malformed())?;
    let end: u32 = end_part.parse().map_err(|_| malformed())?;
    if end < start {
        return Err(parse_error(
            format!("range '{}' ends before it starts", wire),
            path,
            record_line,
        ));
    }
    let line = to_zero_based(wire_line, path, record_line)?;
    Ok(Location::single_line(file, line, start, end))
}
