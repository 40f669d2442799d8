use serde::Deserialize;

use crate::correlate::Fact;
use crate::errors::Result;
use crate::location::{Location, Position};

use super::{parse_error, to_zero_based, DialectReader};

/// Sentinel in `definition.file` meaning "this record's own file".
const SAME_FILE: &str = "";

/// Dialect B: a flat span table. Every record names its own range and the
/// position of its definition; a record whose definition position is its
/// own start is the definition site itself. Records are self-contained, so
/// order within the file does not matter.
pub struct SpanDialect;

#[derive(Debug, Deserialize)]
struct SpanRecord {
    file: String,
    start: WirePosition,
    end: WirePosition,
    #[serde(default)]
    definition: Option<DefinitionRef>,
    /// Type text, recorded as hover against the definition.
    #[serde(rename = "type", default)]
    ty: Option<String>,
}

/// Wire position: 1-based line, 0-based column.
#[derive(Debug, Deserialize)]
struct WirePosition {
    line: u32,
    col: u32,
}

#[derive(Debug, Deserialize)]
struct DefinitionRef {
    file: String,
    pos: WirePosition,
}

impl DialectReader for SpanDialect {
    fn name(&self) -> &'static str {
        "spans"
    }

    fn parse(&self, path: &str, input: &str) -> Result<Vec<Fact>> {
        let mut facts = Vec::new();

        for (idx, raw) in input.lines().enumerate() {
            let line_no = idx as u32 + 1;
            let raw = raw.trim();
            if raw.is_empty() {
                continue;
            }
            let record: SpanRecord = serde_json::from_str(raw)
                .map_err(|e| parse_error(format!("invalid JSON: {}", e), path, line_no))?;

            if record.start.line != record.end.line {
                return Err(parse_error(
                    format!(
                        "multi-line range {}..{} is not supported",
                        record.start.line, record.end.line
                    ),
                    path,
                    line_no,
                ));
            }
            if record.end.col < record.start.col {
                return Err(parse_error(
                    format!(
                        "range {}..{} ends before it starts",
                        record.start.col, record.end.col
                    ),
                    path,
                    line_no,
                ));
            }

            let line = to_zero_based(record.start.line, path, line_no)?;
            let range = Location::new(
                &record.file,
                Position::new(line, record.start.col),
                Position::new(line, record.end.col),
            );

            let Some(definition) = record.definition else {
                facts.push(Fact::bare(range));
                continue;
            };

            let def_file = if definition.file == SAME_FILE {
                record.file.as_str()
            } else {
                definition.file.as_str()
            };
            let def_line = to_zero_based(definition.pos.line, path, line_no)?;

            if def_file == record.file && def_line == line && definition.pos.col == record.start.col
            {
                facts.push(Fact::definition_site(range, record.ty));
            } else {
                let def_range = Location::single_line(
                    def_file,
                    def_line,
                    definition.pos.col,
                    definition.pos.col,
                );
                facts.push(Fact {
                    range,
                    definition: Some(def_range),
                    hover: record.ty,
                });
            }
        }
        Ok(facts)
    }
}
