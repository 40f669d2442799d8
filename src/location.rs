use serde::{Deserialize, Serialize};

use crate::errors::{IndexerError, Result};

/// A zero-based line/character pair, counted in UTF-16 code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// A single-line source range within one document.
///
/// `document` is a project-relative path. Ranges are identified by where
/// they start: the identity key deliberately omits the end position, so two
/// ranges starting at the same point collapse into one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub document: String,
    pub start: Position,
    pub end: Position,
}

impl Location {
    pub fn new(document: impl Into<String>, start: Position, end: Position) -> Self {
        Self {
            document: document.into(),
            start,
            end,
        }
    }

    /// A range spanning `start_char..end_char` on a single line.
    pub fn single_line(
        document: impl Into<String>,
        line: u32,
        start_char: u32,
        end_char: u32,
    ) -> Self {
        Self::new(
            document,
            Position::new(line, start_char),
            Position::new(line, end_char),
        )
    }

    pub fn is_single_line(&self) -> bool {
        self.start.line == self.end.line
    }

    /// The identity key of this range: `document:line:character` of the
    /// start position.
    pub fn identity(&self) -> String {
        identity_key(&self.document, self.start.line, self.start.character)
    }

    /// Key used to order ranges by source position.
    pub fn sort_key(&self) -> (&str, u32, u32) {
        (&self.document, self.start.line, self.start.character)
    }
}

/// Formats the identity key for a range starting at `(line, character)` in
/// `document`.
pub fn identity_key(document: &str, line: u32, character: u32) -> String {
    format!("{}:{}:{}", document, line, character)
}

/// Parses an identity key back into `(document, line, character)`.
///
/// Document paths may themselves contain colons, so the key is split from
/// the right: the last two components must be numeric, everything before
/// them is the document.
pub fn parse_identity(key: &str) -> Result<(String, u32, u32)> {
    let mut parts = key.rsplitn(3, ':');
    let character = parts.next();
    let line = parts.next();
    let document = parts.next();
    match (document, line, character) {
        (Some(document), Some(line), Some(character)) if !document.is_empty() => {
            let line: u32 = line.parse().map_err(|_| malformed_key(key))?;
            let character: u32 = character.parse().map_err(|_| malformed_key(key))?;
            Ok((document.to_string(), line, character))
        }
        _ => Err(malformed_key(key)),
    }
}

fn malformed_key(key: &str) -> IndexerError {
    IndexerError::Parse {
        message: "malformed range key: expected 'document:line:character'".to_string(),
        path: key.to_string(),
        line: None,
    }
}
