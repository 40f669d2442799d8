use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::location::Location;

use super::index::CorrelatedIndex;

/// The normalized unit of input: a range, an optional pointer to the range
/// defining its symbol, and an optional hover text.
///
/// A fact whose definition is its own range records a definition site. A
/// fact with no definition is a bare range: it becomes a range vertex but
/// joins no definition group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fact {
    pub range: Location,
    pub definition: Option<Location>,
    pub hover: Option<String>,
}

impl Fact {
    /// A definition site: the fact's definition is its own range.
    pub fn definition_site(range: Location, hover: Option<String>) -> Self {
        Self {
            definition: Some(range.clone()),
            range,
            hover,
        }
    }

    /// A reference to a definition elsewhere.
    pub fn reference(range: Location, definition: Location) -> Self {
        Self {
            range,
            definition: Some(definition),
            hover: None,
        }
    }

    /// A bare range with no definition link.
    pub fn bare(range: Location) -> Self {
        Self {
            range,
            definition: None,
            hover: None,
        }
    }
}

/// Accumulates facts before correlation.
///
/// Facts are keyed by range identity: inserting a second fact for the same
/// identity overwrites the first, so the caller's insert order decides ties.
/// Hover texts are recorded against the definition identity at insert time,
/// also last write wins.
#[derive(Debug, Default)]
pub struct FactStore {
    facts: HashMap<String, Fact>,
    hovers: HashMap<String, String>,
}

impl FactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a fact. Never fails; identity collisions overwrite.
    pub fn insert(&mut self, fact: Fact) {
        if let (Some(definition), Some(hover)) = (&fact.definition, &fact.hover) {
            self.hovers.insert(definition.identity(), hover.clone());
        }
        self.facts.insert(fact.range.identity(), fact);
    }

    /// Number of distinct range identities registered so far.
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Correlates the registered facts into the index the emission engine
    /// consumes. The store is gone afterwards; correlation is one-shot.
    pub fn finalize(self) -> Result<CorrelatedIndex> {
        CorrelatedIndex::build(self.facts, self.hovers)
    }
}
