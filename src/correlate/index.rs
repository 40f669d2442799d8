use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::errors::{IndexerError, Result};
use crate::location::{parse_identity, Location};

use super::store::Fact;

/// Dense surrogate id for a registered range.
///
/// Ids are assigned in (document, line, character) order during correlation,
/// so sorting by `RangeId` is sorting by source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RangeId(pub u32);

/// One registered range: its identity key and full location.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeEntry {
    pub key: String,
    pub location: Location,
}

/// A definition and the ranges that reference it.
#[derive(Debug, Clone, PartialEq)]
pub struct DefinitionGroup {
    pub definition: RangeId,
    /// Referencing ranges in ascending id order. Never contains
    /// `definition` itself; the definition's own occurrence is implied.
    pub references: Vec<RangeId>,
    pub hover: Option<String>,
}

/// Immutable correlation result: every derived set the emission engine
/// consumes, each in a fixed order.
#[derive(Debug)]
pub struct CorrelatedIndex {
    ranges: Vec<RangeEntry>,
    by_key: HashMap<String, RangeId>,
    documents: Vec<String>,
    ranges_by_document: BTreeMap<String, Vec<RangeId>>,
    groups: Vec<DefinitionGroup>,
}

impl CorrelatedIndex {
    pub(crate) fn build(
        facts: HashMap<String, Fact>,
        hovers: HashMap<String, String>,
    ) -> Result<Self> {
        // Every fact range becomes a range vertex, as does every definition
        // pointer that no fact range covers. Fact keys are iterated in
        // sorted order so that when several pointers share an identity but
        // disagree on the end position, the recorded location does not
        // depend on hash order.
        let mut fact_keys: Vec<&String> = facts.keys().collect();
        fact_keys.sort();
        let mut locations: HashMap<String, Location> = HashMap::new();
        for key in &fact_keys {
            let fact = &facts[key.as_str()];
            locations
                .entry(fact.range.identity())
                .or_insert_with(|| fact.range.clone());
        }
        for key in &fact_keys {
            if let Some(definition) = &facts[key.as_str()].definition {
                locations
                    .entry(definition.identity())
                    .or_insert_with(|| definition.clone());
            }
        }

        // Assign dense ids in source-position order.
        let mut ranges: Vec<RangeEntry> = locations
            .into_iter()
            .map(|(key, location)| RangeEntry { key, location })
            .collect();
        ranges.sort_by(|a, b| a.location.sort_key().cmp(&b.location.sort_key()));

        let by_key: HashMap<String, RangeId> = ranges
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.key.clone(), RangeId(i as u32)))
            .collect();

        // Per-document range lists inherit the global sort.
        let mut ranges_by_document: BTreeMap<String, Vec<RangeId>> = BTreeMap::new();
        for (i, entry) in ranges.iter().enumerate() {
            ranges_by_document
                .entry(entry.location.document.clone())
                .or_default()
                .push(RangeId(i as u32));
        }
        let documents: Vec<String> = ranges_by_document.keys().cloned().collect();

        // Group references under their definition. A definition fact points
        // at itself and is skipped here: the definition range is not one of
        // its own references. Definitions nothing refers to get no group.
        let mut references_by_definition: BTreeMap<RangeId, Vec<RangeId>> = BTreeMap::new();
        for key in &fact_keys {
            let fact = &facts[key.as_str()];
            let Some(definition) = &fact.definition else {
                continue;
            };
            let definition_key = definition.identity();
            if definition_key == fact.range.identity() {
                continue;
            }
            let definition_id = lookup(&by_key, &definition_key)?;
            let range_id = lookup(&by_key, &fact.range.identity())?;
            references_by_definition
                .entry(definition_id)
                .or_default()
                .push(range_id);
        }

        let groups: Vec<DefinitionGroup> = references_by_definition
            .into_iter()
            .map(|(definition, mut references)| {
                references.sort();
                let hover = hovers.get(&ranges[definition.0 as usize].key).cloned();
                DefinitionGroup {
                    definition,
                    references,
                    hover,
                }
            })
            .collect();

        debug!(
            ranges = ranges.len(),
            documents = documents.len(),
            groups = groups.len(),
            "correlated fact store"
        );

        Ok(Self {
            ranges,
            by_key,
            documents,
            ranges_by_document,
            groups,
        })
    }

    /// All documents in ascending name order.
    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    /// Ids of every registered range, ascending.
    pub fn ids(&self) -> impl Iterator<Item = RangeId> {
        (0..self.ranges.len() as u32).map(RangeId)
    }

    /// Number of registered ranges.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// The entry behind a surrogate id.
    pub fn range(&self, id: RangeId) -> Result<&RangeEntry> {
        self.ranges.get(id.0 as usize).ok_or_else(|| IndexerError::Lookup {
            key: format!("#{}", id.0),
        })
    }

    /// Ranges contained in a document, in source-position order. Unknown
    /// documents have no ranges.
    pub fn ranges_in(&self, document: &str) -> &[RangeId] {
        self.ranges_by_document
            .get(document)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Resolves an identity key to its surrogate id.
    pub fn resolve_key(&self, key: &str) -> Result<RangeId> {
        parse_identity(key)?;
        lookup(&self.by_key, key)
    }

    /// Definition groups in ascending definition id order.
    pub fn groups(&self) -> &[DefinitionGroup] {
        &self.groups
    }
}

fn lookup(by_key: &HashMap<String, RangeId>, key: &str) -> Result<RangeId> {
    by_key.get(key).copied().ok_or_else(|| IndexerError::Lookup {
        key: key.to_string(),
    })
}
