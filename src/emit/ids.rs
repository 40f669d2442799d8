//! Deterministic identifier scheme for emitted elements.
//!
//! Every id is a pure function of the element's role and the identity
//! key(s) involved, so two runs over the same index mint identical ids and
//! reruns produce byte-identical output. `next` edge ids carry both
//! endpoints: a range can be a reference in one group and the definition of
//! another, and a single-endpoint id would collide there.

use crate::protocol::MonikerKind;

/// Id of the metadata vertex.
pub const META: &str = "meta";

/// Id of the project vertex.
pub const PROJECT: &str = "project";

/// Id of the contains edge from the project to its documents.
pub const CONTAINS_PROJECT: &str = "contains:project";

/// Id of a document vertex. The role prefix keeps paths out of the fixed
/// id namespace: a file literally named `project` must not mint the
/// project vertex id.
pub fn document(path: &str) -> String {
    format!("document:{}", path)
}

/// Begin event for a project or document vertex, keyed by the target's id.
pub fn begin(target: &str) -> String {
    format!("begin:{}", target)
}

/// End event for a project or document vertex, keyed by the target's id.
pub fn end(target: &str) -> String {
    format!("end:{}", target)
}

pub fn result_set(definition: &str) -> String {
    format!("resultSet:{}", definition)
}

pub fn definition_result(definition: &str) -> String {
    format!("definitionResult:{}", definition)
}

pub fn reference_result(definition: &str) -> String {
    format!("referenceResult:{}", definition)
}

pub fn hover_result(definition: &str) -> String {
    format!("hoverResult:{}", definition)
}

pub fn moniker(kind: MonikerKind, definition: &str) -> String {
    format!("moniker:{}:{}", kind.as_str(), definition)
}

pub fn package(name: &str) -> String {
    format!("package:{}", name)
}

/// Edge from a range to the result set of `definition`.
pub fn next_edge(from: &str, definition: &str) -> String {
    format!("next:{}:{}", from, definition)
}

pub fn moniker_edge(kind: MonikerKind, definition: &str) -> String {
    format!("monikerEdge:{}:{}", kind.as_str(), definition)
}

pub fn package_edge(kind: MonikerKind, definition: &str) -> String {
    format!("packageInformation:{}:{}", kind.as_str(), definition)
}

pub fn definition_edge(definition: &str) -> String {
    format!("definition:{}", definition)
}

pub fn references_edge(definition: &str) -> String {
    format!("references:{}", definition)
}

pub fn hover_edge(definition: &str) -> String {
    format!("hover:{}", definition)
}

/// Item edge from a definition result to the defining range.
pub fn item_definition(definition: &str) -> String {
    format!("item:definitionResult:{}", definition)
}

/// Definitions-tagged item edge from a reference result.
pub fn item_definitions(definition: &str) -> String {
    format!("item:referenceResult:definitions:{}", definition)
}

/// References-tagged item edge from a reference result, one per document.
pub fn item_references(definition: &str, document: &str) -> String {
    format!("item:referenceResult:references:{}:{}", definition, document)
}

/// Contains edge from a document to its ranges, keyed by the document id.
pub fn contains(document_id: &str) -> String {
    format!("contains:{}", document_id)
}
