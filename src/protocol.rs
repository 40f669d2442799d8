//! LSIF wire types.
//!
//! Every graph element serializes to a single flat JSON object carrying
//! `id`, `type` ("vertex" or "edge") and `label`, plus label-specific
//! fields. One element per line in the output stream.

use serde::{Deserialize, Serialize};

use crate::location::Position;

/// LSIF schema version stamped into the metadata vertex.
pub const LSIF_VERSION: &str = "0.4.3";

/// Position encoding declared in the metadata vertex. Line/character pairs
/// count UTF-16 code units.
pub const POSITION_ENCODING: &str = "utf-16";

/// One element of the output stream: a vertex or an edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Vertex {
        id: String,
        #[serde(flatten)]
        vertex: Vertex,
    },
    Edge {
        id: String,
        #[serde(flatten)]
        edge: Edge,
    },
}

impl Element {
    pub fn vertex(id: impl Into<String>, vertex: Vertex) -> Self {
        Element::Vertex {
            id: id.into(),
            vertex,
        }
    }

    pub fn edge(id: impl Into<String>, edge: Edge) -> Self {
        Element::Edge { id: id.into(), edge }
    }

    pub fn id(&self) -> &str {
        match self {
            Element::Vertex { id, .. } | Element::Edge { id, .. } => id,
        }
    }

    pub fn is_vertex(&self) -> bool {
        matches!(self, Element::Vertex { .. })
    }
}

/// Vertex payloads, discriminated by `label`.
///
/// `moniker` and `packageInformation` exist as both vertex and edge labels,
/// which is why vertices and edges are separate enums under the outer
/// `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "label")]
pub enum Vertex {
    #[serde(rename = "metaData")]
    MetaData {
        version: String,
        #[serde(rename = "positionEncoding")]
        position_encoding: String,
        #[serde(rename = "projectRoot")]
        project_root: String,
        #[serde(rename = "toolInfo")]
        tool_info: ToolInfo,
    },
    #[serde(rename = "project")]
    Project { kind: String },
    #[serde(rename = "$event")]
    Event {
        kind: EventKind,
        scope: EventScope,
        data: String,
    },
    #[serde(rename = "document")]
    Document {
        uri: String,
        #[serde(rename = "languageId")]
        language_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        contents: Option<String>,
    },
    #[serde(rename = "range")]
    Range { start: Position, end: Position },
    #[serde(rename = "resultSet")]
    ResultSet,
    #[serde(rename = "definitionResult")]
    DefinitionResult,
    #[serde(rename = "referenceResult")]
    ReferenceResult,
    #[serde(rename = "hoverResult")]
    HoverResult { result: Hover },
    #[serde(rename = "moniker")]
    Moniker {
        kind: MonikerKind,
        scheme: String,
        identifier: String,
    },
    #[serde(rename = "packageInformation")]
    PackageInformation { name: String, manager: String },
}

/// Edge payloads, discriminated by `label`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "label")]
pub enum Edge {
    #[serde(rename = "contains")]
    Contains {
        #[serde(rename = "outV")]
        out_v: String,
        #[serde(rename = "inVs")]
        in_vs: Vec<String>,
    },
    #[serde(rename = "next")]
    Next {
        #[serde(rename = "outV")]
        out_v: String,
        #[serde(rename = "inV")]
        in_v: String,
    },
    #[serde(rename = "item")]
    Item {
        #[serde(rename = "outV")]
        out_v: String,
        #[serde(rename = "inVs")]
        in_vs: Vec<String>,
        document: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        property: Option<ItemProperty>,
    },
    #[serde(rename = "moniker")]
    Moniker {
        #[serde(rename = "outV")]
        out_v: String,
        #[serde(rename = "inV")]
        in_v: String,
    },
    #[serde(rename = "packageInformation")]
    PackageInformation {
        #[serde(rename = "outV")]
        out_v: String,
        #[serde(rename = "inV")]
        in_v: String,
    },
    #[serde(rename = "textDocument/definition")]
    Definition {
        #[serde(rename = "outV")]
        out_v: String,
        #[serde(rename = "inV")]
        in_v: String,
    },
    #[serde(rename = "textDocument/references")]
    References {
        #[serde(rename = "outV")]
        out_v: String,
        #[serde(rename = "inV")]
        in_v: String,
    },
    #[serde(rename = "textDocument/hover")]
    Hover {
        #[serde(rename = "outV")]
        out_v: String,
        #[serde(rename = "inV")]
        in_v: String,
    },
}

/// Identity of the producing tool, reported in the metadata vertex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

/// Payload of a hover result: marked strings shown on hover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hover {
    pub contents: Vec<MarkedString>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkedString {
    pub language: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Begin,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventScope {
    Project,
    Document,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonikerKind {
    Import,
    Export,
}

impl MonikerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MonikerKind::Import => "import",
            MonikerKind::Export => "export",
        }
    }
}

/// `property` of an item edge attached to a reference result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemProperty {
    Definitions,
    References,
}
