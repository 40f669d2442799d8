//! The graph emission engine.
//!
//! Walks a [`CorrelatedIndex`] in a fixed order and hands every element to
//! the sink, awaiting each emission before producing the next, so the
//! output stream order is exactly the logical order. The walk branches only
//! on presence or absence of optional data (monikers, hover, embedded
//! contents); given the same index and configuration it produces the same
//! elements with the same ids every time.

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::config::EmitConfig;
use crate::correlate::{CorrelatedIndex, DefinitionGroup};
use crate::emit::ids;
use crate::emit::sink::EmitSink;
use crate::errors::Result;
use crate::moniker::{Moniker, MonikerResolver};
use crate::protocol::{
    Edge, Element, EventKind, EventScope, Hover, ItemProperty, MarkedString, MonikerKind,
    ToolInfo, Vertex, LSIF_VERSION, POSITION_ENCODING,
};

/// Emits the LSIF element stream for one correlated index.
pub struct GraphEmitter<'a, S, M> {
    index: &'a CorrelatedIndex,
    monikers: &'a M,
    config: &'a EmitConfig,
    /// Base64 file contents to embed per document, usually empty.
    contents: &'a BTreeMap<String, String>,
    sink: &'a mut S,
    emitted_packages: HashSet<String>,
    emitted: u64,
}

impl<'a, S: EmitSink, M: MonikerResolver> GraphEmitter<'a, S, M> {
    pub fn new(
        index: &'a CorrelatedIndex,
        monikers: &'a M,
        config: &'a EmitConfig,
        contents: &'a BTreeMap<String, String>,
        sink: &'a mut S,
    ) -> Self {
        Self {
            index,
            monikers,
            config,
            contents,
            sink,
            emitted_packages: HashSet::new(),
            emitted: 0,
        }
    }

    /// Runs the full emission and returns the number of elements written.
    pub async fn run(mut self) -> Result<u64> {
        self.emit_header().await?;
        self.emit_documents().await?;
        self.emit_ranges().await?;
        self.emit_definition_groups().await?;
        self.emit_containment().await?;
        self.send(Element::vertex(
            ids::end(ids::PROJECT),
            event(EventKind::End, EventScope::Project, ids::PROJECT),
        ))
        .await?;
        debug!(elements = self.emitted, "graph emission complete");
        Ok(self.emitted)
    }

    async fn emit_header(&mut self) -> Result<()> {
        let config = self.config;
        self.send(Element::vertex(
            ids::META,
            Vertex::MetaData {
                version: LSIF_VERSION.to_string(),
                position_encoding: POSITION_ENCODING.to_string(),
                project_root: project_uri(&config.project_root),
                tool_info: ToolInfo {
                    name: config.tool_name.clone(),
                    version: config.tool_version.clone(),
                },
            },
        ))
        .await?;
        self.send(Element::vertex(
            ids::PROJECT,
            Vertex::Project {
                kind: config.language.clone(),
            },
        ))
        .await?;
        self.send(Element::vertex(
            ids::begin(ids::PROJECT),
            event(EventKind::Begin, EventScope::Project, ids::PROJECT),
        ))
        .await
    }

    async fn emit_documents(&mut self) -> Result<()> {
        let index = self.index;
        for document in index.documents() {
            let doc_id = ids::document(document);
            self.send(Element::vertex(
                &doc_id,
                Vertex::Document {
                    uri: document_uri(&self.config.project_root, document),
                    language_id: self.config.language.clone(),
                    contents: self.contents.get(document).cloned(),
                },
            ))
            .await?;
            self.send(Element::vertex(
                ids::begin(&doc_id),
                event(EventKind::Begin, EventScope::Document, &doc_id),
            ))
            .await?;
        }
        Ok(())
    }

    async fn emit_ranges(&mut self) -> Result<()> {
        let index = self.index;
        for id in index.ids() {
            let entry = index.range(id)?;
            self.send(Element::vertex(
                &entry.key,
                Vertex::Range {
                    start: entry.location.start,
                    end: entry.location.end,
                },
            ))
            .await?;
        }
        Ok(())
    }

    async fn emit_definition_groups(&mut self) -> Result<()> {
        let index = self.index;
        for group in index.groups() {
            self.emit_group(group).await?;
        }
        Ok(())
    }

    /// The fixed per-group sub-sequence: result set, moniker or definition
    /// result, hover, reference result, next edges, per-document items.
    async fn emit_group(&mut self, group: &DefinitionGroup) -> Result<()> {
        let index = self.index;
        let definition = index.range(group.definition)?;
        let def_key = definition.key.clone();
        let def_document = definition.location.document.clone();
        let import = self.monikers.import_moniker(&definition.location);
        let export = self.monikers.export_moniker(&definition.location);

        let rs_id = ids::result_set(&def_key);
        self.send(Element::vertex(&rs_id, Vertex::ResultSet)).await?;
        self.send(Element::edge(
            ids::next_edge(&def_key, &def_key),
            Edge::Next {
                out_v: def_key.clone(),
                in_v: rs_id.clone(),
            },
        ))
        .await?;

        // Imported symbols have no local definition site: the import
        // moniker chain replaces the definition result entirely.
        if let Some(moniker) = &import {
            self.emit_moniker_chain(MonikerKind::Import, &def_key, &rs_id, moniker)
                .await?;
        } else {
            let dr_id = ids::definition_result(&def_key);
            self.send(Element::vertex(&dr_id, Vertex::DefinitionResult))
                .await?;
            self.send(Element::edge(
                ids::definition_edge(&def_key),
                Edge::Definition {
                    out_v: rs_id.clone(),
                    in_v: dr_id.clone(),
                },
            ))
            .await?;
            self.send(Element::edge(
                ids::item_definition(&def_key),
                Edge::Item {
                    out_v: dr_id,
                    in_vs: vec![def_key.clone()],
                    document: ids::document(&def_document),
                    property: None,
                },
            ))
            .await?;
        }

        if let Some(text) = &group.hover {
            let hr_id = ids::hover_result(&def_key);
            self.send(Element::vertex(
                &hr_id,
                Vertex::HoverResult {
                    result: Hover {
                        contents: vec![MarkedString {
                            language: self.config.language.clone(),
                            value: text.clone(),
                        }],
                    },
                },
            ))
            .await?;
            self.send(Element::edge(
                ids::hover_edge(&def_key),
                Edge::Hover {
                    out_v: rs_id.clone(),
                    in_v: hr_id,
                },
            ))
            .await?;
        }

        let rr_id = ids::reference_result(&def_key);
        self.send(Element::vertex(&rr_id, Vertex::ReferenceResult))
            .await?;
        self.send(Element::edge(
            ids::references_edge(&def_key),
            Edge::References {
                out_v: rs_id.clone(),
                in_v: rr_id.clone(),
            },
        ))
        .await?;

        // The definition site counts as one of its own references for
        // navigation, tagged as a definition.
        if import.is_none() {
            self.send(Element::edge(
                ids::item_definitions(&def_key),
                Edge::Item {
                    out_v: rr_id.clone(),
                    in_vs: vec![def_key.clone()],
                    document: ids::document(&def_document),
                    property: Some(ItemProperty::Definitions),
                },
            ))
            .await?;
        }

        for &reference in &group.references {
            let entry = index.range(reference)?;
            self.send(Element::edge(
                ids::next_edge(&entry.key, &def_key),
                Edge::Next {
                    out_v: entry.key.clone(),
                    in_v: rs_id.clone(),
                },
            ))
            .await?;
        }

        // Item edges may not span documents, so the referencing ranges are
        // partitioned per document. References are already sorted, so each
        // partition inherits the order.
        let mut partitions: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for &reference in &group.references {
            let entry = index.range(reference)?;
            partitions
                .entry(entry.location.document.clone())
                .or_default()
                .push(entry.key.clone());
        }
        for (document, keys) in partitions {
            self.send(Element::edge(
                ids::item_references(&def_key, &document),
                Edge::Item {
                    out_v: rr_id.clone(),
                    in_vs: keys,
                    document: ids::document(&document),
                    property: Some(ItemProperty::References),
                },
            ))
            .await?;
        }

        if let Some(moniker) = &export {
            self.emit_moniker_chain(MonikerKind::Export, &def_key, &rs_id, moniker)
                .await?;
        }
        Ok(())
    }

    /// Moniker vertex, moniker edge, package vertex (first use only) and
    /// package edge for one kind.
    async fn emit_moniker_chain(
        &mut self,
        kind: MonikerKind,
        def_key: &str,
        rs_id: &str,
        moniker: &Moniker,
    ) -> Result<()> {
        let moniker_id = ids::moniker(kind, def_key);
        self.send(Element::vertex(
            &moniker_id,
            Vertex::Moniker {
                kind,
                scheme: moniker.scheme.clone(),
                identifier: moniker.identifier.clone(),
            },
        ))
        .await?;
        self.send(Element::edge(
            ids::moniker_edge(kind, def_key),
            Edge::Moniker {
                out_v: rs_id.to_string(),
                in_v: moniker_id.clone(),
            },
        ))
        .await?;

        let package_id = ids::package(&moniker.package);
        if self.emitted_packages.insert(moniker.package.clone()) {
            self.send(Element::vertex(
                &package_id,
                Vertex::PackageInformation {
                    name: moniker.package.clone(),
                    manager: moniker.scheme.clone(),
                },
            ))
            .await?;
        }
        self.send(Element::edge(
            ids::package_edge(kind, def_key),
            Edge::PackageInformation {
                out_v: moniker_id,
                in_v: package_id,
            },
        ))
        .await
    }

    async fn emit_containment(&mut self) -> Result<()> {
        let index = self.index;
        for document in index.documents() {
            let doc_id = ids::document(document);
            let mut keys = Vec::new();
            for &id in index.ranges_in(document) {
                keys.push(index.range(id)?.key.clone());
            }
            self.send(Element::edge(
                ids::contains(&doc_id),
                Edge::Contains {
                    out_v: doc_id.clone(),
                    in_vs: keys,
                },
            ))
            .await?;
            self.send(Element::vertex(
                ids::end(&doc_id),
                event(EventKind::End, EventScope::Document, &doc_id),
            ))
            .await?;
        }
        let document_ids = index.documents().iter().map(|d| ids::document(d)).collect();
        self.send(Element::edge(
            ids::CONTAINS_PROJECT,
            Edge::Contains {
                out_v: ids::PROJECT.to_string(),
                in_vs: document_ids,
            },
        ))
        .await
    }

    async fn send(&mut self, element: Element) -> Result<()> {
        self.sink.emit(&element).await?;
        self.emitted += 1;
        Ok(())
    }
}

fn event(kind: EventKind, scope: EventScope, target: &str) -> Vertex {
    Vertex::Event {
        kind,
        scope,
        data: target.to_string(),
    }
}

fn project_uri(root: &str) -> String {
    format!("file://{}", root)
}

fn document_uri(root: &str, path: &str) -> String {
    format!("file://{}/{}", root.trim_end_matches('/'), path)
}
