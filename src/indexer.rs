//! End-to-end conversion: expand inputs, parse, correlate, emit.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::{debug, info, warn};

use crate::config::EmitConfig;
use crate::correlate::{CorrelatedIndex, FactStore};
use crate::dialect::{reader_for, Dialect};
use crate::emit::{EmitSink, FileSink, GraphEmitter};
use crate::errors::{IndexerError, Result};
use crate::moniker::NullMonikerResolver;

/// Counters from one conversion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexSummary {
    /// Input files parsed.
    pub file_count: usize,
    /// Facts after deduplication by range identity.
    pub fact_count: usize,
    /// Distinct documents in the graph.
    pub document_count: usize,
    /// Range vertices emitted.
    pub range_count: usize,
    /// Total graph elements written.
    pub element_count: u64,
    pub duration_ms: u64,
}

/// Orchestrates one dump-to-LSIF conversion.
pub struct Indexer {
    dialect: Dialect,
    config: EmitConfig,
}

impl Indexer {
    pub fn new(dialect: Dialect, config: EmitConfig) -> Self {
        Self { dialect, config }
    }

    /// Expands `pattern` (a literal path or glob), parses every matched
    /// file, correlates the facts and writes the graph to `out`.
    ///
    /// A stale file at `out` is removed before parsing starts. Output of a
    /// failed run is left in place for inspection; cleanup happens at the
    /// start of the next run, not after the failure.
    pub async fn run(&self, pattern: &str, out: &Path) -> Result<IndexSummary> {
        let started = Instant::now();

        let inputs = expand_inputs(pattern)?;
        remove_stale_output(out)?;

        let mut store = FactStore::new();
        let reader = reader_for(self.dialect);
        for input in &inputs {
            let text = fs::read_to_string(input)?;
            let facts = reader.parse(&input.to_string_lossy(), &text)?;
            debug!(
                path = %input.display(),
                dialect = reader.name(),
                facts = facts.len(),
                "parsed input file"
            );
            for fact in facts {
                store.insert(fact);
            }
        }
        let fact_count = store.len();
        let index = store.finalize()?;

        let contents = self.load_contents(&index);
        let mut sink = FileSink::create(out).await?;
        let resolver = NullMonikerResolver;
        let emitter = GraphEmitter::new(&index, &resolver, &self.config, &contents, &mut sink);
        let element_count = emitter.run().await?;
        sink.close().await?;

        let summary = IndexSummary {
            file_count: inputs.len(),
            fact_count,
            document_count: index.documents().len(),
            range_count: index.len(),
            element_count,
            duration_ms: started.elapsed().as_millis() as u64,
        };
        info!(
            files = summary.file_count,
            facts = summary.fact_count,
            documents = summary.document_count,
            elements = summary.element_count,
            ms = summary.duration_ms,
            "conversion complete"
        );
        Ok(summary)
    }

    /// Base64 contents per document when embedding is enabled. Unreadable
    /// source files are skipped; their document vertices simply carry no
    /// contents.
    fn load_contents(&self, index: &CorrelatedIndex) -> BTreeMap<String, String> {
        let mut contents = BTreeMap::new();
        if !self.config.embed_contents {
            return contents;
        }
        let root = Path::new(&self.config.project_root);
        for document in index.documents() {
            match fs::read(root.join(document)) {
                Ok(bytes) => {
                    contents.insert(document.clone(), STANDARD.encode(bytes));
                }
                Err(e) => {
                    warn!(document = %document, error = %e, "cannot embed document contents");
                }
            }
        }
        contents
    }
}

/// Expands a literal path or glob pattern into a sorted list of files.
fn expand_inputs(pattern: &str) -> Result<Vec<PathBuf>> {
    let entries = glob::glob(pattern).map_err(|e| IndexerError::Config {
        message: format!("invalid input pattern '{}': {}", pattern, e),
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| IndexerError::Io(e.into_error()))?;
        if path.is_file() {
            files.push(path);
        }
    }
    // Sorted so multi-file runs feed the store in a stable order.
    files.sort();

    if files.is_empty() {
        return Err(IndexerError::EmptyInput {
            pattern: pattern.to_string(),
        });
    }
    Ok(files)
}

fn remove_stale_output(out: &Path) -> Result<()> {
    match fs::remove_file(out) {
        Ok(()) => {
            debug!(path = %out.display(), "removed stale output");
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
