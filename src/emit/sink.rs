use std::path::Path;

use async_trait::async_trait;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::errors::{IndexerError, Result};
use crate::protocol::Element;

/// Sequential consumer of graph elements.
///
/// The engine awaits every `emit` before producing the next element, so the
/// order a sink observes is exactly emission order. Uses `async_trait` so
/// the trait stays object-safe and sinks can suspend on I/O.
#[async_trait]
pub trait EmitSink: Send {
    /// Accepts one element.
    async fn emit(&mut self, element: &Element) -> Result<()>;

    /// Flushes buffered output. Called once after the final element.
    async fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Sink that writes one JSON line per element to a file.
pub struct FileSink {
    writer: BufWriter<File>,
}

impl FileSink {
    /// Creates the output file, truncating any previous contents.
    pub async fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).await.map_err(IndexerError::Sink)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

#[async_trait]
impl EmitSink for FileSink {
    async fn emit(&mut self, element: &Element) -> Result<()> {
        let mut line = serde_json::to_string(element)?;
        line.push('\n');
        self.writer
            .write_all(line.as_bytes())
            .await
            .map_err(IndexerError::Sink)
    }

    async fn close(&mut self) -> Result<()> {
        self.writer.flush().await.map_err(IndexerError::Sink)
    }
}

/// Sink that collects elements in memory, for tests and inspection.
#[derive(Debug, Default)]
pub struct MemorySink {
    elements: Vec<Element>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Elements received so far, in emission order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<Element> {
        self.elements
    }
}

#[async_trait]
impl EmitSink for MemorySink {
    async fn emit(&mut self, element: &Element) -> Result<()> {
        self.elements.push(element.clone());
        Ok(())
    }
}
