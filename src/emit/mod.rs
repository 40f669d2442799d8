//! Graph emission.
//!
//! [`GraphEmitter`] walks a correlated index in a fixed order and hands
//! each element to an [`EmitSink`]; [`ids`] is the deterministic naming
//! scheme for the elements it produces.

mod emitter;
pub mod ids;
mod sink;

pub use emitter::GraphEmitter;
pub use sink::{EmitSink, FileSink, MemorySink};
