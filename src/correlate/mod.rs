//! Fact storage and correlation.
//!
//! [`FactStore`] accumulates normalized facts from the dialect front ends;
//! [`FactStore::finalize`] correlates them into the immutable
//! [`CorrelatedIndex`] the emission engine walks.

mod index;
mod store;

pub use index::{CorrelatedIndex, DefinitionGroup, RangeEntry, RangeId};
pub use store::{Fact, FactStore};
