//! Moniker resolution.
//!
//! Monikers attach stable, scheme-qualified identifiers to a symbol so
//! results can be linked across project boundaries. The flat dump formats
//! carry no cross-package data, so the production pipeline runs with the
//! null resolver; the emission engine still handles every presence/absence
//! combination through this seam.

use std::collections::HashMap;

use crate::location::Location;

/// A scheme-qualified symbol identifier tied to a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Moniker {
    /// Moniker scheme, e.g. `cargo` or `npm`.
    pub scheme: String,
    /// Symbol identifier within the scheme.
    pub identifier: String,
    /// Package that imports or exports the symbol.
    pub package: String,
}

impl Moniker {
    pub fn new(
        scheme: impl Into<String>,
        identifier: impl Into<String>,
        package: impl Into<String>,
    ) -> Self {
        Self {
            scheme: scheme.into(),
            identifier: identifier.into(),
            package: package.into(),
        }
    }
}

/// Pure lookup of import/export monikers for a definition range.
pub trait MonikerResolver {
    /// Moniker under which the range's symbol is imported from another
    /// package, if any.
    fn import_moniker(&self, range: &Location) -> Option<Moniker>;

    /// Moniker under which this project exports the range's symbol, if any.
    fn export_moniker(&self, range: &Location) -> Option<Moniker>;
}

/// Resolver that never reports a moniker.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullMonikerResolver;

impl MonikerResolver for NullMonikerResolver {
    fn import_moniker(&self, _range: &Location) -> Option<Moniker> {
        None
    }

    fn export_moniker(&self, _range: &Location) -> Option<Moniker> {
        None
    }
}

/// Resolver backed by explicit per-range tables, keyed by range identity.
#[derive(Debug, Default, Clone)]
pub struct TableMonikerResolver {
    imports: HashMap<String, Moniker>,
    exports: HashMap<String, Moniker>,
}

impl TableMonikerResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_import(&mut self, key: impl Into<String>, moniker: Moniker) {
        self.imports.insert(key.into(), moniker);
    }

    pub fn insert_export(&mut self, key: impl Into<String>, moniker: Moniker) {
        self.exports.insert(key.into(), moniker);
    }
}

impl MonikerResolver for TableMonikerResolver {
    fn import_moniker(&self, range: &Location) -> Option<Moniker> {
        self.imports.get(&range.identity()).cloned()
    }

    fn export_moniker(&self, range: &Location) -> Option<Moniker> {
        self.exports.get(&range.identity()).cloned()
    }
}
