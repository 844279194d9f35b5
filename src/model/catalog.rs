//! Sparse table mapping numeric force-field atom types to standardized nomenclature.
//!
//! The catalog is built once from a parameter file and is read-only afterwards. Type
//! indices that never appeared, or whose description matched no rule, simply have no
//! entry; lookups for them return `None` rather than failing.

use super::types::Name4;
use std::collections::BTreeMap;
use std::fmt;

/// How unresolvable atom types are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypePolicy {
    /// Unresolved types become blank names and a diagnostic; conversion continues.
    #[default]
    Lenient,
    /// Unresolved types in the coordinate file and catalog overflows are fatal.
    Strict,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Number of type slots; indices at or above it are rejected. `None` means unbounded.
    pub capacity: Option<u32>,
    pub policy: TypePolicy,
}

/// Standardized naming for one force-field atom type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtomTypeEntry {
    pub type_index: u32,
    pub res_name: Name4,
    pub atom_name: Name4,
    pub is_het: bool,
}

/// Why a type definition from the parameter file did not make it into the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// No rule in the rule table matched the description.
    Unmatched { description: String },
    /// The type index lies beyond the configured catalog ceiling.
    CapacityExceeded { capacity: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedType {
    pub type_index: u32,
    pub reason: Rejection,
}

impl fmt::Display for RejectedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            Rejection::Unmatched { description } => write!(
                f,
                "atom type {} (\"{}\") matched no naming rule",
                self.type_index, description
            ),
            Rejection::CapacityExceeded { capacity } => write!(
                f,
                "atom type {} exceeds the catalog capacity of {} types",
                self.type_index, capacity
            ),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AtomTypeCatalog {
    entries: BTreeMap<u32, AtomTypeEntry>,
    rejected: Vec<RejectedType>,
}

impl AtomTypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an entry, replacing any earlier definition of the same type index.
    ///
    /// Returns the replaced entry, if any.
    pub fn insert(&mut self, entry: AtomTypeEntry) -> Option<AtomTypeEntry> {
        self.entries.insert(entry.type_index, entry)
    }

    pub fn reject(&mut self, type_index: u32, reason: Rejection) {
        self.rejected.push(RejectedType { type_index, reason });
    }

    pub fn get(&self, type_index: u32) -> Option<&AtomTypeEntry> {
        self.entries.get(&type_index)
    }

    pub fn contains(&self, type_index: u32) -> bool {
        self.entries.contains_key(&type_index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AtomTypeEntry> {
        self.entries.values()
    }

    /// Type definitions that were seen but left out of the catalog.
    pub fn rejected(&self) -> &[RejectedType] {
        &self.rejected
    }
}
