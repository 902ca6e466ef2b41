//! # Identifier Remapping
//!
//! Every catalog draws its ids from its own namespace: style ids, abstract
//! numbering ids, numbering instance ids and relationship ids. When an
//! appended document brings an id the master already uses, the remapper
//! hands out a replacement and records the old → new pair.
//!
//! ## Allocation
//!
//! - An id the master does not use is kept unchanged and reserved.
//! - A taken string id becomes `doc<N>_<id>`, where `N` is the 1-based index
//!   of the current append. Should that be taken too, a numeric suffix is
//!   added (`doc<N>_<id>_2`, `doc<N>_<id>_3`, ...).
//! - A taken numeric id becomes one past the largest reserved id.
//!
//! Asking twice for the same id within one append returns the same answer,
//! and two different requests never receive the same id.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

use log::debug;

use crate::error::{Error, Result};

/// Upper bound on the numeric suffixes tried for one prefixed string id.
const MAX_SUFFIX: u32 = 10_000;

/// The id spaces a document maintains independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Style,
    AbstractNum,
    NumInstance,
    Relationship,
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Namespace::Style => "style",
            Namespace::AbstractNum => "numbering-abstract",
            Namespace::NumInstance => "numbering-instance",
            Namespace::Relationship => "relationship",
        };
        f.write_str(name)
    }
}

/// An id type the remapper knows how to synthesize replacements for.
pub trait Identifier: Clone + Eq + Hash + fmt::Display {
    /// Produce an id not in `reserved`, derived from `requested` for the
    /// append with 1-based index `document`.
    fn synthesize(requested: &Self, document: usize, reserved: &HashSet<Self>) -> Option<Self>;
}

impl Identifier for String {
    fn synthesize(requested: &Self, document: usize, reserved: &HashSet<Self>) -> Option<Self> {
        let base = format!("doc{}_{}", document, requested);
        if !reserved.contains(&base) {
            return Some(base);
        }
        (2..=MAX_SUFFIX)
            .map(|n| format!("{}_{}", base, n))
            .find(|candidate| !reserved.contains(candidate))
    }
}

impl Identifier for u32 {
    fn synthesize(_requested: &Self, _document: usize, reserved: &HashSet<Self>) -> Option<Self> {
        match reserved.iter().max() {
            Some(max) => max.checked_add(1),
            None => Some(0),
        }
    }
}

/// Old → new id pairs produced during one append.
#[derive(Debug, Clone)]
pub struct IdentifierMap<T> {
    namespace: Namespace,
    document: usize,
    entries: HashMap<T, T>,
    order: Vec<T>,
}

impl<T: Identifier> IdentifierMap<T> {
    pub fn new(namespace: Namespace, document: usize) -> Self {
        Self {
            namespace,
            document,
            entries: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// 1-based index of the append this map belongs to.
    pub fn document(&self) -> usize {
        self.document
    }

    pub fn get(&self, old: &T) -> Option<&T> {
        self.entries.get(old)
    }

    pub fn contains(&self, old: &T) -> bool {
        self.entries.contains_key(old)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pairs in the order they were recorded.
    pub fn iter(&self) -> impl Iterator<Item = (&T, &T)> {
        self.order
            .iter()
            .filter_map(move |old| self.entries.get(old).map(|new| (old, new)))
    }

    /// Pairs whose id actually changed.
    pub fn renamed(&self) -> impl Iterator<Item = (&T, &T)> {
        self.iter().filter(|(old, new)| old != new)
    }

    fn record(&mut self, old: T, new: T) {
        if self.entries.insert(old.clone(), new).is_none() {
            self.order.push(old);
        }
    }
}

/// Allocates collision-free ids in one namespace for one append.
#[derive(Debug)]
pub struct IdRemapper<T> {
    reserved: HashSet<T>,
    map: IdentifierMap<T>,
}

impl<T: Identifier> IdRemapper<T> {
    /// Start a remapper whose namespace already holds `existing`.
    pub fn new(namespace: Namespace, document: usize, existing: impl IntoIterator<Item = T>) -> Self {
        Self {
            reserved: existing.into_iter().collect(),
            map: IdentifierMap::new(namespace, document),
        }
    }

    /// Mark an id as unavailable without mapping anything to it.
    pub fn reserve(&mut self, id: T) {
        self.reserved.insert(id);
    }

    pub fn is_reserved(&self, id: &T) -> bool {
        self.reserved.contains(id)
    }

    /// Assign an id for `requested`, keeping it when free.
    pub fn allocate(&mut self, requested: &T) -> Result<T> {
        if let Some(assigned) = self.map.get(requested) {
            return Ok(assigned.clone());
        }

        let assigned = if self.is_reserved(requested) {
            T::synthesize(requested, self.map.document, &self.reserved).ok_or_else(|| {
                Error::IdentifierExhaustion {
                    namespace: self.map.namespace.to_string(),
                    requested: requested.to_string(),
                }
            })?
        } else {
            requested.clone()
        };

        if &assigned != requested {
            debug!(
                "{} id '{}' taken, assigned '{}'",
                self.map.namespace, requested, assigned
            );
        }
        self.reserved.insert(assigned.clone());
        self.map.record(requested.clone(), assigned.clone());
        Ok(assigned)
    }

    /// Point `old` at an id that already exists (no allocation happens).
    pub fn alias(&mut self, old: &T, existing: T) {
        self.map.record(old.clone(), existing);
    }

    pub fn map(&self) -> &IdentifierMap<T> {
        &self.map
    }

    pub fn into_map(self) -> IdentifierMap<T> {
        self.map
    }
}
