//! Priority-ordered dispatch table with a concurrent lookup cache.

use std::cmp::Reverse;
use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use lingo_types::{TypeDesc, TypeHierarchy};
use rustc_hash::FxBuildHasher;

/// A registered handler and the type it answers for.
#[derive(Clone, Debug)]
pub struct HandlerEntry<H> {
    ty: TypeDesc,
    handler: H,
    priority: i32,
}

impl<H> HandlerEntry<H> {
    pub fn new(ty: TypeDesc, handler: H, priority: i32) -> Self {
        HandlerEntry {
            ty,
            handler,
            priority,
        }
    }

    /// The type this entry matches (and all its subtypes).
    #[inline]
    pub fn ty(&self) -> &TypeDesc {
        &self.ty
    }

    #[inline]
    pub fn handler(&self) -> &H {
        &self.handler
    }

    #[inline]
    pub fn priority(&self) -> i32 {
        self.priority
    }
}

/// Collects handler entries before a table is frozen.
pub struct DispatchTableBuilder<H> {
    entries: Vec<HandlerEntry<H>>,
}

impl<H> DispatchTableBuilder<H> {
    pub fn new() -> Self {
        DispatchTableBuilder {
            entries: Vec::new(),
        }
    }

    /// Register `handler` for `ty` and its subtypes.
    pub fn register(&mut self, ty: TypeDesc, handler: H, priority: i32) -> &mut Self {
        self.entries.push(HandlerEntry::new(ty, handler, priority));
        self
    }

    /// Register with the default priority (0).
    pub fn register_default(&mut self, ty: TypeDesc, handler: H) -> &mut Self {
        self.register(ty, handler, 0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Freeze the table.
    ///
    /// Entries are ordered by priority, highest first. The sort is stable, so
    /// equal priorities keep their registration order.
    pub fn build(mut self, hierarchy: Arc<TypeHierarchy>) -> TypedDispatchTable<H> {
        self.entries.sort_by_key(|entry| Reverse(entry.priority));
        TypedDispatchTable {
            entries: self.entries.into_boxed_slice(),
            hierarchy,
            cache: DashMap::with_hasher(FxBuildHasher),
        }
    }
}

impl<H> Default for DispatchTableBuilder<H> {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of a lookup, as remembered by the cache.
///
/// `Miss` is a marker of its own so that "nothing matched" never needs a
/// handler value to stand in for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Lookup {
    Found(usize),
    Miss,
}

/// Frozen handler table.
///
/// Entries never change after `build`; only the lookup cache grows. The cache
/// is a `DashMap`, so concurrent `resolve` calls for the same query may both
/// scan, but they compute the same answer and only one is retained.
pub struct TypedDispatchTable<H> {
    entries: Box<[HandlerEntry<H>]>,
    hierarchy: Arc<TypeHierarchy>,
    cache: DashMap<TypeDesc, Lookup, FxBuildHasher>,
}

impl<H> TypedDispatchTable<H> {
    /// Resolve the handler for `query`.
    pub fn resolve(&self, query: &TypeDesc) -> Option<&H> {
        self.resolve_entry(query).map(HandlerEntry::handler)
    }

    /// Resolve the winning entry for `query`.
    ///
    /// The first entry, in priority order, whose type is a supertype of (or
    /// equal to) `query` wins. Results are cached per query type, misses
    /// included. An empty table answers `None` without touching the cache.
    pub fn resolve_entry(&self, query: &TypeDesc) -> Option<&HandlerEntry<H>> {
        if self.entries.is_empty() {
            return None;
        }

        // The read guard must be released before `entry` takes the shard lock.
        let cached = self.cache.get(query).map(|hit| *hit);
        let lookup = match cached {
            Some(lookup) => lookup,
            None => {
                let computed = self.scan_index(query).map_or(Lookup::Miss, Lookup::Found);
                tracing::trace!(
                    query = %query,
                    found = matches!(computed, Lookup::Found(_)),
                    "dispatch cache fill"
                );
                *self.cache.entry(query.clone()).or_insert(computed)
            }
        };

        match lookup {
            Lookup::Found(index) => self.entries.get(index),
            Lookup::Miss => None,
        }
    }

    /// Resolve without consulting or filling the cache.
    pub fn scan(&self, query: &TypeDesc) -> Option<&HandlerEntry<H>> {
        self.scan_index(query).and_then(|index| self.entries.get(index))
    }

    fn scan_index(&self, query: &TypeDesc) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| self.hierarchy.is_supertype(&entry.ty, query))
    }

    /// Entries in resolution order.
    pub fn entries(&self) -> &[HandlerEntry<H>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct query types remembered so far.
    pub fn cached_queries(&self) -> usize {
        self.cache.len()
    }

    pub fn hierarchy(&self) -> &Arc<TypeHierarchy> {
        &self.hierarchy
    }
}

impl<H> fmt::Debug for TypedDispatchTable<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedDispatchTable")
            .field(
                "entries",
                &self
                    .entries
                    .iter()
                    .map(|e| (e.ty.to_string(), e.priority))
                    .collect::<Vec<_>>(),
            )
            .field("cached_queries", &self.cache.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
