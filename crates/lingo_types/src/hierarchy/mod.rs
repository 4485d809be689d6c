//! Supertype relation between type descriptors.
//!
//! `TypeHierarchy` stores declared raw-name edges (`Admin <: User`,
//! `List <: Collection`) and answers supertype queries over full
//! descriptors, including parameterized ones.
//!
//! # Rules
//!
//! - `Object` (raw) and `?` are supertypes of everything.
//! - A raw supertype matches any parameterization: `List` ⊒ `List<String>`.
//! - Type arguments are invariant: `List<Object>` ⋣ `List<String>`,
//!   unless the supertype's argument is a wildcard: `List<?>` ⊒ `List<String>`.
//! - Edges carry arguments positionally: with `ArrayList <: List`,
//!   `List<String>` ⊒ `ArrayList<String>`.

use std::collections::VecDeque;
use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::type_desc::well_known;
use crate::TypeDesc;

/// Immutable supertype relation.
///
/// Built once via `TypeHierarchyBuilder` and shared (behind an `Arc`) by every
/// dispatch table of a proxy.
#[derive(Clone, Debug)]
pub struct TypeHierarchy {
    /// Raw name → direct supertypes (raw names).
    supertypes: FxHashMap<Arc<str>, SmallVec<[Arc<str>; 2]>>,
}

impl TypeHierarchy {
    /// Start an empty hierarchy (no built-in edges).
    pub fn builder() -> TypeHierarchyBuilder {
        TypeHierarchyBuilder {
            supertypes: FxHashMap::default(),
        }
    }

    /// Start a hierarchy pre-populated with the built-in edges.
    pub fn standard_builder() -> TypeHierarchyBuilder {
        Self::builder()
            .extends(well_known::MESSAGE, well_known::COMPONENT)
            .extends(well_known::COMPONENT, well_known::COMPONENT_LIKE)
            .extends(well_known::LIST, well_known::COLLECTION)
            .extends(well_known::SET, well_known::COLLECTION)
    }

    /// The built-in edges only.
    pub fn standard() -> Self {
        Self::standard_builder().build()
    }

    /// Direct supertypes declared for a raw name.
    pub fn direct_supertypes(&self, name: &str) -> &[Arc<str>] {
        self.supertypes.get(name).map_or(&[][..], SmallVec::as_slice)
    }

    /// Check whether `sup` is a supertype of (or identical to) `sub`.
    pub fn is_supertype(&self, sup: &TypeDesc, sub: &TypeDesc) -> bool {
        if sup.is_wildcard() || sup.is_raw(well_known::OBJECT) {
            return true;
        }
        if sub.is_wildcard() {
            return false;
        }

        let mut visited: FxHashSet<Arc<str>> = FxHashSet::default();
        let mut queue = VecDeque::new();
        queue.push_back(sub.clone());

        while let Some(current) = queue.pop_front() {
            let TypeDesc::Named { name, .. } = &current else {
                continue;
            };
            if !visited.insert(Arc::clone(name)) {
                continue;
            }
            if **name == *sup.name() && Self::args_match(sup.args(), current.args()) {
                return true;
            }
            for parent in self.direct_supertypes(name) {
                queue.push_back(current.with_name(parent));
            }
        }
        false
    }

    /// Erased assignability: is a value of runtime type `runtime` acceptable
    /// where `declared` is expected, ignoring type arguments?
    pub fn is_assignable(&self, declared: &TypeDesc, runtime: &TypeDesc) -> bool {
        self.is_supertype(&declared.raw(), runtime)
    }

    fn args_match(sup_args: &[TypeDesc], sub_args: &[TypeDesc]) -> bool {
        if sup_args.is_empty() {
            return true;
        }
        sup_args.len() == sub_args.len()
            && sup_args
                .iter()
                .zip(sub_args)
                .all(|(sup, sub)| sup.is_wildcard() || sup == sub)
    }
}

impl Default for TypeHierarchy {
    fn default() -> Self {
        Self::standard()
    }
}

/// Builder for `TypeHierarchy`.
#[derive(Clone, Debug)]
pub struct TypeHierarchyBuilder {
    supertypes: FxHashMap<Arc<str>, SmallVec<[Arc<str>; 2]>>,
}

impl TypeHierarchyBuilder {
    /// Declare `sub` as a direct subtype of `sup` (raw names).
    ///
    /// Duplicate edges are ignored.
    #[must_use]
    pub fn extends(mut self, sub: impl Into<Arc<str>>, sup: impl Into<Arc<str>>) -> Self {
        let sup = sup.into();
        let parents = self.supertypes.entry(sub.into()).or_default();
        if !parents.contains(&sup) {
            parents.push(sup);
        }
        self
    }

    /// Freeze the hierarchy.
    pub fn build(self) -> TypeHierarchy {
        TypeHierarchy {
            supertypes: self.supertypes,
        }
    }
}

#[cfg(test)]
mod tests;
