//! Translation key resolution.
//!
//! A `KeyStrategy` maps a method to its key. `KeyResolver` wraps one strategy
//! and memoizes successful resolutions per method identity; failures are
//! recomputed on every call so they keep surfacing to the caller.

mod naming;

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use rustc_hash::{FxBuildHasher, FxHashMap};

use crate::{MethodDesc, MethodId, ProxyError, ProxyResult};

pub use naming::{KeyNaming, WordSplit};

/// Maps a method to its translation key.
pub trait KeyStrategy: Send + Sync {
    /// Resolve the key, or fail with `MissingKey`.
    fn resolve(&self, method: &MethodDesc) -> ProxyResult<Arc<str>>;
}

impl<F> KeyStrategy for F
where
    F: Fn(&MethodDesc) -> Option<String> + Send + Sync,
{
    fn resolve(&self, method: &MethodDesc) -> ProxyResult<Arc<str>> {
        self(method).map(Arc::from).ok_or_else(|| missing(method))
    }
}

fn missing(method: &MethodDesc) -> ProxyError {
    ProxyError::MissingKey {
        method: method.id().clone(),
    }
}

/// Uses the key declared on each method (`MethodDecl::key`).
#[derive(Clone, Copy, Debug, Default)]
pub struct DeclaredKeys;

impl KeyStrategy for DeclaredKeys {
    fn resolve(&self, method: &MethodDesc) -> ProxyResult<Arc<str>> {
        method
            .declared_key()
            .map(Arc::from)
            .ok_or_else(|| missing(method))
    }
}

/// Derives keys from the interface path and method name.
///
/// The root interface contributes only the configured prefix; each nested
/// interface and the method name contribute their words, lower-cased:
/// `Messages.Errors::notFound` → `errors.not.found`.
#[derive(Clone, Debug, Default)]
pub struct DerivedKeys {
    naming: KeyNaming,
}

impl DerivedKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_naming(naming: KeyNaming) -> Self {
        DerivedKeys { naming }
    }

    /// Default naming with a key prefix.
    pub fn prefixed(prefix: impl Into<String>) -> Self {
        Self::with_naming(KeyNaming {
            prefix: prefix.into(),
            ..KeyNaming::default()
        })
    }

    pub fn naming(&self) -> &KeyNaming {
        &self.naming
    }

    /// The derived key for `method`.
    pub fn derive(&self, method: &MethodDesc) -> String {
        let naming = &self.naming;
        let mut segments: Vec<String> = Vec::with_capacity(method.path().len() + 1);
        if !naming.prefix.is_empty() {
            segments.push(naming.prefix.clone());
        }
        segments.extend(
            method
                .path()
                .iter()
                .skip(1)
                .map(|segment| naming.format(segment)),
        );
        segments.push(naming.format(method.name()));
        segments.retain(|segment| !segment.is_empty());
        segments.join(&naming.delimiter.to_string())
    }
}

impl KeyStrategy for DerivedKeys {
    fn resolve(&self, method: &MethodDesc) -> ProxyResult<Arc<str>> {
        let key = self.derive(method);
        if key.is_empty() {
            return Err(missing(method));
        }
        Ok(Arc::from(key))
    }
}

/// Explicit key map from method path (`Messages.Errors.not_found`) to key.
///
/// Methods missing from the map go to the fallback strategy, if any.
#[derive(Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct KeyTable {
    #[cfg_attr(feature = "serde", serde(default))]
    keys: FxHashMap<String, String>,
    #[cfg_attr(feature = "serde", serde(skip))]
    fallback: Option<Arc<dyn KeyStrategy>>,
}

impl KeyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `path` (qualified interface name, `.`, method name) to `key`.
    #[must_use]
    pub fn entry(mut self, path: impl Into<String>, key: impl Into<String>) -> Self {
        self.keys.insert(path.into(), key.into());
        self
    }

    /// Strategy consulted for methods without an entry.
    #[must_use]
    pub fn fallback(mut self, strategy: impl KeyStrategy + 'static) -> Self {
        self.fallback = Some(Arc::new(strategy));
        self
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    fn path_of(method: &MethodDesc) -> String {
        format!("{}.{}", method.id().interface(), method.name())
    }
}

impl KeyStrategy for KeyTable {
    fn resolve(&self, method: &MethodDesc) -> ProxyResult<Arc<str>> {
        if let Some(key) = self.keys.get(&Self::path_of(method)) {
            return Ok(Arc::from(key.as_str()));
        }
        match &self.fallback {
            Some(fallback) => fallback.resolve(method),
            None => Err(missing(method)),
        }
    }
}

impl fmt::Debug for KeyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyTable")
            .field("keys", &self.keys.len())
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}

/// Memoizing front for a `KeyStrategy`.
pub struct KeyResolver {
    strategy: Arc<dyn KeyStrategy>,
    cache: DashMap<MethodId, Arc<str>, FxBuildHasher>,
}

impl KeyResolver {
    pub fn new(strategy: Arc<dyn KeyStrategy>) -> Self {
        KeyResolver {
            strategy,
            cache: DashMap::with_hasher(FxBuildHasher),
        }
    }

    /// Resolve the key for `method`, computing it at most once per method
    /// unless resolution fails.
    pub fn resolve(&self, method: &MethodDesc) -> ProxyResult<Arc<str>> {
        if let Some(key) = self.cache.get(method.id()).map(|hit| Arc::clone(hit.value())) {
            return Ok(key);
        }
        let key = self.strategy.resolve(method)?;
        tracing::trace!(method = %method.id(), key = &*key, "key cache fill");
        Ok(Arc::clone(
            self.cache
                .entry(method.id().clone())
                .or_insert(key)
                .value(),
        ))
    }

    /// Number of memoized keys.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

impl Default for KeyResolver {
    fn default() -> Self {
        KeyResolver::new(Arc::new(DeclaredKeys))
    }
}

impl fmt::Debug for KeyResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyResolver")
            .field("cached", &self.cache.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[expect(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Tests use unwrap and expect for brevity"
)]
