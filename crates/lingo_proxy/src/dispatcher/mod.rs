//! The generic invocation dispatcher.
//!
//! A `Proxy` answers calls on an `Interface`. Every call goes through the
//! same fixed order, decided by the method's `MethodKind`:
//!
//! 1. identity methods (`eq`, `hash`, `to_string`),
//! 2. provided methods (their own body),
//! 3. child accessors (a cached proxy for a nested interface),
//! 4. translation methods (key → arguments → result).
//!
//! # Caching
//!
//! Each proxy memoizes, per method, the resolved key and return type
//! (`ResolvedMethod`) and the child proxies it hands out. Both maps are
//! `DashMap`s filled with compute-if-absent: a racing caller may build a
//! candidate that is then discarded, but every caller observes the single
//! retained entry.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use dashmap::DashMap;
use lingo_types::{Reflect, TypeDesc, Value};
use rustc_hash::FxBuildHasher;

use crate::argument::ArgumentRenderer;
use crate::interface::identity;
use crate::key::KeyResolver;
use crate::result::ResultAssembler;
use crate::{
    Interface, Invocation, MethodDesc, MethodId, MethodKind, ProxyBuilder, ProxyError, ProxyResult,
};

/// The three pipeline stages, shared by a root proxy and all its children.
#[derive(Debug)]
pub(crate) struct Pipeline {
    pub(crate) keys: KeyResolver,
    pub(crate) arguments: ArgumentRenderer,
    pub(crate) results: ResultAssembler,
}

/// Per-method data resolved on first call.
#[derive(Clone, Debug)]
pub struct ResolvedMethod {
    key: Arc<str>,
    return_type: TypeDesc,
}

impl ResolvedMethod {
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[inline]
    pub fn return_type(&self) -> &TypeDesc {
        &self.return_type
    }
}

struct ProxyInner {
    interface: Arc<Interface>,
    pipeline: Arc<Pipeline>,
    resolved: DashMap<MethodId, Arc<ResolvedMethod>, FxBuildHasher>,
    children: DashMap<MethodId, Proxy, FxBuildHasher>,
}

/// Runtime implementation of an `Interface`.
///
/// Cloning is O(1) and yields the *same* proxy: clones compare equal and
/// share caches.
#[derive(Clone)]
pub struct Proxy {
    inner: Arc<ProxyInner>,
}

impl Proxy {
    /// Start configuring a proxy for `interface`.
    pub fn builder(interface: Arc<Interface>) -> ProxyBuilder {
        ProxyBuilder::new(interface)
    }

    pub(crate) fn from_parts(interface: Arc<Interface>, pipeline: Arc<Pipeline>) -> Self {
        Proxy {
            inner: Arc::new(ProxyInner {
                interface,
                pipeline,
                resolved: DashMap::with_hasher(FxBuildHasher),
                children: DashMap::with_hasher(FxBuildHasher),
            }),
        }
    }

    #[inline]
    pub fn interface(&self) -> &Arc<Interface> {
        &self.inner.interface
    }

    /// Invoke `name`. An absent argument list is treated as empty.
    #[tracing::instrument(
        level = "trace",
        skip_all,
        fields(interface = self.inner.interface.qualified_name(), method = name)
    )]
    pub fn invoke(&self, name: &str, args: Option<&[Option<Value>]>) -> ProxyResult<Value> {
        let args = args.unwrap_or_default();
        let method = self.method(name)?;

        // Identity methods answer any argument list.
        let identity = matches!(method.kind(), MethodKind::Identity);
        if !identity && args.len() != method.params().len() {
            return Err(ProxyError::ArityMismatch {
                method: method.id().clone(),
                expected: method.params().len(),
                got: args.len(),
            });
        }

        match method.kind() {
            MethodKind::Identity => self.identity(method, args),
            MethodKind::Provided(body) => body(self, args),
            MethodKind::Child(interface) => Ok(self.child_for(method, interface).into_value()),
            MethodKind::Translation => self.translate(method, args),
        }
    }

    /// Invoke `name` with `args`.
    pub fn call(&self, name: &str, args: &[Option<Value>]) -> ProxyResult<Value> {
        self.invoke(name, Some(args))
    }

    /// Invoke `name` and extract the result as an `R`.
    pub fn call_as<R>(&self, name: &str, args: &[Option<Value>]) -> ProxyResult<R>
    where
        R: Reflect + Clone,
    {
        let value = self.call(name, args)?;
        value
            .view::<R>()
            .cloned()
            .ok_or_else(|| ProxyError::ResultTypeMismatch {
                method: MethodId::new(self.inner.interface.qualified_name(), name),
                expected: R::type_desc(),
                got: value.type_desc().clone(),
            })
    }

    /// The proxy returned by the child accessor `name`.
    pub fn child(&self, name: &str) -> ProxyResult<Proxy> {
        self.call_as::<Proxy>(name, &[])
    }

    /// Resolved key and return type of translation method `name`.
    pub fn resolved(&self, name: &str) -> ProxyResult<Arc<ResolvedMethod>> {
        let method = self.method(name)?;
        self.resolve_method(method)
    }

    fn method(&self, name: &str) -> ProxyResult<&MethodDesc> {
        self.inner
            .interface
            .method(name)
            .ok_or_else(|| ProxyError::UnknownMethod {
                interface: self.inner.interface.qualified_name().to_owned(),
                method: name.to_owned(),
            })
    }

    fn identity(&self, method: &MethodDesc, args: &[Option<Value>]) -> ProxyResult<Value> {
        match method.name() {
            identity::EQ => {
                let other = match args {
                    [Some(other)] => other.downcast_ref::<Proxy>(),
                    _ => None,
                };
                Ok(Value::new(other.is_some_and(|other| self == other)))
            }
            identity::HASH => Ok(Value::new(self.identity_hash())),
            identity::TO_STRING => Ok(Value::new(self.to_string())),
            _ => Err(ProxyError::UnsupportedOperation {
                method: method.id().clone(),
            }),
        }
    }

    fn child_for(&self, method: &MethodDesc, interface: &Arc<Interface>) -> Proxy {
        if let Some(existing) = self
            .inner
            .children
            .get(method.id())
            .map(|hit| hit.value().clone())
        {
            return existing;
        }

        let candidate =
            Proxy::from_parts(Arc::clone(interface), Arc::clone(&self.inner.pipeline));
        let retained = self
            .inner
            .children
            .entry(method.id().clone())
            .or_insert(candidate)
            .value()
            .clone();
        tracing::debug!(
            method = %method.id(),
            child = interface.qualified_name(),
            "child proxy created"
        );
        retained
    }

    fn resolve_method(&self, method: &MethodDesc) -> ProxyResult<Arc<ResolvedMethod>> {
        if let Some(resolved) = self
            .inner
            .resolved
            .get(method.id())
            .map(|hit| Arc::clone(hit.value()))
        {
            return Ok(resolved);
        }

        let key = self.inner.pipeline.keys.resolve(method)?;
        let candidate = Arc::new(ResolvedMethod {
            key,
            return_type: method.return_type().clone(),
        });
        Ok(Arc::clone(
            self.inner
                .resolved
                .entry(method.id().clone())
                .or_insert(candidate)
                .value(),
        ))
    }

    fn translate(&self, method: &MethodDesc, args: &[Option<Value>]) -> ProxyResult<Value> {
        let resolved = self.resolve_method(method)?;
        let invocation = Invocation::new(self, method, args);
        let pipeline = &self.inner.pipeline;
        let rendered = pipeline.arguments.render(&invocation)?;
        pipeline
            .results
            .assemble(method, Arc::clone(&resolved.key), rendered)
    }

    fn identity_hash(&self) -> usize {
        Arc::as_ptr(&self.inner) as usize
    }

    fn into_value(self) -> Value {
        let ty = TypeDesc::named(self.inner.interface.name());
        Value::with_type(ty, self)
    }
}

impl PartialEq for Proxy {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Proxy {}

impl Hash for Proxy {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity_hash().hash(state);
    }
}

impl fmt::Display for Proxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Proxy<{}>", self.inner.interface.name())
    }
}

impl fmt::Debug for Proxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Proxy")
            .field("interface", &self.inner.interface.qualified_name())
            .field("resolved", &self.inner.resolved.len())
            .field("children", &self.inner.children.len())
            .finish()
    }
}

impl Reflect for Proxy {
    fn type_desc() -> TypeDesc {
        TypeDesc::named("Proxy")
    }

    fn stringify(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
