//! `ProxyBuilder` for configuring and creating root proxies.

use std::sync::Arc;

use lingo_types::TypeHierarchy;

use crate::dispatcher::Pipeline;
use crate::key::KeyResolver;
use crate::{
    ArgumentHandlers, ArgumentRenderer, ArgumentTransform, DeclaredKeys, Interface, KeyStrategy,
    Proxy, ResultAssembler, ResultHandlers,
};

/// Builder for a root `Proxy`.
///
/// Everything is optional:
/// - keys default to `DeclaredKeys`,
/// - no argument or result handlers (pass-through and stringification only),
/// - no argument transform,
/// - `TypeHierarchy::standard()`.
///
/// `build` freezes both dispatch tables; handlers cannot be added afterwards.
pub struct ProxyBuilder {
    interface: Arc<Interface>,
    keys: Option<Arc<dyn KeyStrategy>>,
    arguments: ArgumentHandlers,
    transform: Option<Arc<dyn ArgumentTransform>>,
    results: ResultHandlers,
    hierarchy: Option<TypeHierarchy>,
}

impl ProxyBuilder {
    pub fn new(interface: Arc<Interface>) -> Self {
        Self {
            interface,
            keys: None,
            arguments: ArgumentHandlers::new(),
            transform: None,
            results: ResultHandlers::new(),
            hierarchy: None,
        }
    }

    /// Set the key strategy.
    #[must_use]
    pub fn keys(mut self, strategy: impl KeyStrategy + 'static) -> Self {
        self.keys = Some(Arc::new(strategy));
        self
    }

    /// Register argument handlers.
    #[must_use]
    pub fn arguments(mut self, register: impl FnOnce(&mut ArgumentHandlers)) -> Self {
        register(&mut self.arguments);
        self
    }

    /// Register argument handlers and set the argument transform.
    #[must_use]
    pub fn arguments_with(
        self,
        register: impl FnOnce(&mut ArgumentHandlers),
        transform: impl ArgumentTransform + 'static,
    ) -> Self {
        self.arguments(register).transform(transform)
    }

    /// Set the transform applied to every rendered argument, including the
    /// empty component of an absent one.
    #[must_use]
    pub fn transform(mut self, transform: impl ArgumentTransform + 'static) -> Self {
        self.transform = Some(Arc::new(transform));
        self
    }

    /// Register result handlers.
    #[must_use]
    pub fn results(mut self, register: impl FnOnce(&mut ResultHandlers)) -> Self {
        register(&mut self.results);
        self
    }

    /// Set the type hierarchy used by both dispatch tables and argument
    /// validation.
    #[must_use]
    pub fn hierarchy(mut self, hierarchy: TypeHierarchy) -> Self {
        self.hierarchy = Some(hierarchy);
        self
    }

    /// Freeze the configuration and create the root proxy.
    pub fn build(self) -> Proxy {
        let hierarchy = Arc::new(self.hierarchy.unwrap_or_default());
        let strategy = self
            .keys
            .unwrap_or_else(|| Arc::new(DeclaredKeys) as Arc<dyn KeyStrategy>);

        tracing::debug!(
            interface = self.interface.qualified_name(),
            argument_handlers = self.arguments.len(),
            result_handlers = self.results.len(),
            transform = self.transform.is_some(),
            "building proxy"
        );

        let pipeline = Pipeline {
            keys: KeyResolver::new(strategy),
            arguments: ArgumentRenderer::new(
                self.arguments,
                Arc::clone(&hierarchy),
                self.transform,
            ),
            results: ResultAssembler::new(self.results, hierarchy),
        };
        Proxy::from_parts(self.interface, Arc::new(pipeline))
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
