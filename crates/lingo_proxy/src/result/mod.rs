//! Result assembly: key + rendered arguments to the declared return type.

use std::fmt;
use std::sync::Arc;

use lingo_dispatch::{DispatchTableBuilder, TypedDispatchTable};
use lingo_types::{well_known, Component, Message, Reflect, TypeDesc, TypeHierarchy, Value};

use crate::{MethodDesc, ProxyError, ProxyResult};

type ResultFn = Arc<dyn Fn(&MethodDesc, Message) -> Value + Send + Sync>;

/// Registration collection for result handlers.
#[derive(Default)]
pub struct ResultHandlers {
    table: DispatchTableBuilder<ResultFn>,
}

impl ResultHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce an `R` for methods declared to return `R`.
    pub fn add<R, F>(&mut self, produce: F) -> &mut Self
    where
        R: Reflect,
        F: Fn(&MethodDesc, Message) -> R + Send + Sync + 'static,
    {
        self.add_prioritized(0, produce)
    }

    pub fn add_prioritized<R, F>(&mut self, priority: i32, produce: F) -> &mut Self
    where
        R: Reflect,
        F: Fn(&MethodDesc, Message) -> R + Send + Sync + 'static,
    {
        self.add_for(R::type_desc(), priority, move |method, message| {
            Value::new(produce(method, message))
        })
    }

    /// Register under an explicit descriptor; the handler builds the `Value`
    /// itself, so it may also choose the value's runtime descriptor.
    pub fn add_for<F>(&mut self, ty: TypeDesc, priority: i32, produce: F) -> &mut Self
    where
        F: Fn(&MethodDesc, Message) -> Value + Send + Sync + 'static,
    {
        self.table.register(ty, Arc::new(produce), priority);
        self
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// Converts an assembled `Message` into a method's declared return type.
pub struct ResultAssembler {
    table: TypedDispatchTable<ResultFn>,
}

impl ResultAssembler {
    pub fn new(handlers: ResultHandlers, hierarchy: Arc<TypeHierarchy>) -> Self {
        ResultAssembler {
            table: handlers.table.build(hierarchy),
        }
    }

    /// Build `Message(key, rendered)` and convert it.
    ///
    /// A handler registered for the declared return type wins. Without one,
    /// return types that are supertypes of `Message` receive the message
    /// itself (`Component`-like types get it wrapped as a translatable
    /// component). Anything else is `UnsupportedReturnType`.
    #[tracing::instrument(level = "trace", skip_all, fields(method = %method.id(), key = &*key))]
    pub fn assemble(
        &self,
        method: &MethodDesc,
        key: Arc<str>,
        rendered: Vec<Component>,
    ) -> ProxyResult<Value> {
        let message = Message::new(key, rendered);
        let declared = method.return_type();

        if let Some(produce) = self.table.resolve(declared) {
            return Ok(produce(method, message));
        }

        let hierarchy = self.table.hierarchy();
        if !hierarchy.is_supertype(declared, &TypeDesc::message()) {
            return Err(ProxyError::UnsupportedReturnType {
                ty: declared.clone(),
            });
        }

        let wants_component = !declared.is_wildcard()
            && !declared.is_raw(well_known::OBJECT)
            && hierarchy.is_supertype(declared, &TypeDesc::component());
        Ok(if wants_component {
            Value::new(Component::translatable(message))
        } else {
            Value::new(message)
        })
    }

    pub fn handler_count(&self) -> usize {
        self.table.len()
    }
}

impl fmt::Debug for ResultAssembler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultAssembler")
            .field("handlers", &self.table.len())
            .finish()
    }
}
