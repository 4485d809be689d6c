//! Argument rendering: call values to `Component`s.
//!
//! Each argument is rendered by the handler registered for its parameter's
//! *declared* type (most relevant supertype wins, see `TypedDispatchTable`).
//! Arguments without a handler pass through when they already are renderable
//! and are stringified otherwise. An optional `ArgumentTransform` then
//! post-processes every result, including the empty component rendered for
//! an absent argument.

mod placeholders;

use std::fmt;
use std::sync::Arc;

use lingo_dispatch::{DispatchTableBuilder, TypedDispatchTable};
use lingo_types::{Component, ComponentLike, Message, Reflect, TypeDesc, TypeHierarchy, Value};

use crate::invocation::Argument;
use crate::{Invocation, MethodDesc, ParamDesc, ProxyError, ProxyResult};

pub use placeholders::NamedPlaceholders;

/// Erased argument handler: `None` when the value cannot be viewed as the
/// Rust type the handler was registered for.
type RenderFn = Arc<dyn Fn(&Value) -> Option<Component> + Send + Sync>;

/// Post-processes every rendered argument, empty ones included.
pub trait ArgumentTransform: Send + Sync {
    fn transform(&self, param: &ParamDesc, rendered: Component) -> Component;
}

impl<F> ArgumentTransform for F
where
    F: Fn(&ParamDesc, Component) -> Component + Send + Sync,
{
    fn transform(&self, param: &ParamDesc, rendered: Component) -> Component {
        self(param, rendered)
    }
}

/// Registration collection for argument handlers.
///
/// ```ignore
/// handlers
///     .add(|user: &User| Component::text(&user.name))
///     .add_prioritized(10, |admin: &Admin| Component::text(format!("[{}]", admin.user.name)))
///     .add_for(TypeDesc::list(TypeDesc::string()), 0, |items: &Vec<String>| {
///         Component::text(items.join(", "))
///     });
/// ```
#[derive(Default)]
pub struct ArgumentHandlers {
    table: DispatchTableBuilder<RenderFn>,
}

impl ArgumentHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle parameters declared as `T` (or a supertype-compatible
    /// descriptor of it) with the default priority.
    pub fn add<T, F>(&mut self, render: F) -> &mut Self
    where
        T: Reflect,
        F: Fn(&T) -> Component + Send + Sync + 'static,
    {
        self.add_for::<T, F>(T::type_desc(), 0, render)
    }

    pub fn add_prioritized<T, F>(&mut self, priority: i32, render: F) -> &mut Self
    where
        T: Reflect,
        F: Fn(&T) -> Component + Send + Sync + 'static,
    {
        self.add_for::<T, F>(T::type_desc(), priority, render)
    }

    /// Register under an explicit descriptor, e.g. `List<String>` for a
    /// `Vec<String>` handler that must not see `List<User>` parameters.
    pub fn add_for<T, F>(&mut self, ty: TypeDesc, priority: i32, render: F) -> &mut Self
    where
        T: Reflect,
        F: Fn(&T) -> Component + Send + Sync + 'static,
    {
        let erased: RenderFn = Arc::new(move |value: &Value| value.view::<T>().map(&render));
        self.table.register(ty, erased, priority);
        self
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// Renders the arguments of an `Invocation`.
pub struct ArgumentRenderer {
    table: TypedDispatchTable<RenderFn>,
    transform: Option<Arc<dyn ArgumentTransform>>,
}

impl ArgumentRenderer {
    pub fn new(
        handlers: ArgumentHandlers,
        hierarchy: Arc<TypeHierarchy>,
        transform: Option<Arc<dyn ArgumentTransform>>,
    ) -> Self {
        ArgumentRenderer {
            table: handlers.table.build(hierarchy),
            transform,
        }
    }

    /// Render every argument, preserving order.
    #[tracing::instrument(
        level = "trace",
        skip_all,
        fields(method = %invocation.method().id(), args = invocation.arguments().len())
    )]
    pub fn render(&self, invocation: &Invocation<'_>) -> ProxyResult<Vec<Component>> {
        invocation
            .arguments()
            .iter()
            .map(|argument| self.render_one(invocation.method(), argument))
            .collect()
    }

    fn render_one(&self, method: &MethodDesc, argument: &Argument<'_>) -> ProxyResult<Component> {
        let param = argument.param();
        let Some(value) = argument.value() else {
            return Ok(self.finish(param, Component::empty()));
        };

        let hierarchy = self.table.hierarchy();
        if !hierarchy.is_assignable(param.ty(), value.type_desc()) {
            return Err(mismatch(method, param, param.ty(), value));
        }

        let rendered = match self.table.resolve_entry(param.ty()) {
            Some(entry) => (entry.handler())(value)
                .ok_or_else(|| mismatch(method, param, entry.ty(), value))?,
            None => pass_through(value),
        };

        Ok(self.finish(param, rendered))
    }

    fn finish(&self, param: &ParamDesc, rendered: Component) -> Component {
        match &self.transform {
            Some(transform) => transform.transform(param, rendered),
            None => rendered,
        }
    }

    pub fn handler_count(&self) -> usize {
        self.table.len()
    }
}

impl fmt::Debug for ArgumentRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgumentRenderer")
            .field("handlers", &self.table.len())
            .field("transform", &self.transform.is_some())
            .finish()
    }
}

/// Renderable values keep their identity; anything else is stringified.
fn pass_through(value: &Value) -> Component {
    if let Some(component) = value.view::<Component>() {
        return component.clone();
    }
    if let Some(message) = value.view::<Message>() {
        return message.as_component();
    }
    Component::text(value.stringify())
}

fn mismatch(
    method: &MethodDesc,
    param: &ParamDesc,
    expected: &TypeDesc,
    value: &Value,
) -> ProxyError {
    ProxyError::TypeMismatch {
        method: method.id().clone(),
        param: param.name().to_owned(),
        expected: expected.clone(),
        got: value.type_desc().clone(),
    }
}
