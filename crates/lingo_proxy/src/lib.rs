//! Lingo Proxy - runtime implementations of message-producing interfaces.
//!
//! An `Interface` describes a message API: methods, their parameters, their
//! declared return types, and nested sub-interfaces. `Proxy::builder` turns it
//! into a `Proxy` whose `invoke` answers every method call by:
//!
//! 1. resolving a translation key (`KeyResolver` + a `KeyStrategy`),
//! 2. rendering each argument to a `Component` (`ArgumentRenderer`),
//! 3. assembling a `Message` and converting it to the declared return type
//!    (`ResultAssembler`).
//!
//! Identity methods (`eq`, `hash`, `to_string`), provided methods, and child
//! accessors for nested interfaces bypass the pipeline.
//!
//! ```ignore
//! let messages = Interface::builder("Messages")
//!     .method(MethodDecl::new("helloWorld").param("name", TypeDesc::string()).key("hello.world"))
//!     .build()?;
//! let proxy = Proxy::builder(messages).build();
//! let message = proxy.call_as::<Message>("helloWorld", &[Some(Value::new("Ada"))])?;
//! assert_eq!(message.key(), "hello.world");
//! ```

mod argument;
mod builder;
mod dispatcher;
mod error;
mod interface;
mod invocation;
mod key;
mod result;

pub use argument::{ArgumentHandlers, ArgumentRenderer, ArgumentTransform, NamedPlaceholders};
pub use builder::ProxyBuilder;
pub use dispatcher::{Proxy, ResolvedMethod};
pub use error::{ProxyError, ProxyResult};
pub use interface::{
    Interface, InterfaceBuilder, MethodDecl, MethodDesc, MethodId, MethodKind, ParamDesc,
    ProvidedFn,
};
pub use invocation::{Argument, Invocation};
pub use key::{
    DeclaredKeys, DerivedKeys, KeyNaming, KeyResolver, KeyStrategy, KeyTable, WordSplit,
};
pub use result::{ResultAssembler, ResultHandlers};

// Re-exported so callers can describe interfaces without a direct dependency.
pub use lingo_types::{
    Component, ComponentKind, ComponentLike, IntoReflect, Message, Reflect, TypeDesc,
    TypeHierarchy, Value,
};
