//! Renderable components and assembled messages.
//!
//! These are deliberately minimal: the pipeline only needs to produce a
//! translatable message from a key and rendered arguments, and to tell an
//! already-rendered argument apart from a value that still needs rendering.
//! Turning components into text for a locale is the caller's business.

use std::fmt;
use std::sync::Arc;

/// A rendered value.
///
/// Cloning is O(1) and preserves identity (`ptr_eq`), which is how
/// pass-through arguments are observable as "the same value".
#[derive(Clone)]
pub struct Component(Arc<ComponentKind>);

/// The shape of a `Component`.
#[derive(Debug, PartialEq)]
pub enum ComponentKind {
    /// Renders as nothing.
    Empty,
    /// Literal text.
    Text(String),
    /// A nested translatable message.
    Translatable(Message),
    /// A named placeholder wrapping a rendered argument.
    Placeholder {
        /// Placeholder name referenced from the translated pattern.
        name: Arc<str>,
        /// The rendered argument.
        value: Component,
    },
}

impl Component {
    /// The canonical empty component.
    ///
    /// Every call returns a clone of the same allocation, so
    /// `Component::empty().ptr_eq(&Component::empty())` holds.
    pub fn empty() -> Self {
        static EMPTY: std::sync::OnceLock<Component> = std::sync::OnceLock::new();
        EMPTY
            .get_or_init(|| Component(Arc::new(ComponentKind::Empty)))
            .clone()
    }

    /// Literal text.
    pub fn text(text: impl Into<String>) -> Self {
        Component(Arc::new(ComponentKind::Text(text.into())))
    }

    /// A translatable component for `message`.
    pub fn translatable(message: Message) -> Self {
        Component(Arc::new(ComponentKind::Translatable(message)))
    }

    /// A named placeholder around `value`.
    pub fn placeholder(name: impl Into<Arc<str>>, value: Component) -> Self {
        Component(Arc::new(ComponentKind::Placeholder {
            name: name.into(),
            value,
        }))
    }

    #[inline]
    pub fn kind(&self) -> &ComponentKind {
        &self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(*self.0, ComponentKind::Empty)
    }

    /// The message, if this is a translatable component.
    pub fn as_message(&self) -> Option<&Message> {
        match &*self.0 {
            ComponentKind::Translatable(message) => Some(message),
            _ => None,
        }
    }

    /// Identity comparison.
    #[inline]
    pub fn ptr_eq(&self, other: &Component) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.0 == *other.0
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

/// Debug-oriented text form: `Text` as-is, messages as `key(arg, …)`,
/// placeholders as `<name:value>`.
impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.0 {
            ComponentKind::Empty => Ok(()),
            ComponentKind::Text(text) => write!(f, "{text}"),
            ComponentKind::Translatable(message) => write!(f, "{message}"),
            ComponentKind::Placeholder { name, value } => write!(f, "<{name}:{value}>"),
        }
    }
}

/// A translation key plus its rendered arguments.
///
/// Never mutated after construction; clones share the argument slice.
#[derive(Clone, PartialEq)]
pub struct Message {
    key: Arc<str>,
    args: Arc<[Component]>,
}

impl Message {
    pub fn new(key: impl Into<Arc<str>>, args: impl Into<Arc<[Component]>>) -> Self {
        Message {
            key: key.into(),
            args: args.into(),
        }
    }

    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[inline]
    pub fn args(&self) -> &[Component] {
        &self.args
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message")
            .field("key", &&*self.key)
            .field("args", &&*self.args)
            .finish()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key)?;
        if !self.args.is_empty() {
            write!(f, "(")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{arg}")?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

/// Anything that can stand in for a rendered `Component`.
pub trait ComponentLike {
    fn as_component(&self) -> Component;
}

impl ComponentLike for Component {
    fn as_component(&self) -> Component {
        self.clone()
    }
}

impl ComponentLike for Message {
    fn as_component(&self) -> Component {
        Component::translatable(self.clone())
    }
}
