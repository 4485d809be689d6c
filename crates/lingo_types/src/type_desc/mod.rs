//! Structural type descriptors.
//!
//! `TypeDesc` captures the declared shape of a parameter or return type,
//! including generic arguments, so that dispatch can distinguish
//! `List<String>` from `List<User>` and from a raw `List`.
//!
//! # Design
//!
//! Descriptors are immutable and `Arc`-backed: cloning is O(1), which matters
//! because they are used as dispatch cache keys on every call.

use std::fmt;
use std::sync::Arc;

/// Raw names of the built-in types the pipeline itself refers to.
pub mod well_known {
    /// Root of the hierarchy; supertype of everything.
    pub const OBJECT: &str = "Object";
    /// Return type of methods that produce no usable value.
    pub const VOID: &str = "Void";
    /// Owned and static strings.
    pub const STRING: &str = "String";
    /// Ordered sequences (`Vec<T>`).
    pub const LIST: &str = "List";
    /// Unordered unique sequences.
    pub const SET: &str = "Set";
    /// Common supertype of `List` and `Set`.
    pub const COLLECTION: &str = "Collection";
    /// The renderable value.
    pub const COMPONENT: &str = "Component";
    /// Anything that can be turned into a `Component`.
    pub const COMPONENT_LIKE: &str = "ComponentLike";
    /// The assembled key + arguments message.
    pub const MESSAGE: &str = "Message";
}

/// A declared type: a raw name with ordered type arguments, or a wildcard.
///
/// - Parameter types: `(user: User)` → `Named { name: "User", args: [] }`
/// - Generic types: `List<String>` → `Named { name: "List", args: [String] }`
/// - Unconstrained arguments: `List<?>` → `Named { name: "List", args: [Wildcard] }`
#[derive(Clone, Eq, PartialEq, Hash)]
pub enum TypeDesc {
    /// A named type with optional type arguments.
    Named {
        /// The raw type name.
        name: Arc<str>,
        /// Generic type arguments, empty if non-generic.
        args: Arc<[TypeDesc]>,
    },
    /// An unconstrained type argument (`?`).
    Wildcard,
}

impl TypeDesc {
    /// Create a non-generic named type.
    pub fn named(name: impl Into<Arc<str>>) -> Self {
        TypeDesc::Named {
            name: name.into(),
            args: Arc::from(Vec::new()),
        }
    }

    /// Create a named type with type arguments.
    pub fn generic(name: impl Into<Arc<str>>, args: impl IntoIterator<Item = TypeDesc>) -> Self {
        TypeDesc::Named {
            name: name.into(),
            args: args.into_iter().collect(),
        }
    }

    /// `List<elem>`
    pub fn list(elem: TypeDesc) -> Self {
        Self::generic(well_known::LIST, [elem])
    }

    /// `Set<elem>`
    pub fn set(elem: TypeDesc) -> Self {
        Self::generic(well_known::SET, [elem])
    }

    /// `Collection<elem>`
    pub fn collection(elem: TypeDesc) -> Self {
        Self::generic(well_known::COLLECTION, [elem])
    }

    /// `Object`
    pub fn object() -> Self {
        Self::named(well_known::OBJECT)
    }

    /// `Void`
    pub fn void() -> Self {
        Self::named(well_known::VOID)
    }

    /// `String`
    pub fn string() -> Self {
        Self::named(well_known::STRING)
    }

    /// `Component`
    pub fn component() -> Self {
        Self::named(well_known::COMPONENT)
    }

    /// `ComponentLike`
    pub fn component_like() -> Self {
        Self::named(well_known::COMPONENT_LIKE)
    }

    /// `Message`
    pub fn message() -> Self {
        Self::named(well_known::MESSAGE)
    }

    /// `?`
    pub fn wildcard() -> Self {
        TypeDesc::Wildcard
    }

    /// The raw type name (`"?"` for wildcards).
    pub fn name(&self) -> &str {
        match self {
            TypeDesc::Named { name, .. } => name,
            TypeDesc::Wildcard => "?",
        }
    }

    /// Type arguments (empty for non-generic types and wildcards).
    pub fn args(&self) -> &[TypeDesc] {
        match self {
            TypeDesc::Named { args, .. } => args,
            TypeDesc::Wildcard => &[],
        }
    }

    /// Check if this is an unconstrained type argument.
    #[inline]
    pub fn is_wildcard(&self) -> bool {
        matches!(self, TypeDesc::Wildcard)
    }

    /// Check if this descriptor names `name` with no type arguments.
    pub fn is_raw(&self, name: &str) -> bool {
        matches!(self, TypeDesc::Named { name: n, args } if &**n == name && args.is_empty())
    }

    /// Erase type arguments: `List<String>` → `List`.
    pub fn raw(&self) -> TypeDesc {
        match self {
            TypeDesc::Named { name, args } if !args.is_empty() => TypeDesc::named(Arc::clone(name)),
            other => other.clone(),
        }
    }

    /// Same type arguments, different raw name.
    ///
    /// Used when walking declared supertype edges, which carry type
    /// arguments positionally (`ArrayList<T> <: List<T>`).
    pub(crate) fn with_name(&self, name: &Arc<str>) -> TypeDesc {
        match self {
            TypeDesc::Named { args, .. } => TypeDesc::Named {
                name: Arc::clone(name),
                args: Arc::clone(args),
            },
            TypeDesc::Wildcard => TypeDesc::Wildcard,
        }
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDesc::Wildcard => write!(f, "?"),
            TypeDesc::Named { name, args } => {
                write!(f, "{name}")?;
                if !args.is_empty() {
                    write!(f, "<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    write!(f, ">")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Debug for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeDesc({self})")
    }
}
