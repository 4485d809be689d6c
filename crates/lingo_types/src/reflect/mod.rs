//! Static type descriptors for Rust types.
//!
//! `Reflect` is what lets a plain Rust value travel through the pipeline as a
//! `Value`: it names the value's `TypeDesc`, provides the default
//! stringification used when no argument handler applies, and optionally
//! exposes an embedded supertype view.

use std::any::Any;

use crate::{Component, Message, TypeDesc};

/// Object-safe access to `&dyn Any` for any `'static` type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A Rust type that can be carried by a `Value`.
///
/// # Upcasting
///
/// Rust has no subclassing, so a value declared as `Admin` cannot be handed
/// to a handler for `User` by downcasting alone. Types that embed a supertype
/// view override `upcast` and return it for the matching descriptor:
///
/// ```ignore
/// fn upcast(&self, target: &TypeDesc) -> Option<&dyn Any> {
///     target.is_raw("User").then_some(&self.user as &dyn Any)
/// }
/// ```
pub trait Reflect: AsAny + Send + Sync {
    /// The descriptor values of this type carry by default.
    fn type_desc() -> TypeDesc
    where
        Self: Sized;

    /// Default textual form, used when no argument handler applies.
    fn stringify(&self) -> String;

    /// View this value as one of its supertypes.
    fn upcast(&self, target: &TypeDesc) -> Option<&dyn Any> {
        let _ = target;
        None
    }
}

/// Conversion into the payload a `Value` stores.
///
/// Every `Reflect` type converts to itself. Borrowed string literals become
/// owned `String`s, so a `String` handler can view every value described as
/// `String`, whichever form the caller passed.
pub trait IntoReflect {
    type Reflected: Reflect;

    fn into_reflect(self) -> Self::Reflected;
}

impl<T: Reflect> IntoReflect for T {
    type Reflected = T;

    #[inline]
    fn into_reflect(self) -> T {
        self
    }
}

impl IntoReflect for &'static str {
    type Reflected = String;

    fn into_reflect(self) -> String {
        self.to_owned()
    }
}

impl IntoReflect for Vec<&'static str> {
    type Reflected = Vec<String>;

    fn into_reflect(self) -> Vec<String> {
        self.into_iter().map(str::to_owned).collect()
    }
}

impl Reflect for String {
    fn type_desc() -> TypeDesc {
        TypeDesc::string()
    }

    fn stringify(&self) -> String {
        self.clone()
    }
}


impl Reflect for () {
    fn type_desc() -> TypeDesc {
        TypeDesc::void()
    }

    fn stringify(&self) -> String {
        String::new()
    }
}

/// Primitives: descriptor named after the Rust type, stringified via `Display`.
macro_rules! reflect_primitive {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn type_desc() -> TypeDesc {
                    TypeDesc::named($name)
                }

                fn stringify(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

reflect_primitive! {
    bool => "bool",
    char => "char",
    i8 => "i8",
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    i128 => "i128",
    isize => "isize",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    u128 => "u128",
    usize => "usize",
    f32 => "f32",
    f64 => "f64",
}

impl<T: Reflect> Reflect for Vec<T> {
    fn type_desc() -> TypeDesc {
        TypeDesc::list(T::type_desc())
    }

    fn stringify(&self) -> String {
        let items: Vec<String> = self.iter().map(Reflect::stringify).collect();
        format!("[{}]", items.join(", "))
    }
}

impl Reflect for Component {
    fn type_desc() -> TypeDesc {
        TypeDesc::component()
    }

    fn stringify(&self) -> String {
        self.to_string()
    }
}

impl Reflect for Message {
    fn type_desc() -> TypeDesc {
        TypeDesc::message()
    }

    fn stringify(&self) -> String {
        self.to_string()
    }
}
