//! Type-erased values flowing through the pipeline.
//!
//! A `Value` pairs a shared `Reflect` payload with the `TypeDesc` it is
//! presented as. Usually that is the payload's own `Reflect::type_desc`, but
//! callers may present a value as a more specific descriptor
//! (`Value::with_type`), e.g. a `Vec<String>` as `ArrayList<String>`.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::{AsAny, IntoReflect, Reflect, TypeDesc};

/// A runtime value with its runtime type descriptor.
#[derive(Clone)]
pub struct Value {
    ty: TypeDesc,
    data: Arc<dyn Reflect>,
}

impl Value {
    /// Wrap a value, described by its own `Reflect::type_desc`.
    ///
    /// String literals (and `Vec`s of them) are stored as owned `String`s.
    pub fn new<T: IntoReflect>(value: T) -> Self {
        Value {
            ty: <T::Reflected as Reflect>::type_desc(),
            data: Arc::new(value.into_reflect()),
        }
    }

    /// Wrap a value under an explicit runtime descriptor.
    pub fn with_type<T: IntoReflect>(ty: TypeDesc, value: T) -> Self {
        Value {
            ty,
            data: Arc::new(value.into_reflect()),
        }
    }

    /// Wrap an already shared payload.
    pub fn from_shared(ty: TypeDesc, data: Arc<dyn Reflect>) -> Self {
        Value { ty, data }
    }

    /// The `Void` value.
    pub fn unit() -> Self {
        Value::new(())
    }

    /// Runtime type descriptor.
    #[inline]
    pub fn type_desc(&self) -> &TypeDesc {
        &self.ty
    }

    fn any(&self) -> &dyn Any {
        // Deref first: the blanket `AsAny` impl also covers the `Arc` itself.
        let data: &dyn Reflect = &*self.data;
        AsAny::as_any(data)
    }

    /// Borrow the payload if it is exactly a `T`.
    pub fn downcast_ref<T: Reflect>(&self) -> Option<&T> {
        self.any().downcast_ref::<T>()
    }

    /// Borrow the payload as a `T`, directly or through `Reflect::upcast`.
    pub fn view<T: Reflect>(&self) -> Option<&T> {
        if let Some(exact) = self.downcast_ref::<T>() {
            return Some(exact);
        }
        self.data
            .upcast(&T::type_desc())
            .and_then(<dyn Any>::downcast_ref::<T>)
    }

    /// Check whether the payload is exactly a `T`.
    pub fn is<T: Reflect>(&self) -> bool {
        self.any().is::<T>()
    }

    /// Default stringification of the payload.
    pub fn stringify(&self) -> String {
        self.data.stringify()
    }

    /// Check if this is the `Void` value.
    pub fn is_unit(&self) -> bool {
        self.is::<()>()
    }

    /// Check if both values share the same payload allocation.
    pub fn ptr_eq(&self, other: &Value) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Value")
            .field("ty", &self.ty)
            .field("value", &self.data.stringify())
            .finish()
    }
}
