//! Lingo Types - type descriptors and values for the lingo message pipeline.
//!
//! This crate provides:
//! - `TypeDesc`: a structural type descriptor (raw name + type arguments)
//! - `TypeHierarchy`: the supertype relation used by every dispatch decision
//! - `Reflect`: static type descriptors and default stringification for Rust types
//! - `Value`: a type-erased argument or result carrying its runtime descriptor
//! - `Component` / `Message`: the renderable value and the assembled message
//!
//! # Why descriptors instead of `std::any::TypeId`
//!
//! Dispatch is keyed by the *declared* shape of an API (`List<String>`,
//! `Collection<User>`), not by the concrete Rust type of a value. `TypeId`
//! cannot express subtyping or parameterized supertypes, so handlers and
//! parameters both speak `TypeDesc`, and `TypeHierarchy` answers
//! "is `A` a supertype of `B`".

mod component;
mod hierarchy;
mod reflect;
mod type_desc;
mod value;

pub use component::{Component, ComponentKind, ComponentLike, Message};
pub use hierarchy::{TypeHierarchy, TypeHierarchyBuilder};
pub use reflect::{AsAny, IntoReflect, Reflect};
pub use type_desc::{well_known, TypeDesc};
pub use value::Value;
