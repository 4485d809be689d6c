//! Lingo Dispatch - type-keyed handler tables.
//!
//! A `TypedDispatchTable` maps a query `TypeDesc` to the handler registered
//! for the most relevant supertype of it. Relevance is decided by priority
//! first (higher wins) and registration order second; the table does not
//! try to find the *closest* supertype, so a broad handler registered with a
//! higher priority shadows a narrow one.
//!
//! # Lifecycle
//!
//! 1. Collect entries in a `DispatchTableBuilder`.
//! 2. `build` sorts them once and freezes the table.
//! 3. `resolve` answers queries, memoizing every distinct query type
//!    (including misses) for the life of the table.

mod table;

pub use table::{DispatchTableBuilder, HandlerEntry, TypedDispatchTable};
