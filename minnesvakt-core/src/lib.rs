//! # minnesvakt-core
//!
//! Foundation layer for tracked manual allocation in resource-constrained
//! environments. Every allocation is registered in a central registry so it
//! can be enumerated, measured, and bulk-released without the caller holding
//! on to individual handles.
//!
//! ### Key Submodules:
//! - `alloc`: allocation registry, opaque handles and the scoped context stack
//! - `text`: tracked string allocation, in-place reallocation and formatting
//! - `datum`: tracked calendar timestamps seeded from a pluggable clock
//! - `time`: clock abstraction (`SystemClock` for wall-clock, `FixedClock`
//!   for deterministic tests)
//!
//! The registry is single-threaded by design: no locking, no async, strict
//! call-order semantics. Callers construct a [`MemoryRegistry`] explicitly
//! and thread it through the call graph.

pub mod alloc;
pub mod datum;
pub mod error;
pub mod text;
pub mod time;

pub mod prelude {
    pub use crate::alloc::context::CONTEXT_CAPACITY;
    pub use crate::alloc::registry::{Handle, MemoryRegistry};
    pub use crate::datum::{DateFields, DatumOps};
    pub use crate::error::{ContextError, RegistryError};
    pub use crate::text::format::FormatArg;
    pub use crate::text::TextOps;
    pub use crate::time::{Clock, FixedClock, SystemClock};
}

pub use alloc::registry::{Handle, MemoryRegistry};
pub use error::{ContextError, RegistryError};
