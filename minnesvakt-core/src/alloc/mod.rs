//! ## minnesvakt-core::alloc
//! **Allocation registry and scoped lifetime control**
//!
//! The registry is an insertion-ordered sequence of allocation records with
//! a recycling policy: a new allocation reuses the first eligible free slot
//! before appending. Slot identity persists across content replacement,
//! which is what the string/date reallocation contracts rely on.
//!
//! ### Key Submodules:
//! - `registry`: [`registry::MemoryRegistry`] and opaque generation-checked
//!   [`registry::Handle`]s
//! - `context`: bounded checkpoint stack for scoped "arena" release of
//!   everything allocated since a push

pub mod context;
pub mod registry;

pub use context::CONTEXT_CAPACITY;
pub use registry::{Handle, MemoryRegistry};
