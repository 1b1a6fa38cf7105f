//! Registry-level error types.
//!
//! Every failure in the core is local and recoverable; no operation retries
//! and no operation aborts the process. Allocation exhaustion, unhandled in
//! the systems this design descends from, is surfaced explicitly as
//! [`RegistryError::Exhausted`].

use thiserror::Error;

/// Failures raised by the allocation registry itself.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    /// The handle does not resolve to a live record: either the slot index
    /// is out of range, the slot was released, or the generation is stale.
    #[error("unknown or stale handle (slot {index}, generation {generation})")]
    UnknownHandle { index: u32, generation: u32 },

    /// The underlying allocator could not provide the requested bytes.
    #[error("allocation exhausted while requesting {requested} bytes")]
    Exhausted { requested: usize },
}

/// Failures raised by the scoped context stack.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ContextError {
    /// Push beyond the fixed scope capacity. The stack is left unchanged.
    #[error("context stack full (capacity {capacity})")]
    StackFull { capacity: usize },

    /// Pop with only the baseline checkpoint left. The stack is left
    /// unchanged.
    #[error("context stack empty, nothing to pop")]
    StackEmpty,
}
