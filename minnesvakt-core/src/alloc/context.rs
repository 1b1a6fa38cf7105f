//! Bounded checkpoint stack for scoped release.
//!
//! A checkpoint is a snapshot of the registry's slot count at push time.
//! Popping removes every slot created since the matching checkpoint, newest
//! first, which gives LIFO "forgot to free" cleanup as long as code stays
//! within one push/pop scope.

use tracing::trace;

use crate::error::ContextError;

/// Number of usable scopes above the implicit baseline checkpoint.
pub const CONTEXT_CAPACITY: usize = 4;

/// Fixed-capacity stack of slot-count checkpoints.
///
/// Depth 0 is the baseline scope established at registry construction and
/// can never be popped; depths 1..=4 are user scopes.
#[derive(Debug)]
pub(crate) struct ContextStack {
    checkpoints: [usize; CONTEXT_CAPACITY + 1],
    depth: usize,
}

impl ContextStack {
    pub(crate) fn new() -> Self {
        Self {
            checkpoints: [0; CONTEXT_CAPACITY + 1],
            depth: 0,
        }
    }

    /// Records `slot_count` as a new checkpoint. Fails with the stack
    /// unchanged once all user scopes are occupied.
    pub(crate) fn push(&mut self, slot_count: usize) -> Result<(), ContextError> {
        if self.depth == CONTEXT_CAPACITY {
            return Err(ContextError::StackFull {
                capacity: CONTEXT_CAPACITY,
            });
        }
        self.depth += 1;
        self.checkpoints[self.depth] = slot_count;
        trace!(depth = self.depth, checkpoint = slot_count, "context pushed");
        Ok(())
    }

    /// Removes the current checkpoint and returns it. Fails with the stack
    /// unchanged when only the baseline remains.
    pub(crate) fn pop(&mut self) -> Result<usize, ContextError> {
        if self.depth == 0 {
            return Err(ContextError::StackEmpty);
        }
        let checkpoint = self.checkpoints[self.depth];
        self.depth -= 1;
        trace!(depth = self.depth, checkpoint, "context popped");
        Ok(checkpoint)
    }

    /// Checkpoint of the innermost open scope (baseline if none is open).
    ///
    /// Slot recycling never reaches below this value; see the registry's
    /// allocation policy.
    pub(crate) fn active_checkpoint(&self) -> usize {
        self.checkpoints[self.depth]
    }

    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    /// Drops every user scope and returns to the baseline checkpoint.
    pub(crate) fn reset(&mut self) {
        self.checkpoints = [0; CONTEXT_CAPACITY + 1];
        self.depth = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_is_four_user_scopes() {
        let mut stack = ContextStack::new();
        for n in 1..=CONTEXT_CAPACITY {
            stack.push(n * 10).unwrap();
        }
        assert_eq!(
            stack.push(99),
            Err(ContextError::StackFull {
                capacity: CONTEXT_CAPACITY
            })
        );
        // Failed push leaves depth and the top checkpoint untouched.
        assert_eq!(stack.depth(), CONTEXT_CAPACITY);
        assert_eq!(stack.active_checkpoint(), CONTEXT_CAPACITY * 10);
    }

    #[test]
    fn baseline_is_not_poppable() {
        let mut stack = ContextStack::new();
        stack.push(3).unwrap();
        assert_eq!(stack.pop(), Ok(3));
        assert_eq!(stack.pop(), Err(ContextError::StackEmpty));
        assert_eq!(stack.depth(), 0);
        assert_eq!(stack.active_checkpoint(), 0);
    }
}
