//! Central allocation registry.
//!
//! Every tracked allocation lives in one slot of the registry. A slot's
//! identity is its position, not its content: content may be replaced in
//! place (string reallocation, date renewal) without invalidating handles.
//! Handles carry a generation counter so a stale handle to a recycled slot
//! resolves to [`RegistryError::UnknownHandle`] instead of aliasing the new
//! occupant.

use std::fmt;

use tracing::{debug, trace};

use crate::alloc::context::{ContextStack, CONTEXT_CAPACITY};
use crate::error::{ContextError, RegistryError};

/// Opaque reference to a live slot's content.
///
/// Compared by slot index plus generation; the null/empty handle of the
/// operation surface is expressed as `Option<Handle>` being `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    index: u32,
    generation: u32,
}

impl Handle {
    /// Slot position in the registry.
    pub fn index(self) -> usize {
        self.index as usize
    }

    /// Generation the slot had when this handle was issued.
    pub fn generation(self) -> u32 {
        self.generation
    }
}

/// One tracked allocation: live while `content` is present, free (and
/// eligible for recycling) once released.
#[derive(Debug)]
struct AllocationRecord {
    size: usize,
    generation: u32,
    content: Option<Box<[u8]>>,
}

impl AllocationRecord {
    fn is_live(&self) -> bool {
        self.content.is_some()
    }
}

/// Insertion-ordered registry of tracked allocations plus the scoped
/// context stack.
///
/// Single-threaded by design: callers construct one registry and pass it by
/// `&mut` through the call graph. There is no global instance.
#[derive(Debug)]
pub struct MemoryRegistry {
    records: Vec<AllocationRecord>,
    contexts: ContextStack,
}

impl Default for MemoryRegistry {
    fn default() -> Self {
        Self::new(0)
    }
}

impl MemoryRegistry {
    /// Creates a registry with room for `initial_slots` records before the
    /// slot vector has to grow. The baseline context checkpoint is
    /// established here.
    pub fn new(initial_slots: usize) -> Self {
        Self {
            records: Vec::with_capacity(initial_slots),
            contexts: ContextStack::new(),
        }
    }

    /// Allocates `size` zero-initialized bytes and registers them.
    ///
    /// Reuses the first free slot at or past the active scope checkpoint;
    /// otherwise appends a new slot. Free slots created before the current
    /// scope are deliberately skipped so scope allocations always form a
    /// contiguous tail for [`MemoryRegistry::pop_context`].
    pub fn allocate(&mut self, size: usize) -> Result<Handle, RegistryError> {
        let content = zeroed_buffer(size)?;
        let floor = self.contexts.active_checkpoint();

        if let Some(index) = (floor..self.records.len())
            .find(|&i| !self.records[i].is_live())
        {
            let record = &mut self.records[index];
            record.size = size;
            record.content = Some(content);
            trace!(index, size, generation = record.generation, "slot recycled");
            return Ok(Handle {
                index: index as u32,
                generation: record.generation,
            });
        }

        self.records
            .try_reserve(1)
            .map_err(|_| RegistryError::Exhausted { requested: size })?;
        let index = self.records.len();
        self.records.push(AllocationRecord {
            size,
            generation: 0,
            content: Some(content),
        });
        trace!(index, size, "slot appended");
        Ok(Handle {
            index: index as u32,
            generation: 0,
        })
    }

    /// Convenience allocation sized for a tracked boolean flag.
    pub fn new_bool(&mut self) -> Result<Handle, RegistryError> {
        self.allocate(std::mem::size_of::<bool>())
    }

    /// Convenience allocation sized for a tracked 32-bit integer.
    pub fn new_int(&mut self) -> Result<Handle, RegistryError> {
        self.allocate(std::mem::size_of::<i32>())
    }

    /// True when `handle` resolves to a live record.
    pub fn is_live(&self, handle: Handle) -> bool {
        self.resolve(handle).is_ok()
    }

    /// Read access to a live record's content.
    pub fn bytes(&self, handle: Handle) -> Result<&[u8], RegistryError> {
        let record = self.resolve(handle)?;
        // resolve() only returns live records
        Ok(record.content.as_deref().unwrap_or(&[]))
    }

    /// Write access to a live record's content.
    pub fn bytes_mut(&mut self, handle: Handle) -> Result<&mut [u8], RegistryError> {
        let record = self.resolve_mut(handle)?;
        Ok(record.content.as_deref_mut().unwrap_or(&mut []))
    }

    /// Installs new content into the slot `handle` refers to, preserving
    /// slot identity. The previous content is dropped. This is the in-place
    /// update primitive behind string reallocation and date renewal.
    pub fn replace_content(
        &mut self,
        handle: Handle,
        content: Box<[u8]>,
    ) -> Result<Handle, RegistryError> {
        let record = self.resolve_mut(handle)?;
        record.size = content.len();
        record.content = Some(content);
        trace!(index = handle.index(), size = record.size, "content replaced");
        Ok(handle)
    }

    /// Releases one allocation. `None` (the empty handle) succeeds as a
    /// no-op; an unknown or stale handle fails. The slot itself survives and
    /// becomes eligible for recycling under a bumped generation.
    pub fn release(&mut self, handle: Option<Handle>) -> Result<(), RegistryError> {
        let Some(handle) = handle else {
            return Ok(());
        };
        let record = self.resolve_mut(handle)?;
        record.content = None;
        record.size = 0;
        record.generation = record.generation.wrapping_add(1);
        trace!(index = handle.index(), "slot released");
        Ok(())
    }

    /// Releases each handle in turn, never stopping early, and returns how
    /// many failed.
    pub fn release_multiple(&mut self, handles: &[Option<Handle>]) -> usize {
        handles
            .iter()
            .filter(|&&handle| self.release(handle).is_err())
            .count()
    }

    /// Releases every record's content and destroys the backing storage.
    /// The registry is back in its freshly constructed baseline state.
    pub fn release_all(&mut self) {
        let slots = self.records.len();
        self.records = Vec::new();
        self.contexts.reset();
        debug!(slots, "registry torn down");
    }

    /// Sum of sizes over live records only.
    pub fn total_bytes_used(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.is_live())
            .map(|r| r.size)
            .sum()
    }

    /// Number of slots ever created, including free ones awaiting reuse.
    /// Enumeration is `0..slot_count()`.
    pub fn slot_count(&self) -> usize {
        self.records.len()
    }

    /// Opens a scope: all slots created from here on are removed together by
    /// the matching [`MemoryRegistry::pop_context`].
    pub fn push_context(&mut self) -> Result<(), ContextError> {
        self.contexts.push(self.records.len())
    }

    /// Closes the innermost scope, physically deleting every slot created
    /// since its checkpoint, most-recently-created first.
    ///
    /// This differs from [`MemoryRegistry::release`]: popped slots are
    /// removed outright, not recycled, because they are guaranteed to be the
    /// newest contiguous suffix of the registry.
    pub fn pop_context(&mut self) -> Result<(), ContextError> {
        let checkpoint = self.contexts.pop()?;
        let removed = self.records.len().saturating_sub(checkpoint);
        while self.records.len() > checkpoint {
            // Drop order: newest slot first, content released with the slot.
            self.records.pop();
        }
        debug!(removed, checkpoint, "scope unwound");
        Ok(())
    }

    /// Number of user scopes currently open.
    pub fn context_depth(&self) -> usize {
        self.contexts.depth()
    }

    /// Fixed scope capacity above the baseline.
    pub fn context_capacity(&self) -> usize {
        CONTEXT_CAPACITY
    }

    /// Writes the diagnostic report into a caller-provided sink: one line
    /// per slot (index, size, content-identity token), then a summary line
    /// with total live bytes and slot count. Printing is the caller's
    /// responsibility, never the core's.
    pub fn report<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        for (index, record) in self.records.iter().enumerate() {
            if record.is_live() {
                writeln!(
                    out,
                    "[{index}] {} - gen{}",
                    record.size, record.generation
                )?;
            } else {
                writeln!(out, "[{index}] 0 - free")?;
            }
        }
        writeln!(
            out,
            "total {} bytes in {} slots",
            self.total_bytes_used(),
            self.slot_count()
        )
    }

    /// Convenience wrapper over [`MemoryRegistry::report`] that allocates
    /// the report as an untracked `String`.
    pub fn report_string(&self) -> String {
        let mut out = String::new();
        // fmt::Write to String cannot fail.
        let _ = self.report(&mut out);
        out
    }

    fn resolve(&self, handle: Handle) -> Result<&AllocationRecord, RegistryError> {
        self.records
            .get(handle.index())
            .filter(|r| r.is_live() && r.generation == handle.generation)
            .ok_or(RegistryError::UnknownHandle {
                index: handle.index,
                generation: handle.generation,
            })
    }

    fn resolve_mut(&mut self, handle: Handle) -> Result<&mut AllocationRecord, RegistryError> {
        self.records
            .get_mut(handle.index())
            .filter(|r| r.is_live() && r.generation == handle.generation)
            .ok_or(RegistryError::UnknownHandle {
                index: handle.index,
                generation: handle.generation,
            })
    }
}

/// Allocates a zero-initialized boxed buffer, surfacing exhaustion as an
/// error instead of aborting.
fn zeroed_buffer(size: usize) -> Result<Box<[u8]>, RegistryError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(size)
        .map_err(|_| RegistryError::Exhausted { requested: size })?;
    buf.resize(size, 0);
    Ok(buf.into_boxed_slice())
}

/// Builds a NUL-terminated content buffer from `text`, the record layout
/// shared by the string and date formatting operations.
pub(crate) fn cstring_buffer(text: &str) -> Result<Box<[u8]>, RegistryError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(text.len() + 1)
        .map_err(|_| RegistryError::Exhausted {
            requested: text.len() + 1,
        })?;
    buf.extend_from_slice(text.as_bytes());
    buf.push(0);
    Ok(buf.into_boxed_slice())
}
