extern crate alloc;

use alloc::fmt;
use alloc::vec::Vec;

/// A stable handle to an entry stored in an [`EntryArena`].
///
/// A handle stays valid until the entry it names is removed, no matter how
/// many other entries are inserted or removed around it. Handles are plain
/// indices and are `Copy`, so the linked structures in this crate store them
/// where a pointer-based design would store `*mut` nodes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) struct EntryId(usize);

impl EntryId {
    /// Returns the underlying slot index.
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// Slot arena backing the linked structures in this crate.
///
/// Entries live in a vector of slots. Removing an entry vacates its slot and
/// pushes the index onto a free list; later insertions reuse freed slots
/// before growing the vector. A cache that has reached its capacity therefore
/// allocates nothing on the steady-state evict-and-insert path.
///
/// A removed handle must not be dereferenced again: a later insertion may
/// reuse its slot for a different entry. The cache segments uphold this by
/// dropping their key index entry whenever they free the handle it holds.
pub(crate) struct EntryArena<T> {
    /// Slot storage. `None` marks a vacant slot awaiting reuse.
    slots: Vec<Option<T>>,
    /// Indices of vacant slots, most recently freed last.
    free: Vec<usize>,
}

impl<T> EntryArena<T> {
    /// Creates an empty arena.
    pub(crate) fn new() -> Self {
        EntryArena {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Creates an empty arena with room for `cap` entries before any slot or
    /// free-list growth.
    pub(crate) fn with_capacity(cap: usize) -> Self {
        EntryArena {
            slots: Vec::with_capacity(cap),
            free: Vec::with_capacity(cap),
        }
    }

    /// Returns the number of occupied slots.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Returns true if no slot is occupied.
    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if `id` names a live entry.
    #[inline]
    pub(crate) fn contains(&self, id: EntryId) -> bool {
        self.slots
            .get(id.index())
            .map(Option::is_some)
            .unwrap_or(false)
    }

    /// Stores `value` and returns a handle to it.
    ///
    /// Reuses a vacant slot when one exists, otherwise appends a new slot.
    pub(crate) fn insert(&mut self, value: T) -> EntryId {
        match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(value);
                EntryId(index)
            }
            None => {
                let index = self.slots.len();
                self.slots.push(Some(value));
                EntryId(index)
            }
        }
    }

    /// Removes the entry named by `id` and returns its value.
    ///
    /// Returns `None` if the handle is stale. The vacated slot becomes
    /// available for reuse.
    pub(crate) fn remove(&mut self, id: EntryId) -> Option<T> {
        let slot = self.slots.get_mut(id.index())?;
        let value = slot.take()?;
        self.free.push(id.index());
        Some(value)
    }

    /// Returns a reference to the entry named by `id`.
    #[inline]
    pub(crate) fn get(&self, id: EntryId) -> Option<&T> {
        self.slots.get(id.index())?.as_ref()
    }

    /// Returns a mutable reference to the entry named by `id`.
    #[inline]
    pub(crate) fn get_mut(&mut self, id: EntryId) -> Option<&mut T> {
        self.slots.get_mut(id.index())?.as_mut()
    }

    /// Removes every entry, keeping the allocated slot storage for reuse.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

impl<T> fmt::Debug for EntryArena<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryArena")
            .field("len", &self.len())
            .field("slots", &self.slots.len())
            .finish()
    }
}
