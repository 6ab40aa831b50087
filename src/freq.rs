extern crate alloc;

#[cfg(not(feature = "hashbrown"))]
extern crate std;

use alloc::fmt;

use crate::arena::{EntryArena, EntryId};
use crate::list::Node;

#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Front and back handles of one frequency bucket.
///
/// The nodes themselves live in the shared arena of the owning
/// [`FrequencyIndex`]; a bucket is nothing but a pair of ends.
struct Bucket {
    /// Most recently touched node at this frequency.
    head: Option<EntryId>,
    /// Least recently touched node at this frequency.
    tail: Option<EntryId>,
}

impl Bucket {
    fn empty() -> Self {
        Bucket {
            head: None,
            tail: None,
        }
    }
}

/// Frequency-bucketed storage for the LFU policy.
///
/// Every stored value sits in exactly one bucket, the one keyed by its
/// current access count. Within a bucket the nodes are ordered by recency:
/// promotions push to the front, evictions take the back, which yields the
/// least-recently-used victim among the least frequently used.
///
/// All values share one arena, so a value's [`EntryId`] survives promotion
/// between buckets; only its links change. Buckets are kept in a hash map
/// keyed by the integer frequency, making bucket lookup O(1) rather than a
/// search through an ordered structure.
///
/// `min_frequency` is a plain field maintained at two points: a promotion
/// that empties the minimum bucket raises it by exactly one, and a
/// frequency-one insertion resets it to one. [`FrequencyIndex::evict_lfu`]
/// and [`FrequencyIndex::remove`] may leave it stale when they drop the
/// minimum bucket; callers either insert at frequency one right away or call
/// [`FrequencyIndex::rederive_min`], keeping the `look_update` path free of
/// bucket scans.
pub(crate) struct FrequencyIndex<T> {
    /// Node storage shared by all buckets.
    arena: EntryArena<Node<T>>,
    /// Bucket ends keyed by frequency.
    buckets: HashMap<usize, Bucket>,
    /// Smallest frequency with a non-empty bucket, when the index is
    /// non-empty and no rederive is pending.
    min_frequency: usize,
}

impl<T> FrequencyIndex<T> {
    /// Creates an empty index.
    pub(crate) fn new() -> Self {
        FrequencyIndex {
            arena: EntryArena::new(),
            buckets: HashMap::new(),
            min_frequency: 1,
        }
    }

    /// Creates an empty index with node storage reserved for `cap` entries.
    pub(crate) fn with_capacity(cap: usize) -> Self {
        FrequencyIndex {
            arena: EntryArena::with_capacity(cap),
            buckets: HashMap::new(),
            min_frequency: 1,
        }
    }

    /// Returns the number of stored values across all buckets.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns true if no value is stored.
    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Returns the smallest occupied frequency.
    ///
    /// Meaningful only while the index is non-empty.
    #[inline]
    pub(crate) fn min_frequency(&self) -> usize {
        self.min_frequency
    }

    /// Returns the number of occupied buckets.
    #[inline]
    pub(crate) fn levels(&self) -> usize {
        self.buckets.len()
    }

    /// Stores a value at frequency one and returns its handle.
    ///
    /// Resets `min_frequency` to one: a fresh value is always the least
    /// frequently used.
    pub(crate) fn push_new(&mut self, value: T) -> EntryId {
        let id = self.arena.insert(Node::unlinked(value));
        self.attach_front(id, 1);
        self.min_frequency = 1;
        id
    }

    /// Moves the value named by `id` from bucket `freq` to the front of
    /// bucket `freq + 1` and returns the new frequency.
    ///
    /// If the move empties the minimum bucket, `min_frequency` advances by
    /// exactly one; no other bucket can have become the minimum, because a
    /// promotion only ever leaves its own bucket.
    pub(crate) fn promote(&mut self, id: EntryId, freq: usize) -> usize {
        debug_assert!(self.arena.contains(id), "promote on a stale handle");
        let new_freq = freq + 1;
        let emptied = self.detach(id, freq);
        if emptied && freq == self.min_frequency {
            self.min_frequency = new_freq;
        }
        self.attach_front(id, new_freq);
        new_freq
    }

    /// Removes and returns the back value of the minimum bucket.
    ///
    /// This is the LFU eviction victim: least frequently used, and least
    /// recently used among its frequency peers. If the bucket empties it is
    /// dropped, and `min_frequency` may go stale; see the type-level note.
    pub(crate) fn evict_lfu(&mut self) -> Option<T> {
        let id = self.buckets.get(&self.min_frequency)?.tail?;
        self.detach(id, self.min_frequency);
        self.arena.remove(id).map(|node| node.value)
    }

    /// Removes the value named by `id` from bucket `freq`.
    ///
    /// Returns `None` if the handle is stale. Dropping the minimum bucket
    /// leaves `min_frequency` stale; see the type-level note.
    pub(crate) fn remove(&mut self, id: EntryId, freq: usize) -> Option<T> {
        if !self.arena.contains(id) {
            return None;
        }
        self.detach(id, freq);
        self.arena.remove(id).map(|node| node.value)
    }

    /// Recomputes `min_frequency` by scanning the occupied bucket keys.
    ///
    /// O(occupied buckets). Only the explicit removal paths pay this; the
    /// `look_update` paths never call it.
    pub(crate) fn rederive_min(&mut self) {
        self.min_frequency = self.buckets.keys().copied().min().unwrap_or(1);
    }

    /// Returns a reference to the value named by `id`.
    #[inline]
    pub(crate) fn get(&self, id: EntryId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    /// Returns a mutable reference to the value named by `id`.
    #[inline]
    pub(crate) fn get_mut(&mut self, id: EntryId) -> Option<&mut T> {
        self.arena.get_mut(id).map(|node| &mut node.value)
    }

    /// Removes every value and bucket, keeping allocated storage for reuse.
    pub(crate) fn clear(&mut self) {
        self.arena.clear();
        self.buckets.clear();
        self.min_frequency = 1;
    }

    /// Unlinks `id` from bucket `freq`, dropping the bucket if it empties.
    ///
    /// Returns true if the bucket was dropped. The node stays in the arena
    /// with cleared links.
    fn detach(&mut self, id: EntryId, freq: usize) -> bool {
        let (prev, next) = match self.arena.get(id) {
            Some(node) => (node.prev, node.next),
            None => return false,
        };
        match prev {
            Some(p) => {
                if let Some(node) = self.arena.get_mut(p) {
                    node.next = next;
                }
            }
            None => {
                if let Some(bucket) = self.buckets.get_mut(&freq) {
                    bucket.head = next;
                }
            }
        }
        match next {
            Some(n) => {
                if let Some(node) = self.arena.get_mut(n) {
                    node.prev = prev;
                }
            }
            None => {
                if let Some(bucket) = self.buckets.get_mut(&freq) {
                    bucket.tail = prev;
                }
            }
        }
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = None;
        }
        let emptied = self
            .buckets
            .get(&freq)
            .map(|bucket| bucket.head.is_none())
            .unwrap_or(false);
        if emptied {
            self.buckets.remove(&freq);
        }
        emptied
    }

    /// Links the unattached node `id` in as the front of bucket `freq`,
    /// creating the bucket if needed.
    fn attach_front(&mut self, id: EntryId, freq: usize) {
        let bucket = self.buckets.entry(freq).or_insert_with(Bucket::empty);
        let old_head = bucket.head;
        bucket.head = Some(id);
        if bucket.tail.is_none() {
            bucket.tail = Some(id);
        }
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = old_head;
        }
        if let Some(h) = old_head {
            if let Some(node) = self.arena.get_mut(h) {
                node.prev = Some(id);
            }
        }
    }
}

impl<T> fmt::Debug for FrequencyIndex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrequencyIndex")
            .field("len", &self.len())
            .field("levels", &self.buckets.len())
            .field("min_frequency", &self.min_frequency)
            .finish()
    }
}
