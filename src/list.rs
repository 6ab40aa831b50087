extern crate alloc;

use alloc::fmt;

use crate::arena::{EntryArena, EntryId};

/// A node in a handle-linked list.
///
/// Carries a value and the handles of its neighbors. `None` in `prev` means
/// the node is at the front of its list, `None` in `next` means it is at the
/// back. Nodes are stored in an [`EntryArena`] and addressed only through
/// [`EntryId`] handles; the crate holds no raw pointers.
pub(crate) struct Node<T> {
    /// The value stored in this node.
    pub(crate) value: T,
    /// Handle of the previous node, towards the front.
    pub(crate) prev: Option<EntryId>,
    /// Handle of the next node, towards the back.
    pub(crate) next: Option<EntryId>,
}

impl<T> Node<T> {
    /// Creates an unlinked node holding `value`.
    pub(crate) fn unlinked(value: T) -> Self {
        Node {
            value,
            prev: None,
            next: None,
        }
    }
}

/// A doubly linked list ordered by recency of touch.
///
/// The front holds the most recently touched value and the back the least
/// recently touched one. All operations are O(1): the list never walks its
/// nodes except in [`RecencyList::iter`] and the order-inspecting test
/// helpers.
///
/// The list owns its arena, so handles returned by [`RecencyList::push_front`]
/// are only meaningful against the list that produced them.
pub(crate) struct RecencyList<T> {
    /// Node storage.
    arena: EntryArena<Node<T>>,
    /// Handle of the front (most recently touched) node.
    head: Option<EntryId>,
    /// Handle of the back (least recently touched) node.
    tail: Option<EntryId>,
}

impl<T> RecencyList<T> {
    /// Creates an empty list.
    pub(crate) fn new() -> Self {
        RecencyList {
            arena: EntryArena::new(),
            head: None,
            tail: None,
        }
    }

    /// Creates an empty list with node storage reserved for `cap` entries.
    pub(crate) fn with_capacity(cap: usize) -> Self {
        RecencyList {
            arena: EntryArena::with_capacity(cap),
            head: None,
            tail: None,
        }
    }

    /// Returns the number of values in the list.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns true if the list holds no values.
    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Pushes a value to the front and returns its handle.
    pub(crate) fn push_front(&mut self, value: T) -> EntryId {
        let id = self.arena.insert(Node::unlinked(value));
        self.attach_front(id);
        id
    }

    /// Removes and returns the value at the back.
    pub(crate) fn pop_back(&mut self) -> Option<T> {
        let id = self.tail?;
        self.detach(id);
        self.arena.remove(id).map(|node| node.value)
    }

    /// Removes and returns the value at the front.
    #[allow(dead_code)]
    pub(crate) fn pop_front(&mut self) -> Option<T> {
        let id = self.head?;
        self.detach(id);
        self.arena.remove(id).map(|node| node.value)
    }

    /// Removes the value named by `id`.
    ///
    /// Returns `None` if the handle is stale.
    pub(crate) fn remove(&mut self, id: EntryId) -> Option<T> {
        if !self.arena.contains(id) {
            return None;
        }
        self.detach(id);
        self.arena.remove(id).map(|node| node.value)
    }

    /// Relinks the node named by `id` to the front of the list.
    ///
    /// A node already at the front is left alone. Callers must pass a live
    /// handle; a stale one trips a debug assertion and is otherwise ignored.
    pub(crate) fn move_to_front(&mut self, id: EntryId) {
        if self.head == Some(id) {
            return;
        }
        if !self.arena.contains(id) {
            debug_assert!(false, "move_to_front on a stale handle");
            return;
        }
        self.detach(id);
        self.attach_front(id);
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

    /// Returns a reference to the front (most recently touched) value.
    #[allow(dead_code)]
    pub(crate) fn front(&self) -> Option<&T> {
        self.get(self.head?)
    }

    /// Returns a reference to the back (least recently touched) value.
    pub(crate) fn back(&self) -> Option<&T> {
        self.get(self.tail?)
    }

    /// Removes every value, keeping the allocated node storage for reuse.
    pub(crate) fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
    }

    /// Iterates the values from front (most recent) to back (least recent).
    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            next: self.head,
        }
    }

    /// Unlinks `id` from its neighbors, fixing head and tail as needed.
    ///
    /// The node itself stays in the arena with cleared links.
    fn detach(&mut self, id: EntryId) {
        let (prev, next) = match self.arena.get(id) {
            Some(node) => (node.prev, node.next),
            None => return,
        };
        match prev {
            Some(p) => {
                if let Some(node) = self.arena.get_mut(p) {
                    node.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(n) => {
                if let Some(node) = self.arena.get_mut(n) {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = None;
        }
    }

    /// Links the unattached node `id` in as the new front.
    fn attach_front(&mut self, id: EntryId) {
        let old_head = self.head;
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(h) => {
                if let Some(node) = self.arena.get_mut(h) {
                    node.prev = Some(id);
                }
            }
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }
}

impl<T> fmt::Debug for RecencyList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecencyList")
            .field("len", &self.len())
            .finish()
    }
}

/// Front-to-back iterator over a [`RecencyList`].
pub(crate) struct Iter<'a, T> {
    list: &'a RecencyList<T>,
    next: Option<EntryId>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let id = self.next?;
        let node = self.list.arena.get(id)?;
        self.next = node.next;
        Some(&node.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec::Vec;

    #[test]
    fn test_push_front_order() {
        let mut list = RecencyList::new();
        list.push_front(10u32);
        list.push_front(20);
        list.push_front(30);
        assert_eq!(list.len(), 3);
        let order: Vec<u32> = list.iter().copied().collect();
        assert_eq!(order, [30, 20, 10]);
        assert_eq!(list.front(), Some(&30));
        assert_eq!(list.back(), Some(&10));
    }

    #[test]
    fn test_pop_back_returns_least_recent() {
        let mut list = RecencyList::new();
        assert_eq!(list.pop_back(), None);
        list.push_front(10u32);
        list.push_front(20);
        list.push_front(30);
        assert_eq!(list.pop_back(), Some(10));
        assert_eq!(list.pop_back(), Some(20));
        assert_eq!(list.pop_back(), Some(30));
        assert_eq!(list.pop_back(), None);
        assert!(list.is_empty());
    }

    #[test]
    fn test_pop_front() {
        let mut list = RecencyList::new();
        assert_eq!(list.pop_front(), None);
        list.push_front(1u32);
        list.push_front(2);
        assert_eq!(list.pop_front(), Some(2));
        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(list.pop_front(), None);
    }

    #[test]
    fn test_move_to_front() {
        let mut list = RecencyList::new();
        let a = list.push_front(10u32);
        let _b = list.push_front(20);
        let c = list.push_front(30);

        // Front -> 30, 20, 10; moving the back value reorders to 10, 30, 20
        list.move_to_front(a);
        let order: Vec<u32> = list.iter().copied().collect();
        assert_eq!(order, [10, 30, 20]);

        // Moving the current front is a no-op
        list.move_to_front(a);
        let order: Vec<u32> = list.iter().copied().collect();
        assert_eq!(order, [10, 30, 20]);
        assert_eq!(list.len(), 3);

        // Moving a middle value works too
        list.move_to_front(c);
        let order: Vec<u32> = list.iter().copied().collect();
        assert_eq!(order, [30, 10, 20]);
    }

    #[test]
    fn test_remove_by_handle() {
        let mut list = RecencyList::new();
        let a = list.push_front(10u32);
        let b = list.push_front(20);
        let c = list.push_front(30);

        assert_eq!(list.remove(b), Some(20));
        assert_eq!(list.len(), 2);
        let order: Vec<u32> = list.iter().copied().collect();
        assert_eq!(order, [30, 10]);

        // Removing the same handle again is a no-op
        assert_eq!(list.remove(b), None);

        // Removing front and back fixes both ends
        assert_eq!(list.remove(c), Some(30));
        assert_eq!(list.front(), Some(&10));
        assert_eq!(list.back(), Some(&10));
        assert_eq!(list.remove(a), Some(10));
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
    }

    #[test]
    fn test_get_and_get_mut() {
        let mut list = RecencyList::new();
        let id = list.push_front(String::from("value"));
        assert_eq!(list.get(id).map(String::as_str), Some("value"));
        if let Some(v) = list.get_mut(id) {
            v.push_str("_edited");
        }
        assert_eq!(list.get(id).map(String::as_str), Some("value_edited"));
    }

    #[test]
    fn test_clear() {
        let mut list = RecencyList::with_capacity(3);
        let a = list.push_front(1u32);
        list.push_front(2);
        list.push_front(3);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.get(a), None);
        assert_eq!(list.pop_back(), None);

        list.push_front(4);
        assert_eq!(list.len(), 1);
        assert_eq!(list.back(), Some(&4));
    }

    #[test]
    fn test_handles_stay_stable_across_churn() {
        let mut list = RecencyList::new();
        let keep = list.push_front(100u32);
        for i in 0..10 {
            let id = list.push_front(i);
            list.move_to_front(keep);
            list.remove(id);
        }
        assert_eq!(list.len(), 1);
        assert_eq!(list.get(keep), Some(&100));
    }

    #[test]
    fn test_interleaved_push_pop_keeps_links_consistent() {
        let mut list = RecencyList::new();
        let mut expected: Vec<u32> = Vec::new();
        for round in 0..5u32 {
            for i in 0..4 {
                list.push_front(round * 10 + i);
                expected.insert(0, round * 10 + i);
            }
            for _ in 0..3 {
                let got = list.pop_back();
                let want = expected.pop();
                assert_eq!(got, want);
            }
        }
        let order: Vec<u32> = list.iter().copied().collect();
        assert_eq!(order, expected);
    }
}
