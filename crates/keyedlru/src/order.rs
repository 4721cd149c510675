//! Recency list: an arena-backed doubly-linked list.
//!
//! Links are slot indices, never references. Slots 0 and 1 are permanent
//! sentinels bracketing the list, so every live slot always has a valid
//! predecessor and successor and linking never needs to special-case the
//! first, last or only element.

/// Sentinel preceding the most recently used slot.
const HEAD: usize = 0;
/// Sentinel following the least recently used slot.
const TAIL: usize = 1;

/// One arena slot. `entry` is `None` for sentinels and freed slots.
struct Slot<T> {
    entry: Option<T>,
    prev: usize,
    next: usize,
}

impl<T> Slot<T> {
    fn vacant(prev: usize, next: usize) -> Self {
        Self {
            entry: None,
            prev,
            next,
        }
    }
}

/// Entries ordered from most recently used (front) to least recently used (back).
pub(crate) struct RecencyList<T> {
    slots: Vec<Slot<T>>,
    free_list: Vec<usize>,
    len: usize,
}

impl<T> RecencyList<T> {
    /// Create an empty list with room for `capacity` entries before reallocating.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity + 2);
        slots.push(Slot::vacant(HEAD, TAIL));
        slots.push(Slot::vacant(HEAD, TAIL));

        Self {
            slots,
            free_list: Vec::new(),
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Slot of the most recently used entry.
    pub(crate) fn front(&self) -> Option<usize> {
        let idx = self.slots[HEAD].next;
        (idx != TAIL).then_some(idx)
    }

    /// Slot of the least recently used entry.
    pub(crate) fn back(&self) -> Option<usize> {
        let idx = self.slots[TAIL].prev;
        (idx != HEAD).then_some(idx)
    }

    pub(crate) fn get(&self, idx: usize) -> Option<&T> {
        self.slots.get(idx).and_then(|slot| slot.entry.as_ref())
    }

    pub(crate) fn get_mut(&mut self, idx: usize) -> Option<&mut T> {
        self.slots.get_mut(idx).and_then(|slot| slot.entry.as_mut())
    }

    /// Insert `entry` as the most recently used element and return its slot.
    pub(crate) fn push_front(&mut self, entry: T) -> usize {
        let idx = self.alloc(entry);
        self.link_front(idx);
        self.len += 1;
        idx
    }

    /// Promote a live slot to the front. A no-op when it is already there.
    pub(crate) fn move_to_front(&mut self, idx: usize) {
        debug_assert!(self.is_live(idx), "move_to_front on vacant slot {idx}");

        if self.slots[HEAD].next == idx {
            return;
        }

        self.unlink(idx);
        self.link_front(idx);
    }

    /// Detach and return the least recently used entry.
    pub(crate) fn pop_back(&mut self) -> Option<T> {
        let idx = self.back()?;
        self.remove(idx)
    }

    /// Detach the entry at `idx` and hand its slot to the free list.
    pub(crate) fn remove(&mut self, idx: usize) -> Option<T> {
        if idx <= TAIL {
            return None;
        }

        let entry = self.slots.get_mut(idx)?.entry.take()?;
        self.unlink(idx);
        self.free_list.push(idx);
        self.len -= 1;
        Some(entry)
    }

    /// Drop every entry and release all slots but the sentinels.
    pub(crate) fn clear(&mut self) {
        self.slots.truncate(2);
        self.slots[HEAD] = Slot::vacant(HEAD, TAIL);
        self.slots[TAIL] = Slot::vacant(HEAD, TAIL);
        self.free_list.clear();
        self.len = 0;
    }

    /// Walk the list front to back, yielding `(slot, entry)` pairs.
    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            front: self.slots[HEAD].next,
            back: self.slots[TAIL].prev,
            remaining: self.len,
        }
    }

    fn is_live(&self, idx: usize) -> bool {
        idx > TAIL && self.get(idx).is_some()
    }

    fn alloc(&mut self, entry: T) -> usize {
        if let Some(idx) = self.free_list.pop() {
            self.slots[idx].entry = Some(entry);
            idx
        } else {
            let idx = self.slots.len();
            self.slots.push(Slot {
                entry: Some(entry),
                prev: idx,
                next: idx,
            });
            idx
        }
    }

    fn link_front(&mut self, idx: usize) {
        let first = self.slots[HEAD].next;

        self.slots[idx].prev = HEAD;
        self.slots[idx].next = first;
        self.slots[first].prev = idx;
        self.slots[HEAD].next = idx;
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = (self.slots[idx].prev, self.slots[idx].next);

        self.slots[prev].next = next;
        self.slots[next].prev = prev;

        // Detached slots point at themselves so a stale link can't reach the list.
        self.slots[idx].prev = idx;
        self.slots[idx].next = idx;
    }

    /// Check link symmetry, slot accounting and free-list hygiene.
    ///
    /// Panics on the first violation.
    #[cfg(any(test, debug_assertions))]
    pub(crate) fn debug_validate_links(&self) {
        assert_eq!(
            self.len + self.free_list.len() + 2,
            self.slots.len(),
            "len({}) + free({}) + sentinels != slots({})",
            self.len,
            self.free_list.len(),
            self.slots.len()
        );

        let mut forward = 0;
        let mut cur = self.slots[HEAD].next;
        while cur != TAIL {
            assert!(self.is_live(cur), "forward walk reached vacant slot {cur}");
            let next = self.slots[cur].next;
            assert_eq!(self.slots[next].prev, cur, "list broken after slot {cur}");
            forward += 1;
            assert!(forward <= self.len, "forward walk longer than len({})", self.len);
            cur = next;
        }
        assert_eq!(forward, self.len, "forward walk != len");

        let mut backward = 0;
        let mut cur = self.slots[TAIL].prev;
        while cur != HEAD {
            backward += 1;
            assert!(backward <= self.len, "backward walk longer than len({})", self.len);
            cur = self.slots[cur].prev;
        }
        assert_eq!(backward, self.len, "backward walk != len");

        for &idx in &self.free_list {
            assert!(idx > TAIL, "sentinel {idx} on free list");
            assert!(self.slots[idx].entry.is_none(), "free slot {idx} still occupied");
        }
    }
}

/// Front-to-back iterator over a [`RecencyList`].
pub(crate) struct Iter<'a, T> {
    list: &'a RecencyList<T>,
    front: usize,
    back: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (usize, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let idx = self.front;
        let slot = &self.list.slots[idx];
        self.front = slot.next;
        self.remaining -= 1;
        slot.entry.as_ref().map(|entry| (idx, entry))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let idx = self.back;
        let slot = &self.list.slots[idx];
        self.back = slot.prev;
        self.remaining -= 1;
        slot.entry.as_ref().map(|entry| (idx, entry))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents(list: &RecencyList<&'static str>) -> Vec<&'static str> {
        list.iter().map(|(_, entry)| *entry).collect()
    }

    #[test]
    fn test_list_empty() {
        let list: RecencyList<u32> = RecencyList::with_capacity(4);

        assert_eq!(list.len(), 0);
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        assert_eq!(list.iter().count(), 0);
        list.debug_validate_links();
    }

    #[test]
    fn test_list_push_front_orders_newest_first() {
        let mut list = RecencyList::with_capacity(4);

        let a = list.push_front("a");
        list.push_front("b");
        let c = list.push_front("c");

        assert_eq!(contents(&list), vec!["c", "b", "a"]);
        assert_eq!(list.front(), Some(c));
        assert_eq!(list.back(), Some(a));
        list.debug_validate_links();
    }

    #[test]
    fn test_list_single_entry_is_front_and_back() {
        let mut list = RecencyList::with_capacity(1);

        let a = list.push_front("a");

        assert_eq!(list.front(), Some(a));
        assert_eq!(list.back(), Some(a));
        assert_eq!(list.pop_back(), Some("a"));
        assert_eq!(list.front(), None);
        list.debug_validate_links();
    }

    #[test]
    fn test_list_move_to_front() {
        let mut list = RecencyList::with_capacity(4);

        let a = list.push_front("a");
        let b = list.push_front("b");
        list.push_front("c");

        // Tail to front
        list.move_to_front(a);
        assert_eq!(contents(&list), vec!["a", "c", "b"]);

        // Interior to front
        let interior = list.iter().nth(1).map(|(idx, _)| idx).unwrap();
        list.move_to_front(interior);
        assert_eq!(contents(&list), vec!["c", "a", "b"]);

        // Front stays put
        let front = list.front().unwrap();
        list.move_to_front(front);
        assert_eq!(contents(&list), vec!["c", "a", "b"]);

        list.move_to_front(b);
        assert_eq!(contents(&list), vec!["b", "c", "a"]);
        list.debug_validate_links();
    }

    #[test]
    fn test_list_two_entries_swap() {
        let mut list = RecencyList::with_capacity(2);

        let a = list.push_front("a");
        list.push_front("b");
        list.move_to_front(a);

        assert_eq!(contents(&list), vec!["a", "b"]);
        assert_eq!(list.pop_back(), Some("b"));
        assert_eq!(contents(&list), vec!["a"]);
        list.debug_validate_links();
    }

    #[test]
    fn test_list_remove_reuses_slot() {
        let mut list = RecencyList::with_capacity(3);

        list.push_front("a");
        let b = list.push_front("b");
        list.push_front("c");

        assert_eq!(list.remove(b), Some("b"));
        assert_eq!(list.remove(b), None);
        assert_eq!(contents(&list), vec!["c", "a"]);

        let d = list.push_front("d");
        assert_eq!(d, b);
        assert_eq!(contents(&list), vec!["d", "c", "a"]);
        list.debug_validate_links();
    }

    #[test]
    fn test_list_remove_rejects_sentinels() {
        let mut list = RecencyList::with_capacity(1);
        list.push_front("a");

        assert_eq!(list.remove(HEAD), None);
        assert_eq!(list.remove(TAIL), None);
        assert_eq!(list.remove(99), None);
        assert_eq!(list.len(), 1);
        list.debug_validate_links();
    }

    #[test]
    fn test_list_iter_reverse() {
        let mut list = RecencyList::with_capacity(3);

        list.push_front("a");
        list.push_front("b");
        list.push_front("c");

        let reversed: Vec<_> = list.iter().rev().map(|(_, entry)| *entry).collect();
        assert_eq!(reversed, vec!["a", "b", "c"]);

        let mut iter = list.iter();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next().map(|(_, e)| *e), Some("c"));
        assert_eq!(iter.next_back().map(|(_, e)| *e), Some("a"));
        assert_eq!(iter.next().map(|(_, e)| *e), Some("b"));
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn test_list_clear() {
        let mut list = RecencyList::with_capacity(3);

        list.push_front("a");
        let b = list.push_front("b");
        list.remove(b);
        list.clear();

        assert_eq!(list.len(), 0);
        assert_eq!(list.front(), None);
        list.debug_validate_links();

        list.push_front("z");
        assert_eq!(contents(&list), vec!["z"]);
        list.debug_validate_links();
    }
}
