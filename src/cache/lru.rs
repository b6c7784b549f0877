//! LRU Tracker Module
//!
//! Implements Least Recently Used tracking for cache eviction.

use crate::cache::RangeKey;

/// Index of a node inside the tracker's arena.
pub type Slot = usize;

#[derive(Debug, Clone)]
struct Node {
    key: RangeKey,
    prev: Option<Slot>,
    next: Option<Slot>,
    live: bool,
}

// == LRU Tracker ==
/// Tracks access order for LRU eviction strategy.
///
/// Keys live in an arena-backed doubly linked list where:
/// - Front (head) = Most recently used
/// - Back (tail) = Least recently used
///
/// Callers keep the [`Slot`] returned by [`LruTracker::push_front`] and hand
/// it back to `touch`/`remove`, so every operation is O(1). Freed slots are
/// recycled by later insertions.
#[derive(Debug, Default)]
pub struct LruTracker {
    nodes: Vec<Node>,
    free: Vec<Slot>,
    head: Option<Slot>,
    tail: Option<Slot>,
    len: usize,
}

impl LruTracker {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tracker with room for `capacity` keys before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    // == Push Front ==
    /// Adds a key as the most recently used and returns its slot.
    pub fn push_front(&mut self, key: RangeKey) -> Slot {
        let node = Node {
            key,
            prev: None,
            next: None,
            live: true,
        };
        let slot = match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                slot
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };
        self.link_front(slot);
        self.len += 1;
        slot
    }

    // == Touch ==
    /// Marks the key in `slot` as recently used (moves it to front).
    pub fn touch(&mut self, slot: Slot) {
        if !self.is_live(slot) || self.head == Some(slot) {
            return;
        }
        self.unlink(slot);
        self.link_front(slot);
    }

    // == Remove ==
    /// Removes the key in `slot` from the tracker.
    ///
    /// Neighbouring keys keep their relative order. Returns None if the slot
    /// is not in use.
    pub fn remove(&mut self, slot: Slot) -> Option<RangeKey> {
        if !self.is_live(slot) {
            return None;
        }
        self.unlink(slot);
        self.nodes[slot].live = false;
        self.free.push(slot);
        self.len -= 1;
        Some(self.nodes[slot].key)
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<RangeKey> {
        let tail = self.tail?;
        self.remove(tail)
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without removing it.
    #[allow(dead_code)]
    pub fn peek_oldest(&self) -> Option<&RangeKey> {
        self.tail.map(|slot| &self.nodes[slot].key)
    }

    // == Length ==
    /// Returns the number of tracked keys.
    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.len
    }

    // == Is Empty ==
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Iterate ==
    /// Iterates keys from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = &RangeKey> + '_ {
        let mut cursor = self.head;
        std::iter::from_fn(move || {
            let node = &self.nodes[cursor?];
            cursor = node.next;
            Some(&node.key)
        })
    }

    fn is_live(&self, slot: Slot) -> bool {
        self.nodes.get(slot).is_some_and(|node| node.live)
    }

    fn unlink(&mut self, slot: Slot) {
        let (prev, next) = {
            let node = &self.nodes[slot];
            (node.prev, node.next)
        };

        match prev {
            Some(p) => self.nodes[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.nodes[n].prev = prev,
            None => self.tail = prev,
        }

        let node = &mut self.nodes[slot];
        node.prev = None;
        node.next = None;
    }

    fn link_front(&mut self, slot: Slot) {
        let old_head = self.head;
        {
            let node = &mut self.nodes[slot];
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(h) => self.nodes[h].prev = Some(slot),
            None => self.tail = Some(slot),
        }
        self.head = Some(slot);
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn key(n: usize) -> RangeKey {
        RangeKey::new(n, n + 1)
    }

    fn order(lru: &LruTracker) -> Vec<RangeKey> {
        lru.iter().copied().collect()
    }

    #[test]
    fn test_lru_new() {
        let lru = LruTracker::new();
        assert!(lru.is_empty());
        assert_eq!(lru.len(), 0);
        assert_eq!(lru.peek_oldest(), None);
    }

    #[test]
    fn test_lru_push_new_keys() {
        let mut lru = LruTracker::new();

        lru.push_front(key(1));
        lru.push_front(key(2));
        lru.push_front(key(3));

        assert_eq!(lru.len(), 3);
        // key(1) is oldest (added first)
        assert_eq!(lru.peek_oldest(), Some(&key(1)));
        assert_eq!(order(&lru), vec![key(3), key(2), key(1)]);
    }

    #[test]
    fn test_lru_touch_existing_key() {
        let mut lru = LruTracker::new();

        let a = lru.push_front(key(1));
        lru.push_front(key(2));
        lru.push_front(key(3));

        lru.touch(a);

        assert_eq!(lru.len(), 3);
        assert_eq!(lru.peek_oldest(), Some(&key(2)));
        assert_eq!(order(&lru), vec![key(1), key(3), key(2)]);
    }

    #[test]
    fn test_lru_touch_head_is_noop() {
        let mut lru = LruTracker::new();

        lru.push_front(key(1));
        let b = lru.push_front(key(2));
        lru.touch(b);

        assert_eq!(order(&lru), vec![key(2), key(1)]);
    }

    #[test]
    fn test_lru_evict_oldest() {
        let mut lru = LruTracker::new();

        lru.push_front(key(1));
        lru.push_front(key(2));
        lru.push_front(key(3));

        assert_eq!(lru.evict_oldest(), Some(key(1)));
        assert_eq!(lru.len(), 2);

        assert_eq!(lru.evict_oldest(), Some(key(2)));
        assert_eq!(lru.len(), 1);
    }

    #[test]
    fn test_lru_evict_empty() {
        let mut lru = LruTracker::new();
        assert_eq!(lru.evict_oldest(), None);
    }

    #[test]
    fn test_lru_remove_middle_keeps_order() {
        let mut lru = LruTracker::new();

        lru.push_front(key(1));
        let b = lru.push_front(key(2));
        lru.push_front(key(3));

        assert_eq!(lru.remove(b), Some(key(2)));

        assert_eq!(lru.len(), 2);
        assert_eq!(order(&lru), vec![key(3), key(1)]);
    }

    #[test]
    fn test_lru_remove_twice() {
        let mut lru = LruTracker::new();

        let a = lru.push_front(key(1));
        lru.push_front(key(2));

        assert_eq!(lru.remove(a), Some(key(1)));
        assert_eq!(lru.remove(a), None);
        assert_eq!(lru.len(), 1);
    }

    #[test]
    fn test_lru_slot_reuse() {
        let mut lru = LruTracker::with_capacity(2);

        let a = lru.push_front(key(1));
        lru.remove(a);
        let b = lru.push_front(key(2));

        // Freed slot is recycled rather than growing the arena
        assert_eq!(a, b);
        assert_eq!(order(&lru), vec![key(2)]);
    }

    #[test]
    fn test_lru_order_after_multiple_touches() {
        let mut lru = LruTracker::new();

        let a = lru.push_front(key(1));
        let b = lru.push_front(key(2));
        let c = lru.push_front(key(3));

        // push: [c, b, a]
        // touch(a): [a, c, b]
        // touch(c): [c, a, b]
        // touch(b): [b, c, a]
        lru.touch(a);
        lru.touch(c);
        lru.touch(b);

        assert_eq!(lru.evict_oldest(), Some(key(1)));
        assert_eq!(lru.evict_oldest(), Some(key(3)));
        assert_eq!(lru.evict_oldest(), Some(key(2)));
        assert!(lru.is_empty());
    }
}
