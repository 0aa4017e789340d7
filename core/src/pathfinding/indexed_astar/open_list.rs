//! Addressable binary min-heap over node indices.
//!
//! Each node index remembers its slot in the heap, so removing an arbitrary
//! node costs O(log n) instead of a linear scan. The slot table is sized to
//! the graph once and only the slots of queued nodes are touched on `clear`.

use std::cmp::Ordering;

const NOT_QUEUED: usize = usize::MAX;

#[derive(Debug, Clone, Copy)]
struct HeapEntry {
    key: f32,
    sequence: u64,
    index: usize,
}

impl HeapEntry {
    /// Lower key first; equal keys in insertion order.
    fn precedes(&self, other: &HeapEntry) -> bool {
        self.key
            .total_cmp(&other.key)
            .then(self.sequence.cmp(&other.sequence))
            == Ordering::Less
    }
}

#[derive(Debug)]
pub(crate) struct OpenList {
    heap: Vec<HeapEntry>,
    slots: Vec<usize>,
    sequence: u64,
}

impl OpenList {
    pub fn new(node_count: usize) -> Self {
        Self {
            heap: Vec::new(),
            slots: vec![NOT_QUEUED; node_count],
            sequence: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.slots[index] != NOT_QUEUED
    }

    pub fn clear(&mut self) {
        for entry in self.heap.drain(..) {
            self.slots[entry.index] = NOT_QUEUED;
        }
        self.sequence = 0;
    }

    pub fn push(&mut self, index: usize, key: f32) {
        assert!(
            !self.contains(index),
            "node {index} is already in the open list"
        );
        let slot = self.heap.len();
        self.heap.push(HeapEntry {
            key,
            sequence: self.sequence,
            index,
        });
        self.sequence += 1;
        self.slots[index] = slot;
        self.sift_up(slot);
    }

    /// Removes and returns the node with the lowest key.
    pub fn pop(&mut self) -> usize {
        assert!(!self.is_empty(), "pop on an empty open list");
        self.remove_slot(0)
    }

    pub fn remove(&mut self, index: usize) {
        let slot = self.slots[index];
        assert!(slot != NOT_QUEUED, "node {index} is not in the open list");
        self.remove_slot(slot);
    }

    fn remove_slot(&mut self, slot: usize) -> usize {
        let last = self.heap.len() - 1;
        self.swap(slot, last);
        let removed = self.heap.pop().map(|entry| entry.index).unwrap_or(NOT_QUEUED);
        self.slots[removed] = NOT_QUEUED;

        if slot < self.heap.len() {
            let slot = self.sift_up(slot);
            self.sift_down(slot);
        }
        removed
    }

    fn sift_up(&mut self, mut slot: usize) -> usize {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if !self.heap[slot].precedes(&self.heap[parent]) {
                break;
            }
            self.swap(slot, parent);
            slot = parent;
        }
        slot
    }

    fn sift_down(&mut self, mut slot: usize) {
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            let mut smallest = slot;

            if left < self.heap.len() && self.heap[left].precedes(&self.heap[smallest]) {
                smallest = left;
            }
            if right < self.heap.len() && self.heap[right].precedes(&self.heap[smallest]) {
                smallest = right;
            }
            if smallest == slot {
                return;
            }
            self.swap(slot, smallest);
            slot = smallest;
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.slots[self.heap[a].index] = a;
        self.slots[self.heap[b].index] = b;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_key_order() {
        let mut open = OpenList::new(6);
        for (index, key) in [(0, 5.0), (1, 1.0), (2, 4.0), (3, 2.0), (4, 3.0)] {
            open.push(index, key);
        }

        let order: Vec<usize> = (0..5).map(|_| open.pop()).collect();
        assert_eq!(order, vec![1, 3, 4, 2, 0]);
        assert!(open.is_empty());
    }

    #[test]
    fn equal_keys_pop_in_insertion_order() {
        let mut open = OpenList::new(4);
        open.push(3, 1.0);
        open.push(0, 1.0);
        open.push(2, 1.0);

        assert_eq!(open.pop(), 3);
        assert_eq!(open.pop(), 0);
        assert_eq!(open.pop(), 2);
    }

    #[test]
    fn remove_then_reinsert_with_lower_key() {
        let mut open = OpenList::new(5);
        open.push(0, 10.0);
        open.push(1, 4.0);
        open.push(2, 7.0);
        open.push(3, 8.0);

        open.remove(3);
        assert!(!open.contains(3));
        open.push(3, 1.0);

        assert_eq!(open.pop(), 3);
        assert_eq!(open.pop(), 1);
        assert_eq!(open.pop(), 2);
        assert_eq!(open.pop(), 0);
    }

    #[test]
    fn remove_keeps_heap_ordered() {
        let mut open = OpenList::new(16);
        for index in 0..16 {
            open.push(index, ((index * 7) % 16) as f32);
        }
        for index in [5, 0, 11, 15] {
            open.remove(index);
        }

        let mut last = f32::NEG_INFINITY;
        let mut popped = 0;
        while !open.is_empty() {
            let index = open.pop();
            let key = ((index * 7) % 16) as f32;
            assert!(key >= last);
            last = key;
            popped += 1;
        }
        assert_eq!(popped, 12);
    }

    #[test]
    fn clear_forgets_queued_nodes() {
        let mut open = OpenList::new(3);
        open.push(0, 1.0);
        open.push(2, 2.0);
        open.clear();

        assert!(open.is_empty());
        assert!(!open.contains(0));
        open.push(0, 3.0);
        assert_eq!(open.len(), 1);
    }

    #[test]
    #[should_panic(expected = "pop on an empty open list")]
    fn pop_on_empty_list_panics() {
        let mut open = OpenList::new(1);
        open.pop();
    }

    #[test]
    #[should_panic(expected = "already in the open list")]
    fn double_push_panics() {
        let mut open = OpenList::new(2);
        open.push(1, 1.0);
        open.push(1, 2.0);
    }
}
