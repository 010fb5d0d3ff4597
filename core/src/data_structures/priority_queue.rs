//! Indexed binary min-heap with decrease-key
//!
//! Elements are vertex positions `0..capacity`. Each element carries a
//! priority and a fixed tie-breaking rank; the heap orders by priority first
//! and rank second, so the element popped is always the one a linear scan in
//! rank order would have picked.
//!
//! # Complexity
//! - `push` / `decrease_key` / `pop`: O(log n)
//! - `contains` / `priority`: O(1) through the reverse position index
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::cmp::Ordering;
use std::fmt::Debug;

#[derive(Debug, Clone)]
struct HeapEntry<P> {
    id: usize,
    rank: usize,
    priority: P,
}

/// Min-heap over element ids with O(1) position lookup
#[derive(Debug, Clone)]
pub struct IndexedMinQueue<P> {
    heap: Vec<HeapEntry<P>>,
    /// Reverse index: heap slot of each element, `None` when absent
    position: Vec<Option<usize>>,
    /// Comparisons performed, for statistics
    comparisons: usize,
}

impl<P: PartialOrd + Copy + Debug> IndexedMinQueue<P> {
    /// Creates an empty queue accepting ids in `0..capacity`
    pub fn new(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            position: vec![None; capacity],
            comparisons: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: usize) -> bool {
        self.position.get(id).map_or(false, Option::is_some)
    }

    /// Current priority of `id`, if queued
    pub fn priority(&self, id: usize) -> Option<P> {
        self.position
            .get(id)
            .copied()
            .flatten()
            .map(|slot| self.heap[slot].priority)
    }

    #[inline]
    pub fn comparisons(&self) -> usize {
        self.comparisons
    }

    /// Inserts `id`, or lowers its priority if already queued
    ///
    /// A priority that is not lower than the queued one is ignored.
    pub fn push(&mut self, id: usize, rank: usize, priority: P) {
        if self.contains(id) {
            self.decrease_key(id, priority);
            return;
        }

        let slot = self.heap.len();
        self.heap.push(HeapEntry { id, rank, priority });
        self.position[id] = Some(slot);
        self.sift_up(slot);
    }

    /// Lowers the priority of a queued element; returns whether it changed
    pub fn decrease_key(&mut self, id: usize, priority: P) -> bool {
        let Some(slot) = self.position.get(id).copied().flatten() else {
            return false;
        };
        if !(priority < self.heap[slot].priority) {
            return false;
        }

        self.heap[slot].priority = priority;
        self.sift_up(slot);
        true
    }

    /// Removes and returns the element with the lowest `(priority, rank)`
    pub fn pop(&mut self) -> Option<(usize, P)> {
        if self.heap.is_empty() {
            return None;
        }

        let last = self.heap.len() - 1;
        self.swap(0, last);
        let entry = self.heap.pop()?;
        self.position[entry.id] = None;

        if !self.heap.is_empty() {
            self.sift_down(0);
        }

        Some((entry.id, entry.priority))
    }

    fn less(&mut self, a: usize, b: usize) -> bool {
        self.comparisons += 1;
        let (x, y) = (&self.heap[a], &self.heap[b]);
        match x.priority.partial_cmp(&y.priority).unwrap_or(Ordering::Equal) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => x.rank < y.rank,
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.position[self.heap[a].id] = Some(a);
        self.position[self.heap[b].id] = Some(b);
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if !self.less(slot, parent) {
                break;
            }
            self.swap(slot, parent);
            slot = parent;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            let mut smallest = slot;

            if left < len && self.less(left, smallest) {
                smallest = left;
            }
            if right < len && self.less(right, smallest) {
                smallest = right;
            }
            if smallest == slot {
                break;
            }

            self.swap(slot, smallest);
            slot = smallest;
        }
    }
}
