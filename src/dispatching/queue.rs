//! Ready queue ordered by `(score, arrival)`.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::RuleScore;

/// Min-priority queue of ready task indices.
///
/// Entries are keyed by rule score, then by a monotonically increasing
/// arrival sequence. Equal-score tasks therefore leave in the order they
/// were pushed, the same contract a stable re-sort of a ready list gives.
#[derive(Debug, Clone, Default)]
pub struct ReadyQueue {
    heap: BinaryHeap<Reverse<(RuleScore, u64, usize)>>,
    next_seq: u64,
}

impl ReadyQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty queue with room for `capacity` tasks.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            next_seq: 0,
        }
    }

    /// Adds a ready task.
    pub fn push(&mut self, score: RuleScore, idx: usize) {
        self.heap.push(Reverse((score, self.next_seq, idx)));
        self.next_seq += 1;
    }

    /// Removes the best task.
    pub fn pop(&mut self) -> Option<usize> {
        self.heap.pop().map(|Reverse((_, _, idx))| idx)
    }

    /// The best task, without removing it.
    pub fn peek(&self) -> Option<usize> {
        self.heap.peek().map(|Reverse((_, _, idx))| *idx)
    }

    /// Number of queued tasks.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
