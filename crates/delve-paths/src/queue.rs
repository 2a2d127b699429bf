use std::cmp::Ordering;
use std::fmt;

/// Error returned when reading from an empty [`PriorityQueue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    Empty,
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("priority queue is empty"),
        }
    }
}

impl std::error::Error for QueueError {}

/// A priority queue backed by a binary min-heap.
///
/// Values with a low priority are served first. Priorities are compared
/// with `F`, which defaults to the priority type's [`Ord`]. Entries of equal
/// priority come out in an unspecified order.
pub struct PriorityQueue<V, P, F = fn(&P, &P) -> Ordering> {
    heap: Vec<(P, V)>,
    compare: F,
}

impl<V, P: Ord> PriorityQueue<V, P> {
    /// An empty queue ordered by `P: Ord`.
    pub fn new() -> Self {
        Self::with_comparator(<P as Ord>::cmp)
    }
}

impl<V, P: Ord> Default for PriorityQueue<V, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, P, F: Fn(&P, &P) -> Ordering> PriorityQueue<V, P, F> {
    /// An empty queue ordered by `compare`.
    pub fn with_comparator(compare: F) -> Self {
        Self {
            heap: Vec::new(),
            compare,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Insert `value` with `priority`.
    pub fn enqueue(&mut self, priority: P, value: V) {
        self.heap.push((priority, value));
        self.sift_up(self.heap.len() - 1);
    }

    /// Remove and return the value with the lowest priority.
    pub fn dequeue(&mut self) -> Result<V, QueueError> {
        self.dequeue_with_priority().map(|(_, v)| v)
    }

    /// Remove and return the lowest `(priority, value)` pair.
    pub fn dequeue_with_priority(&mut self) -> Result<(P, V), QueueError> {
        if self.heap.is_empty() {
            return Err(QueueError::Empty);
        }
        // Move the last entry to the root, then restore the heap below it.
        let top = self.heap.swap_remove(0);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Ok(top)
    }

    /// The value with the lowest priority, left in place.
    pub fn peek(&self) -> Result<&V, QueueError> {
        self.heap.first().map(|(_, v)| v).ok_or(QueueError::Empty)
    }

    #[inline]
    fn greater(&self, a: usize, b: usize) -> bool {
        (self.compare)(&self.heap[a].0, &self.heap[b].0) == Ordering::Greater
    }

    // heap[i] has children heap[2i + 1], heap[2i + 2] and parent heap[(i - 1) / 2].
    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if !self.greater(parent, pos) {
                break;
            }
            self.heap.swap(parent, pos);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.heap.len();
        loop {
            let mut smallest = pos;
            let left = 2 * pos + 1;
            let right = left + 1;
            if left < len && self.greater(smallest, left) {
                smallest = left;
            }
            if right < len && self.greater(smallest, right) {
                smallest = right;
            }
            if smallest == pos {
                break;
            }
            self.heap.swap(smallest, pos);
            pos = smallest;
        }
    }
}

impl<V: fmt::Debug, P: fmt::Debug, F> fmt::Debug for PriorityQueue<V, P, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("heap", &self.heap)
            .finish()
    }
}
