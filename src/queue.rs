use crate::SYMBOL_COUNT;

/// Ordering key of a pending tree node.
///
/// Fields are compared in declaration order: lower frequency first, then
/// lower character value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority {
    pub frequency: u64,
    pub character: u8,
}

impl Priority {
    pub fn new(frequency: u64, character: u8) -> Self {
        Self {
            frequency,
            character,
        }
    }
}

/// Errors that can occur while filling the queue
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum QueueError {
    #[error("Priority queue is full ({capacity} entries)")]
    Overflow { capacity: usize },
}

/// Array-backed binary min-heap keyed by [`Priority`].
///
/// Entries only move past one another when their keys differ strictly, so
/// the position of equal keys depends on insertion order and is fully
/// deterministic.
#[derive(Debug, Clone)]
pub struct PriorityQueue<T> {
    entries: Vec<(Priority, T)>,
    capacity: usize,
}

impl<T> PriorityQueue<T> {
    /// A queue holding at most one entry per byte value.
    pub fn new() -> Self {
        Self::bounded(SYMBOL_COUNT)
    }

    /// A queue holding at most `capacity` entries.
    pub fn bounded(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The lowest entry, without removing it.
    pub fn peek(&self) -> Option<(&Priority, &T)> {
        self.entries.first().map(|(priority, item)| (priority, item))
    }

    fn parent(i: usize) -> usize {
        (i - 1) / 2
    }

    fn left(i: usize) -> usize {
        2 * i + 1
    }

    fn right(i: usize) -> usize {
        2 * i + 2
    }

    fn key(&self, i: usize) -> Priority {
        self.entries[i].0
    }

    /// Add an entry in O(log n).
    pub fn insert(&mut self, priority: Priority, item: T) -> Result<(), QueueError> {
        if self.entries.len() >= self.capacity {
            return Err(QueueError::Overflow {
                capacity: self.capacity,
            });
        }

        self.entries.push((priority, item));
        let mut i = self.entries.len() - 1;
        while i > 0 && self.key(Self::parent(i)) > priority {
            self.entries.swap(i, Self::parent(i));
            i = Self::parent(i);
        }
        Ok(())
    }

    /// Remove and return the lowest entry in O(log n).
    pub fn remove_min(&mut self) -> Option<(Priority, T)> {
        if self.entries.is_empty() {
            return None;
        }

        // The last entry takes the root's place before sifting down.
        let min = self.entries.swap_remove(0);
        let n = self.entries.len();
        let mut i = 0;
        while Self::left(i) < n {
            let mut j = Self::left(i);
            if Self::right(i) < n && self.key(Self::right(i)) < self.key(j) {
                j = Self::right(i);
            }
            if self.key(i) > self.key(j) {
                self.entries.swap(i, j);
                i = j;
            } else {
                break;
            }
        }
        Some(min)
    }

    /// Whether every entry's key is at least its parent's key.
    pub fn is_heap(&self) -> bool {
        (1..self.entries.len()).all(|i| self.key(Self::parent(i)) <= self.key(i))
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use quickcheck_macros::quickcheck;

    fn p(frequency: u64, character: u8) -> Priority {
        Priority::new(frequency, character)
    }

    #[test]
    fn test_lower_frequency_first() {
        let mut queue = PriorityQueue::new();
        queue.insert(p(5, b'a'), "a").unwrap();
        queue.insert(p(1, b'z'), "z").unwrap();
        queue.insert(p(3, b'm'), "m").unwrap();

        assert_eq!(queue.remove_min(), Some((p(1, b'z'), "z")));
        assert_eq!(queue.remove_min(), Some((p(3, b'm'), "m")));
        assert_eq!(queue.remove_min(), Some((p(5, b'a'), "a")));
        assert_eq!(queue.remove_min(), None);
    }

    #[test]
    fn test_ties_broken_by_lower_character() {
        let mut queue = PriorityQueue::new();
        queue.insert(p(2, b'c'), 'c').unwrap();
        queue.insert(p(2, b'a'), 'a').unwrap();
        queue.insert(p(2, b'b'), 'b').unwrap();

        let order: Vec<_> = std::iter::from_fn(|| queue.remove_min())
            .map(|(_, c)| c)
            .collect();
        assert_eq!(order, vec!['a', 'b', 'c']);
    }

    #[test]
    fn test_character_compared_unsigned() {
        let mut queue = PriorityQueue::new();
        queue.insert(p(1, 0xff), 0xff).unwrap();
        queue.insert(p(1, 0x01), 0x01).unwrap();

        assert_eq!(queue.remove_min().map(|(_, c)| c), Some(0x01));
    }

    #[test]
    fn test_equal_keys_keep_insertion_order_at_root() {
        let mut queue = PriorityQueue::new();
        queue.insert(p(4, 0), "first").unwrap();
        queue.insert(p(4, 0), "second").unwrap();

        assert_eq!(queue.peek(), Some((&p(4, 0), &"first")));
    }

    #[test]
    fn test_overflow() {
        let mut queue = PriorityQueue::bounded(2);
        queue.insert(p(1, 1), ()).unwrap();
        queue.insert(p(1, 2), ()).unwrap();
        assert_eq!(
            queue.insert(p(1, 3), ()),
            Err(QueueError::Overflow { capacity: 2 })
        );
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_default_capacity_is_one_per_byte() {
        let mut queue = PriorityQueue::new();
        for byte in 0..=255u8 {
            queue.insert(p(1, byte), byte).unwrap();
        }
        assert_eq!(queue.capacity(), 256);
        assert!(queue.insert(p(1, 0), 0).is_err());
    }

    /// Interleaves inserts (Some) and removals (None) and checks the heap
    /// shape after every step.
    #[quickcheck]
    fn heap_invariant_holds(ops: Vec<Option<(u8, u8)>>) -> bool {
        let mut queue = PriorityQueue::new();
        for op in ops {
            match op {
                Some((frequency, character)) => {
                    let _ = queue.insert(p(frequency as u64, character), ());
                }
                None => {
                    queue.remove_min();
                }
            }
            if !queue.is_heap() {
                return false;
            }
        }
        true
    }

    #[quickcheck]
    fn removals_are_sorted(keys: Vec<(u8, u8)>) -> bool {
        let mut queue = PriorityQueue::new();
        for &(frequency, character) in keys.iter().take(256) {
            queue.insert(p(frequency as u64, character), ()).unwrap();
        }
        let removed: Vec<_> = std::iter::from_fn(|| queue.remove_min())
            .map(|(priority, _)| priority)
            .collect();
        removed.windows(2).all(|pair| pair[0] <= pair[1])
    }
}
