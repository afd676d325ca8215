//! Fixed-capacity object pool: a slot array plus an active bitset.
//!
//! Slots are filled once with `insert` and then toggled with `release` /
//! `acquire`; nothing is ever removed, so slot indices stay stable for the
//! lifetime of the pool. Stars and bombs both live in one of these.

const WORD_BITS: usize = u64::BITS as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolFull {
    pub capacity: usize,
}

impl std::fmt::Display for PoolFull {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pool at capacity ({})", self.capacity)
    }
}

impl std::error::Error for PoolFull {}

#[derive(Debug, Clone)]
pub struct FixedPool<T> {
    slots: Vec<T>,
    active: Box<[u64]>,
    capacity: usize,
}

impl<T> FixedPool<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            active: vec![0u64; capacity.div_ceil(WORD_BITS)].into_boxed_slice(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of filled slots (active or not).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity
    }

    /// Fill the next free slot; the new slot starts active.
    pub fn insert(&mut self, item: T) -> Result<usize, PoolFull> {
        if self.is_full() {
            return Err(PoolFull { capacity: self.capacity });
        }
        let index = self.slots.len();
        self.slots.push(item);
        self.set_active(index, true);
        Ok(index)
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index)
    }

    pub fn is_active(&self, index: usize) -> bool {
        index < self.slots.len() && self.active[index / WORD_BITS] & (1 << (index % WORD_BITS)) != 0
    }

    /// Deactivate a slot. Returns `false` if it was not active.
    pub fn release(&mut self, index: usize) -> bool {
        if !self.is_active(index) {
            return false;
        }
        self.set_active(index, false);
        true
    }

    /// Reactivate a released slot. Returns `None` if unknown or already active.
    pub fn acquire(&mut self, index: usize) -> Option<&T> {
        if index >= self.slots.len() || self.is_active(index) {
            return None;
        }
        self.set_active(index, true);
        self.slots.get(index)
    }

    /// Reactivate every released slot, returning the indices that changed.
    pub fn acquire_all(&mut self) -> Vec<usize> {
        let revived: Vec<usize> = (0..self.slots.len()).filter(|&i| !self.is_active(i)).collect();
        for &i in &revived {
            self.set_active(i, true);
        }
        revived
    }

    pub fn count_active(&self) -> usize {
        self.active.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots.iter().enumerate()
    }

    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &T)> {
        self.iter().filter(|(i, _)| self.is_active(*i))
    }

    fn set_active(&mut self, index: usize, on: bool) {
        let word = &mut self.active[index / WORD_BITS];
        let bit = 1u64 << (index % WORD_BITS);
        if on {
            *word |= bit;
        } else {
            *word &= !bit;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_until_full() {
        let mut pool = FixedPool::with_capacity(2);
        assert_eq!(pool.insert('a'), Ok(0));
        assert_eq!(pool.insert('b'), Ok(1));
        assert_eq!(pool.insert('c'), Err(PoolFull { capacity: 2 }));
        assert_eq!(pool.count_active(), 2);
    }

    #[test]
    fn release_and_acquire_toggle_active_bits() {
        let mut pool = FixedPool::with_capacity(4);
        for i in 0..4 {
            pool.insert(i * 10).unwrap();
        }
        assert!(pool.release(1));
        assert!(!pool.release(1), "double release must be a no-op");
        assert_eq!(pool.count_active(), 3);
        assert!(!pool.is_active(1));
        assert_eq!(pool.acquire(1), Some(&10));
        assert_eq!(pool.acquire(1), None, "already active");
        assert_eq!(pool.acquire(9), None, "unknown slot");
        assert_eq!(pool.count_active(), 4);
    }

    #[test]
    fn acquire_all_revives_only_released_slots() {
        let mut pool = FixedPool::with_capacity(12);
        for i in 0..12 {
            pool.insert(i).unwrap();
        }
        for i in [0, 5, 11] {
            pool.release(i);
        }
        assert_eq!(pool.acquire_all(), vec![0, 5, 11]);
        assert_eq!(pool.count_active(), 12);
        assert!(pool.acquire_all().is_empty());
    }

    #[test]
    fn bitset_spans_multiple_words() {
        let mut pool = FixedPool::with_capacity(130);
        for i in 0..130 {
            pool.insert(i).unwrap();
        }
        assert!(pool.release(64));
        assert!(pool.release(129));
        assert!(!pool.is_active(64));
        assert!(pool.is_active(63));
        assert_eq!(pool.count_active(), 128);
        let active: Vec<usize> = pool.iter_active().map(|(i, _)| i).collect();
        assert!(!active.contains(&129));
    }
}
