use crate::SYMBOL_COUNT;

/// Occurrence count of every byte value in a source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; SYMBOL_COUNT],
}

impl FrequencyTable {
    /// A table in which every byte has a count of zero.
    pub fn new() -> Self {
        Self {
            counts: [0; SYMBOL_COUNT],
        }
    }

    /// Count the bytes of `text`.
    pub fn from_bytes(text: &[u8]) -> Self {
        let mut table = Self::new();
        table.count(text.iter().copied());
        table
    }

    /// Add every byte of `bytes` to the running counts. A count stops at
    /// `u64::MAX`.
    pub fn count(&mut self, bytes: impl IntoIterator<Item = u8>) -> &mut Self {
        for byte in bytes {
            let count = &mut self.counts[byte as usize];
            *count = count.saturating_add(1);
        }
        self
    }

    pub fn get(&self, byte: u8) -> u64 {
        self.counts[byte as usize]
    }

    /// The bytes with a non-zero count, in ascending byte order.
    pub fn symbols(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(byte, &count)| (byte as u8, count))
    }

    /// Number of distinct bytes present.
    pub fn distinct(&self) -> usize {
        self.symbols().count()
    }

    /// Sum of all counts, i.e. the length of the counted text. `None` if the
    /// sum does not fit in a `u64`.
    pub fn total(&self) -> Option<u64> {
        self.counts
            .iter()
            .try_fold(0u64, |sum, &count| sum.checked_add(count))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&count| count == 0)
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl From<[u64; SYMBOL_COUNT]> for FrequencyTable {
    fn from(counts: [u64; SYMBOL_COUNT]) -> Self {
        Self { counts }
    }
}

impl FromIterator<u8> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut table = Self::new();
        table.count(iter);
        table
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_counts() {
        let table = FrequencyTable::from_bytes(b"abracadabra");
        assert_eq!(table.get(b'a'), 5);
        assert_eq!(table.get(b'b'), 2);
        assert_eq!(table.get(b'r'), 2);
        assert_eq!(table.get(b'c'), 1);
        assert_eq!(table.get(b'd'), 1);
        assert_eq!(table.get(b'z'), 0);
        assert_eq!(table.total(), Some(11));
    }

    #[test]
    fn test_symbols_ascending() {
        let table = FrequencyTable::from_bytes(b"zay\x00\xff");
        assert_eq!(
            table.symbols().collect::<Vec<_>>(),
            vec![(0, 1), (b'a', 1), (b'y', 1), (b'z', 1), (0xff, 1)]
        );
        assert_eq!(table.distinct(), 5);
    }

    #[test]
    fn test_empty() {
        let table = FrequencyTable::from_bytes(b"");
        assert!(table.is_empty());
        assert_eq!(table.distinct(), 0);
        assert_eq!(table.symbols().next(), None);
    }

    #[test]
    fn test_incremental_count_matches_collect() {
        let mut table = FrequencyTable::new();
        table.count(b"hello ".iter().copied()).count(b"world".iter().copied());
        let collected: FrequencyTable = b"hello world".iter().copied().collect();
        assert_eq!(table, collected);
    }

    #[test]
    fn test_total_overflow() {
        let mut counts = [0; SYMBOL_COUNT];
        counts[b'a' as usize] = u64::MAX / 2 + 1;
        counts[b'b' as usize] = u64::MAX / 2 + 1;
        assert_eq!(FrequencyTable::from(counts).total(), None);
    }

    #[test]
    fn test_count_saturates() {
        let mut counts = [0; SYMBOL_COUNT];
        counts[b'a' as usize] = u64::MAX;
        let mut table = FrequencyTable::from(counts);
        table.count(*b"aa");
        assert_eq!(table.get(b'a'), u64::MAX);
    }

    #[test]
    fn test_from_array() {
        let mut counts = [0; SYMBOL_COUNT];
        counts[b'q' as usize] = 7;
        let table = FrequencyTable::from(counts);
        assert_eq!(table.symbols().collect::<Vec<_>>(), vec![(b'q', 7)]);
    }
}
