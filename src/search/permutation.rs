//! Memoized permutation tables for exact route search.
//!
//! Tables are built lazily, once per stop count, and shared read-only
//! afterwards. Population goes through [`OnceLock`], so one cache may be
//! shared by shop-day solves running on different threads.

use std::sync::OnceLock;

/// Largest stop count with a precomputed table (8! = 40 320 orderings).
pub const MAX_PERMUTATION_SIZE: usize = 8;

/// All `n!` orderings of `{0, …, n-1}` in lexicographic order.
///
/// Stored flat: ordering `k` occupies `data[k*n .. (k+1)*n]`.
#[derive(Debug, Clone)]
pub struct PermutationTable {
    n: usize,
    data: Vec<u8>,
}

impl PermutationTable {
    fn build(n: usize) -> Self {
        let count: usize = (1..=n).product();
        let mut data = Vec::with_capacity(count * n);
        let mut current: Vec<u8> = (0..n as u8).collect();
        loop {
            data.extend_from_slice(&current);
            if !next_permutation(&mut current) {
                break;
            }
        }
        Self { n, data }
    }

    /// Number of elements being permuted.
    pub fn size(&self) -> usize {
        self.n
    }

    /// Number of orderings (`n!`).
    pub fn len(&self) -> usize {
        if self.n == 0 {
            0
        } else {
            self.data.len() / self.n
        }
    }

    /// Returns `true` for the empty table (`n = 0`).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the orderings; the identity comes first.
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(self.n.max(1)).take(self.len())
    }
}

/// Rearranges `items` into the next lexicographic permutation.
///
/// Returns `false` (leaving `items` sorted descending) when `items` was the last one.
fn next_permutation(items: &mut [u8]) -> bool {
    let n = items.len();
    if n < 2 {
        return false;
    }
    let mut i = n - 1;
    while i > 0 && items[i - 1] >= items[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }
    let mut j = n - 1;
    while items[j] <= items[i - 1] {
        j -= 1;
    }
    items.swap(i - 1, j);
    items[i..].reverse();
    true
}

/// Lazily populated permutation tables for sizes `1..=MAX_PERMUTATION_SIZE`.
///
/// # Examples
///
/// ```
/// use u_dispatch::search::PermutationCache;
///
/// let cache = PermutationCache::new();
/// let table = cache.get(3).unwrap();
/// assert_eq!(table.len(), 6);
/// assert_eq!(table.iter().next().unwrap(), &[0, 1, 2]);
/// assert!(cache.get(9).is_none());
/// ```
#[derive(Debug, Default)]
pub struct PermutationCache {
    tables: [OnceLock<PermutationTable>; MAX_PERMUTATION_SIZE + 1],
}

impl PermutationCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The table for `n` elements, built on first use.
    ///
    /// Returns `None` for `n = 0` and `n > MAX_PERMUTATION_SIZE`.
    pub fn get(&self, n: usize) -> Option<&PermutationTable> {
        if n == 0 || n > MAX_PERMUTATION_SIZE {
            return None;
        }
        Some(self.tables[n].get_or_init(|| PermutationTable::build(n)))
    }

    /// Returns `true` if the table for `n` has already been built.
    pub fn is_cached(&self, n: usize) -> bool {
        self.tables.get(n).is_some_and(|slot| slot.get().is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_table_sizes() {
        let cache = PermutationCache::new();
        for (n, expected) in [(1, 1), (2, 2), (3, 6), (4, 24), (8, 40320)] {
            assert_eq!(cache.get(n).expect("in range").len(), expected);
        }
    }

    #[test]
    fn test_table_lexicographic() {
        let cache = PermutationCache::new();
        let all: Vec<Vec<u8>> = cache
            .get(3)
            .expect("in range")
            .iter()
            .map(|p| p.to_vec())
            .collect();
        assert_eq!(
            all,
            vec![
                vec![0, 1, 2],
                vec![0, 2, 1],
                vec![1, 0, 2],
                vec![1, 2, 0],
                vec![2, 0, 1],
                vec![2, 1, 0],
            ]
        );
    }

    #[test]
    fn test_table_distinct() {
        let cache = PermutationCache::new();
        let table = cache.get(5).expect("in range");
        let distinct: HashSet<&[u8]> = table.iter().collect();
        assert_eq!(distinct.len(), 120);
    }

    #[test]
    fn test_out_of_range() {
        let cache = PermutationCache::new();
        assert!(cache.get(0).is_none());
        assert!(cache.get(MAX_PERMUTATION_SIZE + 1).is_none());
    }

    #[test]
    fn test_lazy_population() {
        let cache = PermutationCache::new();
        assert!(!cache.is_cached(4));
        cache.get(4);
        assert!(cache.is_cached(4));
        assert!(!cache.is_cached(5));
    }

    #[test]
    fn test_shared_across_threads() {
        let cache = Arc::new(PermutationCache::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.get(6).map(|t| t.len()))
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().expect("thread"), Some(720));
        }
    }
}
