//! Breadth-first combination iterator.
//!
//! Yields K-combinations of positions `0..n` ordered by the sum of the selected
//! positions. Image points are sorted brightest-first, so this tries the
//! brightest quads before any quad involving a fainter point.
//!
//! Implementation: min-heap keyed by position sum, with a HashSet for dedup.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

/// Iterator over strictly increasing `[usize; K]` position arrays in order of
/// increasing position sum.
pub struct BreadthFirstCombinations<const K: usize> {
    n: usize,
    heap: BinaryHeap<Reverse<(usize, [usize; K])>>,
    seen: HashSet<[usize; K]>,
}

impl<const K: usize> BreadthFirstCombinations<K> {
    /// Create an iterator over K-combinations of `0..n`. Empty when `n < K`.
    pub fn new(n: usize) -> Self {
        let mut bfc = Self {
            n,
            heap: BinaryHeap::new(),
            seen: HashSet::new(),
        };
        if K > 0 && n >= K {
            let initial: [usize; K] = std::array::from_fn(|i| i);
            bfc.seen.insert(initial);
            bfc.heap.push(Reverse((initial.iter().sum(), initial)));
        }
        bfc
    }
}

impl<const K: usize> Iterator for BreadthFirstCombinations<K> {
    type Item = [usize; K];

    fn next(&mut self) -> Option<[usize; K]> {
        let Reverse((_, combo)) = self.heap.pop()?;

        // Successors bump one position while keeping the array strictly increasing.
        for i in 0..K {
            let next_val = combo[i] + 1;
            let upper = if i + 1 < K { combo[i + 1] } else { self.n };
            if next_val < upper {
                let mut successor = combo;
                successor[i] = next_val;
                if self.seen.insert(successor) {
                    self.heap.push(Reverse((successor.iter().sum(), successor)));
                }
            }
        }

        Some(combo)
    }
}
