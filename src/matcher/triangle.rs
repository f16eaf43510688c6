//! Triangle matching: kernel queries against the guide-pair index and the
//! three-pivot consistency check.

use std::collections::{HashMap, HashSet};

use crate::image_point::ImagePoint;

use super::PatternMatcher;

/// Open interval `d ± d·tolerance`.
#[inline]
fn band(distance: f64, tolerance: f64) -> (f64, f64) {
    let err = distance * tolerance;
    (distance - err, distance + err)
}

/// Sort a triplet by catalog id.
#[inline]
pub(crate) fn sorted_triplet(mut t: [u64; 3]) -> [u64; 3] {
    t.sort_unstable();
    t
}

impl PatternMatcher<'_> {
    /// Catalog triplets matching a triangle with `p0` as the pivot.
    ///
    /// Every guide pair within tolerance of `d(p0, p1)` is combined with every
    /// pair within tolerance of `d(p0, p2)` that shares a star with it; the
    /// shared star is the pivot candidate and the two other stars are the
    /// candidates for `p1` and `p2`. The triplet is confirmed when the catalog
    /// distance between those two lies within tolerance of `d(p1, p2)`.
    ///
    /// Triplets are returned in role order `[p0, p1, p2]`.
    pub fn match_kernel(
        &self,
        p0: &ImagePoint,
        p1: &ImagePoint,
        p2: &ImagePoint,
        tolerance: f64,
    ) -> Vec<[u64; 3]> {
        let d01 = p0.angular_distance_to(p1, &self.camera);
        let d02 = p0.angular_distance_to(p2, &self.camera);
        let d12 = p1.angular_distance_to(p2, &self.camera);

        let (lo01, hi01) = band(d01, tolerance);
        let (lo02, hi02) = band(d02, tolerance);
        let (lo12, hi12) = band(d12, tolerance);

        let pairs_01 = self.catalog.pairs_in_range(lo01, hi01);
        let pairs_02 = self.catalog.pairs_in_range(lo02, hi02);
        if pairs_01.is_empty() || pairs_02.is_empty() {
            return Vec::new();
        }

        // Star → partners over the p0–p2 edge.
        let mut partners_02: HashMap<u64, Vec<u64>> = HashMap::new();
        for pair in pairs_02 {
            partners_02.entry(pair.star_a).or_default().push(pair.star_b);
            partners_02.entry(pair.star_b).or_default().push(pair.star_a);
        }

        let mut triplets = Vec::new();
        for pair in pairs_01 {
            for (pivot, c1) in [(pair.star_a, pair.star_b), (pair.star_b, pair.star_a)] {
                let Some(partners) = partners_02.get(&pivot) else {
                    continue;
                };
                for &c2 in partners {
                    if c2 == c1 {
                        continue;
                    }
                    match self.catalog.star_distance(c1, c2) {
                        Some(d) if lo12 < d && d < hi12 => triplets.push([pivot, c1, c2]),
                        _ => {}
                    }
                }
            }
        }
        triplets
    }

    /// Catalog triplets matching a triangle consistently under all three pivots.
    ///
    /// The kernel is run with pivots `p0`, `p1` and `p2`; a triplet (sorted by
    /// id) is kept only if every run produced it. Results are deduplicated and
    /// follow the order of the `p0` run.
    pub fn match_triangle(
        &self,
        p0: &ImagePoint,
        p1: &ImagePoint,
        p2: &ImagePoint,
        tolerance: f64,
    ) -> Vec<[u64; 3]> {
        let kernel_a = self.match_kernel(p0, p1, p2, tolerance);
        if kernel_a.is_empty() {
            return Vec::new();
        }
        let kernel_b: HashSet<[u64; 3]> = self
            .match_kernel(p1, p0, p2, tolerance)
            .into_iter()
            .map(sorted_triplet)
            .collect();
        let kernel_c: HashSet<[u64; 3]> = self
            .match_kernel(p2, p1, p0, tolerance)
            .into_iter()
            .map(sorted_triplet)
            .collect();

        let mut seen = HashSet::new();
        kernel_a
            .into_iter()
            .map(sorted_triplet)
            .filter(|t| kernel_b.contains(t) && kernel_c.contains(t))
            .filter(|t| seen.insert(*t))
            .collect()
    }
}
