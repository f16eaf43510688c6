//! Quad identification with tolerance escalation.

use std::time::Instant;

use tracing::debug;

use crate::image_point::ImagePoint;

use super::{elapsed_ms, MatchStatus, PatternMatcher, PatternResult};

/// Quad candidates of one tolerance level.
struct Candidates {
    quads: Vec<[u64; 4]>,
    /// The `(p1, p2, p3)` triangle did not confirm the quad; only `p2` and `p3`
    /// can be derived.
    partial: bool,
}

impl PatternMatcher<'_> {
    /// Identify four image points, sorted brightest-first, as one catalog quad.
    ///
    /// Triangles `T1 = (p0, p1, p2)`, `T2 = (p0, p1, p3)` and `T3 = (p1, p2, p3)`
    /// are matched at each tolerance level of the config. Triplets of `T1` that
    /// share two stars with a triplet of `T2` (or `T3`) form quad candidates when
    /// the two remaining stars are a known guide pair. A level with exactly one
    /// candidate is accepted; a level with several stops the search with
    /// [`MatchStatus::Ambiguous`].
    ///
    /// On acceptance each point whose star can be derived by elimination is
    /// annotated. Existing annotations are always cleared first.
    pub fn find_stars_pattern(&self, points: &mut [ImagePoint; 4]) -> PatternResult {
        let t0 = Instant::now();
        points.iter_mut().for_each(ImagePoint::clear_match);
        let [p0, p1, p2, p3] = &*points;

        let mut rounds = 0;
        for tolerance in self.config.tolerance_levels() {
            rounds += 1;

            let t1 = self.match_triangle(p0, p1, p2, tolerance);
            let t2 = self.match_triangle(p0, p1, p3, tolerance);
            let t3 = self.match_triangle(p1, p2, p3, tolerance);

            let common_1_2 = self.common_quads(&t1, &t2);
            let common_1_3 = self.common_quads(&t1, &t3);
            let candidates = merge_candidates(common_1_2, common_1_3);

            debug!(
                "Tolerance {:.4}: triplets {}/{}/{}, {} quad candidates{}",
                tolerance,
                t1.len(),
                t2.len(),
                t3.len(),
                candidates.quads.len(),
                if candidates.partial { " (partial)" } else { "" }
            );

            match candidates.quads.as_slice() {
                [] => continue,
                [quad] => {
                    let ids = assign_stars(quad, &t1, &t2, &t3, candidates.partial);
                    let mut matched_point_indices = Vec::with_capacity(4);
                    for (i, (point, id)) in points.iter_mut().zip(ids).enumerate() {
                        if let Some(id) = id {
                            point.set_match(id);
                            matched_point_indices.push(i);
                        }
                    }
                    return PatternResult {
                        status: MatchStatus::MatchFound,
                        pattern: Some(*quad),
                        tolerance: Some(tolerance),
                        rounds,
                        num_identified: matched_point_indices.len(),
                        matched_point_indices,
                        solve_time_ms: elapsed_ms(t0),
                    };
                }
                quads => {
                    debug!("{} quads fit at tolerance {:.4}; rejecting", quads.len(), tolerance);
                    return PatternResult::failure(MatchStatus::Ambiguous, rounds, elapsed_ms(t0));
                }
            }
        }

        PatternResult::failure(MatchStatus::NoMatch, rounds, elapsed_ms(t0))
    }

    /// Quads formed by triplets of `first` and `second` sharing exactly two stars.
    ///
    /// The star of `first` missing from the `second` triplet and the star of
    /// `second` missing from the `first` triplet must be an indexed guide pair.
    /// Quads are sorted by id and deduplicated, in discovery order.
    fn common_quads(&self, first: &[[u64; 3]], second: &[[u64; 3]]) -> Vec<[u64; 4]> {
        let mut quads: Vec<[u64; 4]> = Vec::new();
        for ti in first {
            for tj in second {
                let shared = ti.iter().filter(|id| tj.contains(id)).count();
                if shared != 2 {
                    continue;
                }
                let (Some(&third), Some(&fourth)) = (
                    ti.iter().find(|id| !tj.contains(id)),
                    tj.iter().find(|id| !ti.contains(id)),
                ) else {
                    continue;
                };
                if self.catalog.pair_distance(third, fourth).is_none() {
                    continue;
                }
                let mut quad = [ti[0], ti[1], ti[2], fourth];
                quad.sort_unstable();
                if !quads.contains(&quad) {
                    quads.push(quad);
                }
            }
        }
        quads
    }
}

/// Combine the `T1∩T2` and `T1∩T3` quads.
fn merge_candidates(common_1_2: Vec<[u64; 4]>, common_1_3: Vec<[u64; 4]>) -> Candidates {
    if common_1_2.is_empty() {
        return Candidates {
            quads: Vec::new(),
            partial: false,
        };
    }
    if common_1_3.is_empty() {
        return Candidates {
            quads: common_1_2,
            partial: true,
        };
    }
    let quads = common_1_2
        .into_iter()
        .filter(|q| common_1_3.contains(q))
        .collect();
    Candidates {
        quads,
        partial: false,
    }
}

/// The star of `quad` absent from the first triplet of `triplets` that lies
/// entirely inside `quad`.
fn missing_star(triplets: &[[u64; 3]], quad: &[u64; 4]) -> Option<u64> {
    let triplet = triplets
        .iter()
        .find(|t| t.iter().all(|id| quad.contains(id)))?;
    quad.iter().copied().find(|id| !triplet.contains(id))
}

/// Catalog star per image point, derived by elimination.
///
/// A point's star is the one missing from the triangle that excludes it:
/// `p0` from `T3`, `p2` from `T2`, `p3` from `T1`; `p1` takes what is left.
/// Points resolving to the same star are left unassigned.
fn assign_stars(
    quad: &[u64; 4],
    t1: &[[u64; 3]],
    t2: &[[u64; 3]],
    t3: &[[u64; 3]],
    partial: bool,
) -> [Option<u64>; 4] {
    let s2 = missing_star(t2, quad);
    let s3 = missing_star(t1, quad);
    let mut ids = [None, None, s2, s3];

    if !partial {
        let s0 = missing_star(t3, quad);
        ids[0] = s0;
        if let (Some(a), Some(b), Some(c)) = (s0, s2, s3) {
            if a != b && a != c && b != c {
                ids[1] = quad.iter().copied().find(|id| ![a, b, c].contains(id));
            }
        }
    }

    let assigned = ids;
    for slot in ids.iter_mut() {
        if let Some(id) = *slot {
            if assigned.iter().filter(|other| **other == Some(id)).count() > 1 {
                *slot = None;
            }
        }
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_rules() {
        let a = [1, 2, 3, 4];
        let b = [1, 2, 3, 5];

        let none = merge_candidates(Vec::new(), vec![a]);
        assert!(none.quads.is_empty());

        let partial = merge_candidates(vec![a, b], Vec::new());
        assert!(partial.partial);
        assert_eq!(partial.quads, vec![a, b]);

        let full = merge_candidates(vec![a, b], vec![b]);
        assert!(!full.partial);
        assert_eq!(full.quads, vec![b]);

        let disjoint = merge_candidates(vec![a], vec![b]);
        assert!(disjoint.quads.is_empty());
    }

    #[test]
    fn elimination_assigns_every_point() {
        // Points p0..p3 are stars 10, 20, 30, 40.
        let quad = [10, 20, 30, 40];
        let t1 = vec![[10, 20, 30]];
        let t2 = vec![[10, 20, 40]];
        let t3 = vec![[20, 30, 40]];
        assert_eq!(
            assign_stars(&quad, &t1, &t2, &t3, false),
            [Some(10), Some(20), Some(30), Some(40)]
        );
        assert_eq!(
            assign_stars(&quad, &t1, &t2, &[], true),
            [None, None, Some(30), Some(40)]
        );
    }

    #[test]
    fn elimination_skips_foreign_triplets() {
        let quad = [10, 20, 30, 40];
        // The first T1 triplet is not part of the quad.
        let t1 = vec![[10, 20, 99], [10, 20, 30]];
        let t2 = vec![[10, 20, 40]];
        let t3 = vec![[20, 30, 40]];
        assert_eq!(assign_stars(&quad, &t1, &t2, &t3, false)[3], Some(40));
    }

    #[test]
    fn conflicting_derivations_are_dropped() {
        let quad = [10, 20, 30, 40];
        // T1 and T2 both exclude star 40.
        let t1 = vec![[10, 20, 30]];
        let t2 = vec![[10, 20, 30]];
        let t3 = vec![[20, 30, 40]];
        let ids = assign_stars(&quad, &t1, &t2, &t3, false);
        assert_eq!(ids, [Some(10), None, None, None]);
    }
}
