//! Lost-in-space star pattern identification.
//!
//! Image points are matched against the catalog's guide-pair index using
//! pairwise angular distances as the only invariant:
//!
//! 1. **Triangle kernels**: three image points are matched with each vertex in
//!    turn as the pivot; a catalog triplet is kept only if all three pivots
//!    agree on it (see [`PatternMatcher::match_triangle`]).
//! 2. **Quads**: four points form three overlapping triangles; triplets that
//!    share two stars and imply a known guide pair are merged into quad
//!    candidates. The relative distance tolerance is widened step by step until
//!    exactly one quad remains (see [`PatternMatcher::find_stars_pattern`]).
//! 3. **Search**: with more than four points, quads are tried brightest-first
//!    until one is identified (see [`PatternMatcher::identify`]).

pub mod combinations;
mod quad;
mod triangle;

use std::time::Instant;

use tracing::debug;

use crate::camera_model::CameraModel;
use crate::image_point::ImagePoint;
use crate::StarCatalog;

use combinations::BreadthFirstCombinations;

// ── Status codes ────────────────────────────────────────────────────────────

/// Outcome of a pattern search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    /// A unique quad was found and the points were annotated.
    MatchFound,
    /// All tolerance levels (and combinations) were exhausted without a match.
    NoMatch,
    /// More than one quad fit the points equally well; none was accepted.
    Ambiguous,
    /// The search timeout was reached before a match was found.
    Timeout,
    /// Too few points were provided to form a quad.
    TooFew,
}

// ── Configuration ───────────────────────────────────────────────────────────

/// Parameters controlling the pattern search.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Relative distance tolerance of the first level. Default 0.003 (0.3%).
    pub initial_tolerance: f64,
    /// Increment between tolerance levels. Default 0.001.
    pub tolerance_step: f64,
    /// Levels stop strictly below this tolerance. Default 0.010.
    pub max_tolerance: f64,
    /// Only the first N (brightest) points are used by [`PatternMatcher::identify`].
    /// Default 8.
    pub max_pattern_points: usize,
    /// Timeout for [`PatternMatcher::identify`] in milliseconds. None = no timeout.
    pub timeout_ms: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            initial_tolerance: 0.003,
            tolerance_step: 0.001,
            max_tolerance: 0.010,
            max_pattern_points: 8,
            timeout_ms: None,
        }
    }
}

impl MatchConfig {
    /// The tolerance levels tried, in order: `initial + i·step` while below `max`.
    ///
    /// Levels within 1e-12 of `max` are excluded so accumulated rounding never
    /// adds a level. A non-positive step yields the initial level alone.
    pub fn tolerance_levels(&self) -> Vec<f64> {
        let limit = self.max_tolerance - 1e-12;
        if !(self.tolerance_step > 0.0) {
            return if self.initial_tolerance < limit {
                vec![self.initial_tolerance]
            } else {
                Vec::new()
            };
        }
        (0..)
            .map(|i| self.initial_tolerance + i as f64 * self.tolerance_step)
            .take_while(|&t| t < limit)
            .collect()
    }
}

// ── Result ──────────────────────────────────────────────────────────────────

/// Result of a pattern search.
#[derive(Debug, Clone)]
pub struct PatternResult {
    /// Outcome status.
    pub status: MatchStatus,
    /// Catalog ids of the identified quad, ascending.
    pub pattern: Option<[u64; 4]>,
    /// Tolerance level at which the quad was accepted.
    pub tolerance: Option<f64>,
    /// Number of tolerance levels evaluated (summed over quads for `identify`).
    pub rounds: u32,
    /// Number of points annotated with a catalog star (4, or 2 for a partial match).
    pub num_identified: usize,
    /// Indices into the input points that were annotated.
    pub matched_point_indices: Vec<usize>,
    /// Wall-clock time spent searching, in milliseconds.
    pub solve_time_ms: f32,
}

impl PatternResult {
    /// Create a failure result with the given status.
    pub(crate) fn failure(status: MatchStatus, rounds: u32, solve_time_ms: f32) -> Self {
        Self {
            status,
            pattern: None,
            tolerance: None,
            rounds,
            num_identified: 0,
            matched_point_indices: Vec::new(),
            solve_time_ms,
        }
    }

    pub fn is_match(&self) -> bool {
        self.status == MatchStatus::MatchFound
    }
}

// ── Matcher ─────────────────────────────────────────────────────────────────

/// Identifies image points against a shared catalog.
///
/// Holds no mutable state; one matcher can serve any number of threads.
#[derive(Debug, Clone)]
pub struct PatternMatcher<'a> {
    pub catalog: &'a StarCatalog,
    pub camera: CameraModel,
    pub config: MatchConfig,
}

impl<'a> PatternMatcher<'a> {
    pub fn new(catalog: &'a StarCatalog, camera: CameraModel, config: MatchConfig) -> Self {
        Self {
            catalog,
            camera,
            config,
        }
    }

    /// Identify one quad among `points`, which must be sorted brightest-first.
    ///
    /// Only the first `max_pattern_points` points are considered. Quads are
    /// tried in order of increasing position sum; the first one identified is
    /// written back to `points` (every other point is left unmatched).
    /// When no quad is identified the result is `Ambiguous` if some quad had
    /// several candidates, otherwise `NoMatch`.
    pub fn identify(&self, points: &mut [ImagePoint]) -> PatternResult {
        let t0 = Instant::now();
        points.iter_mut().for_each(ImagePoint::clear_match);

        let n = points.len().min(self.config.max_pattern_points);
        if n < 4 {
            return PatternResult::failure(MatchStatus::TooFew, 0, elapsed_ms(t0));
        }

        let mut rounds = 0;
        let mut saw_ambiguous = false;
        for combo in BreadthFirstCombinations::<4>::new(n) {
            if let Some(t) = self.config.timeout_ms {
                if elapsed_ms(t0) > t as f32 {
                    return PatternResult::failure(MatchStatus::Timeout, rounds, elapsed_ms(t0));
                }
            }

            let mut quad = combo.map(|i| points[i].clone());
            let mut result = self.find_stars_pattern(&mut quad);
            rounds += result.rounds;
            match result.status {
                MatchStatus::MatchFound => {
                    for (point, &i) in quad.iter().zip(&combo) {
                        if let Some(id) = point.matched_star() {
                            points[i].set_match(id);
                        }
                    }
                    result.matched_point_indices = result
                        .matched_point_indices
                        .iter()
                        .map(|&k| combo[k])
                        .collect();
                    result.rounds = rounds;
                    result.solve_time_ms = elapsed_ms(t0);
                    debug!("Identified points {:?} as {:?}", combo, result.pattern);
                    return result;
                }
                MatchStatus::Ambiguous => saw_ambiguous = true,
                _ => {}
            }
        }

        let status = if saw_ambiguous {
            MatchStatus::Ambiguous
        } else {
            MatchStatus::NoMatch
        };
        PatternResult::failure(status, rounds, elapsed_ms(t0))
    }
}

fn elapsed_ms(t0: Instant) -> f32 {
    t0.elapsed().as_secs_f32() * 1000.0
}
