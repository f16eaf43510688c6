//! Reference star catalog with a distance-sorted guide-pair index.
//!
//! `StarCatalog` owns every reference star (id → star lookup in O(1)) and the
//! precomputed angular distance of every pair of *guide stars* closer than the
//! sensor field of view. The pair index is sorted by distance so that the
//! matcher's hot query, "all pairs whose distance lies in `(low, high)`", is
//! two binary searches returning a contiguous slice.
//!
//! Catalogs are immutable once built. Share one by reference between any
//! number of matchers and threads.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use rkyv::{Archive, Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::camera_model::CameraModel;
use crate::catalogs::hipparcos::{load_hipparcos_catalog_from_file, HipparcosStar};
use crate::catalogs::csv::{read_guide_pairs_from_file, read_labels_from_file, read_stars_from_file};
use crate::geometry::angular_distance;
use crate::star::star_from_hipparcos;
use crate::{CatalogLoadError, CatalogStar, Vector3};

/// Angular distance between two guide stars.
#[derive(Debug, Clone, Copy, PartialEq, Archive, Serialize, Deserialize)]
pub struct GuideDistancePair {
    pub star_a: u64,
    pub star_b: u64,
    pub distance_deg: f64,
}

impl GuideDistancePair {
    pub fn new(star_a: u64, star_b: u64, distance_deg: f64) -> Self {
        Self {
            star_a,
            star_b,
            distance_deg,
        }
    }

    /// Whether `id` is one of the two stars.
    #[inline]
    pub fn contains(&self, id: u64) -> bool {
        self.star_a == id || self.star_b == id
    }

    /// The star paired with `id`, if `id` belongs to this pair.
    #[inline]
    pub fn other(&self, id: u64) -> Option<u64> {
        if self.star_a == id {
            Some(self.star_b)
        } else if self.star_b == id {
            Some(self.star_a)
        } else {
            None
        }
    }

    /// Order-independent key of the pair.
    #[inline]
    fn key(&self) -> (u64, u64) {
        pair_key(self.star_a, self.star_b)
    }
}

#[inline]
fn pair_key(a: u64, b: u64) -> (u64, u64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Parameters for computing the guide-pair index from a star list.
#[derive(Debug, Clone)]
pub struct GuideCatalogConfig {
    /// Stars strictly brighter than this magnitude become guide stars. Default 5.0.
    pub magnitude_cutoff: f64,
    /// Pairs at or beyond this separation are not indexed. Should be the
    /// sensor's diagonal field of view. Default 36.26° (a 28.91° × 21.88° sensor).
    pub max_pair_distance_deg: f64,
}

impl Default for GuideCatalogConfig {
    fn default() -> Self {
        Self {
            magnitude_cutoff: 5.0,
            max_pair_distance_deg: (28.91_f64.powi(2) + 21.88_f64.powi(2)).sqrt(),
        }
    }
}

impl GuideCatalogConfig {
    /// Limit pairs to the diagonal field of view of `camera` on a
    /// `width` × `height` sensor.
    pub fn for_camera(camera: &CameraModel, width: u32, height: u32, magnitude_cutoff: f64) -> Self {
        let (_, _, diagonal) = camera.fov_deg(width, height);
        Self {
            magnitude_cutoff,
            max_pair_distance_deg: diagonal,
        }
    }
}

/// Reference stars plus the sorted guide-pair distance index.
#[derive(Debug, Clone)]
pub struct StarCatalog {
    stars: Vec<CatalogStar>,
    /// Unit vectors matching `stars` order.
    star_vectors: Vec<Vector3>,
    index: HashMap<u64, usize>,
    /// Sorted ascending by distance.
    pairs: Vec<GuideDistancePair>,
    pair_index: HashMap<(u64, u64), usize>,
}

/// What gets persisted. Lookups are rebuilt (and validated) on load.
#[derive(Archive, Serialize, Deserialize)]
struct CatalogSnapshot {
    stars: Vec<CatalogStar>,
    pairs: Vec<GuideDistancePair>,
}

impl StarCatalog {
    /// Build a catalog from stars, precomputed guide pairs and optional labels.
    ///
    /// Pairs should already be sorted by distance; unsorted input is sorted
    /// here. Fails if a star id is repeated, a pair references an unknown
    /// star or the same star twice, an unordered pair is repeated, or a
    /// distance lies outside `[0, 180]`. Labels for unknown stars are skipped.
    pub fn load(
        stars: Vec<CatalogStar>,
        guide_pairs: Vec<GuideDistancePair>,
        labels: Option<&[(u64, String)]>,
    ) -> Result<Self, CatalogLoadError> {
        let mut stars = stars;
        let mut index = HashMap::with_capacity(stars.len());
        for (i, star) in stars.iter().enumerate() {
            for (field, value) in [
                ("ra_degrees", star.ra_deg),
                ("dec_degrees", star.dec_deg),
                ("magnitude", star.mag),
            ] {
                if !value.is_finite() {
                    return Err(CatalogLoadError::InvalidField {
                        line: i + 1,
                        field,
                        value: value.to_string(),
                    });
                }
            }
            if index.insert(star.id, i).is_some() {
                return Err(CatalogLoadError::DuplicateStar(star.id));
            }
        }

        if let Some(labels) = labels {
            let mut skipped = 0usize;
            for (id, name) in labels {
                match index.get(id) {
                    Some(&i) => stars[i].name = Some(name.clone()),
                    None => skipped += 1,
                }
            }
            if skipped > 0 {
                warn!("Skipped {} labels for stars missing from the catalog", skipped);
            }
        }

        let mut pairs = guide_pairs;
        if !pairs
            .windows(2)
            .all(|w| w[0].distance_deg <= w[1].distance_deg)
        {
            debug!("Guide pairs were not sorted by distance; sorting {} pairs", pairs.len());
            pairs.sort_by(|a, b| a.distance_deg.total_cmp(&b.distance_deg));
        }

        let mut pair_index = HashMap::with_capacity(pairs.len());
        for (i, pair) in pairs.iter().enumerate() {
            if pair.star_a == pair.star_b {
                return Err(CatalogLoadError::SelfPair(pair.star_a));
            }
            for id in [pair.star_a, pair.star_b] {
                if !index.contains_key(&id) {
                    return Err(CatalogLoadError::UnknownStar(id));
                }
            }
            if !(0.0..=180.0).contains(&pair.distance_deg) {
                return Err(CatalogLoadError::InvalidDistance {
                    star_a: pair.star_a,
                    star_b: pair.star_b,
                    distance_deg: pair.distance_deg,
                });
            }
            if pair_index.insert(pair.key(), i).is_some() {
                return Err(CatalogLoadError::DuplicatePair(pair.star_a, pair.star_b));
            }
        }

        let star_vectors = stars.iter().map(|s| s.uvec()).collect();

        let catalog = Self {
            stars,
            star_vectors,
            index,
            pairs,
            pair_index,
        };
        info!(
            "Loaded catalog: {} stars, {} guide stars, {} guide pairs",
            catalog.len(),
            catalog.guide_star_ids().len(),
            catalog.num_pairs()
        );
        Ok(catalog)
    }

    /// Build a catalog and compute its guide-pair index.
    ///
    /// Every star is kept in the catalog; only stars brighter than
    /// `config.magnitude_cutoff` are paired, and only pairs closer than
    /// `config.max_pair_distance_deg` are indexed.
    pub fn build(
        stars: Vec<CatalogStar>,
        config: &GuideCatalogConfig,
    ) -> Result<Self, CatalogLoadError> {
        let guide: Vec<(u64, Vector3)> = stars
            .iter()
            .filter(|s| s.mag < config.magnitude_cutoff)
            .map(|s| (s.id, s.uvec()))
            .collect();
        info!(
            "Building guide pairs for {} of {} stars brighter than magnitude {:.2}",
            guide.len(),
            stars.len(),
            config.magnitude_cutoff
        );

        let mut pairs = Vec::new();
        for (i, (id_a, va)) in guide.iter().enumerate() {
            for (id_b, vb) in &guide[i + 1..] {
                let d = angular_distance(va, vb);
                if d < config.max_pair_distance_deg {
                    pairs.push(GuideDistancePair::new(*id_a, *id_b, d));
                }
            }
        }
        pairs.sort_by(|a, b| a.distance_deg.total_cmp(&b.distance_deg));

        Self::load(stars, pairs, None)
    }

    /// Load the star, guide-pair and optional label CSV files.
    pub fn from_csv_files<P: AsRef<Path>>(
        stars_csv: P,
        guide_pairs_csv: P,
        labels_csv: Option<P>,
    ) -> Result<Self, CatalogLoadError> {
        info!("Loading star catalog from {}", stars_csv.as_ref().display());
        let stars = read_stars_from_file(stars_csv)?;
        let pairs = read_guide_pairs_from_file(guide_pairs_csv)?;
        let labels = labels_csv.map(read_labels_from_file).transpose()?;
        Self::load(stars, pairs, labels.as_deref())
    }

    /// Build a catalog from a Hipparcos I/311 file, propagating positions to
    /// `epoch_year` when given.
    pub fn from_hipparcos_file<P: AsRef<Path>>(
        path: P,
        epoch_year: Option<f64>,
        config: &GuideCatalogConfig,
    ) -> anyhow::Result<Self> {
        info!("Loading Hipparcos catalog from {}", path.as_ref().display());
        let hip_stars = load_hipparcos_catalog_from_file(path)?;
        info!("Loaded {} raw Hipparcos entries", hip_stars.len());
        Ok(Self::from_hipparcos_stars(&hip_stars, epoch_year, config)?)
    }

    /// Build a catalog from pre-loaded Hipparcos stars.
    pub fn from_hipparcos_stars(
        hip_stars: &[HipparcosStar],
        epoch_year: Option<f64>,
        config: &GuideCatalogConfig,
    ) -> Result<Self, CatalogLoadError> {
        let stars = hip_stars
            .iter()
            .map(|h| star_from_hipparcos(h, epoch_year))
            .collect();
        Self::build(stars, config)
    }

    /// Return the total number of stars in the catalog.
    pub fn len(&self) -> usize {
        self.stars.len()
    }

    /// Return `true` when the catalog contains no stars.
    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn num_pairs(&self) -> usize {
        self.pairs.len()
    }

    /// Return all catalog stars as an immutable slice.
    pub fn stars(&self) -> &[CatalogStar] {
        &self.stars
    }

    /// The full guide-pair index, ascending by distance.
    pub fn pairs(&self) -> &[GuideDistancePair] {
        &self.pairs
    }

    /// Look up a star by catalog id.
    pub fn get_by_id(&self, id: u64) -> Option<&CatalogStar> {
        self.index.get(&id).map(|&i| &self.stars[i])
    }

    /// Unit vector of a star by catalog id.
    pub fn star_vector(&self, id: u64) -> Option<&Vector3> {
        self.index.get(&id).map(|&i| &self.star_vectors[i])
    }

    /// Angular distance in degrees between two catalog stars.
    ///
    /// Same id → `Some(0.0)`. `None` if either id is unknown.
    pub fn star_distance(&self, a: u64, b: u64) -> Option<f64> {
        if a == b {
            return self.index.contains_key(&a).then_some(0.0);
        }
        Some(angular_distance(self.star_vector(a)?, self.star_vector(b)?))
    }

    /// Every guide pair with `low < distance < high`, ascending by distance.
    pub fn pairs_in_range(&self, low: f64, high: f64) -> &[GuideDistancePair] {
        // Also rejects NaN bounds.
        if !(low < high) {
            return &[];
        }
        let start = self.pairs.partition_point(|p| p.distance_deg <= low);
        let end = self.pairs.partition_point(|p| p.distance_deg < high);
        &self.pairs[start..end]
    }

    /// Indexed distance between two guide stars, in either order.
    pub fn pair_distance(&self, a: u64, b: u64) -> Option<f64> {
        self.pair_index
            .get(&pair_key(a, b))
            .map(|&i| self.pairs[i].distance_deg)
    }

    /// Sorted ids of every star that appears in the guide-pair index.
    pub fn guide_star_ids(&self) -> Vec<u64> {
        self.pairs
            .iter()
            .flat_map(|p| [p.star_a, p.star_b])
            .collect::<BTreeSet<u64>>()
            .into_iter()
            .collect()
    }
}

// ── Serialization ───────────────────────────────────────────────────────────

impl StarCatalog {
    /// Serialize the stars and guide pairs using rkyv.
    pub fn to_rkyv_bytes(&self) -> anyhow::Result<Vec<u8>> {
        let snapshot = CatalogSnapshot {
            stars: self.stars.clone(),
            pairs: self.pairs.clone(),
        };
        let bytes = rkyv::to_bytes::<rkyv::rancor::Error>(&snapshot)?;
        Ok(bytes.to_vec())
    }

    /// Rebuild a catalog from [`to_rkyv_bytes`](Self::to_rkyv_bytes) output.
    ///
    /// The snapshot goes through [`load`](Self::load), so its contents are
    /// validated exactly like freshly ingested data.
    pub fn from_rkyv_bytes(bytes: &[u8]) -> Result<Self, CatalogLoadError> {
        let mut aligned = rkyv::util::AlignedVec::<16>::new();
        aligned.extend_from_slice(bytes);
        let snapshot = rkyv::from_bytes::<CatalogSnapshot, rkyv::rancor::Error>(&aligned)
            .map_err(|e| CatalogLoadError::Snapshot(e.to_string()))?;
        Self::load(snapshot.stars, snapshot.pairs, None)
    }

    /// Save the catalog to a file using rkyv.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let bytes = self.to_rkyv_bytes()?;
        std::fs::write(path.as_ref(), &bytes)?;
        info!("Saved catalog to {} ({} bytes)", path.as_ref().display(), bytes.len());
        Ok(())
    }

    /// Load a catalog from an rkyv file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(Self::from_rkyv_bytes(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogs::hipparcos::{format_record, load_hipparcos_catalog};
    use quickcheck_macros::quickcheck;

    /// Stars on one meridian at declinations forming a Golomb ruler, so every
    /// pairwise separation is a distinct whole number of degrees.
    fn ruler_stars() -> Vec<CatalogStar> {
        [0.0, 1.0, 3.0, 7.0, 12.0, 20.0]
            .iter()
            .enumerate()
            .map(|(i, &dec)| CatalogStar::new(100 + i as u64, 50.0, dec, 2.0 + i as f64 * 0.1))
            .collect()
    }

    /// 12 stars scattered over a ~20° patch: 66 guide pairs.
    fn patch_catalog() -> StarCatalog {
        let stars = (0..12)
            .map(|i| {
                let f = i as f64;
                CatalogStar::new(
                    i as u64 + 1,
                    120.0 + (f * 7.3) % 17.0,
                    -10.0 + (f * 4.1) % 13.0,
                    3.0,
                )
            })
            .collect();
        let config = GuideCatalogConfig {
            magnitude_cutoff: 6.0,
            max_pair_distance_deg: 90.0,
        };
        StarCatalog::build(stars, &config).unwrap()
    }

    fn brute_force(catalog: &StarCatalog, low: f64, high: f64) -> Vec<GuideDistancePair> {
        catalog
            .pairs()
            .iter()
            .filter(|p| low < p.distance_deg && p.distance_deg < high)
            .copied()
            .collect()
    }

    #[test]
    fn config_for_camera_uses_diagonal() {
        let config = GuideCatalogConfig::for_camera(&CameraModel::default(), 1332, 880, 4.5);
        assert_eq!(config.magnitude_cutoff, 4.5);
        assert!((config.max_pair_distance_deg - 33.44).abs() < 0.05);
        assert!(config.max_pair_distance_deg < GuideCatalogConfig::default().max_pair_distance_deg);
    }

    #[test]
    fn lookup_by_id() {
        let catalog = StarCatalog::load(ruler_stars(), Vec::new(), None).unwrap();
        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog.get_by_id(103).map(|s| s.dec_deg), Some(7.0));
        assert!(catalog.get_by_id(99).is_none());
        assert!(catalog.star_vector(99).is_none());
    }

    #[test]
    fn build_indexes_every_separation() {
        let config = GuideCatalogConfig {
            magnitude_cutoff: 6.0,
            max_pair_distance_deg: 30.0,
        };
        let catalog = StarCatalog::build(ruler_stars(), &config).unwrap();
        assert_eq!(catalog.num_pairs(), 15);

        // Query each known separation with a tiny window.
        for pair in catalog.pairs() {
            let a = catalog.get_by_id(pair.star_a).unwrap();
            let b = catalog.get_by_id(pair.star_b).unwrap();
            let expected = (a.dec_deg - b.dec_deg).abs();
            assert!((pair.distance_deg - expected).abs() < 1e-9);

            let hits = catalog.pairs_in_range(expected - 1e-6, expected + 1e-6);
            assert_eq!(hits.len(), 1);
            assert_eq!(hits[0].key(), pair.key());
        }
    }

    #[test]
    fn build_applies_cutoffs() {
        let mut stars = ruler_stars();
        // Too faint to be a guide star.
        stars[2].mag = 7.5;
        let config = GuideCatalogConfig {
            magnitude_cutoff: 6.0,
            max_pair_distance_deg: 10.0,
        };
        let catalog = StarCatalog::build(stars, &config).unwrap();
        assert_eq!(catalog.len(), 6);
        assert!(!catalog.guide_star_ids().contains(&102));
        assert!(catalog.pairs().iter().all(|p| p.distance_deg < 10.0));
        assert!(catalog.pairs().iter().all(|p| !p.contains(102)));
        // Faint stars stay in the catalog for lookups.
        assert!(catalog.get_by_id(102).is_some());
    }

    #[test]
    fn range_bounds_are_exclusive() {
        let stars = ruler_stars();
        let pairs = vec![
            GuideDistancePair::new(100, 101, 1.0),
            GuideDistancePair::new(101, 102, 2.0),
            GuideDistancePair::new(100, 102, 3.0),
        ];
        let catalog = StarCatalog::load(stars, pairs, None).unwrap();
        let hits: Vec<f64> = catalog
            .pairs_in_range(1.0, 3.0)
            .iter()
            .map(|p| p.distance_deg)
            .collect();
        assert_eq!(hits, vec![2.0]);
        assert_eq!(catalog.pairs_in_range(0.5, 3.5).len(), 3);
        assert!(catalog.pairs_in_range(3.0, 1.0).is_empty());
        assert!(catalog.pairs_in_range(f64::NAN, 5.0).is_empty());
        assert!(catalog.pairs_in_range(4.0, 5.0).is_empty());
    }

    #[test]
    fn range_matches_brute_force() {
        let catalog = patch_catalog();
        assert_eq!(catalog.num_pairs(), 66);
        for (low, high) in [(0.0, 180.0), (2.0, 5.0), (5.5, 5.6), (10.0, 12.5), (-1.0, 0.5)] {
            assert_eq!(catalog.pairs_in_range(low, high), brute_force(&catalog, low, high));
        }
    }

    #[quickcheck]
    fn range_matches_brute_force_everywhere(a: u16, b: u16) -> bool {
        let catalog = patch_catalog();
        let low = a as f64 / 2000.0;
        let high = b as f64 / 2000.0;
        catalog.pairs_in_range(low, high) == brute_force(&catalog, low, high).as_slice()
    }

    #[test]
    fn unsorted_pairs_are_sorted_on_load() {
        let pairs = vec![
            GuideDistancePair::new(100, 102, 3.0),
            GuideDistancePair::new(100, 101, 1.0),
            GuideDistancePair::new(101, 102, 2.0),
        ];
        let catalog = StarCatalog::load(ruler_stars(), pairs, None).unwrap();
        let distances: Vec<f64> = catalog.pairs().iter().map(|p| p.distance_deg).collect();
        assert_eq!(distances, vec![1.0, 2.0, 3.0]);
        assert_eq!(catalog.pair_distance(102, 100), Some(3.0));
        assert_eq!(catalog.pair_distance(101, 100), Some(1.0));
        assert_eq!(catalog.pair_distance(100, 105), None);
    }

    #[test]
    fn rejects_inconsistent_input() {
        let dup_star = {
            let mut stars = ruler_stars();
            stars.push(CatalogStar::new(100, 0.0, 0.0, 1.0));
            StarCatalog::load(stars, Vec::new(), None)
        };
        assert!(matches!(dup_star, Err(CatalogLoadError::DuplicateStar(100))));

        let unknown = StarCatalog::load(
            ruler_stars(),
            vec![GuideDistancePair::new(100, 999, 1.0)],
            None,
        );
        assert!(matches!(unknown, Err(CatalogLoadError::UnknownStar(999))));

        let self_pair = StarCatalog::load(
            ruler_stars(),
            vec![GuideDistancePair::new(101, 101, 0.0)],
            None,
        );
        assert!(matches!(self_pair, Err(CatalogLoadError::SelfPair(101))));

        let dup_pair = StarCatalog::load(
            ruler_stars(),
            vec![
                GuideDistancePair::new(100, 101, 1.0),
                GuideDistancePair::new(101, 100, 1.0),
            ],
            None,
        );
        assert!(matches!(dup_pair, Err(CatalogLoadError::DuplicatePair(..))));

        let bad_distance = StarCatalog::load(
            ruler_stars(),
            vec![GuideDistancePair::new(100, 101, 181.0)],
            None,
        );
        assert!(matches!(bad_distance, Err(CatalogLoadError::InvalidDistance { .. })));

        let mut stars = ruler_stars();
        stars[0].ra_deg = f64::NAN;
        assert!(matches!(
            StarCatalog::load(stars, Vec::new(), None),
            Err(CatalogLoadError::InvalidField { line: 1, field: "ra_degrees", .. })
        ));
    }

    #[test]
    fn labels_attach_names() {
        let labels = vec![(101, "alpha".to_string()), (555, "ghost".to_string())];
        let catalog = StarCatalog::load(ruler_stars(), Vec::new(), Some(labels.as_slice())).unwrap();
        assert_eq!(catalog.get_by_id(101).unwrap().label(), "alpha");
        assert_eq!(catalog.get_by_id(102).unwrap().label(), "102");
    }

    #[test]
    fn star_distance_by_id() {
        let catalog = StarCatalog::load(ruler_stars(), Vec::new(), None).unwrap();
        assert_eq!(catalog.star_distance(101, 101), Some(0.0));
        assert!((catalog.star_distance(100, 105).unwrap() - 20.0).abs() < 1e-9);
        assert_eq!(catalog.star_distance(100, 999), None);
        assert_eq!(catalog.star_distance(999, 999), None);
    }

    #[test]
    fn snapshot_round_trip() {
        let labels = vec![(103, "delta".to_string())];
        let config = GuideCatalogConfig {
            magnitude_cutoff: 6.0,
            max_pair_distance_deg: 30.0,
        };
        let built = StarCatalog::build(ruler_stars(), &config).unwrap();
        let catalog = StarCatalog::load(built.stars().to_vec(), built.pairs().to_vec(), Some(labels.as_slice()))
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.rkyv");
        catalog.save_to_file(&path).unwrap();
        let restored = StarCatalog::load_from_file(&path).unwrap();

        assert_eq!(restored.len(), catalog.len());
        assert_eq!(restored.pairs(), catalog.pairs());
        assert_eq!(restored.get_by_id(103).unwrap().name.as_deref(), Some("delta"));
    }

    #[test]
    fn corrupt_snapshot_is_rejected() {
        assert!(matches!(
            StarCatalog::from_rkyv_bytes(&[1, 2, 3]),
            Err(CatalogLoadError::Snapshot(_))
        ));
    }

    #[test]
    fn builds_from_hipparcos_records() {
        let hip = |id: u32, ra_deg: f64, dec_deg: f64| HipparcosStar {
            hip: id,
            ra_rad: ra_deg.to_radians(),
            dec_rad: dec_deg.to_radians(),
            plx: 10.0,
            pm_ra: 0.0,
            pm_dec: 0.0,
            hpmag: 3.0,
            b_v: 0.0,
        };
        let data = [hip(1, 10.0, 10.0), hip(2, 12.0, 10.0), hip(3, 80.0, -40.0)]
            .iter()
            .map(format_record)
            .collect::<Vec<_>>()
            .join("\n");
        let hip_stars = load_hipparcos_catalog(&data);
        let catalog =
            StarCatalog::from_hipparcos_stars(&hip_stars, None, &GuideCatalogConfig::default())
                .unwrap();
        assert_eq!(catalog.len(), 3);
        // Star 3 is far outside the field of view of the other two.
        assert_eq!(catalog.num_pairs(), 1);
        assert!((catalog.pair_distance(1, 2).unwrap() - 2.0 * 10f64.to_radians().cos()).abs() < 0.01);
    }
}
