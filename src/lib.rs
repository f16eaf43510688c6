//! # startracker
//!
//! Lost-in-space **star pattern identification** for star trackers.
//!
//! Given the pixel centroids of bright points in a camera frame, `startracker`
//! identifies which catalog stars they are, with no prior attitude estimate.
//! The only invariant used is the angular distance between stars, compared
//! against a precomputed, distance-sorted index of guide-star pairs.
//!
//! ## Example
//!
//! ```no_run
//! use startracker::{
//!     sort_by_brightness, CameraModel, GuideCatalogConfig, ImagePoint, MatchConfig,
//!     MatchStatus, PatternMatcher, StarCatalog,
//! };
//!
//! // Build a catalog from the Hipparcos catalog, or load CSV files
//! let config = GuideCatalogConfig {
//!     magnitude_cutoff: 5.0,
//!     ..Default::default()
//! };
//! let catalog = StarCatalog::from_hipparcos_file("data/hip2.dat", Some(2025.0), &config).unwrap();
//!
//! // Save for fast loading later, or load a previously saved catalog
//! catalog.save_to_file("data/catalog.rkyv").unwrap();
//! let catalog = StarCatalog::load_from_file("data/catalog.rkyv").unwrap();
//!
//! // Pixel centroids from the segmentation step
//! let mut points = vec![
//!     ImagePoint::new(412.3, 280.9, 950.0),
//!     ImagePoint::new(801.0, 122.4, 870.0),
//!     // ... more points ...
//! ];
//! sort_by_brightness(&mut points);
//!
//! let matcher = PatternMatcher::new(&catalog, CameraModel::default(), MatchConfig::default());
//! let result = matcher.identify(&mut points);
//! if result.status == MatchStatus::MatchFound {
//!     for p in points.iter().filter(|p| p.is_identified()) {
//!         println!("({:.1}, {:.1}) is star {:?}", p.x, p.y, p.matched_star());
//!     }
//! }
//! ```
//!
//! ## Algorithm overview
//!
//! 1. **Guide pairs**: every pair of bright catalog stars closer than the field
//!    of view is stored with its angular distance, sorted by distance
//! 2. **Triangle kernels**: for three image points, guide pairs within a
//!    relative tolerance of two edges are joined on a shared pivot star and
//!    confirmed against the third edge; all three pivots must agree
//! 3. **Quads**: three overlapping triangles of four points are merged into
//!    quad candidates, widening the tolerance until exactly one quad remains
//! 4. **Identification**: each point's star is derived by elimination from the
//!    triangles that exclude it
//!

/// Raw star catalogs: CSV tables & Hipparcos
pub mod catalogs;
pub mod camera_model;
mod error;
pub mod geometry;
pub mod image_point;
pub mod matcher;
pub mod star;
pub mod starcatalog;

pub use camera_model::CameraModel;
pub use error::CatalogLoadError;
pub use image_point::{merge_clustered_points, sort_by_brightness, ImagePoint, PointMergeConfig};
pub use matcher::{MatchConfig, MatchStatus, PatternMatcher, PatternResult};
pub use star::*;
pub use starcatalog::*;

// Commonly used types
// Distances are compared at relative tolerances of 1e-3, and unit vectors must
// hold their norm to 1e-9, so everything is 64-bit.
pub type Vector3 = nalgebra::Vector3<f64>;
