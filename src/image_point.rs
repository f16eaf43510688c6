//! Define an image point: a bright detection in the frame.
//!
//! Image points come from an external segmentation step and are the input to
//! the pattern matcher, which annotates them with the catalog star they were
//! identified as.

use tracing::warn;

use crate::camera_model::CameraModel;
use crate::geometry::angular_distance;
use crate::Vector3;

#[derive(Debug, Clone)]
pub struct ImagePoint {
    /// Centroid position in pixels along columns. +X points right.
    pub x: f64,
    /// Centroid position in pixels along rows. +Y points down.
    pub y: f64,
    /// Relative intensity used for ranking (brighter = higher).
    pub brightness: f64,
    matched_star: Option<u64>,
}

impl ImagePoint {
    pub fn new(x: f64, y: f64, brightness: f64) -> Self {
        Self {
            x,
            y,
            brightness,
            matched_star: None,
        }
    }

    /// Unit vector of the centroid in the camera frame.
    pub fn unit_vector(&self, camera: &CameraModel) -> Vector3 {
        camera.unit_vector(self.x, self.y)
    }

    /// Angular distance to another point, in degrees.
    ///
    /// Two points with the same centroid are usually a segmentation duplicate;
    /// their distance is 0 and a warning is logged.
    pub fn angular_distance_to(&self, other: &ImagePoint, camera: &CameraModel) -> f64 {
        if self.x == other.x && self.y == other.y {
            warn!("Image points share centroid ({:.2}, {:.2})", self.x, self.y);
            return 0.0;
        }
        angular_distance(&self.unit_vector(camera), &other.unit_vector(camera))
    }

    /// Catalog id of the star this point was identified as.
    pub fn matched_star(&self) -> Option<u64> {
        self.matched_star
    }

    pub fn is_identified(&self) -> bool {
        self.matched_star.is_some()
    }

    pub fn set_match(&mut self, star_id: u64) {
        self.matched_star = Some(star_id);
    }

    pub fn clear_match(&mut self) {
        self.matched_star = None;
    }
}

/// Points are equal only when both are identified as the same star.
/// Unidentified points never compare equal, not even to themselves.
impl PartialEq for ImagePoint {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self.matched_star, other.matched_star),
            (Some(a), Some(b)) if a == b
        )
    }
}

/// Sort points by brightness, brightest first. Ties keep their input order.
pub fn sort_by_brightness(points: &mut [ImagePoint]) {
    points.sort_by(|a, b| b.brightness.total_cmp(&a.brightness));
}

/// Parameters for [`merge_clustered_points`].
#[derive(Debug, Clone)]
pub struct PointMergeConfig {
    /// Maximum offset in pixels, on each axis, from the cluster's first point. Default 9.
    pub radius_px: f64,
    /// A cluster is kept only with strictly more members than this. Default 4.
    pub min_members: usize,
}

impl Default for PointMergeConfig {
    fn default() -> Self {
        Self {
            radius_px: 9.0,
            min_members: 4,
        }
    }
}

/// Collapse clusters of raw detections into single points.
///
/// Points are visited in order. Each point not yet part of a cluster starts
/// one and absorbs every later free point within `radius_px` of it on both
/// axes. Clusters with more than `min_members` members become one point at
/// the mean position and brightness; smaller clusters are dropped.
pub fn merge_clustered_points(points: &[ImagePoint], config: &PointMergeConfig) -> Vec<ImagePoint> {
    let mut consumed = vec![false; points.len()];
    let mut merged = Vec::new();

    for (i, seed) in points.iter().enumerate() {
        if consumed[i] {
            continue;
        }
        consumed[i] = true;

        let (mut sum_x, mut sum_y, mut sum_b) = (seed.x, seed.y, seed.brightness);
        let mut members = 1usize;
        for (j, p) in points.iter().enumerate().skip(i + 1) {
            if consumed[j] {
                continue;
            }
            if (p.x - seed.x).abs() <= config.radius_px && (p.y - seed.y).abs() <= config.radius_px {
                consumed[j] = true;
                sum_x += p.x;
                sum_y += p.y;
                sum_b += p.brightness;
                members += 1;
            }
        }

        if members > config.min_members {
            let n = members as f64;
            merged.push(ImagePoint::new(sum_x / n, sum_y / n, sum_b / n));
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_requires_matching_identification() {
        let mut a = ImagePoint::new(10.0, 10.0, 1.0);
        let mut b = ImagePoint::new(500.0, 300.0, 2.0);
        assert_ne!(a, a.clone());
        assert_ne!(a, b);

        a.set_match(7);
        assert_ne!(a, b);
        b.set_match(7);
        assert_eq!(a, b);
        b.set_match(8);
        assert_ne!(a, b);

        b.clear_match();
        assert!(!b.is_identified());
        assert_eq!(a.matched_star(), Some(7));
    }

    #[test]
    fn identical_centroids_are_zero_apart() {
        let cam = CameraModel::default();
        let a = ImagePoint::new(100.0, 200.0, 1.0);
        let b = ImagePoint::new(100.0, 200.0, 5.0);
        assert_eq!(a.angular_distance_to(&b, &cam), 0.0);
    }

    #[test]
    fn distance_is_symmetric_and_positive() {
        let cam = CameraModel::default();
        let a = ImagePoint::new(100.0, 200.0, 1.0);
        let b = ImagePoint::new(900.0, 650.0, 1.0);
        let d = a.angular_distance_to(&b, &cam);
        assert!(d > 0.0 && d < 180.0);
        assert_eq!(d, b.angular_distance_to(&a, &cam));
    }

    #[test]
    fn brightness_sort_is_descending_and_stable() {
        let mut points = vec![
            ImagePoint::new(0.0, 0.0, 1.0),
            ImagePoint::new(1.0, 0.0, 5.0),
            ImagePoint::new(2.0, 0.0, 3.0),
            ImagePoint::new(3.0, 0.0, 5.0),
        ];
        sort_by_brightness(&mut points);
        let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![1.0, 3.0, 2.0, 0.0]);
    }

    #[test]
    fn clusters_are_averaged() {
        // Five detections of one star plus a lone hot pixel.
        let mut points: Vec<ImagePoint> = (0..5)
            .map(|i| ImagePoint::new(100.0 + i as f64, 50.0 - i as f64, 10.0 * (i + 1) as f64))
            .collect();
        points.push(ImagePoint::new(400.0, 400.0, 99.0));

        let merged = merge_clustered_points(&points, &PointMergeConfig::default());
        assert_eq!(merged.len(), 1);
        assert!((merged[0].x - 102.0).abs() < 1e-12);
        assert!((merged[0].y - 48.0).abs() < 1e-12);
        assert!((merged[0].brightness - 30.0).abs() < 1e-12);
        // Input untouched.
        assert_eq!(points[5].x, 400.0);
    }

    #[test]
    fn small_clusters_are_dropped() {
        let points: Vec<ImagePoint> = (0..4)
            .map(|i| ImagePoint::new(10.0 + i as f64, 10.0, 1.0))
            .collect();
        assert!(merge_clustered_points(&points, &PointMergeConfig::default()).is_empty());

        let lenient = PointMergeConfig {
            min_members: 3,
            ..Default::default()
        };
        assert_eq!(merge_clustered_points(&points, &lenient).len(), 1);
    }

    #[test]
    fn radius_is_measured_from_first_member() {
        // Chain of points 6 px apart: a seed only reaches its next neighbour.
        let points: Vec<ImagePoint> = (0..4)
            .map(|i| ImagePoint::new(6.0 * i as f64, 0.0, 1.0))
            .collect();
        let config = PointMergeConfig {
            radius_px: 9.0,
            min_members: 1,
        };
        let merged = merge_clustered_points(&points, &config);
        assert_eq!(merged.len(), 2);
        assert!((merged[0].x - 3.0).abs() < 1e-12);
        assert!((merged[1].x - 15.0).abs() < 1e-12);
    }
}
