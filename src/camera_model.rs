//! Pinhole camera model: focal length and optical center.
//!
//! Maps pixel centroids to unit vectors in the camera frame, where the
//! boresight is +Z.
//!
//! # Coordinate conventions
//!
//! - **Pixel coordinates**: origin at the top-left corner of the sensor, +X right,
//!   +Y down. The optical center is given in the same coordinates.
//! - **Camera frame**: +Z along the boresight, +X along the pixel +X axis,
//!   +Y along the pixel +Y axis.
//!
//! # Pipeline
//!
//! ```text
//! pixel → subtract center → divide by f → radial angle θ, azimuth φ → unit vector
//! unit vector → divide by z → multiply by f → add center → pixel
//! ```

use crate::Vector3;

/// Pinhole camera intrinsics.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraModel {
    /// Focal length in pixels: `f = (width/2) / tan(fov_h/2)`.
    pub focal_length_px: f64,
    /// Optical center in pixel coordinates `[x, y]`.
    pub center: [f64; 2],
}

impl Default for CameraModel {
    /// A 1332 × 880 sensor with a 2657.33 px focal length.
    fn default() -> Self {
        Self {
            focal_length_px: 2657.33,
            center: [666.0, 440.0],
        }
    }
}

impl CameraModel {
    /// Create a camera model from a horizontal field of view and sensor size.
    ///
    /// The optical center is placed at the geometric center of the sensor.
    pub fn from_fov(fov_h_deg: f64, width: u32, height: u32) -> Self {
        let f = (width as f64 / 2.0) / (fov_h_deg.to_radians() / 2.0).tan();
        Self {
            focal_length_px: f,
            center: [width as f64 / 2.0, height as f64 / 2.0],
        }
    }

    /// Horizontal, vertical and diagonal field of view in degrees for a sensor
    /// of the given size.
    pub fn fov_deg(&self, width: u32, height: u32) -> (f64, f64, f64) {
        let half_w = width as f64 / 2.0;
        let half_h = height as f64 / 2.0;
        let angle = |half: f64| 2.0 * (half / self.focal_length_px).atan().to_degrees();
        (angle(half_w), angle(half_h), angle(half_w.hypot(half_h)))
    }

    /// Unit vector in the camera frame for a pixel centroid.
    pub fn unit_vector(&self, x: f64, y: f64) -> Vector3 {
        let dx = x - self.center[0];
        let dy = y - self.center[1];
        let theta = ((dx / self.focal_length_px).powi(2) + (dy / self.focal_length_px).powi(2))
            .sqrt()
            .atan();
        let phi = dy.atan2(dx);
        Vector3::new(phi.cos() * theta.sin(), phi.sin() * theta.sin(), theta.cos())
    }

    /// Pixel position of a camera-frame direction.
    ///
    /// Returns `None` for directions at or behind the image plane (`z <= 0`).
    pub fn project(&self, v: &Vector3) -> Option<[f64; 2]> {
        if v.z <= 0.0 {
            return None;
        }
        Some([
            self.center[0] + self.focal_length_px * v.x / v.z,
            self.center[1] + self.focal_length_px * v.y / v.z,
        ])
    }
}
