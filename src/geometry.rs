//! Spherical geometry shared by the catalog and the matcher.
//!
//! # Declination convention
//!
//! Stars are stored with their true declination in `[-90°, 90°]`. The
//! conversion to Cartesian coordinates measures the polar angle from a pole,
//! so the declination is shifted by [`DEC_POLAR_OFFSET_DEG`] inside
//! [`to_unit_vector`] and nowhere else. Every distance in the crate (guide
//! pairs built by [`StarCatalog::build`](crate::StarCatalog::build) and the
//! distances the matcher computes between candidate stars) goes through the
//! same function, so the convention is applied uniformly.
//!
//! The resulting frame is a mirror image of the usual ICRS frame
//! (`z = -sin(dec)`). Angular distances are unaffected, and they are the only
//! thing pattern matching compares.

use crate::{CatalogStar, Vector3};

/// Offset added to the declination to obtain the polar angle used by
/// [`polar_to_unit_vector`].
pub const DEC_POLAR_OFFSET_DEG: f64 = 90.0;

/// Unit vector for a right ascension and a polar angle, both in degrees.
pub fn polar_to_unit_vector(ra_deg: f64, polar_deg: f64) -> Vector3 {
    let (sin_ra, cos_ra) = ra_deg.to_radians().sin_cos();
    let (sin_p, cos_p) = polar_deg.to_radians().sin_cos();
    Vector3::new(sin_p * cos_ra, sin_p * sin_ra, cos_p)
}

/// Unit vector for a catalog position (right ascension, declination) in degrees.
#[inline]
pub fn to_unit_vector(ra_deg: f64, dec_deg: f64) -> Vector3 {
    polar_to_unit_vector(ra_deg, dec_deg + DEC_POLAR_OFFSET_DEG)
}

/// Inverse of [`to_unit_vector`]. Returns `(ra_deg, dec_deg)` with RA in `[0, 360)`.
///
/// `v` does not need to be normalized. The zero vector maps to `(0, -90)`.
pub fn to_spherical(v: &Vector3) -> (f64, f64) {
    let n = v.norm();
    if n == 0.0 {
        return (0.0, -DEC_POLAR_OFFSET_DEG);
    }
    let polar = (v.z / n).clamp(-1.0, 1.0).acos().to_degrees();
    let ra = v.y.atan2(v.x).to_degrees().rem_euclid(360.0);
    (ra, polar - DEC_POLAR_OFFSET_DEG)
}

/// Angle between two unit vectors, in degrees, in `[0, 180]`.
///
/// The dot product is clamped to `[-1, 1]` so nearly parallel or
/// anti-parallel vectors never produce NaN. Identical inputs return exactly 0.
#[inline]
pub fn angular_distance(u: &Vector3, v: &Vector3) -> f64 {
    if u == v {
        return 0.0;
    }
    u.dot(v).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Angular distance between two catalog stars, in degrees.
///
/// The same catalog entry is at distance zero without touching `acos`.
pub fn star_distance(a: &CatalogStar, b: &CatalogStar) -> f64 {
    if a.id == b.id {
        return 0.0;
    }
    angular_distance(&a.uvec(), &b.uvec())
}
