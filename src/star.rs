use std::hash::{Hash, Hasher};

use rkyv::{Archive, Deserialize, Serialize};

use crate::geometry::to_unit_vector;
use crate::Vector3;

/// A reference star of the catalog.
///
/// Positions are in degrees with true declination (see [`crate::geometry`] for
/// how they become unit vectors). Proper-motion and parallax fields are carried
/// for provenance only; positions are expected to be valid at the observation
/// epoch already.
///
/// Two stars are equal iff their ids are equal.
#[derive(Debug, Clone, Archive, Serialize, Deserialize)]
pub struct CatalogStar {
    /// Catalog number (e.g. HIP number). Unique within a catalog.
    pub id: u64,
    pub ra_deg: f64,
    pub dec_deg: f64,
    /// Proper motion in right ascension (mu_alpha * cos(delta)), mas/yr.
    pub pm_ra_mas_yr: Option<f64>,
    /// Proper motion in declination, mas/yr.
    pub pm_dec_mas_yr: Option<f64>,
    pub parallax_mas: Option<f64>,
    /// Visual magnitude. Lower is brighter.
    pub mag: f64,
    /// Human-readable name, when the catalog was labelled.
    pub name: Option<String>,
}

impl CatalogStar {
    /// Create a star with no proper motion, parallax or name.
    pub fn new(id: u64, ra_deg: f64, dec_deg: f64, mag: f64) -> Self {
        Self {
            id,
            ra_deg,
            dec_deg,
            pm_ra_mas_yr: None,
            pm_dec_mas_yr: None,
            parallax_mas: None,
            mag,
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Unit vector pointing to the star's position on the celestial sphere.
    pub fn uvec(&self) -> Vector3 {
        to_unit_vector(self.ra_deg, self.dec_deg)
    }

    /// The star's name, or its catalog number when unnamed.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.id.to_string(),
        }
    }
}

impl PartialEq for CatalogStar {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CatalogStar {}

impl Hash for CatalogStar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Convert a Hipparcos star to a catalog star, optionally propagating proper motion.
///
/// `epoch_year`: Target year for proper motion propagation (e.g. 2025.0).
/// If None, the catalog position at the Hipparcos reference epoch (J1991.25) is used.
///
/// Proper motion near the celestial poles (|dec| > ~87°) is ignored because
/// the cos(dec) divisor becomes numerically unstable.
pub fn star_from_hipparcos(
    star: &crate::catalogs::hipparcos::HipparcosStar,
    epoch_year: Option<f64>,
) -> CatalogStar {
    // Hipparcos reference epoch is J1991.25
    const HIPPARCOS_EPOCH_YEAR: f64 = 1991.25;
    const MAS_PER_YR_TO_RAD_PER_YR: f64 =
        2.0 * std::f64::consts::PI / (3600.0 * 1000.0 * 360.0);

    let (ra, dec) = match epoch_year {
        Some(target_year) => {
            let dt_years = target_year - HIPPARCOS_EPOCH_YEAR;
            let cos_dec = star.dec_rad.cos();
            let (mu_ra, mu_dec) = if cos_dec.abs() > 0.05 {
                // pm_ra from Hipparcos is mu_alpha*cos(delta), so divide by cos(dec)
                (
                    star.pm_ra * MAS_PER_YR_TO_RAD_PER_YR / cos_dec,
                    star.pm_dec * MAS_PER_YR_TO_RAD_PER_YR,
                )
            } else {
                (0.0, 0.0)
            };
            (star.ra_rad + mu_ra * dt_years, star.dec_rad + mu_dec * dt_years)
        }
        None => (star.ra_rad, star.dec_rad),
    };

    CatalogStar {
        id: star.hip as u64,
        ra_deg: ra.to_degrees().rem_euclid(360.0),
        dec_deg: dec.to_degrees().clamp(-90.0, 90.0),
        pm_ra_mas_yr: Some(star.pm_ra),
        pm_dec_mas_yr: Some(star.pm_dec),
        parallax_mas: (star.plx > 0.0).then_some(star.plx),
        mag: star.hp_to_v() as f64,
        name: None,
    }
}
