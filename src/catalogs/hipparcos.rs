//! Types and helpers for working with Hipparcos catalog stars.
//!
//! Parses the fixed-width records of the Hipparcos new reduction (I/311,
//! `hip2.dat`), available from <http://cdsarc.u-strasbg.fr/ftp/I/311/hip2.dat.gz>.
//! Positions are in radians at epoch J1991.25, proper motions in mas/yr.

/// A star from the Hipparcos catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct HipparcosStar {
    pub hip: u32,
    pub ra_rad: f64,
    pub dec_rad: f64,
    /// Parallax, mas.
    pub plx: f64,
    /// mu_alpha * cos(delta), mas/yr.
    pub pm_ra: f64,
    /// mu_delta, mas/yr.
    pub pm_dec: f64,
    pub hpmag: f32,
    pub b_v: f32,
}

impl HipparcosStar {
    /// Convert Hipparcos Hp magnitude and Johnson B−V colour
    /// to Johnson V using the standard 4th-order polynomial.
    ///
    /// Reference: ESA SP-1200, Volume 1, Table 1.3.5 (magnitude transformations).
    ///
    /// Valid for roughly -0.2 < (B−V) < 1.8.
    pub fn hp_to_v(&self) -> f32 {
        let b = self.b_v;
        let delta = 0.304 * b - 0.202 * b * b + 0.107 * b * b * b - 0.045 * b * b * b * b;
        self.hpmag - delta
    }
}

/// Minimum record length covering every field read below.
pub(crate) const RECORD_LEN: usize = 171;

/// Parse a single Hipparcos catalog record into a `HipparcosStar`.
///
/// Returns `None` for short records or records with blank/non-numeric fields;
/// the raw catalog contains such entries and they are skipped.
pub(crate) fn parse_hipparcos_star(record: &str) -> Option<HipparcosStar> {
    if record.len() < RECORD_LEN || !record.is_ascii() {
        return None;
    }

    Some(HipparcosStar {
        hip: record[0..6].trim().parse().ok()?,
        ra_rad: record[15..28].trim().parse().ok()?,
        dec_rad: record[29..42].trim().parse().ok()?,
        plx: record[43..50].trim().parse().ok()?,
        pm_ra: record[51..59].trim().parse().ok()?,
        pm_dec: record[60..68].trim().parse().ok()?,
        hpmag: record[129..136].trim().parse().ok()?,
        b_v: record[152..158].trim().parse().ok()?,
    })
}

/// Load the Hipparcos catalog from an in-memory string.
pub fn load_hipparcos_catalog(data: &str) -> Vec<HipparcosStar> {
    data.lines().filter_map(parse_hipparcos_star).collect()
}

pub fn load_hipparcos_catalog_from_file<P: AsRef<std::path::Path>>(
    path: P,
) -> anyhow::Result<Vec<HipparcosStar>> {
    let data = std::fs::read_to_string(path)?;
    Ok(load_hipparcos_catalog(&data))
}

/// Build one fixed-width record. Shared with the catalog tests.
#[cfg(test)]
pub(crate) fn format_record(star: &HipparcosStar) -> String {
    let mut line = vec![b' '; RECORD_LEN];
    let mut put = |start: usize, end: usize, text: String| {
        let width = end - start;
        let padded = format!("{text:>width$}");
        line[start..end].copy_from_slice(&padded.as_bytes()[..width]);
    };
    put(0, 6, star.hip.to_string());
    put(15, 28, format!("{:.10}", star.ra_rad));
    put(29, 42, format!("{:.10}", star.dec_rad));
    put(43, 50, format!("{:.2}", star.plx));
    put(51, 59, format!("{:.2}", star.pm_ra));
    put(60, 68, format!("{:.2}", star.pm_dec));
    put(129, 136, format!("{:.4}", star.hpmag));
    put(152, 158, format!("{:.3}", star.b_v));
    String::from_utf8(line).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> HipparcosStar {
        HipparcosStar {
            hip: 11767,
            ra_rad: 0.6622870783,
            dec_rad: 1.5579526993,
            plx: 7.54,
            pm_ra: 44.48,
            pm_dec: -11.85,
            hpmag: 2.1077,
            b_v: 0.636,
        }
    }

    #[test]
    fn parses_formatted_record() {
        let record = format_record(&sample());
        let parsed = parse_hipparcos_star(&record).expect("record should parse");
        assert_eq!(parsed.hip, 11767);
        assert!((parsed.ra_rad - 0.6622870783).abs() < 1e-10);
        assert!((parsed.dec_rad - 1.5579526993).abs() < 1e-10);
        assert!((parsed.pm_dec + 11.85).abs() < 1e-9);
        assert!((parsed.hpmag - 2.1077).abs() < 1e-6);
    }

    #[test]
    fn skips_short_and_blank_records() {
        assert!(parse_hipparcos_star("     1").is_none());

        let mut record = format_record(&sample());
        record.replace_range(129..136, "       ");
        assert!(parse_hipparcos_star(&record).is_none());

        let data = format!("{}\ngarbage\n{}\n", format_record(&sample()), record);
        assert_eq!(load_hipparcos_catalog(&data).len(), 1);
    }

    #[test]
    fn hp_to_v_correction() {
        let mut star = sample();
        star.b_v = 0.0;
        assert_eq!(star.hp_to_v(), star.hpmag);
        star.b_v = 1.0;
        let expected = star.hpmag - (0.304 - 0.202 + 0.107 - 0.045);
        assert!((star.hp_to_v() - expected).abs() < 1e-6);
    }
}
