//! CSV ingestion for the three tabular catalog inputs: stars, guide pairs and
//! optional star labels.
//!
//! Each file starts with a header row. Columns are located by name and several
//! spellings are accepted for each field (the `HIP_number`/`vmag`/`promora`
//! names written by the Hipparcos preparation tooling, or plain names such as
//! `id`/`magnitude`). Column order does not matter and unknown columns are
//! ignored.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::{CatalogLoadError, CatalogStar, GuideDistancePair};

const ID: &[&str] = &["id", "HIP_number", "hip"];
const RA: &[&str] = &["ra_degrees", "ra_deg", "ra"];
const DEC: &[&str] = &["dec_degrees", "dec_deg", "dec"];
const PM_RA: &[&str] = &["proper_motion_ra", "promora", "pm_ra"];
const PM_DEC: &[&str] = &["proper_motion_dec", "promodec", "pm_dec"];
const PARALLAX: &[&str] = &["parallax", "plx"];
const MAG: &[&str] = &["magnitude", "vmag", "mag"];

const ID_A: &[&str] = &["id_a", "HIP_number_a"];
const ID_B: &[&str] = &["id_b", "HIP_number_b"];
const DISTANCE: &[&str] = &["distance_degrees", "distance"];

const NAME: &[&str] = &["name", "Name"];

/// Read star records.
pub fn read_stars<R: Read>(reader: R) -> Result<Vec<CatalogStar>, CatalogLoadError> {
    let mut rdr = reader_for(reader);
    let headers = rdr.headers()?.clone();
    let id = column(&headers, ID, "id")?;
    let ra = column(&headers, RA, "ra_degrees")?;
    let dec = column(&headers, DEC, "dec_degrees")?;
    let mag = column(&headers, MAG, "magnitude")?;
    let pm_ra = optional_column(&headers, PM_RA);
    let pm_dec = optional_column(&headers, PM_DEC);
    let parallax = optional_column(&headers, PARALLAX);

    rdr.records()
        .enumerate()
        .map(|(i, result)| {
            let record = result?;
            let line = i + 1;
            Ok(CatalogStar {
                id: parse_field(&record, id, line, "id")?,
                ra_deg: parse_field(&record, ra, line, "ra_degrees")?,
                dec_deg: parse_field(&record, dec, line, "dec_degrees")?,
                pm_ra_mas_yr: parse_optional(&record, pm_ra, line, "proper_motion_ra")?,
                pm_dec_mas_yr: parse_optional(&record, pm_dec, line, "proper_motion_dec")?,
                parallax_mas: parse_optional(&record, parallax, line, "parallax")?,
                mag: parse_field(&record, mag, line, "magnitude")?,
                name: None,
            })
        })
        .collect()
}

/// Read guide-pair records `(id_a, id_b, distance_degrees)`.
pub fn read_guide_pairs<R: Read>(reader: R) -> Result<Vec<GuideDistancePair>, CatalogLoadError> {
    let mut rdr = reader_for(reader);
    let headers = rdr.headers()?.clone();
    let id_a = column(&headers, ID_A, "id_a")?;
    let id_b = column(&headers, ID_B, "id_b")?;
    let distance = column(&headers, DISTANCE, "distance_degrees")?;

    rdr.records()
        .enumerate()
        .map(|(i, result)| {
            let record = result?;
            let line = i + 1;
            Ok(GuideDistancePair {
                star_a: parse_field(&record, id_a, line, "id_a")?,
                star_b: parse_field(&record, id_b, line, "id_b")?,
                distance_deg: parse_field(&record, distance, line, "distance_degrees")?,
            })
        })
        .collect()
}

/// Read `(id, name)` label records. Rows with an empty name are skipped.
pub fn read_labels<R: Read>(reader: R) -> Result<Vec<(u64, String)>, CatalogLoadError> {
    let mut rdr = reader_for(reader);
    let headers = rdr.headers()?.clone();
    let id = column(&headers, ID, "id")?;
    let name = column(&headers, NAME, "name")?;

    let mut labels = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        let star_id: u64 = parse_field(&record, id, i + 1, "id")?;
        match record.get(name) {
            Some(n) if !n.is_empty() => labels.push((star_id, n.to_string())),
            _ => {}
        }
    }
    Ok(labels)
}

pub fn read_stars_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<CatalogStar>, CatalogLoadError> {
    read_stars(File::open(path)?)
}

pub fn read_guide_pairs_from_file<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<GuideDistancePair>, CatalogLoadError> {
    read_guide_pairs(File::open(path)?)
}

pub fn read_labels_from_file<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<(u64, String)>, CatalogLoadError> {
    read_labels(File::open(path)?)
}

fn reader_for<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader)
}

fn optional_column(headers: &StringRecord, names: &[&str]) -> Option<usize> {
    headers.iter().position(|h| names.contains(&h))
}

fn column(
    headers: &StringRecord,
    names: &[&str],
    field: &'static str,
) -> Result<usize, CatalogLoadError> {
    optional_column(headers, names).ok_or(CatalogLoadError::MissingColumn { column: field })
}

fn parse_field<T: FromStr>(
    record: &StringRecord,
    idx: usize,
    line: usize,
    field: &'static str,
) -> Result<T, CatalogLoadError> {
    let raw = record.get(idx).unwrap_or("");
    raw.parse().map_err(|_| CatalogLoadError::InvalidField {
        line,
        field,
        value: raw.to_string(),
    })
}

/// Empty or absent → `None`; present but non-numeric → error.
fn parse_optional(
    record: &StringRecord,
    idx: Option<usize>,
    line: usize,
    field: &'static str,
) -> Result<Option<f64>, CatalogLoadError> {
    match idx {
        Some(i) if !record.get(i).unwrap_or("").is_empty() => {
            parse_field(record, i, line, field).map(Some)
        }
        _ => Ok(None),
    }
}
