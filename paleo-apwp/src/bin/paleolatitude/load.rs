//! CSV loading for APWP datasets, rotation tables and plate outlines

use anyhow::{bail, Context, Result};
use paleo_apwp::plates::plate_frame_id;
use paleo_apwp::{
    ApwpCatalog, ApwpDataset, DatedRotation, FiniteRotation, PlateIndex, PlatePolygon,
    RotationTable,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const APWP_PREFIX: &str = "apwp-";
const APWP_EXTENSION: &str = "csv";

#[derive(Debug, Deserialize)]
struct PoleRow {
    age: f64,
    a95: f64,
    #[serde(alias = "latitude")]
    lat: f64,
    #[serde(alias = "longitude")]
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct RotationRow {
    from: String,
    to: String,
    age: Option<f64>,
    #[serde(alias = "latitude")]
    lat: f64,
    #[serde(alias = "longitude")]
    lon: f64,
    angle: f64,
}

#[derive(Debug, Deserialize)]
struct PlateRow {
    #[serde(alias = "plate")]
    plate_id: u32,
    name: String,
    #[serde(default)]
    part: u32,
    #[serde(alias = "latitude")]
    lat: f64,
    #[serde(alias = "longitude")]
    lon: f64,
}

fn reader(path: &Path) -> Result<csv::Reader<std::fs::File>> {
    csv::ReaderBuilder::new()
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))
}

fn bad_record(path: &Path, line: usize) -> String {
    format!("{}: bad record {}", path.display(), line + 1)
}

/// A bare plate id in a rotation file names that plate's frame.
fn frame_name(raw: &str) -> String {
    match raw.parse::<u32>() {
        Ok(plate_id) => plate_frame_id(plate_id),
        Err(_) => raw.to_string(),
    }
}

/// Finds `apwp-<frame>.csv` files, keyed by frame id.
pub fn discover(data_dir: &Path) -> Result<BTreeMap<String, PathBuf>> {
    let dir = data_dir.display();
    let entries = std::fs::read_dir(data_dir)
        .with_context(|| format!("Failed to read data directory {dir}"))?;

    let mut found = BTreeMap::new();
    for entry in entries {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some(APWP_EXTENSION) {
            continue;
        }
        let frame = path
            .file_stem()
            .and_then(|s| s.to_str())
            .and_then(|s| s.strip_prefix(APWP_PREFIX))
            .filter(|s| !s.is_empty());
        if let Some(frame) = frame {
            found.insert(frame.to_string(), path);
        }
    }

    tracing::debug!(dir = %dir, frames = found.len(), "discovered APWP files");
    Ok(found)
}

pub fn load_dataset(frame: &str, path: &Path) -> Result<ApwpDataset> {
    let mut rows = Vec::new();
    for (line, row) in reader(path)?.deserialize::<PoleRow>().enumerate() {
        let row = row.with_context(|| bad_record(path, line))?;
        rows.push((row.age, row.lat, row.lon, row.a95));
    }
    ApwpDataset::from_rows(frame, rows)
        .with_context(|| format!("Invalid APWP file {}", path.display()))
}

/// Loads every discovered frame into a catalog.
pub fn load_catalog(data_dir: &Path) -> Result<ApwpCatalog> {
    let files = discover(data_dir)?;
    if files.is_empty() {
        let dir = data_dir.display();
        bail!("No {APWP_PREFIX}<frame>.{APWP_EXTENSION} files in {dir}");
    }

    let mut catalog = ApwpCatalog::new();
    for (frame, path) in &files {
        catalog.insert(load_dataset(frame, path)?)?;
    }
    Ok(catalog)
}

/// Loads a rotation CSV. Rows sharing a `from,to` pair form one edge: a
/// single row with a blank age is a fixed rotation, dated rows form a series.
pub fn load_rotations(path: &Path) -> Result<RotationTable> {
    let mut grouped: BTreeMap<(String, String), Vec<RotationRow>> = BTreeMap::new();
    for (line, row) in reader(path)?.deserialize::<RotationRow>().enumerate() {
        let row: RotationRow = row.with_context(|| bad_record(path, line))?;
        let key = (frame_name(&row.from), frame_name(&row.to));
        grouped.entry(key).or_default().push(row);
    }

    let mut table = RotationTable::new();
    for ((from, to), rows) in grouped {
        let fixed = rows.iter().filter(|r| r.age.is_none()).count();
        if fixed > 0 {
            if rows.len() != 1 {
                let file = path.display();
                bail!("{file}: rotation {from} -> {to} mixes fixed and dated rows");
            }
            let row = &rows[0];
            let rotation = FiniteRotation::new(row.lat, row.lon, row.angle)?;
            table.add_fixed(&from, &to, rotation)?;
            continue;
        }

        let entries = rows
            .iter()
            .map(|row| {
                Ok(DatedRotation {
                    age_ma: row.age.unwrap_or_default(),
                    rotation: FiniteRotation::new(row.lat, row.lon, row.angle)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        table.add_dated(&from, &to, entries)?;
    }

    let file = path.display();
    tracing::debug!(path = %file, edges = table.len(), "loaded rotation table");
    Ok(table)
}

/// Loads plate outlines. Consecutive rows sharing `plate_id` and `part` form
/// one ring; the closing vertex may be repeated or left out.
pub fn load_plates(path: &Path) -> Result<PlateIndex> {
    let mut rings: Vec<((u32, u32), String, Vec<(f64, f64)>)> = Vec::new();
    for (line, row) in reader(path)?.deserialize::<PlateRow>().enumerate() {
        let row: PlateRow = row.with_context(|| bad_record(path, line))?;
        let key = (row.plate_id, row.part);
        match rings.last_mut() {
            Some((last, _, vertices)) if *last == key => vertices.push((row.lat, row.lon)),
            _ => rings.push((key, row.name, vec![(row.lat, row.lon)])),
        }
    }

    let file = path.display();
    let mut index = PlateIndex::new();
    for ((plate_id, part), name, vertices) in rings {
        let plate = PlatePolygon::new(plate_id, &name, &vertices)
            .with_context(|| format!("{file}: plate {plate_id} part {part}"))?;
        index.insert(plate);
    }
    if index.is_empty() {
        bail!("{file}: no plate outlines");
    }

    let outlines = index.len();
    tracing::debug!(path = %file, outlines, "loaded plate outlines");
    Ok(index)
}
