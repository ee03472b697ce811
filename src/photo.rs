use crate::error::Error;

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::Command;

/// One discovered image file. Absent coordinates mean the file carries no
/// embedded geolocation tags; that is not an error.
#[derive(Debug, Serialize, Deserialize)]
pub struct PhotoRecord {
    pub path: PathBuf,
    pub coordinates: Option<(f64, f64)>,
}

/// Narrow seam in front of the external metadata tool, so the subprocess
/// detail stays swappable in tests.
pub trait MetadataSource {
    fn lookup(&self, paths: &[PathBuf]) -> Result<Vec<PhotoRecord>, Error>;
}

/// List the jpeg files directly under `dir`, sorted by path. A missing
/// directory yields an empty list; the run then renders a bare track.
pub fn discover(dir: &str) -> Vec<PathBuf> {
    let pattern = Path::new(dir).join("*.{jpg,jpeg}");

    let walker = match globwalk::glob(&pattern.to_string_lossy()) {
        Ok(w) => w,
        Err(e) => {
            warn!("could not scan image directory {}: {}", dir, e);
            return vec!();
        }
    };

    let mut files: Vec<PathBuf> = walker
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.into_path())
        .collect();
    files.sort();

    files
}

const GPS_TAGS: [&str; 4] = [
    "-EXIF:GPSLatitude",
    "-EXIF:GPSLongitude",
    "-EXIF:GPSLatitudeRef",
    "-EXIF:GPSLongitudeRef",
];

/// Batch tag lookup through the exiftool binary. One subprocess per run;
/// `Command::output` reaps it on every exit path.
pub struct ExifTool;

impl ExifTool {
    pub fn new() -> Self {
        Self
    }
}

impl MetadataSource for ExifTool {
    fn lookup(&self, paths: &[PathBuf]) -> Result<Vec<PhotoRecord>, Error> {
        // exiftool exits non-zero when given no files at all
        if paths.is_empty() {
            return Ok(vec!());
        }

        let output = Command::new("exiftool")
            .arg("-json")
            .arg("-n")
            .args(GPS_TAGS)
            .args(paths)
            .output()
            .map_err(|e| Error::MetadataService(format!("could not run exiftool: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::MetadataService(format!(
                "exiftool exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let entries: Value = serde_json::from_slice(&output.stdout)
            .map_err(|e| Error::MetadataService(format!("unreadable exiftool output: {}", e)))?;

        records_from_json(&entries)
    }
}

fn records_from_json(entries: &Value) -> Result<Vec<PhotoRecord>, Error> {
    let entries = entries
        .as_array()
        .ok_or_else(|| Error::MetadataService("exiftool output is not a list".to_string()))?;

    Ok(entries
        .iter()
        .map(|entry| PhotoRecord {
            path: PathBuf::from(entry["SourceFile"].as_str().unwrap_or_default()),
            coordinates: coordinates_from_entry(entry),
        })
        .collect())
}

// Tags come back unsigned with -n; the hemisphere refs carry the sign.
fn coordinates_from_entry(entry: &Value) -> Option<(f64, f64)> {
    let lat = tag_value(&entry["GPSLatitude"])?;
    let lon = tag_value(&entry["GPSLongitude"])?;

    let lat_sign = match entry["GPSLatitudeRef"].as_str() {
        Some("S") => -1.0,
        _ => 1.0,
    };
    let lon_sign = match entry["GPSLongitudeRef"].as_str() {
        Some("W") => -1.0,
        _ => 1.0,
    };

    Some((lat_sign*lat, lon_sign*lon))
}

fn tag_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}
