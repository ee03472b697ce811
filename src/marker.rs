use crate::photo::PhotoRecord;

use serde::{Deserialize, Serialize};

/// A photo annotation on the rendered map. Coordinates are always finite;
/// photos without usable geotags never become markers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Marker {
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
    pub thumbnail: String,
}

/// A kilometre label along the track polyline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceMarker {
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
}

/// Build one marker per geotagged photo. Records with absent or non-finite
/// coordinates are dropped, not defaulted. The label is the file's base
/// name and the thumbnail is the path as discovered, relative to the media
/// directory the page is served from.
pub fn from_photos(records: &[PhotoRecord]) -> Vec<Marker> {
    records
        .iter()
        .filter_map(|record| {
            let (latitude, longitude) = record.coordinates?;

            if !latitude.is_finite() || !longitude.is_finite() {
                return None;
            }

            let label = record
                .path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();

            Some(Marker {
                latitude,
                longitude,
                label,
                thumbnail: record.path.to_string_lossy().into_owned(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn record(path: &str, coordinates: Option<(f64, f64)>) -> PhotoRecord {
        PhotoRecord {
            path: PathBuf::from(path),
            coordinates,
        }
    }

    #[test]
    fn one_marker_per_geotagged_photo() {
        let records = vec!(
            record("media/imgs/a.jpeg", Some((53.40, -2.98))),
            record("media/imgs/b.jpeg", None),
        );

        let markers = from_photos(&records);

        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].latitude, 53.40);
        assert_eq!(markers[0].longitude, -2.98);
        assert_eq!(markers[0].label, "a.jpeg");
        assert_eq!(markers[0].thumbnail, "media/imgs/a.jpeg");
    }

    #[test]
    fn untagged_photos_produce_no_marker() {
        let records = vec!(record("x.jpeg", None), record("y.jpeg", None));
        assert!(from_photos(&records).is_empty());
    }

    #[test]
    fn non_finite_coordinates_are_dropped() {
        let records = vec!(
            record("nan.jpeg", Some((f64::NAN, 1.0))),
            record("inf.jpeg", Some((1.0, f64::INFINITY))),
        );
        assert!(from_photos(&records).is_empty());
    }

    #[test]
    fn marker_count_never_exceeds_record_count() {
        let records = vec!(
            record("a.jpeg", Some((1.0, 2.0))),
            record("b.jpeg", Some((3.0, 4.0))),
            record("c.jpeg", None),
        );
        assert!(from_photos(&records).len() <= records.len());
    }
}
