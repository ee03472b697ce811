use crate::error::Error;
use crate::marker::DistanceMarker;

use geo::{Distance, Haversine};
use geo_types::Point;
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use time::OffsetDateTime;

/// One timestamped position from the gpx file. Points keep the order they
/// have in the file; nothing is reordered or deduplicated.
#[derive(Clone, Debug, Serialize)]
pub struct TrackPoint {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub time: OffsetDateTime,
}

/// One continuous route, loaded once per run. Distance and kilometre
/// markers are accumulated while loading, the same pass that collects the
/// points.
#[derive(Clone, Debug)]
pub struct Track {
    pub points: Vec<TrackPoint>,
    pub distance_km: f64,
    pub distance_markers: Vec<DistanceMarker>,
}

impl Track {
    pub fn from_gpx_file(path: &str) -> Result<Self, Error> {
        let file = File::open(path).map_err(|e| Error::TrackParse {
            path: path.to_string(),
            reason: e.to_string(),
        })?;

        Self::from_reader(BufReader::new(file), path)
    }

    /// Parse a gpx document. All tracks and segments are walked in file
    /// order and flattened into one route. A file without track points or
    /// a point without a timestamp is malformed.
    pub fn from_reader<R: BufRead>(reader: R, origin: &str) -> Result<Self, Error> {
        let parse_err = |reason: String| Error::TrackParse {
            path: origin.to_string(),
            reason,
        };

        let gpx = gpx::read(reader).map_err(|e| parse_err(e.to_string()))?;

        let mut points = vec!();

        for track in &gpx.tracks {
            for segment in &track.segments {
                for wp in &segment.points {
                    let time = wp
                        .time
                        .ok_or_else(|| parse_err("track point without timestamp".to_string()))?;

                    points.push(TrackPoint {
                        latitude: wp.point().y(),
                        longitude: wp.point().x(),
                        time: time.into(),
                    });
                }
            }
        }

        if points.is_empty() {
            return Err(parse_err("no track points".to_string()));
        }

        let (distance_km, distance_markers) = measure(&points);

        Ok(Self {
            points,
            distance_km,
            distance_markers,
        })
    }

    pub fn duration(&self) -> time::Duration {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => last.time - first.time,
            _ => time::Duration::ZERO,
        }
    }

    pub fn duration_display(&self) -> String {
        let s = self.duration().whole_seconds().max(0);

        format!("{:02}:{:02}:{:02}", s/3600, (s%3600)/60, s%60)
    }
}

// Accumulate the haversine length of the route and drop a label on the
// first point past each whole kilometre.
fn measure(points: &[TrackPoint]) -> (f64, Vec<DistanceMarker>) {
    let mut distance_km = 0.0;
    let mut markers = vec!();
    let mut whole_km = 0u64;

    for pair in points.windows(2) {
        let a = Point::new(pair[0].longitude, pair[0].latitude);
        let b = Point::new(pair[1].longitude, pair[1].latitude);
        distance_km += Haversine::distance(a, b)/1000.0;

        if distance_km as u64 > whole_km {
            whole_km = distance_km as u64;
            markers.push(DistanceMarker {
                latitude: pair[1].latitude,
                longitude: pair[1].longitude,
                label: format!("{}km", whole_km),
            });
        }
    }

    (distance_km, markers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const THREE_POINTS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test" xmlns="http://www.topografix.com/GPX/1/1">
  <trk>
    <trkseg>
      <trkpt lat="53.40" lon="-2.98"><time>2021-10-13T10:00:00Z</time></trkpt>
      <trkpt lat="53.41" lon="-2.97"><time>2021-10-13T10:30:00Z</time></trkpt>
      <trkpt lat="53.42" lon="-2.96"><time>2021-10-13T11:00:00Z</time></trkpt>
    </trkseg>
  </trk>
</gpx>"#;

    #[test]
    fn points_keep_file_order() {
        let track = Track::from_reader(Cursor::new(THREE_POINTS), "three.gpx").unwrap();

        assert_eq!(track.points.len(), 3);
        assert_eq!(track.points[0].latitude, 53.40);
        assert_eq!(track.points[0].longitude, -2.98);
        assert_eq!(track.points[2].latitude, 53.42);
        assert_eq!(track.points[2].longitude, -2.96);
    }

    #[test]
    fn distance_and_km_markers() {
        let track = Track::from_reader(Cursor::new(THREE_POINTS), "three.gpx").unwrap();

        // Roughly 1.3km per segment at this latitude
        assert!(track.distance_km > 2.0 && track.distance_km < 3.2);
        assert_eq!(track.distance_markers.len(), 2);
        assert_eq!(track.distance_markers[0].label, "1km");
        assert_eq!(track.distance_markers[1].label, "2km");
    }

    #[test]
    fn duration_spans_first_to_last() {
        let track = Track::from_reader(Cursor::new(THREE_POINTS), "three.gpx").unwrap();

        assert_eq!(track.duration().whole_minutes(), 60);
        assert_eq!(track.duration_display(), "01:00:00");
    }

    #[test]
    fn empty_track_is_malformed() {
        let gpx = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test" xmlns="http://www.topografix.com/GPX/1/1">
  <trk><trkseg></trkseg></trk>
</gpx>"#;

        let err = Track::from_reader(Cursor::new(gpx), "empty.gpx").unwrap_err();
        assert!(matches!(err, Error::TrackParse { .. }));
    }

    #[test]
    fn point_without_timestamp_is_malformed() {
        let gpx = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test" xmlns="http://www.topografix.com/GPX/1/1">
  <trk><trkseg><trkpt lat="53.40" lon="-2.98"></trkpt></trkseg></trk>
</gpx>"#;

        let err = Track::from_reader(Cursor::new(gpx), "untimed.gpx").unwrap_err();
        assert!(matches!(err, Error::TrackParse { .. }));
    }

    #[test]
    fn garbage_is_malformed() {
        let err = Track::from_reader(Cursor::new("not a gpx file"), "junk.gpx").unwrap_err();
        assert!(matches!(err, Error::TrackParse { .. }));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = Track::from_gpx_file("no/such/file.gpx").unwrap_err();
        assert!(matches!(err, Error::TrackParse { .. }));
    }
}
