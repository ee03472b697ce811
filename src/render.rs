use crate::error::Error;
use crate::marker::Marker;
use crate::track::Track;

use std::fs;
use tera::{Context, Tera};

// Self-contained page: Leaflet from a CDN, OpenStreetMap tiles, the track
// polyline, a popup marker per geotagged photo and a label per kilometre.
const MAP_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>Track map</title>
  <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css"/>
  <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
  <style type="text/css">
    #mapId {
      position: absolute;
      top: 0px;
      left: 0px;
      width: 800px;
      height: 800px;
      border: 1px solid #000;
    }
    #info {
      position: absolute;
      top: 0px;
      left: 805px;
      border: 1px solid #000;
      background-color: #ddd;
      font-size: larger;
      padding: 5px;
    }
    .popup-image {
      max-width: 300px;
      max-height: 300px;
      width: auto;
      height: auto;
      display: block;
    }
    .km-label {
      font-size: 20px;
      font-weight: bold;
    }
  </style>
</head>
<body>
  <div id="mapId"></div>
  <div id="info">
    <h1>Track info</h1>
    <div id="duration">Duration: {{ duration }}</div>
    <div id="distance">Distance: {{ distance }} km</div>
  </div>
  <script>
    var map = L.map('mapId');
    L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
      maxZoom: 19,
      attribution: '&copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a> contributors'
    }).addTo(map);

    var track = [{% for p in track %}[{{ p.latitude }}, {{ p.longitude }}]{% if not loop.last %},{% endif %}{% endfor %}];
    var polyline = L.polyline(track, {color: 'blue'}).addTo(map);

    var bounds = polyline.getBounds();
{% for m in markers %}
    L.marker([{{ m.latitude }}, {{ m.longitude }}])
        .addTo(map)
        .bindPopup("<img src='{{ m.thumbnail }}' class='popup-image'/><p><strong>{{ m.label }}</strong></p>");
    bounds.extend([{{ m.latitude }}, {{ m.longitude }}]);
{% endfor %}
{% for m in distance_markers %}
    L.marker([{{ m.latitude }}, {{ m.longitude }}], {
        icon: L.divIcon({ html: '<span class="km-label">{{ m.label }}</span>' })
    }).addTo(map);
{% endfor %}
    map.fitBounds(bounds, { padding: [20, 20] });
  </script>
</body>
</html>
"#;

pub struct MapRenderer {
    tera: Tera,
}

impl MapRenderer {
    pub fn new() -> Result<Self, Error> {
        let mut tera = Tera::default();
        tera.add_raw_template("map.html", MAP_TEMPLATE)?;
        // The context carries pre-built html fragments and js literals
        tera.autoescape_on(Vec::<&str>::new());

        Ok(Self { tera })
    }

    /// Render the page for one (track, markers) pair. Pure; the same input
    /// yields the same document.
    pub fn render(&self, track: &Track, markers: &[Marker]) -> Result<String, Error> {
        let mut context = Context::new();
        context.insert("track", &track.points);
        context.insert("markers", markers);
        context.insert("distance_markers", &track.distance_markers);
        context.insert("duration", &track.duration_display());
        context.insert("distance", &format!("{:.2}", track.distance_km));

        Ok(self.tera.render("map.html", &context)?)
    }

    /// Write the document, overwriting any previous page at `path`.
    pub fn write(&self, path: &str, html: &str) -> Result<(), Error> {
        fs::write(path, html).map_err(|source| Error::RenderWrite {
            path: path.to_string(),
            source,
        })
    }
}
