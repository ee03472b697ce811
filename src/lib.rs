mod config;
mod error;
mod marker;
mod photo;
mod render;
mod track;

pub use crate::config::Config;
pub use crate::error::Error;
pub use crate::marker::{DistanceMarker, Marker};
pub use crate::photo::{ExifTool, MetadataSource, PhotoRecord};
pub use crate::render::MapRenderer;
pub use crate::track::{Track, TrackPoint};

use log::info;

pub fn run(config: &Config) -> Result<(), Error> {
    run_with_source(config, &ExifTool::new())
}

// Single pass: read track, read metadata, correlate, render. Each stage
// runs to completion and any failure aborts before the output is touched.
pub fn run_with_source(config: &Config, source: &dyn MetadataSource) -> Result<(), Error> {
    let track = Track::from_gpx_file(&config.gpx_file)?;
    info!("parsed track with {} points, {:.2} km",
          track.points.len(), track.distance_km);

    let files = photo::discover(&config.image_dir);
    info!("found {} photos in {}", files.len(), config.image_dir);

    let records = source.lookup(&files)?;
    let markers = marker::from_photos(&records);
    info!("{} photos carry gps coordinates", markers.len());

    let renderer = MapRenderer::new()?;
    let html = renderer.render(&track, &markers)?;
    renderer.write(&config.output, &html)?;
    info!("wrote map page to {}", config.output);

    Ok(())
}
