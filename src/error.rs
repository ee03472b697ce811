use thiserror::Error;

/// Everything that can abort a run. Per-photo missing coordinates are not
/// errors; those records are simply dropped by the correlator.
#[derive(Debug, Error)]
pub enum Error {
    #[error("could not parse track file '{path}': {reason}")]
    TrackParse { path: String, reason: String },

    #[error("metadata service failed: {0}")]
    MetadataService(String),

    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("could not write map page '{path}': {source}")]
    RenderWrite {
        path: String,
        source: std::io::Error,
    },
}
