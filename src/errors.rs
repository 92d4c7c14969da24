pub type Result<T> = std::result::Result<T, RastercalcError>;

#[derive(thiserror::Error, Debug)]
pub enum RastercalcError {
    #[error("Band {band:?} not found, raster has {available:?}")]
    BandNotFound { band: String, available: Vec<String> },
    #[error("Band {band:?} has shape {found:?}, expected {expected:?}")]
    ShapeMismatch {
        band: String,
        expected: Vec<usize>,
        found: Vec<usize>,
    },
    #[error("Band {0:?} already exists")]
    DuplicateBand(String),
    #[error("Band name can not be empty")]
    EmptyBandName,
    #[error("Raster has no bands to take a shape from")]
    EmptyRaster,
    #[error(transparent)]
    NdarrayError(#[from] ndarray::ShapeError),
}
