//! Spectral indices as band algebra over in-memory rasters.
//!
//! ```
//! use rastercalc::{compute_ndvi, Raster};
//!
//! let raster = Raster::constant(&[4], [("NIR", 1.), ("RED", 2.)])?;
//! let raster = compute_ndvi(&raster, "NIR", "RED", None)?;
//! assert_eq!(raster.band_names(), vec!["NIR", "RED", "NDVI"]);
//! # Ok::<(), rastercalc::RastercalcError>(())
//! ```

pub mod algebra;
mod components;
mod errors;
pub mod indices;

pub use algebra::Expression;
pub use components::{Band, Raster, RasterCollection};
pub use errors::{RastercalcError, Result};
pub use indices::{
    compute_ndvi, compute_ndwi, compute_normalized_difference, compute_savi,
    compute_tasseled_cap, IndexSpec, TasseledCapBands,
};
