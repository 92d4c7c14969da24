pub mod band;
pub mod collection;
pub mod raster;

pub use band::Band;
pub use collection::RasterCollection;
pub use raster::Raster;
