use log::info;
use rayon::prelude::*;
use shrinkwraprs::Shrinkwrap;

use crate::{components::raster::Raster, errors::Result};

/// Ordered sequence of independent rasters.
#[derive(Shrinkwrap, Clone, Debug, Default)]
pub struct RasterCollection(Vec<Raster>);

impl From<Vec<Raster>> for RasterCollection {
    fn from(value: Vec<Raster>) -> Self {
        Self(value)
    }
}

impl FromIterator<Raster> for RasterCollection {
    fn from_iter<I: IntoIterator<Item = Raster>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for RasterCollection {
    type Item = Raster;
    type IntoIter = std::vec::IntoIter<Raster>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl RasterCollection {
    /// Apply `f` to every raster in parallel.
    ///
    /// Output keeps the input order. Fails as a whole on the first error.
    pub fn map<F>(&self, f: F) -> Result<Self>
    where
        F: Fn(&Raster) -> Result<Raster> + Sync + Send,
    {
        info!("mapping over {} rasters", self.0.len());
        self.0
            .par_iter()
            .map(f)
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }

    pub fn select(&self, names: &[&str]) -> Result<Self> {
        self.map(|raster| raster.select(names))
    }

    pub fn into_inner(self) -> Vec<Raster> {
        self.0
    }
}
