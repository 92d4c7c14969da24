use log::debug;
use ndarray::{ArrayD, IxDyn};
use std::fmt::Debug;

use crate::{
    components::band::Band,
    errors::{RastercalcError, Result},
};

/// Ordered collection of named bands that share one shape.
///
/// Rasters are never modified in place, every operation
/// returns a new raster that shares the untouched band arrays.
#[derive(Clone, Default)]
pub struct Raster {
    bands: Vec<Band>,
}

impl Debug for Raster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let f = &mut f.debug_struct("Raster");
        f.field("shape", &self.shape())
            .field("bands", &self.band_names())
            .finish()
    }
}

impl Raster {
    fn init(bands: Vec<Band>) -> Self {
        let raster = Self { bands };
        debug!("new {raster:?}");
        raster
    }

    pub fn new(bands: impl IntoIterator<Item = Band>) -> Result<Self> {
        Self::default().add_bands(bands)
    }

    /// Raster where every band is filled with a single value.
    pub fn constant<N: Into<String>>(
        shape: &[usize],
        bands: impl IntoIterator<Item = (N, f64)>,
    ) -> Result<Self> {
        Self::new(
            bands
                .into_iter()
                .map(|(name, value)| Band::new(name, ArrayD::from_elem(IxDyn(shape), value))),
        )
    }

    /// Shape shared by all bands, `None` for a raster without bands.
    pub fn shape(&self) -> Option<&[usize]> {
        self.bands.first().map(Band::shape)
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    pub fn bands(&self) -> impl Iterator<Item = &Band> {
        self.bands.iter()
    }

    pub fn band_names(&self) -> Vec<&str> {
        self.bands.iter().map(Band::name).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bands.iter().any(|band| band.name() == name)
    }

    pub fn band(&self, name: &str) -> Result<&Band> {
        self.bands
            .iter()
            .find(|band| band.name() == name)
            .ok_or_else(|| RastercalcError::BandNotFound {
                band: name.into(),
                available: self.band_names().into_iter().map(String::from).collect(),
            })
    }

    /// New raster holding only `names`, in the given order.
    pub fn select(&self, names: &[&str]) -> Result<Self> {
        let bands = names
            .iter()
            .map(|name| self.band(name).cloned())
            .collect::<Result<Vec<_>>>()?;
        Self::new(bands)
    }

    pub fn rename(&self, from: &str, to: &str) -> Result<Self> {
        self.band(from)?;
        if from == to {
            return Ok(self.clone());
        }
        self.check_vacant(to)?;
        let bands = self
            .bands
            .iter()
            .map(|band| {
                if band.name() == from {
                    band.renamed(to)
                } else {
                    band.clone()
                }
            })
            .collect();
        Ok(Self::init(bands))
    }

    /// New raster with `bands` appended after the existing ones.
    pub fn add_bands(&self, bands: impl IntoIterator<Item = Band>) -> Result<Self> {
        let mut raster_bands = self.bands.clone();
        for band in bands {
            let shape = raster_bands.first().map(Band::shape);
            check_name(&raster_bands, band.name())?;
            if let Some(shape) = shape.filter(|shape| *shape != band.shape()) {
                return Err(RastercalcError::ShapeMismatch {
                    band: band.name().into(),
                    expected: shape.to_vec(),
                    found: band.shape().to_vec(),
                });
            }
            raster_bands.push(band);
        }
        Ok(Self::init(raster_bands))
    }

    pub fn concat(&self, other: &Raster) -> Result<Self> {
        self.add_bands(other.bands().cloned())
    }

    /// Fails if `name` can not be used for a new band of this raster.
    pub(crate) fn check_vacant(&self, name: &str) -> Result<()> {
        check_name(&self.bands, name)
    }
}

fn check_name(bands: &[Band], name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(RastercalcError::EmptyBandName);
    }
    if bands.iter().any(|band| band.name() == name) {
        return Err(RastercalcError::DuplicateBand(name.into()));
    }
    Ok(())
}
