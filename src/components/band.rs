use std::fmt::Debug;

use ndarray::{ArcArray, Array, ArrayViewD, Dimension, IxDyn};

/// Named layer of a [Raster](crate::Raster).
///
/// Samples are kept in a shared array, so appending bands
/// to a raster never copies the bands it already has.
#[derive(Clone)]
pub struct Band {
    name: String,
    data: ArcArray<f64, IxDyn>,
}

impl Debug for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Band")
            .field("name", &self.name)
            .field("shape", &self.shape())
            .finish()
    }
}

impl Band {
    pub fn new<D: Dimension>(name: impl Into<String>, data: Array<f64, D>) -> Self {
        Self {
            name: name.into(),
            data: data.into_dyn().into_shared(),
        }
    }

    pub fn from_shared(name: impl Into<String>, data: ArcArray<f64, IxDyn>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn view(&self) -> ArrayViewD<'_, f64> {
        self.data.view()
    }

    pub(crate) fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: self.data.clone(),
        }
    }
}
