use log::info;
use ndarray::{arr2, stack, Axis, IxDyn};

use crate::{
    components::{band::Band, raster::Raster},
    errors::Result,
};

/// Rows are brightness, greenness and wetness.
/// Columns follow [TasseledCapBands::ordered].
pub const TASSELED_CAP_COEFFICIENTS: [[f64; 6]; 3] = [
    [0.3037, 0.2793, 0.4743, 0.5585, 0.5082, 0.1863],
    [-0.2848, -0.2435, -0.5436, 0.7243, 0.0840, -0.1800],
    [0.1509, 0.1973, 0.3279, 0.3406, -0.7112, -0.4572],
];

pub const TASSELED_CAP_OUTPUTS: [&str; 3] = ["brightness", "greenness", "wetness"];

/// Band names read by the Tasseled Cap transform.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct TasseledCapBands {
    pub green: String,
    pub blue: String,
    pub red: String,
    pub nir: String,
    pub swir1: String,
    pub swir2: String,
}

impl TasseledCapBands {
    pub fn new(
        green: impl Into<String>,
        blue: impl Into<String>,
        red: impl Into<String>,
        nir: impl Into<String>,
        swir1: impl Into<String>,
        swir2: impl Into<String>,
    ) -> Self {
        Self {
            green: green.into(),
            blue: blue.into(),
            red: red.into(),
            nir: nir.into(),
            swir1: swir1.into(),
            swir2: swir2.into(),
        }
    }

    /// Names in coefficient column order.
    pub fn ordered(&self) -> [&str; 6] {
        [
            self.green.as_str(),
            self.blue.as_str(),
            self.red.as_str(),
            self.nir.as_str(),
            self.swir1.as_str(),
            self.swir2.as_str(),
        ]
    }
}

/// Tasseled Cap transform.
///
/// Every pixel's six band values are multiplied by [TASSELED_CAP_COEFFICIENTS],
/// the three components are appended as `"brightness"`, `"greenness"` and `"wetness"`.
pub fn compute_tasseled_cap(raster: &Raster, bands: &TasseledCapBands) -> Result<Raster> {
    let inputs = bands
        .ordered()
        .into_iter()
        .map(|name| raster.band(name))
        .collect::<Result<Vec<_>>>()?;
    for name in TASSELED_CAP_OUTPUTS {
        raster.check_vacant(name)?;
    }
    info!("tasseled cap over {:?}", bands.ordered());

    // Inputs share the raster shape.
    let shape = inputs[0].shape().to_vec();
    let pixels = shape.iter().product::<usize>();
    let views = inputs.iter().map(|band| band.view()).collect::<Vec<_>>();
    let flat = views
        .iter()
        .map(|view| view.to_shape(pixels))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let flat_views = flat.iter().map(|band| band.view()).collect::<Vec<_>>();
    let stacked = stack(Axis(0), &flat_views)?;

    let components = arr2(&TASSELED_CAP_COEFFICIENTS).dot(&stacked);
    let outputs = TASSELED_CAP_OUTPUTS
        .into_iter()
        .zip(components.outer_iter())
        .map(|(name, component)| -> Result<Band> {
            let data = component.to_owned().into_shape_with_order(IxDyn(&shape))?;
            Ok(Band::new(name, data))
        })
        .collect::<Result<Vec<_>>>()?;
    raster.add_bands(outputs)
}
