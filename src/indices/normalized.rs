use crate::{
    algebra::Expression,
    components::raster::Raster,
    errors::Result,
    indices::{output_name, NDVI, NDWI, SAVI},
};

/// Default soil brightness correction factor for SAVI.
pub const DEFAULT_SOIL_FACTOR: f64 = 0.5;

/// `(a - b) / (a + b)` appended as band `name`.
pub fn compute_normalized_difference(
    raster: &Raster,
    a: &str,
    b: &str,
    name: &str,
) -> Result<Raster> {
    raster.add_expression(name, &Expression::normalized_difference(a, b))
}

/// Normalized Difference Vegetation Index
///
/// `NDVI = (NIR - Red) / (NIR + Red)`
///
/// Appended as `name`, or `"NDVI"` when no name is given.
pub fn compute_ndvi(raster: &Raster, nir: &str, red: &str, name: Option<&str>) -> Result<Raster> {
    compute_normalized_difference(raster, nir, red, output_name(name, NDVI))
}

/// Normalized Difference Water Index (McFeeters)
///
/// `NDWI = (Green - NIR) / (Green + NIR)`
pub fn compute_ndwi(raster: &Raster, green: &str, nir: &str, name: Option<&str>) -> Result<Raster> {
    compute_normalized_difference(raster, green, nir, output_name(name, NDWI))
}

/// Soil Adjusted Vegetation Index
///
/// `SAVI = (1 + L) * (NIR - Red) / (NIR + Red + L)`
///
/// `l` is not range checked. With `l = 0` the result is NDVI.
pub fn compute_savi(
    raster: &Raster,
    nir: &str,
    red: &str,
    l: f64,
    name: Option<&str>,
) -> Result<Raster> {
    raster.add_expression(output_name(name, SAVI), &savi_expression(nir, red, l))
}

fn savi_expression(nir: &str, red: &str, l: f64) -> Expression {
    let (nir, red) = (Expression::band(nir), Expression::band(red));
    Expression::constant(1. + l) * (nir.clone() - red.clone()) / (nir + red + l)
}
