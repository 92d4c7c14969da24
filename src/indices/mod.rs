//! Spectral indices built on [band algebra](crate::algebra).

mod normalized;
mod tasseled_cap;

pub use normalized::{
    compute_ndvi, compute_ndwi, compute_normalized_difference, compute_savi, DEFAULT_SOIL_FACTOR,
};
pub use tasseled_cap::{
    compute_tasseled_cap, TasseledCapBands, TASSELED_CAP_COEFFICIENTS, TASSELED_CAP_OUTPUTS,
};

use log::{debug, warn};

use crate::{components::raster::Raster, errors::Result};

pub const NDVI: &str = "NDVI";
pub const SAVI: &str = "SAVI";
pub const NDWI: &str = "NDWI";

/// Output band name, `default` only when none was given.
pub(crate) fn output_name<'a>(name: Option<&'a str>, default: &'static str) -> &'a str {
    name.unwrap_or(default)
}

fn default_soil_factor() -> f64 {
    DEFAULT_SOIL_FACTOR
}

/// One derived band computation.
///
/// Deserializes from maps tagged by `index`, e.g.
/// `{"index": "savi", "nir": "B8", "red": "B4", "l": 0.25}`.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(tag = "index", rename_all = "snake_case")]
pub enum IndexSpec {
    Ndvi {
        nir: String,
        red: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    Savi {
        nir: String,
        red: String,
        #[serde(default = "default_soil_factor")]
        l: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    Ndwi {
        green: String,
        nir: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    TasseledCap(TasseledCapBands),
}

impl IndexSpec {
    pub fn ndvi(nir: impl Into<String>, red: impl Into<String>) -> Self {
        Self::Ndvi {
            nir: nir.into(),
            red: red.into(),
            name: None,
        }
    }

    pub fn savi(nir: impl Into<String>, red: impl Into<String>) -> Self {
        Self::Savi {
            nir: nir.into(),
            red: red.into(),
            l: DEFAULT_SOIL_FACTOR,
            name: None,
        }
    }

    pub fn ndwi(green: impl Into<String>, nir: impl Into<String>) -> Self {
        Self::Ndwi {
            green: green.into(),
            nir: nir.into(),
            name: None,
        }
    }

    pub fn tasseled_cap(bands: TasseledCapBands) -> Self {
        Self::TasseledCap(bands)
    }

    /// Output band name. Tasseled Cap outputs are fixed and keep their names.
    pub fn named(mut self, output: impl Into<String>) -> Self {
        let output = output.into();
        match &mut self {
            Self::Ndvi { name, .. } | Self::Savi { name, .. } | Self::Ndwi { name, .. } => {
                *name = Some(output)
            }
            Self::TasseledCap(_) => warn!(
                "tasseled cap outputs are always {TASSELED_CAP_OUTPUTS:?}, ignoring {output:?}"
            ),
        }
        self
    }

    /// SAVI soil brightness factor, ignored by other indices.
    pub fn with_soil_factor(mut self, soil_factor: f64) -> Self {
        match &mut self {
            Self::Savi { l, .. } => *l = soil_factor,
            other => warn!("{other:?} has no soil factor, ignoring {soil_factor}"),
        }
        self
    }

    pub fn input_bands(&self) -> Vec<&str> {
        match self {
            Self::Ndvi { nir, red, .. } | Self::Savi { nir, red, .. } => {
                vec![nir.as_str(), red.as_str()]
            }
            Self::Ndwi { green, nir, .. } => vec![green.as_str(), nir.as_str()],
            Self::TasseledCap(bands) => bands.ordered().to_vec(),
        }
    }

    pub fn output_bands(&self) -> Vec<&str> {
        match self {
            Self::Ndvi { name, .. } => vec![output_name(name.as_deref(), NDVI)],
            Self::Savi { name, .. } => vec![output_name(name.as_deref(), SAVI)],
            Self::Ndwi { name, .. } => vec![output_name(name.as_deref(), NDWI)],
            Self::TasseledCap(_) => TASSELED_CAP_OUTPUTS.to_vec(),
        }
    }

    /// New raster with this index's bands appended to `raster`.
    pub fn apply(&self, raster: &Raster) -> Result<Raster> {
        debug!("applying {self:?} to {raster:?}");
        match self {
            Self::Ndvi { nir, red, name } => compute_ndvi(raster, nir, red, name.as_deref()),
            Self::Savi { nir, red, l, name } => compute_savi(raster, nir, red, *l, name.as_deref()),
            Self::Ndwi { green, nir, name } => compute_ndwi(raster, green, nir, name.as_deref()),
            Self::TasseledCap(bands) => compute_tasseled_cap(raster, bands),
        }
    }

    /// Pure function form of [IndexSpec::apply].
    ///
    /// Suits [RasterCollection::map](crate::RasterCollection::map).
    pub fn calculator(self) -> impl Fn(&Raster) -> Result<Raster> + Send + Sync + Clone {
        move |raster| self.apply(raster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{components::collection::RasterCollection, errors::RastercalcError};
    use rstest::rstest;

    fn landsat_bands() -> TasseledCapBands {
        TasseledCapBands::new("B2", "B1", "B3", "B4", "B5", "B7")
    }

    #[rstest]
    #[case(IndexSpec::ndvi("NIR", "RED"), vec!["NDVI"])]
    #[case(IndexSpec::savi("NIR", "RED"), vec!["SAVI"])]
    #[case(IndexSpec::ndwi("GREEN", "NIR"), vec!["NDWI"])]
    #[case(IndexSpec::ndvi("NIR", "RED").named("veg"), vec!["veg"])]
    #[case(IndexSpec::tasseled_cap(landsat_bands()), TASSELED_CAP_OUTPUTS.to_vec())]
    #[case(IndexSpec::tasseled_cap(landsat_bands()).named("tc"), TASSELED_CAP_OUTPUTS.to_vec())]
    fn output_bands(#[case] spec: IndexSpec, #[case] expected: Vec<&str>) {
        assert_eq!(spec.output_bands(), expected);
    }

    #[rstest]
    fn input_bands_in_read_order() {
        assert_eq!(IndexSpec::ndwi("B3", "B8").input_bands(), vec!["B3", "B8"]);
        assert_eq!(
            IndexSpec::tasseled_cap(landsat_bands()).input_bands(),
            vec!["B2", "B1", "B3", "B4", "B5", "B7"]
        );
    }

    #[rstest]
    fn soil_factor_only_for_savi() {
        assert_eq!(
            IndexSpec::savi("NIR", "RED").with_soil_factor(0.),
            IndexSpec::Savi {
                nir: "NIR".into(),
                red: "RED".into(),
                l: 0.,
                name: None
            }
        );
        assert_eq!(
            IndexSpec::ndvi("NIR", "RED").with_soil_factor(0.),
            IndexSpec::ndvi("NIR", "RED")
        );
    }

    #[test_log::test]
    fn loads_from_config() {
        let config = r#"[
            {"index": "ndvi", "nir": "B8", "red": "B4"},
            {"index": "savi", "nir": "B8", "red": "B4", "name": "SAVI_25", "l": 0.25},
            {"index": "savi", "nir": "B8", "red": "B4"},
            {"index": "ndwi", "green": "B3", "nir": "B8"},
            {"index": "tasseled_cap", "green": "B3", "blue": "B2", "red": "B4",
             "nir": "B8", "swir1": "B11", "swir2": "B12"}
        ]"#;
        let specs: Vec<IndexSpec> = serde_json::from_str(config).unwrap();
        assert_eq!(
            specs,
            vec![
                IndexSpec::ndvi("B8", "B4"),
                IndexSpec::savi("B8", "B4")
                    .with_soil_factor(0.25)
                    .named("SAVI_25"),
                IndexSpec::savi("B8", "B4"),
                IndexSpec::ndwi("B3", "B8"),
                IndexSpec::tasseled_cap(TasseledCapBands::new(
                    "B3", "B2", "B4", "B8", "B11", "B12"
                )),
            ]
        );

        let raster = Raster::constant(
            &[4, 4],
            [
                ("B2", 0.1),
                ("B3", 0.2),
                ("B4", 0.3),
                ("B8", 0.4),
                ("B11", 0.5),
                ("B12", 0.6),
            ],
        )
        .unwrap();
        let result = specs
            .iter()
            .try_fold(raster, |raster, spec| spec.apply(&raster))
            .unwrap();
        assert_eq!(
            &result.band_names()[6..],
            &["NDVI", "SAVI_25", "SAVI", "NDWI", "brightness", "greenness", "wetness"]
        );
    }

    #[test_log::test]
    fn calculator_maps_collection() {
        let calculator = IndexSpec::ndvi("NIR", "RED").calculator();
        let collection: RasterCollection = (1..4)
            .map(|_| Raster::constant(&[1], [("NIR", 1.), ("RED", 2.)]).unwrap())
            .collect();
        let mapped = collection.map(&calculator).unwrap().select(&[NDVI]).unwrap();
        assert_eq!(mapped.len(), 3);
        for raster in mapped.iter() {
            assert_eq!(raster.band_names(), vec![NDVI]);
            let value = raster.band(NDVI).unwrap().view()[[0]];
            assert!((value + 1. / 3.).abs() < 1e-12);
        }
    }

    #[test_log::test]
    fn calculator_fails_on_missing_band() {
        let calculator = IndexSpec::savi("NIR", "RED").calculator();
        let raster = Raster::constant(&[1], [("NIR", 1.)]).unwrap();
        assert!(matches!(
            calculator(&raster),
            Err(RastercalcError::BandNotFound { .. })
        ));
    }
}
