//! Declarative band algebra.
//!
//! An [Expression] only describes a per-pixel computation over named bands.
//! [Expression::evaluate] runs it on an in-memory [Raster], but the same tree
//! can be serialized and handed to any other evaluator.

use itertools::Itertools;
use log::{info, trace};
use ndarray::{ArrayD, ArrayViewD, IxDyn, Zip};
use std::{
    collections::HashMap,
    fmt::Display,
    ops::{Add, Div, Mul, Neg, Sub},
};

use crate::{
    components::{band::Band, raster::Raster},
    errors::{RastercalcError, Result},
};

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Expression {
    Band(String),
    Constant(f64),
    Add(Box<Expression>, Box<Expression>),
    Subtract(Box<Expression>, Box<Expression>),
    Multiply(Box<Expression>, Box<Expression>),
    Divide(Box<Expression>, Box<Expression>),
    Negate(Box<Expression>),
}

impl Expression {
    pub fn band(name: impl Into<String>) -> Self {
        Self::Band(name.into())
    }

    pub fn constant(value: f64) -> Self {
        Self::Constant(value)
    }

    /// `(a - b) / (a + b)`
    pub fn normalized_difference(a: impl Into<String>, b: impl Into<String>) -> Self {
        let (a, b) = (Self::band(a), Self::band(b));
        (a.clone() - b.clone()) / (a + b)
    }

    /// Names of the bands read, in order of first appearance.
    pub fn band_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_band_names(&mut names);
        names.into_iter().unique().collect()
    }

    fn collect_band_names<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Self::Band(name) => names.push(name),
            Self::Constant(_) => (),
            Self::Add(lhs, rhs)
            | Self::Subtract(lhs, rhs)
            | Self::Multiply(lhs, rhs)
            | Self::Divide(lhs, rhs) => {
                lhs.collect_band_names(names);
                rhs.collect_band_names(names);
            }
            Self::Negate(operand) => operand.collect_band_names(names),
        }
    }

    /// Evaluate per pixel over `raster`.
    ///
    /// Every referenced band is resolved before any arithmetic runs.
    /// Division follows IEEE 754, a zero denominator gives NaN or ±inf.
    pub fn evaluate(&self, raster: &Raster) -> Result<ArrayD<f64>> {
        let bands = self
            .band_names()
            .into_iter()
            .map(|name| raster.band(name).map(|band| (name, band.view())))
            .collect::<Result<HashMap<_, _>>>()?;
        match self.evaluate_with(&bands) {
            Evaluated::Array(array) => Ok(array),
            Evaluated::Scalar(value) => {
                let shape = raster.shape().ok_or(RastercalcError::EmptyRaster)?;
                Ok(ArrayD::from_elem(IxDyn(shape), value))
            }
        }
    }

    fn evaluate_with(&self, bands: &HashMap<&str, ArrayViewD<f64>>) -> Evaluated {
        match self {
            // Names were resolved by the caller.
            Self::Band(name) => Evaluated::Array(bands[name.as_str()].to_owned()),
            Self::Constant(value) => Evaluated::Scalar(*value),
            Self::Add(lhs, rhs) => Self::binary(lhs, rhs, bands, |lhs, rhs| lhs + rhs),
            Self::Subtract(lhs, rhs) => Self::binary(lhs, rhs, bands, |lhs, rhs| lhs - rhs),
            Self::Multiply(lhs, rhs) => Self::binary(lhs, rhs, bands, |lhs, rhs| lhs * rhs),
            Self::Divide(lhs, rhs) => Self::binary(lhs, rhs, bands, |lhs, rhs| lhs / rhs),
            Self::Negate(operand) => match operand.evaluate_with(bands) {
                Evaluated::Scalar(value) => Evaluated::Scalar(-value),
                Evaluated::Array(mut array) => {
                    array.mapv_inplace(|value| -value);
                    Evaluated::Array(array)
                }
            },
        }
    }

    fn binary(
        lhs: &Expression,
        rhs: &Expression,
        bands: &HashMap<&str, ArrayViewD<f64>>,
        op: fn(f64, f64) -> f64,
    ) -> Evaluated {
        Evaluated::combine(lhs.evaluate_with(bands), rhs.evaluate_with(bands), op)
    }
}

/// Intermediate value, constants are only broadcast when they meet a band.
enum Evaluated {
    Scalar(f64),
    Array(ArrayD<f64>),
}

impl Evaluated {
    fn combine(lhs: Self, rhs: Self, op: fn(f64, f64) -> f64) -> Self {
        match (lhs, rhs) {
            (Self::Scalar(lhs), Self::Scalar(rhs)) => Self::Scalar(op(lhs, rhs)),
            (Self::Array(mut lhs), Self::Scalar(rhs)) => {
                lhs.mapv_inplace(|value| op(value, rhs));
                Self::Array(lhs)
            }
            (Self::Scalar(lhs), Self::Array(mut rhs)) => {
                rhs.mapv_inplace(|value| op(lhs, value));
                Self::Array(rhs)
            }
            (Self::Array(mut lhs), Self::Array(rhs)) => {
                Zip::from(&mut lhs)
                    .and(&rhs)
                    .for_each(|lhs, &rhs| *lhs = op(*lhs, rhs));
                Self::Array(lhs)
            }
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Band(name) => write!(f, "{name}"),
            Self::Constant(value) => write!(f, "{value}"),
            Self::Add(lhs, rhs) => write!(f, "({lhs} + {rhs})"),
            Self::Subtract(lhs, rhs) => write!(f, "({lhs} - {rhs})"),
            Self::Multiply(lhs, rhs) => write!(f, "({lhs} * {rhs})"),
            Self::Divide(lhs, rhs) => write!(f, "({lhs} / {rhs})"),
            Self::Negate(operand) => write!(f, "-{operand}"),
        }
    }
}

impl From<f64> for Expression {
    fn from(value: f64) -> Self {
        Self::Constant(value)
    }
}

impl From<&str> for Expression {
    fn from(value: &str) -> Self {
        Self::band(value)
    }
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $variant:ident) => {
        impl<R: Into<Expression>> $trait<R> for Expression {
            type Output = Expression;

            fn $method(self, rhs: R) -> Expression {
                Expression::$variant(Box::new(self), Box::new(rhs.into()))
            }
        }
    };
}

impl_binary_op!(Add, add, Add);
impl_binary_op!(Sub, sub, Subtract);
impl_binary_op!(Mul, mul, Multiply);
impl_binary_op!(Div, div, Divide);

impl Neg for Expression {
    type Output = Expression;

    fn neg(self) -> Expression {
        Expression::Negate(Box::new(self))
    }
}

impl Raster {
    /// New raster with `expression` evaluated into a band called `name`.
    pub fn add_expression(&self, name: &str, expression: &Expression) -> Result<Raster> {
        self.check_vacant(name)?;
        info!("adding band {name} = {expression}");
        let data = expression.evaluate(self)?;
        trace!("evaluated {name} with shape {:?}", data.shape());
        self.add_bands([Band::new(name, data)])
    }
}
