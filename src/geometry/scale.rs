//! Scaling transforms.

use std::fmt;

use nalgebra::SVector;

use super::{check_len, format_values, SpatialTransform};
use crate::error::Result;

/// Scales every point about a center, with a factor per axis.
///
/// Parameters: the scale factors (`D` values). Fixed parameters: the center.
#[derive(Debug, Clone, PartialEq)]
pub struct Scale<const D: usize> {
    scale: SVector<f64, D>,
    center: SVector<f64, D>,
}

impl<const D: usize> Default for Scale<D> {
    fn default() -> Self {
        Scale {
            scale: SVector::repeat(1.0),
            center: SVector::zeros(),
        }
    }
}

impl<const D: usize> Scale<D> {
    /// The per-axis scale factors.
    pub fn scale(&self) -> &SVector<f64, D> {
        &self.scale
    }

    /// Replace the per-axis scale factors.
    pub fn set_scale(&mut self, scale: SVector<f64, D>) {
        self.scale = scale;
    }

    /// The center of scaling.
    pub fn center(&self) -> &SVector<f64, D> {
        &self.center
    }

    /// Replace the center of scaling.
    pub fn set_center(&mut self, center: SVector<f64, D>) {
        self.center = center;
    }

    fn map(&self, point: &[f64]) -> Vec<f64> {
        let p = SVector::<f64, D>::from_column_slice(point);
        ((p - self.center).component_mul(&self.scale) + self.center)
            .as_slice()
            .to_vec()
    }
}

impl<const D: usize> SpatialTransform for Scale<D> {
    fn name_of_class(&self) -> &'static str {
        "ScaleTransform"
    }

    fn input_dimension(&self) -> usize {
        D
    }

    fn number_of_parameters(&self) -> usize {
        D
    }

    fn parameters(&self) -> Vec<f64> {
        self.scale.as_slice().to_vec()
    }

    fn set_parameters(&mut self, parameters: &[f64]) -> Result<()> {
        check_len(self.name_of_class(), "parameters", parameters, D)?;
        self.scale = SVector::from_column_slice(parameters);
        Ok(())
    }

    fn fixed_parameters(&self) -> Vec<f64> {
        self.center.as_slice().to_vec()
    }

    fn set_fixed_parameters(&mut self, parameters: &[f64]) -> Result<()> {
        check_len(self.name_of_class(), "fixed parameters", parameters, D)?;
        self.center = SVector::from_column_slice(parameters);
        Ok(())
    }

    fn transform_point(&self, point: &[f64]) -> Vec<f64> {
        self.map(point)
    }

    fn print_self(&self, f: &mut fmt::Formatter, indent: usize) -> fmt::Result {
        let pad = indent * 2;
        writeln!(f, "{:pad$}Scale: {}", "", format_values(self.scale.as_slice()), pad = pad)?;
        writeln!(f, "{:pad$}Center: {}", "", format_values(self.center.as_slice()), pad = pad)
    }
}

/// A scale transform parameterized by the natural logarithm of its factors.
///
/// Parameters: `ln(scale)` per axis. Fixed parameters: the center.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleLogarithmic<const D: usize> {
    log_scale: SVector<f64, D>,
    inner: Scale<D>,
}

impl<const D: usize> Default for ScaleLogarithmic<D> {
    fn default() -> Self {
        ScaleLogarithmic {
            log_scale: SVector::zeros(),
            inner: Scale::default(),
        }
    }
}

impl<const D: usize> ScaleLogarithmic<D> {
    /// The per-axis scale factors (not their logarithm).
    pub fn scale(&self) -> &SVector<f64, D> {
        self.inner.scale()
    }
}

impl<const D: usize> SpatialTransform for ScaleLogarithmic<D> {
    fn name_of_class(&self) -> &'static str {
        "ScaleLogarithmicTransform"
    }

    fn input_dimension(&self) -> usize {
        D
    }

    fn number_of_parameters(&self) -> usize {
        D
    }

    fn parameters(&self) -> Vec<f64> {
        self.log_scale.as_slice().to_vec()
    }

    fn set_parameters(&mut self, parameters: &[f64]) -> Result<()> {
        check_len(self.name_of_class(), "parameters", parameters, D)?;
        self.log_scale = SVector::from_column_slice(parameters);
        self.inner.scale = self.log_scale.map(f64::exp);
        Ok(())
    }

    fn fixed_parameters(&self) -> Vec<f64> {
        self.inner.fixed_parameters()
    }

    fn set_fixed_parameters(&mut self, parameters: &[f64]) -> Result<()> {
        check_len(self.name_of_class(), "fixed parameters", parameters, D)?;
        self.inner.center = SVector::from_column_slice(parameters);
        Ok(())
    }

    fn transform_point(&self, point: &[f64]) -> Vec<f64> {
        self.inner.map(point)
    }

    fn print_self(&self, f: &mut fmt::Formatter, indent: usize) -> fmt::Result {
        self.inner.print_self(f, indent)
    }
}
