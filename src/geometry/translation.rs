//! The translation transform.

use std::fmt;

use nalgebra::SVector;

use super::{check_len, format_values, SpatialTransform};
use crate::error::Result;

/// Translates every point by a fixed offset.
///
/// Parameters: the offset (`D` values). No fixed parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Translation<const D: usize> {
    offset: SVector<f64, D>,
}

impl<const D: usize> Default for Translation<D> {
    fn default() -> Self {
        Translation {
            offset: SVector::zeros(),
        }
    }
}

impl<const D: usize> Translation<D> {
    /// Create a translation by the given offset.
    pub fn new(offset: SVector<f64, D>) -> Self {
        Translation { offset }
    }

    /// The translation offset.
    pub fn offset(&self) -> &SVector<f64, D> {
        &self.offset
    }

    /// Replace the translation offset.
    pub fn set_offset(&mut self, offset: SVector<f64, D>) {
        self.offset = offset;
    }
}

impl<const D: usize> SpatialTransform for Translation<D> {
    fn name_of_class(&self) -> &'static str {
        "TranslationTransform"
    }

    fn input_dimension(&self) -> usize {
        D
    }

    fn number_of_parameters(&self) -> usize {
        D
    }

    fn parameters(&self) -> Vec<f64> {
        self.offset.as_slice().to_vec()
    }

    fn set_parameters(&mut self, parameters: &[f64]) -> Result<()> {
        check_len(self.name_of_class(), "parameters", parameters, D)?;
        self.offset = SVector::from_column_slice(parameters);
        Ok(())
    }

    fn fixed_parameters(&self) -> Vec<f64> {
        Vec::new()
    }

    fn set_fixed_parameters(&mut self, parameters: &[f64]) -> Result<()> {
        check_len(self.name_of_class(), "fixed parameters", parameters, 0)
    }

    fn transform_point(&self, point: &[f64]) -> Vec<f64> {
        let p = SVector::<f64, D>::from_column_slice(point);
        (p + self.offset).as_slice().to_vec()
    }

    fn print_self(&self, f: &mut fmt::Formatter, indent: usize) -> fmt::Result {
        writeln!(
            f,
            "{:pad$}Offset: {}",
            "",
            format_values(self.offset.as_slice()),
            pad = indent * 2
        )
    }
}
