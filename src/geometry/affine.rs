//! The affine transform.

use std::fmt;

use nalgebra::{SMatrix, SVector};

use super::{check_len, format_values, SpatialTransform};
use crate::error::Result;

/// General linear map about a center, followed by a translation:
/// `x ↦ M(x − c) + c + t`.
///
/// Parameters: the matrix in row-major order followed by the translation
/// (`D * (D + 1)` values). Fixed parameters: the center.
#[derive(Debug, Clone, PartialEq)]
pub struct Affine<const D: usize> {
    matrix: SMatrix<f64, D, D>,
    translation: SVector<f64, D>,
    center: SVector<f64, D>,
}

impl<const D: usize> Default for Affine<D> {
    fn default() -> Self {
        Affine {
            matrix: SMatrix::identity(),
            translation: SVector::zeros(),
            center: SVector::zeros(),
        }
    }
}

impl<const D: usize> Affine<D> {
    /// The linear part.
    pub fn matrix(&self) -> &SMatrix<f64, D, D> {
        &self.matrix
    }

    /// Replace the linear part.
    pub fn set_matrix(&mut self, matrix: SMatrix<f64, D, D>) {
        self.matrix = matrix;
    }

    /// The translation.
    pub fn translation(&self) -> &SVector<f64, D> {
        &self.translation
    }

    /// Replace the translation.
    pub fn set_translation(&mut self, translation: SVector<f64, D>) {
        self.translation = translation;
    }

    /// The center.
    pub fn center(&self) -> &SVector<f64, D> {
        &self.center
    }

    /// Replace the center.
    pub fn set_center(&mut self, center: SVector<f64, D>) {
        self.center = center;
    }
}

impl<const D: usize> SpatialTransform for Affine<D> {
    fn name_of_class(&self) -> &'static str {
        "AffineTransform"
    }

    fn input_dimension(&self) -> usize {
        D
    }

    fn number_of_parameters(&self) -> usize {
        D * (D + 1)
    }

    fn parameters(&self) -> Vec<f64> {
        let mut p = Vec::with_capacity(D * (D + 1));
        for row in self.matrix.row_iter() {
            p.extend(row.iter());
        }
        p.extend(self.translation.iter());
        p
    }

    fn set_parameters(&mut self, parameters: &[f64]) -> Result<()> {
        check_len(self.name_of_class(), "parameters", parameters, D * (D + 1))?;
        let (matrix, translation) = parameters.split_at(D * D);
        self.matrix = SMatrix::from_row_slice(matrix);
        self.translation = SVector::from_column_slice(translation);
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
        let p = SVector::<f64, D>::from_column_slice(point);
        (self.matrix * (p - self.center) + self.center + self.translation)
            .as_slice()
            .to_vec()
    }

    fn print_self(&self, f: &mut fmt::Formatter, indent: usize) -> fmt::Result {
        let pad = indent * 2;
        writeln!(f, "{:pad$}Matrix:", "", pad = pad)?;
        for row in self.matrix.row_iter() {
            let row: Vec<f64> = row.iter().cloned().collect();
            writeln!(f, "{:pad$}  {}", "", format_values(&row), pad = pad)?;
        }
        writeln!(
            f,
            "{:pad$}Translation: {}",
            "",
            format_values(self.translation.as_slice()),
            pad = pad
        )?;
        writeln!(f, "{:pad$}Center: {}", "", format_values(self.center.as_slice()), pad = pad)
    }
}
