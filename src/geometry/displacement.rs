//! Dense displacement field transform.

use std::fmt;

use nalgebra::{SMatrix, SVector};
use ndarray::Array2;

use super::{check_len, format_values, SpatialTransform};
use crate::error::{Result, TransformError};
use crate::util::number_of_pixels;

/// A transform adding a displacement vector, sampled on a regular grid and
/// linearly interpolated, to each point. Points outside the grid are left
/// unchanged.
///
/// Parameters: the displacement vectors, one row per grid node with the
/// first axis varying fastest (`size.product() * D` values).
/// Fixed parameters: `size`, `origin`, `spacing` and the direction matrix in
/// row-major order (`D * (D + 3)` values).
#[derive(Debug, Clone, PartialEq)]
pub struct DisplacementField<const D: usize> {
    size: [usize; D],
    origin: SVector<f64, D>,
    spacing: SVector<f64, D>,
    direction: SMatrix<f64, D, D>,
    field: Array2<f64>,
}

impl<const D: usize> Default for DisplacementField<D> {
    fn default() -> Self {
        DisplacementField {
            size: [0; D],
            origin: SVector::zeros(),
            spacing: SVector::repeat(1.0),
            direction: SMatrix::identity(),
            field: Array2::zeros((0, D)),
        }
    }
}

impl<const D: usize> DisplacementField<D> {
    /// Build a displacement field from its grid geometry and vectors.
    /// The field is taken as is, without copying.
    ///
    /// # Errors
    ///
    /// - `TransformError::InvalidArgument` if the field does not hold one
    /// `D`-vector per grid node, or if the grid is too large.
    pub fn from_parts(
        size: [usize; D],
        origin: SVector<f64, D>,
        spacing: SVector<f64, D>,
        direction: SMatrix<f64, D, D>,
        field: Array2<f64>,
    ) -> Result<Self> {
        let nodes = number_of_pixels(&size, D)?;
        if field.dim() != (nodes, D) {
            return Err(TransformError::InvalidArgument(format!(
                "displacement field of shape {:?} does not match a grid of {:?} with {} components",
                field.dim(),
                size,
                D
            )));
        }
        Ok(DisplacementField {
            size,
            origin,
            spacing,
            direction,
            field,
        })
    }

    /// Number of grid nodes along each axis.
    pub fn size(&self) -> &[usize; D] {
        &self.size
    }

    /// Physical position of the first grid node.
    pub fn origin(&self) -> &SVector<f64, D> {
        &self.origin
    }

    /// Distance between grid nodes along each axis.
    pub fn spacing(&self) -> &SVector<f64, D> {
        &self.spacing
    }

    /// Orientation of the grid axes.
    pub fn direction(&self) -> &SMatrix<f64, D, D> {
        &self.direction
    }

    /// The displacement vectors, one row per grid node.
    pub fn field(&self) -> &Array2<f64> {
        &self.field
    }

    fn linear_index(&self, index: &[usize; D]) -> usize {
        let mut linear = 0;
        let mut stride = 1;
        for (i, s) in index.iter().zip(&self.size) {
            linear += i * stride;
            stride *= s;
        }
        linear
    }

    /// Continuous grid index of a physical point, or `None` if the grid
    /// geometry is degenerate.
    fn continuous_index(&self, point: &SVector<f64, D>) -> Option<SVector<f64, D>> {
        let index_to_physical = self.direction * SMatrix::from_diagonal(&self.spacing);
        let physical_to_index = index_to_physical.try_inverse()?;
        Some(physical_to_index * (point - self.origin))
    }

    /// Linearly interpolated displacement at a physical point, or `None`
    /// outside of the grid.
    fn displacement(&self, point: &SVector<f64, D>) -> Option<SVector<f64, D>> {
        let cindex = self.continuous_index(point)?;
        let mut base = [0usize; D];
        let mut frac = [0.0f64; D];
        for axis in 0..D {
            let c = cindex[axis];
            let last = self.size[axis].checked_sub(1)? as f64;
            if !(c >= 0.0 && c <= last) {
                return None;
            }
            let floor = c.floor();
            base[axis] = floor as usize;
            frac[axis] = c - floor;
        }

        let mut value = SVector::<f64, D>::zeros();
        for corner in 0..(1usize << D) {
            let mut weight = 1.0;
            let mut index = base;
            for axis in 0..D {
                if corner & (1 << axis) != 0 {
                    weight *= frac[axis];
                    index[axis] = (index[axis] + 1).min(self.size[axis] - 1);
                } else {
                    weight *= 1.0 - frac[axis];
                }
            }
            if weight == 0.0 {
                continue;
            }
            let row = self.field.row(self.linear_index(&index));
            for axis in 0..D {
                value[axis] += weight * row[axis];
            }
        }
        Some(value)
    }
}

impl<const D: usize> SpatialTransform for DisplacementField<D> {
    fn name_of_class(&self) -> &'static str {
        "DisplacementFieldTransform"
    }

    fn input_dimension(&self) -> usize {
        D
    }

    fn number_of_parameters(&self) -> usize {
        self.field.len()
    }

    fn parameters(&self) -> Vec<f64> {
        self.field.iter().cloned().collect()
    }

    fn set_parameters(&mut self, parameters: &[f64]) -> Result<()> {
        check_len(self.name_of_class(), "parameters", parameters, self.field.len())?;
        for (v, p) in self.field.iter_mut().zip(parameters) {
            *v = *p;
        }
        Ok(())
    }

    fn fixed_parameters(&self) -> Vec<f64> {
        let mut p = Vec::with_capacity(D * (D + 3));
        p.extend(self.size.iter().map(|s| *s as f64));
        p.extend(self.origin.iter());
        p.extend(self.spacing.iter());
        for row in self.direction.row_iter() {
            p.extend(row.iter());
        }
        p
    }

    fn set_fixed_parameters(&mut self, parameters: &[f64]) -> Result<()> {
        check_len(self.name_of_class(), "fixed parameters", parameters, D * (D + 3))?;
        let mut size = [0usize; D];
        for (s, p) in size.iter_mut().zip(&parameters[..D]) {
            if !(*p >= 0.0 && *p <= usize::MAX as f64) || p.fract() != 0.0 {
                return Err(TransformError::InvalidArgument(format!(
                    "displacement field size must hold non-negative integers, got {}",
                    p
                )));
            }
            *s = *p as usize;
        }
        if size != self.size {
            let nodes = number_of_pixels(&size, D)?;
            self.field = Array2::zeros((nodes, D));
            self.size = size;
        }
        self.origin = SVector::from_column_slice(&parameters[D..2 * D]);
        self.spacing = SVector::from_column_slice(&parameters[2 * D..3 * D]);
        self.direction = SMatrix::from_row_slice(&parameters[3 * D..]);
        Ok(())
    }

    fn transform_point(&self, point: &[f64]) -> Vec<f64> {
        let p = SVector::<f64, D>::from_column_slice(point);
        match self.displacement(&p) {
            Some(d) => (p + d).as_slice().to_vec(),
            None => point.to_vec(),
        }
    }

    fn print_self(&self, f: &mut fmt::Formatter, indent: usize) -> fmt::Result {
        let pad = indent * 2;
        writeln!(f, "{:pad$}Size: {:?}", "", self.size, pad = pad)?;
        writeln!(f, "{:pad$}Origin: {}", "", format_values(self.origin.as_slice()), pad = pad)?;
        writeln!(f, "{:pad$}Spacing: {}", "", format_values(self.spacing.as_slice()), pad = pad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn ramp() -> DisplacementField<2> {
        // 2x2 grid, displacement along x equal to the node's x index
        let field = Array2::from_shape_vec((4, 2), vec![0., 0., 1., 0., 0., 0., 1., 0.]).unwrap();
        DisplacementField::from_parts(
            [2, 2],
            SVector::zeros(),
            SVector::repeat(1.0),
            SMatrix::identity(),
            field,
        )
        .unwrap()
    }

    #[test]
    fn interpolates_inside_grid() {
        let t = ramp();
        let p = t.transform_point(&[0.5, 0.5]);
        assert_abs_diff_eq!(p[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p[1], 0.5, epsilon = 1e-12);
        assert_eq!(t.transform_point(&[1., 1.]), vec![2., 1.]);
    }

    #[test]
    fn outside_grid_is_unchanged() {
        let t = ramp();
        assert_eq!(t.transform_point(&[3., 0.]), vec![3., 0.]);
        assert_eq!(t.transform_point(&[-0.5, 0.]), vec![-0.5, 0.]);
    }

    #[test]
    fn fixed_parameters_layout() {
        let mut t = ramp();
        assert_eq!(
            t.fixed_parameters(),
            vec![2., 2., 0., 0., 1., 1., 1., 0., 0., 1.]
        );
        assert_eq!(t.number_of_parameters(), 8);
        t.set_fixed_parameters(&[3., 1., 0., 0., 1., 1., 1., 0., 0., 1.]).unwrap();
        assert_eq!(t.number_of_parameters(), 6);
        assert_eq!(t.parameters(), vec![0.; 6]);
        assert!(t.set_fixed_parameters(&[-1., 1., 0., 0., 1., 1., 1., 0., 0., 1.]).is_err());
    }

    #[test]
    fn degenerate_grid_is_unchanged() {
        let mut t = ramp();
        t.set_fixed_parameters(&[2., 2., 0., 0., 0., 1., 1., 0., 0., 1.]).unwrap();
        assert_eq!(t.transform_point(&[0.5, 0.5]), vec![0.5, 0.5]);
        t.set_fixed_parameters(&[2., 2., 0., 0., 1., 1., 1., 1., 1., 1.]).unwrap();
        assert_eq!(t.transform_point(&[0.5, 0.5]), vec![0.5, 0.5]);
    }

    #[test]
    fn oversized_grid_is_rejected() {
        let mut t = ramp();
        let r = t.set_fixed_parameters(&[1e10, 1e10, 0., 0., 1., 1., 1., 0., 0., 1.]);
        match r {
            Err(TransformError::InvalidArgument(_)) => {}
            other => panic!("unexpected result {:?}", other),
        }
        assert_eq!(t.size(), &[2, 2]);
        assert!(t.set_fixed_parameters(&[1e300, 1., 0., 0., 1., 1., 1., 0., 0., 1.]).is_err());
    }

    #[test]
    fn mismatched_field_is_rejected() {
        let field = Array2::zeros((3, 2));
        let r = DisplacementField::<2>::from_parts(
            [2, 2],
            SVector::zeros(),
            SVector::repeat(1.0),
            SMatrix::identity(),
            field,
        );
        assert!(r.is_err());
    }
}
