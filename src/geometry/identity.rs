//! The identity transform.

use super::{check_len, SpatialTransform};
use crate::error::Result;

/// Maps every point onto itself. Has no parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Identity<const D: usize>;

impl<const D: usize> SpatialTransform for Identity<D> {
    fn name_of_class(&self) -> &'static str {
        "IdentityTransform"
    }

    fn input_dimension(&self) -> usize {
        D
    }

    fn number_of_parameters(&self) -> usize {
        0
    }

    fn parameters(&self) -> Vec<f64> {
        Vec::new()
    }

    fn set_parameters(&mut self, parameters: &[f64]) -> Result<()> {
        check_len(self.name_of_class(), "parameters", parameters, 0)
    }

    fn fixed_parameters(&self) -> Vec<f64> {
        Vec::new()
    }

    fn set_fixed_parameters(&mut self, parameters: &[f64]) -> Result<()> {
        check_len(self.name_of_class(), "fixed parameters", parameters, 0)
    }

    fn transform_point(&self, point: &[f64]) -> Vec<f64> {
        assert_eq!(point.len(), D);
        point.to_vec()
    }
}
