//! The composite transform: an ordered queue of sub-transforms.

use std::fmt;

use super::{check_len, print_nested, AnyTransform, SpatialTransform};
use crate::error::{Result, TransformError};

/// An ordered queue of sub-transforms of dimension `D`.
///
/// Points are mapped by the most recently added transform first and by the
/// first added transform last. Each transform carries a to-optimize flag:
/// the parameters (and fixed parameters) of a composite are the
/// concatenation of those of the flagged transforms, most recently added
/// first.
#[derive(Debug, Clone, Default)]
pub struct Composite<const D: usize> {
    transforms: Vec<AnyTransform>,
    to_optimize: Vec<bool>,
}

impl<const D: usize> Composite<D> {
    /// Create an empty composite transform.
    pub fn new() -> Self {
        Composite {
            transforms: Vec::new(),
            to_optimize: Vec::new(),
        }
    }

    /// Append a transform to the back of the queue, flagged to be optimized.
    ///
    /// # Errors
    ///
    /// - `TransformError::InvalidArgument` if the transform's dimension is not `D`.
    pub fn add_transform(&mut self, transform: AnyTransform) -> Result<()> {
        if transform.input_dimension() != D || transform.output_dimension() != D {
            return Err(TransformError::InvalidArgument(format!(
                "cannot add a {}D {} to a {}D composite transform",
                transform.input_dimension(),
                transform.name_of_class(),
                D
            )));
        }
        self.transforms.push(transform);
        self.to_optimize.push(true);
        Ok(())
    }

    /// Number of transforms in the queue.
    pub fn number_of_transforms(&self) -> usize {
        self.transforms.len()
    }

    /// Whether the queue is empty.
    pub fn is_transform_queue_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Remove every transform from the queue.
    pub fn clear_transform_queue(&mut self) {
        self.transforms.clear();
        self.to_optimize.clear();
    }

    /// The transform at position `n` of the queue.
    pub fn nth_transform(&self, n: usize) -> Option<&AnyTransform> {
        self.transforms.get(n)
    }

    /// All transforms, in the order they were added.
    pub fn transforms(&self) -> &[AnyTransform] {
        &self.transforms
    }

    /// Whether the transform at position `n` is flagged to be optimized.
    pub fn nth_transform_to_optimize(&self, n: usize) -> bool {
        self.to_optimize.get(n).cloned().unwrap_or(false)
    }

    /// Flag (or unflag) the transform at position `n` to be optimized.
    /// Out of range positions are ignored.
    pub fn set_nth_transform_to_optimize(&mut self, n: usize, state: bool) {
        if let Some(flag) = self.to_optimize.get_mut(n) {
            *flag = state;
        }
    }

    /// Unflag every transform.
    pub fn set_all_transforms_to_optimize_off(&mut self) {
        for flag in &mut self.to_optimize {
            *flag = false;
        }
    }

    /// Flag only the most recently added transform.
    pub fn set_only_most_recent_transform_to_optimize_on(&mut self) {
        self.set_all_transforms_to_optimize_off();
        if let Some(flag) = self.to_optimize.last_mut() {
            *flag = true;
        }
    }

    /// Transforms flagged for optimization, most recently added first.
    fn active(&self) -> impl Iterator<Item = &AnyTransform> {
        self.transforms
            .iter()
            .zip(&self.to_optimize)
            .rev()
            .filter(|(_, flag)| **flag)
            .map(|(t, _)| t)
    }

    fn active_mut(&mut self) -> impl Iterator<Item = &mut AnyTransform> {
        self.transforms
            .iter_mut()
            .zip(&self.to_optimize)
            .rev()
            .filter(|(_, flag)| **flag)
            .map(|(t, _)| t)
    }

    fn number_of_fixed_parameters(&self) -> usize {
        self.active().map(|t| t.fixed_parameters().len()).sum()
    }
}

impl<const D: usize> SpatialTransform for Composite<D> {
    fn name_of_class(&self) -> &'static str {
        "CompositeTransform"
    }

    fn input_dimension(&self) -> usize {
        D
    }

    fn number_of_parameters(&self) -> usize {
        self.active().map(|t| t.number_of_parameters()).sum()
    }

    fn parameters(&self) -> Vec<f64> {
        self.active().flat_map(|t| t.parameters()).collect()
    }

    fn set_parameters(&mut self, parameters: &[f64]) -> Result<()> {
        let expected = self.number_of_parameters();
        check_len(self.name_of_class(), "parameters", parameters, expected)?;
        let mut offset = 0;
        for t in self.active_mut() {
            let n = t.number_of_parameters();
            t.set_parameters(&parameters[offset..offset + n])?;
            offset += n;
        }
        Ok(())
    }

    fn fixed_parameters(&self) -> Vec<f64> {
        self.active().flat_map(|t| t.fixed_parameters()).collect()
    }

    fn set_fixed_parameters(&mut self, parameters: &[f64]) -> Result<()> {
        let expected = self.number_of_fixed_parameters();
        check_len(self.name_of_class(), "fixed parameters", parameters, expected)?;
        let mut offset = 0;
        for t in self.active_mut() {
            let n = t.fixed_parameters().len();
            t.set_fixed_parameters(&parameters[offset..offset + n])?;
            offset += n;
        }
        Ok(())
    }

    fn transform_point(&self, point: &[f64]) -> Vec<f64> {
        assert_eq!(point.len(), D);
        self.transforms
            .iter()
            .rev()
            .fold(point.to_vec(), |p, t| t.map_point(&p))
    }

    fn print_self(&self, f: &mut fmt::Formatter, indent: usize) -> fmt::Result {
        let pad = indent * 2;
        writeln!(f, "{:pad$}Transforms in queue: {}", "", self.transforms.len(), pad = pad)?;
        writeln!(f, "{:pad$}Transforms to optimize: {:?}", "", self.to_optimize, pad = pad)?;
        for t in &self.transforms {
            print_nested(t, f, indent + 1)?;
        }
        Ok(())
    }
}
