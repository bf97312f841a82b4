//! Affine transform facade, for both 2D and 3D transforms.

use nalgebra::SMatrix;

use crate::error::{Result, TransformError};
use crate::facade::{to_vector, Bindable, BoundTransform};
use crate::geometry::{Affine, AnyTransform};
use crate::transform::Transform;

/// Binds to [`Affine`] transforms of either dimension.
#[derive(Debug, Clone, Copy)]
pub struct AffineKind;

impl Bindable for AffineKind {
    type Target = AnyTransform;
    const NAME: &'static str = "AffineTransform";

    fn bind(transform: &AnyTransform) -> Option<&AnyTransform> {
        match transform {
            AnyTransform::Affine2(_) | AnyTransform::Affine3(_) => Some(transform),
            _ => None,
        }
    }

    fn bind_mut(transform: &mut AnyTransform) -> Option<&mut AnyTransform> {
        match transform {
            AnyTransform::Affine2(_) | AnyTransform::Affine3(_) => Some(transform),
            _ => None,
        }
    }
}

/// A general linear map about a center, then translation.
pub type AffineTransform = BoundTransform<AffineKind>;

fn not_affine(t: &AnyTransform) -> TransformError {
    TransformError::InternalInconsistency(format!(
        "affine accessors bound to a {}",
        t.name_of_class()
    ))
}

fn row_major<const D: usize>(m: &SMatrix<f64, D, D>) -> Vec<f64> {
    m.transpose().as_slice().to_vec()
}

fn matrix_from<const D: usize>(values: &[f64]) -> Result<SMatrix<f64, D, D>> {
    if values.len() != D * D {
        return Err(TransformError::InvalidArgument(format!(
            "matrix of a {}D affine transform must have {} elements, got {}",
            D,
            D * D,
            values.len()
        )));
    }
    Ok(SMatrix::from_row_slice(values))
}

impl BoundTransform<AffineKind> {
    /// An identity affine transform of the given dimension.
    ///
    /// # Errors
    ///
    /// - `TransformError::InvalidArgument` if the dimension is not 2 or 3.
    pub fn new(dimension: usize) -> Result<Self> {
        let t = match dimension {
            2 => AnyTransform::Affine2(Affine::default()),
            3 => AnyTransform::Affine3(Affine::default()),
            d => {
                return Err(TransformError::InvalidArgument(format!(
                    "transform dimension must be 2 or 3, got {}",
                    d
                )))
            }
        };
        Ok(Self::from_transform(Transform::from_any(t)))
    }

    /// An affine transform with the given row-major matrix, translation and
    /// center. The dimension follows from the length of `translation`.
    pub fn with_parameters(matrix: &[f64], translation: &[f64], center: &[f64]) -> Result<Self> {
        let mut t = Self::new(translation.len())?;
        let _ = t.set_matrix(matrix)?.set_translation(translation)?.set_center(center)?;
        Ok(t)
    }

    /// The linear part, in row-major order.
    pub fn matrix(&self) -> Result<Vec<f64>> {
        match self.target()? {
            AnyTransform::Affine2(a) => Ok(row_major(a.matrix())),
            AnyTransform::Affine3(a) => Ok(row_major(a.matrix())),
            other => Err(not_affine(other)),
        }
    }

    /// Replace the linear part, given in row-major order.
    pub fn set_matrix(&mut self, matrix: &[f64]) -> Result<&mut Self> {
        self.write_target(|t| match t {
            AnyTransform::Affine2(a) => {
                a.set_matrix(matrix_from(matrix)?);
                Ok(())
            }
            AnyTransform::Affine3(a) => {
                a.set_matrix(matrix_from(matrix)?);
                Ok(())
            }
            other => Err(not_affine(other)),
        })?;
        Ok(self)
    }

    /// The translation.
    pub fn translation(&self) -> Result<Vec<f64>> {
        match self.target()? {
            AnyTransform::Affine2(a) => Ok(a.translation().as_slice().to_vec()),
            AnyTransform::Affine3(a) => Ok(a.translation().as_slice().to_vec()),
            other => Err(not_affine(other)),
        }
    }

    /// Replace the translation.
    pub fn set_translation(&mut self, translation: &[f64]) -> Result<&mut Self> {
        self.write_target(|t| match t {
            AnyTransform::Affine2(a) => {
                a.set_translation(to_vector("translation", translation)?);
                Ok(())
            }
            AnyTransform::Affine3(a) => {
                a.set_translation(to_vector("translation", translation)?);
                Ok(())
            }
            other => Err(not_affine(other)),
        })?;
        Ok(self)
    }

    /// The center of the linear map.
    pub fn center(&self) -> Result<Vec<f64>> {
        match self.target()? {
            AnyTransform::Affine2(a) => Ok(a.center().as_slice().to_vec()),
            AnyTransform::Affine3(a) => Ok(a.center().as_slice().to_vec()),
            other => Err(not_affine(other)),
        }
    }

    /// Replace the center.
    pub fn set_center(&mut self, center: &[f64]) -> Result<&mut Self> {
        self.write_target(|t| match t {
            AnyTransform::Affine2(a) => {
                a.set_center(to_vector("center", center)?);
                Ok(())
            }
            AnyTransform::Affine3(a) => {
                a.set_center(to_vector("center", center)?);
                Ok(())
            }
            other => Err(not_affine(other)),
        })?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affine_2d() {
        let t = AffineTransform::with_parameters(&[2., 0., 0., 3.], &[1., 1.], &[0., 0.]).unwrap();
        assert_eq!(t.dimension(), 2);
        assert_eq!(t.transform_point(&[1., 1.]).unwrap(), vec![3., 4.]);
        assert_eq!(t.matrix().unwrap(), vec![2., 0., 0., 3.]);
        assert_eq!(t.parameters(), vec![2., 0., 0., 3., 1., 1.]);
    }

    #[test]
    fn affine_3d_row_major() {
        let mut t = AffineTransform::new(3).unwrap();
        let m = [1., 2., 3., 4., 5., 6., 7., 8., 10.];
        let _ = t.set_matrix(&m).unwrap();
        assert_eq!(t.matrix().unwrap(), m.to_vec());
        assert_eq!(t.parameters()[..9].to_vec(), m.to_vec());
        match t.set_matrix(&[1., 0., 0., 1.]) {
            Err(TransformError::InvalidArgument(_)) => {}
            other => panic!("unexpected result {:?}", other.map(|_| ())),
        }
        assert!(AffineTransform::new(4).is_err());
    }
}
