//! Similarity transform facades.

use crate::error::Result;
use crate::facade::versor::{axis_angle, versor_from_slice, versor_to_vec};
use crate::facade::{to_vector, Bindable, BoundTransform};
use crate::geometry::{AnyTransform, Similarity2D, Similarity3D};
use crate::transform::Transform;

/// Binds to [`Similarity2D`] transforms.
#[derive(Debug, Clone, Copy)]
pub struct Similarity2DKind;

impl Bindable for Similarity2DKind {
    type Target = Similarity2D;
    const NAME: &'static str = "Similarity2DTransform";

    fn bind(transform: &AnyTransform) -> Option<&Similarity2D> {
        match transform {
            AnyTransform::Similarity2D(t) => Some(t),
            _ => None,
        }
    }

    fn bind_mut(transform: &mut AnyTransform) -> Option<&mut Similarity2D> {
        match transform {
            AnyTransform::Similarity2D(t) => Some(t),
            _ => None,
        }
    }
}

/// A 2D rotation and isotropic scaling about a center, then translation.
pub type Similarity2DTransform = BoundTransform<Similarity2DKind>;

impl Default for BoundTransform<Similarity2DKind> {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundTransform<Similarity2DKind> {
    /// An identity 2D similarity transform.
    pub fn new() -> Self {
        Self::from_transform(Transform::from_any(AnyTransform::Similarity2D(
            Similarity2D::default(),
        )))
    }

    /// The isotropic scale factor.
    pub fn scale(&self) -> Result<f64> {
        Ok(self.target()?.scale())
    }

    /// Replace the isotropic scale factor.
    pub fn set_scale(&mut self, scale: f64) -> Result<&mut Self> {
        self.write_target(|t| {
            t.set_scale(scale);
            Ok(())
        })?;
        Ok(self)
    }

    /// The rotation angle, in radians.
    pub fn angle(&self) -> Result<f64> {
        Ok(self.target()?.angle())
    }

    /// Replace the rotation angle.
    pub fn set_angle(&mut self, angle: f64) -> Result<&mut Self> {
        self.write_target(|t| {
            t.set_angle(angle);
            Ok(())
        })?;
        Ok(self)
    }

    /// The center of rotation and scaling.
    pub fn center(&self) -> Result<Vec<f64>> {
        Ok(self.target()?.center().as_slice().to_vec())
    }

    /// Replace the center.
    pub fn set_center(&mut self, center: &[f64]) -> Result<&mut Self> {
        let center = to_vector::<2>("center", center)?;
        self.write_target(|t| {
            t.set_center(center);
            Ok(())
        })?;
        Ok(self)
    }

    /// The translation.
    pub fn translation(&self) -> Result<Vec<f64>> {
        Ok(self.target()?.translation().as_slice().to_vec())
    }

    /// Replace the translation.
    pub fn set_translation(&mut self, translation: &[f64]) -> Result<&mut Self> {
        let translation = to_vector::<2>("translation", translation)?;
        self.write_target(|t| {
            t.set_translation(translation);
            Ok(())
        })?;
        Ok(self)
    }
}

/// Binds to [`Similarity3D`] transforms.
#[derive(Debug, Clone, Copy)]
pub struct Similarity3DKind;

impl Bindable for Similarity3DKind {
    type Target = Similarity3D;
    const NAME: &'static str = "Similarity3DTransform";

    fn bind(transform: &AnyTransform) -> Option<&Similarity3D> {
        match transform {
            AnyTransform::Similarity3D(t) => Some(t),
            _ => None,
        }
    }

    fn bind_mut(transform: &mut AnyTransform) -> Option<&mut Similarity3D> {
        match transform {
            AnyTransform::Similarity3D(t) => Some(t),
            _ => None,
        }
    }
}

/// A 3D versor rotation and isotropic scaling about a center, then
/// translation.
pub type Similarity3DTransform = BoundTransform<Similarity3DKind>;

impl Default for BoundTransform<Similarity3DKind> {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundTransform<Similarity3DKind> {
    /// An identity 3D similarity transform.
    pub fn new() -> Self {
        Self::from_transform(Transform::from_any(AnyTransform::Similarity3D(
            Similarity3D::default(),
        )))
    }

    /// The isotropic scale factor.
    pub fn scale(&self) -> Result<f64> {
        Ok(self.target()?.scale())
    }

    /// Replace the isotropic scale factor.
    pub fn set_scale(&mut self, scale: f64) -> Result<&mut Self> {
        self.write_target(|t| {
            t.set_scale(scale);
            Ok(())
        })?;
        Ok(self)
    }

    /// The versor, as `[x, y, z, w]`.
    pub fn versor(&self) -> Result<Vec<f64>> {
        Ok(versor_to_vec(self.target()?.versor()))
    }

    /// Replace the rotation with a versor given as `[x, y, z, w]`.
    pub fn set_rotation(&mut self, versor: &[f64]) -> Result<&mut Self> {
        let versor = versor_from_slice(versor)?;
        self.write_target(|t| {
            t.set_versor(versor);
            Ok(())
        })?;
        Ok(self)
    }

    /// Replace the rotation with a rotation of `angle` radians around `axis`.
    pub fn set_rotation_axis_angle(&mut self, axis: &[f64], angle: f64) -> Result<&mut Self> {
        let versor = axis_angle(axis, angle)?;
        self.write_target(|t| {
            t.set_versor(versor);
            Ok(())
        })?;
        Ok(self)
    }

    /// The center of rotation and scaling.
    pub fn center(&self) -> Result<Vec<f64>> {
        Ok(self.target()?.center().as_slice().to_vec())
    }

    /// Replace the center.
    pub fn set_center(&mut self, center: &[f64]) -> Result<&mut Self> {
        let center = to_vector::<3>("center", center)?;
        self.write_target(|t| {
            t.set_center(center);
            Ok(())
        })?;
        Ok(self)
    }

    /// The translation.
    pub fn translation(&self) -> Result<Vec<f64>> {
        Ok(self.target()?.translation().as_slice().to_vec())
    }

    /// Replace the translation.
    pub fn set_translation(&mut self, translation: &[f64]) -> Result<&mut Self> {
        let translation = to_vector::<3>("translation", translation)?;
        self.write_target(|t| {
            t.set_translation(translation);
            Ok(())
        })?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn similarity_2d_scales_about_center() {
        let mut t = Similarity2DTransform::new();
        let _ = t.set_scale(2.).unwrap().set_center(&[1., 1.]).unwrap();
        assert_eq!(t.transform_point(&[2., 1.]).unwrap(), vec![3., 1.]);
        assert_eq!(t.parameters(), vec![2., 0., 0., 0.]);
        assert_eq!(t.fixed_parameters(), vec![1., 1.]);
    }

    #[test]
    fn similarity_3d_rotation_and_scale() {
        let mut t = Similarity3DTransform::new();
        let _ = t
            .set_rotation_axis_angle(&[0., 0., 1.], FRAC_PI_2)
            .unwrap()
            .set_scale(2.)
            .unwrap();
        let p = t.transform_point(&[1., 0., 0.]).unwrap();
        assert_abs_diff_eq!(p[0], 0., epsilon = 1e-12);
        assert_abs_diff_eq!(p[1], 2., epsilon = 1e-12);
        assert_eq!(t.scale().unwrap(), 2.);
        assert_eq!(t.parameters().len(), 7);
    }
}
