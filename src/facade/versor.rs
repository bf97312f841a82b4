//! Versor rotation facades.

use nalgebra::{Matrix3, Quaternion, UnitQuaternion, Vector3};

use crate::error::{Result, TransformError};
use crate::facade::{to_vector, Bindable, BoundTransform};
use crate::geometry::rotation::versor_from_axis_angle;
use crate::geometry::{AnyTransform, Versor, VersorRigid3D};
use crate::transform::Transform;

/// Build a versor from its `[x, y, z, w]` components, normalizing it.
pub(crate) fn versor_from_slice(values: &[f64]) -> Result<UnitQuaternion<f64>> {
    let v = to_vector::<4>("versor", values)?;
    let q = Quaternion::new(v[3], v[0], v[1], v[2]);
    if q.norm() == 0.0 {
        return Err(TransformError::InvalidArgument(
            "versor must not be a null quaternion".to_string(),
        ));
    }
    Ok(UnitQuaternion::from_quaternion(q))
}

/// The `[x, y, z, w]` components of a versor.
pub(crate) fn versor_to_vec(versor: &UnitQuaternion<f64>) -> Vec<f64> {
    let q = versor.quaternion();
    vec![q.i, q.j, q.k, q.w]
}

/// Build a versor from an axis and an angle given as a slice.
pub(crate) fn axis_angle(axis: &[f64], angle: f64) -> Result<UnitQuaternion<f64>> {
    versor_from_axis_angle(&to_vector::<3>("rotation axis", axis)?, angle)
}

/// Binds to [`Versor`] transforms.
#[derive(Debug, Clone, Copy)]
pub struct VersorKind;

impl Bindable for VersorKind {
    type Target = Versor;
    const NAME: &'static str = "VersorTransform";

    fn bind(transform: &AnyTransform) -> Option<&Versor> {
        match transform {
            AnyTransform::Versor(t) => Some(t),
            _ => None,
        }
    }

    fn bind_mut(transform: &mut AnyTransform) -> Option<&mut Versor> {
        match transform {
            AnyTransform::Versor(t) => Some(t),
            _ => None,
        }
    }
}

/// A 3D rotation about a center, expressed as a versor.
pub type VersorTransform = BoundTransform<VersorKind>;

impl Default for BoundTransform<VersorKind> {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundTransform<VersorKind> {
    /// An identity versor transform.
    pub fn new() -> Self {
        Self::from_transform(Transform::from_any(AnyTransform::Versor(Versor::default())))
    }

    /// The versor, as `[x, y, z, w]`.
    pub fn versor(&self) -> Result<Vec<f64>> {
        Ok(versor_to_vec(self.target()?.versor()))
    }

    /// Replace the rotation with a versor given as `[x, y, z, w]`. The
    /// versor is normalized.
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

    /// The center of rotation.
    pub fn center(&self) -> Result<Vec<f64>> {
        Ok(self.target()?.center().as_slice().to_vec())
    }

    /// Replace the center of rotation.
    pub fn set_center(&mut self, center: &[f64]) -> Result<&mut Self> {
        let center = to_vector::<3>("center", center)?;
        self.write_target(|t| {
            t.set_center(center);
            Ok(())
        })?;
        Ok(self)
    }
}

/// Binds to [`VersorRigid3D`] transforms.
#[derive(Debug, Clone, Copy)]
pub struct VersorRigid3DKind;

impl Bindable for VersorRigid3DKind {
    type Target = VersorRigid3D;
    const NAME: &'static str = "VersorRigid3DTransform";

    fn bind(transform: &AnyTransform) -> Option<&VersorRigid3D> {
        match transform {
            AnyTransform::VersorRigid3D(t) => Some(t),
            _ => None,
        }
    }

    fn bind_mut(transform: &mut AnyTransform) -> Option<&mut VersorRigid3D> {
        match transform {
            AnyTransform::VersorRigid3D(t) => Some(t),
            _ => None,
        }
    }
}

/// A 3D rigid transform with the rotation expressed as a versor.
pub type VersorRigid3DTransform = BoundTransform<VersorRigid3DKind>;

impl Default for BoundTransform<VersorRigid3DKind> {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundTransform<VersorRigid3DKind> {
    /// An identity rigid transform.
    pub fn new() -> Self {
        Self::from_transform(Transform::from_any(AnyTransform::VersorRigid3D(
            VersorRigid3D::default(),
        )))
    }

    /// The versor, as `[x, y, z, w]`.
    pub fn versor(&self) -> Result<Vec<f64>> {
        Ok(versor_to_vec(self.target()?.versor()))
    }

    /// Replace the rotation with a versor given as `[x, y, z, w]`. The
    /// versor is normalized.
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

    /// The rotation matrix, in row-major order.
    pub fn matrix(&self) -> Result<Vec<f64>> {
        let m = self.target()?.matrix();
        Ok(m.transpose().as_slice().to_vec())
    }

    /// Replace the rotation with the one described by a row-major rotation
    /// matrix.
    ///
    /// # Errors
    ///
    /// - `TransformError::InvalidArgument` if `matrix` does not hold 9
    /// elements or is not a proper rotation.
    pub fn set_matrix(&mut self, matrix: &[f64]) -> Result<&mut Self> {
        if matrix.len() != 9 {
            return Err(TransformError::InvalidArgument(format!(
                "rotation matrix must have 9 elements, got {}",
                matrix.len()
            )));
        }
        let matrix = Matrix3::from_row_slice(matrix);
        self.write_target(|t| t.set_matrix(&matrix))?;
        Ok(self)
    }

    /// The center of rotation.
    pub fn center(&self) -> Result<Vec<f64>> {
        Ok(self.target()?.center().as_slice().to_vec())
    }

    /// Replace the center of rotation.
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
        let translation: Vector3<f64> = to_vector::<3>("translation", translation)?;
        self.write_target(|t| {
            t.set_translation(translation);
            Ok(())
        })?;
        Ok(self)
    }
}
