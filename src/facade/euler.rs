//! Euler angle rigid transform facades.

use crate::error::Result;
use crate::facade::{to_vector, Bindable, BoundTransform};
use crate::geometry::{AnyTransform, Euler2D, Euler3D};
use crate::transform::Transform;

/// Binds to [`Euler2D`] transforms.
#[derive(Debug, Clone, Copy)]
pub struct Euler2DKind;

impl Bindable for Euler2DKind {
    type Target = Euler2D;
    const NAME: &'static str = "Euler2DTransform";

    fn bind(transform: &AnyTransform) -> Option<&Euler2D> {
        match transform {
            AnyTransform::Euler2D(t) => Some(t),
            _ => None,
        }
    }

    fn bind_mut(transform: &mut AnyTransform) -> Option<&mut Euler2D> {
        match transform {
            AnyTransform::Euler2D(t) => Some(t),
            _ => None,
        }
    }
}

/// A 2D rigid transform: rotation about a center, then translation.
pub type Euler2DTransform = BoundTransform<Euler2DKind>;

impl Default for BoundTransform<Euler2DKind> {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundTransform<Euler2DKind> {
    /// An identity 2D rigid transform.
    pub fn new() -> Self {
        Self::from_transform(Transform::from_any(AnyTransform::Euler2D(Euler2D::default())))
    }

    /// A 2D rigid transform with the given center, angle and translation.
    pub fn with_parameters(center: &[f64], angle: f64, translation: &[f64]) -> Result<Self> {
        let mut t = Self::new();
        let _ = t.set_center(center)?;
        let _ = t.set_angle(angle)?;
        let _ = t.set_translation(translation)?;
        Ok(t)
    }

    /// The center of rotation.
    pub fn center(&self) -> Result<Vec<f64>> {
        Ok(self.target()?.center().as_slice().to_vec())
    }

    /// Replace the center of rotation.
    pub fn set_center(&mut self, center: &[f64]) -> Result<&mut Self> {
        let center = to_vector::<2>("center", center)?;
        self.write_target(|t| {
            t.set_center(center);
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

/// Binds to [`Euler3D`] transforms.
#[derive(Debug, Clone, Copy)]
pub struct Euler3DKind;

impl Bindable for Euler3DKind {
    type Target = Euler3D;
    const NAME: &'static str = "Euler3DTransform";

    fn bind(transform: &AnyTransform) -> Option<&Euler3D> {
        match transform {
            AnyTransform::Euler3D(t) => Some(t),
            _ => None,
        }
    }

    fn bind_mut(transform: &mut AnyTransform) -> Option<&mut Euler3D> {
        match transform {
            AnyTransform::Euler3D(t) => Some(t),
            _ => None,
        }
    }
}

/// A 3D rigid transform with the rotation given by Euler angles.
pub type Euler3DTransform = BoundTransform<Euler3DKind>;

impl Default for BoundTransform<Euler3DKind> {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundTransform<Euler3DKind> {
    /// An identity 3D rigid transform.
    pub fn new() -> Self {
        Self::from_transform(Transform::from_any(AnyTransform::Euler3D(Euler3D::default())))
    }

    /// A 3D rigid transform with the given center, angles and translation.
    ///
    /// # Errors
    ///
    /// - `TransformError::InvalidArgument` if `center` or `translation` do
    /// not have 3 elements.
    pub fn with_parameters(
        center: &[f64],
        angle_x: f64,
        angle_y: f64,
        angle_z: f64,
        translation: &[f64],
    ) -> Result<Self> {
        let mut t = Self::new();
        let _ = t.set_fixed_parameters(center)?;
        let mut parameters = vec![angle_x, angle_y, angle_z];
        parameters.extend_from_slice(translation);
        let _ = t.set_parameters(&parameters)?;
        Ok(t)
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

    /// Rotation around the X axis, in radians.
    pub fn angle_x(&self) -> Result<f64> {
        Ok(self.target()?.angle_x())
    }

    /// Rotation around the Y axis, in radians.
    pub fn angle_y(&self) -> Result<f64> {
        Ok(self.target()?.angle_y())
    }

    /// Rotation around the Z axis, in radians.
    pub fn angle_z(&self) -> Result<f64> {
        Ok(self.target()?.angle_z())
    }

    /// Replace the three rotation angles.
    pub fn set_rotation(&mut self, angle_x: f64, angle_y: f64, angle_z: f64) -> Result<&mut Self> {
        self.write_target(|t| {
            t.set_rotation(angle_x, angle_y, angle_z);
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

    /// Whether the rotation is applied around X, then Y, then Z, instead of
    /// the default Y, then X, then Z.
    pub fn compute_zyx(&self) -> Result<bool> {
        Ok(self.target()?.compute_zyx())
    }

    /// Select the order in which the rotation angles are applied.
    pub fn set_compute_zyx(&mut self, compute_zyx: bool) -> Result<&mut Self> {
        self.write_target(|t| {
            t.set_compute_zyx(compute_zyx);
            Ok(())
        })?;
        Ok(self)
    }
}
