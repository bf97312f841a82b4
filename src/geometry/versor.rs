//! Rigid 3D transforms whose rotation is expressed as a quaternion.

use std::fmt;

use nalgebra::{Matrix3, Quaternion, UnitQuaternion, Vector3};

use super::rotation::{fill_positive, matrix_to_versor, quaternion_to_matrix, versor_right_part};
use super::{check_len, format_values, SpatialTransform};
use crate::error::Result;

/// Rigid 3D transform with a (possibly non-unit) quaternion rotation.
///
/// Parameters: `[qx, qy, qz, qw, tx, ty, tz]`. Fixed parameters: the center.
/// The quaternion is normalized when building the rotation matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct QuaternionRigid {
    rotation: Quaternion<f64>,
    center: Vector3<f64>,
    translation: Vector3<f64>,
}

impl Default for QuaternionRigid {
    fn default() -> Self {
        QuaternionRigid {
            rotation: Quaternion::identity(),
            center: Vector3::zeros(),
            translation: Vector3::zeros(),
        }
    }
}

impl QuaternionRigid {
    /// The rotation quaternion, as given.
    pub fn rotation(&self) -> &Quaternion<f64> {
        &self.rotation
    }

    /// The center of rotation.
    pub fn center(&self) -> &Vector3<f64> {
        &self.center
    }

    /// The translation.
    pub fn translation(&self) -> &Vector3<f64> {
        &self.translation
    }
}

impl SpatialTransform for QuaternionRigid {
    fn name_of_class(&self) -> &'static str {
        "QuaternionRigidTransform"
    }

    fn input_dimension(&self) -> usize {
        3
    }

    fn number_of_parameters(&self) -> usize {
        7
    }

    fn parameters(&self) -> Vec<f64> {
        let q = &self.rotation;
        let t = &self.translation;
        vec![q.i, q.j, q.k, q.w, t.x, t.y, t.z]
    }

    fn set_parameters(&mut self, parameters: &[f64]) -> Result<()> {
        check_len(self.name_of_class(), "parameters", parameters, 7)?;
        self.rotation = Quaternion::new(parameters[3], parameters[0], parameters[1], parameters[2]);
        self.translation = Vector3::from_column_slice(&parameters[4..]);
        Ok(())
    }

    fn fixed_parameters(&self) -> Vec<f64> {
        self.center.as_slice().to_vec()
    }

    fn set_fixed_parameters(&mut self, parameters: &[f64]) -> Result<()> {
        check_len(self.name_of_class(), "fixed parameters", parameters, 3)?;
        self.center = Vector3::from_column_slice(parameters);
        Ok(())
    }

    fn transform_point(&self, point: &[f64]) -> Vec<f64> {
        let p = Vector3::from_column_slice(point);
        let m = quaternion_to_matrix(&self.rotation);
        (m * (p - self.center) + self.center + self.translation)
            .as_slice()
            .to_vec()
    }

    fn print_self(&self, f: &mut fmt::Formatter, indent: usize) -> fmt::Result {
        let pad = indent * 2;
        let q = &self.rotation;
        writeln!(f, "{:pad$}Rotation: [{}, {}, {}, {}]", "", q.i, q.j, q.k, q.w, pad = pad)?;
        writeln!(f, "{:pad$}Center: {}", "", format_values(self.center.as_slice()), pad = pad)
    }
}

/// Pure 3D rotation about a center, expressed as a versor.
///
/// Parameters: `[vx, vy, vz]`, the right part of the versor. Fixed
/// parameters: the center.
#[derive(Debug, Clone, PartialEq)]
pub struct Versor {
    versor: UnitQuaternion<f64>,
    center: Vector3<f64>,
}

impl Default for Versor {
    fn default() -> Self {
        Versor {
            versor: UnitQuaternion::identity(),
            center: Vector3::zeros(),
        }
    }
}

impl Versor {
    /// The rotation versor.
    pub fn versor(&self) -> &UnitQuaternion<f64> {
        &self.versor
    }

    /// Replace the rotation versor.
    pub fn set_versor(&mut self, versor: UnitQuaternion<f64>) {
        self.versor = versor;
    }

    /// The center of rotation.
    pub fn center(&self) -> &Vector3<f64> {
        &self.center
    }

    /// Replace the center of rotation.
    pub fn set_center(&mut self, center: Vector3<f64>) {
        self.center = center;
    }
}

impl SpatialTransform for Versor {
    fn name_of_class(&self) -> &'static str {
        "VersorTransform"
    }

    fn input_dimension(&self) -> usize {
        3
    }

    fn number_of_parameters(&self) -> usize {
        3
    }

    fn parameters(&self) -> Vec<f64> {
        versor_right_part(&self.versor).as_slice().to_vec()
    }

    fn set_parameters(&mut self, parameters: &[f64]) -> Result<()> {
        check_len(self.name_of_class(), "parameters", parameters, 3)?;
        self.versor = fill_positive(Vector3::from_column_slice(parameters))?;
        Ok(())
    }

    fn fixed_parameters(&self) -> Vec<f64> {
        self.center.as_slice().to_vec()
    }

    fn set_fixed_parameters(&mut self, parameters: &[f64]) -> Result<()> {
        check_len(self.name_of_class(), "fixed parameters", parameters, 3)?;
        self.center = Vector3::from_column_slice(parameters);
        Ok(())
    }

    fn transform_point(&self, point: &[f64]) -> Vec<f64> {
        let p = Vector3::from_column_slice(point);
        (self.versor * (p - self.center) + self.center)
            .as_slice()
            .to_vec()
    }

    fn print_self(&self, f: &mut fmt::Formatter, indent: usize) -> fmt::Result {
        let pad = indent * 2;
        let q = self.versor.quaternion();
        writeln!(f, "{:pad$}Versor: [{}, {}, {}, {}]", "", q.i, q.j, q.k, q.w, pad = pad)?;
        writeln!(f, "{:pad$}Center: {}", "", format_values(self.center.as_slice()), pad = pad)
    }
}

/// Rigid 3D transform: versor rotation about a center plus a translation.
///
/// Parameters: `[vx, vy, vz, tx, ty, tz]`. Fixed parameters: the center.
#[derive(Debug, Clone, PartialEq)]
pub struct VersorRigid3D {
    rotation: Versor,
    translation: Vector3<f64>,
}

impl Default for VersorRigid3D {
    fn default() -> Self {
        VersorRigid3D {
            rotation: Versor::default(),
            translation: Vector3::zeros(),
        }
    }
}

impl VersorRigid3D {
    /// The rotation versor.
    pub fn versor(&self) -> &UnitQuaternion<f64> {
        self.rotation.versor()
    }

    /// Replace the rotation versor.
    pub fn set_versor(&mut self, versor: UnitQuaternion<f64>) {
        self.rotation.set_versor(versor);
    }

    /// Replace the rotation with the one described by a rotation matrix.
    ///
    /// # Errors
    ///
    /// - `TransformError::InvalidArgument` if `matrix` is not a proper rotation.
    pub fn set_matrix(&mut self, matrix: &Matrix3<f64>) -> Result<()> {
        self.rotation.set_versor(matrix_to_versor(matrix)?);
        Ok(())
    }

    /// The rotation matrix.
    pub fn matrix(&self) -> Matrix3<f64> {
        quaternion_to_matrix(self.versor().quaternion())
    }

    /// The center of rotation.
    pub fn center(&self) -> &Vector3<f64> {
        self.rotation.center()
    }

    /// Replace the center of rotation.
    pub fn set_center(&mut self, center: Vector3<f64>) {
        self.rotation.set_center(center);
    }

    /// The translation.
    pub fn translation(&self) -> &Vector3<f64> {
        &self.translation
    }

    /// Replace the translation.
    pub fn set_translation(&mut self, translation: Vector3<f64>) {
        self.translation = translation;
    }
}

impl SpatialTransform for VersorRigid3D {
    fn name_of_class(&self) -> &'static str {
        "VersorRigid3DTransform"
    }

    fn input_dimension(&self) -> usize {
        3
    }

    fn number_of_parameters(&self) -> usize {
        6
    }

    fn parameters(&self) -> Vec<f64> {
        let mut p = self.rotation.parameters();
        p.extend_from_slice(self.translation.as_slice());
        p
    }

    fn set_parameters(&mut self, parameters: &[f64]) -> Result<()> {
        check_len(self.name_of_class(), "parameters", parameters, 6)?;
        self.rotation.set_parameters(&parameters[..3])?;
        self.translation = Vector3::from_column_slice(&parameters[3..]);
        Ok(())
    }

    fn fixed_parameters(&self) -> Vec<f64> {
        self.rotation.fixed_parameters()
    }

    fn set_fixed_parameters(&mut self, parameters: &[f64]) -> Result<()> {
        check_len(self.name_of_class(), "fixed parameters", parameters, 3)?;
        self.rotation.set_fixed_parameters(parameters)
    }

    fn transform_point(&self, point: &[f64]) -> Vec<f64> {
        let rotated = Vector3::from_column_slice(&self.rotation.transform_point(point));
        (rotated + self.translation).as_slice().to_vec()
    }

    fn print_self(&self, f: &mut fmt::Formatter, indent: usize) -> fmt::Result {
        self.rotation.print_self(f, indent)?;
        writeln!(
            f,
            "{:pad$}Translation: {}",
            "",
            format_values(self.translation.as_slice()),
            pad = indent * 2
        )
    }
}
