//! Similarity transforms: rotation, isotropic scaling and translation.

use std::fmt;

use nalgebra::{UnitQuaternion, Vector2, Vector3};

use super::rotation::{fill_positive, rotation_2d, versor_right_part};
use super::{check_len, format_values, SpatialTransform};
use crate::error::Result;

/// 2D similarity transform.
///
/// Parameters: `[scale, angle, tx, ty]`. Fixed parameters: the center.
#[derive(Debug, Clone, PartialEq)]
pub struct Similarity2D {
    scale: f64,
    angle: f64,
    center: Vector2<f64>,
    translation: Vector2<f64>,
}

impl Default for Similarity2D {
    fn default() -> Self {
        Similarity2D {
            scale: 1.0,
            angle: 0.0,
            center: Vector2::zeros(),
            translation: Vector2::zeros(),
        }
    }
}

impl Similarity2D {
    /// The isotropic scale factor.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Replace the isotropic scale factor.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    /// The rotation angle, in radians.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Replace the rotation angle.
    pub fn set_angle(&mut self, angle: f64) {
        self.angle = angle;
    }

    /// The center of rotation and scaling.
    pub fn center(&self) -> &Vector2<f64> {
        &self.center
    }

    /// Replace the center.
    pub fn set_center(&mut self, center: Vector2<f64>) {
        self.center = center;
    }

    /// The translation.
    pub fn translation(&self) -> &Vector2<f64> {
        &self.translation
    }

    /// Replace the translation.
    pub fn set_translation(&mut self, translation: Vector2<f64>) {
        self.translation = translation;
    }
}

impl SpatialTransform for Similarity2D {
    fn name_of_class(&self) -> &'static str {
        "Similarity2DTransform"
    }

    fn input_dimension(&self) -> usize {
        2
    }

    fn number_of_parameters(&self) -> usize {
        4
    }

    fn parameters(&self) -> Vec<f64> {
        vec![self.scale, self.angle, self.translation.x, self.translation.y]
    }

    fn set_parameters(&mut self, parameters: &[f64]) -> Result<()> {
        check_len(self.name_of_class(), "parameters", parameters, 4)?;
        self.scale = parameters[0];
        self.angle = parameters[1];
        self.translation = Vector2::new(parameters[2], parameters[3]);
        Ok(())
    }

    fn fixed_parameters(&self) -> Vec<f64> {
        self.center.as_slice().to_vec()
    }

    fn set_fixed_parameters(&mut self, parameters: &[f64]) -> Result<()> {
        check_len(self.name_of_class(), "fixed parameters", parameters, 2)?;
        self.center = Vector2::from_column_slice(parameters);
        Ok(())
    }

    fn transform_point(&self, point: &[f64]) -> Vec<f64> {
        let p = Vector2::from_column_slice(point);
        let m = rotation_2d(self.angle) * self.scale;
        (m * (p - self.center) + self.center + self.translation)
            .as_slice()
            .to_vec()
    }

    fn print_self(&self, f: &mut fmt::Formatter, indent: usize) -> fmt::Result {
        let pad = indent * 2;
        writeln!(f, "{:pad$}Scale: {}", "", self.scale, pad = pad)?;
        writeln!(f, "{:pad$}Angle: {}", "", self.angle, pad = pad)?;
        writeln!(f, "{:pad$}Center: {}", "", format_values(self.center.as_slice()), pad = pad)
    }
}

/// 3D similarity transform, with the rotation expressed as a versor.
///
/// Parameters: `[vx, vy, vz, tx, ty, tz, scale]`, where `v` is the right part
/// of the versor. Fixed parameters: the center.
#[derive(Debug, Clone, PartialEq)]
pub struct Similarity3D {
    versor: UnitQuaternion<f64>,
    scale: f64,
    center: Vector3<f64>,
    translation: Vector3<f64>,
}

impl Default for Similarity3D {
    fn default() -> Self {
        Similarity3D {
            versor: UnitQuaternion::identity(),
            scale: 1.0,
            center: Vector3::zeros(),
            translation: Vector3::zeros(),
        }
    }
}

impl Similarity3D {
    /// The isotropic scale factor.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Replace the isotropic scale factor.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    /// The rotation versor.
    pub fn versor(&self) -> &UnitQuaternion<f64> {
        &self.versor
    }

    /// Replace the rotation versor.
    pub fn set_versor(&mut self, versor: UnitQuaternion<f64>) {
        self.versor = versor;
    }

    /// The center of rotation and scaling.
    pub fn center(&self) -> &Vector3<f64> {
        &self.center
    }

    /// Replace the center.
    pub fn set_center(&mut self, center: Vector3<f64>) {
        self.center = center;
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

impl SpatialTransform for Similarity3D {
    fn name_of_class(&self) -> &'static str {
        "Similarity3DTransform"
    }

    fn input_dimension(&self) -> usize {
        3
    }

    fn number_of_parameters(&self) -> usize {
        7
    }

    fn parameters(&self) -> Vec<f64> {
        let v = versor_right_part(&self.versor);
        let t = &self.translation;
        vec![v.x, v.y, v.z, t.x, t.y, t.z, self.scale]
    }

    fn set_parameters(&mut self, parameters: &[f64]) -> Result<()> {
        check_len(self.name_of_class(), "parameters", parameters, 7)?;
        self.versor = fill_positive(Vector3::from_column_slice(&parameters[..3]))?;
        self.translation = Vector3::from_column_slice(&parameters[3..6]);
        self.scale = parameters[6];
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
        let rotated = self.versor * (p - self.center);
        (rotated * self.scale + self.center + self.translation)
            .as_slice()
            .to_vec()
    }

    fn print_self(&self, f: &mut fmt::Formatter, indent: usize) -> fmt::Result {
        let pad = indent * 2;
        let q = self.versor.quaternion();
        writeln!(f, "{:pad$}Versor: [{}, {}, {}, {}]", "", q.i, q.j, q.k, q.w, pad = pad)?;
        writeln!(f, "{:pad$}Scale: {}", "", self.scale, pad = pad)?;
        writeln!(f, "{:pad$}Center: {}", "", format_values(self.center.as_slice()), pad = pad)
    }
}
