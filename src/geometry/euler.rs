//! Rigid transforms parameterized by Euler angles.

use std::fmt;

use nalgebra::{Vector2, Vector3};

use super::rotation::{euler_3d, rotation_2d};
use super::{check_len, format_values, SpatialTransform};
use crate::error::Result;

/// Rigid 2D transform: rotation about a center followed by a translation.
///
/// Parameters: `[angle, tx, ty]`. Fixed parameters: the center of rotation.
#[derive(Debug, Clone, PartialEq)]
pub struct Euler2D {
    angle: f64,
    center: Vector2<f64>,
    translation: Vector2<f64>,
}

impl Default for Euler2D {
    fn default() -> Self {
        Euler2D {
            angle: 0.0,
            center: Vector2::zeros(),
            translation: Vector2::zeros(),
        }
    }
}

impl Euler2D {
    /// The rotation angle, in radians.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Replace the rotation angle.
    pub fn set_angle(&mut self, angle: f64) {
        self.angle = angle;
    }

    /// The center of rotation.
    pub fn center(&self) -> &Vector2<f64> {
        &self.center
    }

    /// Replace the center of rotation.
    pub fn set_center(&mut self, center: Vector2<f64>) {
        self.center = center;
    }

    /// The translation applied after rotating.
    pub fn translation(&self) -> &Vector2<f64> {
        &self.translation
    }

    /// Replace the translation.
    pub fn set_translation(&mut self, translation: Vector2<f64>) {
        self.translation = translation;
    }
}

impl SpatialTransform for Euler2D {
    fn name_of_class(&self) -> &'static str {
        "Euler2DTransform"
    }

    fn input_dimension(&self) -> usize {
        2
    }

    fn number_of_parameters(&self) -> usize {
        3
    }

    fn parameters(&self) -> Vec<f64> {
        vec![self.angle, self.translation.x, self.translation.y]
    }

    fn set_parameters(&mut self, parameters: &[f64]) -> Result<()> {
        check_len(self.name_of_class(), "parameters", parameters, 3)?;
        self.angle = parameters[0];
        self.translation = Vector2::new(parameters[1], parameters[2]);
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
        let out = rotation_2d(self.angle) * (p - self.center) + self.center + self.translation;
        out.as_slice().to_vec()
    }

    fn print_self(&self, f: &mut fmt::Formatter, indent: usize) -> fmt::Result {
        let pad = indent * 2;
        writeln!(f, "{:pad$}Angle: {}", "", self.angle, pad = pad)?;
        writeln!(f, "{:pad$}Center: {}", "", format_values(self.center.as_slice()), pad = pad)?;
        writeln!(
            f,
            "{:pad$}Translation: {}",
            "",
            format_values(self.translation.as_slice()),
            pad = pad
        )
    }
}

/// Rigid 3D transform: rotation by three Euler angles about a center,
/// followed by a translation.
///
/// Parameters: `[angle_x, angle_y, angle_z, tx, ty, tz]`. Fixed parameters:
/// the center of rotation. By default the rotation is composed as
/// `Rz * Rx * Ry`; with `compute_zyx` set it is `Rz * Ry * Rx`.
#[derive(Debug, Clone, PartialEq)]
pub struct Euler3D {
    angle_x: f64,
    angle_y: f64,
    angle_z: f64,
    compute_zyx: bool,
    center: Vector3<f64>,
    translation: Vector3<f64>,
}

impl Default for Euler3D {
    fn default() -> Self {
        Euler3D {
            angle_x: 0.0,
            angle_y: 0.0,
            angle_z: 0.0,
            compute_zyx: false,
            center: Vector3::zeros(),
            translation: Vector3::zeros(),
        }
    }
}

impl Euler3D {
    /// Rotation angle around the X axis, in radians.
    pub fn angle_x(&self) -> f64 {
        self.angle_x
    }

    /// Rotation angle around the Y axis, in radians.
    pub fn angle_y(&self) -> f64 {
        self.angle_y
    }

    /// Rotation angle around the Z axis, in radians.
    pub fn angle_z(&self) -> f64 {
        self.angle_z
    }

    /// Replace the three rotation angles.
    pub fn set_rotation(&mut self, angle_x: f64, angle_y: f64, angle_z: f64) {
        self.angle_x = angle_x;
        self.angle_y = angle_y;
        self.angle_z = angle_z;
    }

    /// Whether the rotation is composed in Z-Y-X order.
    pub fn compute_zyx(&self) -> bool {
        self.compute_zyx
    }

    /// Select the Z-Y-X composition order.
    pub fn set_compute_zyx(&mut self, compute_zyx: bool) {
        self.compute_zyx = compute_zyx;
    }

    /// The center of rotation.
    pub fn center(&self) -> &Vector3<f64> {
        &self.center
    }

    /// Replace the center of rotation.
    pub fn set_center(&mut self, center: Vector3<f64>) {
        self.center = center;
    }

    /// The translation applied after rotating.
    pub fn translation(&self) -> &Vector3<f64> {
        &self.translation
    }

    /// Replace the translation.
    pub fn set_translation(&mut self, translation: Vector3<f64>) {
        self.translation = translation;
    }
}

impl SpatialTransform for Euler3D {
    fn name_of_class(&self) -> &'static str {
        "Euler3DTransform"
    }

    fn input_dimension(&self) -> usize {
        3
    }

    fn number_of_parameters(&self) -> usize {
        6
    }

    fn parameters(&self) -> Vec<f64> {
        vec![
            self.angle_x,
            self.angle_y,
            self.angle_z,
            self.translation.x,
            self.translation.y,
            self.translation.z,
        ]
    }

    fn set_parameters(&mut self, parameters: &[f64]) -> Result<()> {
        check_len(self.name_of_class(), "parameters", parameters, 6)?;
        self.set_rotation(parameters[0], parameters[1], parameters[2]);
        self.translation = Vector3::from_column_slice(&parameters[3..]);
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
        let m = euler_3d(self.angle_x, self.angle_y, self.angle_z, self.compute_zyx);
        let out = m * (p - self.center) + self.center + self.translation;
        out.as_slice().to_vec()
    }

    fn print_self(&self, f: &mut fmt::Formatter, indent: usize) -> fmt::Result {
        let pad = indent * 2;
        writeln!(f, "{:pad$}AngleX: {}", "", self.angle_x, pad = pad)?;
        writeln!(f, "{:pad$}AngleY: {}", "", self.angle_y, pad = pad)?;
        writeln!(f, "{:pad$}AngleZ: {}", "", self.angle_z, pad = pad)?;
        writeln!(f, "{:pad$}ComputeZYX: {}", "", self.compute_zyx, pad = pad)?;
        writeln!(f, "{:pad$}Center: {}", "", format_values(self.center.as_slice()), pad = pad)?;
        writeln!(
            f,
            "{:pad$}Translation: {}",
            "",
            format_values(self.translation.as_slice()),
            pad = pad
        )
    }
}
