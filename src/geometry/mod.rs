//! Concrete spatial transforms.
//!
//! This module holds one statically typed implementation per transform kind
//! and dimension, all of them satisfying [`SpatialTransform`]. The
//! [`AnyTransform`] enum erases the concrete type behind a closed set of
//! variants, so that the kind and dimension can be selected at run time
//! without any run-time type inspection.
//!
//! Parameters follow the conventional parameterisation of each kind (see the
//! documentation of each type). The scalar type is always `f64`.

use std::fmt;

use crate::error::{Result, TransformError};
use crate::typedef::TransformKind;

pub mod affine;
pub mod composite;
pub mod displacement;
pub mod euler;
pub mod identity;
pub mod rotation;
pub mod scale;
pub mod similarity;
pub mod translation;
pub mod versor;

pub use self::affine::Affine;
pub use self::composite::Composite;
pub use self::displacement::DisplacementField;
pub use self::euler::{Euler2D, Euler3D};
pub use self::identity::Identity;
pub use self::scale::{Scale, ScaleLogarithmic};
pub use self::similarity::{Similarity2D, Similarity3D};
pub use self::translation::Translation;
pub use self::versor::{QuaternionRigid, Versor, VersorRigid3D};

/// Interface of every concrete spatial transform.
pub trait SpatialTransform: Clone + fmt::Debug {
    /// Name of the transform class, without scalar type or dimension
    /// decorations (e.g. `"Euler3DTransform"`).
    fn name_of_class(&self) -> &'static str;

    /// Dimension of the input space.
    fn input_dimension(&self) -> usize;

    /// Dimension of the output space. Equal to the input dimension for every
    /// transform in this crate.
    fn output_dimension(&self) -> usize {
        self.input_dimension()
    }

    /// Number of elements in the parameter vector.
    fn number_of_parameters(&self) -> usize;

    /// A snapshot of the parameter vector.
    fn parameters(&self) -> Vec<f64>;

    /// Replace the parameter vector.
    ///
    /// # Errors
    ///
    /// - `TransformError::InvalidArgument` if the length of `parameters`
    /// does not match `number_of_parameters()`.
    fn set_parameters(&mut self, parameters: &[f64]) -> Result<()>;

    /// A snapshot of the fixed parameter vector.
    fn fixed_parameters(&self) -> Vec<f64>;

    /// Replace the fixed parameter vector.
    fn set_fixed_parameters(&mut self, parameters: &[f64]) -> Result<()>;

    /// Map a point. The length of `point` is expected to be equal to the
    /// input dimension.
    ///
    /// # Panics
    ///
    /// If the length of `point` is not the input dimension.
    fn transform_point(&self, point: &[f64]) -> Vec<f64>;

    /// Print the attributes specific to this transform, one per line.
    fn print_self(&self, _f: &mut fmt::Formatter, _indent: usize) -> fmt::Result {
        Ok(())
    }
}

/// A spatial transform of any supported kind and dimension.
#[derive(Debug, Clone)]
pub enum AnyTransform {
    /// 2D identity.
    Identity2(Identity<2>),
    /// 3D identity.
    Identity3(Identity<3>),
    /// 2D translation.
    Translation2(Translation<2>),
    /// 3D translation.
    Translation3(Translation<3>),
    /// 2D scale.
    Scale2(Scale<2>),
    /// 3D scale.
    Scale3(Scale<3>),
    /// 2D logarithmic scale.
    ScaleLogarithmic2(ScaleLogarithmic<2>),
    /// 3D logarithmic scale.
    ScaleLogarithmic3(ScaleLogarithmic<3>),
    /// 2D rigid transform.
    Euler2D(Euler2D),
    /// 3D rigid transform with Euler angles.
    Euler3D(Euler3D),
    /// 2D similarity transform.
    Similarity2D(Similarity2D),
    /// 3D similarity transform.
    Similarity3D(Similarity3D),
    /// 3D rigid transform with a quaternion rotation.
    QuaternionRigid(QuaternionRigid),
    /// 3D versor rotation.
    Versor(Versor),
    /// 3D rigid transform with a versor rotation.
    VersorRigid3D(VersorRigid3D),
    /// 2D affine transform.
    Affine2(Affine<2>),
    /// 3D affine transform.
    Affine3(Affine<3>),
    /// 2D composite transform.
    Composite2(Composite<2>),
    /// 3D composite transform.
    Composite3(Composite<3>),
    /// 2D displacement field.
    DisplacementField2(DisplacementField<2>),
    /// 3D displacement field.
    DisplacementField3(DisplacementField<3>),
}

/// Evaluate an expression against the concrete transform held by an
/// `AnyTransform`, binding it to the given identifier.
macro_rules! with_transform {
    ($value:expr, $t:ident => $body:expr) => {
        match $value {
            AnyTransform::Identity2($t) => $body,
            AnyTransform::Identity3($t) => $body,
            AnyTransform::Translation2($t) => $body,
            AnyTransform::Translation3($t) => $body,
            AnyTransform::Scale2($t) => $body,
            AnyTransform::Scale3($t) => $body,
            AnyTransform::ScaleLogarithmic2($t) => $body,
            AnyTransform::ScaleLogarithmic3($t) => $body,
            AnyTransform::Euler2D($t) => $body,
            AnyTransform::Euler3D($t) => $body,
            AnyTransform::Similarity2D($t) => $body,
            AnyTransform::Similarity3D($t) => $body,
            AnyTransform::QuaternionRigid($t) => $body,
            AnyTransform::Versor($t) => $body,
            AnyTransform::VersorRigid3D($t) => $body,
            AnyTransform::Affine2($t) => $body,
            AnyTransform::Affine3($t) => $body,
            AnyTransform::Composite2($t) => $body,
            AnyTransform::Composite3($t) => $body,
            AnyTransform::DisplacementField2($t) => $body,
            AnyTransform::DisplacementField3($t) => $body,
        }
    };
}

impl AnyTransform {
    /// Name of the transform class (e.g. `"AffineTransform"`).
    pub fn name_of_class(&self) -> &'static str {
        with_transform!(self, t => t.name_of_class())
    }

    /// The fully decorated class name, as written to transform files
    /// (e.g. `"AffineTransform_double_3_3"`).
    pub fn full_class_name(&self) -> String {
        format!(
            "{}_double_{}_{}",
            self.name_of_class(),
            self.input_dimension(),
            self.output_dimension()
        )
    }

    /// The kind of this transform.
    pub fn kind(&self) -> TransformKind {
        match self {
            AnyTransform::Identity2(_) | AnyTransform::Identity3(_) => TransformKind::Identity,
            AnyTransform::Translation2(_) | AnyTransform::Translation3(_) => {
                TransformKind::Translation
            }
            AnyTransform::Scale2(_) | AnyTransform::Scale3(_) => TransformKind::Scale,
            AnyTransform::ScaleLogarithmic2(_) | AnyTransform::ScaleLogarithmic3(_) => {
                TransformKind::ScaleLogarithmic
            }
            AnyTransform::Euler2D(_) | AnyTransform::Euler3D(_) => TransformKind::Euler,
            AnyTransform::Similarity2D(_) | AnyTransform::Similarity3D(_) => {
                TransformKind::Similarity
            }
            AnyTransform::QuaternionRigid(_) => TransformKind::QuaternionRigid,
            AnyTransform::Versor(_) => TransformKind::Versor,
            AnyTransform::VersorRigid3D(_) => TransformKind::VersorRigid,
            AnyTransform::Affine2(_) | AnyTransform::Affine3(_) => TransformKind::Affine,
            AnyTransform::Composite2(_) | AnyTransform::Composite3(_) => TransformKind::Composite,
            AnyTransform::DisplacementField2(_) | AnyTransform::DisplacementField3(_) => {
                TransformKind::DisplacementField
            }
        }
    }

    /// Whether this is a composite transform.
    pub fn is_composite(&self) -> bool {
        matches!(self, AnyTransform::Composite2(_) | AnyTransform::Composite3(_))
    }

    /// Dimension of the input space.
    pub fn input_dimension(&self) -> usize {
        with_transform!(self, t => t.input_dimension())
    }

    /// Dimension of the output space.
    pub fn output_dimension(&self) -> usize {
        with_transform!(self, t => t.output_dimension())
    }

    /// Number of elements in the parameter vector.
    pub fn number_of_parameters(&self) -> usize {
        with_transform!(self, t => t.number_of_parameters())
    }

    /// A snapshot of the parameter vector.
    pub fn parameters(&self) -> Vec<f64> {
        with_transform!(self, t => t.parameters())
    }

    /// Replace the parameter vector.
    pub fn set_parameters(&mut self, parameters: &[f64]) -> Result<()> {
        with_transform!(self, t => t.set_parameters(parameters))
    }

    /// A snapshot of the fixed parameter vector.
    pub fn fixed_parameters(&self) -> Vec<f64> {
        with_transform!(self, t => t.fixed_parameters())
    }

    /// Replace the fixed parameter vector.
    pub fn set_fixed_parameters(&mut self, parameters: &[f64]) -> Result<()> {
        with_transform!(self, t => t.set_fixed_parameters(parameters))
    }

    /// Map a point, checking its dimensionality first.
    ///
    /// # Errors
    ///
    /// - `TransformError::InvalidArgument` if the length of `point` is not
    /// the input dimension.
    pub fn transform_point(&self, point: &[f64]) -> Result<Vec<f64>> {
        let dim = self.input_dimension();
        if point.len() != dim {
            return Err(TransformError::InvalidArgument(format!(
                "point of dimension {} given to a {}D {}",
                point.len(),
                dim,
                self.name_of_class()
            )));
        }
        Ok(self.map_point(point))
    }

    /// Map a point whose dimensionality is already known to match.
    pub(crate) fn map_point(&self, point: &[f64]) -> Vec<f64> {
        with_transform!(self, t => t.transform_point(point))
    }

    fn print(&self, f: &mut fmt::Formatter, indent: usize) -> fmt::Result {
        let pad = indent * 2;
        writeln!(
            f,
            "{:pad$}{} (dimension {})",
            "",
            self.name_of_class(),
            self.input_dimension(),
            pad = pad
        )?;
        writeln!(f, "{:pad$}  Parameters: {}", "", format_values(&self.parameters()), pad = pad)?;
        writeln!(
            f,
            "{:pad$}  FixedParameters: {}",
            "",
            format_values(&self.fixed_parameters()),
            pad = pad
        )?;
        with_transform!(self, t => t.print_self(f, indent + 1))
    }
}

impl fmt::Display for AnyTransform {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.print(f, 0)
    }
}

/// Print a nested transform at the given indentation level.
pub(crate) fn print_nested(t: &AnyTransform, f: &mut fmt::Formatter, indent: usize) -> fmt::Result {
    t.print(f, indent)
}

/// Format a sequence of values as `[a, b, c]`.
pub(crate) fn format_values(values: &[f64]) -> String {
    let items: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("[{}]", items.join(", "))
}

/// Check the length of a parameter vector given to `class`.
pub(crate) fn check_len(class: &str, what: &str, values: &[f64], expected: usize) -> Result<()> {
    if values.len() != expected {
        Err(TransformError::InvalidArgument(format!(
            "{} expects {} {}, got {}",
            class,
            expected,
            what,
            values.len()
        )))
    } else {
        Ok(())
    }
}
