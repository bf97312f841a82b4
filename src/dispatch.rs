//! Mapping between run time transform descriptions and concrete transforms.
//!
//! Forward dispatch turns a `(kind, dimension)` pair into a concrete
//! transform. Reverse dispatch turns the transform entries read from a file
//! into a single composite transform. Both directions go through a closed
//! set of cases: there is no run time type inspection.

use std::collections::HashMap;
use std::sync::OnceLock;

use nalgebra::{SMatrix, SVector};

use crate::error::{Result, TransformError};
use crate::geometry::{
    Affine, AnyTransform, Composite, DisplacementField, Euler2D, Euler3D, Identity,
    QuaternionRigid, Scale, ScaleLogarithmic, Similarity2D, Similarity3D, Translation, Versor,
    VersorRigid3D,
};
use crate::image::Image;
use crate::typedef::{PixelId, TransformKind};

/// What to do with a transform file holding more than one top-level
/// transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultipleTransformPolicy {
    /// Use the first transform and log a warning.
    UseFirst,
    /// Fail with `TransformError::MultipleTransforms`.
    Reject,
}

impl Default for MultipleTransformPolicy {
    fn default() -> Self {
        MultipleTransformPolicy::UseFirst
    }
}

/// One transform as stored in a transform file.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformEntry {
    /// Class name, without scalar type or dimensions (e.g. `"AffineTransform"`).
    pub class_name: String,
    /// Declared input dimension.
    pub input_dimension: usize,
    /// Declared output dimension.
    pub output_dimension: usize,
    /// Parameter vector.
    pub parameters: Vec<f64>,
    /// Fixed parameter vector.
    pub fixed_parameters: Vec<f64>,
}

impl TransformEntry {
    /// Describe a concrete transform. Children of a composite are not
    /// included.
    pub fn of(transform: &AnyTransform) -> TransformEntry {
        let (parameters, fixed_parameters) = if transform.is_composite() {
            (Vec::new(), Vec::new())
        } else {
            (transform.parameters(), transform.fixed_parameters())
        };
        TransformEntry {
            class_name: transform.name_of_class().to_string(),
            input_dimension: transform.input_dimension(),
            output_dimension: transform.output_dimension(),
            parameters,
            fixed_parameters,
        }
    }

    fn is_composite(&self) -> bool {
        self.class_name == "CompositeTransform"
    }
}

type Creator = fn() -> AnyTransform;

/// Registry of transform constructors by class name and dimension.
#[derive(Debug, Default)]
pub struct TransformFactory {
    creators: HashMap<(String, usize), Creator>,
}

static FACTORY: OnceLock<TransformFactory> = OnceLock::new();

impl TransformFactory {
    /// Create an empty factory.
    pub fn new() -> Self {
        TransformFactory::default()
    }

    /// The shared factory holding the built-in transforms, registered on
    /// first use.
    pub fn global() -> &'static TransformFactory {
        FACTORY.get_or_init(|| {
            let mut factory = TransformFactory::new();
            factory.register_builtins();
            factory
        })
    }

    /// Register a constructor. Registering a name and dimension twice keeps
    /// the first constructor.
    ///
    /// Returns whether the constructor was newly registered.
    pub fn register(&mut self, class_name: &str, dimension: usize, creator: Creator) -> bool {
        let key = (class_name.to_string(), dimension);
        if self.creators.contains_key(&key) {
            return false;
        }
        let _ = self.creators.insert(key, creator);
        true
    }

    /// Register every built-in transform, plus `MatrixOffsetTransformBase`
    /// which is read as an affine transform. Idempotent.
    pub fn register_builtins(&mut self) {
        let builtins: [(&str, usize, Creator); 23] = [
            ("IdentityTransform", 2, || AnyTransform::Identity2(Identity)),
            ("IdentityTransform", 3, || AnyTransform::Identity3(Identity)),
            ("TranslationTransform", 2, || AnyTransform::Translation2(Translation::default())),
            ("TranslationTransform", 3, || AnyTransform::Translation3(Translation::default())),
            ("ScaleTransform", 2, || AnyTransform::Scale2(Scale::default())),
            ("ScaleTransform", 3, || AnyTransform::Scale3(Scale::default())),
            ("ScaleLogarithmicTransform", 2, || {
                AnyTransform::ScaleLogarithmic2(ScaleLogarithmic::default())
            }),
            ("ScaleLogarithmicTransform", 3, || {
                AnyTransform::ScaleLogarithmic3(ScaleLogarithmic::default())
            }),
            ("Euler2DTransform", 2, || AnyTransform::Euler2D(Euler2D::default())),
            ("Euler3DTransform", 3, || AnyTransform::Euler3D(Euler3D::default())),
            ("Similarity2DTransform", 2, || AnyTransform::Similarity2D(Similarity2D::default())),
            ("Similarity3DTransform", 3, || AnyTransform::Similarity3D(Similarity3D::default())),
            ("QuaternionRigidTransform", 3, || {
                AnyTransform::QuaternionRigid(QuaternionRigid::default())
            }),
            ("VersorTransform", 3, || AnyTransform::Versor(Versor::default())),
            ("VersorRigid3DTransform", 3, || AnyTransform::VersorRigid3D(VersorRigid3D::default())),
            ("AffineTransform", 2, || AnyTransform::Affine2(Affine::default())),
            ("AffineTransform", 3, || AnyTransform::Affine3(Affine::default())),
            ("MatrixOffsetTransformBase", 2, || AnyTransform::Affine2(Affine::default())),
            ("MatrixOffsetTransformBase", 3, || AnyTransform::Affine3(Affine::default())),
            ("CompositeTransform", 2, || AnyTransform::Composite2(Composite::new())),
            ("CompositeTransform", 3, || AnyTransform::Composite3(Composite::new())),
            ("DisplacementFieldTransform", 2, || {
                AnyTransform::DisplacementField2(DisplacementField::default())
            }),
            ("DisplacementFieldTransform", 3, || {
                AnyTransform::DisplacementField3(DisplacementField::default())
            }),
        ];
        for (name, dimension, creator) in builtins.iter() {
            let _ = self.register(name, *dimension, *creator);
        }
    }

    /// Whether a constructor is registered for this name and dimension.
    pub fn is_registered(&self, class_name: &str, dimension: usize) -> bool {
        self.creators
            .contains_key(&(class_name.to_string(), dimension))
    }

    /// Create a transform in its default configuration.
    pub fn create(&self, class_name: &str, dimension: usize) -> Option<AnyTransform> {
        self.creators
            .get(&(class_name.to_string(), dimension))
            .map(|creator| creator())
    }
}

fn check_dimension(dimension: usize) -> Result<()> {
    if dimension != 2 && dimension != 3 {
        return Err(TransformError::InvalidArgument(format!(
            "transform dimension must be 2 or 3, got {}",
            dimension
        )));
    }
    Ok(())
}

/// Create a transform of the given kind and dimension, in its identity
/// configuration. A composite transform is created holding one identity
/// transform.
///
/// # Errors
///
/// - `TransformError::InvalidArgument` if the dimension is not 2 or 3, if a
/// 3D only kind is requested in 2D, or if a displacement field is requested
/// (those are built from an image).
pub fn create(kind: TransformKind, dimension: usize) -> Result<AnyTransform> {
    check_dimension(dimension)?;
    if kind.is_3d_only() && dimension != 3 {
        return Err(TransformError::InvalidArgument(format!(
            "transform kind {:?} only exists in 3D",
            kind
        )));
    }
    let three = dimension == 3;
    let transform = match kind {
        TransformKind::Identity if three => AnyTransform::Identity3(Identity),
        TransformKind::Identity => AnyTransform::Identity2(Identity),
        TransformKind::Translation if three => AnyTransform::Translation3(Translation::default()),
        TransformKind::Translation => AnyTransform::Translation2(Translation::default()),
        TransformKind::Scale if three => AnyTransform::Scale3(Scale::default()),
        TransformKind::Scale => AnyTransform::Scale2(Scale::default()),
        TransformKind::ScaleLogarithmic if three => {
            AnyTransform::ScaleLogarithmic3(ScaleLogarithmic::default())
        }
        TransformKind::ScaleLogarithmic => AnyTransform::ScaleLogarithmic2(ScaleLogarithmic::default()),
        TransformKind::Euler if three => AnyTransform::Euler3D(Euler3D::default()),
        TransformKind::Euler => AnyTransform::Euler2D(Euler2D::default()),
        TransformKind::Similarity if three => AnyTransform::Similarity3D(Similarity3D::default()),
        TransformKind::Similarity => AnyTransform::Similarity2D(Similarity2D::default()),
        TransformKind::QuaternionRigid => AnyTransform::QuaternionRigid(QuaternionRigid::default()),
        TransformKind::Versor => AnyTransform::Versor(Versor::default()),
        TransformKind::VersorRigid => AnyTransform::VersorRigid3D(VersorRigid3D::default()),
        TransformKind::Affine if three => AnyTransform::Affine3(Affine::default()),
        TransformKind::Affine => AnyTransform::Affine2(Affine::default()),
        TransformKind::Composite => {
            let identity = if three {
                AnyTransform::Identity3(Identity)
            } else {
                AnyTransform::Identity2(Identity)
            };
            return composite(dimension, vec![identity]);
        }
        TransformKind::DisplacementField => {
            return Err(TransformError::InvalidArgument(
                "a displacement field transform can only be created from an image".to_string(),
            ))
        }
    };
    Ok(transform)
}

/// Wrap the given transforms, in order, in a new composite transform. No
/// identity transform is inserted, and the most recently added transform is
/// the only one to optimize.
///
/// # Errors
///
/// - `TransformError::InvalidArgument` if a transform is not of the given
/// dimension.
pub fn composite(dimension: usize, transforms: Vec<AnyTransform>) -> Result<AnyTransform> {
    check_dimension(dimension)?;
    let mut wrapped = if dimension == 3 {
        AnyTransform::Composite3(Composite::new())
    } else {
        AnyTransform::Composite2(Composite::new())
    };
    for t in transforms {
        add_to_composite(&mut wrapped, t)?;
    }
    Ok(wrapped)
}

/// Append a transform to a composite, keeping the most recently added
/// transform as the only one to optimize.
fn add_to_composite(composite: &mut AnyTransform, transform: AnyTransform) -> Result<()> {
    match composite {
        AnyTransform::Composite2(c) => {
            c.add_transform(transform)?;
            c.set_only_most_recent_transform_to_optimize_on();
            Ok(())
        }
        AnyTransform::Composite3(c) => {
            c.add_transform(transform)?;
            c.set_only_most_recent_transform_to_optimize_on();
            Ok(())
        }
        other => Err(TransformError::InternalInconsistency(format!(
            "expected a composite transform, found a {}",
            other.name_of_class()
        ))),
    }
}

/// Turn a transform into a composite transform. A composite is returned
/// as is; any other transform becomes the only child of a new composite.
pub fn promote(transform: AnyTransform) -> Result<AnyTransform> {
    if transform.is_composite() {
        return Ok(transform);
    }
    debug!("Promoting {} to a composite transform", transform.name_of_class());
    composite(transform.input_dimension(), vec![transform])
}

/// Build a displacement field transform, taking the pixel buffer of `image`
/// and leaving an empty image in its place.
///
/// # Errors
///
/// - `TransformError::InvalidArgument` unless the image is 2D or 3D and its
/// pixels are vectors of `f64` with one component per dimension. The image
/// is left untouched in that case.
pub fn displacement_field(image: &mut Image) -> Result<AnyTransform> {
    let dimension = image.dimension();
    check_dimension(dimension)?;
    if image.pixel_id() != PixelId::VectorFloat64 {
        return Err(TransformError::InvalidArgument(format!(
            "displacement field image must have {:?} pixels, got {:?}",
            PixelId::VectorFloat64,
            image.pixel_id()
        )));
    }
    if image.number_of_components_per_pixel() != dimension {
        return Err(TransformError::InvalidArgument(format!(
            "displacement field image of dimension {} must have {} components per pixel, got {}",
            dimension,
            dimension,
            image.number_of_components_per_pixel()
        )));
    }
    let image = std::mem::take(image);
    if dimension == 3 {
        Ok(AnyTransform::DisplacementField3(field_from_image(image)?))
    } else {
        Ok(AnyTransform::DisplacementField2(field_from_image(image)?))
    }
}

fn field_from_image<const D: usize>(image: Image) -> Result<DisplacementField<D>> {
    let mut size = [0usize; D];
    size.copy_from_slice(image.size());
    let origin = SVector::<f64, D>::from_column_slice(image.origin());
    let spacing = SVector::<f64, D>::from_column_slice(image.spacing());
    let direction = SMatrix::<f64, D, D>::from_row_slice(image.direction());
    DisplacementField::from_parts(size, origin, spacing, direction, image.into_data())
}

/// Check that a stored displacement field holds one vector per grid node,
/// before its grid is allocated.
fn check_field_length(entry: &TransformEntry) -> Result<()> {
    let d = entry.input_dimension;
    if entry.class_name != "DisplacementFieldTransform" || entry.fixed_parameters.len() < d {
        return Ok(());
    }
    let expected = entry.fixed_parameters[..d].iter().product::<f64>() * d as f64;
    if expected != entry.parameters.len() as f64 {
        return Err(TransformError::InvalidArgument(format!(
            "displacement field of size {:?} cannot hold {} parameters",
            &entry.fixed_parameters[..d],
            entry.parameters.len()
        )));
    }
    Ok(())
}

fn instantiate(entry: &TransformEntry) -> Result<AnyTransform> {
    if entry.input_dimension != entry.output_dimension {
        return Err(TransformError::Unsupported(format!(
            "{} maps dimension {} to dimension {}",
            entry.class_name, entry.input_dimension, entry.output_dimension
        )));
    }
    let mut transform = TransformFactory::global()
        .create(&entry.class_name, entry.input_dimension)
        .ok_or_else(|| {
            TransformError::Unsupported(format!(
                "unknown transform class {} of dimension {}",
                entry.class_name, entry.input_dimension
            ))
        })?;
    if !transform.is_composite() {
        check_field_length(entry)?;
        // fixed parameters first, as they may resize the parameter vector
        transform.set_fixed_parameters(&entry.fixed_parameters)?;
        transform.set_parameters(&entry.parameters)?;
    }
    Ok(transform)
}

/// Build a single composite transform from the transforms read from a file.
///
/// If the first entry is a composite transform, every following entry is
/// one of its children. Otherwise the first entry is wrapped in a new
/// composite, and any further entry is discarded according to `policy`.
///
/// # Errors
///
/// - `TransformError::NoTransform` if `entries` is empty.
/// - `TransformError::Unsupported` if the first transform does not map
/// 2D to 2D or 3D to 3D, or names an unknown class.
/// - `TransformError::MultipleTransforms` under the `Reject` policy.
pub fn from_entries(
    entries: &[TransformEntry],
    policy: MultipleTransformPolicy,
) -> Result<AnyTransform> {
    let first = entries.first().ok_or(TransformError::NoTransform)?;
    let dimension = match (first.input_dimension, first.output_dimension) {
        (2, 2) => 2,
        (3, 3) => 3,
        (input, output) => {
            return Err(TransformError::Unsupported(format!(
                "unable to use a transform with input dimension {} and output dimension {}: \
                 transform of type {} is not supported",
                input, output, first.class_name
            )))
        }
    };

    if first.is_composite() {
        let mut wrapped = instantiate(first)?;
        if !wrapped.is_composite() {
            return Err(TransformError::InternalInconsistency(format!(
                "{} was not created as a composite transform",
                first.class_name
            )));
        }
        for entry in &entries[1..] {
            if entry.is_composite() {
                return Err(TransformError::Unsupported(
                    "nested composite transforms cannot be read".to_string(),
                ));
            }
            add_to_composite(&mut wrapped, instantiate(entry)?)?;
        }
        return Ok(wrapped);
    }

    if entries.len() > 1 {
        match policy {
            MultipleTransformPolicy::UseFirst => warn!(
                "There is more than one transform in the file ({}), only using the first one",
                entries.len()
            ),
            MultipleTransformPolicy::Reject => {
                return Err(TransformError::MultipleTransforms(entries.len()))
            }
        }
    }
    composite(dimension, vec![instantiate(first)?])
}

/// Describe a transform as the sequence of entries to store in a file.
///
/// # Errors
///
/// - `TransformError::Unsupported` if a composite holds another composite.
pub fn to_entries(transform: &AnyTransform) -> Result<Vec<TransformEntry>> {
    let mut entries = vec![TransformEntry::of(transform)];
    let children = match transform {
        AnyTransform::Composite2(c) => c.transforms(),
        AnyTransform::Composite3(c) => c.transforms(),
        _ => return Ok(entries),
    };
    for child in children {
        if child.is_composite() {
            return Err(TransformError::Unsupported(
                "nested composite transforms cannot be written".to_string(),
            ));
        }
        entries.push(TransformEntry::of(child));
    }
    Ok(entries)
}
