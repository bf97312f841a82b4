//! The value-semantic transform handle.

use std::fmt;
use std::path::Path;

use crate::backend::{Backend, BackendId};
use crate::dispatch;
use crate::error::{Result, TransformError};
use crate::geometry::AnyTransform;
use crate::image::Image;
use crate::typedef::TransformKind;
use crate::writer::WriterOptions;

/// A spatial transform of run time selected kind and dimension.
///
/// Cloning a `Transform` is cheap: clones share the same backend until one
/// of them is modified, at which point the modified handle receives its own
/// deep copy.
///
/// # Example
///
/// ```
/// use simple_transform::{Transform, TransformKind};
/// # fn run() -> simple_transform::Result<()> {
/// let mut t = Transform::new(2, TransformKind::Translation)?;
/// t.set_parameters(&[1., 2.])?;
/// assert_eq!(t.transform_point(&[0., 0.])?, vec![1., 2.]);
/// # Ok(())
/// # }
/// # run().unwrap();
/// ```
#[derive(Debug)]
pub struct Transform {
    backend: Backend,
}

impl Default for Transform {
    /// A 3D identity transform.
    fn default() -> Self {
        Transform::from_any(AnyTransform::Identity3(crate::geometry::Identity))
    }
}

impl Clone for Transform {
    fn clone(&self) -> Self {
        Transform {
            backend: self.backend.shallow_copy(),
        }
    }
}

impl Transform {
    /// Create a transform of the given dimension and kind, in its identity
    /// configuration. A composite transform starts with a single identity
    /// transform.
    ///
    /// # Errors
    ///
    /// - `TransformError::InvalidArgument` if the dimension is not 2 or 3, if
    /// the kind only exists in 3D and `dimension` is 2, or if the kind is
    /// `DisplacementField` (see [`Transform::from_displacement_field`]).
    pub fn new(dimension: usize, kind: TransformKind) -> Result<Transform> {
        Ok(Transform::from_any(dispatch::create(kind, dimension)?))
    }

    /// Create a transform from a raw kind code. Unknown codes yield an
    /// identity transform, with a warning.
    pub fn from_kind_code(dimension: usize, code: i32) -> Result<Transform> {
        Transform::new(dimension, TransformKind::from_code(code))
    }

    /// Create a displacement field transform from a vector image. The pixel
    /// buffer is moved into the transform and `image` is replaced by an
    /// empty image.
    ///
    /// # Errors
    ///
    /// - `TransformError::InvalidArgument` if the image is not 2D or 3D, or
    /// does not hold `f64` vectors with one component per dimension. The
    /// image is left untouched in that case.
    pub fn from_displacement_field(image: &mut Image) -> Result<Transform> {
        Ok(Transform::from_any(dispatch::displacement_field(image)?))
    }

    /// Wrap a concrete transform.
    pub fn from_any(transform: AnyTransform) -> Transform {
        Transform {
            backend: Backend::new(transform),
        }
    }

    /// The concrete transform.
    pub fn as_any(&self) -> &AnyTransform {
        self.backend.get()
    }

    pub(crate) fn backend_id(&self) -> BackendId {
        self.backend.id()
    }

    /// Mutable access to the concrete transform, making the backend unique
    /// first.
    pub(crate) fn any_mut(&mut self) -> Result<&mut AnyTransform> {
        self.make_unique_for_write();
        self.backend.unique_mut()
    }

    /// Give this handle its own backend if it is shared with other handles.
    pub(crate) fn make_unique_for_write(&mut self) {
        if !self.backend.is_unique() {
            debug!(
                "Copying a {} shared by {} handles before writing",
                self.backend.get().name_of_class(),
                self.backend.reference_count()
            );
            self.backend = self.backend.deep_copy();
        }
    }

    /// Dimension of the transform.
    pub fn dimension(&self) -> usize {
        self.backend.input_dimension()
    }

    /// Name of the transform class (e.g. `"Euler3DTransform"`).
    pub fn name(&self) -> &'static str {
        self.backend.get().name_of_class()
    }

    /// The kind of transform.
    pub fn kind(&self) -> TransformKind {
        self.backend.get().kind()
    }

    /// Number of handles sharing this transform's backend.
    pub fn reference_count(&self) -> usize {
        self.backend.reference_count()
    }

    /// A snapshot of the parameter vector.
    pub fn parameters(&self) -> Vec<f64> {
        self.backend.parameters()
    }

    /// Replace the parameter vector.
    ///
    /// # Errors
    ///
    /// - `TransformError::InvalidArgument` if the length of `parameters` is
    /// not the number of parameters of the transform.
    pub fn set_parameters(&mut self, parameters: &[f64]) -> Result<()> {
        self.make_unique_for_write();
        self.backend.set_parameters(parameters)
    }

    /// A snapshot of the fixed parameter vector.
    pub fn fixed_parameters(&self) -> Vec<f64> {
        self.backend.fixed_parameters()
    }

    /// Replace the fixed parameter vector.
    ///
    /// # Errors
    ///
    /// - `TransformError::InvalidArgument` if the length of `parameters` is
    /// not the number of fixed parameters of the transform.
    pub fn set_fixed_parameters(&mut self, parameters: &[f64]) -> Result<()> {
        self.make_unique_for_write();
        self.backend.set_fixed_parameters(parameters)
    }

    /// Map a point.
    ///
    /// # Errors
    ///
    /// - `TransformError::InvalidArgument` if the length of `point` is not
    /// the dimension of the transform.
    pub fn transform_point(&self, point: &[f64]) -> Result<Vec<f64>> {
        self.backend.transform_point(point)
    }

    /// Append a copy of `other` to this transform. A transform which is not
    /// composite is first turned into a composite transform holding it. The
    /// appended transform is applied before the existing ones.
    ///
    /// # Errors
    ///
    /// - `TransformError::InvalidArgument` if the dimensions differ.
    pub fn add_transform(&mut self, other: &Transform) -> Result<&mut Self> {
        if other.dimension() != self.dimension() {
            return Err(TransformError::InvalidArgument(format!(
                "cannot add a {}D transform to a {}D transform",
                other.dimension(),
                self.dimension()
            )));
        }
        if self.backend.get().is_composite() {
            self.make_unique_for_write();
        } else {
            // the promoted backend is new, so it never needs a copy on write
            debug!("Promoting a {} to a composite transform", self.name());
            let current = self.backend.get().clone();
            self.backend = Backend::new(dispatch::promote(current)?);
        }
        self.backend.add_transform(other.as_any())?;
        Ok(self)
    }

    /// Write this transform to a file. See [`WriterOptions`].
    pub fn write_transform<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        WriterOptions::new(path).write_transform(self)
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.backend, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_shares_until_write() {
        let mut a = Transform::new(3, TransformKind::Euler).unwrap();
        let b = a.clone();
        assert_eq!(a.reference_count(), 2);
        assert_eq!(a.backend_id(), b.backend_id());
        a.set_parameters(&[0., 0., 0., 1., 2., 3.]).unwrap();
        assert_eq!(a.reference_count(), 1);
        assert_eq!(b.reference_count(), 1);
        assert_eq!(b.parameters(), vec![0.; 6]);
    }

    #[test]
    fn unique_write_keeps_backend() {
        let mut a = Transform::new(2, TransformKind::Scale).unwrap();
        let id = a.backend_id();
        a.set_fixed_parameters(&[1., 1.]).unwrap();
        assert_eq!(a.backend_id(), id);
    }

    #[test]
    fn promotion_changes_identity() {
        let mut a = Transform::new(2, TransformKind::Translation).unwrap();
        let id = a.backend_id();
        let b = Transform::new(2, TransformKind::Translation).unwrap();
        let _ = a.add_transform(&b).unwrap();
        assert_ne!(a.backend_id(), id);
        assert_eq!(a.kind(), TransformKind::Composite);
        assert_eq!(a.reference_count(), 1);
    }

    #[test]
    fn promoting_a_shared_handle_leaves_the_other() {
        let mut a = Transform::new(2, TransformKind::Translation).unwrap();
        a.set_parameters(&[1., 2.]).unwrap();
        let b = a.clone();
        let shared = b.backend_id();
        let _ = a.add_transform(&Transform::new(2, TransformKind::Identity).unwrap()).unwrap();
        assert_eq!(a.reference_count(), 1);
        assert_eq!(b.reference_count(), 1);
        assert_eq!(b.backend_id(), shared);
        assert_eq!(b.kind(), TransformKind::Translation);
        assert_eq!(a.kind(), TransformKind::Composite);
        assert_eq!(a.transform_point(&[0., 0.]).unwrap(), vec![1., 2.]);
    }

    #[test]
    fn default_is_3d_identity() {
        let t = Transform::default();
        assert_eq!(t.dimension(), 3);
        assert_eq!(t.kind(), TransformKind::Identity);
        assert_eq!(t.name(), "IdentityTransform");
    }
}
