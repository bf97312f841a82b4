//! Shared, reference counted storage of a concrete transform.

use std::fmt;
use std::sync::Arc;

use crate::error::{Result, TransformError};
use crate::geometry::AnyTransform;

/// Identity of a backend allocation. Two backends share an identity if and
/// only if they share the same concrete transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BackendId(usize);

/// A concrete transform behind a shared reference.
///
/// Copies made with [`Backend::shallow_copy`] share the same transform;
/// [`Backend::unique_mut`] refuses to hand out mutable access while the
/// transform is shared.
#[derive(Debug)]
pub struct Backend {
    inner: Arc<AnyTransform>,
}

impl Backend {
    /// Wrap a concrete transform in a new, unshared backend.
    pub fn new(transform: AnyTransform) -> Self {
        Backend {
            inner: Arc::new(transform),
        }
    }

    /// The identity of this backend allocation.
    pub fn id(&self) -> BackendId {
        BackendId(Arc::as_ptr(&self.inner) as usize)
    }

    /// Number of backends sharing this transform.
    pub fn reference_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Whether this backend is the only owner of its transform.
    pub fn is_unique(&self) -> bool {
        self.reference_count() == 1
    }

    /// A new backend sharing the same transform.
    pub fn shallow_copy(&self) -> Backend {
        Backend {
            inner: Arc::clone(&self.inner),
        }
    }

    /// A new, unshared backend over a copy of the transform.
    pub fn deep_copy(&self) -> Backend {
        Backend::new(AnyTransform::clone(&self.inner))
    }

    /// The concrete transform.
    pub fn get(&self) -> &AnyTransform {
        &self.inner
    }

    /// Mutable access to the concrete transform.
    ///
    /// # Errors
    ///
    /// - `TransformError::InternalInconsistency` if the transform is shared.
    pub fn unique_mut(&mut self) -> Result<&mut AnyTransform> {
        let count = Arc::strong_count(&self.inner);
        Arc::get_mut(&mut self.inner).ok_or_else(|| {
            TransformError::InternalInconsistency(format!(
                "attempted to write to a backend shared by {} handles",
                count
            ))
        })
    }

    /// Dimension of the input space.
    pub fn input_dimension(&self) -> usize {
        self.inner.input_dimension()
    }

    /// A snapshot of the parameter vector.
    pub fn parameters(&self) -> Vec<f64> {
        self.inner.parameters()
    }

    /// Replace the parameter vector of an unshared backend.
    pub fn set_parameters(&mut self, parameters: &[f64]) -> Result<()> {
        self.unique_mut()?.set_parameters(parameters)
    }

    /// A snapshot of the fixed parameter vector.
    pub fn fixed_parameters(&self) -> Vec<f64> {
        self.inner.fixed_parameters()
    }

    /// Replace the fixed parameter vector of an unshared backend.
    pub fn set_fixed_parameters(&mut self, parameters: &[f64]) -> Result<()> {
        self.unique_mut()?.set_fixed_parameters(parameters)
    }

    /// Map a point.
    pub fn transform_point(&self, point: &[f64]) -> Result<Vec<f64>> {
        self.inner.transform_point(point)
    }

    /// Append a copy of `other` to an unshared composite backend. The
    /// most recently added transform becomes the only one to optimize.
    ///
    /// # Errors
    ///
    /// - `TransformError::Unsupported` if this backend is not composite.
    /// - `TransformError::InvalidArgument` on a dimension mismatch.
    pub fn add_transform(&mut self, other: &AnyTransform) -> Result<()> {
        match self.unique_mut()? {
            AnyTransform::Composite2(c) => {
                c.add_transform(other.clone())?;
                c.set_only_most_recent_transform_to_optimize_on();
            }
            AnyTransform::Composite3(c) => {
                c.add_transform(other.clone())?;
                c.set_only_most_recent_transform_to_optimize_on();
            }
            t => {
                return Err(TransformError::Unsupported(format!(
                    "cannot add a transform to a {}",
                    t.name_of_class()
                )))
            }
        }
        Ok(())
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&*self.inner, f)
    }
}
