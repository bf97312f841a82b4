//! Kind-specific views over a [`Transform`].
//!
//! A facade such as [`Euler3DTransform`] holds a transform handle and a
//! binding to its backend. The binding is established when the backend
//! holds a transform of the facade's kind, and records the backend's
//! identity. Every operation which may replace the backend (a copy on
//! write, a promotion to composite, a replacement of the whole transform)
//! recomputes the binding, so that named accessors never read a backend
//! other than the current one. Accessors of an unbound facade fail with
//! `TransformError::Unsupported`.

use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;

use nalgebra::SVector;

use crate::backend::BackendId;
use crate::error::{Result, TransformError};
use crate::geometry::AnyTransform;
use crate::transform::Transform;

pub mod affine;
pub mod euler;
pub mod similarity;
pub mod versor;

pub use self::affine::{AffineKind, AffineTransform};
pub use self::euler::{Euler2DKind, Euler2DTransform, Euler3DKind, Euler3DTransform};
pub use self::similarity::{
    Similarity2DKind, Similarity2DTransform, Similarity3DKind, Similarity3DTransform,
};
pub use self::versor::{VersorKind, VersorRigid3DKind, VersorRigid3DTransform, VersorTransform};

/// A kind of concrete transform a facade can bind to.
pub trait Bindable {
    /// The concrete transform exposed by the facade's accessors.
    type Target;

    /// Name of the facade, for error messages.
    const NAME: &'static str;

    /// The concrete transform, if `transform` is of this kind.
    fn bind(transform: &AnyTransform) -> Option<&Self::Target>;

    /// The concrete transform, if `transform` is of this kind.
    fn bind_mut(transform: &mut AnyTransform) -> Option<&mut Self::Target>;
}

/// State of a facade's accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// Accessors are bound to the backend with this identity.
    Bound(BackendId),
    /// The backend is not of the facade's kind.
    Unbound,
}

/// A transform handle with accessors bound to a specific kind of transform.
///
/// Dereferences to the underlying [`Transform`] for read access. Writes go
/// through the facade so that the binding is kept up to date.
#[derive(Debug)]
pub struct BoundTransform<K> {
    transform: Transform,
    binding: Binding,
    kind: PhantomData<K>,
}

impl<K: Bindable> BoundTransform<K> {
    /// Wrap a transform handle. If the transform is not of kind `K`, the
    /// facade is created unbound.
    pub fn from_transform(transform: Transform) -> Self {
        let mut facade = BoundTransform {
            transform,
            binding: Binding::Unbound,
            kind: PhantomData,
        };
        facade.rebind();
        facade
    }

    /// The current binding.
    pub fn binding(&self) -> Binding {
        self.binding
    }

    /// Whether the named accessors are usable.
    pub fn is_bound(&self) -> bool {
        self.binding != Binding::Unbound
    }

    /// The underlying transform handle.
    pub fn into_transform(self) -> Transform {
        self.transform
    }

    fn rebind(&mut self) {
        let binding = if K::bind(self.transform.as_any()).is_some() {
            Binding::Bound(self.transform.backend_id())
        } else {
            Binding::Unbound
        };
        if binding != self.binding {
            debug!("{} accessors rebound: {:?}", K::NAME, binding);
        }
        self.binding = binding;
    }

    /// Run an operation which may change the backend, then rebind.
    fn update<R>(&mut self, op: impl FnOnce(&mut Transform) -> Result<R>) -> Result<R> {
        let result = op(&mut self.transform);
        self.rebind();
        result
    }

    fn unsupported(&self) -> TransformError {
        TransformError::Unsupported(format!(
            "{} accessor called on a {}",
            K::NAME,
            self.transform.name()
        ))
    }

    fn check_binding(&self) -> Result<()> {
        match self.binding {
            Binding::Unbound => Err(self.unsupported()),
            Binding::Bound(id) if id != self.transform.backend_id() => {
                Err(TransformError::InternalInconsistency(format!(
                    "{} accessors are bound to a released backend",
                    K::NAME
                )))
            }
            Binding::Bound(_) => Ok(()),
        }
    }

    /// The concrete transform behind the binding.
    pub(crate) fn target(&self) -> Result<&K::Target> {
        self.check_binding()?;
        K::bind(self.transform.as_any()).ok_or_else(|| cast_failed::<K>())
    }

    /// Make the handle unique, then write to the concrete transform.
    pub(crate) fn write_target<R>(
        &mut self,
        op: impl FnOnce(&mut K::Target) -> Result<R>,
    ) -> Result<R> {
        if self.binding == Binding::Unbound {
            return Err(self.unsupported());
        }
        self.transform.make_unique_for_write();
        self.rebind();
        self.check_binding()?;
        let target = K::bind_mut(self.transform.any_mut()?).ok_or_else(|| cast_failed::<K>())?;
        op(target)
    }

    /// Replace the whole transform, rebinding to the new backend.
    pub fn set_transform(&mut self, transform: Transform) -> &mut Self {
        self.transform = transform;
        self.rebind();
        self
    }

    /// Replace the parameter vector. See [`Transform::set_parameters`].
    pub fn set_parameters(&mut self, parameters: &[f64]) -> Result<&mut Self> {
        self.update(|t| t.set_parameters(parameters))?;
        Ok(self)
    }

    /// Replace the fixed parameter vector. See
    /// [`Transform::set_fixed_parameters`].
    pub fn set_fixed_parameters(&mut self, parameters: &[f64]) -> Result<&mut Self> {
        self.update(|t| t.set_fixed_parameters(parameters))?;
        Ok(self)
    }

    /// Append a transform. See [`Transform::add_transform`]. The transform
    /// becomes composite, so the facade is unbound afterwards.
    pub fn add_transform(&mut self, other: &Transform) -> Result<&mut Self> {
        self.update(|t| t.add_transform(other).map(|_| ()))?;
        Ok(self)
    }
}

fn cast_failed<K: Bindable>() -> TransformError {
    TransformError::InternalInconsistency(format!(
        "bound transform is not a {}",
        K::NAME
    ))
}

impl<K: Bindable> Clone for BoundTransform<K> {
    fn clone(&self) -> Self {
        BoundTransform::from_transform(self.transform.clone())
    }
}

impl<K> Deref for BoundTransform<K> {
    type Target = Transform;

    fn deref(&self) -> &Transform {
        &self.transform
    }
}

impl<K> AsRef<Transform> for BoundTransform<K> {
    fn as_ref(&self) -> &Transform {
        &self.transform
    }
}

impl<K> From<BoundTransform<K>> for Transform {
    fn from(facade: BoundTransform<K>) -> Transform {
        facade.transform
    }
}

impl<K> fmt::Display for BoundTransform<K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.transform, f)
    }
}

/// Convert a slice into a fixed-size vector.
pub(crate) fn to_vector<const D: usize>(what: &str, values: &[f64]) -> Result<SVector<f64, D>> {
    if values.len() != D {
        return Err(TransformError::InvalidArgument(format!(
            "{} must have {} elements, got {}",
            what,
            D,
            values.len()
        )));
    }
    Ok(SVector::from_column_slice(values))
}
