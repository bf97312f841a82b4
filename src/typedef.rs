//! This module contains the enumerated codes shared by the public API:
//! the transform kinds that can be requested at run time and the pixel
//! types understood by the image collaborator. Primitive integer codes can
//! be converted to these types and vice-versa.

use num_traits::FromPrimitive;

/// Data type for selecting a transform kind at run time.
///
/// The discriminants are stable and may be stored or exchanged as plain
/// integers (see [`TransformKind::from_code`]).
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, FromPrimitive)]
pub enum TransformKind {
    /// Maps every point onto itself.
    Identity = 0,
    /// Pure translation.
    Translation = 1,
    /// Per-axis scaling about a center.
    Scale = 2,
    /// Per-axis scaling parameterized by the logarithm of the factors.
    ScaleLogarithmic = 3,
    /// Rigid rotation expressed with Euler angles, plus translation.
    Euler = 4,
    /// Rigid rotation, isotropic scaling and translation.
    Similarity = 5,
    /// Rigid rotation expressed as a quaternion, plus translation. 3D only.
    QuaternionRigid = 6,
    /// Rotation expressed as a versor. 3D only.
    Versor = 7,
    /// Rotation expressed as a versor, plus translation. 3D only.
    VersorRigid = 8,
    /// General linear map plus translation.
    Affine = 9,
    /// Ordered chain of sub-transforms.
    Composite = 10,
    /// Dense displacement field. Only built from an image.
    DisplacementField = 11,
}

impl TransformKind {
    /// Convert a raw kind code into a transform kind.
    ///
    /// Unrecognized codes yield `None`.
    pub fn try_from_code(code: i32) -> Option<TransformKind> {
        FromPrimitive::from_i32(code)
    }

    /// Convert a raw kind code into a transform kind, falling back to
    /// `Identity` for unrecognized codes.
    pub fn from_code(code: i32) -> TransformKind {
        Self::try_from_code(code).unwrap_or_else(|| {
            warn!("Unknown transform kind code {}, using an identity transform", code);
            TransformKind::Identity
        })
    }

    /// Whether this kind only exists in three dimensions.
    pub fn is_3d_only(&self) -> bool {
        matches!(
            self,
            TransformKind::QuaternionRigid | TransformKind::Versor | TransformKind::VersorRigid
        )
    }
}

/// Data type for the pixel representation of an [`Image`](crate::Image).
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, FromPrimitive)]
pub enum PixelId {
    /// unsigned char.
    UInt8 = 1,
    /// signed short.
    Int16 = 2,
    /// 32 bit float.
    Float32 = 8,
    /// 64 bit float = double.
    Float64 = 9,
    /// vector of unsigned char.
    VectorUInt8 = 13,
    /// vector of 32 bit floats.
    VectorFloat32 = 20,
    /// vector of 64 bit floats.
    VectorFloat64 = 21,
}

impl PixelId {
    /// Whether pixels of this type hold more than one component.
    pub fn is_vector(&self) -> bool {
        matches!(
            self,
            PixelId::VectorUInt8 | PixelId::VectorFloat32 | PixelId::VectorFloat64
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{PixelId, TransformKind};

    #[test]
    fn kind_codes() {
        assert_eq!(TransformKind::try_from_code(4), Some(TransformKind::Euler));
        assert_eq!(TransformKind::try_from_code(11), Some(TransformKind::DisplacementField));
        assert_eq!(TransformKind::try_from_code(12), None);
        assert_eq!(TransformKind::try_from_code(-1), None);
        assert_eq!(TransformKind::from_code(99), TransformKind::Identity);
        assert_eq!(TransformKind::Composite as i32, 10);
    }

    #[test]
    fn three_dimensional_kinds() {
        assert!(TransformKind::Versor.is_3d_only());
        assert!(TransformKind::VersorRigid.is_3d_only());
        assert!(TransformKind::QuaternionRigid.is_3d_only());
        assert!(!TransformKind::Euler.is_3d_only());
        assert!(!TransformKind::Composite.is_3d_only());
    }

    #[test]
    fn vector_pixels() {
        assert!(PixelId::VectorFloat64.is_vector());
        assert!(!PixelId::Float64.is_vector());
    }
}
