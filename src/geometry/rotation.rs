//! Rotation helpers shared by the rigid and similarity transforms.

use approx::abs_diff_eq;
use nalgebra::{Matrix2, Matrix3, Matrix4, Quaternion, SymmetricEigen, UnitQuaternion, Vector3};

use crate::error::{Result, TransformError};

const VERSOR_THRESHOLD: f64 = -::std::f64::EPSILON * 3.0;

/// Compute a unit quaternion (versor) from its right part.
///
/// If w, x, y, z are the values in the full quaternion, assumes w is positive.
/// w = 0.0 corresponds to a 180 degree rotation.
///
/// If w is positive (assumed here), w is given by:
///     w = (1.0 - (x*x + y*y + z*z)).sqrt()
///
/// # Errors
///
/// - `TransformError::InvalidArgument` if `x*x + y*y + z*z` is greater than 1.
pub fn fill_positive(xyz: Vector3<f64>) -> Result<UnitQuaternion<f64>> {
    let w2 = 1.0 - xyz.dot(&xyz);
    let w = if w2 < 0.0 {
        if w2 < VERSOR_THRESHOLD {
            return Err(TransformError::InvalidArgument(format!(
                "versor right part has norm {}, which is greater than 1",
                xyz.norm()
            )));
        }
        0.0
    } else {
        w2.sqrt()
    };
    Ok(UnitQuaternion::new_unchecked(Quaternion::new(w, xyz.x, xyz.y, xyz.z)))
}

/// Right part of a versor, choosing the representation with a non-negative
/// `w`.
pub fn versor_right_part(versor: &UnitQuaternion<f64>) -> Vector3<f64> {
    let q = versor.quaternion();
    if q.w < 0.0 {
        -q.imag()
    } else {
        q.imag()
    }
}

/// Build a versor rotating by `angle` radians around `axis`.
///
/// # Errors
///
/// - `TransformError::InvalidArgument` if `axis` has zero length.
pub fn versor_from_axis_angle(axis: &Vector3<f64>, angle: f64) -> Result<UnitQuaternion<f64>> {
    let norm = axis.norm();
    if abs_diff_eq!(norm, 0.0) {
        return Err(TransformError::InvalidArgument(
            "rotation axis must not be a null vector".to_string(),
        ));
    }
    let half = angle / 2.0;
    let right = axis * (half.sin() / norm);
    let q = Quaternion::new(half.cos(), right.x, right.y, right.z);
    // prefer the representation with a positive `w`
    let q = if q.w < 0.0 { -q } else { q };
    Ok(UnitQuaternion::new_unchecked(q))
}

/// Calculate the rotation matrix corresponding to a quaternion.
///
/// Rotation matrix applies to column vectors, and is applied to the left of coordinate vectors.
/// The algorithm here allows non-unit quaternions. A null quaternion yields the identity.
///
/// Algorithm from https://en.wikipedia.org/wiki/Rotation_matrix#Quaternion
#[rustfmt::skip]
pub fn quaternion_to_matrix(q: &Quaternion<f64>) -> Matrix3<f64> {
    let nq = q.w * q.w + q.i * q.i + q.j * q.j + q.k * q.k;
    if nq < ::std::f64::EPSILON {
        return Matrix3::identity();
    }
    let s = 2.0 / nq;
    let x = q.i * s;
    let y = q.j * s;
    let z = q.k * s;
    let wx = q.w * x;
    let wy = q.w * y;
    let wz = q.w * z;
    let xx = q.i * x;
    let xy = q.i * y;
    let xz = q.i * z;
    let yy = q.j * y;
    let yz = q.j * z;
    let zz = q.k * z;
    Matrix3::new(
        1.0 - (yy + zz), xy - wz, xz + wy,
        xy + wz, 1.0 - (xx + zz), yz - wx,
        xz - wy, yz + wx, 1.0 - (xx + yy),
    )
}

/// Calculate the versor corresponding to a rotation matrix.
///
/// Method claimed to be robust to numerical errors in `matrix`. Constructs quaternion by
/// calculating maximum eigenvector for matrix `k` (constructed from input `matrix`).
/// A maximum eigenvalue of 1 corresponds to a valid rotation.
///
/// A quaternion `q * -1.0` corresponds to the same rotation as `q`; we return the one with a
/// non-negative `w`.
///
/// Bar-Itzhack, Itzhack Y. "New method for extracting the quaternion from a rotation
/// matrix", AIAA Journal of Guidance, Control and Dynamics 23(6):1085-1087, 2000
///
/// # Errors
///
/// - `TransformError::InvalidArgument` if `matrix` is not orthogonal with a
/// positive determinant.
#[rustfmt::skip]
pub fn matrix_to_versor(matrix: &Matrix3<f64>) -> Result<UnitQuaternion<f64>> {
    let orthogonality = matrix * matrix.transpose() - Matrix3::identity();
    if orthogonality.amax() > 1e-10 || matrix.determinant() <= 0.0 {
        return Err(TransformError::InvalidArgument(
            "matrix is not a proper rotation matrix".to_string(),
        ));
    }

    // qyx refers to the contribution of the y input vector component to the x output vector
    // component. qyx is therefore the same as M[0, 1].
    let qxx = matrix[(0, 0)];
    let qyx = matrix[(0, 1)];
    let qzx = matrix[(0, 2)];
    let qxy = matrix[(1, 0)];
    let qyy = matrix[(1, 1)];
    let qzy = matrix[(1, 2)];
    let qxz = matrix[(2, 0)];
    let qyz = matrix[(2, 1)];
    let qzz = matrix[(2, 2)];

    // Fill only lower half of symmetric matrix
    let k = Matrix4::new(
        qxx - qyy - qzz, 0.0,             0.0,             0.0,
        qyx + qxy,       qyy - qxx - qzz, 0.0,             0.0,
        qzx + qxz,       qzy + qyz,       qzz - qxx - qyy, 0.0,
        qyz - qzy,       qzx - qxz,       qxy - qyx,       qxx + qyy + qzz,
    ) / 3.0;

    let SymmetricEigen { eigenvalues: values, eigenvectors: vectors } = k.symmetric_eigen();

    // Select largest eigenvector, reorder to w,x,y,z quaternion
    let mut max_idx = 0;
    for (i, v) in values.iter().enumerate() {
        if *v > values[max_idx] {
            max_idx = i;
        }
    }
    let v = vectors.column(max_idx);
    let q = Quaternion::new(v[3], v[0], v[1], v[2]);

    // Prefer quaternion with positive `w`.
    let q = if q.w < 0.0 { -q } else { q };
    Ok(UnitQuaternion::from_quaternion(q))
}

/// Counter-clockwise rotation in the plane.
#[rustfmt::skip]
pub fn rotation_2d(angle: f64) -> Matrix2<f64> {
    let (s, c) = angle.sin_cos();
    Matrix2::new(
        c, -s,
        s,  c,
    )
}

/// Rotation matrix of Euler angles, applied around Y first, then X, then Z
/// (or X, then Y, then Z when `compute_zyx` is set).
#[rustfmt::skip]
pub fn euler_3d(angle_x: f64, angle_y: f64, angle_z: f64, compute_zyx: bool) -> Matrix3<f64> {
    let (sx, cx) = angle_x.sin_cos();
    let (sy, cy) = angle_y.sin_cos();
    let (sz, cz) = angle_z.sin_cos();
    let rx = Matrix3::new(
        1.0, 0.0, 0.0,
        0.0, cx,  -sx,
        0.0, sx,  cx,
    );
    let ry = Matrix3::new(
        cy,  0.0, sy,
        0.0, 1.0, 0.0,
        -sy, 0.0, cy,
    );
    let rz = Matrix3::new(
        cz,  -sz, 0.0,
        sz,  cz,  0.0,
        0.0, 0.0, 1.0,
    );
    if compute_zyx {
        rz * ry * rx
    } else {
        rz * rx * ry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn fill_positive_right_part() {
        let q = fill_positive(Vector3::new(0.0, 0.0, 0.0)).unwrap();
        assert_abs_diff_eq!(q.quaternion().w, 1.0);

        let s = (0.5f64).sqrt();
        let q = fill_positive(Vector3::new(0.0, 0.0, s)).unwrap();
        assert_abs_diff_eq!(q.quaternion().w, s, epsilon = 1e-12);
        assert_abs_diff_eq!(q.angle(), FRAC_PI_2, epsilon = 1e-12);

        assert!(fill_positive(Vector3::new(1.0, 1.0, 0.0)).is_err());
    }

    #[test]
    fn quaternion_matrix_round_trip() {
        let versor = versor_from_axis_angle(&Vector3::new(1.0, 2.0, 3.0), 0.7).unwrap();
        let m = quaternion_to_matrix(versor.quaternion());
        assert_abs_diff_eq!(m, *versor.to_rotation_matrix().matrix(), epsilon = 1e-12);

        let back = matrix_to_versor(&m).unwrap();
        assert_abs_diff_eq!(
            versor_right_part(&back),
            versor_right_part(&versor),
            epsilon = 1e-9
        );
    }

    #[test]
    fn null_quaternion_is_identity() {
        let m = quaternion_to_matrix(&Quaternion::new(0.0, 0.0, 0.0, 0.0));
        assert_eq!(m, Matrix3::identity());
    }

    #[test]
    fn non_rotation_matrix_is_rejected() {
        let m = Matrix3::from_diagonal(&Vector3::new(2.0, 1.0, 1.0));
        assert!(matrix_to_versor(&m).is_err());
    }

    #[test]
    fn euler_order() {
        let m = euler_3d(0.0, 0.0, FRAC_PI_2, false);
        let p = m * Vector3::new(1.0, 0.0, 0.0);
        assert_abs_diff_eq!(p, Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-12);

        let a = euler_3d(0.3, 0.2, 0.1, false);
        let b = euler_3d(0.3, 0.2, 0.1, true);
        assert!((a - b).amax() > 1e-6);
    }
}
