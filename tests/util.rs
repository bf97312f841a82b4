use std::path::PathBuf;

use approx::assert_abs_diff_eq;
use simple_transform::{Transform, TransformKind};
use tempfile::TempDir;

/// A path to a file named `name` inside a fresh temporary directory. The
/// directory is removed when the returned guard is dropped.
#[allow(dead_code)]
pub fn temporary_path(name: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    (dir, path)
}

/// Every kind available in both 2D and 3D, through the dispatch table.
#[allow(dead_code)]
pub const GENERIC_KINDS: [TransformKind; 8] = [
    TransformKind::Identity,
    TransformKind::Translation,
    TransformKind::Scale,
    TransformKind::ScaleLogarithmic,
    TransformKind::Euler,
    TransformKind::Similarity,
    TransformKind::Affine,
    TransformKind::Composite,
];

/// Kinds only available in 3D.
#[allow(dead_code)]
pub const KINDS_3D: [TransformKind; 3] = [
    TransformKind::QuaternionRigid,
    TransformKind::Versor,
    TransformKind::VersorRigid,
];

/// A parameter vector of the right length with distinct, valid values.
#[allow(dead_code)]
pub fn sample_parameters(t: &Transform) -> Vec<f64> {
    let n = t.parameters().len();
    (0..n).map(|i| 0.05 * (i + 1) as f64).collect()
}

/// Check that two transforms map a few points to the same place.
#[allow(dead_code)]
pub fn assert_same_mapping(a: &Transform, b: &Transform) {
    let dim = a.dimension();
    assert_eq!(dim, b.dimension());
    for k in 0..4 {
        let point: Vec<f64> = (0..dim).map(|i| (k * dim + i) as f64 - 2.5).collect();
        let pa = a.transform_point(&point).unwrap();
        let pb = b.transform_point(&point).unwrap();
        for (x, y) in pa.iter().zip(&pb) {
            assert_abs_diff_eq!(*x, *y, epsilon = 1e-9);
        }
    }
}
