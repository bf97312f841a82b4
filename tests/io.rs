mod util;

use std::fs;

use flate2::Compression;
use pretty_assertions::assert_eq;
use simple_transform::{
    read_transform, write_transform, Euler3DTransform, Image, MultipleTransformPolicy, PixelId,
    ReaderOptions, Transform, TransformError, TransformKind, WriterOptions,
};

use util::{assert_same_mapping, sample_parameters, temporary_path, GENERIC_KINDS, KINDS_3D};

fn configured(dim: usize, kind: TransformKind) -> Transform {
    let mut t = Transform::new(dim, kind).unwrap();
    let p = sample_parameters(&t);
    t.set_parameters(&p).unwrap();
    let center: Vec<f64> = t.fixed_parameters().iter().map(|_| 0.5).collect();
    t.set_fixed_parameters(&center).unwrap();
    t
}

#[test]
fn round_trip_every_kind() {
    for name in &["transform.tfm", "transform.tfm.gz"] {
        for dim in &[2, 3] {
            let kinds_3d: &[TransformKind] = if *dim == 3 { &KINDS_3D } else { &[] };
            for kind in GENERIC_KINDS.iter().chain(kinds_3d) {
                let (_dir, path) = temporary_path(name);
                let t = configured(*dim, *kind);
                t.write_transform(&path).unwrap();
                let read = read_transform(&path).unwrap();
                assert_eq!(read.kind(), TransformKind::Composite);
                assert_eq!(read.dimension(), *dim);
                assert_eq!(read.parameters(), t.parameters(), "{:?} {}D", kind, dim);
                assert_eq!(read.fixed_parameters(), t.fixed_parameters());
                assert_same_mapping(&t, &read);
            }
        }
    }
}

#[test]
fn round_trip_composite() {
    let mut t = Transform::new(3, TransformKind::Composite).unwrap();
    let _ = t.add_transform(&configured(3, TransformKind::Euler)).unwrap();
    let _ = t.add_transform(&configured(3, TransformKind::Scale)).unwrap();
    let (_dir, path) = temporary_path("composite.tfm");
    write_transform(&t, &path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("#Insight Transform File V1.0\n"));
    assert!(text.contains("Transform: CompositeTransform_double_3_3"));
    assert!(text.contains("#Transform 3"));

    let read = read_transform(&path).unwrap();
    assert_eq!(read.parameters(), t.parameters());
    assert_same_mapping(&t, &read);
}

#[test]
fn gzip_files_are_compressed() {
    let t = configured(3, TransformKind::Affine);
    let (_dir, path) = temporary_path("affine.tfm.gz");
    WriterOptions::new(&path)
        .compression(Compression::best())
        .write_transform(&t)
        .unwrap();
    let bytes = fs::read(&path).unwrap();
    assert_eq!(&bytes[..2], &[0x1f, 0x8b]);
    assert_same_mapping(&t, &read_transform(&path).unwrap());
}

#[test]
fn writing_overwrites() {
    let (_dir, path) = temporary_path("overwrite.tfm");
    configured(3, TransformKind::Affine).write_transform(&path).unwrap();
    configured(2, TransformKind::Translation)
        .write_transform(&path)
        .unwrap();
    let read = read_transform(&path).unwrap();
    assert_eq!(read.dimension(), 2);
}

#[test]
fn round_trip_displacement_field() {
    let size = [3, 2];
    let data = ndarray::Array2::from_shape_fn((6, 2), |(i, c)| (i * 2 + c) as f64 * 0.1);
    let mut image = Image::from_data(&size, PixelId::VectorFloat64, data)
        .unwrap()
        .with_origin(&[1., -1.])
        .unwrap()
        .with_spacing(&[0.5, 2.])
        .unwrap();
    let t = Transform::from_displacement_field(&mut image).unwrap();
    let (_dir, path) = temporary_path("field.tfm");
    t.write_transform(&path).unwrap();
    let read = read_transform(&path).unwrap();
    assert_eq!(read.parameters(), t.parameters());
    assert_eq!(read.fixed_parameters(), t.fixed_parameters());
    assert_same_mapping(&t, &read);
}

const TWO_TRANSFORMS: &str = "#Insight Transform File V1.0
#Transform 0
Transform: TranslationTransform_double_2_2
Parameters: 1 2
FixedParameters:
#Transform 1
Transform: TranslationTransform_double_2_2
Parameters: 3 4
FixedParameters:
";

#[test]
fn multiple_transforms_use_first_by_default() {
    let t = ReaderOptions::new()
        .read_from(TWO_TRANSFORMS.as_bytes())
        .unwrap();
    assert_eq!(t.parameters(), vec![1., 2.]);
}

#[test]
fn multiple_transforms_can_be_rejected() {
    let options = ReaderOptions::new().multiple_transforms(MultipleTransformPolicy::Reject);
    match options.read_from(TWO_TRANSFORMS.as_bytes()) {
        Err(TransformError::MultipleTransforms(2)) => {}
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn matrix_offset_base_reads_as_affine() {
    let text = "#Insight Transform File V1.0
#Transform 0
Transform: MatrixOffsetTransformBase_double_3_3
Parameters: 2 0 0 0 2 0 0 0 2 1 1 1
FixedParameters: 0 0 0
";
    let (_dir, path) = temporary_path("matrix_offset.tfm");
    fs::write(&path, text).unwrap();
    let t = read_transform(&path).unwrap();
    assert_eq!(t.transform_point(&[1., 1., 1.]).unwrap(), vec![3., 3., 3.]);
    let written = {
        let (_dir, out) = temporary_path("affine.tfm");
        t.write_transform(&out).unwrap();
        fs::read_to_string(&out).unwrap()
    };
    assert!(written.contains("AffineTransform_double_3_3"));
}

#[test]
fn unsupported_dimensions() {
    let text = "#Insight Transform File V1.0
#Transform 0
Transform: AffineTransform_double_4_4
Parameters: 1 0 0 0 0 1 0 0 0 0 1 0 0 0 0 1 0 0 0 0
FixedParameters: 0 0 0 0
";
    match ReaderOptions::new().read_from(text.as_bytes()) {
        Err(TransformError::Unsupported(msg)) => {
            assert!(msg.contains("AffineTransform"));
            assert!(msg.contains('4'));
        }
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn oversized_displacement_field_is_rejected() {
    let text = "#Insight Transform File V1.0
#Transform 0
Transform: DisplacementFieldTransform_double_2_2
Parameters:
FixedParameters: 1e10 1e10 0 0 1 1 1 0 0 1
";
    match ReaderOptions::new().read_from(text.as_bytes()) {
        Err(TransformError::InvalidArgument(_)) => {}
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn facade_writes_its_transform() {
    let mut rigid = Euler3DTransform::new();
    let _ = rigid.set_rotation(0.3, 0.2, 0.1).unwrap();
    let (_dir, path) = temporary_path("euler.tfm");
    rigid.write_transform(&path).unwrap();
    let read = read_transform(&path).unwrap();
    assert_eq!(read.parameters(), rigid.parameters());
}

#[test]
fn missing_file_is_an_io_error() {
    let (_dir, path) = temporary_path("missing.tfm");
    match read_transform(&path) {
        Err(TransformError::Io(_)) => {}
        other => panic!("unexpected result {:?}", other),
    }
}
