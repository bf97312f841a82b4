mod util;

use approx::assert_abs_diff_eq;
use ndarray::Array2;
use pretty_assertions::assert_eq;
use simple_transform::{Image, PixelId, Transform, TransformError, TransformKind};

use util::{sample_parameters, GENERIC_KINDS, KINDS_3D};

#[test]
fn parameter_lengths() {
    let expected_2d = [0, 2, 2, 2, 3, 4, 6, 0];
    let expected_3d = [0, 3, 3, 3, 6, 7, 12, 0];
    for (kind, (n2, n3)) in GENERIC_KINDS
        .iter()
        .zip(expected_2d.iter().zip(expected_3d.iter()))
    {
        let t2 = Transform::new(2, *kind).unwrap();
        assert_eq!(t2.parameters().len(), *n2, "{:?} in 2D", kind);
        assert_eq!(t2.dimension(), 2);
        let t3 = Transform::new(3, *kind).unwrap();
        assert_eq!(t3.parameters().len(), *n3, "{:?} in 3D", kind);
        assert_eq!(t3.dimension(), 3);
    }
    let expected = [7, 3, 6];
    for (kind, n) in KINDS_3D.iter().zip(expected.iter()) {
        let t = Transform::new(3, *kind).unwrap();
        assert_eq!(t.parameters().len(), *n, "{:?}", kind);
        assert_eq!(t.fixed_parameters(), vec![0.; 3]);
    }
}

#[test]
fn new_transforms_are_identity() {
    let point = [1.5, -2.0, 0.25];
    for kind in GENERIC_KINDS.iter().chain(KINDS_3D.iter()) {
        let t = Transform::new(3, *kind).unwrap();
        let p = t.transform_point(&point).unwrap();
        for (a, b) in p.iter().zip(point.iter()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-12);
        }
    }
}

#[test]
fn dimension_is_validated() {
    for kind in GENERIC_KINDS.iter().chain(KINDS_3D.iter()) {
        for dim in &[0, 1, 4] {
            match Transform::new(*dim, *kind) {
                Err(TransformError::InvalidArgument(_)) => {}
                other => panic!("{:?} in {}D: unexpected result {:?}", kind, dim, other),
            }
        }
    }
    for kind in KINDS_3D.iter() {
        match Transform::new(2, *kind) {
            Err(TransformError::InvalidArgument(_)) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }
    for dim in &[2, 3] {
        assert!(Transform::new(*dim, TransformKind::DisplacementField).is_err());
    }
}

#[test]
fn copy_on_write() {
    let mut a = Transform::new(2, TransformKind::Affine).unwrap();
    let b = a.clone();
    let c = b.clone();
    assert_eq!(a.reference_count(), 3);

    a.set_parameters(&[2., 0., 0., 2., 1., 1.]).unwrap();
    assert_eq!(a.reference_count(), 1);
    assert_eq!(b.reference_count(), 2);
    assert_eq!(b.parameters(), vec![1., 0., 0., 1., 0., 0.]);
    assert_eq!(c.parameters(), b.parameters());

    drop(c);
    assert_eq!(b.reference_count(), 1);
}

#[test]
fn wrong_parameter_length_is_reported() {
    let mut t = Transform::new(3, TransformKind::Euler).unwrap();
    match t.set_parameters(&[1., 2.]) {
        Err(TransformError::InvalidArgument(_)) => {}
        other => panic!("unexpected result {:?}", other),
    }
    match t.set_fixed_parameters(&[1., 2.]) {
        Err(TransformError::InvalidArgument(_)) => {}
        other => panic!("unexpected result {:?}", other),
    }
    assert_eq!(t.parameters(), vec![0.; 6]);
}

#[test]
fn point_length_is_checked() {
    for dim in &[2usize, 3] {
        let kinds_3d: &[TransformKind] = if *dim == 3 { &KINDS_3D } else { &[] };
        for kind in GENERIC_KINDS.iter().chain(kinds_3d) {
            let t = Transform::new(*dim, *kind).unwrap();
            assert!(t.transform_point(&vec![1.; *dim]).is_ok());
            for len in &[0, dim - 1, dim + 1] {
                match t.transform_point(&vec![1.; *len]) {
                    Err(TransformError::InvalidArgument(_)) => {}
                    other => panic!("{:?} in {}D: unexpected result {:?}", kind, dim, other),
                }
            }
        }
    }
}

#[test]
fn fresh_composite_is_never_empty() {
    for dim in &[2, 3] {
        let t = Transform::new(*dim, TransformKind::Composite).unwrap();
        assert_eq!(t.kind(), TransformKind::Composite);
        match t.as_any() {
            simple_transform::AnyTransform::Composite2(c) => {
                assert_eq!(c.number_of_transforms(), 1)
            }
            simple_transform::AnyTransform::Composite3(c) => {
                assert_eq!(c.number_of_transforms(), 1)
            }
            other => panic!("unexpected transform {:?}", other),
        }
    }
}

#[test]
fn add_transform_promotes_and_composes() {
    let mut a = Transform::new(2, TransformKind::Translation).unwrap();
    a.set_parameters(&[1., 0.]).unwrap();
    let shared = a.clone();

    let mut scale = Transform::new(2, TransformKind::Scale).unwrap();
    scale.set_parameters(&[2., 2.]).unwrap();
    let _ = a.add_transform(&scale).unwrap();

    assert_eq!(a.kind(), TransformKind::Composite);
    assert_eq!(shared.kind(), TransformKind::Translation);
    assert_eq!(shared.reference_count(), 1);
    // scale applies first, being the most recently added
    assert_eq!(a.transform_point(&[1., 1.]).unwrap(), vec![3., 2.]);
    // only the most recent transform is optimized
    assert_eq!(a.parameters(), vec![2., 2.]);

    // later changes to the added transform are not seen
    scale.set_parameters(&[5., 5.]).unwrap();
    assert_eq!(a.parameters(), vec![2., 2.]);

    let other = Transform::new(3, TransformKind::Identity).unwrap();
    match a.add_transform(&other) {
        Err(TransformError::InvalidArgument(_)) => {}
        other => panic!("unexpected result {:?}", other.map(|_| ())),
    }
}

#[test]
fn composite_parameters_route_to_most_recent() {
    let mut t = Transform::new(3, TransformKind::Composite).unwrap();
    let euler = Transform::new(3, TransformKind::Euler).unwrap();
    let _ = t.add_transform(&euler).unwrap();
    let p = sample_parameters(&t);
    assert_eq!(p.len(), 6);
    t.set_parameters(&p).unwrap();
    assert_eq!(t.parameters(), p);
}

#[test]
fn unknown_kind_code_falls_back_to_identity() {
    let t = Transform::from_kind_code(2, 42).unwrap();
    assert_eq!(t.kind(), TransformKind::Identity);
    let t = Transform::from_kind_code(3, TransformKind::Versor as i32).unwrap();
    assert_eq!(t.kind(), TransformKind::Versor);
    assert!(Transform::from_kind_code(5, 0).is_err());
}

#[test]
fn display_describes_transform() {
    let mut t = Transform::new(2, TransformKind::Translation).unwrap();
    t.set_parameters(&[1., 2.]).unwrap();
    let text = t.to_string();
    assert!(text.contains("TranslationTransform (dimension 2)"));
    assert!(text.contains("Parameters: [1, 2]"));
}

fn vector_image(size: &[usize], components: usize) -> Image {
    let pixels: usize = size.iter().product();
    let data = Array2::from_elem((pixels, components), 0.5);
    Image::from_data(size, PixelId::VectorFloat64, data).unwrap()
}

#[test]
fn displacement_field_takes_the_buffer() {
    let mut image = vector_image(&[4, 3, 2], 3);
    let t = Transform::from_displacement_field(&mut image).unwrap();
    assert_eq!(t.kind(), TransformKind::DisplacementField);
    assert_eq!(t.dimension(), 3);
    assert_eq!(t.parameters().len(), 4 * 3 * 2 * 3);
    assert_eq!(
        t.fixed_parameters()[..9].to_vec(),
        vec![4., 3., 2., 0., 0., 0., 1., 1., 1.]
    );
    assert_eq!(image, Image::default());

    let p = t.transform_point(&[1., 1., 0.5]).unwrap();
    assert_eq!(p, vec![1.5, 1.5, 1.]);
    // outside the grid
    assert_eq!(t.transform_point(&[10., 1., 1.]).unwrap(), vec![10., 1., 1.]);
}

#[test]
fn displacement_field_rejects_bad_images() {
    let mut wrong_components = vector_image(&[4, 4], 3);
    assert!(Transform::from_displacement_field(&mut wrong_components).is_err());
    assert_eq!(wrong_components.size(), &[4, 4]);

    let mut scalar = Image::new(&[4, 4], PixelId::Float64, 1).unwrap();
    assert!(Transform::from_displacement_field(&mut scalar).is_err());

    let mut float32 = Image::new(&[4, 4], PixelId::VectorFloat32, 2).unwrap();
    assert!(Transform::from_displacement_field(&mut float32).is_err());

    let mut four_d = vector_image(&[2, 2, 2, 2], 4);
    assert!(Transform::from_displacement_field(&mut four_d).is_err());
}

#[test]
fn handles_are_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Transform>();

    let t = Transform::new(3, TransformKind::Translation).unwrap();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let mut t = t.clone();
            std::thread::spawn(move || {
                t.set_parameters(&[i as f64, 0., 0.]).unwrap();
                t.parameters()[0]
            })
        })
        .collect();
    for (i, h) in handles.into_iter().enumerate() {
        assert_eq!(h.join().unwrap(), i as f64);
    }
    assert_eq!(t.parameters(), vec![0.; 3]);
}
