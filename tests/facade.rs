mod util;

use approx::assert_abs_diff_eq;
use pretty_assertions::assert_eq;
use simple_transform::facade::Binding;
use simple_transform::{
    AffineTransform, Euler3DTransform, Similarity2DTransform, Transform, TransformError,
    TransformKind, VersorRigid3DTransform,
};

#[test]
fn euler_3d_named_accessors() {
    let mut t = Euler3DTransform::with_parameters(&[1., 2., 3.], 0.1, 0.2, 0.3, &[4., 5., 6.])
        .unwrap();
    assert_eq!(t.center().unwrap(), vec![1., 2., 3.]);
    assert_eq!(t.angle_x().unwrap(), 0.1);
    assert_eq!(t.angle_z().unwrap(), 0.3);
    assert_eq!(t.parameters(), vec![0.1, 0.2, 0.3, 4., 5., 6.]);
    assert_eq!(t.fixed_parameters(), vec![1., 2., 3.]);

    let _ = t.set_center(&[0., 0., 0.]).unwrap();
    let _ = t.set_translation(&[0., 0., 0.]).unwrap();
    let _ = t.set_rotation(0., 0., std::f64::consts::FRAC_PI_2).unwrap();
    let p = t.transform_point(&[1., 0., 0.]).unwrap();
    assert_abs_diff_eq!(p[0], 0., epsilon = 1e-12);
    assert_abs_diff_eq!(p[1], 1., epsilon = 1e-12);
    assert_abs_diff_eq!(p[2], 0., epsilon = 1e-12);
}

#[test]
fn accessors_follow_copy_on_write() {
    let mut a = Euler3DTransform::new();
    let b = a.clone();
    assert_eq!(a.reference_count(), 2);

    let _ = a.set_translation(&[1., 1., 1.]).unwrap();
    assert_eq!(a.reference_count(), 1);
    assert_eq!(b.reference_count(), 1);
    assert_eq!(a.translation().unwrap(), vec![1., 1., 1.]);
    assert_eq!(b.translation().unwrap(), vec![0., 0., 0.]);

    // generic mutators rebind as well
    let c = a.clone();
    let _ = a.set_parameters(&[0., 0., 0., 2., 2., 2.]).unwrap();
    assert_eq!(a.translation().unwrap(), vec![2., 2., 2.]);
    assert_eq!(c.translation().unwrap(), vec![1., 1., 1.]);
}

#[test]
fn accessors_are_unsupported_after_promotion() {
    let mut t = Similarity2DTransform::new();
    let _ = t.set_scale(2.).unwrap();
    assert!(t.is_bound());

    let other = Transform::new(2, TransformKind::Translation).unwrap();
    let _ = t.add_transform(&other).unwrap();
    assert_eq!(t.kind(), TransformKind::Composite);
    assert_eq!(t.binding(), Binding::Unbound);
    match t.scale() {
        Err(TransformError::Unsupported(_)) => {}
        other => panic!("unexpected result {:?}", other),
    }
    match t.set_angle(1.) {
        Err(TransformError::Unsupported(_)) => {}
        other => panic!("unexpected result {:?}", other.map(|_| ())),
    }
    // the generic API keeps working
    assert_eq!(t.parameters(), vec![0., 0.]);
}

#[test]
fn set_transform_rebinds() {
    let mut facade = AffineTransform::from_transform(Transform::new(3, TransformKind::Euler).unwrap());
    assert!(!facade.is_bound());
    assert!(facade.matrix().is_err());

    let _ = facade.set_transform(Transform::new(3, TransformKind::Affine).unwrap());
    assert!(facade.is_bound());
    assert_eq!(
        facade.matrix().unwrap(),
        vec![1., 0., 0., 0., 1., 0., 0., 0., 1.]
    );
}

#[test]
fn facade_round_trips_through_transform() {
    let mut rigid = VersorRigid3DTransform::new();
    let _ = rigid
        .set_rotation_axis_angle(&[0., 1., 0.], 0.5)
        .unwrap()
        .set_translation(&[1., 2., 3.])
        .unwrap();
    let t: Transform = rigid.clone().into();
    assert_eq!(t.reference_count(), 2);
    let again = VersorRigid3DTransform::from_transform(t);
    assert!(again.is_bound());
    assert_eq!(again.translation().unwrap(), vec![1., 2., 3.]);
    let v = again.versor().unwrap();
    assert_abs_diff_eq!(v[1], (0.25f64).sin(), epsilon = 1e-12);
    assert_abs_diff_eq!(v[3], (0.25f64).cos(), epsilon = 1e-12);
}
