use approx::assert_relative_eq;
use collide3d::query::CollisionDetector;
use collide3d::shape::Cuboid;
use na::{Isometry3, Vector3};

#[test]
fn unit_cubes_overlapping_along_one_axis() {
    let cube = Cuboid::new(Vector3::new(0.5, 0.5, 0.5));
    let pos12 = Isometry3::translation(0.8, 0.0, 0.0);

    let mut detector = CollisionDetector::new();
    let res = detector.evaluate(&pos12, &cube, &cube);

    assert!(res.colliding);
    assert_relative_eq!(res.signed_distance, -0.2, epsilon = 1.0e-7);
    // The minimum translation is along the overlap axis.
    assert_relative_eq!(
        res.point1 - res.point2,
        Vector3::new(0.2, 0.0, 0.0),
        epsilon = 1.0e-6
    );
}

#[test]
fn cuboid_cuboid_deep_penetration() {
    let c = Cuboid::new(Vector3::new(2.0, 1.0, 1.0));
    let m1 = Isometry3::translation(3.5, 0.0, 0.0);
    let m2 = Isometry3::identity();

    let mut detector = CollisionDetector::new();
    let res = detector.evaluate(&m1.inv_mul(&m2), &c, &c);

    assert!(res.colliding);
    assert_relative_eq!(res.signed_distance, -0.5, epsilon = 1.0e-7);

    let m1 = Isometry3::translation(0.0, 0.2, 0.0);
    let res = detector.evaluate(&m1.inv_mul(&m2), &c, &c);

    assert!(res.colliding);
    assert_relative_eq!(res.signed_distance, -1.8, epsilon = 1.0e-7);
}
