use collide3d::query::CollisionDetector;
use collide3d::shape::{Cuboid, Cylinder};
use na::{Isometry3, Vector3};

#[test]
fn cylinder_cuboid_shallow_overlap() {
    let cylinder = Cylinder::new(0.5, 0.5);
    let cuboid = Cuboid::new(Vector3::new(0.5, 0.5, 0.5));
    let pos12 = Isometry3::translation(0.9, 0.1, 0.05);

    let mut detector = CollisionDetector::new();
    let res = detector.evaluate(&pos12, &cylinder, &cuboid);

    assert!(res.colliding);
    assert!(res.signed_distance < 0.0);
    assert!(res.signed_distance > -0.5);
    assert!(res.point1.coords.norm().is_finite());
    assert!(res.point2.coords.norm().is_finite());
}

#[test]
fn cylinder_cuboid_disjoint() {
    let cylinder = Cylinder::new(0.5, 0.5);
    let cuboid = Cuboid::new(Vector3::new(0.5, 0.5, 0.5));
    let pos12 = Isometry3::translation(2.0, 0.0, 0.0);

    let mut detector = CollisionDetector::new();
    let res = detector.evaluate(&pos12, &cylinder, &cuboid);

    assert!(!res.colliding);
    assert!((res.signed_distance - 1.0).abs() < 1.0e-6);
}
