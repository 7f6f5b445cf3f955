use approx::assert_relative_eq;
use collide3d::query::{CollisionDetector, CollisionResult};
use collide3d::shape::{Ball, Cuboid};
use na::{Isometry3, Point3, Vector3};

fn assert_bitwise_eq(a: &CollisionResult, b: &CollisionResult) {
    assert_eq!(a.colliding, b.colliding);
    assert_eq!(a.signed_distance.to_bits(), b.signed_distance.to_bits());
    for i in 0..3 {
        assert_eq!(a.point1[i].to_bits(), b.point1[i].to_bits());
        assert_eq!(a.point2[i].to_bits(), b.point2[i].to_bits());
    }
}

#[test]
fn reevaluation_is_bitwise_identical() {
    let ball = Ball::new(1.0);
    let cube = Cuboid::new(Vector3::new(0.5, 0.5, 0.5));
    let mut detector = CollisionDetector::new();

    for pos12 in [
        Isometry3::translation(3.0, 0.5, -0.2),
        Isometry3::translation(0.9, 0.3, 0.1),
    ] {
        let first = detector.evaluate(&pos12, &ball, &cube);
        let second = detector.evaluate(&pos12, &ball, &cube);
        assert_bitwise_eq(&first, &second);

        // A fresh detector carries no cross-call state either.
        let third = CollisionDetector::new().evaluate(&pos12, &ball, &cube);
        assert_bitwise_eq(&first, &third);
    }
}

#[test]
fn swapping_the_shapes_swaps_the_witness_points() {
    let ball = Ball::new(1.0);
    let pos12 = Isometry3::translation(3.0, 0.0, 0.0);
    let pos21 = pos12.inverse();

    let mut detector = CollisionDetector::new();
    let res12 = detector.evaluate(&pos12, &ball, &ball);
    let res21 = detector.evaluate(&pos21, &ball, &ball);

    assert_eq!(res12.colliding, res21.colliding);
    assert_relative_eq!(res12.signed_distance, res21.signed_distance, epsilon = 1.0e-6);

    // Both results are expressed in the local-space of their own first shape.
    assert_relative_eq!(res12.point1, Point3::new(1.0, 0.0, 0.0), epsilon = 1.0e-5);
    assert_relative_eq!(res21.point1, Point3::new(-1.0, 0.0, 0.0), epsilon = 1.0e-5);
    assert_relative_eq!(res21.point2, Point3::new(-2.0, 0.0, 0.0), epsilon = 1.0e-5);
}

#[test]
fn flip_swaps_points_and_normals() {
    let ball = Ball::new(1.0);
    let pos12 = Isometry3::translation(3.0, 0.0, 0.0);

    let mut res = CollisionDetector::new().evaluate(&pos12, &ball, &ball);
    let point1 = res.point1;
    let point2 = res.point2;
    res.flip();

    assert_eq!(res.point1, point2);
    assert_eq!(res.point2, point1);
}
