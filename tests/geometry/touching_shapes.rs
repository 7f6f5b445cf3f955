use approx::assert_relative_eq;
use collide3d::query::CollisionDetector;
use collide3d::shape::Ball;
use na::{Isometry3, Point3};

#[test]
fn balls_touching_at_a_single_point() {
    let ball = Ball::new(1.0);
    let pos12 = Isometry3::translation(2.0, 0.0, 0.0);

    let mut detector = CollisionDetector::new();
    let res = detector.evaluate(&pos12, &ball, &ball);

    assert!(!res.signed_distance.is_nan());
    assert!(res.signed_distance.abs() < 1.0e-6);
    assert_relative_eq!(res.point1, Point3::new(1.0, 0.0, 0.0), epsilon = 1.0e-5);
    assert_relative_eq!(res.point2, Point3::new(1.0, 0.0, 0.0), epsilon = 1.0e-5);
}

#[test]
fn touching_balls_are_stable_under_tiny_perturbation() {
    let ball = Ball::new(1.0);
    let mut detector = CollisionDetector::new();

    for delta in [-1.0e-9, 0.0, 1.0e-9] {
        let pos12 = Isometry3::translation(2.0 + delta, 0.0, 0.0);
        let res = detector.evaluate(&pos12, &ball, &ball);

        // No oscillation into a NaN or grossly wrong answer near the boundary, even when
        // the expansion runs into a degenerate triangle and falls back to its best face.
        assert!(!res.signed_distance.is_nan());
        assert!(res.signed_distance.abs() < 1.0e-6);
        assert!(res.point1.coords.iter().all(|x| x.is_finite()));
        assert!(res.point2.coords.iter().all(|x| x.is_finite()));
    }
}
