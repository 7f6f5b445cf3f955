use approx::assert_relative_eq;
use collide3d::query::CollisionDetector;
use collide3d::shape::Ball;
use na::{Isometry3, Point3, Vector3};

#[test]
fn disjoint_balls_report_center_line_distance() {
    let ball = Ball::new(1.0);
    let pos12 = Isometry3::translation(3.0, 0.0, 0.0);

    let mut detector = CollisionDetector::new();
    let res = detector.evaluate(&pos12, &ball, &ball);

    assert!(!res.colliding);
    assert_relative_eq!(res.signed_distance, 1.0, epsilon = 1.0e-6);
    assert_relative_eq!(res.point1, Point3::new(1.0, 0.0, 0.0), epsilon = 1.0e-5);
    assert_relative_eq!(res.point2, Point3::new(2.0, 0.0, 0.0), epsilon = 1.0e-5);
    assert!(res.normal1.x.is_nan());
    assert!(res.normal2.x.is_nan());
}

#[test]
fn overlapping_balls_report_penetration_depth() {
    let ball = Ball::new(1.0);
    let pos12 = Isometry3::translation(1.5, 0.0, 0.0);

    let mut detector = CollisionDetector::new();
    let res = detector.evaluate(&pos12, &ball, &ball);

    assert!(res.colliding);
    assert_relative_eq!(res.signed_distance, -0.5, epsilon = 1.0e-6);
    // The witness points straddle the overlap region along the center line.
    assert_relative_eq!(
        res.point1 - res.point2,
        Vector3::new(0.5, 0.0, 0.0),
        epsilon = 1.0e-5
    );
}

#[test]
fn random_ball_pairs_match_analytic_distance() {
    let ball = Ball::new(1.0);
    let mut rng = oorandom::Rand32::new(42);
    let mut detector = CollisionDetector::new();

    for _ in 0..100 {
        let dir = Vector3::from_fn(|_, _| rng.rand_float() as f64 - 0.5).normalize();
        // Center distances in (0.5, 1.8) overlap, (2.2, 5.0) are disjoint.
        let dist = if rng.rand_float() < 0.5 {
            0.5 + 1.3 * rng.rand_float() as f64
        } else {
            2.2 + 2.8 * rng.rand_float() as f64
        };

        let center = dir * dist;
        let pos12 = Isometry3::translation(center.x, center.y, center.z);
        let res = detector.evaluate(&pos12, &ball, &ball);

        assert_eq!(res.colliding, dist < 2.0);
        assert_relative_eq!(res.signed_distance, dist - 2.0, epsilon = 1.0e-4);
    }
}
