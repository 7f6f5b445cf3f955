use collide3d::query::CollisionDetector;
use collide3d::shape::Ball;
use na::Isometry3;

#[test]
fn tighter_epsilon_is_at_least_as_accurate() {
    let ball = Ball::new(1.0);
    let pos12 = Isometry3::translation(1.2, 0.3, 0.1);
    let depth: f64 = 2.0 - na::Vector3::new(1.2, 0.3, 0.1).norm();

    let mut loose = CollisionDetector::new();
    loose.set_terminal_condition_epsilon(1.0e-4);
    let res_loose = loose.evaluate(&pos12, &ball, &ball);

    let mut tight = CollisionDetector::new();
    tight.set_terminal_condition_epsilon(1.0e-14);
    let res_tight = tight.evaluate(&pos12, &ball, &ball);

    assert!(res_loose.colliding);
    assert!(res_tight.colliding);

    let err_loose = (res_loose.signed_distance + depth).abs();
    let err_tight = (res_tight.signed_distance + depth).abs();

    // A loose certificate may stop the expansion early; a tight one keeps refining the
    // same polytope, so its answer never gets worse.
    assert!(err_loose < 1.0e-2);
    assert!(err_tight <= err_loose + 1.0e-9);
    assert!(loose.num_iterations() <= tight.num_iterations());
}
