use collide3d::query::epa::{EpaStatus, ExpandingPolytope};
use collide3d::query::gjk::{CSOPoint, VoronoiSimplex};
use collide3d::query::CollisionResult;
use collide3d::shape::Ball;
use na::{Isometry3, Point3};

fn collinear_simplex() -> VoronoiSimplex {
    let mut simplex = VoronoiSimplex::new();
    simplex.reset(CSOPoint::new_with_point(
        Point3::new(-1.0, 0.1, 0.0),
        Point3::origin(),
        Point3::origin(),
    ));
    assert!(simplex.add_point(CSOPoint::new_with_point(
        Point3::new(1.0, -0.1, 0.0),
        Point3::origin(),
        Point3::origin(),
    )));
    assert!(simplex.add_point(CSOPoint::new_with_point(
        Point3::new(0.0, 0.0, 0.0),
        Point3::origin(),
        Point3::origin(),
    )));
    simplex
}

#[test]
fn collinear_seed_simplex_yields_nan_result() {
    let ball = Ball::new(1.0);
    let mut epa = ExpandingPolytope::new();
    let mut result = CollisionResult::new();
    result.colliding = true;

    epa.expand(
        &Isometry3::identity(),
        &ball,
        &ball,
        &collinear_simplex(),
        &mut result,
    );

    assert!(result.is_nan());
    assert!(result.point1.x.is_nan());
    assert!(result.point2.x.is_nan());
    // Degeneracy does not revisit the collision decision made by the simplex search.
    assert!(result.colliding);
    assert_eq!(epa.status(), EpaStatus::Degenerate);
    assert_eq!(epa.num_iterations(), 0);
    assert!(epa.closest_face().is_none());
}
