//! The Gilbert–Johnson–Keerthi distance algorithm.

use na::Unit;

use crate::math::{Isometry, Point, Real, UnitVector, Vector, DEFAULT_EPSILON, DIM};
use crate::query::gjk::{CSOPoint, VoronoiSimplex};
use crate::shape::SupportMap;

use num::Bounded;

/// Results of the GJK algorithm.
#[derive(Clone, Debug, PartialEq)]
pub enum GJKResult {
    /// Result of the GJK algorithm when the origin is inside of the polytope.
    Intersection,
    /// Result of the GJK algorithm when a projection of the origin on the polytope is found.
    ///
    /// Both points and vector are expressed in the local-space of the first geometry involved
    /// in the GJK execution.
    ClosestPoints(Point<Real>, Point<Real>, UnitVector<Real>),
    /// Result of the GJK algorithm when the origin is too far away from the polytope.
    ///
    /// The returned vector is expressed in the local-space of the first geometry involved in
    /// the GJK execution.
    NoIntersection(UnitVector<Real>),
}

/// The absolute tolerance used by the GJK algorithm.
pub fn eps_tol() -> Real {
    let _eps = DEFAULT_EPSILON;
    _eps * 10.0
}

/*
 * Separating Axis GJK
 */
/// Projects the origin on a shape using the Separating Axis GJK algorithm.
///
/// The algorithm will stop as soon as the polytope can be proven to be at a distance smaller
/// than `max_dist` from the origin.
///
/// # Arguments:
/// * `simplex` - the simplex to be used by the GJK algorithm. It must be already initialized
///   with at least one point on the shapes CSO. See `CSOPoint::from_shapes(...)` for
///   initializing a CSO point.
pub fn closest_points<G1, G2>(
    pos12: &Isometry<Real>,
    g1: &G1,
    g2: &G2,
    max_dist: Real,
    simplex: &mut VoronoiSimplex,
) -> GJKResult
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    let _eps_tol: Real = eps_tol();
    let _eps_rel: Real = _eps_tol.sqrt();

    let mut proj = simplex.project_origin_and_reduce();

    let mut old_dir;

    if let Some(proj_dir) = Unit::try_new(proj.coords, 0.0) {
        old_dir = -proj_dir;
    } else {
        return GJKResult::Intersection;
    }

    let mut max_bound = Real::max_value();
    let mut dir;
    let mut niter = 0;

    loop {
        let old_max_bound = max_bound;

        if let Some((new_dir, dist)) = Unit::try_new_and_get(-proj.coords, _eps_tol) {
            dir = new_dir;
            max_bound = dist;
        } else {
            // The origin is on the simplex.
            return GJKResult::Intersection;
        }

        if max_bound >= old_max_bound {
            // Upper bounds inconsistencies. Accept the previous best result.
            let (p1, p2) = result(simplex, true);
            return GJKResult::ClosestPoints(p1, p2, old_dir);
        }

        let cso_point = CSOPoint::from_shapes_toward(pos12, g1, g2, &dir);
        let min_bound = -dir.dot(&cso_point.point.coords);

        debug_assert!(min_bound.is_finite());

        if min_bound > max_dist {
            return GJKResult::NoIntersection(dir);
        } else if max_bound - min_bound <= _eps_rel * max_bound {
            // The simplex is near the origin.
            let (p1, p2) = result(simplex, false);
            return GJKResult::ClosestPoints(p1, p2, dir);
        }

        if !simplex.add_point(cso_point) {
            let (p1, p2) = result(simplex, false);
            return GJKResult::ClosestPoints(p1, p2, dir);
        }

        old_dir = dir;
        proj = simplex.project_origin_and_reduce();

        if simplex.dimension() == DIM {
            if min_bound >= _eps_tol {
                let (p1, p2) = result(simplex, true);
                return GJKResult::ClosestPoints(p1, p2, old_dir);
            } else {
                // The origin is inside of the CSO.
                return GJKResult::Intersection;
            }
        }

        niter += 1;
        if niter == 100 {
            return GJKResult::NoIntersection(Vector::x_axis());
        }
    }
}

fn result(simplex: &VoronoiSimplex, prev: bool) -> (Point<Real>, Point<Real>) {
    let mut res1 = Point::origin();
    let mut res2 = Point::origin();
    if prev {
        for i in 0..simplex.prev_dimension() + 1 {
            let coord = simplex.prev_proj_coord(i);
            let point = simplex.prev_point(i);
            res1 += point.orig1.coords * coord;
            res2 += point.orig2.coords * coord;
        }

        (res1, res2)
    } else {
        for i in 0..simplex.dimension() + 1 {
            let coord = simplex.proj_coord(i);
            let point = simplex.point(i);
            res1 += point.orig1.coords * coord;
            res2 += point.orig2.coords * coord;
        }

        (res1, res2)
    }
}
