use na::Unit;

use log::debug;

use crate::math::{Isometry, Real, Vector, DEFAULT_EPSILON};
use crate::query::epa::{EpaStatus, ExpandingPolytope, PolytopeFace};
use crate::query::gjk::{self, CSOPoint, GJKResult, VoronoiSimplex};
use crate::query::CollisionResult;
use crate::shape::SupportMap;

use num::Bounded;

/// A stateful collision detector combining GJK and EPA.
///
/// A GJK run always executes first. When it proves the shapes disjoint, the separation
/// distance and closest points are reported directly. When it determines the origin lies
/// inside the CSO, the terminating simplex seeds a polytope expansion that computes the
/// penetration depth.
///
/// The detector owns the simplex and the expansion scratch buffers, so reusing one detector
/// across evaluations avoids per-call allocations. A detector must not be shared across
/// threads without external synchronization; independent detectors can run concurrently.
#[derive(Default)]
pub struct CollisionDetector {
    simplex: VoronoiSimplex,
    epa: ExpandingPolytope,
}

impl CollisionDetector {
    /// Creates a new collision detector with the default configuration.
    pub fn new() -> Self {
        CollisionDetector {
            simplex: VoronoiSimplex::new(),
            epa: ExpandingPolytope::new(),
        }
    }

    /// The tolerance used to trigger the terminal condition of the polytope expansion.
    pub fn terminal_condition_epsilon(&self) -> Real {
        self.epa.terminal_condition_epsilon()
    }

    /// Sets the tolerance used to trigger the terminal condition of the polytope expansion.
    ///
    /// Takes effect on the next evaluation. The value is not validated: it only affects
    /// convergence tightness.
    pub fn set_terminal_condition_epsilon(&mut self, epsilon: Real) {
        self.epa.set_terminal_condition_epsilon(epsilon);
    }

    /// The limit to the number of polytope expansion iterations.
    pub fn max_iterations(&self) -> usize {
        self.epa.max_iterations()
    }

    /// Sets the limit to the number of polytope expansion iterations.
    ///
    /// Takes effect on the next evaluation.
    pub fn set_max_iterations(&mut self, max_iterations: usize) {
        self.epa.set_max_iterations(max_iterations);
    }

    /// The number of iterations the polytope expansion of the last evaluation required.
    ///
    /// Zero if the last evaluation did not need an expansion.
    pub fn num_iterations(&self) -> usize {
        self.epa.num_iterations()
    }

    /// The way the polytope expansion of the last evaluation terminated.
    pub fn status(&self) -> EpaStatus {
        self.epa.status()
    }

    /// The polytope face closest to the origin resulting from the last evaluation, if the
    /// last evaluation ran an expansion.
    pub fn closest_face(&self) -> Option<&PolytopeFace> {
        self.epa.closest_face()
    }

    /// Evaluates the collision state of the two given shapes and returns the result.
    ///
    /// `pos12` is the position of the second shape expressed in the local-space of the first.
    /// The points of the result are expressed in the local-space of the first shape. Surface
    /// normals are not evaluated and left to NaN.
    pub fn evaluate<G1, G2>(&mut self, pos12: &Isometry<Real>, g1: &G1, g2: &G2) -> CollisionResult
    where
        G1: ?Sized + SupportMap,
        G2: ?Sized + SupportMap,
    {
        let mut result = CollisionResult::new();
        self.evaluate_collision(pos12, g1, g2, &mut result);
        result
    }

    /// Evaluates the collision state of the two given shapes, writing the outcome into
    /// `result`.
    ///
    /// Returns `true` if the shapes are colliding. `pos12` is the position of the second
    /// shape expressed in the local-space of the first, and the points of the result are
    /// expressed in the local-space of the first shape as well. Surface normals are not
    /// evaluated and left to NaN.
    pub fn evaluate_collision<G1, G2>(
        &mut self,
        pos12: &Isometry<Real>,
        g1: &G1,
        g2: &G2,
        result: &mut CollisionResult,
    ) -> bool
    where
        G1: ?Sized + SupportMap,
        G2: ?Sized + SupportMap,
    {
        let init_dir = Unit::try_new(pos12.translation.vector, DEFAULT_EPSILON)
            .unwrap_or_else(Vector::x_axis);
        self.simplex
            .reset(CSOPoint::from_shapes_toward(pos12, g1, g2, &init_dir));

        match gjk::closest_points(pos12, g1, g2, Real::max_value(), &mut self.simplex) {
            GJKResult::ClosestPoints(point1, point2, _) => {
                result.colliding = false;
                result.signed_distance = (point2 - point1).norm();
                result.point1 = point1;
                result.point2 = point2;
                result.set_normals_to_nan();
                false
            }
            GJKResult::Intersection => {
                result.colliding = true;

                if self.simplex.dimension() == 0 {
                    // The origin coincides with a single support point: the shapes touch at
                    // exactly one point and there is nothing to expand.
                    let pt = self.simplex.point(0);
                    result.signed_distance = 0.0;
                    result.point1 = pt.orig1;
                    result.point2 = pt.orig2;
                    result.set_normals_to_nan();
                } else {
                    self.epa.expand(pos12, g1, g2, &self.simplex, result);
                }

                true
            }
            GJKResult::NoIntersection(_) => {
                // Only reachable if the GJK iteration limit was hit without converging.
                debug!("the simplex search failed to converge");
                result.colliding = false;
                result.set_to_nan();
                false
            }
        }
    }
}

/// Evaluates the collision state of the two given shapes with the default configuration.
///
/// This is a convenience wrapper creating a fresh [`CollisionDetector`] for a single
/// evaluation. Reuse a detector explicitly to avoid per-call allocations.
pub fn evaluate_collision<G1, G2>(
    pos12: &Isometry<Real>,
    g1: &G1,
    g2: &G2,
) -> CollisionResult
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    CollisionDetector::new().evaluate(pos12, g1, g2)
}
