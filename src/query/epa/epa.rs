//! The Expanding Polytope Algorithm, for penetration depth computation.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::debug;

use crate::math::{Isometry, Real};
use crate::query::epa::polytope::{Polytope, PolytopeFace};
use crate::query::gjk::{CSOPoint, VoronoiSimplex};
use crate::query::CollisionResult;
use crate::shape::SupportMap;

/// The default tolerance used to trigger the terminal condition of the expansion.
pub const DEFAULT_TERMINAL_CONDITION_EPSILON: Real = 1.0e-12;
/// The default limit to the number of expansion iterations.
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// The way the last polytope expansion terminated.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EpaStatus {
    /// The closest face was proven to be within tolerance of the CSO boundary.
    Converged,
    /// The expansion ran into an affinely dependent triangle or a malformed silhouette.
    ///
    /// The best face found before the degeneracy is used for the result; the result is NaN
    /// only when the seed simplex could not be turned into a polytope at all.
    Degenerate,
    /// The iteration limit was reached before convergence; the best face found so far was
    /// used for the result.
    Exhausted,
}

#[derive(Copy, Clone, PartialEq)]
struct FaceId {
    id: usize,
    neg_dist_sq: Real,
}

impl FaceId {
    fn new(id: usize, neg_dist_sq: Real) -> Option<Self> {
        if neg_dist_sq.is_nan() {
            None
        } else {
            Some(FaceId { id, neg_dist_sq })
        }
    }
}

impl Eq for FaceId {}

impl PartialOrd for FaceId {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FaceId {
    // Max-heap on the negated distance, so that popping yields the closest face.
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        if self.neg_dist_sq < other.neg_dist_sq {
            Ordering::Less
        } else if self.neg_dist_sq > other.neg_dist_sq {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

/// The Expanding Polytope Algorithm.
///
/// Computes the penetration depth and witness points of two overlapping convex shapes by
/// growing a polytope inside their CSO, starting from the simplex a GJK run terminated with.
/// The internal buffers are reused from one run to the next.
pub struct ExpandingPolytope {
    polytope: Polytope,
    heap: BinaryHeap<FaceId>,
    silhouette: Vec<usize>,
    epsilon: Real,
    max_iterations: usize,
    num_iterations: usize,
    status: EpaStatus,
    last_face: Option<usize>,
}

impl Default for ExpandingPolytope {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpandingPolytope {
    /// Creates a new expansion engine with the default configuration.
    pub fn new() -> Self {
        ExpandingPolytope {
            polytope: Polytope::new(),
            heap: BinaryHeap::new(),
            silhouette: Vec::new(),
            epsilon: DEFAULT_TERMINAL_CONDITION_EPSILON,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            num_iterations: 0,
            status: EpaStatus::Converged,
            last_face: None,
        }
    }

    /// The tolerance used to trigger the terminal condition of the expansion.
    pub fn terminal_condition_epsilon(&self) -> Real {
        self.epsilon
    }

    /// Sets the tolerance used to trigger the terminal condition of the expansion.
    ///
    /// Takes effect on the next evaluation.
    pub fn set_terminal_condition_epsilon(&mut self, epsilon: Real) {
        self.epsilon = epsilon;
    }

    /// The limit to the number of expansion iterations.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Sets the limit to the number of expansion iterations.
    ///
    /// Takes effect on the next evaluation.
    pub fn set_max_iterations(&mut self, max_iterations: usize) {
        self.max_iterations = max_iterations;
    }

    /// The number of iterations the last evaluation required.
    pub fn num_iterations(&self) -> usize {
        self.num_iterations
    }

    /// The way the last evaluation terminated.
    pub fn status(&self) -> EpaStatus {
        self.status
    }

    /// The face closest to the origin resulting from the last evaluation, if any.
    pub fn closest_face(&self) -> Option<&PolytopeFace> {
        self.last_face.map(|id| self.polytope.face(id))
    }

    /// The polytope resulting from the last evaluation.
    pub fn polytope(&self) -> &Polytope {
        &self.polytope
    }

    /// Expands the polytope seeded by the given simplex until the face closest to the origin
    /// is provably within tolerance of the CSO boundary, then writes the penetration depth
    /// and witness points into `result`.
    ///
    /// The shapes are assumed to be overlapping: the simplex must come from a GJK run that
    /// determined the origin lies inside the CSO. The `colliding` flag of `result` is left
    /// untouched and the normals are set to NaN.
    pub fn expand<G1, G2>(
        &mut self,
        pos12: &Isometry<Real>,
        g1: &G1,
        g2: &G2,
        simplex: &VoronoiSimplex,
        result: &mut CollisionResult,
    ) where
        G1: ?Sized + SupportMap,
        G2: ?Sized + SupportMap,
    {
        self.num_iterations = 0;
        self.last_face = None;
        self.heap.clear();
        self.status = EpaStatus::Converged;

        if let Err(error) = self
            .polytope
            .reset_from_simplex(pos12, g1, g2, simplex, self.epsilon)
        {
            debug!("could not build the initial polytope: {error}");
            self.status = EpaStatus::Degenerate;
            result.set_to_nan();
            return;
        }

        for id in 0..self.polytope.num_faces() {
            let face = self.polytope.face(id);
            if face.closest_is_internal {
                if let Some(entry) = FaceId::new(id, -face.dist_sq) {
                    self.heap.push(entry);
                }
            }
        }

        if self.heap.is_empty() {
            debug!("could not project the origin on the initial polytope");
            self.status = EpaStatus::Degenerate;
            result.set_to_nan();
            return;
        }

        let mut mu = Real::INFINITY;

        'expansion: loop {
            if self.num_iterations >= self.max_iterations {
                self.status = EpaStatus::Exhausted;
                break;
            }

            let Some(entry) = self.heap.pop() else {
                break;
            };
            let face_id = entry.id;

            if self.polytope.face(face_id).obsolete {
                continue;
            }

            let current_dist_sq = self.polytope.face(face_id).dist_sq;
            self.num_iterations += 1;

            // The textbook comparison does not add epsilon to mu, but this appears to be
            // needed to handle some edge-cases.
            if current_dist_sq > mu + self.epsilon {
                break;
            }

            self.last_face = Some(face_id);

            let support_dir = if current_dist_sq > self.epsilon {
                self.polytope.face(face_id).closest_point.coords
            } else {
                // The origin lies on the face's plane, expand along its normal instead.
                *self.polytope.face(face_id).normal
            };

            let new_point = CSOPoint::from_shapes(pos12, g1, g2, &support_dir);

            if self.polytope.face_contains_point(face_id, &new_point.point) {
                break;
            }

            let support_dot = new_point.point.coords.dot(&support_dir);
            if current_dist_sq > self.epsilon {
                mu = mu.min(support_dot * support_dot / current_dist_sq);
            } else {
                // `support_dir` is the unit normal whenever the face runs through the
                // origin, so the dot product is already the support plane distance.
                mu = mu.min(support_dot * support_dot);
            }

            if mu <= (1.0 + self.epsilon) * (1.0 + self.epsilon) * current_dist_sq {
                break;
            }

            if !self.polytope.face_can_see(face_id, &new_point.point) {
                debug!("closest face not visible from its own support point");
                self.status = EpaStatus::Degenerate;
                break;
            }

            self.polytope.mark_face_obsolete(face_id);
            let apex = self.polytope.add_vertex(new_point);

            self.silhouette.clear();
            let [e0, e1, e2] = self.polytope.face(face_id).edges;
            for edge in [e0, e1, e2] {
                let twin = self.polytope.edge(edge).twin;
                self.polytope
                    .compute_silhouette(twin, &new_point.point, &mut self.silhouette);
            }

            for i in 0..self.silhouette.len() {
                let silhouette_edge = self.silhouette[i];
                let new_face =
                    self.polytope
                        .add_face_from_vertex_and_twin_edge(apex, silhouette_edge, self.epsilon);
                let face = self.polytope.face(new_face);

                if face.affinely_dependent {
                    debug!("created an affinely dependent face, falling back to the last closest face");
                    self.status = EpaStatus::Degenerate;
                    break 'expansion;
                }

                // Faces outside of [current, mu + epsilon] cannot affect the final answer.
                if face.closest_is_internal
                    && current_dist_sq <= face.dist_sq
                    && face.dist_sq <= mu + self.epsilon
                {
                    if let Some(entry) = FaceId::new(new_face, -face.dist_sq) {
                        self.heap.push(entry);
                    }
                }
            }

            if !self.polytope.stitch_twins_around(apex) {
                debug!("could not find the twin of a new edge, the silhouette is likely malformed");
                self.status = EpaStatus::Degenerate;
                break;
            }

            for i in 0..self.silhouette.len() {
                let origin = self.polytope.edge(self.silhouette[i]).origin;
                self.polytope.prune_obsolete_edges(origin);
            }
        }

        match self.last_face {
            Some(face_id) => {
                let face = self.polytope.face(face_id);
                result.signed_distance = -face.dist_sq.sqrt();
                let (point1, point2) = self.polytope.face_witness_points(face_id);
                result.point1 = point1;
                result.point2 = point2;
                result.set_normals_to_nan();
            }
            None => result.set_to_nan(),
        }
    }
}
