use na::Unit;
use smallvec::SmallVec;

use crate::math::{Isometry, Point, Real, UnitVector, Vector};
use crate::query::gjk::{CSOPoint, VoronoiSimplex};
use crate::query::PointQueryWithLocation;
use crate::shape::{SupportMap, Triangle, TrianglePointLocation};
use crate::utils;

/// Error produced when a terminating GJK simplex cannot be turned into a valid initial polytope.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InitialPolytopeError {
    /// The seed simplex, or one of the faces built from it, is affinely dependent.
    #[error("the seed simplex is affinely dependent")]
    AffinelyDependent,
    /// No support query managed to inflate a segment seed into a volume.
    #[error("the seed simplex could not be inflated into a volume")]
    InflationFailed,
}

/// A vertex of the expanding polytope.
#[derive(Clone, Debug)]
pub struct PolytopeVertex {
    /// The CSO point this vertex wraps.
    pub point: CSOPoint,
    /// Indices of the half-edges originating from this vertex.
    ///
    /// These are back-references only: the polytope arena owns the edges. Entries whose face
    /// became obsolete are pruned lazily.
    pub edges: SmallVec<[usize; 8]>,
}

/// A directed edge of the expanding polytope.
///
/// Each triangular face owns three half-edges forming a cycle, so `next.next.next == self`.
/// The edge of the adjacent face running in the opposite direction is its twin, and
/// `twin.twin == self` whenever the twin is known.
#[derive(Copy, Clone, Debug)]
pub struct PolytopeHalfEdge {
    /// The vertex this edge originates from.
    pub origin: usize,
    /// The vertex this edge points to.
    pub destination: usize,
    /// The edge of the adjacent face running in the opposite direction, if stitched yet.
    pub twin: Option<usize>,
    /// The next edge on the same face.
    pub next: usize,
    /// The previous edge on the same face.
    pub prev: usize,
    /// The face this edge belongs to.
    pub face: usize,
}

/// A triangular face of the expanding polytope.
#[derive(Clone, Debug)]
pub struct PolytopeFace {
    /// The three half-edges of this face, in cycle order.
    pub edges: [usize; 3],
    /// The outward unit normal of this face.
    ///
    /// Arbitrary if the face is affinely dependent.
    pub normal: UnitVector<Real>,
    /// The point of this face's support plane closest to the origin.
    pub closest_point: Point<Real>,
    /// The barycentric coordinates of `closest_point` on this face.
    pub bcoords: [Real; 3],
    /// The squared distance from the origin to `closest_point`.
    pub dist_sq: Real,
    /// Whether `closest_point` lies inside the triangle rather than past one of its edges.
    pub closest_is_internal: bool,
    /// Whether the three vertices of this face are collinear or coincident.
    pub affinely_dependent: bool,
    /// Tombstone flag set when this face stops being part of the polytope boundary.
    ///
    /// Obsolete faces are never removed from the arena mid-expansion, only skipped.
    pub obsolete: bool,
}

/// A transient triangulated polytope with half-edge connectivity.
///
/// Vertices, edges and faces are stored in growable arenas and referenced by index. The
/// polytope is rebuilt from a GJK simplex at the beginning of each EPA run and its buffers are
/// reused across runs.
#[derive(Clone, Debug, Default)]
pub struct Polytope {
    vertices: Vec<PolytopeVertex>,
    edges: Vec<PolytopeHalfEdge>,
    faces: Vec<PolytopeFace>,
}

impl Polytope {
    /// Creates an empty polytope.
    pub fn new() -> Self {
        Polytope::default()
    }

    /// The number of vertices of this polytope, obsolete entries included.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// The number of faces of this polytope, obsolete entries included.
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// The `i`-th vertex of this polytope.
    pub fn vertex(&self, i: usize) -> &PolytopeVertex {
        &self.vertices[i]
    }

    /// The `i`-th half-edge of this polytope.
    pub fn edge(&self, i: usize) -> &PolytopeHalfEdge {
        &self.edges[i]
    }

    /// The `i`-th face of this polytope.
    pub fn face(&self, i: usize) -> &PolytopeFace {
        &self.faces[i]
    }

    /// Removes every vertex, edge, and face, keeping the allocated buffers.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edges.clear();
        self.faces.clear();
    }

    /// Adds a new vertex with no incident edge.
    pub fn add_vertex(&mut self, point: CSOPoint) -> usize {
        self.vertices.push(PolytopeVertex {
            point,
            edges: SmallVec::new(),
        });
        self.vertices.len() - 1
    }

    /// Adds a new triangular face with the given vertices, leaving its twins unset.
    ///
    /// The vertices must be given in counter-clockwise order as seen from the outside of the
    /// polytope so that the computed normal points away from the origin.
    pub fn add_face(&mut self, v0: usize, v1: usize, v2: usize, eps: Real) -> usize {
        let face_id = self.faces.len();
        let e0 = self.edges.len();
        let e1 = e0 + 1;
        let e2 = e0 + 2;

        self.edges.push(PolytopeHalfEdge {
            origin: v0,
            destination: v1,
            twin: None,
            next: e1,
            prev: e2,
            face: face_id,
        });
        self.edges.push(PolytopeHalfEdge {
            origin: v1,
            destination: v2,
            twin: None,
            next: e2,
            prev: e0,
            face: face_id,
        });
        self.edges.push(PolytopeHalfEdge {
            origin: v2,
            destination: v0,
            twin: None,
            next: e0,
            prev: e1,
            face: face_id,
        });

        self.vertices[v0].edges.push(e0);
        self.vertices[v1].edges.push(e1);
        self.vertices[v2].edges.push(e2);

        let pa = self.vertices[v0].point.point;
        let pb = self.vertices[v1].point.point;
        let pc = self.vertices[v2].point.point;

        let tri = Triangle::new(pa, pb, pc);
        let affinely_dependent = tri.is_affinely_dependent_eps(eps);
        let normal =
            utils::ccw_face_normal([&pa, &pb, &pc]).unwrap_or_else(Vector::x_axis);

        let (closest_point, bcoords, dist_sq, closest_is_internal) = if affinely_dependent {
            (Point::origin(), [0.0; 3], Real::NAN, false)
        } else {
            // Project the origin on the triangle itself rather than on its support plane:
            // when the plane projection falls past an edge, the clamped projection still
            // carries a valid distance and valid barycentric coordinates, so the face
            // remains usable by the expansion instead of starving the queue.
            let (proj, loc) =
                tri.project_local_point_and_get_location(&Point::<Real>::origin(), true);
            // Same tolerance as the simplex projections.
            let eps_tol = crate::math::DEFAULT_EPSILON * 100.0;

            let (bcoords, closest_is_internal) = match loc {
                TrianglePointLocation::OnFace(_, bcoords) => (bcoords, true),
                _ => (
                    loc.barycentric_coordinates().unwrap_or([0.0; 3]),
                    proj.is_inside_eps(&Point::origin(), eps_tol),
                ),
            };

            (
                proj.point,
                bcoords,
                proj.point.coords.norm_squared(),
                closest_is_internal,
            )
        };

        self.faces.push(PolytopeFace {
            edges: [e0, e1, e2],
            normal,
            closest_point,
            bcoords,
            dist_sq,
            closest_is_internal,
            affinely_dependent,
            obsolete: false,
        });

        face_id
    }

    /// Adds a new face connecting the given apex vertex to a silhouette edge.
    ///
    /// The new face runs along the silhouette edge in the opposite direction, and its first
    /// edge is immediately stitched as the twin of `silhouette_edge`. The two edges touching
    /// the apex are left to be stitched once the whole fan has been built.
    pub fn add_face_from_vertex_and_twin_edge(
        &mut self,
        apex: usize,
        silhouette_edge: usize,
        eps: Real,
    ) -> usize {
        let v_orig = self.edges[silhouette_edge].origin;
        let v_dest = self.edges[silhouette_edge].destination;

        let face_id = self.add_face(v_dest, v_orig, apex, eps);
        let e0 = self.faces[face_id].edges[0];
        self.edges[e0].twin = Some(silhouette_edge);
        self.edges[silhouette_edge].twin = Some(e0);

        face_id
    }

    /// The vertices of the given face, in cycle order.
    pub fn face_vertices(&self, face: usize) -> [usize; 3] {
        let [e0, e1, e2] = self.faces[face].edges;
        [
            self.edges[e0].origin,
            self.edges[e1].origin,
            self.edges[e2].origin,
        ]
    }

    /// Tests whether `point` is one of the three vertices of the given face.
    pub fn face_contains_point(&self, face: usize, point: &Point<Real>) -> bool {
        self.face_vertices(face)
            .iter()
            .any(|v| self.vertices[*v].point.point == *point)
    }

    /// Tests whether the given face is visible from an observer located at `observer`.
    pub fn face_can_see(&self, face: usize, observer: &Point<Real>) -> bool {
        let v0 = self.edges[self.faces[face].edges[0]].origin;
        let pa = self.vertices[v0].point.point;
        self.faces[face].normal.dot(&(observer - pa)) > 0.0
    }

    /// Marks the given face as obsolete.
    pub fn mark_face_obsolete(&mut self, face: usize) {
        self.faces[face].obsolete = true;
    }

    /// Reconstructs the witness points on both original shapes from the barycentric
    /// coordinates of the given face's closest point.
    pub fn face_witness_points(&self, face: usize) -> (Point<Real>, Point<Real>) {
        let vids = self.face_vertices(face);
        let bcoords = self.faces[face].bcoords;
        let mut p1 = Point::origin();
        let mut p2 = Point::origin();

        for (vid, coord) in vids.iter().zip(bcoords.iter()) {
            let pt = &self.vertices[*vid].point;
            p1 += pt.orig1.coords * *coord;
            p2 += pt.orig2.coords * *coord;
        }

        (p1, p2)
    }

    /// Finds a half-edge going from `from` to `to`, if any.
    pub fn edge_between(&self, from: usize, to: usize) -> Option<usize> {
        self.vertices[from]
            .edges
            .iter()
            .copied()
            .find(|e| self.edges[*e].destination == to)
    }

    /// Collects the silhouette of the polytope as seen from `observer`, starting from the
    /// given edge.
    ///
    /// Faces visible from the observer are marked obsolete along the way, and the edges
    /// bordering the first non-visible faces are pushed to `silhouette`.
    pub fn compute_silhouette(
        &mut self,
        edge: Option<usize>,
        observer: &Point<Real>,
        silhouette: &mut Vec<usize>,
    ) {
        let Some(edge) = edge else {
            return;
        };

        let face = self.edges[edge].face;
        if self.faces[face].obsolete {
            return;
        }

        if !self.face_can_see(face, observer) {
            silhouette.push(edge);
        } else {
            self.faces[face].obsolete = true;
            let next_twin = self.edges[self.edges[edge].next].twin;
            let prev_twin = self.edges[self.edges[edge].prev].twin;
            self.compute_silhouette(next_twin, observer, silhouette);
            self.compute_silhouette(prev_twin, observer, silhouette);
        }
    }

    /// Stitches the twin connectivity of the fan of faces newly built around `apex`.
    ///
    /// Returns `false` if the twin of one of the fan's edges cannot be found, which means the
    /// silhouette the fan was built from was malformed.
    #[must_use]
    pub fn stitch_twins_around(&mut self, apex: usize) -> bool {
        for i in 0..self.vertices[apex].edges.len() {
            let edge = self.vertices[apex].edges[i];
            let destination = self.edges[edge].destination;

            match self.edge_between(destination, apex) {
                Some(twin) => {
                    self.edges[edge].twin = Some(twin);
                    self.edges[twin].twin = Some(edge);
                }
                None => return false,
            }
        }

        true
    }

    /// Removes from the given vertex's incidence list the edges whose face became obsolete.
    ///
    /// This only bounds the growth of the incidence lists: obsolete faces and edges stay in
    /// the arena until the next [`Polytope::clear`].
    pub fn prune_obsolete_edges(&mut self, vertex: usize) {
        let mut i = 0;
        while i < self.vertices[vertex].edges.len() {
            let edge = self.vertices[vertex].edges[i];
            if self.faces[self.edges[edge].face].obsolete {
                self.vertices[vertex].edges.swap_remove(i);
            } else {
                i += 1;
            }
        }
    }

    /// Rebuilds this polytope from a terminating GJK simplex.
    ///
    /// A tetrahedral simplex becomes an outward-oriented tetrahedron. Triangle and segment
    /// simplices are first inflated: a segment gains a third point from a support query
    /// orthogonal to its axis, and the resulting triangle is triangulated as two mirrored
    /// faces glued along their edges. A single-point simplex cannot seed a polytope.
    pub fn reset_from_simplex<G1, G2>(
        &mut self,
        pos12: &Isometry<Real>,
        g1: &G1,
        g2: &G2,
        simplex: &VoronoiSimplex,
        eps: Real,
    ) -> Result<(), InitialPolytopeError>
    where
        G1: ?Sized + SupportMap,
        G2: ?Sized + SupportMap,
    {
        self.clear();

        match simplex.dimension() {
            3 => {
                let mut pts = [
                    *simplex.point(0),
                    *simplex.point(1),
                    *simplex.point(2),
                    *simplex.point(3),
                ];

                let dp1 = pts[1].point - pts[0].point;
                let dp2 = pts[2].point - pts[0].point;
                let dp3 = pts[3].point - pts[0].point;

                if dp1.cross(&dp2).dot(&dp3) > 0.0 {
                    pts.swap(1, 2);
                }

                for pt in pts {
                    let _ = self.add_vertex(pt);
                }

                self.add_face(0, 1, 2, eps);
                self.add_face(0, 2, 3, eps);
                self.add_face(0, 3, 1, eps);
                self.add_face(1, 3, 2, eps);
            }
            2 => {
                self.push_two_sided_triangle(
                    *simplex.point(0),
                    *simplex.point(1),
                    *simplex.point(2),
                    eps,
                )?;
            }
            1 => {
                let p0 = *simplex.point(0);
                let p1 = *simplex.point(1);

                let axis = Unit::try_new(p1.point - p0.point, crate::math::DEFAULT_EPSILON)
                    .ok_or(InitialPolytopeError::AffinelyDependent)?;
                let p2 = Self::inflate_segment(pos12, g1, g2, &p0, &p1, &axis, eps)
                    .ok_or(InitialPolytopeError::InflationFailed)?;

                self.push_two_sided_triangle(p0, p1, p2, eps)?;
            }
            _ => return Err(InitialPolytopeError::AffinelyDependent),
        }

        for face in &self.faces {
            if face.affinely_dependent {
                return Err(InitialPolytopeError::AffinelyDependent);
            }
        }

        if !self.stitch_all_twins() {
            return Err(InitialPolytopeError::AffinelyDependent);
        }

        Ok(())
    }

    /// Triangulates a single triangle as a two-sided polytope: two mirrored faces glued along
    /// their three edges. Both faces have a zero plane distance to the origin, which makes the
    /// expansion pick its support directions from the face normals.
    fn push_two_sided_triangle(
        &mut self,
        p0: CSOPoint,
        p1: CSOPoint,
        p2: CSOPoint,
        eps: Real,
    ) -> Result<(), InitialPolytopeError> {
        if Triangle::new(p0.point, p1.point, p2.point).is_affinely_dependent_eps(eps) {
            return Err(InitialPolytopeError::AffinelyDependent);
        }

        let _ = self.add_vertex(p0);
        let _ = self.add_vertex(p1);
        let _ = self.add_vertex(p2);

        self.add_face(0, 1, 2, eps);
        self.add_face(0, 2, 1, eps);
        Ok(())
    }

    /// Looks for a CSO support point turning the segment `[p0, p1]` into a proper triangle,
    /// by querying directions orthogonal to the segment's axis.
    fn inflate_segment<G1, G2>(
        pos12: &Isometry<Real>,
        g1: &G1,
        g2: &G2,
        p0: &CSOPoint,
        p1: &CSOPoint,
        axis: &UnitVector<Real>,
        eps: Real,
    ) -> Option<CSOPoint>
    where
        G1: ?Sized + SupportMap,
        G2: ?Sized + SupportMap,
    {
        let mut result = None;

        Vector::orthonormal_subspace_basis(&[**axis], |basis_dir| {
            for dir in [*basis_dir, -*basis_dir] {
                let candidate = CSOPoint::from_shapes(pos12, g1, g2, &dir);
                if !Triangle::new(p0.point, p1.point, candidate.point)
                    .is_affinely_dependent_eps(eps)
                {
                    result = Some(candidate);
                    return false;
                }
            }

            true
        });

        result
    }

    /// Stitches the twin of every edge that does not have one yet, by looking up the edge
    /// running in the opposite direction. Returns `false` if any twin is missing.
    fn stitch_all_twins(&mut self) -> bool {
        for edge in 0..self.edges.len() {
            if self.edges[edge].twin.is_none() {
                let origin = self.edges[edge].origin;
                let destination = self.edges[edge].destination;

                match self.edge_between(destination, origin) {
                    Some(twin) => {
                        self.edges[edge].twin = Some(twin);
                        self.edges[twin].twin = Some(edge);
                    }
                    None => return false,
                }
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Ball;

    fn tetrahedron_simplex() -> VoronoiSimplex {
        let mut simplex = VoronoiSimplex::new();
        simplex.reset(CSOPoint::new_with_point(
            Point::new(-1.0, -1.0, -1.0),
            Point::origin(),
            Point::origin(),
        ));
        for pt in [
            Point::new(1.0, -1.0, -1.0),
            Point::new(0.0, 1.0, -1.0),
            Point::new(0.0, 0.0, 1.0),
        ] {
            assert!(simplex.add_point(CSOPoint::new_with_point(
                pt,
                Point::origin(),
                Point::origin()
            )));
        }
        simplex
    }

    #[test]
    fn tetrahedron_simplex_gives_outward_polytope() {
        let mut polytope = Polytope::new();
        let g = Ball::new(1.0);
        polytope
            .reset_from_simplex(
                &Isometry::identity(),
                &g,
                &g,
                &tetrahedron_simplex(),
                1.0e-12,
            )
            .unwrap();

        assert_eq!(polytope.num_vertices(), 4);
        assert_eq!(polytope.num_faces(), 4);

        for face in 0..polytope.num_faces() {
            // All normals must point away from the enclosed origin.
            let v0 = polytope.edge(polytope.face(face).edges[0]).origin;
            let pa = polytope.vertex(v0).point.point;
            assert!(polytope.face(face).normal.dot(&pa.coords) > 0.0);
            assert!(!polytope.face(face).affinely_dependent);
        }
    }

    #[test]
    fn half_edge_invariants_hold_after_construction() {
        let mut polytope = Polytope::new();
        let g = Ball::new(1.0);
        polytope
            .reset_from_simplex(
                &Isometry::identity(),
                &g,
                &g,
                &tetrahedron_simplex(),
                1.0e-12,
            )
            .unwrap();

        for face in 0..polytope.num_faces() {
            let [e0, e1, e2] = polytope.face(face).edges;
            assert_eq!(polytope.edge(e0).next, e1);
            assert_eq!(polytope.edge(e1).next, e2);
            assert_eq!(polytope.edge(e2).next, e0);

            for e in [e0, e1, e2] {
                let twin = polytope.edge(e).twin.unwrap();
                assert_eq!(polytope.edge(twin).twin, Some(e));
                assert_eq!(polytope.edge(twin).origin, polytope.edge(e).destination);
                assert_eq!(polytope.edge(twin).destination, polytope.edge(e).origin);
            }
        }
    }

    #[test]
    fn collinear_simplex_is_rejected() {
        let mut simplex = VoronoiSimplex::new();
        simplex.reset(CSOPoint::new_with_point(
            Point::new(-1.0, 0.1, 0.0),
            Point::origin(),
            Point::origin(),
        ));
        assert!(simplex.add_point(CSOPoint::new_with_point(
            Point::new(1.0, -0.1, 0.0),
            Point::origin(),
            Point::origin()
        )));
        assert!(simplex.add_point(CSOPoint::new_with_point(
            Point::new(0.0, 0.0, 0.0),
            Point::origin(),
            Point::origin()
        )));

        let mut polytope = Polytope::new();
        let g = Ball::new(1.0);
        let result = polytope.reset_from_simplex(
            &Isometry::identity(),
            &g,
            &g,
            &simplex,
            1.0e-12,
        );
        assert_eq!(result, Err(InitialPolytopeError::AffinelyDependent));
    }

    #[test]
    fn segment_simplex_is_inflated() {
        let mut simplex = VoronoiSimplex::new();
        simplex.reset(CSOPoint::new_with_point(
            Point::new(0.0, 0.0, -1.0),
            Point::origin(),
            Point::origin(),
        ));
        assert!(simplex.add_point(CSOPoint::new_with_point(
            Point::new(0.0, 0.0, 1.0),
            Point::origin(),
            Point::origin()
        )));

        let mut polytope = Polytope::new();
        let g = Ball::new(1.0);
        polytope
            .reset_from_simplex(&Isometry::identity(), &g, &g, &simplex, 1.0e-12)
            .unwrap();

        assert_eq!(polytope.num_vertices(), 3);
        assert_eq!(polytope.num_faces(), 2);
    }

    #[test]
    fn face_projection_is_clamped_to_the_triangle() {
        // A triangle whose support plane passes under the origin, but whose plane
        // projection (0, 0, 0 onto z = -1 is (0, 0, -1)) falls outside of the triangle.
        let mut polytope = Polytope::new();
        let a = polytope.add_vertex(CSOPoint::new_with_point(
            Point::new(1.0, 0.0, -1.0),
            Point::origin(),
            Point::origin(),
        ));
        let b = polytope.add_vertex(CSOPoint::new_with_point(
            Point::new(2.0, 0.0, -1.0),
            Point::origin(),
            Point::origin(),
        ));
        let c = polytope.add_vertex(CSOPoint::new_with_point(
            Point::new(1.0, 1.0, -1.0),
            Point::origin(),
            Point::origin(),
        ));
        let face = polytope.add_face(a, b, c, 1.0e-12);

        let face = polytope.face(face);
        assert!(!face.affinely_dependent);
        // The closest point is clamped to the nearest vertex of the triangle, not left on
        // the support plane, and the distance accounts for the clamping.
        assert_relative_eq!(face.closest_point, Point::new(1.0, 0.0, -1.0));
        assert_relative_eq!(face.dist_sq, 2.0);
        assert!(!face.closest_is_internal);
        assert_relative_eq!(face.bcoords[0], 1.0);
    }

    #[test]
    fn face_through_origin_is_internal() {
        let mut polytope = Polytope::new();
        let a = polytope.add_vertex(CSOPoint::new_with_point(
            Point::new(-1.0, -1.0, 0.0),
            Point::origin(),
            Point::origin(),
        ));
        let b = polytope.add_vertex(CSOPoint::new_with_point(
            Point::new(1.0, -1.0, 0.0),
            Point::origin(),
            Point::origin(),
        ));
        let c = polytope.add_vertex(CSOPoint::new_with_point(
            Point::new(0.0, 1.0, 0.0),
            Point::origin(),
            Point::origin(),
        ));
        let face = polytope.add_face(a, b, c, 1.0e-12);

        let face = polytope.face(face);
        assert!(face.closest_is_internal);
        assert_relative_eq!(face.dist_sq, 0.0);
    }
}
