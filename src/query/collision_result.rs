use crate::math::{Point, Real, Vector};

/// The result of a collision evaluation between two shapes.
///
/// The signed distance is negative when the shapes overlap, in which case its magnitude is the
/// penetration depth. All the points and normals are expressed in the local-space of the first
/// shape. The result is fully overwritten by each evaluation, so a single instance can be
/// reused across queries.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CollisionResult {
    /// Whether the two shapes are colliding.
    pub colliding: bool,
    /// The distance separating the two shapes, or the negated penetration depth if they are
    /// colliding.
    pub signed_distance: Real,
    /// The witness point on the first shape.
    pub point1: Point<Real>,
    /// The witness point on the second shape.
    pub point2: Point<Real>,
    /// The surface normal on the first shape at `point1`, or NaN when not evaluated.
    pub normal1: Vector<Real>,
    /// The surface normal on the second shape at `point2`, or NaN when not evaluated.
    pub normal2: Vector<Real>,
}

impl Default for CollisionResult {
    fn default() -> Self {
        Self::new()
    }
}

impl CollisionResult {
    /// Creates a new result with `colliding` unset and all numeric fields set to NaN.
    pub fn new() -> Self {
        CollisionResult {
            colliding: false,
            signed_distance: Real::NAN,
            point1: Point::from(Vector::repeat(Real::NAN)),
            point2: Point::from(Vector::repeat(Real::NAN)),
            normal1: Vector::repeat(Real::NAN),
            normal2: Vector::repeat(Real::NAN),
        }
    }

    /// Sets every numeric field of this result to NaN, leaving the `colliding` flag untouched.
    pub fn set_to_nan(&mut self) {
        self.signed_distance = Real::NAN;
        self.point1 = Point::from(Vector::repeat(Real::NAN));
        self.point2 = Point::from(Vector::repeat(Real::NAN));
        self.set_normals_to_nan();
    }

    /// Sets both normals of this result to NaN.
    pub fn set_normals_to_nan(&mut self) {
        self.normal1 = Vector::repeat(Real::NAN);
        self.normal2 = Vector::repeat(Real::NAN);
    }

    /// Swaps the roles of the two shapes in this result.
    pub fn flip(&mut self) {
        std::mem::swap(&mut self.point1, &mut self.point2);
        std::mem::swap(&mut self.normal1, &mut self.normal2);
    }

    /// Whether the last evaluation terminated on a degenerate configuration.
    pub fn is_nan(&self) -> bool {
        self.signed_distance.is_nan()
    }
}
