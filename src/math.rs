//! Compilation flags dependent aliases for mathematical types.

use na::{Isometry3, Matrix3, Point3, Translation3, Unit, UnitQuaternion, Vector3};

/// The scalar type used throughout this crate.
pub type Real = f64;

/// The default tolerance used for geometric operations.
pub const DEFAULT_EPSILON: Real = Real::EPSILON;

/// The dimension of the space.
pub const DIM: usize = 3;

/// The point type.
pub type Point<N> = Point3<N>;

/// The vector type.
pub type Vector<N> = Vector3<N>;

/// The unit vector type.
pub type UnitVector<N> = Unit<Vector3<N>>;

/// The matrix type.
pub type Matrix<N> = Matrix3<N>;

/// The transformation matrix type.
pub type Isometry<N> = Isometry3<N>;

/// The rotation type.
pub type Rotation<N> = UnitQuaternion<N>;

/// The translation type.
pub type Translation<N> = Translation3<N>;
