//! Collision queries between two convex shapes.

pub use self::collision_detector::{evaluate_collision, CollisionDetector};
pub use self::collision_result::CollisionResult;
pub use self::point::{PointProjection, PointQuery, PointQueryWithLocation};

mod collision_detector;
mod collision_result;

pub mod epa;
pub mod gjk;
pub mod point;
