//! Support-mapped shapes and simplex primitives.

pub use self::ball::Ball;
pub use self::cuboid::Cuboid;
pub use self::cylinder::Cylinder;
pub use self::segment::{Segment, SegmentPointLocation};
pub use self::support_map::SupportMap;
pub use self::tetrahedron::{Tetrahedron, TetrahedronPointLocation};
pub use self::triangle::{Triangle, TrianglePointLocation};

mod ball;
mod cuboid;
mod cylinder;
mod segment;
mod support_map;
mod tetrahedron;
mod triangle;
