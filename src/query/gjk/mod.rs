//! The GJK distance algorithm.

pub use self::cso_point::CSOPoint;
pub use self::gjk::{closest_points, eps_tol, GJKResult};
pub use self::voronoi_simplex::VoronoiSimplex;

mod cso_point;
#[allow(clippy::module_inception)]
mod gjk;
mod voronoi_simplex;
