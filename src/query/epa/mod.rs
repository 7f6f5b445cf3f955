//! The EPA algorithm, for penetration depth computation.

pub use self::epa::{
    EpaStatus, ExpandingPolytope, DEFAULT_MAX_ITERATIONS, DEFAULT_TERMINAL_CONDITION_EPSILON,
};
pub use self::polytope::{
    InitialPolytopeError, Polytope, PolytopeFace, PolytopeHalfEdge, PolytopeVertex,
};

#[allow(clippy::module_inception)]
mod epa;
mod polytope;
