/*!
collide3d
=========

**collide3d** is a 3-dimensional convex collision detection library written
with the rust programming language. Given a pair of convex shapes, it computes
whether they overlap, and either the closest points and separation distance
(disjoint case, solved by GJK) or a pair of witness points and a penetration
depth (overlapping case, solved by EPA over a half-edge polytope).

*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;
#[macro_use]
extern crate approx;
extern crate nalgebra as na;
extern crate num_traits as num;

pub mod math;
pub mod query;
pub mod shape;
pub mod utils;
