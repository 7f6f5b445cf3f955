//! Various unsorted geometrical and logical operators.

pub use self::ccw_face_normal::ccw_face_normal;

mod ccw_face_normal;
