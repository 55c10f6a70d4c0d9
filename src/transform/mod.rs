//! Pure geometry used by hit-testing and gestures: affine helpers, 2D vector
//! math and axis-aligned bounding boxes. Nothing in here holds state.

pub mod affine;
pub mod bbox;
pub mod linear;
