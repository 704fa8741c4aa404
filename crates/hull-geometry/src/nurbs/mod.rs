//! NURBS core algorithms: knot vectors, basis functions, De Boor evaluation, interpolation.

pub mod deboor;
pub mod interp;
pub mod knot;

pub use interp::{interpolate, InterpolatingSpline};
pub use knot::{basis_function, basis_functions, basis_functions_derivs, find_span, KnotVector};
