//! Amortized growable arrays.
//!
//! [`DynArr`] keeps its elements in one contiguous buffer that doubles when
//! an append finds it full. Index-taking operations validate their argument
//! against the current length and return [`OutOfRange`] instead of panicking,
//! leaving the array untouched.

mod dynarr;

pub(crate) mod errors;

pub use dynarr::{DynArr, IntoIter, DEFAULT_CAPACITY, GROWTH_FACTOR};
pub use errors::{AllocErr, OutOfRange};
