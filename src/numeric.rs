//! Basic numerical concepts used throughout the crate

#![allow(missing_docs)]

// Floating-point precision is configured here. Ntuple columns are single
// precision, so that is the default.
#[cfg(not(feature = "f64"))]
pub type Float = f32;
#[cfg(not(feature = "f64"))]
pub use std::f32 as reals;
#[cfg(feature = "f64")]
pub type Float = f64;
#[cfg(feature = "f64")]
pub use std::f64 as reals;

/// Mathematical functions
pub mod functions {
    use super::Float;

    /// Square of a number
    pub fn sqr(x: Float) -> Float {
        x * x
    }
}
