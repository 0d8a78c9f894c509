//! This module implements some domain-specific 4-momentum handling logic.
//!
//! Momenta are stored in Cartesian (Px, Py, Pz, E) form, which makes sums
//! trivial. Collider coordinates (pt, η, φ, m) are computed on demand.

use crate::numeric::{functions::sqr, Float};
use nalgebra::SVector;
use prefix_num_ops::real::*;

/// 4-momentum dimension
pub const MOMENTUM_DIM: usize = 4;

/// Relativistic 4-momentum
pub type Momentum = SVector<Float, MOMENTUM_DIM>;

/// Convenience const for accessing the X coordinate of a 4-vector
pub const X: usize = 0;

/// Convenience const for accessing the Y coordinate of a 4-vector
pub const Y: usize = 1;

/// Convenience const for accessing the Z coordinate of a 4-vector
pub const Z: usize = 2;

/// Convenience const for accessing the E coordinate of a 4-vector
pub const E: usize = 3;

/// Build a 4-momentum from transverse momentum, pseudorapidity, azimuth and
/// mass
pub fn from_pt_eta_phi_m(pt: Float, eta: Float, phi: Float, mass: Float) -> Momentum {
    let px = pt * cos(phi);
    let py = pt * sin(phi);
    let pz = pt * eta.sinh();
    let p2 = sqr(px) + sqr(py) + sqr(pz);
    Momentum::new(px, py, pz, sqrt(p2 + sqr(mass)))
}

/// Transverse momentum
pub fn pt(p: &Momentum) -> Float {
    p[X].hypot(p[Y])
}

/// Pseudorapidity
///
/// A momentum with no transverse component has no finite pseudorapidity. We
/// return 0 when it has no longitudinal component either, and an infinity of
/// the appropriate sign otherwise.
pub fn eta(p: &Momentum) -> Float {
    let pt = pt(p);
    if pt == 0. {
        if p[Z] == 0. {
            0.
        } else {
            p[Z].signum() * Float::INFINITY
        }
    } else {
        (p[Z] / pt).asinh()
    }
}

/// Azimuth, in [-π, π]
pub fn phi(p: &Momentum) -> Float {
    if p[X] == 0. && p[Y] == 0. {
        0.
    } else {
        p[Y].atan2(p[X])
    }
}

/// Invariant mass
///
/// Rounding can make the squared mass of a (nearly) massless momentum
/// slightly negative. In that case we return -√(-m²) rather than NaN.
pub fn mass(p: &Momentum) -> Float {
    let m2 = sqr(p[E]) - (sqr(p[X]) + sqr(p[Y]) + sqr(p[Z]));
    if m2 < 0. {
        -sqrt(-m2)
    } else {
        sqrt(m2)
    }
}
