//! Angular separation in the (η, φ) plane

use crate::{
    numeric::{
        functions::sqr,
        reals::consts::{PI, TAU},
        Float,
    },
    object::PhysicsObject,
};

use prefix_num_ops::real::{abs, sqrt};

/// Map an angle into (-π, π]
///
/// Angles that are already in range are returned untouched, so that wrapping
/// does not introduce rounding errors in the common case.
///
/// Out-of-range angles are folded by magnitude and get their sign back
/// afterwards, so `wrap_phi(-x) == -wrap_phi(x)` holds bit for bit away from
/// the ±π boundary. This keeps ΔR exactly symmetric.
pub fn wrap_phi(x: Float) -> Float {
    if x > -PI && x <= PI {
        return x;
    }
    let folded = (abs(x) + PI).rem_euclid(TAU) - PI;
    let wrapped = x.signum() * folded;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Azimuthal difference φ1 - φ2, wrapped into (-π, π]
pub fn delta_phi(phi_1: Float, phi_2: Float) -> Float {
    wrap_phi(phi_1 - phi_2)
}

/// Euclidean distance in (η, wrapped Δφ) space, usually called ΔR
pub fn distance(eta_1: Float, phi_1: Float, eta_2: Float, phi_2: Float) -> Float {
    sqrt(sqr(eta_1 - eta_2) + sqr(delta_phi(phi_1, phi_2)))
}

/// ΔR between two reconstructed objects
pub fn delta_r(a: &PhysicsObject, b: &PhysicsObject) -> Float {
    distance(a.eta, a.phi, b.eta, b.phi)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use rand::{Rng, SeedableRng};
    use rand_xoshiro::Xoshiro256Plus;

    #[test]
    fn wrapping_keeps_in_range_angles() {
        assert_eq!(wrap_phi(0.3), 0.3);
        assert_eq!(wrap_phi(-3.1), -3.1);
        assert_eq!(wrap_phi(PI), PI);
    }

    #[test]
    fn wrapping_lands_in_half_open_range() {
        assert_relative_eq!(wrap_phi(-PI), PI);
        assert_relative_eq!(wrap_phi(-PI - 1.), PI - 1., max_relative = 1e-5);
        assert_abs_diff_eq!(wrap_phi(TAU + 0.5), 0.5, epsilon = 1e-5);
        assert_abs_diff_eq!(wrap_phi(-TAU - 0.5), -0.5, epsilon = 1e-5);
        assert_abs_diff_eq!(wrap_phi(6.0), 6.0 - TAU, epsilon = 1e-5);
    }

    #[test]
    fn distance_uses_wrapped_azimuth() {
        let dr = distance(0., 3., 0., -3.);
        assert_abs_diff_eq!(dr, TAU - 6., epsilon = 1e-5);
        assert!(dr < 0.3);
    }

    #[test]
    fn distance_is_pythagorean() {
        assert_relative_eq!(distance(1., 0.5, -2., 4.5 - TAU), 5., max_relative = 1e-5);
    }

    #[test]
    fn distance_is_symmetric_and_non_negative() {
        let mut rng = Xoshiro256Plus::seed_from_u64(0x5eed);
        for _ in 0..200_000 {
            let eta_1 = rng.gen_range(-5.0..5.0);
            let eta_2 = rng.gen_range(-5.0..5.0);
            let phi_1 = rng.gen_range(-10.0..10.0);
            let phi_2 = rng.gen_range(-10.0..10.0);
            let forward = distance(eta_1, phi_1, eta_2, phi_2);
            let backward = distance(eta_2, phi_2, eta_1, phi_1);
            assert!(forward >= 0.);
            assert_eq!(forward, backward, "φ1 = {phi_1}, φ2 = {phi_2}");
        }
    }

    #[test]
    fn out_of_range_wrapping_mirrors_exactly() {
        // Δφ of these azimuths is well beyond π in either direction
        let (phi_1, phi_2): (Float, Float) = (-8.475004, 5.8778524);
        assert_eq!(wrap_phi(phi_1 - phi_2), -wrap_phi(phi_2 - phi_1));
        assert_eq!(
            distance(-2.517554, phi_1, -4.6799545, phi_2),
            distance(-4.6799545, phi_2, -2.517554, phi_1)
        );
        for x in [3.5, 7., 12.25, 100.] {
            assert_eq!(wrap_phi(-x), -wrap_phi(x));
        }
    }

    #[test]
    fn nan_only_from_nan() {
        assert!(distance(Float::NAN, 0., 0., 0.).is_nan());
        assert!(!distance(0., 0., 0., 0.).is_nan());
    }
}
