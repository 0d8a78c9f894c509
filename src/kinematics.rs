//! Kinematic quantities derived from the selected objects

use crate::{
    angular::{delta_phi, delta_r},
    config::Configuration,
    momentum::{self, Momentum},
    numeric::Float,
    object::{AuxFlag, PhysicsObject, Selection},
};

use num_traits::Zero;
use prefix_num_ops::real::*;

/// Pseudorapidity reported when no object was selected
pub const UNDEFINED_ETA: Float = -999.;

/// Invariant mass of a pair of objects
pub fn invariant_mass(p4_a: &Momentum, p4_b: &Momentum) -> Float {
    momentum::mass(&(p4_a + p4_b))
}

/// Transverse mass of a lepton and the missing transverse momentum
pub fn transverse_mass(lepton: &Momentum, met_pt: Float, met_phi: Float) -> Float {
    let dphi = delta_phi(momentum::phi(lepton), met_phi);
    sqrt(2. * momentum::pt(lepton) * met_pt * (1. - cos(dphi)))
}

/// 4-momentum of the selected object, or the zero vector if there is none
pub fn four_vector_from_index(collection: &[PhysicsObject], selection: Selection) -> Momentum {
    selected(collection, selection).map_or_else(Momentum::zero, PhysicsObject::p4)
}

/// Transverse momentum of the selected object, or 0 if there is none
pub fn leading_pt(collection: &[PhysicsObject], selection: Selection) -> Float {
    selected(collection, selection).map_or(0., |obj| obj.pt)
}

/// Pseudorapidity of the selected object, or UNDEFINED_ETA if there is none
pub fn leading_eta(collection: &[PhysicsObject], selection: Selection) -> Float {
    selected(collection, selection).map_or(UNDEFINED_ETA, |obj| obj.eta)
}

/// Look up the selected object
///
/// Selections are expected to come from the same collection, so an
/// out-of-range index is a caller bug.
fn selected(collection: &[PhysicsObject], selection: Selection) -> Option<&PhysicsObject> {
    selection.map(|index| &collection[index])
}

/// Decide whether the event contains a b-tagged jet which does not overlap
/// with the lepton and the tau, in which case it should be vetoed
///
/// Every jet of the collection is considered, and nothing past its end.
/// Reference objects which were not selected are replaced by the direction
/// of a zero 4-momentum (η = 0, φ = 0), which jets must then stay away from.
pub fn btag_veto(
    lepton: Option<&PhysicsObject>,
    secondary: Option<&PhysicsObject>,
    jets: &[PhysicsObject],
    cfg: &Configuration,
) -> bool {
    let lepton = PhysicsObject::or_zero(lepton);
    let secondary = PhysicsObject::or_zero(secondary);
    jets.iter().any(|jet| {
        delta_r(jet, &lepton) > cfg.min_separation
            && delta_r(jet, &secondary) > cfg.min_separation
            && jet.pt > cfg.btag_min_pt
            && abs(jet.eta) < cfg.btag_max_abs_eta
            && jet
                .aux_float(AuxFlag::BTag)
                .map_or(false, |score| score > cfg.btag_min_score)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        momentum::{E, X},
        numeric::reals::consts::PI,
    };

    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn bjet(pt: Float, eta: Float, phi: Float, score: Float) -> PhysicsObject {
        PhysicsObject::new(pt, eta, phi, 5.).with_float(AuxFlag::BTag, score)
    }

    #[test]
    fn back_to_back_massless_pair() {
        let a = Momentum::new(45., 0., 0., 45.);
        let b = Momentum::new(-45., 0., 0., 45.);
        assert_relative_eq!(invariant_mass(&a, &b), 90.);
    }

    #[test]
    fn mass_of_pair_built_from_collider_coordinates() {
        let muon = PhysicsObject::new(40., 0.3, 0.2, 0.105);
        let tau = PhysicsObject::new(35., -0.4, 0.2 + PI, 1.777);
        let m = invariant_mass(&muon.p4(), &tau.p4());
        // m² ≈ 2 pt1 pt2 (cosh Δη - cos Δφ) for light objects
        let approx_m = sqrt(2. * 40. * 35. * ((0.7 as Float).cosh() + 1.));
        assert_relative_eq!(m, approx_m, max_relative = 1e-2);
    }

    #[test]
    fn transverse_mass_limits() {
        let lepton = PhysicsObject::new(30., 1.2, 0.7, 0.).p4();
        assert_abs_diff_eq!(transverse_mass(&lepton, 25., 0.7), 0., epsilon = 1e-2);
        assert_relative_eq!(
            transverse_mass(&lepton, 25., 0.7 - PI),
            sqrt(4. * 30. * 25.),
            max_relative = 1e-4
        );
        assert_relative_eq!(
            transverse_mass(&lepton, 25., 0.7 + PI),
            sqrt(4. * 30. * 25.),
            max_relative = 1e-4
        );
    }

    #[test]
    fn missing_selection_gives_neutral_values() {
        let taus = vec![PhysicsObject::new(30., 1., 1., 1.)];
        assert_eq!(four_vector_from_index(&taus, None), Momentum::zeros());
        assert_eq!(four_vector_from_index(&[], None), Momentum::zeros());
        assert_eq!(leading_pt(&taus, None), 0.);
        assert_eq!(leading_eta(&taus, None), UNDEFINED_ETA);
    }

    #[test]
    fn selection_gives_object_values() {
        let taus = vec![
            PhysicsObject::new(30., 1., 1., 1.),
            PhysicsObject::new(45., -0.5, 0., 0.),
        ];
        let p4 = four_vector_from_index(&taus, Some(1));
        assert_relative_eq!(p4[X], 45.);
        assert_relative_eq!(p4[E], 45. * (0.5 as Float).cosh(), max_relative = 1e-5);
        assert_eq!(leading_pt(&taus, Some(1)), 45.);
        assert_eq!(leading_eta(&taus, Some(0)), 1.);
    }

    #[test]
    fn btag_veto_needs_a_good_isolated_bjet() {
        let cfg = Configuration::default();
        let muon = PhysicsObject::new(30., 0., 0., 0.);
        let tau = PhysicsObject::new(30., 0., PI, 0.);
        let veto = |jets: &[PhysicsObject]| btag_veto(Some(&muon), Some(&tau), jets, &cfg);

        assert!(!veto(&[]));
        assert!(veto(&[bjet(30., 1., 1.5, 0.5)]));
        // Overlapping with the muon, then with the tau
        assert!(!veto(&[bjet(30., 0.1, 0.1, 0.5)]));
        assert!(!veto(&[bjet(30., 0.1, PI - 0.1, 0.5)]));
        // Too soft, too forward, not b-tagged, no b-tag information
        assert!(!veto(&[bjet(20., 1., 1.5, 0.5)]));
        assert!(!veto(&[bjet(30., 2.4, 1.5, 0.5)]));
        assert!(!veto(&[bjet(30., 1., 1.5, 0.0494)]));
        assert!(!veto(&[PhysicsObject::new(30., 1., 1.5, 5.)]));
        // Any good jet is enough, wherever it is
        assert!(veto(&[
            bjet(30., 0.1, 0.1, 0.5),
            bjet(10., 1., 1.5, 0.5),
            bjet(30., -1., -1.5, 0.9),
        ]));
    }

    #[test]
    fn btag_veto_without_references_avoids_the_origin_direction() {
        let cfg = Configuration::default();
        let central = bjet(30., 0.1, 0.1, 0.5);
        let away = bjet(30., 1., 1.5, 0.5);
        assert!(!btag_veto(None, None, &[central], &cfg));
        assert!(btag_veto(None, None, &[central, away], &cfg));

        // Only the missing reference falls back to the origin direction
        let muon = PhysicsObject::new(30., 1., 1.4, 0.);
        assert!(!btag_veto(Some(&muon), None, &[central, away], &cfg));
        let tau = PhysicsObject::new(30., -1., -1.5, 0.);
        assert!(btag_veto(None, Some(&tau), &[central, away], &cfg));
    }
}
