//! Matching of offline objects to the online trigger objects which fired
//!
//! A candidate is trigger-matched when some trigger object of the right type,
//! with the right filter bits set, lies within `MATCH_RADIUS` of it in ΔR.

use crate::{
    angular::delta_r,
    numeric::Float,
    object::{AuxFlag, PhysicsObject},
};

/// Maximal ΔR between a candidate and a trigger object for them to match
pub const MATCH_RADIUS: Float = 0.5;

/// Trigger object type of muons
pub const MUON_ID: i32 = 13;

/// Trigger object type of taus
pub const TAU_ID: i32 = 15;

/// Filter bit of the isolated single muon path (tag leg)
pub const SINGLE_MUON_BITS: i32 = 2;

/// Filter bit shared by the tau legs of the lepton+tau and double-tau paths
pub const TAU_LEG_BITS: i32 = 512;

/// Filter bit specific to the double-tau path
pub const DOUBLE_TAU_BITS: i32 = 1024;

/// Minimal L1 seed pt for the electron+tau path's tau leg (GeV)
pub const EL_TAU_MIN_L1_PT: Float = 26.;

/// Check if a candidate is matched to a trigger object with the given type id
/// and with every bit of `required_bits` set
///
/// Every trigger object is considered, the first match wins.
pub fn trigger_matches(
    trigger_objects: &[PhysicsObject],
    candidate: &PhysicsObject,
    required_type_id: i32,
    required_bits: i32,
) -> bool {
    trigger_objects
        .iter()
        .any(|trig| is_close(trig, candidate) && has_identity(trig, required_type_id, required_bits))
}

/// Trigger filters that offline objects can be matched to
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TriggerFilter {
    /// Isolated single muon path (tag muon)
    SingleMuonTag,

    /// Tau leg of the double-tau path
    DoubleTau,

    /// Tau leg of the muon+tau path
    MuTau,

    /// Tau leg of the electron+tau path, which also requires an isolated
    /// L1 seed above threshold
    ElTau,

    /// Jet leg of the double-tau+jet path
    TauJet,
}
//
impl TriggerFilter {
    /// Decide whether a candidate is matched to this trigger filter
    pub fn matches(self, trigger_objects: &[PhysicsObject], candidate: &PhysicsObject) -> bool {
        match self {
            Self::SingleMuonTag => {
                trigger_matches(trigger_objects, candidate, MUON_ID, SINGLE_MUON_BITS)
            }
            Self::DoubleTau => trigger_matches(
                trigger_objects,
                candidate,
                TAU_ID,
                TAU_LEG_BITS | DOUBLE_TAU_BITS,
            ),
            Self::MuTau => trigger_matches(trigger_objects, candidate, TAU_ID, TAU_LEG_BITS),
            Self::ElTau => trigger_objects.iter().any(|trig| {
                is_close(trig, candidate)
                    && has_identity(trig, TAU_ID, TAU_LEG_BITS)
                    && has_isolated_l1_seed(trig)
            }),
            // FIXME: The jet leg filter bits are not stored in the trigger
            //        objects yet, so every jet passes until they are added.
            Self::TauJet => true,
        }
    }
}

/// L1 seed pt of the last tau trigger object matched to a candidate, or 0 if
/// no tau trigger object lies close enough
///
/// Filter bits are not checked here.
pub fn matched_l1_pt(trigger_objects: &[PhysicsObject], candidate: &PhysicsObject) -> Float {
    trigger_objects
        .iter()
        .rev()
        .find(|trig| is_close(trig, candidate) && trig.aux_int(AuxFlag::TriggerId) == Some(TAU_ID))
        .map(|trig| trig.aux_float(AuxFlag::L1Pt).unwrap_or(0.))
        .unwrap_or(0.)
}

/// Spatial part of trigger matching
fn is_close(trig: &PhysicsObject, candidate: &PhysicsObject) -> bool {
    delta_r(trig, candidate) < MATCH_RADIUS
}

/// Identity part of trigger matching. Trigger objects without an id or
/// filter bits never match.
fn has_identity(trig: &PhysicsObject, type_id: i32, bits: i32) -> bool {
    match (
        trig.aux_int(AuxFlag::TriggerId),
        trig.aux_int(AuxFlag::TriggerBits),
    ) {
        (Some(id), Some(trig_bits)) => id == type_id && trig_bits & bits == bits,
        _ => false,
    }
}

/// Extra L1 requirement of the electron+tau path
fn has_isolated_l1_seed(trig: &PhysicsObject) -> bool {
    let l1_pt = trig.aux_float(AuxFlag::L1Pt).unwrap_or(0.);
    let l1_iso = trig.aux_int(AuxFlag::L1Iso).unwrap_or(0);
    l1_pt > EL_TAU_MIN_L1_PT && l1_iso > 0
}
