//! Selection of the leading candidate of an object collection
//!
//! Every selection applies a set of quality cuts to each candidate, vetoes
//! candidates which overlap with previously selected objects of other
//! categories, and keeps the lowest-index candidate which survives.

use crate::{
    angular::delta_r,
    config::Configuration,
    numeric::Float,
    object::{AuxFlag, PhysicsObject, Selection},
    trigger::TriggerFilter,
};

use prefix_num_ops::real::abs;
use tracing::trace;

/// Cuts applied to each candidate of a selection
///
/// Optional cuts are simply not applied when unset. A cut that relies on an
/// auxiliary flag rejects every candidate which lacks that flag.
#[derive(Clone, Debug, PartialEq)]
pub struct QualityCuts {
    /// Minimal transverse momentum (GeV)
    pub min_pt: Float,

    /// Maximal |η|
    pub max_abs_eta: Option<Float>,

    /// Maximal isolation / pt ratio
    pub max_iso_ratio: Option<Float>,

    /// Maximal longitudinal impact parameter (cm)
    pub max_dz: Option<Float>,

    /// Minimal jet identification working point
    pub min_jet_id: Option<Float>,

    /// Minimal ΔR with respect to every veto reference
    pub min_separation: Float,

    /// Trigger filter that the candidate must be matched to
    pub trigger: Option<TriggerFilter>,
}
//
impl QualityCuts {
    /// Cuts on the tag muon
    pub fn muon(cfg: &Configuration) -> Self {
        Self {
            min_pt: cfg.muon_min_pt,
            max_abs_eta: Some(cfg.muon_max_abs_eta),
            max_iso_ratio: Some(cfg.muon_max_iso_ratio),
            max_dz: None,
            min_jet_id: None,
            min_separation: cfg.min_separation,
            trigger: Some(TriggerFilter::SingleMuonTag),
        }
    }

    /// Cuts on the tau
    pub fn tau(cfg: &Configuration) -> Self {
        Self {
            min_pt: cfg.tau_min_pt,
            max_abs_eta: Some(cfg.tau_max_abs_eta),
            max_iso_ratio: None,
            max_dz: Some(cfg.tau_max_dz),
            min_jet_id: None,
            min_separation: cfg.min_separation,
            trigger: None,
        }
    }

    /// Cuts on the jet
    pub fn jet(cfg: &Configuration) -> Self {
        Self {
            min_pt: cfg.jet_min_pt,
            max_abs_eta: None,
            max_iso_ratio: None,
            max_dz: None,
            min_jet_id: Some(cfg.jet_min_id),
            min_separation: cfg.min_separation,
            trigger: None,
        }
    }

    /// Decide whether a candidate passes these cuts
    pub fn keep(
        &self,
        candidate: &PhysicsObject,
        veto_refs: &[PhysicsObject],
        trigger_objects: &[PhysicsObject],
    ) -> bool {
        // Kinematic cuts
        if candidate.pt < self.min_pt {
            return false;
        }
        if let Some(max_abs_eta) = self.max_abs_eta {
            if abs(candidate.eta) > max_abs_eta {
                return false;
            }
        }

        // Identification cuts. Like the kinematic cuts, these reject on the
        // failing comparison, so a NaN value is not rejected.
        if let Some(max_iso_ratio) = self.max_iso_ratio {
            match candidate.aux_float(AuxFlag::Isolation) {
                Some(iso) if iso / candidate.pt > max_iso_ratio => return false,
                Some(_) => {}
                None => return false,
            }
        }
        if let Some(max_dz) = self.max_dz {
            match candidate.aux_float(AuxFlag::ImpactParamZ) {
                Some(dz) if dz > max_dz => return false,
                Some(_) => {}
                None => return false,
            }
        }
        if let Some(min_jet_id) = self.min_jet_id {
            match candidate.aux_float(AuxFlag::JetId) {
                Some(id) if id < min_jet_id => return false,
                Some(_) => {}
                None => return false,
            }
        }

        // Overlap removal
        if veto_refs
            .iter()
            .any(|reference| delta_r(candidate, reference) < self.min_separation)
        {
            return false;
        }

        // Trigger matching is the most expensive cut, so it comes last
        self.trigger
            .map_or(true, |filter| filter.matches(trigger_objects, candidate))
    }
}

/// Select the lowest-index candidate of a collection which passes every cut
///
/// Returns None if the collection is empty or if no candidate passes.
pub fn select_best(
    collection: &[PhysicsObject],
    cuts: &QualityCuts,
    veto_refs: &[PhysicsObject],
    trigger_objects: &[PhysicsObject],
) -> Selection {
    let selection = collection
        .iter()
        .position(|candidate| cuts.keep(candidate, veto_refs, trigger_objects));
    trace!(
        candidates = collection.len(),
        ?selection,
        "Selected leading candidate"
    );
    selection
}

/// Select the tag muon, which must be matched to the single muon trigger
pub fn muon_index(
    muons: &[PhysicsObject],
    trigger_objects: &[PhysicsObject],
    cfg: &Configuration,
) -> Selection {
    select_best(muons, &QualityCuts::muon(cfg), &[], trigger_objects)
}

/// Select the tau, away from the tag muon
///
/// When no muon was selected, taus must stay away from the direction of a
/// zero 4-momentum (η = 0, φ = 0) instead.
pub fn tau_index(
    taus: &[PhysicsObject],
    muon: Option<&PhysicsObject>,
    cfg: &Configuration,
) -> Selection {
    let veto_refs = [PhysicsObject::or_zero(muon)];
    select_best(taus, &QualityCuts::tau(cfg), &veto_refs, &[])
}

/// Select the jet, away from the tag muon and the tau
///
/// Objects which were not selected are replaced by the direction of a zero
/// 4-momentum (η = 0, φ = 0), as in tau_index.
pub fn jet_index(
    jets: &[PhysicsObject],
    muon: Option<&PhysicsObject>,
    tau: Option<&PhysicsObject>,
    cfg: &Configuration,
) -> Selection {
    let veto_refs = [PhysicsObject::or_zero(muon), PhysicsObject::or_zero(tau)];
    select_best(jets, &QualityCuts::jet(cfg), &veto_refs, &[])
}
