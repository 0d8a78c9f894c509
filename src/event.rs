//! This module runs the whole mu+tau selection chain on one event
//!
//! It only strings together the selection and kinematics helpers, in the
//! order in which the ntuple columns depend on each other: muon, then tau
//! (away from the muon), then jet (away from both).

use crate::{
    config::Configuration,
    kinematics,
    momentum::Momentum,
    numeric::Float,
    object::{self, PhysicsObject, Selection},
    selection,
    trigger::{self, TriggerFilter},
};

/// Missing transverse momentum of an event
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct MissingEt {
    /// Magnitude (GeV)
    pub pt: Float,

    /// Azimuth
    pub phi: Float,
}

/// Reconstructed content of one event
#[derive(Copy, Clone, Debug)]
pub struct Event<'data> {
    /// Muon candidates
    pub muons: &'data [PhysicsObject],

    /// Tau candidates
    pub taus: &'data [PhysicsObject],

    /// Jet candidates
    pub jets: &'data [PhysicsObject],

    /// Online trigger objects
    pub trigger_objects: &'data [PhysicsObject],

    /// Missing transverse momentum
    pub met: MissingEt,
}

/// Derived per-event quantities, as written out to the ntuple
#[derive(Clone, Debug, PartialEq)]
pub struct EventSummary {
    /// Selected tag muon
    pub muon: Selection,

    /// Selected tau
    pub tau: Selection,

    /// Selected jet
    pub jet: Selection,

    /// Tag muon 4-momentum (zero if none)
    pub muon_p4: Momentum,

    /// Tau 4-momentum (zero if none)
    pub tau_p4: Momentum,

    /// Jet 4-momentum (zero if none)
    pub jet_p4: Momentum,

    /// Visible mass of the muon + tau system
    pub visible_mass: Float,

    /// Transverse mass of the muon and the missing transverse momentum
    pub transverse_mass: Float,

    /// Whether a b-tagged jet away from the muon and the tau was found
    pub btag_veto: bool,

    /// Tau transverse momentum (0 if none)
    pub tau_pt: Float,

    /// Tau pseudorapidity (kinematics::UNDEFINED_ETA if none)
    pub tau_eta: Float,

    /// L1 seed pt of the trigger object matched to the tau (0 if none)
    pub tau_l1_pt: Float,

    /// Tau matched to the double-tau trigger
    pub pass_double_tau: bool,

    /// Tau matched to the muon+tau trigger
    pub pass_mu_tau: bool,

    /// Tau matched to the electron+tau trigger
    pub pass_el_tau: bool,

    /// Jet matched to the double-tau+jet trigger (currently always true, even
    /// without a selected jet, see TriggerFilter::TauJet)
    pub pass_tau_jet: bool,
}
//
impl EventSummary {
    /// Selected muon index, in the dataframe engine's convention
    pub fn muon_index(&self) -> i32 {
        object::to_sentinel(self.muon)
    }

    /// Selected tau index, in the dataframe engine's convention
    pub fn tau_index(&self) -> i32 {
        object::to_sentinel(self.tau)
    }

    /// Selected jet index, in the dataframe engine's convention
    pub fn jet_index(&self) -> i32 {
        object::to_sentinel(self.jet)
    }
}

/// Runs the selection chain with a given set of cuts
pub struct EventSelector {
    cfg: Configuration,
}
//
impl EventSelector {
    /// Set up the selection chain
    pub fn new(cfg: Configuration) -> Self {
        Self { cfg }
    }

    /// Cuts in use
    pub fn config(&self) -> &Configuration {
        &self.cfg
    }

    /// Select objects and compute derived quantities for one event
    pub fn process(&self, event: &Event) -> EventSummary {
        let cfg = &self.cfg;

        // Object selection
        let muon = selection::muon_index(event.muons, event.trigger_objects, cfg);
        let muon_obj = muon.map(|i| &event.muons[i]);
        let tau = selection::tau_index(event.taus, muon_obj, cfg);
        let tau_obj = tau.map(|i| &event.taus[i]);
        let jet = selection::jet_index(event.jets, muon_obj, tau_obj, cfg);
        let jet_obj = jet.map(|i| &event.jets[i]);

        // Kinematics
        let muon_p4 = kinematics::four_vector_from_index(event.muons, muon);
        let tau_p4 = kinematics::four_vector_from_index(event.taus, tau);
        let jet_p4 = kinematics::four_vector_from_index(event.jets, jet);
        let visible_mass = kinematics::invariant_mass(&muon_p4, &tau_p4);
        let transverse_mass =
            kinematics::transverse_mass(&muon_p4, event.met.pt, event.met.phi);
        let btag_veto = kinematics::btag_veto(muon_obj, tau_obj, event.jets, cfg);

        // Trigger legs of the selected objects
        let tau_passes = |filter: TriggerFilter| {
            tau_obj.map_or(false, |tau| filter.matches(event.trigger_objects, tau))
        };
        let pass_tau_jet =
            TriggerFilter::TauJet.matches(event.trigger_objects, &PhysicsObject::or_zero(jet_obj));
        let tau_l1_pt = tau_obj.map_or(0., |tau| trigger::matched_l1_pt(event.trigger_objects, tau));

        EventSummary {
            muon,
            tau,
            jet,
            muon_p4,
            tau_p4,
            jet_p4,
            visible_mass,
            transverse_mass,
            btag_veto,
            tau_pt: kinematics::leading_pt(event.taus, tau),
            tau_eta: kinematics::leading_eta(event.taus, tau),
            tau_l1_pt,
            pass_double_tau: tau_passes(TriggerFilter::DoubleTau),
            pass_mu_tau: tau_passes(TriggerFilter::MuTau),
            pass_el_tau: tau_passes(TriggerFilter::ElTau),
            pass_tau_jet,
        }
    }
}

impl Default for EventSelector {
    fn default() -> Self {
        Self::new(Configuration::default())
    }
}
