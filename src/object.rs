//! This module defines reconstructed physics objects and the ways we refer to
//! them within an event

use crate::{
    momentum::{self, Momentum},
    numeric::Float,
};

/// Auxiliary per-object quantities, beyond the basic kinematics
///
/// Each object category only fills the flags which make sense for it (e.g.
/// isolation for muons, trigger bits for trigger objects).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum AuxFlag {
    /// Absolute isolation energy (GeV)
    Isolation,

    /// Longitudinal impact parameter (cm)
    ImpactParamZ,

    /// Jet identification working point
    JetId,

    /// b-tag discriminant
    BTag,

    /// Trigger object type (PDG-like id, 13 for muons, 15 for taus...)
    TriggerId,

    /// Bitmask of the trigger filters which fired for a trigger object
    TriggerBits,

    /// Transverse momentum of the L1 seed of a trigger object (GeV)
    L1Pt,

    /// Isolation flag of the L1 seed of a trigger object
    L1Iso,
}
//
impl AuxFlag {
    /// Number of auxiliary flags
    pub const COUNT: usize = 8;

    /// Slot of this flag in auxiliary storage
    fn slot(self) -> usize {
        self as usize
    }
}

/// Value of an auxiliary flag, as found in the ntuple columns
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AuxValue {
    /// Floating-point column (isolation, b-tag score...)
    Float(Float),
    /// Integer column (trigger id, bits...)
    Int(i32),
}

/// Reconstructed physics object (muon, tau, jet, trigger object...)
///
/// Objects are built fresh for each event and never mutated afterwards.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PhysicsObject {
    /// Transverse momentum (GeV)
    pub pt: Float,

    /// Pseudorapidity
    pub eta: Float,

    /// Azimuth
    pub phi: Float,

    /// Mass (GeV)
    pub mass: Float,

    /// Auxiliary flags, indexed by AuxFlag
    aux: [Option<AuxValue>; AuxFlag::COUNT],
}
//
impl PhysicsObject {
    /// Object with a zero 4-momentum, whose direction is η = 0, φ = 0
    ///
    /// Stands in for an object which was not selected wherever its direction
    /// is still needed, e.g. as an overlap removal reference.
    pub const ZERO: Self = Self {
        pt: 0.,
        eta: 0.,
        phi: 0.,
        mass: 0.,
        aux: [None; AuxFlag::COUNT],
    };

    /// The selected object, or ZERO if there is none
    pub fn or_zero(selected: Option<&Self>) -> Self {
        selected.copied().unwrap_or(Self::ZERO)
    }

    /// Build an object from its kinematics, without any auxiliary flag
    pub fn new(pt: Float, eta: Float, phi: Float, mass: Float) -> Self {
        Self {
            pt,
            eta,
            phi,
            mass,
            aux: [None; AuxFlag::COUNT],
        }
    }

    /// Attach an auxiliary flag to this object
    pub fn with_aux(mut self, flag: AuxFlag, value: AuxValue) -> Self {
        self.aux[flag.slot()] = Some(value);
        self
    }

    /// Attach a floating-point auxiliary flag to this object
    pub fn with_float(self, flag: AuxFlag, value: Float) -> Self {
        self.with_aux(flag, AuxValue::Float(value))
    }

    /// Attach an integer auxiliary flag to this object
    pub fn with_int(self, flag: AuxFlag, value: i32) -> Self {
        self.with_aux(flag, AuxValue::Int(value))
    }

    /// Raw auxiliary flag, if set
    pub fn aux(&self, flag: AuxFlag) -> Option<AuxValue> {
        self.aux[flag.slot()]
    }

    /// Auxiliary flag as a floating-point number (integers are converted)
    pub fn aux_float(&self, flag: AuxFlag) -> Option<Float> {
        match self.aux(flag)? {
            AuxValue::Float(x) => Some(x),
            AuxValue::Int(i) => Some(i as Float),
        }
    }

    /// Auxiliary flag as an integer
    ///
    /// Floating-point values are not silently truncated: they read as unset.
    pub fn aux_int(&self, flag: AuxFlag) -> Option<i32> {
        match self.aux(flag)? {
            AuxValue::Int(i) => Some(i),
            AuxValue::Float(_) => None,
        }
    }

    /// 4-momentum of this object
    pub fn p4(&self) -> Momentum {
        momentum::from_pt_eta_phi_m(self.pt, self.eta, self.phi, self.mass)
    }
}

/// All objects of one category within one event, in input order
pub type ObjectCollection = Vec<PhysicsObject>;

/// Outcome of an object selection: index of the selected object, if any
pub type Selection = Option<usize>;

/// Sentinel used by the dataframe engine for "no selected object"
pub const NO_SELECTION: i32 = -1;

/// Convert a selection to the dataframe engine's integer convention
///
/// Indices which do not fit in an i32 cannot come from an engine column.
/// They trip a debug assertion, and read as NO_SELECTION in release builds.
pub fn to_sentinel(selection: Selection) -> i32 {
    match selection {
        Some(index) => i32::try_from(index).unwrap_or_else(|_| {
            debug_assert!(false, "selected index {index} does not fit in an i32");
            NO_SELECTION
        }),
        None => NO_SELECTION,
    }
}

/// Convert the dataframe engine's integer convention back into a selection
///
/// Any negative value reads as "no selection", like the original `index >= 0`
/// checks did.
pub fn from_sentinel(index: i32) -> Selection {
    usize::try_from(index).ok()
}
