//! pico_ntupler: object selection helpers for mu+tau ntuple production
//!
//!
//! # Introduction (for the physicist)
//!
//! This library selects, in each event, a tag muon matched to the single muon
//! trigger, a hadronic tau away from it, and a jet away from both. It then
//! derives the usual quantities of a mu+tau analysis from them: visible mass,
//! transverse mass with respect to the missing transverse momentum, a b-tag
//! veto, and the trigger legs that the tau and the jet are matched to.
//!
//!
//! # Introduction (for the computer guy)
//!
//! Everything here is a pure function of one event's content. The dataframe
//! engine which drives the event loop calls these helpers once per row,
//! possibly from several threads at once, and writes their results out.
//!
//! Objects are handled as small immutable value types instead of parallel
//! arrays. The `columns` module converts from the engine's columnar layout.
//!
//! Selections which find no suitable object yield `None`, which maps to the
//! engine's `-1` sentinel, and kinematic helpers fall back to neutral values
//! (zero 4-momentum, zero pt, `-999` pseudorapidity) in that case.

#![warn(missing_docs)]

pub mod angular;
pub mod columns;
pub mod config;
pub mod event;
pub mod kinematics;
pub mod momentum;
pub mod numeric;
pub mod object;
pub mod selection;
pub mod trigger;

pub use crate::{
    config::Configuration,
    event::{Event, EventSelector, EventSummary, MissingEt},
    object::{AuxFlag, AuxValue, ObjectCollection, PhysicsObject, Selection},
    selection::{select_best, QualityCuts},
    trigger::TriggerFilter,
};

/// We'll use eyre's type-erased result type throughout the library
pub type Result<T> = eyre::Result<T>;
