#![warn(clippy::all, clippy::pedantic)]

// disable some style lints
#![allow(clippy::needless_return, clippy::must_use_candidate, clippy::comparison_chain)]
#![allow(clippy::redundant_field_names, clippy::redundant_closure_for_method_calls)]
#![allow(clippy::unreadable_literal, clippy::option_if_let_else, clippy::range_plus_one)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc, clippy::module_name_repetitions)]

#![allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap, clippy::cast_lossless, clippy::cast_sign_loss)]
#![allow(clippy::default_trait_access)]

// Tests lints
#![cfg_attr(test, allow(clippy::float_cmp))]

//! Pair enumeration and trajectory diagnostics for 2D systems of
//! self-propelled particles in a periodic box.
//!
//! A [`PairSet`] finds all pairs of particles closer than a given distance in
//! one snapshot of a [`Trajectory`], and then follows these pairs in later
//! snapshots to compute their mean square relative displacement and a
//! short-time Lyapunov exponent.

pub mod types;
pub use types::*;

mod errors;
pub use self::errors::Error;

pub mod trajectory;
pub use trajectory::{Trajectory, SimpleTrajectory, SimulationBox};

pub mod pairs;
pub use pairs::{PairSet, PairSearch, Pair};

mod diagnostics;
pub use diagnostics::LagStatistics;
