//! Secret Santa draw engine.
//!
//! Assigns every participant exactly one other participant to buy a gift
//! for, never themselves and never their declared partner. A bounded number
//! of random single-cycle draws handles the usual sparse case; an exhaustive
//! backtracking search takes over when those run out, so an infeasible
//! roster is always detected rather than guessed at.

mod error;
mod forbidden;
mod generator;
mod participant;
mod roster;
mod solver;
mod validate;

pub use error::{GenerateError, RosterError, RosterResult};
pub use forbidden::{ForbiddenPair, ForbiddenPairs};
pub use generator::{generate, Generator, GeneratorConfig, Outcome, DEFAULT_MAX_ATTEMPTS};
pub use participant::{Assignment, AssignmentSet, Participant};
pub use roster::Roster;
pub use solver::{SolveStats, Solver};
pub use validate::{validate, Validation, Violation};
