//! Runtime cursor over a compiled graph.
//!
//! A [`Machine`] is started from a [`MachineBuilder`](crate::MachineBuilder)
//! and consumes transition labels one at a time. Entry callbacks run
//! synchronously inside [`Machine::transition`]; nothing is deferred.

pub mod error;
mod run;

pub use error::MachineError;
pub use run::{Machine, RunState};
