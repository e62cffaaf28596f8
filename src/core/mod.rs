//! Core graph types.
//!
//! This module contains the data the engine is built around:
//! - State names and per-state records
//! - The state registry and its lookup helpers
//! - Run history and serializable graph descriptions
//!
//! Nothing in here runs callbacks or tracks a cursor; that is the job of
//! [`Machine`](crate::machine::Machine).

mod description;
pub(crate) mod graph;
mod history;
mod state;

pub use description::{GraphDescription, StateDescription};
pub use history::{RunHistory, Step};
pub use state::{CallbackError, EntryCallback, StateName};
