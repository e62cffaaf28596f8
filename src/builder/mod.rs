//! Configuration-time API.
//!
//! A [`MachineBuilder`] collects states, transitions, entry callbacks and
//! accepting states, then starts any number of independent
//! [`Machine`](crate::machine::Machine)s over the result. The [`paths!`]
//! macro keeps large hand-written grammars terse.
//!
//! [`paths!`]: crate::paths

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::MachineBuilder;
