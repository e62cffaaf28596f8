//! lexdfa: a deterministic finite automaton engine for token-stream parsers.
//!
//! A grammar is declared by hand as a graph of named states joined by
//! labeled transitions. Labels are usually the string form of token kinds
//! produced by a lexer. Entry callbacks attached to a state run every time
//! the state is entered, which is where a parser builds its syntax tree.
//!
//! # Core Concepts
//!
//! - **MachineBuilder**: declares paths, entry callbacks and accepting states
//! - **Machine**: one run over the declared graph, driven label by label
//! - **Checkpoint**: a serialized machine cursor that can be resumed later
//!
//! Usage is two-phase. The builder is configured through `&mut self`;
//! [`MachineBuilder::start`] borrows it immutably, so the graph is frozen for
//! as long as any machine is running over it.
//!
//! # Example
//!
//! ```rust
//! use lexdfa::{MachineBuilder, MachineError};
//! use std::sync::{Arc, Mutex};
//!
//! let trace = Arc::new(Mutex::new(Vec::new()));
//!
//! let mut builder = MachineBuilder::new();
//! builder.path("start", "number", "number");
//! builder.path("number", "semicolon", "start");
//! for state in ["start", "number"] {
//!     let trace = Arc::clone(&trace);
//!     builder
//!         .when_entering(state, move || trace.lock().unwrap().push(state))
//!         .unwrap();
//! }
//! builder.accept("start").unwrap();
//!
//! let mut machine = builder.start("start").unwrap();
//! machine.transition("number").unwrap();
//! assert!(matches!(
//!     machine.finish(),
//!     Err(MachineError::UnacceptableFinishState { .. })
//! ));
//!
//! machine.transition("semicolon").unwrap();
//! machine.finish().unwrap();
//!
//! assert_eq!(*trace.lock().unwrap(), vec!["number", "start"]);
//! ```

pub mod builder;
pub mod checkpoint;
pub mod config;
pub mod core;
pub mod machine;

// Re-export commonly used types
pub use crate::builder::{BuildError, MachineBuilder};
pub use crate::checkpoint::{Checkpoint, CheckpointError};
pub use crate::config::MachineConfig;
pub use crate::core::{CallbackError, GraphDescription, RunHistory, StateName, Step};
pub use crate::machine::{Machine, MachineError, RunState};
