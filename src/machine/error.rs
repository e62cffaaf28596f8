//! Errors raised while driving a machine.

use crate::core::{CallbackError, StateName};
use thiserror::Error;

/// Errors that can occur during `transition` and `finish`.
#[derive(Debug, Error)]
pub enum MachineError {
    #[error("No transition from state '{state}' on label '{label}'")]
    InvalidTransition { state: StateName, label: String },

    /// The run stopped in a state that is not accepting. The machine is
    /// still active and can keep being driven.
    #[error("Cannot finish in non-accepting state '{state}'")]
    UnacceptableFinishState { state: StateName },

    #[error("Machine has finished and can no longer be used")]
    Unusable,

    /// An entry callback of `state` failed. The machine is already in `state`.
    #[error("Entry callback for state '{state}' failed")]
    Callback {
        state: StateName,
        #[source]
        source: CallbackError,
    },
}

impl MachineError {
    /// Whether the error comes from calling a finished machine rather than
    /// from the input being driven through it.
    pub fn is_misuse(&self) -> bool {
        matches!(self, MachineError::Unusable)
    }
}
